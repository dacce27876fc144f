// @generated by mfs-gen. Do not edit.

pub static MFS_TABLE: &[::mfs_rs::FileDescriptor] = &[
    ::mfs_rs::FileDescriptor {
        name: ::std::borrow::Cow::Borrowed("empty.txt"),
        comp: ::mfs_rs::CompressionMethod::None,
        size_orig: 0,
        size_comp: 0,
        content: ::std::borrow::Cow::Borrowed(b""),
    },
    ::mfs_rs::FileDescriptor {
        name: ::std::borrow::Cow::Borrowed("hello.txt"),
        comp: ::mfs_rs::CompressionMethod::None,
        size_orig: 3,
        size_comp: 3,
        content: ::std::borrow::Cow::Borrowed(b"\
            \x68\x69\x0A\
        "),
    },
    ::mfs_rs::FileDescriptor {
        name: ::std::borrow::Cow::Borrowed("motd.txt"),
        comp: ::mfs_rs::CompressionMethod::None,
        size_orig: 65,
        size_comp: 65,
        content: ::std::borrow::Cow::Borrowed(b"\
            \x57\x65\x6C\x63\x6F\x6D\x65\x20\x61\x62\x6F\x61\x72\x64\x2E\x20\x4D\x69\x6E\x64\x20\x74\x68\x65\x20\x67\x61\x70\x20\x62\x65\x74\
            \x77\x65\x65\x6E\x20\x74\x68\x65\x20\x74\x72\x61\x69\x6E\x20\x61\x6E\x64\x20\x74\x68\x65\x20\x70\x6C\x61\x74\x66\x6F\x72\x6D\x2E\
            \x0A\
        "),
    },
];
