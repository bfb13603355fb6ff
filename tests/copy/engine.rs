use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};
use std::os::fd::AsFd;

use platkit::config::{CopyTuning, ZeroCopyPolicy};
use platkit::copy::{copy_range, CopyEngine, CopyError};

use crate::helpers::{pattern, with_temp_root, write_file};

fn read_back(mut f: &File) -> Vec<u8> {
    let mut v = Vec::new();
    f.seek(SeekFrom::Start(0)).unwrap();
    f.read_to_end(&mut v).unwrap();
    v
}

#[test]
fn file_to_file_copy_matches_the_source() {
    let root = with_temp_root();
    let data = pattern(1 << 20);
    let src = File::open(write_file(&root, "src", &data)).unwrap();
    let dst = File::options()
        .read(true)
        .write(true)
        .create(true)
        .truncate(true)
        .open(root.path().join("dst"))
        .unwrap();
    let rep = copy_range(src.as_fd(), dst.as_fd(), None).unwrap();
    assert_eq!(rep.copied, data.len() as u64);
    assert_eq!(read_back(&dst), data);
}

#[test]
fn copy_resumes_from_the_current_offsets() {
    let root = with_temp_root();
    let data = pattern(8_192);
    let mut src = File::open(write_file(&root, "src", &data)).unwrap();
    src.seek(SeekFrom::Start(1_000)).unwrap();
    let mut dst = tempfile::tempfile().unwrap();
    dst.write_all(b"head").unwrap();

    let mut engine = CopyEngine::from_tuning(&CopyTuning {
        zero_copy: ZeroCopyPolicy::Disabled,
        ..CopyTuning::default()
    });
    let rep = engine.copy(src.as_fd(), dst.as_fd(), Some(500)).unwrap();
    assert_eq!(rep.copied, 500);
    let out = read_back(&dst);
    assert_eq!(&out[..4], b"head");
    assert_eq!(&out[4..], &data[1_000..1_500]);
}

#[test]
fn unwritable_destination_reports_a_short_write() {
    let root = with_temp_root();
    let src = File::open(write_file(&root, "src", &pattern(10_000))).unwrap();
    let ro = File::open(write_file(&root, "ro", b"")).unwrap();
    let mut engine = CopyEngine::from_tuning(&CopyTuning {
        zero_copy: ZeroCopyPolicy::Disabled,
        ..CopyTuning::default()
    });
    let CopyError::ShortWrite {
        copied,
        consumed,
        source,
    } = engine.copy(src.as_fd(), ro.as_fd(), None).unwrap_err();
    assert_eq!(copied, 0);
    assert_eq!(consumed, 4_096);
    assert_eq!(source.raw_os_error(), Some(libc::EBADF));
}
