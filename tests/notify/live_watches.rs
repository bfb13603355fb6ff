use std::fs::{File, OpenOptions};
use std::io::Write;
use std::os::fd::{AsFd, AsRawFd};
use std::thread;
use std::time::Duration;

use platkit::notify::Watcher;
use platkit::types::ErrorKind;
use platkit::Host;

use crate::helpers::{with_temp_root, write_file, TestAudit, TestEmitter};

fn append(path: &std::path::Path, bytes: &[u8]) {
    let mut f = OpenOptions::new().append(true).open(path).unwrap();
    f.write_all(bytes).unwrap();
}

#[test]
fn write_to_the_second_watch_reports_it() {
    let root = with_temp_root();
    let a = write_file(&root, "a", b"");
    let b = write_file(&root, "b", b"");
    let fa = File::open(&a).unwrap();
    let fb = File::open(&b).unwrap();

    let mut w = Watcher::new(2).unwrap();
    w.add(fa.as_fd(), &a).unwrap();
    w.add(fb.as_fd(), &b).unwrap();
    append(&b, b"hello");

    let (fd, path) = w.wait().unwrap();
    assert_eq!(path, b.as_path());
    assert_eq!(fd.as_raw_fd(), fb.as_raw_fd());
}

#[test]
fn wait_blocks_until_a_writer_thread_modifies_the_file() {
    let root = with_temp_root();
    let a = write_file(&root, "a", b"");
    let fa = File::open(&a).unwrap();
    let mut w = Watcher::new(1).unwrap();
    w.add(fa.as_fd(), &a).unwrap();

    let target = a.clone();
    let writer = thread::spawn(move || {
        thread::sleep(Duration::from_millis(50));
        append(&target, b"later");
    });
    let (_, path) = w.wait().unwrap();
    writer.join().unwrap();
    assert_eq!(path, a.as_path());
}

#[test]
fn full_table_is_a_capacity_error() {
    let root = with_temp_root();
    let a = write_file(&root, "a", b"");
    let b = write_file(&root, "b", b"");
    let fa = File::open(&a).unwrap();
    let fb = File::open(&b).unwrap();
    let mut w = Watcher::new(1).unwrap();
    w.add(fa.as_fd(), &a).unwrap();
    let err = w.add(fb.as_fd(), &b).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Capacity);
    assert_eq!(w.len(), 1);
    assert_eq!(w.capacity(), 1);
}

#[cfg(any(target_os = "linux", target_os = "android"))]
#[test]
fn vanished_path_is_rejected_without_consuming_a_slot() {
    let root = with_temp_root();
    let a = write_file(&root, "a", b"");
    let fa = File::open(&a).unwrap();
    let gone = root.path().join("gone");
    let facts = TestEmitter::default();
    let host = Host::new(facts.clone(), TestAudit, platkit::config::Config::default());
    let mut w = host.watcher(2).unwrap();
    let err = host.watch(&mut w, fa.as_fd(), &gone).unwrap_err();
    assert_eq!(err.kind, ErrorKind::WatchRejected);
    assert!(!err.is_fatal());
    assert!(w.is_empty());

    host.watch(&mut w, fa.as_fd(), &a).unwrap();
    append(&a, b"x");
    let (_, path) = host.wait(&mut w).unwrap();
    assert_eq!(path, a.as_path());

    let adds = facts.named("notify.add");
    assert_eq!(adds[0].0, "warn");
    assert_eq!(adds[1].0, "success");
    let waits = facts.named("notify.wait");
    assert_eq!(waits[0].1["path"], a.display().to_string());
}

#[cfg(any(target_os = "linux", target_os = "android"))]
#[test]
fn same_path_twice_resolves_to_the_first_handle() {
    let root = with_temp_root();
    let a = write_file(&root, "a", b"");
    let first = File::open(&a).unwrap();
    let second = File::open(&a).unwrap();
    let mut w = Watcher::new(2).unwrap();
    w.add(first.as_fd(), &a).unwrap();
    w.add(second.as_fd(), &a).unwrap();
    assert_eq!(w.len(), 2);

    append(&a, b"x");
    let (fd, path) = w.wait().unwrap();
    assert_eq!(path, a.as_path());
    assert_eq!(fd.as_raw_fd(), first.as_raw_fd());
}
