use std::fs::File;
use std::os::fd::AsFd;
use std::os::unix::fs::symlink;

use platkit::attr::{self, SetMode};

use crate::helpers::{with_temp_root, write_file};

#[test]
fn symlink_variants_act_on_the_link_itself() {
    let root = with_temp_root();
    let target = write_file(&root, "target", b"x");
    if let Err(e) = attr::set(&target, "user.tag", b"target", SetMode::Any) {
        eprintln!("skipping: user xattrs unsupported here ({e})");
        return;
    }
    let link = root.path().join("link");
    symlink(&target, &link).unwrap();

    let mut buf = [0u8; 32];
    let n = attr::get(&link, "user.tag", &mut buf).unwrap();
    assert_eq!(&buf[..n], b"target");
    // user.* attributes are not permitted on symlinks themselves
    assert!(attr::lget(&link, "user.tag", &mut buf).is_err());
    assert!(attr::lset(&link, "user.tag", b"link", SetMode::Any).is_err());
}

#[test]
fn size_query_then_read_through_a_descriptor() {
    let root = with_temp_root();
    let path = write_file(&root, "f", b"x");
    if let Err(e) = attr::set(&path, "user.big", &[0x5a; 300], SetMode::Create) {
        eprintln!("skipping: user xattrs unsupported here ({e})");
        return;
    }
    let f = File::open(&path).unwrap();
    let need = attr::fget(f.as_fd(), "user.big", &mut []).unwrap();
    assert_eq!(need, 300);
    let mut buf = vec![0u8; need];
    assert_eq!(attr::fget(f.as_fd(), "user.big", &mut buf).unwrap(), 300);
    assert!(buf.iter().all(|&b| b == 0x5a));

    let need = attr::flist(f.as_fd(), &mut []).unwrap();
    let mut names = vec![0u8; need];
    let n = attr::flist(f.as_fd(), &mut names).unwrap();
    let listed: Vec<_> = attr::split_names(&names[..n]).collect();
    assert!(listed.iter().any(|n| *n == "user.big"));
}
