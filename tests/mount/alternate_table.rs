use std::ffi::OsStr;
use std::path::Path;

use platkit::mount::{self, is_type, MountTable};
use platkit::types::ErrorKind;

use crate::helpers::{with_temp_root, write_file};

const TABLE: &[u8] = b"\
# device dir type opts freq passno
/dev/sda1 / ext4 rw,relatime 0 0
proc /proc proc rw,nosuid,nodev,noexec 0 0

tmpfs /run/user/1000 tmpfs rw,nosuid 0 0
/dev/sdb1 /mnt/my\\040disk vfat ro 0 0
short line
//server/share /mnt/back\\134slash cifs rw 0 0
/dev/loop0 /mnt/my\\040disk squashfs ro,noexec 0 0
";

#[test]
fn entries_come_back_most_recent_first() {
    let root = with_temp_root();
    let path = write_file(&root, "mounts", TABLE);
    let entries = mount::list(Some(&path)).unwrap();
    let types: Vec<&str> = entries.iter().map(|e| e.fs_type.as_str()).collect();
    assert_eq!(types, ["squashfs", "cifs", "vfat", "tmpfs", "proc", "ext4"]);
    assert!(entries.iter().all(|e| e.stat.is_none() && e.statvfs.is_none()));
}

#[test]
fn escapes_are_decoded_in_dir_and_device() {
    let root = with_temp_root();
    let path = write_file(&root, "mounts", TABLE);
    let entries = mount::list(Some(&path)).unwrap();
    assert_eq!(entries[0].dir, Path::new("/mnt/my disk"));
    assert_eq!(entries[1].dir, Path::new("/mnt/back\\slash"));
    assert_eq!(entries[1].device, OsStr::new("//server/share"));
    assert_eq!(entries[4].opts, "rw,nosuid,nodev,noexec");
}

#[test]
fn type_lists_filter_entries() {
    let root = with_temp_root();
    let path = write_file(&root, "mounts", TABLE);
    let table = MountTable::read(Some(&path)).unwrap();
    let kept: Vec<&str> = table
        .filtered(Some("noproc,notmpfs,,nocifs"))
        .unwrap()
        .iter()
        .map(|e| e.fs_type.as_str())
        .collect();
    assert_eq!(kept, ["squashfs", "vfat", "ext4"]);
    let only: Vec<&str> = table
        .filtered(Some("ext4,vfat"))
        .unwrap()
        .iter()
        .map(|e| e.fs_type.as_str())
        .collect();
    assert_eq!(only, ["vfat", "ext4"]);
    let err = table.filtered(Some("noproc,ext4")).unwrap_err();
    assert_eq!(err.kind, ErrorKind::TypeList);
    assert!(!is_type(&table.entries()[0], Some("ext")).unwrap());
}

#[test]
fn containing_prefers_the_deepest_then_the_newest() {
    let root = with_temp_root();
    let path = write_file(&root, "mounts", TABLE);
    let table = MountTable::read(Some(&path)).unwrap();
    let e = table.containing(Path::new("/mnt/my disk/photos")).unwrap();
    assert_eq!(e.fs_type, "squashfs");
    let flags = table.flags_for(Path::new("/mnt/my disk/photos")).unwrap();
    assert!(flags.read_only && flags.no_exec);
    let e = table.containing(Path::new("/run/user/1000/bus")).unwrap();
    assert_eq!(e.fs_type, "tmpfs");
    assert!(table.containing(Path::new("relative/path")).is_none());
}

#[test]
fn missing_table_is_a_fatal_source_error() {
    let root = with_temp_root();
    let err = mount::list(Some(&root.path().join("absent"))).unwrap_err();
    assert_eq!(err.kind, ErrorKind::MountSource);
    assert!(err.is_fatal());
    assert!(err.msg.contains("absent"));
}
