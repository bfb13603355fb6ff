use std::path::Path;

use platkit::fstype::fs_type_name;
use platkit::mount::{self, MountTable};
use platkit::Host;

use crate::helpers::{TestAudit, TestEmitter};

#[test]
fn root_is_mounted_and_snapshotted() {
    let entries = mount::list(None).unwrap();
    let root = entries
        .iter()
        .find(|e| e.dir == Path::new("/"))
        .expect("a mount at /");
    let st = root.statvfs.as_ref().expect("statvfs snapshot for /");
    assert!(root.stat.is_some());
    assert!(st.block_size > 0);
    assert!(!fs_type_name(st).is_empty());
}

#[test]
fn host_lists_the_live_table() {
    let facts = TestEmitter::default();
    let host = Host::new(facts.clone(), TestAudit, platkit::config::Config::default());
    let table: MountTable = host.mounts().unwrap();
    assert!(table.containing(Path::new("/")).is_some());
    let evs = facts.named("mount.list");
    assert_eq!(evs.len(), 1);
    assert_eq!(evs[0].0, "success");
    assert_eq!(evs[0].1["count"], table.entries().len());
}
