//! Filesystem type names.
use std::borrow::Cow;

use crate::types::FsStats;

/// Magic numbers reported in `statfs.f_type` on Linux-family kernels.
const MAGIC_NAMES: &[(u32, &str)] = &[
    (0xADFF, "affs"),
    (0x5346_544e, "ntfs"),
    (0x1Cd1, "devpts"),
    (0x137D, "ext"),
    (0xEF51, "ext2"),
    (0xEF53, "ext3"),
    (0x1BAD_FACE, "bfs"),
    (0x9123_683E, "btrfs"),
    (0x28cd_3d45, "cramfs"),
    (0x3153_464a, "jfs"),
    (0x7275, "romfs"),
    (0x0102_1994, "tmpfs"),
    (0x3434, "nilfs"),
    (0x6969, "nfs"),
    (0x9fa0, "proc"),
    (0x534F_434B, "sockfs"),
    (0x6265_6572, "sysfs"),
    (0x517B, "smb"),
    (0x4d44, "msdos"),
    (0x4006, "fat"),
    (0x4341_5d53, "smackfs"),
    (0x7371_7368, "squashfs"),
];

/// Human name for a filesystem.
///
/// A name reported directly by the kernel wins. Otherwise the magic number is
/// looked up (last match wins) and unknown numbers render as `0x<hex>`.
#[must_use]
pub fn fs_type_name(stats: &FsStats) -> Cow<'_, str> {
    if let Some(name) = &stats.type_name {
        return Cow::Borrowed(name.as_str());
    }
    match magic_name(stats.magic) {
        Some(name) => Cow::Borrowed(name),
        None => Cow::Owned(format!("{:#x}", stats.magic as u32)),
    }
}

/// Look up a magic number in the static table.
#[must_use]
pub fn magic_name(magic: u64) -> Option<&'static str> {
    let magic = u32::try_from(magic).ok()?;
    MAGIC_NAMES
        .iter()
        .rev()
        .find(|(num, _)| *num == magic)
        .map(|(_, name)| *name)
}
