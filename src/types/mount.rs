//! Data-only mount types used across the crate.
use serde::Serialize;
use std::ffi::OsString;
use std::fs::Metadata;
use std::path::PathBuf;

/// Typed representation of mount flags.
/// Centralized under `crate::types` for cross-layer reuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MountFlags {
    /// Whether the mount is read-only
    pub read_only: bool,
    /// Whether the mount has execution disabled
    pub no_exec: bool,
}

/// Normalized filesystem statistics captured for a mount point.
///
/// `magic` is the kernel's filesystem type identifier. `type_name` is only
/// filled on kernels that report the name directly (BSD/Apple family).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FsStats {
    pub magic: u64,
    pub type_name: Option<String>,
    pub block_size: u64,
    pub fragment_size: u64,
    pub blocks: u64,
    pub blocks_free: u64,
    pub blocks_avail: u64,
    pub files: u64,
    pub files_free: u64,
    pub fsid: u64,
    pub name_max: u64,
    pub read_only: bool,
}

/// One mounted filesystem.
///
/// The snapshot fields are `None` when the stat calls on the mount point
/// failed or were skipped (alternate mount table).
#[derive(Debug, Clone)]
pub struct MountEntry {
    pub fs_type: String,
    pub dir: PathBuf,
    pub device: OsString,
    pub opts: String,
    pub stat: Option<Metadata>,
    pub statvfs: Option<FsStats>,
}

impl MountEntry {
    /// An entry without snapshots.
    pub fn new(
        fs_type: impl Into<String>,
        dir: impl Into<PathBuf>,
        device: impl Into<OsString>,
        opts: impl Into<String>,
    ) -> Self {
        Self {
            fs_type: fs_type.into(),
            dir: dir.into(),
            device: device.into(),
            opts: opts.into(),
            stat: None,
            statvfs: None,
        }
    }

    /// Flags parsed from the options string. Missing `rw` reads as read-only.
    #[must_use]
    pub fn flags(&self) -> MountFlags {
        let has = |want: &str| self.opts.split(',').any(|o| o.eq_ignore_ascii_case(want));
        MountFlags {
            read_only: !has("rw"),
            no_exec: has("noexec"),
        }
    }
}
