//! Mounted filesystem enumeration.
//!
//! [`list`] returns every mounted filesystem, most recently mounted first, so
//! a front-to-back scan finds the topmost of several overmounts. On
//! Linux-family kernels the live table is the text file at
//! [`DEFAULT_MOUNT_TABLE`](crate::constants::DEFAULT_MOUNT_TABLE); on
//! BSD/Apple kernels it comes from `getmntinfo`.
//!
//! Stat snapshots of live mount points are best-effort: a failure leaves the
//! snapshot `None` and is never an error.
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::types::errors::Result;
use crate::types::{MountEntry, MountFlags};

pub mod escape;
pub mod filter;
#[cfg(any(target_os = "macos", target_os = "ios", target_os = "freebsd"))]
pub mod mntinfo;
pub mod stats;
pub mod table;

pub use escape::octal_deslash;
pub use filter::{is_type, TypeFilter};
pub use stats::fs_stats;
pub use table::TextTable;

/// A source of raw mount records, in the order the kernel reports them.
pub trait MountSource {
    /// Read all records.
    ///
    /// # Errors
    ///
    /// Returns a fatal `ErrorKind::MountSource` error if the source cannot be read.
    fn entries(&self) -> Result<Vec<MountEntry>>;

    /// Whether records describe live mount points that can be stat'ed.
    fn is_live(&self) -> bool;
}

/// The live mount source for this platform.
#[must_use]
pub fn default_source(config: &Config) -> Box<dyn MountSource> {
    #[cfg(any(target_os = "macos", target_os = "ios", target_os = "freebsd"))]
    {
        let _ = config;
        Box::new(mntinfo::MntInfo)
    }
    #[cfg(not(any(target_os = "macos", target_os = "ios", target_os = "freebsd")))]
    {
        Box::new(TextTable::live(config.mount_table.clone()))
    }
}

/// List mounted filesystems, most recent first.
///
/// With `path`, that file is read as a text table and no snapshots are taken.
///
/// # Errors
///
/// Returns a fatal `ErrorKind::MountSource` error if the table cannot be read.
pub fn list(path: Option<&Path>) -> Result<Vec<MountEntry>> {
    match path {
        Some(p) => list_from(&TextTable::file(p)),
        None => list_from(default_source(&Config::default()).as_ref()),
    }
}

/// List entries from an explicit source, most recent first.
///
/// # Errors
///
/// Propagates the source's read error.
pub fn list_from(source: &dyn MountSource) -> Result<Vec<MountEntry>> {
    let mut entries = source.entries()?;
    if source.is_live() {
        for e in &mut entries {
            snapshot(e);
        }
    }
    entries.reverse();
    Ok(entries)
}

fn snapshot(e: &mut MountEntry) {
    match std::fs::metadata(&e.dir) {
        Ok(md) => e.stat = Some(md),
        Err(err) => log::debug!("stat {}: {err}", e.dir.display()),
    }
    match fs_stats(&e.dir) {
        Ok(st) => e.statvfs = Some(st),
        Err(err) => log::debug!("statvfs {}: {err}", e.dir.display()),
    }
}

/// A listed mount table with lookup helpers.
#[derive(Debug, Clone, Default)]
pub struct MountTable {
    entries: Vec<MountEntry>,
}

impl MountTable {
    /// Wrap entries that are already in most-recent-first order.
    #[must_use]
    pub fn new(entries: Vec<MountEntry>) -> Self {
        Self { entries }
    }

    /// # Errors
    ///
    /// See [`list`].
    pub fn read(path: Option<&Path>) -> Result<Self> {
        list(path).map(Self::new)
    }

    #[must_use]
    pub fn entries(&self) -> &[MountEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &MountEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn into_entries(self) -> Vec<MountEntry> {
        self.entries
    }

    /// Entries whose type passes `typelist`, in table order.
    ///
    /// # Errors
    ///
    /// See [`TypeFilter::parse`].
    pub fn filtered(&self, typelist: Option<&str>) -> Result<Vec<&MountEntry>> {
        let f = TypeFilter::parse(typelist)?;
        Ok(self.entries.iter().filter(|e| f.matches(&e.fs_type)).collect())
    }

    /// The mount covering `path`: the longest mount directory that is a prefix
    /// of it, the most recent one winning among equals.
    #[must_use]
    pub fn containing(&self, path: &Path) -> Option<&MountEntry> {
        // Canonicalize best-effort; if it fails, still proceed with the raw path
        let p: PathBuf = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        let mut best: Option<&MountEntry> = None;
        for e in &self.entries {
            if !p.starts_with(&e.dir) {
                continue;
            }
            match best {
                Some(b) if e.dir.as_os_str().len() <= b.dir.as_os_str().len() => {}
                _ => best = Some(e),
            }
        }
        best
    }

    /// Mount flags for the filesystem holding `path`.
    #[must_use]
    pub fn flags_for(&self, path: &Path) -> Option<MountFlags> {
        self.containing(path).map(MountEntry::flags)
    }
}

impl<'a> IntoIterator for &'a MountTable {
    type Item = &'a MountEntry;
    type IntoIter = std::slice::Iter<'a, MountEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
