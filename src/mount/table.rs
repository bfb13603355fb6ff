//! Text mount table source (`/proc/mounts` format).
use std::ffi::OsString;
use std::os::unix::ffi::OsStringExt;
use std::path::{Path, PathBuf};

use super::escape::octal_deslash;
use super::MountSource;
use crate::types::errors::{Error, ErrorKind, Result};
use crate::types::MountEntry;

/// Reads a whitespace separated table: `device dir type opts [freq passno]`.
#[derive(Debug, Clone)]
pub struct TextTable {
    path: PathBuf,
    live: bool,
}

impl TextTable {
    /// The kernel's live table; entries get stat snapshots.
    pub fn live(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            live: true,
        }
    }

    /// An arbitrary table file whose directories need not be mounted.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            live: false,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MountSource for TextTable {
    fn entries(&self) -> Result<Vec<MountEntry>> {
        let content = std::fs::read(&self.path).map_err(|e| {
            Error::os(
                ErrorKind::MountSource,
                &format!("bad {}", self.path.display()),
                &e,
            )
        })?;
        Ok(parse_table(&content))
    }

    fn is_live(&self) -> bool {
        self.live
    }
}

/// Parse table text into entries in file order.
///
/// Blank lines, comments and lines with fewer than four fields are skipped.
#[must_use]
pub fn parse_table(content: &[u8]) -> Vec<MountEntry> {
    content
        .split(|&b| b == b'\n')
        .filter_map(parse_line)
        .collect()
}

fn parse_line(line: &[u8]) -> Option<MountEntry> {
    let mut fields = line
        .split(|&b| b == b' ' || b == b'\t' || b == b'\r')
        .filter(|f| !f.is_empty());
    let device = fields.next()?;
    if device.starts_with(b"#") {
        return None;
    }
    let dir = fields.next()?;
    let fs_type = fields.next()?;
    let opts = fields.next()?;
    Some(MountEntry::new(
        String::from_utf8_lossy(fs_type),
        PathBuf::from(OsString::from_vec(octal_deslash(dir).into_owned())),
        OsString::from_vec(octal_deslash(device).into_owned()),
        String::from_utf8_lossy(opts),
    ))
}
