//! Bulk copy between descriptors.
//!
//! The engine prefers a zero-copy range-copy primitive, capped at a chunk
//! ceiling per call. The first time the primitive fails it is dropped for the
//! rest of the call and bytes go through an owned bounce buffer instead.
//!
//! Outcomes:
//! - end of input: `Ok` with everything copied so far;
//! - a read error: `Ok` with everything copied so far (partial success is reported);
//! - a failed or short write: `Err(CopyError::ShortWrite)`, because the
//!   destination no longer matches what was read.
use std::io;
use std::os::fd::BorrowedFd;

use rustix::io::Errno;
use serde::Serialize;
use thiserror::Error;

use crate::config::{CopyTuning, ZeroCopyPolicy};

pub mod zero_copy;

pub use zero_copy::{NoZeroCopy, PlatformZeroCopy, ZeroCopy};

/// Byte counts for a finished copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CopyReport {
    /// Bytes now present at the destination.
    pub copied: u64,
    /// Bytes taken from the input.
    pub consumed: u64,
    /// Of `copied`, bytes moved by the zero-copy primitive.
    pub zero_copied: u64,
}

#[derive(Debug, Error)]
pub enum CopyError {
    /// `consumed` includes the chunk whose write failed; `copied` does not.
    #[error("write failed after {copied} bytes ({consumed} read): {source}")]
    ShortWrite {
        copied: u64,
        consumed: u64,
        #[source]
        source: io::Error,
    },
}

pub struct CopyEngine<Z: ZeroCopy = PlatformZeroCopy> {
    zero_copy: Option<Z>,
    chunk_ceiling: usize,
    scratch: Box<[u8]>,
}

impl CopyEngine<PlatformZeroCopy> {
    #[must_use]
    pub fn new() -> Self {
        Self::from_tuning(&CopyTuning::default())
    }

    #[must_use]
    pub fn from_tuning(tuning: &CopyTuning) -> Self {
        let z = match tuning.zero_copy {
            ZeroCopyPolicy::Auto => Some(PlatformZeroCopy::default()),
            ZeroCopyPolicy::Disabled => None,
        };
        Self::build(z, tuning)
    }
}

impl Default for CopyEngine<PlatformZeroCopy> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Z: ZeroCopy> CopyEngine<Z> {
    /// Engine using an explicit primitive.
    pub fn with_primitive(primitive: Z, tuning: &CopyTuning) -> Self {
        Self::build(Some(primitive), tuning)
    }

    fn build(zero_copy: Option<Z>, tuning: &CopyTuning) -> Self {
        Self {
            zero_copy,
            chunk_ceiling: tuning.chunk_ceiling.max(1),
            scratch: vec![0u8; tuning.scratch_len.max(1)].into_boxed_slice(),
        }
    }

    /// Copy up to `limit` bytes (everything when `None`) from `input` to `output`.
    ///
    /// # Errors
    ///
    /// Returns `CopyError::ShortWrite` when the destination refuses bytes.
    pub fn copy(
        &mut self,
        input: BorrowedFd<'_>,
        output: BorrowedFd<'_>,
        limit: Option<u64>,
    ) -> Result<CopyReport, CopyError> {
        let mut report = CopyReport::default();
        let mut zc = self.zero_copy.as_ref().filter(|z| z.probe());

        loop {
            let remaining = match limit {
                Some(b) if report.copied >= b => break,
                Some(b) => Some(b - report.copied),
                None => None,
            };

            if let Some(z) = zc {
                let len = chunk(remaining, self.chunk_ceiling);
                match z.copy(input, output, len) {
                    Ok(0) => break,
                    Ok(n) => {
                        report.consumed += n as u64;
                        report.copied += n as u64;
                        report.zero_copied += n as u64;
                    }
                    Err(e) => {
                        log::debug!("zero-copy failed ({e}); switching to read/write");
                        zc = None;
                    }
                }
                continue;
            }

            let len = chunk(remaining, self.scratch.len());
            let n = match rustix::io::read(input, &mut self.scratch[..len]) {
                Ok(0) => break,
                Ok(n) => n,
                Err(Errno::AGAIN) | Err(Errno::INTR) => continue,
                Err(e) => {
                    log::debug!("read stopped after {} bytes: {e}", report.consumed);
                    break;
                }
            };
            report.consumed += n as u64;
            if let Err(source) = write_all(output, &self.scratch[..n]) {
                return Err(CopyError::ShortWrite {
                    copied: report.copied,
                    consumed: report.consumed,
                    source,
                });
            }
            report.copied += n as u64;
        }
        Ok(report)
    }
}

fn chunk(remaining: Option<u64>, cap: usize) -> usize {
    match remaining {
        Some(r) => usize::try_from(r).map_or(cap, |r| r.min(cap)),
        None => cap,
    }
}

fn write_all(fd: BorrowedFd<'_>, mut buf: &[u8]) -> io::Result<()> {
    while !buf.is_empty() {
        match rustix::io::write(fd, buf) {
            Ok(0) => return Err(io::ErrorKind::WriteZero.into()),
            Ok(n) => buf = &buf[n..],
            Err(Errno::INTR) => {}
            Err(e) => return Err(crate::types::errors::errno_to_io(e)),
        }
    }
    Ok(())
}

/// Copy with the platform primitive and default tuning.
///
/// # Errors
///
/// See [`CopyEngine::copy`].
pub fn copy_range(
    input: BorrowedFd<'_>,
    output: BorrowedFd<'_>,
    limit: Option<u64>,
) -> Result<CopyReport, CopyError> {
    CopyEngine::new().copy(input, output, limit)
}
