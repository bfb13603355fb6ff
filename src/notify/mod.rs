//! Filesystem change notification over a bounded watch table.
//!
//! A [`Watcher`] holds at most `max` watches, fixed at creation. Each watch
//! pairs a caller descriptor with a path; both are borrowed for the watcher's
//! lifetime and handed back unchanged by [`Watcher::wait`]. Watches are never
//! removed individually.
//!
//! Kernels may coalesce several writes into one wake, so one returned event
//! means "at least one modification since the last wake".
use std::os::fd::{AsRawFd, BorrowedFd};
use std::path::Path;

use crate::types::errors::{Error, ErrorKind, Result};

#[cfg(any(target_os = "linux", target_os = "android"))]
mod inotify;
#[cfg(any(target_os = "macos", target_os = "ios", target_os = "freebsd"))]
mod kqueue;

#[cfg(any(target_os = "linux", target_os = "android"))]
pub use inotify::Inotify as PlatformNotify;
#[cfg(any(target_os = "macos", target_os = "ios", target_os = "freebsd"))]
pub use kqueue::Kqueue as PlatformNotify;

/// Kernel identifier of one registration.
pub type WatchId = i64;

/// A kernel event source accepting modification watches.
pub trait NotifyBackend {
    /// Register interest in writes to `path` (or to the open file `fd`).
    ///
    /// # Errors
    ///
    /// Returns the OS error when the kernel refuses the registration.
    fn watch(&mut self, fd: BorrowedFd<'_>, path: &Path) -> std::io::Result<WatchId>;

    /// Block for the next event. `Ok(None)` means "nothing usable, try again".
    ///
    /// # Errors
    ///
    /// Returns a fatal `ErrorKind::Notify` error when the event stream is broken.
    fn next(&mut self) -> Result<Option<WatchId>>;
}

/// Bounded table of watches.
pub struct Watcher<'a, B: NotifyBackend = PlatformNotify> {
    backend: B,
    max: usize,
    ids: Vec<WatchId>,
    handles: Vec<BorrowedFd<'a>>,
    paths: Vec<&'a Path>,
}

impl<'a> Watcher<'a, PlatformNotify> {
    /// Create a watcher for up to `max` watches on this platform's backend.
    ///
    /// # Errors
    ///
    /// Returns a fatal `ErrorKind::Notify` error if the kernel event source
    /// cannot be created.
    pub fn new(max: usize) -> Result<Self> {
        Ok(Self::with_backend(PlatformNotify::new()?, max))
    }
}

impl<'a, B: NotifyBackend> Watcher<'a, B> {
    pub fn with_backend(backend: B, max: usize) -> Self {
        Self {
            backend,
            max,
            ids: Vec::with_capacity(max),
            handles: Vec::with_capacity(max),
            paths: Vec::with_capacity(max),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.max
    }

    /// Watch `path` for modification, reporting `fd` when it changes.
    ///
    /// Adding the same path twice takes two slots. The watch-descriptor
    /// backend (inotify) hands back the same kernel id both times, so a change
    /// always resolves to the first `fd` added for that path. The event-queue
    /// backend (kqueue) keys on the descriptor and keeps them apart.
    ///
    /// # Errors
    ///
    /// `ErrorKind::Capacity` (fatal) when the table is full;
    /// `ErrorKind::WatchRejected` (recoverable) when the kernel refuses the path.
    pub fn add(&mut self, fd: BorrowedFd<'a>, path: &'a Path) -> Result<()> {
        if self.paths.len() == self.max {
            return Err(Error::new(
                ErrorKind::Capacity,
                format!("watch table full ({} entries)", self.max),
            ));
        }
        let id = self.backend.watch(fd, path).map_err(|e| {
            Error::os(
                ErrorKind::WatchRejected,
                &path.display().to_string(),
                &e,
            )
        })?;
        self.ids.push(id);
        self.handles.push(fd);
        self.paths.push(path);
        Ok(())
    }

    /// Block until a watched path is modified and return its descriptor and path.
    ///
    /// Never returns "no event": transient backend failures and events for
    /// unknown watches are skipped.
    ///
    /// # Errors
    ///
    /// Returns a fatal `ErrorKind::Notify` error when the event stream breaks.
    pub fn wait(&mut self) -> Result<(BorrowedFd<'a>, &'a Path)> {
        loop {
            let Some(id) = self.backend.next()? else {
                continue;
            };
            if let Some(i) = self.ids.iter().position(|&w| w == id) {
                log::debug!(
                    "change on {} (fd {})",
                    self.paths[i].display(),
                    self.handles[i].as_raw_fd()
                );
                return Ok((self.handles[i], self.paths[i]));
            }
        }
    }
}
