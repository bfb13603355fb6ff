//! Watch-descriptor backend (inotify).
use std::collections::VecDeque;
use std::os::fd::{BorrowedFd, OwnedFd};
use std::path::Path;

use rustix::fs::inotify::{inotify_add_watch, inotify_init, CreateFlags, WatchFlags};
use rustix::io::Errno;

use super::{NotifyBackend, WatchId};
use crate::constants::NOTIFY_READ_LEN;
use crate::types::errors::{errno_to_io, Error, ErrorKind, Result};

/// `struct inotify_event` without its trailing name.
const EVENT_HEADER: usize = 16;

pub struct Inotify {
    fd: OwnedFd,
    buf: Box<[u8]>,
    pending: VecDeque<WatchId>,
}

impl Inotify {
    /// # Errors
    ///
    /// Returns a fatal `ErrorKind::Notify` error if the instance cannot be created.
    pub fn new() -> Result<Self> {
        let fd = inotify_init(CreateFlags::CLOEXEC)
            .map_err(|e| Error::os(ErrorKind::Notify, "inotify_init", &errno_to_io(e)))?;
        Ok(Self {
            fd,
            buf: vec![0u8; NOTIFY_READ_LEN].into_boxed_slice(),
            pending: VecDeque::new(),
        })
    }
}

impl NotifyBackend for Inotify {
    fn watch(&mut self, _fd: BorrowedFd<'_>, path: &Path) -> std::io::Result<WatchId> {
        let wd = inotify_add_watch(&self.fd, path, WatchFlags::MODIFY).map_err(errno_to_io)?;
        Ok(WatchId::from(wd))
    }

    fn next(&mut self) -> Result<Option<WatchId>> {
        if let Some(wd) = self.pending.pop_front() {
            return Ok(Some(wd));
        }
        let n = match rustix::io::read(&self.fd, &mut self.buf) {
            Ok(n) => n,
            Err(Errno::INTR) | Err(Errno::AGAIN) => return Ok(None),
            Err(e) => return Err(Error::os(ErrorKind::Notify, "inotify", &errno_to_io(e))),
        };
        if n < EVENT_HEADER {
            return Err(Error::new(
                ErrorKind::Notify,
                format!("inotify: short read ({n} bytes)"),
            ));
        }
        self.pending.extend(parse_events(&self.buf[..n]));
        Ok(self.pending.pop_front())
    }
}

/// Watch descriptors of every complete event record in `raw`.
fn parse_events(raw: &[u8]) -> Vec<WatchId> {
    let mut out = Vec::new();
    let mut off = 0;
    while let Some(rec) = raw.get(off..off + EVENT_HEADER) {
        let wd = i32::from_ne_bytes([rec[0], rec[1], rec[2], rec[3]]);
        let name_len = u32::from_ne_bytes([rec[12], rec[13], rec[14], rec[15]]) as usize;
        out.push(WatchId::from(wd));
        off += EVENT_HEADER + name_len;
    }
    out
}
