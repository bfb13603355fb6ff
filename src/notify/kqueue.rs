//! Event-queue backend (kqueue). Watches are registered on the caller's open
//! descriptor, so the kernel hands that descriptor back as the event ident.
#![allow(unsafe_code)]

use std::os::fd::{AsRawFd, BorrowedFd, FromRawFd, OwnedFd};
use std::path::Path;

use super::{NotifyBackend, WatchId};
use crate::types::errors::{Error, ErrorKind, Result};

pub struct Kqueue {
    kq: OwnedFd,
}

impl Kqueue {
    /// # Errors
    ///
    /// Returns a fatal `ErrorKind::Notify` error if the queue cannot be created.
    pub fn new() -> Result<Self> {
        // SAFETY: kqueue takes no arguments and returns a new descriptor or -1.
        let fd = unsafe { libc::kqueue() };
        if fd == -1 {
            return Err(Error::os(
                ErrorKind::Notify,
                "kqueue",
                &std::io::Error::last_os_error(),
            ));
        }
        // SAFETY: `fd` is a freshly created descriptor nobody else owns.
        Ok(Self {
            kq: unsafe { OwnedFd::from_raw_fd(fd) },
        })
    }
}

fn blank_event() -> libc::kevent {
    // SAFETY: kevent is plain old data; all-zero is a valid (empty) value.
    unsafe { std::mem::zeroed() }
}

impl NotifyBackend for Kqueue {
    fn watch(&mut self, fd: BorrowedFd<'_>, _path: &Path) -> std::io::Result<WatchId> {
        let mut ev = blank_event();
        ev.ident = fd.as_raw_fd() as libc::uintptr_t;
        ev.filter = libc::EVFILT_VNODE;
        ev.flags = libc::EV_ADD | libc::EV_CLEAR;
        ev.fflags = libc::NOTE_WRITE;
        // SAFETY: one valid change record in, no event buffer out, no timeout.
        let r = unsafe {
            libc::kevent(
                self.kq.as_raw_fd(),
                &ev,
                1,
                std::ptr::null_mut(),
                0,
                std::ptr::null(),
            )
        };
        if r == -1 {
            return Err(std::io::Error::last_os_error());
        }
        Ok(WatchId::from(fd.as_raw_fd()))
    }

    fn next(&mut self) -> Result<Option<WatchId>> {
        let mut ev = blank_event();
        // SAFETY: no changes in, room for exactly one event out, block forever.
        let r = unsafe {
            libc::kevent(
                self.kq.as_raw_fd(),
                std::ptr::null(),
                0,
                &mut ev,
                1,
                std::ptr::null(),
            )
        };
        if r < 1 {
            return Ok(None);
        }
        Ok(Some(ev.ident as WatchId))
    }
}
