//! Linux-family attribute calls: no-follow is a separate `l*` system call.
#![allow(unsafe_code)]

use std::ffi::OsStr;
use std::io;
use std::os::fd::{AsRawFd, BorrowedFd};
use std::path::Path;

use super::ffi::{count, cstr, out_ptr, unit};
use super::{SetMode, XattrBackend};

#[derive(Debug, Default, Clone, Copy)]
pub struct LinuxXattr;

fn set_flags(mode: SetMode) -> libc::c_int {
    match mode {
        SetMode::Any => 0,
        SetMode::Create => libc::XATTR_CREATE,
        SetMode::Replace => libc::XATTR_REPLACE,
    }
}

impl XattrBackend for LinuxXattr {
    fn get(&self, path: &Path, name: &OsStr, value: &mut [u8]) -> io::Result<usize> {
        let (p, n) = (cstr(path.as_os_str())?, cstr(name)?);
        // SAFETY: both strings are NUL-terminated; the buffer pointer/len pair is valid or null/0.
        count(unsafe { libc::getxattr(p.as_ptr(), n.as_ptr(), out_ptr(value), value.len()) })
    }

    fn lget(&self, path: &Path, name: &OsStr, value: &mut [u8]) -> io::Result<usize> {
        let (p, n) = (cstr(path.as_os_str())?, cstr(name)?);
        // SAFETY: as in `get`.
        count(unsafe { libc::lgetxattr(p.as_ptr(), n.as_ptr(), out_ptr(value), value.len()) })
    }

    fn fget(&self, fd: BorrowedFd<'_>, name: &OsStr, value: &mut [u8]) -> io::Result<usize> {
        let n = cstr(name)?;
        // SAFETY: `fd` is borrowed open for the call; see `get` for the rest.
        count(unsafe { libc::fgetxattr(fd.as_raw_fd(), n.as_ptr(), out_ptr(value), value.len()) })
    }

    fn list(&self, path: &Path, list: &mut [u8]) -> io::Result<usize> {
        let p = cstr(path.as_os_str())?;
        // SAFETY: as in `get`.
        count(unsafe { libc::listxattr(p.as_ptr(), out_ptr(list).cast(), list.len()) })
    }

    fn llist(&self, path: &Path, list: &mut [u8]) -> io::Result<usize> {
        let p = cstr(path.as_os_str())?;
        // SAFETY: as in `get`.
        count(unsafe { libc::llistxattr(p.as_ptr(), out_ptr(list).cast(), list.len()) })
    }

    fn flist(&self, fd: BorrowedFd<'_>, list: &mut [u8]) -> io::Result<usize> {
        // SAFETY: as in `fget`.
        count(unsafe { libc::flistxattr(fd.as_raw_fd(), out_ptr(list).cast(), list.len()) })
    }

    fn set(&self, path: &Path, name: &OsStr, value: &[u8], mode: SetMode) -> io::Result<()> {
        let (p, n) = (cstr(path.as_os_str())?, cstr(name)?);
        // SAFETY: the value slice is only read for `value.len()` bytes.
        unit(unsafe {
            libc::setxattr(
                p.as_ptr(),
                n.as_ptr(),
                value.as_ptr().cast(),
                value.len(),
                set_flags(mode),
            )
        })
    }

    fn lset(&self, path: &Path, name: &OsStr, value: &[u8], mode: SetMode) -> io::Result<()> {
        let (p, n) = (cstr(path.as_os_str())?, cstr(name)?);
        // SAFETY: as in `set`.
        unit(unsafe {
            libc::lsetxattr(
                p.as_ptr(),
                n.as_ptr(),
                value.as_ptr().cast(),
                value.len(),
                set_flags(mode),
            )
        })
    }

    fn fset(
        &self,
        fd: BorrowedFd<'_>,
        name: &OsStr,
        value: &[u8],
        mode: SetMode,
    ) -> io::Result<()> {
        let n = cstr(name)?;
        // SAFETY: as in `set`, with a borrowed open descriptor.
        unit(unsafe {
            libc::fsetxattr(
                fd.as_raw_fd(),
                n.as_ptr(),
                value.as_ptr().cast(),
                value.len(),
                set_flags(mode),
            )
        })
    }
}
