//! Apple attribute calls: one call per target kind, with a resource-fork
//! position (always 0 here) and an options word that carries `XATTR_NOFOLLOW`.
#![allow(unsafe_code)]

use std::ffi::OsStr;
use std::io;
use std::os::fd::{AsRawFd, BorrowedFd};
use std::path::Path;

use super::ffi::{count, cstr, out_ptr, unit};
use super::{SetMode, XattrBackend};

#[derive(Debug, Default, Clone, Copy)]
pub struct AppleXattr;

const FOLLOW: libc::c_int = 0;
const NOFOLLOW: libc::c_int = libc::XATTR_NOFOLLOW;

fn set_flags(mode: SetMode) -> libc::c_int {
    match mode {
        SetMode::Any => 0,
        SetMode::Create => libc::XATTR_CREATE,
        SetMode::Replace => libc::XATTR_REPLACE,
    }
}

fn get_at(path: &Path, name: &OsStr, value: &mut [u8], options: libc::c_int) -> io::Result<usize> {
    let (p, n) = (cstr(path.as_os_str())?, cstr(name)?);
    // SAFETY: both strings are NUL-terminated; the buffer pointer/len pair is valid or null/0.
    count(unsafe { libc::getxattr(p.as_ptr(), n.as_ptr(), out_ptr(value), value.len(), 0, options) })
}

fn list_at(path: &Path, list: &mut [u8], options: libc::c_int) -> io::Result<usize> {
    let p = cstr(path.as_os_str())?;
    // SAFETY: as in `get_at`.
    count(unsafe { libc::listxattr(p.as_ptr(), out_ptr(list).cast(), list.len(), options) })
}

fn set_at(path: &Path, name: &OsStr, value: &[u8], options: libc::c_int) -> io::Result<()> {
    let (p, n) = (cstr(path.as_os_str())?, cstr(name)?);
    // SAFETY: the value slice is only read for `value.len()` bytes.
    unit(unsafe {
        libc::setxattr(p.as_ptr(), n.as_ptr(), value.as_ptr().cast(), value.len(), 0, options)
    })
}

impl XattrBackend for AppleXattr {
    fn get(&self, path: &Path, name: &OsStr, value: &mut [u8]) -> io::Result<usize> {
        get_at(path, name, value, FOLLOW)
    }

    fn lget(&self, path: &Path, name: &OsStr, value: &mut [u8]) -> io::Result<usize> {
        get_at(path, name, value, NOFOLLOW)
    }

    fn fget(&self, fd: BorrowedFd<'_>, name: &OsStr, value: &mut [u8]) -> io::Result<usize> {
        let n = cstr(name)?;
        // SAFETY: `fd` is borrowed open for the call.
        count(unsafe {
            libc::fgetxattr(fd.as_raw_fd(), n.as_ptr(), out_ptr(value), value.len(), 0, 0)
        })
    }

    fn list(&self, path: &Path, list: &mut [u8]) -> io::Result<usize> {
        list_at(path, list, FOLLOW)
    }

    fn llist(&self, path: &Path, list: &mut [u8]) -> io::Result<usize> {
        list_at(path, list, NOFOLLOW)
    }

    fn flist(&self, fd: BorrowedFd<'_>, list: &mut [u8]) -> io::Result<usize> {
        // SAFETY: as in `fget`.
        count(unsafe { libc::flistxattr(fd.as_raw_fd(), out_ptr(list).cast(), list.len(), 0) })
    }

    fn set(&self, path: &Path, name: &OsStr, value: &[u8], mode: SetMode) -> io::Result<()> {
        set_at(path, name, value, set_flags(mode))
    }

    fn lset(&self, path: &Path, name: &OsStr, value: &[u8], mode: SetMode) -> io::Result<()> {
        set_at(path, name, value, set_flags(mode) | NOFOLLOW)
    }

    fn fset(
        &self,
        fd: BorrowedFd<'_>,
        name: &OsStr,
        value: &[u8],
        mode: SetMode,
    ) -> io::Result<()> {
        let n = cstr(name)?;
        // SAFETY: as in `set_at`, with a borrowed open descriptor.
        unit(unsafe {
            libc::fsetxattr(
                fd.as_raw_fd(),
                n.as_ptr(),
                value.as_ptr().cast(),
                value.len(),
                0,
                set_flags(mode),
            )
        })
    }
}
