//! Extended attributes.
//!
//! Nine entry points: get, set and list, each on a path (following a final
//! symlink), on a link itself (`l*`, never following) and on an open
//! descriptor (`f*`). Reads return the byte count written into the buffer; an
//! empty buffer asks for the size needed. Failures (missing target, missing
//! attribute, buffer too small) come back as the OS error.
//!
//! The parameter conventions differ between kernels (Apple adds a position
//! and an options word carrying the no-follow bit), so each platform gets its
//! own [`XattrBackend`].
use std::ffi::{OsStr, OsString};
use std::io;
use std::os::fd::BorrowedFd;
use std::path::Path;

#[cfg(any(target_os = "macos", target_os = "ios"))]
mod apple;
#[cfg(any(target_os = "linux", target_os = "android"))]
mod linux;

#[cfg(any(target_os = "macos", target_os = "ios"))]
pub use apple::AppleXattr as PlatformXattr;
#[cfg(any(target_os = "linux", target_os = "android"))]
pub use linux::LinuxXattr as PlatformXattr;
#[cfg(not(any(
    target_os = "linux",
    target_os = "android",
    target_os = "macos",
    target_os = "ios"
)))]
pub use unsupported::NoXattr as PlatformXattr;

/// How `set` treats an existing attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SetMode {
    /// Create or replace.
    #[default]
    Any,
    /// Fail with `EEXIST` if the attribute exists.
    Create,
    /// Fail if the attribute does not exist.
    Replace,
}

pub trait XattrBackend {
    /// # Errors
    /// Returns the OS error when the target or attribute is missing or `value` is too small.
    fn get(&self, path: &Path, name: &OsStr, value: &mut [u8]) -> io::Result<usize>;
    /// # Errors
    /// As [`XattrBackend::get`], without following a final symlink.
    fn lget(&self, path: &Path, name: &OsStr, value: &mut [u8]) -> io::Result<usize>;
    /// # Errors
    /// As [`XattrBackend::get`], on an open descriptor.
    fn fget(&self, fd: BorrowedFd<'_>, name: &OsStr, value: &mut [u8]) -> io::Result<usize>;

    /// Write NUL-separated attribute names into `list`.
    /// # Errors
    /// Returns the OS error when the target is missing or `list` is too small.
    fn list(&self, path: &Path, list: &mut [u8]) -> io::Result<usize>;
    /// # Errors
    /// As [`XattrBackend::list`], without following a final symlink.
    fn llist(&self, path: &Path, list: &mut [u8]) -> io::Result<usize>;
    /// # Errors
    /// As [`XattrBackend::list`], on an open descriptor.
    fn flist(&self, fd: BorrowedFd<'_>, list: &mut [u8]) -> io::Result<usize>;

    /// # Errors
    /// Returns the OS error when the target is missing, `mode` is violated or
    /// the filesystem refuses the attribute.
    fn set(&self, path: &Path, name: &OsStr, value: &[u8], mode: SetMode) -> io::Result<()>;
    /// # Errors
    /// As [`XattrBackend::set`], without following a final symlink.
    fn lset(&self, path: &Path, name: &OsStr, value: &[u8], mode: SetMode) -> io::Result<()>;
    /// # Errors
    /// As [`XattrBackend::set`], on an open descriptor.
    fn fset(&self, fd: BorrowedFd<'_>, name: &OsStr, value: &[u8], mode: SetMode)
        -> io::Result<()>;
}

fn backend() -> PlatformXattr {
    PlatformXattr
}

/// # Errors
/// See [`XattrBackend::get`].
pub fn get(path: &Path, name: impl AsRef<OsStr>, value: &mut [u8]) -> io::Result<usize> {
    backend().get(path, name.as_ref(), value)
}

/// # Errors
/// See [`XattrBackend::lget`].
pub fn lget(path: &Path, name: impl AsRef<OsStr>, value: &mut [u8]) -> io::Result<usize> {
    backend().lget(path, name.as_ref(), value)
}

/// # Errors
/// See [`XattrBackend::fget`].
pub fn fget(fd: BorrowedFd<'_>, name: impl AsRef<OsStr>, value: &mut [u8]) -> io::Result<usize> {
    backend().fget(fd, name.as_ref(), value)
}

/// # Errors
/// See [`XattrBackend::list`].
pub fn list(path: &Path, list: &mut [u8]) -> io::Result<usize> {
    backend().list(path, list)
}

/// # Errors
/// See [`XattrBackend::llist`].
pub fn llist(path: &Path, list: &mut [u8]) -> io::Result<usize> {
    backend().llist(path, list)
}

/// # Errors
/// See [`XattrBackend::flist`].
pub fn flist(fd: BorrowedFd<'_>, list: &mut [u8]) -> io::Result<usize> {
    backend().flist(fd, list)
}

/// # Errors
/// See [`XattrBackend::set`].
pub fn set(path: &Path, name: impl AsRef<OsStr>, value: &[u8], mode: SetMode) -> io::Result<()> {
    backend().set(path, name.as_ref(), value, mode)
}

/// # Errors
/// See [`XattrBackend::lset`].
pub fn lset(path: &Path, name: impl AsRef<OsStr>, value: &[u8], mode: SetMode) -> io::Result<()> {
    backend().lset(path, name.as_ref(), value, mode)
}

/// # Errors
/// See [`XattrBackend::fset`].
pub fn fset(
    fd: BorrowedFd<'_>,
    name: impl AsRef<OsStr>,
    value: &[u8],
    mode: SetMode,
) -> io::Result<()> {
    backend().fset(fd, name.as_ref(), value, mode)
}

/// Attribute names on `path` itself (a final symlink is not followed).
///
/// # Errors
///
/// Returns the OS error if the names cannot be listed.
pub fn names(path: &Path) -> io::Result<Vec<OsString>> {
    Ok(::xattr::list(path)?.collect())
}

/// Whether `path` sits on a filesystem that answers attribute queries.
#[must_use]
pub fn supports_xattrs(path: &Path) -> bool {
    ::xattr::SUPPORTED_PLATFORM && ::xattr::list(path).is_ok()
}

/// Split a raw NUL-separated name list as filled by `list`.
pub fn split_names(raw: &[u8]) -> impl Iterator<Item = &OsStr> {
    use std::os::unix::ffi::OsStrExt;
    raw.split(|&b| b == 0)
        .filter(|n| !n.is_empty())
        .map(OsStr::from_bytes)
}

pub(crate) mod ffi {
    use std::ffi::{CString, OsStr};
    use std::io;
    use std::os::unix::ffi::OsStrExt;

    pub(crate) fn cstr(s: &OsStr) -> io::Result<CString> {
        CString::new(s.as_bytes())
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "interior NUL"))
    }

    /// Buffer pointer for a size query: null when the caller passed nothing.
    pub(crate) fn out_ptr(buf: &mut [u8]) -> *mut libc::c_void {
        if buf.is_empty() {
            std::ptr::null_mut()
        } else {
            buf.as_mut_ptr().cast()
        }
    }

    pub(crate) fn count(r: isize) -> io::Result<usize> {
        usize::try_from(r).map_err(|_| io::Error::last_os_error())
    }

    pub(crate) fn unit(r: libc::c_int) -> io::Result<()> {
        if r < 0 {
            Err(io::Error::last_os_error())
        } else {
            Ok(())
        }
    }
}

#[cfg(not(any(
    target_os = "linux",
    target_os = "android",
    target_os = "macos",
    target_os = "ios"
)))]
mod unsupported {
    use super::{SetMode, XattrBackend};
    use std::ffi::OsStr;
    use std::io;
    use std::os::fd::BorrowedFd;
    use std::path::Path;

    #[derive(Debug, Default, Clone, Copy)]
    pub struct NoXattr;

    fn nope<T>() -> io::Result<T> {
        Err(io::Error::from_raw_os_error(libc::EOPNOTSUPP))
    }

    impl XattrBackend for NoXattr {
        fn get(&self, _: &Path, _: &OsStr, _: &mut [u8]) -> io::Result<usize> {
            nope()
        }
        fn lget(&self, _: &Path, _: &OsStr, _: &mut [u8]) -> io::Result<usize> {
            nope()
        }
        fn fget(&self, _: BorrowedFd<'_>, _: &OsStr, _: &mut [u8]) -> io::Result<usize> {
            nope()
        }
        fn list(&self, _: &Path, _: &mut [u8]) -> io::Result<usize> {
            nope()
        }
        fn llist(&self, _: &Path, _: &mut [u8]) -> io::Result<usize> {
            nope()
        }
        fn flist(&self, _: BorrowedFd<'_>, _: &mut [u8]) -> io::Result<usize> {
            nope()
        }
        fn set(&self, _: &Path, _: &OsStr, _: &[u8], _: SetMode) -> io::Result<()> {
            nope()
        }
        fn lset(&self, _: &Path, _: &OsStr, _: &[u8], _: SetMode) -> io::Result<()> {
            nope()
        }
        fn fset(&self, _: BorrowedFd<'_>, _: &OsStr, _: &[u8], _: SetMode) -> io::Result<()> {
            nope()
        }
    }
}
