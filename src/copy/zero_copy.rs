//! Zero-copy range-copy primitives and their capability probe.
use std::io;
use std::os::fd::BorrowedFd;

/// A kernel call moving bytes between descriptors without a user-space bounce.
pub trait ZeroCopy {
    /// Whether the primitive may be called at all on this system.
    ///
    /// A declared system call can still be blocked by sandbox policy, so this
    /// is a platform/API-level check rather than a symbol check.
    fn probe(&self) -> bool;

    /// Copy up to `len` bytes from the current offset of `input` to the
    /// current offset of `output`. `Ok(0)` means end of input.
    ///
    /// # Errors
    ///
    /// Returns the OS error; the engine then stops using the primitive.
    fn copy(&self, input: BorrowedFd<'_>, output: BorrowedFd<'_>, len: usize) -> io::Result<usize>;
}

impl<Z: ZeroCopy + ?Sized> ZeroCopy for &Z {
    fn probe(&self) -> bool {
        (**self).probe()
    }

    fn copy(&self, input: BorrowedFd<'_>, output: BorrowedFd<'_>, len: usize) -> io::Result<usize> {
        (**self).copy(input, output, len)
    }
}

/// Never available.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoZeroCopy;

impl ZeroCopy for NoZeroCopy {
    fn probe(&self) -> bool {
        false
    }

    fn copy(&self, _: BorrowedFd<'_>, _: BorrowedFd<'_>, _: usize) -> io::Result<usize> {
        Err(io::Error::from_raw_os_error(libc::ENOSYS))
    }
}

/// `copy_file_range(2)`.
#[cfg(any(target_os = "linux", target_os = "android"))]
#[derive(Debug, Default, Clone, Copy)]
pub struct CopyFileRange;

#[cfg(any(target_os = "linux", target_os = "android"))]
impl ZeroCopy for CopyFileRange {
    fn probe(&self) -> bool {
        #[cfg(target_os = "android")]
        {
            // Older Android seccomp policy kills the process (SIGSYS) on this call.
            android::api_level() >= android::API_U
        }
        #[cfg(not(target_os = "android"))]
        {
            true
        }
    }

    fn copy(&self, input: BorrowedFd<'_>, output: BorrowedFd<'_>, len: usize) -> io::Result<usize> {
        rustix::fs::copy_file_range(input, None, output, None, len)
            .map_err(crate::types::errors::errno_to_io)
    }
}

#[cfg(target_os = "android")]
#[allow(unsafe_code)]
mod android {
    pub(super) const API_U: i32 = 34;

    pub(super) fn api_level() -> i32 {
        let mut value = [0 as libc::c_char; libc::PROP_VALUE_MAX as usize];
        // SAFETY: the name is NUL-terminated and `value` has PROP_VALUE_MAX bytes.
        let n = unsafe {
            libc::__system_property_get(
                b"ro.build.version.sdk\0".as_ptr().cast(),
                value.as_mut_ptr(),
            )
        };
        if n <= 0 {
            return 0;
        }
        let bytes: Vec<u8> = value[..n as usize].iter().map(|&c| c as u8).collect();
        std::str::from_utf8(&bytes)
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(0)
    }
}

#[cfg(any(target_os = "linux", target_os = "android"))]
pub type PlatformZeroCopy = CopyFileRange;
#[cfg(not(any(target_os = "linux", target_os = "android")))]
pub type PlatformZeroCopy = NoZeroCopy;
