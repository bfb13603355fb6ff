//! Secure random bytes.
//!
//! The kernel random-generation call is tried first. `ENOSYS` (or any error in
//! warn-only mode) falls back to reading a random device node; any other error
//! is fatal. See [`fill_with`] for the exact decision table.
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use rustix::fs::{Mode, OFlags};

use crate::config::RandomDevices;
use crate::types::errors::{errno_to_io, Error, ErrorKind, Result};

/// Caller intent for a random fill.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RandomFlags {
    /// Draw from the blocking pool (and, unless `warn_only`, the blocking device on fallback).
    pub strict: bool,
    /// Never escalate: fall back on any kernel error, open the pseudo device
    /// non-blocking and report an unopenable device as `Ok(false)`. Callers using this need a non-cryptographic fallback.
    pub warn_only: bool,
}

impl RandomFlags {
    pub const NONE: Self = Self {
        strict: false,
        warn_only: false,
    };
    pub const WARN_ONLY: Self = Self {
        strict: false,
        warn_only: true,
    };
    pub const STRICT: Self = Self {
        strict: true,
        warn_only: false,
    };
}

/// Direct kernel random-generation call.
pub trait KernelRandom {
    /// Fill `buf` completely or fail. Platforms without the call report `ENOSYS`.
    ///
    /// # Errors
    ///
    /// Returns the OS error from the underlying call.
    fn fill(&self, buf: &mut [u8], strict: bool) -> io::Result<()>;
}

/// The platform's kernel random call.
#[derive(Debug, Default, Clone, Copy)]
pub struct SysRandom;

#[cfg(any(target_os = "linux", target_os = "android"))]
impl KernelRandom for SysRandom {
    fn fill(&self, buf: &mut [u8], strict: bool) -> io::Result<()> {
        use rustix::rand::{getrandom, GetRandomFlags};
        let flags = if strict {
            GetRandomFlags::RANDOM
        } else {
            GetRandomFlags::empty()
        };
        let mut filled = 0;
        while filled < buf.len() {
            let n = getrandom(&mut buf[filled..], flags).map_err(errno_to_io)?;
            filled += n;
        }
        Ok(())
    }
}

#[cfg(not(any(target_os = "linux", target_os = "android")))]
impl KernelRandom for SysRandom {
    fn fill(&self, _buf: &mut [u8], _strict: bool) -> io::Result<()> {
        Err(io::Error::from_raw_os_error(libc::ENOSYS))
    }
}

/// Warn-only callers must never hang waiting for entropy, so their device is
/// opened non-blocking.
fn open_device(dev: &Path, nonblocking: bool) -> io::Result<File> {
    let mut oflags = OFlags::RDONLY | OFlags::CLOEXEC;
    if nonblocking {
        oflags |= OFlags::NONBLOCK;
    }
    let fd = rustix::fs::open(dev, oflags, Mode::empty()).map_err(errno_to_io)?;
    Ok(File::from(fd))
}

/// Fill `buf` with random bytes using the platform kernel call and default devices.
///
/// # Errors
///
/// Returns a fatal `ErrorKind::Random` error when the kernel call fails outside
/// warn-only mode, when the device cannot be opened outside warn-only mode, or
/// when the device read comes up short.
pub fn fill(buf: &mut [u8], flags: RandomFlags) -> Result<bool> {
    fill_with(&SysRandom, &RandomDevices::default(), buf, flags)
}

/// Fill `buf` using an explicit kernel backend and device pair.
///
/// | kernel result        | warn_only | outcome                 |
/// |----------------------|-----------|-------------------------|
/// | ok                   | any       | `Ok(true)`              |
/// | `ENOSYS`             | any       | device fallback         |
/// | other error          | false     | `Err` (fatal)           |
/// | other error          | true      | device fallback         |
///
/// # Errors
///
/// See [`fill`].
pub fn fill_with(
    kernel: &dyn KernelRandom,
    devices: &RandomDevices,
    buf: &mut [u8],
    flags: RandomFlags,
) -> Result<bool> {
    match kernel.fill(buf, flags.strict) {
        Ok(()) => return Ok(true),
        Err(e) if e.raw_os_error() == Some(libc::ENOSYS) => {
            log::debug!("getrandom unavailable; falling back to device");
        }
        Err(e) if !flags.warn_only => return Err(Error::os(ErrorKind::Random, "getrandom", &e)),
        Err(e) => log::warn!("getrandom: {e}; falling back to device"),
    }

    let dev = if flags.strict && !flags.warn_only {
        &devices.blocking
    } else {
        &devices.pseudo
    };
    let mut f = match open_device(dev, flags.warn_only) {
        Ok(f) => f,
        Err(e) if flags.warn_only => {
            log::warn!("{}: {e}", dev.display());
            return Ok(false);
        }
        Err(e) => {
            return Err(Error::os(
                ErrorKind::Random,
                &dev.display().to_string(),
                &e,
            ))
        }
    };
    f.read_exact(buf)
        .map_err(|e| Error::os(ErrorKind::Random, &dev.display().to_string(), &e))?;
    Ok(true)
}
