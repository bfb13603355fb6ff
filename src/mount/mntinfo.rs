//! Structured mount source for BSD/Apple kernels (`getmntinfo`).
#![allow(unsafe_code)]

use std::ffi::{CStr, OsString};
use std::os::unix::ffi::OsStringExt;
use std::path::PathBuf;

use super::MountSource;
use crate::types::errors::{Error, ErrorKind, Result};
use crate::types::MountEntry;

#[derive(Debug, Default, Clone, Copy)]
pub struct MntInfo;

impl MountSource for MntInfo {
    fn entries(&self) -> Result<Vec<MountEntry>> {
        let mut buf: *mut libc::statfs = std::ptr::null_mut();
        // SAFETY: getmntinfo stores a pointer to a libc-owned array and returns its length.
        let count = unsafe { libc::getmntinfo(&mut buf, libc::MNT_NOWAIT) };
        if count <= 0 || buf.is_null() {
            return Err(Error::os(
                ErrorKind::MountSource,
                "getmntinfo",
                &std::io::Error::last_os_error(),
            ));
        }
        // SAFETY: the array stays valid until the next getmntinfo call on this thread.
        let records = unsafe { std::slice::from_raw_parts(buf, count as usize) };
        Ok(records.iter().map(entry_from).collect())
    }

    fn is_live(&self) -> bool {
        true
    }
}

fn entry_from(me: &libc::statfs) -> MountEntry {
    MountEntry::new(
        String::from_utf8_lossy(&c_bytes(&me.f_fstypename)),
        PathBuf::from(OsString::from_vec(c_bytes(&me.f_mntonname))),
        OsString::from_vec(c_bytes(&me.f_mntfromname)),
        opts_from_flags(me.f_flags as u64),
    )
}

fn c_bytes(field: &[libc::c_char]) -> Vec<u8> {
    // SAFETY: the kernel NUL-terminates every name field within its array.
    unsafe { CStr::from_ptr(field.as_ptr()) }.to_bytes().to_vec()
}

fn opts_from_flags(flags: u64) -> String {
    let mut opts = vec![if flags & libc::MNT_RDONLY as u64 != 0 { "ro" } else { "rw" }];
    if flags & libc::MNT_NOEXEC as u64 != 0 {
        opts.push("noexec");
    }
    if flags & libc::MNT_NOSUID as u64 != 0 {
        opts.push("nosuid");
    }
    opts.join(",")
}
