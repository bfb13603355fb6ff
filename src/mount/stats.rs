//! Filesystem statistics snapshot.
use std::io;
use std::path::Path;

use rustix::fs::StatVfsMountFlags;

use crate::types::errors::errno_to_io;
use crate::types::FsStats;

/// Capture `statvfs` plus the filesystem type of the filesystem holding `path`.
///
/// # Errors
///
/// Returns the OS error when `statvfs` fails. A failing `statfs` only leaves
/// the type fields empty.
pub fn fs_stats(path: &Path) -> io::Result<FsStats> {
    let vfs = rustix::fs::statvfs(path).map_err(errno_to_io)?;
    let mut st = FsStats {
        block_size: vfs.f_bsize,
        fragment_size: vfs.f_frsize,
        blocks: vfs.f_blocks,
        blocks_free: vfs.f_bfree,
        blocks_avail: vfs.f_bavail,
        files: vfs.f_files,
        files_free: vfs.f_ffree,
        fsid: vfs.f_fsid,
        name_max: vfs.f_namemax,
        read_only: vfs.f_flag.contains(StatVfsMountFlags::RDONLY),
        ..FsStats::default()
    };
    fill_type(path, &mut st);
    Ok(st)
}

#[cfg(any(target_os = "linux", target_os = "android"))]
fn fill_type(path: &Path, st: &mut FsStats) {
    if let Ok(fs) = rustix::fs::statfs(path) {
        // Magic numbers are 32-bit; some ABIs store them sign-extended.
        #[allow(clippy::unnecessary_cast)]
        let raw = fs.f_type as u64;
        st.magic = raw & 0xFFFF_FFFF;
    }
}

#[cfg(any(
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "openbsd"
))]
fn fill_type(path: &Path, st: &mut FsStats) {
    if let Ok(fs) = rustix::fs::statfs(path) {
        #[allow(clippy::unnecessary_cast)]
        let raw = fs.f_type as u64;
        st.magic = raw;
        let name: Vec<u8> = fs
            .f_fstypename
            .iter()
            .take_while(|&&c| c != 0)
            .map(|&c| c as u8)
            .collect();
        st.type_name = Some(String::from_utf8_lossy(&name).into_owned());
    }
}

#[cfg(not(any(
    target_os = "linux",
    target_os = "android",
    target_os = "macos",
    target_os = "ios",
    target_os = "freebsd",
    target_os = "openbsd"
)))]
fn fill_type(_path: &Path, _st: &mut FsStats) {}
