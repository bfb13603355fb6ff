//! Configuration knobs for the facility layer.
//!
//! Consumers typically start from [`Config::default`] and adjust fields before
//! building a [`Host`](crate::Host). Free functions in each facility module
//! use the defaults directly.
use std::path::PathBuf;

use crate::constants::{
    COPY_CHUNK_CEILING, DEFAULT_MOUNT_TABLE, ENV_ALLOW_OVERRIDES, ENV_FORCE_COPY_FALLBACK,
    RANDOM_DEVICE, SCRATCH_LEN, URANDOM_DEVICE,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ZeroCopyPolicy {
    /// Probe the platform and use the zero-copy primitive when present.
    #[default]
    Auto,
    /// Always use the read/write loop.
    Disabled,
}

#[derive(Clone, Debug)]
pub struct RandomDevices {
    pub blocking: PathBuf,
    pub pseudo: PathBuf,
}

impl Default for RandomDevices {
    fn default() -> Self {
        Self {
            blocking: PathBuf::from(RANDOM_DEVICE),
            pseudo: PathBuf::from(URANDOM_DEVICE),
        }
    }
}

#[derive(Clone, Debug)]
pub struct CopyTuning {
    pub zero_copy: ZeroCopyPolicy,
    pub chunk_ceiling: usize,
    pub scratch_len: usize,
}

impl Default for CopyTuning {
    fn default() -> Self {
        Self {
            zero_copy: ZeroCopyPolicy::Auto,
            chunk_ceiling: COPY_CHUNK_CEILING,
            scratch_len: SCRATCH_LEN,
        }
    }
}

/// Config groups the tunables of every facility.
#[derive(Clone, Debug)]
pub struct Config {
    /// Text mount table read for the live table on Linux-family kernels.
    pub mount_table: PathBuf,
    pub random: RandomDevices,
    pub copy: CopyTuning,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mount_table: PathBuf::from(DEFAULT_MOUNT_TABLE),
            random: RandomDevices::default(),
            copy: CopyTuning::default(),
        }
    }
}

impl Config {
    /// Defaults with the zero-copy primitive switched off.
    ///
    /// Useful under sandboxes that kill the process on unknown system calls
    /// instead of failing them.
    #[must_use]
    pub fn strict_preset() -> Self {
        let mut c = Self::default();
        c.copy.zero_copy = ZeroCopyPolicy::Disabled;
        c
    }

    /// Apply test-only environment overrides. No-op unless
    /// `PLATKIT_TEST_ALLOW_ENV_OVERRIDES=1`.
    pub fn apply_env_overrides(&mut self) -> &mut Self {
        if env_flag(ENV_ALLOW_OVERRIDES) && env_flag(ENV_FORCE_COPY_FALLBACK) {
            self.copy.zero_copy = ZeroCopyPolicy::Disabled;
        }
        self
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var_os(name) == Some(std::ffi::OsString::from("1"))
}
