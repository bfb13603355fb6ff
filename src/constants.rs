//! Shared crate-wide constants for platkit.
//!
//! Centralizes magic values and default paths used across modules.
//! Adjusting these here will propagate through the crate.

/// Live kernel mount table read when no alternate path is given (Linux family).
pub const DEFAULT_MOUNT_TABLE: &str = "/proc/mounts";

/// Blocking random device, used when strict randomness is requested.
pub const RANDOM_DEVICE: &str = "/dev/random";

/// Non-blocking pseudo-random device.
pub const URANDOM_DEVICE: &str = "/dev/urandom";

/// Upper bound on a single zero-copy range-copy call.
pub const COPY_CHUNK_CEILING: usize = 1 << 30;

/// Size of the bounce buffer used by the read/write copy loop.
pub const SCRATCH_LEN: usize = 4096;

/// Size of the buffer the watch-descriptor backend reads events into.
/// Holds many fixed-size records at once; names are never requested.
pub const NOTIFY_READ_LEN: usize = 4096;

/// Environment gate for test-only override knobs. Knobs are ignored unless this is `1`.
pub const ENV_ALLOW_OVERRIDES: &str = "PLATKIT_TEST_ALLOW_ENV_OVERRIDES";

/// Test knob: when `1`, the bulk copy engine skips the zero-copy primitive.
pub const ENV_FORCE_COPY_FALLBACK: &str = "PLATKIT_FORCE_COPY_FALLBACK";
