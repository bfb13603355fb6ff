#![deny(unsafe_code)]
//! platkit: one set of entry points over kernel facilities that differ
//! between Linux-family and BSD/Apple-family systems.
//!
//! Facilities:
//! - [`random`]: secure random bytes with a device-node fallback.
//! - [`mount`]: the mounted-filesystem table, type-list filtering, longest-prefix lookup.
//! - [`attr`]: extended attributes behind one calling convention.
//! - [`notify`]: a bounded table of file-modification watches.
//! - [`signal`]: signal names and numbers, terminating-signal dispositions.
//! - [`fstype`]: filesystem type names from stat snapshots.
//! - [`copy`]: bulk copy between descriptors, zero-copy when the kernel allows it.
//!
//! Modules that talk to the kernel through `libc` opt back into `unsafe`
//! locally; everything else goes through `rustix`.

pub mod constants;
pub mod api;
pub mod attr;
pub mod config;
pub mod copy;
pub mod fstype;
pub mod logging;
pub mod mount;
pub mod notify;
pub mod random;
pub mod signal;
pub mod types;

pub use api::*;
