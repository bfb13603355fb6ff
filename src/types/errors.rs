//! Error types used across platkit.
use thiserror::Error;

/// High-level error categories for facility operations.
///
/// Kinds split into two classes. Fatal kinds describe a programmer or
/// environment error that the caller is not expected to recover from
/// (see [`crate::api::errors::die`]). The rest are ordinary failures.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("capacity exhausted")]
    Capacity,
    #[error("bad typelist")]
    TypeList,
    #[error("mount source unreadable")]
    MountSource,
    #[error("random source failed")]
    Random,
    #[error("notification backend failed")]
    Notify,
    #[error("signal disposition failed")]
    Signal,
    #[error("io error")]
    Io,
    #[error("watch rejected")]
    WatchRejected,
}

impl ErrorKind {
    /// Whether this kind belongs to the terminate-the-process class.
    #[must_use]
    pub const fn is_fatal(self) -> bool {
        !matches!(self, ErrorKind::WatchRejected)
    }
}

/// Structured error with a kind and human message.
#[derive(Debug, Error)]
#[error("{kind}: {msg}")]
pub struct Error {
    pub kind: ErrorKind,
    pub msg: String,
}

impl Error {
    pub fn new(kind: ErrorKind, msg: impl Into<String>) -> Self {
        Self {
            kind,
            msg: msg.into(),
        }
    }

    /// Build an error from an OS failure, keeping the errno text in the message.
    pub fn os(kind: ErrorKind, what: &str, err: &std::io::Error) -> Self {
        Self {
            kind,
            msg: format!("{what}: {err}"),
        }
    }

    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        self.kind.is_fatal()
    }
}

/// Convenient alias for results returning a `types::Error`.
pub type Result<T> = std::result::Result<T, Error>;

pub(crate) fn errno_to_io(e: rustix::io::Errno) -> std::io::Error {
    std::io::Error::from_raw_os_error(e.raw_os_error())
}
