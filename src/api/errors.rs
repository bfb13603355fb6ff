use crate::copy::CopyError;
use crate::types::errors::{Error, ErrorKind};

impl From<CopyError> for Error {
    fn from(e: CopyError) -> Self {
        Error::new(ErrorKind::Io, e.to_string())
    }
}

// Stable identifiers; SCREAMING_SNAKE_CASE matches the emitted ids.
#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorId {
    E_CAPACITY,
    E_TYPELIST,
    E_MOUNT_SOURCE,
    E_RANDOM,
    E_NOTIFY,
    E_SIGNAL,
    E_IO,
    E_WATCH,
}

impl From<ErrorKind> for ErrorId {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Capacity => ErrorId::E_CAPACITY,
            ErrorKind::TypeList => ErrorId::E_TYPELIST,
            ErrorKind::MountSource => ErrorId::E_MOUNT_SOURCE,
            ErrorKind::Random => ErrorId::E_RANDOM,
            ErrorKind::Notify => ErrorId::E_NOTIFY,
            ErrorKind::Signal => ErrorId::E_SIGNAL,
            ErrorKind::Io => ErrorId::E_IO,
            ErrorKind::WatchRejected => ErrorId::E_WATCH,
        }
    }
}

#[must_use]
pub const fn id_str(id: ErrorId) -> &'static str {
    match id {
        ErrorId::E_CAPACITY => "E_CAPACITY",
        ErrorId::E_TYPELIST => "E_TYPELIST",
        ErrorId::E_MOUNT_SOURCE => "E_MOUNT_SOURCE",
        ErrorId::E_RANDOM => "E_RANDOM",
        ErrorId::E_NOTIFY => "E_NOTIFY",
        ErrorId::E_SIGNAL => "E_SIGNAL",
        ErrorId::E_IO => "E_IO",
        ErrorId::E_WATCH => "E_WATCH",
    }
}

#[must_use]
pub const fn exit_code_for(id: ErrorId) -> i32 {
    match id {
        ErrorId::E_CAPACITY => 10,
        ErrorId::E_TYPELIST => 20,
        ErrorId::E_MOUNT_SOURCE => 30,
        ErrorId::E_RANDOM => 40,
        ErrorId::E_NOTIFY => 50,
        ErrorId::E_SIGNAL => 60,
        ErrorId::E_IO => 70,
        ErrorId::E_WATCH => 80,
    }
}

#[must_use]
pub fn exit_code_for_id_str(s: &str) -> Option<i32> {
    match s {
        "E_CAPACITY" => Some(10),
        "E_TYPELIST" => Some(20),
        "E_MOUNT_SOURCE" => Some(30),
        "E_RANDOM" => Some(40),
        "E_NOTIFY" => Some(50),
        "E_SIGNAL" => Some(60),
        "E_IO" => Some(70),
        "E_WATCH" => Some(80),
        _ => None,
    }
}

/// Report `err` and terminate the process with its mapped exit code.
pub fn die(err: &Error) -> ! {
    let id = ErrorId::from(err.kind);
    log::error!(target: "platkit", "{} {err}", id_str(id));
    eprintln!("{err}");
    std::process::exit(exit_code_for(id))
}

/// Terminate on error instead of propagating it.
pub trait OrDie<T> {
    fn or_die(self) -> T;
}

impl<T> OrDie<T> for crate::types::errors::Result<T> {
    fn or_die(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => die(&e),
        }
    }
}
