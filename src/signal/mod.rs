//! Signal names and numbers.
//!
//! [`name_to_number`] accepts `"9"`, `"KILL"`, `"sigkill"` and, where the
//! platform has real-time signals, `"RTMIN+2"` or `"SIGRTMAX-1"`.
//! [`number_to_name`] renders the canonical name back.
#![allow(unsafe_code)]

use std::borrow::Cow;

use libc::c_int;

use crate::types::errors::{Error, ErrorKind, Result};

mod table;

use table::SIGNALS;

/// Inclusive real-time signal range, if the platform has one.
#[must_use]
pub fn rt_range() -> Option<(c_int, c_int)> {
    #[cfg(any(target_os = "linux", target_os = "android"))]
    {
        Some((libc::SIGRTMIN(), libc::SIGRTMAX()))
    }
    #[cfg(not(any(target_os = "linux", target_os = "android")))]
    {
        None
    }
}

/// Every canonical `(number, name)` pair in table order.
pub fn all() -> impl Iterator<Item = (c_int, &'static str)> {
    SIGNALS.iter().copied()
}

/// Signals whose default action terminates the process, minus `KILL`.
pub fn terminating() -> impl Iterator<Item = (c_int, &'static str)> {
    SIGNALS
        .iter()
        .copied()
        .take_while(|&(n, _)| n != libc::SIGCHLD)
        .filter(|&(n, _)| n != libc::SIGKILL)
}

fn strip_prefix_ci<'s>(s: &'s str, prefix: &str) -> Option<&'s str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}

/// Parse a signal number or name. `None` when nothing matches.
#[must_use]
pub fn name_to_number(text: &str) -> Option<c_int> {
    if let Ok(n) = text.parse::<c_int>() {
        return Some(n);
    }
    let s = strip_prefix_ci(text, "sig").unwrap_or(text);
    if let Some(&(n, _)) = SIGNALS.iter().find(|(_, name)| name.eq_ignore_ascii_case(s)) {
        return Some(n);
    }
    let (min, max) = rt_range()?;
    let (base, rest) = if let Some(rest) = strip_prefix_ci(s, "rtmin") {
        (min, rest)
    } else if let Some(rest) = strip_prefix_ci(s, "rtmax") {
        (max, rest)
    } else {
        return None;
    };
    if rest.is_empty() {
        return Some(base);
    }
    let n = base.checked_add(rest.parse::<c_int>().ok()?)?;
    (min..=max).contains(&n).then_some(n)
}

/// Canonical name of signal `sig`, or `RTMIN+k`/`RTMAX-k` for real-time
/// signals (whichever offset is smaller). `None` when unknown.
#[must_use]
pub fn number_to_name(sig: c_int) -> Option<Cow<'static, str>> {
    if let Some(&(_, name)) = SIGNALS.iter().find(|&&(n, _)| n == sig) {
        return Some(Cow::Borrowed(name));
    }
    let (min, max) = rt_range()?;
    if sig == min {
        Some(Cow::Borrowed("RTMIN"))
    } else if sig == max {
        Some(Cow::Borrowed("RTMAX"))
    } else if sig > min && sig < max {
        Some(Cow::Owned(if sig - min <= max - sig {
            format!("RTMIN+{}", sig - min)
        } else {
            format!("RTMAX-{}", max - sig)
        }))
    } else {
        None
    }
}

/// Disposition installed by [`install_terminators`].
#[derive(Clone, Copy, Debug)]
pub enum Disposition {
    Default,
    Handler(extern "C" fn(c_int)),
}

/// Install `disposition` on every signal that terminates the process by
/// default, leaving `KILL` and every non-terminating signal untouched.
///
/// # Errors
///
/// Returns a fatal `ErrorKind::Signal` error if the kernel rejects a disposition.
pub fn install_terminators(disposition: Disposition) -> Result<()> {
    for (sig, name) in terminating() {
        set_disposition(sig, disposition).map_err(|e| {
            Error::os(ErrorKind::Signal, &format!("sigaction SIG{name}"), &e)
        })?;
    }
    Ok(())
}

fn set_disposition(sig: c_int, disposition: Disposition) -> std::io::Result<()> {
    let handler = match disposition {
        Disposition::Default => libc::SIG_DFL,
        Disposition::Handler(f) => f as libc::sighandler_t,
    };
    // SAFETY: sigaction is plain old data; zeroed means empty mask and no flags.
    let mut sa: libc::sigaction = unsafe { std::mem::zeroed() };
    sa.sa_sigaction = handler;
    // SAFETY: `sa` is fully initialized and the old action is not requested.
    let r = unsafe { libc::sigaction(sig, &sa, std::ptr::null_mut()) };
    if r == -1 {
        Err(std::io::Error::last_os_error())
    } else {
        Ok(())
    }
}

/// Current handler address for `sig` (`SIG_DFL`, `SIG_IGN` or a function).
///
/// # Errors
///
/// Returns the OS error for an invalid signal number.
pub fn current_handler(sig: c_int) -> std::io::Result<libc::sighandler_t> {
    // SAFETY: as in `set_disposition`.
    let mut old: libc::sigaction = unsafe { std::mem::zeroed() };
    // SAFETY: querying only; `old` is a valid out-pointer.
    let r = unsafe { libc::sigaction(sig, std::ptr::null(), &mut old) };
    if r == -1 {
        Err(std::io::Error::last_os_error())
    } else {
        Ok(old.sa_sigaction)
    }
}
