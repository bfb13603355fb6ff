//! Canonical signal names.
//!
//! Every signal whose default action terminates the process comes before
//! `CHLD`; everything from `CHLD` on does not. [`super::terminating`] relies on
//! that split, so platform additions go on the matching side of it.
use libc::c_int;

macro_rules! signify {
    ($($name:ident),* $(,)?) => {
        &[$((paste_sig!($name), stringify!($name))),*]
    };
}

macro_rules! paste_sig {
    (ABRT) => { libc::SIGABRT };
    (ALRM) => { libc::SIGALRM };
    (BUS) => { libc::SIGBUS };
    (FPE) => { libc::SIGFPE };
    (HUP) => { libc::SIGHUP };
    (ILL) => { libc::SIGILL };
    (INT) => { libc::SIGINT };
    (KILL) => { libc::SIGKILL };
    (PIPE) => { libc::SIGPIPE };
    (QUIT) => { libc::SIGQUIT };
    (SEGV) => { libc::SIGSEGV };
    (TERM) => { libc::SIGTERM };
    (USR1) => { libc::SIGUSR1 };
    (USR2) => { libc::SIGUSR2 };
    (SYS) => { libc::SIGSYS };
    (TRAP) => { libc::SIGTRAP };
    (VTALRM) => { libc::SIGVTALRM };
    (XCPU) => { libc::SIGXCPU };
    (XFSZ) => { libc::SIGXFSZ };
    (PROF) => { libc::SIGPROF };
    (IO) => { libc::SIGIO };
    (STKFLT) => { libc::SIGSTKFLT };
    (POLL) => { libc::SIGPOLL };
    (PWR) => { libc::SIGPWR };
    (EMT) => { libc::SIGEMT };
    (INFO) => { libc::SIGINFO };
    (CHLD) => { libc::SIGCHLD };
    (CONT) => { libc::SIGCONT };
    (STOP) => { libc::SIGSTOP };
    (TSTP) => { libc::SIGTSTP };
    (TTIN) => { libc::SIGTTIN };
    (TTOU) => { libc::SIGTTOU };
    (URG) => { libc::SIGURG };
    (WINCH) => { libc::SIGWINCH };
}

#[cfg(any(target_os = "linux", target_os = "android"))]
pub(crate) const SIGNALS: &[(c_int, &str)] = signify![
    // POSIX
    ABRT, ALRM, BUS, FPE, HUP, ILL, INT, KILL, PIPE, QUIT, SEGV, TERM,
    USR1, USR2, SYS, TRAP, VTALRM, XCPU, XFSZ,
    // Non-POSIX signals that cause termination
    PROF, IO, STKFLT, POLL, PWR,
    // POSIX signals that don't cause termination
    CHLD, CONT, STOP, TSTP, TTIN, TTOU, URG,
    // Non-POSIX signals that don't cause termination
    WINCH,
];

#[cfg(any(target_os = "macos", target_os = "ios"))]
pub(crate) const SIGNALS: &[(c_int, &str)] = signify![
    ABRT, ALRM, BUS, FPE, HUP, ILL, INT, KILL, PIPE, QUIT, SEGV, TERM,
    USR1, USR2, SYS, TRAP, VTALRM, XCPU, XFSZ,
    PROF, IO, EMT, INFO,
    CHLD, CONT, STOP, TSTP, TTIN, TTOU, URG,
    WINCH,
];

#[cfg(not(any(
    target_os = "linux",
    target_os = "android",
    target_os = "macos",
    target_os = "ios"
)))]
pub(crate) const SIGNALS: &[(c_int, &str)] = signify![
    ABRT, ALRM, BUS, FPE, HUP, ILL, INT, KILL, PIPE, QUIT, SEGV, TERM,
    USR1, USR2, SYS, TRAP, VTALRM, XCPU, XFSZ,
    PROF, IO,
    CHLD, CONT, STOP, TSTP, TTIN, TTOU, URG,
    WINCH,
];
