use std::sync::atomic::{AtomicI32, Ordering};

use serial_test::serial;

use platkit::signal::{current_handler, Disposition};
use platkit::Host;

use crate::helpers::{TestAudit, TestEmitter};

static LAST: AtomicI32 = AtomicI32::new(0);

extern "C" fn record(sig: libc::c_int) {
    LAST.store(sig, Ordering::SeqCst);
}

#[test]
#[serial]
fn installed_handler_sees_a_raised_terminator() {
    let saved: Vec<_> = platkit::signal::terminating()
        .map(|(n, _)| (n, current_handler(n).unwrap()))
        .collect();

    let facts = TestEmitter::default();
    let host = Host::new(facts.clone(), TestAudit, platkit::config::Config::default());
    host.install_terminators(Disposition::Handler(record)).unwrap();
    unsafe { libc::raise(libc::SIGUSR2) };
    let seen = LAST.load(Ordering::SeqCst);
    host.install_terminators(Disposition::Default).unwrap();
    for (n, h) in saved {
        unsafe { libc::signal(n, h) };
    }

    assert_eq!(seen, libc::SIGUSR2);
    let evs = facts.named("signal.install");
    assert_eq!(evs.len(), 2);
    assert_eq!(evs[0].1["disposition"], "handler");
    assert_eq!(evs[1].1["disposition"], "default");
}
