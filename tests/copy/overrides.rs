use std::env;
use std::io::{self, Seek, SeekFrom, Write};
use std::os::fd::{AsFd, BorrowedFd};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serial_test::serial;

use platkit::config::Config;
use platkit::constants::{ENV_ALLOW_OVERRIDES, ENV_FORCE_COPY_FALLBACK};
use platkit::copy::ZeroCopy;
use platkit::Host;

use crate::helpers::{pattern, TestAudit, TestEmitter};

/// Read/write through rustix, counting calls.
struct Counting(Arc<AtomicUsize>);

impl ZeroCopy for Counting {
    fn probe(&self) -> bool {
        true
    }

    fn copy(&self, input: BorrowedFd<'_>, output: BorrowedFd<'_>, len: usize) -> io::Result<usize> {
        self.0.fetch_add(1, Ordering::SeqCst);
        let mut buf = vec![0u8; len.min(64 * 1024)];
        let n = rustix::io::read(input, &mut buf)?;
        let mut done = 0;
        while done < n {
            done += rustix::io::write(output, &buf[done..n])?;
        }
        Ok(n)
    }
}

fn source(len: usize) -> std::fs::File {
    let mut f = tempfile::tempfile().unwrap();
    f.write_all(&pattern(len)).unwrap();
    f.seek(SeekFrom::Start(0)).unwrap();
    f
}

#[test]
#[serial]
fn forced_fallback_disables_the_platform_primitive() {
    env::set_var(ENV_ALLOW_OVERRIDES, "1");
    env::set_var(ENV_FORCE_COPY_FALLBACK, "1");
    let facts = TestEmitter::default();
    let host = Host::new(facts.clone(), TestAudit, Config::default());
    env::remove_var(ENV_ALLOW_OVERRIDES);
    env::remove_var(ENV_FORCE_COPY_FALLBACK);

    let src = source(100_000);
    let dst = tempfile::tempfile().unwrap();
    let rep = host.copy(src.as_fd(), dst.as_fd(), None).unwrap();
    assert_eq!(rep.copied, 100_000);
    assert_eq!(rep.zero_copied, 0);
    let evs = facts.named("copy.range");
    assert_eq!(evs[0].0, "success");
    assert_eq!(evs[0].1["zero_copied"], 0);
}

#[test]
#[serial]
fn explicit_primitive_wins_over_the_environment() {
    env::set_var(ENV_ALLOW_OVERRIDES, "1");
    env::set_var(ENV_FORCE_COPY_FALLBACK, "1");
    let calls = Arc::new(AtomicUsize::new(0));
    let host = Host::new(TestEmitter::default(), TestAudit, Config::default())
        .with_zero_copy(Box::new(Counting(calls.clone())));
    env::remove_var(ENV_ALLOW_OVERRIDES);
    env::remove_var(ENV_FORCE_COPY_FALLBACK);

    let src = source(200_000);
    let dst = tempfile::tempfile().unwrap();
    let rep = host.copy(src.as_fd(), dst.as_fd(), Some(150_000)).unwrap();
    assert_eq!(rep.copied, 150_000);
    assert_eq!(rep.zero_copied, 150_000);
    assert!(calls.load(Ordering::SeqCst) >= 3);
}
