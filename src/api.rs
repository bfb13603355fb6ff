// Facade bundling configuration, backend overrides and fact emission.

use std::os::fd::BorrowedFd;
use std::path::Path;

use log::Level;
use serde_json::json;

use crate::config::{Config, ZeroCopyPolicy};
use crate::copy::{CopyEngine, CopyError, CopyReport, ZeroCopy};
use crate::logging::{AuditSink, FactsEmitter, LogEmitter};
use crate::mount::{self, MountSource, MountTable};
use crate::notify::{NotifyBackend, Watcher};
use crate::random::{self, RandomFlags, SysRandom};
use crate::signal::{self, Disposition};
use crate::types::errors::Result;

#[path = "api/errors.rs"]
pub mod errors;

const SCHEMA_VERSION: i64 = 1;

fn decision<T, E>(r: &std::result::Result<T, E>) -> &'static str {
    if r.is_ok() {
        "success"
    } else {
        "failure"
    }
}

pub struct Host<E: FactsEmitter = LogEmitter, A: AuditSink = LogEmitter> {
    facts: E,
    audit: A,
    config: Config,
    mounts: Option<Box<dyn MountSource>>,
    zero_copy: Option<Box<dyn ZeroCopy>>,
}

impl Default for Host {
    fn default() -> Self {
        Self::new(LogEmitter, LogEmitter, Config::default())
    }
}

impl<E: FactsEmitter, A: AuditSink> Host<E, A> {
    /// Build a host. Test-only environment overrides are applied to `config`.
    pub fn new(facts: E, audit: A, mut config: Config) -> Self {
        config.apply_env_overrides();
        Self {
            facts,
            audit,
            config,
            mounts: None,
            zero_copy: None,
        }
    }

    /// Replace the platform mount source.
    #[must_use]
    pub fn with_mount_source(mut self, source: Box<dyn MountSource>) -> Self {
        self.mounts = Some(source);
        self
    }

    /// Use `primitive` for bulk copies. Takes precedence over the configured
    /// zero-copy policy, including environment overrides.
    #[must_use]
    pub fn with_zero_copy(mut self, primitive: Box<dyn ZeroCopy>) -> Self {
        self.config.copy.zero_copy = ZeroCopyPolicy::Auto;
        self.zero_copy = Some(primitive);
        self
    }

    #[must_use]
    pub fn with_facts<F: FactsEmitter>(self, facts: F) -> Host<F, A> {
        Host {
            facts,
            audit: self.audit,
            config: self.config,
            mounts: self.mounts,
            zero_copy: self.zero_copy,
        }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Current mount table, most recent first.
    ///
    /// # Errors
    ///
    /// See [`mount::list_from`].
    pub fn mounts(&self) -> Result<MountTable> {
        let r = match &self.mounts {
            Some(src) => mount::list_from(&**src),
            None => mount::list_from(mount::default_source(&self.config).as_ref()),
        };
        let count = r.as_ref().map(Vec::len).ok();
        self.facts.emit(
            "platkit",
            "mount.list",
            decision(&r),
            json!({
                "schema_version": SCHEMA_VERSION,
                "override": self.mounts.is_some(),
                "count": count,
            }),
        );
        r.map(MountTable::new)
    }

    /// Fill `buf` with random bytes from the configured devices.
    ///
    /// # Errors
    ///
    /// See [`random::fill`].
    pub fn fill_random(&self, buf: &mut [u8], flags: RandomFlags) -> Result<bool> {
        let r = random::fill_with(&SysRandom, &self.config.random, buf, flags);
        let dec = match r {
            Ok(true) => "success",
            Ok(false) => "warn",
            Err(_) => "failure",
        };
        if let Ok(false) = r {
            self.audit.log(Level::Warn, "random source unavailable; buffer untouched");
        }
        self.facts.emit(
            "platkit",
            "random.fill",
            dec,
            json!({
                "schema_version": SCHEMA_VERSION,
                "len": buf.len(),
                "strict": flags.strict,
                "warn_only": flags.warn_only,
            }),
        );
        r
    }

    /// Copy up to `limit` bytes from `input` to `output`.
    ///
    /// # Errors
    ///
    /// See [`CopyEngine::copy`].
    pub fn copy(
        &self,
        input: BorrowedFd<'_>,
        output: BorrowedFd<'_>,
        limit: Option<u64>,
    ) -> std::result::Result<CopyReport, CopyError> {
        let tuning = &self.config.copy;
        let r = match (&self.zero_copy, tuning.zero_copy) {
            (Some(z), ZeroCopyPolicy::Auto) => {
                CopyEngine::with_primitive(&**z, tuning).copy(input, output, limit)
            }
            _ => CopyEngine::from_tuning(tuning).copy(input, output, limit),
        };
        let fields = match &r {
            Ok(rep) => json!({
                "schema_version": SCHEMA_VERSION,
                "limit": limit,
                "copied": rep.copied,
                "consumed": rep.consumed,
                "zero_copied": rep.zero_copied,
            }),
            Err(CopyError::ShortWrite {
                copied, consumed, ..
            }) => json!({
                "schema_version": SCHEMA_VERSION,
                "limit": limit,
                "copied": copied,
                "consumed": consumed,
            }),
        };
        if let Err(e) = &r {
            self.audit.log(Level::Error, &e.to_string());
        }
        self.facts.emit("platkit", "copy.range", decision(&r), fields);
        r
    }

    /// A watcher on this platform's notification backend.
    ///
    /// # Errors
    ///
    /// See [`Watcher::new`].
    pub fn watcher<'a>(&self, max: usize) -> Result<Watcher<'a>> {
        Watcher::new(max)
    }

    /// [`Watcher::add`] with a `notify.add` fact.
    ///
    /// # Errors
    ///
    /// See [`Watcher::add`].
    pub fn watch<'a, B: NotifyBackend>(
        &self,
        watcher: &mut Watcher<'a, B>,
        fd: BorrowedFd<'a>,
        path: &'a Path,
    ) -> Result<()> {
        let r = watcher.add(fd, path);
        let dec = match &r {
            Ok(()) => "success",
            Err(e) if !e.is_fatal() => "warn",
            Err(_) => "failure",
        };
        self.facts.emit(
            "platkit",
            "notify.add",
            dec,
            json!({
                "schema_version": SCHEMA_VERSION,
                "path": path.display().to_string(),
                "watches": watcher.len(),
            }),
        );
        r
    }

    /// [`Watcher::wait`] with a `notify.wait` fact.
    ///
    /// # Errors
    ///
    /// See [`Watcher::wait`].
    pub fn wait<'a, B: NotifyBackend>(
        &self,
        watcher: &mut Watcher<'a, B>,
    ) -> Result<(BorrowedFd<'a>, &'a Path)> {
        let r = watcher.wait();
        let path = r.as_ref().ok().map(|(_, p)| p.display().to_string());
        self.facts.emit(
            "platkit",
            "notify.wait",
            decision(&r),
            json!({ "schema_version": SCHEMA_VERSION, "path": path }),
        );
        r
    }

    /// # Errors
    ///
    /// See [`signal::install_terminators`].
    pub fn install_terminators(&self, disposition: Disposition) -> Result<()> {
        let r = signal::install_terminators(disposition);
        let kind = match disposition {
            Disposition::Default => "default",
            Disposition::Handler(_) => "handler",
        };
        self.facts.emit(
            "platkit",
            "signal.install",
            decision(&r),
            json!({
                "schema_version": SCHEMA_VERSION,
                "disposition": kind,
                "signals": signal::terminating().count(),
            }),
        );
        r
    }
}
