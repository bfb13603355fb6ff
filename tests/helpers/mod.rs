//! Shared test helpers for the platkit integration tests.
#![allow(dead_code)]

use log::Level;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use platkit::logging::{AuditSink, FactsEmitter};

/// In-memory emitter capturing facts.
#[derive(Clone, Default, Debug)]
pub struct TestEmitter {
    pub events: Arc<Mutex<Vec<(String, String, String, Value)>>>,
}

impl TestEmitter {
    /// Captured `(event, decision, fields)` triples for `event`.
    pub fn named(&self, event: &str) -> Vec<(String, Value)> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, e, _, _)| e == event)
            .map(|(_, _, d, f)| (d.clone(), f.clone()))
            .collect()
    }
}

impl FactsEmitter for TestEmitter {
    fn emit(&self, subsystem: &str, event: &str, decision: &str, fields: Value) {
        self.events
            .lock()
            .unwrap()
            .push((subsystem.into(), event.into(), decision.into(), fields));
    }
}

/// A no-op audit sink for tests.
#[derive(Clone, Default)]
pub struct TestAudit;

impl AuditSink for TestAudit {
    fn log(&self, _level: Level, _msg: &str) {}
}

pub fn with_temp_root() -> tempfile::TempDir {
    tempfile::tempdir().expect("tempdir")
}

/// Write `content` to `name` under `root` and return the path.
pub fn write_file(root: &tempfile::TempDir, name: &str, content: &[u8]) -> PathBuf {
    let p = root.path().join(name);
    std::fs::write(&p, content).expect("write fixture");
    p
}

/// Deterministic non-trivial byte pattern.
pub fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 31 % 253) as u8).collect()
}
