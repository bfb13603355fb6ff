use log::Level;
use serde_json::Value;

pub trait FactsEmitter {
    fn emit(&self, subsystem: &str, event: &str, decision: &str, fields: Value);
}

pub trait AuditSink {
    fn log(&self, level: Level, msg: &str);
}

/// Discards everything.
#[derive(Default, Clone, Copy, Debug)]
pub struct JsonlSink;

impl FactsEmitter for JsonlSink {
    fn emit(&self, _subsystem: &str, _event: &str, _decision: &str, _fields: Value) {}
}

impl AuditSink for JsonlSink {
    fn log(&self, _level: Level, _msg: &str) {}
}

/// Forwards facts and audit lines to the `log` facade under the `platkit` target.
#[derive(Default, Clone, Copy, Debug)]
pub struct LogEmitter;

impl FactsEmitter for LogEmitter {
    fn emit(&self, subsystem: &str, event: &str, decision: &str, fields: Value) {
        log::debug!(target: "platkit", "{subsystem}.{event} decision={decision} {fields}");
    }
}

impl AuditSink for LogEmitter {
    fn log(&self, level: Level, msg: &str) {
        log::log!(target: "platkit", level, "{msg}");
    }
}
