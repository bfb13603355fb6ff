pub mod facts;

pub use facts::{AuditSink, FactsEmitter, JsonlSink, LogEmitter};
