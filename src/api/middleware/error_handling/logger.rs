//! Failure log sinks
//!
//! The dispatcher writes through a [`FailureLogger`] handed to it at
//! construction. Production uses [`TracingFailureLogger`]; tests can
//! capture records with [`RecordingFailureLogger`].

use parking_lot::Mutex;
use tracing::{error, warn};

use crate::api::errors::ErrorCode;
use crate::api::failure::FailureKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// One log emission for one failed request
#[derive(Debug, Clone, PartialEq)]
pub struct FailureRecord {
    pub severity: Severity,
    pub kind: FailureKind,
    pub status: u16,
    pub code: ErrorCode,
    pub path: String,
    /// Operator-facing message
    pub detail: String,
    /// Full failure chain, only for unclassified failures
    pub diagnostic: Option<String>,
}

/// Sink for failure records
pub trait FailureLogger: Send + Sync {
    fn log(&self, record: &FailureRecord);
}

/// Writes records through `tracing`
pub struct TracingFailureLogger;

impl FailureLogger for TracingFailureLogger {
    fn log(&self, record: &FailureRecord) {
        match (record.severity, &record.diagnostic) {
            (Severity::Warning, _) => warn!(
                path = %record.path,
                status = record.status,
                code = %record.code,
                "{}",
                record.detail
            ),
            (Severity::Error, Some(diagnostic)) => error!(
                path = %record.path,
                status = record.status,
                code = %record.code,
                diagnostic = %diagnostic,
                "{}",
                record.detail
            ),
            (Severity::Error, None) => error!(
                path = %record.path,
                status = record.status,
                code = %record.code,
                "{}",
                record.detail
            ),
        }
    }
}

/// Keeps every record in memory
#[derive(Default)]
pub struct RecordingFailureLogger {
    records: Mutex<Vec<FailureRecord>>,
}

impl RecordingFailureLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<FailureRecord> {
        self.records.lock().clone()
    }
}

impl FailureLogger for RecordingFailureLogger {
    fn log(&self, record: &FailureRecord) {
        self.records.lock().push(record.clone());
    }
}
