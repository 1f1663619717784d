//! Error handling for failed requests
//!
//! - config.rs: Configuration structures
//! - dispatcher.rs: Failure to envelope mapping
//! - logger.rs: Injectable failure log sinks
//! - middleware.rs: HTTP middleware that hands parked failures to the dispatcher

pub mod config;
pub mod dispatcher;
pub mod logger;
pub mod middleware;

pub use config::ErrorHandlingConfig;
pub use dispatcher::Dispatcher;
pub use logger::{
    FailureLogger, FailureRecord, RecordingFailureLogger, Severity, TracingFailureLogger,
};
pub use middleware::{ErrorHandlingLayer, ErrorHandlingService};
