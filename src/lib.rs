//! # Inventory Service
//!
//! Inventory API whose failures all leave through one uniform JSON error
//! envelope (`timestamp`, `status`, `code`, `message`, `path`).
//!
//! ## Architecture Layers
//!
//! - **Domain**: Inventory entity and domain errors
//! - **Application**: Use cases, DTOs and the repository port
//! - **Infrastructure**: In-memory repository adapter
//! - **API**: Handlers, extractors, the failure taxonomy and the
//!   error-handling middleware
//!
//! ## Failure flow
//!
//! A handler returns an [`api::failure::ApiFailure`]. The
//! [`ErrorHandlingLayer`](api::middleware::error_handling::ErrorHandlingLayer)
//! passes it, with the request path, to the
//! [`Dispatcher`](api::middleware::error_handling::Dispatcher). The dispatcher
//! logs it and returns the [`ErrorEnvelope`](api::errors::ErrorEnvelope).
//!
//! ```no_run
//! use std::sync::Arc;
//! use inventory_service::api::failure::ApiFailure;
//! use inventory_service::api::middleware::error_handling::{
//!     Dispatcher, ErrorHandlingConfig, RecordingFailureLogger,
//! };
//!
//! let logger = Arc::new(RecordingFailureLogger::new());
//! let dispatcher = Dispatcher::new(ErrorHandlingConfig::default(), logger);
//! let envelope = dispatcher.dispatch(
//!     &ApiFailure::MissingParameter("productId".to_string()),
//!     "/api/inventory",
//! );
//! assert_eq!(envelope.message(), "Parámetro requerido faltante: productId");
//! ```

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

// Re-export key types explicitly to avoid ambiguity
pub use api::errors::{ErrorCode, ErrorEnvelope};
pub use api::failure::{ApiFailure, FailureKind, FieldViolation};
pub use api::middleware::error_handling::Dispatcher;
pub use application::{dto, ports, use_cases};
pub use config::Config;
pub use domain::errors as domain_errors;
