//! Maps a failure to its client envelope and its log record

use std::sync::Arc;

use crate::api::errors::ErrorEnvelope;
use crate::api::failure::{ApiFailure, FailureKind, FieldViolation};

use super::config::ErrorHandlingConfig;
use super::logger::{FailureLogger, FailureRecord, Severity, TracingFailureLogger};

const SUB_ERROR_SEPARATOR: &str = "; ";
const UNKNOWN_TYPE: &str = "desconocido";

const MALFORMED_BODY_MESSAGE: &str =
    "El cuerpo de la petición no es válido. Verifica el formato JSON.";
const MALFORMED_JSON_MESSAGE: &str = "Error al parsear JSON: formato inválido";

const INTEGRITY_MESSAGE: &str =
    "Error de integridad de datos. Verifica que todos los campos requeridos estén presentes.";
const DUPLICATE_ITEM_MESSAGE: &str = "Ya existe un item de inventario para este producto";
const REFERENTIAL_INTEGRITY_MESSAGE: &str =
    "No se puede realizar la operación debido a restricciones de integridad referencial";

const UNEXPECTED_MESSAGE: &str =
    "Ocurrió un error inesperado. Por favor, contacta al administrador del sistema.";

/// Terminal handler for failed requests. Stateless apart from its logger.
pub struct Dispatcher {
    config: ErrorHandlingConfig,
    logger: Arc<dyn FailureLogger>,
}

/// What the client sees and what the operator sees for one failure
struct Rendered {
    message: String,
    detail: String,
    diagnostic: Option<String>,
}

impl Dispatcher {
    pub fn new(config: ErrorHandlingConfig, logger: Arc<dyn FailureLogger>) -> Self {
        Self { config, logger }
    }

    /// Dispatcher logging through `tracing`
    pub fn with_tracing(config: ErrorHandlingConfig) -> Self {
        Self::new(config, Arc::new(TracingFailureLogger))
    }

    pub fn config(&self) -> &ErrorHandlingConfig {
        &self.config
    }

    /// Classify an opaque error, then dispatch it
    pub fn dispatch_error(&self, err: anyhow::Error, path: &str) -> ErrorEnvelope {
        self.dispatch(&ApiFailure::classify(err), path)
    }

    /// Build the envelope for `failure`, logging it first
    pub fn dispatch(&self, failure: &ApiFailure, path: &str) -> ErrorEnvelope {
        let kind = failure.kind();
        let rendered = self.render(failure, path);

        self.logger.log(&FailureRecord {
            severity: severity(kind),
            kind,
            status: kind.status().as_u16(),
            code: kind.code(),
            path: path.to_string(),
            detail: rendered.detail,
            diagnostic: rendered.diagnostic,
        });

        match kind {
            FailureKind::NotFound => ErrorEnvelope::not_found(rendered.message, path),
            FailureKind::FieldValidation | FailureKind::ConstraintValidation => {
                ErrorEnvelope::validation(rendered.message, path)
            }
            FailureKind::Unclassified => ErrorEnvelope::generic(rendered.message, path),
            _ => ErrorEnvelope::of(kind.status(), kind.code(), rendered.message, path),
        }
    }

    fn render(&self, failure: &ApiFailure, path: &str) -> Rendered {
        match failure {
            ApiFailure::NotFound(message) => Rendered {
                detail: format!("resource not found: {}", message),
                message: message.clone(),
                diagnostic: None,
            },
            ApiFailure::Conflict(message) => Rendered {
                detail: format!("duplicate inventory item: {}", message),
                message: message.clone(),
                diagnostic: None,
            },
            ApiFailure::FieldValidation(violations) => {
                let message = join_field_violations(violations);
                Rendered {
                    detail: format!("validation failed at {}: {}", path, message),
                    message,
                    diagnostic: None,
                }
            }
            ApiFailure::ConstraintValidation(violations) => {
                let message = violations.join(SUB_ERROR_SEPARATOR);
                Rendered {
                    detail: format!("constraint violation at {}: {}", path, message),
                    message,
                    diagnostic: None,
                }
            }
            ApiFailure::MissingParameter(name) => {
                let message = format!("Parámetro requerido faltante: {}", name);
                Rendered {
                    detail: format!("missing parameter at {}: {}", path, message),
                    message,
                    diagnostic: None,
                }
            }
            ApiFailure::TypeMismatch { name, expected } => {
                let message = format!(
                    "El parámetro '{}' debe ser de tipo {}",
                    name,
                    expected.as_deref().unwrap_or(UNKNOWN_TYPE)
                );
                Rendered {
                    detail: format!("argument type mismatch at {}: {}", path, message),
                    message,
                    diagnostic: None,
                }
            }
            ApiFailure::MalformedBody(diagnostic) => Rendered {
                message: self.malformed_body_message(diagnostic.as_deref()).to_string(),
                detail: format!(
                    "unreadable request body at {}: {}",
                    path,
                    diagnostic.as_deref().unwrap_or("<no diagnostic>")
                ),
                diagnostic: None,
            },
            ApiFailure::DataIntegrity(diagnostic) => Rendered {
                message: integrity_message(diagnostic).to_string(),
                detail: format!("data integrity violation at {}: {}", path, diagnostic),
                diagnostic: None,
            },
            ApiFailure::Unclassified(err) => Rendered {
                message: UNEXPECTED_MESSAGE.to_string(),
                detail: format!("unexpected error at {}: {}", path, err),
                diagnostic: Some(format!("{:?}", err)),
            },
        }
    }

    fn malformed_body_message(&self, diagnostic: Option<&str>) -> &'static str {
        let trigger = self.config.malformed_body_trigger.as_str();
        match diagnostic {
            Some(text) if !trigger.is_empty() && text.contains(trigger) => MALFORMED_JSON_MESSAGE,
            _ => MALFORMED_BODY_MESSAGE,
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::with_tracing(ErrorHandlingConfig::default())
    }
}

fn severity(kind: FailureKind) -> Severity {
    match kind {
        FailureKind::DataIntegrity | FailureKind::Unclassified => Severity::Error,
        _ => Severity::Warning,
    }
}

fn join_field_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("{}: {}", v.field, v.message))
        .collect::<Vec<_>>()
        .join(SUB_ERROR_SEPARATOR)
}

/// Case-sensitive; uniqueness is checked before foreign keys
fn integrity_message(diagnostic: &str) -> &'static str {
    if diagnostic.contains("unique") || diagnostic.contains("duplicate") {
        DUPLICATE_ITEM_MESSAGE
    } else if diagnostic.contains("foreign key") || diagnostic.contains("FK") {
        REFERENTIAL_INTEGRITY_MESSAGE
    } else {
        INTEGRITY_MESSAGE
    }
}
