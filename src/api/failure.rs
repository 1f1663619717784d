//! Closed taxonomy of request failures
//!
//! Every collaborator error (domain, repository, validation, extractor
//! rejections, sqlx) is converted into exactly one [`ApiFailure`] variant.
//! Each variant determines a fixed `(status, code)` pair through
//! [`FailureKind`].

use std::sync::Arc;

use axum::{
    extract::{
        path::ErrorKind as PathErrorKind,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use validator::ValidationErrors;

use crate::api::errors::ErrorCode;
use crate::application::errors::InventoryUseCaseError;
use crate::application::ports::RepositoryError;
use crate::domain::errors::DomainError;

/// A single field-level validation message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Failure raised while serving a request
#[derive(Debug, Error)]
pub enum ApiFailure {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("validation failed for {} field(s)", .0.len())]
    FieldValidation(Vec<FieldViolation>),

    #[error("{} constraint violation(s)", .0.len())]
    ConstraintValidation(Vec<String>),

    #[error("missing required parameter '{0}'")]
    MissingParameter(String),

    #[error("parameter '{name}' has the wrong type")]
    TypeMismatch {
        name: String,
        expected: Option<String>,
    },

    #[error("request body could not be read")]
    MalformedBody(Option<String>),

    #[error("data integrity violation: {0}")]
    DataIntegrity(String),

    #[error(transparent)]
    Unclassified(anyhow::Error),
}

/// Payload-free tag of an [`ApiFailure`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    NotFound,
    Conflict,
    FieldValidation,
    ConstraintValidation,
    MissingParameter,
    TypeMismatch,
    MalformedBody,
    DataIntegrity,
    Unclassified,
}

impl FailureKind {
    pub fn status(self) -> StatusCode {
        self.status_and_code().0
    }

    pub fn code(self) -> ErrorCode {
        self.status_and_code().1
    }

    /// The one place status and code are chosen, always together
    pub fn status_and_code(self) -> (StatusCode, ErrorCode) {
        match self {
            FailureKind::NotFound => (StatusCode::NOT_FOUND, ErrorCode::ResourceNotFound),
            FailureKind::Conflict => (StatusCode::CONFLICT, ErrorCode::InventoryItemExists),
            FailureKind::FieldValidation | FailureKind::ConstraintValidation => {
                (StatusCode::BAD_REQUEST, ErrorCode::ValidationError)
            }
            FailureKind::MissingParameter => (StatusCode::BAD_REQUEST, ErrorCode::MissingParameter),
            FailureKind::TypeMismatch => (StatusCode::BAD_REQUEST, ErrorCode::TypeMismatch),
            FailureKind::MalformedBody => (StatusCode::BAD_REQUEST, ErrorCode::InvalidRequestBody),
            FailureKind::DataIntegrity => (StatusCode::BAD_REQUEST, ErrorCode::DataIntegrityError),
            FailureKind::Unclassified => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalServerError,
            ),
        }
    }
}

impl ApiFailure {
    pub fn kind(&self) -> FailureKind {
        match self {
            ApiFailure::NotFound(_) => FailureKind::NotFound,
            ApiFailure::Conflict(_) => FailureKind::Conflict,
            ApiFailure::FieldValidation(_) => FailureKind::FieldValidation,
            ApiFailure::ConstraintValidation(_) => FailureKind::ConstraintValidation,
            ApiFailure::MissingParameter(_) => FailureKind::MissingParameter,
            ApiFailure::TypeMismatch { .. } => FailureKind::TypeMismatch,
            ApiFailure::MalformedBody(_) => FailureKind::MalformedBody,
            ApiFailure::DataIntegrity(_) => FailureKind::DataIntegrity,
            ApiFailure::Unclassified(_) => FailureKind::Unclassified,
        }
    }

    /// Classify an opaque error, trying the most specific source types first.
    ///
    /// Anything that matches no known type ends up as [`ApiFailure::Unclassified`].
    pub fn classify(err: anyhow::Error) -> Self {
        macro_rules! try_downcast {
            ($err:expr, $ty:ty) => {
                match $err.downcast::<$ty>() {
                    Ok(typed) => return ApiFailure::from(typed),
                    Err(err) => err,
                }
            };
        }

        let err = match err.downcast::<ApiFailure>() {
            Ok(failure) => return failure,
            Err(err) => err,
        };
        let err = try_downcast!(err, DomainError);
        let err = try_downcast!(err, InventoryUseCaseError);
        let err = try_downcast!(err, RepositoryError);
        let err = try_downcast!(err, ValidationErrors);
        let err = try_downcast!(err, QueryRejection);
        let err = try_downcast!(err, PathRejection);
        let err = try_downcast!(err, JsonRejection);
        let err = try_downcast!(err, sqlx::Error);

        ApiFailure::Unclassified(err)
    }
}

impl From<anyhow::Error> for ApiFailure {
    fn from(err: anyhow::Error) -> Self {
        ApiFailure::classify(err)
    }
}

impl From<DomainError> for ApiFailure {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound(msg) => ApiFailure::NotFound(msg),
            DomainError::AlreadyExists(msg) => ApiFailure::Conflict(msg),
        }
    }
}

impl From<RepositoryError> for ApiFailure {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Integrity(diagnostic) => ApiFailure::DataIntegrity(diagnostic),
        }
    }
}

impl From<InventoryUseCaseError> for ApiFailure {
    fn from(err: InventoryUseCaseError) -> Self {
        match err {
            InventoryUseCaseError::Domain(e) => e.into(),
            InventoryUseCaseError::Repository(e) => e.into(),
        }
    }
}

impl From<ValidationErrors> for ApiFailure {
    /// Fields come out sorted by name; the validator keeps them in a hash map.
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|(a, _), (b, _)| a.cmp(b));

        let violations = fields
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    let message = error
                        .message
                        .as_ref()
                        .map(|cow| cow.to_string())
                        .unwrap_or_else(|| error.code.to_string());
                    FieldViolation::new(field.to_string(), message)
                })
            })
            .collect();

        ApiFailure::FieldValidation(violations)
    }
}

impl From<JsonRejection> for ApiFailure {
    fn from(rejection: JsonRejection) -> Self {
        ApiFailure::MalformedBody(Some(rejection.body_text()))
    }
}

impl From<PathRejection> for ApiFailure {
    fn from(rejection: PathRejection) -> Self {
        let inner = match rejection {
            PathRejection::FailedToDeserializePathParams(inner) => inner,
            other => return ApiFailure::Unclassified(anyhow::anyhow!(other.body_text())),
        };

        match inner.into_kind() {
            PathErrorKind::ParseErrorAtKey {
                key, expected_type, ..
            } => ApiFailure::TypeMismatch {
                name: key,
                expected: simple_type_name(expected_type),
            },
            PathErrorKind::ParseErrorAtIndex {
                index,
                expected_type,
                ..
            } => ApiFailure::TypeMismatch {
                name: index.to_string(),
                expected: simple_type_name(expected_type),
            },
            PathErrorKind::ParseError { expected_type, .. } => ApiFailure::TypeMismatch {
                name: "path".to_string(),
                expected: simple_type_name(expected_type),
            },
            other => ApiFailure::Unclassified(anyhow::anyhow!(
                "path parameters could not be deserialized: {}",
                other
            )),
        }
    }
}

impl From<QueryRejection> for ApiFailure {
    fn from(rejection: QueryRejection) -> Self {
        let text = rejection.body_text();
        if let Some(name) = missing_field_name(&text) {
            return ApiFailure::MissingParameter(name.to_string());
        }

        match invalid_field_name(&text) {
            Some(name) => ApiFailure::TypeMismatch {
                name: name.to_string(),
                expected: None,
            },
            None => ApiFailure::ConstraintValidation(vec![text]),
        }
    }
}

impl From<sqlx::Error> for ApiFailure {
    fn from(err: sqlx::Error) -> Self {
        use sqlx::error::ErrorKind;

        match err {
            sqlx::Error::RowNotFound => ApiFailure::NotFound("Registro no encontrado".to_string()),
            sqlx::Error::Database(ref db_err)
                if matches!(
                    db_err.kind(),
                    ErrorKind::UniqueViolation
                        | ErrorKind::ForeignKeyViolation
                        | ErrorKind::NotNullViolation
                        | ErrorKind::CheckViolation
                ) =>
            {
                ApiFailure::DataIntegrity(db_err.message().to_string())
            }
            other => ApiFailure::Unclassified(anyhow::Error::new(other)),
        }
    }
}

/// Carries a failure from a handler to the error-handling layer
#[derive(Debug, Clone)]
pub struct PendingFailure(Arc<ApiFailure>);

impl PendingFailure {
    pub fn failure(&self) -> &ApiFailure {
        &self.0
    }
}

impl IntoResponse for ApiFailure {
    /// Only sets the status line. The envelope body needs the request path,
    /// so `ErrorHandlingLayer` builds it from the parked failure.
    fn into_response(self) -> Response {
        let mut response = self.kind().status().into_response();
        response
            .extensions_mut()
            .insert(PendingFailure(Arc::new(self)));
        response
    }
}

/// `alloc::string::String` -> `String`
fn simple_type_name(type_name: &str) -> Option<String> {
    let trimmed = type_name.trim();
    if trimmed.is_empty() {
        return None;
    }
    let base = trimmed.split('<').next().unwrap_or(trimmed);
    base.rsplit("::").next().map(str::to_string)
}

/// Extract `name` from serde's "missing field `name`" message
fn missing_field_name(text: &str) -> Option<&str> {
    const MARKER: &str = "missing field `";

    let start = text.find(MARKER)? + MARKER.len();
    let rest = &text[start..];
    let end = rest.find('`')?;
    Some(&rest[..end])
}

/// Extract `name` from "Failed to deserialize query string: name: reason"
fn invalid_field_name(text: &str) -> Option<&str> {
    const PREFIX: &str = "Failed to deserialize query string: ";

    let rest = text.strip_prefix(PREFIX)?;
    let (name, reason) = rest.split_once(": ")?;
    let is_field = !name.is_empty()
        && !reason.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '.' || c == '[' || c == ']');
    is_field.then_some(name)
}
