use std::sync::atomic::{AtomicI64, Ordering};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Stable machine-readable error identifiers clients can branch on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ResourceNotFound,
    InventoryItemExists,
    ValidationError,
    MissingParameter,
    TypeMismatch,
    InvalidRequestBody,
    DataIntegrityError,
    InternalServerError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ResourceNotFound => "RESOURCE_NOT_FOUND",
            ErrorCode::InventoryItemExists => "INVENTORY_ITEM_EXISTS",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::MissingParameter => "MISSING_PARAMETER",
            ErrorCode::TypeMismatch => "TYPE_MISMATCH",
            ErrorCode::InvalidRequestBody => "INVALID_REQUEST_BODY",
            ErrorCode::DataIntegrityError => "DATA_INTEGRITY_ERROR",
            ErrorCode::InternalServerError => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uniform error body returned for every failed request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorEnvelope {
    timestamp: DateTime<Utc>,
    status: u16,
    code: ErrorCode,
    message: String,
    path: String,
}

impl ErrorEnvelope {
    /// 404 RESOURCE_NOT_FOUND
    pub fn not_found(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self::of(
            StatusCode::NOT_FOUND,
            ErrorCode::ResourceNotFound,
            message,
            path,
        )
    }

    /// 400 VALIDATION_ERROR
    pub fn validation(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self::of(
            StatusCode::BAD_REQUEST,
            ErrorCode::ValidationError,
            message,
            path,
        )
    }

    /// 500 INTERNAL_SERVER_ERROR
    pub fn generic(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self::of(
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::InternalServerError,
            message,
            path,
        )
    }

    pub fn of(
        status: StatusCode,
        code: ErrorCode,
        message: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: envelope_timestamp(),
            status: status.as_u16(),
            code,
            message: message.into(),
            path: path.into(),
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl IntoResponse for ErrorEnvelope {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(self)).into_response()
    }
}

static LAST_TIMESTAMP_MICROS: AtomicI64 = AtomicI64::new(i64::MIN);

/// Current time at microsecond precision, never earlier than a previous envelope
fn envelope_timestamp() -> DateTime<Utc> {
    let now = Utc::now();
    let micros = now.timestamp_micros();
    let previous = LAST_TIMESTAMP_MICROS.fetch_max(micros, Ordering::AcqRel);

    DateTime::from_timestamp_micros(previous.max(micros)).unwrap_or(now)
}
