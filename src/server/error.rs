//! Boundary error type and its HTTP mapping.

use crate::adapter_registry::{domain::AdapterDomainError, services::AdapterRegistryError};
use crate::packet::services::{DispatchError, QueryError};
use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

/// Errors reported to HTTP callers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request body or query string could not be decoded.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// A decoded field violates a domain rule.
    #[error("invalid field '{field}': {message}")]
    Validation {
        /// Offending field.
        field: &'static str,
        /// What was wrong with it.
        message: String,
    },

    /// The durable store failed the primary write or read.
    #[error("storage error: {0}")]
    Storage(String),

    /// The coordinator is shutting down.
    #[error("service unavailable: {0}")]
    Unavailable(String),
}

impl ApiError {
    /// Builds a validation error for `field`.
    pub fn validation(field: &'static str, message: impl ToString) -> Self {
        Self::Validation {
            field,
            message: message.to_string(),
        }
    }

    const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

#[derive(Serialize)]
struct FailureBody {
    success: bool,
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        let body = FailureBody {
            success: false,
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl From<AdapterRegistryError> for ApiError {
    fn from(err: AdapterRegistryError) -> Self {
        match err {
            AdapterRegistryError::Domain(domain) => {
                let field = match domain {
                    AdapterDomainError::EmptyAdapterId => "id",
                    AdapterDomainError::EmptyName => "name",
                    AdapterDomainError::EmptyEndpoint => "endpoint",
                };
                Self::validation(field, domain)
            }
            AdapterRegistryError::Store(store) => Self::Storage(store.to_string()),
            AdapterRegistryError::Closed | AdapterRegistryError::State(_) => {
                Self::Unavailable(err.to_string())
            }
        }
    }
}

impl From<DispatchError> for ApiError {
    fn from(err: DispatchError) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        Self::Storage(err.to_string())
    }
}
