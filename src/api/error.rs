//! API Error Types
//!
//! Defines error types for the API layer and implements conversion
//! to HTTP responses with appropriate status codes.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::jira::TrackerError;
use crate::query::QueryError;

/// Challenge sent with 401 responses
pub const AUTH_CHALLENGE: &str = "Basic realm=\"jira-datasource\"";

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or wrong inbound credentials
    #[error("Unauthorized")]
    Unauthorized,

    /// Query translation or execution error
    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    /// Jira call failed
    #[error("Jira error: {0}")]
    Tracker(#[from] TrackerError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
    pub request_id: String,
}

/// Error details
#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            ApiError::Query(QueryError::InvalidTimestamp(_)) => {
                (StatusCode::BAD_REQUEST, "INVALID_TIMESTAMP")
            }
            ApiError::Query(QueryError::InvalidFilterName(_)) => {
                (StatusCode::BAD_REQUEST, "INVALID_FILTER_NAME")
            }
            ApiError::Query(QueryError::Upstream(_)) | ApiError::Tracker(_) => {
                (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR")
            }
            ApiError::Query(QueryError::Pipeline(_)) | ApiError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
            ApiError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let request_id = uuid::Uuid::new_v4().to_string();

        if status.is_server_error() {
            tracing::error!(
                request_id = %request_id,
                error_code = %code,
                error_message = %self,
                "API error occurred"
            );
        } else {
            tracing::debug!(
                request_id = %request_id,
                error_code = %code,
                error_message = %self,
                "Request rejected"
            );
        }

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: self.to_string(),
            },
            request_id,
        };

        let mut response = (status, Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static(AUTH_CHALLENGE),
            );
        }
        response
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;
