use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Main application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("News API access denied: {message}")]
    QuotaDenied {
        message: String,
        details: Option<serde_json::Value>,
    },

    #[error("Failed to fetch news data: {message}")]
    ExternalService {
        message: String,
        details: Option<serde_json::Value>,
    },
}

/// Error body shared by every failing endpoint.
///
/// `message` and `details` are only present for upstream failures, so a
/// rejected category renders as `{"error": "Invalid category"}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::QuotaDenied { .. } => StatusCode::FORBIDDEN,
            Self::ExternalService { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        match self {
            Self::BadRequest(msg) => ErrorResponse {
                error: msg.clone(),
                message: None,
                details: None,
            },
            Self::QuotaDenied { message, details } => ErrorResponse {
                error: "News API access denied".to_string(),
                message: Some(message.clone()),
                details: details.clone(),
            },
            Self::ExternalService { message, details } => ErrorResponse {
                error: "Failed to fetch news data".to_string(),
                message: Some(message.clone()),
                details: details.clone(),
            },
            Self::NotFound(_) => ErrorResponse {
                error: self.to_string(),
                message: None,
                details: None,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::error!(
            error = %self,
            status = %status.as_u16(),
            "Request failed"
        );

        (status, Json(self.to_response())).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;
