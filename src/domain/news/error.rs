use crate::error::AppError;
use serde::Serialize;
use std::time::Duration;

/// Why a single category fetch failed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("upstream responded with status {status}")]
    UpstreamStatus {
        status: u16,
        body: Option<serde_json::Value>,
    },
    #[error("provider error {code}: {message}")]
    Provider {
        code: String,
        message: String,
        body: serde_json::Value,
    },
    #[error("quota denied: {message}")]
    QuotaDenied {
        message: String,
        body: serde_json::Value,
    },
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Coarse failure class reported in per-category status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Transport,
    Timeout,
    UpstreamStatus,
    Provider,
    Malformed,
}

impl FetchError {
    /// Failure class, or `None` for quota denial which is reported separately.
    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            Self::Transport(_) => Some(FailureKind::Transport),
            Self::Timeout(_) => Some(FailureKind::Timeout),
            Self::UpstreamStatus { .. } => Some(FailureKind::UpstreamStatus),
            Self::Provider { .. } => Some(FailureKind::Provider),
            Self::Malformed(_) => Some(FailureKind::Malformed),
            Self::QuotaDenied { .. } => None,
        }
    }

    fn details(self) -> Option<serde_json::Value> {
        match self {
            Self::UpstreamStatus { body, .. } => body,
            Self::Provider { body, .. } => Some(body),
            Self::QuotaDenied { body, .. } => Some(body),
            Self::Transport(_) | Self::Timeout(_) | Self::Malformed(_) => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NewsServiceError {
    #[error("Invalid category")]
    InvalidCategory(String),
    #[error("quota denied: {message}")]
    QuotaDenied {
        message: String,
        details: Option<serde_json::Value>,
    },
    #[error("upstream error: {message}")]
    Upstream {
        message: String,
        details: Option<serde_json::Value>,
    },
}

impl From<FetchError> for NewsServiceError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::QuotaDenied { message, body } => NewsServiceError::QuotaDenied {
                message,
                details: Some(body),
            },
            other => NewsServiceError::Upstream {
                message: other.to_string(),
                details: other.details(),
            },
        }
    }
}

impl From<NewsServiceError> for AppError {
    fn from(err: NewsServiceError) -> Self {
        match err {
            NewsServiceError::InvalidCategory(_) => {
                AppError::BadRequest("Invalid category".to_string())
            }
            NewsServiceError::QuotaDenied { message, details } => {
                AppError::QuotaDenied { message, details }
            }
            NewsServiceError::Upstream { message, details } => {
                AppError::ExternalService { message, details }
            }
        }
    }
}
