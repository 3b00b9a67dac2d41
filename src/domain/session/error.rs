use crate::domain::news::NewsServiceError;
use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum SessionServiceError {
    #[error("session not found")]
    NotFound,
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("dependency error: {0}")]
    Dependency(String),
}

impl From<NewsServiceError> for SessionServiceError {
    fn from(err: NewsServiceError) -> Self {
        match err {
            NewsServiceError::InvalidCategory(msg) => SessionServiceError::Invalid(msg),
            other => SessionServiceError::Dependency(other.to_string()),
        }
    }
}

impl From<SessionServiceError> for AppError {
    fn from(err: SessionServiceError) -> Self {
        match err {
            SessionServiceError::NotFound => AppError::NotFound("Session not found".to_string()),
            SessionServiceError::Invalid(msg) => AppError::BadRequest(msg),
            SessionServiceError::Dependency(msg) => AppError::ExternalService {
                message: msg,
                details: None,
            },
        }
    }
}
