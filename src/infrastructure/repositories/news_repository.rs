use async_trait::async_trait;

/// Raw upstream response: status code plus the body text.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    pub status: u16,
    pub body: String,
}

impl ProviderResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// No response was received from the provider.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RepositoryError {
    #[error("request timed out")]
    Timeout,
    #[error("{0}")]
    Transport(String),
}

/// Fetch capability for the news provider.
///
/// Implementations own credentials and transport. Any HTTP response, error
/// statuses included, is returned as `Ok`; `Err` is reserved for failures
/// where no response was received.
#[async_trait]
pub trait NewsRepository: Send + Sync {
    async fn fetch(&self, provider_query: &str) -> Result<ProviderResponse, RepositoryError>;
}
