use super::news_repository::{NewsRepository, ProviderResponse, RepositoryError};
use async_trait::async_trait;
use std::time::Duration;

const API_KEY_HEADER: &str = "X-Api-Key";
const USER_AGENT: &str = "NewsHub-Backend";

/// NewsAPI client. Holds the API key so it never leaves the server.
///
/// Only connection setup is bounded here. The overall request deadline is
/// owned by the caller.
pub struct NewsApiRepository {
    base_url: String,
    api_key: String,
    http_client: reqwest::Client,
}

impl NewsApiRepository {
    pub fn new(
        base_url: String,
        api_key: String,
        connect_timeout: Duration,
    ) -> Result<Self, String> {
        let http_client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| format!("Failed to build HTTP client: {}", e))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            http_client,
        })
    }

    fn url_for(&self, provider_query: &str) -> String {
        format!("{}/{}", self.base_url, provider_query.trim_start_matches('/'))
    }
}

fn to_repository_error(context: &str, e: reqwest::Error) -> RepositoryError {
    if e.is_timeout() {
        RepositoryError::Timeout
    } else {
        RepositoryError::Transport(format!("{}: {}", context, e))
    }
}

#[async_trait]
impl NewsRepository for NewsApiRepository {
    async fn fetch(&self, provider_query: &str) -> Result<ProviderResponse, RepositoryError> {
        let url = self.url_for(provider_query);
        tracing::debug!(query = %provider_query, "Requesting news provider");

        let response = self
            .http_client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|e| to_repository_error("News provider request failed", e))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| to_repository_error("Failed to read news provider body", e))?;

        Ok(ProviderResponse { status, body })
    }
}
