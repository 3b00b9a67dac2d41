use super::error::{FailureKind, FetchError, NewsServiceError};
use super::model::{Article, CategoryKey, RawArticle};
use crate::infrastructure::repositories::{NewsRepository, ProviderResponse, RepositoryError};
use futures::future::join_all;
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

/// Provider error codes that mean the key is not allowed to serve this
/// request (free-tier origin restriction or exhausted quota).
pub const QUOTA_DENIAL_CODES: [&str; 2] = ["corsNotAllowed", "rateLimited"];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CategoryStatus {
    Ok { article_count: usize },
    Failed { kind: FailureKind, reason: String },
    QuotaDenied { message: String },
}

impl CategoryStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }
}

impl From<FetchError> for CategoryStatus {
    fn from(err: FetchError) -> Self {
        match err.kind() {
            Some(kind) => CategoryStatus::Failed {
                kind,
                reason: err.to_string(),
            },
            None => match err {
                FetchError::QuotaDenied { message, .. } => CategoryStatus::QuotaDenied { message },
                other => CategoryStatus::Failed {
                    kind: FailureKind::Provider,
                    reason: other.to_string(),
                },
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Success,
    Partial,
    Failed,
}

/// Outcome of one aggregation run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AggregationResult {
    pub articles: Vec<Article>,
    pub per_category_status: BTreeMap<CategoryKey, CategoryStatus>,
}

impl AggregationResult {
    pub fn run_status(&self) -> RunStatus {
        let ok = self
            .per_category_status
            .values()
            .filter(|s| s.is_ok())
            .count();

        if ok == self.per_category_status.len() {
            RunStatus::Success
        } else if ok == 0 {
            RunStatus::Failed
        } else {
            RunStatus::Partial
        }
    }

    /// First quota-denial message, in category order.
    pub fn quota_denial(&self) -> Option<&str> {
        self.per_category_status.values().find_map(|s| match s {
            CategoryStatus::QuotaDenied { message } => Some(message.as_str()),
            _ => None,
        })
    }

    pub fn failed_categories(&self) -> Vec<CategoryKey> {
        self.per_category_status
            .iter()
            .filter(|(_, s)| !s.is_ok())
            .map(|(key, _)| *key)
            .collect()
    }
}

/// Classify a provider response. The payload is inspected before the HTTP
/// status so quota denials are recognised on 200 and 4xx alike.
pub fn inspect_response(response: &ProviderResponse) -> Result<Value, FetchError> {
    let parsed: Option<Value> = serde_json::from_str(&response.body).ok();

    if let Some(body) = &parsed {
        if body.get("status").and_then(Value::as_str) == Some("error") {
            let code = body
                .get("code")
                .and_then(Value::as_str)
                .unwrap_or("unknown")
                .to_string();
            let message = body
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();

            if QUOTA_DENIAL_CODES.contains(&code.as_str()) {
                return Err(FetchError::QuotaDenied {
                    message,
                    body: body.clone(),
                });
            }
            return Err(FetchError::Provider {
                code,
                message,
                body: body.clone(),
            });
        }
    }

    if !response.is_success() {
        return Err(FetchError::UpstreamStatus {
            status: response.status,
            body: parsed,
        });
    }

    parsed.ok_or_else(|| FetchError::Malformed("response body is not valid JSON".to_string()))
}

/// Tag the items of the `articles` array. A missing array is zero results.
pub fn extract_articles(category: CategoryKey, body: Value) -> Vec<Article> {
    let items = match body {
        Value::Object(mut map) => match map.remove("articles") {
            Some(Value::Array(items)) => items,
            _ => return Vec::new(),
        },
        _ => return Vec::new(),
    };

    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<RawArticle>(item) {
            Ok(raw) => Some(raw.into_article(category)),
            Err(e) => {
                tracing::warn!(category = %category, error = %e, "Skipping unreadable article");
                None
            }
        })
        .collect()
}

pub struct Aggregator {
    repository: Arc<dyn NewsRepository>,
    request_timeout: Duration,
}

impl Aggregator {
    pub fn new(repository: Arc<dyn NewsRepository>, request_timeout: Duration) -> Self {
        Self {
            repository,
            request_timeout,
        }
    }

    /// Fetch and classify one category's response, bounded by the request timeout.
    pub async fn fetch_body(&self, category: CategoryKey) -> Result<Value, FetchError> {
        let response = tokio::time::timeout(
            self.request_timeout,
            self.repository.fetch(category.provider_query()),
        )
        .await
        .map_err(|_| FetchError::Timeout(self.request_timeout))?
        .map_err(|err| match err {
            RepositoryError::Timeout => FetchError::Timeout(self.request_timeout),
            RepositoryError::Transport(message) => FetchError::Transport(message),
        })?;

        inspect_response(&response)
    }

    pub async fn fetch_category(&self, category: CategoryKey) -> Result<Vec<Article>, FetchError> {
        let body = self.fetch_body(category).await?;
        Ok(extract_articles(category, body))
    }

    /// Fetch every category concurrently and merge in the given order.
    ///
    /// Per-category failures are recorded in the status map and never abort
    /// the run. Only an empty or duplicated category list is rejected.
    pub async fn aggregate(
        &self,
        categories: &[CategoryKey],
    ) -> Result<AggregationResult, NewsServiceError> {
        validate_categories(categories)?;

        let outcomes = join_all(
            categories
                .iter()
                .map(|&category| async move { (category, self.fetch_category(category).await) }),
        )
        .await;

        let mut result = AggregationResult::default();
        for (category, outcome) in outcomes {
            let status = match outcome {
                Ok(mut batch) => {
                    tracing::info!(
                        category = %category,
                        article_count = batch.len(),
                        "Category fetched"
                    );
                    let status = CategoryStatus::Ok {
                        article_count: batch.len(),
                    };
                    result.articles.append(&mut batch);
                    status
                }
                Err(err) => {
                    tracing::warn!(category = %category, error = %err, "Category fetch failed");
                    CategoryStatus::from(err)
                }
            };
            result.per_category_status.insert(category, status);
        }

        tracing::info!(
            total_articles = result.articles.len(),
            run_status = ?result.run_status(),
            "Aggregation finished"
        );

        Ok(result)
    }
}

fn validate_categories(categories: &[CategoryKey]) -> Result<(), NewsServiceError> {
    if categories.is_empty() {
        return Err(NewsServiceError::InvalidCategory(
            "category list is empty".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for category in categories {
        if !seen.insert(category) {
            return Err(NewsServiceError::InvalidCategory(format!(
                "category {} listed twice",
                category
            )));
        }
    }

    Ok(())
}
