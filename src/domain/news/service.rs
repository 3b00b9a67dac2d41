use super::aggregator::{AggregationResult, Aggregator};
use super::error::NewsServiceError;
use super::model::{Category, CategoryKey};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

pub struct NewsService {
    aggregator: Arc<Aggregator>,
    categories: Vec<CategoryKey>,
}

impl NewsService {
    pub fn new(aggregator: Arc<Aggregator>) -> Self {
        Self {
            aggregator,
            categories: CategoryKey::ALL.to_vec(),
        }
    }
}

#[async_trait]
pub trait NewsServiceApi: Send + Sync {
    /// The fixed category set, in declared order.
    fn categories(&self) -> Vec<Category>;

    /// Proxy a single category to the provider.
    ///
    /// The category is validated before any request is made. On success the
    /// provider body is returned untouched.
    async fn fetch_category(&self, category: &str) -> Result<Value, NewsServiceError>;

    /// One aggregation run over every category.
    async fn aggregate(&self) -> Result<AggregationResult, NewsServiceError>;
}

#[async_trait]
impl NewsServiceApi for NewsService {
    fn categories(&self) -> Vec<Category> {
        self.categories.iter().copied().map(Category::from).collect()
    }

    async fn fetch_category(&self, category: &str) -> Result<Value, NewsServiceError> {
        let key: CategoryKey = category.parse().map_err(|_| {
            tracing::warn!(category = %category, "Invalid category requested");
            NewsServiceError::InvalidCategory(category.to_string())
        })?;

        tracing::info!(category = %key, "Proxying news request");

        self.aggregator.fetch_body(key).await.map_err(|err| {
            tracing::warn!(category = %key, error = %err, "News proxy request failed");
            NewsServiceError::from(err)
        })
    }

    async fn aggregate(&self) -> Result<AggregationResult, NewsServiceError> {
        self.aggregator.aggregate(&self.categories).await
    }
}
