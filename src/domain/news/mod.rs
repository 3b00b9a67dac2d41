pub mod aggregator;
pub mod error;
pub mod model;
pub mod service;

pub use aggregator::{AggregationResult, Aggregator, CategoryStatus, RunStatus};
pub use error::{FailureKind, FetchError, NewsServiceError};
pub use model::{Article, Category, CategoryKey};
pub use service::{NewsService, NewsServiceApi};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Article as rendered to clients
#[derive(Debug, Serialize, Deserialize)]
pub struct ArticleResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,
    pub category: CategoryKey,
    pub category_label: String,
}

/// Response for GET /api/categories
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub key: CategoryKey,
    pub label: String,
}

impl From<Article> for ArticleResponse {
    fn from(article: Article) -> Self {
        Self {
            category_label: article.source_category.label().to_string(),
            title: article.title,
            description: article.description,
            url: article.url,
            image_url: article.image_url,
            published_at: article.published_at,
            author: article.author,
            source_name: article.source_name,
            category: article.source_category,
        }
    }
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            key: category.key,
            label: category.label.to_string(),
        }
    }
}
