pub mod filter;
pub mod paginator;
pub mod session;

pub use filter::{filter_articles, CategorySelector, ALL_CATEGORIES};
pub use paginator::{paginate, Page};
pub use session::ViewSession;

use crate::domain::news::{ArticleResponse, CategoryKey, CategoryStatus, RunStatus};
use serde::Serialize;
use std::collections::BTreeMap;

/// Read model of a session: the visible page plus per-category status.
#[derive(Debug, Serialize)]
pub struct ViewResponse {
    pub articles: Vec<ArticleResponse>,
    pub page_count: usize,
    pub effective_page: usize,
    pub page_size: usize,
    pub total_results: usize,
    pub selected_category: CategorySelector,
    pub search_text: String,
    pub run_status: RunStatus,
    /// Provider message when any category was refused for quota reasons.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quota_denial: Option<String>,
    pub category_status: BTreeMap<CategoryKey, CategoryStatus>,
}
