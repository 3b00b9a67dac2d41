use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;
use std::sync::Arc;

use crate::{
    domain::news::{CategoryResponse, NewsService, NewsServiceApi},
    error::AppResult,
};

pub struct NewsController {
    news_service: Arc<NewsService>,
}

impl NewsController {
    pub fn new(news_service: Arc<NewsService>) -> Self {
        Self { news_service }
    }

    /// GET /api/categories - List the fixed categories in declared order
    pub async fn list_categories(
        State(controller): State<Arc<NewsController>>,
    ) -> Json<Vec<CategoryResponse>> {
        Json(
            controller
                .news_service
                .categories()
                .into_iter()
                .map(CategoryResponse::from)
                .collect(),
        )
    }

    /// GET /api/news/{category} - Pass the provider response through
    pub async fn proxy_category(
        State(controller): State<Arc<NewsController>>,
        Path(category): Path<String>,
    ) -> AppResult<Json<Value>> {
        let body = controller.news_service.fetch_category(&category).await?;
        Ok(Json(body))
    }
}
