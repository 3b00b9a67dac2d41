use super::error::SessionServiceError;
use super::{SessionResponse, ViewUpdate};
use crate::domain::news::{AggregationResult, NewsService, NewsServiceApi};
use crate::domain::view::ViewSession;
use async_trait::async_trait;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use uuid::Uuid;

type SharedSession = Arc<Mutex<ViewSession>>;

pub struct SessionService {
    news_service: Arc<NewsService>,
    sessions: Cache<Uuid, SharedSession>,
    page_size: usize,
}

impl SessionService {
    pub fn new(
        news_service: Arc<NewsService>,
        page_size: usize,
        idle_timeout: Duration,
        max_sessions: u64,
    ) -> Self {
        let sessions = Cache::builder()
            .max_capacity(max_sessions)
            .time_to_idle(idle_timeout)
            .build();

        Self {
            news_service,
            sessions,
            page_size,
        }
    }
}

#[async_trait]
pub trait SessionServiceApi: Send + Sync {
    /// Run an aggregation and open a session on its result
    async fn create_session(&self) -> Result<SessionResponse, SessionServiceError>;

    async fn get_view(&self, session_id: Uuid) -> Result<SessionResponse, SessionServiceError>;

    /// Apply category, search and page changes, in that order
    async fn update_view(
        &self,
        session_id: Uuid,
        update: ViewUpdate,
    ) -> Result<SessionResponse, SessionServiceError>;

    /// Re-run the aggregation for an existing session (explicit retry)
    async fn refresh(&self, session_id: Uuid) -> Result<SessionResponse, SessionServiceError>;

    async fn end_session(&self, session_id: Uuid) -> Result<(), SessionServiceError>;
}

#[async_trait]
impl SessionServiceApi for SessionService {
    async fn create_session(&self) -> Result<SessionResponse, SessionServiceError> {
        let result = self.aggregate().await?;
        let session = ViewSession::new(result, self.page_size);
        let view = session.view();

        let session_id = Uuid::new_v4();
        self.sessions
            .insert(session_id, Arc::new(Mutex::new(session)))
            .await;

        tracing::info!(
            session_id = %session_id,
            total_results = view.total_results,
            "Session created"
        );

        Ok(SessionResponse { session_id, view })
    }

    async fn get_view(&self, session_id: Uuid) -> Result<SessionResponse, SessionServiceError> {
        let session = self.find(session_id).await?;
        let view = session.lock().await.view();
        Ok(SessionResponse { session_id, view })
    }

    async fn update_view(
        &self,
        session_id: Uuid,
        update: ViewUpdate,
    ) -> Result<SessionResponse, SessionServiceError> {
        let session = self.find(session_id).await?;
        let mut session = session.lock().await;

        if let Some(category) = update.category.as_deref() {
            session.set_selected_category(category);
        }
        if let Some(search) = update.search.as_deref() {
            session.set_search_text(search);
        }
        if let Some(page) = update.page {
            session.set_page(page);
        }

        tracing::debug!(
            session_id = %session_id,
            update = ?update,
            page = session.current_page(),
            "Session view updated"
        );

        Ok(SessionResponse {
            session_id,
            view: session.view(),
        })
    }

    async fn refresh(&self, session_id: Uuid) -> Result<SessionResponse, SessionServiceError> {
        let session = self.find(session_id).await?;

        // Aggregate without holding the session lock.
        let result = self.aggregate().await?;

        let mut session = session.lock().await;
        session.set_result(result);

        tracing::info!(
            session_id = %session_id,
            run_status = ?session.result().run_status(),
            "Session refreshed"
        );

        Ok(SessionResponse {
            session_id,
            view: session.view(),
        })
    }

    async fn end_session(&self, session_id: Uuid) -> Result<(), SessionServiceError> {
        self.sessions
            .remove(&session_id)
            .await
            .map(|_| tracing::info!(session_id = %session_id, "Session ended"))
            .ok_or(SessionServiceError::NotFound)
    }
}

impl SessionService {
    async fn find(&self, session_id: Uuid) -> Result<SharedSession, SessionServiceError> {
        self.sessions
            .get(&session_id)
            .await
            .ok_or(SessionServiceError::NotFound)
    }

    async fn aggregate(&self) -> Result<AggregationResult, SessionServiceError> {
        let result = self.news_service.aggregate().await?;

        if let Some(message) = result.quota_denial() {
            tracing::warn!(message = %message, "News provider denied access for some categories");
        }

        Ok(result)
    }
}
