use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::session::{SessionResponse, SessionService, SessionServiceApi, ViewUpdate},
    error::AppResult,
};

pub struct SessionController {
    session_service: Arc<SessionService>,
}

impl SessionController {
    pub fn new(session_service: Arc<SessionService>) -> Self {
        Self { session_service }
    }

    /// POST /api/sessions - Aggregate all categories and open a view session
    pub async fn create_session(
        State(controller): State<Arc<SessionController>>,
    ) -> AppResult<(StatusCode, Json<SessionResponse>)> {
        let session = controller.session_service.create_session().await?;
        Ok((StatusCode::CREATED, Json(session)))
    }

    /// GET /api/sessions/{sessionId} - Current page of the session view
    pub async fn get_view(
        State(controller): State<Arc<SessionController>>,
        Path(session_id): Path<Uuid>,
    ) -> AppResult<Json<SessionResponse>> {
        let session = controller.session_service.get_view(session_id).await?;
        Ok(Json(session))
    }

    /// PATCH /api/sessions/{sessionId} - Change category, search text or page
    pub async fn update_view(
        State(controller): State<Arc<SessionController>>,
        Path(session_id): Path<Uuid>,
        payload: Result<Json<ViewUpdate>, JsonRejection>,
    ) -> AppResult<Json<SessionResponse>> {
        let Json(update) = payload?;
        let session = controller
            .session_service
            .update_view(session_id, update)
            .await?;
        Ok(Json(session))
    }

    /// POST /api/sessions/{sessionId}/refresh - Retry the aggregation
    pub async fn refresh(
        State(controller): State<Arc<SessionController>>,
        Path(session_id): Path<Uuid>,
    ) -> AppResult<Json<SessionResponse>> {
        let session = controller.session_service.refresh(session_id).await?;
        Ok(Json(session))
    }

    /// DELETE /api/sessions/{sessionId} - End the session
    pub async fn end_session(
        State(controller): State<Arc<SessionController>>,
        Path(session_id): Path<Uuid>,
    ) -> AppResult<StatusCode> {
        controller.session_service.end_session(session_id).await?;
        Ok(StatusCode::NO_CONTENT)
    }
}
