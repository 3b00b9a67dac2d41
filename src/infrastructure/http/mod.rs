pub mod request_id;

pub use request_id::{request_id_middleware, RequestId, X_REQUEST_ID};

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::controllers::{health, news::NewsController, session::SessionController};
use crate::infrastructure::config::Config;

/// Build the application router with all routes and layers
pub fn build_router(
    news_controller: Arc<NewsController>,
    session_controller: Arc<SessionController>,
) -> Router {
    // News routes (categories + provider proxy)
    let news_routes = Router::new()
        .route("/api/categories", get(NewsController::list_categories))
        .route("/api/news/:category", get(NewsController::proxy_category))
        .with_state(news_controller);

    // Session routes (aggregation + filtered, paginated views)
    let session_routes = Router::new()
        .route("/api/sessions", post(SessionController::create_session))
        .route(
            "/api/sessions/:sessionId",
            get(SessionController::get_view)
                .patch(SessionController::update_view)
                .delete(SessionController::end_session),
        )
        .route(
            "/api/sessions/:sessionId/refresh",
            post(SessionController::refresh),
        )
        .with_state(session_controller);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .merge(news_routes)
        .merge(session_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

/// Start the HTTP server
pub async fn start_http_server(
    config: Arc<Config>,
    app: Router,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
