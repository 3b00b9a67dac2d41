use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use newshub_backend::controllers::{news::NewsController, session::SessionController};
use newshub_backend::domain::news::{Aggregator, NewsService};
use newshub_backend::domain::session::SessionService;
use newshub_backend::infrastructure::config::{Config, LogFormat};
use newshub_backend::infrastructure::http::{build_router, start_http_server};
use newshub_backend::infrastructure::repositories::NewsApiRepository;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting NewsHub Backend on {}:{}",
        config.host,
        config.port
    );

    tracing::info!(
        base_url = %config.news_api_base_url,
        timeout_secs = config.news_api_timeout_secs,
        page_size = config.page_size,
        "News provider configuration loaded"
    );

    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate repositories
    let news_repo = Arc::new(NewsApiRepository::new(
        config.news_api_base_url.clone(),
        config.news_api_key.clone(),
        config.news_api_timeout(),
    )?);

    // 2. Instantiate services
    let aggregator = Arc::new(Aggregator::new(news_repo, config.news_api_timeout()));
    let news_service = Arc::new(NewsService::new(aggregator));
    let session_service = Arc::new(SessionService::new(
        news_service.clone(),
        config.page_size,
        config.session_idle_timeout(),
        config.max_sessions,
    ));

    // 3. Instantiate controllers
    let news_controller = Arc::new(NewsController::new(news_service));
    let session_controller = Arc::new(SessionController::new(session_service));

    // Start HTTP server with all routes
    let app = build_router(news_controller, session_controller);
    start_http_server(config, app).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "newshub_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "newshub_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
