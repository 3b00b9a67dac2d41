use serde::Deserialize;
use std::env;
use std::time::Duration;

/// Upper bound for `SESSION_IDLE_MINUTES`, one year.
pub const MAX_SESSION_IDLE_MINUTES: u64 = 60 * 24 * 365;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_format: LogFormat,
    // News provider
    pub news_api_key: String,
    pub news_api_base_url: String,
    pub news_api_timeout_secs: u64,
    // View sessions
    pub page_size: usize,
    pub session_idle_minutes: u64,
    pub max_sessions: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()?,
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                })?,
            news_api_key: env::var("NEWS_API_KEY")?,
            news_api_base_url: env::var("NEWS_API_BASE_URL")
                .unwrap_or_else(|_| "https://newsapi.org/v2".to_string()),
            news_api_timeout_secs: env::var("NEWS_API_TIMEOUT_SECS")
                .unwrap_or_else(|_| "20".to_string())
                .parse()?,
            page_size: env::var("PAGE_SIZE")
                .unwrap_or_else(|_| "6".to_string())
                .parse()?,
            session_idle_minutes: env::var("SESSION_IDLE_MINUTES")
                .unwrap_or_else(|_| "30".to_string())
                .parse()?,
            max_sessions: env::var("MAX_SESSIONS")
                .unwrap_or_else(|_| "10000".to_string())
                .parse()?,
        };

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        if self.page_size == 0 {
            return Err("PAGE_SIZE must be greater than zero".into());
        }
        if self.session_idle_minutes > MAX_SESSION_IDLE_MINUTES {
            return Err(format!(
                "SESSION_IDLE_MINUTES must be at most {}",
                MAX_SESSION_IDLE_MINUTES
            )
            .into());
        }
        Ok(())
    }

    pub fn news_api_timeout(&self) -> Duration {
        Duration::from_secs(self.news_api_timeout_secs)
    }

    pub fn session_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.session_idle_minutes.saturating_mul(60))
    }
}
