use crate::error::{AppError, Result};

/// Unit reported for rows that carry no unit of their own.
pub const DEFAULT_UNIT: &str = "kg";

/// Header carrying the caller id, set by the identity proxy in front of the service.
pub const DEFAULT_AUTH_HEADER: &str = "x-user-id";

/// Requests allowed per client per rate-limit window.
pub const DEFAULT_RATE_LIMIT_PER_MINUTE: u32 = 100;

/// Rate-limit window length (seconds).
pub const RATE_LIMIT_WINDOW_SECS: u64 = 60;

/// Report pagination bounds.
pub mod pagination {
    pub const DEFAULT_PAGE: i64 = 1;
    pub const DEFAULT_PAGE_SIZE: i64 = 10;
    pub const MAX_PAGE_SIZE: i64 = 100;
}

/// Short-term trend on the stats cards (percent change between early and late sub-windows).
pub mod trend_thresholds {
    /// Spans up to this many days compare thirds, longer spans compare quarters.
    pub const SHORT_SPAN_DAYS: f64 = 30.0;
    /// |change| above this percentage is reported as up/down.
    pub const DIRECTION_PCT: f64 = 1.0;
    /// Overall trend (first vs last observation) threshold, percent.
    pub const OVERALL_PCT: f64 = 5.0;
}

/// Coefficient-of-variation bands for price stability.
pub mod stability_thresholds {
    pub const HIGH_MAX_CV: f64 = 0.10;
    pub const MEDIUM_MAX_CV: f64 = 0.25;
    /// Shorter series are reported as medium stability without computing cv.
    pub const MIN_SERIES_LEN: usize = 3;
}

/// Split-half seasonality heuristic. Placeholder values, not validated constants.
pub mod seasonal {
    pub const MIN_SERIES_LEN: usize = 10;
    pub const CORRELATION_THRESHOLD: f64 = 0.7;
}

/// Aligned points required before two products are correlated.
pub const MIN_CORRELATION_POINTS: usize = 3;

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub db_path: String,
    pub api_port: u16,
    /// Request header holding the authenticated caller id (AUTH_HEADER)
    pub auth_header: String,
    /// Requests per client IP per minute (RATE_LIMIT_PER_MINUTE)
    pub rate_limit_per_minute: u32,
    /// Allowed CORS origins (CORS_ORIGINS, comma-separated). Empty disables CORS.
    pub cors_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            db_path: std::env::var("DB_PATH").unwrap_or_else(|_| "bazar.db".to_string()),
            api_port: std::env::var("API_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse::<u16>()
                .map_err(|_| AppError::Config("API_PORT must be a valid port number".to_string()))?,
            auth_header: std::env::var("AUTH_HEADER")
                .map(|h| h.trim().to_ascii_lowercase())
                .ok()
                .filter(|h| !h.is_empty())
                .unwrap_or_else(|| DEFAULT_AUTH_HEADER.to_string()),
            rate_limit_per_minute: match std::env::var("RATE_LIMIT_PER_MINUTE") {
                Ok(v) => parse_rate_limit(&v)?,
                Err(_) => DEFAULT_RATE_LIMIT_PER_MINUTE,
            },
            cors_origins: std::env::var("CORS_ORIGINS")
                .unwrap_or_default()
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        })
    }
}

fn parse_rate_limit(raw: &str) -> Result<u32> {
    match raw.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(AppError::Config(
            "RATE_LIMIT_PER_MINUTE must be a positive integer".to_string(),
        )),
    }
}
