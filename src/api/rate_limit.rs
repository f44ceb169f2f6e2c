use std::time::{Duration, Instant};

use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use dashmap::DashMap;
use tracing::warn;

use crate::api::routes::ApiState;
use crate::error::AppError;

pub const HEADER_LIMIT: &str = "x-ratelimit-limit";
pub const HEADER_REMAINING: &str = "x-ratelimit-remaining";

// ---------------------------------------------------------------------------
// RateLimiter: fixed window per client key
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

#[derive(Debug)]
pub struct RateLimiter {
    limit: u32,
    window: Duration,
    clients: DashMap<String, Window>,
}

impl RateLimiter {
    pub fn new(limit: u32, window: Duration) -> Self {
        Self { limit, window, clients: DashMap::new() }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Count one request. Returns the requests left in the window, or `None` when over the limit.
    pub fn check(&self, client: &str, now: Instant) -> Option<u32> {
        let mut entry = self
            .clients
            .entry(client.to_string())
            .or_insert(Window { started: now, count: 0 });
        if now.duration_since(entry.started) >= self.window {
            *entry = Window { started: now, count: 0 };
        }
        if entry.count >= self.limit {
            return None;
        }
        entry.count += 1;
        Some(self.limit - entry.count)
    }

    /// Drop windows that have expired. Called periodically from `main`.
    pub fn prune(&self, now: Instant) {
        self.clients
            .retain(|_, w| now.duration_since(w.started) < self.window);
    }

    pub fn tracked_clients(&self) -> usize {
        self.clients.len()
    }
}

/// Client key: `x-real-ip`, else the first `x-forwarded-for` hop, else `unknown`.
pub fn client_key(headers: &HeaderMap) -> String {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };
    header("x-real-ip")
        .or_else(|| {
            header("x-forwarded-for")
                .and_then(|v| v.split(',').next())
                .map(str::trim)
                .filter(|v| !v.is_empty())
        })
        .unwrap_or("unknown")
        .to_string()
}

fn set_headers(resp: &mut Response, limit: u32, remaining: u32) {
    let headers = resp.headers_mut();
    headers.insert(HeaderName::from_static(HEADER_LIMIT), HeaderValue::from(limit));
    headers.insert(HeaderName::from_static(HEADER_REMAINING), HeaderValue::from(remaining));
}

pub async fn rate_limit(State(state): State<ApiState>, req: Request, next: Next) -> Response {
    let client = client_key(req.headers());
    let limit = state.limiter.limit();

    match state.limiter.check(&client, Instant::now()) {
        Some(remaining) => {
            let mut resp = next.run(req).await;
            set_headers(&mut resp, limit, remaining);
            resp
        }
        None => {
            warn!(event = "RATE_LIMITED", client = %client, limit, "Rate limit exceeded");
            let mut resp = AppError::RateLimited.into_response();
            set_headers(&mut resp, limit, 0);
            resp
        }
    }
}
