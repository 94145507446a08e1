//! Per-client rate limiting for form submissions

use crate::config::RateLimitConfig;
use crate::models::ContactResponse;
use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::{Duration, Instant};

pub const MSG_TOO_MANY: &str = "Too many messages sent. Please try again later.";

#[derive(Clone)]
pub struct RateLimiter {
    requests: Arc<Mutex<HashMap<IpAddr, Vec<Instant>>>>,
    max_requests: usize,
    window: Duration,
    enabled: bool,
    trust_forwarded_for: bool,
}

impl RateLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            requests: Arc::new(Mutex::new(HashMap::new())),
            max_requests: config.max_requests,
            window: Duration::from_secs(config.window_seconds),
            enabled: config.enable,
            trust_forwarded_for: config.trust_forwarded_for,
        }
    }

    pub fn check(&self, ip: IpAddr) -> Result<(), RateLimitError> {
        if !self.enabled {
            return Ok(());
        }

        let now = Instant::now();
        let mut requests = self.requests.lock();

        let entries = requests.entry(ip).or_default();
        entries.retain(|&instant| now.duration_since(instant) < self.window);

        if entries.len() >= self.max_requests {
            let oldest = entries.first().copied().unwrap_or(now);
            let reset_in = self.window.saturating_sub(now.duration_since(oldest));

            return Err(RateLimitError {
                retry_after_seconds: reset_in.as_secs().max(1),
                limit: self.max_requests,
            });
        }

        entries.push(now);
        Ok(())
    }

    /// Drops clients whose whole window has expired.
    pub fn prune(&self) {
        let now = Instant::now();
        self.requests.lock().retain(|_, entries| {
            entries.retain(|&instant| now.duration_since(instant) < self.window);
            !entries.is_empty()
        });
    }

    pub fn tracked_clients(&self) -> usize {
        self.requests.lock().len()
    }
}

#[derive(Debug)]
pub struct RateLimitError {
    pub retry_after_seconds: u64,
    pub limit: usize,
}

impl IntoResponse for RateLimitError {
    fn into_response(self) -> Response {
        let body = Json(ContactResponse {
            success: false,
            message: MSG_TOO_MANY.to_string(),
            errors: None,
        });

        let mut response = (StatusCode::TOO_MANY_REQUESTS, body).into_response();

        let headers = response.headers_mut();
        headers.insert("X-RateLimit-Limit", HeaderValue::from(self.limit));
        headers.insert("Retry-After", HeaderValue::from(self.retry_after_seconds));

        response
    }
}

/// The peer address. Behind a trusted proxy, the rightmost `X-Forwarded-For`
/// entry instead, since that one was appended by the proxy itself.
fn client_ip(
    headers: &HeaderMap,
    peer: Option<SocketAddr>,
    trust_forwarded_for: bool,
) -> Option<IpAddr> {
    let forwarded = || {
        headers
            .get("x-forwarded-for")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.rsplit(',').next())
            .and_then(|last| last.trim().parse().ok())
    };

    if trust_forwarded_for {
        forwarded().or_else(|| peer.map(|addr| addr.ip()))
    } else {
        peer.map(|addr| addr.ip())
    }
}

pub async fn rate_limit_middleware(
    State(limiter): State<RateLimiter>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request,
    next: Next,
) -> Result<Response, RateLimitError> {
    let peer = connect_info.map(|ConnectInfo(addr)| addr);

    match client_ip(request.headers(), peer, limiter.trust_forwarded_for) {
        Some(ip) => {
            if let Err(err) = limiter.check(ip) {
                tracing::warn!(%ip, retry_after = err.retry_after_seconds, "contact submissions rate limited");
                return Err(err);
            }
        }
        None => tracing::debug!("no client address available, skipping rate limit"),
    }

    Ok(next.run(request).await)
}
