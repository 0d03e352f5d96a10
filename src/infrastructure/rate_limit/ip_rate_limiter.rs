use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use axum::Json;
use axum::extract::{ConnectInfo, Request, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use governor::clock::{Clock, DefaultClock};
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use serde_json::json;

const FORWARDED_FOR_HEADER: &str = "x-forwarded-for";

/// Fixed request budget per client IP over a rolling window.
pub struct IpRateLimiter {
    limiter: DefaultKeyedRateLimiter<IpAddr>,
    clock: DefaultClock,
    max_requests: NonZeroU32,
    window: Duration,
}

impl IpRateLimiter {
    pub fn new(max_requests: NonZeroU32, window: Duration) -> Self {
        let period = window / max_requests.get();
        let quota = Quota::with_period(period)
            .unwrap_or_else(|| Quota::per_second(max_requests))
            .allow_burst(max_requests);

        Self {
            limiter: RateLimiter::keyed(quota),
            clock: DefaultClock::default(),
            max_requests,
            window,
        }
    }

    /// Returns how long the caller must wait when `ip` is over budget.
    pub fn check(&self, ip: IpAddr) -> Result<(), Duration> {
        self.limiter
            .check_key(&ip)
            .map_err(|not_until| not_until.wait_time_from(self.clock.now()))
    }

    /// Drops per-IP state that has fully replenished.
    pub fn purge_stale(&self) {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
    }

    pub fn tracked_clients(&self) -> usize {
        self.limiter.len()
    }

    pub fn max_requests(&self) -> u32 {
        self.max_requests.get()
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}

pub async fn rate_limit_middleware(
    State(limiter): State<Arc<IpRateLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    let ip = client_ip(&request);

    match limiter.check(ip) {
        Ok(()) => next.run(request).await,
        Err(wait) => {
            tracing::warn!(client_ip = %ip, retry_after_secs = wait.as_secs(), "Rate limit exceeded");
            let mut response = (
                StatusCode::TOO_MANY_REQUESTS,
                Json(json!({
                    "error": "Too many requests from this IP, please try again later.",
                    "code": "TOO_MANY_REQUESTS",
                })),
            )
                .into_response();
            let retry_after = wait.as_secs().max(1).to_string();
            if let Ok(value) = HeaderValue::from_str(&retry_after) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
            response
        }
    }
}

/// Client address as seen through at most one reverse proxy.
///
/// Only the rightmost `X-Forwarded-For` entry is trusted: it is the one the
/// proxy appended. Earlier entries are caller-controlled.
pub fn client_ip(request: &Request) -> IpAddr {
    let forwarded = request
        .headers()
        .get(FORWARDED_FOR_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.rsplit(',').next())
        .and_then(|v| v.trim().parse::<IpAddr>().ok());

    forwarded
        .or_else(|| {
            request
                .extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|ConnectInfo(addr)| addr.ip())
        })
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}
