mod ip_rate_limiter;

pub use ip_rate_limiter::{IpRateLimiter, client_ip, rate_limit_middleware};
