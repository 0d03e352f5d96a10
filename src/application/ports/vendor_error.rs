#[derive(Debug, thiserror::Error)]
pub enum VendorError {
    #[error("vendor rejected credentials")]
    Unauthorized,
    #[error("vendor rate limit exceeded")]
    RateLimited,
    #[error("not found: {0}")]
    NotFound(String),
    #[error("status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("request failed: {0}")]
    Request(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
