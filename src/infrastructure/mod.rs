pub mod observability;
pub mod rate_limit;
pub mod vendor;
