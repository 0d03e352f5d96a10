use std::time::Duration;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);
pub const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 60;

/// How often and how long to wait for a submitted job to finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollingPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
    /// Abort early after this many failed status fetches in a row.
    /// `None` keeps polling through failures until the attempt budget runs out.
    pub max_consecutive_failures: Option<u32>,
}

impl PollingPolicy {
    pub fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts,
            max_consecutive_failures: None,
        }
    }

    pub fn with_max_consecutive_failures(mut self, limit: Option<u32>) -> Self {
        self.max_consecutive_failures = limit.filter(|n| *n > 0);
        self
    }

    /// Upper bound on time spent sleeping between attempts.
    pub fn worst_case_wait(&self) -> Duration {
        self.interval * self.max_attempts.saturating_sub(1)
    }
}

impl Default for PollingPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL, DEFAULT_MAX_POLL_ATTEMPTS)
    }
}
