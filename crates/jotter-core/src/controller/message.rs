//! Transient error banner with a deadline.

use std::time::{Duration, Instant};

/// How long an error stays visible unless dismissed.
pub const ERROR_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpiringMessage {
    text: String,
    deadline: Instant,
}

impl ExpiringMessage {
    pub fn new(text: impl Into<String>, raised_at: Instant, ttl: Duration) -> Self {
        Self {
            text: text.into(),
            deadline: raised_at + ttl,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn deadline(&self) -> Instant {
        self.deadline
    }

    #[must_use]
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.deadline
    }

    /// Time left before expiry, zero once expired.
    #[must_use]
    pub fn remaining_at(&self, now: Instant) -> Duration {
        self.deadline.saturating_duration_since(now)
    }
}
