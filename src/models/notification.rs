use std::time::{Duration, Instant};

use crate::config::NOTIFICATION_TTL;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
        }
    }
}

/// Transient banner shown above the users table.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
    pub issued_at: Instant,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Error)
    }

    fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
            issued_at: Instant::now(),
        }
    }

    /// Time left before the banner dismisses itself.
    pub fn remaining(&self, now: Instant) -> Duration {
        NOTIFICATION_TTL.saturating_sub(now.saturating_duration_since(self.issued_at))
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.remaining(now).is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_expires_after_ttl() {
        let n = Notification::success("User deleted");
        let start = n.issued_at;
        assert!(!n.is_expired(start));
        assert_eq!(n.remaining(start), NOTIFICATION_TTL);
        assert!(!n.is_expired(start + Duration::from_millis(2999)));
        assert!(n.is_expired(start + NOTIFICATION_TTL));
    }
}
