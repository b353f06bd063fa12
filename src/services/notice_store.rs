use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use crate::models::Notification;

/// The notification waiting to be shown on the next page render, keyed by
/// the session token that triggered it. Carries the banner across the
/// post/redirect/get hop.
///
/// The page shows a single banner, so a newer notice replaces an older one.
/// Notices past their display time are pruned on every push, which bounds
/// the map even when a client never follows the redirect.
#[derive(Clone, Debug, Default)]
pub struct NoticeStore {
    inner: Arc<Mutex<HashMap<String, Notification>>>,
}

impl NoticeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, session: &str, notice: Notification) {
        let now = Instant::now();
        let mut inner = self.inner.lock().unwrap_or_else(|p| p.into_inner());
        inner.retain(|_, n| !n.is_expired(now));
        inner.insert(session.to_string(), notice);
    }

    /// Remove and return the notice queued for `session`.
    pub fn take(&self, session: &str) -> Option<Notification> {
        let mut inner = self.inner.lock().unwrap_or_else(|p| p.into_inner());
        inner.remove(session)
    }

    /// Drop a queued notice without showing it (logout).
    pub fn discard(&self, session: &str) {
        self.take(session);
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(|p| p.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NOTIFICATION_TTL;
    use std::time::Duration;

    #[test]
    fn test_newest_notice_wins() {
        let store = NoticeStore::new();
        store.push("a", Notification::success("User deleted"));
        store.push("a", Notification::error("Delete failed"));
        store.push("b", Notification::success("User updated successfully"));

        assert_eq!(store.take("a").map(|n| n.message), Some("Delete failed".to_string()));
        assert!(store.take("a").is_none());
        assert!(store.take("b").is_some());
    }

    #[test]
    fn test_push_prunes_expired_notices() {
        let store = NoticeStore::new();
        let mut stale = Notification::success("User deleted");
        if let Some(earlier) = Instant::now().checked_sub(NOTIFICATION_TTL + Duration::from_secs(1)) {
            stale.issued_at = earlier;
        }
        let expired = stale.is_expired(Instant::now());
        store.push("abandoned", stale);
        store.push("active", Notification::success("User updated successfully"));

        if expired {
            assert_eq!(store.len(), 1);
            assert!(store.take("abandoned").is_none());
        }
        assert!(store.take("active").is_some());
    }

    #[test]
    fn test_discard() {
        let store = NoticeStore::new();
        store.push("a", Notification::success("x"));
        store.discard("a");
        assert!(store.is_empty());
    }
}
