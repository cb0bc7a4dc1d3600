//! Stale-response guard for in-flight guidance requests.
//!
//! Requests have no cancellation: refreshing guidance while a call is in
//! flight leaves both running, and they can complete in either order. Each
//! request takes a generation token; only the response carrying the latest
//! token is applied, so a slow early request can never overwrite a newer one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Token-gated holder for the currently displayed guidance text.
#[derive(Default)]
pub struct GuidanceSession {
    latest: AtomicU64,
    display: Mutex<Option<String>>,
}

impl GuidanceSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request; the returned token supersedes all earlier ones.
    pub fn begin_request(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Apply a response if its token is still the latest. Returns false and
    /// discards the text when a newer request has been issued since.
    pub fn apply_response(&self, token: u64, text: String) -> bool {
        if token != self.latest.load(Ordering::SeqCst) {
            log::debug!("Discarding stale guidance response (token {})", token);
            return false;
        }
        if let Ok(mut guard) = self.display.lock() {
            *guard = Some(text);
        }
        true
    }

    /// Currently displayed guidance, if any response has landed.
    pub fn current(&self) -> Option<String> {
        self.display.lock().ok().and_then(|guard| guard.clone())
    }

    /// Drop displayed text and invalidate all in-flight requests (logout).
    pub fn reset(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut guard) = self.display.lock() {
            *guard = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_request_applies() {
        let session = GuidanceSession::new();
        let token = session.begin_request();
        assert!(session.apply_response(token, "first".into()));
        assert_eq!(session.current().as_deref(), Some("first"));
    }

    #[test]
    fn test_stale_response_discarded() {
        let session = GuidanceSession::new();
        let first = session.begin_request();
        let second = session.begin_request();

        // the newer request resolves first
        assert!(session.apply_response(second, "new".into()));
        // the older one limps in afterwards and must lose
        assert!(!session.apply_response(first, "old".into()));
        assert_eq!(session.current().as_deref(), Some("new"));
    }

    #[test]
    fn test_out_of_order_without_newer_response_still_discards() {
        let session = GuidanceSession::new();
        let first = session.begin_request();
        let _second = session.begin_request();

        // even though nothing has been displayed yet, the superseded
        // request must not land
        assert!(!session.apply_response(first, "old".into()));
        assert_eq!(session.current(), None);
    }

    #[test]
    fn test_reset_invalidates_in_flight() {
        let session = GuidanceSession::new();
        let token = session.begin_request();
        session.reset();
        assert!(!session.apply_response(token, "late".into()));
        assert_eq!(session.current(), None);
    }
}
