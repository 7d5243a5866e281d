//! Emulator state: the single reservation hold and its bookkeeping.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use scandesk_core::Credentials;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use uuid::Uuid;

/// Configuration of the emulated device.
#[derive(Debug, Clone)]
pub struct EmulatorConfig {
    /// Credentials the Basic-auth gate accepts.
    pub credentials: Credentials,

    /// Artificial response delay per resource segment (the final path
    /// segment for checks, the band name for images). Used by tests to
    /// force out-of-order fetch completion.
    pub resource_delays: HashMap<String, Duration>,

    /// Whether `/document-state` reports a document on the glass.
    pub document_present: bool,
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        Self {
            credentials: Credentials::new("operator", "secret"),
            resource_delays: HashMap::new(),
            document_present: true,
        }
    }
}

/// The single reservation hold the device supports.
#[derive(Debug, Clone)]
struct Hold {
    id: String,
    ttl_secs: u64,
    expires_at: DateTime<Utc>,
}

impl Hold {
    fn expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

/// Shared state behind the emulator routes.
pub struct EmulatorState {
    config: EmulatorConfig,
    hold: Mutex<Option<Hold>>,
    scan_seq: AtomicU64,
    releases: AtomicU64,
}

/// Outcome of a reservation-scoped access check.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum HoldCheck {
    Valid,
    /// No hold, a different id, or an expired hold.
    Rejected,
}

impl EmulatorState {
    pub(crate) fn new(config: EmulatorConfig) -> Self {
        Self {
            config,
            hold: Mutex::new(None),
            scan_seq: AtomicU64::new(1),
            releases: AtomicU64::new(0),
        }
    }

    pub(crate) fn config(&self) -> &EmulatorConfig {
        &self.config
    }

    /// Try to create a hold. `None` when one is already active.
    pub(crate) fn try_reserve(&self, ttl_secs: u64) -> Option<String> {
        let mut hold = self.hold.lock().unwrap();

        if let Some(existing) = hold.as_ref()
            && !existing.expired()
        {
            return None;
        }

        let id = Uuid::new_v4().simple().to_string();
        *hold = Some(Hold {
            id: id.clone(),
            ttl_secs,
            expires_at: Utc::now() + ChronoDuration::seconds(ttl_secs as i64),
        });
        Some(id)
    }

    /// Validate a reservation-scoped call.
    pub(crate) fn check(&self, reservation_id: Option<&str>) -> HoldCheck {
        let hold = self.hold.lock().unwrap();
        match (hold.as_ref(), reservation_id) {
            (Some(hold), Some(id)) if hold.id == id && !hold.expired() => HoldCheck::Valid,
            _ => HoldCheck::Rejected,
        }
    }

    /// Release the hold if the id matches. Returns whether anything was
    /// released.
    pub(crate) fn release(&self, reservation_id: Option<&str>) -> bool {
        let mut hold = self.hold.lock().unwrap();
        match (hold.as_ref(), reservation_id) {
            (Some(existing), Some(id)) if existing.id == id => {
                *hold = None;
                self.releases.fetch_add(1, Ordering::Relaxed);
                true
            }
            _ => false,
        }
    }

    /// Restart the hold's timeout if the id matches.
    pub(crate) fn extend(&self, reservation_id: Option<&str>) -> bool {
        let mut hold = self.hold.lock().unwrap();
        match (hold.as_mut(), reservation_id) {
            (Some(existing), Some(id)) if existing.id == id && !existing.expired() => {
                existing.expires_at =
                    Utc::now() + ChronoDuration::seconds(existing.ttl_secs as i64);
                true
            }
            _ => false,
        }
    }

    /// Next scan identifier.
    pub(crate) fn next_scan_id(&self) -> u64 {
        self.scan_seq.fetch_add(1, Ordering::Relaxed)
    }

    /// Delay configured for a resource segment, if any.
    pub(crate) fn delay_for(&self, segment: &str) -> Option<Duration> {
        self.config.resource_delays.get(segment).copied()
    }

    pub(crate) fn active_reservation(&self) -> Option<String> {
        self.hold
            .lock()
            .unwrap()
            .as_ref()
            .filter(|h| !h.expired())
            .map(|h| h.id.clone())
    }

    pub(crate) fn release_count(&self) -> u64 {
        self.releases.load(Ordering::Relaxed)
    }

    /// Force the current hold past its deadline.
    pub(crate) fn expire_reservation(&self) {
        let mut hold = self.hold.lock().unwrap();
        if let Some(existing) = hold.as_mut() {
            existing.expires_at = Utc::now() - ChronoDuration::seconds(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_hold_device() {
        let state = EmulatorState::new(EmulatorConfig::default());

        let first = state.try_reserve(60).unwrap();
        assert!(state.try_reserve(60).is_none());

        assert_eq!(state.check(Some(&first)), HoldCheck::Valid);
        assert_eq!(state.check(Some("other")), HoldCheck::Rejected);
        assert_eq!(state.check(None), HoldCheck::Rejected);
    }

    #[test]
    fn test_release_frees_the_hold() {
        let state = EmulatorState::new(EmulatorConfig::default());

        let id = state.try_reserve(60).unwrap();
        assert!(!state.release(Some("wrong")));
        assert!(state.release(Some(&id)));
        assert_eq!(state.release_count(), 1);

        // A new reservation is possible again.
        assert!(state.try_reserve(60).is_some());
    }

    #[test]
    fn test_expired_hold_rejects_and_allows_rereserve() {
        let state = EmulatorState::new(EmulatorConfig::default());

        let id = state.try_reserve(60).unwrap();
        state.expire_reservation();

        assert_eq!(state.check(Some(&id)), HoldCheck::Rejected);
        assert!(state.active_reservation().is_none());
        assert!(state.try_reserve(60).is_some());
    }

    #[test]
    fn test_extend_restarts_the_deadline() {
        let state = EmulatorState::new(EmulatorConfig::default());

        let id = state.try_reserve(60).unwrap();
        assert!(state.extend(Some(&id)));
        assert!(!state.extend(Some("wrong")));
        assert_eq!(state.check(Some(&id)), HoldCheck::Valid);
    }

    #[test]
    fn test_scan_ids_increment() {
        let state = EmulatorState::new(EmulatorConfig::default());
        let a = state.next_scan_id();
        let b = state.next_scan_id();
        assert!(b > a);
    }
}
