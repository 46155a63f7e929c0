//! # Insight Throttle
//!
//! The AI insight endpoint is expensive, so it is called at most once per
//! throttle window unless the query scope itself changed (a forced refresh).
//! The timestamp of the last successful call is persisted through a
//! [`KeyValueStore`] so the window survives page reloads.

use crate::errors::StorageError;
use log::{debug, warn};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Minimal string key-value persistence
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Process-local store, used by tests and when no durable storage exists
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Whether the insight endpoint may be called now
pub fn should_fetch_insight(
    last_fetch: Option<i64>,
    force: bool,
    now: i64,
    window_ms: i64,
) -> bool {
    match last_fetch {
        _ if force => true,
        None => true,
        Some(last) => now.saturating_sub(last) >= window_ms,
    }
}

/// Throttle gate bound to its persisted timestamp
pub struct InsightThrottle {
    store: Rc<dyn KeyValueStore>,
    key: String,
    window_ms: i64,
}

impl InsightThrottle {
    pub fn new(store: Rc<dyn KeyValueStore>, key: impl Into<String>, window_ms: i64) -> Self {
        Self {
            store,
            key: key.into(),
            window_ms,
        }
    }

    /// Last successful fetch as stored; an unreadable value counts as never fetched
    pub fn last_fetch(&self) -> Option<i64> {
        let raw = self.store.get(&self.key)?;
        match raw.trim().parse::<i64>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("⚠️ Ignoring unreadable throttle timestamp {:?}", raw);
                None
            }
        }
    }

    /// A timestamp later than `now` came from a skewed clock and counts as absent
    pub fn allows(&self, force: bool, now: i64) -> bool {
        let last = self.last_fetch().filter(|&last| {
            let plausible = last <= now;
            if !plausible {
                warn!("⚠️ Ignoring throttle timestamp {} ahead of now {}", last, now);
            }
            plausible
        });
        let allowed = should_fetch_insight(last, force, now, self.window_ms);
        debug!(
            "⏱️ insight gate: last={:?} force={} now={} -> {}",
            last, force, now, allowed
        );
        allowed
    }

    /// Record a successful fetch completed at `completed_at`
    pub fn record_success(&self, completed_at: i64) {
        if let Err(e) = self.store.set(&self.key, &completed_at.to_string()) {
            warn!("⚠️ Failed to persist insight throttle timestamp: {}", e);
        }
    }
}
