//! # Secret Cache
//!
//! In-process memo of decoded secret values keyed by secret name.
//!
//! - Entries are written on every successful fetch and overwritten in place
//! - Freshness is checked lazily on read: an entry is fresh while
//!   `now - fetched_at < ttl`
//! - Nothing is evicted in the background; stale entries stay until they are
//!   overwritten or invalidated
//! - Size is unbounded

mod clock;

pub use clock::{Clock, ManualClock, SystemClock};

use crate::secrets::SecretValue;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// One memoized secret value
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Decoded secret value
    pub value: SecretValue,
    /// When the value was retrieved
    pub fetched_at: Instant,
}

impl CacheEntry {
    /// Whether the entry is still fresh at `now`
    pub fn is_fresh(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.fetched_at) < ttl
    }
}

/// TTL cache of secret values
#[derive(Debug)]
pub struct SecretCache {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    entries: DashMap<String, CacheEntry>,
}

impl SecretCache {
    /// Create an empty cache using the system clock
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    /// Create an empty cache with an explicit clock
    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl,
            clock,
            entries: DashMap::new(),
        }
    }

    /// Configured time-to-live
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Value for `name` if present and fresh
    pub fn get_fresh(&self, name: &str) -> Option<SecretValue> {
        let now = self.clock.now();
        self.entries
            .get(name)
            .filter(|entry| entry.is_fresh(now, self.ttl))
            .map(|entry| entry.value.clone())
    }

    /// Store `value` for `name`, stamped with the current time
    pub fn insert(&self, name: &str, value: SecretValue) {
        let entry = CacheEntry {
            value,
            fetched_at: self.clock.now(),
        };
        self.entries.insert(name.to_string(), entry);
    }

    /// Entry for `name` regardless of freshness
    #[cfg(test)]
    pub(crate) fn entry(&self, name: &str) -> Option<CacheEntry> {
        self.entries.get(name).map(|e| e.value().clone())
    }

    /// Remove the entry for `name`; absent names are ignored
    pub fn remove(&self, name: &str) {
        self.entries.remove(name);
    }

    /// Remove every entry
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Number of entries held, fresh or stale
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
