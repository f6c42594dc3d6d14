//! In-memory TTL cache keyed by string.

use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use tracing::{debug, trace};

use memo_core::error::{CreateError, MemoError, Result};
use memo_core::traits::{Clock, SystemClock};
use memo_core::CacheConfig;

use crate::cleanup;

/// Stored value with its creation stamp.
struct Entry<V> {
    value: V,
    created: Instant,
}

impl<V> Entry<V> {
    fn new(value: V, created: Instant) -> Self {
        Self { value, created }
    }
}

/// State shared between cache handles and in-flight cleanup jobs.
struct Inner<V, C> {
    entries: RwLock<HashMap<String, Entry<V>>>,
    ttl: Duration,
    clock: C,
}

impl<V, C: Clock> Inner<V, C> {
    /// Strict: an entry aged exactly `ttl` is still live.
    #[inline]
    fn is_expired(&self, entry: &Entry<V>, now: Instant) -> bool {
        now.saturating_duration_since(entry.created) > self.ttl
    }

    /// Deletes those of `keys` that are still expired under the write lock.
    ///
    /// A key refreshed by `create`/`update` since it was seen expired is left alone.
    fn remove_expired(&self, keys: &[String]) -> usize {
        let mut entries = self.entries.write();
        let now = self.clock.now();
        let mut removed = 0;

        for key in keys {
            if entries.get(key).is_some_and(|e| self.is_expired(e, now)) {
                entries.remove(key);
                removed += 1;
            } else {
                debug!(key = %key, "Entry refreshed or gone, skipping removal");
            }
        }

        removed
    }
}

/// Cleanup job body. Does nothing once the cache has been dropped.
fn sweep<V, C: Clock>(inner: &Weak<Inner<V, C>>, keys: &[String]) -> Option<usize> {
    let inner = inner.upgrade()?;
    let removed = inner.remove_expired(keys);
    debug!(removed, scheduled = keys.len(), "Lazy expiry cleanup finished");
    Some(removed)
}

/// Thread-safe key-value store with a single TTL applied to every entry.
///
/// Expiry is lazy: nothing sweeps the map in the background. An expired entry
/// is reported as missing the moment it is touched, and `get`/`list_keys`
/// schedule its removal on a detached job that re-checks expiry before deleting.
///
/// Cloning a `TtlCache` gives another handle to the same store.
///
/// # Example
///
/// ```rust
/// use memo_cache::TtlCache;
/// use std::time::Duration;
///
/// let cache = TtlCache::new(Duration::from_secs(30));
/// cache.create("user:1", "alice".to_string()).unwrap();
/// assert_eq!(cache.get("user:1").unwrap(), "alice");
///
/// let err = cache.create("user:1", "bob".to_string()).unwrap_err();
/// assert_eq!(err.existing, "alice");
/// ```
pub struct TtlCache<V, C = SystemClock> {
    inner: Arc<Inner<V, C>>,
}

impl<V, C> Clone for TtlCache<V, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> TtlCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Creates an empty cache whose entries live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, SystemClock)
    }

    /// Creates an empty cache from a configuration.
    pub fn with_config(config: &CacheConfig) -> Self {
        Self::new(config.ttl())
    }
}

impl<V, C> TtlCache<V, C>
where
    V: Clone + Send + Sync + 'static,
    C: Clock,
{
    /// Creates an empty cache that reads time from `clock`.
    pub fn with_clock(ttl: Duration, clock: C) -> Self {
        Self {
            inner: Arc::new(Inner {
                entries: RwLock::new(HashMap::new()),
                ttl,
                clock,
            }),
        }
    }

    /// Returns the TTL applied to every entry.
    pub fn ttl(&self) -> Duration {
        self.inner.ttl
    }

    /// Stores `value` under `key` unless a live entry already holds it.
    ///
    /// An expired entry under the same key is overwritten. On conflict the
    /// stored value is left untouched and returned inside the error.
    pub fn create(
        &self,
        key: impl Into<String>,
        value: V,
    ) -> std::result::Result<V, CreateError<V>> {
        let key = key.into();
        let mut entries = self.inner.entries.write();
        let now = self.inner.clock.now();

        if let Some(entry) = entries.get(&key) {
            if !self.inner.is_expired(entry, now) {
                trace!(key = %key, "Create rejected, key is live");
                return Err(CreateError::already_exists(key, entry.value.clone()));
            }
        }

        entries.insert(key, Entry::new(value.clone(), now));
        Ok(value)
    }

    /// Returns a copy of the value stored under `key`.
    ///
    /// Returns `KeyNotFound` if the key is absent or expired. An expired entry
    /// is removed in the background after the read lock is released.
    pub fn get(&self, key: &str) -> Result<V> {
        let expired = {
            let entries = self.inner.entries.read();
            let now = self.inner.clock.now();
            match entries.get(key) {
                Some(entry) if !self.inner.is_expired(entry, now) => {
                    trace!(key, "Cache hit");
                    return Ok(entry.value.clone());
                }
                Some(_) => true,
                None => false,
            }
        };

        if expired {
            debug!(key, "Expired entry found, scheduling removal");
            self.schedule_removal(vec![key.to_owned()]);
        } else {
            trace!(key, "Cache miss");
        }

        Err(MemoError::KeyNotFound(key.to_owned()))
    }

    /// Replaces the value under `key` and restarts its TTL.
    ///
    /// Only existence is checked, so an expired entry that has not been
    /// cleaned up yet is revived.
    pub fn update(&self, key: impl Into<String>, value: V) -> Result<V> {
        let key = key.into();
        let mut entries = self.inner.entries.write();
        let now = self.inner.clock.now();

        match entries.get_mut(&key) {
            Some(entry) => {
                *entry = Entry::new(value.clone(), now);
                Ok(value)
            }
            None => Err(MemoError::KeyNotFound(key)),
        }
    }

    /// Removes `key`.
    ///
    /// An expired entry is deleted too, but the call still reports
    /// `KeyNotFound`, exactly as for a key that was never there.
    pub fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.inner.entries.write();
        let now = self.inner.clock.now();

        match entries.remove(key) {
            Some(entry) if !self.inner.is_expired(&entry, now) => Ok(()),
            Some(_) => {
                debug!(key, "Removed expired entry");
                Err(MemoError::KeyNotFound(key.to_owned()))
            }
            None => Err(MemoError::KeyNotFound(key.to_owned())),
        }
    }

    /// Returns the live keys, in no particular order.
    ///
    /// Expired keys met along the way are scheduled for removal.
    pub fn list_keys(&self) -> Vec<String> {
        let mut live = Vec::new();
        let mut expired = Vec::new();

        {
            let entries = self.inner.entries.read();
            let now = self.inner.clock.now();
            for (key, entry) in entries.iter() {
                if self.inner.is_expired(entry, now) {
                    expired.push(key.clone());
                } else {
                    live.push(key.clone());
                }
            }
        }

        if !expired.is_empty() {
            debug!(count = expired.len(), "Expired keys found, scheduling removal");
            self.schedule_removal(expired);
        }

        live
    }

    /// Removes every expired entry now and returns how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let mut entries = self.inner.entries.write();
        let now = self.inner.clock.now();
        let before = entries.len();
        entries.retain(|_, e| !self.inner.is_expired(e, now));
        let removed = before - entries.len();
        debug!(removed, "Purged expired entries");
        removed
    }

    /// Clears all entries.
    pub fn clear(&self) {
        self.inner.entries.write().clear();
    }

    /// Returns the number of stored entries, including expired ones not yet removed.
    pub fn len(&self) -> usize {
        self.inner.entries.read().len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.inner.entries.read().is_empty()
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> CacheStats {
        let entries = self.inner.entries.read();
        let now = self.inner.clock.now();
        let expired = entries
            .values()
            .filter(|e| self.inner.is_expired(e, now))
            .count();
        CacheStats {
            total_entries: entries.len(),
            live_entries: entries.len() - expired,
            expired_entries: expired,
        }
    }

    fn schedule_removal(&self, keys: Vec<String>) {
        let inner = Arc::downgrade(&self.inner);
        cleanup::dispatch(move || {
            sweep(&inner, &keys);
        });
    }
}

/// Cache statistics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheStats {
    pub total_entries: usize,
    pub live_entries: usize,
    /// Expired but not yet removed
    pub expired_entries: usize,
}
