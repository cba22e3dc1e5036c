// src/cache.rs
//! In-process response cache with per-entry TTL.
//!
//! Callers hold the cache through the [`ResponseCache`] trait so tests can swap
//! it and drive expiry with paused tokio time.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use tokio::time::Instant;

#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<V> {
    pub value: V,
    pub stored_at: Instant,
    pub expires_at: Instant,
}

impl<V> CacheEntry<V> {
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.stored_at)
    }
}

pub trait ResponseCache<V>: Send + Sync {
    /// Live entry for `key`; expired entries are treated as absent.
    fn get(&self, key: &str) -> Option<CacheEntry<V>>;
    fn put(&self, key: &str, value: V, ttl: Duration);
    fn invalidate(&self, key: &str);
}

/// Mutex-guarded map. Expired entries are dropped lazily on lookup.
#[derive(Debug)]
pub struct MemoryCache<V> {
    inner: Mutex<HashMap<String, CacheEntry<V>>>,
}

impl<V> Default for MemoryCache<V> {
    fn default() -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
        }
    }
}

impl<V> MemoryCache<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, CacheEntry<V>>> {
        // A panic while holding the lock cannot leave a half-written entry.
        match self.inner.lock() {
            Ok(g) => g,
            Err(poison) => poison.into_inner(),
        }
    }
}

impl<V: Clone + Send + Sync> ResponseCache<V> for MemoryCache<V> {
    fn get(&self, key: &str) -> Option<CacheEntry<V>> {
        let now = Instant::now();
        let mut map = self.lock();
        match map.get(key) {
            Some(e) if !e.is_expired(now) => Some(e.clone()),
            Some(_) => {
                map.remove(key);
                None
            }
            None => None,
        }
    }

    fn put(&self, key: &str, value: V, ttl: Duration) {
        let now = Instant::now();
        let entry = CacheEntry {
            value,
            stored_at: now,
            expires_at: expiry(now, ttl),
        };
        self.lock().insert(key.to_string(), entry);
    }

    fn invalidate(&self, key: &str) {
        self.lock().remove(key);
    }
}

/// Roughly 30 years ahead; stands in for TTLs that overflow `Instant`.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

fn expiry(now: Instant, ttl: Duration) -> Instant {
    now.checked_add(ttl)
        .or_else(|| now.checked_add(FAR_FUTURE))
        .unwrap_or(now)
}
