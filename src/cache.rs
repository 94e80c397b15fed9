//! Time-to-live cache for avatar images keyed by account name.
//!
//! Entries are never checked for age on read; a periodic sweep removes everything older than
//! the TTL. Serving an entry slightly past its TTL only means a stale picture.
//!
//! ### Thread safety
//! All state lives behind one [`Mutex`], so `get`, `set` and the sweep are serialized and a
//! sweep never iterates while another thread inserts. Share the cache as `Arc<AvatarCache>`
//! (or a plain reference); there is no global instance.

use log::{debug, info};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Lifetimes for cached entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Entries older than this are removed by the next sweep.
    pub ttl: Duration,
    /// Minimum time between two opportunistic sweeps.
    pub sweep_interval: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(2 * 60 * 60),
            sweep_interval: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    payload: V,
    inserted_at: Instant,
}

#[derive(Debug)]
struct CacheState<V> {
    entries: HashMap<String, CacheEntry<V>>,
    last_sweep: Instant,
}

/// Process-wide avatar cache. The payload is opaque; by default it is the `data:` URI string.
#[derive(Debug)]
pub struct AvatarCache<V = String> {
    config: CacheConfig,
    state: Mutex<CacheState<V>>,
}

impl<V: Clone> Default for AvatarCache<V> {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

impl<V: Clone> AvatarCache<V> {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            state: Mutex::new(CacheState {
                entries: HashMap::new(),
                last_sweep: Instant::now(),
            }),
        }
    }

    pub fn config(&self) -> CacheConfig {
        self.config
    }

    // A panic while holding the lock cannot leave the map half-updated, so poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, CacheState<V>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cached payload for `key`, regardless of age.
    pub fn get(&self, key: &str) -> Option<V> {
        self.lock().entries.get(key).map(|e| e.payload.clone())
    }

    /// Insert or overwrite `key`, stamped with the current time.
    pub fn set(&self, key: impl Into<String>, payload: V) {
        self.set_at(key, payload, Instant::now());
    }

    /// Insert or overwrite `key` with an explicit insertion time.
    pub fn set_at(&self, key: impl Into<String>, payload: V, now: Instant) {
        self.lock().entries.insert(
            key.into(),
            CacheEntry {
                payload,
                inserted_at: now,
            },
        );
    }

    /// Remove every entry older than the TTL at `now`. Returns how many were removed.
    pub fn sweep(&self, now: Instant) -> usize {
        let mut state = self.lock();
        Self::sweep_locked(&mut state, now, self.config.ttl)
    }

    /// Sweep only if the last sweep is more than one sweep interval ago.
    pub fn maybe_sweep(&self, now: Instant) -> Option<usize> {
        let mut state = self.lock();
        if now.saturating_duration_since(state.last_sweep) <= self.config.sweep_interval {
            return None;
        }
        Some(Self::sweep_locked(&mut state, now, self.config.ttl))
    }

    fn sweep_locked(state: &mut CacheState<V>, now: Instant, ttl: Duration) -> usize {
        state.last_sweep = now;
        let before = state.entries.len();
        state
            .entries
            .retain(|_, e| now.saturating_duration_since(e.inserted_at) <= ttl);
        let removed = before - state.entries.len();
        if removed > 0 {
            debug!("avatar cache sweep removed {removed} of {before} entries");
        }
        removed
    }

    /// Full lookup flow: opportunistic sweep, then a hit, or `fetch` and store on success.
    ///
    /// A failed fetch (`None`) is not cached, so the next request retries upstream. The lock is
    /// not held while `fetch` runs.
    pub fn get_or_fetch<F>(&self, key: &str, now: Instant, fetch: F) -> Option<V>
    where
        F: FnOnce() -> Option<V>,
    {
        self.maybe_sweep(now);
        if let Some(hit) = self.get(key) {
            return Some(hit);
        }
        let payload = fetch()?;
        info!("cached avatar for {key}");
        self.set_at(key, payload.clone(), now);
        Some(payload)
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn short() -> CacheConfig {
        CacheConfig {
            ttl: Duration::from_secs(10),
            sweep_interval: Duration::from_secs(5),
        }
    }

    #[test]
    fn entries_within_ttl_survive_sweep() {
        let cache: AvatarCache = AvatarCache::new(short());
        let t0 = Instant::now();
        cache.set_at("a", "x".to_string(), t0);
        assert_eq!(cache.sweep(t0 + Duration::from_secs(10)), 0);
        assert_eq!(cache.get("a").as_deref(), Some("x"));
    }

    #[test]
    fn maybe_sweep_respects_interval() {
        let cache: AvatarCache = AvatarCache::new(short());
        let t0 = Instant::now();
        cache.set_at("a", "x".to_string(), t0);
        // Nothing due yet, even though the entry would be expired.
        assert_eq!(cache.maybe_sweep(t0 + Duration::from_secs(1)), None);
        assert_eq!(cache.maybe_sweep(t0 + Duration::from_secs(30)), Some(1));
        assert!(cache.is_empty());
    }
}
