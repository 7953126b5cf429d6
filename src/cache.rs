//! Tab-Scoped Read-Through Cache
//!
//! Key -> (JSON payload, fetched-at millis) with a fixed freshness window.
//! Backed by `sessionStorage` in the browser and a plain map in tests; the
//! payload and its timestamp live under separate keys (`{key}` and
//! `{key}-time`).

use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Freshness window shared by the events and challenges caches
pub const CACHE_TTL_MS: f64 = 5.0 * 60.0 * 1000.0;

pub const EVENTS_CACHE_KEY: &str = "events-cache";
pub const CHALLENGES_CACHE_KEY: &str = "challenges-cache";

/// Backing key/value store, injectable so page controllers can be tested
/// without a browser.
pub trait CacheStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// `sessionStorage`-backed store. Storage failures (quota, disabled) degrade
/// to cache misses.
pub struct SessionStore;

impl SessionStore {
    fn storage(&self) -> Option<web_sys::Storage> {
        web_sys::window()?.session_storage().ok()?
    }
}

impl CacheStore for SessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = self.storage() {
            let _ = storage.set_item(key, value);
        }
    }
}

/// In-memory store for tests
#[derive(Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl CacheStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
    }
}

pub struct ViewCache<S: CacheStore> {
    store: S,
}

impl<S: CacheStore> ViewCache<S> {
    pub fn new(store: S) -> Self {
        ViewCache { store }
    }

    fn time_key(key: &str) -> String {
        format!("{}-time", key)
    }

    /// Unexpired payload under `key`, if any. Expired or undecodable entries
    /// count as absent.
    pub fn read<T: DeserializeOwned>(&self, key: &str, ttl_ms: f64, now_ms: f64) -> Option<T> {
        let fetched_at: f64 = self.store.get(&Self::time_key(key))?.parse().ok()?;
        if now_ms - fetched_at >= ttl_ms {
            return None;
        }
        let raw = self.store.get(key)?;
        serde_json::from_str(&raw).ok()
    }

    pub fn write<T: Serialize>(&self, key: &str, payload: &T, now_ms: f64) {
        if let Ok(raw) = serde_json::to_string(payload) {
            self.store.set(key, &raw);
            self.store.set(&Self::time_key(key), &now_ms.to_string());
        }
    }

    /// Serve a fresh hit, or run `producer` and store its output. A failed
    /// producer writes nothing, so stale-or-absent beats a poisoned entry.
    pub async fn read_through<T, E, F, Fut>(
        &self,
        key: &str,
        ttl_ms: f64,
        now_ms: f64,
        producer: F,
    ) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(hit) = self.read(key, ttl_ms, now_ms) {
            return Ok(hit);
        }
        let fresh = producer().await?;
        self.write(key, &fresh, now_ms);
        Ok(fresh)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use futures::executor::block_on;

    use super::*;

    fn cache() -> ViewCache<MemoryStore> {
        ViewCache::new(MemoryStore::default())
    }

    #[test]
    fn fresh_hit_skips_producer() {
        let cache = cache();
        let calls = Cell::new(0u32);

        let produce = || {
            calls.set(calls.get() + 1);
            async { Ok::<_, String>(vec![1u32, 2, 3]) }
        };
        let first: Vec<u32> =
            block_on(cache.read_through("events-cache", CACHE_TTL_MS, 1_000.0, produce)).unwrap();

        let second: Vec<u32> = block_on(cache.read_through(
            "events-cache",
            CACHE_TTL_MS,
            1_000.0 + CACHE_TTL_MS - 1.0,
            || {
                calls.set(calls.get() + 1);
                async { Ok::<_, String>(vec![9u32]) }
            },
        ))
        .unwrap();

        assert_eq!(calls.get(), 1);
        assert_eq!(first, second);
    }

    #[test]
    fn expired_entry_reruns_producer() {
        let cache = cache();

        let _: Vec<u32> = block_on(cache.read_through("events-cache", CACHE_TTL_MS, 1_000.0, || async {
            Ok::<_, String>(vec![1u32])
        }))
        .unwrap();

        let refreshed: Vec<u32> = block_on(cache.read_through(
            "events-cache",
            CACHE_TTL_MS,
            1_000.0 + CACHE_TTL_MS,
            || async { Ok::<_, String>(vec![2u32]) },
        ))
        .unwrap();

        assert_eq!(refreshed, vec![2]);
        // The refreshed payload overwrote the entry
        let hit: Option<Vec<u32>> = cache.read("events-cache", CACHE_TTL_MS, 1_000.0 + CACHE_TTL_MS);
        assert_eq!(hit, Some(vec![2]));
    }

    #[test]
    fn failed_producer_writes_nothing() {
        let cache = cache();

        let result: Result<Vec<u32>, String> = block_on(cache.read_through(
            "challenges-cache",
            CACHE_TTL_MS,
            1_000.0,
            || async { Err("boom".to_string()) },
        ));

        assert_eq!(result, Err("boom".to_string()));
        let hit: Option<Vec<u32>> = cache.read("challenges-cache", CACHE_TTL_MS, 1_000.0);
        assert!(hit.is_none());
    }

    #[test]
    fn failed_refresh_keeps_prior_entry_untouched() {
        let cache = cache();
        cache.write("events-cache", &vec![1u32], 1_000.0);

        let result: Result<Vec<u32>, String> = block_on(cache.read_through(
            "events-cache",
            CACHE_TTL_MS,
            1_000.0 + CACHE_TTL_MS + 5.0,
            || async { Err("down".to_string()) },
        ));
        assert!(result.is_err());

        // Entry still carries the old timestamp: absent once expired,
        // but never poisoned with the failure.
        let stale: Option<Vec<u32>> =
            cache.read("events-cache", CACHE_TTL_MS, 1_000.0 + CACHE_TTL_MS + 5.0);
        assert!(stale.is_none());
        let within: Option<Vec<u32>> = cache.read("events-cache", CACHE_TTL_MS, 1_500.0);
        assert_eq!(within, Some(vec![1]));
    }

    #[test]
    fn keys_expire_independently() {
        let cache = cache();
        cache.write(EVENTS_CACHE_KEY, &vec![1u32], 0.0);
        cache.write(CHALLENGES_CACHE_KEY, &vec![2u32], CACHE_TTL_MS);

        let later = CACHE_TTL_MS + 10.0;
        let events: Option<Vec<u32>> = cache.read(EVENTS_CACHE_KEY, CACHE_TTL_MS, later);
        let challenges: Option<Vec<u32>> = cache.read(CHALLENGES_CACHE_KEY, CACHE_TTL_MS, later);

        assert!(events.is_none());
        assert_eq!(challenges, Some(vec![2]));
    }
}
