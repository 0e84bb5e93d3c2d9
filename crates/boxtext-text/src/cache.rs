#![forbid(unsafe_code)]

//! Bounded, thread-safe LRU caches for layout results.
//!
//! The layout engine memoizes three things: segmentation per plain string,
//! minimum width per segmented text, and wrap results per segmented text and
//! width. Each of those lives in a [`SharedLru`].
//!
//! # Concurrency
//! Every lookup and insertion holds the cache's mutex for the whole
//! operation, so a reader sees either the old entry or the fully installed new
//! one. Values are computed *outside* the lock: two threads racing on the same
//! key may both compute, and the last insert wins with an equal value.
//!
//! # Example
//! ```
//! use boxtext_text::cache::SharedLru;
//!
//! let cache: SharedLru<String, usize> = SharedLru::new("demo", 2);
//! assert_eq!(cache.get_or_insert_with("hello".to_string(), || 5), 5);
//! assert_eq!(cache.get("hello"), Some(5));
//!
//! let stats = cache.stats();
//! assert_eq!(stats.hits, 1);
//! assert_eq!(stats.misses, 1);
//! ```

use lru::LruCache;
use rustc_hash::FxBuildHasher;
use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::trace;

/// Statistics about cache performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses.
    pub misses: u64,
    /// Current number of entries.
    pub size: usize,
    /// Maximum capacity.
    pub capacity: usize,
}

impl CacheStats {
    /// Calculate hit rate (0.0 to 1.0).
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// A named LRU cache behind a mutex, with atomic hit/miss counters.
///
/// Values are cloned out of the cache; store `Arc`s for anything larger than
/// a few words.
pub struct SharedLru<K, V> {
    name: &'static str,
    entries: Mutex<LruCache<K, V, FxBuildHasher>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<K: Hash + Eq, V: Clone> SharedLru<K, V> {
    /// Create a new cache with the specified capacity.
    ///
    /// If capacity is zero, defaults to 1.
    #[must_use]
    pub fn new(name: &'static str, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            name,
            entries: Mutex::new(LruCache::with_hasher(capacity, FxBuildHasher)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Name used in log events.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<K, V, FxBuildHasher>> {
        // Entries are pure functions of their keys, so a panic in another
        // thread cannot leave a half-written value behind.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Look up a value, refreshing its LRU position. Counts a hit or miss.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let found = self.lock().get(key).cloned();
        self.record(found.is_some());
        found
    }

    /// Insert a value, evicting the least recently used entry when full.
    pub fn insert(&self, key: K, value: V) {
        self.lock().put(key, value);
    }

    /// Return the cached value or compute, insert and return it.
    ///
    /// `compute` runs without the lock held.
    pub fn get_or_insert_with<F>(&self, key: K, compute: F) -> V
    where
        F: FnOnce() -> V,
    {
        if let Some(value) = self.get(&key) {
            return value;
        }
        let value = compute();
        self.insert(key, value.clone());
        value
    }

    fn record(&self, hit: bool) {
        if hit {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        trace!(target: "boxtext::cache", cache = self.name, hit);
    }

    /// Get the current number of cached entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Check if the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the cache capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.lock().cap().get()
    }

    /// Clear all entries and reset counters.
    pub fn clear(&self) {
        self.lock().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    /// Get cache statistics.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        let entries = self.lock();
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            size: entries.len(),
            capacity: entries.cap().get(),
        }
    }
}

impl<K, V> fmt::Debug for SharedLru<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedLru")
            .field("name", &self.name)
            .field("hits", &self.hits.load(Ordering::Relaxed))
            .field("misses", &self.misses.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn never_exceeds_capacity(
            keys in prop::collection::vec("[a-z]{1,5}", 10..100),
            capacity in 1usize..20
        ) {
            let c: SharedLru<String, usize> = SharedLru::new("prop", capacity);
            for k in &keys {
                c.get_or_insert_with(k.clone(), || k.len());
                prop_assert!(c.len() <= capacity);
            }
        }

        #[test]
        fn second_access_is_hit(k in "[a-zA-Z0-9]{1,20}") {
            let c: SharedLru<String, usize> = SharedLru::new("prop", 16);
            c.get_or_insert_with(k.clone(), || 1);
            let before = c.stats();
            c.get_or_insert_with(k.clone(), || 2);
            let after = c.stats();
            prop_assert_eq!(after.hits, before.hits + 1);
            prop_assert_eq!(after.misses, before.misses);
        }
    }
}
