//! Size- and time-bounded key/value cache.
//!
//! Both adapter caches (backend results and output-page checkpoints) are
//! instances of [`BoundedCache`]. Eviction is delegated to `moka`.

use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;

use crate::config::DEFAULT_ENTRY_TTL;

/// In-memory cache with a max entry count and a fixed time-to-live.
pub struct BoundedCache<K, V> {
    name: &'static str,
    max_entries: u64,
    ttl: Duration,
    entries: Cache<K, V>,
}

impl<K, V> BoundedCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Creates a cache holding at most `max_entries` entries with the default TTL.
    #[inline]
    pub fn new(name: &'static str, max_entries: u64) -> Self {
        Self::with_ttl(name, max_entries, DEFAULT_ENTRY_TTL)
    }

    /// Creates a cache whose entries expire `ttl` after they were written.
    pub fn with_ttl(name: &'static str, max_entries: u64, ttl: Duration) -> Self {
        Self {
            name,
            max_entries,
            ttl,
            entries: Cache::builder()
                .name(name)
                .max_capacity(max_entries)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Returns the cached value, if present and not expired.
    #[inline]
    pub async fn get(&self, key: &K) -> Option<V> {
        self.entries.get(key).await
    }

    /// Stores a value, replacing any previous one.
    #[inline]
    pub async fn insert(&self, key: K, value: V) {
        self.entries.insert(key, value).await;
    }

    /// Returns the cached value or computes, stores and returns it.
    ///
    /// Concurrent callers for the same key wait for a single `init` future.
    /// Errors are not cached; every waiting caller receives the same error.
    #[inline]
    pub async fn try_get_with<F, E>(&self, key: K, init: F) -> Result<V, Arc<E>>
    where
        F: Future<Output = Result<V, E>>,
        E: Send + Sync + 'static,
    {
        self.entries.try_get_with(key, init).await
    }

    #[inline]
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the approximate number of cached entries.
    ///
    /// Call [`run_pending_tasks`](Self::run_pending_tasks) first for an exact count.
    #[inline]
    pub fn len(&self) -> u64 {
        self.entries.entry_count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.entry_count() == 0
    }

    /// Clears all entries.
    #[inline]
    pub fn clear(&self) {
        self.entries.invalidate_all();
    }

    /// Runs any pending maintenance tasks in the underlying cache.
    #[inline]
    pub async fn run_pending_tasks(&self) {
        self.entries.run_pending_tasks().await;
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn max_entries(&self) -> u64 {
        self.max_entries
    }

    #[inline]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl<K, V> std::fmt::Debug for BoundedCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundedCache")
            .field("name", &self.name)
            .field("entries", &self.entries.entry_count())
            .field("max_entries", &self.max_entries)
            .field("ttl", &self.ttl)
            .finish()
    }
}
