//! TTL query cache owned by the repository layer
//!
//! Entries are keyed by resource, business and query shape, so one business
//! can never be served another's results and invalidation is per business.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};
use strum_macros::Display;

use super::error::{RepositoryError, RepositoryResult};
use crate::core::sync::handle_mutex_poison;
use crate::core::time::Clock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum CacheResource {
    Scans,
    Statistics,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub resource: CacheResource,
    pub business_id: String,
    pub query_shape: String,
}

impl CacheKey {
    pub fn new(
        resource: CacheResource,
        business_id: impl Into<String>,
        query_shape: impl Into<String>,
    ) -> Self {
        Self {
            resource,
            business_id: business_id.into(),
            query_shape: query_shape.into(),
        }
    }
}

struct CacheEntry<V> {
    stored_at: Instant,
    value: V,
}

struct CacheState<V> {
    entries: HashMap<CacheKey, CacheEntry<V>>,
    /// Bumped on every invalidation of a business
    generations: HashMap<String, u64>,
}

impl<V> CacheState<V> {
    fn generation(&self, business_id: &str) -> u64 {
        self.generations.get(business_id).copied().unwrap_or(0)
    }
}

pub struct QueryCache<V> {
    state: Mutex<CacheState<V>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl<V: Clone> QueryCache<V> {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(CacheState {
                entries: HashMap::new(),
                generations: HashMap::new(),
            }),
            ttl,
            clock,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn lock(&self) -> RepositoryResult<MutexGuard<'_, CacheState<V>>> {
        handle_mutex_poison(self.state.lock(), RepositoryError::internal)
    }

    fn evict_expired(&self, entries: &mut HashMap<CacheKey, CacheEntry<V>>, now: Instant) -> usize {
        let before = entries.len();
        entries.retain(|_, entry| now.duration_since(entry.stored_at) < self.ttl);
        before - entries.len()
    }

    /// Fresh value for `key`; an expired entry is evicted and reported as a miss
    pub fn get(&self, key: &CacheKey) -> RepositoryResult<Option<V>> {
        let now = self.clock.instant();
        let mut state = self.lock()?;
        match state.entries.get(key) {
            Some(entry) if now.duration_since(entry.stored_at) < self.ttl => {
                Ok(Some(entry.value.clone()))
            }
            Some(_) => {
                state.entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    /// Current invalidation generation of a business. Capture it before
    /// reading the backing store and hand it to [`Self::insert_if_current`].
    pub fn generation(&self, business_id: &str) -> RepositoryResult<u64> {
        Ok(self.lock()?.generation(business_id))
    }

    /// Store a value unconditionally. Expired entries of every key are
    /// evicted on the way in.
    pub fn insert(&self, key: CacheKey, value: V) -> RepositoryResult<()> {
        let now = self.clock.instant();
        let mut state = self.lock()?;
        self.evict_expired(&mut state.entries, now);
        state.entries.insert(
            key,
            CacheEntry {
                stored_at: now,
                value,
            },
        );
        Ok(())
    }

    /// Store a value read at `generation`, unless the business was
    /// invalidated since. Returns whether the value was stored.
    pub fn insert_if_current(
        &self,
        key: CacheKey,
        value: V,
        generation: u64,
    ) -> RepositoryResult<bool> {
        let now = self.clock.instant();
        let mut state = self.lock()?;
        self.evict_expired(&mut state.entries, now);
        if state.generation(&key.business_id) != generation {
            return Ok(false);
        }
        state.entries.insert(
            key,
            CacheEntry {
                stored_at: now,
                value,
            },
        );
        Ok(true)
    }

    /// Drop every entry of one business; returns how many were removed
    pub fn invalidate_business(&self, business_id: &str) -> RepositoryResult<usize> {
        let mut state = self.lock()?;
        *state.generations.entry(business_id.to_string()).or_insert(0) += 1;
        let before = state.entries.len();
        state.entries.retain(|key, _| key.business_id != business_id);
        Ok(before - state.entries.len())
    }

    /// Drop every expired entry; returns how many were removed
    pub fn purge_expired(&self) -> RepositoryResult<usize> {
        let now = self.clock.instant();
        let mut state = self.lock()?;
        Ok(self.evict_expired(&mut state.entries, now))
    }

    pub fn len(&self) -> usize {
        self.lock().map(|s| s.entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
