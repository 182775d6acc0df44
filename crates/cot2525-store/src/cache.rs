//! Read-through cache for symbol images.
//!
//! Successful reads are memoized up to a byte budget. When an insert would
//! exceed the budget the whole cache is dropped first, so memory stays
//! bounded without per-entry bookkeeping. Misses and errors are never cached.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tracing::debug;

use crate::store::{validate_key, StoreResult, SymbolStore};

/// Default cache budget: 32 MiB.
pub const DEFAULT_CACHE_BYTES: usize = 32 * 1024 * 1024;

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<String, Vec<u8>>,
    bytes: usize,
    hits: u64,
    misses: u64,
}

/// Snapshot of cache counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub entries: usize,
    pub bytes: usize,
    pub hits: u64,
    pub misses: u64,
}

/// Wraps a store with a bounded in-memory cache.
#[derive(Debug)]
pub struct CachedSymbolStore<S> {
    inner: S,
    budget: usize,
    state: Mutex<CacheState>,
}

impl<S: SymbolStore> CachedSymbolStore<S> {
    /// Cache reads from `inner` using at most `budget` bytes. A budget of 0
    /// disables caching.
    pub fn new(inner: S, budget: usize) -> Self {
        Self {
            inner,
            budget,
            state: Mutex::new(CacheState::default()),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn stats(&self) -> CacheStats {
        let state = self.lock();
        CacheStats {
            entries: state.entries.len(),
            bytes: state.bytes,
            hits: state.hits,
            misses: state.misses,
        }
    }

    /// Drop every cached image.
    pub fn clear(&self) {
        let mut state = self.lock();
        state.entries.clear();
        state.bytes = 0;
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn remember(&self, key: &str, bytes: &[u8]) {
        if self.budget == 0 || bytes.len() > self.budget {
            return;
        }
        let mut state = self.lock();
        if state.entries.contains_key(key) {
            return;
        }
        if state.bytes + bytes.len() > self.budget {
            debug!(
                entries = state.entries.len(),
                bytes = state.bytes,
                "symbol cache budget reached; resetting"
            );
            state.entries.clear();
            state.bytes = 0;
        }
        state.bytes += bytes.len();
        state.entries.insert(key.to_string(), bytes.to_vec());
    }
}

#[async_trait]
impl<S: SymbolStore> SymbolStore for CachedSymbolStore<S> {
    async fn get(&self, key: &str) -> StoreResult<Vec<u8>> {
        validate_key(key)?;
        {
            let mut state = self.lock();
            if let Some(bytes) = state.entries.get(key).cloned() {
                state.hits += 1;
                return Ok(bytes);
            }
            state.misses += 1;
        }
        let bytes = self.inner.get(key).await?;
        self.remember(key, &bytes);
        Ok(bytes)
    }

    async fn contains(&self, key: &str) -> StoreResult<bool> {
        validate_key(key)?;
        let cached = self.lock().entries.contains_key(key);
        if cached {
            return Ok(true);
        }
        self.inner.contains(key).await
    }
}
