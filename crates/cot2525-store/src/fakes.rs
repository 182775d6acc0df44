//! In-memory symbol store (tests and embedded image sets)
//!
//! `MemorySymbolStore` satisfies the `SymbolStore` contract without touching
//! the filesystem.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::error::StoreError;
use crate::store::{validate_key, StoreResult, SymbolStore};

/// In-memory symbol store backed by a `HashMap<key, bytes>`.
#[derive(Debug, Default)]
pub struct MemorySymbolStore {
    images: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemorySymbolStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `data` under `key`, replacing any previous image.
    pub fn put(&self, key: &str, data: &[u8]) -> StoreResult<()> {
        validate_key(key)?;
        let mut images = self.images.lock().unwrap_or_else(PoisonError::into_inner);
        images.insert(key.to_string(), data.to_vec());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.images
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl SymbolStore for MemorySymbolStore {
    async fn get(&self, key: &str) -> StoreResult<Vec<u8>> {
        validate_key(key)?;
        let images = self.images.lock().unwrap_or_else(PoisonError::into_inner);
        images
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                key: key.to_string(),
            })
    }

    async fn contains(&self, key: &str) -> StoreResult<bool> {
        validate_key(key)?;
        let images = self.images.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(images.contains_key(key))
    }
}
