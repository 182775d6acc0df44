//! Symbol store trait definitions
//!
//! A symbol store maps an image key (`<SIDC>.png`) to the bytes of a
//! pre-rendered symbol image. Implementations:
//! - `FsSymbolStore`: a directory of image files
//! - `MemorySymbolStore`: in-memory map (see `fakes`)
//! - `CachedSymbolStore`: read-through memoization around any store

use async_trait::async_trait;

use crate::error::StoreError;

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Read-only symbol image repository.
///
/// Guarantees:
/// - `get(key)` returns `StoreError::NotFound` when nothing is stored under `key`.
/// - `get(key)` returns `StoreError::InvalidKey` for keys rejected by [`validate_key`].
/// - `contains(key)` agrees with `get(key)`.
#[async_trait]
pub trait SymbolStore: Send + Sync {
    /// Retrieve image bytes by key.
    async fn get(&self, key: &str) -> StoreResult<Vec<u8>>;

    /// Check whether a key is present.
    async fn contains(&self, key: &str) -> StoreResult<bool>;
}

/// Reject keys that are not a single plain file name.
pub fn validate_key(key: &str) -> StoreResult<()> {
    let bad = key.is_empty()
        || key == "."
        || key == ".."
        || key.contains(['/', '\\', '\0']);
    if bad {
        return Err(StoreError::InvalidKey {
            key: key.to_string(),
        });
    }
    Ok(())
}
