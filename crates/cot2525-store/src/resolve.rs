//! CoT / SIDC -> symbol image resolution.
//!
//! Decoding always completes before the store is queried. With fallback
//! enabled, a CoT type that has no image is retried with its trailing
//! detail field removed until an image is found or only the atom remains.

use cot2525_core::{decode, parents, Sidc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::error::StoreError;
use crate::store::{StoreResult, SymbolStore};

/// A resolved symbol image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Symbol {
    /// CoT type whose SIDC matched; a parent of the requested type when
    /// fallback kicked in, absent for direct SIDC lookups.
    pub cot: Option<String>,
    pub sidc: Sidc,
    pub key: String,
    #[serde(skip)]
    pub bytes: Vec<u8>,
    /// SHA-256 hex of `bytes`.
    pub etag: String,
}

impl Symbol {
    fn new(cot: Option<&str>, sidc: Sidc, key: String, bytes: Vec<u8>) -> Self {
        let etag = hex::encode(Sha256::digest(&bytes));
        Self {
            cot: cot.map(str::to_string),
            sidc,
            key,
            bytes,
            etag,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

async fn lookup<S>(store: &S, cot: Option<&str>, sidc: Sidc) -> StoreResult<Option<Symbol>>
where
    S: SymbolStore + ?Sized,
{
    let key = sidc.image_key();
    match store.get(&key).await {
        Ok(bytes) => Ok(Some(Symbol::new(cot, sidc, key, bytes))),
        Err(StoreError::NotFound { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Look up the image for an already-formed SIDC.
pub async fn resolve_sidc<S>(store: &S, sidc: Sidc) -> StoreResult<Option<Symbol>>
where
    S: SymbolStore + ?Sized,
{
    let found = lookup(store, None, sidc).await?;
    match &found {
        Some(symbol) => info!(
            event = "symbol.resolved",
            sidc = %sidc,
            bytes = symbol.len(),
        ),
        None => info!(event = "symbol.missing", sidc = %sidc),
    }
    Ok(found)
}

/// Decode `cot` and look up its image, optionally walking to parent types.
///
/// Returns `Ok(None)` when no image exists; store failures (including keys
/// the store rejects) are returned as errors.
pub async fn resolve_cot<S>(store: &S, cot: &str, fallback: bool) -> StoreResult<Option<Symbol>>
where
    S: SymbolStore + ?Sized,
{
    let requested = decode(cot);
    let candidates = parents(cot).take(if fallback { usize::MAX } else { 1 });

    // Decoding only reads a fixed-width head, so long or non-atom inputs
    // yield runs of identical SIDCs; query each distinct code once.
    let mut tried: Option<Sidc> = None;
    for candidate in candidates {
        let sidc = decode(candidate);
        if tried == Some(sidc) {
            continue;
        }
        tried = Some(sidc);
        if let Some(symbol) = lookup(store, Some(candidate), sidc).await? {
            info!(
                event = "symbol.resolved",
                cot = %cot,
                matched = %candidate,
                sidc = %sidc,
                bytes = symbol.len(),
            );
            return Ok(Some(symbol));
        }
        debug!(cot = %candidate, sidc = %sidc, "no symbol image");
    }

    info!(event = "symbol.missing", cot = %cot, sidc = %requested);
    Ok(None)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::fakes::MemorySymbolStore;

    /// Counts `get` calls reaching the wrapped store.
    struct CountingStore {
        inner: MemorySymbolStore,
        gets: AtomicUsize,
    }

    impl CountingStore {
        fn new(inner: MemorySymbolStore) -> Self {
            Self {
                inner,
                gets: AtomicUsize::new(0),
            }
        }

        fn gets(&self) -> usize {
            self.gets.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SymbolStore for CountingStore {
        async fn get(&self, key: &str) -> StoreResult<Vec<u8>> {
            self.gets.fetch_add(1, Ordering::SeqCst);
            self.inner.get(key).await
        }

        async fn contains(&self, key: &str) -> StoreResult<bool> {
            self.inner.contains(key).await
        }
    }

    fn store_with(keys: &[&str]) -> MemorySymbolStore {
        let store = MemorySymbolStore::new();
        for key in keys {
            store.put(key, key.as_bytes()).unwrap();
        }
        store
    }

    #[tokio::test]
    async fn exact_match() {
        let store = store_with(&["sfApMFQ--------.png"]);
        let symbol = resolve_cot(&store, "a-f-A-M-F-Q", true)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(symbol.cot.as_deref(), Some("a-f-A-M-F-Q"));
        assert_eq!(symbol.key, "sfApMFQ--------.png");
        assert_eq!(symbol.bytes, b"sfApMFQ--------.png");
        assert_eq!(symbol.etag.len(), 64);
    }

    #[tokio::test]
    async fn fallback_walks_to_parent() {
        let store = store_with(&["shGpE----------.png"]);
        let symbol = resolve_cot(&store, "a-h-G-E-W-M", true)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(symbol.cot.as_deref(), Some("a-h-G-E"));
        assert_eq!(symbol.sidc.to_string(), "shGpE----------");
    }

    #[tokio::test]
    async fn no_fallback_stops_at_exact() {
        let store = store_with(&["shGpE----------.png"]);
        let found = resolve_cot(&store, "a-h-G-E-W", false).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn unknown_sidc_is_still_looked_up() {
        let store = store_with(&["---------------.png"]);
        let symbol = resolve_cot(&store, "b-m-p-s-p-i", false)
            .await
            .unwrap()
            .unwrap();
        assert!(symbol.sidc.is_unknown());
    }

    #[tokio::test]
    async fn missing_everywhere_is_none() {
        let store = MemorySymbolStore::new();
        assert!(resolve_cot(&store, "a-f-G-U-C", true)
            .await
            .unwrap()
            .is_none());
        assert!(resolve_cot(&store, "", true).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn separator_in_detail_is_invalid_key() {
        let store = MemorySymbolStore::new();
        let err = resolve_cot(&store, "a-f-G-/", false).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidKey { .. }));
    }

    #[tokio::test]
    async fn direct_sidc_lookup() {
        let store = store_with(&["sfgpucf--------.png"]);
        let sidc: Sidc = "sfgpucf--------".parse().unwrap();
        let symbol = resolve_sidc(&store, sidc).await.unwrap().unwrap();
        assert_eq!(symbol.cot, None);
        assert_eq!(symbol.sidc, sidc);

        let other: Sidc = "shgpucf--------".parse().unwrap();
        assert!(resolve_sidc(&store, other).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn long_input_queries_each_distinct_sidc_once() {
        let store = CountingStore::new(MemorySymbolStore::new());
        let cot = format!("a-f-G-U-C-I{}", "-Z".repeat(5000));
        assert!(resolve_cot(&store, &cot, true).await.unwrap().is_none());
        // One code for every candidate of 17+ chars, then one per shorter parent.
        assert_eq!(store.gets(), 9);
    }

    #[tokio::test]
    async fn non_atom_is_queried_once() {
        let store = CountingStore::new(MemorySymbolStore::new());
        assert!(resolve_cot(&store, "b-m-p-s-p-i", true)
            .await
            .unwrap()
            .is_none());
        assert_eq!(store.gets(), 1);
    }

    #[tokio::test]
    async fn long_input_still_falls_back() {
        let store = CountingStore::new(store_with(&["sfGpU----------.png"]));
        let cot = format!("a-f-G-U-C-I{}", "-Z".repeat(50));
        let symbol = resolve_cot(&store, &cot, true).await.unwrap().unwrap();
        assert_eq!(symbol.cot.as_deref(), Some("a-f-G-U"));
        assert_eq!(store.gets(), 6);
    }
}
