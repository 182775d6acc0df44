use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::error::StoreError;
use crate::store::{validate_key, StoreResult, SymbolStore};

/// Directory-backed symbol store.
///
/// Layout: `<root>/<key>`, e.g. `<root>/sfapmfq--------.png`. When the exact
/// key is missing the ASCII-lowercase key is tried, since symbol archives
/// usually ship lowercase file names.
#[derive(Debug, Clone)]
pub struct FsSymbolStore {
    root: PathBuf,
}

impl FsSymbolStore {
    /// Open the store rooted at `root`. The directory must already exist.
    pub fn new(root: impl AsRef<Path>) -> StoreResult<Self> {
        let root = root.as_ref().to_path_buf();
        let meta = std::fs::metadata(&root).map_err(|source| StoreError::Io {
            key: root.display().to_string(),
            source,
        })?;
        if !meta.is_dir() {
            return Err(StoreError::Io {
                key: root.display().to_string(),
                source: std::io::Error::new(ErrorKind::InvalidInput, "not a directory"),
            });
        }
        Ok(Self { root })
    }

    /// Candidate file names for `key`, exact first.
    fn candidates(key: &str) -> Vec<String> {
        let lower = key.to_ascii_lowercase();
        if lower == key {
            vec![key.to_string()]
        } else {
            vec![key.to_string(), lower]
        }
    }
}

#[async_trait]
impl SymbolStore for FsSymbolStore {
    async fn get(&self, key: &str) -> StoreResult<Vec<u8>> {
        validate_key(key)?;
        for name in Self::candidates(key) {
            match tokio::fs::read(self.root.join(&name)).await {
                Ok(bytes) => {
                    debug!(key = %key, file = %name, bytes = bytes.len(), "symbol image read");
                    return Ok(bytes);
                }
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(source) => {
                    return Err(StoreError::Io {
                        key: key.to_string(),
                        source,
                    })
                }
            }
        }
        Err(StoreError::NotFound {
            key: key.to_string(),
        })
    }

    async fn contains(&self, key: &str) -> StoreResult<bool> {
        validate_key(key)?;
        for name in Self::candidates(key) {
            let exists = tokio::fs::try_exists(self.root.join(&name))
                .await
                .map_err(|source| StoreError::Io {
                    key: key.to_string(),
                    source,
                })?;
            if exists {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
