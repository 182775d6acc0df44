//! cot2525-store: Symbol Image Repository
//!
//! Maps an image key (`<SIDC>.png`) to pre-rendered symbol bytes and
//! resolves CoT types to images.
//!
//! ## Key Components
//!
//! - `SymbolStore`: async read-only repository trait
//! - `FsSymbolStore`: directory of image files
//! - `CachedSymbolStore`: bounded read-through cache around any store
//! - `resolve_cot` / `resolve_sidc`: decode, look up, and fall back

pub mod cache;
mod error;
pub mod fakes;
pub mod fs;
pub mod resolve;
pub mod store;

pub use cache::{CachedSymbolStore, DEFAULT_CACHE_BYTES};
pub use error::StoreError;
pub use fakes::MemorySymbolStore;
pub use fs::FsSymbolStore;
pub use resolve::{resolve_cot, resolve_sidc, Symbol};
pub use store::{validate_key, StoreResult, SymbolStore};
