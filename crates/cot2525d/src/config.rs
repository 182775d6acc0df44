//! Server configuration from flags and `COT2525_*` environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Args;
use cot2525_store::DEFAULT_CACHE_BYTES;

/// Default listen address; port 8000 matches the classic symbol server.
pub const DEFAULT_BIND: &str = "127.0.0.1:8000";

#[derive(Args, Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "COT2525_BIND", default_value = DEFAULT_BIND)]
    pub bind: SocketAddr,

    /// Directory holding `<SIDC>.png` symbol images
    #[arg(long, env = "COT2525_IMAGES")]
    pub images: PathBuf,

    /// In-memory image cache budget in bytes (0 disables the cache)
    #[arg(long, env = "COT2525_CACHE_BYTES", default_value_t = DEFAULT_CACHE_BYTES)]
    pub cache_bytes: usize,

    /// Serve only exact matches instead of falling back to parent CoT types
    #[arg(long, env = "COT2525_NO_FALLBACK")]
    pub no_fallback: bool,
}

impl ServerConfig {
    pub fn new(images: impl Into<PathBuf>) -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8000)),
            images: images.into(),
            cache_bytes: DEFAULT_CACHE_BYTES,
            no_fallback: false,
        }
    }

    pub fn fallback(&self) -> bool {
        !self.no_fallback
    }
}
