//! cot2525d: symbol image HTTP server
//!
//! Serves pre-rendered MIL-STD-2525B symbol images keyed by the SIDC decoded
//! from a Cursor-on-Target type.
//!
//! ## Routes
//!
//! - `GET /?cot=<type>` and `GET /cot/<type>`: symbol image for a CoT type
//! - `GET /sidc/<sidc>[.png]`: symbol image for an SIDC
//! - `GET /decode?cot=<type>`: JSON decode result
//! - `GET /healthz`: liveness

pub mod config;
pub mod http;
pub mod telemetry;

use std::future::Future;
use std::sync::Arc;

use cot2525_store::{CachedSymbolStore, FsSymbolStore, StoreError, SymbolStore};
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::info;

pub use config::ServerConfig;
pub use http::{router, AppState, DecodeResponse};
pub use telemetry::{init_tracing, level_for};

/// Errors that stop the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to open image directory: {0}")]
    Store(#[from] StoreError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("server io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Open the configured image directory, wrapped in a cache when enabled.
pub fn build_store(config: &ServerConfig) -> Result<Arc<dyn SymbolStore>, ServerError> {
    let fs = FsSymbolStore::new(&config.images)?;
    info!(
        images = %config.images.display(),
        cache_bytes = config.cache_bytes,
        "symbol store opened"
    );
    if config.cache_bytes == 0 {
        Ok(Arc::new(fs))
    } else {
        Ok(Arc::new(CachedSymbolStore::new(fs, config.cache_bytes)))
    }
}

/// Run the server until ctrl-c.
pub async fn run(config: &ServerConfig) -> Result<(), ServerError> {
    let store = build_store(config)?;
    let app = router(AppState::new(store, config.fallback()));
    let listener = TcpListener::bind(config.bind)
        .await
        .map_err(|source| ServerError::Bind {
            addr: config.bind,
            source,
        })?;
    serve(listener, app, shutdown_signal()).await
}

/// Serve `app` on an already-bound listener until `shutdown` resolves.
pub async fn serve<F>(
    listener: TcpListener,
    app: axum::Router,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!(event = "server.listening", addr = %addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    info!(event = "server.shutdown", addr = %addr);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("ctrl_c received; shutting down http server");
}
