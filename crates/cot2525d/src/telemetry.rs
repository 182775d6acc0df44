//! Tracing initialisation shared by the cot2525 binaries.
//!
//! [`init_tracing`] installs the global subscriber once; later calls are
//! ignored because a process can only have one global subscriber.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Crates whose events follow the requested level; everything else,
/// including the hyper/axum stack, stays at `warn`.
const OWN_TARGETS: &[&str] = &["cot2525", "cot2525d", "cot2525_store"];

/// Filter directives used when `RUST_LOG` is unset.
pub fn default_directives(level: Level) -> String {
    let level = level.as_str().to_ascii_lowercase();
    OWN_TARGETS.iter().fold("warn".to_string(), |mut acc, target| {
        acc.push_str(&format!(",{target}={level}"));
        acc
    })
}

/// Initialise the global tracing subscriber.
///
/// * `json` - emit newline-delimited JSON log lines.
/// * `level` - verbosity for the cot2525 crates when `RUST_LOG` is not set.
pub fn init_tracing(json: bool, level: Level) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)));

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(false).json())
            .try_init()
            .ok();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(false))
            .try_init()
            .ok();
    }
}

/// Map the `--verbose` flag to a default level.
pub fn level_for(verbose: bool) -> Level {
    if verbose {
        Level::DEBUG
    } else {
        Level::INFO
    }
}
