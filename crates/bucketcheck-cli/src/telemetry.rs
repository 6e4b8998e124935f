//! Tracing initialization for the checklist binaries.

use std::process;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::TRACING_TARGET_CONFIG;

/// Initializes tracing with environment-based filtering.
///
/// Diagnostics go to stderr so the checklist report on stdout stays a
/// clean document. The default level is `warn`; set `RUST_LOG` to see the
/// per-operation timing logs.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Logs build information at debug level.
pub fn log_build_info() {
    tracing::debug!(
        target: TRACING_TARGET_CONFIG,
        version = env!("CARGO_PKG_VERSION"),
        pid = process::id(),
        arch = std::env::consts::ARCH,
        os = std::env::consts::OS,
        "Build information"
    );
}
