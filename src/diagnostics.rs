//! Logging helpers shared by the loader, the metric engine and the CLI.

use std::fmt::Display;
use tracing_subscriber::EnvFilter;

/// Install the stderr subscriber. `RUST_LOG` overrides the default level.
pub fn init(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub fn warn(msg: impl Display) {
    tracing::warn!("{}", msg);
}

/// Record that a derivation produced nothing for `subject`.
pub fn skipped(derivation: &str, subject: impl Display, reason: &str) {
    tracing::debug!(derivation, %subject, reason, "derivation skipped");
}
