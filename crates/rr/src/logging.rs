//! Diagnostics for the `rr` binary.
//!
//! Views and notifications go to stdout. Tracing output goes to stderr and
//! is controlled by `RUST_LOG`, so `RUST_LOG=rr_core=info rr session` shows
//! every committed transition next to the rendered views.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global subscriber. Defaults to `warn` when `RUST_LOG` is
/// unset or unparsable.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
