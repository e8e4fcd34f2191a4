//! Diagnostics via `RUST_LOG`, written to stderr.
//!
//! User-facing progress is printed directly; this only covers tracing output.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber.
///
/// Reads `RUST_LOG`. Defaults to `warn`, or `appdec_core=debug` when the
/// `--debug` flag is set.
pub fn init(debug: bool) {
    let default = if debug { "appdec_core=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
