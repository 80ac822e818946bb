//! Diagnostic tracing for scaffolding runs.
//!
//! Step banners and the final status line are product output on stdout and
//! stderr; this module only configures `tracing` diagnostics, which go to
//! stderr and are filtered by `RUST_LOG`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "warn,railyard=info";

/// Initialize the tracing subscriber.
///
/// ```bash
/// RUST_LOG=railyard=debug railyard plan
/// ```
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // A second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .try_init();
}
