//! Diagnostic tracing for the command-line front end.
//!
//! The library logs under the `memfile` target: `debug` for select, load,
//! save and remove, `warn` when a file cannot be read on open or its
//! on-disk copy survives a remove.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a compact stderr subscriber filtered by `RUST_LOG`, showing
/// only warnings when it is unset.
///
/// ```bash
/// RUST_LOG=memfile::fs=debug memfile write out.bin "hi"
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("memfile=warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false).compact())
        .init();
}
