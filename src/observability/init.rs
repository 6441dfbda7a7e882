//! Tracing initialization and subscriber setup.
//!
//! The crate instruments its state transitions with `tracing` macros but
//! never installs a subscriber on its own: an embedding application usually
//! has one already. [`init_tracing`] is the opt-in default for hosts and test
//! runs that want the crate's spans on stderr without wiring their own
//! pipeline.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs a formatted-output subscriber filtered at `level`.
///
/// `level` accepts any `EnvFilter` directive, from a bare level (`"debug"`)
/// to per-module filters (`"bookscout=trace,info"`). The `RUST_LOG`
/// environment variable takes precedence when set.
///
/// Idempotent: only the first installation in a process takes effect, so
/// calling this from every test is safe.
///
/// # Example
///
/// ```
/// bookscout::observability::init_tracing("debug");
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    let _ = subscriber.try_init();
}
