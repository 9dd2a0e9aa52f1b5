//! Logging setup using `tracing` + `tracing-subscriber`.
//!
//! Every binary here prints its artifact on stdout, so the subscriber
//! writes to stderr. The level comes from `RUST_LOG` and defaults to
//! `warn` to keep pipelines quiet.

use tracing_subscriber::EnvFilter;

/// Initialise the global logging subscriber.
///
/// Safe to call once at startup.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
