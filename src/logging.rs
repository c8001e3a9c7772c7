//! Structured logging setup
//!
//! Filter precedence: `RUST_LOG`, then `--verbose`, then the configured
//! `log_level`, then `info`.

use tracing_subscriber::EnvFilter;

/// Directive used when `RUST_LOG` is not set
pub fn fallback_directive(verbose: bool, configured: &str) -> String {
    if verbose {
        return "debug".to_string();
    }
    let configured = configured.trim();
    if configured.is_empty() || EnvFilter::try_new(configured).is_err() {
        "info".to_string()
    } else {
        configured.to_string()
    }
}

/// Install the global subscriber, writing to stderr
///
/// Calling this twice is harmless; the second call is ignored.
pub fn init(verbose: bool, configured: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(fallback_directive(verbose, configured)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
