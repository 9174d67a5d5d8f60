#![forbid(unsafe_code)]

//! Logging shims.
//!
//! With the `tracing` feature the `tracing` macros are re-exported so that
//! dependants can log through `droplist_core::debug!` and friends without a
//! direct dependency. With `tracing-json` a JSON subscriber is available for
//! hosts that ship logs to a collector.

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

/// Install a global JSON subscriber on stderr, filtered by `RUST_LOG`
/// (default `info`).
///
/// Returns `false` if a global subscriber was already set.
#[cfg(feature = "tracing-json")]
pub fn init_json_subscriber() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_current_span(false)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
