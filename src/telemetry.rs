//! Tracing subscriber setup.
//!
//! Call [`init`] once at process startup. Filter via `RUST_LOG`
//! (e.g. `RUST_LOG=call_intake=debug`).

use tracing_subscriber::EnvFilter;

/// Initializes the global tracing subscriber.
///
/// Safe to call more than once; subsequent calls are no-ops. Uses
/// `RUST_LOG` when set, otherwise defaults to `info`.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
