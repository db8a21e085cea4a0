//! Tracing subscriber initialization.

use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber. Safe to call more than once (later
/// calls are no-ops), which keeps test setup simple.
pub fn init_telemetry() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
