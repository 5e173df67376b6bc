//! Structured logging for tracing a simulation run.
//!
//! The simulation emits `tracing` events at three levels:
//!
//! * `info` - construction, reset and halting of a simulation
//! * `debug` - customer arrivals, service starts, departures and routing
//! * `trace` - statistics integration and activity scheduling
//!
//! Nothing is printed unless a subscriber is installed.  The functions here
//! install a `tracing-subscriber` formatter, with `RUST_LOG` taking
//! precedence over the requested level:
//!
//! ```bash
//! RUST_LOG=tandem_sim::models=debug cargo test
//! ```

use tracing::info;
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging at the `info` level.
pub fn init_simulation_logging() {
    init_simulation_logging_with_level("info")
}

/// Initialize logging at the given level ("trace", "debug", "info", "warn"
/// or "error").  A subscriber that is already installed is left in place.
pub fn init_simulation_logging_with_level(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("{}={}", env!("CARGO_CRATE_NAME"), level).into());

    let installed = tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_level(true))
        .with(filter)
        .try_init();

    if installed.is_ok() {
        info!("Simulation logging initialized at level: {}", level);
    }
}
