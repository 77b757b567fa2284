//! Process-wide log subscriber.

use tracing_subscriber::{fmt, EnvFilter};

/// Install the stderr subscriber. `RUST_LOG` wins over `debug` when set.
///
/// Library crates log through the `log` facade; `tracing-subscriber` picks
/// those records up through its `tracing-log` bridge.
pub fn init(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();

    if debug {
        tracing::info!("Debug logging enabled.");
    }
}
