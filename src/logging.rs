//! Logging setup for Extructor
//!
//! Thin initializers over `tracing-subscriber`; the library itself only
//! emits `tracing` events and never installs a subscriber on its own.

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging for Extructor at the given level, e.g.
/// `init_logging(Level::INFO)`. Typically called once at the start of your
/// application.
///
/// # Environment Variable
///
/// The `EXTRUCTOR_LOG` environment variable takes precedence over `level`
/// and accepts any filter directive `tracing-subscriber` understands:
///
/// ```bash
/// EXTRUCTOR_LOG=extructor=debug cargo run
/// ```
pub fn init_logging(level: Level) {
    let env_filter = EnvFilter::try_from_env("EXTRUCTOR_LOG")
        .unwrap_or_else(|_| EnvFilter::new(format!("extructor={level}")));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(env_filter)
        .init();

    tracing::info!("Extructor logging initialized at level: {level}");
}

/// Initialize logging with a custom filter string for more granular control
/// over what gets logged, e.g. `"extructor=debug,extructor::backend=trace"`.
/// An unparseable filter falls back to `extructor=info`.
pub fn init_logging_with_filter(filter: &str) {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| {
        tracing::warn!("Invalid filter string: {}, using default (info)", filter);
        EnvFilter::new("extructor=info")
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(env_filter)
        .init();

    tracing::info!("Extructor logging initialized with custom filter: {}", filter);
}
