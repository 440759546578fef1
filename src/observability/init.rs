//! Tracing initialization and subscriber setup.

use crate::Config;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global tracing subscriber.
///
/// Sets up a `tracing-subscriber` registry that:
/// 1. Filters spans and events by level
/// 2. Formats them as compact lines on stderr
///
/// # Level Resolution
///
/// 1. `RUST_LOG`, when set and valid
/// 2. `config.log_level`
/// 3. Default: `"info"`
///
/// # Initialization Behavior
///
/// Idempotent: only the first call installs a subscriber, later calls (or a
/// subscriber installed by the host) are left alone.
///
/// # Example
///
/// ```rust
/// use foodfinder::observability::init_tracing;
/// use foodfinder::Config;
///
/// let config = Config {
///     log_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
///
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = config.log_level.as_deref().unwrap_or("info");
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
    });

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true).compact());

    let _ = subscriber.try_init();
}
