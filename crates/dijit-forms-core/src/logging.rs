//! Logging integration.
//!
//! Provides a helper for configuring [`tracing`]-based logging from
//! [`DojoConfig`](crate::config::DojoConfig).

use crate::config::DojoConfig;

/// Sets up the global tracing subscriber based on the given configuration.
///
/// The filter directive is read from `config.log_level`. In debug mode a
/// pretty, human-readable format is used; otherwise a structured JSON format.
pub fn setup_logging(config: &DojoConfig) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if config.debug {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .try_init()
            .ok();
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .try_init()
            .ok();
    }
}
