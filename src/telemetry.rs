//! Tracing subscriber setup.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ServerConfig;

/// Builds the log filter: `RUST_LOG` when set, otherwise `fallback`.
///
/// An unparseable fallback degrades to `info`.
pub fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global subscriber. Call once, before serving.
pub fn init_tracing(config: &ServerConfig) {
    let filter = env_filter(&config.log_level);

    if config.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
