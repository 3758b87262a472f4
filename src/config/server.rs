//! HTTP listener, logging and request-handling settings.
//!
//! | Variable | Default |
//! |---|---|
//! | `SURF_GATE__SERVER__HOST` | `0.0.0.0` |
//! | `SURF_GATE__SERVER__PORT` | `8080` |
//! | `SURF_GATE__SERVER__ENVIRONMENT` | `development` |
//! | `SURF_GATE__SERVER__LOG_LEVEL` | `info,surf_gate=debug` |
//! | `SURF_GATE__SERVER__LOG_JSON` | `false` |
//! | `SURF_GATE__SERVER__REQUEST_TIMEOUT_SECS` | `30` (1..=300) |
//! | `SURF_GATE__SERVER__CORS_ORIGINS` | unset (no CORS layer) |

use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

use super::error::ValidationError;

/// Upper bound for the per-request timeout.
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Deployment environment; production tightens URL validation.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub environment: Environment,

    /// Filter directive used when `RUST_LOG` is unset.
    pub log_level: String,

    /// Emit JSON lines instead of human-readable logs.
    pub log_json: bool,

    /// Requests running longer than this are answered with 408.
    pub request_timeout_secs: u64,

    /// Comma-separated browser origins allowed to call the API.
    pub cors_origins: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            environment: Environment::Development,
            log_level: "info,surf_gate=debug".to_string(),
            log_json: false,
            request_timeout_secs: 30,
            cors_origins: None,
        }
    }
}

impl ServerConfig {
    /// Address the listener binds; `host` must be an IP literal.
    pub fn socket_addr(&self) -> Result<SocketAddr, ValidationError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ValidationError::InvalidBindAddress)
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Configured CORS origins, trimmed, with empty entries dropped.
    pub fn cors_origins_list(&self) -> Vec<String> {
        self.cors_origins
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if !(1..=MAX_REQUEST_TIMEOUT_SECS).contains(&self.request_timeout_secs) {
            return Err(ValidationError::InvalidTimeout);
        }
        self.socket_addr().map(|_| ())
    }
}
