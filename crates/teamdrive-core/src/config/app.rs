//! HTTP listener settings for the TeamDrive API.

use std::time::Duration;

use serde::{Deserialize, Serialize};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SHUTDOWN_GRACE_SECONDS: u64 = 30;
const DEFAULT_PREFLIGHT_MAX_AGE_SECONDS: u64 = 600;

/// Where the API listens and how long it drains on shutdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// How long in-flight uploads may keep running after a shutdown signal.
    pub shutdown_grace_seconds: u64,
    pub cors: CorsConfig,
}

impl ServerConfig {
    /// `host:port` for the TCP listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_seconds)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            shutdown_grace_seconds: DEFAULT_SHUTDOWN_GRACE_SECONDS,
            cors: CorsConfig::default(),
        }
    }
}

/// Browser origins allowed to call the API.
///
/// An empty list allows none; `"*"` allows any.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    /// Preflight cache lifetime; zero falls back to the default.
    pub max_age_seconds: u64,
}

impl CorsConfig {
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|origin| origin == "*")
    }

    pub fn max_age(&self) -> Duration {
        match self.max_age_seconds {
            0 => Duration::from_secs(DEFAULT_PREFLIGHT_MAX_AGE_SECONDS),
            secs => Duration::from_secs(secs),
        }
    }
}
