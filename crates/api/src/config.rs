//! API client configuration

use serde::{Deserialize, Serialize};

/// Connection settings for the Nimbus platform API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the management endpoint
    pub endpoint: String,

    /// API token presented on every request
    pub token: String,

    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,

    /// Overall per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8080".to_string(),
            token: String::new(),
            // A stalled management API must not hang an apply forever.
            connect_timeout_secs: 5,
            request_timeout_secs: 60,
        }
    }
}

impl ApiConfig {
    /// Load configuration from file
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }
}
