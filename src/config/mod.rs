//! Configuration module
//!
//! Handles loading and layering configuration: defaults, config file,
//! environment, then command-line flags.

mod env;
mod file;

pub use env::{print_env_help, EnvConfig};
pub use file::ConfigFile;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Default backend address
pub const DEFAULT_BASE_URL: &str = "http://localhost:8001";

/// Application configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Backend base URL; `/api` is appended to form the API root
    pub base_url: String,

    /// HTTP timeout in seconds
    pub timeout_secs: u64,

    /// Maximum characters of a response body kept in a failure preview
    pub preview_len: usize,

    /// Report format (table, summary, json, json-pretty)
    pub format: String,

    /// Colorize the table report
    pub color: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
            preview_len: 200,
            format: "table".to_string(),
            color: true,
        }
    }
}

impl AppConfig {
    /// API root derived from the base URL
    pub fn api_url(&self) -> String {
        format!("{}/api", self.base_url.trim_end_matches('/'))
    }

    /// Apply environment overrides
    pub fn apply_env(&mut self, env: &EnvConfig) {
        if let Some(base_url) = &env.base_url {
            self.base_url = base_url.clone();
        }
        if let Some(timeout) = env.timeout {
            self.timeout_secs = timeout;
        }
        if let Some(format) = &env.format {
            self.format = format.clone();
        }
        if env.no_color == Some(true) {
            self.color = false;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            anyhow::bail!("base_url must not be empty");
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            anyhow::bail!(
                "base_url must start with http:// or https://, got: {}",
                self.base_url
            );
        }
        if self.timeout_secs == 0 {
            anyhow::bail!("timeout_secs must be greater than 0");
        }
        if self.preview_len == 0 {
            anyhow::bail!("preview_len must be greater than 0");
        }
        Ok(())
    }
}
