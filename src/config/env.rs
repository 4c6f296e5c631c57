//! Environment variable configuration
//!
//! Provides environment variable overrides for configuration.

use std::env;

/// Environment variable prefix
const ENV_PREFIX: &str = "API_SMOKE";

/// Environment configuration from environment variables
#[derive(Clone, Debug, Default)]
pub struct EnvConfig {
    /// Base URL from API_SMOKE_BASE_URL
    pub base_url: Option<String>,
    /// Timeout from API_SMOKE_TIMEOUT
    pub timeout: Option<u64>,
    /// Output format from API_SMOKE_FORMAT
    pub format: Option<String>,
    /// Config file from API_SMOKE_CONFIG
    pub config_file: Option<String>,
    /// Verbose from API_SMOKE_VERBOSE
    pub verbose: Option<bool>,
    /// Disable color from API_SMOKE_NO_COLOR
    pub no_color: Option<bool>,
}

impl EnvConfig {
    /// Load configuration from environment variables
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any variable lookup, keyed by the full prefixed name
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(&format!("{ENV_PREFIX}_{name}"));
        Self {
            base_url: get("BASE_URL"),
            timeout: get("TIMEOUT").and_then(|v| v.parse().ok()),
            format: get("FORMAT"),
            config_file: get("CONFIG"),
            verbose: get("VERBOSE").map(|v| parse_bool(&v)),
            no_color: get("NO_COLOR").map(|v| parse_bool(&v)),
        }
    }

    /// Check if any environment variables are set
    pub fn has_any(&self) -> bool {
        self.base_url.is_some()
            || self.timeout.is_some()
            || self.format.is_some()
            || self.config_file.is_some()
            || self.verbose.is_some()
            || self.no_color.is_some()
    }

    /// Print current environment configuration
    pub fn print_summary(&self) {
        println!("Environment Configuration:");
        println!("  {}_BASE_URL:  {:?}", ENV_PREFIX, self.base_url);
        println!("  {}_TIMEOUT:   {:?}", ENV_PREFIX, self.timeout);
        println!("  {}_FORMAT:    {:?}", ENV_PREFIX, self.format);
        println!("  {}_CONFIG:    {:?}", ENV_PREFIX, self.config_file);
        println!("  {}_VERBOSE:   {:?}", ENV_PREFIX, self.verbose);
        println!("  {}_NO_COLOR:  {:?}", ENV_PREFIX, self.no_color);
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.to_lowercase().as_str(),
        "1" | "true" | "yes" | "on" | "enabled"
    )
}

/// Print all API_SMOKE environment variables
pub fn print_env_help() {
    println!("Environment Variables:");
    println!();
    println!("  {ENV_PREFIX}_BASE_URL    Backend base URL (default http://localhost:8001)");
    println!("  {ENV_PREFIX}_TIMEOUT     Request timeout in seconds");
    println!("  {ENV_PREFIX}_FORMAT      Report format (table, summary, json, json-pretty)");
    println!("  {ENV_PREFIX}_CONFIG      Path to configuration file");
    println!("  {ENV_PREFIX}_VERBOSE     Enable debug logging (true/false)");
    println!("  {ENV_PREFIX}_NO_COLOR    Disable colored output (true/false)");
    println!();
    println!("Example:");
    println!("  export {ENV_PREFIX}_BASE_URL=http://10.0.0.100:8001");
    println!("  api-smoke run");
}
