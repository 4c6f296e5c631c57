//! Logging utilities
//!
//! Provides logging configuration and helpers.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Log level configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
}

impl LogLevel {
    pub fn to_tracing_level(self) -> Level {
        match self {
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
        }
    }

    /// `--verbose` wins over `--quiet`
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        if verbose {
            LogLevel::Debug
        } else if quiet {
            LogLevel::Warn
        } else {
            LogLevel::Info
        }
    }
}

/// Initialize the logger with specified level.
///
/// Logs go to stderr so stdout carries only the report. `RUST_LOG` takes
/// precedence when it is set.
pub fn init_logger(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("api_smoke={}", level.to_tracing_level())));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_from_flags() {
        assert_eq!(LogLevel::from_flags(true, true), LogLevel::Debug);
        assert_eq!(LogLevel::from_flags(false, true), LogLevel::Warn);
        assert_eq!(LogLevel::from_flags(false, false), LogLevel::Info);
        assert_eq!(LogLevel::Warn.to_tracing_level(), Level::WARN);
    }
}
