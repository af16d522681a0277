//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use thiserror::Error;

use crate::config::constants::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Serialization format of the generated document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// YAML (default)
    Yaml,
    /// Pretty-printed JSON
    Json,
}

/// Command-line options.
///
/// # Examples
///
/// ```bash
/// # Print the document for the public docs to stdout
/// mastodon_openapi
///
/// # Use a local mirror and write JSON to a file
/// mastodon_openapi http://localhost:1313 --format json -o openapi.json
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "mastodon_openapi",
    about = "Generates an OpenAPI specification from the Mastodon API documentation."
)]
pub struct Opt {
    /// The base url of the Mastodon API documentation
    #[arg(default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// The output file to write the OpenAPI document to (stdout if omitted)
    #[arg(short, long, value_parser)]
    pub output: Option<PathBuf>,

    /// Output format: yaml|json
    #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
}

/// Library configuration (no CLI dependencies).
///
/// This is the core configuration struct used by the library. It can be
/// constructed programmatically without any CLI dependencies.
///
/// # Examples
///
/// ```no_run
/// use mastodon_openapi::Config;
///
/// let config = Config {
///     base_url: "http://localhost:1313".to_string(),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the documentation site
    pub base_url: String,

    /// Output file (stdout when `None`)
    pub output: Option<PathBuf>,

    /// Output format
    pub format: OutputFormat,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            output: None,
            format: OutputFormat::Yaml,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl From<Opt> for Config {
    fn from(opt: Opt) -> Self {
        Self {
            base_url: opt.base_url,
            output: opt.output,
            format: opt.format,
            log_level: opt.log_level,
            log_format: opt.log_format,
            timeout_seconds: opt.timeout_seconds,
            user_agent: opt.user_agent,
        }
    }
}

/// A configuration value that cannot be used, with the field it belongs to.
#[derive(Error, Debug)]
#[error("invalid {field}: {message}")]
pub struct ConfigError {
    /// Name of the offending field
    pub field: &'static str,
    /// Actionable description of the problem
    pub message: String,
}

impl Config {
    /// Checks the configuration before any network access happens.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` naming the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError {
                field: "base_url",
                message: "must not be empty (e.g. https://docs.joinmastodon.org)".to_string(),
            });
        }

        match url::Url::parse(self.base_url.trim()) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            Ok(parsed) => {
                return Err(ConfigError {
                    field: "base_url",
                    message: format!(
                        "unsupported scheme '{}', expected http or https",
                        parsed.scheme()
                    ),
                });
            }
            Err(e) => {
                return Err(ConfigError {
                    field: "base_url",
                    message: format!("'{}' is not a valid URL: {}", self.base_url, e),
                });
            }
        }

        if self.timeout_seconds == 0 {
            return Err(ConfigError {
                field: "timeout_seconds",
                message: "must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.base_url, "https://docs.joinmastodon.org");
        assert_eq!(config.timeout_seconds, 30);
        assert_eq!(config.format, OutputFormat::Yaml);
        assert!(config.output.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_opt_defaults() {
        let opt = Opt::try_parse_from(["mastodon_openapi"]).unwrap();
        let config = Config::from(opt);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_validate_rejects_empty_base_url() {
        let config = Config {
            base_url: "  ".to_string(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.field, "base_url");
    }

    #[test]
    fn test_validate_rejects_unsupported_scheme() {
        let config = Config {
            base_url: "ftp://docs.example.org".to_string(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.field, "base_url");
        assert!(err.message.contains("ftp"));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = Config {
            timeout_seconds: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.field, "timeout_seconds");
        assert!(err.message.contains("greater than 0"));
    }
}
