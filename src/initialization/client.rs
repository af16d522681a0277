//! HTTP client initialization.
//!
//! This module provides the function to initialize the HTTP client used to
//! fetch documentation pages.

use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::Config;

/// Initializes the HTTP client with settings from the configuration.
///
/// Creates a `reqwest::Client` configured with:
/// - User-Agent header from the config
/// - Timeout from the config
/// - Redirect following enabled (reqwest default, up to 10 hops)
/// - Rustls TLS backend (no native TLS)
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(config: &Config) -> Result<reqwest::Client, reqwest::Error> {
    ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(config.user_agent.clone())
        .build()
}
