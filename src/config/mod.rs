//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, document info, fallback names)
//! - Documentation layout constants (CSS classes, marker labels)
//! - CLI option types and parsing

mod constants;
mod layout;
mod types;

// Re-export all constants
pub use constants::*;
pub use layout::*;
pub use types::{Config, ConfigError, LogFormat, LogLevel, Opt, OutputFormat};
