//! Error handling and extraction statistics.
//!
//! This module provides:
//! - Error type definitions for each failure class of a run
//! - Extraction statistics tracking (warnings and info metrics)
//!
//! Failures are categorized into:
//! - **Transport failures** (`FetchError`): fatal, abort the run
//! - **Structural mismatches** (`ParseError`): fatal, name the offending text
//! - **Soft degradations** (`WarningType`): logged, counted, never raised
//! - **Skippable content** (`InfoType`): logged, counted, contributes nothing

mod stats;
mod types;

// Re-export public API
pub use stats::ExtractionStats;
pub use types::{
    FetchError, GenerateError, InfoType, InitializationError, ParseError, WarningType,
};
