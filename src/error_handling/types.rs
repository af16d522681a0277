//! Error type definitions.
//!
//! This module defines all error, warning, and info types used throughout the application.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

use crate::config::ConfigError;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// A documentation marker appeared in an order or shape the extractors do not recognize.
///
/// Every variant carries the text that could not be parsed so the failing
/// page section can be located without a debugger.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A bold marker other than `Description:`, `Type:` or `Version history:`.
    #[error("unknown tag '{tag}' in {context}")]
    UnknownTag { tag: String, context: String },

    /// A method section without a `Returns:` paragraph.
    #[error("no 'Returns:' block found for {method}")]
    MissingReturns { method: String },

    /// An entity page without a table of contents.
    #[error("no table of contents found")]
    MissingTableOfContents,

    /// An attributes heading that is neither `Attributes` nor `<Name> attributes`.
    #[error("cannot parse entity name from heading '{heading}'")]
    UnparseableHeading { heading: String },

    /// Type prose that matches no generic or irregular rule.
    #[error("cannot resolve a schema from '{text}'")]
    UnresolvableType { text: String },

    /// An attribute block without a `Type:` marker.
    #[error("attribute '{attribute}' has no 'Type:' marker")]
    MissingAttributeType { attribute: String },

    /// A table-of-contents anchor that points at no heading.
    #[error("no heading with id '{anchor}'")]
    MissingSection { anchor: String },

    /// An HTTP request line with no heading before it.
    #[error("no section heading found for '{request}'")]
    MissingMethodHeading { request: String },
}

/// Error types for fetching documentation pages.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request could not be sent or the body could not be read.
    #[error("failed to fetch {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: ReqwestError,
    },

    /// The server answered with a non-2xx status.
    #[error("failed to fetch {url}: HTTP {status}")]
    Status { url: String, status: u16 },
}

/// Errors that abort a document generation run.
#[derive(Error, Debug)]
pub enum GenerateError {
    /// The configuration was rejected before any work started.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A shared resource could not be initialized.
    #[error(transparent)]
    Initialization(#[from] InitializationError),

    /// A page could not be fetched.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A page was fetched but one of its sections could not be parsed.
    #[error("failed to parse {url}: {source}")]
    Page {
        url: String,
        #[source]
        source: ParseError,
    },

    /// A link on the index page could not be resolved against the base URL.
    #[error("invalid link '{href}': {source}")]
    InvalidLink {
        href: String,
        #[source]
        source: url::ParseError,
    },

    /// The document could not be rendered as YAML.
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The document could not be rendered as JSON.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Soft degradations.
///
/// Each one substitutes a documented generic shape for something the
/// documentation did not express in a parseable way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum WarningType {
    /// Entity redirected to the catch-all schema
    UnsupportedEntity,
    /// Parameter type prose not a primitive, typed `string`
    DefaultedParameterType,
    /// Two attributes in one section share a name; the later one wins
    DuplicateAttribute,
    /// Reference to a name that was never registered, pointed at the catch-all
    DanglingReference,
    /// HTTP block whose request line could not be parsed
    LostMethod,
    /// Page without a content body
    MissingContent,
}

/// Informational metrics: notable events that aren't errors or warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InfoType {
    /// Method section marked removed, dropped
    RemovedMethod,
    /// Method section marked deprecated, kept and flagged
    DeprecatedMethod,
    /// Attribute marked removed, dropped
    RemovedAttribute,
    /// Authorization header turned into a security requirement
    SecurityRequirement,
}
