//! mastodon_openapi library: OpenAPI 3.1 from the Mastodon documentation site
//!
//! The Mastodon API reference is published as HTML with no machine-readable
//! schema. This library fetches the documentation index, walks every method
//! and entity page it links to, and extracts:
//!
//! - one operation per documented HTTP method, with parameters, the success
//!   response parsed from the `Returns:` prose and the declared error statuses
//! - one named object schema per entity attributes section
//!
//! and assembles them into a referentially valid OpenAPI document.
//!
//! # Example
//!
//! ```no_run
//! use mastodon_openapi::{generate_document, render_document, Config, OutputFormat};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let report = generate_document(&config).await?;
//! println!("{}", render_document(&report.document, OutputFormat::Yaml)?);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Pages are fetched strictly one
//! after another.

pub mod config;
pub mod error_handling;
pub mod export;
pub mod extract;
mod fetch;
pub mod initialization;
pub mod openapi;
mod utils;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel, Opt, OutputFormat};
pub use error_handling::{ExtractionStats, GenerateError, ParseError};
pub use export::{render_document, write_document};
pub use run::{generate_document, GenerationReport};

// Internal run module (contains the page traversal)
mod run {
    use log::info;
    use std::time::Instant;

    use crate::config::{Config, ENTITIES_LINK_PREFIX, METHODS_LINK_PREFIX};
    use crate::error_handling::{ExtractionStats, GenerateError, InitializationError};
    use crate::extract::{
        discover_links, extract_components, extract_paths, ComponentRegistry,
    };
    use crate::fetch::{fetch_html, resolve_link};
    use crate::initialization::init_client;
    use crate::openapi::{Info, OpenApi, Paths};

    /// Results of a generation run.
    #[derive(Debug)]
    pub struct GenerationReport {
        /// The assembled document
        pub document: OpenApi,
        /// Number of URL templates
        pub path_count: usize,
        /// Number of operations across all paths
        pub operation_count: usize,
        /// Number of named schemas, built-ins included
        pub schema_count: usize,
        /// Soft degradations and skipped content seen during the run
        pub stats: ExtractionStats,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    /// Generates the OpenAPI document for the documentation site at
    /// `config.base_url`.
    ///
    /// The index page is fetched first; every method-group page it links to
    /// is extracted into the paths map, then every entity page into the
    /// component registry. After linking, references that name no registered
    /// schema are pointed at the catch-all schema.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The configuration is invalid
    /// - The HTTP client cannot be built
    /// - Any page cannot be fetched (non-2xx included)
    /// - Any page section cannot be parsed; the error names the page URL
    ///
    /// There is no partial output: a run either completes or fails.
    pub async fn generate_document(config: &Config) -> Result<GenerationReport, GenerateError> {
        config.validate()?;
        let client = init_client(config).map_err(InitializationError::from)?;
        let start_time = Instant::now();

        info!("starting to generate OpenAPI document from {}", config.base_url);
        let index = fetch_html(&client, &config.base_url).await?;
        let method_links = discover_links(&index, METHODS_LINK_PREFIX);
        let entity_links = discover_links(&index, ENTITIES_LINK_PREFIX);
        info!(
            "found {} method pages and {} entity pages",
            method_links.len(),
            entity_links.len()
        );

        let stats = ExtractionStats::new();

        let mut paths = Paths::new();
        for link in &method_links {
            let url = resolve_link(&config.base_url, &link.href)?;
            info!("handle API method tag={} link={}", link.label, url);
            let html = fetch_html(&client, &url).await?;
            extract_paths(&link.label, &url, &html, &mut paths, &stats)
                .map_err(|source| GenerateError::Page { url, source })?;
        }

        let mut registry = ComponentRegistry::new();
        for link in &entity_links {
            let url = resolve_link(&config.base_url, &link.href)?;
            info!("handle entity {} link={}", link.label, url);
            let html = fetch_html(&client, &url).await?;
            let entities = extract_components(&url, &html, &stats)
                .map_err(|source| GenerateError::Page { url, source })?;
            registry.extend(entities);
        }

        let mut linked = registry.link();
        let dangling = linked.resolve_references(&mut paths, &stats);
        if dangling > 0 {
            log::warn!("{} references named no registered schema", dangling);
        }
        let schema_count = linked.schema_count();
        let document = OpenApi::new(Info::mastodon(), paths, linked.into_components());

        let elapsed_seconds = start_time.elapsed().as_secs_f64();
        stats.log_summary();
        info!(
            "generated {} paths, {} operations and {} schemas in {:.1}s",
            document.paths.len(),
            document.operation_count(),
            schema_count,
            elapsed_seconds
        );

        Ok(GenerationReport {
            path_count: document.paths.len(),
            operation_count: document.operation_count(),
            schema_count,
            stats,
            elapsed_seconds,
            document,
        })
    }
}
