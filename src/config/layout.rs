//! Documentation layout constants.
//!
//! The documentation site has no formal schema; these are the conventions the
//! extractors rely on. Changing the site theme means changing this file.

// Index document
/// Link prefix of a method-group page.
pub const METHODS_LINK_PREFIX: &str = "/methods/";
/// Link prefix of an entity page.
pub const ENTITIES_LINK_PREFIX: &str = "/entities/";

// Page structure
/// Main content body of every documentation page.
pub const CONTENT_SELECTOR_STR: &str = "div.e-content";
/// Table of contents generated by the site theme.
pub const TOC_SELECTOR_STR: &str = "nav#TableOfContents";
/// Any link carrying a target.
pub const LINK_SELECTOR_STR: &str = "a[href]";
/// Page title heading.
pub const PAGE_TITLE_SELECTOR_STR: &str = "h1";
/// Class of the code block holding the HTTP request line of a documented method.
pub const HTTP_CODE_CLASS: &str = "language-http";

// Inline markers
pub const REQUIRED_MARKER_CLASS: &str = "api-method-parameter-required";
pub const REMOVED_MARKER_CLASS: &str = "api-method-parameter-removed";
pub const DEPRECATED_MARKER_CLASS: &str = "api-method-parameter-deprecated";

/// Label of the top-level attributes section of an entity page.
pub const ATTRIBUTES_LABEL: &str = "Attributes";
/// Suffix of nested attribute section labels ("CredentialAccount attributes").
pub const ATTRIBUTES_SUFFIX: &str = "attributes";

/// Paragraph prefix carrying the success response prose of a method.
pub const RETURNS_MARKER: &str = "Returns:";
