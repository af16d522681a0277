//! Configuration constants.
//!
//! This module defines the constants used throughout the application,
//! including network defaults, the fixed document info block, and the
//! names of the built-in shared components.

/// Root of the public Mastodon documentation site.
pub const DEFAULT_BASE_URL: &str = "https://docs.joinmastodon.org";

/// Per-request timeout in seconds.
///
/// Documentation pages are static and small; 30s only matters on a very slow link.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default User-Agent string for HTTP requests.
///
/// Users can override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str = concat!("mastodon_openapi/", env!("CARGO_PKG_VERSION"));

// Generated document info
pub const OPENAPI_VERSION: &str = "3.1.0";
pub const API_TITLE: &str = "Mastodon OpenAPI API";
pub const API_VERSION: &str = "0.1.0";
pub const API_SUMMARY: &str = "The self-hosted Mastodon OpenAPI specifcation";
pub const API_DESCRIPTION: &str = "\
The official Mastodon API documentation is available at https://docs.joinmastodon.org/api/ but
it does not provide an OpenAPI specification. This document is generated from the website.
";
pub const API_LICENSE_NAME: &str = "MIT";
pub const API_LICENSE_IDENTIFIER: &str = "MIT";

// Media types
pub const MEDIA_TYPE_JSON: &str = "application/json";
pub const MEDIA_TYPE_EVENT_STREAM: &str = "text/event-stream";

// Built-in shared components
/// Generic catch-all schema for entities that cannot be structurally parsed.
pub const CATCH_ALL_SCHEMA: &str = "JSON";
/// Free-form key/value object, referenced by "Hash" types in the docs.
pub const HASH_SCHEMA: &str = "Hash";
/// Object without attributes, returned by methods that answer `{}`.
pub const EMPTY_SCHEMA: &str = "Empty";
pub const ERROR_SCHEMA: &str = "Error";
pub const STREAMING_SCHEMA: &str = "Streaming";

/// Name of the bearer-token security scheme registered in the components.
pub const BEARER_AUTH_SCHEME: &str = "BearerAuth";

/// Header parameter that is turned into a security requirement.
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Method group whose operations always answer with an event stream.
pub const STREAMING_TAG: &str = "streaming";

/// Entity names whose documentation does not follow the attributes-list
/// pattern. They are redirected to [`CATCH_ALL_SCHEMA`].
pub const UNSUPPORTED_ENTITIES: &[&str] = &[
    "GroupedNotificationsResults",
    "PartialAccountWithAvatar",
    "NotificationGroup",
];

/// Status code the declared success response is attached to.
pub const SUCCESS_STATUS: u16 = 200;
