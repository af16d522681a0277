//! Page fetching.
//!
//! Pages are fetched one at a time and parsed before the next request; there
//! is no retry policy, a transport failure aborts the run.

use log::debug;
use reqwest::Url;

use crate::error_handling::{FetchError, GenerateError};

/// Fetches a page and returns its body.
///
/// # Errors
///
/// - `FetchError::Request` if the request cannot be sent or the body cannot be read
/// - `FetchError::Status` for any non-2xx answer
pub async fn fetch_html(client: &reqwest::Client, url: &str) -> Result<String, FetchError> {
    debug!("GET {}", url);
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().await.map_err(|source| FetchError::Request {
        url: url.to_string(),
        source,
    })?;
    debug!("{} answered {} ({} bytes)", url, status, body.len());
    Ok(body)
}

/// Resolves a site-relative link against the documentation root.
///
/// # Errors
///
/// Returns `GenerateError::InvalidLink` when either side is not a valid URL.
pub fn resolve_link(base_url: &str, href: &str) -> Result<String, GenerateError> {
    let invalid = |source| GenerateError::InvalidLink {
        href: href.to_string(),
        source,
    };
    let base = Url::parse(base_url).map_err(invalid)?;
    Ok(base.join(href).map_err(invalid)?.to_string())
}
