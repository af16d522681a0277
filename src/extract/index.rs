//! Link discovery on the documentation index.

use scraper::{Html, Selector};
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::config::LINK_SELECTOR_STR;
use crate::utils::{element_text, parse_selector_unsafe};

static LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe(LINK_SELECTOR_STR, "LINK_SELECTOR"));

/// A documentation page linked from the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocLink {
    /// Link text; names the method group for method pages.
    pub label: String,
    /// Site-relative target without fragment.
    pub href: String,
}

/// Collects every link whose target starts with `prefix`, in document order.
///
/// Targets are compared without their fragment, so a page linked several
/// times (sidebar and body, or per-section anchors) is listed once under its
/// first label. The bare prefix itself (the section landing page) is skipped.
pub fn discover_links(html: &str, prefix: &str) -> Vec<DocLink> {
    let document = Html::parse_document(html);
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for anchor in document.select(&LINK_SELECTOR) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let href = href.split('#').next().unwrap_or_default();
        if !href.starts_with(prefix) || href == prefix {
            continue;
        }
        if !seen.insert(href.to_string()) {
            continue;
        }
        links.push(DocLink {
            label: element_text(anchor),
            href: href.to_string(),
        });
    }

    log::debug!("discovered {} links under {}", links.len(), prefix);
    links
}
