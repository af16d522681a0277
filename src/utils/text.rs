//! Text helpers for prose extracted from HTML.

use scraper::ElementRef;

/// Collapses every whitespace run to a single space and trims the ends.
///
/// Rendered documentation wraps prose at arbitrary points; the wrapped
/// newlines carry no meaning.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Returns the whitespace-collapsed text content of an element.
pub fn element_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

/// Checks whether an element carries the given CSS class.
pub fn has_class(element: ElementRef<'_>, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}
