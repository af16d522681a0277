//! Flattens a documentation page into an ordered sequence of blocks.
//!
//! The site renders Markdown, so the structure that matters (headings,
//! paragraphs, definition lists, HTTP request lines) sits at shallow and
//! inconsistent depths inside the content body. Walking it once into a flat
//! list lets every extractor reason about "what comes after what" with plain
//! slice indices.

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

use crate::config::{
    CONTENT_SELECTOR_STR, DEPRECATED_MARKER_CLASS, HTTP_CODE_CLASS, REMOVED_MARKER_CLASS,
    REQUIRED_MARKER_CLASS,
};
use crate::utils::{collapse_whitespace, element_text, has_class, parse_selector_unsafe};

static CONTENT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe(CONTENT_SELECTOR_STR, "CONTENT_SELECTOR"));

const MARKER_CLASSES: &[&str] = &[
    REQUIRED_MARKER_CLASS,
    REMOVED_MARKER_CLASS,
    DEPRECATED_MARKER_CLASS,
];

#[derive(Debug, Clone)]
pub struct Heading<'a> {
    pub level: u8,
    pub id: Option<String>,
    /// Heading text without inline marker badges.
    pub text: String,
    pub element: ElementRef<'a>,
}

impl Heading<'_> {
    /// Whether the heading carries a marker badge (`removed`, `deprecated`).
    pub fn has_marker(&self, class: &str) -> bool {
        self.element
            .descendants()
            .filter_map(ElementRef::wrap)
            .any(|e| e.value().name() == "span" && has_class(e, class))
    }
}

#[derive(Debug, Clone)]
pub enum Block<'a> {
    Heading(Heading<'a>),
    /// Text of an HTTP request-line code block.
    Http(String),
    Paragraph(ElementRef<'a>),
    DefinitionList(ElementRef<'a>),
}

impl<'a> Block<'a> {
    pub fn as_heading(&self) -> Option<&Heading<'a>> {
        match self {
            Block::Heading(h) => Some(h),
            _ => None,
        }
    }
}

/// Flattens the content body of a page.
///
/// Returns `None` when the page has no content body.
pub fn content_blocks(document: &Html) -> Option<Vec<Block<'_>>> {
    let content = document.select(&CONTENT_SELECTOR).next()?;
    let mut blocks = Vec::new();
    collect_blocks(content, &mut blocks);
    log::trace!("flattened content body into {} blocks", blocks.len());
    Some(blocks)
}

fn collect_blocks<'a>(parent: ElementRef<'a>, out: &mut Vec<Block<'a>>) {
    for child in parent.children().filter_map(ElementRef::wrap) {
        let name = child.value().name();
        if let Some(level) = heading_level(name) {
            out.push(Block::Heading(Heading {
                level,
                id: child.value().id().map(str::to_string),
                text: text_without_markers(child),
                element: child,
            }));
            continue;
        }

        match name {
            "p" => out.push(Block::Paragraph(child)),
            "dl" => out.push(Block::DefinitionList(child)),
            "code" if has_class(child, HTTP_CODE_CLASS) => {
                out.push(Block::Http(element_text(child)))
            }
            _ => collect_blocks(child, out),
        }
    }
}

fn heading_level(name: &str) -> Option<u8> {
    name.strip_prefix('h')
        .and_then(|level| level.parse::<u8>().ok())
        .filter(|level| (1..=6).contains(level))
}

/// Index one past the last block of the section opened by the heading at
/// `start`: the next heading at the same or a higher level, or the end.
pub fn section_end(blocks: &[Block<'_>], start: usize, level: u8) -> usize {
    blocks
        .iter()
        .enumerate()
        .skip(start + 1)
        .find(|(_, block)| matches!(block, Block::Heading(h) if h.level <= level))
        .map(|(i, _)| i)
        .unwrap_or(blocks.len())
}

/// Finds the heading whose id is `id`.
pub fn find_heading<'b, 'a>(blocks: &'b [Block<'a>], id: &str) -> Option<(usize, &'b Heading<'a>)> {
    blocks
        .iter()
        .enumerate()
        .find_map(|(i, block)| match block {
            Block::Heading(h) if h.id.as_deref() == Some(id) => Some((i, h)),
            _ => None,
        })
}

/// Text content of an element, leaving out marker badges
/// (`required`, `removed`, `deprecated`).
pub fn text_without_markers(element: ElementRef<'_>) -> String {
    let mut text = String::new();
    for node in element.descendants() {
        let Some(fragment) = node.value().as_text() else {
            continue;
        };
        let inside_marker = node
            .ancestors()
            .take_while(|ancestor| ancestor.id() != element.id())
            .filter_map(ElementRef::wrap)
            .any(is_marker);
        if !inside_marker {
            text.push_str(fragment);
        }
    }
    collapse_whitespace(&text)
}

/// Whether an element is an inline marker badge.
pub fn is_marker(element: ElementRef<'_>) -> bool {
    element.value().name() == "span" && MARKER_CLASSES.iter().any(|c| has_class(element, c))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r##"<html><body>
        <div class="e-content">
          <h2 id="get" class="heading">View information <span class="api-method-parameter-deprecated">deprecated</span><a class="heading-link" href="#get"></a></h2>
          <div class="highlight"><pre><code class="language-http" data-lang="http">GET /api/v1/instance HTTP/1.1</code></pre></div>
          <p>Obtain general information.</p>
          <h4 id="request">Request</h4>
          <dl><dt>limit</dt><dd>Integer.</dd></dl>
          <div class="alert"><p>Nested note.</p></div>
          <h2 id="next" class="heading">Next</h2>
        </div>
    </body></html>"##;

    #[test]
    fn test_content_blocks_flattens_in_document_order() {
        let document = Html::parse_document(PAGE);
        let blocks = content_blocks(&document).unwrap();
        let kinds: Vec<&str> = blocks
            .iter()
            .map(|b| match b {
                Block::Heading(_) => "h",
                Block::Http(_) => "http",
                Block::Paragraph(_) => "p",
                Block::DefinitionList(_) => "dl",
            })
            .collect();
        assert_eq!(kinds, vec!["h", "http", "p", "h", "dl", "p", "h"]);
        assert!(matches!(&blocks[1], Block::Http(line) if line == "GET /api/v1/instance HTTP/1.1"));
    }

    #[test]
    fn test_heading_text_drops_markers() {
        let document = Html::parse_document(PAGE);
        let blocks = content_blocks(&document).unwrap();
        let heading = blocks[0].as_heading().unwrap();
        assert_eq!(heading.text, "View information");
        assert_eq!(heading.id.as_deref(), Some("get"));
        assert!(heading.has_marker(DEPRECATED_MARKER_CLASS));
        assert!(!heading.has_marker(REMOVED_MARKER_CLASS));
    }

    #[test]
    fn test_section_end_stops_at_same_level() {
        let document = Html::parse_document(PAGE);
        let blocks = content_blocks(&document).unwrap();
        assert_eq!(section_end(&blocks, 0, 2), 6);
        assert_eq!(section_end(&blocks, 3, 4), 6);
        assert_eq!(section_end(&blocks, 6, 2), 7);
    }

    #[test]
    fn test_missing_content_body() {
        let document = Html::parse_document("<html><body><p>nothing</p></body></html>");
        assert!(content_blocks(&document).is_none());
    }

    #[test]
    fn test_find_heading_by_id() {
        let document = Html::parse_document(PAGE);
        let blocks = content_blocks(&document).unwrap();
        let (index, heading) = find_heading(&blocks, "request").unwrap();
        assert_eq!(index, 3);
        assert_eq!(heading.level, 4);
        assert!(find_heading(&blocks, "missing").is_none());
    }
}
