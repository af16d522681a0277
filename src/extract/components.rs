//! Entity page → named object schemas.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeMap;
use std::sync::LazyLock;

use super::attributes::scan_attribute;
use super::blocks::{
    content_blocks, find_heading, section_end, text_without_markers, Block, Heading,
};
use super::canonical::canonicalize;
use crate::config::{
    ATTRIBUTES_LABEL, ATTRIBUTES_SUFFIX, CATCH_ALL_SCHEMA, LINK_SELECTOR_STR,
    PAGE_TITLE_SELECTOR_STR, REMOVED_MARKER_CLASS, TOC_SELECTOR_STR,
};
use crate::error_handling::{ExtractionStats, InfoType, ParseError, WarningType};
use crate::openapi::{Response, Schema, SchemaOrRef};
use crate::utils::{compile_regex_unsafe, element_text, parse_selector_unsafe};

const SECTION_NAME_PATTERN: &str = r"^([\w:]+)(?: entity)? [Aa]ttributes$";

static SECTION_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(SECTION_NAME_PATTERN, "SECTION_NAME_RE"));
static TOC_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe(TOC_SELECTOR_STR, "TOC_SELECTOR"));
static LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe(LINK_SELECTOR_STR, "LINK_SELECTOR"));
static PAGE_TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe(PAGE_TITLE_SELECTOR_STR, "PAGE_TITLE_SELECTOR"));

/// Table-of-contents entry of an attributes section.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SectionEntry {
    label: String,
    anchor: String,
}

fn is_attributes_label(label: &str) -> bool {
    label == ATTRIBUTES_LABEL || label.to_lowercase().ends_with(ATTRIBUTES_SUFFIX)
}

/// Builds one named object schema per attributes section of an entity page.
///
/// Every schema is wrapped in a JSON response named after the entity; the
/// linker later moves it into the schema registry.
///
/// A page without a content body contributes nothing.
///
/// # Errors
///
/// - `ParseError::MissingTableOfContents` when the page has content but no table of contents
/// - `ParseError::MissingSection` when a table-of-contents anchor names no heading
/// - `ParseError::UnparseableHeading` for a section heading that names no entity
/// - any attribute-level error from [`scan_attribute`]
pub fn extract_components(
    link: &str,
    html: &str,
    stats: &ExtractionStats,
) -> Result<BTreeMap<String, Response>, ParseError> {
    let document = Html::parse_document(html);
    let mut entities = BTreeMap::new();

    let Some(blocks) = content_blocks(&document) else {
        log::warn!("no content found in {}", link);
        stats.increment_warning(WarningType::MissingContent);
        return Ok(entities);
    };

    let toc = document
        .select(&TOC_SELECTOR)
        .next()
        .ok_or(ParseError::MissingTableOfContents)?;
    let sections: Vec<SectionEntry> = toc
        .select(&LINK_SELECTOR)
        .filter_map(|a| {
            let anchor = a.value().attr("href")?.rsplit_once('#')?.1.to_string();
            Some(SectionEntry {
                label: element_text(a),
                anchor,
            })
        })
        .filter(|entry| is_attributes_label(&entry.label))
        .collect();

    let page_title = document
        .select(&PAGE_TITLE_SELECTOR)
        .next()
        .map(text_without_markers);

    // Nested sub-entity sections come after the main one; walk backwards so
    // the most specific sections are read first.
    for entry in sections.iter().rev() {
        let (index, heading) =
            find_heading(&blocks, &entry.anchor).ok_or_else(|| ParseError::MissingSection {
                anchor: entry.anchor.clone(),
            })?;
        let raw_name = section_name(heading, page_title.as_deref())?;
        let name = canonicalize(&raw_name);
        if name == CATCH_ALL_SCHEMA && raw_name != CATCH_ALL_SCHEMA {
            stats.increment_warning(WarningType::UnsupportedEntity);
            continue;
        }

        let end = section_end(&blocks, index, heading.level);
        let properties = extract_section(&blocks[index + 1..end], heading.level + 1, &name, stats)?;
        log::debug!(
            "entity {} from section '{}' with {} attributes",
            name,
            entry.label,
            properties.len()
        );
        entities.insert(name.clone(), Response::json(name, Schema::object(properties)));
    }

    log::info!("extracted {} entities from {}", entities.len(), link);
    Ok(entities)
}

/// Entity name of an attributes section: the page title for the top-level
/// `Attributes` heading, or `<Name>` from `<Name> [entity] attributes`.
fn section_name(heading: &Heading<'_>, page_title: Option<&str>) -> Result<String, ParseError> {
    let unparseable = || ParseError::UnparseableHeading {
        heading: heading.text.clone(),
    };

    if heading.text == ATTRIBUTES_LABEL {
        return page_title
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .ok_or_else(unparseable);
    }

    SECTION_NAME_RE
        .captures(&heading.text)
        .map(|c| c[1].to_string())
        .ok_or_else(unparseable)
}

/// Builds the properties of one section. Each heading one level below the
/// section heading opens an attribute; its paragraphs run to the next heading.
fn extract_section(
    region: &[Block<'_>],
    attribute_level: u8,
    entity: &str,
    stats: &ExtractionStats,
) -> Result<BTreeMap<String, SchemaOrRef>, ParseError> {
    let starts: Vec<usize> = region
        .iter()
        .enumerate()
        .filter(|(_, b)| b.as_heading().is_some_and(|h| h.level == attribute_level))
        .map(|(i, _)| i)
        .collect();

    let mut properties = BTreeMap::new();
    for (n, &start) in starts.iter().enumerate() {
        let Some(heading) = region[start].as_heading() else {
            continue;
        };
        let name = attribute_name(heading);
        if heading.has_marker(REMOVED_MARKER_CLASS) {
            log::debug!("skipping removed attribute {}.{}", entity, name);
            stats.increment_info(InfoType::RemovedAttribute);
            continue;
        }

        let end = starts.get(n + 1).copied().unwrap_or(region.len());
        let paragraphs: Vec<ElementRef<'_>> = region[start + 1..end]
            .iter()
            .take_while(|b| b.as_heading().is_none())
            .filter_map(|b| match b {
                Block::Paragraph(p) => Some(*p),
                _ => None,
            })
            .collect();

        let attribute = scan_attribute(&name, &paragraphs)?;
        if properties.insert(name.clone(), attribute.schema).is_some() {
            log::warn!(
                "duplicate attribute {}.{}, keeping the later definition",
                entity,
                name
            );
            stats.increment_warning(WarningType::DuplicateAttribute);
        }
    }
    Ok(properties)
}

/// Attribute name from its heading: the `code` text when present, backticks stripped.
fn attribute_name(heading: &Heading<'_>) -> String {
    let raw = heading
        .element
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().name() == "code")
        .map(element_text)
        .unwrap_or_else(|| heading.text.clone());
    raw.trim().trim_matches('`').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openapi::DataType;

    const ACCOUNT_PAGE: &str = r##"<html><body>
      <nav id="TableOfContents"><ul>
        <li><a href="#attributes">Attributes</a><ul>
          <li><a href="#id"><code>id</code></a></li></ul></li>
        <li><a href="#CredentialAccount">CredentialAccount entity attributes</a></li>
        <li><a href="#Field">Field entity attributes</a></li>
        <li><a href="#see-also">See also</a></li>
      </ul></nav>
      <div class="e-content">
        <h1>Account</h1>
        <h2 id="attributes">Attributes</h2>
        <h3 id="id"><code>id</code></h3>
        <p><strong>Description:</strong> The account id.<br>
           <strong>Type:</strong> String (cast from an integer)</p>
        <h3 id="fields"><code>fields</code></h3>
        <p><strong>Description:</strong> Profile metadata.<br>
           <strong>Type:</strong> Array of <a href="/entities/Account/#Field">Field</a></p>
        <h3 id="moved"><code>moved</code> <span class="api-method-parameter-removed">removed</span></h3>
        <p><strong>Description:</strong> Gone.<br><strong>Type:</strong> Boolean</p>
        <h2 id="CredentialAccount">CredentialAccount entity attributes</h2>
        <h3 id="source"><code>source</code></h3>
        <p><strong>Description:</strong> Source values.<br>
           <strong>Type:</strong> Hash</p>
        <h2 id="Field">Field entity attributes</h2>
        <h3 id="name"><code>name</code></h3>
        <p><strong>Description:</strong> The key.<br><strong>Type:</strong> String</p>
        <h3 id="verified_at"><code>verified_at</code></h3>
        <p><strong>Description:</strong> Verified.<br>
           <strong>Type:</strong> <span class="api-method-parameter-required">nullable</span> String</p>
        <h2 id="see-also">See also</h2>
        <p>Nothing here.</p>
      </div>
    </body></html>"##;

    fn properties<'a>(entities: &'a BTreeMap<String, Response>, name: &str) -> Vec<&'a str> {
        entities[name].content["application/json"]
            .schema
            .as_schema()
            .and_then(|s| s.properties.as_ref())
            .map(|p| p.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_sections_do_not_bleed() {
        let stats = ExtractionStats::new();
        let link = "https://docs.joinmastodon.org/entities/Account/";
        let entities = extract_components(link, ACCOUNT_PAGE, &stats).unwrap();

        assert_eq!(
            entities.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["Account", "CredentialAccount", "Field"]
        );
        assert_eq!(properties(&entities, "Account"), vec!["fields", "id"]);
        assert_eq!(properties(&entities, "CredentialAccount"), vec!["source"]);
        assert_eq!(properties(&entities, "Field"), vec!["name", "verified_at"]);
        assert_eq!(stats.get_info_count(InfoType::RemovedAttribute), 1);
    }

    #[test]
    fn test_nullable_field_type() {
        let stats = ExtractionStats::new();
        let entities = extract_components("Field", ACCOUNT_PAGE, &stats).unwrap();
        let field = entities["Field"].content["application/json"]
            .schema
            .as_schema()
            .unwrap();
        let verified_at = field.properties.as_ref().unwrap()["verified_at"]
            .as_schema()
            .unwrap();
        assert_eq!(verified_at.data_type(), Some(DataType::String));
        assert!(verified_at.schema_type.unwrap().is_nullable());
    }

    #[test]
    fn test_missing_content_is_skipped() {
        let stats = ExtractionStats::new();
        let entities = extract_components("x", "<html><body><h1>Empty</h1></body></html>", &stats)
            .unwrap();
        assert!(entities.is_empty());
        assert_eq!(stats.get_warning_count(WarningType::MissingContent), 1);
    }

    #[test]
    fn test_missing_table_of_contents_fails() {
        let stats = ExtractionStats::new();
        let html = r#"<div class="e-content"><h1>Account</h1><h2 id="attributes">Attributes</h2></div>"#;
        assert_eq!(
            extract_components("x", html, &stats).unwrap_err(),
            ParseError::MissingTableOfContents
        );
    }

    #[test]
    fn test_unparseable_heading_fails() {
        let stats = ExtractionStats::new();
        let html = r##"<nav id="TableOfContents"><a href="#odd">Some odd attributes here attributes</a></nav>
            <div class="e-content"><h2 id="odd">Some odd attributes here attributes</h2></div>"##;
        assert!(matches!(
            extract_components("x", html, &stats).unwrap_err(),
            ParseError::UnparseableHeading { .. }
        ));
    }

    #[test]
    fn test_unsupported_entity_is_skipped() {
        let stats = ExtractionStats::new();
        let html = r##"<nav id="TableOfContents"><a href="#attributes">Attributes</a></nav>
            <div class="e-content"><h1>NotificationGroup</h1>
            <h2 id="attributes">Attributes</h2>
            <h3 id="x"><code>x</code></h3>
            <p><strong>Description:</strong> x<br><strong>Type:</strong> String</p></div>"##;
        let entities = extract_components("x", html, &stats).unwrap();
        assert!(entities.is_empty());
        assert_eq!(stats.get_warning_count(WarningType::UnsupportedEntity), 1);
    }

    #[test]
    fn test_duplicate_attribute_last_wins() {
        let stats = ExtractionStats::new();
        let html = r##"<nav id="TableOfContents"><a href="#attributes">Attributes</a></nav>
            <div class="e-content"><h1>Tag</h1>
            <h2 id="attributes">Attributes</h2>
            <h3 id="name"><code>name</code></h3>
            <p><strong>Description:</strong> first<br><strong>Type:</strong> String</p>
            <h3 id="name-1"><code>name</code></h3>
            <p><strong>Description:</strong> second<br><strong>Type:</strong> Integer</p></div>"##;
        let entities = extract_components("x", html, &stats).unwrap();
        let tag = entities["Tag"].content["application/json"].schema.as_schema().unwrap();
        let name = tag.properties.as_ref().unwrap()["name"].as_schema().unwrap();
        assert_eq!(name.data_type(), Some(DataType::Integer));
        assert_eq!(stats.get_warning_count(WarningType::DuplicateAttribute), 1);
    }
}
