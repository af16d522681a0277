//! Attribute and parameter extraction.
//!
//! Entity attributes are documented as a heading followed by paragraphs of
//! bold markers:
//!
//! ```text
//! <h3 id="display_name"><code>display_name</code></h3>
//! <p><strong>Description:</strong> The profile's display name.<br>
//!    <strong>Type:</strong> String<br>
//!    <strong>Version history:</strong><br>0.1.0 - added</p>
//! ```
//!
//! Operation parameters are `dt`/`dd` pairs in the definition list following
//! a `query`/`header`/`path`/`cookie` heading.

use scraper::node::Node;
use scraper::ElementRef;

use super::blocks::{is_marker, text_without_markers, Block};
use super::types::resolve_type;
use crate::config::REQUIRED_MARKER_CLASS;
use crate::error_handling::{ExtractionStats, ParseError, WarningType};
use crate::openapi::{DataType, Parameter, ParameterLocation, Schema, SchemaOrRef};
use crate::utils::{collapse_whitespace, element_text, has_class};

/// Bold labels that open a run of attribute prose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Description,
    Type,
    VersionHistory,
}

impl Marker {
    /// Maps a bold label to a marker.
    ///
    /// `Ok(None)` for bold text that is not a label (no trailing colon),
    /// which is inline emphasis and reads as prose.
    fn parse(label: &str, context: &str) -> Result<Option<Self>, ParseError> {
        let label = collapse_whitespace(label);
        match label.as_str() {
            "Description:" => Ok(Some(Marker::Description)),
            "Type:" => Ok(Some(Marker::Type)),
            "Version history:" => Ok(Some(Marker::VersionHistory)),
            other if other.ends_with(':') => Err(ParseError::UnknownTag {
                tag: other.to_string(),
                context: context.to_string(),
            }),
            _ => Ok(None),
        }
    }
}

/// One inline piece of an attribute paragraph, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Label(String),
    Text(String),
    /// Hyperlink text, which names a referenced entity after `Type:`.
    Link(String),
    /// Text of a `required`-styled badge (`required`, `nullable`).
    Flag(String),
    Break,
}

fn collect_segments(parent: ElementRef<'_>, out: &mut Vec<Segment>) {
    for child in parent.children() {
        match child.value() {
            Node::Text(text) => out.push(Segment::Text(String::from(&**text))),
            Node::Element(_) => {
                let Some(element) = ElementRef::wrap(child) else {
                    continue;
                };
                match element.value().name() {
                    "strong" | "b" => out.push(Segment::Label(element_text(element))),
                    "a" => out.push(Segment::Link(element_text(element))),
                    "br" => out.push(Segment::Break),
                    "span" if has_class(element, REQUIRED_MARKER_CLASS) => {
                        out.push(Segment::Flag(element_text(element)))
                    }
                    _ => collect_segments(element, out),
                }
            }
            _ => {}
        }
    }
}

/// A documented entity field.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeBlock {
    pub name: String,
    pub description: Option<String>,
    pub schema: SchemaOrRef,
    /// Release notes for the field, one entry per line.
    pub version_history: Option<String>,
}

#[derive(Debug, Default)]
struct AttributeRecord {
    description: String,
    type_segments: Vec<Segment>,
    version_history: String,
    nullable: bool,
    typed: bool,
}

impl AttributeRecord {
    fn push(&mut self, marker: Marker, segment: Segment) {
        match (marker, segment) {
            (_, Segment::Flag(flag)) if flag.eq_ignore_ascii_case("nullable") => {
                self.nullable = true
            }
            (Marker::Type, segment) => self.type_segments.push(segment),
            (Marker::Description, Segment::Text(text) | Segment::Link(text)) => {
                self.description.push_str(&text)
            }
            (Marker::VersionHistory, Segment::Text(text) | Segment::Link(text)) => {
                self.version_history.push_str(&text)
            }
            (Marker::VersionHistory, Segment::Break) => self.version_history.push('\n'),
            (Marker::Description, Segment::Break) => self.description.push(' '),
            _ => {}
        }
    }
}

/// Scans the paragraphs documenting one attribute into a typed field.
///
/// # Errors
///
/// - `ParseError::UnknownTag` for a bold label other than the three markers
/// - `ParseError::MissingAttributeType` when no `Type:` marker is present
/// - `ParseError::UnresolvableType` when the type prose is empty
pub fn scan_attribute(
    name: &str,
    paragraphs: &[ElementRef<'_>],
) -> Result<AttributeBlock, ParseError> {
    let context = format!("attribute `{}`", name);
    let mut segments = Vec::new();
    for paragraph in paragraphs {
        collect_segments(*paragraph, &mut segments);
        segments.push(Segment::Break);
    }

    let mut record = AttributeRecord::default();
    let mut current: Option<Marker> = None;
    for segment in segments {
        match segment {
            Segment::Label(label) => match Marker::parse(&label, &context)? {
                Some(marker) => {
                    record.typed |= marker == Marker::Type;
                    current = Some(marker);
                }
                None => {
                    if let Some(marker) = current {
                        record.push(marker, Segment::Text(label));
                    }
                }
            },
            segment => {
                if let Some(marker) = current {
                    record.push(marker, segment);
                }
            }
        }
    }

    if !record.typed {
        return Err(ParseError::MissingAttributeType {
            attribute: name.to_string(),
        });
    }

    let type_text = record
        .type_segments
        .iter()
        .filter_map(|s| match s {
            Segment::Text(t) => Some(t.as_str()),
            _ => None,
        })
        .collect::<String>();
    let nullable = record.nullable
        || type_text
            .split_whitespace()
            .any(|w| w.eq_ignore_ascii_case("nullable"))
        || collapse_whitespace(&type_text).contains("or null");

    let token = type_token(&record.type_segments).ok_or_else(|| {
        ParseError::MissingAttributeType {
            attribute: name.to_string(),
        }
    })?;

    let description = Some(collapse_whitespace(&record.description)).filter(|d| !d.is_empty());
    let schema = resolve_type(&token, description.as_deref(), nullable)?;
    let version_history = Some(
        record
            .version_history
            .lines()
            .map(collapse_whitespace)
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join("\n"),
    )
    .filter(|v| !v.is_empty());

    log::trace!(
        "attribute {} typed from {:?}, history {:?}",
        name,
        token,
        version_history
    );
    Ok(AttributeBlock {
        name: name.to_string(),
        description,
        schema,
        version_history,
    })
}

/// Picks the type token out of the prose following `Type:`.
///
/// A link names the type when nothing but `nullable` or `Array of` precedes
/// it; otherwise the first word of the text is the type, with `Array of X`
/// kept whole so the resolver can recurse.
fn type_token(segments: &[Segment]) -> Option<String> {
    let mut lead = String::new();
    for segment in segments {
        match segment {
            Segment::Text(text) => lead.push_str(text),
            Segment::Link(target) => {
                let words = significant_words(&lead);
                match words.as_slice() {
                    [] => return Some(collapse_whitespace(target)),
                    [collection, "of"] if is_collection(collection) => {
                        return Some(format!("Array of {}", collapse_whitespace(target)))
                    }
                    _ => break,
                }
            }
            Segment::Break => break,
            _ => {}
        }
    }

    match significant_words(&lead).as_slice() {
        [] => None,
        [collection, "of", item, ..] if is_collection(collection) => {
            Some(format!("Array of {}", bare_word(item)))
        }
        [first, ..] => Some(bare_word(first).to_string()).filter(|w| !w.is_empty()),
    }
}

fn significant_words(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .filter(|w| !w.eq_ignore_ascii_case("nullable"))
        .collect()
}

fn is_collection(word: &str) -> bool {
    matches!(word, "Array" | "List")
}

fn bare_word(word: &str) -> &str {
    word.trim_matches(|c: char| !c.is_alphanumeric() && c != '_')
}

/// Extracts the parameters documented for one location inside a method section.
///
/// The section heading whose id starts with the location name (`query-parameters`,
/// `header-parameters`, ...) is followed by a definition list of `dt` names
/// and `dd` descriptions. A location without such a heading yields nothing.
pub fn extract_parameters(
    region: &[Block<'_>],
    location: ParameterLocation,
    stats: &ExtractionStats,
) -> Vec<Parameter> {
    let Some(start) = region.iter().position(|block| {
        block
            .as_heading()
            .and_then(|h| h.id.as_deref())
            .is_some_and(|id| id.starts_with(location.as_str()))
    }) else {
        log::trace!("no {} parameters documented", location.as_str());
        return Vec::new();
    };

    let list = region[start + 1..]
        .iter()
        .take_while(|block| block.as_heading().is_none())
        .find_map(|block| match block {
            Block::DefinitionList(list) => Some(*list),
            _ => None,
        });
    let Some(list) = list else {
        log::debug!("{} parameter heading without a definition list", location.as_str());
        return Vec::new();
    };

    let mut parameters = Vec::new();
    let mut pending: Option<String> = None;
    for child in list.children().filter_map(ElementRef::wrap) {
        match child.value().name() {
            "dt" => pending = Some(text_without_markers(child)),
            "dd" => {
                if let Some(name) = pending.take() {
                    parameters.push(build_parameter(name, child, location, stats));
                }
            }
            _ => {}
        }
    }
    parameters
}

fn build_parameter(
    name: String,
    definition: ElementRef<'_>,
    location: ParameterLocation,
    stats: &ExtractionStats,
) -> Parameter {
    let required = definition
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|e| is_marker(*e) && has_class(*e, REQUIRED_MARKER_CLASS))
        .any(|e| element_text(e).eq_ignore_ascii_case("required"));
    let description = text_without_markers(definition);

    let data_type = match location {
        ParameterLocation::Header => DataType::String,
        _ => {
            let prose = definition
                .descendants()
                .filter_map(ElementRef::wrap)
                .find(|e| e.value().name() == "strong")
                .map(element_text)
                .unwrap_or_else(|| {
                    description
                        .split('.')
                        .next()
                        .unwrap_or_default()
                        .to_string()
                });
            let token = prose.split_whitespace().next().map(bare_word).unwrap_or_default();
            DataType::primitive(token).unwrap_or_else(|| {
                log::debug!(
                    "parameter {} typed string, prose {:?} is not a primitive",
                    name,
                    prose
                );
                stats.increment_warning(WarningType::DefaultedParameterType);
                DataType::String
            })
        }
    };

    Parameter {
        name,
        location,
        description: Some(description).filter(|d| !d.is_empty()),
        required: (required || location == ParameterLocation::Path).then_some(true),
        schema: Schema::primitive(data_type, false),
    }
}
