//! Method-group page → operations keyed by URL template and verb.

use regex::Regex;
use scraper::{ElementRef, Html};
use std::collections::BTreeMap;
use std::sync::LazyLock;
use strum::IntoEnumIterator;

use super::attributes::extract_parameters;
use super::blocks::{content_blocks, Block, Heading};
use super::canonical::canonicalize_path;
use super::irregular::lookup_endpoint;
use super::types::resolve_type;
use crate::config::{
    AUTHORIZATION_HEADER, BEARER_AUTH_SCHEME, DEPRECATED_MARKER_CLASS, ERROR_SCHEMA,
    MEDIA_TYPE_EVENT_STREAM, REMOVED_MARKER_CLASS, RETURNS_MARKER, STREAMING_SCHEMA,
    STREAMING_TAG, SUCCESS_STATUS,
};
use crate::error_handling::{ExtractionStats, InfoType, ParseError, WarningType};
use crate::openapi::{
    Operation, ParameterLocation, Paths, Reference, Response, SecurityRequirement,
};
use crate::utils::{compile_regex_unsafe, element_text};

const REQUEST_LINE_PATTERN: &str = r"(\w+) (/\S+)(?: HTTP/1\.1)?";
const RETURNS_PATTERN: &str = r"^Returns:\s*(.+?)\s*(?:OAuth:|Version(?: history)?:|$)";
const VERSION_HISTORY_PATTERN: &str = r"Version(?: history)?:\s*(.*)$";
const VERSION_ENTRY_PATTERN: &str = r"\d+\.\d+\.\d+ -";
const STATUS_HEADING_PATTERN: &str = r"(\d{3}): \w+";

static REQUEST_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(REQUEST_LINE_PATTERN, "REQUEST_LINE_RE"));
static RETURNS_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(RETURNS_PATTERN, "RETURNS_RE"));
static VERSION_HISTORY_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(VERSION_HISTORY_PATTERN, "VERSION_HISTORY_RE"));
static VERSION_ENTRY_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(VERSION_ENTRY_PATTERN, "VERSION_ENTRY_RE"));
static STATUS_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(STATUS_HEADING_PATTERN, "STATUS_HEADING_RE"));

const STREAMING_DESCRIPTION: &str = "The streaming response.";

/// Splits an HTTP request line into verb and raw path.
pub fn parse_request_line(line: &str) -> Option<(&str, &str)> {
    let captures = REQUEST_LINE_RE.captures(line)?;
    Some((captures.get(1)?.as_str(), captures.get(2)?.as_str()))
}

/// Extracts every documented method of a method-group page into `paths`.
///
/// `tag` names the method group and becomes each operation's tag. Operations
/// sharing a URL template merge into the same path item. Returns the number of
/// operations added.
///
/// # Errors
///
/// - `ParseError::MissingMethodHeading` for a request line with no section heading before it
/// - `ParseError::MissingReturns` for a method section without a `Returns:` paragraph
/// - `ParseError::UnresolvableType` when the `Returns:` prose is empty
pub fn extract_paths(
    tag: &str,
    link: &str,
    html: &str,
    paths: &mut Paths,
    stats: &ExtractionStats,
) -> Result<usize, ParseError> {
    let document = Html::parse_document(html);
    let Some(blocks) = content_blocks(&document) else {
        log::warn!("no content found in {}", link);
        stats.increment_warning(WarningType::MissingContent);
        return Ok(0);
    };

    let mut added = 0;
    for (index, block) in blocks.iter().enumerate() {
        let Block::Http(request) = block else {
            continue;
        };
        let Some((verb, raw_path)) = parse_request_line(request) else {
            log::warn!("no method found in {:?}", request);
            stats.increment_warning(WarningType::LostMethod);
            continue;
        };
        let path = canonicalize_path(raw_path);

        let subject = subject_heading(&blocks[..index]).ok_or_else(|| {
            ParseError::MissingMethodHeading {
                request: request.clone(),
            }
        })?;
        if subject.has_marker(REMOVED_MARKER_CLASS) {
            log::info!("skipping removed method {} {} ({})", verb, path, subject.text);
            stats.increment_info(InfoType::RemovedMethod);
            continue;
        }
        let deprecated = subject.has_marker(DEPRECATED_MARKER_CLASS);
        if deprecated {
            stats.increment_info(InfoType::DeprecatedMethod);
        }
        log::info!(
            "process {}: [{}] {} deprecated={}",
            subject.text,
            verb,
            path,
            deprecated
        );

        let end = method_end(&blocks, index, subject.level);
        let method = MethodSection {
            tag,
            link,
            verb,
            path: &path,
            subject,
            region: &blocks[index + 1..end],
        };
        let mut operation = method.build_operation(stats)?;
        operation.deprecated = deprecated.then_some(true);

        if paths
            .entry(path.clone())
            .or_default()
            .insert(verb.to_lowercase(), operation)
            .is_some()
        {
            log::debug!("{} {} documented twice, keeping the later one", verb, path);
        }
        added += 1;
    }

    log::info!("extracted {} operations for tag {}", added, tag);
    Ok(added)
}

/// Nearest `h2`/`h3` before a request line.
fn subject_heading<'b, 'a>(preceding: &'b [Block<'a>]) -> Option<&'b Heading<'a>> {
    preceding
        .iter()
        .rev()
        .filter_map(Block::as_heading)
        .find(|h| h.level == 2 || h.level == 3)
}

/// End of a method section: the next request line, or the next heading at
/// the subject's level or above.
fn method_end(blocks: &[Block<'_>], http_index: usize, subject_level: u8) -> usize {
    blocks
        .iter()
        .enumerate()
        .skip(http_index + 1)
        .find(|(_, block)| match block {
            Block::Http(_) => true,
            Block::Heading(h) => h.level <= subject_level,
            _ => false,
        })
        .map(|(i, _)| i)
        .unwrap_or(blocks.len())
}

struct MethodSection<'s, 'a> {
    tag: &'s str,
    link: &'s str,
    verb: &'s str,
    path: &'s str,
    subject: &'s Heading<'a>,
    region: &'s [Block<'a>],
}

impl MethodSection<'_, '_> {
    fn paragraphs(&self) -> impl Iterator<Item = ElementRef<'_>> + '_ {
        self.region.iter().filter_map(|block| match block {
            Block::Paragraph(p) => Some(*p),
            _ => None,
        })
    }

    fn build_operation(&self, stats: &ExtractionStats) -> Result<Operation, ParseError> {
        let mut summaries = Vec::new();
        let mut returns = None;
        for paragraph in self.paragraphs() {
            let text = element_text(paragraph);
            if text.starts_with(RETURNS_MARKER) {
                returns = Some(text);
                break;
            }
            summaries.push(text);
        }

        let streaming = self.tag == STREAMING_TAG;
        let fixed = lookup_endpoint(self.verb, self.path);
        let success = match (&returns, streaming, fixed) {
            (_, true, _) => None,
            (_, false, Some(response)) => Some(response),
            (Some(text), false, None) => Some(success_response(text)?),
            (None, false, None) => {
                return Err(ParseError::MissingReturns {
                    method: format!("{} {}", self.verb, self.path),
                })
            }
        };

        let mut description = summaries.join("\n");
        if let Some(text) = &returns {
            description.push_str(&version_history(text));
        }
        description.push_str(&format!("\n\n[{}]({})", self.subject.text, self.source_link()));

        let mut parameters: Vec<_> = ParameterLocation::iter()
            .flat_map(|location| extract_parameters(self.region, location, stats))
            .collect();
        let before = parameters.len();
        parameters.retain(|p| p.name != AUTHORIZATION_HEADER);
        let security = (parameters.len() != before).then(|| {
            stats.increment_info(InfoType::SecurityRequirement);
            let mut requirement = SecurityRequirement::new();
            requirement.insert(BEARER_AUTH_SCHEME.to_string(), Vec::new());
            vec![requirement]
        });

        let responses = match success {
            Some(success) => self.responses(success),
            None => streaming_responses(),
        };

        Ok(Operation {
            tags: vec![self.tag.to_string()],
            summary: summaries.first().cloned(),
            description: Some(description),
            deprecated: None,
            parameters,
            responses,
            security,
        })
    }

    fn source_link(&self) -> String {
        match &self.subject.id {
            Some(id) => format!("{}#{}", self.link, id),
            None => self.link.to_string(),
        }
    }

    /// The success response at 200, plus one `Error` reference per declared
    /// non-200 status heading.
    fn responses(&self, success: Response) -> BTreeMap<u16, Response> {
        let mut responses = BTreeMap::new();
        for (i, block) in self.region.iter().enumerate() {
            let Some(heading) = block.as_heading() else {
                continue;
            };
            let Some(status) = STATUS_HEADING_RE
                .captures(&heading.text)
                .and_then(|c| c[1].parse::<u16>().ok())
            else {
                continue;
            };
            if status == SUCCESS_STATUS {
                continue;
            }

            let description = self.region[i + 1..]
                .iter()
                .take_while(|b| b.as_heading().is_none())
                .find_map(|b| match b {
                    Block::Paragraph(p) => Some(element_text(*p)),
                    _ => None,
                })
                .unwrap_or_default();
            let error = Reference::schema(ERROR_SCHEMA).with_description(Some(description.clone()));
            responses.insert(status, Response::json(description, error));
        }
        responses.insert(SUCCESS_STATUS, success);
        responses
    }
}

fn streaming_responses() -> BTreeMap<u16, Response> {
    let reference = Reference::schema(STREAMING_SCHEMA)
        .with_description(Some(STREAMING_DESCRIPTION.to_string()));
    let mut responses = BTreeMap::new();
    responses.insert(
        SUCCESS_STATUS,
        Response::with_media(STREAMING_DESCRIPTION, MEDIA_TYPE_EVENT_STREAM, reference),
    );
    responses
}

fn success_response(returns: &str) -> Result<Response, ParseError> {
    let prose = RETURNS_RE
        .captures(returns)
        .map(|c| c[1].to_string())
        .unwrap_or_default();
    let schema = resolve_type(&prose, None, false)?;
    Ok(Response::json(prose, schema))
}

/// Markdown block listing the release notes of the `Returns:` paragraph, or
/// nothing when there are none.
fn version_history(returns: &str) -> String {
    let Some(history) = VERSION_HISTORY_RE.captures(returns).map(|c| c[1].to_string()) else {
        return String::new();
    };
    let starts: Vec<usize> = VERSION_ENTRY_RE.find_iter(&history).map(|m| m.start()).collect();
    if starts.is_empty() {
        return String::new();
    }

    let entries: Vec<&str> = starts
        .iter()
        .enumerate()
        .map(|(n, &start)| {
            let end = starts.get(n + 1).copied().unwrap_or(history.len());
            history[start..end].trim()
        })
        .collect();
    format!("\n## Version history\n\n- {}", entries.join("\n- "))
}
