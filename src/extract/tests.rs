//! Page-level extraction tests over inline HTML fixtures.

use super::*;
use crate::error_handling::{ExtractionStats, InfoType, ParseError, WarningType};
use crate::openapi::{Operation, Paths};
use serde_json::json;

const LINK: &str = "https://docs.joinmastodon.org/methods/instance/";

fn page(body: &str) -> String {
    format!(
        r#"<html><body><main><div class="e-content"><h1>instance API methods</h1>{}</div></main></body></html>"#,
        body
    )
}

fn method(id: &str, title: &str, marker: &str, request: &str, returns: &str) -> String {
    format!(
        r#"<h2 id="{id}" class="heading">{title}{marker}</h2>
        <div class="highlight"><pre tabindex="0"><code class="language-http" data-lang="http">{request}</code></pre></div>
        <p>Obtain general information about the server.</p>
        <p><strong>Returns:</strong> {returns}<br>
        <strong>OAuth:</strong> Public<br>
        <strong>Version history:</strong><br>
        4.0.0 - added<br>
        4.1.0 - added <code>vapid_key</code></p>
        <h4 id="request">Request</h4>
        <h5 id="header-parameters">Headers</h5>
        <dl>
          <dt>Authorization</dt>
          <dd><span class="api-method-parameter-required">required</span> Provide this header with <code>Bearer &lt;user_token&gt;</code>.</dd>
        </dl>
        <h4 id="response">Response</h4>
        <h5 id="200-ok">200: OK</h5>
        <p>Instance info.</p>
        <h5 id="401-unauthorized">401: Unauthorized</h5>
        <p>Invalid or missing Authorization header.</p>"#
    )
}

fn operation<'p>(paths: &'p Paths, path: &str, verb: &str) -> &'p Operation {
    &paths[path][verb]
}

#[test]
fn test_removed_method_is_dropped() {
    let html = page(&format!(
        "{}{}",
        method(
            "v1",
            "View server information",
            "",
            "GET /api/v1/instance HTTP/1.1",
            r#"<a href="/entities/Instance/">Instance</a>"#
        ),
        method(
            "v0",
            "View server information (legacy)",
            r#" <span class="api-method-parameter-removed">removed</span>"#,
            "GET /api/v1/instance HTTP/1.1",
            "Hash"
        ),
    ));
    let stats = ExtractionStats::new();
    let mut paths = Paths::new();

    let added = extract_paths("instance", LINK, &html, &mut paths, &stats).unwrap();

    assert_eq!(added, 1);
    assert_eq!(paths.len(), 1);
    assert_eq!(paths["/api/v1/instance"].len(), 1);
    let op = operation(&paths, "/api/v1/instance", "get");
    assert!(op.description.as_deref().unwrap().ends_with(&format!("({}#v1)", LINK)));
    assert_eq!(stats.get_info_count(InfoType::RemovedMethod), 1);
}

#[test]
fn test_operation_shape() {
    let html = page(&method(
        "v2",
        "View server information",
        "",
        "GET /api/v2/instance HTTP/1.1",
        r#"<a href="/entities/Instance/">Instance</a>"#,
    ));
    let stats = ExtractionStats::new();
    let mut paths = Paths::new();
    extract_paths("instance", LINK, &html, &mut paths, &stats).unwrap();

    let op = operation(&paths, "/api/v2/instance", "get");
    assert_eq!(
        serde_json::to_value(op).unwrap(),
        json!({
            "tags": ["instance"],
            "summary": "Obtain general information about the server.",
            "description": "Obtain general information about the server.\n## Version history\n\n- 4.0.0 - added\n- 4.1.0 - added vapid_key\n\n[View server information](https://docs.joinmastodon.org/methods/instance/#v2)",
            "responses": {
                "200": {
                    "description": "Instance",
                    "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Instance"}}}
                },
                "401": {
                    "description": "Invalid or missing Authorization header.",
                    "content": {"application/json": {"schema": {
                        "$ref": "#/components/schemas/Error",
                        "description": "Invalid or missing Authorization header."
                    }}}
                }
            },
            "security": [{"BearerAuth": []}]
        })
    );
    assert_eq!(stats.get_info_count(InfoType::SecurityRequirement), 1);
}

#[test]
fn test_deprecated_method_matches_sibling() {
    let request = "GET /api/v1/instance HTTP/1.1";
    let plain = page(&method("v1", "View server information", "", request, "Hash"));
    let deprecated = page(&method(
        "v1",
        "View server information",
        r#" <span class="api-method-parameter-deprecated">deprecated</span>"#,
        request,
        "Hash",
    ));
    let stats = ExtractionStats::new();

    let mut plain_paths = Paths::new();
    extract_paths("instance", LINK, &plain, &mut plain_paths, &stats).unwrap();
    let mut deprecated_paths = Paths::new();
    extract_paths("instance", LINK, &deprecated, &mut deprecated_paths, &stats).unwrap();

    let mut flagged = operation(&deprecated_paths, "/api/v1/instance", "get").clone();
    assert_eq!(flagged.deprecated, Some(true));
    flagged.deprecated = None;
    assert_eq!(&flagged, operation(&plain_paths, "/api/v1/instance", "get"));
    assert_eq!(stats.get_info_count(InfoType::DeprecatedMethod), 1);
}

#[test]
fn test_authorization_header_becomes_security() {
    let html = page(
        r#"<h2 id="unmute" class="heading">Unmute account</h2>
        <code class="language-http" data-lang="http">POST /api/v1/accounts/:id/unmute HTTP/1.1</code>
        <p>Unmute the given account.</p>
        <p><strong>Returns:</strong> <a href="/entities/Relationship/">Relationship</a><br>
        <strong>OAuth:</strong> User token + <code>write:mutes</code></p>
        <h5 id="header-parameters">Headers</h5>
        <dl><dt>Authorization</dt><dd><span class="api-method-parameter-required">required</span> Provide this header.</dd></dl>
        <h5 id="path-parameters">Path parameters</h5>
        <dl><dt>:id</dt><dd>String. The ID of the Account in the database.</dd></dl>"#,
    );
    let stats = ExtractionStats::new();
    let mut paths = Paths::new();
    extract_paths("accounts", LINK, &html, &mut paths, &stats).unwrap();

    let op = operation(&paths, "/api/v1/accounts/{:id}/unmute", "post");
    assert!(op.parameters.iter().all(|p| p.name != "Authorization"));
    assert_eq!(op.parameters.len(), 1);
    assert_eq!(op.parameters[0].name, ":id");
    assert_eq!(op.parameters[0].required, Some(true));
    assert_eq!(
        serde_json::to_value(&op.security).unwrap(),
        json!([{"BearerAuth": []}])
    );
    assert_eq!(
        op.description.as_deref().unwrap(),
        "Unmute the given account.\n\n[Unmute account](https://docs.joinmastodon.org/methods/instance/#unmute)"
    );
}

#[test]
fn test_streaming_tag_always_answers_event_stream() {
    let html = page(
        r#"<h2 id="health" class="heading">Check if the server is alive</h2>
        <code class="language-http" data-lang="http">GET /api/v1/streaming/health HTTP/1.1</code>
        <p>Verify that the streaming service is alive.</p>
        <p><strong>Returns:</strong> String OK<br><strong>OAuth:</strong> Public</p>
        <h5 id="200-ok">200: OK</h5><p>OK</p>
        <h5 id="404-not-found">404: Not found</h5><p>Gone</p>"#,
    );
    let stats = ExtractionStats::new();
    let mut paths = Paths::new();
    extract_paths("streaming", LINK, &html, &mut paths, &stats).unwrap();

    let op = operation(&paths, "/api/v1/streaming/health", "get");
    assert_eq!(
        serde_json::to_value(&op.responses).unwrap(),
        json!({"200": {
            "description": "The streaming response.",
            "content": {"text/event-stream": {"schema": {
                "$ref": "#/components/schemas/Streaming",
                "description": "The streaming response."
            }}}
        }})
    );
}

#[test]
fn test_activity_endpoint_has_fixed_response() {
    let html = page(&method(
        "activity",
        "Weekly activity",
        "",
        "GET /api/v1/instance/activity HTTP/1.1",
        "Array of Hash",
    ));
    let stats = ExtractionStats::new();
    let mut paths = Paths::new();
    extract_paths("instance", LINK, &html, &mut paths, &stats).unwrap();

    let response = &operation(&paths, "/api/v1/instance/activity", "get").responses[&200];
    let schema = serde_json::to_value(&response.content["application/json"].schema).unwrap();
    assert_eq!(response.description, "Array of Hash");
    assert_eq!(schema["items"]["properties"]["logins"]["type"], "string");
}

#[test]
fn test_free_returns_prose_does_not_abort_the_page() {
    let html = page(&method(
        "delete",
        "Remove a filter",
        "",
        "DELETE /api/v2/filters/:id HTTP/1.1",
        "Empty object, or Error",
    ));
    let stats = ExtractionStats::new();
    let mut paths = Paths::new();

    assert_eq!(extract_paths("filters", LINK, &html, &mut paths, &stats).unwrap(), 1);
    let response = &operation(&paths, "/api/v2/filters/{:id}", "delete").responses[&200];
    assert_eq!(response.description, "Empty object, or Error");
    assert_eq!(
        response.content["application/json"]
            .schema
            .as_reference()
            .map(|r| r.reference.as_str()),
        Some("#/components/schemas/Empty_object_or_Error")
    );
}

#[test]
fn test_methods_merge_into_one_path_item() {
    let stats = ExtractionStats::new();
    let mut paths = Paths::new();
    let get = page(&method("get", "View", "", "GET /api/v1/lists HTTP/1.1", "Array of List"));
    let post = page(&method("create", "Create", "", "POST /api/v1/lists HTTP/1.1", "List"));
    extract_paths("lists", LINK, &get, &mut paths, &stats).unwrap();
    extract_paths("lists", LINK, &post, &mut paths, &stats).unwrap();

    let verbs: Vec<&str> = paths["/api/v1/lists"].keys().map(String::as_str).collect();
    assert_eq!(verbs, vec!["get", "post"]);
    let success = &operation(&paths, "/api/v1/lists", "get").responses[&200];
    let listing = success.content["application/json"].schema.as_schema().unwrap();
    assert_eq!(
        listing.items.as_deref().and_then(|i| i.as_reference()).map(|r| r.reference.as_str()),
        Some("#/components/schemas/List")
    );
}

#[test]
fn test_h3_subjects_bound_methods() {
    let html = page(
        r#"<h2 id="v2">v2 methods</h2>
        <h3 id="get" class="heading">View all filters</h3>
        <code class="language-http" data-lang="http">GET /api/v2/filters HTTP/1.1</code>
        <p>Obtain a list of all filter groups.</p>
        <p><strong>Returns:</strong> Array of <a href="/entities/Filter/">Filter</a></p>
        <h5 id="query-parameters">Query parameters</h5>
        <dl><dt>limit</dt><dd>Integer. Page size.</dd></dl>
        <h3 id="get-one" class="heading">View a specific filter</h3>
        <code class="language-http" data-lang="http">GET /api/v2/filters/:id HTTP/1.1</code>
        <p>Obtain a single filter group.</p>
        <p><strong>Returns:</strong> <a href="/entities/Filter/">Filter</a></p>"#,
    );
    let stats = ExtractionStats::new();
    let mut paths = Paths::new();
    assert_eq!(extract_paths("filters", LINK, &html, &mut paths, &stats).unwrap(), 2);

    let all = operation(&paths, "/api/v2/filters", "get");
    assert_eq!(all.parameters.len(), 1);
    assert!(all.description.as_deref().unwrap().ends_with("#get)"));
    let one = operation(&paths, "/api/v2/filters/{:id}", "get");
    assert!(one.parameters.is_empty());
    assert!(one.description.as_deref().unwrap().ends_with("#get-one)"));
}

#[test]
fn test_missing_returns_names_method() {
    let html = page(
        r#"<h2 id="x">Mystery</h2>
        <code class="language-http" data-lang="http">DELETE /api/v1/mystery HTTP/1.1</code>
        <p>Does something.</p>"#,
    );
    let stats = ExtractionStats::new();
    let mut paths = Paths::new();
    assert_eq!(
        extract_paths("mystery", LINK, &html, &mut paths, &stats).unwrap_err(),
        ParseError::MissingReturns {
            method: "DELETE /api/v1/mystery".to_string()
        }
    );
}

#[test]
fn test_unparseable_request_line_is_lost() {
    let html = page(
        r#"<h2 id="x">Broken</h2>
        <code class="language-http" data-lang="http">see above</code>"#,
    );
    let stats = ExtractionStats::new();
    let mut paths = Paths::new();
    assert_eq!(extract_paths("broken", LINK, &html, &mut paths, &stats).unwrap(), 0);
    assert!(paths.is_empty());
    assert_eq!(stats.get_warning_count(WarningType::LostMethod), 1);
}

#[test]
fn test_page_without_content_is_skipped() {
    let stats = ExtractionStats::new();
    let mut paths = Paths::new();
    assert_eq!(
        extract_paths("none", LINK, "<html><body></body></html>", &mut paths, &stats).unwrap(),
        0
    );
    assert_eq!(stats.get_warning_count(WarningType::MissingContent), 1);
}
