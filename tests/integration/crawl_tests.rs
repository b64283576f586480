//! Integration tests for the crawler
//!
//! These tests use wiremock to serve a synthetic unit directory and run the
//! full crawl through the HTTP fetcher.

use orgtree::config::{Config, CrawlerConfig, OutputConfig, PacingConfig};
use orgtree::crawler::crawl;
use orgtree::output::{read_tree, write_outputs};
use orgtree::NodeKind;
use serde_json::Value;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointed at the mock directory
fn create_test_config(base_url: &str, max_depth: u32) -> Config {
    Config {
        crawler: CrawlerConfig {
            entry_url: format!("{}/units/us", base_url),
            base_url: base_url.to_string(),
            max_depth,
            request_timeout: 5,
        },
        pacing: PacingConfig::disabled(),
        ..Config::default()
    }
}

async fn mount_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html"))
        .mount(server)
        .await;
}

/// Mounts a page that must be requested exactly `times` times
async fn mount_page_expecting(server: &MockServer, route: &str, body: String, times: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html"))
        .expect(times)
        .mount(server)
        .await;
}

fn headed_links(links: &[(&str, &str)]) -> String {
    let anchors: String = links
        .iter()
        .map(|(href, name)| format!(r#"<div><a href="{}"><h4>{}</h4></a></div>"#, href, name))
        .collect();
    format!("<html><body>{}</body></html>", anchors)
}

fn nested_page(children: &[(&str, &str)]) -> String {
    let items: String = children
        .iter()
        .map(|(href, name)| {
            format!(
                r#"<li><div><span class="margin-right-5px"></span><a href="{}">{}</a></div></li>"#,
                href, name
            )
        })
        .collect();
    format!(
        r#"<html><body><ul class="subords-units"><li><ul>{}</ul></li></ul></body></html>"#,
        items
    )
}

fn flat_page(items: &[(&str, &str)]) -> String {
    let items: String = items
        .iter()
        .map(|(href, name)| format!(r#"<li><a href="{}">{}</a></li>"#, href, name))
        .collect();
    format!(
        r#"<html><body><ul class="subords-units"><li><ul>{}</ul></li></ul></body></html>"#,
        items
    )
}

fn unit_page(full_name: &str) -> String {
    format!(
        r#"<html><body><h1 class="grippy-host">{}</h1></body></html>"#,
        full_name
    )
}

fn located_unit_page(full_name: &str, location: &str, details: &str) -> String {
    format!(
        r#"<html><body>
        <h1 class="grippy-host">{}</h1>
        <ul class="subords-units"><li><ul><li><ul><li>
            <span class="location"><a href="/locations/1">{}</a></span>
            <i>{}</i>
        </li></ul></li></ul></li></ul>
        </body></html>"#,
        full_name, location, details
    )
}

/// Two branches: A with one flat roster, B with one nested subcategory
async fn mount_two_branch_directory(server: &MockServer) {
    mount_page_expecting(
        server,
        "/units/us",
        headed_links(&[("/units/army", "Army"), ("/units/guard", "National Guard")]),
        1,
    )
    .await;

    // Branch A
    mount_page(
        server,
        "/units/army",
        headed_links(&[("/units/army/support", "Support Units")]),
    )
    .await;
    mount_page(
        server,
        "/units/army/support",
        flat_page(&[
            ("/units/a1", "1st Support Battalion"),
            ("/units/a2", "2nd Support Battalion"),
            ("/units/a3", "3rd Support Battalion"),
        ]),
    )
    .await;
    mount_page(server, "/units/a1", "<html><body></body></html>".to_string()).await;
    mount_page(
        server,
        "/units/a2",
        located_unit_page("2nd Support Battalion", "Fort Example", "Example, Texas"),
    )
    .await;
    mount_page(server, "/units/a3", "<html><body></body></html>".to_string()).await;

    // Branch B
    mount_page(
        server,
        "/units/guard",
        headed_links(&[("/units/guard/corps", "Corps")]),
    )
    .await;
    mount_page(
        server,
        "/units/guard/corps",
        nested_page(&[("/units/x", "1st Division")]),
    )
    .await;
    mount_page_expecting(
        server,
        "/units/x",
        nested_page(&[("/units/y", "1st Brigade"), ("/units/z", "2nd Brigade")]),
        1,
    )
    .await;
    mount_page_expecting(server, "/units/y", unit_page("1st Brigade Combat Team"), 1).await;
    mount_page_expecting(
        server,
        "/units/z",
        nested_page(&[("/units/w", "1st Battalion")]),
        1,
    )
    .await;
    mount_page_expecting(server, "/units/w", unit_page("Too Deep"), 0).await;
}

#[tokio::test]
async fn test_two_branch_directory() {
    let mock_server = MockServer::start().await;
    mount_two_branch_directory(&mock_server).await;

    let config = create_test_config(&mock_server.uri(), 1);
    let report = crawl(&config).await.expect("crawl failed");

    assert_eq!(report.stats.main_branches, 2);
    assert_eq!(report.stats.subcategories, 2);
    assert_eq!(report.stats.units, 4);
    assert_eq!(report.stats.subunits, 2);
    assert_eq!(report.stats.flat_items, 3);
    assert_eq!(report.stats.with_location, 1);
    assert_eq!(report.failed_requests, 0);

    let guard = &report.tree[1];
    assert_eq!(guard.name, "National Guard");
    let division = &guard.children[0].children[0];
    assert_eq!(division.kind, NodeKind::Level(1));

    let truncated = &division.children[1];
    assert_eq!(truncated.name, "2nd Brigade");
    assert_eq!(truncated.kind, NodeKind::Level(2));
    assert!(truncated.children.is_empty());

    let located = &report.tree[0].children[0].children[1];
    assert_eq!(located.metadata.location_name.as_deref(), Some("Fort Example"));
    assert_eq!(located.metadata.location_details.as_deref(), Some("Example, Texas"));
}

#[tokio::test]
async fn test_written_document_shape() {
    let mock_server = MockServer::start().await;
    mount_two_branch_directory(&mock_server).await;

    let config = create_test_config(&mock_server.uri(), 1);
    let report = crawl(&config).await.expect("crawl failed");

    let dir = TempDir::new().unwrap();
    let output = OutputConfig {
        tree_path: dir.path().join("out/tree.json").display().to_string(),
        copy_path: None,
        summary_path: None,
    };
    let written = write_outputs(&output, &report.tree).unwrap();

    let document: Value =
        serde_json::from_str(&std::fs::read_to_string(&written[0]).unwrap()).unwrap();
    let branches = document.as_array().unwrap();
    assert_eq!(branches.len(), 2);
    assert_eq!(branches[0]["type"], "main_branch");

    let subcategory = &branches[1]["subcategories"][0];
    assert_eq!(subcategory["type"], "subcategory");

    let division = &subcategory["units"][0];
    assert_eq!(division["type"], "level_1_item");

    // Leaves carry no child collection at all
    let leaf = &division["subunits"][0];
    assert_eq!(leaf["type"], "level_2_item");
    assert_eq!(leaf["full_unit_name"], "1st Brigade Combat Team");
    assert!(leaf.get("subunits").is_none());
    assert!(leaf.get("location_name").is_none());

    let flat_leaf = &branches[0]["subcategories"][0]["units"][0];
    assert_eq!(flat_leaf["type"], "flat_item");
    assert!(flat_leaf.get("full_unit_name").is_none());

    assert_eq!(read_tree(&written[0]).unwrap(), report.tree);
}

#[tokio::test]
async fn test_missing_pages_are_absorbed() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/units/us",
        headed_links(&[("/units/gone", "Gone"), ("/units/army", "Army")]),
    )
    .await;
    mount_page(
        &mock_server,
        "/units/army",
        headed_links(&[("/units/army/roster", "Roster")]),
    )
    .await;
    mount_page(
        &mock_server,
        "/units/army/roster",
        flat_page(&[("/units/missing", "Missing Company"), ("/units/c", "C Company")]),
    )
    .await;
    mount_page(&mock_server, "/units/c", unit_page("Charlie Company")).await;
    Mock::given(method("GET"))
        .and(path("/units/missing"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), 3);
    let report = crawl(&config).await.expect("crawl failed");

    assert_eq!(report.tree.len(), 1);
    let roster = &report.tree[0].children[0];
    assert_eq!(roster.children.len(), 2);
    assert!(roster.children[0].metadata.is_empty());
    assert_eq!(
        roster.children[1].metadata.full_unit_name.as_deref(),
        Some("Charlie Company")
    );
    assert_eq!(report.failed_requests, 2);
}

#[tokio::test]
async fn test_unit_reachable_twice_is_fetched_once() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/units/us",
        headed_links(&[("/units/army", "Army")]),
    )
    .await;
    mount_page(
        &mock_server,
        "/units/army",
        headed_links(&[("/units/army/corps", "Corps")]),
    )
    .await;
    mount_page(
        &mock_server,
        "/units/army/corps",
        nested_page(&[("/units/x", "1st Division"), ("/units/y", "2nd Division")]),
    )
    .await;
    mount_page_expecting(
        &mock_server,
        "/units/x",
        nested_page(&[("/units/shared", "Shared Brigade")]),
        1,
    )
    .await;
    mount_page_expecting(
        &mock_server,
        "/units/y",
        nested_page(&[("/units/shared", "Shared Brigade"), ("/units/x", "1st Division")]),
        1,
    )
    .await;
    mount_page_expecting(&mock_server, "/units/shared", unit_page("Shared Brigade"), 1).await;

    let config = create_test_config(&mock_server.uri(), 3);
    let report = crawl(&config).await.expect("crawl failed");

    // The shared leaf is listed under both divisions; the back-reference to
    // the first division is dropped
    let divisions = &report.tree[0].children[0].children;
    assert_eq!(divisions.len(), 2);
    assert_eq!(divisions[0].children.len(), 1);
    assert_eq!(divisions[1].children.len(), 1);
    assert_eq!(divisions[1].children[0].name, "Shared Brigade");
    assert_eq!(report.stats.subunits, 2);
    assert_eq!(report.visited_urls, 4);
}

#[tokio::test]
async fn test_non_html_entry_yields_empty_tree() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/units/us"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), 3);
    let report = crawl(&config).await.expect("crawl failed");

    assert!(report.tree.is_empty());
    assert_eq!(report.stats.main_branches, 0);
    assert_eq!(report.requests, 1);
    assert_eq!(report.failed_requests, 1);
}
