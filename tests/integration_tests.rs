//! Integration tests using mock HTTP server
//!
//! Tests the full flow: client → HTTP requests → cursor traversal → pages/items

use clap::Parser;
use disqust::cli::{Cli, Runner};
use disqust::{ApiClient, ClientConfig, Error, Method, Page, Params};
use futures::{StreamExt, TryStreamExt};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LIST_POSTS: &str = "/api/3.0/forums/listPosts.json";

fn page_body(items: Value, next: Option<&str>) -> Value {
    json!({
        "code": 0,
        "cursor": {
            "hasPrev": false,
            "prev": null,
            "hasNext": next.is_some(),
            "next": next,
            "total": null
        },
        "response": items
    })
}

/// Three pages chained A → B → end, each carrying a rate-limit header
async fn mount_three_pages(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(LIST_POSTS))
        .and(query_param("cursor", "A"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Ratelimit-Remaining", "998")
                .set_body_json(page_body(json!([]), Some("B"))),
        )
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(LIST_POSTS))
        .and(query_param("cursor", "B"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Ratelimit-Remaining", "997")
                .set_body_json(page_body(json!([{"id": "3"}, {"id": "4"}, {"id": "5"}]), None)),
        )
        .mount(server)
        .await;

    // first page: no cursor yet
    Mock::given(method("GET"))
        .and(path(LIST_POSTS))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Ratelimit-Remaining", "999")
                .set_body_json(page_body(json!([{"id": "1"}, {"id": "2"}]), Some("A"))),
        )
        .up_to_n_times(1)
        .mount(server)
        .await;
}

fn client_for(server: &MockServer) -> ApiClient {
    let config = ClientConfig::builder()
        .base_url(format!("{}/api/3.0", server.uri()))
        .api_key("PUBLIC")
        .build();
    ApiClient::with_config(config).unwrap()
}

#[tokio::test]
async fn test_pages_follow_cursor_over_http() {
    let server = MockServer::start().await;
    mount_three_pages(&server).await;
    let client = client_for(&server);

    let params = Params::new().with("forum", "disqus").with("limit", 100);
    let pages: Vec<Page> = client
        .pages("forums/listPosts", Method::GET, params)
        .try_collect()
        .await
        .unwrap();

    let sizes: Vec<usize> = pages.iter().map(Page::len).collect();
    assert_eq!(sizes, vec![2, 0, 3]);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
    for request in &requests {
        let query: Vec<(String, String)> = request.url.query_pairs().into_owned().collect();
        assert!(query.contains(&("api_key".to_string(), "PUBLIC".to_string())));
        assert!(query.contains(&("forum".to_string(), "disqus".to_string())));
        assert!(query.contains(&("limit".to_string(), "100".to_string())));
    }
    assert_eq!(client.rate_limit_remaining(), Some("997".to_string()));
    assert_eq!(client.history_len(), 3);
}

#[tokio::test]
async fn test_items_flatten_two_zero_three() {
    let server = MockServer::start().await;
    mount_three_pages(&server).await;
    let client = client_for(&server);

    let ids: Vec<String> = client
        .items("forums/listPosts", Method::GET, Params::new())
        .map_ok(|item| item["id"].as_str().unwrap_or_default().to_string())
        .try_collect()
        .await
        .unwrap();

    assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
}

#[tokio::test]
async fn test_items_can_be_abandoned_early() {
    let server = MockServer::start().await;
    mount_three_pages(&server).await;
    let client = client_for(&server);

    let first_two: Vec<Value> = client
        .items("forums/listPosts", Method::GET, Params::new())
        .take(2)
        .try_collect()
        .await
        .unwrap();

    assert_eq!(first_two.len(), 2);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
    assert_eq!(client.rate_limit_remaining(), Some("999".to_string()));
}

#[tokio::test]
async fn test_api_error_aborts_traversal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(LIST_POSTS))
        .and(query_param("cursor", "A"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({"code": 15, "response": "Internal server error"})),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(LIST_POSTS))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(json!([1]), Some("A"))))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut items = client.items("forums/listPosts", Method::GET, Params::new());

    assert_eq!(items.next_item().await.unwrap(), Some(json!(1)));
    match items.next_item().await {
        Err(Error::Api { status, body }) => {
            assert_eq!(status, 500);
            assert!(body.contains("Internal server error"));
        }
        other => panic!("Expected Api error, got {other:?}"),
    }
    assert!(items.next_item().await.unwrap().is_none());
    assert_eq!(client.last_response().unwrap().status, 500);
}

#[tokio::test]
async fn test_malformed_page_over_http() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/3.0/forums/details.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"code": 0, "response": {"id": "x"}})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result: Result<Vec<Page>, Error> = client
        .pages("forums/details", Method::GET, Params::new())
        .try_collect()
        .await;

    assert!(matches!(result, Err(Error::MalformedPage { .. })));
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

// ============================================================================
// CLI
// ============================================================================

#[tokio::test]
async fn test_cli_items_writes_json_lines() {
    let server = MockServer::start().await;
    mount_three_pages(&server).await;

    let base_url = format!("{}/api/3.0", server.uri());
    let cli = Cli::parse_from([
        "disqust",
        "--base-url",
        base_url.as_str(),
        "items",
        "forums/listPosts",
        "-p",
        "forum=disqus",
        "--max-items",
        "4",
    ]);

    let mut out = Vec::new();
    Runner::new(cli).run_with_output(&mut out).await.unwrap();

    let lines: Vec<Value> = String::from_utf8(out)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(
        lines,
        vec![json!({"id": "1"}), json!({"id": "2"}), json!({"id": "3"}), json!({"id": "4"})]
    );
}

#[tokio::test]
async fn test_cli_pages_respects_max_pages() {
    let server = MockServer::start().await;
    mount_three_pages(&server).await;

    let base_url = format!("{}/api/3.0", server.uri());
    let cli = Cli::parse_from([
        "disqust",
        "--base-url",
        base_url.as_str(),
        "pages",
        "forums/listPosts",
        "--max-pages",
        "2",
    ]);

    let mut out = Vec::new();
    Runner::new(cli).run_with_output(&mut out).await.unwrap();

    let text = String::from_utf8(out).unwrap();
    let pages: Vec<Value> = text.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0]["cursor"]["next"], json!("A"));
    assert_eq!(pages[1]["cursor"]["next"], json!("B"));
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_cli_get_reports_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&server)
        .await;

    let base_url = format!("{}/api/3.0", server.uri());
    let cli = Cli::parse_from(["disqust", "--base-url", base_url.as_str(), "get", "users/details"]);

    let mut out = Vec::new();
    let err = Runner::new(cli).run_with_output(&mut out).await.unwrap_err();
    assert_eq!(err.status(), Some(403));
    assert!(out.is_empty());
}
