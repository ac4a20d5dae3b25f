//! End-to-end tests for the HTTP client and the page server, run against a
//! local stub of the search API.

mod common;

use common::{find_free_port, spawn_stub, StubApi, TWO_STORIES};
use hn_front::config::Config;
use hn_front::fetch::{HnClient, StorySource, NOT_OK_MESSAGE};
use hn_front::server::run_server;
use serde_json::Value;
use std::time::Duration;

fn test_config(stub: &StubApi, port: u16) -> Config {
    Config::from_toml(&format!(
        r#"
[api]
endpoint = "{}"

[cache]
ttl_secs = 300

[server]
bind = "127.0.0.1:{}"
"#,
        stub.endpoint(),
        port
    ))
    .unwrap()
}

async fn wait_for_server(port: u16) {
    let client = reqwest::Client::new();
    let url = format!("http://127.0.0.1:{}/health", port);
    for _ in 0..50 {
        tokio::time::sleep(Duration::from_millis(100)).await;
        if let Ok(resp) = client.get(&url).send().await {
            if resp.status().is_success() {
                return;
            }
        }
    }
    panic!("Server did not become ready within 5 seconds");
}

/// Poll `/api/stories` until the first fetch has resolved.
async fn wait_for_stories(port: u16, query: &str) -> (u16, Value) {
    let client = reqwest::Client::new();
    let url = format!("http://127.0.0.1:{}/api/stories?q={}", port, query);
    for _ in 0..50 {
        let resp = client.get(&url).send().await.unwrap();
        let status = resp.status().as_u16();
        let body: Value = resp.json().await.unwrap();
        if status != 503 {
            return (status, body);
        }
        assert_eq!(body["loading"]["skeletons"], 5);
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    panic!("fetch did not resolve within 5 seconds");
}

#[tokio::test]
async fn test_client_decodes_hits_in_order() {
    let stub = spawn_stub(200, TWO_STORIES);
    let cfg = test_config(&stub, 0);
    let client = HnClient::from_config(&cfg.api).unwrap();

    let stories = client.fetch().await.unwrap();
    let ids: Vec<String> = stories.iter().map(|s| s.object_id.to_string()).collect();
    assert_eq!(ids, vec!["1", "2"]);
    assert_eq!(stories[1].title, "Go vs Java");
    assert_eq!(stories[1].points, Some(80));
    assert_eq!(stub.request_count(), 1);
}

#[tokio::test]
async fn test_client_error_status() {
    let stub = spawn_stub(503, "{}");
    let cfg = test_config(&stub, 0);
    let client = HnClient::from_config(&cfg.api).unwrap();

    let err = client.fetch().await.unwrap_err();
    assert_eq!(err.message, NOT_OK_MESSAGE);
}

#[tokio::test]
async fn test_client_undecodable_body() {
    let stub = spawn_stub(200, "not json");
    let cfg = test_config(&stub, 0);
    let client = HnClient::from_config(&cfg.api).unwrap();

    let err = client.fetch().await.unwrap_err();
    assert!(
        err.message.starts_with("Invalid response body"),
        "unexpected message: {}",
        err.message
    );
}

#[tokio::test]
async fn test_client_connection_refused() {
    let port = find_free_port();
    let mut cfg = Config::minimal();
    cfg.api.endpoint = format!("http://127.0.0.1:{}/api/v1/search", port);
    let client = HnClient::from_config(&cfg.api).unwrap();

    let err = client.fetch().await.unwrap_err();
    assert!(!err.message.is_empty());
}

#[tokio::test]
async fn test_server_filters_and_caches() {
    let stub = spawn_stub(200, TWO_STORIES);
    let port = find_free_port();
    let cfg = test_config(&stub, port);

    let server_handle = tokio::spawn(async move {
        run_server(&cfg).await.ok();
    });
    wait_for_server(port).await;

    let (status, body) = wait_for_stories(port, "").await;
    assert_eq!(status, 200);
    let titles: Vec<&str> = body["stories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Rust is great", "Go vs Java"]);

    let (status, body) = wait_for_stories(port, "go").await;
    assert_eq!(status, 200);
    assert_eq!(body["stories"].as_array().unwrap().len(), 1);
    assert_eq!(body["stories"][0]["key"], "2");

    let html = reqwest::get(format!("http://127.0.0.1:{}/?q=GO", port))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains("Go vs Java"));
    assert!(!html.contains("Rust is great"));
    assert!(html.contains(r#"value="GO""#));

    assert_eq!(stub.request_count(), 1, "page loads within TTL should reuse the fetch");

    server_handle.abort();
}

#[tokio::test]
async fn test_server_reports_fetch_failure() {
    let stub = spawn_stub(500, "{}");
    let port = find_free_port();
    let cfg = test_config(&stub, port);

    let server_handle = tokio::spawn(async move {
        run_server(&cfg).await.ok();
    });
    wait_for_server(port).await;

    let (status, body) = wait_for_stories(port, "").await;
    assert_eq!(status, 502);
    assert_eq!(body["error"]["message"], "Network response was not ok");

    let html = reqwest::get(format!("http://127.0.0.1:{}/", port))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(html.matches("Error: Network response was not ok").count(), 1);

    server_handle.abort();
}
