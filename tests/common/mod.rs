//! Shared test fixtures: a local stand-in for the search API.

#![allow(dead_code)]

use axum::extract::RawQuery;
use axum::http::{header, StatusCode};
use axum::routing::get;
use axum::Router;
use std::sync::{Arc, Mutex};

pub const TWO_STORIES: &str = r#"{
  "hits": [
    {"objectID": "1", "title": "Rust is great", "points": 120, "url": "http://a"},
    {"objectID": "2", "title": "Go vs Java", "points": 80, "url": "http://b"}
  ],
  "nbHits": 2
}"#;

/// A running stub API. Requests are recorded by their raw query string.
pub struct StubApi {
    pub base: String,
    pub requests: Arc<Mutex<Vec<String>>>,
}

impl StubApi {
    pub fn endpoint(&self) -> String {
        format!("{}/api/v1/search", self.base)
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

/// Serve `body` with `status` on `/api/v1/search` from a background thread.
pub fn spawn_stub(status: u16, body: &'static str) -> StubApi {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let addr = listener.local_addr().unwrap();

    let requests = Arc::new(Mutex::new(Vec::new()));
    let recorded = requests.clone();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).unwrap();
            let app = Router::new().route(
                "/api/v1/search",
                get(move |RawQuery(query): RawQuery| {
                    let recorded = recorded.clone();
                    async move {
                        recorded.lock().unwrap().push(query.unwrap_or_default());
                        (
                            StatusCode::from_u16(status).unwrap(),
                            [(header::CONTENT_TYPE, "application/json")],
                            body,
                        )
                    }
                }),
            );
            axum::serve(listener, app).await.unwrap();
        });
    });

    StubApi {
        base: format!("http://{}", addr),
        requests,
    }
}

pub fn find_free_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}
