//! HTML front end over HTTP.
//!
//! Serves the filtered view as a web page, with a JSON twin for scripts.
//! The first request starts the fetch; until it resolves the page shows
//! skeleton cards and refreshes itself. Results are held in a
//! [`StoryCache`] so repeated page loads within the TTL do not hit the
//! search API again.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/` | HTML page; `?q=` filters titles |
//! | `GET`  | `/api/stories` | Filtered cards as JSON; `?q=` filters titles |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! # Error Contract
//!
//! `/api/stories` answers `503` with `{"loading":{...}}` while the first
//! fetch is outstanding and `502` with the error body when it failed:
//!
//! ```json
//! { "error": { "message": "Network response was not ok" } }
//! ```

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, error, info};

use crate::cache::StoryCache;
use crate::config::{Config, ViewConfig};
use crate::fetch::{HnClient, StorySource};
use crate::render;
use crate::view::{self, Body, SearchState};

/// Shared application state passed to all route handlers via Axum's `State` extractor.
#[derive(Clone)]
struct AppState {
    /// Heading and skeleton count for every rendered page.
    view: Arc<ViewConfig>,
    /// The one story fetch shared by all requests.
    cache: Arc<StoryCache>,
}

/// Query string accepted by both page routes.
#[derive(Debug, Deserialize, Default)]
struct SearchParams {
    #[serde(default)]
    q: String,
}

/// Starts the server against the configured search API.
///
/// Binds to `[server].bind` and runs until the process is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let source = Arc::new(HnClient::from_config(&config.api)?);
    run_server_with_source(config, source).await
}

/// Like [`run_server`], but with a caller-supplied [`StorySource`].
pub async fn run_server_with_source(
    config: &Config,
    source: Arc<dyn StorySource>,
) -> anyhow::Result<()> {
    let bind_addr = config.server.bind.clone();
    let app = router(config, source);

    println!("hnf listening on http://{}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(config: &Config, source: Arc<dyn StorySource>) -> Router {
    let state = AppState {
        view: Arc::new(config.view.clone()),
        cache: StoryCache::new(source, Duration::from_secs(config.cache.ttl_secs)),
    };

    info!(key = %state.cache.key(), ttl_secs = config.cache.ttl_secs, "serving front page");

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handle_page))
        .route("/api/stories", get(handle_stories))
        .route("/health", get(handle_health))
        .layer(cors)
        .with_state(state)
}

// ============ GET / ============

async fn handle_page(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Html<String> {
    let fetch = state.cache.get().await;
    let page = view::render(&SearchState::new(params.q), &fetch, &state.view);
    debug!(cards = page.cards().len(), "rendered page");
    Html(render::html::render(&page))
}

// ============ GET /api/stories ============

async fn handle_stories(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Response {
    let fetch = state.cache.get().await;
    let page = view::render(&SearchState::new(params.q), &fetch, &state.view);

    let status = match page.body {
        Body::Skeleton(_) => StatusCode::SERVICE_UNAVAILABLE,
        Body::Error(_) => StatusCode::BAD_GATEWAY,
        Body::Stories(_) => StatusCode::OK,
    };

    match render::json::to_value(&page) {
        Ok(body) => (status, Json(body)).into_response(),
        Err(e) => {
            error!(error = %e, "failed to serialize page");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": { "message": e.to_string() } })),
            )
                .into_response()
        }
    }
}

// ============ GET /health ============

/// JSON response body for `GET /health`.
#[derive(Serialize)]
struct HealthResponse {
    /// Always `"ok"` when the server is running.
    status: String,
    /// The crate version from `Cargo.toml`.
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
