//! In-process mock directory backend for integration tests

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Scripted behavior for the mock backend.
pub struct MockBehavior {
    /// Body served by `GET /api/artists`
    pub artists: Value,
    /// Serve HTTP 500 for the first N artist fetches
    pub artists_fail_first: usize,
    /// Serve a non-array body on `GET /api/artists`
    pub artists_malformed: bool,
    /// Queries containing this substring hit the location routes
    pub location_match: String,
    /// Body served by `GET /api/search/locations` on a match
    pub location_artists: Value,
    /// Strings served by `GET /api/suggestions/locations` on a match
    pub location_suggestions: Vec<String>,
    /// Artificial latency on the suggestion route (stale-response tests)
    pub suggestion_delay: Duration,
}

impl Default for MockBehavior {
    fn default() -> Self {
        Self {
            artists: json!([]),
            artists_fail_first: 0,
            artists_malformed: false,
            location_match: "london".to_string(),
            location_artists: json!([]),
            location_suggestions: Vec::new(),
            suggestion_delay: Duration::ZERO,
        }
    }
}

/// Request counters, observable from tests.
#[derive(Default)]
pub struct Hits {
    pub artists: AtomicUsize,
    pub search: AtomicUsize,
    pub search_locations: AtomicUsize,
    pub location_suggestions: AtomicUsize,
    pub refresh: AtomicUsize,
    /// `limit` parameter seen by the last suggestion request
    pub last_suggestion_limit: AtomicUsize,
}

struct MockState {
    behavior: MockBehavior,
    hits: Arc<Hits>,
}

/// A running mock backend on an ephemeral port.
pub struct MockDirectory {
    pub base_url: String,
    pub hits: Arc<Hits>,
}

impl MockDirectory {
    pub async fn spawn(behavior: MockBehavior) -> Self {
        let hits = Arc::new(Hits::default());
        let state = Arc::new(MockState {
            behavior,
            hits: hits.clone(),
        });

        let app = Router::new()
            .route("/api/artists", get(artists))
            .route("/api/search", get(search))
            .route("/api/search/locations", get(search_locations))
            .route("/api/suggestions/locations", get(location_suggestions))
            .route("/api/refresh-cache", post(refresh_cache))
            .route("/api/cache/status", get(cache_status))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Should bind ephemeral port");
        let addr = listener.local_addr().expect("Should read local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Mock backend failed");
        });

        Self {
            base_url: format!("http://{}", addr),
            hits,
        }
    }
}

async fn artists(State(state): State<Arc<MockState>>) -> Response {
    let hit = state.hits.artists.fetch_add(1, Ordering::SeqCst);
    if hit < state.behavior.artists_fail_first {
        return (StatusCode::INTERNAL_SERVER_ERROR, "upstream unavailable").into_response();
    }
    if state.behavior.artists_malformed {
        return Json(json!({"unexpected": "shape"})).into_response();
    }
    Json(state.behavior.artists.clone()).into_response()
}

async fn search(
    State(state): State<Arc<MockState>>,
    Query(_params): Query<HashMap<String, String>>,
) -> Json<Value> {
    state.hits.search.fetch_add(1, Ordering::SeqCst);
    Json(state.behavior.artists.clone())
}

async fn search_locations(
    State(state): State<Arc<MockState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    state.hits.search_locations.fetch_add(1, Ordering::SeqCst);
    let q = params.get("q").cloned().unwrap_or_default().to_lowercase();
    if !q.is_empty() && q.contains(&state.behavior.location_match) {
        Json(state.behavior.location_artists.clone())
    } else {
        Json(json!([]))
    }
}

async fn location_suggestions(
    State(state): State<Arc<MockState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    state.hits.location_suggestions.fetch_add(1, Ordering::SeqCst);
    if let Some(limit) = params.get("limit").and_then(|l| l.parse().ok()) {
        state
            .hits
            .last_suggestion_limit
            .store(limit, Ordering::SeqCst);
    }
    if !state.behavior.suggestion_delay.is_zero() {
        tokio::time::sleep(state.behavior.suggestion_delay).await;
    }
    let q = params.get("q").cloned().unwrap_or_default().to_lowercase();
    if q.contains(&state.behavior.location_match) {
        Json(json!(state.behavior.location_suggestions.clone()))
    } else {
        Json(json!([]))
    }
}

async fn refresh_cache(State(state): State<Arc<MockState>>) -> StatusCode {
    state.hits.refresh.fetch_add(1, Ordering::SeqCst);
    StatusCode::OK
}

async fn cache_status(State(state): State<Arc<MockState>>) -> Json<Value> {
    let count = state.behavior.artists.as_array().map(|a| a.len()).unwrap_or(0);
    Json(json!({"cached": true, "artistCount": count}))
}

/// Standard two-artist fixture used across tests.
pub fn sample_artists() -> Value {
    json!([
        {
            "id": 1,
            "name": "Queen",
            "members": ["Freddie Mercury", "Brian May"],
            "creationDate": 1970,
            "firstAlbum": "Queen",
            "image": "q.jpg"
        },
        {
            "id": 2,
            "name": "Pink Floyd",
            "members": ["David Gilmour", "Roger Waters"],
            "creationDate": 1965,
            "firstAlbum": "The Piper at the Gates of Dawn",
            "image": "pf.jpg"
        }
    ])
}
