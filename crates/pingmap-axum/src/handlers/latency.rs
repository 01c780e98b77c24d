//! Latency feed handler.

use axum::Json;
use axum::extract::State;

use crate::dto::PingFeed;
use crate::state::AppState;

/// Serve the latency feed.
///
/// Returns the cached snapshot while it is fresh; a stale cache triggers one
/// probing pass before responding, so this call can take up to the probe
/// deadline when the window has lapsed.
pub async fn feed(State(state): State<AppState>) -> Json<PingFeed> {
    let snapshot = state.latency.snapshot().await;
    Json(PingFeed::from(snapshot.as_ref()))
}
