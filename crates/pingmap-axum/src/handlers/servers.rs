//! Upstream server-list proxy handler.

use axum::Json;
use axum::extract::State;
use tracing::warn;

use crate::error::HttpError;
use crate::state::AppState;

/// Relay the upstream server list unchanged.
///
/// The upstream is queried with `full=false` plus the configured
/// credentials; its JSON body is passed through untouched.
pub async fn list(State(state): State<AppState>) -> Result<Json<serde_json::Value>, HttpError> {
    let Some(config) = state.server_list.as_ref() else {
        return Err(HttpError::ServiceUnavailable(
            "server list upstream is not configured".to_string(),
        ));
    };

    let mut request = state.http.get(&config.url).query(&[("full", "false")]);
    if let Some(token) = config.token.as_deref() {
        request = request.query(&[("token", token)]);
    }
    if let Some(login) = config.login.as_deref() {
        request = request.query(&[("login", login)]);
    }

    let response = request.send().await?;
    if !response.status().is_success() {
        warn!(status = %response.status(), "server list upstream returned an error");
        return Err(HttpError::ServiceUnavailable(format!(
            "upstream returned {}",
            response.status()
        )));
    }

    Ok(Json(response.json().await?))
}
