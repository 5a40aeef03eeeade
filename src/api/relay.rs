use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    Json,
};
use serde_json::Value;

use crate::error::{AppError, AppResult};

use super::AppState;

/// Pass-through relay to the TMDB gateway.
///
/// Takes a logical `endpoint` path, forwards every other query parameter
/// verbatim along with the server-held credential, and relays the gateway's
/// JSON body unmodified. Stateless: no caching, no retries, no rate limiting.
/// Every upstream problem (network, error status, non-JSON body) collapses to
/// the same 500 response so no gateway detail reaches the client.
pub async fn relay(
    State(state): State<AppState>,
    Query(mut params): Query<HashMap<String, String>>,
) -> AppResult<Json<Value>> {
    let Some(endpoint) = params.remove("endpoint").filter(|e| !e.is_empty()) else {
        return Err(AppError::InvalidInput("Endpoint is required".to_string()));
    };

    let url = format!("{}{}", state.inner.tmdb_base_url, endpoint);
    let mut query: Vec<(&str, &str)> = vec![("api_key", state.inner.tmdb_api_key.as_str())];
    query.extend(params.iter().map(|(k, v)| (k.as_str(), v.as_str())));

    let response = state
        .inner
        .http_client
        .get(&url)
        .query(&query)
        .send()
        .await
        .map_err(|error| {
            tracing::error!(%error, endpoint = %endpoint, "TMDB request failed");
            AppError::UpstreamFetch
        })?;

    if !response.status().is_success() {
        tracing::error!(status = %response.status(), endpoint = %endpoint, "TMDB returned an error status");
        return Err(AppError::UpstreamFetch);
    }

    let body: Value = response.json().await.map_err(|error| {
        tracing::error!(%error, endpoint = %endpoint, "TMDB returned a non-JSON body");
        AppError::UpstreamFetch
    })?;

    Ok(Json(body))
}
