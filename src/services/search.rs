use crate::error::AppResult;
use crate::models::MovieRecord;

use super::gateway::MovieGateway;

/// Runs a title search through the gateway.
///
/// A blank or whitespace-only query resolves to an empty result without
/// touching the network.
pub async fn search_movies(gateway: &dyn MovieGateway, query: &str) -> AppResult<Vec<MovieRecord>> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(Vec::new());
    }

    gateway
        .list(
            "/search/movie",
            &[("query".to_string(), query.to_string())],
        )
        .await
}
