use std::sync::Arc;

use reqwest::Client as HttpClient;

use crate::config::Config;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<AppStateInner>,
}

pub struct AppStateInner {
    /// Reused connection pool for gateway requests
    pub http_client: HttpClient,
    /// Server-held credential appended to every forwarded request
    pub tmdb_api_key: String,
    /// Gateway base URL the relay forwards to
    pub tmdb_base_url: String,
}

impl AppState {
    /// Creates state from loaded configuration
    pub fn new(config: &Config) -> Self {
        Self::with_gateway(config.tmdb_api_key.clone(), config.tmdb_base_url.clone())
    }

    /// Creates state pointing at an explicit gateway; tests use this to aim
    /// the relay at a stub server.
    pub fn with_gateway(tmdb_api_key: String, tmdb_base_url: String) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                http_client: HttpClient::new(),
                tmdb_api_key,
                tmdb_base_url,
            }),
        }
    }
}
