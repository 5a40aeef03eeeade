use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;

use crate::error::{AppError, AppResult};
use crate::models::{
    MovieCredits, MovieId, MoviePage, MovieRecord, MovieVideo, VideoPage, WatchProviders,
};

/// Read-only movie metadata source, as the screens see it.
///
/// One implementation speaks the relay's wire contract; tests substitute a
/// mock. Every method is an independent one-shot fetch with no ordering
/// guarantees between them.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MovieGateway: Send + Sync {
    /// Fetches one page of a movie list endpoint (trending, discover, search, ...)
    async fn list(&self, endpoint: &str, params: &[(String, String)]) -> AppResult<Vec<MovieRecord>>;

    /// Fetches the full record for one movie
    async fn movie(&self, id: MovieId) -> AppResult<MovieRecord>;

    /// Fetches cast and crew for one movie
    async fn credits(&self, id: MovieId) -> AppResult<MovieCredits>;

    /// Fetches promotional videos for one movie
    async fn videos(&self, id: MovieId) -> AppResult<Vec<MovieVideo>>;

    /// Fetches the per-region watch provider map for one movie
    async fn watch_providers(&self, id: MovieId) -> AppResult<WatchProviders>;

    /// Fetches titles similar to one movie
    async fn similar(&self, id: MovieId) -> AppResult<Vec<MovieRecord>>;
}

/// Gateway client speaking the relay's wire contract.
///
/// Issues `GET <relay_url>?endpoint=<path>&...` and treats any non-200 relay
/// response as a hard failure for that request; the relay has already
/// collapsed upstream detail away.
#[derive(Clone)]
pub struct RelayClient {
    http_client: HttpClient,
    relay_url: String,
}

impl RelayClient {
    /// `relay_url` is the full relay route, e.g. `http://localhost:3000/api/tmdb`
    pub fn new(relay_url: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            relay_url: relay_url.into(),
        }
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(String, String)],
    ) -> AppResult<T> {
        let mut query: Vec<(&str, &str)> = vec![("endpoint", endpoint)];
        query.extend(params.iter().map(|(k, v)| (k.as_str(), v.as_str())));

        let response = self
            .http_client
            .get(&self.relay_url)
            .query(&query)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApi(format!(
                "Relay returned status {} for {}",
                response.status(),
                endpoint
            )));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl MovieGateway for RelayClient {
    async fn list(&self, endpoint: &str, params: &[(String, String)]) -> AppResult<Vec<MovieRecord>> {
        let page: MoviePage = self.fetch(endpoint, params).await?;
        Ok(page.results)
    }

    async fn movie(&self, id: MovieId) -> AppResult<MovieRecord> {
        self.fetch(&format!("/movie/{id}"), &[]).await
    }

    async fn credits(&self, id: MovieId) -> AppResult<MovieCredits> {
        self.fetch(&format!("/movie/{id}/credits"), &[]).await
    }

    async fn videos(&self, id: MovieId) -> AppResult<Vec<MovieVideo>> {
        let page: VideoPage = self.fetch(&format!("/movie/{id}/videos"), &[]).await?;
        Ok(page.results)
    }

    async fn watch_providers(&self, id: MovieId) -> AppResult<WatchProviders> {
        self.fetch(&format!("/movie/{id}/watch/providers"), &[]).await
    }

    async fn similar(&self, id: MovieId) -> AppResult<Vec<MovieRecord>> {
        let page: MoviePage = self.fetch(&format!("/movie/{id}/similar"), &[]).await?;
        Ok(page.results)
    }
}
