use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::AbortHandle;

use crate::error::{AppError, AppResult};
use crate::models::MovieId;

use super::details::{load_movie_details, MovieDetails};
use super::gateway::MovieGateway;

/// Drives detail-screen loads so only the most recent navigation wins.
///
/// Starting a load for a new movie aborts the in-flight one. An aborted or
/// superseded load resolves to [`AppError::Cancelled`], which callers discard
/// silently; stale data is never handed back, even when the old fetch
/// completed before the abort landed.
pub struct DetailLoader {
    gateway: Arc<dyn MovieGateway>,
    active: Mutex<ActiveLoad>,
}

struct ActiveLoad {
    generation: u64,
    abort: Option<AbortHandle>,
}

impl DetailLoader {
    pub fn new(gateway: Arc<dyn MovieGateway>) -> Self {
        Self {
            gateway,
            active: Mutex::new(ActiveLoad {
                generation: 0,
                abort: None,
            }),
        }
    }

    /// Loads the detail bundle for `id`, superseding any in-flight load
    pub async fn load(&self, id: MovieId) -> AppResult<MovieDetails> {
        let gateway = Arc::clone(&self.gateway);
        let task = tokio::spawn(async move { load_movie_details(gateway.as_ref(), id).await });

        let generation = {
            let mut active = self.lock_active();
            if let Some(abort) = active.abort.take() {
                abort.abort();
            }
            active.generation += 1;
            active.abort = Some(task.abort_handle());
            active.generation
        };

        let result = match task.await {
            Ok(result) => result,
            Err(join_error) if join_error.is_cancelled() => Err(AppError::Cancelled),
            Err(join_error) => Err(AppError::Internal(join_error.to_string())),
        };

        let mut active = self.lock_active();
        if active.generation != generation {
            // a newer navigation landed while this one was resolving
            return Err(AppError::Cancelled);
        }
        active.abort = None;
        result
    }

    fn lock_active(&self) -> MutexGuard<'_, ActiveLoad> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::time::Duration;

    use crate::models::{MovieCredits, MovieRecord, MovieVideo, WatchProviders};

    /// Gateway whose detail fetch stalls for one chosen movie
    struct StallingGateway {
        stall_id: MovieId,
        stall: Duration,
    }

    #[async_trait]
    impl MovieGateway for StallingGateway {
        async fn list(
            &self,
            _endpoint: &str,
            _params: &[(String, String)],
        ) -> AppResult<Vec<MovieRecord>> {
            Ok(Vec::new())
        }

        async fn movie(&self, id: MovieId) -> AppResult<MovieRecord> {
            if id == self.stall_id {
                tokio::time::sleep(self.stall).await;
            }
            Ok(MovieRecord::new(id))
        }

        async fn credits(&self, _id: MovieId) -> AppResult<MovieCredits> {
            Ok(MovieCredits::default())
        }

        async fn videos(&self, _id: MovieId) -> AppResult<Vec<MovieVideo>> {
            Ok(Vec::new())
        }

        async fn watch_providers(&self, _id: MovieId) -> AppResult<WatchProviders> {
            Ok(WatchProviders::default())
        }

        async fn similar(&self, _id: MovieId) -> AppResult<Vec<MovieRecord>> {
            Ok(Vec::new())
        }
    }

    fn loader(stall_id: MovieId, stall: Duration) -> Arc<DetailLoader> {
        Arc::new(DetailLoader::new(Arc::new(StallingGateway {
            stall_id,
            stall,
        })))
    }

    #[tokio::test]
    async fn test_single_load_resolves() {
        let loader = loader(0, Duration::ZERO);

        let details = loader.load(27205).await.unwrap();
        assert_eq!(details.movie.id, 27205);
    }

    #[tokio::test]
    async fn test_newer_navigation_wins() {
        // Movie A stalls; navigating to movie B must abort A and resolve B.
        let loader = loader(1, Duration::from_secs(5));

        let first = {
            let loader = Arc::clone(&loader);
            tokio::spawn(async move { loader.load(1).await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;

        let second = loader.load(2).await.unwrap();
        assert_eq!(second.movie.id, 2);

        let first = first.await.unwrap();
        match first {
            Err(error) => assert!(error.is_cancelled()),
            Ok(details) => panic!("stale load applied: {:?}", details.movie.id),
        }
    }

    #[tokio::test]
    async fn test_sequential_loads_both_resolve() {
        let loader = loader(0, Duration::ZERO);

        assert_eq!(loader.load(1).await.unwrap().movie.id, 1);
        assert_eq!(loader.load(2).await.unwrap().movie.id, 2);
    }
}
