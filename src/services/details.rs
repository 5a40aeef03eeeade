use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::AppResult;
use crate::models::{CrewMember, MovieCredits, MovieId, MovieRecord, MovieVideo, WatchProviders};

use super::gateway::MovieGateway;

/// Similar titles shown on the detail screen
const SIMILAR_LIMIT: usize = 6;

/// Crew roles surfaced on the detail screen, in display order
const KEY_CREW_ROLES: [&str; 4] = ["Director", "Writer", "Screenplay", "Producer"];

/// Everything the detail screen needs for one movie
#[derive(Debug, Clone, Serialize)]
pub struct MovieDetails {
    pub movie: MovieRecord,
    pub credits: MovieCredits,
    pub videos: Vec<MovieVideo>,
    pub watch_providers: WatchProviders,
    pub similar: Vec<MovieRecord>,
    pub fetched_at: DateTime<Utc>,
}

/// Fetches the full detail bundle for one movie, all parts concurrently.
///
/// The movie and its credits are required: either failing fails the bundle.
/// Videos, watch providers, and similar titles are optional and degrade to
/// empty when their fetches fail; the screen renders without those rows.
pub async fn load_movie_details(
    gateway: &dyn MovieGateway,
    id: MovieId,
) -> AppResult<MovieDetails> {
    let (movie, credits, videos, watch_providers, similar) = tokio::join!(
        gateway.movie(id),
        gateway.credits(id),
        gateway.videos(id),
        gateway.watch_providers(id),
        gateway.similar(id),
    );

    let movie = movie?;
    let credits = credits?;

    let videos = videos.unwrap_or_else(|error| {
        tracing::warn!(movie_id = id, %error, "videos unavailable, rendering without a trailer");
        Vec::new()
    });

    let watch_providers = watch_providers.unwrap_or_else(|error| {
        tracing::warn!(movie_id = id, %error, "watch providers unavailable");
        WatchProviders::default()
    });

    let mut similar = similar.unwrap_or_else(|error| {
        tracing::warn!(movie_id = id, %error, "similar titles unavailable");
        Vec::new()
    });
    similar.truncate(SIMILAR_LIMIT);

    Ok(MovieDetails {
        movie,
        credits,
        videos,
        watch_providers,
        similar,
        fetched_at: Utc::now(),
    })
}

/// Picks the video to embed: the first YouTube trailer, else any YouTube video
pub fn pick_trailer(videos: &[MovieVideo]) -> Option<&MovieVideo> {
    videos
        .iter()
        .find(|v| v.video_type == "Trailer" && v.site == "YouTube")
        .or_else(|| videos.iter().find(|v| v.site == "YouTube"))
}

/// Key crew members in role order, deduplicated by person.
///
/// Someone credited for several key roles appears once, under the
/// highest-priority role.
pub fn key_crew(credits: &MovieCredits) -> Vec<CrewMember> {
    let mut members: Vec<CrewMember> = Vec::new();

    for role in KEY_CREW_ROLES {
        if let Some(member) = credits.crew.iter().find(|c| c.job == role) {
            if !members.iter().any(|m| m.id == member.id) {
                members.push(member.clone());
            }
        }
    }

    members
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::services::gateway::MockMovieGateway;

    fn video(video_type: &str, site: &str, key: &str) -> MovieVideo {
        MovieVideo {
            key: key.to_string(),
            site: site.to_string(),
            video_type: video_type.to_string(),
            name: None,
        }
    }

    fn crew(id: u64, name: &str, job: &str) -> CrewMember {
        CrewMember {
            id,
            name: name.to_string(),
            job: job.to_string(),
        }
    }

    fn happy_gateway() -> MockMovieGateway {
        let mut gateway = MockMovieGateway::new();
        gateway.expect_movie().returning(|id| Ok(MovieRecord::new(id)));
        gateway.expect_credits().returning(|_| Ok(MovieCredits::default()));
        gateway.expect_videos().returning(|_| Ok(Vec::new()));
        gateway
            .expect_watch_providers()
            .returning(|_| Ok(WatchProviders::default()));
        gateway.expect_similar().returning(|_| Ok(Vec::new()));
        gateway
    }

    #[tokio::test]
    async fn test_bundle_assembles_all_parts() {
        let details = load_movie_details(&happy_gateway(), 27205).await.unwrap();
        assert_eq!(details.movie.id, 27205);
    }

    #[tokio::test]
    async fn test_movie_failure_fails_the_bundle() {
        let mut gateway = MockMovieGateway::new();
        gateway
            .expect_movie()
            .returning(|_| Err(AppError::ExternalApi("not found".to_string())));
        gateway.expect_credits().returning(|_| Ok(MovieCredits::default()));
        gateway.expect_videos().returning(|_| Ok(Vec::new()));
        gateway
            .expect_watch_providers()
            .returning(|_| Ok(WatchProviders::default()));
        gateway.expect_similar().returning(|_| Ok(Vec::new()));

        assert!(load_movie_details(&gateway, 27205).await.is_err());
    }

    #[tokio::test]
    async fn test_optional_parts_degrade_to_empty() {
        let mut gateway = MockMovieGateway::new();
        gateway.expect_movie().returning(|id| Ok(MovieRecord::new(id)));
        gateway.expect_credits().returning(|_| Ok(MovieCredits::default()));
        gateway
            .expect_videos()
            .returning(|_| Err(AppError::ExternalApi("videos down".to_string())));
        gateway
            .expect_watch_providers()
            .returning(|_| Err(AppError::ExternalApi("providers down".to_string())));
        gateway
            .expect_similar()
            .returning(|_| Err(AppError::ExternalApi("similar down".to_string())));

        let details = load_movie_details(&gateway, 27205).await.unwrap();
        assert!(details.videos.is_empty());
        assert!(details.watch_providers.results.is_empty());
        assert!(details.similar.is_empty());
    }

    #[tokio::test]
    async fn test_similar_titles_are_capped() {
        let mut gateway = MockMovieGateway::new();
        gateway.expect_movie().returning(|id| Ok(MovieRecord::new(id)));
        gateway.expect_credits().returning(|_| Ok(MovieCredits::default()));
        gateway.expect_videos().returning(|_| Ok(Vec::new()));
        gateway
            .expect_watch_providers()
            .returning(|_| Ok(WatchProviders::default()));
        gateway
            .expect_similar()
            .returning(|_| Ok((1..=10).map(MovieRecord::new).collect()));

        let details = load_movie_details(&gateway, 27205).await.unwrap();
        assert_eq!(details.similar.len(), 6);
    }

    #[test]
    fn test_pick_trailer_prefers_youtube_trailers() {
        let videos = vec![
            video("Clip", "YouTube", "clip1"),
            video("Trailer", "Vimeo", "vimeo1"),
            video("Trailer", "YouTube", "official"),
        ];

        assert_eq!(pick_trailer(&videos).unwrap().key, "official");
    }

    #[test]
    fn test_pick_trailer_falls_back_to_any_youtube_video() {
        let videos = vec![
            video("Trailer", "Vimeo", "vimeo1"),
            video("Featurette", "YouTube", "featurette1"),
        ];

        assert_eq!(pick_trailer(&videos).unwrap().key, "featurette1");
    }

    #[test]
    fn test_pick_trailer_empty() {
        assert!(pick_trailer(&[]).is_none());
    }

    #[test]
    fn test_key_crew_orders_by_role_and_deduplicates() {
        let credits = MovieCredits {
            cast: Vec::new(),
            crew: vec![
                crew(2, "Jane Writer", "Writer"),
                crew(1, "Chris Nolan", "Director"),
                crew(1, "Chris Nolan", "Producer"),
                crew(3, "Sam Producer", "Producer"),
            ],
        };

        let members = key_crew(&credits);
        let names: Vec<&str> = members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Chris Nolan", "Jane Writer", "Sam Producer"]);
    }

    #[test]
    fn test_key_crew_ignores_other_roles() {
        let credits = MovieCredits {
            cast: Vec::new(),
            crew: vec![crew(9, "Key Grip", "Grip")],
        };

        assert!(key_crew(&credits).is_empty());
    }
}
