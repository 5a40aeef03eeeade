use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::AppResult;
use crate::models::MovieRecord;

use super::gateway::MovieGateway;

/// Each home section shows at most this many titles
const SECTION_LIMIT: usize = 20;

/// The six browse sections on the home screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedSection {
    Trending,
    RecentlyReleased,
    TopRated,
    Classics,
    OlderHits,
    AwardWinners,
}

impl FeedSection {
    pub const ALL: [FeedSection; 6] = [
        FeedSection::Trending,
        FeedSection::RecentlyReleased,
        FeedSection::TopRated,
        FeedSection::Classics,
        FeedSection::OlderHits,
        FeedSection::AwardWinners,
    ];

    /// Gateway list endpoint backing the section
    pub fn endpoint(&self) -> &'static str {
        match self {
            FeedSection::Trending => "/trending/movie/week",
            FeedSection::RecentlyReleased => "/movie/now_playing",
            FeedSection::TopRated => "/movie/top_rated",
            FeedSection::Classics | FeedSection::OlderHits | FeedSection::AwardWinners => {
                "/discover/movie"
            }
        }
    }

    /// Extra query parameters the section filters by
    pub fn params(&self) -> Vec<(String, String)> {
        fn param(key: &str, value: &str) -> (String, String) {
            (key.to_string(), value.to_string())
        }

        match self {
            FeedSection::Classics => vec![
                param("primary_release_date.lte", "1989-12-31"),
                param("sort_by", "vote_average.desc"),
                param("vote_count.gte", "1000"),
            ],
            FeedSection::OlderHits => vec![
                param("primary_release_date.gte", "1990-01-01"),
                param("primary_release_date.lte", "2010-12-31"),
                param("sort_by", "popularity.desc"),
                param("vote_count.gte", "1000"),
            ],
            FeedSection::AwardWinners => vec![
                param("sort_by", "vote_average.desc"),
                param("vote_count.gte", "5000"),
                param("primary_release_year", "2020|2021|2022|2023|2024|2025"),
            ],
            _ => Vec::new(),
        }
    }

    /// Section heading shown above the row
    pub fn title(&self) -> &'static str {
        match self {
            FeedSection::Trending => "Trending This Week",
            FeedSection::RecentlyReleased => "Recently Released",
            FeedSection::TopRated => "Top Rated",
            FeedSection::Classics => "Classics",
            FeedSection::OlderHits => "Older Hits (1990-2010)",
            FeedSection::AwardWinners => "Award Winners",
        }
    }
}

/// Assembled home screen data
#[derive(Debug, Clone, Serialize)]
pub struct HomeFeed {
    pub trending: Vec<MovieRecord>,
    pub recently_released: Vec<MovieRecord>,
    pub top_rated: Vec<MovieRecord>,
    pub classics: Vec<MovieRecord>,
    pub older_hits: Vec<MovieRecord>,
    pub award_winners: Vec<MovieRecord>,
    pub fetched_at: DateTime<Utc>,
}

/// Loads every home section concurrently.
///
/// The home screen renders all sections together, so any section failing
/// fails the whole load; there is no partial feed.
pub async fn load_home_feed(gateway: &dyn MovieGateway) -> AppResult<HomeFeed> {
    let (trending, recently_released, top_rated, classics, older_hits, award_winners) = tokio::join!(
        fetch_section(gateway, FeedSection::Trending),
        fetch_section(gateway, FeedSection::RecentlyReleased),
        fetch_section(gateway, FeedSection::TopRated),
        fetch_section(gateway, FeedSection::Classics),
        fetch_section(gateway, FeedSection::OlderHits),
        fetch_section(gateway, FeedSection::AwardWinners),
    );

    Ok(HomeFeed {
        trending: trending?,
        recently_released: recently_released?,
        top_rated: top_rated?,
        classics: classics?,
        older_hits: older_hits?,
        award_winners: award_winners?,
        fetched_at: Utc::now(),
    })
}

async fn fetch_section(
    gateway: &dyn MovieGateway,
    section: FeedSection,
) -> AppResult<Vec<MovieRecord>> {
    let mut movies = gateway.list(section.endpoint(), &section.params()).await?;
    movies.truncate(SECTION_LIMIT);
    Ok(movies)
}
