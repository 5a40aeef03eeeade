pub mod details;
pub mod feed;
pub mod gateway;
pub mod loader;
pub mod search;

pub use details::{key_crew, load_movie_details, pick_trailer, MovieDetails};
pub use feed::{load_home_feed, FeedSection, HomeFeed};
pub use gateway::{MovieGateway, RelayClient};
pub use loader::DetailLoader;
pub use search::search_movies;
