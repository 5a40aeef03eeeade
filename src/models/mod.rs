pub mod collection;
pub mod movie;

pub use collection::Collection;
pub use movie::{
    CastMember, CrewMember, MovieCredits, MovieId, MoviePage, MovieRecord, MovieVideo, VideoPage,
    WatchProviders,
};
