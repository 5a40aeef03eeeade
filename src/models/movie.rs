use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// TMDB movie identifier
pub type MovieId = u64;

/// A movie as the gateway describes it.
///
/// Only the identifier is interpreted; every other field rides along verbatim
/// so a gateway payload survives a store round-trip unmodified. Future shape
/// changes on the gateway side need no changes here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieRecord {
    /// Stable unique identifier assigned by the gateway
    pub id: MovieId,
    /// Everything else (title, poster path, release date, rating, ...)
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl MovieRecord {
    /// Creates a record carrying only an identifier
    pub fn new(id: MovieId) -> Self {
        Self {
            id,
            fields: Map::new(),
        }
    }

    /// Looks up a string field by its gateway name (e.g. `title`)
    pub fn field_str(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }
}

/// One page of a movie list response (trending, discover, search, ...)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MoviePage {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<MovieRecord>,
}

/// Credits for one movie (`/movie/{id}/credits`)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MovieCredits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

/// A cast entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
}

/// A crew entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CrewMember {
    pub id: u64,
    pub name: String,
    pub job: String,
}

/// A promotional video attached to a movie
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieVideo {
    pub key: String,
    pub site: String,
    #[serde(rename = "type")]
    pub video_type: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Video list response (`/movie/{id}/videos`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoPage {
    #[serde(default)]
    pub results: Vec<MovieVideo>,
}

/// Watch provider response (`/movie/{id}/watch/providers`).
///
/// The region map stays opaque; the shape is owned by the gateway.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WatchProviders {
    #[serde(default)]
    pub results: Map<String, Value>,
}
