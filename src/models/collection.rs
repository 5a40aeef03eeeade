use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The three personal movie lists.
///
/// Each persists independently under its own storage key; there is no
/// cross-collection invariant, so one movie may sit in all three at once.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Watched,
    Watchlist,
    Favorites,
}

impl Collection {
    pub const ALL: [Collection; 3] = [
        Collection::Watched,
        Collection::Watchlist,
        Collection::Favorites,
    ];

    /// Storage key the collection persists under
    pub fn key(&self) -> &'static str {
        match self {
            Collection::Watched => "watched",
            Collection::Watchlist => "watchlist",
            Collection::Favorites => "favorites",
        }
    }
}

impl Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}
