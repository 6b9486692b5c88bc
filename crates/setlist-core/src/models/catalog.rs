//! Music catalog types, as relayed by the backend's catalog proxy.

use serde::{Deserialize, Serialize};

use super::song::Song;

/// A catalog track. The backend relays catalog hits in the playlist song shape.
pub type CatalogTrack = Song;

/// Result of a catalog search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSearchResults {
    #[serde(default)]
    pub tracks: Vec<CatalogTrack>,
}

/// Result of a recommendation query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    #[serde(default)]
    pub tracks: Vec<CatalogTrack>,
}

/// A playlist in the user's linked catalog account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogPlaylist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub images: Vec<CatalogImage>,
    #[serde(default)]
    pub tracks: TrackCount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogImage {
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackCount {
    pub total: u32,
}

/// Seeds for a recommendation query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecommendationSeeds {
    pub tracks: Vec<String>,
    pub artists: Vec<String>,
    pub genres: Vec<String>,
}

impl RecommendationSeeds {
    /// Returns true if no seed of any kind is set.
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty() && self.artists.is_empty() && self.genres.is_empty()
    }

    /// Query pairs, comma-joined per kind; empty kinds are omitted.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        [
            ("seed_tracks", &self.tracks),
            ("seed_artists", &self.artists),
            ("seed_genres", &self.genres),
        ]
        .into_iter()
        .filter(|(_, seeds)| !seeds.is_empty())
        .map(|(key, seeds)| (key, seeds.join(",")))
        .collect()
    }
}
