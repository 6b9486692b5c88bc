//! Domain models exchanged with the playlist backend.
//!
//! Field names follow the backend's camelCase JSON. Optional fields default
//! when absent so that partially populated documents still decode.

mod catalog;
mod playlist;
mod song;
mod user;

pub use catalog::{
    CatalogImage, CatalogPlaylist, CatalogSearchResults, CatalogTrack, RecommendationSeeds,
    Recommendations, TrackCount,
};
pub use playlist::{NewPlaylist, Playlist, PlaylistUpdate};
pub use song::{Artist, Song, SongDuration, SongUpdate};
pub use user::{AuthResponse, User};
