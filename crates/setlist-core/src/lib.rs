//! setlist-core - Core types and traits for the setlist playlist client.

pub mod credentials;
pub mod error;
pub mod models;
pub mod store;
pub mod tokens;
pub mod types;

pub use credentials::{LoginRequest, RegisterRequest};
pub use error::Error;
pub use models::{
    AuthResponse, CatalogPlaylist, CatalogSearchResults, CatalogTrack, NewPlaylist, Playlist,
    PlaylistUpdate, RecommendationSeeds, Recommendations, Song, SongDuration, SongUpdate, User,
};
pub use store::{CredentialStore, MemoryCredentialStore, TokenSlot};
pub use tokens::{AccessToken, Credential, RefreshToken};
pub use types::ApiUrl;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
