//! Endpoint paths and wire types private to the client.

use serde::{Deserialize, Serialize};

use setlist_core::Result;
use setlist_core::error::InvalidInputError;

// ============================================================================
// Endpoint Paths
// ============================================================================

pub const LOGIN: &str = "/auth/login";

pub const REGISTER: &str = "/auth/register";

pub const REFRESH_TOKEN: &str = "/auth/refresh-token";

pub const PLAYLISTS: &str = "/playlists";

pub const CATALOG_SEARCH: &str = "/spotify/search";

pub const CATALOG_RECOMMENDATIONS: &str = "/spotify/recommendations";

pub const CATALOG_PLAYLISTS: &str = "/spotify/playlists";

/// `/playlists/{id}`
pub fn playlist(id: &str) -> Result<String> {
    Ok(format!("{}/{}", PLAYLISTS, segment("playlist", id)?))
}

/// `/playlists/{id}/songs`
pub fn playlist_songs(id: &str) -> Result<String> {
    Ok(format!("{}/songs", playlist(id)?))
}

/// `/playlists/{id}/songs/{songId}`
pub fn playlist_song(id: &str, song_id: &str) -> Result<String> {
    Ok(format!(
        "{}/{}",
        playlist_songs(id)?,
        segment("song", song_id)?
    ))
}

/// `/spotify/playlists/{id}/tracks`
pub fn catalog_playlist_tracks(id: &str) -> Result<String> {
    Ok(format!(
        "{}/{}/tracks",
        CATALOG_PLAYLISTS,
        segment("catalog playlist", id)?
    ))
}

fn segment(kind: &'static str, id: &str) -> Result<String> {
    let id = id.trim();
    if id.is_empty() {
        return Err(InvalidInputError::EmptyId { kind }.into());
    }
    Ok(urlencoding::encode(id).into_owned())
}

// ============================================================================
// Wire Types
// ============================================================================

/// Request body for the refresh endpoint.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest<'a> {
    pub refresh_token: &'a str,
}

/// Response from the refresh endpoint.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenResponse {
    pub token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Request body for adding a song to a playlist.
#[derive(Serialize)]
pub struct AddSongRequest<'a, S: Serialize> {
    pub song: &'a S,
}

/// Request body for adding a track to a catalog playlist.
#[derive(Serialize)]
pub struct AddCatalogTrackRequest<'a> {
    pub uri: &'a str,
}

/// The catalog playlist listing arrives either bare or paged.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum CatalogPlaylistsResponse<T> {
    List(Vec<T>),
    Paged { items: Vec<T> },
}

impl<T> CatalogPlaylistsResponse<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            CatalogPlaylistsResponse::List(items) => items,
            CatalogPlaylistsResponse::Paged { items } => items,
        }
    }
}
