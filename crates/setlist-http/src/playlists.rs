//! Playlist and song operations.

use tracing::{debug, instrument};

use setlist_core::{NewPlaylist, Playlist, PlaylistUpdate, Result, Song, SongUpdate};

use crate::client::ApiClient;
use crate::endpoints::{self, AddSongRequest, PLAYLISTS};

impl ApiClient {
    /// List the user's playlists.
    #[instrument(skip(self))]
    pub async fn list_playlists(&self) -> Result<Vec<Playlist>> {
        debug!("Listing playlists");
        self.get_json(PLAYLISTS).await
    }

    /// Fetch one playlist with its songs.
    #[instrument(skip(self))]
    pub async fn get_playlist(&self, id: &str) -> Result<Playlist> {
        debug!("Getting playlist");
        self.get_json(&endpoints::playlist(id)?).await
    }

    #[instrument(skip(self, playlist), fields(name = %playlist.name))]
    pub async fn create_playlist(&self, playlist: &NewPlaylist) -> Result<Playlist> {
        debug!("Creating playlist");
        self.post_json(PLAYLISTS, playlist).await
    }

    #[instrument(skip(self, update))]
    pub async fn update_playlist(&self, id: &str, update: &PlaylistUpdate) -> Result<Playlist> {
        debug!("Updating playlist");
        self.put_json(&endpoints::playlist(id)?, update).await
    }

    #[instrument(skip(self))]
    pub async fn delete_playlist(&self, id: &str) -> Result<()> {
        debug!("Deleting playlist");
        self.delete(&endpoints::playlist(id)?).await
    }

    /// Add a song; returns the updated playlist.
    #[instrument(skip(self, song), fields(spotify_id = %song.spotify_id))]
    pub async fn add_song(&self, playlist_id: &str, song: &Song) -> Result<Playlist> {
        debug!("Adding song");
        self.post_json(
            &endpoints::playlist_songs(playlist_id)?,
            &AddSongRequest { song },
        )
        .await
    }

    /// Edit a song in place; returns the updated playlist.
    #[instrument(skip(self, update))]
    pub async fn update_song(
        &self,
        playlist_id: &str,
        song_id: &str,
        update: &SongUpdate,
    ) -> Result<Playlist> {
        debug!("Updating song");
        self.put_json(&endpoints::playlist_song(playlist_id, song_id)?, update)
            .await
    }

    /// Remove a song; returns the updated playlist.
    #[instrument(skip(self))]
    pub async fn remove_song(&self, playlist_id: &str, song_id: &str) -> Result<Playlist> {
        debug!("Removing song");
        self.delete_json(&endpoints::playlist_song(playlist_id, song_id)?)
            .await
    }
}
