//! Music catalog operations, proxied by the backend.

use tracing::{debug, instrument};

use setlist_core::error::InvalidInputError;
use setlist_core::{CatalogPlaylist, CatalogSearchResults, RecommendationSeeds, Recommendations, Result};

use crate::client::ApiClient;
use crate::endpoints::{
    self, AddCatalogTrackRequest, CATALOG_PLAYLISTS, CATALOG_RECOMMENDATIONS, CATALOG_SEARCH,
    CatalogPlaylistsResponse,
};
use crate::request::ApiRequest;

impl ApiClient {
    /// Search the catalog for tracks.
    #[instrument(skip(self))]
    pub async fn search_tracks(&self, query: &str) -> Result<CatalogSearchResults> {
        let query = query.trim();
        if query.is_empty() {
            return Err(InvalidInputError::EmptyQuery.into());
        }

        debug!("Searching catalog");
        self.send_json(&ApiRequest::get(CATALOG_SEARCH).query("q", query))
            .await
    }

    /// Tracks recommended from the given seeds.
    #[instrument(skip(self))]
    pub async fn recommendations(&self, seeds: &RecommendationSeeds) -> Result<Recommendations> {
        if seeds.is_empty() {
            return Err(InvalidInputError::Other {
                message: "at least one recommendation seed is required".to_string(),
            }
            .into());
        }

        let request = seeds
            .to_query()
            .into_iter()
            .fold(ApiRequest::get(CATALOG_RECOMMENDATIONS), |request, (key, value)| {
                request.query(key, value)
            });

        debug!("Fetching recommendations");
        self.send_json(&request).await
    }

    /// Playlists in the user's linked catalog account.
    #[instrument(skip(self))]
    pub async fn catalog_playlists(&self) -> Result<Vec<CatalogPlaylist>> {
        debug!("Listing catalog playlists");
        let response: CatalogPlaylistsResponse<CatalogPlaylist> =
            self.get_json(CATALOG_PLAYLISTS).await?;
        Ok(response.into_vec())
    }

    /// Append a track to a catalog playlist.
    #[instrument(skip(self))]
    pub async fn add_to_catalog_playlist(&self, playlist_id: &str, track_uri: &str) -> Result<()> {
        if track_uri.trim().is_empty() {
            return Err(InvalidInputError::Other {
                message: "track URI must not be empty".to_string(),
            }
            .into());
        }

        let request = ApiRequest::post(endpoints::catalog_playlist_tracks(playlist_id)?)
            .json(&AddCatalogTrackRequest { uri: track_uri })?;

        debug!("Adding track to catalog playlist");
        self.send(&request).await.map(|_| ())
    }
}
