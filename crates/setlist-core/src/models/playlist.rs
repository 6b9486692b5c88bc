//! Playlist types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::song::Song;

/// A playlist owned by the authenticated user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Owner id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub songs: Vec<Song>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of a playlist creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPlaylist {
    pub name: String,
    pub description: String,
    pub is_public: bool,
}

impl NewPlaylist {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            is_public: false,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn public(mut self, is_public: bool) -> Self {
        self.is_public = is_public;
        self
    }
}

/// Partial update of a playlist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
}

impl PlaylistUpdate {
    /// Returns true if the update would change nothing.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_backend_document() {
        let playlist: Playlist = serde_json::from_value(json!({
            "_id": "p1",
            "name": "Road trip",
            "description": "Loud",
            "user": "u1",
            "isPublic": true,
            "songs": [],
            "createdAt": "2024-03-01T12:00:00.000Z",
            "updatedAt": "2024-03-02T08:30:00.000Z",
            "__v": 0
        }))
        .unwrap();

        assert_eq!(playlist.id, "p1");
        assert!(playlist.is_public);
        assert!(playlist.created_at.is_some());
    }

    #[test]
    fn decodes_minimal_document() {
        let playlist: Playlist =
            serde_json::from_value(json!({"_id": "p2", "name": "Empty"})).unwrap();
        assert_eq!(playlist.description, "");
        assert!(!playlist.is_public);
        assert!(playlist.songs.is_empty());
    }

    #[test]
    fn new_playlist_wire_format() {
        let body = NewPlaylist::new("Focus").description("Deep work").public(true);
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"name": "Focus", "description": "Deep work", "isPublic": true})
        );
    }

    #[test]
    fn playlist_update_sends_only_changed_fields() {
        let update = PlaylistUpdate {
            is_public: Some(false),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({"isPublic": false}));
        assert!(PlaylistUpdate::default().is_empty());
    }
}
