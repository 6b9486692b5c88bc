//! Song types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A song stored in a playlist, or a track returned by catalog search.
///
/// Older documents name the track `title`; newer ones use `name`, and some
/// carry both. `name` wins when both are present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "SongRecord")]
pub struct Song {
    /// Backend id of the song entry inside a playlist.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Catalog id of the track.
    pub spotify_id: String,
    pub name: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub artists: Vec<Artist>,
    #[serde(default)]
    pub album: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<SongDuration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album_art: Option<String>,
    /// Catalog URI (`spotify:track:...`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
}

/// Wire form of [`Song`] accepting either title key.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SongRecord {
    #[serde(rename = "_id", default)]
    id: Option<String>,
    spotify_id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    artist: String,
    #[serde(default)]
    artists: Vec<Artist>,
    #[serde(default)]
    album: String,
    #[serde(default)]
    album_id: Option<String>,
    #[serde(default)]
    duration: Option<SongDuration>,
    #[serde(default)]
    album_art: Option<String>,
    #[serde(default)]
    uri: Option<String>,
    #[serde(default)]
    preview_url: Option<String>,
}

impl From<SongRecord> for Song {
    fn from(record: SongRecord) -> Self {
        Self {
            id: record.id,
            spotify_id: record.spotify_id,
            name: record.name.or(record.title).unwrap_or_default(),
            artist: record.artist,
            artists: record.artists,
            album: record.album,
            album_id: record.album_id,
            duration: record.duration,
            album_art: record.album_art,
            uri: record.uri,
            preview_url: record.preview_url,
        }
    }
}

impl Song {
    /// The id used to address this song inside a playlist.
    ///
    /// Falls back to the catalog id for entries the backend stored without
    /// their own id.
    pub fn entry_id(&self) -> &str {
        self.id.as_deref().unwrap_or(&self.spotify_id)
    }
}

/// A performing artist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
}

/// Track duration as the backend reports it.
///
/// Older documents store milliseconds, newer ones a preformatted string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SongDuration {
    Millis(u64),
    Text(String),
}

impl fmt::Display for SongDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SongDuration::Millis(ms) => {
                let secs = ms / 1000;
                write!(f, "{}:{:02}", secs / 60, secs % 60)
            }
            SongDuration::Text(text) => f.write_str(text),
        }
    }
}

/// Partial update of a song inside a playlist.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SongUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<SongDuration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album_art: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
}

impl SongUpdate {
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
    fn decodes_stored_song_with_numeric_duration() {
        let song: Song = serde_json::from_value(json!({
            "_id": "665f",
            "spotifyId": "4uLU6hMCjMI75M1A2tKUQC",
            "title": "Never Gonna Give You Up",
            "artist": "Rick Astley",
            "album": "Whenever You Need Somebody",
            "duration": 213573
        }))
        .unwrap();

        assert_eq!(song.name, "Never Gonna Give You Up");
        assert_eq!(song.entry_id(), "665f");
        assert_eq!(song.duration.unwrap().to_string(), "3:33");
    }

    #[test]
    fn name_wins_when_title_is_also_present() {
        let song: Song = serde_json::from_value(json!({
            "spotifyId": "abc",
            "name": "Song (Live)",
            "title": "Song",
            "artist": "Band",
            "album": "LP"
        }))
        .unwrap();

        assert_eq!(song.name, "Song (Live)");
    }

    #[test]
    fn playlist_with_mixed_title_keys_decodes() {
        let songs: Vec<Song> = serde_json::from_value(json!([
            {"spotifyId": "a", "title": "First"},
            {"spotifyId": "b", "name": "Second", "title": "Second"}
        ]))
        .unwrap();

        assert_eq!(songs[0].name, "First");
        assert_eq!(songs[1].name, "Second");
        assert!(
            !serde_json::to_value(&songs[1])
                .unwrap()
                .as_object()
                .unwrap()
                .contains_key("title")
        );
    }

    #[test]
    fn decodes_search_track_with_text_duration() {
        let song: Song = serde_json::from_value(json!({
            "spotifyId": "abc",
            "name": "Song",
            "artist": "Band",
            "artists": [{"id": "a1", "name": "Band"}],
            "album": "LP",
            "albumId": "al1",
            "duration": "4:05",
            "uri": "spotify:track:abc"
        }))
        .unwrap();

        assert_eq!(song.entry_id(), "abc");
        assert_eq!(song.duration, Some(SongDuration::Text("4:05".into())));
        assert_eq!(song.artists.len(), 1);
    }

    #[test]
    fn serialization_omits_absent_fields() {
        let song = Song {
            id: None,
            spotify_id: "abc".into(),
            name: "Song".into(),
            artist: "Band".into(),
            artists: Vec::new(),
            album: "LP".into(),
            album_id: None,
            duration: None,
            album_art: None,
            uri: None,
            preview_url: None,
        };

        assert_eq!(
            serde_json::to_value(&song).unwrap(),
            json!({"spotifyId": "abc", "name": "Song", "artist": "Band", "album": "LP"})
        );
    }

    #[test]
    fn song_update_emptiness() {
        assert!(SongUpdate::default().is_empty());
        let update = SongUpdate {
            name: Some("Renamed".into()),
            ..Default::default()
        };
        assert!(!update.is_empty());
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({"name": "Renamed"}));
    }
}
