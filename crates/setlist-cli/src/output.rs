//! Output formatting helpers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use setlist_core::{Error, Playlist, Song};

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a value as compact JSON.
pub fn json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// One line per song: entry id, title, artist, duration.
pub fn song_line(song: &Song) {
    let duration = song
        .duration
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_default();
    println!(
        "{}  {} {} {}  {}",
        song.entry_id().dimmed(),
        song.name.bold(),
        "-".dimmed(),
        song.artist,
        duration.dimmed()
    );
}

pub fn playlist_summary(playlist: &Playlist) {
    let visibility = if playlist.is_public { "public" } else { "private" };
    println!(
        "{}  {} {}",
        playlist.id.dimmed(),
        playlist.name.bold(),
        format!("({} songs, {})", playlist.songs.len(), visibility).dimmed()
    );
}

pub fn playlist_detail(playlist: &Playlist) {
    field("ID", &playlist.id);
    field("Name", &playlist.name);
    if !playlist.description.is_empty() {
        field("Description", &playlist.description);
    }
    field("Public", if playlist.is_public { "yes" } else { "no" });
    if let Some(updated) = &playlist.updated_at {
        field("Updated", &updated.to_rfc3339());
    }

    println!();
    if playlist.songs.is_empty() {
        eprintln!("{}", "No songs yet.".dimmed());
    }
    for song in &playlist.songs {
        song_line(song);
    }
}

/// Report a command failure, with a hint when the session is gone.
pub fn failure(err: &anyhow::Error) {
    error(&format!("{:#}", err));

    let expired = err
        .chain()
        .any(|cause| matches!(cause.downcast_ref::<Error>(), Some(Error::AuthExpired)));
    if expired {
        eprintln!(
            "{}",
            "Session expired. Run 'setlist auth login' to sign in again.".yellow()
        );
    }
}
