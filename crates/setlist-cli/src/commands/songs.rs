//! Commands for songs inside a playlist.

use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};

use setlist_core::{Song, SongDuration, SongUpdate};

use crate::cli::GlobalArgs;
use crate::context;
use crate::output;

#[derive(Args, Debug)]
pub struct SongsCommand {
    #[command(subcommand)]
    pub command: SongsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum SongsSubcommand {
    /// Add a song to a playlist
    Add(AddArgs),

    /// Edit a song's details
    Update(UpdateArgs),

    /// Remove a song from a playlist
    Remove(RemoveArgs),
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Playlist id
    pub playlist: String,

    /// Read the song as JSON from a file ('-' for stdin)
    #[arg(long, conflicts_with_all = ["spotify_id", "name", "artist"])]
    pub from_json: Option<PathBuf>,

    /// Catalog track id
    #[arg(long, required_unless_present = "from_json")]
    pub spotify_id: Option<String>,

    /// Song title
    #[arg(long, required_unless_present = "from_json")]
    pub name: Option<String>,

    #[arg(long, required_unless_present = "from_json")]
    pub artist: Option<String>,

    #[arg(long)]
    pub album: Option<String>,

    /// Duration in milliseconds
    #[arg(long)]
    pub duration_ms: Option<u64>,

    /// Catalog URI
    #[arg(long)]
    pub uri: Option<String>,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Playlist id
    pub playlist: String,

    /// Song entry id
    pub song: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub artist: Option<String>,

    #[arg(long)]
    pub album: Option<String>,

    #[arg(long)]
    pub album_art: Option<String>,

    #[arg(long)]
    pub preview_url: Option<String>,
}

#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Playlist id
    pub playlist: String,

    /// Song entry id
    pub song: String,
}

pub async fn handle(global: &GlobalArgs, cmd: SongsCommand) -> Result<()> {
    match cmd.command {
        SongsSubcommand::Add(args) => add(global, args).await,
        SongsSubcommand::Update(args) => update(global, args).await,
        SongsSubcommand::Remove(args) => remove(global, args).await,
    }
}

async fn add(global: &GlobalArgs, args: AddArgs) -> Result<()> {
    let song = song_from_args(&args)?;
    let client = context::client(global)?;

    let playlist = client
        .add_song(&args.playlist, &song)
        .await
        .context("Failed to add song")?;

    output::success(&format!("Added '{}' to {}", song.name, playlist.name));
    Ok(())
}

async fn update(global: &GlobalArgs, args: UpdateArgs) -> Result<()> {
    let update = SongUpdate {
        name: args.name,
        artist: args.artist,
        album: args.album,
        duration: None,
        album_art: args.album_art,
        preview_url: args.preview_url,
    };
    if update.is_empty() {
        bail!("Nothing to update. Pass at least one field to change.");
    }

    let client = context::client(global)?;
    let playlist = client
        .update_song(&args.playlist, &args.song, &update)
        .await
        .context("Failed to update song")?;

    output::success("Song updated");
    if let Some(song) = playlist.songs.iter().find(|s| s.entry_id() == args.song) {
        output::song_line(song);
    }
    Ok(())
}

async fn remove(global: &GlobalArgs, args: RemoveArgs) -> Result<()> {
    let client = context::client(global)?;
    let playlist = client
        .remove_song(&args.playlist, &args.song)
        .await
        .context("Failed to remove song")?;

    output::success(&format!(
        "Song removed ({} left in {})",
        playlist.songs.len(),
        playlist.name
    ));
    Ok(())
}

fn song_from_args(args: &AddArgs) -> Result<Song> {
    if let Some(path) = &args.from_json {
        let json = if path.as_os_str() == "-" {
            io::read_to_string(io::stdin()).context("Failed to read song from stdin")?
        } else {
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?
        };
        return serde_json::from_str(&json).context("Invalid song JSON");
    }

    let (Some(spotify_id), Some(name), Some(artist)) = (&args.spotify_id, &args.name, &args.artist)
    else {
        bail!("--spotify-id, --name and --artist are required without --from-json");
    };

    Ok(Song {
        id: None,
        spotify_id: spotify_id.clone(),
        name: name.clone(),
        artist: artist.clone(),
        artists: Vec::new(),
        album: args.album.clone().unwrap_or_default(),
        album_id: None,
        duration: args.duration_ms.map(SongDuration::Millis),
        album_art: None,
        uri: args.uri.clone(),
        preview_url: None,
    })
}
