//! Music catalog commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;

use setlist_core::RecommendationSeeds;

use crate::cli::GlobalArgs;
use crate::context;
use crate::output;

#[derive(Args, Debug)]
pub struct CatalogCommand {
    #[command(subcommand)]
    pub command: CatalogSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum CatalogSubcommand {
    /// Search the catalog for tracks
    Search(SearchArgs),

    /// Recommend tracks from seed tracks, artists or genres
    Recommend(RecommendArgs),

    /// List playlists in the linked catalog account
    Playlists(PlaylistsArgs),

    /// Add a track to a catalog playlist
    AddTrack(AddTrackArgs),
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search text
    pub query: String,

    /// Print raw JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct RecommendArgs {
    /// Seed track ids (repeat or comma-separate)
    #[arg(long = "track", value_delimiter = ',')]
    pub tracks: Vec<String>,

    /// Seed artist ids
    #[arg(long = "artist", value_delimiter = ',')]
    pub artists: Vec<String>,

    /// Seed genres
    #[arg(long = "genre", value_delimiter = ',')]
    pub genres: Vec<String>,

    /// Print raw JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct PlaylistsArgs {
    /// Print raw JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct AddTrackArgs {
    /// Catalog playlist id
    pub playlist: String,

    /// Track URI (spotify:track:...)
    pub uri: String,
}

pub async fn handle(global: &GlobalArgs, cmd: CatalogCommand) -> Result<()> {
    match cmd.command {
        CatalogSubcommand::Search(args) => search(global, args).await,
        CatalogSubcommand::Recommend(args) => recommend(global, args).await,
        CatalogSubcommand::Playlists(args) => playlists(global, args).await,
        CatalogSubcommand::AddTrack(args) => add_track(global, args).await,
    }
}

async fn search(global: &GlobalArgs, args: SearchArgs) -> Result<()> {
    let client = context::client(global)?;
    let results = client
        .search_tracks(&args.query)
        .await
        .context("Search failed")?;

    if args.json {
        return output::json_pretty(&results);
    }

    if results.tracks.is_empty() {
        eprintln!("{}", "No tracks found.".dimmed());
    }
    for track in &results.tracks {
        output::song_line(track);
    }
    Ok(())
}

async fn recommend(global: &GlobalArgs, args: RecommendArgs) -> Result<()> {
    let seeds = RecommendationSeeds {
        tracks: args.tracks,
        artists: args.artists,
        genres: args.genres,
    };

    let client = context::client(global)?;
    let recommendations = client
        .recommendations(&seeds)
        .await
        .context("Failed to fetch recommendations")?;

    if args.json {
        return output::json_pretty(&recommendations);
    }

    for track in &recommendations.tracks {
        output::song_line(track);
    }
    Ok(())
}

async fn playlists(global: &GlobalArgs, args: PlaylistsArgs) -> Result<()> {
    let client = context::client(global)?;
    let playlists = client
        .catalog_playlists()
        .await
        .context("Failed to list catalog playlists")?;

    if args.json {
        return output::json(&playlists);
    }

    for playlist in &playlists {
        println!(
            "{}  {} {}",
            playlist.id.dimmed(),
            playlist.name.bold(),
            format!("({} tracks)", playlist.tracks.total).dimmed()
        );
    }
    Ok(())
}

async fn add_track(global: &GlobalArgs, args: AddTrackArgs) -> Result<()> {
    let client = context::client(global)?;
    client
        .add_to_catalog_playlist(&args.playlist, &args.uri)
        .await
        .context("Failed to add track")?;

    output::success("Track added");
    Ok(())
}
