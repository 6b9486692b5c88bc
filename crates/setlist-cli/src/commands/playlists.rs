//! Playlist commands.

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};
use colored::Colorize;

use setlist_core::{NewPlaylist, PlaylistUpdate};

use crate::cli::GlobalArgs;
use crate::context;
use crate::output;

#[derive(Args, Debug)]
pub struct PlaylistsCommand {
    #[command(subcommand)]
    pub command: PlaylistsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum PlaylistsSubcommand {
    /// List your playlists
    List(ListArgs),

    /// Show one playlist with its songs
    Show(ShowArgs),

    /// Create a playlist
    Create(CreateArgs),

    /// Rename or edit a playlist
    Update(UpdateArgs),

    /// Delete a playlist
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Print raw JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Playlist id
    pub id: String,

    /// Print raw JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Playlist name
    pub name: String,

    #[arg(long, default_value = "")]
    pub description: String,

    /// Make the playlist visible to others
    #[arg(long)]
    pub public: bool,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Playlist id
    pub id: String,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Set visibility (true or false)
    #[arg(long)]
    pub public: Option<bool>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Playlist id
    pub id: String,
}

pub async fn handle(global: &GlobalArgs, cmd: PlaylistsCommand) -> Result<()> {
    match cmd.command {
        PlaylistsSubcommand::List(args) => list(global, args).await,
        PlaylistsSubcommand::Show(args) => show(global, args).await,
        PlaylistsSubcommand::Create(args) => create(global, args).await,
        PlaylistsSubcommand::Update(args) => update(global, args).await,
        PlaylistsSubcommand::Delete(args) => delete(global, args).await,
    }
}

async fn list(global: &GlobalArgs, args: ListArgs) -> Result<()> {
    let client = context::client(global)?;
    let playlists = client
        .list_playlists()
        .await
        .context("Failed to list playlists")?;

    if args.json {
        return output::json_pretty(&playlists);
    }

    if playlists.is_empty() {
        eprintln!("{}", "No playlists found.".dimmed());
        return Ok(());
    }

    for playlist in &playlists {
        output::playlist_summary(playlist);
    }
    Ok(())
}

async fn show(global: &GlobalArgs, args: ShowArgs) -> Result<()> {
    let client = context::client(global)?;
    let playlist = client
        .get_playlist(&args.id)
        .await
        .context("Failed to fetch playlist")?;

    if args.json {
        return output::json_pretty(&playlist);
    }

    output::playlist_detail(&playlist);
    Ok(())
}

async fn create(global: &GlobalArgs, args: CreateArgs) -> Result<()> {
    let client = context::client(global)?;
    let playlist = NewPlaylist::new(args.name)
        .description(args.description)
        .public(args.public);

    let created = client
        .create_playlist(&playlist)
        .await
        .context("Failed to create playlist")?;

    output::success("Playlist created");
    output::field("ID", &created.id);
    output::field("Name", &created.name);
    Ok(())
}

async fn update(global: &GlobalArgs, args: UpdateArgs) -> Result<()> {
    let update = PlaylistUpdate {
        name: args.name,
        description: args.description,
        is_public: args.public,
    };
    if update.is_empty() {
        bail!("Nothing to update. Pass --name, --description or --public.");
    }

    let client = context::client(global)?;
    let updated = client
        .update_playlist(&args.id, &update)
        .await
        .context("Failed to update playlist")?;

    output::success("Playlist updated");
    output::playlist_summary(&updated);
    Ok(())
}

async fn delete(global: &GlobalArgs, args: DeleteArgs) -> Result<()> {
    let client = context::client(global)?;
    client
        .delete_playlist(&args.id)
        .await
        .context("Failed to delete playlist")?;

    output::success("Playlist deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use crate::cli::{Cli, Commands};

    use super::*;

    fn parse(args: &[&str]) -> PlaylistsSubcommand {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Playlists(cmd) => cmd.command,
            other => panic!("expected playlists command, got {other:?}"),
        }
    }

    #[test]
    fn create_defaults_to_private() {
        let PlaylistsSubcommand::Create(args) =
            parse(&["setlist", "playlists", "create", "Road trip"])
        else {
            panic!("expected create");
        };
        assert_eq!(args.name, "Road trip");
        assert!(!args.public);
        assert!(args.description.is_empty());
    }

    #[test]
    fn update_takes_explicit_visibility() {
        let PlaylistsSubcommand::Update(args) =
            parse(&["setlist", "playlists", "update", "p1", "--public", "false"])
        else {
            panic!("expected update");
        };
        assert_eq!(args.public, Some(false));
        assert_eq!(args.name, None);
    }
}
