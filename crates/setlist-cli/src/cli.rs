//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use setlist_http::DEFAULT_API_URL;

use crate::commands::auth::AuthCommand;
use crate::commands::catalog::CatalogCommand;
use crate::commands::playlists::PlaylistsCommand;
use crate::commands::songs::SongsCommand;

/// Manage playlists on a setlist backend.
#[derive(Parser, Debug)]
#[command(name = "setlist")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Backend API base URL
    #[arg(long, env = "SETLIST_API_URL", default_value = DEFAULT_API_URL, global = true)]
    pub api_url: String,

    /// Credential file (defaults to the platform data directory)
    #[arg(long, env = "SETLIST_CREDENTIALS", global = true)]
    pub credentials: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Account and session operations
    Auth(AuthCommand),

    /// Playlist operations
    Playlists(PlaylistsCommand),

    /// Songs inside a playlist
    Songs(SongsCommand),

    /// Music catalog search and catalog playlists
    Catalog(CatalogCommand),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn api_url_defaults_to_local_backend() {
        let cli = Cli::try_parse_from(["setlist", "playlists", "list"]).unwrap();
        // The environment may override the default on a developer machine.
        if std::env::var_os("SETLIST_API_URL").is_none() {
            assert_eq!(cli.global.api_url, DEFAULT_API_URL);
        }
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn global_flags_are_accepted_after_subcommand() {
        let cli = Cli::try_parse_from([
            "setlist",
            "catalog",
            "search",
            "daft punk",
            "--api-url",
            "https://music.example.com/api",
            "--credentials",
            "/tmp/creds.json",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.global.api_url, "https://music.example.com/api");
        assert_eq!(
            cli.global.credentials.as_deref(),
            Some(std::path::Path::new("/tmp/creds.json"))
        );
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn missing_subcommand_is_an_error() {
        assert!(Cli::try_parse_from(["setlist"]).is_err());
        assert!(Cli::try_parse_from(["setlist", "songs"]).is_err());
    }
}
