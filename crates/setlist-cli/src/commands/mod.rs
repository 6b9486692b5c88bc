//! Subcommand implementations.

pub mod auth;
pub mod catalog;
pub mod playlists;
pub mod songs;
