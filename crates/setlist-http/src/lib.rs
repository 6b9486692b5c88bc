//! setlist-http - Authenticated HTTP client for the playlist backend.
//!
//! All calls flow through [`ApiClient::send`], which attaches the stored
//! access token and, when the server answers 401, renews the token once via
//! the refresh endpoint before retrying the original request exactly once.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use setlist_core::{ApiUrl, LoginRequest, MemoryCredentialStore};
//! use setlist_http::{ApiClient, ClientConfig};
//!
//! # async fn example() -> Result<(), setlist_core::Error> {
//! let config = ClientConfig::new(ApiUrl::new("https://music.example.com/api")?);
//! let client = ApiClient::new(config, Arc::new(MemoryCredentialStore::new()))?;
//!
//! client
//!     .login(&LoginRequest::new("alice@example.com", "app-password"))
//!     .await?;
//!
//! for playlist in client.list_playlists().await? {
//!     println!("{} ({} songs)", playlist.name, playlist.songs.len());
//! }
//! # Ok(())
//! # }
//! ```

mod auth;
mod catalog;
mod client;
mod config;
mod endpoints;
mod playlists;
mod request;

pub use client::{ApiClient, SessionEvent};
pub use config::{ClientConfig, DEFAULT_API_URL};
pub use request::{ApiRequest, ApiResponse};

pub use reqwest::Method;
