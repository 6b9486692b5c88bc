//! Client construction from the global options.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use tracing::debug;

use setlist_core::ApiUrl;
use setlist_file::FileCredentialStore;
use setlist_http::{ApiClient, ClientConfig};

use crate::cli::GlobalArgs;

const CREDENTIALS_FILE: &str = "credentials.json";

/// Resolve the credential file path, creating its directory.
pub fn credentials_path(global: &GlobalArgs) -> Result<PathBuf> {
    let path = match &global.credentials {
        Some(path) => path.clone(),
        None => {
            let dirs = ProjectDirs::from("", "", "setlist")
                .context("Could not determine data directory")?;
            dirs.data_dir().join(CREDENTIALS_FILE)
        }
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).context("Failed to create data directory")?;
    }

    Ok(path)
}

/// Build a client backed by the credential file.
pub fn client(global: &GlobalArgs) -> Result<ApiClient> {
    let base = ApiUrl::new(&global.api_url).context("Invalid API URL")?;
    let path = credentials_path(global)?;
    debug!(credentials = %path.display(), api = %base, "Building client");

    let store = Arc::new(FileCredentialStore::new(&path));
    ApiClient::new(ClientConfig::new(base), store).context("Failed to build HTTP client")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_credentials_path_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("creds.json");
        let global = GlobalArgs {
            api_url: "http://localhost:3001/api".to_string(),
            credentials: Some(path.clone()),
        };

        assert_eq!(credentials_path(&global).unwrap(), path);
        assert!(dir.path().join("nested").is_dir());
    }

    #[test]
    fn invalid_api_url_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let global = GlobalArgs {
            api_url: "http://music.example.com/api".to_string(),
            credentials: Some(dir.path().join("creds.json")),
        };

        let err = client(&global).unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid API URL"));
    }
}
