//! Credential slots persisted in a JSON file.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use fs2::FileExt;
use serde_json::{Map, Value};
use tokio::sync::Mutex;
use tracing::{debug, instrument};

use setlist_core::Result;
use setlist_core::error::StorageError;
use setlist_core::store::{CredentialStore, TokenSlot};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// A credential store backed by a single JSON object file.
///
/// The file holds the fixed slot keys (`token`, `refreshToken`) as string
/// values. Writes are serialised with an exclusive lock on a sibling
/// `.lock` file and replace the data file atomically, so readers never see
/// a torn write. The file is deleted once both slots are empty.
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
    write_guard: Mutex<()>,
}

impl FileCredentialStore {
    /// Create a store persisting to `path`. Nothing is touched until first write.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_guard: Mutex::new(()),
        }
    }

    /// The data file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        self.path.with_extension("lock")
    }

    fn io_error(&self, err: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.display().to_string(),
            message: err.to_string(),
        }
    }

    fn read_slots(&self) -> Result<Map<String, Value>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(self.io_error(e).into()),
        };

        if contents.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(StorageError::Corrupt {
                path: self.path.display().to_string(),
                message: "expected a JSON object".to_string(),
            }
            .into()),
            Err(e) => Err(StorageError::Corrupt {
                path: self.path.display().to_string(),
                message: e.to_string(),
            }
            .into()),
        }
    }

    fn write_slots(&self, slots: &Map<String, Value>) -> Result<()> {
        if slots.is_empty() {
            return match fs::remove_file(&self.path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(self.io_error(e).into()),
            };
        }

        let json = serde_json::to_string_pretty(slots).map_err(|e| StorageError::Corrupt {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })?;

        let tmp_path = self.path.with_extension("tmp");
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&tmp_path)
            .map_err(|e| self.io_error(e))?;

        // Set restrictive permissions before any secret hits the disk
        #[cfg(unix)]
        {
            let mut perms = file.metadata().map_err(|e| self.io_error(e))?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&tmp_path, perms).map_err(|e| self.io_error(e))?;
        }

        file.write_all(json.as_bytes())
            .map_err(|e| self.io_error(e))?;
        file.sync_data().map_err(|e| self.io_error(e))?;
        drop(file);

        fs::rename(&tmp_path, &self.path).map_err(|e| self.io_error(e))?;
        Ok(())
    }

    /// Read-modify-write under the cross-process file lock.
    async fn update<F>(&self, apply: F) -> Result<()>
    where
        F: FnOnce(&mut Map<String, Value>),
    {
        let _guard = self.write_guard.lock().await;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(self.lock_path())
            .map_err(|e| self.io_error(e))?;

        lock_file.lock_exclusive().map_err(|e| self.io_error(e))?;

        let result = self.read_slots().and_then(|mut slots| {
            apply(&mut slots);
            self.write_slots(&slots)
        });

        lock_file.unlock().map_err(|e| self.io_error(e))?;

        result
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn get(&self, slot: TokenSlot) -> Result<Option<String>> {
        let slots = self.read_slots()?;
        Ok(slots
            .get(slot.key())
            .and_then(Value::as_str)
            .map(str::to_string))
    }

    #[instrument(skip(self, value), fields(path = %self.path.display()))]
    async fn set(&self, slot: TokenSlot, value: &str) -> Result<()> {
        debug!("Writing credential slot");
        let value = value.to_string();
        self.update(|slots| {
            slots.insert(slot.key().to_string(), Value::String(value));
        })
        .await
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn remove(&self, slot: TokenSlot) -> Result<()> {
        debug!("Removing credential slot");
        self.update(|slots| {
            slots.remove(slot.key());
        })
        .await
    }
}
