//! Catalog persistence.
//!
//! The whole [`Catalog`] is snapshotted to one JSON file on request —
//! callers save after every mutation, mirroring how a browser app writes
//! local storage on every state change. The queue engine never goes through
//! here; it only ever sees the in-memory catalog.
//!
//! A failed save is reported but not fatal: losing one snapshot is the
//! local-storage-quota case, and the app keeps running on memory.

use std::path::{Path, PathBuf};
use std::{env, fs};

use thiserror::Error;
use tracing::debug;

use crate::catalog::Catalog;
use crate::config::StorageSettings;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

pub struct Store {
    path: PathBuf,
}

impl Store {
    /// Open a store at the configured location: the settings override, then
    /// `SOUNDFREE_DATA_PATH`, then the XDG default. `None` only when no home
    /// directory can be resolved at all.
    pub fn open(settings: &StorageSettings) -> Option<Self> {
        resolve_data_path(settings).map(|path| Self { path })
    }

    /// Open a store at an explicit path.
    pub fn at(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the catalog snapshot, creating parent directories as needed.
    pub fn save(&self, catalog: &Catalog) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_vec_pretty(catalog)?;
        // Write to a sibling and rename so a crash mid-write cannot leave a
        // truncated snapshot behind.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), bytes = json.len(), "saved catalog snapshot");
        Ok(())
    }

    /// Read the snapshot back. `Ok(None)` when none has been written yet.
    pub fn load(&self) -> Result<Option<Catalog>, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let catalog = serde_json::from_slice(&bytes)?;
        Ok(Some(catalog))
    }
}

/// Resolve the snapshot path from settings, `SOUNDFREE_DATA_PATH`, or the
/// XDG default.
pub fn resolve_data_path(settings: &StorageSettings) -> Option<PathBuf> {
    if let Some(p) = &settings.data_path {
        return Some(p.clone());
    }
    if let Some(p) = env::var_os("SOUNDFREE_DATA_PATH") {
        return Some(PathBuf::from(p));
    }
    default_data_path()
}

/// Compute the default data path under `$XDG_DATA_HOME/soundfree/library.json`
/// or `~/.local/share/soundfree/library.json` when `XDG_DATA_HOME` is not set.
pub fn default_data_path() -> Option<PathBuf> {
    let data_home = if let Some(xdg) = env::var_os("XDG_DATA_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".local").join("share"))
    };

    data_home.map(|d| d.join("soundfree").join("library.json"))
}

#[cfg(test)]
mod tests;
