//! Shared application context.
//!
//! [`AppContext`] is the central struct shared across all route handlers via
//! Axum state. Configuration is immutable; the folder list lives in a
//! [`FolderStore`] that persists every change to its JSON file.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;

use fd_core::config::Config;
use fd_core::{Error, Folder, Result};

// ---------------------------------------------------------------------------
// FolderStore
// ---------------------------------------------------------------------------

/// User-defined project folders, persisted as a JSON array.
///
/// Mutations are serialized by `persist`, which is held across the async
/// file write. The in-memory lock is never held across an await.
#[derive(Debug)]
pub struct FolderStore {
    folders: RwLock<Vec<Folder>>,
    persist: tokio::sync::Mutex<()>,
    /// File the list is saved to (None = no persistence).
    path: Option<PathBuf>,
}

impl FolderStore {
    /// In-memory store without persistence.
    pub fn new(folders: Vec<Folder>) -> Self {
        Self::with_path(folders, None)
    }

    fn with_path(folders: Vec<Folder>, path: Option<PathBuf>) -> Self {
        Self {
            folders: RwLock::new(folders),
            persist: tokio::sync::Mutex::new(()),
            path,
        }
    }

    /// Load the folder list from `path`.
    ///
    /// A missing or unparsable file yields an empty list.
    pub fn load(path: &Path) -> Self {
        let folders = match std::fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse folders file {}: {e}", path.display());
                Vec::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No folders file at {}; starting empty", path.display());
                Vec::new()
            }
            Err(e) => {
                tracing::warn!("Failed to read folders file {}: {e}", path.display());
                Vec::new()
            }
        };

        Self::with_path(folders, Some(path.to_path_buf()))
    }

    /// Snapshot of all folders in insertion order.
    pub fn list(&self) -> Vec<Folder> {
        self.folders.read().clone()
    }

    /// Look up a folder by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<Folder> {
        self.folders
            .read()
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
            .cloned()
    }

    /// Add a folder and persist. Fails with [`Error::Conflict`] if the name
    /// is taken. The in-memory list is restored if the save fails.
    pub async fn add(&self, folder: Folder) -> Result<()> {
        let _persist = self.persist.lock().await;

        let snapshot = {
            let mut folders = self.folders.write();
            if folders.iter().any(|f| f.name.eq_ignore_ascii_case(&folder.name)) {
                return Err(Error::Conflict(format!(
                    "Folder '{}' already exists",
                    folder.name
                )));
            }
            folders.push(folder);
            folders.clone()
        };

        if let Err(e) = self.save(&snapshot).await {
            self.folders.write().pop();
            return Err(e);
        }
        Ok(())
    }

    /// Remove a folder by name and persist.
    pub async fn remove(&self, name: &str) -> Result<Folder> {
        let _persist = self.persist.lock().await;

        let (idx, removed, snapshot) = {
            let mut folders = self.folders.write();
            let idx = folders
                .iter()
                .position(|f| f.name.eq_ignore_ascii_case(name))
                .ok_or_else(|| Error::not_found("folder", name))?;
            let removed = folders.remove(idx);
            (idx, removed, folders.clone())
        };

        if let Err(e) = self.save(&snapshot).await {
            self.folders.write().insert(idx, removed);
            return Err(e);
        }
        Ok(removed)
    }

    async fn save(&self, folders: &[Folder]) -> Result<()> {
        let Some(ref path) = self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_string_pretty(folders)
            .map_err(|e| Error::Internal(format!("Failed to serialize folders: {e}")))?;
        tokio::fs::write(path, json).await?;
        tracing::debug!("Saved {} folders to {}", folders.len(), path.display());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// AppContext
// ---------------------------------------------------------------------------

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    pub folders: Arc<FolderStore>,
}

impl AppContext {
    /// Build a context, loading folders from `config.library.folders_file`.
    pub fn new(config: Config) -> Self {
        let folders = Arc::new(FolderStore::load(&config.library.folders_file));
        Self {
            config: Arc::new(config),
            folders,
        }
    }
}
