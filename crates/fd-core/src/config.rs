//! Application configuration types.
//!
//! The top-level [`Config`] struct is deserialized from JSON and carries the
//! server and library sections. Every section defaults sensibly so a
//! completely empty `{}` file is valid.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::Error;

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub library: LibraryConfig,
}

impl Config {
    /// Deserialize a `Config` from a JSON string.
    pub fn from_json(json_str: &str) -> Result<Self> {
        serde_json::from_str(json_str)
            .map_err(|e| Error::Validation(format!("config parse error: {e}")))
    }

    /// Load configuration from a file path, falling back to defaults if the
    /// path is `None` or the file does not exist.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_json(&contents).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse config file {}: {e}", path.display());
                Self::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No config file at {}; using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                tracing::warn!("Failed to read config file {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Return a list of validation warnings (non-fatal issues).
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.server.port == 0 {
            warnings.push("server.port is 0; a random port will be assigned".into());
        }

        if !self.library.projects_dir.is_dir() {
            warnings.push(format!(
                "library.projects_dir {} is not a directory",
                self.library.projects_dir.display()
            ));
        }

        if self.library.decode_concurrency == 0 {
            warnings.push("library.decode_concurrency is 0; using 1".into());
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Built web UI to serve as a SPA fallback.
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3000,
            static_dir: None,
        }
    }
}

/// Where projects live and how they are listed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Root directory served by `/api/projects` and `/api/media`.
    pub projects_dir: PathBuf,
    /// JSON file holding the user-defined folder list.
    pub folders_file: PathBuf,
    /// How many directory levels below a folder to search for cover art.
    #[serde(default = "default_cover_depth")]
    pub cover_depth: usize,
    /// Maximum number of project files decoded at once during a listing.
    #[serde(default = "default_decode_concurrency")]
    pub decode_concurrency: usize,
}

fn default_cover_depth() -> usize {
    2
}

fn default_decode_concurrency() -> usize {
    8
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            projects_dir: PathBuf::from("./projects"),
            folders_file: PathBuf::from("./config/folders.json"),
            cover_depth: default_cover_depth(),
            decode_concurrency: default_decode_concurrency(),
        }
    }
}
