//! Project listing.
//!
//! Groups a projects directory into [`Project`] records: every
//! subdirectory is one project, and every loose `.flp` at the root is
//! another, paired with the root-level renders that share its base name.
//! Metadata is decoded from the project files with bounded concurrency.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};

use fd_core::media::{is_audio_render, is_project_file};
use fd_core::{Error, MediaLink, Project, ProjectKind, Result};

/// Strip the extension, then a trailing `_<digits>` run.
///
/// `Song_12.flp` and `Song__3.mp3` both become `Song`.
pub fn normalize_base(name: &str) -> &str {
    let stem = match name.rfind('.') {
        Some(idx) if idx + 1 < name.len() => &name[..idx],
        _ => name,
    };

    let without_digits = stem.trim_end_matches(|c: char| c.is_ascii_digit());
    if without_digits.len() == stem.len() {
        return stem;
    }
    let without_sep = without_digits.trim_end_matches('_');
    if without_sep.len() == without_digits.len() {
        return stem;
    }
    without_sep
}

/// A directory entry we care about.
struct Entry {
    name: String,
    is_dir: bool,
}

/// Project awaiting metadata from `flp`.
struct Pending {
    project: Project,
    flp: Option<PathBuf>,
}

/// List the projects under `root`.
///
/// Media URLs are built as `<url_prefix>/<segment>/...` with every segment
/// percent-encoded. `concurrency` caps how many project files are decoded
/// at once.
pub async fn list_projects(root: &Path, url_prefix: &str, concurrency: usize) -> Result<Vec<Project>> {
    let entries = read_entries(root).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::not_found("directory", root.display())
        } else {
            Error::from(e)
        }
    })?;

    let mut pending = Vec::new();

    for dir in entries.iter().filter(|e| e.is_dir) {
        match folder_project(root, &dir.name, url_prefix).await {
            Ok(p) => pending.push(p),
            Err(e) => tracing::warn!("Skipping {}: {e}", root.join(&dir.name).display()),
        }
    }

    for flp in entries
        .iter()
        .filter(|e| !e.is_dir && is_project_file(Path::new(&e.name)))
    {
        pending.push(file_project(root, &flp.name, &entries, url_prefix));
    }

    tracing::debug!(root = %root.display(), count = pending.len(), "Listing projects");

    let projects: Vec<Project> = stream::iter(pending.into_iter().map(enrich))
        .buffered(concurrency.max(1))
        .collect()
        .await;
    Ok(projects)
}

async fn folder_project(root: &Path, dir_name: &str, url_prefix: &str) -> std::io::Result<Pending> {
    let files: Vec<String> = read_entries(&root.join(dir_name))
        .await?
        .into_iter()
        .filter(|e| !e.is_dir)
        .map(|e| e.name)
        .collect();

    let dir_segment = urlencoding::encode(dir_name);
    let mp3s: Vec<MediaLink> = files
        .iter()
        .filter(|f| is_audio_render(Path::new(f)))
        .map(|f| MediaLink {
            name: f.clone(),
            url: format!("{url_prefix}/{dir_segment}/{}", urlencoding::encode(f)),
        })
        .collect();

    let flp = files.iter().rev().find(|f| is_project_file(Path::new(f)));

    Ok(Pending {
        project: Project {
            name: dir_name.to_string(),
            kind: ProjectKind::Folder,
            last: mp3s.last().cloned(),
            mp3s,
            project_file: flp.map(|f| format!("{dir_name}/{f}")),
            bpm: None,
            title: None,
            version: None,
            modified: None,
        },
        flp: flp.map(|f| root.join(dir_name).join(f)),
    })
}

fn file_project(root: &Path, flp_name: &str, siblings: &[Entry], url_prefix: &str) -> Pending {
    let base = normalize_base(flp_name);

    let mp3s: Vec<MediaLink> = siblings
        .iter()
        .filter(|e| !e.is_dir && is_audio_render(Path::new(&e.name)) && e.name.starts_with(base))
        .map(|e| MediaLink {
            name: e.name.clone(),
            url: format!("{url_prefix}/{}", urlencoding::encode(&e.name)),
        })
        .collect();

    Pending {
        project: Project {
            name: base.to_string(),
            kind: ProjectKind::File,
            last: mp3s.last().cloned(),
            mp3s,
            project_file: Some(flp_name.to_string()),
            bpm: None,
            title: None,
            version: None,
            modified: None,
        },
        flp: Some(root.join(flp_name)),
    }
}

/// Fill in decoded metadata and the project file's mtime.
async fn enrich(pending: Pending) -> Project {
    let Pending { mut project, flp } = pending;
    let Some(path) = flp else {
        return project;
    };

    match fd_flp::read_metadata(&path).await {
        Ok(meta) => {
            project.bpm = meta.bpm;
            project.title = meta.title;
            project.version = meta.version;
        }
        Err(e) => tracing::warn!("Failed to read metadata from {}: {e}", path.display()),
    }

    match tokio::fs::metadata(&path).await.and_then(|m| m.modified()) {
        Ok(mtime) => project.modified = Some(DateTime::<Utc>::from(mtime)),
        Err(e) => tracing::debug!("No mtime for {}: {e}", path.display()),
    }

    project
}

/// Files and directories in `dir`, sorted by name. Names that are not
/// valid UTF-8 are skipped.
async fn read_entries(dir: &Path) -> std::io::Result<Vec<Entry>> {
    let mut read_dir = tokio::fs::read_dir(dir).await?;
    let mut entries = Vec::new();

    while let Some(entry) = read_dir.next_entry().await? {
        let Ok(file_type) = entry.file_type().await else {
            continue;
        };
        if !file_type.is_file() && !file_type.is_dir() {
            continue;
        }
        let Ok(name) = entry.file_name().into_string() else {
            tracing::debug!("Skipping non UTF-8 entry in {}", dir.display());
            continue;
        };
        entries.push(Entry {
            name,
            is_dir: file_type.is_dir(),
        });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}
