//! Cover art discovery.
//!
//! Looks for a conventionally named image (`cover`, `folder`, `front`,
//! `artwork`) in a folder, then in its subdirectories up to a depth
//! limit. Entries are visited in case-insensitive name order so the result
//! is stable across platforms.

use std::path::{Path, PathBuf};

use futures::future::BoxFuture;
use futures::FutureExt;

use fd_core::media::is_cover_image;

const COVER_STEMS: &[&str] = &["cover", "folder", "front", "artwork"];

/// Return the first cover image under `base`, as a `/`-separated path
/// relative to `base`.
pub async fn find_first_cover(base: &Path, max_depth: usize) -> Option<String> {
    scan(base.to_path_buf(), max_depth, String::new()).await
}

fn scan(dir: PathBuf, depth: usize, relative: String) -> BoxFuture<'static, Option<String>> {
    async move {
        let entries = sorted_entries(&dir).await?;

        for (name, is_dir) in &entries {
            if *is_dir || !is_cover_name(name) {
                continue;
            }
            return Some(join_relative(&relative, name));
        }

        if depth == 0 {
            return None;
        }

        for (name, is_dir) in entries {
            if !is_dir {
                continue;
            }
            let nested_relative = join_relative(&relative, &name);
            if let Some(found) = scan(dir.join(&name), depth - 1, nested_relative).await {
                return Some(found);
            }
        }

        None
    }
    .boxed()
}

/// `(name, is_dir)` pairs for regular files and directories in `dir`,
/// sorted by name ignoring case. `None` if the directory is unreadable.
async fn sorted_entries(dir: &Path) -> Option<Vec<(String, bool)>> {
    let mut read_dir = match tokio::fs::read_dir(dir).await {
        Ok(rd) => rd,
        Err(e) => {
            tracing::debug!("Cannot read {}: {e}", dir.display());
            return None;
        }
    };

    let mut entries = Vec::new();
    while let Ok(Some(entry)) = read_dir.next_entry().await {
        let Ok(file_type) = entry.file_type().await else {
            continue;
        };
        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            continue;
        };
        if file_type.is_file() || file_type.is_dir() {
            entries.push((name, file_type.is_dir()));
        }
    }

    entries.sort_by(|a, b| {
        a.0.to_lowercase()
            .cmp(&b.0.to_lowercase())
            .then_with(|| a.0.cmp(&b.0))
    });
    Some(entries)
}

fn is_cover_name(name: &str) -> bool {
    let stem = name.split('.').next().unwrap_or_default().to_lowercase();
    COVER_STEMS.contains(&stem.as_str()) && is_cover_image(Path::new(name))
}

fn join_relative(relative: &str, name: &str) -> String {
    if relative.is_empty() {
        name.to_string()
    } else {
        format!("{relative}/{name}")
    }
}
