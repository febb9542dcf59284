//! Extension-derived content types and file classification.

use std::path::Path;

/// Lowercased extension of `path` without the leading dot.
fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// Guess the MIME type from a file's extension.
///
/// Unrecognized or missing extensions map to `application/octet-stream`.
pub fn content_type_for(path: &Path) -> &'static str {
    match extension(path).as_deref() {
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("flac") => "audio/flac",
        Some("ogg") => "audio/ogg",
        Some("m4a") => "audio/mp4",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("json") => "application/json",
        _ => "application/octet-stream",
    }
}

/// True for rendered audio bounces listed alongside projects.
pub fn is_audio_render(path: &Path) -> bool {
    extension(path).as_deref() == Some("mp3")
}

/// True for FL Studio project files.
pub fn is_project_file(path: &Path) -> bool {
    extension(path).as_deref() == Some("flp")
}

/// True for images that may serve as cover art.
pub fn is_cover_image(path: &Path) -> bool {
    matches!(extension(path).as_deref(), Some("png" | "jpg" | "jpeg"))
}
