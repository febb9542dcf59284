//! Media streaming under the projects directory.

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Response;

use crate::context::AppContext;
use crate::error::AppError;
use crate::streaming::{safe_join, serve_file};

/// GET /api/media/{*path}
pub async fn stream_media(
    State(ctx): State<AppContext>,
    Path(path): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let file_path = safe_join(&ctx.config.library.projects_dir, &path)?;
    Ok(serve_file(&file_path, super::range_header(&headers)).await?)
}
