//! Folder CRUD and per-folder listing, media and cover routes.

use std::path::PathBuf;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use fd_core::{Error, Folder, Project};

use crate::context::AppContext;
use crate::covers::find_first_cover;
use crate::error::AppError;
use crate::library::list_projects;
use crate::streaming::{safe_join, serve_file};

/// Request body for adding a folder.
#[derive(Debug, Deserialize)]
pub struct CreateFolderRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub cover: Option<String>,
}

fn lookup(ctx: &AppContext, name: &str) -> Result<Folder, Error> {
    ctx.folders
        .get(name)
        .ok_or_else(|| Error::not_found("folder", name))
}

/// GET /api/folders
pub async fn list_folders(State(ctx): State<AppContext>) -> Json<Vec<Folder>> {
    let depth = ctx.config.library.cover_depth;
    let mut folders = ctx.folders.list();

    for folder in folders.iter_mut().filter(|f| f.cover.is_none()) {
        folder.cover = find_first_cover(&folder.path, depth).await;
    }

    Json(folders)
}

/// POST /api/folders
pub async fn create_folder(
    State(ctx): State<AppContext>,
    Json(payload): Json<CreateFolderRequest>,
) -> Result<impl IntoResponse, AppError> {
    let name = payload.name.trim();
    let path = payload.path.trim();
    if name.is_empty() || path.is_empty() {
        return Err(Error::validation("name and path are required").into());
    }

    let path = PathBuf::from(path);
    match tokio::fs::metadata(&path).await {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            return Err(Error::validation(format!("Not a directory: {}", path.display())).into())
        }
        Err(_) => {
            return Err(Error::validation(format!("Path does not exist: {}", path.display())).into())
        }
    }

    let folder = Folder {
        name: name.to_string(),
        path,
        cover: payload.cover.filter(|c| !c.trim().is_empty()),
    };
    ctx.folders.add(folder.clone()).await?;
    tracing::info!(name = %folder.name, path = %folder.path.display(), "Folder added");

    Ok((StatusCode::CREATED, Json(folder)))
}

/// DELETE /api/folders/{name}
pub async fn delete_folder(
    State(ctx): State<AppContext>,
    Path(name): Path<String>,
) -> Result<StatusCode, AppError> {
    let removed = ctx.folders.remove(&name).await?;
    tracing::info!(name = %removed.name, "Folder removed");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/folders/{name}/projects
pub async fn folder_projects(
    State(ctx): State<AppContext>,
    Path(name): Path<String>,
) -> Result<Json<Vec<Project>>, AppError> {
    let folder = lookup(&ctx, &name)?;
    let prefix = format!("/api/folders/{}/media", urlencoding::encode(&folder.name));
    let projects = list_projects(
        &folder.path,
        &prefix,
        ctx.config.library.decode_concurrency,
    )
    .await?;
    Ok(Json(projects))
}

/// GET /api/folders/{name}/media/{*path}
pub async fn folder_media(
    State(ctx): State<AppContext>,
    Path((name, path)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let folder = lookup(&ctx, &name)?;
    let file_path = safe_join(&folder.path, &path)?;
    Ok(serve_file(&file_path, super::range_header(&headers)).await?)
}

/// GET /api/folders/{name}/cover
pub async fn folder_cover(
    State(ctx): State<AppContext>,
    Path(name): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let folder = lookup(&ctx, &name)?;

    let cover = match folder.cover {
        Some(cover) => cover,
        None => find_first_cover(&folder.path, ctx.config.library.cover_depth)
            .await
            .ok_or_else(|| Error::not_found("cover", &folder.name))?,
    };

    let file_path = safe_join(&folder.path, &cover)?;
    Ok(serve_file(&file_path, super::range_header(&headers)).await?)
}
