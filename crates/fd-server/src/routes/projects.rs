//! Project listing for the configured projects directory.

use axum::extract::State;
use axum::Json;

use fd_core::Project;

use crate::context::AppContext;
use crate::error::AppError;
use crate::library::list_projects;

/// GET /api/projects
pub async fn list_all(State(ctx): State<AppContext>) -> Result<Json<Vec<Project>>, AppError> {
    let library = &ctx.config.library;
    let projects = list_projects(
        &library.projects_dir,
        "/api/media",
        library.decode_concurrency,
    )
    .await?;
    Ok(Json(projects))
}
