//! Axum router construction.
//!
//! Builds the application router with the API routes, middleware layers,
//! and optional static file serving for a UI build.

use std::path::PathBuf;

use axum::routing::{delete, get};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::context::AppContext;
use crate::routes;

/// Build the complete Axum router.
pub fn build_router(ctx: AppContext, static_dir: Option<PathBuf>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/projects", get(routes::projects::list_all))
        .route("/media/{*path}", get(routes::media::stream_media))
        .route(
            "/folders",
            get(routes::folders::list_folders).post(routes::folders::create_folder),
        )
        .route(
            "/folders/{name}",
            delete(routes::folders::delete_folder),
        )
        .route(
            "/folders/{name}/projects",
            get(routes::folders::folder_projects),
        )
        .route(
            "/folders/{name}/media/{*path}",
            get(routes::folders::folder_media),
        )
        .route("/folders/{name}/cover", get(routes::folders::folder_cover));

    let mut app = Router::new()
        .route("/health", get(routes::health::health_check))
        .nest("/api", api)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx);

    // Static file serving for UI build.
    if let Some(dir) = static_dir {
        if dir.exists() {
            tracing::info!("Serving static files from {}", dir.display());
            let index_path = dir.join("index.html");
            app = app.fallback_service(
                tower_http::services::ServeDir::new(&dir)
                    .append_index_html_on_directories(true)
                    .not_found_service(tower_http::services::ServeFile::new(index_path)),
            );
        } else {
            tracing::warn!("Static directory {} does not exist", dir.display());
        }
    }

    app
}
