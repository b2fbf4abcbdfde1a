pub mod health;
pub mod images;
pub mod objects;
pub mod upload;

use axum::Router;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Build the API route tree.
///
/// Route hierarchy:
///
/// ```text
/// /objects                                         list, create (one or many)
/// /objects/{id}                                    get, update, delete
///
/// /upload                                          multipart upload (POST)
/// /images/{filename}?size=small|medium|large       derived image variant
/// ```
///
/// `/health` and the static `/uploads` directory are mounted by
/// [`crate::router::build_app_router`].
pub fn api_routes(config: &ServerConfig) -> Router<AppState> {
    Router::new()
        .merge(objects::router())
        .merge(upload::router(config.max_upload_bytes))
        .merge(images::router())
}
