use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;

use crate::handlers::upload;
use crate::state::AppState;

/// `POST /upload`, with its own body limit replacing the JSON one.
pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/upload", post(upload::upload))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}
