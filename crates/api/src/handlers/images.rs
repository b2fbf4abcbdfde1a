//! Handler for serving derived image variants.

use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::header::{self, HeaderValue};
use axum::http::StatusCode;
use axum::response::Response;
use scenestore_core::error::CoreError;
use scenestore_core::imaging::{self, ImageSize};
use scenestore_core::naming;

use crate::error::{AppError, AppResult};
use crate::query::ImageSizeParams;
use crate::state::AppState;

/// GET /images/{filename}?size=small|medium|large
///
/// `filename` is the stored name of an upload. Without `size` the original
/// is served.
pub async fn serve(
    State(state): State<AppState>,
    Path(filename): Path<String>,
    Query(params): Query<ImageSizeParams>,
) -> AppResult<Response> {
    if !naming::is_safe_file_name(&filename) {
        return Err(AppError::BadRequest(format!("Invalid filename '{filename}'")));
    }

    let target = match params.size.as_deref() {
        None | Some("") => filename,
        Some(raw) => {
            let size: ImageSize = raw.parse()?;
            naming::variant_file_name(&filename, size)
        }
    };

    let path = state
        .assets
        .resolve(&target)
        .await
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Image",
                id: target.clone(),
            })
        })?;

    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to read {target}: {e}")))?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, imaging::mime_type_for(&target))
        .header(header::CONTENT_LENGTH, bytes.len().to_string())
        .header(
            header::CACHE_CONTROL,
            HeaderValue::from_static("public, max-age=86400"),
        )
        .body(Body::from(bytes))
        .map_err(|e| AppError::InternalError(format!("Failed to build response: {e}")))
}
