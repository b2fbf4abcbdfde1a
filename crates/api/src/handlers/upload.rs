//! Handler for `POST /upload`.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use scenestore_core::error::CoreError;
use scenestore_core::imaging::{self, ImageSize};
use scenestore_core::naming;
use scenestore_core::object::CreateObject;
use scenestore_core::storage::StoredFile;
use scenestore_core::transform::{Position, Rotation};
use scenestore_db::models::object::ObjectRecord;
use scenestore_db::repositories::ObjectRepo;
use serde::Serialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Public paths of the derived variants of an image upload.
#[derive(Debug, Default, Serialize)]
pub struct VariantPaths {
    pub small: String,
    pub medium: String,
    pub large: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Public path of the stored original.
    pub file_path: String,
    pub file_name: String,
    pub size: u64,
    /// `None` for non-image uploads or when variants are disabled.
    pub variants: Option<VariantPaths>,
    /// The record created for the upload.
    pub object: ObjectRecord,
}

/// POST /upload
///
/// Accepts a multipart form with a required `file` field and optional `type`
/// and `uuid` fields. The file is stored under a generated name; supported
/// images also get small/medium/large variants. A record with default
/// position and rotation is created for the file.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<UploadResponse>)> {
    let mut file_data: Option<(String, Vec<u8>)> = None;
    let mut object_type: Option<String> = None;
    let mut client_uuid: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let data = field.bytes().await?;
                file_data = Some((filename, data.to_vec()));
            }
            "type" => object_type = Some(field.text().await?),
            "uuid" => client_uuid = Some(field.text().await?),
            _ => {} // ignore unknown fields
        }
    }

    let (original_name, data) =
        file_data.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;
    if data.is_empty() {
        return Err(AppError::BadRequest("Uploaded file is empty".into()));
    }

    let stored = state.assets.save_upload(&original_name, &data).await?;
    tracing::info!(
        file_name = %stored.file_name,
        size = stored.size,
        "Stored upload"
    );

    // Nothing stays on disk without a record pointing at it.
    let (variants, object) = match finish_upload(
        &state,
        &stored,
        &original_name,
        object_type,
        client_uuid,
        data,
    )
    .await
    {
        Ok(done) => done,
        Err(err) => {
            tracing::warn!(
                file_name = %stored.file_name,
                error = %err,
                "Upload failed, removing stored files"
            );
            state.assets.discard(&stored.file_name).await;
            return Err(err);
        }
    };

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            file_path: stored.public_path,
            file_name: stored.file_name,
            size: stored.size,
            variants,
            object,
        }),
    ))
}

/// Derive variants and create the record for an already stored upload.
async fn finish_upload(
    state: &AppState,
    stored: &StoredFile,
    original_name: &str,
    object_type: Option<String>,
    client_uuid: Option<String>,
    data: Vec<u8>,
) -> AppResult<(Option<VariantPaths>, ObjectRecord)> {
    let is_image = imaging::detect_format(&data).is_some();
    let variants = if is_image && state.config.image_variants {
        store_variants(state, stored, data).await?
    } else {
        None
    };

    let input = CreateObject {
        id: None,
        object_type: object_type
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| if is_image { "image" } else { "file" }.to_string()),
        url: None,
        file_path: Some(stored.public_path.clone()),
        base64: None,
        extension: naming::extension_of(original_name),
        position: Position::default(),
        rotation: Rotation::default(),
        uuid: client_uuid
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
    };
    input.validate().map_err(CoreError::from)?;
    let object = ObjectRepo::create(&state.pool, &input).await?;

    Ok((variants, object))
}

/// Derive variants on a blocking thread and write them next to the original.
///
/// Content that sniffs as an image but does not decode is kept as a plain
/// upload without variants.
async fn store_variants(
    state: &AppState,
    stored: &StoredFile,
    data: Vec<u8>,
) -> AppResult<Option<VariantPaths>> {
    let derived = tokio::task::spawn_blocking(move || imaging::derive_variants(&data))
        .await
        .map_err(|e| AppError::InternalError(format!("Variant task failed: {e}")))??;

    let Some(derived) = derived else {
        tracing::warn!(file_name = %stored.file_name, "Upload looked like an image but did not decode");
        return Ok(None);
    };

    let mut paths = VariantPaths::default();
    for variant in derived {
        let written = state
            .assets
            .save_variant(&stored.file_name, variant.size, &variant.bytes)
            .await?;
        tracing::debug!(
            file_name = %written.file_name,
            width = variant.width,
            height = variant.height,
            size = written.size,
            "Stored image variant"
        );
        match variant.size {
            ImageSize::Small => paths.small = written.public_path,
            ImageSize::Medium => paths.medium = written.public_path,
            ImageSize::Large => paths.large = written.public_path,
        }
    }
    Ok(Some(paths))
}
