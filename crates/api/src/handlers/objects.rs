//! Handlers for the `/objects` resource.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use futures::future::join_all;
use scenestore_core::error::CoreError;
use scenestore_core::object::{CreateObject, ObjectFilter, UpdateObject};
use scenestore_core::storage::AssetStore;
use scenestore_core::types::ObjectId;
use scenestore_db::models::object::ObjectRecord;
use scenestore_db::repositories::ObjectRepo;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::query::{IncludeSizeParams, ListObjectsParams};
use crate::response::{CreatedObjects, MessageResponse, ObjectView, SizedObject};
use crate::state::AppState;

/// GET /objects
///
/// Supports `?type=` and `?uuid=` exact-match filters.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListObjectsParams>,
) -> AppResult<Json<Vec<ObjectView>>> {
    let filter = ObjectFilter {
        object_type: params.object_type,
        uuid: params.uuid,
    };
    let records = if filter.is_empty() {
        ObjectRepo::list(&state.pool).await?
    } else {
        ObjectRepo::list_by_filter(&state.pool, &filter).await?
    };

    let views = join_all(
        records
            .into_iter()
            .map(|record| view(&state.assets, record, params.include_size)),
    )
    .await;
    Ok(Json(views))
}

/// GET /objects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<IncludeSizeParams>,
) -> AppResult<Json<ObjectView>> {
    let object_id = parse_object_id(&id)?;
    let record = ObjectRepo::find_by_id(&state.pool, object_id)
        .await?
        .ok_or_else(|| not_found(&id))?;
    Ok(Json(view(&state.assets, record, params.include_size).await))
}

/// POST /objects
///
/// Accepts one object or an array. Array entries are validated and inserted
/// independently; invalid or rejected entries are skipped.
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<(StatusCode, Json<CreatedObjects>)> {
    let Json(body) = payload?;
    match body {
        Value::Array(entries) => {
            let received = entries.len();
            let mut valid = Vec::with_capacity(received);
            for (index, entry) in entries.into_iter().enumerate() {
                match CreateObject::from_json(entry) {
                    Ok(input) => valid.push(input),
                    Err(err) => {
                        tracing::warn!(index, error = %err, "Skipping invalid object in bulk create");
                    }
                }
            }

            let saved = ObjectRepo::create_many(&state.pool, &valid).await?;
            tracing::info!(received, saved = saved.len(), "Bulk object create");
            Ok((StatusCode::CREATED, Json(CreatedObjects::Many(saved))))
        }
        single => {
            let input = CreateObject::from_json(single)?;
            let record = ObjectRepo::create(&state.pool, &input).await?;
            tracing::debug!(id = %record.id, uuid = %record.doc.uuid, "Object created");
            Ok((StatusCode::CREATED, Json(CreatedObjects::One(record))))
        }
    }
}

/// PUT /objects/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<ObjectRecord>> {
    let object_id = parse_object_id(&id)?;
    let Json(body) = payload?;
    let input = UpdateObject::from_json(body)?;
    let record = ObjectRepo::update(&state.pool, object_id, &input)
        .await?
        .ok_or_else(|| not_found(&id))?;
    Ok(Json(record))
}

/// DELETE /objects/{id}
///
/// The referenced file, if any, stays on disk.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let object_id = parse_object_id(&id)?;
    if ObjectRepo::delete(&state.pool, object_id).await? {
        Ok(Json(MessageResponse {
            message: "Object deleted successfully",
        }))
    } else {
        Err(not_found(&id))
    }
}

/// An id that does not parse cannot exist, so it is a 404 rather than a 400.
fn parse_object_id(raw: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw).map_err(|_| not_found(raw))
}

fn not_found(id: &str) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Object",
        id: id.to_string(),
    })
}

async fn view(assets: &AssetStore, record: ObjectRecord, include_size: bool) -> ObjectView {
    if !include_size {
        return ObjectView::Plain(record);
    }
    let size = match record.doc.file_path.as_deref() {
        Some(path) => assets.file_size(path).await,
        None => None,
    };
    ObjectView::Sized(SizedObject { record, size })
}
