//! Object row model.

use scenestore_core::object::ObjectDocument;
use scenestore_core::types::{ObjectId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `objects` table, serialized with the document fields
/// flattened next to `_id`.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectRecord {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[sqlx(json)]
    #[serde(flatten)]
    pub doc: ObjectDocument,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
