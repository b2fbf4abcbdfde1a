//! Shared response types for API handlers.
//!
//! Object endpoints answer with bare records (no envelope) because existing
//! 3D clients read `_id`, `position` and `rotation` at the top level.

use scenestore_db::models::object::ObjectRecord;
use serde::Serialize;

/// `{ "message": ... }` acknowledgement body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// An object record with the byte size of its stored file.
///
/// `size` is `null` when the record has no `filePath` or the file is gone.
#[derive(Debug, Serialize)]
pub struct SizedObject {
    #[serde(flatten)]
    pub record: ObjectRecord,
    pub size: Option<u64>,
}

/// A record as returned by reads: with or without the `size` augmentation.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ObjectView {
    Plain(ObjectRecord),
    Sized(SizedObject),
}

/// `POST /objects` answers with one record or an array, mirroring the body.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CreatedObjects {
    One(ObjectRecord),
    Many(Vec<ObjectRecord>),
}
