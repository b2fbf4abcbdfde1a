//! Object documents: the persisted body of one placed 3D asset.
//!
//! The primary key and timestamps live next to the document, not inside it.
//! An object references its asset in exactly one of three ways (`url`,
//! `filePath` or `base64`).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationError};

use crate::error::CoreError;
use crate::transform::{Position, Rotation};
use crate::types::ObjectId;

/// Document keys holding an asset reference.
pub const ASSET_REFERENCE_FIELDS: [&str; 3] = ["url", "filePath", "base64"];

/// The stored document body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectDocument {
    #[serde(rename = "type", default)]
    pub object_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base64: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub rotation: Rotation,
    #[serde(default)]
    pub uuid: String,
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// DTO for creating an object.
///
/// `_id` (or `id`) is optional; the store assigns one when it is absent.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_create_asset_reference"))]
pub struct CreateObject {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: Option<ObjectId>,
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "type must not be empty"))]
    pub object_type: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub base64: Option<String>,
    #[serde(default)]
    pub extension: Option<String>,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    #[validate(nested)]
    pub rotation: Rotation,
    #[validate(length(min = 1, message = "uuid must not be empty"))]
    pub uuid: String,
}

impl CreateObject {
    /// Decode and validate one JSON payload.
    pub fn from_json(value: Value) -> Result<Self, CoreError> {
        let input: Self = serde_json::from_value(value)
            .map_err(|e| CoreError::Validation(format!("Malformed object: {e}")))?;
        input.validate()?;
        Ok(input)
    }

    /// The document to persist. Empty asset strings are dropped.
    pub fn to_document(&self) -> ObjectDocument {
        ObjectDocument {
            object_type: self.object_type.clone(),
            url: non_empty(&self.url),
            file_path: non_empty(&self.file_path),
            base64: non_empty(&self.base64),
            extension: non_empty(&self.extension),
            position: self.position,
            rotation: self.rotation.clone(),
            uuid: self.uuid.clone(),
        }
    }
}

fn validate_create_asset_reference(input: &CreateObject) -> Result<(), ValidationError> {
    match count_asset_references(&input.url, &input.file_path, &input.base64) {
        1 => Ok(()),
        _ => Err(ValidationError::new("asset_reference")
            .with_message("exactly one of url, filePath or base64 must be set".into())),
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

/// DTO for a partial update. Absent fields are left untouched; a given
/// `position` or `rotation` replaces the whole sub-document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_update_asset_reference"))]
pub struct UpdateObject {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "type must not be empty"))]
    pub object_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base64: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(nested)]
    pub rotation: Option<Rotation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "uuid must not be empty"))]
    pub uuid: Option<String>,
}

impl UpdateObject {
    /// Decode and validate one JSON payload.
    pub fn from_json(value: Value) -> Result<Self, CoreError> {
        let input: Self = serde_json::from_value(value)
            .map_err(|e| CoreError::Validation(format!("Malformed update: {e}")))?;
        input.validate()?;
        Ok(input)
    }

    pub fn is_empty(&self) -> bool {
        self.object_type.is_none()
            && self.url.is_none()
            && self.file_path.is_none()
            && self.base64.is_none()
            && self.extension.is_none()
            && self.position.is_none()
            && self.rotation.is_none()
            && self.uuid.is_none()
    }

    /// The set fields as a JSON object, ready to merge over a stored document.
    pub fn patch(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| Value::Object(Default::default()))
    }

    /// Asset reference keys to drop from the stored document: setting one
    /// reference clears the other two.
    pub fn cleared_fields(&self) -> Vec<String> {
        let set = [&self.url, &self.file_path, &self.base64];
        if set.iter().all(|field| field.is_none()) {
            return Vec::new();
        }
        ASSET_REFERENCE_FIELDS
            .iter()
            .zip(set)
            .filter(|(_, value)| value.is_none())
            .map(|(key, _)| key.to_string())
            .collect()
    }
}

fn validate_update_asset_reference(input: &UpdateObject) -> Result<(), ValidationError> {
    let given = [&input.url, &input.file_path, &input.base64]
        .iter()
        .filter(|field| field.is_some())
        .count();
    if given > 1 {
        return Err(ValidationError::new("asset_reference")
            .with_message("at most one of url, filePath or base64 may be set".into()));
    }
    if given == 1 && count_asset_references(&input.url, &input.file_path, &input.base64) == 0 {
        return Err(ValidationError::new("asset_reference")
            .with_message("asset reference must not be empty".into()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

/// Exact-match filter over document fields. An empty filter matches all.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ObjectFilter {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
}

impl ObjectFilter {
    pub fn is_empty(&self) -> bool {
        self.object_type.is_none() && self.uuid.is_none()
    }
}

fn count_asset_references(
    url: &Option<String>,
    file_path: &Option<String>,
    base64: &Option<String>,
) -> usize {
    [url, file_path, base64]
        .iter()
        .filter(|field| field.as_deref().is_some_and(|s| !s.is_empty()))
        .count()
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|s| !s.is_empty()).cloned()
}
