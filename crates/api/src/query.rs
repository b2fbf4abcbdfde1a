//! Shared query parameter types for API handlers.

use serde::Deserialize;

fn default_true() -> bool {
    true
}

/// `?include_size=` toggle for object reads (default `true`).
#[derive(Debug, Deserialize)]
pub struct IncludeSizeParams {
    #[serde(default = "default_true")]
    pub include_size: bool,
}

/// Query parameters for `GET /objects`.
#[derive(Debug, Deserialize)]
pub struct ListObjectsParams {
    #[serde(default = "default_true")]
    pub include_size: bool,
    /// Exact match on the document `type`.
    #[serde(rename = "type")]
    pub object_type: Option<String>,
    /// Exact match on the client `uuid`.
    pub uuid: Option<String>,
}

/// `?size=small|medium|large` for derived image lookups.
#[derive(Debug, Deserialize)]
pub struct ImageSizeParams {
    pub size: Option<String>,
}
