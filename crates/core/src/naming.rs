//! Stored-file naming conventions for uploads and derived variants.
//!
//! Uploads are stored flat as `{unix_millis}-{nonce}-{sanitized name}` and
//! served under [`UPLOADS_URL_PREFIX`]. Variants append `_{size}` to the stem.

use uuid::Uuid;

use crate::imaging::ImageSize;
use crate::types::Timestamp;

/// URL prefix the upload directory is served under.
pub const UPLOADS_URL_PREFIX: &str = "/uploads/";

/// Longest sanitized original name kept in a stored filename.
const MAX_ORIGINAL_NAME_LEN: usize = 100;

/// Fallback when an original name sanitizes to nothing.
const FALLBACK_NAME: &str = "upload";

/// Reduce a client-supplied filename to `[A-Za-z0-9._-]`, dropping any
/// directory components.
///
/// ```
/// use scenestore_core::naming::sanitize_file_name;
///
/// assert_eq!(sanitize_file_name("my chair.glb"), "my_chair.glb");
/// assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
/// assert_eq!(sanitize_file_name(""), "upload");
/// ```
pub fn sanitize_file_name(original: &str) -> String {
    let base = original.rsplit(['/', '\\']).next().unwrap_or("");
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let trimmed = cleaned.trim_start_matches('.');
    let truncated: String = trimmed.chars().take(MAX_ORIGINAL_NAME_LEN).collect();

    if truncated.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        truncated
    }
}

/// Build the stored filename for an upload received at `now`.
pub fn stored_file_name(original: &str, now: Timestamp, nonce: Uuid) -> String {
    let nonce = nonce.simple().to_string();
    format!(
        "{}-{}-{}",
        now.timestamp_millis(),
        &nonce[..8],
        sanitize_file_name(original)
    )
}

/// [`stored_file_name`] for the current time and a random nonce.
pub fn generate_stored_file_name(original: &str) -> String {
    stored_file_name(original, chrono::Utc::now(), Uuid::new_v4())
}

/// Filename of the `size` variant of a stored upload.
///
/// ```
/// use scenestore_core::imaging::ImageSize;
/// use scenestore_core::naming::variant_file_name;
///
/// assert_eq!(variant_file_name("1-ab-photo.png", ImageSize::Small), "1-ab-photo_small.png");
/// ```
pub fn variant_file_name(stored: &str, size: ImageSize) -> String {
    match stored.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem}_{}.{ext}", size.suffix()),
        _ => format!("{stored}_{}", size.suffix()),
    }
}

/// Lowercased extension without the dot, if any.
pub fn extension_of(name: &str) -> Option<String> {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    match base.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => Some(ext.to_lowercase()),
        _ => None,
    }
}

/// A bare filename that cannot escape the upload directory.
pub fn is_safe_file_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.contains(['/', '\\', '\0'])
}

/// Public path a stored file is served under.
pub fn public_path(stored: &str) -> String {
    format!("{UPLOADS_URL_PREFIX}{stored}")
}

/// Inverse of [`public_path`]. `None` for paths outside the upload prefix.
pub fn stored_name_from_public_path(path: &str) -> Option<&str> {
    let name = path
        .strip_prefix(UPLOADS_URL_PREFIX)
        .or_else(|| path.strip_prefix(&UPLOADS_URL_PREFIX[1..]))?;
    is_safe_file_name(name).then_some(name)
}
