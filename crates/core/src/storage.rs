//! Flat on-disk store for uploaded files and their derived variants.
//!
//! Files are keyed by generated name and never overwritten: writes use
//! create-new semantics. Nothing here removes files.

use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

use crate::error::CoreError;
use crate::imaging::ImageSize;
use crate::naming;

/// A file written to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Name inside the store directory.
    pub file_name: String,
    /// Path the file is served under (`/uploads/...`).
    pub public_path: String,
    /// Bytes written.
    pub size: u64,
}

/// Handle on the upload directory. Cheap to clone.
#[derive(Debug, Clone)]
pub struct AssetStore {
    root: PathBuf,
}

impl AssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the store directory if it does not exist yet.
    pub async fn ensure_root(&self) -> Result<(), CoreError> {
        tokio::fs::create_dir_all(&self.root).await.map_err(|e| {
            CoreError::Internal(format!(
                "Failed to create upload directory {}: {e}",
                self.root.display()
            ))
        })
    }

    /// Store an upload under a freshly generated name.
    pub async fn save_upload(
        &self,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<StoredFile, CoreError> {
        let file_name = naming::generate_stored_file_name(original_name);
        self.write_new(file_name, bytes).await
    }

    /// Store the `size` variant of an already stored upload.
    pub async fn save_variant(
        &self,
        stored_name: &str,
        size: ImageSize,
        bytes: &[u8],
    ) -> Result<StoredFile, CoreError> {
        self.write_new(naming::variant_file_name(stored_name, size), bytes)
            .await
    }

    /// Byte size of the file behind a public `/uploads/...` path.
    ///
    /// `None` when the path is outside the store or the file is missing.
    pub async fn file_size(&self, public_path: &str) -> Option<u64> {
        let name = naming::stored_name_from_public_path(public_path)?;
        let metadata = tokio::fs::metadata(self.root.join(name)).await.ok()?;
        metadata.is_file().then(|| metadata.len())
    }

    /// Location of a stored file, if `file_name` is safe and exists.
    pub async fn resolve(&self, file_name: &str) -> Option<PathBuf> {
        if !naming::is_safe_file_name(file_name) {
            return None;
        }
        let path = self.root.join(file_name);
        match tokio::fs::metadata(&path).await {
            Ok(metadata) if metadata.is_file() => Some(path),
            _ => None,
        }
    }

    /// Remove a stored upload and any of its variants. Best effort: missing
    /// files and removal errors are ignored.
    pub async fn discard(&self, stored_name: &str) {
        if !naming::is_safe_file_name(stored_name) {
            return;
        }
        remove_if_present(&self.root.join(stored_name)).await;
        for size in ImageSize::ALL {
            let variant = naming::variant_file_name(stored_name, size);
            remove_if_present(&self.root.join(variant)).await;
        }
    }

    async fn write_new(&self, file_name: String, bytes: &[u8]) -> Result<StoredFile, CoreError> {
        self.ensure_root().await?;
        let path = self.root.join(&file_name);

        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| CoreError::Internal(format!("Failed to create {file_name}: {e}")))?;
        let written = match file.write_all(bytes).await {
            Ok(()) => file.flush().await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            drop(file);
            remove_if_present(&path).await;
            return Err(CoreError::Internal(format!(
                "Failed to write {file_name}: {e}"
            )));
        }

        Ok(StoredFile {
            public_path: naming::public_path(&file_name),
            file_name,
            size: bytes.len() as u64,
        })
    }
}

async fn remove_if_present(path: &Path) {
    let _ = tokio::fs::remove_file(path).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn store() -> (tempfile::TempDir, AssetStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = AssetStore::new(dir.path().join("uploads"));
        (dir, store)
    }

    #[tokio::test]
    async fn save_upload_writes_bytes_under_generated_name() {
        let (_dir, store) = store();
        let stored = store.save_upload("chair.glb", b"glTF-bytes").await.unwrap();

        assert!(stored.file_name.ends_with("-chair.glb"));
        assert_eq!(stored.public_path, format!("/uploads/{}", stored.file_name));
        assert_eq!(stored.size, 10);

        let on_disk = tokio::fs::read(store.root().join(&stored.file_name))
            .await
            .unwrap();
        assert_eq!(on_disk, b"glTF-bytes");
    }

    #[tokio::test]
    async fn same_original_name_never_collides() {
        let (_dir, store) = store();
        let first = store.save_upload("a.png", b"1").await.unwrap();
        let second = store.save_upload("a.png", b"2").await.unwrap();
        assert_ne!(first.file_name, second.file_name);
    }

    #[tokio::test]
    async fn variants_are_written_next_to_the_original() {
        let (_dir, store) = store();
        let stored = store.save_upload("photo.png", b"orig").await.unwrap();
        let variant = store
            .save_variant(&stored.file_name, ImageSize::Small, b"sm")
            .await
            .unwrap();

        assert!(variant.file_name.ends_with("-photo_small.png"));
        assert!(store.resolve(&variant.file_name).await.is_some());
    }

    #[tokio::test]
    async fn writing_an_existing_variant_fails() {
        let (_dir, store) = store();
        let stored = store.save_upload("photo.png", b"orig").await.unwrap();
        store
            .save_variant(&stored.file_name, ImageSize::Large, b"l")
            .await
            .unwrap();
        let again = store
            .save_variant(&stored.file_name, ImageSize::Large, b"l")
            .await;
        assert_matches!(again, Err(CoreError::Internal(_)));
    }

    #[tokio::test]
    async fn file_size_of_public_path() {
        let (_dir, store) = store();
        let stored = store.save_upload("a.bin", &[0u8; 42]).await.unwrap();

        assert_eq!(store.file_size(&stored.public_path).await, Some(42));
        assert_eq!(store.file_size("/uploads/missing.bin").await, None);
        assert_eq!(store.file_size("https://cdn.example.com/a.bin").await, None);
    }

    #[tokio::test]
    async fn resolve_rejects_unsafe_and_missing_names() {
        let (_dir, store) = store();
        store.ensure_root().await.unwrap();
        assert!(store.resolve("../Cargo.toml").await.is_none());
        assert!(store.resolve("nope.png").await.is_none());
    }

    #[tokio::test]
    async fn discard_removes_original_and_variants() {
        let (_dir, store) = store();
        let stored = store.save_upload("photo.png", b"orig").await.unwrap();
        let small = store
            .save_variant(&stored.file_name, ImageSize::Small, b"sm")
            .await
            .unwrap();

        store.discard(&stored.file_name).await;

        assert!(store.resolve(&stored.file_name).await.is_none());
        assert!(store.resolve(&small.file_name).await.is_none());
        let mut entries = tokio::fs::read_dir(store.root()).await.unwrap();
        assert!(entries.next_entry().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn discard_of_unknown_or_unsafe_name_is_harmless() {
        let (_dir, store) = store();
        let kept = store.save_upload("keep.txt", b"k").await.unwrap();

        store.discard("never-stored.png").await;
        store.discard("../keep.txt").await;

        assert!(store.resolve(&kept.file_name).await.is_some());
    }
}
