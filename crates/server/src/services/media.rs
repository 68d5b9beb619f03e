//! Local object storage for uploaded media.
//!
//! Objects live on disk under a configured root directory and are served
//! by the router under `/media`. Validation happens before anything touches
//! the filesystem, so a rejected upload leaves no object behind.

use std::path::{Path, PathBuf};

use uuid::Uuid;

use vila_core::StoreId;

/// Maximum accepted object size: 5 MiB.
const MAX_OBJECT_BYTES: usize = 5 * 1024 * 1024;

/// Errors that can occur during media storage operations.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    /// The uploaded payload was empty.
    #[error("uploaded file is empty")]
    Empty,

    /// The uploaded payload exceeds the size limit.
    #[error("uploaded file exceeds {max_bytes} bytes")]
    TooLarge {
        /// Maximum accepted size in bytes.
        max_bytes: usize,
    },

    /// The content type is not an accepted image format.
    #[error("unsupported content type: {0}")]
    UnsupportedType(String),

    /// The object path is not a plain relative path.
    #[error("invalid object path")]
    InvalidPath,

    /// Filesystem error.
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A stored object's location.
#[derive(Debug, Clone)]
pub struct StoredObject {
    /// Object path relative to the media root.
    pub path: String,
    /// Object size in bytes.
    pub size_bytes: i64,
}

impl StoredObject {
    /// Public URL for this object, served under `/media`.
    #[must_use]
    pub fn public_url(&self) -> String {
        format!("/media/{}", self.path)
    }
}

/// Filesystem-backed media object store.
#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    /// Create a media store rooted at `root`. Does not touch the filesystem.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the root directory if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `MediaError::Io` if the directory cannot be created.
    pub async fn ensure_root(&self) -> Result<(), MediaError> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    /// Validate and store one object, returning its relative path.
    ///
    /// Validation runs before any filesystem write: a rejected upload
    /// creates nothing. Objects are grouped per store and named with a
    /// fresh UUID so concurrent uploads never collide.
    ///
    /// # Errors
    ///
    /// Returns `MediaError::Empty`, `TooLarge` or `UnsupportedType` when
    /// validation fails, `Io` when the write fails.
    pub async fn save(
        &self,
        store_id: StoreId,
        content_type: &str,
        data: &[u8],
    ) -> Result<StoredObject, MediaError> {
        if data.is_empty() {
            return Err(MediaError::Empty);
        }
        if data.len() > MAX_OBJECT_BYTES {
            return Err(MediaError::TooLarge {
                max_bytes: MAX_OBJECT_BYTES,
            });
        }
        let extension = extension_for(content_type)
            .ok_or_else(|| MediaError::UnsupportedType(content_type.to_owned()))?;

        let relative = format!("store-{store_id}/{}.{extension}", Uuid::new_v4());
        let absolute = self.root.join(&relative);

        if let Some(parent) = absolute.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&absolute, data).await?;

        Ok(StoredObject {
            path: relative,
            size_bytes: i64::try_from(data.len()).unwrap_or(i64::MAX),
        })
    }

    /// Remove a previously stored object.
    ///
    /// Used to undo the object write when recording its metadata fails, so
    /// a successful upload always means exactly one object and one row.
    ///
    /// # Errors
    ///
    /// Returns `MediaError::InvalidPath` if the path escapes the root,
    /// `Io` if the file cannot be removed.
    pub async fn remove(&self, path: &str) -> Result<(), MediaError> {
        validate_relative_path(path)?;
        tokio::fs::remove_file(self.root.join(path)).await?;
        Ok(())
    }

    /// The root directory objects are stored under.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Map an accepted image content type to its file extension.
fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        "image/gif" => Some("gif"),
        _ => None,
    }
}

/// Reject absolute paths and parent-directory components.
fn validate_relative_path(path: &str) -> Result<(), MediaError> {
    let p = Path::new(path);
    if p.is_absolute()
        || p.components()
            .any(|c| !matches!(c, std::path::Component::Normal(_)))
    {
        return Err(MediaError::InvalidPath);
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, MediaStore) {
        let dir = tempfile::tempdir().unwrap();
        let media = MediaStore::new(dir.path());
        (dir, media)
    }

    #[tokio::test]
    async fn test_save_writes_exactly_one_object() {
        let (_dir, media) = store();
        let object = media
            .save(StoreId::new(3), "image/png", b"png-bytes")
            .await
            .unwrap();

        assert!(object.path.starts_with("store-3/"));
        assert!(object.path.ends_with(".png"));
        assert_eq!(object.size_bytes, 9);
        assert_eq!(object.public_url(), format!("/media/{}", object.path));

        let on_disk = tokio::fs::read(media.root().join(&object.path))
            .await
            .unwrap();
        assert_eq!(on_disk, b"png-bytes");
    }

    #[tokio::test]
    async fn test_save_rejects_empty_without_writing() {
        let (dir, media) = store();
        assert!(matches!(
            media.save(StoreId::new(1), "image/png", b"").await,
            Err(MediaError::Empty)
        ));
        // Nothing was created under the root.
        assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
    }

    #[tokio::test]
    async fn test_save_rejects_unsupported_type_without_writing() {
        let (dir, media) = store();
        assert!(matches!(
            media
                .save(StoreId::new(1), "application/x-sh", b"#!/bin/sh")
                .await,
            Err(MediaError::UnsupportedType(_))
        ));
        assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
    }

    #[tokio::test]
    async fn test_save_rejects_oversized_payload() {
        let (_dir, media) = store();
        let big = vec![0_u8; MAX_OBJECT_BYTES + 1];
        assert!(matches!(
            media.save(StoreId::new(1), "image/jpeg", &big).await,
            Err(MediaError::TooLarge { .. })
        ));
    }

    #[tokio::test]
    async fn test_remove_deletes_object() {
        let (_dir, media) = store();
        let object = media
            .save(StoreId::new(2), "image/webp", b"webp")
            .await
            .unwrap();

        media.remove(&object.path).await.unwrap();
        assert!(!media.root().join(&object.path).exists());
    }

    #[tokio::test]
    async fn test_remove_rejects_traversal() {
        let (_dir, media) = store();
        assert!(matches!(
            media.remove("../outside.txt").await,
            Err(MediaError::InvalidPath)
        ));
        assert!(matches!(
            media.remove("/etc/passwd").await,
            Err(MediaError::InvalidPath)
        ));
    }

    #[test]
    fn test_extension_mapping() {
        assert_eq!(extension_for("image/jpeg"), Some("jpg"));
        assert_eq!(extension_for("text/html"), None);
    }
}
