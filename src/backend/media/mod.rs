//! Media Store
//!
//! Uploaded files (post media, avatars) are written beneath a configured
//! root directory, one subdirectory per owning user, and served back under
//! `/uploads`. Deleting an account removes its whole subdirectory.
//!
//! Only images and videos pass validation, gated on both the MIME type and
//! the file extension, with a per-file size cap.

use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::shared::{MediaItem, MediaKind};

/// Per-file upload cap: 10 MB
pub const MAX_FILE_BYTES: usize = 10 * 1024 * 1024;

/// Allowed file extensions, lowercase
const ALLOWED_EXTENSIONS: [&str; 7] = ["jpg", "jpeg", "png", "gif", "mp4", "avi", "mov"];

/// Filesystem-backed store for uploaded media
#[derive(Clone, Debug)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory uploads are written beneath
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Validate and persist one uploaded file for `owner`.
    ///
    /// # Errors
    ///
    /// * `400` - missing/disallowed extension, non-media MIME type, or the
    ///   file exceeds [`MAX_FILE_BYTES`]
    /// * `500` - filesystem failure
    pub async fn store(
        &self,
        owner: Uuid,
        file_name: Option<&str>,
        content_type: Option<&str>,
        data: &[u8],
    ) -> Result<MediaItem, BackendError> {
        if data.len() > MAX_FILE_BYTES {
            return Err(BackendError::validation("File too large (max 10 MB)"));
        }

        let extension = file_name
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .ok_or_else(|| BackendError::validation("Only images and videos are allowed"))?;

        if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(BackendError::validation("Only images and videos are allowed"));
        }

        let kind = content_type
            .and_then(MediaKind::from_content_type)
            .ok_or_else(|| BackendError::validation("Only images and videos are allowed"))?;

        let user_dir = self.root.join(owner.to_string());
        tokio::fs::create_dir_all(&user_dir).await.map_err(|e| {
            tracing::error!("Failed to create media directory: {:?}", e);
            BackendError::internal("Failed to store file")
        })?;

        let stored_name = format!("{}.{}", Uuid::new_v4(), extension);
        let path = user_dir.join(&stored_name);
        tokio::fs::write(&path, data).await.map_err(|e| {
            tracing::error!("Failed to write media file: {:?}", e);
            BackendError::internal("Failed to store file")
        })?;

        tracing::debug!("Stored {} bytes at {}", data.len(), path.display());

        Ok(MediaItem {
            kind,
            url: format!("/uploads/{}/{}", owner, stored_name),
        })
    }

    /// Remove every file uploaded by `owner`; missing directory is fine
    pub async fn remove_user_media(&self, owner: Uuid) -> std::io::Result<()> {
        let user_dir = self.root.join(owner.to_string());
        match tokio::fs::remove_dir_all(&user_dir).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_store_image() {
        let dir = tempdir().unwrap();
        let store = MediaStore::new(dir.path());
        let owner = Uuid::new_v4();

        let item = store
            .store(owner, Some("photo.png"), Some("image/png"), b"pngdata")
            .await
            .unwrap();

        assert_eq!(item.kind, MediaKind::Image);
        assert!(item.url.starts_with(&format!("/uploads/{}/", owner)));
        assert!(item.url.ends_with(".png"));

        let stored_name = item.url.rsplit('/').next().unwrap();
        let on_disk = dir.path().join(owner.to_string()).join(stored_name);
        assert_eq!(std::fs::read(on_disk).unwrap(), b"pngdata");
    }

    #[tokio::test]
    async fn test_store_video_kind() {
        let dir = tempdir().unwrap();
        let store = MediaStore::new(dir.path());

        let item = store
            .store(Uuid::new_v4(), Some("clip.mp4"), Some("video/mp4"), b"mp4")
            .await
            .unwrap();

        assert_eq!(item.kind, MediaKind::Video);
    }

    #[tokio::test]
    async fn test_rejects_disallowed_extension() {
        let dir = tempdir().unwrap();
        let store = MediaStore::new(dir.path());

        let err = store
            .store(Uuid::new_v4(), Some("doc.pdf"), Some("application/pdf"), b"x")
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_rejects_missing_extension() {
        let dir = tempdir().unwrap();
        let store = MediaStore::new(dir.path());

        let err = store
            .store(Uuid::new_v4(), Some("noext"), Some("image/png"), b"x")
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_rejects_mismatched_content_type() {
        let dir = tempdir().unwrap();
        let store = MediaStore::new(dir.path());

        // Media extension with a non-media MIME type must not pass.
        let err = store
            .store(Uuid::new_v4(), Some("fake.png"), Some("text/html"), b"x")
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_rejects_oversized_file() {
        let dir = tempdir().unwrap();
        let store = MediaStore::new(dir.path());
        let data = vec![0u8; MAX_FILE_BYTES + 1];

        let err = store
            .store(Uuid::new_v4(), Some("big.png"), Some("image/png"), &data)
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_remove_user_media() {
        let dir = tempdir().unwrap();
        let store = MediaStore::new(dir.path());
        let owner = Uuid::new_v4();

        store
            .store(owner, Some("photo.jpg"), Some("image/jpeg"), b"jpg")
            .await
            .unwrap();
        assert!(dir.path().join(owner.to_string()).exists());

        store.remove_user_media(owner).await.unwrap();
        assert!(!dir.path().join(owner.to_string()).exists());

        // Removing again is not an error.
        store.remove_user_media(owner).await.unwrap();
    }
}
