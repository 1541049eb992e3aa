//! Image uploads for section content and blog posts.
//!
//! An upload yields an [`UploadedImage`]: the public `url` to render and the
//! storage `path` needed to delete it later. Upload, document write and
//! delete are independent steps, so a failed document write can leave an
//! orphaned file behind.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

pub const ALLOWED_CONTENT_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png", "image/webp", "image/gif"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedImage {
    pub url: String,
    pub path: String,
}

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Invalid file type `{0}`. Please upload a JPEG, PNG, WebP or GIF image.")]
    UnsupportedType(String),
    #[error("File too large ({0} bytes). Maximum size is 5MB.")]
    TooLarge(usize),
    #[error("invalid image path `{0}`")]
    InvalidPath(String),
    #[error("image not found: {0}")]
    NotFound(String),
    #[error("image storage error: {0}")]
    Io(#[from] std::io::Error),
}

impl ImageError {
    /// Whether the caller sent something unacceptable, as opposed to a
    /// storage failure.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ImageError::Io(_))
    }
}

pub fn validate_image(content_type: &str, size: usize) -> Result<(), ImageError> {
    let normalized = content_type.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
    if !ALLOWED_CONTENT_TYPES.contains(&normalized.as_str()) {
        return Err(ImageError::UnsupportedType(content_type.to_string()));
    }
    if size > MAX_IMAGE_BYTES {
        return Err(ImageError::TooLarge(size));
    }
    Ok(())
}

/// Keep ASCII letters, digits, `.`, `_` and `-`; everything else becomes `-`.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '-'
            }
        })
        .collect();
    let cleaned = cleaned.trim_matches(|c| c == '.' || c == '-');
    if cleaned.is_empty() {
        "image".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Folder names are one or more `/`-separated segments of `[A-Za-z0-9_-]`.
pub fn validate_folder(folder: &str) -> Result<&str, ImageError> {
    let folder = folder.trim_matches('/');
    let ok = !folder.is_empty()
        && folder.split('/').all(|segment| {
            !segment.is_empty() && segment.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        });
    if ok {
        Ok(folder)
    } else {
        Err(ImageError::InvalidPath(folder.to_string()))
    }
}

/// Resolve a stored image path under `root`, refusing anything that could
/// escape it.
fn resolve(root: &Path, path: &str) -> Result<PathBuf, ImageError> {
    let relative = Path::new(path);
    let safe = !path.is_empty() && relative.components().all(|c| matches!(c, Component::Normal(_)));
    if safe {
        Ok(root.join(relative))
    } else {
        Err(ImageError::InvalidPath(path.to_string()))
    }
}

#[async_trait]
pub trait ImageStorage: Send + Sync {
    async fn upload(
        &self,
        folder: &str,
        file_name: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<UploadedImage, ImageError>;

    async fn delete(&self, path: &str) -> Result<(), ImageError>;
}

/// Stores images on the local filesystem and serves them from `base_url`.
#[derive(Debug, Clone)]
pub struct LocalImageStorage {
    root: PathBuf,
    base_url: String,
}

impl LocalImageStorage {
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl ImageStorage for LocalImageStorage {
    async fn upload(
        &self,
        folder: &str,
        file_name: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<UploadedImage, ImageError> {
        validate_image(content_type, bytes.len())?;
        let folder = validate_folder(folder)?;
        let path = format!(
            "{folder}/{}-{}",
            Utc::now().timestamp_millis(),
            sanitize_file_name(file_name)
        );
        let target = resolve(&self.root, &path)?;
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, bytes).await?;
        tracing::info!(path = %path, bytes = bytes.len(), "image uploaded");

        Ok(UploadedImage {
            url: format!("{}/{path}", self.base_url),
            path,
        })
    }

    async fn delete(&self, path: &str) -> Result<(), ImageError> {
        let target = resolve(&self.root, path)?;
        match tokio::fs::remove_file(&target).await {
            Ok(()) => {
                tracing::info!(path = %path, "image deleted");
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Err(ImageError::NotFound(path.to_string())),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_only_supported_images() {
        assert!(validate_image("image/png", 1024).is_ok());
        assert!(validate_image("image/jpeg; charset=binary", 10).is_ok());
        assert!(matches!(validate_image("application/pdf", 10), Err(ImageError::UnsupportedType(_))));
        assert!(matches!(
            validate_image("image/gif", MAX_IMAGE_BYTES + 1),
            Err(ImageError::TooLarge(_))
        ));
        assert!(validate_image("image/webp", MAX_IMAGE_BYTES).is_ok());
    }

    #[test]
    fn file_names_are_sanitized() {
        assert_eq!(sanitize_file_name("My Logo (1).png"), "My-Logo--1-.png");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("תמונה"), "image");
    }

    #[test]
    fn folders_cannot_escape() {
        assert_eq!(validate_folder("services/").unwrap(), "services");
        assert!(validate_folder("../x").is_err());
        assert!(validate_folder("").is_err());
    }

    #[tokio::test]
    async fn upload_then_delete() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalImageStorage::new(dir.path(), "/uploads/");

        let image = storage.upload("about", "team.png", "image/png", b"\x89PNG").await.unwrap();
        assert!(image.path.starts_with("about/"));
        assert!(image.path.ends_with("-team.png"));
        assert_eq!(image.url, format!("/uploads/{}", image.path));
        assert!(dir.path().join(&image.path).exists());

        storage.delete(&image.path).await.unwrap();
        assert!(!dir.path().join(&image.path).exists());
        assert!(matches!(storage.delete(&image.path).await, Err(ImageError::NotFound(_))));
    }

    #[tokio::test]
    async fn rejected_uploads_write_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalImageStorage::new(dir.path(), "/uploads");
        assert!(storage.upload("blog", "doc.pdf", "application/pdf", b"%PDF").await.is_err());
        assert!(storage.delete("../outside.png").await.is_err());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
