use std::{
    io,
    path::{Component, Path, PathBuf},
};

use async_trait::async_trait;
use derive_more::Display;
use infer::MatcherType;
use tokio::fs;
use uuid::Uuid;

use crate::{
    entities::book::{CoverUpload, COVER_UPLOAD_DIR},
    errors::AppError,
    settings::AppConfig,
};

#[async_trait]
pub trait CoverStore: Send + Sync {
    /// Persists the upload and returns its path relative to the media root.
    async fn store_cover(&self, upload: &CoverUpload) -> Result<String, AppError>;
}

/// Stores covers on the local filesystem under `<media_root>/book_covers/`.
/// Every upload gets a fresh UUID file name.
#[derive(Debug, Clone)]
pub struct LocalCoverStore {
    media_root: PathBuf,
    max_bytes: usize,
}

impl LocalCoverStore {
    pub fn new(media_root: impl Into<PathBuf>, max_bytes: usize) -> Self {
        LocalCoverStore {
            media_root: media_root.into(),
            max_bytes,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.media_root, config.max_upload_bytes)
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Maps a media-relative path onto the filesystem, refusing anything that
    /// could escape the media root.
    pub fn resolve(&self, relative: &str) -> Option<PathBuf> {
        let relative = Path::new(relative);
        let safe = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));

        if !safe || relative.as_os_str().is_empty() {
            return None;
        }
        Some(self.media_root.join(relative))
    }
}

#[async_trait]
impl CoverStore for LocalCoverStore {
    async fn store_cover(&self, upload: &CoverUpload) -> Result<String, AppError> {
        if upload.size > self.max_bytes {
            return Err(StorageError::TooLarge(self.max_bytes).into());
        }

        let kind = infer::get_from_path(&upload.path)
            .map_err(StorageError::Io)?
            .filter(|kind| kind.matcher_type() == MatcherType::Image)
            .ok_or(StorageError::NotAnImage)?;

        let dir = self.media_root.join(COVER_UPLOAD_DIR);
        fs::create_dir_all(&dir).await.map_err(StorageError::Io)?;

        let file_name = format!("{}.{}", Uuid::new_v4(), kind.extension());
        fs::copy(&upload.path, dir.join(&file_name))
            .await
            .map_err(StorageError::Io)?;

        tracing::info!(
            original = upload.file_name.as_deref().unwrap_or("<unnamed>"),
            stored = %file_name,
            mime = kind.mime_type(),
            "Stored cover image"
        );

        Ok(format!("{}/{}", COVER_UPLOAD_DIR, file_name))
    }
}

#[derive(Debug, Display)]
pub enum StorageError {
    #[display("Upload a valid image. The file you uploaded was either not an image or a corrupted image.")]
    NotAnImage,

    #[display("Image exceeds the maximum upload size of {_0} bytes.")]
    TooLarge(usize),

    #[display("Failed to store upload: {_0}")]
    Io(io::Error),
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotAnImage | StorageError::TooLarge(_) => {
                AppError::invalid_field("cover_image", err.to_string())
            }
            StorageError::Io(e) => AppError::InternalError(format!("Failed to store upload: {}", e)),
        }
    }
}
