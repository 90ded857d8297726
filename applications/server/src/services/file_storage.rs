/// File storage service - writes uploads into the media directory
use crate::error::{Result, ServerError};
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

/// Accepted upload content types and the extension each is stored under
const ALLOWED_TYPES: &[(&str, &str)] = &[
    ("image/png", "png"),
    ("image/jpeg", "jpg"),
    ("audio/mpeg", "mp3"),
    ("application/octet-stream", "mp3"),
];

/// An upload that has been written to disk
#[derive(Debug, Clone)]
pub struct StoredFile {
    /// Name under the media directory, e.g. `3f2a...e1.mp3`
    pub filename: String,
    pub path: PathBuf,
    pub content_type: String,
}

#[derive(Debug, Clone)]
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Initialize storage directories
    pub async fn initialize(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path).await?;
        Ok(())
    }

    /// Extension for an accepted content type, `None` if it is not accepted
    pub fn extension_for(content_type: &str) -> Option<&'static str> {
        ALLOWED_TYPES
            .iter()
            .find(|(mime, _)| mime.eq_ignore_ascii_case(content_type))
            .map(|(_, ext)| *ext)
    }

    /// Store an upload under a fresh random name.
    ///
    /// Names come from a v4 UUID so concurrent uploads never collide.
    pub async fn store_upload(&self, content_type: &str, data: &[u8]) -> Result<StoredFile> {
        let extension = Self::extension_for(content_type).ok_or_else(|| {
            ServerError::UnsupportedMediaType(format!(
                "Unsupported {} mime type. Accept jpg, png and mp3 only",
                content_type
            ))
        })?;

        let filename = format!("{}.{}", Uuid::new_v4().simple(), extension);
        let path = self.base_path.join(&filename);

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        fs::write(&path, data).await?;
        tracing::debug!("Stored {} bytes as {}", data.len(), filename);

        Ok(StoredFile {
            filename,
            path,
            content_type: content_type.to_string(),
        })
    }

    /// Public URL of a stored file under the `/static` mount
    pub fn public_url(base_url: &str, filename: &str) -> String {
        format!("{}/static/{}", base_url.trim_end_matches('/'), filename)
    }
}
