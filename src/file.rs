use crate::error::{Result, UploadError};
use bytes::Bytes;
use mime_guess::from_path;
use std::path::Path;

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// The file chosen for upload: its name, MIME type and raw content
#[derive(Debug, Clone)]
pub struct SelectedFile {
    name: String,
    content_type: String,
    bytes: Bytes,
}

impl SelectedFile {
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk. The content type is `content_type` when given,
    /// otherwise guessed from the extension.
    pub async fn open(path: &Path, content_type: Option<&str>) -> Result<Self> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| UploadError::ReadFile {
                path: path.to_path_buf(),
                source,
            })?;

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        let content_type = match content_type {
            Some(content_type) => content_type.to_string(),
            None => from_path(path)
                .first_raw()
                .unwrap_or(FALLBACK_CONTENT_TYPE)
                .to_string(),
        };

        Ok(Self::new(name, content_type, bytes))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
