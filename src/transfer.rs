use crate::error::{Result, UploadError};
use crate::file::SelectedFile;
use crate::presign::UploadUrl;
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use tracing::{error, info, warn};

/// Response of an accepted transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferReceipt {
    pub status: StatusCode,
    pub body: String,
}

#[derive(Debug, Clone)]
pub struct TransferClient {
    http: reqwest::Client,
}

impl TransferClient {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Send the file in one `PUT` to the presigned URL.
    ///
    /// The body has a known length, so no chunked transfer encoding is used.
    pub async fn put(&self, url: UploadUrl, file: &SelectedFile) -> Result<TransferReceipt> {
        let response = self
            .http
            .put(url.into_url())
            .header(CONTENT_TYPE, file.content_type())
            .body(file.bytes().clone())
            .send()
            .await
            .inspect_err(|error| error!(file = %file.name(), %error, "Upload request failed"))
            .map_err(UploadError::TransferTransport)?;

        let status = response.status();
        let body = response.text().await.unwrap_or_else(|error| {
            warn!(%error, "Failed to read upload response body");
            String::new()
        });
        info!(%status, "PUT response status");
        info!(%body, "PUT response body");

        if status.is_success() {
            Ok(TransferReceipt { status, body })
        } else {
            Err(UploadError::TransferStatus { status, body })
        }
    }
}
