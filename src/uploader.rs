use crate::config::Config;
use crate::error::{Result, UploadError};
use crate::file::SelectedFile;
use crate::presign::PresignClient;
use crate::status::{StatusDisplay, StatusMessage};
use crate::transfer::{TransferClient, TransferReceipt};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{info, warn};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Runs the two-step upload: fetch a presigned URL, then `PUT` the file to it.
///
/// Clones share the same in-flight permit, so at most one upload runs at a time
/// across all of them.
#[derive(Clone)]
pub struct Uploader {
    presign: PresignClient,
    transfer: TransferClient,
    in_flight: Arc<Semaphore>,
}

impl Uploader {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self::with_client(http, config))
    }

    pub fn with_client(http: reqwest::Client, config: &Config) -> Self {
        Self {
            presign: PresignClient::new(
                http.clone(),
                config.presign_endpoint(),
                config.url_field.clone(),
            ),
            transfer: TransferClient::new(http),
            in_flight: Arc::new(Semaphore::new(1)),
        }
    }

    /// Whether an upload is currently running
    pub fn is_busy(&self) -> bool {
        self.in_flight.available_permits() == 0
    }

    pub async fn upload(&self, selection: Option<&SelectedFile>) -> Result<TransferReceipt> {
        let file = selection.ok_or(UploadError::NoFileSelected)?;

        // Released on every return path
        let _permit = self
            .in_flight
            .try_acquire()
            .map_err(|_| UploadError::InFlight)?;

        info!(
            file = %file.name(),
            content_type = %file.content_type(),
            size = file.len(),
            "Uploading file"
        );

        let upload_url = self.presign.request(file).await?;
        self.transfer.put(upload_url, file).await
    }

    /// Upload the selection and show the outcome on `display`
    pub async fn submit(
        &self,
        selection: Option<&SelectedFile>,
        display: &impl StatusDisplay,
    ) -> StatusMessage {
        let message = match self.upload(selection).await {
            Ok(_) => StatusMessage::Uploaded,
            Err(error) => {
                warn!(%error, "Upload did not complete");
                error.status_message()
            }
        };

        display.show(&message);
        message
    }
}
