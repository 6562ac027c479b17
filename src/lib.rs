pub mod config;
pub mod error;
pub mod file;
pub mod presign;
pub mod status;
pub mod transfer;
pub mod uploader;

use tracing::error;

//
// Re-export
//
pub use config::Config;
pub use error::UploadError;
pub use file::SelectedFile;
pub use presign::{PresignClient, UploadUrl};
pub use status::{StatusDisplay, StatusMessage, StatusSlot, TerminalStatus};
pub use transfer::{TransferClient, TransferReceipt};
pub use uploader::Uploader;

/// Upload the configured file once and report the outcome on `display`
pub async fn run(config: Config, display: &impl StatusDisplay) -> anyhow::Result<StatusMessage> {
    let uploader = Uploader::new(&config)?;

    let message = match config.file.as_deref() {
        None => uploader.submit(None, display).await,
        Some(path) => match SelectedFile::open(path, config.content_type.as_deref()).await {
            Ok(file) => uploader.submit(Some(&file), display).await,
            Err(err) => {
                error!(error = %err, "Cannot load selected file");
                let message = err.status_message();
                display.show(&message);
                message
            }
        },
    };

    Ok(message)
}
