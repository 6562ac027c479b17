use crate::status::StatusMessage;
use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

/// Failures of a single upload attempt
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("No file selected")]
    NoFileSelected,

    #[error("An upload is already in flight")]
    InFlight,

    #[error("Failed to read {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Presign request failed: {0}")]
    PresignTransport(#[source] reqwest::Error),

    #[error("Presign endpoint returned {status}: {body}")]
    PresignStatus { status: StatusCode, body: String },

    #[error("Invalid presign response: {0}")]
    PresignResponse(String),

    #[error("Upload request failed: {0}")]
    TransferTransport(#[source] reqwest::Error),

    #[error("Object store returned {status}: {body}")]
    TransferStatus { status: StatusCode, body: String },
}

impl UploadError {
    /// Convert error to the message shown to the user
    pub fn status_message(&self) -> StatusMessage {
        match self {
            UploadError::NoFileSelected => StatusMessage::NoFileSelected,
            UploadError::InFlight => StatusMessage::Busy,
            UploadError::ReadFile { .. } => StatusMessage::UnreadableFile,
            UploadError::PresignTransport(_)
            | UploadError::PresignStatus { .. }
            | UploadError::PresignResponse(_) => StatusMessage::PresignFailed,
            UploadError::TransferTransport(_) => StatusMessage::UploadFailed { status: None },
            UploadError::TransferStatus { status, .. } => StatusMessage::UploadFailed {
                status: Some(*status),
            },
        }
    }
}

pub type Result<T, E = UploadError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presign_failures_share_one_message() {
        let status = UploadError::PresignStatus {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "Error generating URL".into(),
        };
        let response = UploadError::PresignResponse("missing field `uploadUrl`".into());

        assert_eq!(status.status_message(), StatusMessage::PresignFailed);
        assert_eq!(response.status_message(), StatusMessage::PresignFailed);
    }

    #[test]
    fn test_transfer_status_is_carried_into_message() {
        let error = UploadError::TransferStatus {
            status: StatusCode::FORBIDDEN,
            body: "<Error><Code>SignatureDoesNotMatch</Code></Error>".into(),
        };

        assert_eq!(
            error.status_message(),
            StatusMessage::UploadFailed {
                status: Some(StatusCode::FORBIDDEN)
            }
        );
    }

    #[test]
    fn test_read_failure_message() {
        let error = UploadError::ReadFile {
            path: PathBuf::from("/nonexistent"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };

        assert_eq!(error.status_message(), StatusMessage::UnreadableFile);
        assert!(error.to_string().starts_with("Failed to read /nonexistent"));
    }
}
