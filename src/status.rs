use reqwest::StatusCode;
use std::fmt;
use std::sync::{Arc, Mutex};

/// Message shown to the user after a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusMessage {
    NoFileSelected,
    PresignFailed,
    Uploaded,
    /// `status` is `None` when the object store could not be reached at all
    UploadFailed { status: Option<StatusCode> },
    UnreadableFile,
    Busy,
}

impl StatusMessage {
    pub fn is_success(&self) -> bool {
        matches!(self, StatusMessage::Uploaded)
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusMessage::NoFileSelected => f.write_str("Please select a file."),
            StatusMessage::PresignFailed => f.write_str("Error getting upload URL."),
            StatusMessage::Uploaded => f.write_str("✅ File uploaded successfully!"),
            StatusMessage::UploadFailed { status: Some(status) } => write!(
                f,
                "❌ Upload failed ({}). Check console for S3 error.",
                status.as_u16()
            ),
            StatusMessage::UploadFailed { status: None } => {
                f.write_str("❌ Upload failed (network error). Check console for S3 error.")
            }
            StatusMessage::UnreadableFile => f.write_str("❌ Could not read the selected file."),
            StatusMessage::Busy => f.write_str("An upload is already in progress."),
        }
    }
}

/// Where status messages end up
pub trait StatusDisplay {
    fn show(&self, message: &StatusMessage);
}

/// Prints each message as a line on stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalStatus;

impl StatusDisplay for TerminalStatus {
    fn show(&self, message: &StatusMessage) {
        println!("{message}");
    }
}

/// Holds the latest message text only; each `show` overwrites the previous one
#[derive(Debug, Default, Clone)]
pub struct StatusSlot {
    text: Arc<Mutex<Option<String>>>,
}

impl StatusSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> Option<String> {
        self.text
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl StatusDisplay for StatusSlot {
    fn show(&self, message: &StatusMessage) {
        *self
            .text
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_texts() {
        assert_eq!(
            StatusMessage::NoFileSelected.to_string(),
            "Please select a file."
        );
        assert_eq!(
            StatusMessage::PresignFailed.to_string(),
            "Error getting upload URL."
        );
        assert_eq!(
            StatusMessage::Uploaded.to_string(),
            "✅ File uploaded successfully!"
        );
        assert_eq!(
            StatusMessage::UploadFailed {
                status: Some(StatusCode::FORBIDDEN)
            }
            .to_string(),
            "❌ Upload failed (403). Check console for S3 error."
        );
        assert_eq!(
            StatusMessage::UploadFailed { status: None }.to_string(),
            "❌ Upload failed (network error). Check console for S3 error."
        );
    }

    #[test]
    fn test_only_uploaded_is_success() {
        assert!(StatusMessage::Uploaded.is_success());
        assert!(!StatusMessage::Busy.is_success());
        assert!(
            !StatusMessage::UploadFailed {
                status: Some(StatusCode::OK)
            }
            .is_success()
        );
    }

    #[test]
    fn test_slot_keeps_latest_message() {
        let slot = StatusSlot::new();
        assert_eq!(slot.text(), None);

        slot.show(&StatusMessage::PresignFailed);
        slot.clone().show(&StatusMessage::Uploaded);

        assert_eq!(slot.text().as_deref(), Some("✅ File uploaded successfully!"));
    }
}
