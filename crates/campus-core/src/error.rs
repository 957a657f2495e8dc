//! Error types module
//!
//! Three families of failure exist in the upload client:
//!
//! - [`PolicyRejection`]: local and synchronous, the selection broke the
//!   count/type policy. No network call is made.
//! - [`TransportError`]: one upload call failed. Captured per file and never
//!   propagated to sibling uploads.
//! - [`UploadError`]: what the public API returns, wrapping the two above plus
//!   configuration misuse.

use serde::Serialize;

use crate::models::AcceptedTypes;
use crate::validation::RejectedFile;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like policy rejections
    Debug,
    /// Warning level - for recoverable issues like a failed upload
    Warn,
    /// Error level - for misuse that indicates a bug in the caller
    Error,
}

/// Describes how an error should be presented to the user.
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "TOO_MANY_FILES")
    fn error_code(&self) -> &'static str;

    /// Whether retrying the same action can succeed
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the user
    fn suggested_action(&self) -> Option<&'static str>;

    /// User-facing message
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

/// Why a selection was refused before any upload started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PolicyRejection {
    #[error("No files were selected")]
    EmptySelection,

    #[error("You can upload at most {max} file(s) at a time ({submitted} selected)")]
    TooManyFiles { submitted: usize, max: usize },

    #[error("None of the selected files are allowed (accepted: {accepted_types})")]
    NoAcceptableFiles {
        accepted_types: AcceptedTypes,
        rejected: Vec<RejectedFile>,
    },
}

/// Failure of a single upload call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Upload timed out")]
    Timeout,

    /// The store answered but refused the file; carries its message.
    #[error("{message}")]
    Rejected { status: Option<u16>, message: String },

    #[error("Invalid response from upload server: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Invalid upload configuration: {0}")]
    InvalidConfiguration(String),

    #[error("An upload is already in progress")]
    Busy,

    #[error("Upload rejected: {0}")]
    Policy(#[from] PolicyRejection),

    #[error("Upload failed: {0}")]
    Transport(#[from] TransportError),

    #[error("No uploaded file at position {index} (list has {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Static metadata for each variant: (error_code, recoverable, suggested_action, log_level).
fn upload_error_static_metadata(
    err: &UploadError,
) -> (&'static str, bool, Option<&'static str>, LogLevel) {
    match err {
        UploadError::InvalidConfiguration(_) => (
            "INVALID_CONFIGURATION",
            false,
            Some("Fix the upload component configuration"),
            LogLevel::Error,
        ),
        UploadError::Busy => (
            "UPLOAD_IN_PROGRESS",
            true,
            Some("Wait for the current upload to finish"),
            LogLevel::Debug,
        ),
        UploadError::Policy(PolicyRejection::EmptySelection) => (
            "EMPTY_SELECTION",
            false,
            Some("Select at least one file"),
            LogLevel::Debug,
        ),
        UploadError::Policy(PolicyRejection::TooManyFiles { .. }) => (
            "TOO_MANY_FILES",
            false,
            Some("Select fewer files and try again"),
            LogLevel::Debug,
        ),
        UploadError::Policy(PolicyRejection::NoAcceptableFiles { .. }) => (
            "UNSUPPORTED_FILE_TYPE",
            false,
            Some("Choose files of an accepted type"),
            LogLevel::Debug,
        ),
        UploadError::Transport(TransportError::Rejected { .. }) => (
            "UPLOAD_REJECTED",
            false,
            Some("Check the file and try again"),
            LogLevel::Warn,
        ),
        UploadError::Transport(_) => (
            "UPLOAD_FAILED",
            true,
            Some("Check your connection and upload the file again"),
            LogLevel::Warn,
        ),
        UploadError::IndexOutOfRange { .. } => ("INDEX_OUT_OF_RANGE", false, None, LogLevel::Error),
    }
}

impl ErrorMetadata for UploadError {
    fn error_code(&self) -> &'static str {
        upload_error_static_metadata(self).0
    }

    fn is_recoverable(&self) -> bool {
        upload_error_static_metadata(self).1
    }

    fn suggested_action(&self) -> Option<&'static str> {
        upload_error_static_metadata(self).2
    }

    fn log_level(&self) -> LogLevel {
        upload_error_static_metadata(self).3
    }

    fn client_message(&self) -> String {
        match self {
            UploadError::InvalidConfiguration(_) => "Upload is not available".to_string(),
            UploadError::Busy => "Please wait for the current upload to finish".to_string(),
            UploadError::Policy(rejection) => rejection.to_string(),
            UploadError::Transport(err) => err.to_string(),
            UploadError::IndexOutOfRange { .. } => "That file is no longer listed".to_string(),
        }
    }
}

/// Emit `err` at the level its metadata asks for.
pub fn log_error(err: &UploadError) {
    let code = err.error_code();
    match err.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %err, error_code = code, "Upload error");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %err, error_code = code, "Upload error");
        }
        LogLevel::Error => {
            tracing::error!(error = %err, error_code = code, "Upload error");
        }
    }
}
