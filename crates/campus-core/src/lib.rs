//! Campus Core Library
//!
//! This crate provides the domain models, upload policy, configuration and error
//! types shared by the campus upload client crates. Nothing in here performs I/O:
//! the remote store is reached through the [`UploadTransport`] trait, which the
//! API client crate implements.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod transport;
pub mod validation;

// Re-export commonly used types
pub use config::{ClientConfig, UrlMode};
pub use error::{
    log_error, ErrorMetadata, LogLevel, PolicyRejection, TransportError, UploadError,
};
pub use models::{
    AcceptedTypes, CandidateFile, ResultShape, StoredFileDescriptor, UploadBatchResult,
    UploadCategory, UploadConfiguration,
};
pub use transport::UploadTransport;
pub use validation::{validate_selection, RejectedFile, RejectionReason, ValidatedSelection};
