//! Domain models for the upload client

pub mod file;
pub mod upload;

pub use file::{CandidateFile, ResultShape, StoredFileDescriptor, UploadBatchResult};
pub use upload::{AcceptedTypes, UploadCategory, UploadConfiguration};
