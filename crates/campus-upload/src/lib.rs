//! Campus Upload
//!
//! The stateful half of the upload subsystem. An [`UploadOrchestrator`] takes a
//! selection, runs it through the policy in `campus-core`, fans the accepted
//! files out to an [`campus_core::UploadTransport`] and settles every call
//! before reporting. Each batch ends in exactly one [`BatchNotice`].

pub mod drop_zone;
pub mod notice;
pub mod orchestrator;
pub mod preview;

pub use drop_zone::DropZone;
pub use notice::{BatchNotice, FileFailure, LogNotifier, Notifier};
pub use orchestrator::{BatchReport, UploadCallback, UploadOrchestrator, UploadPhase};
pub use preview::PreviewEntry;
