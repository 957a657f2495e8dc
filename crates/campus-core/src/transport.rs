//! Seam between the upload orchestrator and the remote store.

use async_trait::async_trait;

use crate::error::TransportError;
use crate::models::{CandidateFile, StoredFileDescriptor, UploadCategory};

/// One remote upload call per file.
///
/// Implementations must not retry on their own; a failure is reported once and
/// the user decides whether to resubmit. Timeouts are the implementation's
/// concern and surface as [`TransportError::Timeout`].
#[async_trait]
pub trait UploadTransport: Send + Sync {
    async fn upload(
        &self,
        file: &CandidateFile,
        category: &UploadCategory,
    ) -> Result<StoredFileDescriptor, TransportError>;
}
