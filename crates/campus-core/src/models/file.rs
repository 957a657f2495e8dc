//! Files going in (candidates) and descriptors coming out of the remote store

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// A file selected by the user, read-only for the duration of one batch.
#[derive(Debug, Clone)]
pub struct CandidateFile {
    name: String,
    mime_type: String,
    content: Bytes,
}

impl CandidateFile {
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        content: impl Into<Bytes>,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            content: content.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// MIME type as reported by the selection source. May be empty.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Size in bytes
    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }

    /// Cheap clone of the file content (reference counted).
    pub fn content(&self) -> Bytes {
        self.content.clone()
    }
}

/// Metadata returned by the remote store for a successfully stored file.
///
/// Field names match the store's JSON (`originalName`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFileDescriptor {
    /// Server-assigned name, used to build retrieval URLs
    pub filename: String,
    pub original_name: String,
    pub size: u64,
    pub mimetype: String,
}

impl StoredFileDescriptor {
    pub fn is_image(&self) -> bool {
        self.mimetype.to_ascii_lowercase().starts_with("image/")
    }
}

/// Shape of the payload handed to the success callback, fixed by `max_files`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultShape {
    Single,
    Batch,
}

impl ResultShape {
    pub fn for_max_files(max_files: usize) -> Self {
        if max_files == 1 {
            ResultShape::Single
        } else {
            ResultShape::Batch
        }
    }

    /// Wrap the successful descriptors of a batch. Returns `None` when nothing succeeded.
    pub fn wrap(self, descriptors: Vec<StoredFileDescriptor>) -> Option<UploadBatchResult> {
        if descriptors.is_empty() {
            return None;
        }
        match self {
            ResultShape::Single => descriptors.into_iter().next().map(UploadBatchResult::Single),
            ResultShape::Batch => Some(UploadBatchResult::Batch(descriptors)),
        }
    }
}

/// Successful uploads of one batch, as delivered to the calling form.
///
/// Serializes as a bare descriptor or as an array, matching what forms store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum UploadBatchResult {
    Single(StoredFileDescriptor),
    /// In completion order
    Batch(Vec<StoredFileDescriptor>),
}

impl UploadBatchResult {
    pub fn descriptors(&self) -> &[StoredFileDescriptor] {
        match self {
            UploadBatchResult::Single(descriptor) => std::slice::from_ref(descriptor),
            UploadBatchResult::Batch(descriptors) => descriptors,
        }
    }

    pub fn len(&self) -> usize {
        self.descriptors().len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors().is_empty()
    }

    pub fn into_vec(self) -> Vec<StoredFileDescriptor> {
        match self {
            UploadBatchResult::Single(descriptor) => vec![descriptor],
            UploadBatchResult::Batch(descriptors) => descriptors,
        }
    }
}
