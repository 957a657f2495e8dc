//! Upload endpoint of the campus API.

use async_trait::async_trait;
use campus_core::constants::{
    MULTIPART_CATEGORY_FIELD, MULTIPART_FILE_FIELD, OCTET_STREAM, UPLOAD_SINGLE_PATH,
};
use campus_core::{
    CandidateFile, StoredFileDescriptor, TransportError, UploadCategory, UploadTransport,
};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::ApiClient;

/// Envelope returned by `POST /upload/single`.
#[derive(Debug, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    pub data: Option<StoredFileDescriptor>,
    pub message: Option<String>,
}

impl UploadResponse {
    fn into_descriptor(self) -> Result<StoredFileDescriptor, TransportError> {
        match (self.success, self.data) {
            (true, Some(descriptor)) => Ok(descriptor),
            (true, None) => Err(TransportError::InvalidResponse(
                "upload succeeded but no file descriptor was returned".to_string(),
            )),
            (false, _) => Err(TransportError::Rejected {
                status: None,
                message: self
                    .message
                    .unwrap_or_else(|| "Upload was rejected by the server".to_string()),
            }),
        }
    }
}

impl ApiClient {
    /// Upload one file into `category` and return the stored descriptor.
    pub async fn upload_file(
        &self,
        file: &CandidateFile,
        category: &UploadCategory,
    ) -> Result<StoredFileDescriptor, TransportError> {
        let content_type = if file.mime_type().trim().is_empty() {
            OCTET_STREAM
        } else {
            file.mime_type()
        };

        let part = file_part(file, content_type)
            .or_else(|_| {
                tracing::warn!(
                    file = %file.name(),
                    content_type = %content_type,
                    "Unparseable content type, sending as octet-stream"
                );
                file_part(file, OCTET_STREAM)
            })
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let form = Form::new()
            .part(MULTIPART_FILE_FIELD, part)
            .text(MULTIPART_CATEGORY_FIELD, category.to_string());

        tracing::debug!(
            file = %file.name(),
            size_bytes = file.size(),
            category = %category,
            "Uploading file"
        );

        let response: UploadResponse = self.post_multipart(UPLOAD_SINGLE_PATH, form).await?;
        response.into_descriptor()
    }
}

fn file_part(file: &CandidateFile, content_type: &str) -> reqwest::Result<Part> {
    Part::stream_with_length(file.content(), file.size())
        .file_name(file.name().to_string())
        .mime_str(content_type)
}

#[async_trait]
impl UploadTransport for ApiClient {
    async fn upload(
        &self,
        file: &CandidateFile,
        category: &UploadCategory,
    ) -> Result<StoredFileDescriptor, TransportError> {
        self.upload_file(file, category).await
    }
}
