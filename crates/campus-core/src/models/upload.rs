//! Upload configuration supplied by the calling form

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::UploadError;
use crate::models::file::ResultShape;

/// Which files the policy validator lets through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AcceptedTypes {
    /// MIME type starts with `image/`
    #[serde(rename = "image/*")]
    Images,
    /// `application/*`, `text/plain`, or a known office/PDF extension
    #[serde(rename = "document/*")]
    Documents,
    /// No type filtering
    #[serde(rename = "*")]
    Any,
}

impl AcceptedTypes {
    pub fn as_str(&self) -> &'static str {
        match self {
            AcceptedTypes::Images => "image/*",
            AcceptedTypes::Documents => "document/*",
            AcceptedTypes::Any => "*",
        }
    }
}

impl fmt::Display for AcceptedTypes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown values fall back to [`AcceptedTypes::Any`], so parsing never fails.
impl FromStr for AcceptedTypes {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "image/*" | "image" | "images" => AcceptedTypes::Images,
            "document/*" | "document" | "documents" => AcceptedTypes::Documents,
            _ => AcceptedTypes::Any,
        })
    }
}

/// Routing tag selecting the logical bucket on the remote store
/// (`images`, `faculty`, `news`, `infrastructure`, `slideshow`, `documents`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UploadCategory(String);

impl UploadCategory {
    pub fn new(tag: impl Into<String>) -> Result<Self, UploadError> {
        let tag = tag.into();
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            return Err(UploadError::InvalidConfiguration(
                "upload category cannot be empty".to_string(),
            ));
        }
        if trimmed.contains('/') || trimmed.contains("..") {
            return Err(UploadError::InvalidConfiguration(format!(
                "upload category '{}' must be a single path segment",
                trimmed
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UploadCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for UploadCategory {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for UploadCategory {
    type Err = UploadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Immutable configuration for one upload component.
#[derive(Debug, Clone)]
pub struct UploadConfiguration {
    max_files: usize,
    accepted_types: AcceptedTypes,
    upload_category: UploadCategory,
    show_preview: bool,
    max_file_size_bytes: Option<u64>,
    result_shape: ResultShape,
}

impl UploadConfiguration {
    /// Create a configuration. `max_files` must be at least 1.
    pub fn new(
        max_files: usize,
        accepted_types: AcceptedTypes,
        upload_category: UploadCategory,
    ) -> Result<Self, UploadError> {
        if max_files == 0 {
            return Err(UploadError::InvalidConfiguration(
                "max_files must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            max_files,
            accepted_types,
            upload_category,
            show_preview: true,
            max_file_size_bytes: None,
            result_shape: ResultShape::for_max_files(max_files),
        })
    }

    /// Single-file configuration, e.g. a faculty photo.
    pub fn single(accepted_types: AcceptedTypes, upload_category: UploadCategory) -> Self {
        Self {
            max_files: 1,
            accepted_types,
            upload_category,
            show_preview: true,
            max_file_size_bytes: None,
            result_shape: ResultShape::Single,
        }
    }

    pub fn with_preview(mut self, show_preview: bool) -> Self {
        self.show_preview = show_preview;
        self
    }

    pub fn with_max_file_size(mut self, max_file_size_bytes: Option<u64>) -> Self {
        self.max_file_size_bytes = max_file_size_bytes;
        self
    }

    pub fn max_files(&self) -> usize {
        self.max_files
    }

    pub fn accepted_types(&self) -> AcceptedTypes {
        self.accepted_types
    }

    pub fn upload_category(&self) -> &UploadCategory {
        &self.upload_category
    }

    pub fn show_preview(&self) -> bool {
        self.show_preview
    }

    pub fn max_file_size_bytes(&self) -> Option<u64> {
        self.max_file_size_bytes
    }

    /// Whether the input surface should allow selecting more than one file.
    pub fn accepts_multiple(&self) -> bool {
        self.max_files > 1
    }

    pub fn result_shape(&self) -> ResultShape {
        self.result_shape
    }
}
