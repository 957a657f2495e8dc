//! Preview rows for files uploaded through an orchestrator

use campus_api_client::FileUrlResolver;
use campus_core::{StoredFileDescriptor, UploadCategory};
use serde::Serialize;

/// One row of the preview list. `index` is what `remove_uploaded` takes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewEntry {
    pub index: usize,
    pub descriptor: StoredFileDescriptor,
    pub url: String,
    /// Images get a thumbnail, everything else a file icon.
    pub is_image: bool,
}

impl PreviewEntry {
    pub fn build(
        descriptors: &[StoredFileDescriptor],
        resolver: &FileUrlResolver,
        category: &UploadCategory,
    ) -> Vec<Self> {
        descriptors
            .iter()
            .enumerate()
            .map(|(index, descriptor)| PreviewEntry {
                index,
                url: resolver.resolve(Some(&descriptor.filename), category),
                is_image: descriptor.is_image(),
                descriptor: descriptor.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_core::UrlMode;

    fn descriptor(filename: &str, mimetype: &str) -> StoredFileDescriptor {
        StoredFileDescriptor {
            filename: filename.to_string(),
            original_name: filename.to_string(),
            size: 100,
            mimetype: mimetype.to_string(),
        }
    }

    #[test]
    fn rows_are_indexed_and_resolved() {
        let resolver = FileUrlResolver::new(
            UrlMode::Direct,
            "http://localhost:5000",
            "http://localhost:5000/api",
            "/images/placeholder.jpg",
        );
        let category = UploadCategory::new("news").unwrap();
        let rows = PreviewEntry::build(
            &[
                descriptor("a.jpg", "image/jpeg"),
                descriptor("", "application/pdf"),
            ],
            &resolver,
            &category,
        );

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].index, 0);
        assert_eq!(rows[0].url, "http://localhost:5000/uploads/news/a.jpg");
        assert!(rows[0].is_image);
        assert_eq!(rows[1].url, "/images/placeholder.jpg");
        assert!(!rows[1].is_image);
    }
}
