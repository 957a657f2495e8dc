//! Upload policy validator
//!
//! Decides, for one raw selection, which files may proceed to upload. The
//! count check is all-or-nothing; the type and size checks drop individual
//! files and let the rest of the batch through.

use std::fmt;

use serde::Serialize;

use crate::constants::DOCUMENT_EXTENSIONS;
use crate::error::PolicyRejection;
use crate::models::{AcceptedTypes, CandidateFile, UploadConfiguration};
use crate::validation::mime::{file_extension, normalize_mime_type};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum RejectionReason {
    UnsupportedType,
    TooLarge { max_bytes: u64 },
}

/// A file dropped by the type or size filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedFile {
    pub name: String,
    pub mime_type: String,
    pub size: u64,
    #[serde(flatten)]
    pub reason: RejectionReason,
}

impl RejectedFile {
    fn new(file: &CandidateFile, reason: RejectionReason) -> Self {
        Self {
            name: file.name().to_string(),
            mime_type: file.mime_type().to_string(),
            size: file.size(),
            reason,
        }
    }
}

impl fmt::Display for RejectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            RejectionReason::UnsupportedType => write!(f, "{}: file type not allowed", self.name),
            RejectionReason::TooLarge { max_bytes } => write!(
                f,
                "{}: {} bytes exceeds the {} byte limit",
                self.name, self.size, max_bytes
            ),
        }
    }
}

/// Files that passed the policy, plus the ones it dropped.
#[derive(Debug, Clone)]
pub struct ValidatedSelection {
    /// Never empty
    pub accepted: Vec<CandidateFile>,
    pub rejected: Vec<RejectedFile>,
}

impl ValidatedSelection {
    /// Whether the type filter dropped at least one file.
    pub fn dropped_by_type(&self) -> bool {
        self.rejected
            .iter()
            .any(|r| r.reason == RejectionReason::UnsupportedType)
    }

    pub fn dropped_by_size(&self) -> bool {
        self.rejected
            .iter()
            .any(|r| matches!(r.reason, RejectionReason::TooLarge { .. }))
    }
}

/// All-or-nothing gate on batch size.
pub fn check_count(count: usize, config: &UploadConfiguration) -> Result<(), PolicyRejection> {
    if count == 0 {
        return Err(PolicyRejection::EmptySelection);
    }
    if count > config.max_files() {
        return Err(PolicyRejection::TooManyFiles {
            submitted: count,
            max: config.max_files(),
        });
    }
    Ok(())
}

/// Type predicate for one file.
///
/// Documents fall back to the extension because browsers and file pickers do
/// not report office MIME types reliably.
pub fn matches_accepted_type(filename: &str, mime_type: &str, accepted: AcceptedTypes) -> bool {
    let mime = normalize_mime_type(mime_type);
    match accepted {
        AcceptedTypes::Images => mime.starts_with("image/"),
        AcceptedTypes::Documents => {
            mime.starts_with("application/")
                || mime == "text/plain"
                || file_extension(filename)
                    .map(|ext| DOCUMENT_EXTENSIONS.contains(&ext.as_str()))
                    .unwrap_or(false)
        }
        AcceptedTypes::Any => true,
    }
}

/// Run the full policy over a selection.
pub fn validate_selection(
    files: Vec<CandidateFile>,
    config: &UploadConfiguration,
) -> Result<ValidatedSelection, PolicyRejection> {
    check_count(files.len(), config)?;

    let accepted_types = config.accepted_types();
    let mut accepted = Vec::with_capacity(files.len());
    let mut rejected = Vec::new();

    for file in files {
        if !matches_accepted_type(file.name(), file.mime_type(), accepted_types) {
            rejected.push(RejectedFile::new(&file, RejectionReason::UnsupportedType));
            continue;
        }
        if let Some(max_bytes) = config.max_file_size_bytes() {
            if file.size() > max_bytes {
                rejected.push(RejectedFile::new(
                    &file,
                    RejectionReason::TooLarge { max_bytes },
                ));
                continue;
            }
        }
        accepted.push(file);
    }

    if accepted.is_empty() {
        return Err(PolicyRejection::NoAcceptableFiles {
            accepted_types,
            rejected,
        });
    }

    if !rejected.is_empty() {
        tracing::debug!(
            accepted = accepted.len(),
            rejected = rejected.len(),
            "Some selected files were dropped by the upload policy"
        );
    }

    Ok(ValidatedSelection { accepted, rejected })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UploadCategory;

    fn config(max_files: usize, accepted: AcceptedTypes) -> UploadConfiguration {
        UploadConfiguration::new(max_files, accepted, UploadCategory::new("images").unwrap())
            .unwrap()
    }

    fn file(name: &str, mime: &str) -> CandidateFile {
        CandidateFile::new(name, mime, vec![0u8; 16])
    }

    #[test]
    fn count_gate_rejects_whole_batch() {
        let cfg = config(2, AcceptedTypes::Any);
        let files = vec![
            file("a.png", "image/png"),
            file("b.png", "image/png"),
            file("c.png", "image/png"),
        ];
        let err = validate_selection(files, &cfg).unwrap_err();
        assert_eq!(
            err,
            PolicyRejection::TooManyFiles {
                submitted: 3,
                max: 2
            }
        );
    }

    #[test]
    fn count_gate_allows_exactly_max() {
        let cfg = config(2, AcceptedTypes::Any);
        let files = vec![file("a.png", "image/png"), file("b.png", "image/png")];
        let selection = validate_selection(files, &cfg).unwrap();
        assert_eq!(selection.accepted.len(), 2);
    }

    #[test]
    fn empty_selection_is_rejected() {
        let cfg = config(3, AcceptedTypes::Any);
        assert_eq!(
            validate_selection(Vec::new(), &cfg).unwrap_err(),
            PolicyRejection::EmptySelection
        );
    }

    #[test]
    fn image_filter_drops_pdf() {
        let cfg = config(5, AcceptedTypes::Images);
        let files = vec![
            file("one.jpg", "image/jpeg"),
            file("brochure.pdf", "application/pdf"),
            file("two.webp", "image/webp"),
        ];
        let selection = validate_selection(files, &cfg).unwrap();
        let names: Vec<_> = selection.accepted.iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["one.jpg", "two.webp"]);
        assert!(selection.dropped_by_type());
        assert!(!selection.dropped_by_size());
        assert_eq!(selection.rejected[0].name, "brochure.pdf");
    }

    #[test]
    fn document_extension_fallback() {
        assert!(matches_accepted_type(
            "report.docx",
            "application/octet-stream",
            AcceptedTypes::Documents
        ));
        assert!(matches_accepted_type("REPORT.PDF", "", AcceptedTypes::Documents));
        assert!(matches_accepted_type("slides.PpTx", "", AcceptedTypes::Documents));
        assert!(!matches_accepted_type("notes.md", "", AcceptedTypes::Documents));
    }

    #[test]
    fn document_suffix_matches_name_without_stem() {
        assert!(matches_accepted_type(".pdf", "", AcceptedTypes::Documents));
        assert!(!matches_accepted_type(".pdf", "", AcceptedTypes::Images));
    }

    #[test]
    fn document_mime_rules() {
        assert!(matches_accepted_type("x", "application/zip", AcceptedTypes::Documents));
        assert!(matches_accepted_type("x", "text/plain", AcceptedTypes::Documents));
        assert!(matches_accepted_type(
            "x",
            "text/plain; charset=utf-8",
            AcceptedTypes::Documents
        ));
        assert!(!matches_accepted_type("x", "text/csv", AcceptedTypes::Documents));
        assert!(!matches_accepted_type("photo.png", "image/png", AcceptedTypes::Documents));
    }

    #[test]
    fn image_rule_ignores_extension() {
        assert!(!matches_accepted_type("photo.png", "", AcceptedTypes::Images));
        assert!(matches_accepted_type("photo", "IMAGE/PNG", AcceptedTypes::Images));
    }

    #[test]
    fn any_accepts_everything() {
        assert!(matches_accepted_type("a.exe", "application/x-msdownload", AcceptedTypes::Any));
        assert!(matches_accepted_type("", "", AcceptedTypes::Any));
    }

    #[test]
    fn all_filtered_means_no_upload() {
        let cfg = config(3, AcceptedTypes::Images);
        let err = validate_selection(vec![file("a.pdf", "application/pdf")], &cfg).unwrap_err();
        match err {
            PolicyRejection::NoAcceptableFiles {
                accepted_types,
                rejected,
            } => {
                assert_eq!(accepted_types, AcceptedTypes::Images);
                assert_eq!(rejected.len(), 1);
            }
            other => panic!("unexpected rejection: {:?}", other),
        }
    }

    #[test]
    fn size_cap_drops_large_files_only() {
        let cfg = config(3, AcceptedTypes::Any).with_max_file_size(Some(8));
        let files = vec![
            CandidateFile::new("small.txt", "text/plain", vec![0u8; 8]),
            CandidateFile::new("big.txt", "text/plain", vec![0u8; 9]),
        ];
        let selection = validate_selection(files, &cfg).unwrap();
        assert_eq!(selection.accepted.len(), 1);
        assert!(selection.dropped_by_size());
        assert!(!selection.dropped_by_type());
        assert_eq!(
            selection.rejected[0].reason,
            RejectionReason::TooLarge { max_bytes: 8 }
        );
        assert!(selection.rejected[0].to_string().contains("big.txt"));
    }
}
