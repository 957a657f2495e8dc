//! Batch notices and the sink that displays them

use std::fmt;

use campus_core::{ErrorMetadata, PolicyRejection, RejectedFile, UploadError};
use serde::Serialize;

/// One file whose upload call failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFailure {
    pub name: String,
    /// Server-provided message or network error text
    pub reason: String,
    pub code: &'static str,
    /// Whether uploading the same file again may succeed
    pub recoverable: bool,
}

impl FileFailure {
    pub fn new(name: impl Into<String>, error: &UploadError) -> Self {
        Self {
            name: name.into(),
            reason: error.client_message(),
            code: error.error_code(),
            recoverable: error.is_recoverable(),
        }
    }
}

impl fmt::Display for FileFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.reason)
    }
}

/// The single summary emitted for every batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BatchNotice {
    /// Refused before any upload call was made.
    Rejected(PolicyRejection),
    Uploaded {
        count: usize,
        skipped: Vec<RejectedFile>,
    },
    PartiallyUploaded {
        succeeded: usize,
        failures: Vec<FileFailure>,
        skipped: Vec<RejectedFile>,
    },
    Failed {
        failures: Vec<FileFailure>,
        skipped: Vec<RejectedFile>,
    },
}

impl BatchNotice {
    /// Summarize a settled batch.
    pub fn settled(
        succeeded: usize,
        failures: Vec<FileFailure>,
        skipped: Vec<RejectedFile>,
    ) -> Self {
        match (succeeded, failures.is_empty()) {
            (count, true) => BatchNotice::Uploaded { count, skipped },
            (0, false) => BatchNotice::Failed { failures, skipped },
            (succeeded, false) => BatchNotice::PartiallyUploaded {
                succeeded,
                failures,
                skipped,
            },
        }
    }

    /// Failure notices are displayed differently from success notices.
    pub fn is_error(&self) -> bool {
        !matches!(self, BatchNotice::Uploaded { .. })
    }

    pub fn succeeded(&self) -> usize {
        match self {
            BatchNotice::Uploaded { count, .. } => *count,
            BatchNotice::PartiallyUploaded { succeeded, .. } => *succeeded,
            BatchNotice::Rejected(_) | BatchNotice::Failed { .. } => 0,
        }
    }

    pub fn skipped(&self) -> &[RejectedFile] {
        match self {
            BatchNotice::Rejected(_) => &[],
            BatchNotice::Uploaded { skipped, .. }
            | BatchNotice::PartiallyUploaded { skipped, .. }
            | BatchNotice::Failed { skipped, .. } => skipped,
        }
    }

    /// Human-readable text for the toast.
    pub fn message(&self) -> String {
        let mut message = match self {
            BatchNotice::Rejected(rejection) => return rejection.to_string(),
            BatchNotice::Uploaded { count, .. } => {
                format!("{} file(s) uploaded successfully", count)
            }
            BatchNotice::PartiallyUploaded {
                succeeded,
                failures,
                ..
            } => format!(
                "{} file(s) uploaded, {} failed: {}",
                succeeded,
                failures.len(),
                join(failures)
            ),
            BatchNotice::Failed { failures, .. } => {
                format!("Upload failed: {}", join(failures))
            }
        };

        let skipped = self.skipped();
        if !skipped.is_empty() {
            message.push_str(&format!(
                ". Skipped {} file(s): {}",
                skipped.len(),
                join(skipped)
            ));
        }
        message
    }
}

impl fmt::Display for BatchNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Where batch notices are shown (a toast area in a UI, the log in the CLI).
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: &BatchNotice);
}

/// Writes notices to the tracing log.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: &BatchNotice) {
        if notice.is_error() {
            tracing::warn!(succeeded = notice.succeeded(), "{}", notice.message());
        } else {
            tracing::info!(succeeded = notice.succeeded(), "{}", notice.message());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_core::{AcceptedTypes, RejectionReason, TransportError};

    fn failure(name: &str, message: &str) -> FileFailure {
        FileFailure::new(
            name,
            &UploadError::from(TransportError::Rejected {
                status: Some(500),
                message: message.to_string(),
            }),
        )
    }

    fn skipped_pdf() -> RejectedFile {
        RejectedFile {
            name: "syllabus.pdf".to_string(),
            mime_type: "application/pdf".to_string(),
            size: 2048,
            reason: RejectionReason::UnsupportedType,
        }
    }

    #[test]
    fn settled_picks_variant_from_counts() {
        assert!(matches!(
            BatchNotice::settled(3, vec![], vec![]),
            BatchNotice::Uploaded { count: 3, .. }
        ));
        assert!(matches!(
            BatchNotice::settled(2, vec![failure("b.png", "boom")], vec![]),
            BatchNotice::PartiallyUploaded { succeeded: 2, .. }
        ));
        assert!(matches!(
            BatchNotice::settled(0, vec![failure("b.png", "boom")], vec![]),
            BatchNotice::Failed { .. }
        ));
    }

    #[test]
    fn success_message_mentions_count_and_skipped_files() {
        let notice = BatchNotice::settled(2, vec![], vec![skipped_pdf()]);
        assert!(!notice.is_error());
        assert_eq!(
            notice.message(),
            "2 file(s) uploaded successfully. Skipped 1 file(s): syllabus.pdf: file type not allowed"
        );
    }

    #[test]
    fn failure_message_carries_server_reason() {
        let notice = BatchNotice::settled(
            2,
            vec![failure("campus.png", "Storage unavailable")],
            vec![],
        );
        assert!(notice.is_error());
        assert_eq!(
            notice.message(),
            "2 file(s) uploaded, 1 failed: campus.png (Storage unavailable)"
        );
    }

    #[test]
    fn failure_carries_error_metadata() {
        let rejected = failure("campus.png", "File too large");
        assert_eq!(rejected.code, "UPLOAD_REJECTED");
        assert!(!rejected.recoverable);

        let timed_out =
            FileFailure::new("campus.png", &UploadError::from(TransportError::Timeout));
        assert_eq!(timed_out.code, "UPLOAD_FAILED");
        assert!(timed_out.recoverable);
        assert_eq!(timed_out.reason, "Upload timed out");
    }

    #[test]
    fn rejected_notice_uses_policy_text() {
        let notice = BatchNotice::Rejected(PolicyRejection::TooManyFiles {
            submitted: 6,
            max: 5,
        });
        assert!(notice.is_error());
        assert_eq!(notice.succeeded(), 0);
        assert!(notice.message().contains("at most 5"));
    }

    #[test]
    fn notice_serializes_with_outcome_tag() {
        let notice = BatchNotice::Rejected(PolicyRejection::NoAcceptableFiles {
            accepted_types: AcceptedTypes::Images,
            rejected: vec![skipped_pdf()],
        });
        let json = serde_json::to_value(&notice).unwrap();
        assert_eq!(json["outcome"], "rejected");
        assert_eq!(json["kind"], "no_acceptable_files");

        let json = serde_json::to_value(BatchNotice::settled(1, vec![], vec![])).unwrap();
        assert_eq!(json["outcome"], "uploaded");
        assert_eq!(json["count"], 1);
    }
}
