//! Validation modules

pub mod mime;
pub mod policy;

pub use mime::{file_extension, normalize_mime_type};
pub use policy::{
    check_count, matches_accepted_type, validate_selection, RejectedFile, RejectionReason,
    ValidatedSelection,
};
