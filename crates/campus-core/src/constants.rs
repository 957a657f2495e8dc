//! Shared constants for the upload client

/// Path of the single-file upload endpoint, relative to the API base URL.
pub const UPLOAD_SINGLE_PATH: &str = "/upload/single";

/// Path prefix for API-proxied file retrieval, relative to the API base URL.
pub const UPLOAD_FILE_PROXY_PATH: &str = "/upload/file";

/// Path prefix for direct file retrieval, relative to the uploads base URL.
pub const UPLOADS_DIRECT_PATH: &str = "/uploads";

/// Multipart field carrying the file content.
pub const MULTIPART_FILE_FIELD: &str = "file";

/// Multipart field carrying the upload category tag.
pub const MULTIPART_CATEGORY_FIELD: &str = "type";

/// Image shown in place of a stored file whose name is missing.
pub const DEFAULT_PLACEHOLDER_URL: &str = "/images/placeholder.jpg";

/// Stored filenames that mean "no file" and must never reach a request path.
pub const MISSING_FILENAME_SENTINELS: &[&str] = &["null", "undefined"];

/// Extensions accepted by the document policy when MIME metadata is unreliable.
pub const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx"];

/// Upload calls may carry large payloads, so the transport timeout is long.
pub const DEFAULT_UPLOAD_TIMEOUT_SECS: u64 = 300;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Fallback MIME type for files whose type could not be determined.
pub const OCTET_STREAM: &str = "application/octet-stream";
