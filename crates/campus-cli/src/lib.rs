pub mod files;

use campus_core::{ErrorMetadata, UploadError};
use serde::Serialize;

/// JSON shape printed when a command ends in an [`UploadError`].
#[derive(Debug, Serialize)]
pub struct ErrorOutput {
    pub error: String,
    pub code: &'static str,
    pub recoverable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<&'static str>,
}

impl From<&UploadError> for ErrorOutput {
    fn from(err: &UploadError) -> Self {
        Self {
            error: err.client_message(),
            code: err.error_code(),
            recoverable: err.is_recoverable(),
            suggested_action: err.suggested_action(),
        }
    }
}

/// Initialize tracing for the `campus` binary. `RUST_LOG` overrides the
/// default `info` filter; `json` switches to one JSON object per event.
pub fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Convert a `--max-size-mb` value to bytes.
pub fn megabytes_to_bytes(megabytes: u64) -> u64 {
    megabytes.saturating_mul(1024 * 1024)
}
