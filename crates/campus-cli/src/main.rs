//! campus: command-line client for the campus upload store.
//!
//! Reads CAMPUS_API_URL, CAMPUS_API_TOKEN and friends from the environment
//! (or a `.env` file). Results are printed to stdout as JSON, logs go to stderr.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use campus_api_client::{ApiClient, FileUrlResolver};
use campus_cli::files::load_candidates;
use campus_cli::{init_tracing, megabytes_to_bytes, ErrorOutput};
use campus_core::{
    log_error, validate_selection, AcceptedTypes, ClientConfig, ErrorMetadata, PolicyRejection,
    UploadCategory, UploadConfiguration, UploadError,
};
use campus_upload::{BatchNotice, LogNotifier, UploadOrchestrator};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "campus", about = "Campus upload client")]
struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct PolicyArgs {
    /// Accepted types: image/*, document/*, or * for anything
    #[arg(long, default_value = "*")]
    accept: AcceptedTypes,
    /// Maximum number of files in one batch
    #[arg(long, default_value = "5")]
    max_files: usize,
    /// Drop files larger than this many megabytes
    #[arg(long)]
    max_size_mb: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload files as one batch
    Upload {
        /// Files to upload
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Storage category (faculty, news, infrastructure, documents, ...)
        #[arg(long)]
        category: UploadCategory,
        #[command(flatten)]
        policy: PolicyArgs,
        /// Also print preview rows with retrieval URLs
        #[arg(long)]
        preview: bool,
    },
    /// Validate files against the upload policy without uploading
    Check {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[command(flatten)]
        policy: PolicyArgs,
    },
    /// Print the retrieval URL of a stored file
    Url {
        /// Stored filename as returned by the server
        filename: String,
        #[arg(long)]
        category: UploadCategory,
    },
}

impl PolicyArgs {
    fn into_configuration(
        self,
        category: UploadCategory,
    ) -> Result<UploadConfiguration, UploadError> {
        Ok(UploadConfiguration::new(self.max_files, self.accept, category)?
            .with_max_file_size(self.max_size_mb.map(megabytes_to_bytes)))
    }
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize output")?;
    println!("{}", out);
    Ok(())
}

fn describe(err: UploadError) -> anyhow::Error {
    log_error(&err);
    anyhow::anyhow!("[{}] {}", err.error_code(), err.client_message())
}

/// Print a policy rejection with its error metadata and fail the command.
fn reject(rejection: PolicyRejection) -> anyhow::Result<()> {
    let err = UploadError::from(rejection);
    print_json(&ErrorOutput::from(&err))?;
    Err(describe(err))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.json);

    match cli.command {
        Commands::Upload {
            files,
            category,
            policy,
            preview,
        } => {
            let config = ClientConfig::from_env().context("Invalid client configuration")?;
            let client = Arc::new(
                ApiClient::from_config(&config).context("Failed to create API client")?,
            );
            let upload_config = policy
                .into_configuration(category)
                .map_err(describe)?
                .with_preview(preview);

            let orchestrator = UploadOrchestrator::new(upload_config, client)
                .with_notifier(Arc::new(LogNotifier))
                .on_uploaded(|result| {
                    tracing::info!(files = result.len(), "Stored file descriptors delivered");
                });

            let candidates = load_candidates(&files).await?;
            let report = orchestrator.submit(candidates).await.map_err(describe)?;
            print_json(&report)?;

            if preview {
                let resolver = FileUrlResolver::from_config(&config);
                print_json(&orchestrator.previews(&resolver))?;
            }

            match report.notice {
                BatchNotice::Rejected(rejection) => reject(rejection)?,
                notice if notice.is_error() => anyhow::bail!(notice.message()),
                _ => {}
            }
        }
        Commands::Check { files, policy } => {
            // The category is irrelevant offline; any valid tag will do.
            let category = UploadCategory::new("check").map_err(describe)?;
            let upload_config = policy.into_configuration(category).map_err(describe)?;
            let candidates = load_candidates(&files).await?;

            match validate_selection(candidates, &upload_config) {
                Ok(selection) => {
                    let accepted: Vec<&str> =
                        selection.accepted.iter().map(|f| f.name()).collect();
                    print_json(&serde_json::json!({
                        "accepted": accepted,
                        "rejected": selection.rejected,
                    }))?;
                }
                Err(rejection) => reject(rejection)?,
            }
        }
        Commands::Url { filename, category } => {
            let config = ClientConfig::from_env().context("Invalid client configuration")?;
            let resolver = FileUrlResolver::from_config(&config);
            let url = resolver.resolve(Some(&filename), &category);
            print_json(&serde_json::json!({ "url": url }))?;
        }
    }

    Ok(())
}
