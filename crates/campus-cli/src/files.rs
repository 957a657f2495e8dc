//! Candidate files read from disk

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use campus_core::CandidateFile;

/// Read `path` into a candidate. The MIME type is guessed from the extension
/// and left empty when unknown, so the policy can fall back to the extension.
pub async fn load_candidate(path: &Path) -> Result<CandidateFile> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| anyhow!("{} does not name a file", path.display()))?;

    let content = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let mime_type = mime_guess::from_path(path)
        .first()
        .map(|m| m.essence_str().to_string())
        .unwrap_or_default();

    Ok(CandidateFile::new(name, mime_type, content))
}

/// Load every path in order, failing on the first unreadable one.
pub async fn load_candidates(paths: &[PathBuf]) -> Result<Vec<CandidateFile>> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        files.push(load_candidate(path).await?);
    }
    Ok(files)
}
