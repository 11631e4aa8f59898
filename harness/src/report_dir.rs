//! Report directory persistence: write and read back a [`RunReport`].
//!
//! # Directory layout
//!
//! ```text
//! <dir>/
//!   report.json         canonical JSON of RunReport::to_json_value()
//!   report_digest.txt   ASCII digest string ("sha256:...")
//! ```
//!
//! The directory path is never part of the hash surface.
//!
//! # Fail-closed semantics
//!
//! - Missing `report.json` or `report_digest.txt` → error
//! - `report.json` not valid JSON, or not in canonical form → error
//! - Stored digest differs from the recomputed one → error

use std::path::{Path, PathBuf};

use thiserror::Error;

use waypoint_search::digest::{canonical_hash, canonical_json_bytes, ContentHash, DOMAIN_RUN_REPORT};

use crate::runner::{RunError, RunReport};

pub const REPORT_FILENAME: &str = "report.json";
pub const DIGEST_FILENAME: &str = "report_digest.txt";

/// Error writing or reading a report directory.
#[derive(Debug, Error)]
pub enum ReportDirError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("missing report file: {filename}")]
    MissingFile { filename: String },
    #[error("report parse error: {detail}")]
    Parse { detail: String },
    #[error("report.json is not in canonical form")]
    NonCanonical,
    #[error("digest mismatch: stored={stored}, recomputed={recomputed}")]
    DigestMismatch { stored: String, recomputed: String },
    #[error(transparent)]
    Run(#[from] RunError),
}

/// A report read back from disk and verified against its digest.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredReport {
    pub report: serde_json::Value,
    pub digest: ContentHash,
}

/// Write `report` into `dir`, creating the directory if needed.
///
/// Returns the digest written to `report_digest.txt`.
///
/// # Errors
///
/// Returns [`ReportDirError`] on I/O or serialization failure.
pub fn write_report_dir(report: &RunReport, dir: &Path) -> Result<ContentHash, ReportDirError> {
    std::fs::create_dir_all(dir).map_err(|source| ReportDirError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let bytes = report.canonical_bytes()?;
    let digest = canonical_hash(DOMAIN_RUN_REPORT, &bytes);

    write_atomic(&dir.join(REPORT_FILENAME), &bytes)?;
    write_atomic(&dir.join(DIGEST_FILENAME), digest.as_str().as_bytes())?;

    tracing::debug!(dir = %dir.display(), %digest, "report written");
    Ok(digest)
}

/// Read a report directory and verify it.
///
/// # Errors
///
/// Returns [`ReportDirError`] on any missing file, parse failure,
/// non-canonical content, or digest mismatch.
pub fn read_report_dir(dir: &Path) -> Result<StoredReport, ReportDirError> {
    let bytes = read_required(dir, REPORT_FILENAME)?;
    let stored = read_required(dir, DIGEST_FILENAME)?;

    let report: serde_json::Value =
        serde_json::from_slice(&bytes).map_err(|e| ReportDirError::Parse {
            detail: e.to_string(),
        })?;

    let recanonical = canonical_json_bytes(&report).map_err(|e| ReportDirError::Parse {
        detail: e.to_string(),
    })?;
    if recanonical != bytes {
        return Err(ReportDirError::NonCanonical);
    }

    let recomputed = canonical_hash(DOMAIN_RUN_REPORT, &bytes);
    let stored = String::from_utf8_lossy(&stored).trim().to_string();
    if recomputed.as_str() != stored {
        return Err(ReportDirError::DigestMismatch {
            stored,
            recomputed: recomputed.as_str().to_string(),
        });
    }

    Ok(StoredReport {
        report,
        digest: recomputed,
    })
}

/// Write via temp file + rename in the same directory.
fn write_atomic(path: &Path, content: &[u8]) -> Result<(), ReportDirError> {
    let file_name = path.file_name().unwrap_or_default().to_string_lossy();
    let temp_path = path.with_file_name(format!(".tmp_{file_name}"));

    std::fs::write(&temp_path, content).map_err(io_error(&temp_path))?;
    std::fs::rename(&temp_path, path).map_err(io_error(path))?;
    Ok(())
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> ReportDirError {
    let path = path.to_path_buf();
    move |source| ReportDirError::Io { path, source }
}

fn read_required(dir: &Path, filename: &str) -> Result<Vec<u8>, ReportDirError> {
    let path = dir.join(filename);
    match std::fs::read(&path) {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ReportDirError::MissingFile {
            filename: filename.to_string(),
        }),
        Err(source) => Err(ReportDirError::Io { path, source }),
    }
}
