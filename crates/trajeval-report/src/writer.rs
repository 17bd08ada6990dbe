//! Report persistence and re-verification.
//!
//! For a method `m`, `ReportWriter::write` produces three files in the
//! output directory:
//!
//! - `m_evals.json`: pretty JSON array of per-task rows sorted by task id
//! - `m_summary.json`: pretty JSON corpus summary
//! - `m_manifest.json`: run metadata and the SHA-256 of the other two
//!
//! `verify_outputs` reads them back and checks both digests.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use trajeval_contracts::{
    error::{TrajevalError, TrajevalResult},
    result::TaskResult,
    summary::{CorpusSummary, EvaluationReport},
};

use crate::{fingerprint::fingerprint, manifest::RunManifest};

// ── Paths ─────────────────────────────────────────────────────────────────────

/// The three artifact paths for one method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub evals: PathBuf,
    pub summary: PathBuf,
    pub manifest: PathBuf,
}

impl ArtifactPaths {
    pub fn new(dir: &Path, method: &str) -> Self {
        Self {
            evals: dir.join(format!("{method}_evals.json")),
            summary: dir.join(format!("{method}_summary.json")),
            manifest: dir.join(format!("{method}_manifest.json")),
        }
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────────

fn render<T: Serialize + ?Sized>(value: &T, what: &str) -> TrajevalResult<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(value).map_err(|e| TrajevalError::ReportWriteFailed {
        reason: format!("could not serialize {what}: {e}"),
    })?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// The exact bytes of the evals file: rows sorted by task id.
pub fn render_evals(results: &[TaskResult]) -> TrajevalResult<Vec<u8>> {
    let mut rows: Vec<&TaskResult> = results.iter().collect();
    rows.sort_by(|a, b| a.task_id.cmp(&b.task_id));
    render(&rows, "evals")
}

/// The exact bytes of the summary file.
pub fn render_summary(summary: &CorpusSummary) -> TrajevalResult<Vec<u8>> {
    render(summary, "summary")
}

// ── Writer ────────────────────────────────────────────────────────────────────

/// Persists evaluation reports under one output directory.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write the evals, summary and manifest for `method`.
    ///
    /// Creates the output directory when needed. Existing artifacts for the
    /// same method are overwritten.
    pub fn write(&self, method: &str, report: &EvaluationReport) -> TrajevalResult<RunManifest> {
        std::fs::create_dir_all(&self.output_dir).map_err(|e| write_failed(&self.output_dir, e))?;

        let paths = ArtifactPaths::new(&self.output_dir, method);
        let evals = render_evals(&report.results)?;
        let summary = render_summary(&report.summary)?;

        let manifest = RunManifest::new(
            method,
            report.summary.total_tasks,
            report.results.len(),
            report.failures.len(),
            fingerprint(&evals),
            fingerprint(&summary),
        );
        let manifest_bytes = render(&manifest, "manifest")?;

        persist(&paths.evals, &evals)?;
        persist(&paths.summary, &summary)?;
        persist(&paths.manifest, &manifest_bytes)?;

        info!(
            method = %method,
            run_id = %manifest.run_id,
            tasks = manifest.task_count,
            failures = manifest.failure_count,
            dir = %self.output_dir.display(),
            "report written"
        );
        Ok(manifest)
    }
}

fn write_failed(path: &Path, e: std::io::Error) -> TrajevalError {
    TrajevalError::ReportWriteFailed {
        reason: format!("{}: {e}", path.display()),
    }
}

fn persist(path: &Path, bytes: &[u8]) -> TrajevalResult<()> {
    std::fs::write(path, bytes).map_err(|e| write_failed(path, e))?;
    debug!(path = %path.display(), bytes = bytes.len(), "artifact written");
    Ok(())
}

// ── Verification ──────────────────────────────────────────────────────────────

/// Re-read the artifacts for `method` in `dir` and check them against the
/// digests in the manifest.
///
/// Returns the manifest when both digests match, `FingerprintMismatch` naming
/// the first drifted file otherwise. A missing or unparsable artifact is a
/// `SourceUnavailable` error.
pub fn verify_outputs(dir: &Path, method: &str) -> TrajevalResult<RunManifest> {
    let paths = ArtifactPaths::new(dir, method);

    let manifest_bytes = read_artifact(&paths.manifest)?;
    let manifest: RunManifest =
        serde_json::from_slice(&manifest_bytes).map_err(|e| TrajevalError::SourceUnavailable {
            source_name: paths.manifest.display().to_string(),
            reason: format!("unreadable manifest: {e}"),
        })?;

    for (path, expected) in [
        (&paths.evals, &manifest.evals_sha256),
        (&paths.summary, &manifest.summary_sha256),
    ] {
        let actual = fingerprint(&read_artifact(path)?);
        if &actual != expected {
            return Err(TrajevalError::FingerprintMismatch {
                artifact: path.display().to_string(),
                expected: expected.clone(),
                actual,
            });
        }
    }

    debug!(method = %method, run_id = %manifest.run_id, "artifacts verified");
    Ok(manifest)
}

fn read_artifact(path: &Path) -> TrajevalResult<Vec<u8>> {
    std::fs::read(path).map_err(|e| TrajevalError::SourceUnavailable {
        source_name: path.display().to_string(),
        reason: e.to_string(),
    })
}
