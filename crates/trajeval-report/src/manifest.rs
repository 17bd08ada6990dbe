//! Run manifest.
//!
//! The manifest is the only artifact carrying run-specific data (a fresh
//! run id and the wall-clock time). The evals and summary files stay
//! byte-identical across re-runs; the manifest pins their digests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Metadata written alongside one method's evals and summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    /// Unique per write, even for identical inputs.
    pub run_id: Uuid,

    pub method: String,

    /// Wall-clock time (UTC) the artifacts were written.
    pub generated_at: DateTime<Utc>,

    /// The fixed benchmark size N the summary was computed against.
    pub benchmark_size: usize,

    /// Number of per-task rows in the evals file.
    pub task_count: usize,

    /// Number of tasks that could not be scored and were given zero credit.
    pub failure_count: usize,

    /// SHA-256 (hex) of the evals file bytes.
    pub evals_sha256: String,

    /// SHA-256 (hex) of the summary file bytes.
    pub summary_sha256: String,
}

impl RunManifest {
    pub fn new(
        method: impl Into<String>,
        benchmark_size: usize,
        task_count: usize,
        failure_count: usize,
        evals_sha256: String,
        summary_sha256: String,
    ) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            method: method.into(),
            generated_at: Utc::now(),
            benchmark_size,
            task_count,
            failure_count,
            evals_sha256,
            summary_sha256,
        }
    }
}
