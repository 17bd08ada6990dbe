//! Per-task derived results.
//!
//! A `TaskResult` is a pure function of one `EvalRecord` and its
//! `GroundTruthRecord`; it is recomputed every run and never used as a source
//! of truth.

use serde::{Deserialize, Serialize};

/// Where the correctness sequence behind a `TaskResult` came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultSource {
    /// A full annotation record.
    Annotated,
    /// A pre-computed verdict string; the task counts as not achieved.
    Verdicts,
    /// No annotation of any kind; zero credit.
    Missing,
    /// The record was present but malformed; zero credit.
    Malformed,
}

/// The flat per-task output row.
///
/// The key set is stable: every row serializes every field, in this order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskResult {
    pub task_id: String,
    pub app: Option<String>,
    pub source: ResultSource,
    /// Candidate length before alignment.
    pub original_actions: usize,
    /// Count of marker lines in the groundtruth (0 when missing).
    pub groundtruth_actions: usize,
    pub correct_actions: usize,
    /// Aligned length; the precision denominator.
    pub total_actions: usize,
    pub precision: f64,
    pub prefix_complete: f64,
    pub all_correct: bool,
    pub end_correctly: bool,
    pub task_achieved: bool,
    pub task_completed: bool,
    pub exact_match: bool,
    pub not_done_but_end: bool,
    /// The aligned candidate lines. Empty when the record carried no text.
    pub actions: Vec<String>,
    /// The aligned verdicts the metrics above were computed from.
    pub correctness: Vec<bool>,
}

impl TaskResult {
    /// A row with every metric at zero and every flag false.
    pub fn zero_credit(task_id: impl Into<String>, source: ResultSource) -> Self {
        Self {
            task_id: task_id.into(),
            app: None,
            source,
            original_actions: 0,
            groundtruth_actions: 0,
            correct_actions: 0,
            total_actions: 0,
            precision: 0.0,
            prefix_complete: 0.0,
            all_correct: false,
            end_correctly: false,
            task_achieved: false,
            task_completed: false,
            exact_match: false,
            not_done_but_end: false,
            actions: Vec::new(),
            correctness: Vec::new(),
        }
    }
}

/// A task whose processing failed and was isolated from the rest of the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFailure {
    pub task_id: String,
    pub reason: String,
}
