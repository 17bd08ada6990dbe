//! Input records supplied by the annotation and groundtruth collaborators.
//!
//! These are read-only to the engine. Every derived value is recomputed from
//! them on each run.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// An ordered sequence of action descriptions, one per atomic agent action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionSequence(pub Vec<String>);

impl ActionSequence {
    /// Build a sequence from any iterable of string-like lines.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(lines.into_iter().map(Into::into).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    /// The first `len` actions (or all of them when shorter).
    pub fn prefix(&self, len: usize) -> &[String] {
        &self.0[..len.min(self.0.len())]
    }
}

/// One annotated candidate trajectory for a single task.
///
/// `correctness[i]` is the annotator's verdict on `candidate[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalRecord {
    pub task_id: String,
    /// Application under test, when the annotation tool recorded it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app: Option<String>,
    pub candidate: ActionSequence,
    pub correctness: Vec<bool>,
    /// Whether execution ended in the application's correct target state.
    pub end_correctly: bool,
}

impl EvalRecord {
    /// True when every candidate action carries exactly one verdict.
    ///
    /// A record with no candidate text at all is accepted: the labeling tool
    /// can save verdicts without copying the candidate lines.
    pub fn is_well_formed(&self) -> bool {
        self.candidate.is_empty() || self.candidate.len() == self.correctness.len()
    }
}

/// The reference trajectory for a task.
///
/// `reference` holds every line of the groundtruth entry; only lines carrying
/// the configured action marker count toward the groundtruth length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundTruthRecord {
    pub task_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app: Option<String>,
    pub reference: ActionSequence,
}

/// A record the annotation source could not turn into an `EvalRecord`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordRejection {
    /// The task the record belonged to, when it could be determined.
    pub task_id: Option<String>,
    /// Where the record came from (file path or keyed-file entry).
    pub origin: String,
    pub reason: String,
}

/// Everything an annotation source yields for one method, fully materialized.
#[derive(Debug, Clone, Default)]
pub struct AnnotationSet {
    /// Parsed annotations keyed by task id.
    pub records: BTreeMap<String, EvalRecord>,
    /// Externally supplied per-step verdicts for tasks that were never
    /// annotated, already parsed into booleans.
    pub fallback_verdicts: BTreeMap<String, Vec<bool>>,
    /// Records that were present but unusable.
    pub rejected: Vec<RecordRejection>,
}
