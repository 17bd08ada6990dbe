//! In-memory sources.
//!
//! `InMemoryAnnotationSource` and `InMemoryGroundTruthSource` hold records
//! built directly in code. They back the tests across the workspace and let
//! callers evaluate data that never touched disk.

use trajeval_contracts::{
    error::TrajevalResult,
    record::{ActionSequence, AnnotationSet, EvalRecord, GroundTruthRecord, RecordRejection},
};
use trajeval_core::traits::{AnnotationSource, GroundTruthSource};

// ── Annotations ───────────────────────────────────────────────────────────────

/// An annotation source over a fixed `AnnotationSet`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAnnotationSource {
    name: String,
    set: AnnotationSet,
}

impl InMemoryAnnotationSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            set: AnnotationSet::default(),
        }
    }

    /// Add a record. A later record with the same task id replaces the earlier one.
    pub fn with_record(mut self, record: EvalRecord) -> Self {
        self.set.records.insert(record.task_id.clone(), record);
        self
    }

    /// Add an annotated trajectory from action lines and verdicts.
    pub fn with_annotation(
        self,
        task_id: impl Into<String>,
        actions: &[&str],
        correctness: &[bool],
        end_correctly: bool,
    ) -> Self {
        self.with_record(EvalRecord {
            task_id: task_id.into(),
            app: None,
            candidate: ActionSequence::from_lines(actions.iter().copied()),
            correctness: correctness.to_vec(),
            end_correctly,
        })
    }

    /// Add fallback verdicts for a task with no annotation.
    pub fn with_fallback(mut self, task_id: impl Into<String>, correctness: &[bool]) -> Self {
        self.set.fallback_verdicts.insert(task_id.into(), correctness.to_vec());
        self
    }

    /// Add a record the source could not use.
    pub fn with_rejection(mut self, rejection: RecordRejection) -> Self {
        self.set.rejected.push(rejection);
        self
    }
}

impl AnnotationSource for InMemoryAnnotationSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn load_annotations(&self) -> TrajevalResult<AnnotationSet> {
        Ok(self.set.clone())
    }
}

// ── Groundtruth ───────────────────────────────────────────────────────────────

/// A groundtruth source over a fixed list of records.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGroundTruthSource {
    name: String,
    records: Vec<GroundTruthRecord>,
}

impl InMemoryGroundTruthSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            records: Vec::new(),
        }
    }

    pub fn with_record(mut self, record: GroundTruthRecord) -> Self {
        self.records.push(record);
        self
    }

    /// Add a reference made of `lines`, marker lines included.
    pub fn with_reference(self, task_id: impl Into<String>, lines: &[&str]) -> Self {
        self.with_record(GroundTruthRecord {
            task_id: task_id.into(),
            app: None,
            reference: ActionSequence::from_lines(lines.iter().copied()),
        })
    }
}

impl GroundTruthSource for InMemoryGroundTruthSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn load_groundtruth(&self) -> TrajevalResult<Vec<GroundTruthRecord>> {
        Ok(self.records.clone())
    }
}
