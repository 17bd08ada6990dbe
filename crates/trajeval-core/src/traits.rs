//! Source trait definitions for the evaluation pipeline.
//!
//! The engine reads its inputs through exactly two seams:
//!
//! - `AnnotationSource`: candidate trajectories with per-step verdicts
//! - `GroundTruthSource`: reference trajectories
//!
//! Both load everything up front. The evaluator never calls back into a
//! source once computation has started, so a run can be replayed offline from
//! in-memory copies of the same records.

use trajeval_contracts::{
    error::TrajevalResult,
    record::{AnnotationSet, GroundTruthRecord},
};

/// Supplies the annotated candidate trajectories for one method.
pub trait AnnotationSource: Send + Sync {
    /// Human-readable name used in logs and error messages.
    fn name(&self) -> &str;

    /// Load every annotation record, fallback verdict, and rejection.
    ///
    /// Unusable individual records are reported in `AnnotationSet::rejected`.
    /// Return `Err(SourceUnavailable)` only when nothing can be read at all.
    fn load_annotations(&self) -> TrajevalResult<AnnotationSet>;
}

/// Supplies the reference trajectories for the benchmark.
pub trait GroundTruthSource: Send + Sync {
    /// Human-readable name used in logs and error messages.
    fn name(&self) -> &str;

    /// Load every groundtruth record.
    ///
    /// Return `Err(SourceUnavailable)` only when nothing can be read at all.
    fn load_groundtruth(&self) -> TrajevalResult<Vec<GroundTruthRecord>>;
}
