//! # trajeval-sources
//!
//! Concrete annotation and groundtruth sources for the evaluator.
//!
//! - [`annotation::JsonAnnotationSource`] reads labeling-tool output, either
//!   a directory of per-task JSON files or one keyed JSON file, plus an
//!   optional file of fallback verdict strings.
//! - [`groundtruth::JsonGroundTruthSource`] reads reference trajectories
//!   from a keyed JSON file or a directory of `<task_id>.txt` files.
//! - [`memory`] holds in-memory versions of both.
//!
//! Every annotation record is checked against a JSON Schema
//! ([`schema::RecordValidator`]) before decoding. Records that fail are
//! returned as rejections rather than errors.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use trajeval_core::Evaluator;
//! use trajeval_sources::{JsonAnnotationSource, JsonGroundTruthSource};
//!
//! let annotations = JsonAnnotationSource::new("guardian", "evals/evals-guardian");
//! let groundtruth = JsonGroundTruthSource::new("groundtruth", "groundtruth.json");
//! let report = Evaluator::new(settings).evaluate(&annotations, &groundtruth)?;
//! ```

pub mod annotation;
pub mod groundtruth;
pub mod memory;
pub mod schema;
pub mod tokens;

pub use annotation::JsonAnnotationSource;
pub use groundtruth::JsonGroundTruthSource;
pub use memory::{InMemoryAnnotationSource, InMemoryGroundTruthSource};
