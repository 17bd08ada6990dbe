//! # trajeval-core
//!
//! The trajectory evaluation engine.
//!
//! This crate provides:
//! - The two source traits (`AnnotationSource`, `GroundTruthSource`)
//! - Alignment of a candidate trajectory against its groundtruth length
//! - Step metrics (precision, prefix completeness, full correctness)
//! - Task outcome classification (achieved, completed, exact match)
//! - The corpus fold into a `CorpusSummary`
//! - The `Evaluator` that runs them in order over a whole benchmark
//!
//! ## Usage
//!
//! ```rust,ignore
//! use trajeval_core::{EvaluationSettings, Evaluator};
//!
//! let evaluator = Evaluator::new(EvaluationSettings::new(150));
//! let report = evaluator.evaluate(&annotations, &groundtruth)?;
//! ```

pub mod aggregate;
pub mod align;
pub mod classify;
pub mod evaluator;
pub mod metrics;
pub mod traits;

pub use aggregate::aggregate;
pub use evaluator::{EvaluationSettings, Evaluator, TaskInput};
