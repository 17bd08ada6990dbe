//! Error types for the trajectory evaluation pipeline.
//!
//! All fallible operations in the workspace return `TrajevalResult<T>`.
//! Only `SourceUnavailable` aborts a corpus run; `MalformedRecord` is caught
//! per task by the evaluator and turned into a zero-credit row.

use thiserror::Error;

/// The unified error type for the trajectory evaluation engine.
#[derive(Debug, Error)]
pub enum TrajevalError {
    /// An annotation or groundtruth source could not be read at all.
    ///
    /// This is the only fatal condition of an evaluation run.
    #[error("source '{source_name}' is unavailable: {reason}")]
    SourceUnavailable { source_name: String, reason: String },

    /// A single task's record violates the record invariants.
    #[error("malformed record for task '{task_id}': {reason}")]
    MalformedRecord { task_id: String, reason: String },

    /// A required configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// A record failed JSON Schema validation outside the per-record path.
    #[error("schema validation error: {reason}")]
    SchemaValidation { reason: String },

    /// A report artifact could not be serialized or persisted.
    #[error("report write failed: {reason}")]
    ReportWriteFailed { reason: String },

    /// A persisted artifact no longer matches the digest in its manifest.
    #[error("fingerprint mismatch for '{artifact}': expected {expected}, found {actual}")]
    FingerprintMismatch {
        artifact: String,
        expected: String,
        actual: String,
    },
}

/// Convenience alias used throughout the trajeval crates.
pub type TrajevalResult<T> = Result<T, TrajevalError>;
