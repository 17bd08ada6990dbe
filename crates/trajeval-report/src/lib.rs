//! # trajeval-report
//!
//! Deterministic persistence of evaluation reports.
//!
//! ## Overview
//!
//! Each method's report is written as an evals file, a summary file and a
//! manifest. The evals and summary bytes depend only on the inputs, so two
//! runs over the same data produce identical files. The manifest records a
//! SHA-256 fingerprint of each; `verify_outputs` detects any later edit.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use trajeval_report::{verify_outputs, ReportWriter};
//!
//! let writer = ReportWriter::new("summary");
//! let manifest = writer.write("guardian", &report)?;
//!
//! verify_outputs(writer.output_dir(), "guardian")?;
//! ```

pub mod fingerprint;
pub mod manifest;
pub mod writer;

pub use fingerprint::fingerprint;
pub use manifest::RunManifest;
pub use writer::{render_evals, render_summary, verify_outputs, ArtifactPaths, ReportWriter};

// ── Tests ─────────────────────────────────────────────────────────────────────
