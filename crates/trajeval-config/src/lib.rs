//! # trajeval-config
//!
//! TOML benchmark configuration for the trajectory evaluation engine.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use trajeval_config::BenchmarkConfig;
//!
//! let config = BenchmarkConfig::from_file(Path::new("bench.toml"))?;
//! let evaluator = trajeval_core::Evaluator::new(config.settings());
//! ```
//!
//! ## Paths
//!
//! `groundtruth`, `output_dir`, and each method's `annotations` / `verdicts`
//! may be relative; `from_file` resolves them against the config file's
//! directory.

pub mod config;

pub use config::{BenchmarkConfig, MethodConfig};

// ── Tests ─────────────────────────────────────────────────────────────────────
