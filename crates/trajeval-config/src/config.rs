//! Benchmark configuration schema and loading.
//!
//! A `BenchmarkConfig` is deserialized from TOML. It fixes the benchmark
//! size N and the groundtruth action marker for every method evaluated in a
//! run, and names where each method's annotations live.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use trajeval_contracts::error::{TrajevalError, TrajevalResult};
use trajeval_core::{align::DEFAULT_ACTION_MARKER, EvaluationSettings};

fn default_action_marker() -> String {
    DEFAULT_ACTION_MARKER.to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("summary")
}

/// One agent method whose recorded trajectories are scored.
///
/// Example in TOML:
/// ```toml
/// [[methods]]
/// name = "guardian"
/// annotations = "evals/evals-guardian"
/// verdicts = "guardian_verdicts.json"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodConfig {
    /// Stable method name used in output file names and comparison tables.
    pub name: String,

    /// Directory of per-task annotation JSON files, or one JSON file keyed
    /// by task id.
    pub annotations: PathBuf,

    /// Optional JSON file mapping task id to a verdict token string, used
    /// for tasks that have no annotation record.
    #[serde(default)]
    pub verdicts: Option<PathBuf>,
}

/// The top-level structure deserialized from a TOML benchmark file.
///
/// Example:
/// ```toml
/// benchmark_size = 150
/// action_marker = "- ACTION"
/// groundtruth = "groundtruth.json"
///
/// [[methods]]
/// name = "appagent"
/// annotations = "evals/evals-appagent"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    /// The fixed benchmark size N. Never shrunk by missing data.
    pub benchmark_size: usize,

    /// Prefix marking a groundtruth line as an action line.
    #[serde(default = "default_action_marker")]
    pub action_marker: String,

    /// Groundtruth JSON file or directory of `<task_id>.txt` files.
    pub groundtruth: PathBuf,

    /// Where reports are written.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Methods in the order they are evaluated and reported.
    pub methods: Vec<MethodConfig>,
}

impl BenchmarkConfig {
    /// Parse `s` as TOML and validate the result.
    ///
    /// Returns `TrajevalError::ConfigError` if the TOML is malformed, does
    /// not match the schema, or fails validation.
    pub fn from_toml_str(s: &str) -> TrajevalResult<Self> {
        let config: BenchmarkConfig = toml::from_str(s).map_err(|e| TrajevalError::ConfigError {
            reason: format!("failed to parse benchmark TOML: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read the file at `path`, parse it, and resolve relative paths against
    /// the file's directory.
    pub fn from_file(path: &Path) -> TrajevalResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| TrajevalError::ConfigError {
            reason: format!("failed to read benchmark file '{}': {}", path.display(), e),
        })?;
        let config = Self::from_toml_str(&contents)?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        debug!(path = %path.display(), methods = config.methods.len(), "benchmark config loaded");
        Ok(config.resolve_relative_to(base))
    }

    /// Check the invariants the evaluator relies on.
    pub fn validate(&self) -> TrajevalResult<()> {
        if self.benchmark_size == 0 {
            return Err(config_error("benchmark_size must be greater than zero"));
        }
        if self.action_marker.trim().is_empty() {
            return Err(config_error("action_marker must not be blank"));
        }
        if self.methods.is_empty() {
            return Err(config_error("at least one [[methods]] entry is required"));
        }

        let mut seen = HashSet::new();
        for method in &self.methods {
            if method.name.trim().is_empty() {
                return Err(config_error("method name must not be blank"));
            }
            if !seen.insert(method.name.as_str()) {
                return Err(config_error(&format!("duplicate method name '{}'", method.name)));
            }
        }
        Ok(())
    }

    /// Make every relative path absolute with respect to `base`.
    pub fn resolve_relative_to(mut self, base: &Path) -> Self {
        let join = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };

        join(&mut self.groundtruth);
        join(&mut self.output_dir);
        for method in &mut self.methods {
            join(&mut method.annotations);
            if let Some(verdicts) = method.verdicts.as_mut() {
                join(verdicts);
            }
        }
        self
    }

    /// Look a method up by name.
    pub fn method(&self, name: &str) -> TrajevalResult<&MethodConfig> {
        self.methods
            .iter()
            .find(|m| m.name == name)
            .ok_or_else(|| config_error(&format!("no method named '{}' in benchmark config", name)))
    }

    /// The engine-facing subset of this configuration.
    pub fn settings(&self) -> EvaluationSettings {
        EvaluationSettings::new(self.benchmark_size).with_action_marker(self.action_marker.clone())
    }
}

fn config_error(reason: &str) -> TrajevalError {
    TrajevalError::ConfigError {
        reason: reason.to_string(),
    }
}
