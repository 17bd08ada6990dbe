//! Filesystem annotation source.
//!
//! Reads the records written by the manual labeling tool. The path is either
//! a directory holding one `<task>.json` file per task, or a single JSON
//! object keyed by task id. An optional verdicts file supplies per-step
//! verdict strings for tasks that were never annotated.
//!
//! Individual bad records are rejected and reported; only an unreadable
//! path fails the whole load.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use trajeval_contracts::{
    error::{TrajevalError, TrajevalResult},
    record::{ActionSequence, AnnotationSet, EvalRecord, RecordRejection},
};
use trajeval_core::traits::AnnotationSource;

use crate::{schema::RecordValidator, tokens::parse_verdict_tokens};

/// The `evals` field: a boolean array or a token string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawVerdicts {
    Flags(Vec<bool>),
    Tokens(String),
}

impl RawVerdicts {
    fn into_flags(self) -> Vec<bool> {
        match self {
            RawVerdicts::Flags(flags) => flags,
            RawVerdicts::Tokens(raw) => parse_verdict_tokens(&raw),
        }
    }
}

/// One record as written by the labeling tool.
#[derive(Debug, Deserialize)]
struct RawAnnotation {
    #[serde(default)]
    app: Option<String>,
    #[serde(default)]
    actions: Vec<String>,
    evals: RawVerdicts,
    #[serde(default)]
    end_correctly: bool,
}

/// The task id a record names for itself, if any.
fn declared_task_id(value: &Value) -> Option<String> {
    ["task_id", "task_name", "hash"]
        .iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
        .map(str::to_string)
}

/// Annotation source backed by JSON files on disk.
#[derive(Debug, Clone)]
pub struct JsonAnnotationSource {
    name: String,
    path: PathBuf,
    verdicts: Option<PathBuf>,
}

impl JsonAnnotationSource {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            verdicts: None,
        }
    }

    /// Also read fallback verdict strings from `path`.
    pub fn with_verdicts(mut self, path: impl Into<PathBuf>) -> Self {
        self.verdicts = Some(path.into());
        self
    }

    fn unavailable(&self, path: &Path, reason: impl std::fmt::Display) -> TrajevalError {
        TrajevalError::SourceUnavailable {
            source_name: format!("{} ({})", self.name, path.display()),
            reason: reason.to_string(),
        }
    }

    /// Validate and decode one record. `task_id` has already been resolved.
    fn decode(
        validator: &RecordValidator,
        value: Value,
        task_id: &str,
        origin: &str,
    ) -> Result<EvalRecord, RecordRejection> {
        let reject = |reason: String| RecordRejection {
            task_id: Some(task_id.to_string()),
            origin: origin.to_string(),
            reason,
        };

        let violations = validator.violations(&value);
        if !violations.is_empty() {
            return Err(reject(violations.join("; ")));
        }

        let raw: RawAnnotation = serde_json::from_value(value).map_err(|e| reject(e.to_string()))?;
        Ok(EvalRecord {
            task_id: task_id.to_string(),
            app: raw.app,
            candidate: ActionSequence(raw.actions),
            correctness: raw.evals.into_flags(),
            end_correctly: raw.end_correctly,
        })
    }

    fn accept(set: &mut AnnotationSet, outcome: Result<EvalRecord, RecordRejection>) {
        match outcome {
            Ok(record) => {
                if set.records.contains_key(&record.task_id) {
                    warn!(task_id = %record.task_id, "duplicate annotation; keeping the first one");
                    return;
                }
                set.records.insert(record.task_id.clone(), record);
            }
            Err(rejection) => {
                warn!(origin = %rejection.origin, reason = %rejection.reason, "annotation record rejected");
                set.rejected.push(rejection);
            }
        }
    }

    fn load_directory(&self, validator: &RecordValidator, set: &mut AnnotationSet) -> TrajevalResult<()> {
        let entries = std::fs::read_dir(&self.path).map_err(|e| self.unavailable(&self.path, e))?;

        let mut files: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        files.sort();

        for file in files {
            let stem = file
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let origin = file.display().to_string();

            let parsed = std::fs::read_to_string(&file)
                .map_err(|e| e.to_string())
                .and_then(|text| serde_json::from_str::<Value>(&text).map_err(|e| e.to_string()));

            let outcome = match parsed {
                Ok(value) => {
                    let task_id = declared_task_id(&value).unwrap_or(stem);
                    Self::decode(validator, value, &task_id, &origin)
                }
                Err(reason) => Err(RecordRejection {
                    task_id: Some(stem),
                    origin,
                    reason,
                }),
            };
            Self::accept(set, outcome);
        }
        Ok(())
    }

    fn load_keyed_file(&self, validator: &RecordValidator, set: &mut AnnotationSet) -> TrajevalResult<()> {
        let entries = read_json_object(&self.path).map_err(|reason| self.unavailable(&self.path, reason))?;

        for (task_id, value) in entries {
            let origin = format!("{}#{}", self.path.display(), task_id);
            if let Some(declared) = declared_task_id(&value).filter(|declared| *declared != task_id) {
                warn!(task_id = %task_id, declared = %declared, "record declares a different task id; using the key");
            }
            Self::accept(set, Self::decode(validator, value, &task_id, &origin));
        }
        Ok(())
    }

    fn load_verdicts(&self, path: &Path) -> TrajevalResult<BTreeMap<String, Vec<bool>>> {
        let entries = read_json_object(path).map_err(|reason| self.unavailable(path, reason))?;

        let mut verdicts = BTreeMap::new();
        for (task_id, value) in entries {
            match value {
                Value::String(raw) => {
                    verdicts.insert(task_id, parse_verdict_tokens(&raw));
                }
                other => {
                    warn!(task_id = %task_id, value = %other, "verdict entry is not a string; ignoring");
                }
            }
        }
        Ok(verdicts)
    }
}

/// Read `path` as one JSON object.
fn read_json_object(path: &Path) -> Result<serde_json::Map<String, Value>, String> {
    let text = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    match serde_json::from_str::<Value>(&text).map_err(|e| e.to_string())? {
        Value::Object(map) => Ok(map),
        _ => Err("expected a JSON object keyed by task id".to_string()),
    }
}

impl AnnotationSource for JsonAnnotationSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn load_annotations(&self) -> TrajevalResult<AnnotationSet> {
        let validator = RecordValidator::annotation()?;
        let mut set = AnnotationSet::default();

        if self.path.is_dir() {
            self.load_directory(&validator, &mut set)?;
        } else if self.path.is_file() {
            self.load_keyed_file(&validator, &mut set)?;
        } else {
            return Err(self.unavailable(&self.path, "path does not exist"));
        }

        if let Some(path) = &self.verdicts {
            set.fallback_verdicts = self.load_verdicts(path)?;
        }

        debug!(
            source = %self.name,
            records = set.records.len(),
            rejected = set.rejected.len(),
            fallback = set.fallback_verdicts.len(),
            "annotations loaded"
        );
        Ok(set)
    }
}
