//! Filesystem groundtruth source.
//!
//! Accepts either a JSON object keyed by task id or a directory of
//! `<task_id>.txt` files. A JSON entry may be the reference text itself, an
//! array of lines, or an object with `app` and `actions`.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use trajeval_contracts::{
    error::{TrajevalError, TrajevalResult},
    record::{ActionSequence, GroundTruthRecord},
};
use trajeval_core::traits::GroundTruthSource;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawReference {
    Text(String),
    Lines(Vec<String>),
    Entry {
        #[serde(default)]
        app: Option<String>,
        actions: ReferenceBody,
    },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ReferenceBody {
    Text(String),
    Lines(Vec<String>),
}

impl ReferenceBody {
    fn into_lines(self) -> Vec<String> {
        match self {
            ReferenceBody::Text(text) => split_lines(&text),
            ReferenceBody::Lines(lines) => lines.iter().flat_map(|line| split_lines(line)).collect(),
        }
    }
}

/// Split reference text into non-blank lines.
///
/// `\r\n` and bare `\r` are treated as line breaks. Lines keep their
/// original content apart from the trailing break.
pub fn split_lines(text: &str) -> Vec<String> {
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

/// Groundtruth source backed by a JSON file or a directory of text files.
#[derive(Debug, Clone)]
pub struct JsonGroundTruthSource {
    name: String,
    path: PathBuf,
}

impl JsonGroundTruthSource {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    fn unavailable(&self, path: &Path, reason: impl std::fmt::Display) -> TrajevalError {
        TrajevalError::SourceUnavailable {
            source_name: format!("{} ({})", self.name, path.display()),
            reason: reason.to_string(),
        }
    }

    fn load_json(&self) -> TrajevalResult<Vec<GroundTruthRecord>> {
        let text = std::fs::read_to_string(&self.path).map_err(|e| self.unavailable(&self.path, e))?;
        let document: Value = serde_json::from_str(&text).map_err(|e| self.unavailable(&self.path, e))?;
        let Value::Object(entries) = document else {
            return Err(self.unavailable(&self.path, "expected a JSON object keyed by task id"));
        };

        let mut records = Vec::with_capacity(entries.len());
        for (task_id, value) in entries {
            match serde_json::from_value::<RawReference>(value) {
                Ok(raw) => records.push(into_record(task_id, raw)),
                Err(e) => warn!(task_id = %task_id, error = %e, "unusable groundtruth entry; skipping"),
            }
        }
        Ok(records)
    }

    fn load_directory(&self) -> TrajevalResult<Vec<GroundTruthRecord>> {
        let entries = std::fs::read_dir(&self.path).map_err(|e| self.unavailable(&self.path, e))?;

        let mut files: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "txt"))
            .collect();
        files.sort();

        let mut records = Vec::with_capacity(files.len());
        for file in files {
            let Some(task_id) = file.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
                continue;
            };
            match std::fs::read_to_string(&file) {
                Ok(text) => records.push(GroundTruthRecord {
                    task_id,
                    app: None,
                    reference: ActionSequence(split_lines(&text)),
                }),
                Err(e) => warn!(path = %file.display(), error = %e, "unreadable groundtruth file; skipping"),
            }
        }
        Ok(records)
    }
}

fn into_record(task_id: String, raw: RawReference) -> GroundTruthRecord {
    let (app, lines) = match raw {
        RawReference::Text(text) => (None, split_lines(&text)),
        RawReference::Lines(lines) => (None, ReferenceBody::Lines(lines).into_lines()),
        RawReference::Entry { app, actions } => (app, actions.into_lines()),
    };
    GroundTruthRecord {
        task_id,
        app,
        reference: ActionSequence(lines),
    }
}

impl GroundTruthSource for JsonGroundTruthSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn load_groundtruth(&self) -> TrajevalResult<Vec<GroundTruthRecord>> {
        let records = if self.path.is_dir() {
            self.load_directory()?
        } else if self.path.is_file() {
            self.load_json()?
        } else {
            return Err(self.unavailable(&self.path, "path does not exist"));
        };

        debug!(source = %self.name, records = records.len(), "groundtruth loaded");
        Ok(records)
    }
}
