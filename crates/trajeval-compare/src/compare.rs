//! Several methods scored against one groundtruth.
//!
//! The groundtruth is loaded once and shared. Each method's annotations are
//! loaded and evaluated independently: a method whose source cannot be read
//! gets a failed row and the remaining methods still run.

use serde::Serialize;
use tracing::{info, warn};

use trajeval_contracts::{
    error::TrajevalResult,
    summary::{CorpusSummary, EvaluationReport},
};
use trajeval_core::{
    traits::{AnnotationSource, GroundTruthSource},
    EvaluationSettings, Evaluator,
};

use crate::table::{percent, Table};

/// One method to compare: a display name and its annotation source.
pub struct MethodInput<'a> {
    pub name: &'a str,
    pub annotations: &'a dyn AnnotationSource,
}

impl<'a> MethodInput<'a> {
    pub fn new(name: &'a str, annotations: &'a dyn AnnotationSource) -> Self {
        Self { name, annotations }
    }
}

/// How one method fared.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MethodOutcome {
    Evaluated { report: EvaluationReport },
    Failed { reason: String },
}

/// One row of a comparison.
#[derive(Debug, Clone, Serialize)]
pub struct MethodRow {
    pub name: String,
    pub outcome: MethodOutcome,
}

impl MethodRow {
    pub fn report(&self) -> Option<&EvaluationReport> {
        match &self.outcome {
            MethodOutcome::Evaluated { report } => Some(report),
            MethodOutcome::Failed { .. } => None,
        }
    }

    pub fn summary(&self) -> Option<&CorpusSummary> {
        self.report().map(|report| &report.summary)
    }
}

/// The rows of a comparison, in the order the methods were given.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Comparison {
    pub rows: Vec<MethodRow>,
}

impl Comparison {
    pub fn row(&self, name: &str) -> Option<&MethodRow> {
        self.rows.iter().find(|row| row.name == name)
    }

    /// Render as a fixed-width table with percentages to one decimal.
    pub fn render_table(&self) -> String {
        let mut table = Table::new(&[
            "method",
            "evaluated",
            "exact %",
            "completed %",
            "achieved %",
            "prefix %",
            "macro P %",
            "micro P %",
        ]);
        for row in &self.rows {
            match &row.outcome {
                MethodOutcome::Evaluated { report } => {
                    let s = &report.summary;
                    table.push(vec![
                        row.name.clone(),
                        format!("{}/{}", s.evaluated_tasks, s.total_tasks),
                        percent(s.exact_match_percentage),
                        percent(s.task_completion_percentage),
                        percent(s.achieved_tasks_percentage),
                        percent(s.average_prefix_match),
                        percent(s.macro_average_precision),
                        percent(s.micro_average_precision),
                    ]);
                }
                MethodOutcome::Failed { reason } => {
                    table.push_note(row.name.clone(), format!("FAILED: {reason}"));
                }
            }
        }
        table.render()
    }
}

/// Evaluate every method against the same groundtruth and benchmark size.
///
/// # Errors
///
/// Only a groundtruth that cannot be loaded fails the whole comparison.
pub fn compare_methods(
    settings: &EvaluationSettings,
    groundtruth: &dyn GroundTruthSource,
    methods: &[MethodInput<'_>],
) -> TrajevalResult<Comparison> {
    let references = groundtruth.load_groundtruth()?;
    let evaluator = Evaluator::new(settings.clone());

    let rows = methods
        .iter()
        .map(|method| {
            let outcome = match method.annotations.load_annotations() {
                Ok(set) => MethodOutcome::Evaluated {
                    report: evaluator.evaluate_loaded(&set, &references),
                },
                Err(e) => {
                    warn!(method = %method.name, error = %e, "method could not be evaluated");
                    MethodOutcome::Failed { reason: e.to_string() }
                }
            };
            MethodRow {
                name: method.name.to_string(),
                outcome,
            }
        })
        .collect::<Vec<_>>();

    info!(
        methods = rows.len(),
        failed = rows.iter().filter(|row| row.report().is_none()).count(),
        "comparison finished"
    );
    Ok(Comparison { rows })
}
