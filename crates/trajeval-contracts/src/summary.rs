//! Corpus-wide summary and the complete evaluation report.

use serde::{Deserialize, Serialize};

use crate::result::{TaskFailure, TaskResult};

/// Aggregate statistics over a fixed benchmark of `total_tasks` tasks.
///
/// Task-outcome percentages are ratios over `total_tasks`; the prefix and
/// macro-precision means are over `evaluated_tasks`; micro precision pools
/// actions. All ratios are in `[0, 1]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorpusSummary {
    /// The fixed benchmark size N.
    pub total_tasks: usize,
    /// Number of `TaskResult`s actually produced.
    pub evaluated_tasks: usize,
    pub total_exact_match_tasks: usize,
    pub exact_match_percentage: f64,
    pub total_tasks_completed: usize,
    pub task_completion_percentage: f64,
    pub total_achieved_tasks: usize,
    pub achieved_tasks_percentage: f64,
    pub total_not_done_but_end: usize,
    pub average_prefix_match: f64,
    pub total_correct_actions: usize,
    pub total_actions: usize,
    pub macro_average_precision: f64,
    pub micro_average_precision: f64,
}

/// The complete output of one evaluation run for one method.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// One row per task, sorted by task id.
    pub results: Vec<TaskResult>,
    pub summary: CorpusSummary,
    /// Tasks whose records were malformed, in task-id order.
    pub failures: Vec<TaskFailure>,
}
