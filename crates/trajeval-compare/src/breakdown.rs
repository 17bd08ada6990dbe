//! Per-application breakdown of one method's results.

use std::collections::BTreeMap;

use serde::Serialize;

use trajeval_contracts::result::TaskResult;
use trajeval_core::metrics::ratio;

use crate::table::{percent, Table};

/// Label for results whose application was never recorded.
pub const UNKNOWN_APP: &str = "unknown";

/// Counts and macro precision for one application.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppBreakdown {
    pub app: String,
    pub tasks: usize,
    pub achieved: usize,
    pub completed: usize,
    pub exact_match: usize,
    /// Mean of per-task precision over this app's results.
    pub macro_precision: f64,
}

/// Group `results` by app, sorted by app name.
pub fn app_breakdown(results: &[TaskResult]) -> Vec<AppBreakdown> {
    let mut groups: BTreeMap<&str, Vec<&TaskResult>> = BTreeMap::new();
    for result in results {
        let app = result.app.as_deref().unwrap_or(UNKNOWN_APP);
        groups.entry(app).or_default().push(result);
    }

    groups
        .into_iter()
        .map(|(app, rows)| {
            let count = |pred: fn(&TaskResult) -> bool| rows.iter().filter(|r| pred(r)).count();
            let precision_sum: f64 = rows.iter().map(|r| r.precision).sum();
            AppBreakdown {
                app: app.to_string(),
                tasks: rows.len(),
                achieved: count(|r| r.task_achieved),
                completed: count(|r| r.task_completed),
                exact_match: count(|r| r.exact_match),
                macro_precision: precision_sum / rows.len() as f64,
            }
        })
        .collect()
}

/// Render a breakdown as a fixed-width table.
pub fn render_breakdown(breakdown: &[AppBreakdown]) -> String {
    let mut table = Table::new(&["app", "tasks", "achieved %", "completed %", "exact %", "macro P %"]);
    for row in breakdown {
        table.push(vec![
            row.app.clone(),
            row.tasks.to_string(),
            percent(ratio(row.achieved, row.tasks)),
            percent(ratio(row.completed, row.tasks)),
            percent(ratio(row.exact_match, row.tasks)),
            percent(row.macro_precision),
        ]);
    }
    table.render()
}
