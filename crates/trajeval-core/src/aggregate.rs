//! Corpus aggregation.
//!
//! The summary is an explicit fold over the task results. Task-outcome rates
//! use the fixed benchmark size; the prefix and macro-precision means use the
//! number of results actually produced; micro precision pools actions.

use tracing::warn;

use trajeval_contracts::{result::TaskResult, summary::CorpusSummary};

use crate::metrics::ratio;

/// Running totals for one fold.
#[derive(Debug, Clone, Default)]
struct Tally {
    produced: usize,
    exact_match: usize,
    completed: usize,
    achieved: usize,
    not_done_but_end: usize,
    prefix_sum: f64,
    precision_sum: f64,
    correct_actions: usize,
    total_actions: usize,
}

impl Tally {
    fn absorb(mut self, result: &TaskResult) -> Self {
        self.produced += 1;
        self.exact_match += usize::from(result.exact_match);
        self.completed += usize::from(result.task_completed);
        self.achieved += usize::from(result.task_achieved);
        self.not_done_but_end += usize::from(result.not_done_but_end);
        self.prefix_sum += result.prefix_complete;
        self.precision_sum += result.precision;
        self.correct_actions += result.correct_actions;
        self.total_actions += result.total_actions;
        self
    }

    fn mean(sum: f64, count: usize) -> f64 {
        if count == 0 {
            0.0
        } else {
            sum / count as f64
        }
    }

    fn finish(self, benchmark_size: usize) -> CorpusSummary {
        CorpusSummary {
            total_tasks: benchmark_size,
            evaluated_tasks: self.produced,
            total_exact_match_tasks: self.exact_match,
            exact_match_percentage: ratio(self.exact_match, benchmark_size),
            total_tasks_completed: self.completed,
            task_completion_percentage: ratio(self.completed, benchmark_size),
            total_achieved_tasks: self.achieved,
            achieved_tasks_percentage: ratio(self.achieved, benchmark_size),
            total_not_done_but_end: self.not_done_but_end,
            average_prefix_match: Self::mean(self.prefix_sum, self.produced),
            total_correct_actions: self.correct_actions,
            total_actions: self.total_actions,
            macro_average_precision: Self::mean(self.precision_sum, self.produced),
            micro_average_precision: ratio(self.correct_actions, self.total_actions),
        }
    }
}

/// Reduce task results into a summary over a benchmark of `benchmark_size`.
///
/// Missing tasks are zero-credit against `benchmark_size`; the denominator is
/// never shrunk to the number of results.
pub fn aggregate<'a, I>(results: I, benchmark_size: usize) -> CorpusSummary
where
    I: IntoIterator<Item = &'a TaskResult>,
{
    let tally = results.into_iter().fold(Tally::default(), Tally::absorb);
    if tally.produced > benchmark_size {
        warn!(
            produced = tally.produced,
            benchmark_size,
            "more task results than the configured benchmark size"
        );
    }
    tally.finish(benchmark_size)
}
