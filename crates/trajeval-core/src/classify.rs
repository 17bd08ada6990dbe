//! Task-level outcome classification.
//!
//! Outcomes depend only on the aligned correctness sequence and the
//! end-state flag. The final element is always a real scored action.

use serde::{Deserialize, Serialize};

/// Boolean task outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskOutcome {
    /// Execution ended in the correct target state.
    pub task_achieved: bool,
    /// Achieved, and the last recorded action was itself correct.
    pub task_completed: bool,
    /// Achieved, and every recorded action was correct.
    pub exact_match: bool,
    /// Last recorded action correct, yet not completed.
    pub not_done_but_end: bool,
}

/// Classify one aligned trajectory.
pub fn classify(correctness: &[bool], end_correctly: bool) -> TaskOutcome {
    let last_correct = correctness.last().copied().unwrap_or(false);
    let all_correct = !correctness.is_empty() && correctness.iter().all(|&ok| ok);
    let task_completed = end_correctly && last_correct;

    TaskOutcome {
        task_achieved: end_correctly,
        task_completed,
        exact_match: end_correctly && all_correct,
        not_done_but_end: last_correct && !task_completed,
    }
}
