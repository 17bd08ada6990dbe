//! Scalar step-level measures over an aligned correctness sequence.

/// Length of the maximal leading run of `true` values.
pub fn leading_correct(correctness: &[bool]) -> usize {
    correctness.iter().take_while(|&&ok| ok).count()
}

/// Step-level measures for one aligned trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepMetrics {
    pub correct_actions: usize,
    pub total_actions: usize,
    /// `correct_actions / total_actions`, 0.0 for an empty sequence.
    pub precision: f64,
    /// Actions completed before the first error.
    pub leading_correct: usize,
    /// `leading_correct / total_actions`, 0.0 for an empty sequence.
    pub prefix_complete: f64,
    /// Every step correct. Vacuously false when empty.
    pub all_correct: bool,
}

impl StepMetrics {
    pub fn from_correctness(correctness: &[bool]) -> Self {
        let total_actions = correctness.len();
        let correct_actions = correctness.iter().filter(|&&ok| ok).count();
        let leading = leading_correct(correctness);

        Self {
            correct_actions,
            total_actions,
            precision: ratio(correct_actions, total_actions),
            leading_correct: leading,
            prefix_complete: ratio(leading, total_actions),
            all_correct: total_actions > 0 && correct_actions == total_actions,
        }
    }
}

/// `numerator / denominator`, or 0.0 when the denominator is zero.
pub fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
