//! Trajectory alignment against the groundtruth length.
//!
//! Once a task has reached its correct end state, anything the agent recorded
//! past the groundtruth length is continued exploration and is cut off.
//! A task that never reached the end state is judged on everything it did.

use trajeval_contracts::record::ActionSequence;

/// Prefix that marks a groundtruth line as an action line.
pub const DEFAULT_ACTION_MARKER: &str = "- ACTION";

/// Count the reference lines that start with `marker` (after trimming).
pub fn groundtruth_length(reference: &ActionSequence, marker: &str) -> usize {
    reference
        .iter()
        .filter(|line| line.trim().starts_with(marker))
        .count()
}

/// A candidate trajectory after alignment. Borrowed from the input record.
///
/// `actions` is empty when the record carried verdicts without candidate
/// text; otherwise it has the same length as `correctness`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignedTrajectory<'a> {
    pub actions: &'a [String],
    pub correctness: &'a [bool],
}

impl AlignedTrajectory<'_> {
    pub fn len(&self) -> usize {
        self.correctness.len()
    }

    pub fn is_empty(&self) -> bool {
        self.correctness.is_empty()
    }
}

/// Align a candidate to its reference.
///
/// - not `achieved`, or `groundtruth_len == 0`: both sequences unmodified.
/// - `achieved`: both truncated to their first `groundtruth_len` entries.
///   Shorter candidates are never padded.
pub fn align<'a>(
    candidate: &'a ActionSequence,
    correctness: &'a [bool],
    groundtruth_len: usize,
    achieved: bool,
) -> AlignedTrajectory<'a> {
    if !achieved || groundtruth_len == 0 {
        return AlignedTrajectory {
            actions: candidate.prefix(candidate.len()),
            correctness,
        };
    }

    AlignedTrajectory {
        actions: candidate.prefix(groundtruth_len),
        correctness: &correctness[..groundtruth_len.min(correctness.len())],
    }
}
