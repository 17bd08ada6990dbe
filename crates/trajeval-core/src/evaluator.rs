//! The evaluator: the deterministic per-task pipeline and corpus fold.
//!
//! The evaluator enforces the evaluation order for every task:
//!
//!   Load sources → Align → Step metrics + Classify → TaskResult → Aggregate
//!
//! Sources are read exactly once, before any task is scored. A task whose
//! record is malformed is isolated: it becomes a zero-credit row plus a
//! reported `TaskFailure`, and the rest of the corpus is scored normally.
//! Only a source that cannot be read at all fails the run.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info, warn};

use trajeval_contracts::{
    error::{TrajevalError, TrajevalResult},
    record::{AnnotationSet, EvalRecord, GroundTruthRecord, RecordRejection},
    result::{ResultSource, TaskFailure, TaskResult},
    summary::EvaluationReport,
};

use crate::{
    aggregate::aggregate,
    align::{align, groundtruth_length, DEFAULT_ACTION_MARKER},
    classify::classify,
    metrics::StepMetrics,
    traits::{AnnotationSource, GroundTruthSource},
};

/// Engine-facing settings, fixed before any task is evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationSettings {
    /// The fixed benchmark size N.
    pub benchmark_size: usize,
    /// Prefix that marks a groundtruth line as an action line.
    pub action_marker: String,
}

impl EvaluationSettings {
    /// Settings for a benchmark of `benchmark_size` tasks with the default marker.
    pub fn new(benchmark_size: usize) -> Self {
        Self {
            benchmark_size,
            action_marker: DEFAULT_ACTION_MARKER.to_string(),
        }
    }

    pub fn with_action_marker(mut self, marker: impl Into<String>) -> Self {
        self.action_marker = marker.into();
        self
    }
}

/// What the annotation side supplies for one task.
#[derive(Debug, Clone, Copy)]
pub enum TaskInput<'a> {
    /// A full annotation record.
    Annotated(&'a EvalRecord),
    /// Only a pre-computed per-step verdict sequence.
    Verdicts(&'a [bool]),
    /// Nothing at all.
    Missing,
}

/// Scores one method's annotated trajectories against the groundtruth.
///
/// Construct one evaluator per benchmark configuration and reuse it across
/// methods; it holds no state between calls.
#[derive(Debug, Clone)]
pub struct Evaluator {
    settings: EvaluationSettings,
}

impl Evaluator {
    pub fn new(settings: EvaluationSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &EvaluationSettings {
        &self.settings
    }

    /// Load both sources and evaluate the whole corpus.
    ///
    /// # Errors
    ///
    /// Returns `Err` only when a source fails to load as a whole. Per-task
    /// problems are reported in `EvaluationReport::failures`.
    pub fn evaluate(
        &self,
        annotations: &dyn AnnotationSource,
        groundtruth: &dyn GroundTruthSource,
    ) -> TrajevalResult<EvaluationReport> {
        let annotation_set = annotations.load_annotations()?;
        let references = groundtruth.load_groundtruth()?;

        info!(
            annotations = %annotations.name(),
            groundtruth = %groundtruth.name(),
            annotated = annotation_set.records.len(),
            fallback = annotation_set.fallback_verdicts.len(),
            rejected = annotation_set.rejected.len(),
            references = references.len(),
            "sources loaded"
        );

        Ok(self.evaluate_loaded(&annotation_set, &references))
    }

    /// Evaluate already-materialized inputs.
    ///
    /// The task universe is the union of every task id seen in either input,
    /// visited in sorted order, so the output is identical across runs.
    pub fn evaluate_loaded(
        &self,
        annotations: &AnnotationSet,
        references: &[GroundTruthRecord],
    ) -> EvaluationReport {
        let mut by_task: BTreeMap<&str, &GroundTruthRecord> = BTreeMap::new();
        for reference in references {
            if by_task.insert(reference.task_id.as_str(), reference).is_some() {
                warn!(task_id = %reference.task_id, "duplicate groundtruth entry; keeping the last one");
            }
        }

        // Every rejection is reported, whatever input the task is scored from.
        let mut rejected: BTreeMap<&str, Vec<&RecordRejection>> = BTreeMap::new();
        let mut failures = Vec::new();
        for rejection in &annotations.rejected {
            let key = match rejection.task_id.as_deref() {
                Some(task_id) => {
                    rejected.entry(task_id).or_default().push(rejection);
                    task_id
                }
                None => {
                    warn!(origin = %rejection.origin, reason = %rejection.reason, "rejected record with no task id");
                    rejection.origin.as_str()
                }
            };
            failures.push(TaskFailure {
                task_id: key.to_string(),
                reason: format!("{}: {}", rejection.origin, rejection.reason),
            });
        }

        let universe: BTreeSet<&str> = by_task
            .keys()
            .copied()
            .chain(annotations.records.keys().map(String::as_str))
            .chain(annotations.fallback_verdicts.keys().map(String::as_str))
            .chain(rejected.keys().copied())
            .collect();

        let mut results = Vec::with_capacity(universe.len());
        for task_id in universe {
            let reference = by_task.get(task_id).copied();
            let rejections = rejected.get(task_id).map(Vec::as_slice).unwrap_or_default();

            // A usable record wins. Otherwise a malformed record outranks
            // fallback verdicts, matching a record that fails `is_well_formed`.
            let input = match annotations.records.get(task_id) {
                Some(record) => {
                    if !rejections.is_empty() {
                        warn!(task_id = %task_id, rejected = rejections.len(), "scoring the usable record; rejected duplicates reported");
                    }
                    TaskInput::Annotated(record)
                }
                None if !rejections.is_empty() => {
                    warn!(task_id = %task_id, rejected = rejections.len(), "annotation rejected, scoring as zero credit");
                    results.push(self.zero_credit(task_id, reference, ResultSource::Malformed));
                    continue;
                }
                None => match annotations.fallback_verdicts.get(task_id) {
                    Some(verdicts) => TaskInput::Verdicts(verdicts),
                    None => TaskInput::Missing,
                },
            };

            match self.evaluate_task(task_id, input, reference) {
                Ok(result) => results.push(result),
                Err(err) => {
                    warn!(task_id = %task_id, error = %err, "task evaluation failed, scoring as zero credit");
                    failures.push(TaskFailure {
                        task_id: task_id.to_string(),
                        reason: err.to_string(),
                    });
                    results.push(self.zero_credit(task_id, reference, ResultSource::Malformed));
                }
            }
        }

        failures.sort_by(|a, b| a.task_id.cmp(&b.task_id));
        let summary = aggregate(&results, self.settings.benchmark_size);

        info!(
            evaluated = summary.evaluated_tasks,
            benchmark_size = summary.total_tasks,
            failures = failures.len(),
            "corpus evaluation complete"
        );

        EvaluationReport {
            results,
            summary,
            failures,
        }
    }

    /// Score a single task.
    ///
    /// # Pipeline
    ///
    /// 1. Check the record is well formed (one verdict per candidate action)
    /// 2. Compute the groundtruth length from marker lines (0 when missing)
    /// 3. Align: trim to the groundtruth length only if the end state was reached
    /// 4. Derive step metrics and task outcomes from the aligned sequence
    ///
    /// # Errors
    ///
    /// Returns `MalformedRecord` when candidate and verdict lengths disagree.
    pub fn evaluate_task(
        &self,
        task_id: &str,
        input: TaskInput<'_>,
        reference: Option<&GroundTruthRecord>,
    ) -> TrajevalResult<TaskResult> {
        let record = match input {
            TaskInput::Annotated(record) => record,
            TaskInput::Verdicts(verdicts) => {
                debug!(task_id = %task_id, steps = verdicts.len(), "scoring from fallback verdicts");
                return Ok(self.score(
                    task_id,
                    None,
                    &EvalRecord {
                        task_id: task_id.to_string(),
                        app: None,
                        candidate: Default::default(),
                        correctness: verdicts.to_vec(),
                        end_correctly: false,
                    },
                    reference,
                    ResultSource::Verdicts,
                ));
            }
            TaskInput::Missing => {
                debug!(task_id = %task_id, "no annotation, scoring as zero credit");
                return Ok(self.zero_credit(task_id, reference, ResultSource::Missing));
            }
        };

        if !record.is_well_formed() {
            return Err(TrajevalError::MalformedRecord {
                task_id: task_id.to_string(),
                reason: format!(
                    "{} candidate actions but {} verdicts",
                    record.candidate.len(),
                    record.correctness.len()
                ),
            });
        }

        if record.end_correctly && reference.is_none() {
            warn!(task_id = %task_id, "achieved task has no groundtruth; skipping trim");
        }

        Ok(self.score(task_id, record.app.clone(), record, reference, ResultSource::Annotated))
    }

    fn score(
        &self,
        task_id: &str,
        app: Option<String>,
        record: &EvalRecord,
        reference: Option<&GroundTruthRecord>,
        source: ResultSource,
    ) -> TaskResult {
        let gt_len = self.reference_length(reference);
        let aligned = align(&record.candidate, &record.correctness, gt_len, record.end_correctly);
        let metrics = StepMetrics::from_correctness(aligned.correctness);
        let outcome = classify(aligned.correctness, record.end_correctly);

        debug!(
            task_id = %task_id,
            original = record.correctness.len(),
            groundtruth = gt_len,
            aligned = aligned.len(),
            precision = metrics.precision,
            completed = outcome.task_completed,
            "task scored"
        );

        TaskResult {
            task_id: task_id.to_string(),
            app: app.or_else(|| reference.and_then(|r| r.app.clone())),
            source,
            original_actions: record.correctness.len(),
            groundtruth_actions: gt_len,
            correct_actions: metrics.correct_actions,
            total_actions: metrics.total_actions,
            precision: metrics.precision,
            prefix_complete: metrics.prefix_complete,
            all_correct: metrics.all_correct,
            end_correctly: record.end_correctly,
            task_achieved: outcome.task_achieved,
            task_completed: outcome.task_completed,
            exact_match: outcome.exact_match,
            not_done_but_end: outcome.not_done_but_end,
            actions: aligned.actions.to_vec(),
            correctness: aligned.correctness.to_vec(),
        }
    }

    fn zero_credit(
        &self,
        task_id: &str,
        reference: Option<&GroundTruthRecord>,
        source: ResultSource,
    ) -> TaskResult {
        let mut row = TaskResult::zero_credit(task_id, source);
        row.app = reference.and_then(|r| r.app.clone());
        row.groundtruth_actions = self.reference_length(reference);
        row
    }

    fn reference_length(&self, reference: Option<&GroundTruthRecord>) -> usize {
        reference
            .map(|r| groundtruth_length(&r.reference, &self.settings.action_marker))
            .unwrap_or(0)
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use trajeval_contracts::{
        error::{TrajevalError, TrajevalResult},
        record::{ActionSequence, AnnotationSet, EvalRecord, GroundTruthRecord, RecordRejection},
        result::ResultSource,
    };

    use crate::traits::{AnnotationSource, GroundTruthSource};

    use super::{EvaluationSettings, Evaluator, TaskInput};

    // ── Mock helpers ─────────────────────────────────────────────────────────

    fn gt(task_id: &str, actions: usize) -> GroundTruthRecord {
        let mut lines = vec![format!("Task {task_id}")];
        lines.extend((0..actions).map(|i| format!("- ACTION step {i}")));
        GroundTruthRecord {
            task_id: task_id.to_string(),
            app: Some("Clock".to_string()),
            reference: ActionSequence(lines),
        }
    }

    fn annotated(task_id: &str, evals: &[bool], end_correctly: bool) -> EvalRecord {
        EvalRecord {
            task_id: task_id.to_string(),
            app: None,
            candidate: ActionSequence::from_lines((0..evals.len()).map(|i| format!("-ACTION tap {i}"))),
            correctness: evals.to_vec(),
            end_correctly,
        }
    }

    fn set(records: Vec<EvalRecord>) -> AnnotationSet {
        AnnotationSet {
            records: records.into_iter().map(|r| (r.task_id.clone(), r)).collect(),
            ..Default::default()
        }
    }

    struct FixedAnnotations(AnnotationSet);

    impl AnnotationSource for FixedAnnotations {
        fn name(&self) -> &str {
            "fixed"
        }

        fn load_annotations(&self) -> TrajevalResult<AnnotationSet> {
            Ok(self.0.clone())
        }
    }

    struct FixedGroundTruth(Vec<GroundTruthRecord>);

    impl GroundTruthSource for FixedGroundTruth {
        fn name(&self) -> &str {
            "fixed"
        }

        fn load_groundtruth(&self) -> TrajevalResult<Vec<GroundTruthRecord>> {
            Ok(self.0.clone())
        }
    }

    struct UnreadableGroundTruth;

    impl GroundTruthSource for UnreadableGroundTruth {
        fn name(&self) -> &str {
            "unreadable"
        }

        fn load_groundtruth(&self) -> TrajevalResult<Vec<GroundTruthRecord>> {
            Err(TrajevalError::SourceUnavailable {
                source_name: "unreadable".to_string(),
                reason: "permission denied".to_string(),
            })
        }
    }

    fn evaluator(n: usize) -> Evaluator {
        Evaluator::new(EvaluationSettings::new(n))
    }

    // ── Single-task scenarios ────────────────────────────────────────────────

    /// Achieved candidate with trailing exploration is trimmed to the
    /// groundtruth length and scored as an exact match.
    #[test]
    fn test_achieved_trailing_steps_are_trimmed() {
        let record = annotated("a", &[true, true, true, false, true], true);
        let reference = gt("a", 3);
        let r = evaluator(1)
            .evaluate_task("a", TaskInput::Annotated(&record), Some(&reference))
            .unwrap();

        assert_eq!(r.original_actions, 5);
        assert_eq!(r.groundtruth_actions, 3);
        assert_eq!(r.total_actions, 3);
        assert_eq!(r.precision, 1.0);
        assert!(r.all_correct);
        assert!(r.task_completed);
        assert!(r.exact_match);
        assert!(!r.not_done_but_end);
        assert_eq!(r.correctness, vec![true, true, true]);
        assert_eq!(r.actions, record.candidate.prefix(3));
    }

    /// A candidate that never reached the end state is scored untrimmed.
    #[test]
    fn test_not_achieved_is_untrimmed() {
        let record = annotated("b", &[true, false, true], false);
        let reference = gt("b", 2);
        let r = evaluator(1)
            .evaluate_task("b", TaskInput::Annotated(&record), Some(&reference))
            .unwrap();

        assert_eq!(r.total_actions, 3);
        assert!((r.precision - 2.0 / 3.0).abs() < 1e-9);
        assert!(!r.task_completed);
        assert!(r.not_done_but_end);
        assert!(!r.task_achieved);
    }

    #[test]
    fn test_empty_correctness_scores_zero() {
        let record = annotated("c", &[], true);
        let r = evaluator(1)
            .evaluate_task("c", TaskInput::Annotated(&record), None)
            .unwrap();

        assert_eq!(r.precision, 0.0);
        assert_eq!(r.prefix_complete, 0.0);
        assert!(!r.all_correct);
        assert!(!r.task_completed);
        assert!(r.task_achieved);
    }

    #[test]
    fn test_length_mismatch_is_malformed() {
        let mut record = annotated("d", &[true, true], true);
        record.candidate.0.push("-ACTION extra".to_string());
        let err = evaluator(1)
            .evaluate_task("d", TaskInput::Annotated(&record), None)
            .unwrap_err();

        match err {
            TrajevalError::MalformedRecord { task_id, reason } => {
                assert_eq!(task_id, "d");
                assert!(reason.contains("3 candidate actions"));
            }
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }

    #[test]
    fn test_fallback_verdicts_are_never_achieved() {
        let verdicts = [true, true, true];
        let reference = gt("e", 2);
        let r = evaluator(1)
            .evaluate_task("e", TaskInput::Verdicts(&verdicts), Some(&reference))
            .unwrap();

        assert_eq!(r.source, ResultSource::Verdicts);
        assert_eq!(r.total_actions, 3, "fallback verdicts are never trimmed");
        assert_eq!(r.precision, 1.0);
        assert!(!r.task_achieved);
        assert!(!r.task_completed);
        assert!(!r.exact_match);
        assert!(r.not_done_but_end);
    }

    #[test]
    fn test_missing_annotation_is_zero_credit() {
        let reference = gt("f", 4);
        let r = evaluator(1)
            .evaluate_task("f", TaskInput::Missing, Some(&reference))
            .unwrap();

        assert_eq!(r.source, ResultSource::Missing);
        assert_eq!(r.groundtruth_actions, 4);
        assert_eq!(r.app.as_deref(), Some("Clock"));
        assert_eq!(r.precision, 0.0);
        assert!(!r.task_achieved);
    }

    #[test]
    fn test_custom_action_marker() {
        let reference = GroundTruthRecord {
            task_id: "g".to_string(),
            app: None,
            reference: ActionSequence::from_lines(["1. tap", "2. type", "context"]),
        };
        let record = annotated("g", &[true, true, false], true);
        let ev = Evaluator::new(EvaluationSettings::new(1).with_action_marker("1."));
        let r = ev
            .evaluate_task("g", TaskInput::Annotated(&record), Some(&reference))
            .unwrap();
        assert_eq!(r.groundtruth_actions, 1);
        assert_eq!(r.total_actions, 1);
    }

    // ── Corpus runs ──────────────────────────────────────────────────────────

    /// Missing tasks still count against N, while means use the produced rows.
    #[test]
    fn test_missing_tasks_keep_fixed_denominator() {
        let records: Vec<EvalRecord> = (0..100)
            .map(|i| annotated(&format!("t{i:03}"), &[true, true], i % 2 == 0))
            .collect();
        let refs: Vec<GroundTruthRecord> = (0..100).map(|i| gt(&format!("t{i:03}"), 2)).collect();

        let report = evaluator(150).evaluate_loaded(&set(records), &refs);
        let s = &report.summary;

        assert_eq!(s.total_tasks, 150);
        assert_eq!(s.evaluated_tasks, 100);
        assert_eq!(s.total_exact_match_tasks, 50);
        assert_eq!(s.exact_match_percentage, 50.0 / 150.0);
        assert_eq!(s.average_prefix_match, 1.0);
    }

    #[test]
    fn test_results_are_sorted_and_cover_union() {
        let records = vec![annotated("zeta", &[true], true), annotated("alpha", &[false], false)];
        let refs = vec![gt("mid", 1), gt("alpha", 1)];
        let report = evaluator(10).evaluate_loaded(&set(records), &refs);

        let ids: Vec<&str> = report.results.iter().map(|r| r.task_id.as_str()).collect();
        assert_eq!(ids, ["alpha", "mid", "zeta"]);
        assert_eq!(report.results[1].source, ResultSource::Missing);
    }

    #[test]
    fn test_malformed_record_is_isolated() {
        let mut bad = annotated("bad", &[true, false], true);
        bad.candidate.0.clear();
        bad.candidate.0.push("-ACTION only one".to_string());
        let records = vec![bad, annotated("good", &[true, true], true)];
        let refs = vec![gt("bad", 2), gt("good", 2)];

        let report = evaluator(2).evaluate_loaded(&set(records), &refs);

        assert_eq!(report.results.len(), 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].task_id, "bad");
        assert_eq!(report.results[0].source, ResultSource::Malformed);
        assert_eq!(report.results[0].groundtruth_actions, 2);
        assert!(report.results[1].exact_match);
        assert_eq!(report.summary.total_exact_match_tasks, 1);
    }

    #[test]
    fn test_source_rejections_become_failures() {
        let mut annotations = set(vec![]);
        annotations.rejected.push(RecordRejection {
            task_id: Some("broken".to_string()),
            origin: "evals/broken.json".to_string(),
            reason: "evals: expected array or string".to_string(),
        });
        annotations.rejected.push(RecordRejection {
            task_id: None,
            origin: "evals/garbage.json".to_string(),
            reason: "not JSON".to_string(),
        });

        let report = evaluator(5).evaluate_loaded(&annotations, &[]);

        assert_eq!(report.results.len(), 1);
        assert_eq!(report.results[0].source, ResultSource::Malformed);
        assert_eq!(report.failures.len(), 2);
        assert_eq!(report.failures[0].task_id, "broken");
        assert_eq!(report.failures[1].task_id, "evals/garbage.json");
    }

    fn rejection(task_id: &str, origin: &str) -> RecordRejection {
        RecordRejection {
            task_id: Some(task_id.to_string()),
            origin: origin.to_string(),
            reason: "\"evals\" is a required property".to_string(),
        }
    }

    /// A rejected record outranks fallback verdicts and is reported.
    #[test]
    fn test_rejected_record_with_fallback_is_zero_credit_and_reported() {
        let mut annotations = set(vec![]);
        annotations.rejected.push(rejection("x", "evals/x.json"));
        annotations.fallback_verdicts.insert("x".to_string(), vec![true, false]);

        let report = evaluator(1).evaluate_loaded(&annotations, &[gt("x", 2)]);

        assert_eq!(report.results[0].source, ResultSource::Malformed);
        assert_eq!(report.results[0].precision, 0.0);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].task_id, "x");
        assert!(report.failures[0].reason.contains("evals/x.json"));
    }

    /// A length mismatch with fallback verdicts gets the same treatment.
    #[test]
    fn test_mismatched_record_with_fallback_is_zero_credit_and_reported() {
        let mut bad = annotated("y", &[true, false], true);
        bad.candidate.0.push("-ACTION extra".to_string());
        let mut annotations = set(vec![bad]);
        annotations.fallback_verdicts.insert("y".to_string(), vec![true, true]);

        let report = evaluator(1).evaluate_loaded(&annotations, &[gt("y", 2)]);

        assert_eq!(report.results[0].source, ResultSource::Malformed);
        assert_eq!(report.results[0].precision, 0.0);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].task_id, "y");
    }

    #[test]
    fn test_every_rejection_is_reported() {
        let mut annotations = set(vec![annotated("a", &[true], true)]);
        annotations.rejected.push(rejection("a", "evals/b.json"));
        annotations.rejected.push(rejection("z", "evals/z1.json"));
        annotations.rejected.push(rejection("z", "evals/z2.json"));

        let report = evaluator(2).evaluate_loaded(&annotations, &[gt("a", 1)]);

        // The usable record for "a" is still scored.
        assert_eq!(report.results[0].source, ResultSource::Annotated);
        assert!(report.results[0].exact_match);
        assert_eq!(report.results[1].source, ResultSource::Malformed);

        let reported: Vec<(&str, bool)> = report
            .failures
            .iter()
            .map(|f| (f.task_id.as_str(), f.reason.contains("z1.json")))
            .collect();
        assert_eq!(reported, vec![("a", false), ("z", true), ("z", false)]);
    }

    #[test]
    fn test_fallback_used_only_without_annotation() {
        let mut annotations = set(vec![annotated("a", &[true], true)]);
        annotations.fallback_verdicts = BTreeMap::from([
            ("a".to_string(), vec![false, false]),
            ("b".to_string(), vec![true, false]),
        ]);

        let report = evaluator(2).evaluate_loaded(&annotations, &[gt("a", 1), gt("b", 2)]);

        assert_eq!(report.results[0].source, ResultSource::Annotated);
        assert_eq!(report.results[0].precision, 1.0);
        assert_eq!(report.results[1].source, ResultSource::Verdicts);
        assert_eq!(report.results[1].precision, 0.5);
    }

    #[test]
    fn test_evaluate_through_sources() {
        let annotations = FixedAnnotations(set(vec![
            annotated("x", &[true, true], true),
            annotated("y", &[false, false, false, false], false),
        ]));
        let groundtruth = FixedGroundTruth(vec![gt("x", 2), gt("y", 3)]);

        let report = evaluator(2).evaluate(&annotations, &groundtruth).unwrap();
        assert_eq!(report.summary.macro_average_precision, 0.5);
        assert_eq!(report.summary.micro_average_precision, 2.0 / 6.0);
    }

    #[test]
    fn test_unreadable_source_is_fatal() {
        let annotations = FixedAnnotations(AnnotationSet::default());
        let result = evaluator(2).evaluate(&annotations, &UnreadableGroundTruth);
        assert!(matches!(result, Err(TrajevalError::SourceUnavailable { .. })));
    }

    #[test]
    fn test_rerun_is_identical() {
        let records = vec![
            annotated("p", &[true, false, true, true], true),
            annotated("q", &[true, true], false),
        ];
        let refs = vec![gt("p", 3), gt("q", 2)];
        let ev = evaluator(4);
        let first = ev.evaluate_loaded(&set(records.clone()), &refs);
        let second = ev.evaluate_loaded(&set(records), &refs);
        assert_eq!(first, second);
    }
}
