//! # trajeval-compare
//!
//! Side-by-side evaluation of several methods over one groundtruth.
//!
//! [`compare_methods`] runs the evaluator once per method against a shared
//! groundtruth and benchmark size and returns one row per method in the
//! order given. [`app_breakdown`] splits a single method's results by
//! application.
//!
//! ```rust,ignore
//! use trajeval_compare::{compare_methods, MethodInput};
//!
//! let comparison = compare_methods(&settings, &groundtruth, &[
//!     MethodInput::new("guardian", &guardian),
//!     MethodInput::new("baseline", &baseline),
//! ])?;
//! println!("{}", comparison.render_table());
//! ```

pub mod breakdown;
pub mod compare;
mod table;

pub use breakdown::{app_breakdown, render_breakdown, AppBreakdown, UNKNOWN_APP};
pub use compare::{compare_methods, Comparison, MethodInput, MethodOutcome, MethodRow};
pub use table::percent;

#[cfg(test)]
mod tests {
    use trajeval_contracts::{
        error::{TrajevalError, TrajevalResult},
        record::AnnotationSet,
        result::{ResultSource, TaskResult},
    };
    use trajeval_core::{traits::AnnotationSource, EvaluationSettings};
    use trajeval_sources::{InMemoryAnnotationSource, InMemoryGroundTruthSource};

    use super::*;

    // ── Helpers ───────────────────────────────────────────────────────────────

    struct BrokenSource;

    impl AnnotationSource for BrokenSource {
        fn name(&self) -> &str {
            "broken"
        }

        fn load_annotations(&self) -> TrajevalResult<AnnotationSet> {
            Err(TrajevalError::SourceUnavailable {
                source_name: "broken".to_string(),
                reason: "directory missing".to_string(),
            })
        }
    }

    fn groundtruth() -> InMemoryGroundTruthSource {
        InMemoryGroundTruthSource::new("gt")
            .with_reference("t-1", &["- ACTION 1: tap", "- ACTION 2: type"])
            .with_reference("t-2", &["- ACTION 1: swipe"])
    }

    fn result(task_id: &str, app: Option<&str>, precision: f64, achieved: bool, exact: bool) -> TaskResult {
        let mut row = TaskResult::zero_credit(task_id, ResultSource::Annotated);
        row.app = app.map(str::to_string);
        row.precision = precision;
        row.task_achieved = achieved;
        row.task_completed = achieved;
        row.exact_match = exact;
        row
    }

    // ── compare_methods ───────────────────────────────────────────────────────

    #[test]
    fn rows_follow_method_order() {
        let strong = InMemoryAnnotationSource::new("strong")
            .with_annotation("t-1", &["tap", "type"], &[true, true], true)
            .with_annotation("t-2", &["swipe"], &[true], true);
        let weak = InMemoryAnnotationSource::new("weak").with_annotation("t-1", &["tap", "back"], &[true, false], false);

        let comparison = compare_methods(
            &EvaluationSettings::new(2),
            &groundtruth(),
            &[MethodInput::new("weak", &weak), MethodInput::new("strong", &strong)],
        )
        .unwrap();

        let names: Vec<&str> = comparison.rows.iter().map(|row| row.name.as_str()).collect();
        assert_eq!(names, vec!["weak", "strong"]);

        let strong = comparison.row("strong").unwrap().summary().unwrap();
        assert_eq!(strong.total_exact_match_tasks, 2);
        assert_eq!(strong.exact_match_percentage, 1.0);

        let weak = comparison.row("weak").unwrap().summary().unwrap();
        assert_eq!(weak.total_exact_match_tasks, 0);
        assert_eq!(weak.total_tasks, 2);
    }

    #[test]
    fn failed_method_does_not_abort_others() {
        let good = InMemoryAnnotationSource::new("good").with_annotation("t-2", &["swipe"], &[true], true);

        let comparison = compare_methods(
            &EvaluationSettings::new(2),
            &groundtruth(),
            &[MethodInput::new("broken", &BrokenSource), MethodInput::new("good", &good)],
        )
        .unwrap();

        let broken = comparison.row("broken").unwrap();
        assert!(broken.summary().is_none());
        match &broken.outcome {
            MethodOutcome::Failed { reason } => assert!(reason.contains("directory missing")),
            other => panic!("expected failure, got {other:?}"),
        }
        assert!(comparison.row("good").unwrap().summary().is_some());

        let table = comparison.render_table();
        assert!(table.contains("FAILED"));
        assert!(table.contains("good"));
    }

    #[test]
    fn table_shows_one_decimal_percentages() {
        let method = InMemoryAnnotationSource::new("m").with_annotation("t-2", &["swipe"], &[true], true);

        let comparison = compare_methods(
            &EvaluationSettings::new(3),
            &groundtruth(),
            &[MethodInput::new("m", &method)],
        )
        .unwrap();

        // One exact match out of N = 3.
        let table = comparison.render_table();
        assert!(table.contains("33.3"), "{table}");
        assert!(table.contains("2/3"), "{table}");
    }

    // ── app_breakdown ─────────────────────────────────────────────────────────

    #[test]
    fn breakdown_groups_and_sorts_by_app() {
        let results = vec![
            result("t-1", Some("Notes"), 1.0, true, true),
            result("t-2", Some("Calendar"), 0.5, true, false),
            result("t-3", None, 0.0, false, false),
            result("t-4", Some("Calendar"), 0.0, false, false),
        ];

        let breakdown = app_breakdown(&results);
        let apps: Vec<&str> = breakdown.iter().map(|b| b.app.as_str()).collect();
        assert_eq!(apps, vec!["Calendar", "Notes", UNKNOWN_APP]);

        let calendar = &breakdown[0];
        assert_eq!(calendar.tasks, 2);
        assert_eq!(calendar.achieved, 1);
        assert_eq!(calendar.completed, 1);
        assert_eq!(calendar.exact_match, 0);
        assert!((calendar.macro_precision - 0.25).abs() < 1e-12);

        assert_eq!(breakdown[1].exact_match, 1);
        assert_eq!(breakdown[2].tasks, 1);
    }

    #[test]
    fn empty_results_have_empty_breakdown() {
        assert!(app_breakdown(&[]).is_empty());
        let rendered = render_breakdown(&[]);
        assert_eq!(rendered.lines().count(), 2);
    }
}
