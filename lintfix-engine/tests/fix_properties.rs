//! End-to-end properties of select -> apply -> reconcile.

use lintfix_catalog::{
    Catalog, FixDescriptor, FixStrategy, RegexVariableEvaluator, RuleCatalog, Transform, Variables,
};
use lintfix_engine::{FixApplier, Reconciler, SelectOptions, SourceLines, select_fixable};
use lintfix_types::{DiagnosticReport, FileReport, Severity, Violation};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::collections::BTreeMap;

const FILE: &str = "src/Main.groovy";

fn single_file_report(violations: Vec<Violation>) -> DiagnosticReport {
    let mut files = BTreeMap::new();
    files.insert(FILE.to_string(), FileReport::new(violations));
    DiagnosticReport::from_files(files)
}

/// Runs the three stages against an in-memory source, returning the new report and text.
fn run(report: &DiagnosticReport, catalog: &dyn RuleCatalog, source: &str) -> (DiagnosticReport, String) {
    let mut working = report.clone();
    let selected = select_fixable(&working, &SelectOptions::default(), catalog);
    let applier = FixApplier::new(&RegexVariableEvaluator, true);
    let mut reconciler = Reconciler::new();
    let mut text = source.to_string();

    for (path, entries) in &selected {
        let src = SourceLines::parse(source);
        let applied = applier.apply(path, entries, src.lines.clone());
        reconciler.record(&mut working, path, &applied.changed);
        text = SourceLines::from_lines(applied.lines, src.line_ending).join();
    }
    reconciler.finish(&mut working);
    (working, text)
}

fn upper_file(lines: &[String], _vars: &Variables) -> anyhow::Result<Vec<String>> {
    Ok(lines.iter().map(|l| l.to_uppercase()).collect())
}

#[test]
fn def_scenario_fixes_line_and_counts_error() {
    let report = single_file_report(vec![Violation::new(
        "1",
        "UnnecessaryDef",
        Some(1),
        "def is unnecessary",
        Severity::Error,
    )]);
    let catalog = Catalog::empty().with_rule(
        "UnnecessaryDef",
        FixDescriptor::line(1, FixStrategy::replace("  def  x", "def x")),
    );

    let (out, text) = run(&report, &catalog, "  def  x = 1");
    assert_eq!(text, "def x = 1");
    assert!(out.violation(FILE, "1").unwrap().fixed);
    assert_eq!(out.summary.fixed.error, 1);
    assert_eq!(out.summary.remaining.error, 0);
    // The input report is untouched.
    assert!(!report.violation(FILE, "1").unwrap().fixed);
}

#[test]
fn priority_one_runs_before_priority_five() {
    let report = single_file_report(vec![
        Violation::new("late", "Late", Some(1), "m", Severity::Warning),
        Violation::new("early", "Early", Some(1), "m", Severity::Warning),
    ]);
    // `Late` can only match after `Early` has rewritten the line.
    let catalog = Catalog::empty()
        .with_rule("Early", FixDescriptor::line(1, FixStrategy::replace("foo", "bar")))
        .with_rule("Late", FixDescriptor::line(5, FixStrategy::replace("bar", "baz")));

    let (out, text) = run(&report, &catalog, "foo");
    assert_eq!(text, "baz");
    assert!(out.violation(FILE, "early").unwrap().fixed);
    assert!(out.violation(FILE, "late").unwrap().fixed);
}

#[test]
fn triggered_rule_is_applied_without_its_own_violation() {
    let report = single_file_report(vec![Violation::new(
        "9",
        "A",
        Some(1),
        "m",
        Severity::Info,
    )]);
    let catalog = Catalog::empty()
        .with_rule(
            "A",
            FixDescriptor::line(1, FixStrategy::replace("x;", "x ")).with_triggers(["B"]),
        )
        .with_rule("B", FixDescriptor::line(2, FixStrategy::replace("x ", "x")));

    let (out, text) = run(&report, &catalog, "x;");
    assert_eq!(text, "x");
    assert_eq!(out.summary.fixed_error_ids, vec!["9", "9_triggered"]);
    assert_eq!(out.summary.fixed_errors_number, 2);
    assert_eq!(out.summary.fixed.info, 1);
}

#[test]
fn builtin_semicolon_trigger_cleans_trailing_space() {
    let report = single_file_report(vec![Violation::new(
        "1",
        "UnnecessarySemicolon",
        Some(2),
        "Semicolons as line endings can be removed safely",
        Severity::Warning,
    )]);
    let (out, text) = run(&report, &Catalog::builtin(), "a\nx = 1 ;\n");
    assert_eq!(text, "a\nx = 1\n");
    assert_eq!(out.summary.fixed.warning, 1);
}

#[test]
fn builtin_gstring_template_uses_message_variable() {
    let report = single_file_report(vec![Violation::new(
        "1",
        "UnnecessaryGString",
        Some(1),
        "The String 'hello' can be wrapped in single quotes instead of double quotes",
        Severity::Info,
    )]);
    let (_, text) = run(&report, &Catalog::builtin(), "println \"hello\"\r\n");
    assert_eq!(text, "println 'hello'\r\n");
}

#[test]
fn file_scope_rule_runs_once_for_many_violations() {
    let report = single_file_report(vec![
        Violation::new("1", "Upper", Some(1), "m", Severity::Error),
        Violation::new("2", "Upper", Some(2), "m", Severity::Error),
        Violation::new("3", "Upper", Some(3), "m", Severity::Error),
    ]);
    let catalog = Catalog::empty().with_rule(
        "Upper",
        FixDescriptor::file(1, FixStrategy::Transform(Transform::file(upper_file))),
    );

    let selected = select_fixable(&report, &SelectOptions::default(), &catalog);
    assert_eq!(selected[FILE].len(), 1);

    let (out, text) = run(&report, &catalog, "a\nb\nc");
    assert_eq!(text, "A\nB\nC");
    assert_eq!(out.summary.fixed.error, 1);
    assert_eq!(out.summary.remaining.error, 2);
}

fn arb_violations() -> impl Strategy<Value = Vec<Violation>> {
    prop::collection::vec(
        (
            prop::sample::select(vec!["TrailingWhitespace", "NoTabCharacter", "ConsecutiveBlankLines", "UnnecessarySemicolon"]),
            1u64..6,
            prop::sample::select(vec![Severity::Error, Severity::Warning, Severity::Info]),
        ),
        0..12,
    )
    .prop_map(|items| {
        items
            .into_iter()
            .enumerate()
            .map(|(i, (rule, line, sev))| Violation::new(i.to_string(), rule, Some(line), "m", sev))
            .collect()
    })
}

fn arb_source() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::string::string_regex(r"[a-z \t;]{0,8}").unwrap(),
        1..6,
    )
    .prop_map(|lines| lines.join("\n"))
}

proptest! {
    /// An empty catalog never marks anything fixed nor changes the text.
    #[test]
    fn empty_catalog_changes_nothing(violations in arb_violations(), source in arb_source()) {
        let report = single_file_report(violations);
        let (out, text) = run(&report, &Catalog::empty(), &source);
        prop_assert_eq!(text, source);
        prop_assert_eq!(out.summary.fixed.total(), 0);
        prop_assert!(out.files[FILE].violations.iter().all(|v| !v.fixed));
    }

    /// A second run never un-fixes a violation fixed by the first.
    #[test]
    fn second_run_keeps_fixed_flags(violations in arb_violations(), source in arb_source()) {
        let report = single_file_report(violations);
        let catalog = Catalog::builtin();
        let (first, first_text) = run(&report, &catalog, &source);
        let (second, _) = run(&first, &catalog, &first_text);

        for (a, b) in first.files[FILE].violations.iter().zip(&second.files[FILE].violations) {
            prop_assert!(!a.fixed || b.fixed, "violation {} was un-fixed", a.id);
        }
        prop_assert!(second.summary.fixed.total() >= first.summary.fixed.total());
    }

    /// Selection is stable-sorted by priority and keeps one entry per non-unitary file rule.
    #[test]
    fn selection_is_sorted_and_deduplicated(violations in arb_violations()) {
        let report = single_file_report(violations);
        let selected = select_fixable(&report, &SelectOptions::default(), &Catalog::builtin());
        let entries = &selected[FILE];

        let priorities: Vec<i32> = entries.iter().map(|e| e.descriptor.priority).collect();
        let mut sorted = priorities.clone();
        sorted.sort();
        prop_assert_eq!(priorities, sorted);

        for rule in ["NoTabCharacter", "ConsecutiveBlankLines"] {
            prop_assert!(entries.iter().filter(|e| e.rule_name == rule).count() <= 1);
        }
    }
}
