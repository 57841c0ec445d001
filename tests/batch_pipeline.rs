//! Orchestration checks: pairs skip on missing inputs, fail one at a
//! time on broken inputs, and the batch always runs to the end. Nothing
//! here renders an actual figure, so the tests need no work directory
//! beyond a [tempfile::tempdir].

use std::path::PathBuf;

use StatPlots::{
    batch::{process_anova, process_grubbs, process_wilcoxon, run_batch, BatchSummary, PairOutcome},
    errors::VizError,
    report::model::{GrubbsResult, WilcoxonResult},
    report::writer,
};

/// Report driven pairs walked by one batch run: ANOVA, three Student
/// variants, Shapiro-Wilk, Wilcoxon, Grubbs, two Weibull fits, the
/// confidence intervals and two percentile tables.
const REPORT_PAIRS: usize = 12;

fn exact_wilcoxon() -> WilcoxonResult {
    return WilcoxonResult {
        alpha: 0.05,
        w_statistic: 21.0,
        u_statistic: Some(6.0),
        z_statistic: None,
        mean_w: None,
        std_w: None,
        critical_value: None,
        p_value: Some(0.1095),
        reject_null: Some(false),
        n1: Some(5),
        n2: Some(5),
        num_ties: None,
        use_normal_approx: false,
    };
}

#[test]
fn an_empty_work_directory_skips_every_pair() {
    let dir: tempfile::TempDir = tempfile::tempdir().expect("temp dir");

    let summary: BatchSummary = run_batch().base_dir(dir.path()).gallery(false).call();

    assert_eq!(
        summary,
        BatchSummary {
            rendered: 0,
            skipped: REPORT_PAIRS,
            failed: 0,
        }
    );
}

#[test]
fn a_malformed_report_fails_only_its_own_pair() {
    let dir: tempfile::TempDir = tempfile::tempdir().expect("temp dir");
    let report: PathBuf = dir.path().join("output/anova_result.txt");
    std::fs::create_dir_all(report.parent().expect("has a parent")).expect("mkdir");
    std::fs::write(&report, "в этом файле нет ничего похожего на отчёт\n").expect("write fixture");

    let summary: BatchSummary = run_batch().base_dir(dir.path()).gallery(false).call();

    assert_eq!(
        summary,
        BatchSummary {
            rendered: 0,
            skipped: REPORT_PAIRS - 1,
            failed: 1,
        }
    );
}

#[test]
fn a_missing_report_is_a_skip_not_an_error() {
    let dir: tempfile::TempDir = tempfile::tempdir().expect("temp dir");
    let report: PathBuf = dir.path().join("no_such_report.txt");
    let output: PathBuf = dir.path().join("figure.png");

    let outcome = process_anova(&report, &output).expect("a missing report is not a failure");

    assert_eq!(outcome, PairOutcome::Skipped);
    assert!(!output.exists());
}

#[test]
fn an_exact_distribution_wilcoxon_report_never_reaches_the_renderer() {
    let dir: tempfile::TempDir = tempfile::tempdir().expect("temp dir");
    let report: PathBuf = dir.path().join("wilcoxon.txt");
    let output: PathBuf = dir.path().join("figure.png");
    std::fs::write(&report, writer::write_wilcoxon(&exact_wilcoxon())).expect("write fixture");

    let outcome =
        process_wilcoxon(&report, &[], &output).expect("the exact method is a skip, not an error");

    assert_eq!(outcome, PairOutcome::Skipped);
    assert!(!output.exists());
}

#[test]
fn a_grubbs_report_with_too_small_a_sample_fails_its_pair() {
    let dir: tempfile::TempDir = tempfile::tempdir().expect("temp dir");
    let report: PathBuf = dir.path().join("grubbs.txt");
    let output: PathBuf = dir.path().join("figure.png");
    let tiny: GrubbsResult = GrubbsResult {
        alpha: 0.05,
        g_statistic: 0.7071,
        critical_value: None,
        observations: vec![9.8, 10.2],
        outliers: Vec::new(),
        conclusion: None,
    };
    std::fs::write(&report, writer::write_grubbs(&tiny)).expect("write fixture");

    let error: VizError =
        process_grubbs(&report, &output).expect_err("two observations are not enough");

    match error {
        VizError::InsufficientData { what, got, min } => {
            assert_eq!(what, "observations");
            assert_eq!(got, 2);
            assert_eq!(min, 3);
        }
        other => panic!("expected an insufficient data error, got {:?}", other),
    }
    assert!(!output.exists());
}
