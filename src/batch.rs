//! Batch orchestration: pick up the report files the computation engine
//! wrote, build every figure and save the PNGs next to them.
//!
//! The jobs are fixed tables of paths relative to an explicit base
//! directory; nothing mutates the working directory. Pairs are strictly
//! independent: a missing report is an `info` level skip, a parse or
//! render failure an `error`, and the batch always runs to the end.

use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::{
    distribution_trait::Distribution,
    distributions::{DistributionSpec, Normal::StdNormal},
    errors::VizError,
    plot::{
        compose::{
            compose_anova, compose_chi_squared_family, compose_confidence_intervals,
            compose_grubbs, compose_normal_family, compose_percentiles, compose_shapiro_wilk,
            compose_student, compose_t_family, compose_weibull, compose_wilcoxon,
        },
        figure::ComposedFigure,
        render::render_figure,
    },
    regions::CriticalRegion,
    report::{
        model::{
            AnovaResult, ConfidenceIntervalReport, GrubbsResult, PercentileTable,
            PercentileTableReport, ShapiroWilkResult, StudentTResult, TestKind,
            WeibullFitMethod, WeibullFitResult, WilcoxonResult,
        },
        parser,
    },
    samples::SampleData,
};

const ANOVA_REPORT: &str = "output/anova_result.txt";
const ANOVA_FIGURE: &str = "output/plot_anova_f_distribution.png";

const STUDENT_JOBS: [(&str, &str, &str); 3] = [
    (
        "output/student_test_equal_var.txt",
        "output/plot_student_equal_var.png",
        "t-критерий Стьюдента (равные дисперсии)",
    ),
    (
        "output/student_test_unequal_var.txt",
        "output/plot_student_unequal_var.png",
        "t-критерий Стьюдента (неравные дисперсии, Уэлч)",
    ),
    (
        "output/student_test_auto.txt",
        "output/plot_student_auto.png",
        "t-критерий Стьюдента (автоматический выбор)",
    ),
];

const SHAPIRO_REPORT: &str = "output/shapiro_wilk_result.txt";
const SHAPIRO_SAMPLES: [&str; 2] = ["input/data_normal.txt", "input/data.txt"];
const SHAPIRO_FIGURE: &str = "output/plot_shapiro_wilk_qq.png";

const WILCOXON_REPORT: &str = "output/wilcoxon_ranksum_result.txt";
const WILCOXON_SAMPLE_PAIRS: [(&str, &str); 2] = [
    ("input/sample1.txt", "input/sample2.txt"),
    ("input/data1.txt", "input/data2.txt"),
];
const WILCOXON_FIGURE: &str = "output/plot_wilcoxon_normal_approx.png";

const GRUBBS_REPORT: &str = "output/grubbs_test_normal.txt";
const GRUBBS_FIGURE: &str = "output/plot_grubbs.png";

const WEIBULL_JOBS: [(WeibullFitMethod, &str, &str); 2] = [
    (
        WeibullFitMethod::Mle,
        "output/mle_weibull_complete.txt",
        "output/plot_mle_weibull.png",
    ),
    (
        WeibullFitMethod::Mls,
        "output/mls_weibull_censored.txt",
        "output/plot_mls_weibull.png",
    ),
];

const CI_REPORT: &str = "output/confidence_intervals.txt";
const CI_FIGURE: &str = "output/plot_confidence_intervals.png";

const PERCENTILE_JOBS: [(&str, &str); 2] = [
    (
        "output/percentiles_normal.txt",
        "output/plot_percentiles_normal.png",
    ),
    (
        "output/percentiles_weibull.txt",
        "output/plot_percentiles_weibull.png",
    ),
];

const GALLERY_T_FIGURE: &str = "output/plot_t_varying_df.png";
const GALLERY_NORMAL_FIGURE: &str = "output/plot_normal_varying_sigma.png";
const GALLERY_CHI_SQUARED_FIGURE: &str = "output/plot_chi_squared.png";

/// What happened to one report/figure pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairOutcome {
    /// The figure file was written.
    Rendered,
    /// The pair was left out, with the reason logged.
    Skipped,
}

/// Totals of one batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    /// Figures written to disk.
    pub rendered: usize,
    /// Pairs skipped over missing or inapplicable inputs.
    pub skipped: usize,
    /// Pairs that failed to parse, compose or render.
    pub failed: usize,
}

fn read_report(path: &Path) -> Result<String, VizError> {
    return std::fs::read_to_string(path).map_err(|source| VizError::Io {
        path: path.to_path_buf(),
        source,
    });
}

fn load_sample(path: &Path) -> Option<SampleData> {
    if !path.is_file() {
        return None;
    }
    return match SampleData::load(path) {
        Ok(sample) => Some(sample),
        Err(error) => {
            warn!(path = %path.display(), %error, "failed to load sample file");
            None
        }
    };
}

fn load_first_sample(candidates: &[PathBuf]) -> Option<SampleData> {
    return candidates.iter().find_map(|path| load_sample(path));
}

/// Picks the first candidate pair where at least one file exists and
/// loads whatever halves of it are readable.
fn resolve_sample_pair(
    pairs: &[(PathBuf, PathBuf)],
) -> (Option<SampleData>, Option<SampleData>) {
    for (first_path, second_path) in pairs {
        if first_path.is_file() || second_path.is_file() {
            return (load_sample(first_path), load_sample(second_path));
        }
    }
    return (None, None);
}

/// Logs the skipped panels and writes the finished figure.
fn finish(
    label: &str,
    figure: &ComposedFigure,
    output_path: &Path,
) -> Result<PairOutcome, VizError> {
    for skip in &figure.skipped {
        info!(figure = label, panel = %skip.caption, reason = %skip.reason, "panel skipped");
    }
    render_figure(&figure.model, output_path)?;
    info!(figure = label, path = %output_path.display(), "figure written");
    return Ok(PairOutcome::Rendered);
}

/// ANOVA pair: report to F distribution figure.
pub fn process_anova(report_path: &Path, output_path: &Path) -> Result<PairOutcome, VizError> {
    if !report_path.is_file() {
        info!(path = %report_path.display(), "ANOVA report not found, skipping");
        return Ok(PairOutcome::Skipped);
    }
    let text: String = read_report(report_path)?;
    let result: AnovaResult = parser::parse_anova(&text)?;

    let spec: DistributionSpec = DistributionSpec::F {
        df1: f64::from(result.df_between),
        df2: f64::from(result.df_within),
    };
    let dist: Box<dyn Distribution> = spec.instantiate()?;
    let region: CriticalRegion =
        CriticalRegion::upper_tail(result.critical_value, dist.as_ref(), result.alpha);
    if region.contradicts_reported(result.f_statistic, result.reject_null) {
        warn!(
            statistic = result.f_statistic,
            boundary = region.upper_boundary(),
            "ANOVA verdict in the report disagrees with the computed region"
        );
    }

    let figure: ComposedFigure = compose_anova(&result)?;
    return finish(TestKind::Anova.label(), &figure, output_path);
}

/// Student's t pair. The title distinguishes the three variance
/// handling variants of the engine.
pub fn process_student(
    report_path: &Path,
    output_path: &Path,
    title: &str,
) -> Result<PairOutcome, VizError> {
    if !report_path.is_file() {
        info!(path = %report_path.display(), "Student's t report not found, skipping");
        return Ok(PairOutcome::Skipped);
    }
    let text: String = read_report(report_path)?;
    let result: StudentTResult = parser::parse_student(&text)?;

    let spec: DistributionSpec = DistributionSpec::StudentT { df: result.df };
    let dist: Box<dyn Distribution> = spec.instantiate()?;
    let region: CriticalRegion =
        CriticalRegion::two_sided(result.critical_value, dist.as_ref(), result.alpha);
    if region.contradicts_reported(result.t_statistic, result.reject_null) {
        warn!(
            statistic = result.t_statistic,
            boundary = region.upper_boundary(),
            "Student's t verdict in the report disagrees with the computed region"
        );
    }

    let figure: ComposedFigure = compose_student(&result, title)?;
    return finish(TestKind::StudentT.label(), &figure, output_path);
}

/// Shapiro-Wilk pair. Needs one of the sample files next to the report,
/// both figure panels are built from the raw observations.
pub fn process_shapiro_wilk(
    report_path: &Path,
    sample_candidates: &[PathBuf],
    output_path: &Path,
) -> Result<PairOutcome, VizError> {
    if !report_path.is_file() {
        info!(path = %report_path.display(), "Shapiro-Wilk report not found, skipping");
        return Ok(PairOutcome::Skipped);
    }
    let text: String = read_report(report_path)?;
    let result: ShapiroWilkResult = parser::parse_shapiro_wilk(&text)?;

    let sample: SampleData = match load_first_sample(sample_candidates) {
        Some(sample) => sample,
        None => {
            info!(path = %report_path.display(), "no sample file for the Shapiro-Wilk figure, skipping");
            return Ok(PairOutcome::Skipped);
        }
    };
    if let Some(region) = CriticalRegion::scale_bounded(result.critical_value) {
        if region.contradicts_reported(result.w_statistic, result.reject_null) {
            warn!(
                statistic = result.w_statistic,
                boundary = region.upper_boundary(),
                "Shapiro-Wilk verdict in the report disagrees with the computed region"
            );
        }
    }

    let figure: ComposedFigure = compose_shapiro_wilk(&result, &sample)?;
    return finish(TestKind::ShapiroWilk.label(), &figure, output_path);
}

/// Wilcoxon rank sum pair. Only the normal approximation variant is
/// drawn; the exact distribution report has nothing to put on a z axis.
pub fn process_wilcoxon(
    report_path: &Path,
    sample_pairs: &[(PathBuf, PathBuf)],
    output_path: &Path,
) -> Result<PairOutcome, VizError> {
    if !report_path.is_file() {
        info!(path = %report_path.display(), "Wilcoxon report not found, skipping");
        return Ok(PairOutcome::Skipped);
    }
    let text: String = read_report(report_path)?;
    let result: WilcoxonResult = parser::parse_wilcoxon(&text)?;

    if !result.use_normal_approx {
        info!(path = %report_path.display(), "Wilcoxon report uses the exact distribution, figure skipped");
        return Ok(PairOutcome::Skipped);
    }
    if let Some(z) = result.z_statistic {
        let std_normal: StdNormal = StdNormal::new();
        let region: CriticalRegion =
            CriticalRegion::two_sided(result.critical_value, &std_normal, result.alpha);
        if region.contradicts_reported(z, result.reject_null) {
            warn!(
                statistic = z,
                boundary = region.upper_boundary(),
                "Wilcoxon verdict in the report disagrees with the computed region"
            );
        }
    }

    let (first, second): (Option<SampleData>, Option<SampleData>) =
        resolve_sample_pair(sample_pairs);
    let figure: ComposedFigure = compose_wilcoxon(&result, first.as_ref(), second.as_ref())?;
    return finish(TestKind::WilcoxonRankSum.label(), &figure, output_path);
}

/// Grubbs pair, the examined sample comes embedded in the report.
pub fn process_grubbs(report_path: &Path, output_path: &Path) -> Result<PairOutcome, VizError> {
    if !report_path.is_file() {
        info!(path = %report_path.display(), "Grubbs report not found, skipping");
        return Ok(PairOutcome::Skipped);
    }
    let text: String = read_report(report_path)?;
    let result: GrubbsResult = parser::parse_grubbs(&text)?;

    let figure: ComposedFigure = compose_grubbs(&result)?;
    return finish(TestKind::Grubbs.label(), &figure, output_path);
}

/// Weibull fit pair for either estimation method.
pub fn process_weibull(
    report_path: &Path,
    method: WeibullFitMethod,
    output_path: &Path,
) -> Result<PairOutcome, VizError> {
    if !report_path.is_file() {
        info!(path = %report_path.display(), "Weibull fit report not found, skipping");
        return Ok(PairOutcome::Skipped);
    }
    let text: String = read_report(report_path)?;
    let result: WeibullFitResult = parser::parse_weibull(&text, method)?;

    let figure: ComposedFigure = compose_weibull(&result)?;
    let kind: TestKind = match method {
        WeibullFitMethod::Mle => TestKind::WeibullMle,
        WeibullFitMethod::Mls => TestKind::WeibullMls,
    };
    return finish(kind.label(), &figure, output_path);
}

/// Confidence interval pair.
pub fn process_confidence_intervals(
    report_path: &Path,
    output_path: &Path,
) -> Result<PairOutcome, VizError> {
    if !report_path.is_file() {
        info!(path = %report_path.display(), "confidence interval report not found, skipping");
        return Ok(PairOutcome::Skipped);
    }
    let text: String = read_report(report_path)?;
    let report: ConfidenceIntervalReport = parser::parse_confidence_intervals(&text)?;

    let figure: ComposedFigure = compose_confidence_intervals(&report)?;
    return finish(TestKind::ConfidenceInterval.label(), &figure, output_path);
}

/// Percentile table pair. Each report file carries the table of one
/// distribution; anything beyond the first table is ignored with a
/// warning.
pub fn process_percentiles(
    report_path: &Path,
    output_path: &Path,
) -> Result<PairOutcome, VizError> {
    if !report_path.is_file() {
        info!(path = %report_path.display(), "percentile report not found, skipping");
        return Ok(PairOutcome::Skipped);
    }
    let text: String = read_report(report_path)?;
    let report: PercentileTableReport = parser::parse_percentiles(&text)?;

    let table: &PercentileTable = match report.tables.first() {
        Some(table) => table,
        None => {
            return Err(VizError::InsufficientData {
                what: "percentile tables",
                got: 0,
                min: 1,
            });
        }
    };
    if 1 < report.tables.len() {
        warn!(
            path = %report_path.display(),
            tables = report.tables.len(),
            "only the first percentile table is drawn"
        );
    }

    let figure: ComposedFigure = compose_percentiles(table)?;
    return finish(TestKind::PercentileTable.label(), &figure, output_path);
}

/// Gallery figure: t densities over varying degrees of freedom.
pub fn process_t_gallery(output_path: &Path) -> Result<PairOutcome, VizError> {
    let figure: ComposedFigure = compose_t_family()?;
    return finish("t_gallery", &figure, output_path);
}

/// Gallery figure: normal densities over varying σ.
pub fn process_normal_gallery(output_path: &Path) -> Result<PairOutcome, VizError> {
    let figure: ComposedFigure = compose_normal_family()?;
    return finish("normal_gallery", &figure, output_path);
}

/// Gallery figure: χ² densities over varying degrees of freedom.
pub fn process_chi_squared_gallery(output_path: &Path) -> Result<PairOutcome, VizError> {
    let figure: ComposedFigure = compose_chi_squared_family()?;
    return finish("chi_squared_gallery", &figure, output_path);
}

fn tally(summary: &mut BatchSummary, label: &str, outcome: Result<PairOutcome, VizError>) {
    match outcome {
        Ok(PairOutcome::Rendered) => summary.rendered += 1,
        Ok(PairOutcome::Skipped) => summary.skipped += 1,
        Err(error) => {
            error!(figure = label, %error, "pair failed");
            summary.failed += 1;
        }
    }
}

/// Runs every job of the fixed batch against `base_dir`.
///
/// Reports are read from `output/` and `input/` under the base directory
/// and the figures land next to the reports. `gallery` controls whether
/// the synthetic distribution gallery is rendered too (deafult `true`).
#[bon::builder]
pub fn run_batch(base_dir: &Path, #[builder(default = true)] gallery: bool) -> BatchSummary {
    let mut summary: BatchSummary = BatchSummary::default();

    tally(
        &mut summary,
        TestKind::Anova.label(),
        process_anova(&base_dir.join(ANOVA_REPORT), &base_dir.join(ANOVA_FIGURE)),
    );

    for (report, output, title) in STUDENT_JOBS {
        tally(
            &mut summary,
            TestKind::StudentT.label(),
            process_student(&base_dir.join(report), &base_dir.join(output), title),
        );
    }

    let shapiro_samples: Vec<PathBuf> = SHAPIRO_SAMPLES
        .iter()
        .map(|name| base_dir.join(name))
        .collect();
    tally(
        &mut summary,
        TestKind::ShapiroWilk.label(),
        process_shapiro_wilk(
            &base_dir.join(SHAPIRO_REPORT),
            &shapiro_samples,
            &base_dir.join(SHAPIRO_FIGURE),
        ),
    );

    let wilcoxon_pairs: Vec<(PathBuf, PathBuf)> = WILCOXON_SAMPLE_PAIRS
        .iter()
        .map(|(first, second)| (base_dir.join(first), base_dir.join(second)))
        .collect();
    tally(
        &mut summary,
        TestKind::WilcoxonRankSum.label(),
        process_wilcoxon(
            &base_dir.join(WILCOXON_REPORT),
            &wilcoxon_pairs,
            &base_dir.join(WILCOXON_FIGURE),
        ),
    );

    tally(
        &mut summary,
        TestKind::Grubbs.label(),
        process_grubbs(&base_dir.join(GRUBBS_REPORT), &base_dir.join(GRUBBS_FIGURE)),
    );

    for (method, report, output) in WEIBULL_JOBS {
        let kind: TestKind = match method {
            WeibullFitMethod::Mle => TestKind::WeibullMle,
            WeibullFitMethod::Mls => TestKind::WeibullMls,
        };
        tally(
            &mut summary,
            kind.label(),
            process_weibull(&base_dir.join(report), method, &base_dir.join(output)),
        );
    }

    tally(
        &mut summary,
        TestKind::ConfidenceInterval.label(),
        process_confidence_intervals(&base_dir.join(CI_REPORT), &base_dir.join(CI_FIGURE)),
    );

    for (report, output) in PERCENTILE_JOBS {
        tally(
            &mut summary,
            TestKind::PercentileTable.label(),
            process_percentiles(&base_dir.join(report), &base_dir.join(output)),
        );
    }

    if gallery {
        tally(
            &mut summary,
            "t_gallery",
            process_t_gallery(&base_dir.join(GALLERY_T_FIGURE)),
        );
        tally(
            &mut summary,
            "normal_gallery",
            process_normal_gallery(&base_dir.join(GALLERY_NORMAL_FIGURE)),
        );
        tally(
            &mut summary,
            "chi_squared_gallery",
            process_chi_squared_gallery(&base_dir.join(GALLERY_CHI_SQUARED_FIGURE)),
        );
    }

    info!(
        rendered = summary.rendered,
        skipped = summary.skipped,
        failed = summary.failed,
        "batch finished"
    );
    return summary;
}

/// The whole batch with the standard settings.
pub fn run_all(base_dir: &Path) -> BatchSummary {
    return run_batch().base_dir(base_dir).call();
}
