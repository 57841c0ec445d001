//! Generates a synthetic engine work directory (inputs plus every report
//! family) and renders the full figure batch into it.
//!
//! Usage: `cargo run --example render_all [work_dir]`, deafult `demo_workdir`.

use std::path::{Path, PathBuf};

use StatPlots::batch::{run_all, BatchSummary};
use StatPlots::report::model::{
    AnovaResult, CiScenario, CiSection, ConfidenceIntervalReport, GroupSummary, GrubbsResult,
    IntervalEstimate, PercentileRow, PercentileTable, PercentileTableReport, ShapiroWilkResult,
    StudentTResult, TTestMethod, WeibullFitMethod, WeibullFitResult, WilcoxonResult,
};
use StatPlots::report::writer;

const NORMAL_SAMPLE: [f64; 30] = [
    102.4, 97.8, 111.2, 88.5, 105.3, 93.7, 118.6, 84.2, 99.1, 107.8, 91.3, 103.5, 96.2, 114.7,
    87.9, 101.6, 109.4, 94.8, 120.3, 82.7, 98.5, 106.1, 90.4, 112.9, 95.6, 104.2, 89.1, 116.8,
    100.7, 92.5,
];

const FIRST_RANK_SAMPLE: [f64; 12] = [
    14.2, 15.8, 13.5, 16.4, 14.9, 15.1, 13.8, 16.0, 14.5, 15.5, 13.2, 16.7,
];

const SECOND_RANK_SAMPLE: [f64; 15] = [
    15.3, 17.1, 14.8, 16.9, 15.7, 18.2, 14.4, 16.2, 17.5, 15.0, 16.6, 18.0, 14.7, 17.3, 15.9,
];

fn write_file(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    return std::fs::write(path, contents);
}

fn sample_file(values: &[f64]) -> String {
    let mut out: String = String::from("# синтетическая выборка\n");
    for value in values {
        out.push_str(&format!("{:.4}\n", value));
    }
    return out;
}

fn demo_anova() -> AnovaResult {
    return AnovaResult {
        alpha: 0.05,
        f_statistic: 4.2137,
        critical_value: Some(3.3541),
        p_value: Some(0.0253),
        reject_null: Some(true),
        df_between: 2,
        df_within: 27,
        group_count: Some(3),
        total_n: Some(30),
        groups: vec![
            GroupSummary { size: 10, mean: 23.41 },
            GroupSummary { size: 10, mean: 27.83 },
            GroupSummary { size: 10, mean: 25.12 },
        ],
        grand_mean: Some(25.4533),
    };
}

fn demo_student(method: TTestMethod, df: f64, t: f64, critical: f64, p: f64) -> StudentTResult {
    return StudentTResult {
        alpha: 0.05,
        t_statistic: t,
        critical_value: Some(critical),
        p_value: Some(p),
        reject_null: Some(critical < t.abs()),
        df,
        method: Some(method),
    };
}

fn demo_shapiro() -> ShapiroWilkResult {
    return ShapiroWilkResult {
        alpha: 0.05,
        w_statistic: 0.973215,
        critical_value: Some(0.927000),
        p_value: Some(0.6321),
        reject_null: Some(false),
        n: Some(30),
    };
}

fn demo_wilcoxon() -> WilcoxonResult {
    return WilcoxonResult {
        alpha: 0.05,
        w_statistic: 141.50,
        u_statistic: Some(63.50),
        z_statistic: Some(-1.2933),
        mean_w: Some(168.00),
        std_w: Some(20.49),
        critical_value: Some(1.9600),
        p_value: Some(0.1959),
        reject_null: Some(false),
        n1: Some(12),
        n2: Some(15),
        num_ties: Some(1),
        use_normal_approx: true,
    };
}

fn demo_grubbs() -> GrubbsResult {
    let observations: Vec<f64> = vec![
        9.87, 10.12, 9.95, 10.43, 9.78, 10.21, 9.66, 10.08, 9.91, 10.35, 9.84, 10.17, 9.72,
        10.02, 9.96, 10.29, 9.81, 10.11, 9.93, 50.0,
    ];
    return GrubbsResult {
        alpha: 0.05,
        g_statistic: 4.2477,
        critical_value: Some(2.7082),
        observations,
        outliers: vec![50.0],
        conclusion: Some(String::from("обнаружен 1 выброс")),
    };
}

fn demo_weibull_mle() -> WeibullFitResult {
    let observations: Vec<f64> = vec![
        23.5, 41.2, 55.8, 62.3, 70.1, 76.4, 81.9, 87.2, 92.5, 97.3, 101.8, 106.2, 110.5, 115.0,
        119.6, 124.3, 129.2, 134.5, 140.2, 146.5, 153.7, 162.1, 172.4, 186.0, 207.3,
    ];
    let censored: Vec<bool> = vec![false; observations.len()];
    return WeibullFitResult {
        method: WeibullFitMethod::Mle,
        scale: 105.312480,
        shape: 2.104932,
        scale_std_error: Some(10.241300),
        shape_std_error: Some(0.328115),
        observations,
        censored,
    };
}

fn demo_weibull_mls() -> WeibullFitResult {
    let observations: Vec<f64> = vec![
        30.2, 45.6, 58.3, 67.9, 76.2, 84.0, 91.4, 98.6, 105.5, 112.3, 119.0, 126.1, 133.8,
        142.2, 151.6, 162.5, 175.8, 192.4,
    ];
    let censored: Vec<bool> = vec![
        false, false, false, false, false, true, false, false, true, false, false, true, false,
        false, true, false, false, true,
    ];
    return WeibullFitResult {
        method: WeibullFitMethod::Mls,
        scale: 128.640902,
        shape: 1.873246,
        scale_std_error: Some(14.082210),
        shape_std_error: Some(0.401388),
        observations,
        censored,
    };
}

fn demo_confidence_intervals() -> ConfidenceIntervalReport {
    return ConfidenceIntervalReport {
        confidence: Some(0.95),
        sample_mean: Some(100.0),
        sample_std: Some(15.0),
        sample_size: Some(30),
        known_sigma: Some(15.0),
        df: Some(29.0),
        sections: vec![
            CiSection {
                scenario: CiScenario::KnownSigma,
                intervals: vec![IntervalEstimate {
                    name: "μ (среднее)",
                    lower: 94.6323,
                    upper: 105.3677,
                    center: Some(100.0),
                    width: Some(10.7354),
                }],
            },
            CiSection {
                scenario: CiScenario::UnknownSigma,
                intervals: vec![IntervalEstimate {
                    name: "μ (среднее)",
                    lower: 94.3990,
                    upper: 105.6010,
                    center: Some(100.0),
                    width: Some(11.2020),
                }],
            },
            CiSection {
                scenario: CiScenario::UnknownMu,
                intervals: vec![
                    IntervalEstimate {
                        name: "σ² (дисперсия)",
                        lower: 142.7101,
                        upper: 406.6219,
                        center: Some(225.0),
                        width: None,
                    },
                    IntervalEstimate {
                        name: "σ (ст. откл.)",
                        lower: 11.9462,
                        upper: 20.1648,
                        center: Some(15.0),
                        width: None,
                    },
                ],
            },
        ],
    };
}

fn percentile_rows(rows: &[(f64, f64)]) -> Vec<PercentileRow> {
    return rows
        .iter()
        .map(|&(probability_percent, value)| PercentileRow {
            probability_percent,
            value,
            lower: value - value.abs() * 0.04 - 0.8,
            upper: value + value.abs() * 0.04 + 0.8,
        })
        .collect();
}

fn demo_percentiles_normal() -> PercentileTableReport {
    let rows: Vec<PercentileRow> = percentile_rows(&[
        (1.0, 65.10),
        (5.0, 75.33),
        (10.0, 80.78),
        (25.0, 89.88),
        (50.0, 100.00),
        (75.0, 110.12),
        (90.0, 119.22),
        (95.0, 124.67),
        (99.0, 134.90),
    ]);
    return PercentileTableReport {
        tables: vec![PercentileTable {
            distribution: String::from("normal"),
            rows,
        }],
    };
}

fn demo_percentiles_weibull() -> PercentileTableReport {
    let rows: Vec<PercentileRow> = percentile_rows(&[
        (1.0, 11.78),
        (5.0, 25.61),
        (10.0, 36.06),
        (25.0, 58.18),
        (50.0, 88.44),
        (75.0, 123.02),
        (90.0, 156.64),
        (95.0, 177.56),
        (99.0, 217.90),
    ]);
    return PercentileTableReport {
        tables: vec![PercentileTable {
            distribution: String::from("weibull"),
            rows,
        }],
    };
}

fn populate(base: &Path) -> std::io::Result<()> {
    write_file(
        &base.join("input/data_normal.txt"),
        &sample_file(&NORMAL_SAMPLE),
    )?;
    write_file(
        &base.join("input/sample1.txt"),
        &sample_file(&FIRST_RANK_SAMPLE),
    )?;
    write_file(
        &base.join("input/sample2.txt"),
        &sample_file(&SECOND_RANK_SAMPLE),
    )?;

    write_file(
        &base.join("output/anova_result.txt"),
        &writer::write_anova(&demo_anova()),
    )?;
    write_file(
        &base.join("output/student_test_equal_var.txt"),
        &writer::write_student(&demo_student(
            TTestMethod::EqualVariance,
            18.0,
            1.5000,
            2.1009,
            0.1509,
        )),
    )?;
    write_file(
        &base.join("output/student_test_unequal_var.txt"),
        &writer::write_student(&demo_student(
            TTestMethod::WelchApprox,
            15.47,
            2.8456,
            2.1314,
            0.0121,
        )),
    )?;
    write_file(
        &base.join("output/student_test_auto.txt"),
        &writer::write_student(&demo_student(
            TTestMethod::EqualVariance,
            20.0,
            -0.7300,
            2.0860,
            0.4738,
        )),
    )?;
    write_file(
        &base.join("output/shapiro_wilk_result.txt"),
        &writer::write_shapiro_wilk(&demo_shapiro()),
    )?;
    write_file(
        &base.join("output/wilcoxon_ranksum_result.txt"),
        &writer::write_wilcoxon(&demo_wilcoxon()),
    )?;
    write_file(
        &base.join("output/grubbs_test_normal.txt"),
        &writer::write_grubbs(&demo_grubbs()),
    )?;
    write_file(
        &base.join("output/mle_weibull_complete.txt"),
        &writer::write_weibull(&demo_weibull_mle()),
    )?;
    write_file(
        &base.join("output/mls_weibull_censored.txt"),
        &writer::write_weibull(&demo_weibull_mls()),
    )?;
    write_file(
        &base.join("output/confidence_intervals.txt"),
        &writer::write_confidence_intervals(&demo_confidence_intervals()),
    )?;
    write_file(
        &base.join("output/percentiles_normal.txt"),
        &writer::write_percentiles(&demo_percentiles_normal()),
    )?;
    write_file(
        &base.join("output/percentiles_weibull.txt"),
        &writer::write_percentiles(&demo_percentiles_weibull()),
    )?;
    return Ok(());
}

fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let base: PathBuf = match std::env::args().nth(1) {
        Some(dir) => PathBuf::from(dir),
        None => PathBuf::from("demo_workdir"),
    };

    populate(&base)?;
    let summary: BatchSummary = run_all(&base);

    println!(
        "figures: {} rendered, {} skipped, {} failed (see {})",
        summary.rendered,
        summary.skipped,
        summary.failed,
        base.join("output").display()
    );
    return Ok(());
}
