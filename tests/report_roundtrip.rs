//! Writer to parser round trips for every report family.
//!
//! Every float in the fixtures stays at the precision the writers print,
//! so a round trip restores the records bit for bit and plain `assert_eq`
//! on the whole struct is enough.

use StatPlots::report::model::{
    AnovaResult, CiScenario, CiSection, ConfidenceIntervalReport, GroupSummary, GrubbsResult,
    IntervalEstimate, PercentileRow, PercentileTable, PercentileTableReport, ShapiroWilkResult,
    StudentTResult, TTestMethod, TestKind, TestResult, WeibullFitMethod, WeibullFitResult,
    WilcoxonResult,
};
use StatPlots::report::parser;
use StatPlots::report::writer;

fn anova_fixture() -> AnovaResult {
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

fn student_fixture() -> StudentTResult {
    return StudentTResult {
        alpha: 0.05,
        t_statistic: -2.8456,
        critical_value: Some(2.1314),
        p_value: Some(0.0121),
        reject_null: Some(true),
        df: 15.47,
        method: Some(TTestMethod::WelchApprox),
    };
}

fn shapiro_fixture() -> ShapiroWilkResult {
    return ShapiroWilkResult {
        alpha: 0.05,
        w_statistic: 0.973215,
        critical_value: Some(0.927),
        p_value: Some(0.6321),
        reject_null: Some(false),
        n: Some(30),
    };
}

fn wilcoxon_fixture() -> WilcoxonResult {
    return WilcoxonResult {
        alpha: 0.05,
        w_statistic: 141.5,
        u_statistic: Some(63.5),
        z_statistic: Some(-1.2933),
        mean_w: Some(168.0),
        std_w: Some(20.49),
        critical_value: Some(1.96),
        p_value: Some(0.1959),
        reject_null: Some(false),
        n1: Some(12),
        n2: Some(15),
        num_ties: Some(1),
        use_normal_approx: true,
    };
}

fn grubbs_fixture() -> GrubbsResult {
    return GrubbsResult {
        alpha: 0.05,
        g_statistic: 4.2477,
        critical_value: Some(2.7082),
        observations: vec![9.87, 10.12, 9.95, 10.43, 9.78, 10.21, 9.93, 50.0],
        outliers: vec![50.0],
        conclusion: Some(String::from("обнаружен 1 выброс")),
    };
}

fn weibull_fixture(method: WeibullFitMethod) -> WeibullFitResult {
    return WeibullFitResult {
        method,
        scale: 105.31248,
        shape: 2.104932,
        scale_std_error: Some(10.2413),
        shape_std_error: Some(0.328115),
        observations: vec![23.5, 41.2, 55.8, 62.3, 70.1],
        censored: vec![false, false, true, false, true],
    };
}

fn ci_fixture() -> ConfidenceIntervalReport {
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
                    center: None,
                    width: Some(10.7354),
                }],
            },
            CiSection {
                scenario: CiScenario::UnknownSigma,
                intervals: vec![IntervalEstimate {
                    name: "μ (среднее)",
                    lower: 94.399,
                    upper: 105.601,
                    center: None,
                    width: Some(11.202),
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

fn percentile_fixture() -> PercentileTableReport {
    return PercentileTableReport {
        tables: vec![PercentileTable {
            distribution: String::from("normal"),
            rows: vec![
                PercentileRow {
                    probability_percent: 5.0,
                    value: 75.33,
                    lower: 71.2,
                    upper: 79.46,
                },
                PercentileRow {
                    probability_percent: 50.0,
                    value: 100.0,
                    lower: 96.5,
                    upper: 103.5,
                },
                PercentileRow {
                    probability_percent: 95.0,
                    value: 124.67,
                    lower: 120.54,
                    upper: 128.8,
                },
            ],
        }],
    };
}

#[test]
fn anova_round_trip_restores_every_field() {
    let fixture: AnovaResult = anova_fixture();
    let text: String = writer::write_anova(&fixture);
    let parsed: AnovaResult = parser::parse_anova(&text).expect("fixture text should parse");
    assert_eq!(parsed, fixture);
}

#[test]
fn anova_accepting_verdict_round_trips_too() {
    let mut fixture: AnovaResult = anova_fixture();
    fixture.reject_null = Some(false);
    fixture.f_statistic = 1.2046;

    let parsed: AnovaResult =
        parser::parse_anova(&writer::write_anova(&fixture)).expect("fixture text should parse");
    assert_eq!(parsed.reject_null, Some(false));
    assert_eq!(parsed, fixture);
}

#[test]
fn anova_without_optional_blocks_round_trips() {
    let fixture: AnovaResult = AnovaResult {
        alpha: 0.05,
        f_statistic: 2.5,
        critical_value: None,
        p_value: None,
        reject_null: None,
        df_between: 3,
        df_within: 16,
        group_count: None,
        total_n: None,
        groups: Vec::new(),
        grand_mean: None,
    };
    let parsed: AnovaResult =
        parser::parse_anova(&writer::write_anova(&fixture)).expect("fixture text should parse");
    assert_eq!(parsed, fixture);
}

#[test]
fn student_round_trip_keeps_the_welch_method() {
    let fixture: StudentTResult = student_fixture();
    let parsed: StudentTResult =
        parser::parse_student(&writer::write_student(&fixture)).expect("fixture text should parse");
    assert_eq!(parsed, fixture);
    assert_eq!(parsed.method, Some(TTestMethod::WelchApprox));
}

#[test]
fn student_round_trip_keeps_the_pooled_method() {
    let mut fixture: StudentTResult = student_fixture();
    fixture.method = Some(TTestMethod::EqualVariance);
    fixture.df = 18.0;
    fixture.t_statistic = 1.5;
    fixture.critical_value = Some(2.1009);
    fixture.p_value = Some(0.1509);
    fixture.reject_null = Some(false);

    let parsed: StudentTResult =
        parser::parse_student(&writer::write_student(&fixture)).expect("fixture text should parse");
    assert_eq!(parsed, fixture);
}

#[test]
fn shapiro_round_trip_restores_every_field() {
    let fixture: ShapiroWilkResult = shapiro_fixture();
    let parsed: ShapiroWilkResult = parser::parse_shapiro_wilk(&writer::write_shapiro_wilk(
        &fixture,
    ))
    .expect("fixture text should parse");
    assert_eq!(parsed, fixture);
}

#[test]
fn shapiro_rejecting_verdict_needs_the_full_phrase() {
    let mut fixture: ShapiroWilkResult = shapiro_fixture();
    fixture.reject_null = Some(true);
    fixture.w_statistic = 0.843201;

    let parsed: ShapiroWilkResult = parser::parse_shapiro_wilk(&writer::write_shapiro_wilk(
        &fixture,
    ))
    .expect("fixture text should parse");
    assert_eq!(parsed.reject_null, Some(true));
}

#[test]
fn wilcoxon_round_trip_restores_every_field() {
    let fixture: WilcoxonResult = wilcoxon_fixture();
    let parsed: WilcoxonResult = parser::parse_wilcoxon(&writer::write_wilcoxon(&fixture))
        .expect("fixture text should parse");
    assert_eq!(parsed, fixture);
}

#[test]
fn wilcoxon_exact_method_round_trips_without_the_approximation_fields() {
    let fixture: WilcoxonResult = WilcoxonResult {
        alpha: 0.05,
        w_statistic: 27.0,
        u_statistic: Some(6.0),
        z_statistic: None,
        mean_w: None,
        std_w: None,
        critical_value: None,
        p_value: Some(0.0931),
        reject_null: Some(false),
        n1: Some(6),
        n2: Some(7),
        num_ties: None,
        use_normal_approx: false,
    };
    let parsed: WilcoxonResult = parser::parse_wilcoxon(&writer::write_wilcoxon(&fixture))
        .expect("fixture text should parse");
    assert_eq!(parsed, fixture);
    assert!(!parsed.use_normal_approx);
}

#[test]
fn grubbs_round_trip_restores_the_embedded_sample() {
    let fixture: GrubbsResult = grubbs_fixture();
    let parsed: GrubbsResult =
        parser::parse_grubbs(&writer::write_grubbs(&fixture)).expect("fixture text should parse");
    assert_eq!(parsed, fixture);
}

#[test]
fn weibull_round_trip_keeps_the_censoring_flags() {
    for method in [WeibullFitMethod::Mle, WeibullFitMethod::Mls] {
        let fixture: WeibullFitResult = weibull_fixture(method);
        let parsed: WeibullFitResult =
            parser::parse_weibull(&writer::write_weibull(&fixture), method)
                .expect("fixture text should parse");
        assert_eq!(parsed, fixture);
    }
}

#[test]
fn confidence_interval_round_trip_restores_every_section() {
    let fixture: ConfidenceIntervalReport = ci_fixture();
    let parsed: ConfidenceIntervalReport =
        parser::parse_confidence_intervals(&writer::write_confidence_intervals(&fixture))
            .expect("fixture text should parse");
    assert_eq!(parsed, fixture);
}

#[test]
fn percentile_round_trip_restores_the_table() {
    let fixture: PercentileTableReport = percentile_fixture();
    let parsed: PercentileTableReport =
        parser::parse_percentiles(&writer::write_percentiles(&fixture))
            .expect("fixture text should parse");
    assert_eq!(parsed, fixture);
}

#[test]
fn parsing_is_idempotent() {
    let text: String = writer::write_anova(&anova_fixture());
    let first: AnovaResult = parser::parse_anova(&text).expect("fixture text should parse");
    let second: AnovaResult = parser::parse_anova(&text).expect("fixture text should parse");
    assert_eq!(first, second);
}

#[test]
fn unknown_lines_are_skipped() {
    let text: String = writer::write_student(&student_fixture());
    let noisy: String = text
        .lines()
        .flat_map(|line| [line, "строка, которой в отчёте быть не должно"])
        .collect::<Vec<&str>>()
        .join("\n");

    let clean: StudentTResult = parser::parse_student(&text).expect("fixture text should parse");
    let parsed: StudentTResult = parser::parse_student(&noisy).expect("noise must not break it");
    assert_eq!(parsed, clean);
}

#[test]
fn malformed_values_do_not_overwrite_good_ones() {
    let mut text: String = writer::write_student(&student_fixture());
    text.push_str("t-статистика = не число\n");

    let parsed: StudentTResult = parser::parse_student(&text).expect("fixture text should parse");
    assert_eq!(parsed.t_statistic, student_fixture().t_statistic);
}

#[test]
fn repeated_labels_keep_the_last_occurrence() {
    let mut text: String = writer::write_student(&student_fixture());
    text.push_str("t-статистика = 9.9999\n");

    let parsed: StudentTResult = parser::parse_student(&text).expect("fixture text should parse");
    assert_eq!(parsed.t_statistic, 9.9999);
}

#[test]
fn missing_mandatory_fields_are_all_named() {
    let error = parser::parse_anova("ничего похожего на отчёт\n")
        .expect_err("text without fields must not parse");
    match error {
        StatPlots::errors::VizError::Parse { missing } => {
            assert!(missing.contains(&"f_statistic"));
            assert!(missing.contains(&"df_between"));
            assert!(missing.contains(&"df_within"));
        }
        other => panic!("expected a parse error, got {:?}", other),
    }
}

#[test]
fn absent_alpha_falls_back_to_the_default() {
    let text: &str = "W-статистика = 0.912345\n";
    let parsed: ShapiroWilkResult =
        parser::parse_shapiro_wilk(text).expect("the statistic alone is enough");
    assert_eq!(parsed.alpha, 0.05);
    assert_eq!(parsed.critical_value, None);
}

#[test]
fn out_of_range_p_values_are_dropped() {
    let text: &str = "W-статистика = 0.912345\nПриблизительное p-value = 17.0\n";
    let parsed: ShapiroWilkResult =
        parser::parse_shapiro_wilk(text).expect("the statistic alone is enough");
    assert_eq!(parsed.p_value, None);
}

#[test]
fn a_group_row_with_a_negative_size_is_dropped() {
    let text: String = writer::write_anova(&anova_fixture());
    let broken: String = text.replace("Группа 1: n = 10", "Группа 1: n = -10");

    let parsed: AnovaResult = parser::parse_anova(&broken).expect("fixture text should parse");
    assert_eq!(parsed.groups.len(), 2);
    assert!(parsed.groups.iter().all(|group| group.mean != 23.41));
}

#[test]
fn a_negative_sample_size_reads_as_absent() {
    let text: String = writer::write_wilcoxon(&wilcoxon_fixture());
    let broken: String = text.replace("n₁ = 12", "n₁ = -12");

    let parsed: WilcoxonResult =
        parser::parse_wilcoxon(&broken).expect("fixture text should parse");
    assert_eq!(parsed.n1, None);
    assert_eq!(parsed.n2, Some(15));
}

#[test]
fn dispatch_by_kind_wraps_the_matching_variant() {
    let text: String = writer::write_anova(&anova_fixture());
    let result: TestResult =
        parser::parse_report(TestKind::Anova, &text).expect("fixture text should parse");

    assert_eq!(result.kind(), TestKind::Anova);
    assert_eq!(result.alpha(), Some(0.05));
    assert_eq!(result.statistic(), Some(anova_fixture().f_statistic));
    assert_eq!(result.reject_null(), Some(true));
    match result {
        TestResult::Anova(parsed) => assert_eq!(parsed, anova_fixture()),
        other => panic!("expected the ANOVA variant, got {:?}", other),
    }
}

#[test]
fn the_writer_dispatch_round_trips_through_the_parser_dispatch() {
    let wrapped: TestResult = TestResult::Anova(anova_fixture());
    let text: String = writer::write_report(&wrapped);
    let reparsed: TestResult =
        parser::parse_report(TestKind::Anova, &text).expect("own output should parse");
    assert_eq!(reparsed, wrapped);
}
