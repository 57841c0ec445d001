//! Readers for the plain text reports of the analysis engine.
//!
//! One function per report family, all sharing the tolerant line
//! discipline of [crate::report::grammar]: unknown lines are skipped and
//! malformed values are dropped. Only the mandatory fields of a family
//! can fail a parse, and then [VizError::Parse] names what was absent.
//! Parsing the same text twice yields structurally equal records.

use std::collections::HashMap;

use crate::{
    configuration,
    errors::VizError,
    report::{
        grammar::{Capture, LabelRule, Matcher, RawValue, float_token, scan_line},
        model::{
            AnovaResult, CiScenario, CiSection, ConfidenceIntervalReport, GroupSummary,
            GrubbsResult, IntervalEstimate, PercentileRow, PercentileTable,
            PercentileTableReport, ShapiroWilkResult, StudentTResult, TTestMethod, TestKind,
            TestResult, WeibullFitMethod, WeibullFitResult, WilcoxonResult,
        },
    },
};

/// Values collected while walking a report top to bottom.
///
/// Repeated labels keep the last occurrence, the same as rereading the
/// report and trusting its final word.
#[derive(Debug, Default)]
struct FieldBag {
    values: HashMap<&'static str, RawValue>,
}

impl FieldBag {
    fn insert(&mut self, field: &'static str, value: RawValue) {
        let _ = self.values.insert(field, value);
    }

    fn float(&self, field: &'static str) -> Option<f64> {
        return match self.values.get(field) {
            Some(RawValue::Number(value)) => Some(*value),
            Some(RawValue::Integer(value)) => Some(*value as f64),
            _ => None,
        };
    }

    fn count(&self, field: &'static str) -> Option<u32> {
        return match self.values.get(field) {
            Some(RawValue::Integer(value)) if 0 <= *value => Some(*value as u32),
            _ => None,
        };
    }

    fn flag(&self, field: &'static str) -> Option<bool> {
        return match self.values.get(field) {
            Some(RawValue::Flag(value)) => Some(*value),
            _ => None,
        };
    }

    fn text(&self, field: &'static str) -> Option<String> {
        return match self.values.get(field) {
            Some(RawValue::Text(value)) => Some(value.clone()),
            _ => None,
        };
    }

    fn pair(&self, field: &'static str) -> Option<(f64, f64)> {
        return match self.values.get(field) {
            Some(RawValue::Pair(first, second)) => Some((*first, *second)),
            _ => None,
        };
    }

    /// Significance level, falling back to the usual default when the
    /// report omits it or states something outside `(0, 1)`.
    fn alpha(&self) -> f64 {
        return self
            .float("alpha")
            .filter(|alpha| 0.0 < *alpha && *alpha < 1.0)
            .unwrap_or(configuration::DEFAULT_SIGNIFICANCE);
    }

    /// A p-value outside `[0, 1]` is as good as absent.
    fn p_value(&self, field: &'static str) -> Option<f64> {
        return self.float(field).filter(|p| 0.0 <= *p && *p <= 1.0);
    }

    /// Checks all mandatory fields at once, so the error names every
    /// absent one instead of the first.
    fn require(&self, mandatory: &'static [&'static str]) -> Result<(), VizError> {
        let missing: Vec<&'static str> = mandatory
            .iter()
            .copied()
            .filter(|field| !self.values.contains_key(field))
            .collect();
        if missing.is_empty() {
            return Ok(());
        }
        return Err(VizError::Parse { missing });
    }

    fn require_float(&self, field: &'static str) -> Result<f64, VizError> {
        return self.float(field).ok_or(VizError::Parse {
            missing: vec![field],
        });
    }

    fn require_count(&self, field: &'static str) -> Result<u32, VizError> {
        return self.count(field).ok_or(VizError::Parse {
            missing: vec![field],
        });
    }
}

/// A size read as a float token. Negative or non finite sizes are
/// malformed and dropped, the same way [FieldBag::count] drops a
/// negative integer.
fn count_from(value: f64) -> Option<u32> {
    if value.is_finite() && 0.0 <= value {
        return Some(value as u32);
    }
    return None;
}

const ANOVA_RULES: &[LabelRule] = &[
    LabelRule::new("group_count", Matcher::StartsWith("Количество групп:"), Capture::IntAfterLastEquals),
    LabelRule::new("total_n", Matcher::StartsWith("Общее количество наблюдений:"), Capture::IntAfterLastEquals),
    LabelRule::new("alpha", Matcher::ContainsAll(&["Уровень значимости:", "α = "]), Capture::FloatAfterLastEquals),
    LabelRule::new("grand_mean", Matcher::Contains("Общее среднее:"), Capture::FloatAfterLastEquals),
    LabelRule::new("f_statistic", Matcher::StartsWith("F-статистика = "), Capture::FloatAfterLastEquals),
    LabelRule::new("critical_value", Matcher::StartsWith("Критическое значение"), Capture::FloatAfterLastEquals),
    LabelRule::new("p_value", Matcher::StartsWith("p-value = "), Capture::FloatAfterLastEquals),
    LabelRule::new("df_between", Matcher::Contains("Между группами"), Capture::IntToken(2)),
    LabelRule::new("df_within", Matcher::Contains("Внутри групп"), Capture::IntToken(2)),
    LabelRule::new("reject_null", Matcher::Contains("H0 НЕ ОТВЕРГАЕТСЯ"), Capture::Flag(false)),
    LabelRule::new("reject_null", Matcher::Contains("H0 ОТВЕРГАЕТСЯ"), Capture::Flag(true)),
];

const ANOVA_MANDATORY: &[&str] = &["f_statistic", "df_between", "df_within"];

/// Reads a one way ANOVA report.
///
/// The group block opened by `Информация о группах:` carries one
/// `Группа ...: n = ..., среднее = ...` row per group and is closed by
/// the `Общее среднее:` line.
pub fn parse_anova(text: &str) -> Result<AnovaResult, VizError> {
    let mut bag: FieldBag = FieldBag::default();
    let mut groups: Vec<GroupSummary> = Vec::new();
    let mut in_group_block: bool = false;

    for raw_line in text.lines() {
        let line: &str = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with("Информация о группах:") {
            in_group_block = true;
            continue;
        }
        if in_group_block && line.starts_with("Группа") {
            if let Some(RawValue::Pair(size, mean)) = Capture::PairCommaEquals.apply(line) {
                if let Some(size) = count_from(size) {
                    groups.push(GroupSummary { size, mean });
                }
            }
            continue;
        }
        if in_group_block && line.contains("Общее среднее:") {
            // Closes the block; the grand mean itself is captured below.
            in_group_block = false;
        }

        if let Some((field, value)) = scan_line(ANOVA_RULES, line) {
            bag.insert(field, value);
        }
    }

    bag.require(ANOVA_MANDATORY)?;

    return Ok(AnovaResult {
        alpha: bag.alpha(),
        f_statistic: bag.require_float("f_statistic")?,
        critical_value: bag.float("critical_value"),
        p_value: bag.p_value("p_value"),
        reject_null: bag.flag("reject_null"),
        df_between: bag.require_count("df_between")?,
        df_within: bag.require_count("df_within")?,
        group_count: bag.count("group_count"),
        total_n: bag.count("total_n"),
        groups,
        grand_mean: bag.float("grand_mean"),
    });
}

const STUDENT_RULES: &[LabelRule] = &[
    LabelRule::new("df", Matcher::ContainsAll(&["Степени свободы:", "ν = "]), Capture::FloatAfterLastEquals),
    LabelRule::new("alpha", Matcher::ContainsAll(&["Уровень значимости:", "α = "]), Capture::FloatAfterLastEquals),
    LabelRule::new("t_statistic", Matcher::StartsWith("t-статистика = "), Capture::FloatAfterLastEquals),
    LabelRule::new("critical_value", Matcher::Contains("Критическое значение"), Capture::FloatAfterLastEquals),
    LabelRule::new("p_value", Matcher::StartsWith("P-значение = "), Capture::FloatAfterLastEquals),
    LabelRule::new("method", Matcher::StartsWith("Метод:"), Capture::Text),
    LabelRule::new("reject_null", Matcher::Contains("H0 НЕ ОТВЕРГАЕТСЯ"), Capture::Flag(false)),
    LabelRule::new("reject_null", Matcher::Contains("H0 ОТВЕРГАЕТСЯ"), Capture::Flag(true)),
];

const STUDENT_MANDATORY: &[&str] = &["t_statistic", "df"];

/// Reads a two sample t-test report.
pub fn parse_student(text: &str) -> Result<StudentTResult, VizError> {
    let mut bag: FieldBag = FieldBag::default();

    for raw_line in text.lines() {
        let line: &str = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some((field, value)) = scan_line(STUDENT_RULES, line) {
            bag.insert(field, value);
        }
    }

    bag.require(STUDENT_MANDATORY)?;

    // `неравные дисперсии` contains `равные дисперсии`, so the longer
    // phrase has to be tested first.
    let method: Option<TTestMethod> = bag.text("method").and_then(|text| {
        if text.contains("неравные дисперсии") {
            return Some(TTestMethod::WelchApprox);
        }
        if text.contains("равные дисперсии") {
            return Some(TTestMethod::EqualVariance);
        }
        return None;
    });

    return Ok(StudentTResult {
        alpha: bag.alpha(),
        t_statistic: bag.require_float("t_statistic")?,
        critical_value: bag.float("critical_value"),
        p_value: bag.p_value("p_value"),
        reject_null: bag.flag("reject_null"),
        df: bag.require_float("df")?,
        method,
    });
}

const SHAPIRO_RULES: &[LabelRule] = &[
    LabelRule::new("n", Matcher::StartsWith("Размер выборки:"), Capture::IntAfterLastEquals),
    LabelRule::new("alpha", Matcher::ContainsAll(&["Уровень значимости:", "α = "]), Capture::FloatAfterLastEquals),
    LabelRule::new("w_statistic", Matcher::StartsWith("W-статистика = "), Capture::FloatAfterLastEquals),
    LabelRule::new("critical_value", Matcher::StartsWith("Критическое значение"), Capture::FloatAfterLastEquals),
    LabelRule::new("p_value", Matcher::StartsWith("Приблизительное p-value = "), Capture::FloatAfterLastEquals),
    LabelRule::new("reject_null", Matcher::Contains("H0 НЕ ОТВЕРГАЕТСЯ"), Capture::Flag(false)),
    LabelRule::new("reject_null", Matcher::ContainsAll(&["H0 ОТВЕРГАЕТСЯ", "не является нормальной"]), Capture::Flag(true)),
];

const SHAPIRO_MANDATORY: &[&str] = &["w_statistic"];

/// Reads a Shapiro-Wilk normality test report.
///
/// The rejection marker needs both `H0 ОТВЕРГАЕТСЯ` and
/// `не является нормальной` on one line, matching the phrasing the
/// engine uses when it rejects.
pub fn parse_shapiro_wilk(text: &str) -> Result<ShapiroWilkResult, VizError> {
    let mut bag: FieldBag = FieldBag::default();

    for raw_line in text.lines() {
        let line: &str = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some((field, value)) = scan_line(SHAPIRO_RULES, line) {
            bag.insert(field, value);
        }
    }

    bag.require(SHAPIRO_MANDATORY)?;

    return Ok(ShapiroWilkResult {
        alpha: bag.alpha(),
        w_statistic: bag.require_float("w_statistic")?,
        critical_value: bag.float("critical_value"),
        p_value: bag.p_value("p_value"),
        reject_null: bag.flag("reject_null"),
        n: bag.count("n"),
    });
}

const WILCOXON_RULES: &[LabelRule] = &[
    LabelRule::new("sizes", Matcher::StartsWith("Размеры выборок:"), Capture::PairCommaEquals),
    LabelRule::new("alpha", Matcher::ContainsAll(&["Уровень значимости:", "α = "]), Capture::FloatAfterLastEquals),
    LabelRule::new("method", Matcher::StartsWith("Метод:"), Capture::Text),
    LabelRule::new("w_statistic", Matcher::Contains("W (сумма рангов) = "), Capture::FloatAfterLastEquals),
    LabelRule::new("u_statistic", Matcher::Contains("U (Манна-Уитни) = "), Capture::FloatAfterLastEquals),
    LabelRule::new("mean_w", Matcher::Contains("E[W] под H0 = "), Capture::FloatAfterLastEquals),
    LabelRule::new("std_w", Matcher::Contains("SD[W] под H0 = "), Capture::FloatAfterLastEquals),
    LabelRule::new("z_statistic", Matcher::Contains("Z-статистика = "), Capture::FloatAfterLastEquals),
    LabelRule::new("critical_value", Matcher::StartsWith("Критическое значение"), Capture::FloatAfterLastEquals),
    LabelRule::new("p_value", Matcher::StartsWith("p-value"), Capture::FloatAfterLastEquals),
    LabelRule::new("num_ties", Matcher::StartsWith("Обнаружено связанных групп:"), Capture::IntAfterColon),
    LabelRule::new("reject_null", Matcher::Contains("H0 НЕ ОТВЕРГАЕТСЯ"), Capture::Flag(false)),
    LabelRule::new("reject_null", Matcher::ContainsAll(&["H0 ОТВЕРГАЕТСЯ", "различаются"]), Capture::Flag(true)),
];

const WILCOXON_MANDATORY: &[&str] = &["w_statistic"];

/// Reads a Wilcoxon rank sum report.
///
/// Note the marker ordering: `не различаются` contains `различаются`,
/// so the negative marker must win before the positive one is tried.
pub fn parse_wilcoxon(text: &str) -> Result<WilcoxonResult, VizError> {
    let mut bag: FieldBag = FieldBag::default();

    for raw_line in text.lines() {
        let line: &str = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some((field, value)) = scan_line(WILCOXON_RULES, line) {
            bag.insert(field, value);
        }
    }

    bag.require(WILCOXON_MANDATORY)?;

    let sizes: Option<(f64, f64)> = bag.pair("sizes");
    let use_normal_approx: bool = bag
        .text("method")
        .is_some_and(|text| text.contains("нормальное приближение"));

    return Ok(WilcoxonResult {
        alpha: bag.alpha(),
        w_statistic: bag.require_float("w_statistic")?,
        u_statistic: bag.float("u_statistic"),
        z_statistic: bag.float("z_statistic"),
        mean_w: bag.float("mean_w"),
        std_w: bag.float("std_w"),
        critical_value: bag.float("critical_value"),
        p_value: bag.p_value("p_value"),
        reject_null: bag.flag("reject_null"),
        n1: sizes.and_then(|(n1, _)| count_from(n1)),
        n2: sizes.and_then(|(_, n2)| count_from(n2)),
        num_ties: bag.count("num_ties"),
        use_normal_approx,
    });
}

const GRUBBS_RULES: &[LabelRule] = &[
    LabelRule::new("alpha", Matcher::ContainsAll(&["Уровень значимости:", "α = "]), Capture::FloatAfterLastEquals),
    LabelRule::new("g_statistic", Matcher::Contains("G-статистика"), Capture::FloatAfterColon),
    LabelRule::new("critical_value", Matcher::Contains("Критическое значение"), Capture::FloatAfterColon),
    LabelRule::new("outlier", Matcher::Contains("Подозрительное значение"), Capture::FloatAfterColon),
    LabelRule::new("conclusion", Matcher::Contains("Вывод"), Capture::Text),
];

const GRUBBS_MANDATORY: &[&str] = &["g_statistic"];

/// Reads a Grubbs outlier report.
///
/// The `# Данные` line opens the embedded sample, one observation per
/// line (first token). `Критерий Граббса` closes it and the test
/// fields follow. `Подозрительное значение:` may repeat, one line per
/// flagged value.
pub fn parse_grubbs(text: &str) -> Result<GrubbsResult, VizError> {
    let mut bag: FieldBag = FieldBag::default();
    let mut observations: Vec<f64> = Vec::new();
    let mut outliers: Vec<f64> = Vec::new();
    let mut in_data_block: bool = false;

    for raw_line in text.lines() {
        let line: &str = raw_line.trim();
        if line.is_empty() || line.starts_with("===") {
            continue;
        }
        if line.contains("# Данные") {
            in_data_block = true;
            continue;
        }
        if line.contains("Критерий Граббса") {
            in_data_block = false;
            continue;
        }
        if in_data_block {
            if let Some(value) = float_token(line) {
                observations.push(value);
            }
            continue;
        }
        if let Some((field, value)) = scan_line(GRUBBS_RULES, line) {
            if field == "outlier" {
                if let RawValue::Number(value) = value {
                    outliers.push(value);
                }
                continue;
            }
            bag.insert(field, value);
        }
    }

    bag.require(GRUBBS_MANDATORY)?;

    return Ok(GrubbsResult {
        alpha: bag.alpha(),
        g_statistic: bag.require_float("g_statistic")?,
        critical_value: bag.float("critical_value"),
        observations,
        outliers,
        conclusion: bag.text("conclusion"),
    });
}

/// Reads a Weibull fit report.
///
/// Outside the data block the report is `key value` pairs, two tokens
/// per line: `parameter_1` (scale λ), `parameter_2` (shape k) and their
/// standard errors. The `# Данные` comment opens the data block of
/// `value flag` rows, flag `1` meaning right censored.
pub fn parse_weibull(text: &str, method: WeibullFitMethod) -> Result<WeibullFitResult, VizError> {
    let mut scale: Option<f64> = None;
    let mut shape: Option<f64> = None;
    let mut scale_std_error: Option<f64> = None;
    let mut shape_std_error: Option<f64> = None;
    let mut observations: Vec<f64> = Vec::new();
    let mut censored: Vec<bool> = Vec::new();
    let mut in_data_block: bool = false;

    for raw_line in text.lines() {
        let line: &str = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with('#') {
            if line.contains("Данные") {
                in_data_block = true;
            }
            continue;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != 2 {
            continue;
        }
        if in_data_block {
            if let (Ok(value), Ok(flag)) = (tokens[0].parse::<f64>(), tokens[1].parse::<i64>()) {
                observations.push(value);
                censored.push(flag == 1);
            }
            continue;
        }
        let value: f64 = match tokens[1].parse::<f64>() {
            Ok(value) => value,
            Err(_) => continue,
        };
        match tokens[0] {
            "parameter_1" => scale = Some(value),
            "parameter_2" => shape = Some(value),
            "std_error_1" => scale_std_error = Some(value),
            "std_error_2" => shape_std_error = Some(value),
            _ => {}
        }
    }

    if let (Some(scale), Some(shape)) = (scale, shape) {
        return Ok(WeibullFitResult {
            method,
            scale,
            shape,
            scale_std_error,
            shape_std_error,
            observations,
            censored,
        });
    }

    let mut missing: Vec<&'static str> = Vec::new();
    if scale.is_none() {
        missing.push("parameter_1");
    }
    if shape.is_none() {
        missing.push("parameter_2");
    }
    return Err(VizError::Parse { missing });
}

/// Reads a confidence interval report.
///
/// The whole report is `key value` pairs. A scenario section exists
/// once its `_lower` and `_upper` keys are both present; at least one
/// complete interval is mandatory.
pub fn parse_confidence_intervals(text: &str) -> Result<ConfidenceIntervalReport, VizError> {
    let mut params: HashMap<String, f64> = HashMap::new();

    for raw_line in text.lines() {
        let line: &str = raw_line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with("===") {
            continue;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 2 {
            continue;
        }
        if let Ok(value) = tokens[1].parse::<f64>() {
            let _ = params.insert(tokens[0].to_string(), value);
        }
    }

    let mut sections: Vec<CiSection> = Vec::new();
    if let Some(interval) = interval_from(
        &params,
        "μ (среднее)",
        "ci_mean_known_sigma_lower",
        "ci_mean_known_sigma_upper",
        None,
        Some("ci_mean_known_sigma_width"),
    ) {
        sections.push(CiSection {
            scenario: CiScenario::KnownSigma,
            intervals: vec![interval],
        });
    }
    if let Some(interval) = interval_from(
        &params,
        "μ (среднее)",
        "ci_mean_unknown_sigma_lower",
        "ci_mean_unknown_sigma_upper",
        None,
        Some("ci_mean_unknown_sigma_width"),
    ) {
        sections.push(CiSection {
            scenario: CiScenario::UnknownSigma,
            intervals: vec![interval],
        });
    }
    let mut unknown_mu: Vec<IntervalEstimate> = Vec::new();
    if let Some(interval) = interval_from(
        &params,
        "σ² (дисперсия)",
        "ci_variance_lower",
        "ci_variance_upper",
        Some("ci_variance_point"),
        None,
    ) {
        unknown_mu.push(interval);
    }
    if let Some(interval) = interval_from(
        &params,
        "σ (ст. откл.)",
        "ci_sigma_lower",
        "ci_sigma_upper",
        Some("ci_sigma_point"),
        None,
    ) {
        unknown_mu.push(interval);
    }
    if !unknown_mu.is_empty() {
        sections.push(CiSection {
            scenario: CiScenario::UnknownMu,
            intervals: unknown_mu,
        });
    }

    if sections.is_empty() {
        return Err(VizError::Parse {
            missing: vec!["ci_*_lower", "ci_*_upper"],
        });
    }

    return Ok(ConfidenceIntervalReport {
        confidence: params.get("confidence").copied(),
        sample_mean: params.get("sample_mean").copied(),
        sample_std: params.get("sample_std").copied(),
        sample_size: params.get("sample_size").and_then(|&n| count_from(n)),
        known_sigma: params.get("known_sigma").copied(),
        df: params.get("df").copied(),
        sections,
    });
}

fn interval_from(
    params: &HashMap<String, f64>,
    name: &'static str,
    lower_key: &str,
    upper_key: &str,
    center_key: Option<&str>,
    width_key: Option<&str>,
) -> Option<IntervalEstimate> {
    let lower: f64 = *params.get(lower_key)?;
    let upper: f64 = *params.get(upper_key)?;
    let center: Option<f64> = center_key.and_then(|key| params.get(key).copied());
    let width: Option<f64> = width_key.and_then(|key| params.get(key).copied());
    return Some(IntervalEstimate {
        name,
        lower,
        upper,
        center,
        width,
    });
}

/// Reads a percentile table report.
///
/// A `distribution_type <name>` line opens a table; data rows are at
/// least four numeric tokens, `p value lower upper`, with `p` a
/// fraction. Rows come out sorted by probability.
pub fn parse_percentiles(text: &str) -> Result<PercentileTableReport, VizError> {
    let mut tables: Vec<PercentileTable> = Vec::new();

    for raw_line in text.lines() {
        let line: &str = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.first() == Some(&"distribution_type") {
            if let Some(name) = tokens.get(1) {
                tables.push(PercentileTable {
                    distribution: (*name).to_string(),
                    rows: Vec::new(),
                });
            }
            continue;
        }
        if tokens.len() < 4 {
            continue;
        }
        let numbers: Vec<f64> = tokens
            .iter()
            .take(4)
            .filter_map(|token| token.parse::<f64>().ok())
            .collect();
        if numbers.len() < 4 {
            continue;
        }
        // Rows before the first `distribution_type` have no table to
        // land in and are dropped.
        if let Some(table) = tables.last_mut() {
            table.rows.push(PercentileRow {
                probability_percent: numbers[0] * 100.0,
                value: numbers[1],
                lower: numbers[2],
                upper: numbers[3],
            });
        }
    }

    tables.retain(|table| !table.rows.is_empty());
    if tables.is_empty() {
        return Err(VizError::Parse {
            missing: vec!["distribution_type", "rows"],
        });
    }
    for table in &mut tables {
        table
            .rows
            .sort_by(|a, b| a.probability_percent.total_cmp(&b.probability_percent));
    }
    return Ok(PercentileTableReport { tables });
}

/// Parses `text` as a report of the given kind.
pub fn parse_report(kind: TestKind, text: &str) -> Result<TestResult, VizError> {
    return match kind {
        TestKind::Anova => parse_anova(text).map(TestResult::Anova),
        TestKind::StudentT => parse_student(text).map(TestResult::StudentT),
        TestKind::ShapiroWilk => parse_shapiro_wilk(text).map(TestResult::ShapiroWilk),
        TestKind::WilcoxonRankSum => parse_wilcoxon(text).map(TestResult::WilcoxonRankSum),
        TestKind::Grubbs => parse_grubbs(text).map(TestResult::Grubbs),
        TestKind::WeibullMle => {
            parse_weibull(text, WeibullFitMethod::Mle).map(TestResult::Weibull)
        }
        TestKind::WeibullMls => {
            parse_weibull(text, WeibullFitMethod::Mls).map(TestResult::Weibull)
        }
        TestKind::ConfidenceInterval => {
            parse_confidence_intervals(text).map(TestResult::ConfidenceInterval)
        }
        TestKind::PercentileTable => parse_percentiles(text).map(TestResult::PercentileTable),
    };
}
