//! Typed records for every report the plotting pipeline understands.
//!
//! One plain text report maps to one variant of [TestResult]. The
//! payloads keep the vocabulary of the reports themselves (statistics,
//! critical values, embedded data sections) and nothing else; decisions
//! about curves and canvases belong to the plotting layer.
//!
//! The records are immutable once parsed. Optional fields are `Option`
//! and stay `None` when the report never stated them: in particular
//! [TestResult::reject_null] is never defaulted to `false`.

/// Identifies the family of a parsed report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestKind {
    Anova,
    StudentT,
    ShapiroWilk,
    WilcoxonRankSum,
    Grubbs,
    WeibullMle,
    WeibullMls,
    ConfidenceInterval,
    PercentileTable,
}

impl TestKind {
    /// Short machine readable name, used in log lines.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        return match self {
            TestKind::Anova => "anova",
            TestKind::StudentT => "student_t",
            TestKind::ShapiroWilk => "shapiro_wilk",
            TestKind::WilcoxonRankSum => "wilcoxon_rank_sum",
            TestKind::Grubbs => "grubbs",
            TestKind::WeibullMle => "weibull_mle",
            TestKind::WeibullMls => "weibull_mls",
            TestKind::ConfidenceInterval => "confidence_interval",
            TestKind::PercentileTable => "percentile_table",
        };
    }
}

/// Size and mean of one ANOVA group, from the
/// `Группа ...: n = ..., среднее = ...` rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupSummary {
    pub size: u32,
    pub mean: f64,
}

/// One way ANOVA report.
#[derive(Debug, Clone, PartialEq)]
pub struct AnovaResult {
    pub alpha: f64,
    pub f_statistic: f64,
    pub critical_value: Option<f64>,
    pub p_value: Option<f64>,
    pub reject_null: Option<bool>,
    /// Numerator degrees of freedom (between groups).
    pub df_between: u32,
    /// Denominator degrees of freedom (within groups).
    pub df_within: u32,
    pub group_count: Option<u32>,
    pub total_n: Option<u32>,
    pub groups: Vec<GroupSummary>,
    pub grand_mean: Option<f64>,
}

/// Which two sample t-test the engine ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TTestMethod {
    /// Classical pooled variance test.
    EqualVariance,
    /// Welch's test with the Satterthwaite df approximation.
    WelchApprox,
}

/// Two sample t-test report.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentTResult {
    pub alpha: f64,
    pub t_statistic: f64,
    pub critical_value: Option<f64>,
    pub p_value: Option<f64>,
    pub reject_null: Option<bool>,
    /// Fractional for the Welch approximation, hence a float.
    pub df: f64,
    pub method: Option<TTestMethod>,
}

/// Shapiro-Wilk normality test report.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapiroWilkResult {
    pub alpha: f64,
    pub w_statistic: f64,
    pub critical_value: Option<f64>,
    pub p_value: Option<f64>,
    pub reject_null: Option<bool>,
    pub n: Option<u32>,
}

/// Wilcoxon rank sum (Mann-Whitney) report.
#[derive(Debug, Clone, PartialEq)]
pub struct WilcoxonResult {
    pub alpha: f64,
    /// Rank sum of the first sample.
    pub w_statistic: f64,
    pub u_statistic: Option<f64>,
    pub z_statistic: Option<f64>,
    /// Expectation of W under the null hypothesis.
    pub mean_w: Option<f64>,
    /// Standard deviation of W under the null hypothesis.
    pub std_w: Option<f64>,
    /// On the z scale when the normal approximation was used.
    pub critical_value: Option<f64>,
    pub p_value: Option<f64>,
    pub reject_null: Option<bool>,
    pub n1: Option<u32>,
    pub n2: Option<u32>,
    pub num_ties: Option<u32>,
    pub use_normal_approx: bool,
}

/// Grubbs outlier test report, with the examined sample embedded.
#[derive(Debug, Clone, PartialEq)]
pub struct GrubbsResult {
    pub alpha: f64,
    pub g_statistic: f64,
    pub critical_value: Option<f64>,
    /// The raw sample from the `# Данные` section.
    pub observations: Vec<f64>,
    /// Values the report flagged as suspicious.
    pub outliers: Vec<f64>,
    pub conclusion: Option<String>,
}

/// How the Weibull parameters were estimated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeibullFitMethod {
    /// Maximum likelihood.
    Mle,
    /// Median rank regression (least squares).
    Mls,
}

/// Weibull fit report, with the (possibly censored) sample embedded.
///
/// `observations` and `censored` are parallel and always of equal
/// length.
#[derive(Debug, Clone, PartialEq)]
pub struct WeibullFitResult {
    pub method: WeibullFitMethod,
    /// λ, `parameter_1` of the report.
    pub scale: f64,
    /// k, `parameter_2` of the report.
    pub shape: f64,
    pub scale_std_error: Option<f64>,
    pub shape_std_error: Option<f64>,
    pub observations: Vec<f64>,
    pub censored: Vec<bool>,
}

/// Which nuisance parameter situation a confidence interval section
/// covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CiScenario {
    /// Interval for the mean, population deviation known.
    KnownSigma,
    /// Interval for the mean, deviation estimated from the sample.
    UnknownSigma,
    /// Intervals for the variance and the deviation, mean estimated.
    UnknownMu,
}

impl CiScenario {
    /// Panel title, in the vocabulary of the reports.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        return match self {
            CiScenario::KnownSigma => "При известной σ (нормальное распределение)",
            CiScenario::UnknownSigma => "При неизвестной σ (t-распределение)",
            CiScenario::UnknownMu => "При неизвестном μ (χ² для дисперсии)",
        };
    }
}

/// One estimated interval of a confidence interval report.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalEstimate {
    /// Parameter label shown on the axis, for example `μ (среднее)`.
    pub name: &'static str,
    pub lower: f64,
    pub upper: f64,
    /// Point estimate, when the report carries one.
    pub center: Option<f64>,
    /// Reported width, when the report carries one.
    pub width: Option<f64>,
}

impl IntervalEstimate {
    /// The point estimate, defaulting to the middle of the interval.
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        return self.center.unwrap_or((self.lower + self.upper) * 0.5);
    }

    /// The interval width, defaulting to `upper - lower`.
    #[must_use]
    pub fn span(&self) -> f64 {
        return self.width.unwrap_or(self.upper - self.lower);
    }
}

/// All intervals of one scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct CiSection {
    pub scenario: CiScenario,
    pub intervals: Vec<IntervalEstimate>,
}

/// Confidence interval report. Sections appear only when the report
/// carried a complete `(lower, upper)` pair for them.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfidenceIntervalReport {
    pub confidence: Option<f64>,
    pub sample_mean: Option<f64>,
    pub sample_std: Option<f64>,
    pub sample_size: Option<u32>,
    pub known_sigma: Option<f64>,
    pub df: Option<f64>,
    pub sections: Vec<CiSection>,
}

/// One row of a percentile table: `p value lower upper`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentileRow {
    /// In percent: a file row with `p = 0.01` yields `1.0`.
    pub probability_percent: f64,
    pub value: f64,
    pub lower: f64,
    pub upper: f64,
}

/// Percentile table of one distribution, rows sorted by probability.
#[derive(Debug, Clone, PartialEq)]
pub struct PercentileTable {
    pub distribution: String,
    pub rows: Vec<PercentileRow>,
}

/// Percentile report: one table per `distribution_type` declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct PercentileTableReport {
    pub tables: Vec<PercentileTable>,
}

/// A parsed report of any family.
#[derive(Debug, Clone, PartialEq)]
pub enum TestResult {
    Anova(AnovaResult),
    StudentT(StudentTResult),
    ShapiroWilk(ShapiroWilkResult),
    WilcoxonRankSum(WilcoxonResult),
    Grubbs(GrubbsResult),
    Weibull(WeibullFitResult),
    ConfidenceInterval(ConfidenceIntervalReport),
    PercentileTable(PercentileTableReport),
}

impl TestResult {
    #[must_use]
    pub fn kind(&self) -> TestKind {
        return match self {
            TestResult::Anova(_) => TestKind::Anova,
            TestResult::StudentT(_) => TestKind::StudentT,
            TestResult::ShapiroWilk(_) => TestKind::ShapiroWilk,
            TestResult::WilcoxonRankSum(_) => TestKind::WilcoxonRankSum,
            TestResult::Grubbs(_) => TestKind::Grubbs,
            TestResult::Weibull(fit) => match fit.method {
                WeibullFitMethod::Mle => TestKind::WeibullMle,
                WeibullFitMethod::Mls => TestKind::WeibullMls,
            },
            TestResult::ConfidenceInterval(_) => TestKind::ConfidenceInterval,
            TestResult::PercentileTable(_) => TestKind::PercentileTable,
        };
    }

    /// Significance level, for the report families that state one.
    #[must_use]
    pub fn alpha(&self) -> Option<f64> {
        return match self {
            TestResult::Anova(r) => Some(r.alpha),
            TestResult::StudentT(r) => Some(r.alpha),
            TestResult::ShapiroWilk(r) => Some(r.alpha),
            TestResult::WilcoxonRankSum(r) => Some(r.alpha),
            TestResult::Grubbs(r) => Some(r.alpha),
            TestResult::Weibull(_) => None,
            TestResult::ConfidenceInterval(_) => None,
            TestResult::PercentileTable(_) => None,
        };
    }

    /// The statistic that gets measured against the critical value.
    ///
    /// For the Wilcoxon test this is the z statistic when the normal
    /// approximation was used, otherwise the rank sum itself.
    #[must_use]
    pub fn statistic(&self) -> Option<f64> {
        return match self {
            TestResult::Anova(r) => Some(r.f_statistic),
            TestResult::StudentT(r) => Some(r.t_statistic),
            TestResult::ShapiroWilk(r) => Some(r.w_statistic),
            TestResult::WilcoxonRankSum(r) => r.z_statistic.or(Some(r.w_statistic)),
            TestResult::Grubbs(r) => Some(r.g_statistic),
            TestResult::Weibull(_) => None,
            TestResult::ConfidenceInterval(_) => None,
            TestResult::PercentileTable(_) => None,
        };
    }

    /// The decision the report stated about the null hypothesis, if any.
    #[must_use]
    pub fn reject_null(&self) -> Option<bool> {
        return match self {
            TestResult::Anova(r) => r.reject_null,
            TestResult::StudentT(r) => r.reject_null,
            TestResult::ShapiroWilk(r) => r.reject_null,
            TestResult::WilcoxonRankSum(r) => r.reject_null,
            TestResult::Grubbs(_) => None,
            TestResult::Weibull(_) => None,
            TestResult::ConfidenceInterval(_) => None,
            TestResult::PercentileTable(_) => None,
        };
    }
}
