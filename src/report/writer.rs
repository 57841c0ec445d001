//! Canonical text form of every report family.
//!
//! The writers emit the exact vocabulary the readers in
//! [crate::report::parser] understand, so `parse(write(record))`
//! restores every mandatory field exactly and the optional ones within
//! formatting precision. Statistics are printed at 4 decimals, the
//! Shapiro-Wilk W at 6 and rank sums at 2, mirroring the originals.
//!
//! Optional fields that are `None` simply do not appear in the output.

use crate::report::model::{
    AnovaResult, CiScenario, ConfidenceIntervalReport, GrubbsResult, IntervalEstimate,
    PercentileTableReport, ShapiroWilkResult, StudentTResult, TTestMethod, TestResult,
    WeibullFitMethod, WeibullFitResult, WilcoxonResult,
};

const RULER: &str = "========================================\n";

#[must_use]
pub fn write_anova(result: &AnovaResult) -> String {
    let mut out: String = String::new();
    out.push_str(RULER);
    out.push_str("  ОДНОФАКТОРНЫЙ ДИСПЕРСИОННЫЙ АНАЛИЗ (ANOVA)\n");
    out.push_str(RULER);
    out.push('\n');

    if let Some(group_count) = result.group_count {
        out.push_str(&format!("Количество групп: k = {}\n", group_count));
    }
    if let Some(total_n) = result.total_n {
        out.push_str(&format!("Общее количество наблюдений: N = {}\n", total_n));
    }
    out.push_str(&format!("Уровень значимости: α = {:.3}\n", result.alpha));
    out.push('\n');

    if !result.groups.is_empty() || result.grand_mean.is_some() {
        out.push_str("Информация о группах:\n");
        for (index, group) in result.groups.iter().enumerate() {
            out.push_str(&format!(
                "  Группа {}: n = {}, среднее = {:.4}\n",
                index + 1,
                group.size,
                group.mean
            ));
        }
        if let Some(grand_mean) = result.grand_mean {
            out.push_str(&format!("Общее среднее: x̄ = {:.4}\n", grand_mean));
        }
        out.push('\n');
    }

    out.push_str("Таблица ANOVA:\n");
    out.push_str("Источник вариации        df\n");
    out.push_str(&format!("Между группами           {}\n", result.df_between));
    out.push_str(&format!("Внутри групп             {}\n", result.df_within));
    out.push('\n');

    out.push_str(&format!("F-статистика = {:.4}\n", result.f_statistic));
    if let Some(critical) = result.critical_value {
        out.push_str(&format!("Критическое значение F_crit = {:.4}\n", critical));
    }
    if let Some(p_value) = result.p_value {
        out.push_str(&format!("p-value = {:.4}\n", p_value));
    }
    out.push('\n');

    out.push_str("Гипотеза H0: средние всех групп равны\n");
    match result.reject_null {
        Some(true) => out.push_str("РЕЗУЛЬТАТ: H0 ОТВЕРГАЕТСЯ (средние групп различаются)\n"),
        Some(false) => {
            out.push_str("РЕЗУЛЬТАТ: H0 НЕ ОТВЕРГАЕТСЯ (средние групп не различаются)\n");
        }
        None => {}
    }
    return out;
}

#[must_use]
pub fn write_student(result: &StudentTResult) -> String {
    let mut out: String = String::new();
    out.push_str(RULER);
    out.push_str("  t-КРИТЕРИЙ СТЬЮДЕНТА (Student's t-test)\n");
    out.push_str("  для сравнения средних\n");
    out.push_str(RULER);
    out.push('\n');

    match result.method {
        Some(TTestMethod::EqualVariance) => {
            out.push_str("Метод: равные дисперсии (классический)\n");
        }
        Some(TTestMethod::WelchApprox) => out.push_str("Метод: неравные дисперсии (Уэлч)\n"),
        None => {}
    }
    out.push_str(&format!("Степени свободы: ν = {:.2}\n", result.df));
    out.push_str(&format!("Уровень значимости: α = {:.3}\n", result.alpha));
    out.push('\n');

    out.push_str(&format!("t-статистика = {:.4}\n", result.t_statistic));
    if let Some(critical) = result.critical_value {
        out.push_str(&format!(
            "Критическое значение t_{{{:.3}, {:.2}}} = {:.4}\n",
            1.0 - result.alpha * 0.5,
            result.df,
            critical
        ));
    }
    if let Some(p_value) = result.p_value {
        out.push_str(&format!("P-значение = {:.4}\n", p_value));
    }
    out.push('\n');

    out.push_str("Гипотеза H0: μ₁ = μ₂ (средние равны)\n");
    match result.reject_null {
        Some(true) => out.push_str("РЕЗУЛЬТАТ: H0 ОТВЕРГАЕТСЯ (средние различаются)\n"),
        Some(false) => out.push_str("РЕЗУЛЬТАТ: H0 НЕ ОТВЕРГАЕТСЯ (средние не различаются)\n"),
        None => {}
    }
    return out;
}

#[must_use]
pub fn write_shapiro_wilk(result: &ShapiroWilkResult) -> String {
    let mut out: String = String::new();
    out.push_str(RULER);
    out.push_str("  ТЕСТ ШАПИРО-УИЛКА на нормальность\n");
    out.push_str(RULER);
    out.push('\n');

    if let Some(n) = result.n {
        out.push_str(&format!("Размер выборки: n = {}\n", n));
    }
    out.push_str(&format!("Уровень значимости: α = {:.3}\n", result.alpha));
    out.push('\n');

    out.push_str(&format!("W-статистика = {:.6}\n", result.w_statistic));
    if let Some(critical) = result.critical_value {
        out.push_str(&format!("Критическое значение W_crit = {:.6}\n", critical));
    }
    if let Some(p_value) = result.p_value {
        out.push_str(&format!("Приблизительное p-value = {:.4}\n", p_value));
    }
    out.push('\n');

    out.push_str("Гипотеза H0: выборка из нормального распределения\n");
    match result.reject_null {
        Some(true) => {
            out.push_str("РЕЗУЛЬТАТ: H0 ОТВЕРГАЕТСЯ (выборка не является нормальной)\n");
        }
        Some(false) => {
            out.push_str("РЕЗУЛЬТАТ: H0 НЕ ОТВЕРГАЕТСЯ (нормальность не отклонена)\n");
        }
        None => {}
    }
    return out;
}

#[must_use]
pub fn write_wilcoxon(result: &WilcoxonResult) -> String {
    let mut out: String = String::new();
    out.push_str(RULER);
    out.push_str("  КРИТЕРИЙ УИЛКОКСОНА (сумма рангов)\n");
    out.push_str(RULER);
    out.push('\n');

    if let (Some(n1), Some(n2)) = (result.n1, result.n2) {
        out.push_str(&format!("Размеры выборок: n₁ = {}, n₂ = {}\n", n1, n2));
    }
    if result.use_normal_approx {
        out.push_str("Метод: нормальное приближение\n");
    } else {
        out.push_str("Метод: точное распределение\n");
    }
    out.push_str(&format!("Уровень значимости: α = {:.3}\n", result.alpha));
    out.push('\n');

    out.push_str(&format!("W (сумма рангов) = {:.2}\n", result.w_statistic));
    if let Some(u_statistic) = result.u_statistic {
        out.push_str(&format!("U (Манна-Уитни) = {:.2}\n", u_statistic));
    }
    if let Some(mean_w) = result.mean_w {
        out.push_str(&format!("E[W] под H0 = {:.2}\n", mean_w));
    }
    if let Some(std_w) = result.std_w {
        out.push_str(&format!("SD[W] под H0 = {:.2}\n", std_w));
    }
    if let Some(z_statistic) = result.z_statistic {
        out.push_str(&format!("Z-статистика = {:.4}\n", z_statistic));
    }
    if let Some(critical) = result.critical_value {
        out.push_str(&format!(
            "Критическое значение z_{{{:.3}}} = {:.4}\n",
            1.0 - result.alpha * 0.5,
            critical
        ));
    }
    if let Some(p_value) = result.p_value {
        out.push_str(&format!("p-value = {:.4}\n", p_value));
    }
    if let Some(num_ties) = result.num_ties {
        out.push_str(&format!("Обнаружено связанных групп: {}\n", num_ties));
    }
    out.push('\n');

    out.push_str("Гипотеза H0: распределения выборок совпадают\n");
    match result.reject_null {
        Some(true) => out.push_str("РЕЗУЛЬТАТ: H0 ОТВЕРГАЕТСЯ (выборки различаются)\n"),
        Some(false) => out.push_str("РЕЗУЛЬТАТ: H0 НЕ ОТВЕРГАЕТСЯ (выборки не различаются)\n"),
        None => {}
    }
    return out;
}

#[must_use]
pub fn write_grubbs(result: &GrubbsResult) -> String {
    let mut out: String = String::new();
    out.push_str(RULER);
    out.push_str("  АНАЛИЗ ВЫБРОСОВ\n");
    out.push_str(RULER);
    out.push('\n');

    out.push_str("# Данные (исходная выборка)\n");
    for observation in &result.observations {
        out.push_str(&format!("{:.4}\n", observation));
    }
    out.push('\n');

    out.push_str("Критерий Граббса (максимальное отклонение)\n");
    out.push_str(&format!("Уровень значимости: α = {:.3}\n", result.alpha));
    out.push_str(&format!("G-статистика: {:.4}\n", result.g_statistic));
    if let Some(critical) = result.critical_value {
        out.push_str(&format!("Критическое значение: {:.4}\n", critical));
    }
    for outlier in &result.outliers {
        out.push_str(&format!("Подозрительное значение: {:.4}\n", outlier));
    }
    if let Some(conclusion) = &result.conclusion {
        out.push_str(&format!("Вывод: {}\n", conclusion));
    }
    return out;
}

#[must_use]
pub fn write_weibull(result: &WeibullFitResult) -> String {
    let method_tag: &str = match result.method {
        WeibullFitMethod::Mle => "MLE",
        WeibullFitMethod::Mls => "MLS",
    };

    let mut out: String = String::new();
    out.push_str(&format!(
        "# Результаты подбора распределения Вейбулла ({})\n",
        method_tag
    ));
    out.push_str(&format!("parameter_1 {:.6}\n", result.scale));
    out.push_str(&format!("parameter_2 {:.6}\n", result.shape));
    if let Some(scale_std_error) = result.scale_std_error {
        out.push_str(&format!("std_error_1 {:.6}\n", scale_std_error));
    }
    if let Some(shape_std_error) = result.shape_std_error {
        out.push_str(&format!("std_error_2 {:.6}\n", shape_std_error));
    }
    out.push('\n');

    out.push_str("# Данные (значение, флаг цензурирования)\n");
    for (observation, censored) in result.observations.iter().zip(result.censored.iter()) {
        out.push_str(&format!(
            "{:.6} {}\n",
            observation,
            if *censored { 1 } else { 0 }
        ));
    }
    return out;
}

#[must_use]
pub fn write_confidence_intervals(report: &ConfidenceIntervalReport) -> String {
    let mut out: String = String::new();
    out.push_str("# Доверительные интервалы\n");

    if let Some(confidence) = report.confidence {
        out.push_str(&format!("confidence {:.6}\n", confidence));
    }
    if let Some(sample_mean) = report.sample_mean {
        out.push_str(&format!("sample_mean {:.6}\n", sample_mean));
    }
    if let Some(sample_std) = report.sample_std {
        out.push_str(&format!("sample_std {:.6}\n", sample_std));
    }
    if let Some(sample_size) = report.sample_size {
        out.push_str(&format!("sample_size {}\n", sample_size));
    }
    if let Some(known_sigma) = report.known_sigma {
        out.push_str(&format!("known_sigma {:.6}\n", known_sigma));
    }
    if let Some(df) = report.df {
        out.push_str(&format!("df {:.6}\n", df));
    }

    for section in &report.sections {
        match section.scenario {
            CiScenario::KnownSigma => {
                for interval in &section.intervals {
                    push_interval(&mut out, "ci_mean_known_sigma", interval, true);
                }
            }
            CiScenario::UnknownSigma => {
                for interval in &section.intervals {
                    push_interval(&mut out, "ci_mean_unknown_sigma", interval, true);
                }
            }
            CiScenario::UnknownMu => {
                for interval in &section.intervals {
                    let prefix: Option<&str> = match interval.name {
                        "σ² (дисперсия)" => Some("ci_variance"),
                        "σ (ст. откл.)" => Some("ci_sigma"),
                        _ => None,
                    };
                    if let Some(prefix) = prefix {
                        push_interval(&mut out, prefix, interval, false);
                    }
                }
            }
        }
    }
    return out;
}

/// Mean scenarios carry a `_width` key, the variance and deviation
/// scenarios a `_point` key.
fn push_interval(out: &mut String, prefix: &str, interval: &IntervalEstimate, with_width: bool) {
    out.push_str(&format!("{}_lower {:.6}\n", prefix, interval.lower));
    out.push_str(&format!("{}_upper {:.6}\n", prefix, interval.upper));
    if with_width {
        if let Some(width) = interval.width {
            out.push_str(&format!("{}_width {:.6}\n", prefix, width));
        }
    } else if let Some(center) = interval.center {
        out.push_str(&format!("{}_point {:.6}\n", prefix, center));
    }
}

#[must_use]
pub fn write_percentiles(report: &PercentileTableReport) -> String {
    let mut out: String = String::new();
    out.push_str("# Таблица процентилей: p значение нижняя верхняя\n");
    for table in &report.tables {
        out.push_str(&format!("distribution_type {}\n", table.distribution));
        for row in &table.rows {
            out.push_str(&format!(
                "{:.6} {:.6} {:.6} {:.6}\n",
                row.probability_percent / 100.0,
                row.value,
                row.lower,
                row.upper
            ));
        }
        out.push('\n');
    }
    return out;
}

/// Serializes any result into its canonical text form.
#[must_use]
pub fn write_report(result: &TestResult) -> String {
    return match result {
        TestResult::Anova(r) => write_anova(r),
        TestResult::StudentT(r) => write_student(r),
        TestResult::ShapiroWilk(r) => write_shapiro_wilk(r),
        TestResult::WilcoxonRankSum(r) => write_wilcoxon(r),
        TestResult::Grubbs(r) => write_grubbs(r),
        TestResult::Weibull(r) => write_weibull(r),
        TestResult::ConfidenceInterval(r) => write_confidence_intervals(r),
        TestResult::PercentileTable(r) => write_percentiles(r),
    };
}
