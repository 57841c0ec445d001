//! Builds the [FigureModel] of every figure family out of parsed reports.
//!
//! Composition is pure geometry: each function turns a report (and the
//! sample files it references, when it references any) into panels of
//! [Element]s, without touching the drawing backend. The renderer in
//! [crate::plot::render] walks the finished model.
//!
//! Panels that cannot be built from the available data are dropped and
//! recorded in [ComposedFigure::skipped] so the orchestrator can log
//! them, while their sibling panels still render.

use crate::{
    configuration::curve::{CURVE_POINTS, POSITIVE_SUPPORT_LEFT_EDGE},
    distribution_trait::Distribution,
    distributions::{DistributionSpec, Normal::StdNormal},
    errors::VizError,
    plot::figure::{
        Bar, ComposedFigure, Element, FigureModel, Layout, MarkerShape, PaletteColor, Panel,
    },
    plot::geometry::{
        box_stats, density_curve, density_histogram, histogram, jittered, qq_normal_points,
        region_under_curve, sturges_bins,
    },
    regions::{grubbs_boundary, CriticalRegion, Verdict},
    report::model::{
        AnovaResult, CiScenario, ConfidenceIntervalReport, GrubbsResult, PercentileRow,
        PercentileTable, ShapiroWilkResult, StudentTResult, TTestMethod, WeibullFitMethod,
        WeibullFitResult, WilcoxonResult,
    },
    samples::SampleData,
};

/// Bin count of the Grubbs histogram panel.
const GRUBBS_HISTOGRAM_BINS: usize = 20;

/// Fixed jitter seeds so reruns draw identical strip plots.
const STRIP_SEED_FIRST: u64 = 11;
const STRIP_SEED_SECOND: u64 = 23;

/// Jitter amplitude of the strip plots, in category units.
const STRIP_AMPLITUDE: f64 = 0.15;

/// Degrees of freedom shown by the Student's t gallery figure.
const GALLERY_T_DFS: [f64; 4] = [3.0, 5.0, 10.0, 30.0];
/// Standard deviations shown by the normal gallery figure.
const GALLERY_NORMAL_SIGMAS: [f64; 5] = [0.5, 0.8, 1.0, 1.5, 2.0];
/// Degrees of freedom shown by the chi squared gallery figure.
const GALLERY_CHI_SQUARED_DFS: [f64; 5] = [5.0, 10.0, 15.0, 20.0, 30.0];
/// Curve colors of the gallery figures, cycled in order.
const GALLERY_COLORS: [PaletteColor; 5] = [
    PaletteColor::Blue,
    PaletteColor::Red,
    PaletteColor::Green,
    PaletteColor::Orange,
    PaletteColor::Gray,
];

/// Verdict text and its color, red for a rejected null hypothesis.
fn verdict_for(reject: bool) -> (String, PaletteColor) {
    if reject {
        return ("H0 ОТВЕРГАЕТСЯ".to_string(), PaletteColor::Red);
    }
    return ("H0 НЕ ОТВЕРГАЕТСЯ".to_string(), PaletteColor::Green);
}

/// Picks the verdict annotation. The decision printed by the report wins;
/// the classifier only fills the gap when the report stated none.
fn verdict_annotation(reported: Option<bool>, fallback: Verdict) -> (String, PaletteColor) {
    let reject: bool = reported.unwrap_or(fallback == Verdict::InCriticalRegion);
    return verdict_for(reject);
}

/// Largest y over a polyline, `0.0` for an empty one.
fn curve_peak(points: &[(f64, f64)]) -> f64 {
    return points.iter().map(|&(_, y)| y).fold(0.0_f64, f64::max);
}

/// Largest bar height, `0.0` when there are no bars.
fn bars_peak(bars: &[Bar]) -> f64 {
    return bars.iter().map(|bar| bar.height).fold(0.0_f64, f64::max);
}

/// ANOVA figure: the F density with its shaded upper critical tail next
/// to a bar chart of the group means.
pub fn compose_anova(result: &AnovaResult) -> Result<ComposedFigure, VizError> {
    let spec: DistributionSpec = DistributionSpec::F {
        df1: f64::from(result.df_between),
        df2: f64::from(result.df_within),
    };
    let dist: Box<dyn Distribution> = spec.instantiate()?;
    let region: CriticalRegion =
        CriticalRegion::upper_tail(result.critical_value, dist.as_ref(), result.alpha);
    let boundary: f64 = region.upper_boundary();

    let range: (f64, f64) = spec.plot_range(Some(result.f_statistic), Some(boundary));
    let curve: Vec<(f64, f64)> = density_curve(dist.as_ref(), range, CURVE_POINTS);
    let peak: f64 = curve_peak(&curve);

    let mut density_panel: Panel = Panel::new(
        &format!(
            "F-распределение (df₁ = {}, df₂ = {})",
            result.df_between, result.df_within
        ),
        "F",
        "Плотность",
    );
    let tail: Vec<(f64, f64)> = region_under_curve(&curve, boundary, range.1);
    if !tail.is_empty() {
        density_panel.elements.push(Element::Polygon {
            points: tail,
            color: PaletteColor::LightRed,
            opacity: 0.45,
        });
    }
    density_panel.elements.push(Element::Curve {
        points: curve,
        color: PaletteColor::Blue,
        width: 2,
        label: None,
    });
    density_panel.elements.push(Element::VerticalLine {
        x: result.f_statistic,
        color: PaletteColor::Red,
        dashed: false,
        label: Some(format!("F = {:.4}", result.f_statistic)),
    });
    density_panel.elements.push(Element::VerticalLine {
        x: boundary,
        color: PaletteColor::Orange,
        dashed: true,
        label: Some(format!("F_crit = {boundary:.4}")),
    });
    let x_text: f64 = range.0 + 0.55 * (range.1 - range.0);
    let (verdict, verdict_color): (String, PaletteColor) =
        verdict_annotation(result.reject_null, region.classify(result.f_statistic));
    density_panel.elements.push(Element::Annotation {
        x: x_text,
        y: 0.85 * peak,
        text: verdict,
        color: verdict_color,
    });
    if let Some(p) = result.p_value {
        density_panel.elements.push(Element::Annotation {
            x: x_text,
            y: 0.75 * peak,
            text: format!("p-value = {p:.4}"),
            color: PaletteColor::Black,
        });
    }

    let mut figure: ComposedFigure = ComposedFigure::new(FigureModel::new(
        "Однофакторный дисперсионный анализ (ANOVA)",
        Layout::Dual,
    ));
    figure.model.panels.push(density_panel);

    if result.groups.is_empty() {
        figure.skip(
            "Средние по группам",
            "в отчёте нет блока с информацией о группах".to_string(),
        );
    } else {
        let mut means_panel: Panel = Panel::new("Средние по группам", "Группа", "Среднее");
        let bars: Vec<Bar> = result
            .groups
            .iter()
            .enumerate()
            .map(|(index, group)| Bar {
                left: index as f64 + 0.6,
                right: index as f64 + 1.4,
                height: group.mean,
            })
            .collect();
        means_panel.elements.push(Element::Bars {
            bars,
            color: PaletteColor::LightBlue,
        });
        if let Some(grand) = result.grand_mean {
            means_panel.elements.push(Element::HorizontalLine {
                y: grand,
                color: PaletteColor::Red,
                dashed: true,
                label: Some(format!("Общее среднее = {grand:.4}")),
            });
        }
        means_panel.x_range = Some((0.0, result.groups.len() as f64 + 1.0));
        figure.model.panels.push(means_panel);
    }
    return Ok(figure);
}

/// Student's t figure: the symmetric t density with both critical tails
/// shaded. The title names the variance method, so the caller passes it.
pub fn compose_student(result: &StudentTResult, title: &str) -> Result<ComposedFigure, VizError> {
    let spec: DistributionSpec = DistributionSpec::StudentT { df: result.df };
    let dist: Box<dyn Distribution> = spec.instantiate()?;
    let region: CriticalRegion =
        CriticalRegion::two_sided(result.critical_value, dist.as_ref(), result.alpha);
    let upper: f64 = region.upper_boundary();
    let lower: f64 = region.lower_boundary().unwrap_or(-upper);

    let range: (f64, f64) = spec.plot_range(Some(result.t_statistic), Some(upper));
    let curve: Vec<(f64, f64)> = density_curve(dist.as_ref(), range, CURVE_POINTS);
    let peak: f64 = curve_peak(&curve);

    let mut panel: Panel = Panel::new(
        &format!("t-распределение (ν = {:.2})", result.df),
        "t",
        "Плотность",
    );
    for (from, to) in [(range.0, lower), (upper, range.1)] {
        let tail: Vec<(f64, f64)> = region_under_curve(&curve, from, to);
        if !tail.is_empty() {
            panel.elements.push(Element::Polygon {
                points: tail,
                color: PaletteColor::LightRed,
                opacity: 0.45,
            });
        }
    }
    panel.elements.push(Element::Curve {
        points: curve,
        color: PaletteColor::Blue,
        width: 2,
        label: None,
    });
    panel.elements.push(Element::VerticalLine {
        x: result.t_statistic,
        color: PaletteColor::Red,
        dashed: false,
        label: Some(format!("t = {:.4}", result.t_statistic)),
    });
    panel.elements.push(Element::VerticalLine {
        x: lower,
        color: PaletteColor::Orange,
        dashed: true,
        label: None,
    });
    panel.elements.push(Element::VerticalLine {
        x: upper,
        color: PaletteColor::Orange,
        dashed: true,
        label: Some(format!("±t_crit = {upper:.4}")),
    });

    let x_text: f64 = range.0 + 0.04 * (range.1 - range.0);
    if let Some(method) = result.method {
        let method_text: &str = match method {
            TTestMethod::EqualVariance => "Метод: равные дисперсии",
            TTestMethod::WelchApprox => "Метод: неравные дисперсии (Уэлч)",
        };
        panel.elements.push(Element::Annotation {
            x: x_text,
            y: 0.92 * peak,
            text: method_text.to_string(),
            color: PaletteColor::Gray,
        });
    }
    let (verdict, verdict_color): (String, PaletteColor) =
        verdict_annotation(result.reject_null, region.classify(result.t_statistic));
    panel.elements.push(Element::Annotation {
        x: x_text,
        y: 0.84 * peak,
        text: verdict,
        color: verdict_color,
    });
    if let Some(p) = result.p_value {
        panel.elements.push(Element::Annotation {
            x: x_text,
            y: 0.76 * peak,
            text: format!("P-значение = {p:.4}"),
            color: PaletteColor::Black,
        });
    }

    let mut figure: ComposedFigure =
        ComposedFigure::new(FigureModel::new(title, Layout::Single));
    figure.model.panels.push(panel);
    return Ok(figure);
}

/// Shapiro-Wilk figure: a density histogram with the fitted normal curve
/// next to a normal Q-Q plot of the same sample.
///
/// The W statistic lives on its own `(0, 1]` scale, so the region is
/// reported through annotations instead of shaded areas.
pub fn compose_shapiro_wilk(
    result: &ShapiroWilkResult,
    sample: &SampleData,
) -> Result<ComposedFigure, VizError> {
    if sample.len() < 3 {
        return Err(VizError::InsufficientData {
            what: "observations",
            got: sample.len(),
            min: 3,
        });
    }
    let (mean, std_dev): (f64, f64) = match (sample.mean(), sample.std_dev()) {
        (Some(mean), Some(std_dev)) => (mean, std_dev),
        _ => {
            return Err(VizError::InsufficientData {
                what: "observations",
                got: sample.len(),
                min: 3,
            });
        }
    };

    let observations: &[f64] = sample.observations();
    let bars: Vec<Bar> = density_histogram(observations, sturges_bins(observations.len()));
    let spec: DistributionSpec = DistributionSpec::Normal { mean, std_dev };
    let dist: Box<dyn Distribution> = spec.instantiate()?;
    let range: (f64, f64) = spec.plot_range(sample.min(), sample.max());
    let curve: Vec<(f64, f64)> = density_curve(dist.as_ref(), range, CURVE_POINTS);
    let peak: f64 = curve_peak(&curve).max(bars_peak(&bars));

    let mut hist_panel: Panel = Panel::new(
        "Гистограмма и нормальная плотность",
        "Значение",
        "Плотность",
    );
    hist_panel.elements.push(Element::Bars {
        bars,
        color: PaletteColor::LightBlue,
    });
    hist_panel.elements.push(Element::Curve {
        points: curve,
        color: PaletteColor::Red,
        width: 2,
        label: Some(format!("N({mean:.4}, {std_dev:.4}²)")),
    });
    let x_text: f64 = range.0 + 0.04 * (range.1 - range.0);
    hist_panel.elements.push(Element::Annotation {
        x: x_text,
        y: 0.95 * peak,
        text: format!("W = {:.6}", result.w_statistic),
        color: PaletteColor::Black,
    });
    if let Some(w_crit) = result.critical_value {
        hist_panel.elements.push(Element::Annotation {
            x: x_text,
            y: 0.88 * peak,
            text: format!("W_crit = {w_crit:.6}"),
            color: PaletteColor::Black,
        });
    }
    if let Some(p) = result.p_value {
        hist_panel.elements.push(Element::Annotation {
            x: x_text,
            y: 0.81 * peak,
            text: format!("p-value ≈ {p:.4}"),
            color: PaletteColor::Black,
        });
    }
    let region: Option<CriticalRegion> = CriticalRegion::scale_bounded(result.critical_value);
    let verdict: Option<(String, PaletteColor)> = match (result.reject_null, region) {
        (Some(reject), _) => Some(verdict_for(reject)),
        (None, Some(region)) => Some(verdict_annotation(
            None,
            region.classify(result.w_statistic),
        )),
        (None, None) => None,
    };
    if let Some((text, color)) = verdict {
        hist_panel.elements.push(Element::Annotation {
            x: x_text,
            y: 0.74 * peak,
            text,
            color,
        });
    }

    let sorted: Vec<f64> = sample.sorted();
    let points: Vec<(f64, f64)> = qq_normal_points(&sorted, mean, std_dev);
    let low: f64 = points
        .iter()
        .map(|&(x, y)| x.min(y))
        .fold(f64::INFINITY, f64::min);
    let high: f64 = points
        .iter()
        .map(|&(x, y)| x.max(y))
        .fold(f64::NEG_INFINITY, f64::max);
    let mut qq_panel: Panel = Panel::new(
        "Q-Q график",
        "Теоретические квантили",
        "Выборочные квантили",
    );
    qq_panel.elements.push(Element::Curve {
        points: vec![(low, low), (high, high)],
        color: PaletteColor::Red,
        width: 2,
        label: None,
    });
    qq_panel.elements.push(Element::Markers {
        points,
        color: PaletteColor::Blue,
        shape: MarkerShape::Circle,
        size: 3,
        label: None,
    });

    let mut figure: ComposedFigure = ComposedFigure::new(FigureModel::new(
        "Проверка нормальности (Шапиро-Уилк)",
        Layout::Dual,
    ));
    figure.model.panels.push(hist_panel);
    figure.model.panels.push(qq_panel);
    return Ok(figure);
}

/// Wilcoxon rank sum figure: sample means, box plots and jittered strips
/// of both samples, plus a text panel with the rank statistics.
///
/// The three sample panels are skipped (and recorded) when a sample is
/// missing or holds no observations; the text panel always renders.
/// Whether the figure is worth rendering at all for the
/// exact-distribution variant is the caller's policy, not decided here.
pub fn compose_wilcoxon(
    result: &WilcoxonResult,
    first: Option<&SampleData>,
    second: Option<&SampleData>,
) -> Result<ComposedFigure, VizError> {
    let mut figure: ComposedFigure = ComposedFigure::new(FigureModel::new(
        "Критерий Уилкоксона (суммы рангов)",
        Layout::GridOfFour,
    ));

    let mut available: Vec<(f64, &SampleData, PaletteColor, u64, &'static str)> = Vec::new();
    if let Some(sample) = first.filter(|sample| !sample.is_empty()) {
        available.push((1.0, sample, PaletteColor::Blue, STRIP_SEED_FIRST, "Выборка 1"));
    }
    if let Some(sample) = second.filter(|sample| !sample.is_empty()) {
        available.push((
            2.0,
            sample,
            PaletteColor::Green,
            STRIP_SEED_SECOND,
            "Выборка 2",
        ));
    }

    if available.is_empty() {
        let reason: &str = "файлы с выборками не найдены или пусты";
        figure.skip("Средние выборок", reason.to_string());
        figure.skip("Диаграммы размаха", reason.to_string());
        figure.skip("Наблюдения", reason.to_string());
    } else {
        let mut means_panel: Panel = Panel::new("Средние выборок", "Выборка", "Среднее");
        let mut bars: Vec<Bar> = Vec::new();
        for &(center, sample, _, _, _) in &available {
            if let Some(mean) = sample.mean() {
                bars.push(Bar {
                    left: center - 0.4,
                    right: center + 0.4,
                    height: mean,
                });
            }
        }
        means_panel.elements.push(Element::Bars {
            bars,
            color: PaletteColor::LightBlue,
        });
        means_panel.x_range = Some((0.0, 3.0));
        figure.model.panels.push(means_panel);

        let mut box_panel: Panel = Panel::new("Диаграммы размаха", "Выборка", "Значение");
        for &(center, sample, color, _, _) in &available {
            box_panel.elements.push(Element::BoxWhisker {
                at: center,
                width: 0.5,
                stats: box_stats(sample.observations()),
                color,
            });
        }
        box_panel.x_range = Some((0.0, 3.0));
        figure.model.panels.push(box_panel);

        let mut strip_panel: Panel = Panel::new("Наблюдения", "Выборка", "Значение");
        for &(center, sample, color, seed, label) in &available {
            strip_panel.elements.push(Element::Markers {
                points: jittered(sample.observations(), center, STRIP_AMPLITUDE, seed),
                color,
                shape: MarkerShape::Circle,
                size: 3,
                label: Some(label.to_string()),
            });
        }
        strip_panel.x_range = Some((0.0, 3.0));
        figure.model.panels.push(strip_panel);
    }

    let mut lines: Vec<String> = Vec::new();
    if let (Some(n1), Some(n2)) = (result.n1, result.n2) {
        lines.push(format!("n₁ = {n1}, n₂ = {n2}"));
    }
    lines.push(format!("W (сумма рангов) = {:.2}", result.w_statistic));
    if let Some(u) = result.u_statistic {
        lines.push(format!("U (Манна-Уитни) = {u:.2}"));
    }
    if let Some(mean_w) = result.mean_w {
        lines.push(format!("E[W] под H0 = {mean_w:.2}"));
    }
    if let Some(std_w) = result.std_w {
        lines.push(format!("SD[W] под H0 = {std_w:.2}"));
    }
    if let Some(z) = result.z_statistic {
        lines.push(format!("Z-статистика = {z:.4}"));
    }
    if let (Some(mean_w), Some(std_w)) = (result.mean_w, result.std_w) {
        let z_boundary: f64 = match result.critical_value {
            Some(z) => z.abs(),
            None => StdNormal::new().quantile(1.0 - 0.5 * result.alpha),
        };
        let band: CriticalRegion = CriticalRegion::two_sided_around(mean_w, std_w, z_boundary);
        let band_lower: f64 = band.lower_boundary().unwrap_or(mean_w);
        lines.push(format!(
            "Границы W: {:.2} .. {:.2}",
            band_lower,
            band.upper_boundary()
        ));
    }
    if let Some(p) = result.p_value {
        lines.push(format!("p-value = {p:.4}"));
    }
    if let Some(ties) = result.num_ties {
        lines.push(format!("Связанных групп: {ties}"));
    }
    lines.push(format!("α = {:.3}", result.alpha));
    if let Some(z) = result.z_statistic {
        let std_normal: StdNormal = StdNormal::new();
        let region: CriticalRegion =
            CriticalRegion::two_sided(result.critical_value, &std_normal, result.alpha);
        let (text, _): (String, PaletteColor) =
            verdict_annotation(result.reject_null, region.classify(z));
        lines.push(format!("РЕЗУЛЬТАТ: {text}"));
    } else if let Some(reject) = result.reject_null {
        let (text, _): (String, PaletteColor) = verdict_for(reject);
        lines.push(format!("РЕЗУЛЬТАТ: {text}"));
    }
    figure
        .model
        .panels
        .push(Panel::text_panel("Сводка критерия", lines));
    return Ok(figure);
}

/// Grubbs figure: box plot, histogram, index plot with sigma bands and a
/// text summary, all built from the sample embedded in the report.
///
/// Flagged points are matched against the reported suspect values
/// exactly, so the markers always agree with the engine's output.
pub fn compose_grubbs(result: &GrubbsResult) -> Result<ComposedFigure, VizError> {
    if result.observations.len() < 3 {
        return Err(VizError::InsufficientData {
            what: "observations",
            got: result.observations.len(),
            min: 3,
        });
    }
    let sample: SampleData = SampleData::new(result.observations.clone())?;
    let (mean, std_dev): (f64, f64) = match (sample.mean(), sample.std_dev()) {
        (Some(mean), Some(std_dev)) => (mean, std_dev),
        _ => {
            return Err(VizError::InsufficientData {
                what: "observations",
                got: sample.len(),
                min: 3,
            });
        }
    };

    let mut box_panel: Panel = Panel::new("Диаграмма размаха", "", "Значение");
    box_panel.elements.push(Element::BoxWhisker {
        at: 1.0,
        width: 0.5,
        stats: box_stats(sample.observations()),
        color: PaletteColor::Blue,
    });
    if !result.outliers.is_empty() {
        let points: Vec<(f64, f64)> = result.outliers.iter().map(|&value| (1.0, value)).collect();
        box_panel.elements.push(Element::Markers {
            points,
            color: PaletteColor::Red,
            shape: MarkerShape::Circle,
            size: 4,
            label: Some("Выбросы".to_string()),
        });
    }
    box_panel.x_range = Some((0.0, 2.0));

    let mut hist_panel: Panel = Panel::new("Гистограмма", "Значение", "Частота");
    hist_panel.elements.push(Element::Bars {
        bars: histogram(sample.observations(), GRUBBS_HISTOGRAM_BINS),
        color: PaletteColor::LightBlue,
    });
    for &value in &result.outliers {
        hist_panel.elements.push(Element::VerticalLine {
            x: value,
            color: PaletteColor::Red,
            dashed: true,
            label: None,
        });
    }

    let mut index_panel: Panel = Panel::new("Наблюдения по порядку", "Номер", "Значение");
    let points: Vec<(f64, f64)> = sample
        .observations()
        .iter()
        .enumerate()
        .map(|(index, &value)| ((index + 1) as f64, value))
        .collect();
    index_panel.elements.push(Element::Markers {
        points,
        color: PaletteColor::Blue,
        shape: MarkerShape::Circle,
        size: 3,
        label: None,
    });
    let flagged: Vec<(f64, f64)> = sample
        .observations()
        .iter()
        .enumerate()
        .filter(|&(_, &value)| result.outliers.contains(&value))
        .map(|(index, &value)| ((index + 1) as f64, value))
        .collect();
    if !flagged.is_empty() {
        index_panel.elements.push(Element::Markers {
            points: flagged,
            color: PaletteColor::Red,
            shape: MarkerShape::Cross,
            size: 5,
            label: Some("Подозрительные".to_string()),
        });
    }
    index_panel.elements.push(Element::HorizontalLine {
        y: mean,
        color: PaletteColor::Green,
        dashed: false,
        label: Some(format!("Среднее = {mean:.4}")),
    });
    for (sigmas, color) in [(2.0_f64, PaletteColor::Orange), (3.0_f64, PaletteColor::Red)] {
        index_panel.elements.push(Element::HorizontalLine {
            y: sigmas.mul_add(std_dev, mean),
            color,
            dashed: true,
            label: Some(format!("±{sigmas}σ")),
        });
        index_panel.elements.push(Element::HorizontalLine {
            y: (-sigmas).mul_add(std_dev, mean),
            color,
            dashed: true,
            label: None,
        });
    }

    let mut lines: Vec<String> = Vec::new();
    lines.push(format!("n = {}", sample.len()));
    lines.push(format!("α = {:.3}", result.alpha));
    lines.push(format!("G-статистика = {:.4}", result.g_statistic));
    let boundary: f64 = match result.critical_value {
        Some(value) => value,
        None => grubbs_boundary(sample.len(), result.alpha)?,
    };
    if result.critical_value.is_some() {
        lines.push(format!("Критическое значение = {boundary:.4}"));
    } else {
        lines.push(format!("Критическое значение = {boundary:.4} (вычислено)"));
    }
    let region: CriticalRegion = CriticalRegion::UpperTail { boundary };
    let (verdict, _): (String, PaletteColor) =
        verdict_annotation(None, region.classify(result.g_statistic));
    lines.push(format!("РЕЗУЛЬТАТ: {verdict}"));
    if result.outliers.is_empty() {
        lines.push("Подозрительных значений нет".to_string());
    } else {
        for value in &result.outliers {
            lines.push(format!("Подозрительное значение: {value:.4}"));
        }
    }
    if let Some(conclusion) = &result.conclusion {
        lines.push(format!("Вывод: {conclusion}"));
    }

    let mut figure: ComposedFigure = ComposedFigure::new(FigureModel::new(
        "Анализ выбросов (критерий Граббса)",
        Layout::GridOfFour,
    ));
    figure.model.panels.push(box_panel);
    figure.model.panels.push(hist_panel);
    figure.model.panels.push(index_panel);
    figure
        .model
        .panels
        .push(Panel::text_panel("Сводка критерия", lines));
    return Ok(figure);
}

/// Weibull fit figure: density histogram of the complete observations
/// with the fitted density on top, rug ticks for complete points and
/// right arrows for censored ones.
///
/// With fewer than 3 complete observations the histogram is dropped and
/// recorded as skipped while the fitted curve still renders.
pub fn compose_weibull(result: &WeibullFitResult) -> Result<ComposedFigure, VizError> {
    let spec: DistributionSpec = DistributionSpec::Weibull {
        shape: result.shape,
        scale: result.scale,
    };
    let dist: Box<dyn Distribution> = spec.instantiate()?;

    let sample: SampleData =
        SampleData::with_censoring(result.observations.clone(), result.censored.clone())?;
    let complete: Vec<f64> = sample.complete();
    let censored: Vec<f64> = sample.censored_values();

    // the window must end right of the fixed left edge, whatever the data
    let right_edge: f64 = match sample.max() {
        Some(max) if POSITIVE_SUPPORT_LEFT_EDGE < 1.5 * max => 1.5 * max,
        _ => (1.5 * dist.quantile(0.995)).max(2.0 * POSITIVE_SUPPORT_LEFT_EDGE),
    };
    let range: (f64, f64) = (POSITIVE_SUPPORT_LEFT_EDGE, right_edge);
    let curve: Vec<(f64, f64)> = density_curve(dist.as_ref(), range, CURVE_POINTS);

    let method_tag: &str = match result.method {
        WeibullFitMethod::Mle => "MLE",
        WeibullFitMethod::Mls => "MLS",
    };
    let mut figure: ComposedFigure = ComposedFigure::new(FigureModel::new(
        &format!("Подбор распределения Вейбулла ({method_tag})"),
        Layout::Single,
    ));
    let mut panel: Panel = Panel::new("Плотность и данные", "Значение", "Плотность");

    let bars: Option<Vec<Bar>> = if 3 <= complete.len() {
        Some(density_histogram(&complete, sturges_bins(complete.len())))
    } else {
        None
    };
    let peak: f64 = curve_peak(&curve).max(bars.as_deref().map_or(0.0, bars_peak));
    match bars {
        Some(bars) => {
            panel.elements.push(Element::Bars {
                bars,
                color: PaletteColor::LightBlue,
            });
        }
        None => {
            figure.skip(
                "Гистограмма",
                format!(
                    "всего {} полных наблюдений, нужно не меньше 3",
                    complete.len()
                ),
            );
        }
    }
    panel.elements.push(Element::Curve {
        points: curve,
        color: PaletteColor::Red,
        width: 2,
        label: Some(format!(
            "Вейбулл(k = {:.4}, λ = {:.4})",
            result.shape, result.scale
        )),
    });
    if !complete.is_empty() {
        let ticks: Vec<(f64, f64)> = complete.iter().map(|&value| (value, 0.0)).collect();
        panel.elements.push(Element::Markers {
            points: ticks,
            color: PaletteColor::Blue,
            shape: MarkerShape::Cross,
            size: 4,
            label: None,
        });
    }
    if !censored.is_empty() {
        let marks: Vec<(f64, f64)> = censored
            .iter()
            .map(|&value| (value, 0.03 * peak))
            .collect();
        panel.elements.push(Element::Markers {
            points: marks,
            color: PaletteColor::Orange,
            shape: MarkerShape::RightArrow,
            size: 5,
            label: Some("Цензурировано".to_string()),
        });
    }

    let x_text: f64 = range.0 + 0.55 * (range.1 - range.0);
    let scale_error: String = match result.scale_std_error {
        Some(error) => format!(" (± {error:.6})"),
        None => String::new(),
    };
    panel.elements.push(Element::Annotation {
        x: x_text,
        y: 0.92 * peak,
        text: format!("λ = {:.6}{}", result.scale, scale_error),
        color: PaletteColor::Black,
    });
    let shape_error: String = match result.shape_std_error {
        Some(error) => format!(" (± {error:.6})"),
        None => String::new(),
    };
    panel.elements.push(Element::Annotation {
        x: x_text,
        y: 0.84 * peak,
        text: format!("k = {:.6}{}", result.shape, shape_error),
        color: PaletteColor::Black,
    });
    if !censored.is_empty() {
        panel.elements.push(Element::Annotation {
            x: x_text,
            y: 0.76 * peak,
            text: format!(
                "Цензурировано: {} из {}",
                censored.len(),
                result.observations.len()
            ),
            color: PaletteColor::Gray,
        });
    }
    figure.model.panels.push(panel);
    return Ok(figure);
}

/// Interval bar color of a confidence interval scenario.
fn scenario_color(scenario: CiScenario) -> PaletteColor {
    return match scenario {
        CiScenario::KnownSigma => PaletteColor::Green,
        CiScenario::UnknownSigma => PaletteColor::Blue,
        CiScenario::UnknownMu => PaletteColor::Red,
    };
}

/// Confidence interval figure: one panel per scenario section, each
/// interval drawn as a horizontal bar with end caps, a center marker and
/// a name/width annotation. The layout grows with the section count.
pub fn compose_confidence_intervals(
    report: &ConfidenceIntervalReport,
) -> Result<ComposedFigure, VizError> {
    let layout: Layout = match report.sections.len() {
        0 => {
            return Err(VizError::InsufficientData {
                what: "interval sections",
                got: 0,
                min: 1,
            });
        }
        1 => Layout::Single,
        2 => Layout::Dual,
        _ => Layout::GridOfFour,
    };
    let confidence_percent: f64 = report.confidence.unwrap_or(0.95) * 100.0;
    let title: String = match report.sample_size {
        Some(n) => format!("Доверительные интервалы ({confidence_percent:.0}%), n = {n}"),
        None => format!("Доверительные интервалы ({confidence_percent:.0}%)"),
    };
    let mut figure: ComposedFigure = ComposedFigure::new(FigureModel::new(&title, layout));

    for section in &report.sections {
        let mut panel: Panel = Panel::new(section.scenario.title(), "Значение", "");
        let rows: f64 = section.intervals.len() as f64;
        panel.y_range = Some((0.0, rows + 1.0));
        let color: PaletteColor = scenario_color(section.scenario);
        for (index, interval) in section.intervals.iter().enumerate() {
            // first interval on top
            let y: f64 = rows - index as f64;
            panel.elements.push(Element::Curve {
                points: vec![(interval.lower, y), (interval.upper, y)],
                color,
                width: 3,
                label: None,
            });
            panel.elements.push(Element::Markers {
                points: vec![(interval.lower, y), (interval.upper, y)],
                color,
                shape: MarkerShape::Cross,
                size: 5,
                label: None,
            });
            panel.elements.push(Element::Markers {
                points: vec![(interval.midpoint(), y)],
                color: PaletteColor::Black,
                shape: MarkerShape::Circle,
                size: 4,
                label: None,
            });
            panel.elements.push(Element::Annotation {
                x: interval.midpoint(),
                y: y + 0.2,
                text: format!("{}: ширина = {:.4}", interval.name, interval.span()),
                color: PaletteColor::Black,
            });
        }
        figure.model.panels.push(panel);
    }
    return Ok(figure);
}

/// Percentile figure for one distribution table: the percentile curve
/// with circle markers, a shaded confidence band, per row whiskers and
/// annotations at the 5%, 50% and 95% rows when the table has them.
pub fn compose_percentiles(table: &PercentileTable) -> Result<ComposedFigure, VizError> {
    if table.rows.is_empty() {
        return Err(VizError::InsufficientData {
            what: "percentile rows",
            got: 0,
            min: 1,
        });
    }
    let mut figure: ComposedFigure = ComposedFigure::new(FigureModel::new(
        &format!("Процентили: {}", table.distribution),
        Layout::Single,
    ));
    let mut panel: Panel = Panel::new(
        &format!("Процентили распределения {}", table.distribution),
        "Вероятность, %",
        "Значение",
    );

    let band: Vec<(f64, f64)> = table
        .rows
        .iter()
        .map(|row| (row.probability_percent, row.upper))
        .chain(
            table
                .rows
                .iter()
                .rev()
                .map(|row| (row.probability_percent, row.lower)),
        )
        .collect();
    panel.elements.push(Element::Polygon {
        points: band,
        color: PaletteColor::LightBlue,
        opacity: 0.35,
    });
    for row in &table.rows {
        panel.elements.push(Element::Curve {
            points: vec![
                (row.probability_percent, row.lower),
                (row.probability_percent, row.upper),
            ],
            color: PaletteColor::Gray,
            width: 1,
            label: None,
        });
    }
    let line: Vec<(f64, f64)> = table
        .rows
        .iter()
        .map(|row| (row.probability_percent, row.value))
        .collect();
    panel.elements.push(Element::Curve {
        points: line.clone(),
        color: PaletteColor::Blue,
        width: 2,
        label: Some("Процентиль".to_string()),
    });
    panel.elements.push(Element::Markers {
        points: line,
        color: PaletteColor::Blue,
        shape: MarkerShape::Circle,
        size: 3,
        label: None,
    });
    for key in [5.0, 50.0, 95.0] {
        let found: Option<&PercentileRow> = table
            .rows
            .iter()
            .find(|row| (row.probability_percent - key).abs() < 0.25);
        if let Some(row) = found {
            panel.elements.push(Element::Annotation {
                x: row.probability_percent,
                y: row.value,
                text: format!("{:.0}%: {:.4}", row.probability_percent, row.value),
                color: PaletteColor::Black,
            });
        }
    }
    figure.model.panels.push(panel);
    return Ok(figure);
}

/// Gallery figure: Student's t densities for a few degrees of freedom
/// with the standard normal limit on top.
pub fn compose_t_family() -> Result<ComposedFigure, VizError> {
    let mut figure: ComposedFigure = ComposedFigure::new(FigureModel::new(
        "t-распределение Стьюдента",
        Layout::Single,
    ));
    let mut panel: Panel = Panel::new(
        "Плотности при разных степенях свободы",
        "x",
        "Плотность",
    );
    let range: (f64, f64) = (-4.0, 4.0);
    for (index, &df) in GALLERY_T_DFS.iter().enumerate() {
        let dist: Box<dyn Distribution> = DistributionSpec::StudentT { df }.instantiate()?;
        panel.elements.push(Element::Curve {
            points: density_curve(dist.as_ref(), range, CURVE_POINTS),
            color: GALLERY_COLORS[index % GALLERY_COLORS.len()],
            width: 2,
            label: Some(format!("ν = {df}")),
        });
    }
    let normal: Box<dyn Distribution> = DistributionSpec::Normal {
        mean: 0.0,
        std_dev: 1.0,
    }
    .instantiate()?;
    panel.elements.push(Element::Curve {
        points: density_curve(normal.as_ref(), range, CURVE_POINTS),
        color: PaletteColor::Black,
        width: 2,
        label: Some("N(0, 1)".to_string()),
    });
    figure.model.panels.push(panel);
    return Ok(figure);
}

/// Gallery figure: centered normal densities for a few standard
/// deviations.
pub fn compose_normal_family() -> Result<ComposedFigure, VizError> {
    let mut figure: ComposedFigure = ComposedFigure::new(FigureModel::new(
        "Нормальное распределение",
        Layout::Single,
    ));
    let mut panel: Panel = Panel::new(
        "Плотности при разных среднеквадратичных отклонениях",
        "x",
        "Плотность",
    );
    let range: (f64, f64) = (-6.0, 6.0);
    for (index, &std_dev) in GALLERY_NORMAL_SIGMAS.iter().enumerate() {
        let dist: Box<dyn Distribution> = DistributionSpec::Normal {
            mean: 0.0,
            std_dev,
        }
        .instantiate()?;
        panel.elements.push(Element::Curve {
            points: density_curve(dist.as_ref(), range, CURVE_POINTS),
            color: GALLERY_COLORS[index % GALLERY_COLORS.len()],
            width: 2,
            label: Some(format!("σ = {std_dev}")),
        });
    }
    figure.model.panels.push(panel);
    return Ok(figure);
}

/// Gallery figure: chi squared densities for a few degrees of freedom.
pub fn compose_chi_squared_family() -> Result<ComposedFigure, VizError> {
    let mut figure: ComposedFigure = ComposedFigure::new(FigureModel::new(
        "Распределение χ²",
        Layout::Single,
    ));
    let mut panel: Panel = Panel::new(
        "Плотности при разных степенях свободы",
        "x",
        "Плотность",
    );
    let range: (f64, f64) = (POSITIVE_SUPPORT_LEFT_EDGE, 60.0);
    for (index, &df) in GALLERY_CHI_SQUARED_DFS.iter().enumerate() {
        let dist: Box<dyn Distribution> = DistributionSpec::ChiSquared { df }.instantiate()?;
        panel.elements.push(Element::Curve {
            points: density_curve(dist.as_ref(), range, CURVE_POINTS),
            color: GALLERY_COLORS[index % GALLERY_COLORS.len()],
            width: 2,
            label: Some(format!("df = {df}")),
        });
    }
    figure.model.panels.push(panel);
    return Ok(figure);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::model::{GroupSummary, IntervalEstimate, CiSection, PercentileRow};

    fn anova_fixture() -> AnovaResult {
        return AnovaResult {
            alpha: 0.05,
            f_statistic: 5.6789,
            critical_value: Some(3.3541),
            p_value: Some(0.0091),
            reject_null: Some(true),
            df_between: 2,
            df_within: 27,
            group_count: Some(3),
            total_n: Some(30),
            groups: vec![
                GroupSummary { size: 10, mean: 5.1 },
                GroupSummary { size: 10, mean: 6.3 },
                GroupSummary { size: 10, mean: 4.8 },
            ],
            grand_mean: Some(5.4),
        };
    }

    #[test]
    fn anova_figure_has_density_and_means_panels() {
        let figure: ComposedFigure = compose_anova(&anova_fixture()).unwrap();
        assert_eq!(figure.model.layout, Layout::Dual);
        assert_eq!(figure.model.panels.len(), 2);
        assert!(figure.skipped.is_empty());

        let density_panel: &Panel = &figure.model.panels[0];
        let has_tail: bool = density_panel
            .elements
            .iter()
            .any(|element| matches!(element, Element::Polygon { .. }));
        assert!(has_tail, "The rejected H0 must shade the upper tail. ");

        let means_panel: &Panel = &figure.model.panels[1];
        let bar_count: usize = means_panel
            .elements
            .iter()
            .filter_map(|element| match element {
                Element::Bars { bars, .. } => Some(bars.len()),
                _ => None,
            })
            .sum();
        assert_eq!(bar_count, 3);
    }

    #[test]
    fn anova_without_group_block_skips_means_panel() {
        let mut result: AnovaResult = anova_fixture();
        result.groups.clear();
        result.grand_mean = None;

        let figure: ComposedFigure = compose_anova(&result).unwrap();
        assert_eq!(figure.model.panels.len(), 1);
        assert_eq!(figure.skipped.len(), 1);
        assert_eq!(figure.skipped[0].caption, "Средние по группам");
    }

    #[test]
    fn student_figure_shades_both_tails() {
        let result: StudentTResult = StudentTResult {
            alpha: 0.05,
            t_statistic: 2.5,
            critical_value: Some(2.0739),
            p_value: Some(0.0203),
            reject_null: Some(true),
            df: 22.0,
            method: Some(TTestMethod::EqualVariance),
        };
        let figure: ComposedFigure =
            compose_student(&result, "t-критерий Стьюдента (равные дисперсии)").unwrap();
        assert_eq!(figure.model.layout, Layout::Single);

        let polygons: usize = figure.model.panels[0]
            .elements
            .iter()
            .filter(|element| matches!(element, Element::Polygon { .. }))
            .count();
        assert_eq!(polygons, 2);
    }

    #[test]
    fn shapiro_needs_three_observations() {
        let result: ShapiroWilkResult = ShapiroWilkResult {
            alpha: 0.05,
            w_statistic: 0.97,
            critical_value: None,
            p_value: None,
            reject_null: None,
            n: Some(2),
        };
        let sample: SampleData = SampleData::new(vec![1.0, 2.0]).unwrap();
        let error: VizError = compose_shapiro_wilk(&result, &sample).unwrap_err();
        assert!(matches!(
            error,
            VizError::InsufficientData { got: 2, min: 3, .. }
        ));
    }

    #[test]
    fn wilcoxon_without_samples_keeps_text_panel() {
        let result: WilcoxonResult = WilcoxonResult {
            alpha: 0.05,
            w_statistic: 178.5,
            u_statistic: Some(100.5),
            z_statistic: Some(1.6454),
            mean_w: Some(150.0),
            std_w: Some(17.32),
            critical_value: Some(1.96),
            p_value: Some(0.0998),
            reject_null: Some(false),
            n1: Some(12),
            n2: Some(12),
            num_ties: Some(3),
            use_normal_approx: true,
        };
        let figure: ComposedFigure = compose_wilcoxon(&result, None, None).unwrap();
        assert_eq!(figure.model.panels.len(), 1);
        assert_eq!(figure.skipped.len(), 3);

        let text_panel: &Panel = &figure.model.panels[0];
        assert!(!text_panel.mesh);
        let lines: &Vec<String> = match &text_panel.elements[0] {
            Element::TextBlock { lines } => lines,
            other => panic!("expected a text block, got {other:?}"),
        };
        assert!(lines.iter().any(|line| line == "W (сумма рангов) = 178.50"));
        assert!(lines.iter().any(|line| line.starts_with("Границы W: ")));
        assert!(lines.iter().any(|line| line == "РЕЗУЛЬТАТ: H0 НЕ ОТВЕРГАЕТСЯ"));
    }

    #[test]
    fn grubbs_marks_reported_outliers_in_every_panel() {
        let result: GrubbsResult = GrubbsResult {
            alpha: 0.05,
            g_statistic: 2.9,
            critical_value: Some(2.5641),
            observations: vec![9.8, 10.1, 10.0, 9.9, 10.2, 14.5],
            outliers: vec![14.5],
            conclusion: Some("обнаружен 1 выброс".to_string()),
        };
        let figure: ComposedFigure = compose_grubbs(&result).unwrap();
        assert_eq!(figure.model.layout, Layout::GridOfFour);
        assert_eq!(figure.model.panels.len(), 4);

        let index_panel: &Panel = &figure.model.panels[2];
        let flagged: Vec<(f64, f64)> = index_panel
            .elements
            .iter()
            .filter_map(|element| match element {
                Element::Markers {
                    points,
                    shape: MarkerShape::Cross,
                    ..
                } => Some(points.clone()),
                _ => None,
            })
            .flatten()
            .collect();
        assert_eq!(flagged, vec![(6.0, 14.5)]);
    }

    #[test]
    fn weibull_with_sparse_data_keeps_curve_and_skips_histogram() {
        let result: WeibullFitResult = WeibullFitResult {
            method: WeibullFitMethod::Mls,
            scale: 245.0,
            shape: 1.8,
            scale_std_error: Some(12.3),
            shape_std_error: Some(0.12),
            observations: vec![120.0, 300.0],
            censored: vec![false, true],
        };
        let figure: ComposedFigure = compose_weibull(&result).unwrap();
        assert_eq!(figure.skipped.len(), 1);

        let panel: &Panel = &figure.model.panels[0];
        assert!(panel
            .elements
            .iter()
            .any(|element| matches!(element, Element::Curve { .. })));
        assert!(panel.elements.iter().any(|element| matches!(
            element,
            Element::Markers {
                shape: MarkerShape::RightArrow,
                ..
            }
        )));
        assert!(!panel
            .elements
            .iter()
            .any(|element| matches!(element, Element::Bars { .. })));
    }

    #[test]
    fn confidence_interval_layout_follows_section_count() {
        let section = |scenario: CiScenario| CiSection {
            scenario,
            intervals: vec![IntervalEstimate {
                name: "μ (среднее)",
                lower: 4.0,
                upper: 6.0,
                center: Some(5.0),
                width: Some(2.0),
            }],
        };
        let mut report: ConfidenceIntervalReport = ConfidenceIntervalReport {
            confidence: Some(0.95),
            sample_mean: Some(5.0),
            sample_std: Some(1.2),
            sample_size: Some(50),
            known_sigma: None,
            df: None,
            sections: vec![section(CiScenario::KnownSigma)],
        };
        assert_eq!(
            compose_confidence_intervals(&report).unwrap().model.layout,
            Layout::Single
        );

        report.sections.push(section(CiScenario::UnknownSigma));
        assert_eq!(
            compose_confidence_intervals(&report).unwrap().model.layout,
            Layout::Dual
        );

        report.sections.push(section(CiScenario::UnknownMu));
        assert_eq!(
            compose_confidence_intervals(&report).unwrap().model.layout,
            Layout::GridOfFour
        );
    }

    #[test]
    fn percentile_figure_annotates_key_rows() {
        let table: PercentileTable = PercentileTable {
            distribution: "normal".to_string(),
            rows: vec![
                PercentileRow {
                    probability_percent: 5.0,
                    value: -1.6449,
                    lower: -1.8,
                    upper: -1.5,
                },
                PercentileRow {
                    probability_percent: 50.0,
                    value: 0.0,
                    lower: -0.1,
                    upper: 0.1,
                },
                PercentileRow {
                    probability_percent: 95.0,
                    value: 1.6449,
                    lower: 1.5,
                    upper: 1.8,
                },
            ],
        };
        let figure: ComposedFigure = compose_percentiles(&table).unwrap();
        let annotations: usize = figure.model.panels[0]
            .elements
            .iter()
            .filter(|element| matches!(element, Element::Annotation { .. }))
            .count();
        assert_eq!(annotations, 3);
    }

    #[test]
    fn gallery_figures_cover_the_advertised_families() {
        let t_family: ComposedFigure = compose_t_family().unwrap();
        let t_curves: usize = t_family.model.panels[0]
            .elements
            .iter()
            .filter(|element| matches!(element, Element::Curve { .. }))
            .count();
        // four t densities plus the normal limit
        assert_eq!(t_curves, 5);

        let normal_family: ComposedFigure = compose_normal_family().unwrap();
        let normal_curves: usize = normal_family.model.panels[0]
            .elements
            .iter()
            .filter(|element| matches!(element, Element::Curve { .. }))
            .count();
        assert_eq!(normal_curves, 5);

        let chi_family: ComposedFigure = compose_chi_squared_family().unwrap();
        let chi_curves: usize = chi_family.model.panels[0]
            .elements
            .iter()
            .filter(|element| matches!(element, Element::Curve { .. }))
            .count();
        assert_eq!(chi_curves, 5);
    }
}
