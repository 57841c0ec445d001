//! End to end checks over the report pipeline: a report written in the
//! engine's own format is parsed back and composed into figure geometry,
//! and the renderer turns a figure without any text into a real PNG.
//!
//! Figures with captions and axis meshes need the system font machinery,
//! so those stay out of the automated tests; the geometry assertions
//! here cover everything up to the drawing calls.

use std::path::PathBuf;

use StatPlots::{
    plot::compose::{compose_anova, compose_grubbs, compose_weibull, compose_wilcoxon},
    plot::figure::{Element, FigureModel, Layout, MarkerShape, PaletteColor, Panel},
    plot::render::render_figure,
    report::model::{
        AnovaResult, GroupSummary, GrubbsResult, WeibullFitMethod, WeibullFitResult,
        WilcoxonResult,
    },
    report::parser,
    report::writer,
    samples::SampleData,
};

fn grubbs_fixture() -> GrubbsResult {
    let mut observations: Vec<f64> = vec![
        9.7431, 10.1852, 9.9210, 10.4567, 9.6123, 10.0755, 9.8340, 10.2914, 9.5587, 10.3698,
        9.9035, 10.1287, 9.7760, 10.2241, 9.6892, 10.0478, 9.8623, 10.3125, 9.9517,
    ];
    observations.push(50.0);

    return GrubbsResult {
        alpha: 0.05,
        g_statistic: 4.2477,
        critical_value: Some(2.7082),
        observations,
        outliers: vec![50.0],
        conclusion: Some("обнаружен 1 выброс".to_string()),
    };
}

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
            GroupSummary {
                size: 10,
                mean: 23.12,
            },
            GroupSummary {
                size: 10,
                mean: 25.4,
            },
            GroupSummary {
                size: 10,
                mean: 27.84,
            },
        ],
        grand_mean: Some(25.4533),
    };
}

fn weibull_fixture() -> WeibullFitResult {
    return WeibullFitResult {
        method: WeibullFitMethod::Mls,
        scale: 118.5,
        shape: 1.842,
        scale_std_error: None,
        shape_std_error: None,
        observations: vec![
            55.2, 71.3, 88.4, 94.1, 102.7, 115.9, 124.3, 131.8, 140.2, 152.6,
        ],
        censored: vec![
            false, false, true, false, false, true, false, false, false, true,
        ],
    };
}

fn wilcoxon_fixture() -> WilcoxonResult {
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

mod grubbs_pipeline_tests {
    use super::*;

    #[test]
    fn the_reported_outlier_is_flagged_at_its_position() {
        let text: String = writer::write_grubbs(&grubbs_fixture());
        let parsed: GrubbsResult = parser::parse_grubbs(&text).expect("own output should parse");
        let figure = compose_grubbs(&parsed).expect("twenty observations are plenty");

        assert!(figure.skipped.is_empty());
        assert_eq!(figure.model.layout, Layout::GridOfFour);
        assert_eq!(figure.model.panels.len(), 4);

        // the outlier sits last in the sample, so position 20
        let index_panel: &Panel = &figure.model.panels[2];
        let crosses: Vec<&Element> = index_panel
            .elements
            .iter()
            .filter(|element| {
                matches!(
                    element,
                    Element::Markers {
                        shape: MarkerShape::Cross,
                        ..
                    }
                )
            })
            .collect();
        assert_eq!(crosses.len(), 1);
        if let Element::Markers { points, color, .. } = crosses[0] {
            assert_eq!(points, &vec![(20.0, 50.0)]);
            assert_eq!(*color, PaletteColor::Red);
        }
    }

    #[test]
    fn the_box_panel_circles_the_same_value() {
        let text: String = writer::write_grubbs(&grubbs_fixture());
        let parsed: GrubbsResult = parser::parse_grubbs(&text).expect("own output should parse");
        let figure = compose_grubbs(&parsed).expect("twenty observations are plenty");

        let box_panel: &Panel = &figure.model.panels[0];
        let flagged = box_panel.elements.iter().find_map(|element| match element {
            Element::Markers { points, label, .. } if label.as_deref() == Some("Выбросы") => {
                Some(points.clone())
            }
            _ => None,
        });
        assert_eq!(flagged, Some(vec![(1.0, 50.0)]));
    }

    #[test]
    fn the_summary_panel_repeats_the_report() {
        let text: String = writer::write_grubbs(&grubbs_fixture());
        let parsed: GrubbsResult = parser::parse_grubbs(&text).expect("own output should parse");
        let figure = compose_grubbs(&parsed).expect("twenty observations are plenty");

        let summary: &Panel = &figure.model.panels[3];
        assert!(!summary.mesh);
        let Element::TextBlock { lines } = &summary.elements[0] else {
            panic!("the summary panel should hold a text block");
        };

        assert!(lines.contains(&"n = 20".to_string()));
        assert!(lines.contains(&"G-статистика = 4.2477".to_string()));
        assert!(lines.contains(&"Критическое значение = 2.7082".to_string()));
        assert!(lines.contains(&"РЕЗУЛЬТАТ: H0 ОТВЕРГАЕТСЯ".to_string()));
        assert!(lines.contains(&"Подозрительное значение: 50.0000".to_string()));
        assert!(lines.contains(&"Вывод: обнаружен 1 выброс".to_string()));
    }
}

mod anova_pipeline_tests {
    use super::*;

    #[test]
    fn the_density_panel_marks_statistic_and_boundary() {
        let text: String = writer::write_anova(&anova_fixture());
        let parsed: AnovaResult = parser::parse_anova(&text).expect("own output should parse");
        let figure = compose_anova(&parsed).expect("a parsed report always composes");

        assert!(figure.skipped.is_empty());
        assert_eq!(figure.model.layout, Layout::Dual);
        assert_eq!(figure.model.panels.len(), 2);

        let density: &Panel = &figure.model.panels[0];
        assert!(
            density
                .elements
                .iter()
                .any(|element| matches!(element, Element::Polygon { .. }))
        );
        assert!(
            density
                .elements
                .iter()
                .any(|element| matches!(element, Element::Curve { .. }))
        );

        let statistic = density.elements.iter().find_map(|element| match element {
            Element::VerticalLine {
                x,
                label: Some(label),
                ..
            } if label == "F = 4.2137" => Some(*x),
            _ => None,
        });
        assert_eq!(statistic, Some(4.2137));

        let boundary = density.elements.iter().find_map(|element| match element {
            Element::VerticalLine {
                x,
                label: Some(label),
                ..
            } if label == "F_crit = 3.3541" => Some(*x),
            _ => None,
        });
        assert_eq!(boundary, Some(3.3541));

        assert!(density.elements.iter().any(|element| {
            matches!(element, Element::Annotation { text, .. } if text == "H0 ОТВЕРГАЕТСЯ")
        }));
    }

    #[test]
    fn the_means_panel_carries_one_bar_per_group() {
        let text: String = writer::write_anova(&anova_fixture());
        let parsed: AnovaResult = parser::parse_anova(&text).expect("own output should parse");
        let figure = compose_anova(&parsed).expect("a parsed report always composes");

        let means: &Panel = &figure.model.panels[1];
        assert_eq!(means.x_range, Some((0.0, 4.0)));

        let heights = means.elements.iter().find_map(|element| match element {
            Element::Bars { bars, .. } => {
                Some(bars.iter().map(|bar| bar.height).collect::<Vec<f64>>())
            }
            _ => None,
        });
        assert_eq!(heights, Some(vec![23.12, 25.4, 27.84]));

        let grand = means.elements.iter().find_map(|element| match element {
            Element::HorizontalLine { y, .. } => Some(*y),
            _ => None,
        });
        assert_eq!(grand, Some(25.4533));
    }
}

mod weibull_pipeline_tests {
    use super::*;

    #[test]
    fn censored_observations_get_their_own_markers() {
        let text: String = writer::write_weibull(&weibull_fixture());
        let parsed: WeibullFitResult =
            parser::parse_weibull(&text, WeibullFitMethod::Mls).expect("own output should parse");
        let figure = compose_weibull(&parsed).expect("seven complete observations are plenty");

        assert!(figure.skipped.is_empty());
        assert_eq!(figure.model.layout, Layout::Single);
        assert_eq!(figure.model.panels.len(), 1);

        let panel: &Panel = &figure.model.panels[0];
        let arrows = panel.elements.iter().find_map(|element| match element {
            Element::Markers {
                points,
                shape: MarkerShape::RightArrow,
                label,
                ..
            } => Some((points.clone(), label.clone())),
            _ => None,
        });
        let (points, label) = arrows.expect("three censored observations should leave arrows");
        let xs: Vec<f64> = points.iter().map(|&(x, _)| x).collect();
        assert_eq!(xs, vec![88.4, 115.9, 152.6]);
        assert_eq!(label.as_deref(), Some("Цензурировано"));

        let ticks = panel.elements.iter().find_map(|element| match element {
            Element::Markers {
                points,
                shape: MarkerShape::Cross,
                ..
            } => Some(points.len()),
            _ => None,
        });
        assert_eq!(ticks, Some(7));
    }

    #[test]
    fn the_fitted_curve_names_both_parameters() {
        let text: String = writer::write_weibull(&weibull_fixture());
        let parsed: WeibullFitResult =
            parser::parse_weibull(&text, WeibullFitMethod::Mls).expect("own output should parse");
        let figure = compose_weibull(&parsed).expect("seven complete observations are plenty");

        let panel: &Panel = &figure.model.panels[0];
        let curve_label = panel.elements.iter().find_map(|element| match element {
            Element::Curve { label, .. } => label.clone(),
            _ => None,
        });
        assert_eq!(
            curve_label.as_deref(),
            Some("Вейбулл(k = 1.8420, λ = 118.5000)")
        );
    }

    #[test]
    fn too_few_complete_observations_drop_the_histogram_not_the_curve() {
        let mut result: WeibullFitResult = weibull_fixture();
        result.censored = vec![true; result.observations.len()];
        result.censored[0] = false;

        let figure = compose_weibull(&result).expect("the curve needs no histogram");

        assert_eq!(figure.skipped.len(), 1);
        assert_eq!(figure.skipped[0].caption, "Гистограмма");
        assert_eq!(
            figure.skipped[0].reason,
            "всего 1 полных наблюдений, нужно не меньше 3"
        );

        let panel: &Panel = &figure.model.panels[0];
        let has_bars: bool = panel
            .elements
            .iter()
            .any(|element| matches!(element, Element::Bars { .. }));
        assert!(!has_bars);
        let has_curve: bool = panel
            .elements
            .iter()
            .any(|element| matches!(element, Element::Curve { .. }));
        assert!(has_curve);
    }

    #[test]
    fn a_fit_on_tiny_values_still_gets_an_increasing_curve_window() {
        // millimeter-scale lifetimes end far below the usual left edge
        let result: WeibullFitResult = WeibullFitResult {
            method: WeibullFitMethod::Mle,
            scale: 0.004,
            shape: 1.5,
            scale_std_error: None,
            shape_std_error: None,
            observations: vec![0.002, 0.003, 0.005],
            censored: vec![false, false, false],
        };

        let figure = compose_weibull(&result).expect("tiny observations are still a valid fit");

        let panel: &Panel = &figure.model.panels[0];
        let points = panel
            .elements
            .iter()
            .find_map(|element| match element {
                Element::Curve { points, .. } => Some(points.clone()),
                _ => None,
            })
            .expect("the fitted curve always renders");
        let first_x: f64 = points.first().map(|&(x, _)| x).expect("a non empty curve");
        let last_x: f64 = points.last().map(|&(x, _)| x).expect("a non empty curve");
        assert!(first_x < last_x);
    }
}

mod wilcoxon_pipeline_tests {
    use super::*;

    #[test]
    fn absent_samples_skip_the_sample_panels_but_keep_the_summary() {
        let figure =
            compose_wilcoxon(&wilcoxon_fixture(), None, None).expect("the summary always builds");

        assert_eq!(figure.model.layout, Layout::GridOfFour);
        assert_eq!(figure.model.panels.len(), 1);

        let captions: Vec<&str> = figure
            .skipped
            .iter()
            .map(|skip| skip.caption.as_str())
            .collect();
        assert_eq!(
            captions,
            vec!["Средние выборок", "Диаграммы размаха", "Наблюдения"]
        );
        for skip in &figure.skipped {
            assert_eq!(skip.reason, "файлы с выборками не найдены или пусты");
        }

        let summary: &Panel = &figure.model.panels[0];
        assert_eq!(summary.caption, "Сводка критерия");
        assert!(!summary.mesh);
        let lines = summary
            .elements
            .iter()
            .find_map(|element| match element {
                Element::TextBlock { lines } => Some(lines.clone()),
                _ => None,
            })
            .expect("the summary panel is a text block");
        assert!(lines.contains(&String::from("n₁ = 12, n₂ = 15")));
        assert!(lines.contains(&String::from("W (сумма рангов) = 141.50")));
        assert!(lines.contains(&String::from("РЕЗУЛЬТАТ: H0 НЕ ОТВЕРГАЕТСЯ")));
    }

    #[test]
    fn a_sample_file_without_observations_degrades_like_a_missing_one() {
        let dir: tempfile::TempDir = tempfile::tempdir().expect("temp dir");
        let path: PathBuf = dir.path().join("sample1.txt");
        std::fs::write(&path, "# файл есть, наблюдений нет\n").expect("write fixture");
        let empty: SampleData = SampleData::load(&path).expect("comments only is a valid file");
        assert!(empty.is_empty());

        let figure = compose_wilcoxon(&wilcoxon_fixture(), Some(&empty), Some(&empty))
            .expect("empty samples must not fail the figure");

        assert_eq!(figure.model.panels.len(), 1);
        assert_eq!(figure.skipped.len(), 3);
        for skip in &figure.skipped {
            assert_eq!(skip.reason, "файлы с выборками не найдены или пусты");
        }
    }

    #[test]
    fn one_empty_sample_still_draws_the_other() {
        let empty: SampleData = SampleData::new(Vec::new()).expect("an empty sample is valid");
        let second: SampleData =
            SampleData::new(vec![15.0, 17.0, 19.0, 21.0]).expect("finite values");

        let figure = compose_wilcoxon(&wilcoxon_fixture(), Some(&empty), Some(&second))
            .expect("one drawable sample is enough");

        assert!(figure.skipped.is_empty());
        assert_eq!(figure.model.panels.len(), 4);

        let box_count: usize = figure.model.panels[1]
            .elements
            .iter()
            .filter(|element| matches!(element, Element::BoxWhisker { .. }))
            .count();
        assert_eq!(box_count, 1);

        let strip_panel: &Panel = &figure.model.panels[2];
        let labels: Vec<String> = strip_panel
            .elements
            .iter()
            .filter_map(|element| match element {
                Element::Markers { label, .. } => label.clone(),
                _ => None,
            })
            .collect();
        assert_eq!(labels, vec!["Выборка 2"]);
    }

    #[test]
    fn both_samples_fill_all_four_panels() {
        let first: SampleData =
            SampleData::new(vec![12.0, 14.0, 16.0]).expect("finite values");
        let second: SampleData =
            SampleData::new(vec![15.0, 17.0, 19.0, 21.0]).expect("finite values");

        let figure = compose_wilcoxon(&wilcoxon_fixture(), Some(&first), Some(&second))
            .expect("both samples are present");

        assert!(figure.skipped.is_empty());
        assert_eq!(figure.model.panels.len(), 4);

        let means_panel: &Panel = &figure.model.panels[0];
        let heights = means_panel.elements.iter().find_map(|element| match element {
            Element::Bars { bars, .. } => {
                Some(bars.iter().map(|bar| bar.height).collect::<Vec<f64>>())
            }
            _ => None,
        });
        assert_eq!(heights, Some(vec![14.0, 18.0]));

        let box_count: usize = figure.model.panels[1]
            .elements
            .iter()
            .filter(|element| matches!(element, Element::BoxWhisker { .. }))
            .count();
        assert_eq!(box_count, 2);

        let strip_panel: &Panel = &figure.model.panels[2];
        let mut strip_labels: Vec<String> = Vec::new();
        let mut strip_sizes: Vec<usize> = Vec::new();
        for element in &strip_panel.elements {
            if let Element::Markers { points, label, .. } = element {
                strip_sizes.push(points.len());
                if let Some(label) = label {
                    strip_labels.push(label.clone());
                }
            }
        }
        assert_eq!(strip_labels, vec!["Выборка 1", "Выборка 2"]);
        assert_eq!(strip_sizes, vec![3, 4]);
    }
}

mod raster_tests {
    use super::*;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn a_textless_figure_renders_to_a_real_png() {
        let dir: tempfile::TempDir = tempfile::tempdir().expect("temp dir");
        let path: PathBuf = dir.path().join("smoke.png");

        let mut model: FigureModel = FigureModel::new("", Layout::Single);
        model.panels.push(Panel::text_panel("", Vec::new()));
        assert_eq!(model.size, (900, 600));

        render_figure(&model, &path).expect("no fonts are involved here");

        let bytes: Vec<u8> = std::fs::read(&path).expect("the file should exist");
        assert!(PNG_MAGIC.len() < bytes.len());
        assert_eq!(&bytes[..PNG_MAGIC.len()], PNG_MAGIC);
    }

    #[test]
    fn the_grid_layout_renders_on_its_larger_canvas() {
        let dir: tempfile::TempDir = tempfile::tempdir().expect("temp dir");
        let path: PathBuf = dir.path().join("grid.png");

        let mut model: FigureModel = FigureModel::new("", Layout::GridOfFour);
        for _ in 0..4 {
            model.panels.push(Panel::text_panel("", Vec::new()));
        }
        assert_eq!(model.size, (1200, 900));

        render_figure(&model, &path).expect("no fonts are involved here");

        let bytes: Vec<u8> = std::fs::read(&path).expect("the file should exist");
        assert_eq!(&bytes[..PNG_MAGIC.len()], PNG_MAGIC);
    }
}
