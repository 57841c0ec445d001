//! Draws a [FigureModel] to a PNG file with `plotters`.
//!
//! The renderer is a plain walk over the model: it never recomputes
//! geometry, only translates [Element]s into backend calls. Axis ranges
//! missing from a panel are derived from the element bounds with a 5%
//! margin, and dashed lines are emitted as chains of short segments.
//!
//! Every backend failure is flattened into [VizError::Render], keeping
//! the drawing stack out of the public error type.

use std::path::Path;

use plotters::prelude::*;

use crate::{
    errors::VizError,
    plot::figure::{Element, FigureModel, MarkerShape, PaletteColor, Panel},
};

/// Dashes drawn per dashed line.
const DASH_COUNT: usize = 24;

fn to_render_error<E: std::fmt::Display>(error: E) -> VizError {
    return VizError::Render(error.to_string());
}

/// The concrete color of a palette entry.
fn palette_rgb(color: PaletteColor) -> RGBColor {
    return match color {
        PaletteColor::Blue => RGBColor(52, 152, 219),
        PaletteColor::LightBlue => RGBColor(135, 206, 235),
        PaletteColor::Red => RGBColor(231, 76, 60),
        PaletteColor::LightRed => RGBColor(240, 128, 128),
        PaletteColor::Green => RGBColor(46, 204, 113),
        PaletteColor::Orange => RGBColor(243, 156, 18),
        PaletteColor::Gray => RGBColor(127, 140, 141),
        PaletteColor::Black => RGBColor(0, 0, 0),
    };
}

fn stretch(min: &mut f64, max: &mut f64, value: f64) {
    if value.is_finite() {
        if value < *min {
            *min = value;
        }
        if *max < value {
            *max = value;
        }
    }
}

/// Pads a raw data interval by 5% on each side. A zero or negative
/// lower bound keeps its baseline at `0.0` so densities and counts sit
/// on the axis; degenerate and empty intervals widen to something
/// drawable.
fn padded(low: f64, high: f64) -> (f64, f64) {
    if !low.is_finite() || !high.is_finite() {
        return (0.0, 1.0);
    }
    let (low, high): (f64, f64) = if low == high {
        (low - 0.5, high + 0.5)
    } else {
        (low, high)
    };
    let margin: f64 = 0.05 * (high - low);
    let mut padded_low: f64 = low - margin;
    if 0.0 <= low && padded_low < 0.0 {
        padded_low = 0.0;
    }
    return (padded_low, high + margin);
}

/// Axis ranges of a panel: the explicit ones when set, otherwise the
/// bounds of every element plus the margin of [padded].
fn panel_ranges(panel: &Panel) -> ((f64, f64), (f64, f64)) {
    let mut x_min: f64 = f64::INFINITY;
    let mut x_max: f64 = f64::NEG_INFINITY;
    let mut y_min: f64 = f64::INFINITY;
    let mut y_max: f64 = f64::NEG_INFINITY;

    for element in &panel.elements {
        match element {
            Element::Curve { points, .. }
            | Element::Polygon { points, .. }
            | Element::Markers { points, .. } => {
                for &(x, y) in points {
                    stretch(&mut x_min, &mut x_max, x);
                    stretch(&mut y_min, &mut y_max, y);
                }
            }
            Element::VerticalLine { x, .. } => stretch(&mut x_min, &mut x_max, *x),
            Element::HorizontalLine { y, .. } => stretch(&mut y_min, &mut y_max, *y),
            Element::Bars { bars, .. } => {
                for bar in bars {
                    stretch(&mut x_min, &mut x_max, bar.left);
                    stretch(&mut x_min, &mut x_max, bar.right);
                    stretch(&mut y_min, &mut y_max, 0.0);
                    stretch(&mut y_min, &mut y_max, bar.height);
                }
            }
            Element::BoxWhisker {
                at, width, stats, ..
            } => {
                stretch(&mut x_min, &mut x_max, at - width / 2.0);
                stretch(&mut x_min, &mut x_max, at + width / 2.0);
                stretch(&mut y_min, &mut y_max, stats.minimum);
                stretch(&mut y_min, &mut y_max, stats.maximum);
                for &outlier in &stats.outliers {
                    stretch(&mut y_min, &mut y_max, outlier);
                }
            }
            Element::Annotation { x, y, .. } => {
                stretch(&mut x_min, &mut x_max, *x);
                stretch(&mut y_min, &mut y_max, *y);
            }
            Element::TextBlock { .. } => {}
        }
    }

    let x_range: (f64, f64) = panel.x_range.unwrap_or_else(|| padded(x_min, x_max));
    let y_range: (f64, f64) = panel.y_range.unwrap_or_else(|| padded(y_min, y_max));
    return (x_range, y_range);
}

/// Splits the segment `from..to` into `count` dashes with equal gaps.
fn dash_segments(from: (f64, f64), to: (f64, f64), count: usize) -> Vec<Vec<(f64, f64)>> {
    let slots: f64 = (2 * count - 1) as f64;
    let mut segments: Vec<Vec<(f64, f64)>> = Vec::with_capacity(count);
    for index in 0..count {
        let start: f64 = (2 * index) as f64 / slots;
        let end: f64 = (2 * index + 1) as f64 / slots;
        segments.push(vec![
            (
                from.0 + start * (to.0 - from.0),
                from.1 + start * (to.1 - from.1),
            ),
            (from.0 + end * (to.0 - from.0), from.1 + end * (to.1 - from.1)),
        ]);
    }
    return segments;
}

/// Renders a composed model into the PNG file at `path`.
///
/// The canvas is filled white, split evenly according to the layout and
/// the panels are drawn into the slots in order. Extra slots of a
/// partially filled layout stay blank.
pub fn render_figure(model: &FigureModel, path: &Path) -> Result<(), VizError> {
    let root = BitMapBackend::new(path, model.size).into_drawing_area();
    root.fill(&WHITE).map_err(to_render_error)?;
    // an empty title keeps the whole canvas, and keeps fonts out of play
    let content = if model.title.is_empty() {
        root.clone()
    } else {
        root.titled(&model.title, ("sans-serif", 24))
            .map_err(to_render_error)?
    };

    let slots = content.split_evenly(model.layout.grid());
    for (panel, area) in model.panels.iter().zip(slots.iter()) {
        if panel.mesh {
            draw_mesh_panel(panel, area)?;
        } else {
            draw_text_panel(panel, area)?;
        }
    }

    root.present().map_err(to_render_error)?;
    return Ok(());
}

/// Draws a panel with axes, walking its elements in order so that
/// earlier elements end up underneath later ones.
fn draw_mesh_panel<DB: DrawingBackend>(
    panel: &Panel,
    area: &DrawingArea<DB, plotters::coord::Shift>,
) -> Result<(), VizError> {
    let ((x_low, x_high), (y_low, y_high)): ((f64, f64), (f64, f64)) = panel_ranges(panel);

    let mut chart = ChartBuilder::on(area)
        .caption(&panel.caption, ("sans-serif", 18))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_low..x_high, y_low..y_high)
        .map_err(to_render_error)?;
    chart
        .configure_mesh()
        .x_desc(panel.x_label.as_str())
        .y_desc(panel.y_label.as_str())
        .draw()
        .map_err(to_render_error)?;

    let mut has_labels: bool = false;
    for element in &panel.elements {
        match element {
            Element::Curve {
                points,
                color,
                width,
                label,
            } => {
                let rgb: RGBColor = palette_rgb(*color);
                let series = chart
                    .draw_series(LineSeries::new(
                        points.iter().copied(),
                        rgb.stroke_width(*width),
                    ))
                    .map_err(to_render_error)?;
                if let Some(label) = label {
                    has_labels = true;
                    series.label(label.as_str()).legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], rgb.stroke_width(2))
                    });
                }
            }
            Element::Polygon {
                points,
                color,
                opacity,
            } => {
                chart
                    .draw_series(std::iter::once(Polygon::new(
                        points.clone(),
                        palette_rgb(*color).mix(*opacity).filled(),
                    )))
                    .map_err(to_render_error)?;
            }
            Element::VerticalLine {
                x,
                color,
                dashed,
                label,
            } => {
                let rgb: RGBColor = palette_rgb(*color);
                let from: (f64, f64) = (*x, y_low);
                let to: (f64, f64) = (*x, y_high);
                let series = if *dashed {
                    chart
                        .draw_series(
                            dash_segments(from, to, DASH_COUNT).into_iter().map(
                                |segment| PathElement::new(segment, rgb.stroke_width(2)),
                            ),
                        )
                        .map_err(to_render_error)?
                } else {
                    chart
                        .draw_series(std::iter::once(PathElement::new(
                            vec![from, to],
                            rgb.stroke_width(2),
                        )))
                        .map_err(to_render_error)?
                };
                if let Some(label) = label {
                    has_labels = true;
                    series.label(label.as_str()).legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], rgb.stroke_width(2))
                    });
                }
            }
            Element::HorizontalLine {
                y,
                color,
                dashed,
                label,
            } => {
                let rgb: RGBColor = palette_rgb(*color);
                let from: (f64, f64) = (x_low, *y);
                let to: (f64, f64) = (x_high, *y);
                let series = if *dashed {
                    chart
                        .draw_series(
                            dash_segments(from, to, DASH_COUNT).into_iter().map(
                                |segment| PathElement::new(segment, rgb.stroke_width(2)),
                            ),
                        )
                        .map_err(to_render_error)?
                } else {
                    chart
                        .draw_series(std::iter::once(PathElement::new(
                            vec![from, to],
                            rgb.stroke_width(2),
                        )))
                        .map_err(to_render_error)?
                };
                if let Some(label) = label {
                    has_labels = true;
                    series.label(label.as_str()).legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 20, y)], rgb.stroke_width(2))
                    });
                }
            }
            Element::Bars { bars, color } => {
                let rgb: RGBColor = palette_rgb(*color);
                chart
                    .draw_series(bars.iter().map(|bar| {
                        Rectangle::new(
                            [(bar.left, 0.0), (bar.right, bar.height)],
                            rgb.mix(0.7).filled(),
                        )
                    }))
                    .map_err(to_render_error)?;
                chart
                    .draw_series(bars.iter().map(|bar| {
                        Rectangle::new(
                            [(bar.left, 0.0), (bar.right, bar.height)],
                            rgb.stroke_width(1),
                        )
                    }))
                    .map_err(to_render_error)?;
            }
            Element::Markers {
                points,
                color,
                shape,
                size,
                label,
            } => {
                let rgb: RGBColor = palette_rgb(*color);
                let radius: i32 = *size as i32;
                match shape {
                    MarkerShape::Circle => {
                        let series = chart
                            .draw_series(
                                points
                                    .iter()
                                    .map(|&(x, y)| Circle::new((x, y), radius, rgb.filled())),
                            )
                            .map_err(to_render_error)?;
                        if let Some(label) = label {
                            has_labels = true;
                            series.label(label.as_str()).legend(move |(x, y)| {
                                Circle::new((x + 10, y), 4, rgb.filled())
                            });
                        }
                    }
                    MarkerShape::Cross => {
                        let series = chart
                            .draw_series(points.iter().map(|&(x, y)| {
                                Cross::new((x, y), radius, rgb.stroke_width(2))
                            }))
                            .map_err(to_render_error)?;
                        if let Some(label) = label {
                            has_labels = true;
                            series.label(label.as_str()).legend(move |(x, y)| {
                                Cross::new((x + 10, y), 4, rgb.stroke_width(2))
                            });
                        }
                    }
                    MarkerShape::RightArrow => {
                        // no ready made right arrow, the glyph stands in
                        let series = chart
                            .draw_series(points.iter().map(|&(x, y)| {
                                Text::new(
                                    ">".to_string(),
                                    (x, y),
                                    ("sans-serif", 20).into_font().color(&rgb),
                                )
                            }))
                            .map_err(to_render_error)?;
                        if let Some(label) = label {
                            has_labels = true;
                            series.label(label.as_str()).legend(move |(x, y)| {
                                Text::new(
                                    ">".to_string(),
                                    (x, y - 8),
                                    ("sans-serif", 16).into_font().color(&rgb),
                                )
                            });
                        }
                    }
                }
            }
            Element::BoxWhisker {
                at,
                width,
                stats,
                color,
            } => {
                let rgb: RGBColor = palette_rgb(*color);
                let half: f64 = width / 2.0;
                let cap: f64 = half * 0.5;
                chart
                    .draw_series(std::iter::once(Rectangle::new(
                        [(at - half, stats.q1), (at + half, stats.q3)],
                        rgb.mix(0.35).filled(),
                    )))
                    .map_err(to_render_error)?;
                chart
                    .draw_series(std::iter::once(Rectangle::new(
                        [(at - half, stats.q1), (at + half, stats.q3)],
                        rgb.stroke_width(2),
                    )))
                    .map_err(to_render_error)?;
                let strokes: Vec<Vec<(f64, f64)>> = vec![
                    vec![(at - half, stats.median), (at + half, stats.median)],
                    vec![(*at, stats.q3), (*at, stats.maximum)],
                    vec![(*at, stats.q1), (*at, stats.minimum)],
                    vec![(at - cap, stats.maximum), (at + cap, stats.maximum)],
                    vec![(at - cap, stats.minimum), (at + cap, stats.minimum)],
                ];
                chart
                    .draw_series(
                        strokes
                            .into_iter()
                            .map(|stroke| PathElement::new(stroke, rgb.stroke_width(2))),
                    )
                    .map_err(to_render_error)?;
                chart
                    .draw_series(
                        stats
                            .outliers
                            .iter()
                            .map(|&value| Circle::new((*at, value), 3, rgb.filled())),
                    )
                    .map_err(to_render_error)?;
            }
            Element::Annotation { x, y, text, color } => {
                chart
                    .draw_series(std::iter::once(Text::new(
                        text.clone(),
                        (*x, *y),
                        ("sans-serif", 15)
                            .into_font()
                            .color(&palette_rgb(*color)),
                    )))
                    .map_err(to_render_error)?;
            }
            Element::TextBlock { lines } => {
                // stacked from the top left corner, in data space
                for (index, line) in lines.iter().enumerate() {
                    let x: f64 = x_low + 0.05 * (x_high - x_low);
                    let y: f64 = y_high - (0.08 + 0.07 * index as f64) * (y_high - y_low);
                    chart
                        .draw_series(std::iter::once(Text::new(
                            line.clone(),
                            (x, y),
                            ("monospace", 15).into_font().color(&BLACK),
                        )))
                        .map_err(to_render_error)?;
                }
            }
        }
    }

    if has_labels {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(to_render_error)?;
    }
    return Ok(());
}

/// Draws a text-only panel: the caption and its line block, positioned
/// in pixels since there are no axes to speak of.
fn draw_text_panel<DB: DrawingBackend>(
    panel: &Panel,
    area: &DrawingArea<DB, plotters::coord::Shift>,
) -> Result<(), VizError> {
    if !panel.caption.is_empty() {
        let caption_style = ("sans-serif", 20).into_font().color(&BLACK);
        area.draw_text(&panel.caption, &caption_style, (20, 15))
            .map_err(to_render_error)?;
    }

    let line_style = ("monospace", 16).into_font().color(&BLACK);
    let mut y: i32 = 55;
    for element in &panel.elements {
        if let Element::TextBlock { lines } = element {
            for line in lines {
                area.draw_text(line, &line_style, (25, y))
                    .map_err(to_render_error)?;
                y += 24;
            }
        }
    }
    return Ok(());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::figure::{Bar, BoxStats};

    #[test]
    fn padded_adds_margin_and_keeps_zero_baseline() {
        let (low, high): (f64, f64) = padded(0.0, 10.0);
        assert_eq!(low, 0.0);
        assert_eq!(high, 10.5);

        let (low, high): (f64, f64) = padded(-4.0, 4.0);
        assert_eq!(low, -4.4);
        assert_eq!(high, 4.4);
    }

    #[test]
    fn padded_widens_degenerate_and_empty_intervals() {
        let (low, high): (f64, f64) = padded(2.0, 2.0);
        assert!(low < 2.0 && 2.0 < high);

        let (low, high): (f64, f64) = padded(f64::INFINITY, f64::NEG_INFINITY);
        assert_eq!((low, high), (0.0, 1.0));
    }

    #[test]
    fn dash_segments_cover_the_span_with_gaps() {
        let segments: Vec<Vec<(f64, f64)>> = dash_segments((0.0, 0.0), (1.0, 0.0), 4);
        assert_eq!(segments.len(), 4);
        assert_eq!(segments[0][0], (0.0, 0.0));
        assert_eq!(segments[3][1], (1.0, 0.0));
        // a gap separates consecutive dashes
        assert!(segments[0][1].0 < segments[1][0].0);
    }

    #[test]
    fn panel_ranges_cover_every_element_kind() {
        let mut panel: Panel = Panel::new("p", "x", "y");
        panel.elements.push(Element::Curve {
            points: vec![(1.0, 0.1), (2.0, 0.4)],
            color: PaletteColor::Blue,
            width: 2,
            label: None,
        });
        panel.elements.push(Element::VerticalLine {
            x: 5.0,
            color: PaletteColor::Red,
            dashed: false,
            label: None,
        });
        panel.elements.push(Element::Bars {
            bars: vec![Bar {
                left: -1.0,
                right: 0.0,
                height: 2.0,
            }],
            color: PaletteColor::LightBlue,
        });
        panel.elements.push(Element::BoxWhisker {
            at: 3.0,
            width: 1.0,
            stats: BoxStats {
                minimum: -2.0,
                q1: -1.0,
                median: 0.0,
                q3: 1.0,
                maximum: 2.0,
                outliers: vec![9.0],
            },
            color: PaletteColor::Green,
        });

        let ((x_low, x_high), (y_low, y_high)): ((f64, f64), (f64, f64)) = panel_ranges(&panel);
        assert!(x_low <= -1.0 && 5.0 <= x_high);
        assert!(y_low <= -2.0 && 9.0 <= y_high);
    }

    #[test]
    fn explicit_ranges_override_the_bounds() {
        let mut panel: Panel = Panel::new("p", "x", "y");
        panel.x_range = Some((0.0, 3.0));
        panel.elements.push(Element::Curve {
            points: vec![(100.0, 200.0)],
            color: PaletteColor::Blue,
            width: 1,
            label: None,
        });
        let ((x_low, x_high), _): ((f64, f64), (f64, f64)) = panel_ranges(&panel);
        assert_eq!((x_low, x_high), (0.0, 3.0));
    }
}
