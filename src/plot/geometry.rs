//! Pure geometry behind the panels.
//!
//! Everything here computes plain coordinate lists so both the
//! composers and the tests can reason about positions without touching
//! a rasterizer.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    distribution_trait::Distribution,
    distributions::Normal::StdNormal,
    plot::figure::{Bar, BoxStats},
    samples,
};

/// Samples a density on an evenly spaced grid over `range`.
///
/// **Panicks** if `points < 2` or the range is not increasing.
#[must_use]
pub fn density_curve(
    distribution: &dyn Distribution,
    range: (f64, f64),
    points: usize,
) -> Vec<(f64, f64)> {
    let (low, high): (f64, f64) = range;
    assert!(2 <= points, "A density curve needs at least 2 points. ");
    assert!(low < high, "A density curve needs an increasing range. ");

    let step: f64 = (high - low) / ((points - 1) as f64);
    let mut curve: Vec<(f64, f64)> = Vec::with_capacity(points);
    for index in 0..points {
        let x: f64 = (index as f64).mul_add(step, low);
        curve.push((x, distribution.pdf(x)));
    }
    return curve;
}

/// Closes the part of `curve` between `from` and `to` down to the x
/// axis, giving the polygon of a shaded region. Empty when the window
/// contains no curve points.
#[must_use]
pub fn region_under_curve(curve: &[(f64, f64)], from: f64, to: f64) -> Vec<(f64, f64)> {
    if to <= from {
        return Vec::new();
    }
    let inside: Vec<(f64, f64)> = curve
        .iter()
        .copied()
        .filter(|(x, _)| from <= *x && *x <= to)
        .collect();
    if inside.is_empty() {
        return Vec::new();
    }

    let mut polygon: Vec<(f64, f64)> = Vec::with_capacity(inside.len() + 2);
    polygon.push((inside[0].0, 0.0));
    polygon.extend(inside.iter().copied());
    polygon.push((inside[inside.len() - 1].0, 0.0));
    return polygon;
}

/// Sturges' rule: `ceil(log2(n)) + 1` bins.
#[must_use]
pub fn sturges_bins(n: usize) -> usize {
    if n == 0 {
        return 1;
    }
    return ((n as f64).log2().ceil() as usize) + 1;
}

/// Equal width histogram with raw counts as heights.
///
/// A constant sample collapses into one unit wide bar around the value.
///
/// **Panicks** if `bins` is zero.
#[must_use]
pub fn histogram(data: &[f64], bins: usize) -> Vec<Bar> {
    assert!(bins != 0, "A histogram needs at least 1 bin. ");
    if data.is_empty() {
        return Vec::new();
    }

    let low: f64 = data.iter().copied().fold(f64::INFINITY, f64::min);
    let high: f64 = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if high <= low {
        return vec![Bar {
            left: low - 0.5,
            right: low + 0.5,
            height: data.len() as f64,
        }];
    }

    let width: f64 = (high - low) / (bins as f64);
    let mut counts: Vec<u64> = vec![0; bins];
    for &value in data {
        let mut index: usize = ((value - low) / width) as usize;
        if bins <= index {
            // The maximum lands exactly on the right edge.
            index = bins - 1;
        }
        counts[index] += 1;
    }

    return counts
        .iter()
        .enumerate()
        .map(|(index, &count)| Bar {
            left: (index as f64).mul_add(width, low),
            right: ((index + 1) as f64).mul_add(width, low),
            height: count as f64,
        })
        .collect();
}

/// Histogram normalized to integrate to one, so a fitted density can be
/// drawn over it.
#[must_use]
pub fn density_histogram(data: &[f64], bins: usize) -> Vec<Bar> {
    let total: f64 = data.len() as f64;
    return histogram(data, bins)
        .into_iter()
        .map(|bar| Bar {
            left: bar.left,
            right: bar.right,
            height: bar.height / (total * (bar.right - bar.left)),
        })
        .collect();
}

/// Q-Q plot points against the fitted normal: `(mean + sd * z_i, x_(i))`
/// with plotting positions `(i + 0.5) / n`.
///
/// `sorted` must be in ascending order.
#[must_use]
pub fn qq_normal_points(sorted: &[f64], mean: f64, std_dev: f64) -> Vec<(f64, f64)> {
    let n: usize = sorted.len();
    if n == 0 {
        return Vec::new();
    }

    let std_normal: StdNormal = StdNormal::new();
    let positions: Vec<f64> = (0..n).map(|i| (i as f64 + 0.5) / (n as f64)).collect();
    let z: Vec<f64> = std_normal.quantile_multiple(&positions);

    return sorted
        .iter()
        .enumerate()
        .map(|(index, &observed)| (std_dev.mul_add(z[index], mean), observed))
        .collect();
}

/// Five number summary with 1.5 IQR whiskers. Whisker ends sit on the
/// most extreme observations inside the fences; everything beyond goes
/// into `outliers`.
///
/// **Panicks** if `data` is empty.
#[must_use]
pub fn box_stats(data: &[f64]) -> BoxStats {
    assert!(!data.is_empty(), "A box plot needs at least 1 value. ");

    let mut sorted: Vec<f64> = data.to_vec();
    sorted.sort_by(f64::total_cmp);

    let q1: f64 = samples::interpolated_quantile(&sorted, 0.25);
    let median: f64 = samples::interpolated_quantile(&sorted, 0.5);
    let q3: f64 = samples::interpolated_quantile(&sorted, 0.75);
    let iqr: f64 = q3 - q1;
    let low_fence: f64 = 1.5_f64.mul_add(-iqr, q1);
    let high_fence: f64 = 1.5_f64.mul_add(iqr, q3);

    let minimum: f64 = sorted
        .iter()
        .copied()
        .find(|value| low_fence <= *value)
        .unwrap_or(q1);
    let maximum: f64 = sorted
        .iter()
        .rev()
        .copied()
        .find(|value| *value <= high_fence)
        .unwrap_or(q3);
    let outliers: Vec<f64> = sorted
        .iter()
        .copied()
        .filter(|value| *value < low_fence || high_fence < *value)
        .collect();

    return BoxStats {
        minimum,
        q1,
        median,
        q3,
        maximum,
        outliers,
    };
}

/// Strip plot coordinates: every value at `center` plus a deterministic
/// horizontal jitter within `amplitude`.
#[must_use]
pub fn jittered(values: &[f64], center: f64, amplitude: f64, seed: u64) -> Vec<(f64, f64)> {
    let mut rng: StdRng = StdRng::seed_from_u64(seed);
    return values
        .iter()
        .map(|&value| (center + rng.random_range(-amplitude..=amplitude), value))
        .collect();
}
