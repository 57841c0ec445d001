
//! This file contains the deafult values and other value choices used trough the library.
//!


/// Inverting a cdf numerically needs a stopping rule and a bracket policy.
///
/// The quantile function first brackets the answer by walking outward from the
/// distribution mode in steps of [QUANTILE_BRACKET_STEP] standard-length units
/// (up to [QUANTILE_BRACKET_MAX_DOUBLINGS] doublings for heavy tails), then
/// bisects until the bracket is narrower than [QUANTILE_BISECTION_TOLERANCE]
/// or [QUANTILE_MAX_BISECTIONS] halvings have happened.
///
/// There are no perfect values that will work with every distribution. Increasing
/// the precision comes with an extra computational cost. We recommend changing the
/// values to fit your needs. This values are just a mere recomendation.
pub mod quantile {

/// Width of the initial bracketing step, in units of the distribution's scale.
pub static QUANTILE_BRACKET_STEP: f64 = 1.0;

/// How many times the bracketing step may be doubled before giving up on
/// an open-ended tail. `2^40` scale units is far past any plotted region.
pub static QUANTILE_BRACKET_MAX_DOUBLINGS: u32 = 40;

/// Bisection stops once the bracket is narrower than this.
pub static QUANTILE_BISECTION_TOLERANCE: f64 = 1.0e-12;

/// Hard cap on bisection iterations.
/// `80` halvings shrink any practical bracket below tolerance.
pub static QUANTILE_MAX_BISECTIONS: u32 = 80;

}

/// Determines if a Newton's method iteration is used in the (deafult)
/// quantile function (continuous).
///
/// It generally improves precision, but you may want to disable it
/// if it leads to errors.
pub static QUANTILE_USE_NEWTONS_ITER: bool = true;

/// Significance level assumed when a report does not state one.
pub static DEFAULT_SIGNIFICANCE: f64 = 0.05;

/// Policies for turning a distribution and a handful of markers into
/// the x-interval and sampling grid of a plotted curve.
pub mod curve {

/// Number of points on every plotted density curve.
pub static CURVE_POINTS: usize = 1000;

/// Left edge for distributions supported on the positive half-line.
/// Avoids evaluating densities at `0.0`, where some of them blow up.
pub static POSITIVE_SUPPORT_LEFT_EDGE: f64 = 0.01;

/// Margin multiplier so that statistic/critical markers never sit on
/// the right border of the plot.
pub static MARKER_MARGIN: f64 = 1.5;

/// Minimum right edge for right-skewed test statistics (F, chi-squared).
pub static RIGHT_EDGE_FLOOR: f64 = 5.0;

/// Half-width of a symmetric plot window, in standard deviations.
pub static SYMMETRIC_SIGMAS: f64 = 4.0;

}

/// Canvas sizes in pixels, one per figure layout.
pub mod canvas {

/// Single panel figures.
pub static SINGLE: (u32, u32) = (900, 600);

/// Two panels side by side.
pub static DUAL: (u32, u32) = (1200, 500);

/// Two by two grid.
pub static GRID_OF_FOUR: (u32, u32) = (1200, 900);

}
