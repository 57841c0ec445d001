//! This script contains the interface used to comunicate with the distributions.

use crate::configuration;
use crate::configuration::quantile::{
    QUANTILE_BISECTION_TOLERANCE, QUANTILE_BRACKET_MAX_DOUBLINGS, QUANTILE_BRACKET_STEP,
    QUANTILE_MAX_BISECTIONS,
};
use crate::domain::ContinuousDomain;

/// The trait for any continuous distribution.
///
/// None of the provided methods are guaranteed to work if the implemented
/// [Distribution::pdf] is NOT a [valid pdf](https://en.wikipedia.org/wiki/Probability_density_function).
/// So, it needs to fullfill:
///  - The function must be stricly non-negative
///  - The function must be real valued
///  - The function must have a total area of 1 under the curve.
///
/// Every distribution in this crate has a closed form (or a special function)
/// for its cdf, so [Distribution::cdf] is a requiered method and the provided
/// [Distribution::quantile] inverts it numerically.
pub trait Distribution {
    // Requiered methods:

    /// Evaluates the [PDF](https://en.wikipedia.org/wiki/Probability_density_function)
    /// (Probability Density function) of the distribution at point `x`.
    ///
    /// The PDF is assumed to be a valid probability distribution. It must fullfill:
    ///  - `0.0 <= pdf(x)`
    ///  - It is normalized. (It has an area under the curve of `1.0`)
    ///  - As `x` approaches `+-inf` (if inside the domain), `pdf(x)` should
    ///     tend to `0.0`.
    fn pdf(&self, x: f64) -> f64;

    /// Returns a reference to the pdf [ContinuousDomain], wich indicates at wich points
    /// the pdf can be evaluated. The returned domain should be constant and not change.
    fn get_domain(&self) -> &ContinuousDomain;

    /// Evaluates the [CDF](https://en.wikipedia.org/wiki/Cumulative_distribution_function)
    /// (Cumulative distribution function) of the distribution at point `x`.
    ///
    /// If the function is evaluated outside the domain of the pdf, it will
    /// return either `0.0` or `1.0`. **Panicks** if `x` is a NaN.
    fn cdf(&self, x: f64) -> f64;

    // Provided methods:
    // Manual implementation for a specific distribution is recommended.

    /// cdf_multiple allows to evaluate the [Distribution::cdf] at multiple points.
    /// It may provide a computational advantage.
    fn cdf_multiple(&self, points: &[f64]) -> Vec<f64> {
        for point in points {
            if point.is_nan() {
                panic!("Found NaN in `cdf_multiple`. \n");
            }
        }

        return points.iter().map(|&x| self.cdf(x)).collect::<Vec<f64>>();
    }

    /// Evaluates the [quantile function](https://en.wikipedia.org/wiki/Quantile_function).
    ///  - if `x` is outside the range (0.0, 1.0), the bounds of the domain will be returned.
    ///  - **Panicks** is `x` is a NaN.
    ///
    /// The quantile function is the inverse function of [Distribution::cdf].
    ///
    /// Also, if you are considering calling this function multiple times, use
    /// [Distribution::quantile_multiple] for better performance.
    fn quantile(&self, x: f64) -> f64 {
        if x.is_nan() {
            // x is not valid
            panic!("Tried to evaluate the quantile function with a NaN value. \n");
        }

        let value: [f64; 1] = [x];
        let quantile_vec: Vec<f64> = self.quantile_multiple(&value);
        return quantile_vec[0];
    }

    /// quantile_multiple allows to evaluate the [Distribution::quantile] at multiple points.
    /// It may provide a computational advantage.
    ///
    /// **Panicks** if any of the points is a NaN.
    fn quantile_multiple(&self, points: &[f64]) -> Vec<f64> {
        /*
            Plan:

            For each point q:
             1. Handle the trivial cases (q outside (0, 1) maps to the domain bounds).
             2. Bracket the answer: start from a finite domain bound (or from 0.0
                when the domain is the whole real line) and double an offset of
                [QUANTILE_BRACKET_STEP] until the cdf at the far end passes q.
                Doubling makes the absolute scale of the distribution irrelevant.
             3. Bisect the bracket down to [QUANTILE_BISECTION_TOLERANCE].
             4. If [configuration::QUANTILE_USE_NEWTONS_ITER] is set, polish the
                result with a Newton's method iteration (guarded so it cannot
                leave the domain nor divide by ~0).
        */

        for point in points {
            if point.is_nan() {
                panic!("Found NaN in `quantile_multiple`. \n");
            }
        }

        let bounds: (f64, f64) = self.get_domain().get_bounds();

        let mut ret: Vec<f64> = Vec::with_capacity(points.len());
        for &q in points {
            if q <= 0.0 {
                ret.push(bounds.0);
                continue;
            }
            if 1.0 <= q {
                ret.push(bounds.1);
                continue;
            }

            let (mut lo, mut hi): (f64, f64) = self.bracket_quantile(q, bounds);

            let mut iterations: u32 = 0;
            while QUANTILE_BISECTION_TOLERANCE < hi - lo && iterations < QUANTILE_MAX_BISECTIONS {
                let mid: f64 = lo + 0.5 * (hi - lo);
                if self.cdf(mid) < q {
                    lo = mid;
                } else {
                    hi = mid;
                }
                iterations += 1;
            }

            let mut result: f64 = lo + 0.5 * (hi - lo);

            if configuration::QUANTILE_USE_NEWTONS_ITER {
                let derivative: f64 = self.pdf(result);
                if f64::EPSILON < derivative {
                    let polished: f64 = result + (q - self.cdf(result)) / derivative;
                    if self.get_domain().contains(polished) && polished.is_finite() {
                        result = polished;
                    }
                }
            }

            ret.push(result);
        }

        return ret;
    }

    /// Finds an interval `[lo, hi]` inside the domain with
    /// `cdf(lo) <= q <= cdf(hi)`. Helper of [Distribution::quantile_multiple].
    fn bracket_quantile(&self, q: f64, bounds: (f64, f64)) -> (f64, f64) {
        let (lower_bound, upper_bound): (f64, f64) = bounds;

        if lower_bound.is_finite() && upper_bound.is_finite() {
            return (lower_bound, upper_bound);
        }

        // anchor: a finite point to expand away from
        let anchor: f64 = if lower_bound.is_finite() {
            lower_bound
        } else if upper_bound.is_finite() {
            upper_bound
        } else {
            0.0
        };

        let mut step: f64 = QUANTILE_BRACKET_STEP;

        if lower_bound.is_finite() {
            // expand to the right
            let mut hi: f64 = anchor + step;
            let mut doublings: u32 = 0;
            while self.cdf(hi) < q && doublings < QUANTILE_BRACKET_MAX_DOUBLINGS {
                step = step * 2.0;
                hi = anchor + step;
                doublings += 1;
            }
            return (anchor, hi);
        }

        if upper_bound.is_finite() {
            // expand to the left
            let mut lo: f64 = anchor - step;
            let mut doublings: u32 = 0;
            while q < self.cdf(lo) && doublings < QUANTILE_BRACKET_MAX_DOUBLINGS {
                step = step * 2.0;
                lo = anchor - step;
                doublings += 1;
            }
            return (lo, anchor);
        }

        // whole real line, expand from the anchor towards the needed side
        if self.cdf(anchor) < q {
            let mut hi: f64 = anchor + step;
            let mut doublings: u32 = 0;
            while self.cdf(hi) < q && doublings < QUANTILE_BRACKET_MAX_DOUBLINGS {
                step = step * 2.0;
                hi = anchor + step;
                doublings += 1;
            }
            return (anchor, hi);
        }

        let mut lo: f64 = anchor - step;
        let mut doublings: u32 = 0;
        while q < self.cdf(lo) && doublings < QUANTILE_BRACKET_MAX_DOUBLINGS {
            step = step * 2.0;
            lo = anchor - step;
            doublings += 1;
        }
        return (lo, anchor);
    }
}
