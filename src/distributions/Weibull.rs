//! # Weibull distribution
//!
//! The [Weibull distribution](https://en.wikipedia.org/wiki/Weibull_distribution)
//! is a continuous probability distribution.
//!
//! It has 2 parameters: the shape `k` and the scale `lambda`. It is the
//! standard model for lifetime data, wich is why the parameter estimation
//! reports (maximum likelihood and least squares, possibly with censored
//! observations) fit this family.
//!
//! Unlike the other families here, the cdf and the quantile function have
//! closed forms, so no special function is needed.
//!

use crate::{distribution_trait::Distribution, domain::ContinuousDomain, errors::DistError};

pub const WEIBULL_DOMAIN: ContinuousDomain = ContinuousDomain::From(0.0);

#[derive(Debug, Clone, PartialEq)]
pub struct Weibull {
    shape: f64,
    scale: f64,
}

impl Weibull {
    /// Creates a new [Weibull] distribution with parameters
    /// `k` = `shape` and `lambda` = `scale`.
    ///
    /// It will return error under the following conditions:
    ///  - `shape` is `+-inf` or a NaN
    ///  - `scale` is `+-inf` or a NaN
    ///  - `shape <= 0.0`
    ///  - `scale <= 0.0`
    pub fn new(shape: f64, scale: f64) -> Result<Weibull, DistError> {
        if !shape.is_finite() {
            if shape.is_nan() {
                return Err(DistError::NanErr);
            }
            return Err(DistError::InvalidNumber);
        }

        if !scale.is_finite() {
            if scale.is_nan() {
                return Err(DistError::NanErr);
            }
            return Err(DistError::InvalidNumber);
        }

        if shape <= 0.0 {
            return Err(DistError::InvalidNumber);
        }

        if scale <= 0.0 {
            return Err(DistError::InvalidNumber);
        }

        return Ok(Weibull { shape, scale });
    }

    /// Creates a new [Weibull] distribution without checking for correctness
    /// with parameters `k` = `shape` and `lambda` = `scale`.
    ///
    /// ## Safety
    ///
    /// If the following conditions are not fullfiled, the returned distribution
    /// will be invalid.
    ///
    ///  - `shape` is finite (no `+-inf` or a NaN)
    ///  - `scale` is finite (no `+-inf` or a NaN)
    ///  - `0.0 < shape`
    ///  - `0.0 < scale`
    #[must_use]
    pub const unsafe fn new_unchecked(shape: f64, scale: f64) -> Weibull {
        return Weibull { shape, scale };
    }

    #[must_use]
    pub const fn get_shape(&self) -> f64 {
        return self.shape;
    }

    #[must_use]
    pub const fn get_scale(&self) -> f64 {
        return self.scale;
    }
}

impl Distribution for Weibull {
    #[must_use]
    fn pdf(&self, x: f64) -> f64 {
        // pdf(x | k, lambda) = (k/lambda) * (x/lambda)^(k - 1) * exp(-(x/lambda)^k)
        if x < 0.0 {
            return 0.0;
        }

        let scaled: f64 = x / self.scale;
        let term_1: f64 = (self.shape / self.scale) * scaled.powf(self.shape - 1.0);
        let term_2: f64 = (-scaled.powf(self.shape)).exp();

        return term_1 * term_2;
    }

    #[must_use]
    fn get_domain(&self) -> &ContinuousDomain {
        return &WEIBULL_DOMAIN;
    }

    #[must_use]
    fn cdf(&self, x: f64) -> f64 {
        // cdf(x | k, lambda) = 1 - exp(-(x/lambda)^k)
        if x.is_nan() {
            // x is not valid
            std::panic!("Tried to evaluate the cdf function of Weibull with a NaN value. \n");
        }

        if x <= 0.0 {
            return 0.0;
        }

        return 1.0 - (-(x / self.scale).powf(self.shape)).exp();
    }

    #[must_use]
    fn quantile_multiple(&self, points: &[f64]) -> Vec<f64> {
        // closed form inversion: quantile(q) = lambda * (-ln(1 - q))^(1/k)
        for point in points {
            if point.is_nan() {
                std::panic!("Found NaN in `Weibull::quantile_multiple`. \n");
            }
        }

        let bounds: (f64, f64) = self.get_domain().get_bounds();
        let inv_shape: f64 = 1.0 / self.shape;

        return points
            .iter()
            .map(|&q| {
                if q <= 0.0 {
                    return bounds.0;
                }
                if 1.0 <= q {
                    return bounds.1;
                }
                return self.scale * (-(1.0 - q).ln()).powf(inv_shape);
            })
            .collect::<Vec<f64>>();
    }
}
