//! # Chi-Squared distribution
//!
//! The [Chi Squared distribution](https://en.wikipedia.org/wiki/Chi-squared_distribution)
//! is a continuous distribution. It has 1 parameter: the degrees fo freedom (`k`). It
//! represents the distribution of the sum of k iid standard normal random variables.
//!
//! Used here for the variance confidence intervals and the varying `k`
//! gallery figure.
//!

use std::f64;

use crate::{
    distribution_trait::Distribution, domain::ContinuousDomain, errors::DistError, euclid,
};

pub const CHI_SQUARED_DOMAIN: ContinuousDomain = ContinuousDomain::From(0.0);

#[derive(Debug, Clone, PartialEq)]
pub struct ChiSquared {
    degrees_of_freedom: f64,
    normalitzation_constant: f64,
}

impl ChiSquared {
    /// Creates a new [ChiSquared] distribution with parameter
    /// `k` = `degrees_of_freedom`.
    ///
    /// It will return error under the following conditions:
    ///  - `degrees_of_freedom` is `+-inf` or a NaN
    ///  - `degrees_of_freedom <= 0.0`
    ///  - The value for `degrees_of_freedom` is too large to model properly
    ///      - This means that a [f64] value is not precise enough.
    ///      - Use [ChiSquared::new_unchecked] if you don't need to evaluate
    ///         the pdf direcly or indirecly.
    pub fn new(degrees_of_freedom: f64) -> Result<ChiSquared, DistError> {
        if !degrees_of_freedom.is_finite() {
            if degrees_of_freedom.is_nan() {
                return Err(DistError::NanErr);
            }
            return Err(DistError::InvalidNumber);
        }

        if degrees_of_freedom <= 0.0 {
            return Err(DistError::InvalidNumber);
        }

        let c: f64 = ChiSquared::compute_normalitzation_constant(degrees_of_freedom);

        if !c.is_finite() || c <= 0.0 {
            // we do not have enough precision to do the computations
            return Err(DistError::NumericalError);
        }

        return Ok(ChiSquared {
            degrees_of_freedom,
            normalitzation_constant: c,
        });
    }

    /// Creates a new [ChiSquared] distribution with parameter
    /// `k` = `degrees_of_freedom` without checking for correctness.
    ///
    /// ## Safety
    ///
    /// If the following conditions are not fullfiled, the returned distribution
    /// will be invalid.
    ///
    ///  - `degrees_of_freedom` is finite (no `+-inf` or a NaN)
    ///  - `0.0 < degrees_of_freedom`
    #[must_use]
    pub unsafe fn new_unchecked(degrees_of_freedom: f64) -> ChiSquared {
        let c: f64 = ChiSquared::compute_normalitzation_constant(degrees_of_freedom);

        return ChiSquared {
            degrees_of_freedom,
            normalitzation_constant: c,
        };
    }

    #[must_use]
    fn compute_normalitzation_constant(k: f64) -> f64 {
        assert!(0.0 < k);

        // c = 1/(2^(k/2) * gamma(k/2))
        // ln(c) = -(k/2)*ln(2) - ln_gamma(k/2)
        let d: f64 = k * 0.5;
        let ln_c: f64 = -d * f64::consts::LN_2 - euclid::ln_gamma(d);

        return ln_c.exp();
    }

    /// Get the parameter degrees of freedom
    #[must_use]
    pub const fn get_degrees_of_freedom(&self) -> f64 {
        return self.degrees_of_freedom;
    }

    #[must_use]
    pub const fn get_normalitzation_constant(&self) -> f64 {
        return self.normalitzation_constant;
    }
}

impl Distribution for ChiSquared {
    #[must_use]
    fn pdf(&self, x: f64) -> f64 {
        // let norm(k) = 1.0 / (2^(k/2)*gamma(k/2))
        // pdf(x | k) = norm(k) * x^(k/2 - 1) * exp(-x/2)
        return x.powf(self.degrees_of_freedom * 0.5 - 1.0)
            * (-0.5 * x).exp()
            * self.normalitzation_constant;
    }

    #[must_use]
    fn get_domain(&self) -> &ContinuousDomain {
        return &CHI_SQUARED_DOMAIN;
    }

    #[must_use]
    fn cdf(&self, x: f64) -> f64 {
        // cdf(x | k) = P(k/2, x/2), the regularized lower incomplete gamma
        if x.is_nan() {
            // x is not valid
            std::panic!("Tried to evaluate the cdf function of ChiSquared with a NaN value. \n");
        }

        if x <= 0.0 {
            return 0.0;
        }

        return euclid::regularized_lower_incomplete_gamma(self.degrees_of_freedom * 0.5, x * 0.5);
    }
}
