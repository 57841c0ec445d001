//! # The F distribution
//!
//! The [F distribution](https://en.wikipedia.org/wiki/F-distribution) is a
//! continuous probability distribution.
//!
//! It has 2 parameters: degrees_of_freedom_1 and degrees_of_freedom_2 (d1 and d2 reps.).
//!
//! If we have 2 IID random variables c_1 and c_2 wich have a [Chi Squared](crate::distributions::ChiSquared)
//! distribution with d1 and d2 degrees of freedom respectively, then:
//!
//! > (c_1 / d_1) / (c_2 / d2)
//!
//! Will have an F distribution. This statisitc plays a key role in the ANOVA test.
//!

use crate::{
    distribution_trait::Distribution, domain::ContinuousDomain, errors::DistError, euclid,
};

pub const F_DOMAIN: ContinuousDomain = ContinuousDomain::From(0.0);

#[derive(Debug, Clone, PartialEq)]
pub struct F {
    d1: f64,
    d2: f64,
    normalitzation_constant: f64,
}

impl F {
    /// Creates a new [F] distribution with parameters `d1` and `d2`.
    /// Where `d1` is the degrees of freedom of the numerator and `d2` are
    /// the degrees of freedom of the denominator.
    ///
    ///
    /// It will return error under the following conditions:
    ///  - `d1` is `+-inf` or a NaN
    ///  - `d2` is `+-inf` or a NaN
    ///  - `d1 <= 0.0`
    ///  - `d2 <= 0.0`
    ///  - The values for `d1` and `d2` are too large to model properly
    ///      - This means that a [f64] value is not precise enough.
    ///      - Use [F::new_unchecked] if you don't need to evaluate
    ///         the pdf direcly or indirecly.
    ///
    pub fn new(d1: f64, d2: f64) -> Result<F, DistError> {
        if !d1.is_finite() {
            if d1.is_nan() {
                return Err(DistError::NanErr);
            }
            return Err(DistError::InvalidNumber);
        }

        if !d2.is_finite() {
            if d2.is_nan() {
                return Err(DistError::NanErr);
            }
            return Err(DistError::InvalidNumber);
        }

        if d1 <= 0.0 {
            return Err(DistError::InvalidNumber);
        }

        if d2 <= 0.0 {
            return Err(DistError::InvalidNumber);
        }

        let norm: f64 = F::compute_normalitzation_constant(d1, d2);

        if !norm.is_finite() || norm <= 0.0 {
            // we do not have enough precision to do the computations
            return Err(DistError::NumericalError);
        }

        return Ok(F {
            d1,
            d2,
            normalitzation_constant: norm,
        });
    }

    /// Creates a new [F] distribution without checking for correctness
    /// with parameters `d1` and `d2`. Where `d1` is the degrees of
    /// freedom of the numerator and `d2` are the degrees of freedom
    /// of the denominator.
    ///
    /// ## Safety
    ///
    /// If the following conditions are not fullfiled, the returned distribution
    /// will be invalid.
    ///
    ///  - `d1` is finite (no `+-inf` or a NaN)
    ///  - `d2` is finite (no `+-inf` or a NaN)
    ///  - `0.0 < d1`
    ///  - `0.0 < d2`
    ///
    #[must_use]
    pub unsafe fn new_unchecked(d1: f64, d2: f64) -> F {
        let norm: f64 = F::compute_normalitzation_constant(d1, d2);

        return F {
            d1,
            d2,
            normalitzation_constant: norm,
        };
    }

    #[must_use]
    fn compute_normalitzation_constant(d1: f64, d2: f64) -> f64 {
        assert!(0.0 < d1);
        assert!(0.0 < d2);

        let num: f64 = (d1 / d2).powf(d1 * 0.5);

        let beta: f64 = euclid::beta_fn(d1 * 0.5, d2 * 0.5);

        return num / beta;
    }

    #[must_use]
    pub const fn get_d1(&self) -> f64 {
        return self.d1;
    }

    #[must_use]
    pub const fn get_d2(&self) -> f64 {
        return self.d2;
    }

    #[must_use]
    pub const fn get_normalitzation_constant(&self) -> f64 {
        return self.normalitzation_constant;
    }
}

impl Distribution for F {
    #[must_use]
    fn pdf(&self, x: f64) -> f64 {
        // norm(d1, d2) = (d1/d2)^(d1/2) / B(d1/2, d2/2)
        // norm(d1, d2) = (d1/d2)^(d1/2) * gamma(d1/2 + d2/2) / (gamma(d1/2) * gamma(d2/2))
        // pdf(x | d1, d2) = norm(d1, d2) * x^(d1/2 - 1) * (1 + d1/d2 * x)^-(d1+d2)/2
        let term_1: f64 = x.powf(self.d1 * 0.5 - 1.0);
        let term_2: f64 = (1.0 + self.d1 / self.d2 * x).powf(-(self.d1 + self.d2) * 0.5);
        return term_1 * term_2 * self.normalitzation_constant;
    }

    #[must_use]
    fn get_domain(&self) -> &ContinuousDomain {
        return &F_DOMAIN;
    }

    #[must_use]
    fn cdf(&self, x: f64) -> f64 {
        // cdf(x | d1, d2) = I_{d1*x/(d1*x + d2)}(d1/2, d2/2),
        // the regularized incomplete beta function
        if x.is_nan() {
            // x is not valid
            std::panic!("Tried to evaluate the cdf function of F with a NaN value. \n");
        }

        if x <= 0.0 {
            return 0.0;
        }

        let scaled: f64 = self.d1 * x;
        let beta_argument: f64 = scaled / (scaled + self.d2);

        return euclid::regularized_incomplete_beta(self.d1 * 0.5, self.d2 * 0.5, beta_argument);
    }
}
