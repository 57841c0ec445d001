//! # Student T
//!
//! The [Student T distribution](https://en.wikipedia.org/wiki/Student%27s_t-distribution#Probability_density_function)
//! is a continuous probability distribution.
//!
//! ### Parameters
//!
//! It has a single parameter, the degrees of freedom (usually denoted by the greek
//! letter `nu`).
//!  - The degrees of freedom is a stricly positive number (usually an integer).
//!  - If `nu` diverges to infinity, the distribution becomes a [standard normal distribution](crate::distributions::Normal).
//!
//! It is the distribution of the two sample t statistic. The gallery figure
//! with varying `nu` shows the convergence towards the standard normal.
//!

use std::f64::consts::PI;

use crate::{
    distribution_trait::Distribution, domain::ContinuousDomain, errors::DistError, euclid,
};

pub const STUDENT_T_DOMAIN: ContinuousDomain = ContinuousDomain::Reals;

#[derive(Debug, Clone, PartialEq)]
pub struct StudentT {
    degrees_of_freedom: f64,
    normalitzation_constant: f64,
}

impl StudentT {
    /// Create a [StudentT] distribution.
    ///
    /// `degrees_of_freedom` determines how *normal* does the distribution look.
    ///
    /// It will return error under the following conditions:
    ///  - `degrees_of_freedom` is `+-inf` or a NaN
    ///  - `degrees_of_freedom <= 0.0`
    ///  - The value for `degrees_of_freedom` is too large to model properly
    ///      - This means that a [f64] value is not precise enough.
    ///      - Use [StudentT::new_unchecked] if you don't need to evaluate
    ///         the pdf direcly or indirecly.
    pub fn new(degrees_of_freedom: f64) -> Result<StudentT, DistError> {
        if !degrees_of_freedom.is_finite() {
            if degrees_of_freedom.is_nan() {
                return Err(DistError::NanErr);
            }
            return Err(DistError::InvalidNumber);
        }

        if degrees_of_freedom <= 0.0 {
            return Err(DistError::InvalidNumber);
        }

        let norm: f64 = StudentT::compute_normalitzation_constant(degrees_of_freedom);

        if !norm.is_finite() || norm <= 0.0 {
            // we do not have enough precision to do the computations
            return Err(DistError::NumericalError);
        }

        return Ok(StudentT {
            degrees_of_freedom,
            normalitzation_constant: norm,
        });
    }

    /// Creates a new [StudentT] distribution without checking for correctness
    /// with parameter `nu` = `degrees_of_freedom`.
    ///
    /// ## Safety
    ///
    /// If the following conditions are not fullfiled, the returned distribution
    /// will be invalid.
    ///
    ///  - `degrees_of_freedom` is finite (no `+-inf` or a NaN)
    ///  - `0.0 < degrees_of_freedom`
    #[must_use]
    pub unsafe fn new_unchecked(degrees_of_freedom: f64) -> StudentT {
        let norm: f64 = StudentT::compute_normalitzation_constant(degrees_of_freedom);

        return StudentT {
            degrees_of_freedom,
            normalitzation_constant: norm,
        };
    }

    #[must_use]
    fn compute_normalitzation_constant(nu: f64) -> f64 {
        assert!(0.0 < nu);

        // norm(nu) = gamma((nu + 1)/2) / (sqrt(nu * pi) * gamma(nu/2))
        let ln_gammas: f64 = euclid::ln_gamma((nu + 1.0) * 0.5) - euclid::ln_gamma(nu * 0.5);

        return ln_gammas.exp() / (nu * PI).sqrt();
    }

    #[must_use]
    pub const fn get_degrees_of_freedom(&self) -> f64 {
        return self.degrees_of_freedom;
    }

    #[must_use]
    pub const fn get_normalitzation_constant(&self) -> f64 {
        return self.normalitzation_constant;
    }
}

impl Distribution for StudentT {
    #[must_use]
    fn pdf(&self, x: f64) -> f64 {
        // pdf(x | nu) = norm(nu) * (1 + x^2/nu)^-((nu + 1)/2)
        let base: f64 = 1.0 + x * x / self.degrees_of_freedom;
        return self.normalitzation_constant * base.powf(-(self.degrees_of_freedom + 1.0) * 0.5);
    }

    #[must_use]
    fn get_domain(&self) -> &ContinuousDomain {
        return &STUDENT_T_DOMAIN;
    }

    #[must_use]
    fn cdf(&self, x: f64) -> f64 {
        /*
            With `I` the regularized incomplete beta function:

            cdf(x | nu) = 1 - 0.5 * I_{nu/(nu + x^2)}(nu/2, 1/2)    if 0 <= x
            cdf(x | nu) =     0.5 * I_{nu/(nu + x^2)}(nu/2, 1/2)    if x < 0

            At x = 0 the argument is 1 and I evaluates to 1, giving 0.5.
        */

        if x.is_nan() {
            // x is not valid
            std::panic!("Tried to evaluate the cdf function of StudentT with a NaN value. \n");
        }

        let nu: f64 = self.degrees_of_freedom;
        let beta_argument: f64 = nu / (nu + x * x);
        let half_tail: f64 =
            0.5 * euclid::regularized_incomplete_beta(nu * 0.5, 0.5, beta_argument);

        if x < 0.0 {
            return half_tail;
        }
        return 1.0 - half_tail;
    }
}
