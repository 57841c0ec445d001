//! # Normal distribution
//!
//! The [Normal distribution](https://en.wikipedia.org/wiki/Normal_distribution)
//! ia a very important continuous probability distribution.
//!
//! Here it plays three roles: the fitted overlay of the Shapiro-Wilk panels,
//! the large sample approximation of the Wilcoxon rank sum statistic, and the
//! reference curve of the varying sigma gallery figure.
//!
//! We implement the [Normal] distribution and the [StdNormal], wich is the same as [Normal]
//! but for fixed `mean = 0.0` and `std_dev = 1.0`.
//!

use crate::{
    distribution_trait::Distribution, domain::ContinuousDomain, errors::DistError, euclid,
};

// coefitients for the (aprox) computation of the cdf of the std normal
const B_ZERO_COEFITIENT: f64 = 2.92678600515804815402;
const B_ONE_COEFITIENTS: [f64; 5] = [
    8.97280659046817350354,
    10.27157061171363078863,
    12.72323261907760928036,
    16.88639562007936907786,
    24.12333774572479110372,
];

const B_TWO_COEFITIENTS: [f64; 5] = [
    5.81582518933527390512,
    5.70347935898051436684,
    5.51862483025707963145,
    5.26184239579604207321,
    4.92081346632882032881,
];

const C_ONE_COEFITIENTS: [f64; 5] = [
    11.61511226260603247078,
    18.25323235347346524796,
    18.38871225773938486923,
    18.61193318971775795045,
    24.14804072812762821134,
];

const C_TWO_COEFITIENTS: [f64; 5] = [
    3.83362947800146179416,
    7.30756258553673541139,
    8.42742300458043240405,
    5.66479518878470764762,
    4.91396098895240075156,
];

#[derive(Debug, Clone, PartialEq)]
pub struct StdNormal {
    domain: ContinuousDomain,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Normal {
    std_normal: StdNormal,
    /// The mean of the distribution
    mean: f64,
    /// The standard deviation of the distribution
    standard_deviation: f64,
}

impl StdNormal {
    /// Create a Standard normal distribution. Has a mean of `0.0` and a standard
    /// deviation of `1.0`.
    #[must_use]
    pub const fn new() -> StdNormal {
        return StdNormal {
            domain: ContinuousDomain::Reals,
        };
    }
}

impl Default for StdNormal {
    fn default() -> Self {
        return StdNormal::new();
    }
}

impl Distribution for StdNormal {
    #[must_use]
    fn pdf(&self, x: f64) -> f64 {
        return euclid::INV_SQRT_2_PI * (-x * x * 0.5).exp();
    }

    #[must_use]
    fn get_domain(&self) -> &ContinuousDomain {
        return &self.domain;
    }

    #[must_use]
    fn cdf(&self, x: f64) -> f64 {
        /*
        We will use the aproximation by:
        Dia, Yaya D. (2023). "Approximate Incomplete Integrals, Application to Complementary Error Function". SSRN. doi:10.2139/ssrn.4487559. S2CID 259689086.

        The precision of this method is extremly high: an error of less than
        `~1.1 * 10^-16 ~= 2^-53`. Considering that
        `f64::EPSILON = 2.220446049250313e-16 ~= 2.22 * 10^-16`, this solution
        may as well be considered exact if we are working with `f64`.

        ***

        To evaluate the polynomials we will do Horner's rule for efficiency:
        https://en.wikipedia.org/wiki/Polynomial_evaluation#Horner's_rule

        ```
        x^2 + a_1 * x + a_2 =
         = (x + a_1) * x + a_2
        ```

        ***
        For better efficiency we will use `f64::mul_add`.
        `x.mul_add(a, b) = x * a + b`

        */

        if x.is_nan() {
            // x is not valid
            std::panic!("Tried to evaluate the cdf function of StdNormal with a NaN value. \n");
        }

        let (point, flipped): (f64, bool) = if x < 0.0 { (-x, true) } else { (x, false) };

        let term_1_num: f64 = (point + C_TWO_COEFITIENTS[0]).mul_add(point, C_ONE_COEFITIENTS[0]);
        let term_1_den: f64 = (point + B_TWO_COEFITIENTS[0]).mul_add(point, B_ONE_COEFITIENTS[0]);

        let term_2_num: f64 = (point + C_TWO_COEFITIENTS[1]).mul_add(point, C_ONE_COEFITIENTS[1]);
        let term_2_den: f64 = (point + B_TWO_COEFITIENTS[1]).mul_add(point, B_ONE_COEFITIENTS[1]);

        let term_3_num: f64 = (point + C_TWO_COEFITIENTS[2]).mul_add(point, C_ONE_COEFITIENTS[2]);
        let term_3_den: f64 = (point + B_TWO_COEFITIENTS[2]).mul_add(point, B_ONE_COEFITIENTS[2]);

        let term_4_num: f64 = (point + C_TWO_COEFITIENTS[3]).mul_add(point, C_ONE_COEFITIENTS[3]);
        let term_4_den: f64 = (point + B_TWO_COEFITIENTS[3]).mul_add(point, B_ONE_COEFITIENTS[3]);

        let term_5_num: f64 = (point + C_TWO_COEFITIENTS[4]).mul_add(point, C_ONE_COEFITIENTS[4]);
        let term_5_den: f64 = (point + B_TWO_COEFITIENTS[4]).mul_add(point, B_ONE_COEFITIENTS[4]);

        let numerator: f64 = term_1_num * term_2_num * term_3_num * term_4_num * term_5_num;
        let denomiantor: f64 = term_1_den * term_2_den * term_3_den * term_4_den * term_5_den;

        let m: f64 = numerator / (denomiantor * (point + B_ZERO_COEFITIENT));
        // `aproximation` = `1 - cdf(x)`
        let aproximation: f64 = m * self.pdf(point);

        return if flipped {
            aproximation
        } else {
            1.0 - aproximation
        };
    }
}

impl Normal {
    /// Creates a new [Normal] distribution with parameters `mean` and
    /// `standard_deviation`.
    ///
    /// It will return error under the following conditions:
    ///  - `mean` is `+-inf` or a NaN
    ///  - `standard_deviation` is `+-inf` or a NaN
    ///  - `standard_deviation <= 0.0`
    pub fn new(mean: f64, standard_deviation: f64) -> Result<Normal, DistError> {
        if !mean.is_finite() {
            if mean.is_nan() {
                return Err(DistError::NanErr);
            }
            return Err(DistError::InvalidNumber);
        }

        if !standard_deviation.is_finite() {
            if standard_deviation.is_nan() {
                return Err(DistError::NanErr);
            }
            return Err(DistError::InvalidNumber);
        }

        if standard_deviation <= 0.0 {
            return Err(DistError::InvalidNumber);
        }

        return Ok(Normal {
            std_normal: StdNormal::new(),
            mean,
            standard_deviation,
        });
    }

    /// Creates a new [Normal] distribution without checking for correctness
    /// with parameters `mean` and `standard_deviation`.
    ///
    /// ## Safety
    ///
    /// If the following conditions are not fullfiled, the returned distribution
    /// will be invalid.
    ///
    ///  - `mean` is finite (no `+-inf` or a NaN)
    ///  - `standard_deviation` is finite (no `+-inf` or a NaN)
    ///  - `0.0 < standard_deviation`
    #[must_use]
    pub const unsafe fn new_unchecked(mean: f64, standard_deviation: f64) -> Normal {
        return Normal {
            std_normal: StdNormal::new(),
            mean,
            standard_deviation,
        };
    }

    #[must_use]
    pub const fn get_mean(&self) -> f64 {
        return self.mean;
    }

    #[must_use]
    pub const fn get_standard_deviation(&self) -> f64 {
        return self.standard_deviation;
    }

    /// Maps `x` to the standard normal scale.
    #[must_use]
    fn standardize(&self, x: f64) -> f64 {
        return (x - self.mean) / self.standard_deviation;
    }
}

impl Distribution for Normal {
    #[must_use]
    fn pdf(&self, x: f64) -> f64 {
        return self.std_normal.pdf(self.standardize(x)) / self.standard_deviation;
    }

    #[must_use]
    fn get_domain(&self) -> &ContinuousDomain {
        return self.std_normal.get_domain();
    }

    #[must_use]
    fn cdf(&self, x: f64) -> f64 {
        if x.is_nan() {
            // x is not valid
            std::panic!("Tried to evaluate the cdf function of Normal with a NaN value. \n");
        }
        return self.std_normal.cdf(self.standardize(x));
    }

    #[must_use]
    fn quantile_multiple(&self, points: &[f64]) -> Vec<f64> {
        // solve on the standard scale, then undo the standarization
        let std_quantiles: Vec<f64> = self.std_normal.quantile_multiple(points);

        return std_quantiles
            .iter()
            .map(|&z| self.standard_deviation.mul_add(z, self.mean))
            .collect::<Vec<f64>>();
    }
}
