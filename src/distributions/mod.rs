// Continuous
pub mod ChiSquared;
pub mod F;
pub mod Normal;
pub mod StudentT;
pub mod Weibull;

use crate::configuration::curve::{
    MARKER_MARGIN, POSITIVE_SUPPORT_LEFT_EDGE, RIGHT_EDGE_FLOOR, SYMMETRIC_SIGMAS,
};
use crate::distribution_trait::Distribution;
use crate::errors::DistError;

/// A distribution family plus its parameters, as named by a report.
///
/// This is the bridge between the parsed reports (wich talk about families
/// and parameter values) and the concrete [Distribution] implementations.
#[derive(Debug, Clone, PartialEq)]
pub enum DistributionSpec {
    F { df1: f64, df2: f64 },
    StudentT { df: f64 },
    ChiSquared { df: f64 },
    Normal { mean: f64, std_dev: f64 },
    Weibull { shape: f64, scale: f64 },
}

impl DistributionSpec {
    /// Builds the concrete distribution, validating the parameters.
    pub fn instantiate(&self) -> Result<Box<dyn Distribution>, DistError> {
        return Ok(match *self {
            DistributionSpec::F { df1, df2 } => Box::new(F::F::new(df1, df2)?),
            DistributionSpec::StudentT { df } => Box::new(StudentT::StudentT::new(df)?),
            DistributionSpec::ChiSquared { df } => Box::new(ChiSquared::ChiSquared::new(df)?),
            DistributionSpec::Normal { mean, std_dev } => {
                Box::new(Normal::Normal::new(mean, std_dev)?)
            }
            DistributionSpec::Weibull { shape, scale } => {
                Box::new(Weibull::Weibull::new(shape, scale)?)
            }
        });
    }

    /// Evaluates the pdf of the family at `x`.
    pub fn density(&self, x: f64) -> Result<f64, DistError> {
        return Ok(self.instantiate()?.pdf(x));
    }

    /// Evaluates the quantile function of the family at `p`.
    pub fn quantile(&self, p: f64) -> Result<f64, DistError> {
        return Ok(self.instantiate()?.quantile(p));
    }

    /// The x-interval a plotted curve of this family should cover so that
    /// both markers (the test statistic, or the data maximum for fitted
    /// curves, and the critical boundary) stay well inside the picture.
    ///
    /// Families supported on the positive half line start at a small
    /// positive edge instead of `0.0`, where some of the densities blow up.
    /// Symmetric families get a window centered on the mean.
    #[must_use]
    pub fn plot_range(&self, statistic: Option<f64>, critical: Option<f64>) -> (f64, f64) {
        let statistic: Option<f64> = statistic.filter(|s| s.is_finite());
        let critical: Option<f64> = critical.filter(|c| c.is_finite());

        match *self {
            DistributionSpec::F { .. } => {
                // right edge: twice the critical value and 1.5x the
                // statistic, never under the floor
                let mut right: f64 = RIGHT_EDGE_FLOOR;
                if let Some(c) = critical {
                    right = right.max(2.0 * c);
                }
                if let Some(s) = statistic {
                    right = right.max(MARKER_MARGIN * s);
                }
                return (POSITIVE_SUPPORT_LEFT_EDGE, right);
            }
            DistributionSpec::StudentT { .. } => {
                let mut half_width: f64 = SYMMETRIC_SIGMAS;
                for m in [statistic, critical].into_iter().flatten() {
                    half_width = half_width.max(MARKER_MARGIN * m.abs());
                }
                return (-half_width, half_width);
            }
            DistributionSpec::Normal { mean, std_dev } => {
                let mut half_width: f64 = SYMMETRIC_SIGMAS * std_dev;
                for m in [statistic, critical].into_iter().flatten() {
                    half_width = half_width.max(MARKER_MARGIN * (m - mean).abs());
                }
                return (mean - half_width, mean + half_width);
            }
            DistributionSpec::ChiSquared { df } => {
                // the bulk of the mass ends around df + 4*sqrt(2*df)
                let mut right: f64 = RIGHT_EDGE_FLOOR.max(df + 4.0 * (2.0 * df).sqrt());
                for m in [statistic, critical].into_iter().flatten() {
                    right = right.max(MARKER_MARGIN * m);
                }
                return (POSITIVE_SUPPORT_LEFT_EDGE, right);
            }
            DistributionSpec::Weibull { .. } => {
                let mut right: f64 = RIGHT_EDGE_FLOOR;
                for m in [statistic, critical].into_iter().flatten() {
                    right = right.max(MARKER_MARGIN * m);
                }
                return (POSITIVE_SUPPORT_LEFT_EDGE, right);
            }
        }
    }
}
