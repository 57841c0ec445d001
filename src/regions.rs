//! Critical regions of the test statistics.
//!
//! A region is resolved from the report's critical value when the report
//! carries one, falling back to the matching distribution quantile
//! otherwise. All boundaries are closed: a statistic exactly on the
//! boundary counts as inside the critical region.
//!
//! The classifier never overrules a report. The decision printed by the
//! engine stays the ground truth for annotations, and
//! [CriticalRegion::contradicts_reported] only detects the mismatch so
//! the orchestrator can log it.

use crate::{
    distribution_trait::Distribution,
    distributions::StudentT::StudentT,
    errors::DistError,
};

/// The shape of a critical region, without its boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    UpperTail,
    TwoSided,
    ScaleBounded,
}

/// Where a statistic landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Inside,
    InCriticalRegion,
}

/// A resolved critical region on the scale of the plotted statistic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CriticalRegion {
    /// Right tail only: F, χ² and Grubbs statistics.
    UpperTail { boundary: f64 },
    /// Both tails: t statistics and the Wilcoxon normal approximation.
    TwoSided { lower: f64, upper: f64 },
    /// Left bounded scale: small Shapiro-Wilk W values reject.
    ScaleBounded { boundary: f64 },
}

impl CriticalRegion {
    /// Upper tail region, `quantile(1 - significance)` when the report
    /// did not state the boundary.
    #[must_use]
    pub fn upper_tail(
        reported: Option<f64>,
        distribution: &dyn Distribution,
        significance: f64,
    ) -> CriticalRegion {
        let boundary: f64 = match reported {
            Some(value) => value,
            None => distribution.quantile(1.0 - significance),
        };
        return CriticalRegion::UpperTail { boundary };
    }

    /// Symmetric two sided region around zero,
    /// `quantile(1 - significance / 2)` when the report did not state
    /// the boundary.
    #[must_use]
    pub fn two_sided(
        reported: Option<f64>,
        distribution: &dyn Distribution,
        significance: f64,
    ) -> CriticalRegion {
        let upper: f64 = match reported {
            Some(value) => value.abs(),
            None => distribution.quantile(1.0 - significance * 0.5),
        };
        return CriticalRegion::TwoSided {
            lower: -upper,
            upper,
        };
    }

    /// Two sided region around `center`, at `z_boundary` spreads on
    /// each side. Used for the rank sum under its normal approximation,
    /// with `center = E[W]` and `spread = SD[W]`.
    #[must_use]
    pub fn two_sided_around(center: f64, spread: f64, z_boundary: f64) -> CriticalRegion {
        let offset: f64 = z_boundary.abs() * spread;
        return CriticalRegion::TwoSided {
            lower: center - offset,
            upper: center + offset,
        };
    }

    /// Left bounded region for statistics living on a bounded scale.
    ///
    /// There is no distribution to fall back to, so an absent reported
    /// boundary means no region at all and the figure stays
    /// annotation-only.
    #[must_use]
    pub fn scale_bounded(reported: Option<f64>) -> Option<CriticalRegion> {
        return reported.map(|boundary| CriticalRegion::ScaleBounded { boundary });
    }

    #[must_use]
    pub const fn kind(&self) -> RegionKind {
        return match self {
            CriticalRegion::UpperTail { .. } => RegionKind::UpperTail,
            CriticalRegion::TwoSided { .. } => RegionKind::TwoSided,
            CriticalRegion::ScaleBounded { .. } => RegionKind::ScaleBounded,
        };
    }

    /// The right boundary of the region. For a [CriticalRegion::ScaleBounded]
    /// region this is the left bound itself, the only one it has.
    #[must_use]
    pub const fn upper_boundary(&self) -> f64 {
        return match self {
            CriticalRegion::UpperTail { boundary } => *boundary,
            CriticalRegion::TwoSided { upper, .. } => *upper,
            CriticalRegion::ScaleBounded { boundary } => *boundary,
        };
    }

    /// The left boundary, present only for two sided regions.
    #[must_use]
    pub const fn lower_boundary(&self) -> Option<f64> {
        return match self {
            CriticalRegion::TwoSided { lower, .. } => Some(*lower),
            _ => None,
        };
    }

    /// Classifies a statistic against the region. Boundaries count as
    /// critical.
    #[must_use]
    pub fn classify(&self, statistic: f64) -> Verdict {
        let critical: bool = match self {
            CriticalRegion::UpperTail { boundary } => *boundary <= statistic,
            CriticalRegion::TwoSided { lower, upper } => {
                statistic <= *lower || *upper <= statistic
            }
            CriticalRegion::ScaleBounded { boundary } => statistic <= *boundary,
        };
        if critical {
            return Verdict::InCriticalRegion;
        }
        return Verdict::Inside;
    }

    /// `true` when the decision stated by the report disagrees with the
    /// computed verdict. The report remains the ground truth; callers
    /// only log the inconsistency.
    #[must_use]
    pub fn contradicts_reported(&self, statistic: f64, reported_reject: Option<bool>) -> bool {
        return match reported_reject {
            Some(reject) => {
                let computed: bool =
                    matches!(self.classify(statistic), Verdict::InCriticalRegion);
                computed != reject
            }
            None => false,
        };
    }
}

/// One sided Grubbs critical value for a sample of size `n`:
/// `((n-1)/√n) · √(t² / (n-2+t²))` where `t` is the `1 - α/(2n)`
/// quantile of the Student's t distribution with `n - 2` degrees of
/// freedom.
///
/// Needs `3 <= n`, otherwise the degrees of freedom are not positive
/// and the error of the underlying distribution is returned.
pub fn grubbs_boundary(n: usize, significance: f64) -> Result<f64, DistError> {
    let size: f64 = n as f64;
    let t_dist: StudentT = StudentT::new(size - 2.0)?;
    let t: f64 = t_dist.quantile(1.0 - significance / (2.0 * size));
    let factor: f64 = (size - 1.0) / size.sqrt();
    return Ok(factor * (t * t / (size - 2.0 + t * t)).sqrt());
}
