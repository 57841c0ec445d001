//! Sample data containers.
//!
//! [SampleData] holds the raw observations behind the histogram, box plot,
//! Q-Q and strip panels: either loaded from the whitespace separated data
//! files next to the reports, or taken from the data section embedded in a
//! report. Censored lifetime observations carry a parallel flag vector.

use std::path::Path;

use crate::errors::{DistError, VizError};

#[derive(Debug, Clone, PartialEq)]
pub struct SampleData {
    // all finite
    observations: Vec<f64>,
    // when present, same length as `observations`; true = censored
    censored: Option<Vec<bool>>,
}

impl SampleData {
    /// Creates a new instance of [SampleData] with the given `observations`
    /// and no censoring information.
    ///
    /// `observations` must not contain NaNs or infinities (`+-inf`).
    ///
    /// If some of your observations are censored, use
    /// [SampleData::with_censoring].
    pub fn new(observations: Vec<f64>) -> Result<SampleData, DistError> {
        SampleData::check_finite(&observations)?;

        return Ok(SampleData {
            observations,
            censored: None,
        });
    }

    /// Creates a new instance of [SampleData] where `censored[i]` tells if
    /// `observations[i]` is a censored observation.
    ///
    /// `observations` must not contain NaNs or infinities (`+-inf`) and both
    /// vectors must have the same length.
    pub fn with_censoring(
        observations: Vec<f64>,
        censored: Vec<bool>,
    ) -> Result<SampleData, DistError> {
        assert!(
            observations.len() == censored.len(),
            "censoring flags must be parallel to the observations"
        );

        SampleData::check_finite(&observations)?;

        return Ok(SampleData {
            observations,
            censored: Some(censored),
        });
    }

    fn check_finite(observations: &[f64]) -> Result<(), DistError> {
        if observations.iter().any(|x: &f64| x.is_nan()) {
            return Err(DistError::NanErr);
        }
        if observations.iter().any(|x: &f64| x.is_infinite()) {
            return Err(DistError::InvalidNumber);
        }
        return Ok(());
    }

    /// Reads a whitespace separated data file.
    ///
    /// Per line: the first token is the observation, an optional second
    /// integer token is the censoring flag (`1` = censored). Lines that are
    /// blank, start with `#` or whose first token is not a finite number are
    /// skipped. The censoring flags are kept only if every kept line carried
    /// one.
    ///
    /// A missing or unreadable file is an error; a file with zero usable
    /// lines is a valid, empty sample.
    pub fn load(path: &Path) -> Result<SampleData, VizError> {
        let text: String = std::fs::read_to_string(path).map_err(|source| VizError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut observations: Vec<f64> = Vec::new();
        let mut flags: Vec<bool> = Vec::new();
        let mut every_line_flagged: bool = true;

        for line in text.lines() {
            let trimmed: &str = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let mut tokens = trimmed.split_whitespace();
            let Some(first) = tokens.next() else {
                continue;
            };

            let Ok(value) = first.parse::<f64>() else {
                continue;
            };
            if !value.is_finite() {
                continue;
            }

            observations.push(value);

            match tokens.next().and_then(|t: &str| t.parse::<i64>().ok()) {
                Some(flag) => flags.push(flag == 1),
                None => every_line_flagged = false,
            }
        }

        let censored: Option<Vec<bool>> = if every_line_flagged && !observations.is_empty() {
            Some(flags)
        } else {
            None
        };

        return Ok(SampleData {
            observations,
            censored,
        });
    }

    #[must_use]
    pub fn len(&self) -> usize {
        return self.observations.len();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        return self.observations.is_empty();
    }

    /// Gives a reference to the contained observations.
    #[must_use]
    pub fn observations(&self) -> &[f64] {
        return &self.observations;
    }

    /// The censoring flags, if the sample carries them.
    #[must_use]
    pub fn censoring(&self) -> Option<&[bool]> {
        return self.censored.as_deref();
    }

    /// The observations that are not censored. Without censoring
    /// information, every observation is considered complete.
    #[must_use]
    pub fn complete(&self) -> Vec<f64> {
        return match &self.censored {
            Some(flags) => self
                .observations
                .iter()
                .zip(flags.iter())
                .filter(|&(_, &is_censored)| !is_censored)
                .map(|(&x, _)| x)
                .collect::<Vec<f64>>(),
            None => self.observations.clone(),
        };
    }

    /// The censored observations (empty without censoring information).
    #[must_use]
    pub fn censored_values(&self) -> Vec<f64> {
        return match &self.censored {
            Some(flags) => self
                .observations
                .iter()
                .zip(flags.iter())
                .filter(|&(_, &is_censored)| is_censored)
                .map(|(&x, _)| x)
                .collect::<Vec<f64>>(),
            None => Vec::new(),
        };
    }

    /// The sample mean, or None for an empty sample.
    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        if self.observations.is_empty() {
            return None;
        }

        let sum: f64 = self.observations.iter().sum();
        return Some(sum / self.observations.len() as f64);
    }

    /// The sample standard deviation with `n - 1` in the denominator,
    /// or None for samples with less than 2 observations.
    #[must_use]
    pub fn std_dev(&self) -> Option<f64> {
        let n: usize = self.observations.len();
        if n < 2 {
            return None;
        }

        let mean: f64 = self.mean()?;
        let sum_sq: f64 = self
            .observations
            .iter()
            .map(|&x| (x - mean) * (x - mean))
            .sum();

        return Some((sum_sq / (n - 1) as f64).sqrt());
    }

    #[must_use]
    pub fn min(&self) -> Option<f64> {
        return self.observations.iter().copied().reduce(f64::min);
    }

    #[must_use]
    pub fn max(&self) -> Option<f64> {
        return self.observations.iter().copied().reduce(f64::max);
    }

    /// A sorted copy of the observations.
    #[must_use]
    pub fn sorted(&self) -> Vec<f64> {
        let mut sorted: Vec<f64> = self.observations.clone();
        // all values are finite, so total_cmp has no surprises here
        sorted.sort_by(f64::total_cmp);
        return sorted;
    }

    /// The sample median, or None for an empty sample.
    #[must_use]
    pub fn median(&self) -> Option<f64> {
        return self.quartiles().map(|(_, median, _)| median);
    }

    /// `(q1, median, q3)` with linear interpolation between order
    /// statistics, or None for an empty sample.
    #[must_use]
    pub fn quartiles(&self) -> Option<(f64, f64, f64)> {
        if self.observations.is_empty() {
            return None;
        }

        let sorted: Vec<f64> = self.sorted();

        let q1: f64 = interpolated_quantile(&sorted, 0.25);
        let median: f64 = interpolated_quantile(&sorted, 0.5);
        let q3: f64 = interpolated_quantile(&sorted, 0.75);

        return Some((q1, median, q3));
    }
}

/// The `p`-quantile of an already sorted non-empty slice, interpolating
/// linearly at position `p * (n - 1)`.
#[must_use]
pub fn interpolated_quantile(sorted: &[f64], p: f64) -> f64 {
    assert!(!sorted.is_empty());

    let position: f64 = p.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let below: usize = position.floor() as usize;
    let above: usize = position.ceil() as usize;

    if below == above {
        return sorted[below];
    }

    let fraction: f64 = position - below as f64;
    return sorted[below] + fraction * (sorted[above] - sorted[below]);
}
