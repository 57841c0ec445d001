use std::path::PathBuf;

use thiserror::Error;

/// Errors for the distribution layer (construction and evaluation).
#[derive(Error, Debug)]
pub enum DistError {
    /// A NaN (Not a Number) was found in the input.
    #[error("A NaN (Not a Number) was found in the input. ")]
    NanErr,
    /// A number did not fullfill the conditions of the function.
    /// Maybe it was infinite when it was not allowed, was zero or negative when
    /// the function only takes strictly positive numbers, or was outside `[0, 1]`
    /// when the function asks for a probability.
    #[error(
        "A number did not fullfill the conditions of the function. Maybe it was infinite when it was not allowed, was zero or negative when the function only takes strictly positive numbers, or was outside [0, 1] when the function asks for a probability. "
    )]
    InvalidNumber,
    /// There was an error when performing some numerical computation. Overflow/underflow/division by 0
    #[error(
        "There was an error when performing some numerical computation. Overflow/underflow/division by 0"
    )]
    NumericalError,
}

/// An enum that indicates what went wrong while turning a report into a figure.
#[derive(Error, Debug)]
pub enum VizError {
    /// A file could not be read or written.
    #[error("io error on `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The report text did not contain every mandatory field for its test kind.
    #[error("report is missing mandatory fields: {missing:?}")]
    Parse { missing: Vec<&'static str> },
    /// A figure element needed more data points than were available.
    #[error("not enough data for {what}: got {got}, need at least {min}")]
    InsufficientData {
        what: &'static str,
        got: usize,
        min: usize,
    },
    /// The drawing backend rejected an operation.
    #[error("render failed: {0}")]
    Render(String),
    /// A distribution could not be built or evaluated.
    #[error(transparent)]
    Distribution(#[from] DistError),
}
