#![allow(
    non_snake_case,
    clippy::needless_return,
    clippy::assign_op_pattern,
    clippy::excessive_precision
)]

#![warn(
    clippy::all,
    clippy::restriction,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
)]
// ^Disable warning "crate `StatPlots` should have a snake case name convert the identifier to snake case: `stat_plots`"
// The rest of the names will follow the snake_case convention.

//! # StatPlots
//!
//!
//! This library turns the plain text reports of our statistical engine into
//! diagnostic figures. It provides:
//!
//! - [x] Parsers for every report family the engine writes
//! - [x] Analytic distributions (density + quantile) to draw the curves
//! - [x] Critical regions, with recomputation when a report omits the boundary
//! - [x] Figure composition (curves, shaded tails, histograms, box plots, Q-Q)
//! - [x] PNG rendering
//! - [x] A fixed batch over the engine's work directory
//! - [x] A report writer, to generate fixtures and demo inputs
//! - [ ] Vector (SVG) output
//! - [ ] Report format auto detection beyond the per family parsers
//!
//! ## Distributions
//!
//! We have defined the trait [Distribution](distribution_trait::Distribution)
//! that defines a basic trait (interface) to work with the distributions the
//! figures need. The only requiered methods to implement are:
//!  - [pdf](distribution_trait::Distribution::pdf): the pdf of the distribution.
//!  - [cdf](distribution_trait::Distribution::cdf): the cdf of the distribution
//!     (every family here has a closed form or a special function for it).
//!  - [get_domain](distribution_trait::Distribution::get_domain): the [domain]
//!     of the pdf of the distribution.
//!
//! After this, the [quantile](distribution_trait::Distribution::quantile)
//! function is avaliable through a deafult implementation that inverts the
//! cdf numerically. Note that this deafult implementation can be
//! computationally costly, therefore we recommend implementing the other
//! methods if there is an avaliable analytical solution for them.
//!
//! The families the reports actually mention are all implemented:
//!
//!  - [x] [Normal distribution](crate::distributions::Normal) ([Wiki](https://en.wikipedia.org/wiki/Normal_distribution))
//!  - [x] [Chi-squared distribution](crate::distributions::ChiSquared) ([Wiki](https://en.wikipedia.org/wiki/Chi-squared_distribution))
//!  - [x] [F distribution](crate::distributions::F) ([Wiki](https://en.wikipedia.org/wiki/F-distribution))
//!  - [x] [Student's T distribution](crate::distributions::StudentT) ([Wiki](https://en.wikipedia.org/wiki/Student%27s_t-distribution))
//!  - [x] [Weibull distribution](crate::distributions::Weibull) ([Wiki](https://en.wikipedia.org/wiki/Weibull_distribution))
//!
//! The report side selects them through
//! [DistributionSpec](crate::distributions::DistributionSpec), wich also owns
//! the per family plotting ranges.
//!
//! ## Reports
//!
//! One report file maps to one [TestResult](report::model::TestResult)
//! variant:
//!
//!  - [x] One way ANOVA ([Wiki](https://en.wikipedia.org/wiki/One-way_analysis_of_variance))
//!  - [x] Two sample t-test, pooled and Welch ([Wiki](https://en.wikipedia.org/wiki/Student%27s_t-test#Two-sample_t-tests))
//!  - [x] Shapiro-Wilk normality test ([Wiki](https://en.wikipedia.org/wiki/Shapiro%E2%80%93Wilk_test))
//!  - [x] Wilcoxon rank sum / Mann-Whitney ([Wiki](https://en.wikipedia.org/wiki/Mann%E2%80%93Whitney_U_test))
//!  - [x] Grubbs outlier test ([Wiki](https://en.wikipedia.org/wiki/Grubbs%27s_test))
//!  - [x] Weibull fits (maximum likelihood and median rank regression)
//!  - [x] Confidence interval summaries
//!  - [x] Percentile tables
//!
//! The reports are in Russian and the figures keep that language; only the
//! log lines are in English.
//!
//! ## Figures
//!
//! [plot::compose] builds a backend independent
//! [FigureModel](plot::figure::FigureModel) out of a parsed report,
//! [plot::render] rasterizes it to a PNG, and [batch] walks the fixed
//! report/figure pairs of an engine work directory. Each pair is independent:
//! a missing report file is only a skip and a malformed one only fails its
//! own figure.
//!
//!
//! ***
//!

pub mod batch;
pub mod configuration;
pub mod distribution_trait;
pub mod distributions;
pub mod domain;
pub mod errors;
pub mod euclid;
pub mod plot;
pub mod regions;
pub mod report;
pub mod samples;
