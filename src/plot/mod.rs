//! The figure pipeline, from parsed reports to PNG files.
//!
//! [figure] holds the backend free figure model, [geometry] the curve
//! and histogram helpers, [compose] the per report-family composers and
//! [render] the `plotters` walk that writes the PNGs.

pub mod compose;
pub mod figure;
pub mod geometry;
pub mod render;
