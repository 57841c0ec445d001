//! Parsing and serialization of the analysis engine reports.
//!
//! The engine writes one plain text file per statistical test, Russian
//! labels with the numbers embedded in prose. [parser] turns such a file
//! into the typed records of [model]; [writer] renders a record back
//! into its canonical text form. The two compose: parsing what the
//! writer produced restores every mandatory field exactly.

pub mod grammar;
pub mod model;
pub mod parser;
pub mod writer;
