//! Reading survey bundles from disk into the in-memory model.
//!
//! A bundle is a directory holding a responses CSV and, optionally, a
//! variables sidecar (question text) and a value-labels sidecar (answer
//! code labels). [`SurveyBundle::open`] finds the files;
//! [`SurveyBundle::load`] parses them and fingerprints the data.

mod bundle;
mod reader;

pub use bundle::SurveyBundle;
