//! Classification of survey variables into thematic categories.
//!
//! A [`Taxonomy`] pairs category descriptors with an ordered list of
//! matching rules over variable identifiers. The built-in
//! [`Taxonomy::survey_2024`] scheme covers the 2024 questionnaire; callers
//! with a different wave supply their own rules through [`Taxonomy::new`].

mod rules;
mod scheme;

pub use rules::{CategoryRule, Matcher, Taxonomy};
