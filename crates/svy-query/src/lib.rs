//! Query engine over loaded survey datasets.
//!
//! [`SurveyService`] is the façade: it caches one immutable
//! [`DatasetSnapshot`] per loaded bundle and answers category, catalog,
//! and distribution queries against it. The pieces are usable on their
//! own: [`apply_filters`] narrows a table view and [`distribute`] turns a
//! view column into a [`svy_model::Distribution`].

mod aggregate;
mod cache;
mod catalog;
mod filter;
mod service;
mod snapshot;

pub use aggregate::distribute;
pub use cache::SnapshotCache;
pub use filter::{FilterBindings, apply_filters};
pub use service::{DatasetInfo, SurveyService};
pub use snapshot::{DatasetSnapshot, DatasetSource};
