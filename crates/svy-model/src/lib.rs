//! Core data model for labeled survey datasets.
//!
//! A dataset is a column-major [`Table`] of [`CellValue`]s plus
//! [`VariableMetadata`] describing question text and value labels. Queries
//! answer with [`Question`] catalogs and [`Distribution`]s. Everything here
//! is plain data; loading and aggregation live in the sibling crates.

pub mod category;
pub mod distribution;
pub mod error;
pub mod filter;
pub mod metadata;
pub mod question;
pub mod table;
pub mod values;

pub use category::{CategoryDescriptor, CategoryId};
pub use distribution::{
    AppliedFilters, AppliedValue, Distribution, DistributionEntry, MetricMode, MetricValue,
};
pub use error::{Result, SurveyError};
pub use filter::{AgeRange, FilterKey, FilterSpec};
pub use metadata::{LoadedDataset, SourceStamp, ValueLabels, VariableMetadata};
pub use question::{AnswerOption, Question};
pub use table::{Column, Table, TableView};
pub use values::{CellValue, ColumnKind, ValueKey};
