use svy_model::{LoadedDataset, Question, Result, SourceStamp, Table, VariableMetadata};
use svy_taxonomy::Taxonomy;

use crate::catalog::build_questions;

/// Where datasets come from. The cache calls [`DatasetSource::load`] at
/// most once per fill.
///
/// Any `Fn() -> Result<LoadedDataset>` closure is a source, so a disk
/// bundle plugs in as `move || bundle.load()` and tests hand in canned
/// data the same way.
pub trait DatasetSource: Send + Sync {
    fn load(&self) -> Result<LoadedDataset>;
}

impl<F> DatasetSource for F
where
    F: Fn() -> Result<LoadedDataset> + Send + Sync,
{
    fn load(&self) -> Result<LoadedDataset> {
        self()
    }
}

/// An immutable loaded dataset with its question catalog built eagerly.
///
/// Snapshots are shared behind `Arc` and never mutated, so every query
/// against one snapshot sees one consistent dataset regardless of what
/// the cache does afterwards.
#[derive(Debug)]
pub struct DatasetSnapshot {
    table: Table,
    metadata: VariableMetadata,
    questions: Vec<Question>,
    stamp: SourceStamp,
}

impl DatasetSnapshot {
    pub(crate) fn build(dataset: LoadedDataset, taxonomy: &Taxonomy) -> Self {
        let questions = build_questions(&dataset.table, &dataset.metadata, taxonomy);
        tracing::debug!(
            questions = questions.len(),
            columns = dataset.table.column_count(),
            "built dataset snapshot"
        );
        Self {
            table: dataset.table,
            metadata: dataset.metadata,
            questions,
            stamp: dataset.stamp,
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn metadata(&self) -> &VariableMetadata {
        &self.metadata
    }

    /// The catalog in dataset column order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn stamp(&self) -> &SourceStamp {
        &self.stamp
    }
}
