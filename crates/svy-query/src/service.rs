use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use svy_model::{
    CategoryDescriptor, CategoryId, Distribution, FilterSpec, MetricMode, Question, Result,
    SourceStamp, SurveyError,
};
use svy_taxonomy::Taxonomy;

use crate::aggregate::distribute;
use crate::cache::SnapshotCache;
use crate::filter::{FilterBindings, apply_filters};
use crate::snapshot::{DatasetSnapshot, DatasetSource};

/// Shape and provenance of the currently loaded dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetInfo {
    pub rows: usize,
    pub columns: usize,
    pub questions: usize,
    pub categories: usize,
    pub stamp: SourceStamp,
}

/// The query façade: every dataset question a caller can ask goes through
/// here.
///
/// The service owns a [`SnapshotCache`], so the source is read on the
/// first query and reused until [`SurveyService::clear_cache`] or
/// [`SurveyService::reload`]. All methods take `&self`; the service is
/// safe to share across threads.
pub struct SurveyService<S> {
    source: S,
    taxonomy: Taxonomy,
    bindings: FilterBindings,
    cache: SnapshotCache,
}

// Manual impl: the source may be a closure, which has no `Debug`.
impl<S> fmt::Debug for SurveyService<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurveyService")
            .field("taxonomy", &self.taxonomy)
            .field("bindings", &self.bindings)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl<S: DatasetSource> SurveyService<S> {
    /// A service over `source` with the 2024 scheme and default filter
    /// bindings.
    pub fn new(source: S) -> Self {
        Self {
            source,
            taxonomy: Taxonomy::survey_2024(),
            bindings: FilterBindings::default(),
            cache: SnapshotCache::new(),
        }
    }

    pub fn with_taxonomy(mut self, taxonomy: Taxonomy) -> Self {
        self.taxonomy = taxonomy;
        self
    }

    pub fn with_bindings(mut self, bindings: FilterBindings) -> Self {
        self.bindings = bindings;
        self
    }

    /// Use a caller-constructed cache, keeping whatever it already holds.
    ///
    /// Lets the hosting process own the cache lifecycle; the default is a
    /// fresh empty cache per service.
    pub fn with_cache(mut self, cache: SnapshotCache) -> Self {
        self.cache = cache;
        self
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// The current snapshot, loading it on first use.
    pub fn snapshot(&self) -> Result<Arc<DatasetSnapshot>> {
        self.cache.get_or_load(&self.source, &self.taxonomy)
    }

    /// Forces a fresh load. The previous snapshot survives if the load
    /// fails.
    pub fn reload(&self) -> Result<Arc<DatasetSnapshot>> {
        self.cache.reload(&self.source, &self.taxonomy)
    }

    /// Forgets the cached snapshot without loading a new one.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// All categories of the scheme, loaded dataset or not.
    pub fn categories(&self) -> &[CategoryDescriptor] {
        self.taxonomy.categories()
    }

    /// The question catalog, optionally restricted to one category.
    ///
    /// Asking for a category the scheme does not define is an error;
    /// asking for a defined category with no questions yields an empty
    /// list.
    pub fn questions(&self, category: Option<CategoryId>) -> Result<Vec<Question>> {
        let snapshot = self.snapshot()?;
        match category {
            None => Ok(snapshot.questions().to_vec()),
            Some(id) => {
                if !self.taxonomy.contains(id) {
                    return Err(SurveyError::CategoryNotFound { id });
                }
                Ok(snapshot
                    .questions()
                    .iter()
                    .filter(|q| q.category.as_ref().is_some_and(|c| c.id == id))
                    .cloned()
                    .collect())
            }
        }
    }

    /// Distribution of one question over the whole respondent base.
    pub fn distribution(&self, identifier: &str, mode: MetricMode) -> Result<Distribution> {
        let snapshot = self.snapshot()?;
        let view = snapshot.table().view();
        distribute(&view, snapshot.metadata(), identifier, mode)
    }

    /// Distribution over the respondent base narrowed by `spec`, with the
    /// filters that actually applied echoed back.
    pub fn filtered_distribution(
        &self,
        identifier: &str,
        mode: MetricMode,
        spec: &FilterSpec,
    ) -> Result<Distribution> {
        let snapshot = self.snapshot()?;
        let (view, applied) = apply_filters(snapshot.table().view(), &self.bindings, spec);
        let mut distribution = distribute(&view, snapshot.metadata(), identifier, mode)?;
        distribution.applied = Some(applied);
        Ok(distribution)
    }

    /// Shape and provenance of the loaded dataset.
    pub fn info(&self) -> Result<DatasetInfo> {
        let snapshot = self.snapshot()?;
        Ok(DatasetInfo {
            rows: snapshot.table().row_count(),
            columns: snapshot.table().column_count(),
            questions: snapshot.questions().len(),
            categories: self.taxonomy.categories().len(),
            stamp: snapshot.stamp().clone(),
        })
    }
}
