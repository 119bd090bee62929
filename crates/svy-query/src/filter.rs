use std::collections::BTreeMap;

use svy_model::{AppliedFilters, AppliedValue, CellValue, FilterKey, FilterSpec, TableView};

/// Maps filter keys to the dataset columns they test.
///
/// The defaults follow the 2024 bundle layout; a wave that stores its
/// demographics elsewhere rebinds individual keys with
/// [`FilterBindings::with_column`].
#[derive(Debug, Clone)]
pub struct FilterBindings {
    columns: BTreeMap<FilterKey, String>,
}

impl Default for FilterBindings {
    fn default() -> Self {
        let mut columns = BTreeMap::new();
        columns.insert(FilterKey::QualityOfLife, "CALIDAD_VIDA".to_string());
        columns.insert(FilterKey::Municipality, "Q_94".to_string());
        columns.insert(FilterKey::Sex, "SEXO".to_string());
        columns.insert(FilterKey::Education, "ESC".to_string());
        columns.insert(FilterKey::Socioeconomic, "NSE2024_C".to_string());
        columns.insert(FilterKey::Age, "Q_75".to_string());
        Self { columns }
    }
}

impl FilterBindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_column(mut self, key: FilterKey, column: impl Into<String>) -> Self {
        self.columns.insert(key, column.into());
        self
    }

    pub fn column(&self, key: FilterKey) -> Option<&str> {
        self.columns.get(&key).map(String::as_str)
    }
}

/// Narrows `view` by every requested filter and reports what applied.
///
/// Scalar filters keep rows whose bound column holds a numeric cell equal
/// to the requested code; text and missing cells never match. The age
/// filter keeps rows inside the inclusive range; an unbounded range keeps
/// everything but is still echoed. A filter whose column is absent from
/// the table is skipped with a debug log and left out of the echo.
///
/// Each filter only ever removes rows, so the surviving set is the same
/// whichever order the filters run in.
pub fn apply_filters<'a>(
    mut view: TableView<'a>,
    bindings: &FilterBindings,
    spec: &FilterSpec,
) -> (TableView<'a>, AppliedFilters) {
    let mut applied = AppliedFilters::new();
    for key in FilterKey::SCALARS {
        let Some(code) = spec.scalar(key) else {
            continue;
        };
        let Some(name) = bindings.column(key) else {
            continue;
        };
        let Some(column) = view.table().column(name) else {
            tracing::debug!(filter = %key, column = name, "filter column not in dataset, skipping");
            continue;
        };
        view.retain(|row| {
            matches!(column.get(row), Some(CellValue::Numeric(value)) if *value == code)
        });
        applied.insert(key, AppliedValue::Scalar(code));
    }
    if let Some(range) = spec.age
        && let Some(name) = bindings.column(FilterKey::Age)
    {
        match view.table().column(name) {
            Some(column) => {
                if !range.is_unbounded() {
                    view.retain(|row| {
                        column
                            .get(row)
                            .and_then(CellValue::as_numeric)
                            .is_some_and(|age| range.contains(age))
                    });
                }
                applied.insert(FilterKey::Age, AppliedValue::Range(range));
            }
            None => {
                tracing::debug!(
                    filter = %FilterKey::Age,
                    column = name,
                    "filter column not in dataset, skipping"
                );
            }
        }
    }
    (view, applied)
}
