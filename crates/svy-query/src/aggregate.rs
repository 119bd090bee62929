use std::collections::BTreeMap;

use svy_model::{
    Distribution, DistributionEntry, MetricMode, MetricValue, Result, SurveyError, TableView,
    ValueKey, VariableMetadata,
};

/// Groups one column of `view` by answer value and reports the requested
/// metric per group.
///
/// Missing cells stay out of both the groups and the total, matching how
/// respondents who skipped a question are reported. Entries come out in
/// [`ValueKey`] order: numerics ascending, then text lexicographic. Labels
/// fall back to the value's display form and the question text falls back
/// to the identifier, so unlabeled columns are still queryable.
pub fn distribute(
    view: &TableView<'_>,
    metadata: &VariableMetadata,
    identifier: &str,
    mode: MetricMode,
) -> Result<Distribution> {
    let Some(column) = view.table().column(identifier) else {
        return Err(SurveyError::QuestionNotFound {
            id: identifier.to_string(),
        });
    };

    let mut groups: BTreeMap<ValueKey, u64> = BTreeMap::new();
    for &row in view.row_indices() {
        let Some(cell) = column.get(row) else {
            continue;
        };
        let Some(key) = ValueKey::new(cell) else {
            continue;
        };
        *groups.entry(key).or_insert(0) += 1;
    }
    let total: u64 = groups.values().sum();

    let labels = metadata.value_labels(identifier);
    let entries = groups
        .into_iter()
        .map(|(key, count)| {
            let value = key.into_value();
            let label = labels
                .and_then(|l| l.lookup(&value))
                .map_or_else(|| value.to_string(), str::to_string);
            let metric = match mode {
                MetricMode::Count => MetricValue::Count(count),
                MetricMode::Percentage => MetricValue::Percentage(percentage(count, total)),
            };
            DistributionEntry { value, label, metric }
        })
        .collect();

    Ok(Distribution {
        identifier: identifier.to_string(),
        text: metadata.label(identifier).unwrap_or(identifier).to_string(),
        mode,
        entries,
        total,
        applied: None,
    })
}

/// Share of `total` in percent, rounded to two decimals with halves going
/// away from zero. A zero total yields zero shares; `distribute` produces
/// no entries in that case.
fn percentage(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = count as f64 / total as f64 * 100.0;
    (raw * 100.0).round() / 100.0
}
