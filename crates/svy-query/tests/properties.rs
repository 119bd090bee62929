use proptest::collection::vec;
use proptest::option;
use proptest::prelude::*;

use svy_model::{CellValue, Column, FilterSpec, MetricMode, Table, ValueKey, VariableMetadata};
use svy_query::{FilterBindings, apply_filters, distribute};

/// Cells drawn from a small code set: at most ten distinct values, so
/// per-entry rounding drift stays well inside the percentage tolerance.
fn cell() -> impl Strategy<Value = CellValue> {
    prop_oneof![
        3 => (0u32..6).prop_map(|code| CellValue::Numeric(f64::from(code))),
        2 => prop_oneof![
            Just("alto"),
            Just("medio"),
            Just("bajo"),
            Just("ns/nc"),
        ]
        .prop_map(|text| CellValue::Text(text.to_string())),
        1 => Just(CellValue::Missing),
    ]
}

fn single_column(name: &str, cells: Vec<CellValue>) -> Table {
    let mut table = Table::new();
    table.push_column(Column::new(name, cells)).unwrap();
    table
}

fn demographics(rows: &[(Option<u32>, Option<u32>)]) -> Table {
    let to_cell = |code: Option<u32>| {
        code.map_or(CellValue::Missing, |c| CellValue::Numeric(f64::from(c)))
    };
    let mut table = Table::new();
    table
        .push_column(Column::new(
            "SEXO",
            rows.iter().map(|&(sex, _)| to_cell(sex)).collect(),
        ))
        .unwrap();
    table
        .push_column(Column::new(
            "ESC",
            rows.iter().map(|&(_, education)| to_cell(education)).collect(),
        ))
        .unwrap();
    table
}

proptest! {
    #[test]
    fn total_counts_exactly_the_non_missing_cells(cells in vec(cell(), 0..80)) {
        let expected = cells.iter().filter(|c| !c.is_missing()).count() as u64;
        let table = single_column("Q_1", cells);
        let view = table.view();
        let distribution =
            distribute(&view, &VariableMetadata::new(), "Q_1", MetricMode::Count).unwrap();

        prop_assert_eq!(distribution.total, expected);
        let sum: u64 = distribution
            .entries
            .iter()
            .filter_map(|e| e.metric.as_count())
            .sum();
        prop_assert_eq!(sum, expected);
    }

    #[test]
    fn entries_are_strictly_ordered(cells in vec(cell(), 0..80)) {
        let table = single_column("Q_1", cells);
        let view = table.view();
        let distribution =
            distribute(&view, &VariableMetadata::new(), "Q_1", MetricMode::Count).unwrap();

        let keys: Vec<ValueKey> = distribution
            .entries
            .iter()
            .map(|e| ValueKey::new(&e.value).unwrap())
            .collect();
        for pair in keys.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn percentages_sum_close_to_one_hundred(cells in vec(cell(), 0..80)) {
        let table = single_column("Q_1", cells);
        let view = table.view();
        let distribution =
            distribute(&view, &VariableMetadata::new(), "Q_1", MetricMode::Percentage).unwrap();

        if distribution.total > 0 {
            let sum: f64 = distribution
                .entries
                .iter()
                .filter_map(|e| e.metric.as_percentage())
                .sum();
            prop_assert!((sum - 100.0).abs() <= 0.1, "sum was {}", sum);
        } else {
            prop_assert!(distribution.entries.is_empty());
        }
    }

    #[test]
    fn scalar_filters_compose_in_any_order(
        rows in vec((option::of(0u32..3), option::of(0u32..3)), 0..60),
        sex in 0u32..3,
        education in 0u32..3,
    ) {
        let table = demographics(&rows);
        let bindings = FilterBindings::default();
        let sex = f64::from(sex);
        let education = f64::from(education);

        let both = FilterSpec::new().with_sex(sex).with_education(education);
        let (combined, _) = apply_filters(table.view(), &bindings, &both);

        let (first, _) = apply_filters(table.view(), &bindings, &FilterSpec::new().with_sex(sex));
        let (sex_then_education, _) =
            apply_filters(first, &bindings, &FilterSpec::new().with_education(education));

        let (first, _) =
            apply_filters(table.view(), &bindings, &FilterSpec::new().with_education(education));
        let (education_then_sex, _) =
            apply_filters(first, &bindings, &FilterSpec::new().with_sex(sex));

        prop_assert_eq!(combined.row_indices(), sex_then_education.row_indices());
        prop_assert_eq!(combined.row_indices(), education_then_sex.row_indices());
        prop_assert!(combined.row_count() <= table.row_count());
    }

    #[test]
    fn filtering_only_ever_removes_rows(
        rows in vec((option::of(0u32..3), option::of(0u32..3)), 0..60),
        sex in 0u32..3,
    ) {
        let table = demographics(&rows);
        let (view, _) = apply_filters(
            table.view(),
            &FilterBindings::default(),
            &FilterSpec::new().with_sex(f64::from(sex)),
        );
        // Survivors are a subset of the original rows, in original order.
        let mut last: Option<usize> = None;
        for &row in view.row_indices() {
            prop_assert!(row < table.row_count());
            if let Some(previous) = last {
                prop_assert!(row > previous);
            }
            last = Some(row);
        }
    }
}
