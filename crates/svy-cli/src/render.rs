//! Table rendering for query reports.
//!
//! Every report has a table form for terminals; the JSON form is plain
//! `serde_json` over the model types and needs no helpers here.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use svy_model::{
    AppliedFilters, CategoryDescriptor, Distribution, MetricMode, MetricValue, Question,
};
use svy_query::DatasetInfo;

/// Build the category listing table.
pub fn categories_table(categories: &[CategoryDescriptor]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Id"),
        header_cell("Category"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for category in categories {
        table.add_row(vec![
            Cell::new(category.id),
            Cell::new(&category.name).add_attribute(Attribute::Bold),
            Cell::new(&category.description),
        ]);
    }
    table
}

/// Build the question catalog table.
pub fn questions_table(questions: &[Question]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Question"),
        header_cell("Text"),
        header_cell("Category"),
        header_cell("Options"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    for question in questions {
        table.add_row(vec![
            Cell::new(&question.identifier)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&question.text),
            category_cell(question.category.as_ref()),
            Cell::new(question.options.len()),
        ]);
    }
    table
}

/// Build the answer distribution table, with a TOTAL row at the bottom.
pub fn distribution_table(distribution: &Distribution) -> Table {
    let metric_header = match distribution.mode {
        MetricMode::Count => "Count",
        MetricMode::Percentage => "Percent",
    };
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Value"),
        header_cell("Label"),
        header_cell(metric_header),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for entry in &distribution.entries {
        table.add_row(vec![
            Cell::new(entry.value.to_string()),
            Cell::new(&entry.label),
            metric_cell(entry.metric),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(distribution.total).add_attribute(Attribute::Bold),
    ]);
    table
}

/// Build the dataset summary table.
pub fn info_table(info: &DatasetInfo) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Value")]);
    apply_table_style(&mut table);
    for (field, value) in [
        ("Rows", info.rows.to_string()),
        ("Columns", info.columns.to_string()),
        ("Questions", info.questions.to_string()),
        ("Categories", info.categories.to_string()),
        ("Origin", info.stamp.origin.clone()),
        ("Fingerprint", info.stamp.data_sha256.clone()),
        ("Loaded at", info.stamp.loaded_at.to_rfc3339()),
    ] {
        table.add_row(vec![
            Cell::new(field).add_attribute(Attribute::Bold),
            Cell::new(value),
        ]);
    }
    table
}

/// Render the applied filter echo as `key=value` pairs.
pub fn applied_filters_line(applied: &AppliedFilters) -> String {
    applied
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Shared comfy-table styling for report output.
pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn metric_cell(metric: MetricValue) -> Cell {
    match metric {
        MetricValue::Count(count) => Cell::new(count),
        MetricValue::Percentage(share) => Cell::new(format!("{share:.2}")),
    }
}

fn category_cell(category: Option<&CategoryDescriptor>) -> Cell {
    match category {
        Some(descriptor) => Cell::new(&descriptor.name),
        None => dim_cell("-"),
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
