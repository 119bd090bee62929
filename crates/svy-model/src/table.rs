#![deny(unsafe_code)]

use std::collections::BTreeMap;

use crate::error::{Result, SurveyError};
use crate::values::{CellValue, ColumnKind};

/// A named column of cells with an inferred storage kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    kind: ColumnKind,
    cells: Vec<CellValue>,
}

impl Column {
    /// Builds a column, inferring its kind from the cells: numeric when at
    /// least one cell is numeric and no cell is text, otherwise text.
    pub fn new(name: impl Into<String>, cells: Vec<CellValue>) -> Self {
        let kind = infer_kind(&cells);
        Self {
            name: name.into(),
            kind,
            cells,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    pub fn cells(&self) -> &[CellValue] {
        &self.cells
    }

    pub fn get(&self, row: usize) -> Option<&CellValue> {
        self.cells.get(row)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

fn infer_kind(cells: &[CellValue]) -> ColumnKind {
    let mut saw_numeric = false;
    for cell in cells {
        match cell {
            CellValue::Numeric(_) => saw_numeric = true,
            CellValue::Text(_) => return ColumnKind::Text,
            CellValue::Missing => {}
        }
    }
    if saw_numeric {
        ColumnKind::Numeric
    } else {
        ColumnKind::Text
    }
}

/// Column-major table of survey responses.
///
/// Column names are unique and every column has the same length. Lookup
/// by name is exact; dataset identifiers are taken as-is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    index: BTreeMap<String, usize>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a column, rejecting duplicate names and mismatched lengths.
    pub fn push_column(&mut self, column: Column) -> Result<()> {
        if self.index.contains_key(column.name()) {
            return Err(SurveyError::DuplicateColumn {
                name: column.name().to_string(),
            });
        }
        if let Some(first) = self.columns.first()
            && column.len() != first.len()
        {
            return Err(SurveyError::ColumnLengthMismatch {
                name: column.name().to_string(),
                expected: first.len(),
                actual: column.len(),
            });
        }
        self.index.insert(column.name().to_string(), self.columns.len());
        self.columns.push(column);
        Ok(())
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.index.get(name).map(|&i| &self.columns[i])
    }

    pub fn contains_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Columns in their original file order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    /// A view over every row, in row order.
    pub fn view(&self) -> TableView<'_> {
        TableView {
            table: self,
            rows: (0..self.row_count()).collect(),
        }
    }
}

/// A borrowed subset of a table's rows.
///
/// Views never copy cells; they remember which row indices survive and
/// keep them in ascending original order. Narrowing a view is the filter
/// primitive: each filter retains the rows its predicate accepts.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView<'a> {
    table: &'a Table,
    rows: Vec<usize>,
}

impl<'a> TableView<'a> {
    pub fn table(&self) -> &'a Table {
        self.table
    }

    pub fn row_indices(&self) -> &[usize] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Keeps only the rows for which `keep` returns true.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(usize) -> bool,
    {
        self.rows.retain(|&row| keep(row));
    }

    /// Cells of `name` for the surviving rows, in view order. `None` when
    /// the column does not exist.
    pub fn column_cells(&self, name: &str) -> Option<impl Iterator<Item = &'a CellValue> + '_> {
        let column = self.table.column(name)?;
        Some(self.rows.iter().map(move |&row| &column.cells()[row]))
    }
}
