use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::table::Table;
use crate::values::CellValue;

/// Labels for the coded values of one variable.
///
/// Entries keep their insertion order, which is the option order shown to
/// callers. Re-inserting an existing value updates its label in place
/// without moving it. Keys are compared after numeric normalization, so
/// `1`, `1.0` and the text `"1"` all address the same entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueLabels {
    entries: Vec<(CellValue, String)>,
}

impl ValueLabels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or updates a label. Missing values are ignored.
    pub fn insert(&mut self, value: CellValue, label: impl Into<String>) {
        let Some(key) = normalized_key(&value) else {
            return;
        };
        let label = label.into();
        let existing = self
            .entries
            .iter_mut()
            .find(|(v, _)| normalized_key(v).as_deref() == Some(key.as_str()));
        match existing {
            Some(entry) => entry.1 = label,
            None => self.entries.push((value, label)),
        }
    }

    pub fn lookup(&self, value: &CellValue) -> Option<&str> {
        let key = normalized_key(value)?;
        self.entries
            .iter()
            .find(|(v, _)| normalized_key(v).as_deref() == Some(key.as_str()))
            .map(|(_, label)| label.as_str())
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[(CellValue, String)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Canonical lookup key for a labeled value. Numeric text collapses onto
/// the number it denotes; `None` means the value cannot be labeled.
fn normalized_key(value: &CellValue) -> Option<String> {
    match value {
        CellValue::Missing => None,
        CellValue::Numeric(v) => Some(v.to_string()),
        CellValue::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse::<f64>() {
                Ok(v) if v.is_finite() => Some(v.to_string()),
                _ => Some(trimmed.to_string()),
            }
        }
    }
}

/// Descriptive metadata sitting beside the response table: per-variable
/// question text and per-variable value labels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableMetadata {
    labels: BTreeMap<String, String>,
    value_labels: BTreeMap<String, ValueLabels>,
}

impl VariableMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the question text for a variable. Blank labels are dropped,
    /// so `label` never returns an empty string.
    pub fn set_label(&mut self, variable: impl Into<String>, label: impl Into<String>) {
        let label = label.into();
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return;
        }
        self.labels.insert(variable.into(), trimmed.to_string());
    }

    pub fn label(&self, variable: &str) -> Option<&str> {
        self.labels.get(variable).map(String::as_str)
    }

    pub fn insert_value_label(
        &mut self,
        variable: &str,
        value: CellValue,
        label: impl Into<String>,
    ) {
        self.value_labels
            .entry(variable.to_string())
            .or_default()
            .insert(value, label);
    }

    pub fn value_labels(&self, variable: &str) -> Option<&ValueLabels> {
        self.value_labels.get(variable)
    }

    pub fn labeled_variable_count(&self) -> usize {
        self.labels.len()
    }
}

/// Provenance of one loaded dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceStamp {
    /// Where the bundle came from, usually its directory path.
    pub origin: String,
    /// SHA-256 of the responses file, hex encoded.
    pub data_sha256: String,
    pub loaded_at: DateTime<Utc>,
}

/// Everything a load produces: the table, its metadata, and provenance.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub table: Table,
    pub metadata: VariableMetadata,
    pub stamp: SourceStamp,
}
