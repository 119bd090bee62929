#![deny(unsafe_code)]

use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use svy_model::{CellValue, Column, Result, SurveyError, Table, VariableMetadata};

const VARIABLE_COLUMNS: [&str; 3] = ["variable", "name", "identifier"];
const QUESTION_TEXT_COLUMNS: [&str; 3] = ["label", "question", "text"];
const VALUE_COLUMNS: [&str; 2] = ["value", "code"];
const VALUE_LABEL_COLUMNS: [&str; 3] = ["label", "text", "decode"];

/// Parses the responses file into a column-major table.
///
/// Every field goes through [`CellValue::parse`], so column kinds fall out
/// of the data itself. Ragged rows are a parse error; the `csv` reader
/// enforces the header width on every record.
pub(crate) fn read_data_csv(path: &Path, bytes: &[u8]) -> Result<Table> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(bytes);
    let headers = reader
        .headers()
        .map_err(|e| SurveyError::csv(path, e.to_string()))?
        .clone();
    let names: Vec<String> = headers.iter().map(clean_header).collect();

    let mut cells: Vec<Vec<CellValue>> = vec![Vec::new(); names.len()];
    for record in reader.records() {
        let record = record.map_err(|e| SurveyError::csv(path, e.to_string()))?;
        for (column, raw) in record.iter().enumerate() {
            cells[column].push(CellValue::parse(raw));
        }
    }

    let mut table = Table::new();
    for (name, cells) in names.into_iter().zip(cells) {
        if name.is_empty() {
            return Err(SurveyError::invalid(path, "empty column name in header"));
        }
        table.push_column(Column::new(name, cells))?;
    }
    Ok(table)
}

/// Reads the variables sidecar: one row per variable with its question
/// text. Rows with a blank variable or blank text are skipped.
pub(crate) fn read_variables_csv(path: &Path, metadata: &mut VariableMetadata) -> Result<()> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| SurveyError::csv(path, e.to_string()))?;
    let headers = reader
        .headers()
        .map_err(|e| SurveyError::csv(path, e.to_string()))?
        .clone();
    let Some(variable_idx) = find_column(&headers, &VARIABLE_COLUMNS) else {
        return Err(SurveyError::invalid(path, "no variable column in header"));
    };
    let Some(text_idx) = find_column(&headers, &QUESTION_TEXT_COLUMNS) else {
        return Err(SurveyError::invalid(path, "no label column in header"));
    };

    for record in reader.records() {
        let record = record.map_err(|e| SurveyError::csv(path, e.to_string()))?;
        let variable = record.get(variable_idx).unwrap_or("").trim();
        if variable.is_empty() {
            continue;
        }
        metadata.set_label(variable, record.get(text_idx).unwrap_or(""));
    }
    Ok(())
}

/// Reads the value-labels sidecar: one row per labeled answer code.
/// Codes parse like data cells, so `1` in the sidecar labels `1.0` in the
/// data. Rows missing any field are skipped.
pub(crate) fn read_value_labels_csv(path: &Path, metadata: &mut VariableMetadata) -> Result<()> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| SurveyError::csv(path, e.to_string()))?;
    let headers = reader
        .headers()
        .map_err(|e| SurveyError::csv(path, e.to_string()))?
        .clone();
    let Some(variable_idx) = find_column(&headers, &VARIABLE_COLUMNS) else {
        return Err(SurveyError::invalid(path, "no variable column in header"));
    };
    let Some(value_idx) = find_column(&headers, &VALUE_COLUMNS) else {
        return Err(SurveyError::invalid(path, "no value column in header"));
    };
    let label_idx = label_column_excluding(&headers, value_idx)
        .ok_or_else(|| SurveyError::invalid(path, "no label column in header"))?;

    for record in reader.records() {
        let record = record.map_err(|e| SurveyError::csv(path, e.to_string()))?;
        let variable = record.get(variable_idx).unwrap_or("").trim();
        if variable.is_empty() {
            continue;
        }
        let value = CellValue::parse(record.get(value_idx).unwrap_or(""));
        if value.is_missing() {
            continue;
        }
        let label = record.get(label_idx).unwrap_or("").trim();
        if label.is_empty() {
            continue;
        }
        metadata.insert_value_label(variable, value, label);
    }
    Ok(())
}

fn clean_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_string()
}

fn find_column(headers: &StringRecord, candidates: &[&str]) -> Option<usize> {
    headers.iter().position(|header| {
        let header = clean_header(header);
        candidates.iter().any(|c| header.eq_ignore_ascii_case(c))
    })
}

/// Finds the label column of a value-labels header. The value column is
/// excluded from the search so a `Code,Text` style header never resolves
/// value and label to the same index.
fn label_column_excluding(headers: &StringRecord, value_idx: usize) -> Option<usize> {
    headers.iter().enumerate().position(|(idx, header)| {
        if idx == value_idx {
            return false;
        }
        let header = clean_header(header);
        VALUE_LABEL_COLUMNS.iter().any(|c| header.eq_ignore_ascii_case(c))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use svy_model::ColumnKind;

    #[test]
    fn data_parses_into_typed_columns() {
        let bytes = b"SEXO,Q_75,COMMENT\n1,23,ok\n2,35,\n1,41,meh\n,18,\n";
        let table = read_data_csv(Path::new("responses.csv"), bytes).unwrap();
        assert_eq!(table.row_count(), 4);
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.column("SEXO").unwrap().kind(), ColumnKind::Numeric);
        assert_eq!(table.column("Q_75").unwrap().kind(), ColumnKind::Numeric);
        assert_eq!(table.column("COMMENT").unwrap().kind(), ColumnKind::Text);
        assert_eq!(
            table.column("SEXO").unwrap().get(3),
            Some(&CellValue::Missing)
        );
    }

    #[test]
    fn bom_and_padding_are_stripped_from_headers() {
        let bytes = "\u{feff}SEXO, Q_75 \n1,23\n".as_bytes();
        let table = read_data_csv(Path::new("responses.csv"), bytes).unwrap();
        assert!(table.contains_column("SEXO"));
        assert!(table.contains_column("Q_75"));
    }

    #[test]
    fn ragged_rows_are_a_parse_error() {
        let bytes = b"A,B\n1,2\n3\n";
        let err = read_data_csv(Path::new("responses.csv"), bytes).unwrap_err();
        assert!(matches!(err, SurveyError::Csv { .. }));
    }

    #[test]
    fn duplicate_headers_are_rejected() {
        let bytes = b"A,A\n1,2\n";
        let err = read_data_csv(Path::new("responses.csv"), bytes).unwrap_err();
        assert!(matches!(err, SurveyError::DuplicateColumn { name } if name == "A"));
    }

    #[test]
    fn nan_fields_stay_text() {
        let bytes = b"A\nNaN\n1\n";
        let table = read_data_csv(Path::new("responses.csv"), bytes).unwrap();
        assert_eq!(table.column("A").unwrap().kind(), ColumnKind::Text);
        assert_eq!(
            table.column("A").unwrap().get(0),
            Some(&CellValue::Text("NaN".to_string()))
        );
    }

    #[test]
    fn value_label_header_resolves_value_and_label_separately() {
        let headers = StringRecord::from(vec!["Variable", "Value", "Label"]);
        let value_idx = find_column(&headers, &VALUE_COLUMNS).unwrap();
        let label_idx = label_column_excluding(&headers, value_idx).unwrap();
        assert_eq!(value_idx, 1);
        assert_eq!(label_idx, 2);
    }
}
