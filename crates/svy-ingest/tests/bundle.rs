use std::fs;
use std::path::Path;

use svy_ingest::SurveyBundle;
use svy_model::{CellValue, ColumnKind, SurveyError};

fn write_bundle(dir: &Path) {
    fs::write(
        dir.join("responses.csv"),
        "SEXO,Q_75,COMMENT\n1,23,ok\n2,35,\n1,41,meh\n,18,\n",
    )
    .unwrap();
    fs::write(
        dir.join("variables.csv"),
        "Variable,Label\nSEXO,Sexo\nQ_75,Edad en anos cumplidos\n",
    )
    .unwrap();
    fs::write(
        dir.join("value_labels.csv"),
        "Variable,Value,Label\nSEXO,1,Hombre\nSEXO,2,Mujer\n",
    )
    .unwrap();
}

#[test]
fn loads_a_complete_bundle() {
    let dir = tempfile::tempdir().unwrap();
    write_bundle(dir.path());

    let bundle = SurveyBundle::open(dir.path()).unwrap();
    let dataset = bundle.load().unwrap();

    assert_eq!(dataset.table.row_count(), 4);
    assert_eq!(dataset.table.column_count(), 3);
    assert_eq!(
        dataset.table.column("SEXO").unwrap().kind(),
        ColumnKind::Numeric
    );
    assert_eq!(
        dataset.table.column("COMMENT").unwrap().kind(),
        ColumnKind::Text
    );

    assert_eq!(dataset.metadata.label("SEXO"), Some("Sexo"));
    assert_eq!(dataset.metadata.label("COMMENT"), None);
    let labels = dataset.metadata.value_labels("SEXO").unwrap();
    assert_eq!(labels.lookup(&CellValue::Numeric(1.0)), Some("Hombre"));
    assert_eq!(labels.lookup(&CellValue::Numeric(2.0)), Some("Mujer"));

    assert_eq!(dataset.stamp.origin, dir.path().display().to_string());
    assert_eq!(dataset.stamp.data_sha256.len(), 64);
}

#[test]
fn fingerprint_tracks_the_data_bytes() {
    let dir = tempfile::tempdir().unwrap();
    write_bundle(dir.path());

    let bundle = SurveyBundle::open(dir.path()).unwrap();
    let first = bundle.load().unwrap().stamp.data_sha256;
    let second = bundle.load().unwrap().stamp.data_sha256;
    assert_eq!(first, second);

    fs::write(dir.path().join("responses.csv"), "SEXO\n1\n").unwrap();
    let third = bundle.load().unwrap().stamp.data_sha256;
    assert_ne!(first, third);
}

#[test]
fn discovery_matches_stems_case_insensitively() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("ENCUESTA_2024_RESPONSES.csv"), "SEXO\n1\n").unwrap();
    fs::write(
        dir.path().join("ENCUESTA_2024_VARIABLES.csv"),
        "Variable,Label\nSEXO,Sexo\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("ENCUESTA_2024_VALUE_LABELS.csv"),
        "Variable,Value,Label\nSEXO,1,Hombre\n",
    )
    .unwrap();
    fs::write(dir.path().join("notes.csv"), "whatever\nrows\n").unwrap();
    fs::write(dir.path().join("readme.txt"), "not a csv").unwrap();

    let bundle = SurveyBundle::open(dir.path()).unwrap();
    assert!(bundle.data_path().ends_with("ENCUESTA_2024_RESPONSES.csv"));
    assert!(bundle.variables_path().is_some());
    assert!(bundle.value_labels_path().is_some());

    let dataset = bundle.load().unwrap();
    assert_eq!(dataset.metadata.label("SEXO"), Some("Sexo"));
}

#[test]
fn plain_data_csv_is_accepted_as_responses() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("data.csv"), "A\n1\n").unwrap();

    let bundle = SurveyBundle::open(dir.path()).unwrap();
    assert!(bundle.data_path().ends_with("data.csv"));
    assert!(bundle.variables_path().is_none());
    assert!(bundle.value_labels_path().is_none());
    assert_eq!(bundle.load().unwrap().table.row_count(), 1);
}

#[test]
fn ambiguous_responses_break_ties_lexicographically() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("b_responses.csv"), "A\n2\n").unwrap();
    fs::write(dir.path().join("a_responses.csv"), "A\n1\n").unwrap();

    let bundle = SurveyBundle::open(dir.path()).unwrap();
    assert!(bundle.data_path().ends_with("a_responses.csv"));
}

#[test]
fn missing_directory_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let gone = dir.path().join("no_such_bundle");
    let err = SurveyBundle::open(&gone).unwrap_err();
    assert!(matches!(err, SurveyError::BundleNotFound { path } if path == gone));
}

#[test]
fn directory_without_responses_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("variables.csv"),
        "Variable,Label\nSEXO,Sexo\n",
    )
    .unwrap();
    let err = SurveyBundle::open(dir.path()).unwrap_err();
    assert!(matches!(err, SurveyError::BundleNotFound { .. }));
}

#[test]
fn sidecar_with_unusable_header_is_invalid() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("responses.csv"), "SEXO\n1\n").unwrap();
    fs::write(dir.path().join("variables.csv"), "Foo,Bar\nSEXO,Sexo\n").unwrap();

    let bundle = SurveyBundle::open(dir.path()).unwrap();
    let err = bundle.load().unwrap_err();
    assert!(matches!(err, SurveyError::Invalid { .. }));
}

#[test]
fn sidecar_entries_for_absent_columns_are_harmless() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("responses.csv"), "SEXO\n1\n").unwrap();
    fs::write(
        dir.path().join("variables.csv"),
        "Variable,Label\nSEXO,Sexo\nGHOST,Not in the data\n",
    )
    .unwrap();

    let dataset = SurveyBundle::open(dir.path()).unwrap().load().unwrap();
    assert_eq!(dataset.metadata.label("GHOST"), Some("Not in the data"));
    assert!(!dataset.table.contains_column("GHOST"));
}
