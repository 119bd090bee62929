//! Integration tests for the bundle-to-service wiring.

use std::fs;
use std::path::Path;

use svy_cli::pipeline::{exit_code_for, open_service};
use svy_model::{MetricMode, SurveyError};

fn write_bundle(dir: &Path) {
    fs::write(dir.join("responses.csv"), "SEXO,Q_75\n1,23\n2,35\n1,41\n").unwrap();
    fs::write(
        dir.join("variables.csv"),
        "variable,label\nSEXO,Sex of respondent\n",
    )
    .unwrap();
    fs::write(
        dir.join("value_labels.csv"),
        "variable,value,label\nSEXO,1,Hombre\nSEXO,2,Mujer\n",
    )
    .unwrap();
}

#[test]
fn service_answers_queries_from_a_disk_bundle() {
    let dir = tempfile::tempdir().unwrap();
    write_bundle(dir.path());

    let service = open_service(dir.path()).unwrap();
    let info = service.info().unwrap();
    assert_eq!(info.rows, 3);
    assert_eq!(info.columns, 2);
    assert_eq!(info.questions, 1);

    let distribution = service.distribution("SEXO", MetricMode::Count).unwrap();
    assert_eq!(distribution.total, 3);
    assert_eq!(distribution.entries[0].label, "Hombre");
}

#[test]
fn missing_bundle_folder_is_an_operational_failure() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent");

    let error = open_service(&missing).unwrap_err();
    assert_eq!(exit_code_for(&error), 1);
}

#[test]
fn unknown_question_keeps_its_usage_exit_code_through_context() {
    let dir = tempfile::tempdir().unwrap();
    write_bundle(dir.path());
    let service = open_service(dir.path()).unwrap();

    let error = service
        .distribution("GHOST", MetricMode::Count)
        .unwrap_err();
    assert!(matches!(&error, SurveyError::QuestionNotFound { .. }));

    let wrapped = anyhow::Error::from(error).context("run distribution");
    assert_eq!(exit_code_for(&wrapped), 2);
}

#[test]
fn operational_errors_exit_with_one() {
    let error = anyhow::anyhow!("scratch disk unavailable");
    assert_eq!(exit_code_for(&error), 1);
}
