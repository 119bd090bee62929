use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use sha2::{Digest, Sha256};

use svy_model::{LoadedDataset, Result, SourceStamp, SurveyError, VariableMetadata};

use crate::reader::{read_data_csv, read_value_labels_csv, read_variables_csv};

/// A survey bundle on disk: one responses CSV plus optional metadata
/// sidecars in the same directory.
///
/// Files are recognized by stem, case-insensitively: a stem containing
/// `responses` (or exactly `data`) is the responses file, one containing
/// `variables` carries question text, and one containing `labels` carries
/// value labels. Ties break to the lexicographically first path.
#[derive(Debug, Clone)]
pub struct SurveyBundle {
    dir: PathBuf,
    data: PathBuf,
    variables: Option<PathBuf>,
    value_labels: Option<PathBuf>,
}

impl SurveyBundle {
    /// Locates the bundle files under `dir` without reading them.
    ///
    /// A missing directory and a directory with no responses file are the
    /// same failure: there is no bundle at that path.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(SurveyError::BundleNotFound { path: dir });
        }
        let mut data_files = Vec::new();
        let mut variable_files = Vec::new();
        let mut label_files = Vec::new();
        let entries = fs::read_dir(&dir).map_err(|e| SurveyError::io(&dir, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| SurveyError::io(&dir, e))?;
            let path = entry.path();
            let is_csv = path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
            if !is_csv {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let stem = stem.to_ascii_uppercase();
            if stem.contains("RESPONSES") || stem == "DATA" {
                data_files.push(path);
            } else if stem.contains("VARIABLES") {
                variable_files.push(path);
            } else if stem.contains("LABELS") {
                label_files.push(path);
            }
        }
        data_files.sort();
        variable_files.sort();
        label_files.sort();
        let Some(data) = data_files.into_iter().next() else {
            return Err(SurveyError::BundleNotFound { path: dir });
        };
        tracing::debug!(
            dir = %dir.display(),
            data = %data.display(),
            "discovered survey bundle"
        );
        Ok(Self {
            dir,
            data,
            variables: variable_files.into_iter().next(),
            value_labels: label_files.into_iter().next(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn data_path(&self) -> &Path {
        &self.data
    }

    pub fn variables_path(&self) -> Option<&Path> {
        self.variables.as_deref()
    }

    pub fn value_labels_path(&self) -> Option<&Path> {
        self.value_labels.as_deref()
    }

    /// Reads the bundle into memory and stamps its provenance.
    ///
    /// The responses bytes are read once; the same buffer feeds the
    /// fingerprint and the parser, so the stamp always describes exactly
    /// the bytes that produced the table.
    pub fn load(&self) -> Result<LoadedDataset> {
        let bytes = fs::read(&self.data).map_err(|e| SurveyError::io(&self.data, e))?;
        let data_sha256 = sha256_hex(&bytes);
        let table = read_data_csv(&self.data, &bytes)?;

        let mut metadata = VariableMetadata::new();
        if let Some(path) = &self.variables {
            read_variables_csv(path, &mut metadata)?;
        }
        if let Some(path) = &self.value_labels {
            read_value_labels_csv(path, &mut metadata)?;
        }

        tracing::info!(
            origin = %self.dir.display(),
            rows = table.row_count(),
            columns = table.column_count(),
            labeled = metadata.labeled_variable_count(),
            "loaded survey bundle"
        );
        Ok(LoadedDataset {
            table,
            metadata,
            stamp: SourceStamp {
                origin: self.dir.display().to_string(),
                data_sha256,
                loaded_at: Utc::now(),
            },
        })
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}
