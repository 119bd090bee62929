use std::path::PathBuf;

use thiserror::Error;

use crate::category::CategoryId;

/// Errors shared across the survey crates.
#[derive(Debug, Error)]
pub enum SurveyError {
    /// The bundle directory or its responses file does not exist.
    #[error("survey bundle not found: {path}")]
    BundleNotFound { path: PathBuf },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {message}")]
    Csv { path: PathBuf, message: String },

    #[error("invalid survey bundle file {path}: {message}")]
    Invalid { path: PathBuf, message: String },

    #[error("duplicate column '{name}' in survey data")]
    DuplicateColumn { name: String },

    #[error("column '{name}' has {actual} rows, expected {expected}")]
    ColumnLengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// The requested identifier names no column in the dataset.
    #[error("question '{id}' not found")]
    QuestionNotFound { id: String },

    /// The requested category id is not part of the taxonomy.
    #[error("category {id} not found")]
    CategoryNotFound { id: CategoryId },

    #[error("invalid taxonomy: {message}")]
    Taxonomy { message: String },
}

impl SurveyError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SurveyError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn csv(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        SurveyError::Csv {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn invalid(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        SurveyError::Invalid {
            path: path.into(),
            message: message.into(),
        }
    }

    /// True when the caller asked for something that does not exist, as
    /// opposed to the dataset or its storage being broken.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            SurveyError::QuestionNotFound { .. } | SurveyError::CategoryNotFound { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, SurveyError>;
