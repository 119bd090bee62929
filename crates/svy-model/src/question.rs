use serde::{Deserialize, Serialize};

use crate::category::CategoryDescriptor;
use crate::values::CellValue;

/// One labeled answer code of a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub value: CellValue,
    pub label: String,
}

/// An answerable survey question: a data column that carries question text.
///
/// Columns without a label (folios, weights, free-text remnants) are not
/// questions and never appear in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Column name in the dataset, e.g. `Q_1` or `SEXO`.
    pub identifier: String,
    /// Human-readable question text.
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryDescriptor>,
    /// Labeled answer codes in their defined order; empty for open answers.
    pub options: Vec<AnswerOption>,
}
