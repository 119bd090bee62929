use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::filter::{AgeRange, FilterKey};
use crate::values::CellValue;

/// Which metric a distribution reports per answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricMode {
    Count,
    Percentage,
}

impl MetricMode {
    pub fn as_str(self) -> &'static str {
        match self {
            MetricMode::Count => "count",
            MetricMode::Percentage => "percentage",
        }
    }
}

impl fmt::Display for MetricMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The metric of one answer group: an absolute count or a two-decimal
/// share of the non-missing total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Count(u64),
    Percentage(f64),
}

impl MetricValue {
    pub fn as_count(self) -> Option<u64> {
        match self {
            MetricValue::Count(count) => Some(count),
            MetricValue::Percentage(_) => None,
        }
    }

    pub fn as_percentage(self) -> Option<f64> {
        match self {
            MetricValue::Percentage(share) => Some(share),
            MetricValue::Count(_) => None,
        }
    }
}

/// One answer group of a distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionEntry {
    pub value: CellValue,
    /// The label of `value`, or its display form when unlabeled.
    pub label: String,
    pub metric: MetricValue,
}

/// The filter value that was actually applied for one key.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AppliedValue {
    Scalar(f64),
    Range(AgeRange),
}

impl fmt::Display for AppliedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppliedValue::Scalar(code) => write!(f, "{code}"),
            AppliedValue::Range(range) => match (range.min, range.max) {
                (Some(min), Some(max)) => write!(f, "{min}..={max}"),
                (Some(min), None) => write!(f, "{min}.."),
                (None, Some(max)) => write!(f, "..={max}"),
                (None, None) => f.write_str(".."),
            },
        }
    }
}

/// Echo of the filters that actually narrowed (or, for an unbounded age
/// range, at least touched) the respondent base. Requested filters whose
/// column is absent from the dataset are not echoed.
pub type AppliedFilters = BTreeMap<FilterKey, AppliedValue>;

/// A frequency or percentage distribution of one question's answers.
///
/// Entries are ordered numeric-before-text with numerics ascending, and
/// `total` counts the non-missing responses that survived filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    pub identifier: String,
    pub text: String,
    pub mode: MetricMode,
    pub entries: Vec<DistributionEntry>,
    pub total: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied: Option<AppliedFilters>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_values_serialize_untagged() {
        assert_eq!(serde_json::to_string(&MetricValue::Count(7)).unwrap(), "7");
        assert_eq!(
            serde_json::to_string(&MetricValue::Percentage(33.33)).unwrap(),
            "33.33"
        );
    }

    #[test]
    fn applied_filters_serialize_as_a_keyed_map() {
        let mut applied = AppliedFilters::new();
        applied.insert(FilterKey::Sex, AppliedValue::Scalar(1.0));
        applied.insert(
            FilterKey::Age,
            AppliedValue::Range(AgeRange::new(Some(18.0), Some(29.0))),
        );
        let json = serde_json::to_string(&applied).unwrap();
        assert_eq!(json, r#"{"sex":1.0,"age":{"min":18.0,"max":29.0}}"#);
        let back: AppliedFilters = serde_json::from_str(&json).unwrap();
        assert_eq!(back, applied);
    }

    #[test]
    fn applied_values_display_compactly() {
        assert_eq!(AppliedValue::Scalar(1.0).to_string(), "1");
        assert_eq!(
            AppliedValue::Range(AgeRange::new(Some(18.0), Some(29.0))).to_string(),
            "18..=29"
        );
        assert_eq!(
            AppliedValue::Range(AgeRange::new(Some(60.0), None)).to_string(),
            "60.."
        );
        assert_eq!(AppliedValue::Range(AgeRange::default()).to_string(), "..");
    }

    #[test]
    fn absent_applied_block_is_omitted() {
        let distribution = Distribution {
            identifier: "SEXO".to_string(),
            text: "Sexo".to_string(),
            mode: MetricMode::Count,
            entries: Vec::new(),
            total: 0,
            applied: None,
        };
        let json = serde_json::to_string(&distribution).unwrap();
        assert!(!json.contains("applied"));
    }
}
