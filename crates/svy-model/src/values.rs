#![deny(unsafe_code)]

use std::cmp::Ordering;
use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// A single observation in a survey column.
///
/// Numeric cells always hold finite values; non-finite input is treated as
/// unparseable and kept as text. Blank input is [`CellValue::Missing`].
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Numeric(f64),
    Text(String),
    Missing,
}

impl CellValue {
    /// Parses a raw field as read from a data file.
    ///
    /// The field is trimmed first. An empty field is missing, a finite
    /// number is numeric, anything else stays text.
    pub fn parse(raw: &str) -> CellValue {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return CellValue::Missing;
        }
        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => CellValue::Numeric(value),
            _ => CellValue::Text(trimmed.to_string()),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            CellValue::Numeric(value) => Some(*value),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    /// Integral numerics render without a decimal point; missing renders
    /// as the empty string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Numeric(value) => write!(f, "{value}"),
            CellValue::Text(text) => f.write_str(text),
            CellValue::Missing => Ok(()),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            CellValue::Numeric(value) => serializer.serialize_f64(*value),
            CellValue::Text(text) => serializer.serialize_str(text),
            CellValue::Missing => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for CellValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CellVisitor;

        impl<'de> Visitor<'de> for CellVisitor {
            type Value = CellValue;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a number, a string, or null")
            }

            fn visit_f64<E: de::Error>(self, value: f64) -> Result<CellValue, E> {
                if value.is_finite() {
                    Ok(CellValue::Numeric(value))
                } else {
                    Ok(CellValue::Missing)
                }
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<CellValue, E> {
                Ok(CellValue::Numeric(value as f64))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<CellValue, E> {
                Ok(CellValue::Numeric(value as f64))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<CellValue, E> {
                Ok(CellValue::Text(value.to_string()))
            }

            fn visit_unit<E: de::Error>(self) -> Result<CellValue, E> {
                Ok(CellValue::Missing)
            }

            fn visit_none<E: de::Error>(self) -> Result<CellValue, E> {
                Ok(CellValue::Missing)
            }

            fn visit_some<D2>(self, deserializer: D2) -> Result<CellValue, D2::Error>
            where
                D2: Deserializer<'de>,
            {
                deserializer.deserialize_any(CellVisitor)
            }
        }

        deserializer.deserialize_any(CellVisitor)
    }
}

/// Storage class of a column, inferred from its cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Numeric,
    Text,
}

impl ColumnKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Text => "text",
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordering key for grouped cell values.
///
/// Numeric keys sort before text keys; text keys sort lexicographically.
/// Numeric comparison uses [`f64::total_cmp`], which is a total order
/// because keys never hold non-finite values. Missing cells never become
/// keys, so every answer domain has one deterministic order.
#[derive(Debug, Clone)]
pub struct ValueKey(CellValue);

impl ValueKey {
    /// Returns `None` for [`CellValue::Missing`].
    pub fn new(value: &CellValue) -> Option<Self> {
        match value {
            CellValue::Missing => None,
            other => Some(Self(other.clone())),
        }
    }

    pub fn value(&self) -> &CellValue {
        &self.0
    }

    pub fn into_value(self) -> CellValue {
        self.0
    }
}

impl PartialEq for ValueKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ValueKey {}

impl PartialOrd for ValueKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ValueKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (&self.0, &other.0) {
            (CellValue::Numeric(a), CellValue::Numeric(b)) => a.total_cmp(b),
            (CellValue::Numeric(_), CellValue::Text(_)) => Ordering::Less,
            (CellValue::Text(_), CellValue::Numeric(_)) => Ordering::Greater,
            (CellValue::Text(a), CellValue::Text(b)) => a.cmp(b),
            // Missing is rejected in `new`, so these arms cannot be reached.
            (CellValue::Missing, _) | (_, CellValue::Missing) => Ordering::Equal,
        }
    }
}
