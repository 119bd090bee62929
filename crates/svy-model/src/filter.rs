use std::fmt;

use serde::{Deserialize, Serialize};

/// The demographic dimensions a distribution can be restricted by.
///
/// The declaration order is the canonical application order, though the
/// result never depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKey {
    QualityOfLife,
    Municipality,
    Sex,
    Education,
    Socioeconomic,
    Age,
}

impl FilterKey {
    pub const ALL: [FilterKey; 6] = [
        FilterKey::QualityOfLife,
        FilterKey::Municipality,
        FilterKey::Sex,
        FilterKey::Education,
        FilterKey::Socioeconomic,
        FilterKey::Age,
    ];

    /// The keys that match one exact code; age is the lone range key.
    pub const SCALARS: [FilterKey; 5] = [
        FilterKey::QualityOfLife,
        FilterKey::Municipality,
        FilterKey::Sex,
        FilterKey::Education,
        FilterKey::Socioeconomic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FilterKey::QualityOfLife => "quality_of_life",
            FilterKey::Municipality => "municipality",
            FilterKey::Sex => "sex",
            FilterKey::Education => "education",
            FilterKey::Socioeconomic => "socioeconomic",
            FilterKey::Age => "age",
        }
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive age bounds. Either side may be open; both open means the
/// range restricts nothing while still counting as a requested filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AgeRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl AgeRange {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    pub fn contains(&self, age: f64) -> bool {
        self.min.is_none_or(|min| age >= min) && self.max.is_none_or(|max| age <= max)
    }
}

/// A requested restriction of the respondent base. Every dimension is
/// optional; an all-`None` spec filters nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub quality_of_life: Option<f64>,
    pub municipality: Option<f64>,
    pub sex: Option<f64>,
    pub education: Option<f64>,
    pub socioeconomic: Option<f64>,
    pub age: Option<AgeRange>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quality_of_life(mut self, code: f64) -> Self {
        self.quality_of_life = Some(code);
        self
    }

    pub fn with_municipality(mut self, code: f64) -> Self {
        self.municipality = Some(code);
        self
    }

    pub fn with_sex(mut self, code: f64) -> Self {
        self.sex = Some(code);
        self
    }

    pub fn with_education(mut self, code: f64) -> Self {
        self.education = Some(code);
        self
    }

    pub fn with_socioeconomic(mut self, code: f64) -> Self {
        self.socioeconomic = Some(code);
        self
    }

    pub fn with_age(mut self, range: AgeRange) -> Self {
        self.age = Some(range);
        self
    }

    /// The requested code for a scalar key; always `None` for age.
    pub fn scalar(&self, key: FilterKey) -> Option<f64> {
        match key {
            FilterKey::QualityOfLife => self.quality_of_life,
            FilterKey::Municipality => self.municipality,
            FilterKey::Sex => self.sex,
            FilterKey::Education => self.education,
            FilterKey::Socioeconomic => self.socioeconomic,
            FilterKey::Age => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        FilterKey::SCALARS.iter().all(|&key| self.scalar(key).is_none()) && self.age.is_none()
    }
}
