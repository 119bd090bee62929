use std::collections::{BTreeMap, BTreeSet};

use svy_model::{CategoryDescriptor, CategoryId, Result, SurveyError};

/// How one rule recognizes variable identifiers.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Exact membership in a fixed identifier set.
    Exact(BTreeSet<String>),
    /// The identifier starts with `prefix` and the digits right after it
    /// read as an index in `min..=max`. Anything after the digits is
    /// ignored, so `Q_23_O5` matches a `Q_` rule covering index 23.
    IndexRange { prefix: String, min: u32, max: u32 },
}

impl Matcher {
    pub fn exact<I, S>(identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Matcher::Exact(identifiers.into_iter().map(Into::into).collect())
    }

    pub fn index_range(prefix: impl Into<String>, min: u32, max: u32) -> Self {
        Matcher::IndexRange {
            prefix: prefix.into(),
            min,
            max,
        }
    }

    pub fn matches(&self, identifier: &str) -> bool {
        match self {
            Matcher::Exact(identifiers) => identifiers.contains(identifier),
            Matcher::IndexRange { prefix, min, max } => {
                match identifier.strip_prefix(prefix.as_str()) {
                    Some(rest) => {
                        leading_index(rest).is_some_and(|index| index >= *min && index <= *max)
                    }
                    None => false,
                }
            }
        }
    }
}

/// The run of digits at the start of `rest`, if any.
fn leading_index(rest: &str) -> Option<u32> {
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        None
    } else {
        rest[..end].parse().ok()
    }
}

/// Routes matching identifiers to one category.
#[derive(Debug, Clone)]
pub struct CategoryRule {
    pub matcher: Matcher,
    pub category: CategoryId,
}

impl CategoryRule {
    pub fn new(matcher: Matcher, category: CategoryId) -> Self {
        Self { matcher, category }
    }
}

/// An ordered classification scheme for survey variables.
///
/// Rules are tried in declaration order and the first match wins, so a
/// scheme may layer a specific rule over a broader one. Identifiers no
/// rule matches are uncategorized, which is not an error.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    categories: Vec<CategoryDescriptor>,
    by_id: BTreeMap<CategoryId, usize>,
    rules: Vec<CategoryRule>,
}

impl Taxonomy {
    /// Validates and builds a scheme: category ids must be positive and
    /// unique, and every rule must point at a declared category.
    pub fn new(categories: Vec<CategoryDescriptor>, rules: Vec<CategoryRule>) -> Result<Self> {
        for category in &categories {
            if category.id == 0 {
                return Err(SurveyError::Taxonomy {
                    message: format!("category '{}' has id 0; ids start at 1", category.name),
                });
            }
        }
        let by_id = index_categories(&categories);
        if by_id.len() != categories.len() {
            let duplicate = categories
                .iter()
                .enumerate()
                .find(|(position, category)| by_id.get(&category.id) != Some(position))
                .map(|(_, category)| category.id)
                .unwrap_or_default();
            return Err(SurveyError::Taxonomy {
                message: format!("duplicate category id {duplicate}"),
            });
        }
        for rule in &rules {
            if !by_id.contains_key(&rule.category) {
                return Err(SurveyError::Taxonomy {
                    message: format!("rule points at unknown category {}", rule.category),
                });
            }
        }
        Ok(Self {
            categories,
            by_id,
            rules,
        })
    }

    /// Builds without validating. Callers guarantee the invariants that
    /// `new` checks.
    pub(crate) fn from_validated_parts(
        categories: Vec<CategoryDescriptor>,
        rules: Vec<CategoryRule>,
    ) -> Self {
        let by_id = index_categories(&categories);
        Self {
            categories,
            by_id,
            rules,
        }
    }

    /// Categories in their declared order.
    pub fn categories(&self) -> &[CategoryDescriptor] {
        &self.categories
    }

    pub fn category(&self, id: CategoryId) -> Option<&CategoryDescriptor> {
        self.by_id.get(&id).map(|&position| &self.categories[position])
    }

    pub fn contains(&self, id: CategoryId) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    /// The category of `identifier` under the first matching rule.
    pub fn category_for(&self, identifier: &str) -> Option<&CategoryDescriptor> {
        self.rules
            .iter()
            .find(|rule| rule.matcher.matches(identifier))
            .and_then(|rule| self.category(rule.category))
    }
}

/// First position per id; collisions keep the earliest entry so `new` can
/// report the duplicate.
fn index_categories(categories: &[CategoryDescriptor]) -> BTreeMap<CategoryId, usize> {
    let mut by_id = BTreeMap::new();
    for (position, category) in categories.iter().enumerate() {
        by_id.entry(category.id).or_insert(position);
    }
    by_id
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: CategoryId, name: &str) -> CategoryDescriptor {
        CategoryDescriptor::new(id, name, format!("{name} questions"))
    }

    #[test]
    fn exact_matcher_is_literal() {
        let matcher = Matcher::exact(["SEXO", "EDAD"]);
        assert!(matcher.matches("SEXO"));
        assert!(!matcher.matches("sexo"));
        assert!(!matcher.matches("SEXO2"));
    }

    #[test]
    fn index_range_reads_digits_after_the_prefix() {
        let matcher = Matcher::index_range("Q_", 22, 31);
        assert!(matcher.matches("Q_22"));
        assert!(matcher.matches("Q_23_O5"));
        assert!(matcher.matches("Q_31"));
        assert!(!matcher.matches("Q_21"));
        assert!(!matcher.matches("Q_32"));
        assert!(!matcher.matches("T_Q_25_1"));
        assert!(!matcher.matches("Q_"));
        assert!(!matcher.matches("Q_X"));
    }

    #[test]
    fn first_matching_rule_wins() {
        let taxonomy = Taxonomy::new(
            vec![category(1, "Specific"), category(2, "Broad")],
            vec![
                CategoryRule::new(Matcher::index_range("Q_", 5, 5), 1),
                CategoryRule::new(Matcher::index_range("Q_", 1, 10), 2),
            ],
        )
        .unwrap();
        assert_eq!(taxonomy.category_for("Q_5").map(|c| c.id), Some(1));
        assert_eq!(taxonomy.category_for("Q_6").map(|c| c.id), Some(2));
        assert_eq!(taxonomy.category_for("Q_11"), None);
    }

    #[test]
    fn zero_ids_are_rejected() {
        let err = Taxonomy::new(vec![category(0, "Broken")], Vec::new()).unwrap_err();
        assert!(matches!(err, SurveyError::Taxonomy { .. }));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = Taxonomy::new(
            vec![category(3, "One"), category(3, "Two")],
            Vec::new(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate category id 3"));
    }

    #[test]
    fn rules_must_reference_declared_categories() {
        let err = Taxonomy::new(
            vec![category(1, "Only")],
            vec![CategoryRule::new(Matcher::exact(["SEXO"]), 9)],
        )
        .unwrap_err();
        assert!(err.to_string().contains("unknown category 9"));
    }
}
