use serde::{Deserialize, Serialize};

/// Stable numeric identifier of a question category. Always positive.
pub type CategoryId = u32;

/// One entry of the category taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDescriptor {
    pub id: CategoryId,
    pub name: String,
    pub description: String,
}

impl CategoryDescriptor {
    pub fn new(id: CategoryId, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
        }
    }
}
