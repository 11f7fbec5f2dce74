use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Blog categories shown as filter chips on the blog index
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Anxiety,
    Depression,
    Relationships,
    SelfCare,
    Therapy,
    Wellness,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid category: {0}")]
pub struct UnknownCategory(pub String);

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Anxiety,
        Category::Depression,
        Category::Relationships,
        Category::SelfCare,
        Category::Therapy,
        Category::Wellness,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Anxiety => "anxiety",
            Category::Depression => "depression",
            Category::Relationships => "relationships",
            Category::SelfCare => "self_care",
            Category::Therapy => "therapy",
            Category::Wellness => "wellness",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

// Stored as TEXT in Postgres
impl TryFrom<String> for Category {
    type Error = UnknownCategory;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
