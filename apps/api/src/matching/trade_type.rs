//! Trade-type classifier: maps a free-text job description onto a `Category`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Trade specialty of a job or provider. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Plumbing,
    Carpentry,
    Electrical,
    Construction,
    General,
}

impl Category {
    /// Every specific trade, in classifier priority order. `General` is the
    /// catch-all and is not listed.
    pub const TRADES: [Category; 4] = [
        Category::Plumbing,
        Category::Carpentry,
        Category::Electrical,
        Category::Construction,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Plumbing => "plumbing",
            Category::Carpentry => "carpentry",
            Category::Electrical => "electrical",
            Category::Construction => "construction",
            Category::General => "general",
        }
    }

    /// Whether a provider with this specialty serves a job of `job` category.
    /// A `General` job matches every specialty.
    pub fn serves(&self, job: Category) -> bool {
        job == Category::General || *self == job
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered keyword groups; the first group with any hit wins.
const KEYWORD_GROUPS: &[(Category, &[&str])] = &[
    (Category::Plumbing, &["plumb", "pipe", "water"]),
    (Category::Carpentry, &["carpent", "wood", "cabinet"]),
    (Category::Electrical, &["electr", "wiring", "outlet"]),
    (Category::Construction, &["construct", "build", "renovation"]),
];

/// Classifies a job description. Total: any input, including empty text,
/// yields a category.
pub fn classify(description: &str) -> Category {
    let lower = description.to_lowercase();

    KEYWORD_GROUPS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| lower.contains(kw)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::General)
}
