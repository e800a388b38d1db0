use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Closed set of expense categories. The extraction backend is prompted
/// with exactly these labels; anything else it returns is folded into
/// `Other` at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Shopping,
    Dining,
    Transport,
    Entertainment,
    Services,
    Health,
    Education,
    Lending,
    Gifts,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Shopping => "shopping",
            Category::Dining => "dining",
            Category::Transport => "transport",
            Category::Entertainment => "entertainment",
            Category::Services => "services",
            Category::Health => "health",
            Category::Education => "education",
            Category::Lending => "lending",
            Category::Gifts => "gifts",
            Category::Other => "other",
        }
    }

    /// Parses a backend- or store-provided label, coercing anything outside
    /// the closed set to `Other`.
    pub fn parse_lenient(raw: &str) -> Category {
        raw.trim().to_lowercase().parse().unwrap_or(Category::Other)
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shopping" => Ok(Category::Shopping),
            "dining" => Ok(Category::Dining),
            "transport" => Ok(Category::Transport),
            "entertainment" => Ok(Category::Entertainment),
            "services" => Ok(Category::Services),
            "health" => Ok(Category::Health),
            "education" => Ok(Category::Education),
            "lending" => Ok(Category::Lending),
            "gifts" => Ok(Category::Gifts),
            "other" => Ok(Category::Other),
            other => Err(format!("unknown category: {}", other)),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
