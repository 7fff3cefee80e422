use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Difficulty tier for a question batch.
///
/// The seven tiers are fixed and ordered; the service moves a session up or
/// down this ladder between batches. The client only ever adopts the tier the
/// service reports, it never reorders or invents tiers of its own.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Level {
    #[serde(rename = "Elementary School Level")]
    ElementarySchool,
    #[serde(rename = "Middle School Level")]
    MiddleSchool,
    #[default]
    #[serde(rename = "High School Level")]
    HighSchool,
    #[serde(rename = "Undergraduate Level")]
    Undergraduate,
    #[serde(rename = "Advanced Undergraduate Level")]
    AdvancedUndergraduate,
    #[serde(rename = "Graduate Level")]
    Graduate,
    #[serde(rename = "Advanced Graduate Level")]
    AdvancedGraduate,
}

impl Level {
    /// All tiers in ascending difficulty order.
    pub const ALL: [Level; 7] = [
        Level::ElementarySchool,
        Level::MiddleSchool,
        Level::HighSchool,
        Level::Undergraduate,
        Level::AdvancedUndergraduate,
        Level::Graduate,
        Level::AdvancedGraduate,
    ];

    /// The wire name, as exchanged with the question service.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Level::ElementarySchool => "Elementary School Level",
            Level::MiddleSchool => "Middle School Level",
            Level::HighSchool => "High School Level",
            Level::Undergraduate => "Undergraduate Level",
            Level::AdvancedUndergraduate => "Advanced Undergraduate Level",
            Level::Graduate => "Graduate Level",
            Level::AdvancedGraduate => "Advanced Graduate Level",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for parsing a `Level` from its wire name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown level: {raw}")]
pub struct ParseLevelError {
    raw: String,
}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| ParseLevelError { raw: s.to_string() })
    }
}
