// file: src/models/facets.rs
// description: grade-level and subject facet enumerations
// reference: internal data structures

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradeLevel {
    Elementary,
    Middle,
    High,
    College,
}

impl GradeLevel {
    pub const ALL: [GradeLevel; 4] = [
        GradeLevel::Elementary,
        GradeLevel::Middle,
        GradeLevel::High,
        GradeLevel::College,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GradeLevel::Elementary => "elementary",
            GradeLevel::Middle => "middle",
            GradeLevel::High => "high",
            GradeLevel::College => "college",
        }
    }
}

impl fmt::Display for GradeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GradeLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "elementary" => Ok(GradeLevel::Elementary),
            "middle" => Ok(GradeLevel::Middle),
            "high" => Ok(GradeLevel::High),
            "college" => Ok(GradeLevel::College),
            other => Err(format!("unknown grade level: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    Science,
    Math,
    Language,
    Social,
    Agriculture,
    Nutrition,
    Environmental,
    Technology,
}

impl Subject {
    pub const ALL: [Subject; 8] = [
        Subject::Science,
        Subject::Math,
        Subject::Language,
        Subject::Social,
        Subject::Agriculture,
        Subject::Nutrition,
        Subject::Environmental,
        Subject::Technology,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Subject::Science => "science",
            Subject::Math => "math",
            Subject::Language => "language",
            Subject::Social => "social",
            Subject::Agriculture => "agriculture",
            Subject::Nutrition => "nutrition",
            Subject::Environmental => "environmental",
            Subject::Technology => "technology",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Subject {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "science" => Ok(Subject::Science),
            "math" => Ok(Subject::Math),
            "language" => Ok(Subject::Language),
            "social" => Ok(Subject::Social),
            "agriculture" => Ok(Subject::Agriculture),
            "nutrition" => Ok(Subject::Nutrition),
            "environmental" => Ok(Subject::Environmental),
            "technology" => Ok(Subject::Technology),
            other => Err(format!("unknown subject: {}", other)),
        }
    }
}
