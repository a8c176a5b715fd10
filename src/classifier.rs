// file: src/classifier.rs
// description: heuristic grade-level and subject tagging from file name and path
// reference: https://docs.rs/regex

use crate::models::{GradeLevel, Subject};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeSet;
use std::path::Path;

lazy_static! {
    static ref GRADE_PATTERNS: Vec<(Regex, GradeLevel)> = vec![
        (
            Regex::new(r"elementary|\belem\b|primary|kindergarten|\bk-5\b|grade[_\s-]?[1-5]\b")
                .expect("elementary pattern is valid"),
            GradeLevel::Elementary
        ),
        (
            Regex::new(r"middle|junior|\b6-8\b|grade[_\s-]?[6-8]\b")
                .expect("middle pattern is valid"),
            GradeLevel::Middle
        ),
        (
            Regex::new(r"high|secondary|\b9-12\b|grade[_\s-]?(9|1[0-2])\b")
                .expect("high pattern is valid"),
            GradeLevel::High
        ),
        (
            Regex::new(r"college|university|undergrad").expect("college pattern is valid"),
            GradeLevel::College
        ),
    ];
    static ref SUBJECT_PATTERNS: Vec<(Regex, Subject)> = vec![
        (
            Regex::new(r"science|biolog|chemistr|physics|botany")
                .expect("science pattern is valid"),
            Subject::Science
        ),
        (
            Regex::new(r"math|algebra|geometr|calculus|arithmetic|fraction")
                .expect("math pattern is valid"),
            Subject::Math
        ),
        (
            Regex::new(r"language|english|reading|writing|literacy|grammar|vocabulary")
                .expect("language pattern is valid"),
            Subject::Language
        ),
        (
            Regex::new(r"social|history|geograph|civics|econom")
                .expect("social pattern is valid"),
            Subject::Social
        ),
        (
            Regex::new(r"agricultur|farm|garden|greenhouse|hydroponic|aquaponic|soil|crop|plant|seed|harvest|compost")
                .expect("agriculture pattern is valid"),
            Subject::Agriculture
        ),
        (
            Regex::new(r"nutrition|food|diet|cooking|recipe|health")
                .expect("nutrition pattern is valid"),
            Subject::Nutrition
        ),
        (
            Regex::new(r"environment|ecolog|climate|sustainab|conservation|recycl|ecosystem|water[_\s-]?cycle")
                .expect("environmental pattern is valid"),
            Subject::Environmental
        ),
        (
            Regex::new(r"technolog|engineer|coding|robotic|computer|sensor")
                .expect("technology pattern is valid"),
            Subject::Technology
        ),
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetTags {
    pub grade_levels: BTreeSet<GradeLevel>,
    pub subjects: BTreeSet<Subject>,
}

pub struct TagClassifier;

impl TagClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Tag a file from its base name and containing directory path only.
    /// Document body text is deliberately not consulted. Every matching
    /// pattern contributes; empty facet sets are a normal outcome.
    pub fn classify_path(&self, path: &Path) -> FacetTags {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        let parent = path
            .parent()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();

        let haystack = format!("{} {}", file_name, parent).to_lowercase();

        let mut tags = FacetTags::default();

        for (pattern, grade) in GRADE_PATTERNS.iter() {
            if pattern.is_match(&haystack) {
                tags.grade_levels.insert(*grade);
            }
        }

        for (pattern, subject) in SUBJECT_PATTERNS.iter() {
            if pattern.is_match(&haystack) {
                tags.subjects.insert(*subject);
            }
        }

        tags
    }
}

impl Default for TagClassifier {
    fn default() -> Self {
        Self::new()
    }
}
