// file: src/models/lesson.rs
// description: core lesson record model with file type detection
// reference: internal data structures

use crate::models::facets::{GradeLevel, Subject};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Pdf,
    Markdown,
}

impl FileType {
    /// Detect the file type from the path extension. Returns None for
    /// anything outside the supported set.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref()
        {
            Some("pdf") => Some(FileType::Pdf),
            Some("md") | Some("markdown") => Some(FileType::Markdown),
            _ => None,
        }
    }

    /// Subdirectory of the artifact store that holds this type.
    pub fn storage_dir_name(&self) -> &'static str {
        match self {
            FileType::Pdf => "pdf",
            FileType::Markdown => "markdown",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Pdf => "pdf",
            FileType::Markdown => "markdown",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pdf" => Ok(FileType::Pdf),
            "markdown" | "md" => Ok(FileType::Markdown),
            other => Err(format!("unknown file type: {}", other)),
        }
    }
}

/// One entry per distinct imported document. Created exactly once at
/// import; never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonRecord {
    pub id: u64,
    pub title: String,
    pub author: String,
    pub date_added: NaiveDate,
    pub file_type: FileType,
    pub size_bytes: u64,
    pub page_count: u32,
    pub content_hash: String,
    /// Path of the stored artifact, relative to the installation root.
    pub file_path: String,
    pub keywords: Vec<String>,
    pub grade_levels: BTreeSet<GradeLevel>,
    pub subjects: BTreeSet<Subject>,
    pub description: String,
}

impl LessonRecord {
    /// Case-insensitive substring match across the free-text fields.
    pub fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.author.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
            || self
                .keywords
                .iter()
                .any(|k| k.to_lowercase().contains(&needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> LessonRecord {
        LessonRecord {
            id: 1,
            title: "Understanding Plant Growth Cycles".to_string(),
            author: "Unknown".to_string(),
            date_added: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            file_type: FileType::Markdown,
            size_bytes: 1024,
            page_count: 0,
            content_hash: "ab".repeat(32),
            file_path: "store/markdown/plant_growth_cycle.md".to_string(),
            keywords: vec!["plants".to_string(), "biology".to_string()],
            grade_levels: BTreeSet::from([GradeLevel::Elementary, GradeLevel::Middle]),
            subjects: BTreeSet::from([Subject::Science, Subject::Agriculture]),
            description: "How plants grow from seed to harvest.".to_string(),
        }
    }

    #[test]
    fn test_file_type_detection() {
        assert_eq!(FileType::from_path(Path::new("a.pdf")), Some(FileType::Pdf));
        assert_eq!(FileType::from_path(Path::new("a.PDF")), Some(FileType::Pdf));
        assert_eq!(
            FileType::from_path(Path::new("a.md")),
            Some(FileType::Markdown)
        );
        assert_eq!(
            FileType::from_path(Path::new("a.markdown")),
            Some(FileType::Markdown)
        );
        assert_eq!(FileType::from_path(Path::new("a.txt")), None);
        assert_eq!(FileType::from_path(Path::new("noext")), None);
    }

    #[test]
    fn test_matches_text_across_fields() {
        let record = sample_record();
        assert!(record.matches_text("plant"));
        assert!(record.matches_text("PLANT"));
        assert!(record.matches_text("unknown"));
        assert!(record.matches_text("biology"));
        assert!(record.matches_text("harvest"));
        assert!(!record.matches_text("calculus"));
    }

    #[test]
    fn test_record_serde_round_trip() {
        let record = sample_record();
        let json = serde_json::to_string(&record).unwrap();
        let back: LessonRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, record.id);
        assert_eq!(back.title, record.title);
        assert_eq!(back.grade_levels, record.grade_levels);
        assert_eq!(back.subjects, record.subjects);
        assert!(json.contains("\"file_type\":\"markdown\""));
    }
}
