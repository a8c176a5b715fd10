// file: src/models/draft.rs
// description: best-effort metadata produced by extraction before classification
// reference: internal data structures

use crate::models::facets::{GradeLevel, Subject};
use std::collections::BTreeSet;

/// Partially populated metadata assembled by the extractor. Every field
/// is optional in spirit: an empty draft is a valid, non-error result.
#[derive(Debug, Clone, Default)]
pub struct MetadataDraft {
    pub title: Option<String>,
    pub author: Option<String>,
    pub page_count: u32,
    pub keywords: Vec<String>,
    pub description: String,
    /// Facets declared explicitly in document metadata (front matter).
    pub grade_levels: BTreeSet<GradeLevel>,
    pub subjects: BTreeSet<Subject>,
}

impl MetadataDraft {
    /// Title to record: the embedded title when present, the file's
    /// base name otherwise.
    pub fn resolved_title(&self, fallback_stem: &str) -> String {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| fallback_stem.to_string())
    }

    pub fn resolved_author(&self) -> String {
        self.author
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| "Unknown".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolved_title_falls_back_to_stem() {
        let draft = MetadataDraft::default();
        assert_eq!(draft.resolved_title("plant_growth_cycle"), "plant_growth_cycle");

        let draft = MetadataDraft {
            title: Some("  Understanding Plant Growth Cycles  ".to_string()),
            ..Default::default()
        };
        assert_eq!(
            draft.resolved_title("plant_growth_cycle"),
            "Understanding Plant Growth Cycles"
        );
    }

    #[test]
    fn test_blank_title_treated_as_missing() {
        let draft = MetadataDraft {
            title: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(draft.resolved_title("fallback"), "fallback");
    }

    #[test]
    fn test_resolved_author_defaults_to_unknown() {
        let draft = MetadataDraft::default();
        assert_eq!(draft.resolved_author(), "Unknown");

        let draft = MetadataDraft {
            author: Some("Ms. Rivera".to_string()),
            ..Default::default()
        };
        assert_eq!(draft.resolved_author(), "Ms. Rivera");
    }
}
