// file: src/extractor/markdown.rs
// description: structured-text metadata extraction from YAML front matter and body text
// reference: https://docs.rs/yaml-rust

use crate::config::ExtractionConfig;
use crate::models::{GradeLevel, MetadataDraft, Subject};
use crate::utils::Validator;
use lazy_static::lazy_static;
use pulldown_cmark::{Event, Parser};
use regex::Regex;
use std::fs;
use std::path::Path;
use tracing::debug;
use yaml_rust::{Yaml, YamlLoader};

lazy_static! {
    /// Inline `key: value` markers near the top of files without front
    /// matter, optionally wrapped in an HTML comment.
    static ref INLINE_MARKER: Regex = Regex::new(
        r"(?im)^(?:<!--\s*)?(title|author|keywords|tags|description|summary)\s*:\s*(.+?)\s*(?:-->)?\s*$"
    )
    .expect("INLINE_MARKER regex is valid");
}

/// How many leading lines are scanned for inline markers.
const INLINE_MARKER_WINDOW: usize = 20;

pub fn extract(path: &Path, config: &ExtractionConfig) -> MetadataDraft {
    let mut draft = MetadataDraft::default();

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            debug!("Cannot read {} as text: {}", path.display(), e);
            return draft;
        }
    };

    let body = match split_front_matter(&content) {
        Some((front, body)) => {
            apply_front_matter(front, &mut draft);
            body
        }
        None => {
            apply_inline_markers(&content, &mut draft);
            content.as_str()
        }
    };

    if draft.description.is_empty()
        && let Some(line) = first_body_line(body)
    {
        draft.description = inline_plain_text(line);
    }
    draft.description = Validator::truncate_text(&draft.description, config.description_max_chars);

    draft
}

/// Split `---` fenced YAML front matter from the body. Returns None
/// when the document has no leading fence.
fn split_front_matter(content: &str) -> Option<(&str, &str)> {
    if !content.starts_with("---") {
        return None;
    }

    let parts: Vec<&str> = content.splitn(3, "---").collect();
    if parts.len() < 3 {
        return None;
    }

    Some((parts[1], parts[2]))
}

fn apply_front_matter(front: &str, draft: &mut MetadataDraft) {
    let docs = match YamlLoader::load_from_str(front) {
        Ok(docs) => docs,
        Err(e) => {
            debug!("Malformed front matter, skipping: {}", e);
            return;
        }
    };

    let Some(Yaml::Hash(hash)) = docs.first() else {
        return;
    };

    for (key, value) in hash {
        let Yaml::String(key) = key else { continue };

        match key.to_lowercase().as_str() {
            "title" => draft.title = scalar_value(value),
            "author" => draft.author = scalar_value(value),
            "keywords" | "tags" => draft.keywords = list_values(value),
            "description" | "summary" => {
                draft.description = scalar_value(value).unwrap_or_default()
            }
            "grade_levels" | "grades" => {
                draft.grade_levels = list_values(value)
                    .iter()
                    .filter_map(|v| v.parse::<GradeLevel>().ok())
                    .collect()
            }
            "subjects" => {
                draft.subjects = list_values(value)
                    .iter()
                    .filter_map(|v| v.parse::<Subject>().ok())
                    .collect()
            }
            _ => {}
        }
    }
}

fn scalar_value(value: &Yaml) -> Option<String> {
    match value {
        Yaml::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Yaml::Integer(i) => Some(i.to_string()),
        _ => None,
    }
}

/// Front-matter lists arrive either as YAML sequences or as a single
/// comma-separated string; both forms are accepted, order preserved.
fn list_values(value: &Yaml) -> Vec<String> {
    match value {
        Yaml::Array(items) => items
            .iter()
            .filter_map(scalar_value)
            .flat_map(|s| split_csv(&s))
            .collect(),
        Yaml::String(s) => split_csv(s),
        _ => Vec::new(),
    }
}

fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

fn apply_inline_markers(content: &str, draft: &mut MetadataDraft) {
    let window: String = content
        .lines()
        .take(INLINE_MARKER_WINDOW)
        .collect::<Vec<_>>()
        .join("\n");

    for captures in INLINE_MARKER.captures_iter(&window) {
        let key = captures[1].to_lowercase();
        let value = captures[2].trim().to_string();
        if value.is_empty() {
            continue;
        }

        match key.as_str() {
            "title" if draft.title.is_none() => draft.title = Some(value),
            "author" if draft.author.is_none() => draft.author = Some(value),
            "keywords" | "tags" if draft.keywords.is_empty() => {
                draft.keywords = split_csv(&value)
            }
            "description" | "summary" if draft.description.is_empty() => {
                draft.description = value
            }
            _ => {}
        }
    }
}

/// First non-empty body line that is not a heading, quote, or code
/// fence. Fence state is tracked so fenced content is skipped too.
fn first_body_line(body: &str) -> Option<&str> {
    let mut in_fence = false;

    for line in body.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence || trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with('#') || trimmed.starts_with('>') || trimmed.starts_with("<!--") {
            continue;
        }
        return Some(trimmed);
    }

    None
}

/// Render one line of markdown as plain text, dropping emphasis and
/// link syntax.
fn inline_plain_text(line: &str) -> String {
    let mut text = String::new();
    for event in Parser::new(line) {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            _ => {}
        }
    }
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;
    use tempfile::TempDir;

    fn extract_str(content: &str) -> MetadataDraft {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("lesson.md");
        fs::write(&path, content).unwrap();
        extract(&path, &Config::default_config().extraction)
    }

    #[test]
    fn test_front_matter_fields() {
        let draft = extract_str(
            "---\n\
             title: Understanding Plant Growth Cycles\n\
             author: Ms. Rivera\n\
             keywords: plants, biology, growth\n\
             description: Seed to harvest in six weeks.\n\
             ---\n\n\
             Body text here.",
        );

        assert_eq!(draft.title.as_deref(), Some("Understanding Plant Growth Cycles"));
        assert_eq!(draft.author.as_deref(), Some("Ms. Rivera"));
        assert_eq!(draft.keywords, vec!["plants", "biology", "growth"]);
        assert_eq!(draft.description, "Seed to harvest in six weeks.");
    }

    #[test]
    fn test_front_matter_explicit_facets() {
        let draft = extract_str(
            "---\n\
             title: Understanding Plant Growth Cycles\n\
             grade_levels: elementary, middle\n\
             subjects: science, agriculture\n\
             ---\n\n\
             Body.",
        );

        assert_eq!(
            draft.grade_levels,
            BTreeSet::from([GradeLevel::Elementary, GradeLevel::Middle])
        );
        assert_eq!(
            draft.subjects,
            BTreeSet::from([Subject::Science, Subject::Agriculture])
        );
    }

    #[test]
    fn test_front_matter_yaml_list_facets() {
        let draft = extract_str(
            "---\n\
             grades:\n\
             - high\n\
             - college\n\
             tags:\n\
             - chemistry\n\
             - lab safety\n\
             ---\n\
             Body.",
        );

        assert_eq!(
            draft.grade_levels,
            BTreeSet::from([GradeLevel::High, GradeLevel::College])
        );
        assert_eq!(draft.keywords, vec!["chemistry", "lab safety"]);
    }

    #[test]
    fn test_unknown_facet_values_ignored() {
        let draft = extract_str("---\ngrade_levels: elementary, preschool\n---\nBody.");
        assert_eq!(draft.grade_levels, BTreeSet::from([GradeLevel::Elementary]));
    }

    #[test]
    fn test_inline_markers_without_front_matter() {
        let draft = extract_str(
            "<!-- title: Compost Chemistry -->\n\
             <!-- tags: compost, nitrogen -->\n\n\
             # Compost Chemistry\n\n\
             Balancing carbon and nitrogen.",
        );

        assert_eq!(draft.title.as_deref(), Some("Compost Chemistry"));
        assert_eq!(draft.keywords, vec!["compost", "nitrogen"]);
        assert_eq!(draft.description, "Balancing carbon and nitrogen.");
    }

    #[test]
    fn test_description_fallback_skips_structure() {
        let draft = extract_str(
            "# Heading\n\n\
             > a pull quote\n\n\
             ```\ncode sample\n```\n\n\
             The **first** real paragraph line.",
        );

        assert_eq!(draft.description, "The first real paragraph line.");
    }

    #[test]
    fn test_description_truncated_to_limit() {
        let long_line = "x".repeat(300);
        let draft = extract_str(&format!("---\ntitle: T\n---\n\n{}", long_line));

        assert_eq!(draft.description.len(), 203);
        assert!(draft.description.ends_with("..."));
    }

    #[test]
    fn test_malformed_front_matter_degrades() {
        let draft = extract_str("---\ntitle: [unclosed\n---\n\nStill get a description.");
        assert!(draft.title.is_none());
        assert_eq!(draft.description, "Still get a description.");
    }

    #[test]
    fn test_empty_file_yields_empty_draft() {
        let draft = extract_str("");
        assert!(draft.title.is_none());
        assert!(draft.keywords.is_empty());
        assert!(draft.description.is_empty());
    }
}
