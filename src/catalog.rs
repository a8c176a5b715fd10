// file: src/catalog.rs
// description: renders the index into a self-contained filterable HTML catalog
// reference: static artifact generation

use crate::error::{CatalogError, Result};
use crate::models::{FileType, GradeLevel, LessonRecord, Subject};
use chrono::Local;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;
use tracing::info;

const CATALOG_FILE: &str = "lesson_catalog.html";
const ALIAS_FILE: &str = "index.html";

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 2rem auto; max-width: 56rem; padding: 0 1rem; color: #222; }
header h1 { margin-bottom: 0.25rem; }
.stamp { color: #777; font-size: 0.85rem; }
.controls { display: flex; flex-wrap: wrap; gap: 0.5rem; margin: 1.25rem 0; }
.controls input, .controls select { padding: 0.4rem 0.6rem; font-size: 1rem; }
.controls input { flex: 1 1 14rem; }
.lesson { border: 1px solid #ddd; border-radius: 6px; padding: 0.9rem 1.1rem; margin-bottom: 0.8rem; }
.lesson h2 { margin: 0 0 0.3rem; font-size: 1.15rem; }
.meta { color: #666; font-size: 0.85rem; margin: 0 0 0.4rem; }
.desc { margin: 0 0 0.5rem; }
.tag { display: inline-block; border-radius: 3px; padding: 0.1rem 0.45rem; margin-right: 0.3rem; font-size: 0.78rem; }
.tag.grade { background: #e3f0ff; color: #1a5ca8; }
.tag.subject { background: #e8f6e8; color: #1e7a1e; }
.tag.keyword { background: #f3f3f3; color: #555; }
.empty { color: #888; font-style: italic; }
"#;

const SCRIPT: &str = r#"
function applyFilters() {
  const text = document.getElementById('search').value.trim().toLowerCase();
  const grade = document.getElementById('grade').value;
  const subject = document.getElementById('subject').value;
  const type = document.getElementById('type').value;
  let visible = 0;
  document.querySelectorAll('.lesson').forEach(function (card) {
    const matchesText = !text || card.dataset.text.indexOf(text) !== -1;
    const matchesGrade = grade === 'all' || card.dataset.grades.split(' ').indexOf(grade) !== -1;
    const matchesSubject = subject === 'all' || card.dataset.subjects.split(' ').indexOf(subject) !== -1;
    const matchesType = type === 'all' || card.dataset.type === type;
    const show = matchesText && matchesGrade && matchesSubject && matchesType;
    card.style.display = show ? '' : 'none';
    if (show) visible += 1;
  });
  document.getElementById('no-results').style.display = visible === 0 ? '' : 'none';
}
['search', 'grade', 'subject', 'type'].forEach(function (id) {
  const el = document.getElementById(id);
  el.addEventListener('input', applyFilters);
  el.addEventListener('change', applyFilters);
});
"#;

/// How many keywords each card shows as filter chips.
const KEYWORD_CHIP_LIMIT: usize = 3;

pub struct CatalogGenerator {
    output_dir: PathBuf,
}

impl CatalogGenerator {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    /// Write the catalog artifact and refresh the stable alias pointing
    /// at it. Regeneration over an unchanged index produces the same
    /// listing, timestamp aside.
    pub fn generate(&self, records: &[LessonRecord]) -> Result<PathBuf> {
        let html = self.render(records);

        let artifact = self.output_dir.join(CATALOG_FILE);
        let alias = self.output_dir.join(ALIAS_FILE);

        let write_err = |path: &PathBuf, e: std::io::Error| CatalogError::PersistenceWrite {
            path: path.clone(),
            source: e,
        };

        fs::write(&artifact, &html).map_err(|e| write_err(&artifact, e))?;
        fs::write(&alias, &html).map_err(|e| write_err(&alias, e))?;

        info!(
            "Catalog regenerated with {} lessons at {}",
            records.len(),
            artifact.display()
        );
        Ok(artifact)
    }

    fn render(&self, records: &[LessonRecord]) -> String {
        let mut sorted: Vec<&LessonRecord> = records.iter().collect();
        sorted.sort_by_key(|r| r.title.to_lowercase());

        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("<meta charset=\"utf-8\">\n");
        html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
        html.push_str("<title>Lesson Catalog</title>\n");
        let _ = write!(html, "<style>{}</style>\n", STYLE);
        html.push_str("</head>\n<body>\n<header>\n<h1>Lesson Catalog</h1>\n");
        let _ = write!(
            html,
            "<p class=\"stamp\">{} lessons &middot; generated {}</p>\n",
            sorted.len(),
            Local::now().format("%Y-%m-%d %H:%M")
        );
        html.push_str("</header>\n");

        html.push_str("<div class=\"controls\">\n");
        html.push_str(
            "<input id=\"search\" type=\"search\" placeholder=\"Search title, author, keywords...\">\n",
        );
        html.push_str(&facet_select(
            "grade",
            "All grades",
            GradeLevel::ALL.iter().map(|g| g.as_str()),
        ));
        html.push_str(&facet_select(
            "subject",
            "All subjects",
            Subject::ALL.iter().map(|s| s.as_str()),
        ));
        html.push_str(&facet_select(
            "type",
            "All types",
            [FileType::Pdf, FileType::Markdown].iter().map(|t| t.as_str()),
        ));
        html.push_str("</div>\n");

        html.push_str("<main id=\"lessons\">\n");
        for record in &sorted {
            html.push_str(&render_card(record));
        }
        if sorted.is_empty() {
            html.push_str("<p class=\"empty\">No lessons have been imported yet.</p>\n");
        }
        let _ = write!(
            html,
            "<p id=\"no-results\" class=\"empty\" style=\"display:none\">No lessons match the current filters.</p>\n"
        );
        html.push_str("</main>\n");

        let _ = write!(html, "<script>{}</script>\n", SCRIPT);
        html.push_str("</body>\n</html>\n");
        html
    }
}

fn facet_select<'a>(
    id: &str,
    all_label: &str,
    values: impl Iterator<Item = &'a str>,
) -> String {
    let mut select = format!("<select id=\"{}\">\n<option value=\"all\">{}</option>\n", id, all_label);
    for value in values {
        let _ = write!(select, "<option value=\"{}\">{}</option>\n", value, value);
    }
    select.push_str("</select>\n");
    select
}

fn render_card(record: &LessonRecord) -> String {
    let grades: Vec<&str> = record.grade_levels.iter().map(|g| g.as_str()).collect();
    let subjects: Vec<&str> = record.subjects.iter().map(|s| s.as_str()).collect();

    let searchable = format!(
        "{} {} {} {}",
        record.title,
        record.author,
        record.keywords.join(" "),
        record.description
    )
    .to_lowercase();

    let mut card = String::new();
    let _ = write!(
        card,
        "<article class=\"lesson\" data-grades=\"{}\" data-subjects=\"{}\" data-type=\"{}\" data-text=\"{}\">\n",
        grades.join(" "),
        subjects.join(" "),
        record.file_type.as_str(),
        html_escape(&searchable)
    );
    let _ = write!(card, "<h2>{}</h2>\n", html_escape(&record.title));

    let mut meta = format!(
        "{} &middot; {} &middot; added {}",
        html_escape(&record.author),
        record.file_type,
        record.date_added
    );
    if record.page_count > 0 {
        let _ = write!(meta, " &middot; {} pages", record.page_count);
    }
    let _ = write!(card, "<p class=\"meta\">{}</p>\n", meta);

    if !record.description.is_empty() {
        let _ = write!(card, "<p class=\"desc\">{}</p>\n", html_escape(&record.description));
    }

    for grade in &grades {
        let _ = write!(card, "<span class=\"tag grade\">{}</span>", grade);
    }
    for subject in &subjects {
        let _ = write!(card, "<span class=\"tag subject\">{}</span>", subject);
    }
    for keyword in record.keywords.iter().take(KEYWORD_CHIP_LIMIT) {
        let _ = write!(card, "<span class=\"tag keyword\">{}</span>", html_escape(keyword));
    }

    card.push_str("\n</article>\n");
    card
}

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
