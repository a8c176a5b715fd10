// file: src/index/store.rs
// description: durable lesson index with atomic persistence and querying
// reference: https://docs.rs/serde_json

use crate::error::{CatalogError, Result};
use crate::models::{FileType, GradeLevel, LessonRecord, Subject};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Persisted form of the index: a single human-inspectable JSON file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct IndexFile {
    records: Vec<LessonRecord>,
}

/// Conjunction of optional predicates applied by `query`.
#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub grade: Option<GradeLevel>,
    pub subject: Option<Subject>,
    pub file_type: Option<FileType>,
    pub search: Option<String>,
}

pub struct IndexStore {
    path: PathBuf,
    records: Vec<LessonRecord>,
}

impl IndexStore {
    /// Load the persisted index. A missing file is an empty index; an
    /// unparsable one is recovered as empty with a warning, so a
    /// corrupt index never takes the catalog down.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let records = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<IndexFile>(&content) {
                Ok(file) => file.records,
                Err(e) => {
                    warn!(
                        "Index {} is corrupt ({}), starting from an empty index",
                        path.display(),
                        e
                    );
                    Vec::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No index at {}, starting empty", path.display());
                Vec::new()
            }
            Err(e) => {
                warn!(
                    "Cannot read index {} ({}), starting from an empty index",
                    path.display(),
                    e
                );
                Vec::new()
            }
        };

        Self { path, records }
    }

    pub fn records(&self) -> &[LessonRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find_by_hash(&self, hash: &str) -> Option<&LessonRecord> {
        self.records.iter().find(|r| r.content_hash == hash)
    }

    /// Ids are monotonic over the life of the index: one past the
    /// highest ever observed, never reusing a value even if records
    /// were removed out-of-band.
    fn next_id(&self) -> u64 {
        self.records.iter().map(|r| r.id).max().unwrap_or(0) + 1
    }

    /// Assign the next sequence id, append, and rewrite the whole file
    /// atomically. A failed write leaves neither the file nor the
    /// in-memory collection with the new record.
    pub fn append(&mut self, mut record: LessonRecord) -> Result<LessonRecord> {
        record.id = self.next_id();
        self.records.push(record);

        if let Err(e) = self.persist() {
            self.records.pop();
            return Err(e);
        }

        Ok(self.records.last().expect("record just pushed").clone())
    }

    fn persist(&self) -> Result<()> {
        let parent = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let to_write_err = |e: std::io::Error| CatalogError::PersistenceWrite {
            path: self.path.clone(),
            source: e,
        };

        let file = IndexFile {
            records: self.records.clone(),
        };
        let json = serde_json::to_string_pretty(&file).map_err(|e| {
            CatalogError::PersistenceWrite {
                path: self.path.clone(),
                source: std::io::Error::other(e),
            }
        })?;

        let mut tmp = NamedTempFile::new_in(&parent).map_err(to_write_err)?;
        tmp.write_all(json.as_bytes()).map_err(to_write_err)?;
        tmp.as_file().sync_all().map_err(to_write_err)?;
        tmp.persist(&self.path)
            .map_err(|e| to_write_err(e.error))?;

        Ok(())
    }

    /// Records matching every supplied predicate, ordered by title,
    /// case-insensitive ascending.
    pub fn query(&self, filter: &ListFilter) -> Vec<&LessonRecord> {
        let mut matches: Vec<&LessonRecord> = self
            .records
            .iter()
            .filter(|r| {
                filter
                    .grade
                    .is_none_or(|g| r.grade_levels.contains(&g))
            })
            .filter(|r| filter.subject.is_none_or(|s| r.subjects.contains(&s)))
            .filter(|r| filter.file_type.is_none_or(|t| r.file_type == t))
            .filter(|r| {
                filter
                    .search
                    .as_deref()
                    .is_none_or(|needle| r.matches_text(needle))
            })
            .collect();

        matches.sort_by_key(|r| r.title.to_lowercase());
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::BTreeSet;
    use tempfile::TempDir;

    fn record(title: &str, hash: &str) -> LessonRecord {
        LessonRecord {
            id: 0,
            title: title.to_string(),
            author: "Unknown".to_string(),
            date_added: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            file_type: FileType::Markdown,
            size_bytes: 10,
            page_count: 0,
            content_hash: hash.to_string(),
            file_path: format!("store/markdown/{}.md", title),
            keywords: vec![],
            grade_levels: BTreeSet::new(),
            subjects: BTreeSet::new(),
            description: String::new(),
        }
    }

    #[test]
    fn test_open_missing_is_empty() {
        let temp = TempDir::new().unwrap();
        let store = IndexStore::open(temp.path().join("index.json"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_open_corrupt_recovers_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("index.json");
        fs::write(&path, "{ not json at all").unwrap();

        let store = IndexStore::open(&path);
        assert!(store.is_empty());
    }

    #[test]
    fn test_append_assigns_increasing_ids_and_persists() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("index.json");

        let mut store = IndexStore::open(&path);
        let a = store.append(record("Alpha", "h1")).unwrap();
        let b = store.append(record("Beta", "h2")).unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);

        let reloaded = IndexStore::open(&path);
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded.records()[0].id, 1);
        assert_eq!(reloaded.records()[1].id, 2);
    }

    #[test]
    fn test_ids_never_reused_after_external_removal() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("index.json");

        let mut store = IndexStore::open(&path);
        store.append(record("Alpha", "h1")).unwrap();
        store.append(record("Beta", "h2")).unwrap();

        // Simulate out-of-band removal of the first record.
        let content = fs::read_to_string(&path).unwrap();
        let mut file: IndexFile = serde_json::from_str(&content).unwrap();
        file.records.retain(|r| r.id != 1);
        fs::write(&path, serde_json::to_string(&file).unwrap()).unwrap();

        let mut store = IndexStore::open(&path);
        let c = store.append(record("Gamma", "h3")).unwrap();
        assert_eq!(c.id, 3);
    }

    #[test]
    fn test_find_by_hash() {
        let temp = TempDir::new().unwrap();
        let mut store = IndexStore::open(temp.path().join("index.json"));
        store.append(record("Alpha", "h1")).unwrap();

        assert!(store.find_by_hash("h1").is_some());
        assert!(store.find_by_hash("h2").is_none());
    }

    #[test]
    fn test_query_sorts_by_title_case_insensitive() {
        let temp = TempDir::new().unwrap();
        let mut store = IndexStore::open(temp.path().join("index.json"));
        store.append(record("banana peppers", "h1")).unwrap();
        store.append(record("Apple Orchards", "h2")).unwrap();
        store.append(record("Carrot Tops", "h3")).unwrap();

        let titles: Vec<&str> = store
            .query(&ListFilter::default())
            .iter()
            .map(|r| r.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Apple Orchards", "banana peppers", "Carrot Tops"]);
    }

    #[test]
    fn test_query_filters_are_conjunctive() {
        let temp = TempDir::new().unwrap();
        let mut store = IndexStore::open(temp.path().join("index.json"));

        let mut a = record("Bean Counting", "h1");
        a.grade_levels.insert(GradeLevel::Elementary);
        a.subjects.insert(Subject::Math);
        store.append(a).unwrap();

        let mut b = record("Bean Biology", "h2");
        b.grade_levels.insert(GradeLevel::Elementary);
        b.subjects.insert(Subject::Science);
        store.append(b).unwrap();

        let filter = ListFilter {
            grade: Some(GradeLevel::Elementary),
            subject: Some(Subject::Math),
            search: Some("bean".to_string()),
            ..Default::default()
        };
        let matches = store.query(&filter);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].title, "Bean Counting");

        let filter = ListFilter {
            grade: Some(GradeLevel::High),
            ..Default::default()
        };
        assert!(store.query(&filter).is_empty());
    }

    #[test]
    fn test_query_search_is_case_insensitive() {
        let temp = TempDir::new().unwrap();
        let mut store = IndexStore::open(temp.path().join("index.json"));
        store.append(record("Tomato Trellis", "h1")).unwrap();

        let filter = ListFilter {
            search: Some("TOMATO".to_string()),
            ..Default::default()
        };
        assert_eq!(store.query(&filter).len(), 1);
    }

    #[test]
    fn test_persisted_form_is_inspectable_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("index.json");
        let mut store = IndexStore::open(&path);
        store.append(record("Alpha", "h1")).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert!(value["records"].is_array());
        assert_eq!(value["records"][0]["title"], "Alpha");
    }
}
