// file: src/pipeline/orchestrator.rs
// description: sequences hash, extract, classify, place, and persist for imports
// reference: single-writer ingestion workflow

use crate::catalog::CatalogGenerator;
use crate::classifier::TagClassifier;
use crate::config::Config;
use crate::error::{CatalogError, Result};
use crate::extractor::MetadataExtractor;
use crate::hasher;
use crate::index::{IndexStore, ListFilter};
use crate::models::{FileType, LessonRecord};
use crate::pipeline::progress::{BatchStats, batch_progress_bar};
use crate::utils::Validator;
use chrono::Local;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Terminal outcome of a single-file import. Duplicate content is a
/// recognized result, not a failure.
#[derive(Debug, Clone)]
pub enum ImportOutcome {
    Imported(LessonRecord),
    Duplicate { existing_title: String },
}

pub struct Orchestrator {
    config: Config,
    extractor: MetadataExtractor,
    classifier: TagClassifier,
    index: IndexStore,
    catalog: CatalogGenerator,
}

impl Orchestrator {
    pub fn new(config: Config) -> Result<Self> {
        for file_type in [FileType::Pdf, FileType::Markdown] {
            fs::create_dir_all(config.store_root().join(file_type.storage_dir_name()))?;
        }

        let index = IndexStore::open(config.index_path());
        let catalog = CatalogGenerator::new(config.catalog_root())?;

        let orchestrator = Self {
            extractor: MetadataExtractor::new(config.extraction.clone()),
            classifier: TagClassifier::new(),
            index,
            catalog,
            config,
        };
        orchestrator.reconcile_artifacts();
        Ok(orchestrator)
    }

    pub fn index(&self) -> &IndexStore {
        &self.index
    }

    pub fn list(&self, filter: &ListFilter) -> Vec<&LessonRecord> {
        self.index.query(filter)
    }

    /// Import one file and refresh the catalog view.
    pub fn import_file(&mut self, source: &Path, copy: bool) -> Result<ImportOutcome> {
        let outcome = self.ingest(source, copy)?;
        self.refresh_catalog()?;
        Ok(outcome)
    }

    /// Import every eligible file beneath a directory, isolating
    /// per-file failures, then regenerate the catalog exactly once.
    pub fn import_directory(&mut self, dir: &Path, copy: bool) -> Result<BatchStats> {
        Validator::validate_directory(dir)?;

        let eligible: Vec<PathBuf> = WalkDir::new(dir)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| FileType::from_path(e.path()).is_some())
            .map(|e| e.into_path())
            .collect();

        info!("Found {} eligible files in {}", eligible.len(), dir.display());

        let mut stats = BatchStats::new();
        let bar = batch_progress_bar(eligible.len() as u64);

        for path in eligible {
            bar.set_message(
                path.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            );

            match self.ingest(&path, copy) {
                Ok(ImportOutcome::Imported(record)) => {
                    stats.imported += 1;
                    debug!("Imported '{}' (id {})", record.title, record.id);
                }
                Ok(ImportOutcome::Duplicate { existing_title }) => {
                    stats.duplicates += 1;
                    info!(
                        "Skipping {}: already exists as '{}'",
                        path.display(),
                        existing_title
                    );
                }
                Err(e) => {
                    stats.failed += 1;
                    warn!("Failed to import {}: {}", path.display(), e);
                }
            }
            bar.inc(1);
        }

        bar.finish_and_clear();
        self.refresh_catalog()?;

        info!("Batch import complete: {}", stats.summary());
        Ok(stats)
    }

    pub fn refresh_catalog(&self) -> Result<PathBuf> {
        self.catalog.generate(self.index.records())
    }

    /// The import state machine for one file. Artifact placement comes
    /// before the index append; a failed append rolls the placement
    /// back so the two stay in lock-step.
    fn ingest(&mut self, source: &Path, copy: bool) -> Result<ImportOutcome> {
        let file_type = FileType::from_path(source).ok_or_else(|| {
            CatalogError::UnsupportedFileType {
                path: source.to_path_buf(),
            }
        })?;

        Validator::validate_source_file(source)?;
        let content_hash = hasher::hash_file(source)?;

        if let Some(existing) = self.index.find_by_hash(&content_hash) {
            return Ok(ImportOutcome::Duplicate {
                existing_title: existing.title.clone(),
            });
        }

        let size_bytes = fs::metadata(source)
            .map_err(|e| CatalogError::FileUnreadable {
                path: source.to_path_buf(),
                source: e,
            })?
            .len();

        let draft = self.extractor.extract(file_type, source);
        let tags = self.classifier.classify_path(source);

        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "untitled".to_string());

        let mut record = LessonRecord {
            id: 0,
            title: draft.resolved_title(&stem),
            author: draft.resolved_author(),
            date_added: Local::now().date_naive(),
            file_type,
            size_bytes,
            page_count: draft.page_count,
            content_hash,
            file_path: String::new(),
            keywords: draft.keywords,
            grade_levels: &draft.grade_levels | &tags.grade_levels,
            subjects: &draft.subjects | &tags.subjects,
            description: draft.description,
        };

        let dest = self.place_artifact(source, file_type, copy)?;
        record.file_path = self.relative_store_path(&dest);

        match self.index.append(record) {
            Ok(record) => Ok(ImportOutcome::Imported(record)),
            Err(e) => {
                self.rollback_placement(source, &dest, copy);
                Err(e)
            }
        }
    }

    /// Move (or copy) the source into the type-partitioned store. A
    /// same-named artifact gets a timestamp suffix; this guards file
    /// name clashes only, independent of content deduplication.
    fn place_artifact(&self, source: &Path, file_type: FileType, copy: bool) -> Result<PathBuf> {
        let dir = self.config.store_root().join(file_type.storage_dir_name());
        let name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "untitled".to_string());

        let dest = unique_destination(&dir, &name);

        let placement_err = |e: std::io::Error| CatalogError::ArtifactPlacement {
            path: dest.clone(),
            source: e,
        };

        if copy {
            fs::copy(source, &dest).map_err(placement_err)?;
        } else if fs::rename(source, &dest).is_err() {
            // Rename fails across filesystems; fall back to copy+remove.
            fs::copy(source, &dest).map_err(placement_err)?;
            fs::remove_file(source).map_err(placement_err)?;
        }

        Ok(dest)
    }

    fn rollback_placement(&self, source: &Path, dest: &Path, copy: bool) {
        let undo = if copy {
            fs::remove_file(dest)
        } else {
            fs::rename(dest, source)
        };

        if let Err(e) = undo {
            warn!(
                "Could not roll back artifact placement {}: {}",
                dest.display(),
                e
            );
        }
    }

    fn relative_store_path(&self, dest: &Path) -> String {
        dest.strip_prefix(&self.config.storage.root)
            .unwrap_or(dest)
            .to_string_lossy()
            .replace('\\', "/")
    }

    /// Warn-only sweep comparing the artifact store against the index:
    /// artifacts with no record (orphans from an interrupted import)
    /// and records whose artifact is missing.
    fn reconcile_artifacts(&self) {
        let indexed: HashSet<&str> = self
            .index
            .records()
            .iter()
            .map(|r| r.file_path.as_str())
            .collect();

        for entry in WalkDir::new(self.config.store_root())
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let relative = self.relative_store_path(entry.path());
            if !indexed.contains(relative.as_str()) {
                warn!("Orphaned artifact not in index: {}", relative);
            }
        }

        for record in self.index.records() {
            if !self.config.storage.root.join(&record.file_path).is_file() {
                warn!(
                    "Record {} ('{}') points at a missing artifact: {}",
                    record.id, record.title, record.file_path
                );
            }
        }
    }
}

/// Pick a destination that does not collide with an existing artifact,
/// suffixing the stem with a timestamp (and a counter within the same
/// second) when needed.
fn unique_destination(dir: &Path, name: &str) -> PathBuf {
    let dest = dir.join(name);
    if !dest.exists() {
        return dest;
    }

    let (stem, ext) = match name.rsplit_once('.') {
        Some((stem, ext)) => (stem.to_string(), format!(".{}", ext)),
        None => (name.to_string(), String::new()),
    };

    let stamp = Local::now().format("%Y%m%d%H%M%S");
    let mut candidate = dir.join(format!("{}_{}{}", stem, stamp, ext));
    let mut counter = 1;

    while candidate.exists() {
        candidate = dir.join(format!("{}_{}_{}{}", stem, stamp, counter, ext));
        counter += 1;
    }

    candidate
}
