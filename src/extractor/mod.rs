// file: src/extractor/mod.rs
// description: format-polymorphic metadata extraction dispatch
// reference: internal module structure

pub mod markdown;
pub mod pdf;

use crate::config::ExtractionConfig;
use crate::models::{FileType, MetadataDraft};
use std::path::Path;

/// Dispatches on the detected file type to one of two extraction
/// strategies. Extraction is best-effort throughout: missing metadata,
/// malformed document internals, and absent external tools degrade the
/// draft, never the import.
pub struct MetadataExtractor {
    config: ExtractionConfig,
}

impl MetadataExtractor {
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    pub fn extract(&self, file_type: FileType, path: &Path) -> MetadataDraft {
        match file_type {
            FileType::Markdown => markdown::extract(path, &self.config),
            FileType::Pdf => pdf::extract(path, &self.config),
        }
    }
}
