// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{CatalogError, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub storage: StorageConfig,
    pub extraction: ExtractionConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Installation root; every other path is resolved beneath it.
    pub root: PathBuf,
    pub store_dir: String,
    pub index_file: String,
    pub catalog_dir: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExtractionConfig {
    pub description_max_chars: usize,
    /// Page-document text extraction reads this many leading pages.
    pub pdf_text_pages: u32,
    pub tool_timeout_secs: u64,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("LESSON_CATALOG")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| CatalogError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| CatalogError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            storage: StorageConfig {
                root: PathBuf::from("./library"),
                store_dir: "store".to_string(),
                index_file: "index.json".to_string(),
                catalog_dir: "catalog".to_string(),
            },
            extraction: ExtractionConfig {
                description_max_chars: 200,
                pdf_text_pages: 2,
                tool_timeout_secs: 10,
            },
        }
    }

    pub fn store_root(&self) -> PathBuf {
        self.storage.root.join(&self.storage.store_dir)
    }

    pub fn index_path(&self) -> PathBuf {
        self.storage.root.join(&self.storage.index_file)
    }

    pub fn catalog_root(&self) -> PathBuf {
        self.storage.root.join(&self.storage.catalog_dir)
    }

    fn validate(&self) -> Result<()> {
        if self.storage.root.as_os_str().is_empty() {
            return Err(CatalogError::Config(
                "storage.root must not be empty".to_string(),
            ));
        }

        if self.extraction.description_max_chars == 0 {
            return Err(CatalogError::Config(
                "description_max_chars must be greater than 0".to_string(),
            ));
        }

        if self.extraction.pdf_text_pages == 0 {
            return Err(CatalogError::Config(
                "pdf_text_pages must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
