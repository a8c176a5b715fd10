// file: src/utils/validation.rs
// description: input validation helpers and text truncation
// reference: input validation patterns

use crate::error::{CatalogError, Result};
use std::path::Path;

pub struct Validator;

impl Validator {
    pub fn validate_directory(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(CatalogError::Validation(format!(
                "Directory does not exist: {}",
                path.display()
            )));
        }

        if !path.is_dir() {
            return Err(CatalogError::Validation(format!(
                "Path is not a directory: {}",
                path.display()
            )));
        }

        Ok(())
    }

    pub fn validate_source_file(path: &Path) -> Result<()> {
        if !path.is_file() {
            return Err(CatalogError::FileUnreadable {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not a regular file"),
            });
        }
        Ok(())
    }

    /// Truncate to at most `max_chars` characters, appending an ellipsis
    /// when anything was cut. Counts characters, not bytes, so multibyte
    /// text never splits mid-character.
    pub fn truncate_text(text: &str, max_chars: usize) -> String {
        if text.chars().count() <= max_chars {
            return text.to_string();
        }
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_validate_directory() {
        let temp = TempDir::new().unwrap();
        assert!(Validator::validate_directory(temp.path()).is_ok());
        assert!(Validator::validate_directory(Path::new("/nonexistent")).is_err());

        let file = temp.path().join("f.md");
        fs::write(&file, "x").unwrap();
        assert!(Validator::validate_directory(&file).is_err());
    }

    #[test]
    fn test_validate_source_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("f.md");
        fs::write(&file, "x").unwrap();

        assert!(Validator::validate_source_file(&file).is_ok());
        assert!(Validator::validate_source_file(temp.path()).is_err());
        assert!(matches!(
            Validator::validate_source_file(Path::new("/nonexistent/f.md")),
            Err(CatalogError::FileUnreadable { .. })
        ));
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(Validator::truncate_text("short", 10), "short");
        assert_eq!(
            Validator::truncate_text("this is a very long text", 10),
            "this is a ..."
        );
    }

    #[test]
    fn test_truncate_text_multibyte_safe() {
        let text = "ß".repeat(10);
        let truncated = Validator::truncate_text(&text, 5);
        assert_eq!(truncated, format!("{}...", "ß".repeat(5)));
    }
}
