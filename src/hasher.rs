// file: src/hasher.rs
// description: content-addressed file fingerprinting for deduplication
// reference: https://docs.rs/sha2

use crate::error::{CatalogError, Result};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const CHUNK_SIZE: usize = 8192;

/// Stream the file through SHA-256 and render the digest as lowercase
/// hex. Identical byte content yields an identical fingerprint
/// regardless of the file name.
pub fn hash_file(path: &Path) -> Result<String> {
    let mut file = File::open(path).map_err(|e| CatalogError::FileUnreadable {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut hasher = Sha256::new();
    let mut buffer = [0u8; CHUNK_SIZE];

    loop {
        let read = file
            .read(&mut buffer)
            .map_err(|e| CatalogError::FileUnreadable {
                path: path.to_path_buf(),
                source: e,
            })?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_hash_determinism() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("lesson.md");
        fs::write(&path, "# Soil Composition\n\nLoam, silt, clay.").unwrap();

        let first = hash_file(&path).unwrap();
        let second = hash_file(&path).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
    }

    #[test]
    fn test_hash_ignores_file_name() {
        let temp = TempDir::new().unwrap();
        let a = temp.path().join("original.md");
        let b = temp.path().join("renamed_copy.md");
        fs::write(&a, "same bytes").unwrap();
        fs::write(&b, "same bytes").unwrap();

        assert_eq!(hash_file(&a).unwrap(), hash_file(&b).unwrap());
    }

    #[test]
    fn test_different_content_different_hash() {
        let temp = TempDir::new().unwrap();
        let a = temp.path().join("a.md");
        let b = temp.path().join("b.md");
        fs::write(&a, "content a").unwrap();
        fs::write(&b, "content b").unwrap();

        assert_ne!(hash_file(&a).unwrap(), hash_file(&b).unwrap());
    }

    #[test]
    fn test_missing_file_is_unreadable() {
        let result = hash_file(Path::new("/nonexistent/lesson.pdf"));
        assert!(matches!(
            result,
            Err(CatalogError::FileUnreadable { .. })
        ));
    }
}
