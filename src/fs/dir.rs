//! Directory operations delegated to the host filesystem.

use std::io;
use std::path::{Path, PathBuf};

use super::types::*;

fn dir_error(path: &Path, operation: &str, source: io::Error) -> MemFileError {
    MemFileError::Directory {
        path: path.display().to_string(),
        operation: operation.to_string(),
        source,
    }
}

/// Create `path` and any missing parents. Returns false if it already existed.
pub fn create_directory(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    if path.is_dir() {
        return Ok(false);
    }
    std::fs::create_dir_all(path).map_err(|e| dir_error(path, "mkdir", e))?;
    Ok(true)
}

/// Entries directly under `path`, sorted.
pub fn list_directory(path: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let path = path.as_ref();
    let mut entries = std::fs::read_dir(path)
        .and_then(|iter| iter.map(|entry| entry.map(|e| e.path())).collect::<io::Result<Vec<_>>>())
        .map_err(|e| dir_error(path, "scandir", e))?;
    entries.sort();
    Ok(entries)
}

/// Remove `path` and everything under it.
pub fn remove_directory(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    std::fs::remove_dir_all(path).map_err(|e| dir_error(path, "rmdir", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_nested_once() {
        let temp = tempfile::tempdir().unwrap();
        let nested = temp.path().join("a/b/c");
        assert!(create_directory(&nested).unwrap());
        assert!(nested.is_dir());
        assert!(!create_directory(&nested).unwrap());
    }

    #[test]
    fn test_create_over_file_fails() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("f");
        std::fs::write(&file, b"").unwrap();
        let err = create_directory(&file).unwrap_err();
        assert!(matches!(err, MemFileError::Directory { .. }));
    }

    #[test]
    fn test_list_sorted() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join("b.bin"), b"").unwrap();
        std::fs::write(temp.path().join("a.bin"), b"").unwrap();
        std::fs::create_dir(temp.path().join("c")).unwrap();

        let entries = list_directory(temp.path()).unwrap();
        assert_eq!(
            entries,
            vec![temp.path().join("a.bin"), temp.path().join("b.bin"), temp.path().join("c")]
        );
    }

    #[test]
    fn test_list_missing_fails() {
        let temp = tempfile::tempdir().unwrap();
        let err = list_directory(temp.path().join("missing")).unwrap_err();
        match err {
            MemFileError::Directory { operation, source, .. } => {
                assert_eq!(operation, "scandir");
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_remove_recursive() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("d");
        std::fs::create_dir_all(dir.join("inner")).unwrap();
        std::fs::write(dir.join("inner/x.bin"), b"x").unwrap();

        remove_directory(&dir).unwrap();
        assert!(!dir.exists());
    }
}
