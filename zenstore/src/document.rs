//! Lecture et écriture des documents JSON du store

use crate::{Result, StoreError};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::warn;

/// Lit un document JSON. Absent, illisible ou invalide : `None`.
pub(crate) fn read_value(path: &Path) -> Option<Value> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return None,
        Err(e) => {
            warn!("Cannot read {}: {}", path.display(), e);
            return None;
        }
    };

    match serde_json::from_str(&content) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Ignoring corrupt document {}: {}", path.display(), e);
            None
        }
    }
}

pub(crate) fn write<T: Serialize + ?Sized>(path: &Path, document: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(document)?;
    fs::write(path, content).map_err(|e| StoreError::io(path, e))
}

/// Supprime un document ; un fichier déjà absent n'est pas une erreur
pub(crate) fn remove(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(StoreError::io(path, e)),
    }
}

pub(crate) fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_and_corrupt_read_as_none() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.json");
        assert!(read_value(&path).is_none());

        fs::write(&path, "{not json").unwrap();
        assert!(read_value(&path).is_none());

        write(&path, &serde_json::json!({"a": 1})).unwrap();
        assert_eq!(read_value(&path).unwrap()["a"], 1);
    }

    #[test]
    fn test_remove_tolerates_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gone.json");
        remove(&path).unwrap();

        fs::write(&path, "{}").unwrap();
        remove(&path).unwrap();
        assert!(!path.exists());
    }
}
