//! Types d'erreurs pour zenstore

use std::path::PathBuf;

/// Erreurs de persistance des réglages et statistiques
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid meditation duration: {0} minutes")]
    InvalidMinutes(u32),

    #[error("Store directory unavailable: {0}")]
    Directory(String),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Type Result spécialisé pour zenstore
pub type Result<T> = std::result::Result<T, StoreError>;
