//! Types d'erreurs pour zenaudio

use crate::Category;

/// Erreur remontée par une capacité de la plateforme (lecteur, permissions)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlatformError {
    #[error("Player operation '{operation}' failed: {message}")]
    Operation {
        operation: &'static str,
        message: String,
    },

    #[error("Player is not set up")]
    NotSetUp,

    #[error("Player is already set up")]
    AlreadySetUp,

    #[error("Permission request failed: {0}")]
    Permission(String),
}

impl PlatformError {
    pub fn operation(operation: &'static str, message: impl Into<String>) -> Self {
        PlatformError::Operation {
            operation,
            message: message.into(),
        }
    }
}

/// Erreurs du gestionnaire de session audio
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("Audio player setup failed: {0}")]
    Setup(#[source] PlatformError),

    #[error("Failed to load category '{category}': {source}")]
    Load {
        category: Category,
        source: PlatformError,
    },

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Audio command '{0}' panicked")]
    CommandPanicked(&'static str),

    #[error("Audio session lane is closed")]
    LaneClosed,
}

/// Type Result spécialisé pour zenaudio
pub type Result<T> = std::result::Result<T, AudioError>;

/// Type Result des appels à la plateforme
pub type PlatformResult<T> = std::result::Result<T, PlatformError>;
