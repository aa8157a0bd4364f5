//! Types d'erreurs pour zensession

use crate::Step;

/// Erreurs des écrans de méditation
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Invalid countdown duration: {0} seconds (expected 1..={max})", max = crate::MeditationTimer::MAX_DURATION)]
    InvalidDuration(u32),

    #[error("Cannot {action} from step {from:?}")]
    InvalidStep { action: &'static str, from: Step },

    #[error(transparent)]
    Store(#[from] zenstore::StoreError),

    #[error(transparent)]
    Audio(#[from] zenaudio::AudioError),
}

/// Type Result spécialisé pour zensession
pub type Result<T> = std::result::Result<T, SessionError>;
