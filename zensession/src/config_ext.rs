//! Extension de zenconfig pour les écrans de méditation

use crate::DEFAULT_GUIDED_MINUTES;
use tracing::warn;

/// Trait d'extension pour zenconfig::Config
pub trait MeditationConfigExt {
    /// Durée d'une séance guidée, en minutes
    fn guided_minutes(&self) -> u32;
}

impl MeditationConfigExt for zenconfig::Config {
    fn guided_minutes(&self) -> u32 {
        let minutes = self.get_category_minutes();
        match u32::try_from(minutes) {
            Ok(m) if (1..=120).contains(&m) => m,
            _ => {
                warn!(minutes, "Invalid guided meditation duration, using default");
                DEFAULT_GUIDED_MINUTES
            }
        }
    }
}
