//! # zensession - Écrans de méditation de ZenMeditation
//!
//! Relie le gestionnaire de session audio, les réglages et les statistiques :
//! - [`ScreenAudio`] : quand un écran joue ou coupe sa musique
//! - [`MeditationTimer`] : compte à rebours d'une séance
//! - [`GuidedMeditation`] et [`CreatedMeditationFlow`] : déroulé des écrans
//! - [`toggle_music`] : bascule du réglage musique depuis le profil

mod error;
mod flow;
mod focus;
mod timer;

#[cfg(feature = "zenconfig")]
mod config_ext;

pub use error::{Result, SessionError};
pub use flow::{
    CREATED_MEDITATION_CATEGORY, CREATED_MINUTE_CHOICES, CreatedMeditationFlow,
    DEFAULT_GUIDED_MINUTES, GuidedMeditation, Step,
};
pub use focus::{ScreenAudio, toggle_music};
pub use timer::{MeditationTimer, format_mmss};

#[cfg(feature = "zenconfig")]
pub use config_ext::MeditationConfigExt;
