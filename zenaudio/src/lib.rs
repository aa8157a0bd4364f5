//! # zenaudio - Session audio sérialisée pour ZenMeditation
//!
//! Cette crate pilote l'unique lecteur audio de la plateforme :
//! - Catégories fermées (`calm`, `energy`, `break`), une piste chacune
//! - Voie de sérialisation : une commande à la fois, dans l'ordre de soumission
//! - Opérations au mieux (pause, reprise, arrêt) qui ne remontent jamais d'erreur
//! - Demande de permission de notification sur les hôtes qui l'exigent
//!
//! # Architecture
//!
//! - **SessionManager** : façade clonable, soumet les commandes
//! - **AudioPlayer** : capacité lecteur fournie par l'hôte
//! - **NotificationPermission** : capacité de demande de permission
//! - **TrackCatalog** : correspondance catégorie → piste
//!
//! # Exemple d'utilisation
//!
//! ```no_run
//! use std::sync::Arc;
//! use zenaudio::{Category, SessionManager, SimulatedPlayer};
//!
//! # #[tokio::main]
//! # async fn main() -> zenaudio::Result<()> {
//! let manager = SessionManager::builder(Arc::new(SimulatedPlayer::new())).spawn();
//!
//! manager.play_category(Category::Calm).await?;
//! manager.pause_music().await;
//! manager.resume_music().await;
//! manager.stop_music().await;
//! assert_eq!(manager.current_category(), None);
//! # Ok(())
//! # }
//! ```

mod category;
mod error;
mod permission;
mod platform;
mod session;
mod simulated;
mod track;

#[cfg(feature = "zenconfig")]
mod config_ext;

// Réexports publics
pub use category::Category;
pub use error::{AudioError, PlatformError, PlatformResult, Result};
pub use permission::{HostPlatform, NoPermission, NotificationPermission, Os, PermissionGate, PermissionStatus};
pub use platform::{
    AppKilledPlaybackBehavior, AudioPlayer, Capability, PlaybackState, PlayerOptions, PlayerSetup,
    RepeatMode,
};
pub use session::{Command, SessionConfig, SessionManager, SessionManagerBuilder, SessionState};
pub use simulated::{SimulatedPlayer, SimulatedSnapshot};
pub use track::{Track, TrackCatalog};

#[cfg(feature = "zenconfig")]
pub use config_ext::AudioConfigExt;

pub use async_trait::async_trait;
