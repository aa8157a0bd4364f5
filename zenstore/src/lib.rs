//! # zenstore - Persistance locale de ZenMeditation
//!
//! Documents JSON dans le répertoire `store` géré par la configuration :
//! - **SettingsStore** : réglages musique / notifications, diffusés aux écrans
//! - **ProfileStore** : nom de l'utilisateur, diffusé à l'accueil
//! - **StatsStore** : compteurs par catégorie et méditations créées
//!
//! Les lectures sont tolérantes (un document corrompu se lit comme vide) ;
//! seules les écritures des statistiques remontent une erreur.

mod document;
mod error;
pub mod profile;
pub mod settings;
pub mod stats;

#[cfg(feature = "zenconfig")]
mod config_ext;

pub use error::{Result, StoreError};
pub use profile::ProfileStore;
pub use settings::{Settings, SettingsStore};
pub use stats::{CreatedMeditation, StatsStore, StatsSummary};

#[cfg(feature = "zenconfig")]
pub use config_ext::StoreConfigExt;
