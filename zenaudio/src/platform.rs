//! Capacité « lecteur audio » fournie par la plateforme hôte
//!
//! Le gestionnaire de session ne parle au lecteur qu'à travers le trait
//! [`AudioPlayer`]. Chaque appel est un point de suspension et peut échouer
//! avec une [`PlatformError`].

use crate::{PlatformResult, Track};
use async_trait::async_trait;
use std::time::Duration;

/// Mode de répétition du lecteur
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatMode {
    Off,
    /// Boucle indéfiniment sur la piste courante
    Track,
    Queue,
}

/// État de lecture tel que rapporté par la plateforme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    None,
    Ready,
    Loading,
    Buffering,
    Playing,
    Paused,
    Stopped,
    Ended,
    Error,
}

/// Commandes exposées dans la notification / l'écran verrouillé
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Play,
    Pause,
    Stop,
}

/// Comportement quand l'application est tuée
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppKilledPlaybackBehavior {
    ContinuePlayback,
    PausePlayback,
    StopPlaybackAndRemoveNotification,
}

/// Paramètres d'initialisation du lecteur (appliqués une seule fois)
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSetup {
    pub min_buffer: Duration,
    pub max_buffer: Duration,
    pub back_buffer: Duration,
    pub play_buffer: Duration,
    pub auto_update_metadata: bool,
    pub auto_handle_interruptions: bool,
    /// Catégorie de session « playback » mixable avec les autres apps
    pub mix_with_others: bool,
}

impl Default for PlayerSetup {
    fn default() -> Self {
        Self {
            min_buffer: Duration::from_secs(10),
            max_buffer: Duration::from_secs(60),
            back_buffer: Duration::from_secs(10),
            play_buffer: Duration::from_secs(5),
            auto_update_metadata: true,
            auto_handle_interruptions: true,
            mix_with_others: true,
        }
    }
}

/// Options de contrôle à distance du lecteur
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerOptions {
    pub capabilities: Vec<Capability>,
    pub compact_capabilities: Vec<Capability>,
    pub app_killed_behavior: AppKilledPlaybackBehavior,
    pub stop_foreground_grace_period: Duration,
}

impl Default for PlayerOptions {
    fn default() -> Self {
        Self {
            capabilities: vec![Capability::Play, Capability::Pause, Capability::Stop],
            compact_capabilities: vec![Capability::Play, Capability::Pause],
            app_killed_behavior: AppKilledPlaybackBehavior::StopPlaybackAndRemoveNotification,
            stop_foreground_grace_period: Duration::from_secs(5),
        }
    }
}

/// Lecteur audio mono-piste de la plateforme.
///
/// Les implémentations doivent être `Send + Sync` : le gestionnaire les
/// pilote depuis une tâche Tokio dédiée.
#[async_trait]
pub trait AudioPlayer: Send + Sync {
    /// Initialisation unique du lecteur
    async fn setup(&self, setup: &PlayerSetup) -> PlatformResult<()>;

    async fn update_options(&self, options: &PlayerOptions) -> PlatformResult<()>;

    async fn set_repeat_mode(&self, mode: RepeatMode) -> PlatformResult<()>;

    /// Volume entre 0.0 et 1.0
    async fn set_volume(&self, volume: f32) -> PlatformResult<()>;

    /// Pistes actuellement chargées
    async fn queue(&self) -> PlatformResult<Vec<Track>>;

    async fn add(&self, track: Track) -> PlatformResult<()>;

    /// Vide la file et arrête la lecture
    async fn reset(&self) -> PlatformResult<()>;

    async fn play(&self) -> PlatformResult<()>;

    async fn pause(&self) -> PlatformResult<()>;

    async fn stop(&self) -> PlatformResult<()>;

    async fn state(&self) -> PlatformResult<PlaybackState>;
}
