//! Extension de zenconfig pour la session audio

use crate::{Category, HostPlatform, Os, PlayerOptions, PlayerSetup, SessionConfig, TrackCatalog};
use std::time::Duration;

/// Trait d'extension pour zenconfig::Config
pub trait AudioConfigExt {
    /// Paramètres d'initialisation du lecteur
    fn player_setup(&self) -> PlayerSetup;

    /// Options de contrôle à distance
    fn player_options(&self) -> PlayerOptions;

    /// Configuration complète de la session (setup, options, volume)
    fn session_config(&self) -> SessionConfig;

    /// Catalogue des pistes par catégorie
    fn track_catalog(&self) -> TrackCatalog;

    /// Description de l'hôte, avec le seuil de consentement configuré
    fn host_platform(&self, os: Os, api_level: u32) -> HostPlatform;
}

impl AudioConfigExt for zenconfig::Config {
    fn player_setup(&self) -> PlayerSetup {
        PlayerSetup {
            min_buffer: Duration::from_secs(self.get_min_buffer()),
            max_buffer: Duration::from_secs(self.get_max_buffer()),
            back_buffer: Duration::from_secs(self.get_back_buffer()),
            play_buffer: Duration::from_secs(self.get_play_buffer()),
            ..PlayerSetup::default()
        }
    }

    fn player_options(&self) -> PlayerOptions {
        PlayerOptions {
            stop_foreground_grace_period: Duration::from_secs(self.get_stop_grace_period()),
            ..PlayerOptions::default()
        }
    }

    fn session_config(&self) -> SessionConfig {
        SessionConfig {
            setup: self.player_setup(),
            options: self.player_options(),
            volume: self.get_volume() as f32,
        }
    }

    fn track_catalog(&self) -> TrackCatalog {
        TrackCatalog::from_fn(&self.get_track_artist(), |category: Category| {
            let id = category.as_str();
            let url = self
                .get_track_url(id)
                .unwrap_or_else(|| TrackCatalog::default_url(category).to_string());
            (url, self.get_track_title(id))
        })
    }

    fn host_platform(&self, os: Os, api_level: u32) -> HostPlatform {
        let platform = match os {
            Os::Android => HostPlatform::android(api_level),
            Os::Ios => HostPlatform::ios(),
            Os::Other => HostPlatform::headless(),
        };
        let level = u32::try_from(self.get_notification_api_level())
            .unwrap_or(HostPlatform::NOTIFICATION_CONSENT_API_LEVEL);
        platform.with_consent_api_level(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_catalog_and_session_from_config() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("config.yaml"),
            "player:\n  volume: 0.5\n  buffers:\n    max: 120\ntracks:\n  artist: Tester\n  energy:\n    url: file:///energy.ogg\n",
        )
        .unwrap();
        let config = zenconfig::Config::load_config(dir.path().to_str().unwrap()).unwrap();

        let session = config.session_config();
        assert!((session.volume - 0.5).abs() < f32::EPSILON);
        assert_eq!(session.setup.max_buffer, Duration::from_secs(120));
        assert_eq!(session.setup.min_buffer, Duration::from_secs(10));
        assert_eq!(
            session.options.stop_foreground_grace_period,
            Duration::from_secs(5)
        );

        let catalog = config.track_catalog();
        let energy = catalog.track(Category::Energy);
        assert_eq!(energy.url, "file:///energy.ogg");
        assert_eq!(energy.artist, "Tester");
        assert_eq!(energy.id, "energy");
        assert_eq!(
            catalog.track(Category::Calm).url,
            "assets/audio/calm_soul.mp3"
        );

        let host = config.host_platform(Os::Android, 33);
        assert!(host.requires_notification_consent());
        assert!(!config.host_platform(Os::Ios, 40).requires_notification_consent());
    }
}
