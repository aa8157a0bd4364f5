//! Réglages utilisateur (musique, notifications)
//!
//! Le document `settings.json` est relu de façon tolérante : tout champ
//! absent ou non booléen vaut `true`. Les écritures sont faites au mieux ;
//! un échec est journalisé mais ne remonte pas.

use crate::{Result, document};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tokio::sync::broadcast;
use tracing::{debug, warn};

pub const SETTINGS_FILE: &str = "settings.json";

/// Capacité du canal de diffusion du réglage musique
const MUSIC_CHANNEL_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub music_on: bool,
    pub notif_on: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            music_on: true,
            notif_on: true,
        }
    }
}

impl Settings {
    fn from_value(value: &Value) -> Self {
        let flag = |key: &str| value.get(key).and_then(Value::as_bool).unwrap_or(true);
        Self {
            music_on: flag("music_on"),
            notif_on: flag("notif_on"),
        }
    }
}

/// Store des réglages, partagé entre les écrans.
///
/// Chaque changement du réglage musique est diffusé aux abonnés, même si la
/// valeur ne change pas : les écrans réappliquent alors leur politique.
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    current: Mutex<Settings>,
    music_tx: broadcast::Sender<bool>,
}

impl SettingsStore {
    /// Ouvre (et crée si besoin) le store dans `dir`, puis charge les réglages
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        document::ensure_dir(dir)?;

        let (music_tx, _) = broadcast::channel(MUSIC_CHANNEL_CAPACITY);
        let store = Self {
            path: dir.join(SETTINGS_FILE),
            current: Mutex::new(Settings::default()),
            music_tx,
        };
        store.load();
        Ok(store)
    }

    /// Relit le document. Ne peut pas échouer : les valeurs par défaut
    /// remplacent tout ce qui est illisible.
    pub fn load(&self) -> Settings {
        let settings = document::read_value(&self.path)
            .map(|value| Settings::from_value(&value))
            .unwrap_or_default();
        *self.lock() = settings;
        debug!(?settings, "Settings loaded");
        settings
    }

    pub fn settings(&self) -> Settings {
        *self.lock()
    }

    pub fn music_on(&self) -> bool {
        self.lock().music_on
    }

    pub fn set_music_on(&self, on: bool) {
        self.update(|s| s.music_on = on);
        // Pas d'abonné : rien à faire
        let _ = self.music_tx.send(on);
    }

    pub fn set_notif_on(&self, on: bool) {
        self.update(|s| s.notif_on = on);
    }

    /// Abonnement aux changements du réglage musique
    pub fn subscribe_music(&self) -> broadcast::Receiver<bool> {
        self.music_tx.subscribe()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn update(&self, change: impl FnOnce(&mut Settings)) {
        let settings = {
            let mut current = self.lock();
            change(&mut current);
            *current
        };
        if let Err(e) = document::write(&self.path, &settings) {
            warn!("Failed to save settings (ignored): {}", e);
        }
    }

    fn lock(&self) -> MutexGuard<'_, Settings> {
        self.current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
