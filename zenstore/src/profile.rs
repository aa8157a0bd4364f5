//! Profil utilisateur (nom affiché)
//!
//! Le document `profile.json` peut contenir d'autres champs (avatar...) :
//! ils sont conservés tels quels à chaque écriture.

use crate::{Result, document};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tokio::sync::broadcast;
use tracing::{debug, warn};

pub const PROFILE_FILE: &str = "profile.json";

/// Nom enregistré quand l'utilisateur efface le sien
pub const ANONYMOUS_NAME: &str = "ANON";

/// Nom utilisé par l'accueil tant qu'aucun nom n'est enregistré
pub const GREETING_FALLBACK: &str = "FRIEND";

const NAME_CHANNEL_CAPACITY: usize = 16;

#[derive(Debug)]
pub struct ProfileStore {
    path: PathBuf,
    document: Mutex<Map<String, Value>>,
    name_tx: broadcast::Sender<String>,
}

impl ProfileStore {
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        document::ensure_dir(dir)?;

        let (name_tx, _) = broadcast::channel(NAME_CHANNEL_CAPACITY);
        let store = Self {
            path: dir.join(PROFILE_FILE),
            document: Mutex::new(Map::new()),
            name_tx,
        };
        store.load();
        Ok(store)
    }

    /// Relit le document ; tout ce qui n'est pas un objet JSON vaut un profil vide
    pub fn load(&self) -> Option<String> {
        let document = match document::read_value(&self.path) {
            Some(Value::Object(map)) => map,
            Some(_) => {
                warn!("Profile is not an object, ignoring it");
                Map::new()
            }
            None => Map::new(),
        };
        *self.lock() = document;
        let name = self.name();
        debug!(?name, "Profile loaded");
        name
    }

    /// Nom enregistré, s'il est non vide
    pub fn name(&self) -> Option<String> {
        self.lock()
            .get("name")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
    }

    /// Nom affiché par le profil, en majuscules
    pub fn display_name(&self) -> String {
        self.name()
            .unwrap_or_else(|| ANONYMOUS_NAME.to_string())
            .to_uppercase()
    }

    /// Nom affiché par l'accueil, en majuscules
    pub fn greeting_name(&self) -> String {
        self.name()
            .unwrap_or_else(|| GREETING_FALLBACK.to_string())
            .to_uppercase()
    }

    /// Enregistre le nom (vide : `ANON`) et diffuse le nom affiché.
    ///
    /// L'écriture est faite au mieux ; un échec est journalisé.
    pub fn set_name(&self, name: &str) -> String {
        let trimmed = name.trim();
        let stored = if trimmed.is_empty() {
            ANONYMOUS_NAME.to_string()
        } else {
            trimmed.to_string()
        };

        let document = {
            let mut document = self.lock();
            document.insert("name".to_string(), Value::String(stored.clone()));
            document.clone()
        };
        if let Err(e) = document::write(&self.path, &document) {
            warn!("Failed to save profile (ignored): {}", e);
        }

        let display = stored.to_uppercase();
        // Pas d'abonné : rien à faire
        let _ = self.name_tx.send(display.clone());
        display
    }

    /// Abonnement aux changements du nom affiché
    pub fn subscribe_name(&self) -> broadcast::Receiver<String> {
        self.name_tx.subscribe()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> MutexGuard<'_, Map<String, Value>> {
        self.document
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
