//! Statistiques de méditation
//!
//! Deux documents :
//! - `category_stats.json` : compteur de séances terminées par catégorie
//! - `created_meditations.json` : méditations créées, la plus récente en tête

use crate::{Result, StoreError, document};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::{info, warn};
use uuid::Uuid;
use zenaudio::Category;

pub const CATEGORY_STATS_FILE: &str = "category_stats.json";
pub const CREATED_MEDITATIONS_FILE: &str = "created_meditations.json";

/// Nom utilisé quand l'utilisateur n'en saisit pas
pub const DEFAULT_MEDITATION_NAME: &str = "My meditation";

/// Une méditation créée par l'utilisateur et menée à son terme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedMeditation {
    pub id: String,
    pub name: String,
    pub minutes: u32,
    pub created_at: DateTime<Utc>,
}

impl CreatedMeditation {
    pub fn new(name: &str, minutes: u32) -> Self {
        let name = name.trim();
        Self {
            id: Uuid::new_v4().to_string(),
            name: if name.is_empty() {
                DEFAULT_MEDITATION_NAME.to_string()
            } else {
                name.to_string()
            },
            minutes,
            created_at: Utc::now(),
        }
    }
}

/// Résumé affiché par l'écran de statistiques
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSummary {
    pub total_minutes: u64,
    pub session_count: u64,
    pub favourite: Option<Category>,
}

impl StatsSummary {
    pub fn favourite_label(&self) -> &'static str {
        self.favourite.map(|c| c.label()).unwrap_or("…")
    }
}

#[derive(Debug)]
pub struct StatsStore {
    category_path: PathBuf,
    created_path: PathBuf,
    // Sérialise les lecture-modification-écriture
    guard: Mutex<()>,
}

impl StatsStore {
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        document::ensure_dir(dir)?;
        Ok(Self {
            category_path: dir.join(CATEGORY_STATS_FILE),
            created_path: dir.join(CREATED_MEDITATIONS_FILE),
            guard: Mutex::new(()),
        })
    }

    /// Incrémente le compteur d'une catégorie et retourne la nouvelle valeur
    pub fn record_category_completion(&self, category: Category) -> Result<u32> {
        let _guard = self.lock();
        let mut counts = self.read_counts();
        let count = counts.entry(category).or_insert(0);
        *count = count.saturating_add(1);
        let count = *count;

        document::write(&self.category_path, &counts)?;
        info!(%category, count, "Category completion recorded");
        Ok(count)
    }

    pub fn category_counts(&self) -> BTreeMap<Category, u32> {
        let _guard = self.lock();
        self.read_counts()
    }

    /// Enregistre une méditation créée, en tête de liste
    pub fn save_created_meditation(&self, name: &str, minutes: u32) -> Result<CreatedMeditation> {
        if minutes == 0 {
            return Err(StoreError::InvalidMinutes(minutes));
        }

        let _guard = self.lock();
        let meditation = CreatedMeditation::new(name, minutes);
        let mut all = self.read_created();
        all.insert(0, meditation.clone());

        document::write(&self.created_path, &all)?;
        info!(id = %meditation.id, name = %meditation.name, minutes, "Created meditation saved");
        Ok(meditation)
    }

    pub fn created_meditations(&self) -> Vec<CreatedMeditation> {
        let _guard = self.lock();
        self.read_created()
    }

    pub fn summary(&self) -> StatsSummary {
        let _guard = self.lock();
        summarize(&self.read_counts(), &self.read_created())
    }

    /// Efface toutes les statistiques
    pub fn reset(&self) -> Result<()> {
        let _guard = self.lock();
        document::remove(&self.created_path)?;
        document::remove(&self.category_path)?;
        info!("Statistics reset");
        Ok(())
    }

    fn read_counts(&self) -> BTreeMap<Category, u32> {
        let Some(value) = document::read_value(&self.category_path) else {
            return BTreeMap::new();
        };
        let Some(object) = value.as_object() else {
            warn!("Category stats is not an object, ignoring it");
            return BTreeMap::new();
        };

        // Seules les entrées numériques de catégories connues comptent
        object
            .iter()
            .filter_map(|(key, value)| {
                let category = key.parse::<Category>().ok()?;
                let count = value.as_u64()?;
                Some((category, u32::try_from(count).unwrap_or(u32::MAX)))
            })
            .collect()
    }

    fn read_created(&self) -> Vec<CreatedMeditation> {
        document::read_value(&self.created_path)
            .and_then(|value| match serde_json::from_value(value) {
                Ok(list) => Some(list),
                Err(e) => {
                    warn!("Ignoring unreadable created meditations: {}", e);
                    None
                }
            })
            .unwrap_or_default()
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        self.guard
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn summarize(counts: &BTreeMap<Category, u32>, created: &[CreatedMeditation]) -> StatsSummary {
    let total_minutes = created.iter().map(|m| u64::from(m.minutes)).sum();
    let completed: u64 = counts.values().map(|&c| u64::from(c)).sum();

    // Égalité : la première catégorie dans l'ordre d'affichage l'emporte
    let mut favourite: Option<(Category, u32)> = None;
    for category in Category::ALL {
        let count = counts.get(&category).copied().unwrap_or(0);
        if count > 0 && favourite.is_none_or(|(_, best)| count > best) {
            favourite = Some((category, count));
        }
    }

    StatsSummary {
        total_minutes,
        session_count: created.len() as u64 + completed,
        favourite: favourite.map(|(category, _)| category),
    }
}
