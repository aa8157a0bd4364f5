//! Pistes audio et correspondance catégorie → ressource

use crate::Category;
use serde::{Deserialize, Serialize};

/// Piste telle que chargée dans le lecteur de la plateforme.
///
/// `id` vaut l'identifiant de la catégorie : c'est ce qui permet au
/// gestionnaire de reconnaître une piste déjà chargée en inspectant la file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub url: String,
    pub title: String,
    pub artist: String,
}

impl Track {
    /// Vrai si la piste est celle de `category`
    pub fn is_category(&self, category: Category) -> bool {
        self.id == category.as_str()
    }
}

/// Correspondance immuable catégorie → piste, fournie par l'application.
#[derive(Debug, Clone)]
pub struct TrackCatalog {
    tracks: [Track; 3],
}

impl TrackCatalog {
    pub const DEFAULT_ARTIST: &'static str = "Silence Dragon";

    /// Crée un catalogue à partir d'une fonction donnant `(url, title)` par catégorie
    pub fn from_fn<F>(artist: &str, mut entry: F) -> Self
    where
        F: FnMut(Category) -> (String, String),
    {
        let tracks = Category::ALL.map(|category| {
            let (url, title) = entry(category);
            Track {
                id: category.as_str().to_string(),
                url,
                title,
                artist: artist.to_string(),
            }
        });
        Self { tracks }
    }

    /// Piste associée à une catégorie
    pub fn track(&self, category: Category) -> &Track {
        &self.tracks[category.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    /// Asset local livré avec l'application
    pub fn default_url(category: Category) -> &'static str {
        match category {
            Category::Calm => "assets/audio/calm_soul.mp3",
            Category::Energy => "assets/audio/focus_energy.mp3",
            Category::Break => "assets/audio/break_routine.mp3",
        }
    }
}

impl Default for TrackCatalog {
    fn default() -> Self {
        Self::from_fn(Self::DEFAULT_ARTIST, |category| {
            (
                Self::default_url(category).to_string(),
                category.as_str().to_string(),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog() {
        let catalog = TrackCatalog::default();
        let calm = catalog.track(Category::Calm);
        assert_eq!(calm.id, "calm");
        assert_eq!(calm.url, "assets/audio/calm_soul.mp3");
        assert_eq!(calm.title, "calm");
        assert_eq!(calm.artist, "Silence Dragon");
        assert!(calm.is_category(Category::Calm));
        assert!(!calm.is_category(Category::Break));
        assert_eq!(catalog.iter().count(), 3);
    }

    #[test]
    fn test_every_track_id_matches_its_category() {
        let catalog = TrackCatalog::from_fn("Someone", |c| {
            (format!("file:///{}.mp3", c), c.label().to_string())
        });
        for category in Category::ALL {
            let track = catalog.track(category);
            assert!(track.is_category(category));
            assert_eq!(track.url, format!("file:///{}.mp3", category));
            assert_eq!(track.artist, "Someone");
        }
    }
}
