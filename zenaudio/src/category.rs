//! Catégories de méditation guidée

use crate::AudioError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Une des pistes audio nommées de l'application.
///
/// L'ensemble est fermé : chaque catégorie correspond à exactement une
/// ressource audio du [`TrackCatalog`](crate::TrackCatalog).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Calm,
    Energy,
    Break,
}

impl Category {
    /// Toutes les catégories, dans l'ordre d'affichage
    pub const ALL: [Category; 3] = [Category::Calm, Category::Energy, Category::Break];

    /// Identifiant stable, utilisé comme id de piste et comme clé de stockage
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Calm => "calm",
            Category::Energy => "energy",
            Category::Break => "break",
        }
    }

    /// Libellé lisible
    pub fn label(&self) -> &'static str {
        match self {
            Category::Calm => "Calm",
            Category::Energy => "Energy",
            Category::Break => "Break",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Category::Calm => 0,
            Category::Energy => 1,
            Category::Break => 2,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = AudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(id))
            .ok_or_else(|| AudioError::UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("calm".parse::<Category>().unwrap(), Category::Calm);
        assert_eq!(" Energy ".parse::<Category>().unwrap(), Category::Energy);
        assert_eq!("BREAK".parse::<Category>().unwrap(), Category::Break);
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let err = "focus".parse::<Category>().unwrap_err();
        assert!(matches!(err, AudioError::UnknownCategory(ref s) if s == "focus"));
    }

    #[test]
    fn test_identifiers_match_display_and_serde() {
        for category in Category::ALL {
            assert_eq!(category.to_string(), category.as_str());
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.as_str()));
        }
    }

    #[test]
    fn test_indices_are_distinct() {
        let mut seen = [false; 3];
        for category in Category::ALL {
            assert!(!seen[category.index()]);
            seen[category.index()] = true;
        }
    }
}
