//! Extension de zenconfig pour le store

use crate::{ProfileStore, Result, SettingsStore, StatsStore, StoreError};
use std::path::PathBuf;

/// Trait d'extension pour zenconfig::Config
pub trait StoreConfigExt {
    /// Répertoire du store (créé s'il n'existe pas)
    fn store_dir(&self) -> Result<PathBuf>;

    fn open_settings_store(&self) -> Result<SettingsStore> {
        SettingsStore::open(self.store_dir()?)
    }

    fn open_profile_store(&self) -> Result<ProfileStore> {
        ProfileStore::open(self.store_dir()?)
    }

    fn open_stats_store(&self) -> Result<StatsStore> {
        StatsStore::open(self.store_dir()?)
    }
}

impl StoreConfigExt for zenconfig::Config {
    fn store_dir(&self) -> Result<PathBuf> {
        self.get_managed_dir(&["store", "directory"], "store")
            .map(PathBuf::from)
            .map_err(|e| StoreError::Directory(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use zenaudio::Category;

    #[test]
    fn test_stores_live_in_managed_dir() {
        let dir = TempDir::new().unwrap();
        let config = zenconfig::Config::load_config(dir.path().to_str().unwrap()).unwrap();

        let store_dir = config.store_dir().unwrap();
        assert!(store_dir.ends_with("store"));
        assert!(store_dir.is_dir());

        let stats = config.open_stats_store().unwrap();
        stats.record_category_completion(Category::Calm).unwrap();
        assert!(store_dir.join(crate::stats::CATEGORY_STATS_FILE).exists());

        let settings = config.open_settings_store().unwrap();
        settings.set_notif_on(false);

        let profile = config.open_profile_store().unwrap();
        profile.set_name("Ada");
        assert!(store_dir.join(crate::profile::PROFILE_FILE).exists());
        assert!(store_dir.join(crate::settings::SETTINGS_FILE).exists());
    }
}
