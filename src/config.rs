use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::activity::Activity;
use crate::catalog::ActivityCatalog;
use crate::demo_data::demo_activities;
use crate::error::{ConfigError, Result};
use crate::pricing::FareTable;
use crate::vr::VrPriceTable;

/// User settings stored as JSON in the platform config directory
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub fares: FareTable,
    #[serde(default)]
    pub vr_prices: VrPriceTable,
    /// JSON file to seed the catalog from instead of the demo set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,
}

impl Config {
    pub fn get_config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "vair", "vair")
            .map(|proj_dirs| proj_dirs.config_dir().join("config.json"))
    }

    /// Loads the config file, falling back to defaults when none exists
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path().ok_or(ConfigError::NoConfigDirectory)?;
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let config_data = fs::read_to_string(config_path)
            .map_err(|e| ConfigError::LoadFailed(format!("{}: {}", config_path.display(), e)))?;

        let config: Config = serde_json::from_str(&config_data)
            .map_err(|e| ConfigError::LoadFailed(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    pub fn save(&self) -> Result<PathBuf> {
        let config_path = Self::get_config_path().ok_or(ConfigError::NoConfigDirectory)?;
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::DirectoryCreationFailed(e.to_string()))?;
        }

        let config_data = serde_json::to_string_pretty(self)?;

        fs::write(config_path, config_data)
            .map_err(|e| ConfigError::SaveFailed(e.to_string()))?;

        tracing::info!(path = %config_path.display(), "Saved config");
        Ok(())
    }

    /// Seeds a catalog from `catalog_path`, or from the demo set if unset
    pub fn seed_catalog(&self) -> Result<ActivityCatalog> {
        let activities = match &self.catalog_path {
            Some(path) => load_activities(path)?,
            None => demo_activities(),
        };
        Ok(ActivityCatalog::new(activities)?)
    }
}

/// Reads a JSON array of activities
pub fn load_activities(path: &Path) -> Result<Vec<Activity>> {
    let data = fs::read_to_string(path)?;
    let activities: Vec<Activity> = serde_json::from_str(&data)?;
    tracing::debug!(path = %path.display(), count = activities.len(), "Loaded activities");
    Ok(activities)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VairError;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load_from(&temp_dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.fares.base_fare, 220.0);
        assert_eq!(config.vr_prices.base_price, 20);
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.json");

        let mut config = Config::default();
        config.fares.base_fare = 180.0;
        config.fares.add_on_unit_price = 10;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, r#"{"vr_prices":{"base_price":25,"per_activity":3}}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.vr_prices.base_price, 25);
        assert_eq!(config.fares, FareTable::default());
    }

    #[test]
    fn test_corrupt_file_is_load_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, VairError::Config(ConfigError::LoadFailed(_))));
    }

    #[test]
    fn test_seed_catalog_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("activities.json");
        fs::write(
            &path,
            r#"[{"id":"muscat-dhow","title":"Dhow Cruise","city":"Muscat","country":"Oman","kind":"group","rating":4.6,"capacity":8,"booked":3}]"#,
        )
        .unwrap();

        let config = Config {
            catalog_path: Some(path),
            ..Default::default()
        };
        let catalog = config.seed_catalog().unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("muscat-dhow").unwrap().spots_left(), 5);
    }

    #[test]
    fn test_seed_catalog_defaults_to_demo() {
        let catalog = Config::default().seed_catalog().unwrap();
        assert!(catalog.get("tokyo-teamlab").is_some());
    }
}
