//! League configuration
//!
//! Defaults can be overridden by a JSON file named in `PICKUP_CONFIG_PATH`;
//! `PICKUP_DATA_PATH` then overrides the data file alone.

use crate::roster::PriorityRules;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::{env, fs};

pub const CONFIG_PATH_ENV: &str = "PICKUP_CONFIG_PATH";
pub const DATA_PATH_ENV: &str = "PICKUP_DATA_PATH";

pub const DEFAULT_DATA_FILE: &str = "soccer_team.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeagueConfig {
    pub data_path: PathBuf,
    pub default_team_count: usize,
    pub priority: PriorityRules,
}

impl Default for LeagueConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            default_team_count: 3,
            priority: PriorityRules::default(),
        }
    }
}

impl LeagueConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.default_team_count == 0 {
            return Err("default_team_count must be at least 1".to_string());
        }
        if self.data_path.as_os_str().is_empty() {
            return Err("data_path must not be empty".to_string());
        }
        Ok(())
    }

    /// Read and validate a config file.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {e}", path.display()))?;
        let config = Self::from_json(&content)
            .map_err(|e| format!("Failed to parse config JSON '{}': {e}", path.display()))?;
        config.validate().map_err(|e| format!("Invalid config '{}': {e}", path.display()))?;
        Ok(config)
    }

    /// Build the config from the process environment.
    pub fn from_env() -> Result<Self, String> {
        Self::from_vars(
            env::var(CONFIG_PATH_ENV).ok().as_deref(),
            env::var(DATA_PATH_ENV).ok().as_deref(),
        )
    }

    fn from_vars(config_path: Option<&str>, data_path: Option<&str>) -> Result<Self, String> {
        let mut config = match config_path.map(str::trim).filter(|p| !p.is_empty()) {
            Some(path) => Self::load(Path::new(path))
                .map_err(|e| format!("{e} (from {CONFIG_PATH_ENV}='{path}')"))?,
            None => Self::default(),
        };

        if let Some(data) = data_path.map(str::trim).filter(|p| !p.is_empty()) {
            config.data_path = PathBuf::from(data);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_env() {
        let config = LeagueConfig::from_vars(None, Some("  ")).unwrap();
        assert_eq!(config, LeagueConfig::default());
        assert_eq!(config.priority.main_squad, 13);
        assert_eq!(config.priority.input_order_slots, 2);
    }

    #[test]
    fn test_file_then_data_override() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("pickup.json");
        fs::write(&path, r#"{"default_team_count": 2, "priority": {"main_squad": 10}}"#).unwrap();

        let path_str = path.to_str().unwrap();
        let config = LeagueConfig::from_vars(Some(path_str), None).unwrap();
        assert_eq!(config.default_team_count, 2);
        assert_eq!(config.priority.main_squad, 10);
        assert_eq!(config.priority.input_order_slots, 2);
        assert_eq!(config.data_path, PathBuf::from(DEFAULT_DATA_FILE));

        let config = LeagueConfig::from_vars(Some(path_str), Some("league/tuesday.json")).unwrap();
        assert_eq!(config.data_path, PathBuf::from("league/tuesday.json"));
    }

    #[test]
    fn test_errors_name_the_variable() {
        let err = LeagueConfig::from_vars(Some("/nonexistent/pickup.json"), None).unwrap_err();
        assert!(err.contains(CONFIG_PATH_ENV));
        assert!(err.contains("/nonexistent/pickup.json"));

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.json");
        fs::write(&path, r#"{"default_team_count": 0}"#).unwrap();
        let err = LeagueConfig::from_vars(path.to_str(), None).unwrap_err();
        assert!(err.contains("default_team_count"));
    }
}
