//! Configuration management with layered hierarchy

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::error::DashboardError;
use crate::core::export::DEFAULT_EXPORT_FILENAME;

/// Data file read when nothing else is configured
pub const DEFAULT_DATA_FILE: &str = "dados.csv";

/// Project-level config file, looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = ".pipedash.yaml";

/// Pipedash configuration with layered hierarchy
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Semicolon-delimited data file
    pub data_file: Option<PathBuf>,

    /// File name used by `pipedash export`
    pub export_file: Option<String>,

    /// Default output format
    pub default_format: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order.
    ///
    /// Unreadable or malformed files are skipped with a warning.
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (accessor fallbacks)

        // 2. Global user config (~/.config/pipedash/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            config.merge_file(&global_path);
        }

        // 3. Project config (./.pipedash.yaml)
        config.merge_file(&Self::project_config_path());

        // 4. Environment variables
        if let Ok(data) = std::env::var("PIPEDASH_DATA") {
            config.data_file = Some(PathBuf::from(data));
        }
        if let Ok(name) = std::env::var("PIPEDASH_EXPORT_NAME") {
            config.export_file = Some(name);
        }

        config
    }

    /// Parse one config file
    pub fn from_file(path: &Path) -> Result<Self, DashboardError> {
        let contents = std::fs::read_to_string(path).map_err(|e| DashboardError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        serde_yml::from_str::<Config>(&contents).map_err(|e| DashboardError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    fn merge_file(&mut self, path: &Path) {
        if !path.exists() {
            return;
        }
        match Self::from_file(path) {
            Ok(other) => {
                tracing::debug!(path = %path.display(), "loaded config");
                self.merge(other);
            }
            Err(e) => tracing::warn!("{}", e),
        }
    }

    /// Path to the global config file
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "pipedash")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Path to the project config file
    pub fn project_config_path() -> PathBuf {
        PathBuf::from(PROJECT_CONFIG_FILE)
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.data_file.is_some() {
            self.data_file = other.data_file;
        }
        if other.export_file.is_some() {
            self.export_file = other.export_file;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
    }

    /// Data file, falling back to `dados.csv` in the working directory
    pub fn data_file(&self) -> PathBuf {
        self.data_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE))
    }

    /// Export file name, falling back to `dados_filtrados.csv`
    pub fn export_file(&self) -> String {
        self.export_file
            .clone()
            .unwrap_or_else(|| DEFAULT_EXPORT_FILENAME.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.data_file(), PathBuf::from("dados.csv"));
        assert_eq!(config.export_file(), "dados_filtrados.csv");
    }

    #[test]
    fn test_merge_prefers_other() {
        let mut base = Config {
            data_file: Some("a.csv".into()),
            export_file: Some("x.csv".into()),
            default_format: None,
        };
        base.merge(Config {
            data_file: Some("b.csv".into()),
            export_file: None,
            default_format: Some("json".into()),
        });
        assert_eq!(base.data_file(), PathBuf::from("b.csv"));
        assert_eq!(base.export_file(), "x.csv");
        assert_eq!(base.default_format.as_deref(), Some("json"));
    }

    #[test]
    fn test_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "data_file: obras.csv\nexport_file: saida.csv\n").unwrap();
        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.data_file(), PathBuf::from("obras.csv"));
        assert_eq!(config.export_file(), "saida.csv");
    }

    #[test]
    fn test_from_file_invalid() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "data_file: [unclosed\n").unwrap();
        assert!(matches!(
            Config::from_file(&path),
            Err(DashboardError::Config { .. })
        ));
    }

    #[test]
    fn test_merge_file_skips_missing() {
        let mut config = Config::default();
        config.merge_file(Path::new("/nonexistent/config.yaml"));
        assert!(config.data_file.is_none());
    }
}
