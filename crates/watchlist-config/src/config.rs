use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::PathManager;

/// Storage key the watchlist blob has always lived under.
pub const DEFAULT_STORAGE_KEY: &str = "watchlist_plugin_data";

pub const DEFAULT_POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w300";

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StorageConfig {
    /// Key-value file holding the watchlist; defaults to `<data_dir>/storage.json`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    #[serde(default = "default_storage_key")]
    pub key: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_json_logging")]
    pub json: bool,
    /// Write logs to `<log_dir>/watchlist.log` instead of stderr
    #[serde(default)]
    pub to_file: bool,
    /// Explicit log file; implies `to_file`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DisplayConfig {
    #[serde(default = "default_poster_base_url")]
    pub poster_base_url: String,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_json_logging() -> bool {
    use std::io::IsTerminal;
    !std::io::stdout().is_terminal()
}

fn default_poster_base_url() -> String {
    DEFAULT_POSTER_BASE_URL.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            file: None,
            key: default_storage_key(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: default_json_logging(),
            to_file: false,
            file: None,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            poster_base_url: default_poster_base_url(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file if there is one, otherwise fall back to defaults.
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        Self::load_from_file(path)
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.storage.key.trim().is_empty() {
            return Err(anyhow::anyhow!("storage.key is required and cannot be empty"));
        }

        let url = &self.display.poster_base_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(anyhow::anyhow!("display.poster_base_url must be an http(s) URL: {}", url));
        }

        Ok(())
    }

    pub fn storage_file(&self, paths: &PathManager) -> PathBuf {
        self.storage
            .file
            .clone()
            .unwrap_or_else(|| paths.storage_file())
    }

    /// Where logs go, or `None` for stderr.
    pub fn log_file(&self, paths: &PathManager) -> Option<PathBuf> {
        match &self.logging.file {
            Some(file) => Some(file.clone()),
            None if self.logging.to_file => Some(paths.log_file()),
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let config = Config {
            storage: StorageConfig {
                file: Some(PathBuf::from("/tmp/watchlist.json")),
                key: "my_list".to_string(),
            },
            logging: LoggingConfig {
                level: "debug".to_string(),
                json: true,
                to_file: true,
                file: None,
            },
            display: DisplayConfig::default(),
        };

        let path = file.path().to_path_buf();
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.storage.key, "my_list");
        assert_eq!(loaded.storage.file, Some(PathBuf::from("/tmp/watchlist.json")));
        assert_eq!(loaded.logging.level, "debug");
        assert_eq!(loaded.logging.json, true);
        assert!(loaded.logging.to_file);
        assert_eq!(loaded.display.poster_base_url, DEFAULT_POSTER_BASE_URL);
    }

    #[test]
    fn test_config_defaults_from_empty_file() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.storage.key, DEFAULT_STORAGE_KEY);
        assert!(config.storage.file.is_none());
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_partial_section() {
        let config: Config = toml::from_str("[storage]\nkey = \"other\"\n").unwrap();
        assert_eq!(config.storage.key, "other");
        assert_eq!(config.display.poster_base_url, DEFAULT_POSTER_BASE_URL);
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::default();
        config.storage.key = "  ".to_string();
        assert!(config.validate().is_err());

        config.storage.key = DEFAULT_STORAGE_KEY.to_string();
        config.display.poster_base_url = "ftp://images".to_string();
        assert!(config.validate().is_err());

        config.display.poster_base_url = DEFAULT_POSTER_BASE_URL.to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");
        let config = Config::load_or_default(&path).unwrap();
        assert_eq!(config.storage.key, DEFAULT_STORAGE_KEY);
    }

    #[test]
    fn test_storage_file_resolution() {
        let paths = PathManager::with_base("/base");
        let mut config = Config::default();
        assert_eq!(config.storage_file(&paths), PathBuf::from("/base/data/storage.json"));

        config.storage.file = Some(PathBuf::from("/elsewhere/list.json"));
        assert_eq!(config.storage_file(&paths), PathBuf::from("/elsewhere/list.json"));
    }

    #[test]
    fn test_log_file_resolution() {
        let paths = PathManager::with_base("/base");
        let mut config = Config::default();
        assert_eq!(config.log_file(&paths), None);

        config.logging.to_file = true;
        assert_eq!(config.log_file(&paths), Some(PathBuf::from("/base/logs/watchlist.log")));

        config.logging.file = Some(PathBuf::from("/var/log/wl.log"));
        assert_eq!(config.log_file(&paths), Some(PathBuf::from("/var/log/wl.log")));
    }
}
