pub mod config;
pub mod paths;

pub use config::{Config, DisplayConfig, LoggingConfig, StorageConfig, DEFAULT_POSTER_BASE_URL, DEFAULT_STORAGE_KEY};
pub use paths::{PathManager, container_base_path};
