use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the SQLite database
    pub database_path: PathBuf,
    /// Directory backup exports are written to
    pub export_dir: PathBuf,
    /// Path of the config file actually loaded, if any
    #[serde(skip)]
    pub config_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            database_path: home.join(".gymtask").join("gymtask.db"),
            export_dir: PathBuf::from("."),
            config_file: None,
        }
    }
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        // Start with defaults
        let mut config = Self::default();

        // Try to load from config file
        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            config = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;
            config.config_file = Some(path);
        }

        // Apply environment variable overrides
        if let Ok(db_path) = std::env::var("GYMTASK_DATABASE_PATH") {
            config.database_path = PathBuf::from(db_path);
        }
        if let Ok(export_dir) = std::env::var("GYMTASK_EXPORT_DIR") {
            config.export_dir = PathBuf::from(export_dir);
        }

        Ok(config)
    }

    /// Default config file path: ~/.config/gymtask/config.yaml
    pub fn default_config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from(".config"));
        config_dir.join("gymtask").join("config.yaml")
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::ReadError(_, e) => Some(e),
            ConfigError::ParseError(_, e) => Some(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.database_path.to_string_lossy().contains("gymtask.db"));
        assert_eq!(config.export_dir, PathBuf::from("."));
        assert!(config.config_file.is_none());
    }

    #[test]
    fn test_load_no_file_uses_defaults() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nonexistent.yaml");

        let config = Config::load(Some(config_path)).unwrap();
        assert!(config.database_path.to_string_lossy().contains("gymtask.db"));
        assert!(config.config_file.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "database_path: /custom/path/db.sqlite").unwrap();

        let config = Config::load(Some(config_path.clone())).unwrap();
        assert_eq!(config.database_path, PathBuf::from("/custom/path/db.sqlite"));
        assert_eq!(config.config_file, Some(config_path));
    }

    #[test]
    fn test_env_var_overrides_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "export_dir: /from/file").unwrap();

        // Set env var
        std::env::set_var("GYMTASK_EXPORT_DIR", "/from/env");

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.export_dir, PathBuf::from("/from/env"));

        // Clean up
        std::env::remove_var("GYMTASK_EXPORT_DIR");
    }

    #[test]
    fn test_invalid_yaml_error() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "invalid: yaml: content: [").unwrap();

        let result = Config::load(Some(config_path));
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
