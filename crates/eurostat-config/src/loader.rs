//! Configuration loading from YAML files with environment overrides.

use crate::Config;
use eurostat_common::EurostatError;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "EUROSTAT_NOTEBOOKS_CONFIG";

/// Configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "eurostat-notebooks.yaml";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file {}: {source}", path.display())]
    IoError {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[source] EurostatError),
}

impl From<ConfigError> for EurostatError {
    fn from(err: ConfigError) -> Self {
        EurostatError::config_with_source("Failed to load configuration", err)
    }
}

/// Configuration loader for the generator
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::parse(&content)?;
        debug!(path = %path.display(), "Loaded configuration file");

        Self::apply_env_overrides(&mut config);
        config.validate().map_err(ConfigError::ValidationError)?;
        Ok(config)
    }

    /// Parse configuration from YAML text without overrides or validation
    pub fn parse(content: &str) -> Result<Config, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load configuration from the environment-selected file, the default
    /// file in the working directory, or the built-in defaults.
    pub fn load() -> Result<Config, ConfigError> {
        if let Ok(config_path) = env::var(CONFIG_PATH_ENV) {
            return Self::load_config(config_path);
        }

        if Path::new(DEFAULT_CONFIG_FILE).exists() {
            return Self::load_config(DEFAULT_CONFIG_FILE);
        }

        debug!("No configuration file found, using defaults");
        let mut config = Config::default();
        Self::apply_env_overrides(&mut config);
        config.validate().map_err(ConfigError::ValidationError)?;
        Ok(config)
    }

    /// Apply environment variable overrides to configuration
    pub fn apply_env_overrides(config: &mut Config) {
        Self::apply_overrides_from(config, |key| env::var(key).ok());
    }

    /// Apply overrides using an arbitrary variable lookup
    pub fn apply_overrides_from<F>(config: &mut Config, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("EUROSTAT_TEMPLATE_DIR") {
            config.paths.template_dir = PathBuf::from(dir);
        }

        if let Some(dir) = lookup("EUROSTAT_OUTPUT_DIR") {
            config.paths.output_dir = PathBuf::from(dir);
        }

        if let Some(catalog) = lookup("EUROSTAT_CATALOG") {
            config.paths.catalog = Some(PathBuf::from(catalog));
        }

        if let Some(level) = lookup("EUROSTAT_LOG_LEVEL") {
            config.logging.level = level;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_overrides_from_lookup() {
        let vars: HashMap<&str, &str> = [
            ("EUROSTAT_TEMPLATE_DIR", "/srv/templates"),
            ("EUROSTAT_LOG_LEVEL", "debug"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        ConfigLoader::apply_overrides_from(&mut config, |key| {
            vars.get(key).map(|value| value.to_string())
        });

        assert_eq!(config.paths.template_dir, PathBuf::from("/srv/templates"));
        assert_eq!(config.paths.output_dir, PathBuf::from("use-cases"));
        assert_eq!(config.logging.level, "debug");
        assert!(config.paths.catalog.is_none());
    }

    #[test]
    fn test_parse_error() {
        let err = ConfigLoader::parse("paths: [not, a, map]").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = ConfigLoader::load_config("does/not/exist.yaml").unwrap_err();
        assert!(err.to_string().contains("does/not/exist.yaml"));

        let converted: EurostatError = err.into();
        assert!(matches!(converted, EurostatError::Config { .. }));
    }
}
