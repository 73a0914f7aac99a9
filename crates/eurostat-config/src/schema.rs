//! Configuration schema definitions using serde.

use eurostat_common::{EurostatError, LogFormat, LoggingConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for the notebook generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input and output locations.
    pub paths: PathsConfig,
    /// Template file names inside the template directory.
    pub templates: TemplatesConfig,
    /// Logging configuration.
    pub logging: LoggingSettings,
}

/// Input and output locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory holding the notebook templates.
    pub template_dir: PathBuf,
    /// Directory the rendered notebooks are written to.
    pub output_dir: PathBuf,
    /// Optional YAML catalog replacing the built-in dataset list.
    pub catalog: Option<PathBuf>,
}

/// Template file names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplatesConfig {
    /// Template for datasets exposing a single variable.
    pub single_variable: String,
    /// Template for datasets exposing several variables.
    pub multi_variable: String,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Level filter, e.g. `info` or `eurostat_notebooks=debug`.
    pub level: String,
    /// Output format.
    pub format: LogFormat,
    /// Optional log file; stderr when absent.
    pub file: Option<PathBuf>,
}

impl Config {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), EurostatError> {
        if self.paths.template_dir.as_os_str().is_empty() {
            return Err(EurostatError::config("Template directory cannot be empty"));
        }

        if self.paths.output_dir.as_os_str().is_empty() {
            return Err(EurostatError::config("Output directory cannot be empty"));
        }

        for (field, name) in [
            ("templates.single_variable", &self.templates.single_variable),
            ("templates.multi_variable", &self.templates.multi_variable),
        ] {
            if name.trim().is_empty() {
                return Err(EurostatError::config(format!("{field} cannot be empty")));
            }
        }

        if self.logging.level.trim().is_empty() {
            return Err(EurostatError::config("Log level cannot be empty"));
        }

        Ok(())
    }

    /// Logging setup derived from this configuration.
    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.logging.level.clone(),
            format: self.logging.format,
            file_path: self.logging.file.clone(),
            ..LoggingConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_empty_template_name_rejected() {
        let mut config = Config::default();
        config.templates.multi_variable = "  ".to_string();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("templates.multi_variable"));
    }

    #[test]
    fn test_empty_output_dir_rejected() {
        let mut config = Config::default();
        config.paths.output_dir = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: Config = serde_yaml::from_str("paths:\n  output_dir: out\n").unwrap();
        assert_eq!(config.paths.output_dir, PathBuf::from("out"));
        assert_eq!(config.paths.template_dir, PathBuf::from("templates"));
        assert_eq!(config.templates, TemplatesConfig::default());
    }

    #[test]
    fn test_logging_config_conversion() {
        let mut config = Config::default();
        config.logging.level = "debug".to_string();
        config.logging.format = LogFormat::Json;

        let logging = config.logging_config();
        assert_eq!(logging.level, "debug");
        assert_eq!(logging.format, LogFormat::Json);
        assert!(logging.file_path.is_none());
    }
}
