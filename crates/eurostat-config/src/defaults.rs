//! Default values matching the repository layout of the notebook generator.

use crate::schema::*;
use eurostat_common::LogFormat;
use std::path::PathBuf;

/// Default template directory, relative to the working directory.
pub const DEFAULT_TEMPLATE_DIR: &str = "templates";

/// Default output directory, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "use-cases";

/// Default single-variable template file name.
pub const SINGLE_VARIABLE_TEMPLATE: &str = "eurostats_template.ipynb";

/// Default multi-variable template file name.
pub const MULTI_VARIABLE_TEMPLATE: &str = "eurostats_several_vars_template.ipynb";

impl Default for Config {
    fn default() -> Self {
        Self {
            paths: PathsConfig::default(),
            templates: TemplatesConfig::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            template_dir: PathBuf::from(DEFAULT_TEMPLATE_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            catalog: None,
        }
    }
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            single_variable: SINGLE_VARIABLE_TEMPLATE.to_string(),
            multi_variable: MULTI_VARIABLE_TEMPLATE.to_string(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
            file: None,
        }
    }
}
