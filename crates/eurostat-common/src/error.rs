//! Error types and utilities for the EUROSTAT notebook tooling

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for notebook generation and plotting operations
pub type Result<T> = std::result::Result<T, EurostatError>;

/// Main error type shared by the generator and the display helpers
#[derive(Error, Debug)]
pub enum EurostatError {
    /// The selected notebook template does not exist
    #[error("Template not found: {}", path.display())]
    TemplateNotFound {
        /// Path that was looked up
        path: PathBuf,
    },

    /// Template parsing or placeholder substitution failed
    #[error("Template error: {message}")]
    Template {
        /// What went wrong
        message: String,
        /// Underlying renderer error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generating the notebook of one dataset failed
    #[error("Failed to generate notebook for '{dataset}': {source}")]
    Generation {
        /// Name of the dataset
        dataset: String,
        /// The render or write failure
        #[source]
        source: Box<EurostatError>,
    },

    /// Data passed to a plotting helper lacks the expected dimensions
    #[error("Dimension mismatch: {message}")]
    DimensionMismatch {
        /// Expected and actual dimension
        message: String,
    },

    /// Graph generation and plotting errors
    #[error("Graph error: {message}")]
    Graph {
        /// What went wrong
        message: String,
        /// Underlying plotting error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
        /// Underlying parse or I/O error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with custom message
    #[error("{message}")]
    Generic {
        /// What went wrong
        message: String,
        /// Underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl EurostatError {
    /// Create a new generic error with a custom message
    pub fn new(msg: impl Into<String>) -> Self {
        Self::Generic {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new generic error with a custom message and source
    pub fn with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Generic {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a template-not-found error for the given path
    pub fn template_not_found(path: impl Into<PathBuf>) -> Self {
        Self::TemplateNotFound { path: path.into() }
    }

    /// Attach the name of the dataset whose notebook failed
    pub fn generation(dataset: impl Into<String>, source: EurostatError) -> Self {
        Self::Generation {
            dataset: dataset.into(),
            source: Box::new(source),
        }
    }

    /// Create a new template error
    pub fn template(msg: impl Into<String>) -> Self {
        Self::Template {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new template error with source
    pub fn template_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Template {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new dimension mismatch error
    pub fn dimension_mismatch(msg: impl Into<String>) -> Self {
        Self::DimensionMismatch {
            message: msg.into(),
        }
    }

    /// Create a new graph error
    pub fn graph(msg: impl Into<String>) -> Self {
        Self::Graph {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new graph error with source
    pub fn graph_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Graph {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }
}

#[cfg(feature = "plotters")]
/// Convert from plotters drawing errors to EurostatError
impl<T> From<plotters::drawing::DrawingAreaErrorKind<T>> for EurostatError
where
    T: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        Self::graph_with_source("Graph rendering failed", err)
    }
}
