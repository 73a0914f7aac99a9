//! # EUROSTAT Common
//!
//! Shared error types, logging setup and test helpers for the EUROSTAT
//! notebook workspace.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::{EurostatError, Result};
pub use logging::{init_default_logging, init_logging, LogFormat, LoggingConfig};
