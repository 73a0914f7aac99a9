//! # EUROSTAT Config
//!
//! Type-safe configuration for the notebook generator.
//!
//! This crate provides the configuration schema, its defaults, and a loader
//! reading YAML files with environment variable overrides.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
