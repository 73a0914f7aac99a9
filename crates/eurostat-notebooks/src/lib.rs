//! # EUROSTAT Notebooks
//!
//! Generates one Jupyter notebook per EUROSTAT dataset from two notebook
//! templates: one for datasets with a single variable and one for datasets
//! with several.
//!
//! The built-in [`Catalog`] lists the datasets published on the Earth Data
//! Hub; a YAML catalog can replace it.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod generator;
pub mod template;

pub use catalog::{Catalog, DatasetDescriptor, Variable};
pub use generator::{generate_all, notebook_file_name, NotebookGenerator};
pub use template::{NotebookRenderer, TemplateKind, TemplateSet};
