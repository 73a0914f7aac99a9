//! Writes one rendered notebook per dataset descriptor.

use crate::catalog::DatasetDescriptor;
use crate::template::{NotebookRenderer, TemplateSet};
use eurostat_common::{EurostatError, Result};
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// File name of the notebook generated for dataset `name`.
///
/// Spaces become hyphens; nothing else is changed.
pub fn notebook_file_name(name: &str) -> String {
    format!("eurostats_{}.ipynb", name.replace(' ', "-"))
}

/// Renders descriptors into an output directory.
pub struct NotebookGenerator {
    renderer: NotebookRenderer,
    output_dir: PathBuf,
}

impl NotebookGenerator {
    /// Creates a generator reading `templates` and writing into `output_dir`.
    pub fn new(templates: TemplateSet, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            renderer: NotebookRenderer::new(templates),
            output_dir: output_dir.into(),
        }
    }

    /// Directory the notebooks are written to.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Output path of the notebook for `descriptor`.
    pub fn notebook_path(&self, descriptor: &DatasetDescriptor) -> PathBuf {
        self.output_dir.join(notebook_file_name(&descriptor.name))
    }

    /// Renders and writes the notebook for one descriptor, replacing any existing file.
    ///
    /// Failures are returned as [`EurostatError::Generation`] naming the dataset.
    pub fn generate(&self, descriptor: &DatasetDescriptor) -> Result<PathBuf> {
        let notebook = self
            .renderer
            .render(descriptor)
            .map_err(|e| EurostatError::generation(&descriptor.name, e))?;
        let path = self.notebook_path(descriptor);
        std::fs::write(&path, notebook).map_err(|e| {
            EurostatError::generation(
                &descriptor.name,
                EurostatError::with_source(format!("Failed to write {}", path.display()), e),
            )
        })?;
        info!(dataset = %descriptor.name, "Wrote notebook {}", path.display());
        Ok(path)
    }

    /// Generates notebooks in order and stops at the first failure.
    ///
    /// Notebooks written before the failure are left in place.
    pub fn generate_all<'a>(
        &self,
        descriptors: impl IntoIterator<Item = &'a DatasetDescriptor>,
    ) -> Result<Vec<PathBuf>> {
        descriptors
            .into_iter()
            .map(|descriptor| {
                self.generate(descriptor).inspect_err(|e| {
                    error!(dataset = %descriptor.name, "Notebook generation failed: {}", e);
                })
            })
            .collect()
    }
}

/// Generates one notebook per descriptor from the default templates in
/// `template_dir`, writing them to `output_dir`.
pub fn generate_all<'a>(
    descriptors: impl IntoIterator<Item = &'a DatasetDescriptor>,
    template_dir: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
) -> Result<Vec<PathBuf>> {
    NotebookGenerator::new(
        TemplateSet::new(template_dir.as_ref()),
        output_dir.as_ref(),
    )
    .generate_all(descriptors)
}
