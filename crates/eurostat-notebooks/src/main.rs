//! Command-line entry point: renders every catalog dataset into a notebook.

use anyhow::{Context, Result};
use eurostat_config::{Config, ConfigLoader};
use eurostat_notebooks::{Catalog, NotebookGenerator, TemplateSet};
use tracing::info;

fn main() -> Result<()> {
    let config = ConfigLoader::load().context("Failed to load configuration")?;
    eurostat_common::init_logging(config.logging_config())
        .context("Failed to initialize logging")?;

    info!("Starting EUROSTAT notebook generation");
    let written = run(&config)?;
    info!("Generated {} notebook(s)", written);
    Ok(())
}

fn run(config: &Config) -> Result<usize> {
    let loaded;
    let catalog = match &config.paths.catalog {
        Some(path) => {
            loaded = Catalog::from_yaml_file(path)
                .with_context(|| format!("Failed to load catalog {}", path.display()))?;
            &loaded
        }
        None => Catalog::builtin(),
    };

    let generator = NotebookGenerator::new(
        TemplateSet::from_config(&config.paths.template_dir, &config.templates),
        &config.paths.output_dir,
    );
    let written = generator
        .generate_all(catalog)
        .context("Notebook generation failed")?;
    Ok(written.len())
}
