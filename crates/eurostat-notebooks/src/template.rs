//! Notebook template selection and placeholder substitution.

use crate::catalog::{DatasetDescriptor, Variable};
use eurostat_common::{EurostatError, Result};
use eurostat_config::{defaults, TemplatesConfig};
use handlebars::Handlebars;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Which of the two notebook templates a dataset uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    /// `eurostats_template.ipynb`
    SingleVariable,
    /// `eurostats_several_vars_template.ipynb`
    MultiVariable,
}

impl TemplateKind {
    /// Template used for a dataset with `variable`.
    pub fn for_variable(variable: &Variable) -> Self {
        match variable {
            Variable::Single(_) => Self::SingleVariable,
            Variable::Multiple(_) => Self::MultiVariable,
        }
    }

    /// Default file name of the template.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::SingleVariable => defaults::SINGLE_VARIABLE_TEMPLATE,
            Self::MultiVariable => defaults::MULTI_VARIABLE_TEMPLATE,
        }
    }
}

/// Template files inside a template directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSet {
    dir: PathBuf,
    single_variable: String,
    multi_variable: String,
}

impl TemplateSet {
    /// Uses the default template file names inside `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            single_variable: TemplateKind::SingleVariable.file_name().to_string(),
            multi_variable: TemplateKind::MultiVariable.file_name().to_string(),
        }
    }

    /// Uses the file names configured in `templates`.
    pub fn from_config(dir: impl Into<PathBuf>, templates: &TemplatesConfig) -> Self {
        Self {
            dir: dir.into(),
            single_variable: templates.single_variable.clone(),
            multi_variable: templates.multi_variable.clone(),
        }
    }

    /// Directory holding the templates.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of the template of `kind`.
    pub fn path(&self, kind: TemplateKind) -> PathBuf {
        match kind {
            TemplateKind::SingleVariable => self.dir.join(&self.single_variable),
            TemplateKind::MultiVariable => self.dir.join(&self.multi_variable),
        }
    }
}

/// Values bound to the template placeholders.
#[derive(Debug, Serialize)]
struct TemplateContext<'a> {
    title: &'a str,
    dataset_name: &'a str,
    metadata_link: &'a str,
    eurostat_link: &'a str,
    dataset_zarr: &'a str,
    dataset_var: String,
    dataset_var_desc: &'a str,
}

impl<'a> From<&'a DatasetDescriptor> for TemplateContext<'a> {
    fn from(descriptor: &'a DatasetDescriptor) -> Self {
        Self {
            title: &descriptor.title,
            dataset_name: &descriptor.name,
            metadata_link: &descriptor.metadata_link,
            eurostat_link: &descriptor.source_link,
            dataset_zarr: &descriptor.store_file,
            dataset_var: descriptor.variable.template_value(),
            dataset_var_desc: &descriptor.variable_description,
        }
    }
}

/// Fills notebook templates for dataset descriptors.
///
/// Templates are read from disk on every call. Rendering is strict: a
/// placeholder without a value is an error instead of an empty string.
pub struct NotebookRenderer {
    templates: TemplateSet,
    registry: Handlebars<'static>,
}

impl NotebookRenderer {
    /// Creates a strict renderer over `templates`.
    pub fn new(templates: TemplateSet) -> Self {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::no_escape);
        Self {
            templates,
            registry,
        }
    }

    /// Templates this renderer reads.
    pub fn templates(&self) -> &TemplateSet {
        &self.templates
    }

    /// Renders the notebook text for `descriptor`.
    pub fn render(&self, descriptor: &DatasetDescriptor) -> Result<String> {
        let kind = TemplateKind::for_variable(&descriptor.variable);
        let path = self.templates.path(kind);
        debug!(dataset = %descriptor.name, template = %path.display(), "Selected template");

        let text = read_template(&path)?;
        self.render_str(&text, descriptor)
    }

    /// Renders template `text` for `descriptor`.
    pub fn render_str(&self, text: &str, descriptor: &DatasetDescriptor) -> Result<String> {
        let context = TemplateContext::from(descriptor);
        let mut rendered = self.registry.render_template(text, &context).map_err(|e| {
            EurostatError::template_with_source(
                format!("Failed to render notebook for '{}'", descriptor.name),
                e,
            )
        })?;

        // a single trailing newline of the template is not kept
        if rendered.ends_with('\n') {
            rendered.pop();
            if rendered.ends_with('\r') {
                rendered.pop();
            }
        }
        Ok(rendered)
    }
}

fn read_template(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => EurostatError::template_not_found(path),
        _ => EurostatError::Io(e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use eurostat_common::test_utils::template_fixtures;

    fn renderer() -> NotebookRenderer {
        NotebookRenderer::new(TemplateSet::new("templates"))
    }

    #[test]
    fn test_template_kind_selection() {
        assert_eq!(
            TemplateKind::for_variable(&Variable::Single("L3_PER_KM2".into())),
            TemplateKind::SingleVariable
        );
        assert_eq!(
            TemplateKind::for_variable(&Variable::Multiple(vec!["A".into(), "B".into()])),
            TemplateKind::MultiVariable
        );
        assert_eq!(
            TemplateKind::MultiVariable.file_name(),
            "eurostats_several_vars_template.ipynb"
        );
    }

    #[test]
    fn test_template_set_paths() {
        let set = TemplateSet::new("templates");
        assert_eq!(
            set.path(TemplateKind::SingleVariable),
            Path::new("templates/eurostats_template.ipynb")
        );

        let config = TemplatesConfig {
            single_variable: "one.ipynb".into(),
            multi_variable: "many.ipynb".into(),
        };
        let set = TemplateSet::from_config("tpl", &config);
        assert_eq!(set.path(TemplateKind::MultiVariable), Path::new("tpl/many.ipynb"));
    }

    #[test]
    fn test_render_substitutes_all_placeholders() {
        let descriptor = Catalog::builtin().get("population density").unwrap();
        let rendered = renderer()
            .render_str(template_fixtures::single_variable_template(), descriptor)
            .unwrap();

        assert!(rendered.contains("# Eurostat population density data over Europe"));
        assert!(rendered.contains("Dataset: population density"));
        assert!(rendered.contains(r#"var = \"L3_PER_KM2\""#));
        assert!(rendered.contains("demo_r_d3dens-19900101-20220101.zarr"));
        assert!(!rendered.contains("{{"));
    }

    #[test]
    fn test_render_multi_variable_list_literal() {
        let descriptor = Catalog::builtin().get("CDD and HDD data").unwrap();
        let rendered = renderer()
            .render_str(template_fixtures::multi_variable_template(), descriptor)
            .unwrap();

        assert!(rendered.contains("variables = ['L3_NR_CDD', 'L3_NR_HDD']"));
        // no HTML escaping
        assert!(rendered.contains("Eurostat CDD & HDD data over Europe"));
    }

    #[test]
    fn test_trailing_newline_is_dropped() {
        let descriptor = Catalog::builtin().get("gerd").unwrap();
        let rendered = renderer().render_str("{{dataset_name}}\n", descriptor).unwrap();
        assert_eq!(rendered, "gerd");

        let rendered = renderer().render_str("{{dataset_name}}\n\n", descriptor).unwrap();
        assert_eq!(rendered, "gerd\n");
    }

    #[test]
    fn test_unknown_placeholder_fails() {
        let descriptor = Catalog::builtin().get("gerd").unwrap();
        let err = renderer().render_str("{{dataset_unit}}", descriptor).unwrap_err();
        assert!(matches!(err, EurostatError::Template { .. }));
    }

    #[test]
    fn test_missing_template_file() {
        let renderer = NotebookRenderer::new(TemplateSet::new("/nonexistent/templates"));
        let descriptor = Catalog::builtin().get("gerd").unwrap();

        match renderer.render(descriptor).unwrap_err() {
            EurostatError::TemplateNotFound { path } => {
                assert!(path.ends_with("eurostats_template.ipynb"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
