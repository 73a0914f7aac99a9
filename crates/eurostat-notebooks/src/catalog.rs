//! Dataset descriptors and the built-in catalog of EUROSTAT datasets.

use eurostat_common::{EurostatError, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// The variable (or variables) a notebook plots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Variable {
    /// One variable, rendered with the single-variable template.
    Single(String),
    /// Several variables shown side by side.
    Multiple(Vec<String>),
}

impl Variable {
    /// Whether the dataset needs the multi-variable template.
    pub fn is_multiple(&self) -> bool {
        matches!(self, Self::Multiple(_))
    }

    /// Text substituted for the `dataset_var` placeholder.
    ///
    /// A single variable is inserted bare; several variables become a Python
    /// list literal such as `['L3_NR_CDD', 'L3_NR_HDD']`.
    pub fn template_value(&self) -> String {
        match self {
            Self::Single(name) => name.clone(),
            Self::Multiple(names) => {
                let items: Vec<String> = names.iter().map(|name| format!("'{name}'")).collect();
                format!("[{}]", items.join(", "))
            }
        }
    }
}

/// Static description of one dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetDescriptor {
    /// Short identifier, also used for the notebook file name.
    pub name: String,
    /// Notebook heading.
    pub title: String,
    /// Link to the Earth Data Hub catalogue entry.
    pub metadata_link: String,
    /// Link to the EUROSTAT metadata page.
    pub source_link: String,
    /// File name of the Zarr store backing the dataset.
    pub store_file: String,
    /// Variable or variables plotted by the notebook.
    pub variable: Variable,
    /// Units and NUTS level of the variable.
    pub variable_description: String,
}

/// An ordered list of dataset descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Descriptors in generation order.
    pub datasets: Vec<DatasetDescriptor>,
}

static BUILTIN: Lazy<Catalog> = Lazy::new(|| Catalog {
    datasets: vec![
        single(
            "final energy consumption",
            "EUROSTAT Final Consumption of Energy data over Europe",
            "https://earthdatahub.com/collections/eurostat/datasets/geoprocessed-eurostat-final-energy-consumption_sdg_07_11",
            "https://ec.europa.eu/eurostat/cache/metadata/en/sdg_07_11_esmsip2.htm",
            "sdg_07_11-20000101-20210101.zarr",
            "L0_TOE_HAB",
            "on NUTS level 0 (country level) in the unit of ton of oil equivalent per habitant",
        ),
        single(
            "soil erosion",
            "Europe EUROSTAT soil erosion",
            "https://earthdatahub.com/collections/eurostat/datasets/geoprocessed-eurostat-soil-erosion-aei_pr_soiler",
            "https://ec.europa.eu/eurostat/cache/metadata/en/aei_pr_soiler_esms.htm",
            "aei_pr_soiler-20000101-20160101.zarr",
            "L3_TOTAL_CLC2_321_T",
            "on NUTS level 3 in the unit of tonnes per year for the soil erosion of agriculture areas and natural grassland",
        ),
        single(
            "population density",
            "Eurostat population density data over Europe",
            "https://earthdatahub.com/collections/eurostat/datasets/geoprocessed-eurostat-population-density-demo_r_d3dens",
            "https://ec.europa.eu/eurostat/cache/metadata/en/demo_pop_esms.htm",
            "demo_r_d3dens-19900101-20220101.zarr",
            "L3_PER_KM2",
            "on NUTS level 3 in the unit of persons per square kilometre",
        ),
        single(
            "animal populations",
            "Europe EUROSTAT Animal populations by NUTS 2 regions",
            "https://earthdatahub.com/collections/eurostat/datasets/geoprocessed-eurostat-animal-populations-agr_r_animal",
            "https://ec.europa.eu/eurostat/cache/metadata/en/apro_anip_esms.htm",
            "agr_r_animal-19770101-20230101.zarr",
            "L2_A2000_THS_HD",
            "on NUTS level 2 in the unit of thousands of heads",
        ),
        single(
            "mortality",
            "Eurostat mortality data over Europe",
            "https://earthdatahub.com/collections/eurostat/datasets/geoprocessed-eurostat-mortality-demo_r_mweek3",
            "https://ec.europa.eu/eurostat/cache/metadata/en/demomwk_esms.htm",
            "demo_r_mweek3-20000103-20231030.zarr",
            "L3_NR_T_Y65_69",
            "on NUTS level 3 in the unit of total number of deaths for the age group 65-69",
        ),
        single(
            "population",
            "Eurostat population data over Europe",
            "https://earthdatahub.com/collections/eurostat/datasets/geoprocessed-eurostat-population-demo_r_pjanaggr3",
            "https://ec.europa.eu/eurostat/cache/metadata/en/demo_r_gind3_esms.htm",
            "demo_r_pjanaggr3-19900101-20220101.zarr",
            "L3_NR_T_Y_LT15",
            "on NUTS level 3 in the unit of total number of population lower than 15 years",
        ),
        single(
            "government deficit and debt",
            "Europe EUROSTAT Government deficit and debt",
            "https://earthdatahub.com/collections/eurostat/datasets/geoprocessed-eurostat-government-deficit-surplus-gov_10dd_edpt1",
            "https://ec.europa.eu/eurostat/cache/metadata/en/gov_10dd_esms.htm",
            "gov_10dd_edpt1-19950101-20220101.zarr",
            "L0_MIO_EUR_S13_B9",
            "on NUTS level 0 (country level) in the unit of net borrowing or net lending of the consolidated general government sector millions of euro",
        ),
        single(
            "labour market employment rates",
            "Eurostat Regional Labour Market Employment Rates",
            "https://earthdatahub.com/collections/eurostat/datasets/geoprocessed-eurostat-employment-rates_lfst_r_erednu",
            "https://ec.europa.eu/eurostat/cache/metadata/en/reg_lmk_esms.htm",
            "lfst_r_erednu-19950101-20220101.zarr",
            "L0_TOTAL_TOTAL_TOTAL_Y15_64_T_PC",
            "on NUTS level 0 (country level) in the unit of number of persons (thousands) in age group of 15-64 years",
        ),
        single(
            "gross domestic product",
            "Europe Gross domestic product (GDP)",
            "https://earthdatahub.com/collections/eurostat/datasets/geoprocessed-eurostat-regional-economic-accounts_nama_10r_3gdp",
            "https://ec.europa.eu/eurostat/cache/metadata/en/reg_eco10_esms.htm",
            "nama_10r_3gdp-20000101-20210101.zarr",
            "L3_MIO_EUR",
            "on NUTS level 3 in the unit of millions of Euros",
        ),
        single(
            "gerd",
            "Europe EUROSTAT GERD",
            "https://earthdatahub.com/collections/eurostat/datasets/geoprocessed-eurostat-gross-domestic-expenditure-R-D-rd_e_gerdreg",
            "https://ec.europa.eu/eurostat/cache/metadata/en/rd_esms.htm",
            "rd_e_gerdreg-19800101-20220101.zarr",
            "L2_GOV_EUR_HAB",
            "on NUTS level 2 in the unit of Euro per inhabitant for the institutional sector government",
        ),
        DatasetDescriptor {
            name: "CDD and HDD data".into(),
            title: "Eurostat CDD & HDD data over Europe".into(),
            metadata_link: "https://earthdatahub.com/collections/eurostat/datasets/geoprocessed-eurostat-cooling-heating-degree-days-nrg_chddr2_a".into(),
            source_link: "https://ec.europa.eu/eurostat/cache/metadata/en/nrg_chdd_esms.htm".into(),
            store_file: "nrg_chddr2_a-19790101-20220101.zarr".into(),
            variable: Variable::Multiple(vec!["L3_NR_CDD".into(), "L3_NR_HDD".into()]),
            variable_description: "heating degree day (HDD) and cooling degree day (CDD) on NUTS level 3 in the unit of Kelvin".into(),
        },
    ],
});

fn single(
    name: &str,
    title: &str,
    metadata_link: &str,
    source_link: &str,
    store_file: &str,
    variable: &str,
    variable_description: &str,
) -> DatasetDescriptor {
    DatasetDescriptor {
        name: name.into(),
        title: title.into(),
        metadata_link: metadata_link.into(),
        source_link: source_link.into(),
        store_file: store_file.into(),
        variable: Variable::Single(variable.into()),
        variable_description: variable_description.into(),
    }
}

impl Catalog {
    /// The datasets published on the Earth Data Hub.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    /// Loads a catalog from a YAML document with a top-level `datasets` list.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let catalog = Self::from_yaml_str(&text).map_err(|e| {
            EurostatError::config_with_source(
                format!("Failed to parse catalog {}", path.display()),
                e,
            )
        })?;
        debug!(
            datasets = catalog.datasets.len(),
            "Loaded catalog from {}",
            path.display()
        );
        Ok(catalog)
    }

    /// Parses a catalog from YAML text.
    pub fn from_yaml_str(text: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }

    /// Number of datasets.
    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    /// Whether the catalog lists no dataset.
    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    /// Iterates over the descriptors in order.
    pub fn iter(&self) -> std::slice::Iter<'_, DatasetDescriptor> {
        self.datasets.iter()
    }

    /// Looks a descriptor up by its exact name.
    pub fn get(&self, name: &str) -> Option<&DatasetDescriptor> {
        self.datasets.iter().find(|dataset| dataset.name == name)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a DatasetDescriptor;
    type IntoIter = std::slice::Iter<'a, DatasetDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_order() {
        let names: Vec<&str> = Catalog::builtin().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "final energy consumption",
                "soil erosion",
                "population density",
                "animal populations",
                "mortality",
                "population",
                "government deficit and debt",
                "labour market employment rates",
                "gross domestic product",
                "gerd",
                "CDD and HDD data",
            ]
        );
    }

    #[test]
    fn test_only_degree_days_has_several_variables() {
        let multiple: Vec<&str> = Catalog::builtin()
            .iter()
            .filter(|d| d.variable.is_multiple())
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(multiple, ["CDD and HDD data"]);
    }

    #[test]
    fn test_template_value() {
        assert_eq!(Variable::Single("L3_PER_KM2".into()).template_value(), "L3_PER_KM2");
        assert_eq!(
            Variable::Multiple(vec!["L3_NR_CDD".into(), "L3_NR_HDD".into()]).template_value(),
            "['L3_NR_CDD', 'L3_NR_HDD']"
        );
    }

    #[test]
    fn test_variable_from_yaml_is_untagged() {
        let yaml = r#"
datasets:
  - name: test one
    title: Test one
    metadata_link: https://example.org/meta
    source_link: https://example.org/source
    store_file: one.zarr
    variable: L0_ONE
    variable_description: first
  - name: test two
    title: Test two
    metadata_link: https://example.org/meta
    source_link: https://example.org/source
    store_file: two.zarr
    variable: [L3_A, L3_B]
    variable_description: second
"#;
        let catalog = Catalog::from_yaml_str(yaml).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.datasets[0].variable, Variable::Single("L0_ONE".into()));
        assert_eq!(
            catalog.get("test two").unwrap().variable,
            Variable::Multiple(vec!["L3_A".into(), "L3_B".into()])
        );
    }

    #[test]
    fn test_lookup_by_name() {
        let gerd = Catalog::builtin().get("gerd").unwrap();
        assert_eq!(gerd.store_file, "rd_e_gerdreg-19800101-20220101.zarr");
        assert!(Catalog::builtin().get("unknown").is_none());
    }
}
