//! Test utilities and shared fixtures for the EUROSTAT notebook workspace.
//!
//! Enabled for other crates through the `testing` feature.

use chrono::{NaiveDate, NaiveDateTime};
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = fmt()
            .with_test_writer()
            .with_env_filter(filter)
            .try_init();
    });
}

/// Midnight timestamp for the given calendar day.
pub fn mock_datetime(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .expect("valid test date")
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(feature = "tempfile")]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// Time series fixtures in the shape the comparison chart expects.
pub mod series_fixtures {
    use super::*;
    use chrono::Duration;

    /// Hourly samples with a constant value over `days` days starting on 1 January.
    pub fn hourly_constant(year: i32, days: u32, value: f64) -> Vec<(NaiveDateTime, f64)> {
        let start = mock_datetime(year, 1, 1);
        (0..days * 24)
            .map(|hour| (start + Duration::hours(i64::from(hour)), value))
            .collect()
    }

    /// One sample per day for a whole calendar year, value `base + day_index * step`.
    pub fn daily_ramp(year: i32, base: f64, step: f64) -> Vec<(NaiveDateTime, f64)> {
        let start = mock_datetime(year, 1, 1);
        let end = mock_datetime(year + 1, 1, 1);
        let days = (end - start).num_days();
        (0..days)
            .map(|day| (start + Duration::days(day), base + day as f64 * step))
            .collect()
    }
}

/// Notebook template fixtures.
pub mod template_fixtures {
    /// A minimal notebook template using every placeholder once.
    pub fn single_variable_template() -> &'static str {
        r##"{
 "cells": [
  {
   "cell_type": "markdown",
   "metadata": {},
   "source": ["# {{title}}\n", "Dataset: {{dataset_name}}\n", "[metadata]({{metadata_link}}) [source]({{eurostat_link}})"]
  },
  {
   "cell_type": "code",
   "metadata": {},
   "source": ["ds = xr.open_dataset(\"{{dataset_zarr}}\", engine=\"zarr\")\n", "var = \"{{dataset_var}}\"  # {{dataset_var_desc}}"]
  }
 ],
 "nbformat": 4,
 "nbformat_minor": 5
}
"##
    }

    /// A minimal multi-variable template rendering the variables as a list literal.
    pub fn multi_variable_template() -> &'static str {
        r##"{
 "cells": [
  {
   "cell_type": "code",
   "metadata": {},
   "source": ["# {{title}} ({{dataset_name}})\n", "variables = {{dataset_var}}\n", "# {{dataset_var_desc}} {{metadata_link}} {{eurostat_link}} {{dataset_zarr}}"]
  }
 ],
 "nbformat": 4,
 "nbformat_minor": 5
}
"##
    }
}

/// Property-based testing utilities using proptest.
#[cfg(feature = "proptest")]
pub mod property_testing {
    use proptest::prelude::*;

    /// Strategy for dataset names made of words separated by single spaces.
    pub fn dataset_name_strategy() -> impl Strategy<Value = String> {
        proptest::collection::vec(r"[a-zA-Z0-9_]{1,12}", 1..6).prop_map(|words| words.join(" "))
    }

    /// Strategy for variable identifiers such as `L3_NR_HDD`.
    pub fn variable_name_strategy() -> impl Strategy<Value = String> {
        r"L[0-3]_[A-Z0-9_]{2,20}".prop_map(|s| s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_init_logging_multiple_calls() {
        init_test_logging();
        init_test_logging();
    }

    #[test]
    fn test_mock_datetime() {
        let timestamp = mock_datetime(2024, 2, 29);
        assert_eq!(timestamp.year(), 2024);
        assert_eq!(timestamp.month(), 2);
        assert_eq!(timestamp.day(), 29);
        assert_eq!(timestamp.hour(), 0);
    }

    #[test]
    fn test_assert_approx_eq() {
        assert_approx_eq(1.0, 1.0001, 0.001);
        assert_approx_eq(1.0, 0.9999, 0.001);
    }

    #[test]
    #[should_panic]
    fn test_assert_approx_eq_fails() {
        assert_approx_eq(1.0, 1.1, 0.05);
    }

    #[test]
    fn test_series_fixtures() {
        let hourly = series_fixtures::hourly_constant(2023, 2, 0.5);
        assert_eq!(hourly.len(), 48);
        assert_eq!(hourly[0].0, mock_datetime(2023, 1, 1));

        assert_eq!(series_fixtures::daily_ramp(2023, 0.0, 1.0).len(), 365);
        assert_eq!(series_fixtures::daily_ramp(2024, 0.0, 1.0).len(), 366);
    }

    #[test]
    fn test_templates_are_valid_json() {
        for template in [
            template_fixtures::single_variable_template(),
            template_fixtures::multi_variable_template(),
        ] {
            assert!(serde_json::from_str::<serde_json::Value>(template).is_ok());
        }
    }
}
