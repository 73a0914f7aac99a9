//! Cumulative day-of-year comparison of a current series against history.

use crate::canvas::FigureSize;
use crate::grid::{TimeSeries, TIME};
use chrono::{Datelike, Duration, NaiveDate};
use eurostat_common::{EurostatError, Result};
use std::collections::BTreeMap;
use tracing::debug;

/// Size of a comparison chart.
pub const COMPARISON_FIGURE_SIZE: FigureSize = FigureSize::new(10.0, 6.0);

/// Unit conversion applied to daily sums (metres to millimetres).
const SCALE: f64 = 1000.0;

const LOWER_QUANTILE: f64 = 0.1;
const UPPER_QUANTILE: f64 = 0.9;

/// Options for [`render_comparison`].
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonOptions {
    /// Name of the time dimension both inputs must use.
    pub time_dimension: String,
    /// Fixed y axis range in millimetres.
    pub y_limits: (f64, f64),
}

impl Default for ComparisonOptions {
    fn default() -> Self {
        Self {
            time_dimension: TIME.to_string(),
            y_limits: (0.0, 1300.0),
        }
    }
}

/// A cumulative profile as `(day_of_year, value)` points.
pub type Curve = Vec<(u32, f64)>;

/// Historical statistics for one day of the year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandPoint {
    /// Day of the year, starting at 1.
    pub day_of_year: u32,
    /// 10th percentile across years.
    pub lower: f64,
    /// 90th percentile across years.
    pub upper: f64,
    /// Mean across years.
    pub mean: f64,
    /// Number of years contributing to this day.
    pub years: usize,
}

/// Chart model produced by [`render_comparison`].
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonChart {
    current: Curve,
    historical: BTreeMap<i32, Curve>,
    band: Vec<BandPoint>,
    units: String,
    x_range: (f64, f64),
    y_range: (f64, f64),
    size: FigureSize,
    labels: bool,
}

impl ComparisonChart {
    /// Cumulative profile of the current data.
    pub fn current(&self) -> &[(u32, f64)] {
        &self.current
    }

    /// Cumulative profile per historical year.
    pub fn historical(&self) -> &BTreeMap<i32, Curve> {
        &self.historical
    }

    /// Percentile band and mean per day of year.
    pub fn band(&self) -> &[BandPoint] {
        &self.band
    }

    /// Mean historical profile.
    pub fn mean(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.band.iter().map(|point| (point.day_of_year, point.mean))
    }

    /// Units of the y axis.
    pub fn units(&self) -> &str {
        &self.units
    }

    /// Day-of-year axis range.
    pub fn x_range(&self) -> (f64, f64) {
        self.x_range
    }

    /// Y axis range.
    pub fn y_range(&self) -> (f64, f64) {
        self.y_range
    }

    /// Size of the chart figure.
    pub fn size(&self) -> FigureSize {
        self.size
    }

    /// Number of historical years.
    pub fn year_count(&self) -> usize {
        self.historical.len()
    }

    /// Whether axes and their descriptions are drawn.
    pub fn has_labels(&self) -> bool {
        self.labels
    }

    /// Turns the axes and their descriptions on or off.
    pub fn set_labels(&mut self, labels: bool) {
        self.labels = labels;
    }
}

/// Compares the cumulative daily profile of `data` with `historical` years.
///
/// Both series are resampled to daily sums and scaled to millimetres. The
/// current data becomes one running total by day of year; the history
/// becomes one running total per year, summarised per day by its mean and a
/// 10 %/90 % percentile band.
pub fn render_comparison(
    data: &TimeSeries,
    historical: &TimeSeries,
    options: &ComparisonOptions,
) -> Result<ComparisonChart> {
    for series in [data, historical] {
        if series.dimension() != options.time_dimension {
            return Err(EurostatError::dimension_mismatch(format!(
                "expected time dimension '{}', got '{}'",
                options.time_dimension,
                series.dimension()
            )));
        }
    }

    let (y_min, y_max) = options.y_limits;
    if !(y_min < y_max) {
        return Err(EurostatError::graph(format!(
            "Invalid y limits [{y_min}, {y_max}]"
        )));
    }

    let current = cumulative(daily_totals(data).into_iter());

    let mut by_year: BTreeMap<i32, Vec<(NaiveDate, f64)>> = BTreeMap::new();
    for (date, total) in daily_totals(historical) {
        by_year.entry(date.year()).or_default().push((date, total));
    }
    let historical: BTreeMap<i32, Curve> = by_year
        .into_iter()
        .map(|(year, days)| (year, cumulative(days.into_iter())))
        .collect();

    let band = band(&historical);
    debug!(
        current_days = current.len(),
        years = historical.len(),
        band_days = band.len(),
        "Computed comparison profiles"
    );

    Ok(ComparisonChart {
        current,
        historical,
        band,
        units: "mm".to_string(),
        x_range: (0.0, 366.0),
        y_range: options.y_limits,
        size: COMPARISON_FIGURE_SIZE,
        labels: true,
    })
}

/// Daily sums of the finite samples, scaled, with empty days in between as zero.
fn daily_totals(series: &TimeSeries) -> BTreeMap<NaiveDate, f64> {
    let mut totals: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for (time, value) in series.samples() {
        let total = totals.entry(time.date()).or_insert(0.0);
        if value.is_finite() {
            *total += value * SCALE;
        }
    }

    if let (Some(&first), Some(&last)) = (totals.keys().next(), totals.keys().next_back()) {
        let mut day = first;
        while day < last {
            totals.entry(day).or_insert(0.0);
            day += Duration::days(1);
        }
    }
    totals
}

fn cumulative(days: impl Iterator<Item = (NaiveDate, f64)>) -> Curve {
    days.scan(0.0, |running, (date, total)| {
        *running += total;
        Some((date.ordinal(), *running))
    })
    .collect()
}

fn band(historical: &BTreeMap<i32, Curve>) -> Vec<BandPoint> {
    let mut per_day: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
    for curve in historical.values() {
        for &(day, value) in curve {
            per_day.entry(day).or_default().push(value);
        }
    }

    per_day
        .into_iter()
        .map(|(day_of_year, mut values)| {
            values.sort_by(f64::total_cmp);
            let mean = values.iter().sum::<f64>() / values.len() as f64;
            BandPoint {
                day_of_year,
                lower: quantile(&values, LOWER_QUANTILE),
                upper: quantile(&values, UPPER_QUANTILE),
                mean,
                years: values.len(),
            }
        })
        .collect()
}

/// Linearly interpolated quantile of sorted, non-empty `values`.
fn quantile(values: &[f64], q: f64) -> f64 {
    let position = q * (values.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    values[lower] + (values[upper] - values[lower]) * (position - lower as f64)
}
