//! Labeled array types consumed by the plotting helpers.

use chrono::NaiveDateTime;
use eurostat_common::{EurostatError, Result};
use serde::{Deserialize, Serialize};

/// Name of the latitude dimension.
pub const LATITUDE: &str = "latitude";

/// Name of the longitude dimension.
pub const LONGITUDE: &str = "longitude";

/// Default name of the time dimension.
pub const TIME: &str = "time";

/// A point in geographic coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Degrees east.
    pub longitude: f64,
    /// Degrees north.
    pub latitude: f64,
}

impl Location {
    /// A location at the given coordinates.
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

/// Geographic bounding box in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    /// Western longitude.
    pub west: f64,
    /// Eastern longitude.
    pub east: f64,
    /// Southern latitude.
    pub south: f64,
    /// Northern latitude.
    pub north: f64,
}

impl Extent {
    /// Creates an extent from `[west, east, south, north]`.
    pub fn new(west: f64, east: f64, south: f64, north: f64) -> Result<Self> {
        if !(west < east) || !(south < north) {
            return Err(EurostatError::graph(format!(
                "Invalid extent [{west}, {east}, {south}, {north}]"
            )));
        }
        Ok(Self {
            west,
            east,
            south,
            north,
        })
    }

    /// Whether the point lies inside, edges included.
    pub fn contains(&self, longitude: f64, latitude: f64) -> bool {
        (self.west..=self.east).contains(&longitude) && (self.south..=self.north).contains(&latitude)
    }
}

/// A 2-D field over latitude × longitude, stored row-major by latitude.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoGrid {
    latitude: Vec<f64>,
    longitude: Vec<f64>,
    values: Vec<f64>,
    units: Option<String>,
    name: Option<String>,
}

impl GeoGrid {
    /// Builds a grid from coordinates and `latitude.len() * longitude.len()` values.
    pub fn new(latitude: Vec<f64>, longitude: Vec<f64>, values: Vec<f64>) -> Result<Self> {
        if latitude.is_empty() || longitude.is_empty() {
            return Err(EurostatError::dimension_mismatch(
                "latitude and longitude must both be non-empty",
            ));
        }

        let expected = latitude.len() * longitude.len();
        if values.len() != expected {
            return Err(EurostatError::dimension_mismatch(format!(
                "expected {expected} values for a {}x{} grid, got {}",
                latitude.len(),
                longitude.len(),
                values.len()
            )));
        }

        Ok(Self {
            latitude,
            longitude,
            values,
            units: None,
            name: None,
        })
    }

    /// Builds a grid from named dimensions in either spatial order.
    ///
    /// Values are laid out row-major along `dims`; a `(longitude, latitude)`
    /// layout is transposed. Any other dimension name is rejected.
    pub fn from_dims(
        dims: [&str; 2],
        coords: [Vec<f64>; 2],
        values: Vec<f64>,
    ) -> Result<Self> {
        let [first, second] = coords;
        match dims {
            [LATITUDE, LONGITUDE] => Self::new(first, second, values),
            [LONGITUDE, LATITUDE] => {
                if values.len() != first.len() * second.len() {
                    return Err(EurostatError::dimension_mismatch(format!(
                        "expected {} values, got {}",
                        first.len() * second.len(),
                        values.len()
                    )));
                }
                let (n_lon, n_lat) = (first.len(), second.len());
                let mut transposed = Vec::with_capacity(values.len());
                for j in 0..n_lat {
                    for i in 0..n_lon {
                        transposed.push(values[i * n_lat + j]);
                    }
                }
                Self::new(second, first, transposed)
            }
            other => Err(EurostatError::dimension_mismatch(format!(
                "expected dimensions ({LATITUDE}, {LONGITUDE}), got ({}, {})",
                other[0], other[1]
            ))),
        }
    }

    /// Sets the units shown on the colorbar.
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }

    /// Sets the variable name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Latitude coordinate of each row.
    pub fn latitude(&self) -> &[f64] {
        &self.latitude
    }

    /// Longitude coordinate of each column.
    pub fn longitude(&self) -> &[f64] {
        &self.longitude
    }

    /// Values in row-major order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Units of the values, if known.
    pub fn units(&self) -> Option<&str> {
        self.units.as_deref()
    }

    /// Variable name, if known.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Value at latitude index `row`, longitude index `col`.
    pub fn value(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.latitude.len() || col >= self.longitude.len() {
            return None;
        }
        self.values.get(row * self.longitude.len() + col).copied()
    }

    /// Minimum and maximum over finite values, `None` if there are none.
    pub fn finite_range(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Iterates over grid cells in row-major order.
    ///
    /// Cell edges sit halfway between neighbouring coordinate centres.
    pub fn cells(&self) -> impl Iterator<Item = GridCell> + '_ {
        let lat_edges = cell_edges(&self.latitude);
        let lon_edges = cell_edges(&self.longitude);
        let n_lon = self.longitude.len();

        self.values.iter().enumerate().map(move |(idx, &value)| {
            let (row, col) = (idx / n_lon, idx % n_lon);
            let (south, north) = ordered(lat_edges[row], lat_edges[row + 1]);
            let (west, east) = ordered(lon_edges[col], lon_edges[col + 1]);
            GridCell {
                west,
                east,
                south,
                north,
                value,
            }
        })
    }
}

/// One rectangular cell of a [`GeoGrid`] in geographic coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    /// Western edge.
    pub west: f64,
    /// Eastern edge.
    pub east: f64,
    /// Southern edge.
    pub south: f64,
    /// Northern edge.
    pub north: f64,
    /// Cell value, possibly NaN.
    pub value: f64,
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

fn cell_edges(centres: &[f64]) -> Vec<f64> {
    match centres {
        [] => Vec::new(),
        [only] => vec![only - 0.5, only + 0.5],
        _ => {
            let n = centres.len();
            let mut edges = Vec::with_capacity(n + 1);
            edges.push(centres[0] - (centres[1] - centres[0]) / 2.0);
            edges.extend(centres.windows(2).map(|w| (w[0] + w[1]) / 2.0));
            edges.push(centres[n - 1] + (centres[n - 1] - centres[n - 2]) / 2.0);
            edges
        }
    }
}

/// Samples along a named time dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    dimension: String,
    times: Vec<NaiveDateTime>,
    values: Vec<f64>,
    units: Option<String>,
}

impl TimeSeries {
    /// Builds a series along `dimension` from parallel time and value vectors.
    pub fn new(
        dimension: impl Into<String>,
        times: Vec<NaiveDateTime>,
        values: Vec<f64>,
    ) -> Result<Self> {
        let dimension = dimension.into();
        if times.len() != values.len() {
            return Err(EurostatError::dimension_mismatch(format!(
                "dimension '{dimension}' has {} coordinates but {} values",
                times.len(),
                values.len()
            )));
        }
        Ok(Self {
            dimension,
            times,
            values,
            units: None,
        })
    }

    /// Builds a series along the default `time` dimension.
    pub fn from_samples(samples: impl IntoIterator<Item = (NaiveDateTime, f64)>) -> Self {
        let (times, values) = samples.into_iter().unzip();
        Self {
            dimension: TIME.to_string(),
            times,
            values,
            units: None,
        }
    }

    /// Sets the units of the values.
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }

    /// Name of the time dimension.
    pub fn dimension(&self) -> &str {
        &self.dimension
    }

    /// Units of the values, if known.
    pub fn units(&self) -> Option<&str> {
        self.units.as_deref()
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no samples.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Samples in time order.
    pub fn samples(&self) -> impl Iterator<Item = (NaiveDateTime, f64)> + '_ {
        self.times.iter().copied().zip(self.values.iter().copied())
    }
}
