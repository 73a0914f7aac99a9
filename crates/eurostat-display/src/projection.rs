//! Map projections from geographic coordinates onto the drawing plane.

use crate::grid::Extent;
use eurostat_common::{EurostatError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Equal Earth polynomial coefficients (Šavrič, Patterson & Jenny, 2018).
const A1: f64 = 1.340_264;
const A2: f64 = -0.081_106;
const A3: f64 = 0.000_893;
const A4: f64 = 0.003_796;

/// Samples per edge when projecting an extent outline.
const EDGE_SAMPLES: usize = 32;

/// Supported map projections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Projection {
    /// Equal-area pseudocylindrical projection on the unit sphere.
    #[default]
    EqualEarth,
    /// Equirectangular projection, plane units are degrees.
    PlateCarree,
}

impl Projection {
    /// Projects a longitude/latitude pair given in degrees.
    pub fn project(&self, longitude: f64, latitude: f64) -> (f64, f64) {
        let longitude = wrap_longitude(longitude);
        let latitude = latitude.clamp(-90.0, 90.0);

        match self {
            Self::PlateCarree => (longitude, latitude),
            Self::EqualEarth => {
                let lambda = longitude.to_radians();
                let phi = latitude.to_radians();
                let theta = ((3f64.sqrt() / 2.0) * phi.sin()).asin();
                let t2 = theta * theta;
                let t6 = t2 * t2 * t2;

                let x = 2.0 * 3f64.sqrt() * lambda * theta.cos()
                    / (3.0 * (9.0 * A4 * t6 * t2 + 7.0 * A3 * t6 + 3.0 * A2 * t2 + A1));
                let y = theta * (A1 + A2 * t2 + t6 * (A3 + A4 * t2));
                (x, y)
            }
        }
    }

    /// Plane bounds of the whole globe as `(x_range, y_range)`.
    pub fn bounds(&self) -> ((f64, f64), (f64, f64)) {
        let (x_max, _) = self.project(180.0, 0.0);
        let (_, y_max) = self.project(0.0, 90.0);
        ((-x_max, x_max), (-y_max, y_max))
    }

    /// Plane bounds of a geographic extent.
    ///
    /// Edges are sampled because meridians are curved in pseudocylindrical
    /// projections.
    pub fn project_extent(&self, extent: &Extent) -> ((f64, f64), (f64, f64)) {
        let mut x_range = (f64::INFINITY, f64::NEG_INFINITY);
        let mut y_range = (f64::INFINITY, f64::NEG_INFINITY);

        for i in 0..=EDGE_SAMPLES {
            let t = i as f64 / EDGE_SAMPLES as f64;
            let lon = extent.west + (extent.east - extent.west) * t;
            let lat = extent.south + (extent.north - extent.south) * t;

            for (x, y) in [
                self.project(lon, extent.south),
                self.project(lon, extent.north),
                self.project(extent.west, lat),
                self.project(extent.east, lat),
            ] {
                x_range = (x_range.0.min(x), x_range.1.max(x));
                y_range = (y_range.0.min(y), y_range.1.max(y));
            }
        }

        (x_range, y_range)
    }

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::EqualEarth => "EqualEarth",
            Self::PlateCarree => "PlateCarree",
        }
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Projection {
    type Err = EurostatError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace(['_', '-', ' '], "").as_str() {
            "equalearth" => Ok(Self::EqualEarth),
            "platecarree" | "equirectangular" => Ok(Self::PlateCarree),
            _ => Err(EurostatError::graph(format!("Unknown projection '{s}'"))),
        }
    }
}

/// Maps longitudes above 180° (0–360 grids) into the -180..180 range.
fn wrap_longitude(longitude: f64) -> f64 {
    if longitude > 180.0 {
        longitude - 360.0
    } else if longitude < -180.0 {
        longitude + 360.0
    } else {
        longitude
    }
}

/// Whether a segment between two longitudes crosses the antimeridian.
pub(crate) fn crosses_antimeridian(lon_a: f64, lon_b: f64) -> bool {
    (wrap_longitude(lon_a) - wrap_longitude(lon_b)).abs() > 180.0
}
