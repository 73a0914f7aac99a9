//! Sequential colormaps and value-to-color normalisation.

use eurostat_common::{EurostatError, Result};
use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const BLUES: [RGBColor; 9] = [
    RGBColor(247, 251, 255),
    RGBColor(222, 235, 247),
    RGBColor(198, 219, 239),
    RGBColor(158, 202, 225),
    RGBColor(107, 174, 214),
    RGBColor(66, 146, 198),
    RGBColor(33, 113, 181),
    RGBColor(8, 81, 156),
    RGBColor(8, 48, 107),
];

const REDS: [RGBColor; 9] = [
    RGBColor(255, 245, 240),
    RGBColor(254, 224, 210),
    RGBColor(252, 187, 161),
    RGBColor(252, 146, 114),
    RGBColor(251, 106, 74),
    RGBColor(239, 59, 44),
    RGBColor(203, 24, 29),
    RGBColor(165, 15, 21),
    RGBColor(103, 0, 13),
];

const GREYS: [RGBColor; 9] = [
    RGBColor(255, 255, 255),
    RGBColor(240, 240, 240),
    RGBColor(217, 217, 217),
    RGBColor(189, 189, 189),
    RGBColor(150, 150, 150),
    RGBColor(115, 115, 115),
    RGBColor(82, 82, 82),
    RGBColor(37, 37, 37),
    RGBColor(0, 0, 0),
];

const VIRIDIS: [RGBColor; 9] = [
    RGBColor(68, 1, 84),
    RGBColor(71, 45, 123),
    RGBColor(59, 82, 139),
    RGBColor(44, 114, 142),
    RGBColor(33, 145, 140),
    RGBColor(40, 174, 128),
    RGBColor(94, 201, 98),
    RGBColor(173, 220, 48),
    RGBColor(253, 231, 37),
];

/// Named sequential colormaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Colormap {
    #[default]
    /// matplotlib `Blues`
    Blues,
    /// matplotlib `Reds`
    Reds,
    /// matplotlib `Greys`
    Greys,
    /// matplotlib `viridis`
    Viridis,
}

impl Colormap {
    /// matplotlib name of the colormap.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Blues => "Blues",
            Self::Reds => "Reds",
            Self::Greys => "Greys",
            Self::Viridis => "viridis",
        }
    }

    fn stops(&self) -> &'static [RGBColor] {
        match self {
            Self::Blues => &BLUES,
            Self::Reds => &REDS,
            Self::Greys => &GREYS,
            Self::Viridis => &VIRIDIS,
        }
    }

    /// Color at position `t` in `[0, 1]`, linearly interpolated between stops.
    pub fn color_at(&self, t: f64) -> RGBColor {
        let stops = self.stops();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let scaled = t * (stops.len() - 1) as f64;
        let lower = scaled.floor() as usize;
        let upper = (lower + 1).min(stops.len() - 1);
        let frac = scaled - lower as f64;

        let RGBColor(r0, g0, b0) = stops[lower];
        let RGBColor(r1, g1, b1) = stops[upper];
        let lerp = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * frac).round() as u8;
        RGBColor(lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
    }
}

impl fmt::Display for Colormap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Colormap {
    type Err = EurostatError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "blues" => Ok(Self::Blues),
            "reds" => Ok(Self::Reds),
            "greys" | "grays" => Ok(Self::Greys),
            "viridis" => Ok(Self::Viridis),
            _ => Err(EurostatError::graph(format!("Unknown colormap '{s}'"))),
        }
    }
}

/// Linear normalisation of data values onto `[0, 1]`, clamped at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorScale {
    /// Value drawn with the first color.
    pub min: f64,
    /// Value drawn with the last color; larger values are clamped.
    pub max: f64,
}

impl ColorScale {
    /// Fails unless both bounds are finite and `min <= max`.
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(EurostatError::graph(format!(
                "Color scale bounds must be finite, got [{min}, {max}]"
            )));
        }
        if min > max {
            return Err(EurostatError::graph(format!(
                "Color scale minimum {min} exceeds maximum {max}"
            )));
        }
        Ok(Self { min, max })
    }

    /// Resolves explicit bounds, falling back to the data range for missing ones.
    pub fn resolve(
        min: Option<f64>,
        max: Option<f64>,
        data_range: Option<(f64, f64)>,
    ) -> Result<Self> {
        let (data_min, data_max) = data_range.unwrap_or((0.0, 1.0));
        Self::new(min.unwrap_or(data_min), max.unwrap_or(data_max))
    }

    /// Position of `value` on the scale; values outside the bounds are clamped.
    pub fn normalize(&self, value: f64) -> f64 {
        if self.max == self.min {
            return 0.0;
        }
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colormap_endpoints() {
        assert_eq!(Colormap::Blues.color_at(0.0), RGBColor(247, 251, 255));
        assert_eq!(Colormap::Blues.color_at(1.0), RGBColor(8, 48, 107));
        assert_eq!(Colormap::Blues.color_at(2.0), RGBColor(8, 48, 107));
        assert_eq!(Colormap::Blues.color_at(-1.0), RGBColor(247, 251, 255));
    }

    #[test]
    fn test_colormap_interpolates_between_stops() {
        let mid = Colormap::Greys.color_at(0.0625);
        assert_eq!(mid, RGBColor(248, 248, 248));
    }

    #[test]
    fn test_parse_colormap_names() {
        assert_eq!("Blues".parse::<Colormap>().unwrap(), Colormap::Blues);
        assert_eq!("viridis".parse::<Colormap>().unwrap(), Colormap::Viridis);
        assert_eq!("Grays".parse::<Colormap>().unwrap(), Colormap::Greys);
        assert!("jet".parse::<Colormap>().is_err());
    }

    #[test]
    fn test_scale_clamps_outside_values() {
        let scale = ColorScale::new(0.0, 200.0).unwrap();
        assert_eq!(scale.normalize(100.0), 0.5);
        assert_eq!(scale.normalize(5000.0), 1.0);
        assert_eq!(scale.normalize(-3.0), 0.0);
    }

    #[test]
    fn test_resolve_uses_data_for_missing_bounds() {
        let scale = ColorScale::resolve(None, Some(200.0), Some((12.0, 950.0))).unwrap();
        assert_eq!(scale, ColorScale { min: 12.0, max: 200.0 });

        let scale = ColorScale::resolve(None, None, Some((12.0, 950.0))).unwrap();
        assert_eq!(scale, ColorScale { min: 12.0, max: 950.0 });
    }

    #[test]
    fn test_inverted_scale_rejected() {
        assert!(ColorScale::resolve(None, Some(200.0), Some((250.0, 900.0))).is_err());
    }

    #[test]
    fn test_degenerate_scale() {
        let scale = ColorScale::new(5.0, 5.0).unwrap();
        assert_eq!(scale.normalize(5.0), 0.0);
        assert_eq!(scale.normalize(50.0), 0.0);
    }
}
