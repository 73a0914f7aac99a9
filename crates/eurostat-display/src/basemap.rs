//! Coastline and country border geometry drawn on top of map rasters.

use eurostat_common::{EurostatError, Result};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// A polyline in geographic `(longitude, latitude)` coordinates.
pub type Polyline = Vec<(f64, f64)>;

/// Reference geometry for map backgrounds.
///
/// Empty by default; load Natural Earth style GeoJSON to get outlines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Basemap {
    /// Land and sea boundaries.
    pub coastlines: Vec<Polyline>,
    /// Country borders.
    pub borders: Vec<Polyline>,
}

impl Basemap {
    /// Loads coastlines and, optionally, borders from GeoJSON files.
    pub fn from_geojson_files(coastlines: &Path, borders: Option<&Path>) -> Result<Self> {
        let coastlines = read_polylines(coastlines)?;
        let borders = match borders {
            Some(path) => read_polylines(path)?,
            None => Vec::new(),
        };
        debug!(
            coastlines = coastlines.len(),
            borders = borders.len(),
            "Loaded basemap geometry"
        );
        Ok(Self {
            coastlines,
            borders,
        })
    }

    /// Whether there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.coastlines.is_empty() && self.borders.is_empty()
    }
}

fn read_polylines(path: &Path) -> Result<Vec<Polyline>> {
    let text = std::fs::read_to_string(path)?;
    parse_geojson(&text)
}

/// Extracts every line and polygon ring from a GeoJSON document.
pub fn parse_geojson(text: &str) -> Result<Vec<Polyline>> {
    let document: Value = serde_json::from_str(text)?;
    let mut lines = Vec::new();
    collect_lines(&document, &mut lines)?;
    Ok(lines)
}

fn collect_lines(node: &Value, out: &mut Vec<Polyline>) -> Result<()> {
    let kind = node.get("type").and_then(Value::as_str).unwrap_or_default();
    match kind {
        "FeatureCollection" => {
            for feature in node.get("features").and_then(Value::as_array).into_iter().flatten() {
                collect_lines(feature, out)?;
            }
        }
        "Feature" => {
            if let Some(geometry) = node.get("geometry").filter(|g| !g.is_null()) {
                collect_lines(geometry, out)?;
            }
        }
        "GeometryCollection" => {
            for geometry in node.get("geometries").and_then(Value::as_array).into_iter().flatten() {
                collect_lines(geometry, out)?;
            }
        }
        "LineString" => out.push(line(coordinates(node)?)?),
        "MultiLineString" | "Polygon" => {
            for ring in array(coordinates(node)?)? {
                out.push(line(ring)?);
            }
        }
        "MultiPolygon" => {
            for polygon in array(coordinates(node)?)? {
                for ring in array(polygon)? {
                    out.push(line(ring)?);
                }
            }
        }
        // Points carry no outline.
        "Point" | "MultiPoint" => {}
        other => {
            return Err(EurostatError::graph(format!(
                "Unsupported GeoJSON object type '{other}'"
            )))
        }
    }
    Ok(())
}

fn coordinates(node: &Value) -> Result<&Value> {
    node.get("coordinates")
        .ok_or_else(|| EurostatError::graph("GeoJSON geometry without coordinates"))
}

fn array(value: &Value) -> Result<&Vec<Value>> {
    value
        .as_array()
        .ok_or_else(|| EurostatError::graph("Malformed GeoJSON coordinates"))
}

fn line(value: &Value) -> Result<Polyline> {
    array(value)?
        .iter()
        .map(|position| {
            let pair = array(position)?;
            match (pair.first().and_then(Value::as_f64), pair.get(1).and_then(Value::as_f64)) {
                (Some(lon), Some(lat)) => Ok((lon, lat)),
                _ => Err(EurostatError::graph("Malformed GeoJSON position")),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_feature_collection() {
        let text = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {}, "geometry": {
                    "type": "LineString", "coordinates": [[0, 0], [10, 5]]}},
                {"type": "Feature", "properties": {}, "geometry": {
                    "type": "MultiPolygon", "coordinates": [[[[1, 1], [2, 1], [2, 2], [1, 1]]]]}},
                {"type": "Feature", "properties": {}, "geometry": null}
            ]
        }"#;

        let lines = parse_geojson(text).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], vec![(0.0, 0.0), (10.0, 5.0)]);
        assert_eq!(lines[1].len(), 4);
    }

    #[test]
    fn test_parse_rejects_malformed_position() {
        let text = r#"{"type": "LineString", "coordinates": [[0], [1, 2]]}"#;
        assert!(parse_geojson(text).is_err());
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        let err = parse_geojson("{not json").unwrap_err();
        assert!(matches!(err, EurostatError::Serialization(_)));
    }

    #[test]
    fn test_default_basemap_is_empty() {
        assert!(Basemap::default().is_empty());
    }

    #[test]
    fn test_from_geojson_files() {
        let dir = tempfile::tempdir().unwrap();
        let coastlines = dir.path().join("coastlines.geojson");
        let borders = dir.path().join("borders.geojson");
        std::fs::write(
            &coastlines,
            r#"{"type": "MultiLineString", "coordinates": [[[-5, 43], [3, 43]], [[10, 54], [12, 55]]]}"#,
        )
        .unwrap();
        std::fs::write(
            &borders,
            r#"{"type": "Feature", "geometry": {"type": "LineString", "coordinates": [[6, 49], [8, 49]]}}"#,
        )
        .unwrap();

        let basemap = Basemap::from_geojson_files(&coastlines, Some(&borders)).unwrap();
        assert_eq!(basemap.coastlines.len(), 2);
        assert_eq!(basemap.borders, vec![vec![(6.0, 49.0), (8.0, 49.0)]]);

        let coast_only = Basemap::from_geojson_files(&coastlines, None).unwrap();
        assert!(coast_only.borders.is_empty());
        assert!(!coast_only.is_empty());
    }

    #[test]
    fn test_missing_geojson_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Basemap::from_geojson_files(&dir.path().join("none.geojson"), None).unwrap_err();
        assert!(matches!(err, EurostatError::Io(_)));
    }
}
