//! Drawing of retained panels onto plotters drawing areas.

use crate::basemap::{Basemap, Polyline};
use crate::canvas::{Layer, LineStyle, MapCanvas, MarkerLayer, RasterLayer};
use crate::comparison::ComparisonChart;
use crate::projection::{crosses_antimeridian, Projection};
use eurostat_common::Result;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::warn;

/// Width of the colorbar strip in pixels.
const COLORBAR_WIDTH: i32 = 70;
const COLORBAR_STEPS: usize = 64;

/// matplotlib `gray`
const GRAY: RGBColor = RGBColor(128, 128, 128);

type MapChart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Something that can draw itself into one panel of a figure.
pub trait PanelRenderer {
    /// Draws onto `area`; map panels take outlines from `basemap`.
    fn draw<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        basemap: &Basemap,
    ) -> Result<()>
    where
        DB::ErrorType: std::error::Error + Send + Sync + 'static;
}

impl PanelRenderer for MapCanvas {
    fn draw<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        basemap: &Basemap,
    ) -> Result<()>
    where
        DB::ErrorType: std::error::Error + Send + Sync + 'static,
    {
        area.fill(&WHITE)?;

        let colorbar = self.rasters().last().filter(|_| self.has_colorbar());
        match colorbar {
            Some(raster) => {
                let (width, _) = area.dim_in_pixel();
                let split = (width as i32 - COLORBAR_WIDTH).max(1);
                let (map_area, bar_area) = area.split_horizontally(split);
                draw_map(self, &map_area, basemap)?;
                draw_colorbar(raster, &bar_area)
            }
            None => draw_map(self, area, basemap),
        }
    }
}

fn draw_map<DB: DrawingBackend>(
    canvas: &MapCanvas,
    area: &DrawingArea<DB, Shift>,
    basemap: &Basemap,
) -> Result<()>
where
    DB::ErrorType: std::error::Error + Send + Sync + 'static,
{
    let axis = canvas.axis_options();
    let ((x_min, x_max), (y_min, y_max)) = canvas.view_bounds();

    let mut builder = ChartBuilder::on(area);
    builder.margin(5);
    if let Some(title) = &axis.title {
        builder.caption(title, ("sans-serif", 16));
    }
    if axis.x_label.is_some() {
        builder.x_label_area_size(24);
    }
    if axis.y_label.is_some() {
        builder.y_label_area_size(24);
    }
    let mut chart = builder.build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    if axis.x_label.is_some() || axis.y_label.is_some() {
        let mut mesh = chart.configure_mesh();
        mesh.disable_mesh().x_labels(0).y_labels(0);
        if let Some(label) = &axis.x_label {
            mesh.x_desc(label.as_str());
        }
        if let Some(label) = &axis.y_label {
            mesh.y_desc(label.as_str());
        }
        mesh.draw()?;
    }

    let view = ViewRect {
        x: (x_min, x_max),
        y: (y_min, y_max),
    };
    for layer in canvas.layers() {
        match layer {
            Layer::Raster(raster) => draw_raster(&mut chart, canvas.projection(), raster, &view)?,
            Layer::Marker(marker) => draw_marker(&mut chart, canvas.projection(), marker)?,
            Layer::Coastlines(style) => draw_outlines(
                &mut chart,
                canvas.projection(),
                "coastlines",
                &basemap.coastlines,
                style,
                &view,
            )?,
            Layer::Borders(style) => draw_outlines(
                &mut chart,
                canvas.projection(),
                "borders",
                &basemap.borders,
                style,
                &view,
            )?,
        }
    }
    Ok(())
}

/// Visible plane rectangle.
struct ViewRect {
    x: (f64, f64),
    y: (f64, f64),
}

impl ViewRect {
    fn contains(&self, (x, y): (f64, f64)) -> bool {
        (self.x.0..=self.x.1).contains(&x) && (self.y.0..=self.y.1).contains(&y)
    }
}

fn draw_raster<DB: DrawingBackend>(
    chart: &mut MapChart<'_, DB>,
    projection: Projection,
    raster: &RasterLayer,
    view: &ViewRect,
) -> Result<()>
where
    DB::ErrorType: std::error::Error + Send + Sync + 'static,
{
    let polygons = raster.grid.cells().filter_map(|cell| {
        let color = raster.color_of(cell.value)?;
        if crosses_antimeridian(cell.west, cell.east) {
            return None;
        }
        let corners = vec![
            projection.project(cell.west, cell.south),
            projection.project(cell.east, cell.south),
            projection.project(cell.east, cell.north),
            projection.project(cell.west, cell.north),
        ];
        corners
            .iter()
            .any(|&point| view.contains(point))
            .then(|| Polygon::new(corners, color.filled()))
    });
    chart.draw_series(polygons)?;
    Ok(())
}

fn draw_marker<DB: DrawingBackend>(
    chart: &mut MapChart<'_, DB>,
    projection: Projection,
    marker: &MarkerLayer,
) -> Result<()>
where
    DB::ErrorType: std::error::Error + Send + Sync + 'static,
{
    let position = projection.project(marker.location.longitude, marker.location.latitude);
    let size = marker.size;
    let style = marker.color.stroke_width(1);
    let cross = EmptyElement::at(position)
        + PathElement::new(vec![(-size, 0), (size, 0)], style)
        + PathElement::new(vec![(0, -size), (0, size)], style);
    chart.draw_series(std::iter::once(cross))?;
    Ok(())
}

fn draw_outlines<DB: DrawingBackend>(
    chart: &mut MapChart<'_, DB>,
    projection: Projection,
    layer: &str,
    lines: &[Polyline],
    style: &LineStyle,
    view: &ViewRect,
) -> Result<()>
where
    DB::ErrorType: std::error::Error + Send + Sync + 'static,
{
    if lines.is_empty() {
        warn!(layer, "Basemap has no geometry for outline layer, nothing drawn");
        return Ok(());
    }

    let stroke = style.color.stroke_width(style.pixel_width());
    let segments = lines
        .iter()
        .flat_map(|line| visible_segments(projection, line, view));
    chart.draw_series(segments.map(|segment| PathElement::new(segment, stroke)))?;
    Ok(())
}

/// Projects a polyline and cuts it at the antimeridian and at the view edge.
fn visible_segments(
    projection: Projection,
    line: &Polyline,
    view: &ViewRect,
) -> Vec<Vec<(f64, f64)>> {
    let mut segments = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();
    let mut previous_lon: Option<f64> = None;

    for &(lon, lat) in line {
        let point = projection.project(lon, lat);
        let wraps = previous_lon.is_some_and(|prev| crosses_antimeridian(prev, lon));
        if wraps || !view.contains(point) {
            if current.len() > 1 {
                segments.push(std::mem::take(&mut current));
            } else {
                current.clear();
            }
        }
        if view.contains(point) {
            current.push(point);
        }
        previous_lon = Some(lon);
    }
    if current.len() > 1 {
        segments.push(current);
    }
    segments
}

fn draw_colorbar<DB: DrawingBackend>(
    raster: &RasterLayer,
    area: &DrawingArea<DB, Shift>,
) -> Result<()>
where
    DB::ErrorType: std::error::Error + Send + Sync + 'static,
{
    let scale = raster.scale;
    let (low, high) = if scale.max > scale.min {
        (scale.min, scale.max)
    } else {
        (scale.min, scale.min + 1.0)
    };

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .y_label_area_size(40)
        .build_cartesian_2d(0.0..1.0, low..high)?;

    let step = (high - low) / COLORBAR_STEPS as f64;
    chart.draw_series((0..COLORBAR_STEPS).map(|i| {
        let bottom = low + step * i as f64;
        let color = raster.colormap.color_at((i as f64 + 0.5) / COLORBAR_STEPS as f64);
        Rectangle::new([(0.0, bottom), (1.0, bottom + step)], color.filled())
    }))?;

    let mut mesh = chart.configure_mesh();
    mesh.disable_mesh().x_labels(0).y_labels(5);
    if let Some(units) = raster.grid.units() {
        mesh.y_desc(units);
    }
    mesh.draw()?;
    Ok(())
}

impl PanelRenderer for ComparisonChart {
    fn draw<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        _basemap: &Basemap,
    ) -> Result<()>
    where
        DB::ErrorType: std::error::Error + Send + Sync + 'static,
    {
        area.fill(&WHITE)?;

        let (x_min, x_max) = self.x_range();
        let (y_min, y_max) = self.y_range();
        let mut chart = ChartBuilder::on(area)
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(50)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

        if self.has_labels() {
            chart
                .configure_mesh()
                .disable_mesh()
                .x_desc("dayofyear")
                .y_desc(self.units())
                .draw()?;
        }

        if !self.band().is_empty() {
            let outline: Vec<(f64, f64)> = self
                .band()
                .iter()
                .map(|point| (f64::from(point.day_of_year), point.upper))
                .chain(
                    self.band()
                        .iter()
                        .rev()
                        .map(|point| (f64::from(point.day_of_year), point.lower)),
                )
                .collect();
            chart.draw_series(std::iter::once(Polygon::new(
                outline,
                GRAY.mix(0.2).filled(),
            )))?;
        }

        for curve in self.historical().values() {
            chart.draw_series(LineSeries::new(
                curve.iter().map(|&(day, value)| (f64::from(day), value)),
                RED.mix(0.05).stroke_width(1),
            ))?;
        }

        chart.draw_series(LineSeries::new(
            self.mean().map(|(day, value)| (f64::from(day), value)),
            RED.stroke_width(1),
        ))?;

        chart.draw_series(LineSeries::new(
            self.current().iter().map(|&(day, value)| (f64::from(day), value)),
            BLUE.stroke_width(1),
        ))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plate_view() -> ViewRect {
        ViewRect {
            x: (-180.0, 180.0),
            y: (-90.0, 90.0),
        }
    }

    #[test]
    fn test_segments_split_at_antimeridian() {
        let line = vec![(170.0, 0.0), (179.0, 1.0), (-179.0, 2.0), (-170.0, 3.0)];
        let segments = visible_segments(Projection::PlateCarree, &line, &plate_view());

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0], vec![(170.0, 0.0), (179.0, 1.0)]);
        assert_eq!(segments[1], vec![(-179.0, 2.0), (-170.0, 3.0)]);
    }

    #[test]
    fn test_segments_clipped_to_view() {
        let view = ViewRect {
            x: (0.0, 10.0),
            y: (0.0, 10.0),
        };
        let line = vec![(1.0, 1.0), (2.0, 2.0), (20.0, 2.0), (3.0, 3.0), (4.0, 4.0)];
        let segments = visible_segments(Projection::PlateCarree, &line, &view);

        assert_eq!(segments, vec![vec![(1.0, 1.0), (2.0, 2.0)], vec![(3.0, 3.0), (4.0, 4.0)]]);
    }

    #[test]
    fn test_single_visible_point_is_dropped() {
        let view = ViewRect {
            x: (0.0, 10.0),
            y: (0.0, 10.0),
        };
        let line = vec![(20.0, 1.0), (5.0, 5.0), (20.0, 2.0)];
        assert!(visible_segments(Projection::PlateCarree, &line, &view).is_empty());
    }
}
