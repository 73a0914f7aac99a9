//! Single and multi-panel map rendering.

use crate::canvas::{AxisOptions, FigureSize, Layer, LineStyle, MapCanvas, MarkerLayer, RasterLayer, DIM_GREY};
use crate::colormap::{ColorScale, Colormap};
use crate::figure::{Figure, Panel};
use crate::grid::{Extent, GeoGrid, Location};
use crate::projection::Projection;
use eurostat_common::{EurostatError, Result};
use plotters::style::{BLACK, RED};
use tracing::debug;

/// Default upper bound of the color scale.
pub const DEFAULT_COLOR_MAX: f64 = 200.0;

/// Size of the figure holding a row of maps.
pub const MAPS_FIGURE_SIZE: FigureSize = FigureSize::new(16.0, 6.0);

const MARKER_SIZE: i32 = 6;

/// Options for [`render_map`].
#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    /// Point to mark with a red cross.
    pub location: Option<Location>,
    /// Upper end of the color scale; defaults to [`DEFAULT_COLOR_MAX`].
    pub color_max: Option<f64>,
    /// Lower color bound; the data minimum when `None`.
    pub color_min: Option<f64>,
    /// Projection of a newly created canvas.
    pub projection: Projection,
    /// Colormap of the cells.
    pub colormap: Colormap,
    /// Size of a newly created canvas.
    pub figure_size: Option<FigureSize>,
    /// Geographic region to show; the whole projection when unset.
    pub extent: Option<Extent>,
    /// Title and labels applied after drawing.
    pub axis: AxisOptions,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            location: None,
            color_max: Some(DEFAULT_COLOR_MAX),
            color_min: None,
            projection: Projection::default(),
            colormap: Colormap::default(),
            figure_size: None,
            extent: None,
            axis: AxisOptions::default(),
        }
    }
}

/// Draws `data` as a colored raster on a map canvas.
///
/// A new canvas is created from `options.projection` and
/// `options.figure_size` unless one is passed in. The raster is followed by
/// the optional location marker, coastlines and country borders; axis
/// options and the extent are applied last. Returns the canvas for further
/// composition.
pub fn render_map(
    data: &GeoGrid,
    options: &MapOptions,
    canvas: Option<MapCanvas>,
) -> Result<MapCanvas> {
    let mut canvas =
        canvas.unwrap_or_else(|| MapCanvas::new(options.projection, options.figure_size));

    let scale = ColorScale::resolve(options.color_min, options.color_max, data.finite_range())?;
    debug!(
        min = scale.min,
        max = scale.max,
        colormap = %options.colormap,
        projection = %canvas.projection(),
        "Rendering map"
    );

    canvas.add_layer(Layer::Raster(RasterLayer {
        grid: data.clone(),
        colormap: options.colormap,
        scale,
    }));

    if let Some(location) = options.location {
        canvas.add_layer(Layer::Marker(MarkerLayer {
            location,
            color: RED,
            size: MARKER_SIZE,
        }));
    }

    canvas.add_layer(Layer::Coastlines(LineStyle {
        width: 0.5,
        color: BLACK,
    }));
    canvas.add_layer(Layer::Borders(LineStyle {
        width: 0.5,
        color: DIM_GREY,
    }));

    canvas.apply_axis_options(&options.axis);
    if let Some(extent) = options.extent {
        canvas.set_extent(extent);
    }

    Ok(canvas)
}

/// Options for [`render_maps`].
#[derive(Debug, Clone, PartialEq)]
pub struct MapsOptions {
    /// Upper end of the shared color scale; defaults to [`DEFAULT_COLOR_MAX`].
    pub color_max: Option<f64>,
    /// Map projection.
    pub projection: Projection,
    /// Colormap of the cells.
    pub colormap: Colormap,
    /// Axis options per panel, matched by position.
    pub per_axis: Vec<AxisOptions>,
}

impl Default for MapsOptions {
    fn default() -> Self {
        Self {
            color_max: Some(DEFAULT_COLOR_MAX),
            projection: Projection::default(),
            colormap: Colormap::default(),
            per_axis: Vec::new(),
        }
    }
}

/// Lays out one map per grid side by side in a single row.
///
/// Panels without an entry in `options.per_axis` get empty axis options.
pub fn render_maps(data: &[GeoGrid], options: &MapsOptions) -> Result<Figure> {
    if data.is_empty() {
        return Err(EurostatError::graph("render_maps needs at least one grid"));
    }

    let per_axis = padded_axis_options(&options.per_axis, data.len());
    let panel_size = FigureSize::new(
        MAPS_FIGURE_SIZE.width / data.len() as f64,
        MAPS_FIGURE_SIZE.height,
    );

    let mut figure = Figure::new(MAPS_FIGURE_SIZE);
    for (grid, axis) in data.iter().zip(per_axis) {
        let map_options = MapOptions {
            color_max: options.color_max,
            projection: options.projection,
            colormap: options.colormap,
            axis,
            ..MapOptions::default()
        };
        let canvas = MapCanvas::new(options.projection, Some(panel_size));
        figure.add_panel(Panel::Map(render_map(grid, &map_options, Some(canvas))?));
    }

    debug!(panels = figure.panels().len(), "Composed map row");
    Ok(figure)
}

/// Copies `options` and pads the copy with empty entries up to `len`.
fn padded_axis_options(options: &[AxisOptions], len: usize) -> Vec<AxisOptions> {
    let mut padded = options.to_vec();
    if padded.len() < len {
        padded.resize_with(len, AxisOptions::default);
    }
    padded
}
