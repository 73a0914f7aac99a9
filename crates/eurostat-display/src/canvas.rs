//! Map axes: a retained list of layers drawn when a figure is saved.

use crate::colormap::{ColorScale, Colormap};
use crate::grid::{Extent, GeoGrid, Location};
use crate::projection::Projection;
use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};

/// Pixels per inch used when a figure size is turned into a bitmap size.
pub const DPI: f64 = 100.0;

/// `dimgrey`
pub const DIM_GREY: RGBColor = RGBColor(105, 105, 105);

/// Figure size in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FigureSize {
    /// Width in inches.
    pub width: f64,
    /// Height in inches.
    pub height: f64,
}

impl FigureSize {
    /// A size of `width` by `height` inches.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Size in pixels at [`DPI`].
    pub fn pixels(&self) -> (u32, u32) {
        (
            (self.width * DPI).round().max(1.0) as u32,
            (self.height * DPI).round().max(1.0) as u32,
        )
    }
}

impl Default for FigureSize {
    fn default() -> Self {
        Self::new(6.4, 4.8)
    }
}

/// Generic axis properties applied after the layers are drawn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisOptions {
    /// Panel title.
    pub title: Option<String>,
    /// Description of the horizontal axis.
    pub x_label: Option<String>,
    /// Description of the vertical axis.
    pub y_label: Option<String>,
}

impl AxisOptions {
    /// Options that change nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the x axis description.
    pub fn x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = Some(label.into());
        self
    }

    /// Sets the y axis description.
    pub fn y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = Some(label.into());
        self
    }

    /// Whether no property is set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.x_label.is_none() && self.y_label.is_none()
    }
}

/// Stroke used for outlines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    /// Width in points.
    pub width: f64,
    /// Stroke color.
    pub color: RGBColor,
}

impl LineStyle {
    /// Stroke width in whole pixels, at least one.
    pub fn pixel_width(&self) -> u32 {
        (self.width * DPI / 72.0).round().max(1.0) as u32
    }
}

/// A gridded field coloured through a colormap.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterLayer {
    /// Values drawn as cells.
    pub grid: GeoGrid,
    /// Colormap of the cells.
    pub colormap: Colormap,
    /// Value range mapped onto the colormap.
    pub scale: ColorScale,
}

impl RasterLayer {
    /// Display color of a value, `None` for missing data.
    pub fn color_of(&self, value: f64) -> Option<RGBColor> {
        value
            .is_finite()
            .then(|| self.colormap.color_at(self.scale.normalize(value)))
    }
}

/// A single point marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerLayer {
    /// Marked position.
    pub location: Location,
    /// Cross color.
    pub color: RGBColor,
    /// Half the arm length of the cross, in pixels.
    pub size: i32,
}

/// One drawable layer of a map.
#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    /// Colored grid cells.
    Raster(RasterLayer),
    /// A point marker.
    Marker(MarkerLayer),
    /// Coastlines taken from the basemap.
    Coastlines(LineStyle),
    /// Country borders taken from the basemap.
    Borders(LineStyle),
}

/// A single map axes with its projection and layers.
#[derive(Debug, Clone, PartialEq)]
pub struct MapCanvas {
    projection: Projection,
    size: FigureSize,
    layers: Vec<Layer>,
    axis: AxisOptions,
    extent: Option<Extent>,
    colorbar: bool,
}

impl MapCanvas {
    /// An empty canvas; `size` defaults to 6.4 by 4.8 inches.
    pub fn new(projection: Projection, size: Option<FigureSize>) -> Self {
        Self {
            projection,
            size: size.unwrap_or_default(),
            layers: Vec::new(),
            axis: AxisOptions::default(),
            extent: None,
            colorbar: true,
        }
    }

    /// Projection of the map plane.
    pub fn projection(&self) -> Projection {
        self.projection
    }

    /// Size of the figure holding this canvas.
    pub fn size(&self) -> FigureSize {
        self.size
    }

    /// Layers in drawing order.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Title and labels of the axes.
    pub fn axis_options(&self) -> &AxisOptions {
        &self.axis
    }

    /// Geographic region shown, if restricted.
    pub fn extent(&self) -> Option<&Extent> {
        self.extent.as_ref()
    }

    /// Whether a colorbar is drawn next to the map.
    pub fn has_colorbar(&self) -> bool {
        self.colorbar
    }

    /// Adds a layer on top of the existing ones.
    pub fn add_layer(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    /// Sets only the properties present in `options`, keeping the others.
    pub fn apply_axis_options(&mut self, options: &AxisOptions) {
        if let Some(title) = &options.title {
            self.axis.title = Some(title.clone());
        }
        if let Some(label) = &options.x_label {
            self.axis.x_label = Some(label.clone());
        }
        if let Some(label) = &options.y_label {
            self.axis.y_label = Some(label.clone());
        }
    }

    /// Restricts the view to `extent`.
    pub fn set_extent(&mut self, extent: Extent) {
        self.extent = Some(extent);
    }

    /// Turns the colorbar on or off.
    pub fn set_colorbar(&mut self, colorbar: bool) {
        self.colorbar = colorbar;
    }

    /// Raster layers in drawing order.
    pub fn rasters(&self) -> impl Iterator<Item = &RasterLayer> {
        self.layers.iter().filter_map(|layer| match layer {
            Layer::Raster(raster) => Some(raster),
            _ => None,
        })
    }

    /// Marker layers in drawing order.
    pub fn markers(&self) -> impl Iterator<Item = &MarkerLayer> {
        self.layers.iter().filter_map(|layer| match layer {
            Layer::Marker(marker) => Some(marker),
            _ => None,
        })
    }

    /// Plane coordinates of the visible region as `(x_range, y_range)`.
    pub fn view_bounds(&self) -> ((f64, f64), (f64, f64)) {
        match &self.extent {
            Some(extent) => self.projection.project_extent(extent),
            None => self.projection.bounds(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_figure_size_pixels() {
        assert_eq!(FigureSize::default().pixels(), (640, 480));
        assert_eq!(FigureSize::new(16.0, 6.0).pixels(), (1600, 600));
    }

    #[test]
    fn test_apply_axis_options_only_sets_given_fields() {
        let mut canvas = MapCanvas::new(Projection::EqualEarth, None);
        canvas.apply_axis_options(&AxisOptions::new().title("Population").x_label("lon"));
        canvas.apply_axis_options(&AxisOptions::new().title("Density"));

        assert_eq!(canvas.axis_options().title.as_deref(), Some("Density"));
        assert_eq!(canvas.axis_options().x_label.as_deref(), Some("lon"));
        assert!(canvas.axis_options().y_label.is_none());
    }

    #[test]
    fn test_view_bounds_follow_extent() {
        let mut canvas = MapCanvas::new(Projection::PlateCarree, None);
        assert_eq!(canvas.view_bounds(), ((-180.0, 180.0), (-90.0, 90.0)));

        canvas.set_extent(Extent::new(-10.0, 30.0, 35.0, 70.0).unwrap());
        assert_eq!(canvas.view_bounds(), ((-10.0, 30.0), (35.0, 70.0)));
    }

    #[test]
    fn test_thin_lines_are_one_pixel() {
        let style = LineStyle {
            width: 0.5,
            color: DIM_GREY,
        };
        assert_eq!(style.pixel_width(), 1);
    }
}
