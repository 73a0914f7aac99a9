//! # EUROSTAT Display
//!
//! Plotting helpers used by the generated EUROSTAT notebooks: single maps,
//! rows of maps sharing one color scale, and cumulative day-of-year
//! comparisons against historical years.
//!
//! Operations build retained models ([`MapCanvas`], [`ComparisonChart`],
//! [`Figure`]) that are drawn with `plotters` when a figure is saved.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod basemap;
pub mod canvas;
pub mod colormap;
pub mod comparison;
pub mod figure;
pub mod grid;
pub mod map;
pub mod projection;
pub mod renderer;

pub use basemap::{Basemap, Polyline};
pub use canvas::{AxisOptions, FigureSize, Layer, LineStyle, MapCanvas, MarkerLayer, RasterLayer};
pub use colormap::{ColorScale, Colormap};
pub use comparison::{render_comparison, BandPoint, ComparisonChart, ComparisonOptions};
pub use figure::{Figure, Panel};
pub use grid::{Extent, GeoGrid, GridCell, Location, TimeSeries};
pub use map::{render_map, render_maps, MapOptions, MapsOptions, DEFAULT_COLOR_MAX};
pub use projection::Projection;
pub use renderer::PanelRenderer;
