//! Figures: a row of panels saved as PNG or SVG.

use crate::basemap::Basemap;
use crate::canvas::{FigureSize, MapCanvas};
use crate::comparison::ComparisonChart;
use crate::renderer::PanelRenderer;
use eurostat_common::Result;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;
use tracing::info;

/// One panel of a figure.
#[derive(Debug, Clone, PartialEq)]
pub enum Panel {
    /// A map built by `render_map`.
    Map(MapCanvas),
    /// A comparison chart built by `render_comparison`.
    Chart(ComparisonChart),
}

impl PanelRenderer for Panel {
    fn draw<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        basemap: &Basemap,
    ) -> Result<()>
    where
        DB::ErrorType: std::error::Error + Send + Sync + 'static,
    {
        match self {
            Self::Map(canvas) => canvas.draw(area, basemap),
            Self::Chart(chart) => chart.draw(area, basemap),
        }
    }
}

/// Panels laid out left to right in a single row.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    size: FigureSize,
    panels: Vec<Panel>,
}

impl Figure {
    /// An empty figure of the given size.
    pub fn new(size: FigureSize) -> Self {
        Self {
            size,
            panels: Vec::new(),
        }
    }

    /// Size of the whole figure.
    pub fn size(&self) -> FigureSize {
        self.size
    }

    /// Panels from left to right.
    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    /// Appends a panel on the right.
    pub fn add_panel(&mut self, panel: Panel) {
        self.panels.push(panel);
    }

    /// Saves the figure, drawing map outlines from `basemap`.
    ///
    /// A `.svg` extension selects the SVG backend; anything else is written
    /// as a bitmap whose format follows the extension.
    pub fn save(&self, path: impl AsRef<Path>, basemap: &Basemap) -> Result<()> {
        let path = path.as_ref();
        let dimensions = self.size.pixels();
        let is_svg = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));

        if is_svg {
            let root = SVGBackend::new(path, dimensions).into_drawing_area();
            self.draw_on(&root, basemap)?;
            root.present()?;
        } else {
            let root = BitMapBackend::new(path, dimensions).into_drawing_area();
            self.draw_on(&root, basemap)?;
            root.present()?;
        }

        info!(
            "Saved figure with {} panel(s) to {}",
            self.panels.len(),
            path.display()
        );
        Ok(())
    }

    /// Renders the figure to an SVG document in memory.
    pub fn render_svg(&self, basemap: &Basemap) -> Result<String> {
        let mut buffer = String::new();
        {
            let root = SVGBackend::with_string(&mut buffer, self.size.pixels()).into_drawing_area();
            self.draw_on(&root, basemap)?;
            root.present()?;
        }
        Ok(buffer)
    }

    fn draw_on<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        basemap: &Basemap,
    ) -> Result<()>
    where
        DB::ErrorType: std::error::Error + Send + Sync + 'static,
    {
        root.fill(&WHITE)?;
        let areas = root.split_evenly((1, self.panels.len().max(1)));
        for (panel, area) in self.panels.iter().zip(&areas) {
            panel.draw(area, basemap)?;
        }
        Ok(())
    }
}

impl From<MapCanvas> for Figure {
    fn from(canvas: MapCanvas) -> Self {
        Self {
            size: canvas.size(),
            panels: vec![Panel::Map(canvas)],
        }
    }
}

impl From<ComparisonChart> for Figure {
    fn from(chart: ComparisonChart) -> Self {
        Self {
            size: chart.size(),
            panels: vec![Panel::Chart(chart)],
        }
    }
}
