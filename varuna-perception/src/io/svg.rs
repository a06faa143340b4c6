//! SVG visualization for zone extraction audit.
//!
//! Renders the occupancy grid, the extracted zone boundary, and the
//! vehicle position to SVG. The SVG serves as an offline audit file for
//! tuning sweep parameters against recorded grids.

use std::fmt::Write;
use std::path::Path;

use crate::core::{CellState, GridPoint};
use crate::error::Result;
use crate::grid::OccupancyGrid;
use crate::zone::ZonePolygon;

/// SVG color scheme for visualization
#[derive(Clone, Debug)]
pub struct SvgColorScheme {
    /// Occupied cell color
    pub occupied: &'static str,
    /// Unoccupied cell color (also the background)
    pub unoccupied: &'static str,
    /// Unknown cell color
    pub unknown: &'static str,
    /// Zone boundary outline color
    pub zone_outline: &'static str,
    /// Vehicle marker color
    pub vehicle: &'static str,
}

impl Default for SvgColorScheme {
    fn default() -> Self {
        Self {
            occupied: "#333333",
            unoccupied: "#FFFFFF",
            unknown: "#CCCCCC",
            zone_outline: "#2222AA",
            vehicle: "#AA2222",
        }
    }
}

/// Configuration for SVG rendering
#[derive(Clone, Debug)]
pub struct SvgConfig {
    /// Pixels per cell
    pub cell_px: f32,
    /// Vehicle marker radius in pixels
    pub marker_radius: f32,
    /// Zone outline stroke width
    pub outline_width: f32,
    /// Color scheme
    pub colors: SvgColorScheme,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            cell_px: 4.0,
            marker_radius: 5.0,
            outline_width: 1.5,
            colors: SvgColorScheme::default(),
        }
    }
}

/// SVG visualization builder
pub struct SvgRenderer<'a> {
    config: SvgConfig,
    grid: &'a OccupancyGrid,
    polygon: Option<&'a ZonePolygon>,
    vehicle: Option<GridPoint>,
    title: Option<String>,
}

impl<'a> SvgRenderer<'a> {
    /// Create a renderer for a grid with the default configuration.
    pub fn new(grid: &'a OccupancyGrid) -> Self {
        Self::with_config(grid, SvgConfig::default())
    }

    /// Create a renderer with a custom configuration.
    pub fn with_config(grid: &'a OccupancyGrid, config: SvgConfig) -> Self {
        Self {
            config,
            grid,
            polygon: None,
            vehicle: None,
            title: None,
        }
    }

    /// Overlay the zone boundary polygon.
    pub fn with_zone(mut self, polygon: &'a ZonePolygon) -> Self {
        self.polygon = Some(polygon);
        self
    }

    /// Mark the vehicle position (cell space).
    pub fn with_vehicle(mut self, position: GridPoint) -> Self {
        self.vehicle = Some(position);
        self
    }

    /// Set a title to display.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Render to an SVG string.
    pub fn render(&self) -> String {
        let px = self.config.cell_px;
        let width_px = self.grid.width() as f32 * px;
        let height_px = self.grid.height() as f32 * px;

        let mut svg = String::new();
        writeln!(&mut svg, r#"<?xml version="1.0" encoding="UTF-8"?>"#).unwrap();
        writeln!(
            &mut svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            width_px, height_px, width_px, height_px
        )
        .unwrap();

        // Background doubles as the unoccupied color
        writeln!(
            &mut svg,
            r#"  <rect width="{}" height="{}" fill="{}"/>"#,
            width_px, height_px, self.config.colors.unoccupied
        )
        .unwrap();

        self.render_cells(&mut svg);
        self.render_zone(&mut svg);
        self.render_vehicle(&mut svg);

        if let Some(ref title) = self.title {
            writeln!(
                &mut svg,
                r#"  <text x="6" y="16" font-family="monospace" font-size="12">{}</text>"#,
                title
            )
            .unwrap();
        }

        writeln!(&mut svg, "</svg>").unwrap();
        svg
    }

    /// Render and save to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.render())?;
        Ok(())
    }

    fn render_cells(&self, svg: &mut String) {
        let px = self.config.cell_px;
        writeln!(svg, r#"  <g id="grid">"#).unwrap();
        for (coord, state) in self.grid.iter() {
            let color = match state {
                CellState::Unoccupied => continue, // background
                CellState::Occupied => self.config.colors.occupied,
                CellState::Unknown => self.config.colors.unknown,
            };
            writeln!(
                svg,
                r#"    <rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
                coord.x as f32 * px,
                coord.y as f32 * px,
                px,
                px,
                color
            )
            .unwrap();
        }
        writeln!(svg, "  </g>").unwrap();
    }

    fn render_zone(&self, svg: &mut String) {
        let polygon = match self.polygon {
            Some(p) if !p.is_empty() => p,
            _ => return,
        };

        let px = self.config.cell_px;
        let mut points = String::new();
        for v in polygon.vertices() {
            write!(
                &mut points,
                "{},{} ",
                (v.x as f32 + 0.5) * px,
                (v.y as f32 + 0.5) * px
            )
            .unwrap();
        }

        writeln!(
            svg,
            r#"  <polygon points="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
            points.trim_end(),
            self.config.colors.zone_outline,
            self.config.outline_width
        )
        .unwrap();
    }

    fn render_vehicle(&self, svg: &mut String) {
        let vehicle = match self.vehicle {
            Some(v) => v,
            None => return,
        };

        let px = self.config.cell_px;
        writeln!(
            svg,
            r#"  <circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
            vehicle.x * px,
            vehicle.y * px,
            self.config.marker_radius,
            self.config.colors.vehicle
        )
        .unwrap();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GridCoord;

    #[test]
    fn test_render_smoke() {
        let mut grid =
            OccupancyGrid::filled(8, 8, 0.1, CellState::Unoccupied).unwrap();
        grid.set(GridCoord::new(3, 3), CellState::Occupied);
        grid.set(GridCoord::new(4, 4), CellState::Unknown);

        let polygon = ZonePolygon::from_vertices(vec![
            GridCoord::new(1, 1),
            GridCoord::new(6, 1),
            GridCoord::new(6, 6),
        ]);

        let svg = SvgRenderer::new(&grid)
            .with_zone(&polygon)
            .with_vehicle(GridPoint::new(4.0, 4.0))
            .with_title("zone audit")
            .render();

        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains("<polygon"));
        assert!(svg.contains("<circle"));
        assert!(svg.contains("zone audit"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_save_writes_file() {
        let grid = OccupancyGrid::new(4, 4, 0.1).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.svg");

        SvgRenderer::new(&grid).save(&path).unwrap();
        assert!(path.exists());
    }
}
