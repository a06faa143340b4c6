//! Visualization output (SVG audit rendering).

mod svg;

pub use svg::{SvgColorScheme, SvgConfig, SvgRenderer};
