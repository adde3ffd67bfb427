//! SVG renderer for drawing specifications
//!
//! This module takes a DrawSpec and produces an SVG string, drawing every
//! primitive exactly where the engine placed it, optionally followed by a
//! colour legend.

pub mod config;
pub mod legend;
pub mod svg;

pub use config::SvgConfig;
pub use legend::LegendEntry;
pub use svg::{render_svg, to_data_uri};
