//! Geometry engine for planogram drawings
//!
//! This module takes display units and a viewport width and computes the
//! canvas size, the shared cell size, per-unit offsets and the ordered list
//! of draw primitives.

pub mod config;
pub mod contrast;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod types;
pub mod validate;

pub use config::{ConfigError, LayoutConfig};
pub use contrast::{text_color_for, TextContrast};
pub use engine::compute_draw_spec;
pub use error::{LayoutError, SlotRange, SpanKind};
pub use metrics::CanvasMetrics;
pub use types::*;
pub use validate::{lint_units, validate_units};

use crate::model::DisplayUnit;

/// Compute a drawing with the default configuration
pub fn compute_draw_spec_default(units: &[DisplayUnit], viewport_width: f64) -> DrawSpec {
    compute_draw_spec(units, viewport_width, &LayoutConfig::default())
}
