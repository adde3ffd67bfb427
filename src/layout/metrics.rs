//! Cell, canvas and font sizing derived from the viewport width
//!
//! One cell size is shared by every unit so that units drawn side by side
//! stay visually comparable.

use crate::model::DisplayUnit;

use super::config::LayoutConfig;
use super::types::{FontSizes, UnitOffset};

/// Sizes derived once per drawing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasMetrics {
    pub cell_width: f64,
    pub cell_height: f64,
    pub canvas_width: f64,
    pub canvas_height: f64,
    /// Sum of slot counts, each counted as at least one slot
    pub total_slots: u64,
    /// Largest shelf count among all units
    pub max_shelves: usize,
    pub fonts: FontSizes,
}

impl CanvasMetrics {
    /// Derive metrics for `units` sized against `viewport_width`.
    ///
    /// Returns `None` for an empty unit list.
    pub fn compute(
        units: &[DisplayUnit],
        viewport_width: f64,
        config: &LayoutConfig,
    ) -> Option<Self> {
        if units.is_empty() {
            return None;
        }

        let viewport_width = if viewport_width.is_finite() {
            viewport_width.max(0.0)
        } else {
            config.fallback_viewport_width
        };
        let available = (viewport_width * config.width_fraction).min(config.max_draw_width);

        let total_slots: u64 = units
            .iter()
            .map(|u| u64::from(u.slot_count.max(1)))
            .sum();
        let gaps = config.unit_gap * (units.len() - 1) as f64;
        let margins = 2.0 * config.horizontal_margin;

        let usable = available - margins - gaps;
        // Floor before clamping so dense layouts land exactly on the minimum.
        let cell_width = (usable / total_slots as f64)
            .floor()
            .max(config.min_cell_width);
        let cell_height = (cell_width * config.aspect_ratio).max(config.min_cell_height);

        let max_shelves = units.iter().map(|u| u.shelves.len()).max().unwrap_or(0);

        let canvas_width = total_slots as f64 * cell_width + margins + gaps;
        let canvas_height = max_shelves as f64 * cell_height + 2.0 * config.vertical_margin;

        Some(Self {
            cell_width,
            cell_height,
            canvas_width,
            canvas_height,
            total_slots,
            max_shelves,
            fonts: font_sizes(cell_width, config),
        })
    }

    /// Pixel height of every unit's grid
    pub fn grid_height(&self) -> f64 {
        self.max_shelves as f64 * self.cell_height
    }

    /// Pixel width of one unit's grid
    pub fn unit_width(&self, unit: &DisplayUnit) -> f64 {
        f64::from(unit.slot_count) * self.cell_width
    }
}

fn font_sizes(cell_width: f64, config: &LayoutConfig) -> FontSizes {
    FontSizes {
        primary: tier(cell_width, config.primary_font_divisor, config.primary_font_min),
        secondary: tier(
            cell_width,
            config.secondary_font_divisor,
            config.secondary_font_min,
        ),
    }
}

fn tier(cell_width: f64, divisor: f64, min: f64) -> f64 {
    if divisor <= 0.0 {
        return min;
    }
    (cell_width / divisor).floor().max(min)
}

/// Left edges of each unit, accumulated strictly left to right in input order
pub fn unit_offsets(
    units: &[DisplayUnit],
    metrics: &CanvasMetrics,
    config: &LayoutConfig,
) -> Vec<UnitOffset> {
    let mut x = config.horizontal_margin;
    units
        .iter()
        .map(|unit| {
            let offset = UnitOffset {
                unit_id: unit.unit_id,
                x,
            };
            x += metrics.unit_width(unit) + config.unit_gap;
            offset
        })
        .collect()
}
