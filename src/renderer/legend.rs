//! Colour legend drawn in a band below the shelves

use serde::Serialize;

use crate::layout::{
    Baseline, BoundingBox, Point, Primitive, PrimitiveRole, RectPrimitive, Stroke, TextAnchor,
    TextPrimitive,
};

/// One swatch in the legend
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub label: String,
    pub fill: String,
}

impl LegendEntry {
    pub fn new(label: impl Into<String>, fill: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            fill: fill.into(),
        }
    }
}

/// Height of the band added under the canvas
pub const LEGEND_HEIGHT: f64 = 40.0;

const SWATCH_SIZE: f64 = 16.0;
const SWATCH_RADIUS: f64 = 4.0;
const LABEL_GAP: f64 = 8.0;
const ENTRY_GAP: f64 = 16.0;
const FONT_SIZE: f64 = 14.0;
const FONT_WEIGHT: u16 = 500;
const LABEL_FILL: &str = "#000000";

// Advance estimates; no font metrics are available here.
const NARROW_ADVANCE: f64 = 8.0;
const WIDE_ADVANCE: f64 = 14.0;

fn label_width(label: &str) -> f64 {
    label
        .chars()
        .map(|c| {
            if c.is_ascii() {
                NARROW_ADVANCE
            } else {
                WIDE_ADVANCE
            }
        })
        .sum()
}

/// Lay the entries out left to right starting at `(x, top)`
///
/// Returns the primitives and the x-coordinate where the row ends.
pub fn layout_legend(entries: &[LegendEntry], x: f64, top: f64) -> (Vec<Primitive>, f64) {
    let mut primitives = Vec::with_capacity(entries.len() * 2);
    let middle = top + LEGEND_HEIGHT / 2.0;
    let mut cursor = x;

    for entry in entries {
        primitives.push(Primitive::Rect(RectPrimitive {
            role: PrimitiveRole::LegendSwatch,
            bounds: BoundingBox::new(cursor, middle - SWATCH_SIZE / 2.0, SWATCH_SIZE, SWATCH_SIZE),
            fill: Some(entry.fill.clone()),
            stroke: Stroke::solid("none", 0.0),
            corner_radius: SWATCH_RADIUS,
            opacity: 1.0,
        }));
        cursor += SWATCH_SIZE + LABEL_GAP;

        primitives.push(Primitive::Text(TextPrimitive {
            role: PrimitiveRole::LegendLabel,
            content: entry.label.clone(),
            position: Point::new(cursor, middle),
            anchor: TextAnchor::Start,
            baseline: Baseline::Central,
            font_size: FONT_SIZE,
            font_weight: FONT_WEIGHT,
            fill: LABEL_FILL.to_string(),
        }));
        cursor += label_width(&entry.label) + ENTRY_GAP;
    }

    // The last entry needs no trailing gap.
    let end = if entries.is_empty() {
        x
    } else {
        cursor - ENTRY_GAP
    };
    (primitives, end)
}
