//! Draw-primitive generation
//!
//! Turns display units into a [`DrawSpec`]. Every unit is emitted in the
//! same order: border, header, grid, level labels, slot indices, items and
//! finally the empty span, so later primitives sit on top of earlier ones.

use tracing::{debug, warn};

use crate::model::{DisplayUnit, EmptySpan, PlacedItem};

use super::config::LayoutConfig;
use super::contrast::text_color_for;
use super::metrics::{unit_offsets, CanvasMetrics};
use super::types::{
    Baseline, BoundingBox, DrawSpec, LinePrimitive, Point, Primitive, PrimitiveRole,
    RectPrimitive, Stroke, TextAnchor, TextPrimitive, UnitDrawing,
};

/// Fixed styling of the drawing
mod style {
    pub const BORDER_INSET: f64 = 8.0;
    pub const BORDER_STROKE: &str = "#374151";
    pub const BORDER_STROKE_WIDTH: f64 = 3.0;
    pub const BORDER_DASH: &str = "10,5";
    pub const BORDER_RADIUS: f64 = 6.0;

    pub const HEADER_RAISE: f64 = 35.0;
    pub const HEADER_GROW: f64 = 4.0;
    pub const HEADER_FILL: &str = "#1f2937";

    pub const GRID_STROKE: &str = "#e5e7eb";
    pub const GRID_STROKE_WIDTH: f64 = 0.5;

    pub const LEVEL_LABEL_SHIFT: f64 = 35.0;
    pub const LEVEL_LABEL_GROW: f64 = 2.0;
    pub const LEVEL_LABEL_FILL: &str = "#374151";

    pub const SLOT_INDEX_RAISE: f64 = 15.0;
    pub const SLOT_INDEX_FILL: &str = "#6b7280";

    pub const ITEM_STROKE: &str = "#1f2937";
    pub const ITEM_STROKE_WIDTH: f64 = 1.5;
    pub const ITEM_OPACITY: f64 = 0.95;
    pub const ITEM_RADIUS: f64 = 3.0;
    pub const ITEM_LABEL_RAISE: f64 = 6.0;
    pub const FACE_COUNT_DROP: f64 = 4.0;

    pub const EMPTY_FILL: &str = "rgba(156, 163, 175, 0.1)";
    pub const EMPTY_STROKE: &str = "#9ca3af";
    pub const EMPTY_STROKE_WIDTH: f64 = 2.0;
    pub const EMPTY_DASH: &str = "6,3";
    pub const EMPTY_LABEL_FILL: &str = "#6b7280";

    pub const WEIGHT_MEDIUM: u16 = 500;
    pub const WEIGHT_SEMIBOLD: u16 = 600;
    pub const WEIGHT_BOLD: u16 = 700;
}

/// Compute the complete drawing for `units` sized against `viewport_width`
///
/// Pure and infallible: an empty unit list yields [`DrawSpec::empty`], and a
/// zero-capacity unit is drawn with zero width without disturbing the
/// shared cell size.
pub fn compute_draw_spec(
    units: &[DisplayUnit],
    viewport_width: f64,
    config: &LayoutConfig,
) -> DrawSpec {
    let Some(metrics) = CanvasMetrics::compute(units, viewport_width, config) else {
        debug!("no display units, producing empty drawing");
        return DrawSpec::empty();
    };

    debug!(
        units = units.len(),
        total_slots = metrics.total_slots,
        cell_width = metrics.cell_width,
        cell_height = metrics.cell_height,
        canvas_width = metrics.canvas_width,
        canvas_height = metrics.canvas_height,
        "computed canvas metrics"
    );
    for unit in units.iter().filter(|u| u.slot_count == 0) {
        warn!(unit_id = unit.unit_id, "unit has no slots, drawing it with zero width");
    }

    let offsets = unit_offsets(units, &metrics, config);
    let drawings = units
        .iter()
        .zip(&offsets)
        .map(|(unit, offset)| {
            UnitPainter {
                unit,
                x: offset.x,
                metrics: &metrics,
                config,
                primitives: vec![],
            }
            .paint()
        })
        .collect();

    DrawSpec {
        canvas_width: metrics.canvas_width,
        canvas_height: metrics.canvas_height,
        unit_offsets: offsets,
        cell_width: metrics.cell_width,
        cell_height: metrics.cell_height,
        fonts: metrics.fonts,
        units: drawings,
    }
}

/// Emits the primitives of one unit
struct UnitPainter<'a> {
    unit: &'a DisplayUnit,
    /// Left edge of the unit's grid
    x: f64,
    metrics: &'a CanvasMetrics,
    config: &'a LayoutConfig,
    primitives: Vec<Primitive>,
}

impl UnitPainter<'_> {
    fn paint(mut self) -> UnitDrawing {
        self.border();
        self.header();
        self.grid();
        self.level_labels();
        self.slot_indices();
        for (row, shelf) in self.unit.shelves.iter().enumerate() {
            for item in &shelf.items {
                self.item(row, item);
            }
            if let Some(empty) = &shelf.empty_space {
                self.empty_span(row, empty);
            }
        }

        UnitDrawing {
            unit_id: self.unit.unit_id,
            primitives: self.primitives,
        }
    }

    fn width(&self) -> f64 {
        self.metrics.unit_width(self.unit)
    }

    fn top(&self) -> f64 {
        self.config.vertical_margin
    }

    /// Cell-aligned box covering `span` slots from `start` in shelf `row`
    fn cell_box(&self, row: usize, start: u32, span: u32) -> BoundingBox {
        let cw = self.metrics.cell_width;
        let ch = self.metrics.cell_height;
        BoundingBox::new(
            self.x + f64::from(start) * cw,
            self.top() + row as f64 * ch,
            f64::from(span) * cw,
            ch,
        )
    }

    fn border(&mut self) {
        let inset = style::BORDER_INSET;
        self.primitives.push(Primitive::Rect(RectPrimitive {
            role: PrimitiveRole::UnitBorder,
            bounds: BoundingBox::new(
                self.x - inset,
                self.top() - inset,
                self.width() + 2.0 * inset,
                self.metrics.grid_height() + 2.0 * inset,
            ),
            fill: None,
            stroke: Stroke::dashed(
                style::BORDER_STROKE,
                style::BORDER_STROKE_WIDTH,
                style::BORDER_DASH,
            ),
            corner_radius: style::BORDER_RADIUS,
            opacity: 1.0,
        }));
    }

    fn header(&mut self) {
        let content = format!("{}{}", self.config.unit_label_prefix, self.unit.unit_id);
        self.text(
            PrimitiveRole::UnitLabel,
            content,
            Point::new(self.x + self.width() / 2.0, self.top() - style::HEADER_RAISE),
            Baseline::Auto,
            self.metrics.fonts.primary + style::HEADER_GROW,
            style::WEIGHT_BOLD,
            style::HEADER_FILL,
        );
    }

    fn grid(&mut self) {
        let cw = self.metrics.cell_width;
        let ch = self.metrics.cell_height;
        let top = self.top();
        let bottom = self.metrics.canvas_height - self.config.vertical_margin;

        for i in 0..=self.unit.slot_count {
            let x = self.x + f64::from(i) * cw;
            self.grid_line(Point::new(x, top), Point::new(x, bottom));
        }
        let right = self.x + self.width();
        for i in 0..=self.metrics.max_shelves {
            let y = top + i as f64 * ch;
            self.grid_line(Point::new(self.x, y), Point::new(right, y));
        }
    }

    fn grid_line(&mut self, from: Point, to: Point) {
        self.primitives.push(Primitive::Line(LinePrimitive {
            role: PrimitiveRole::GridLine,
            from,
            to,
            stroke: Stroke::solid(style::GRID_STROKE, style::GRID_STROKE_WIDTH),
        }));
    }

    fn level_labels(&mut self) {
        let ch = self.metrics.cell_height;
        for (row, shelf) in self.unit.shelves.iter().enumerate() {
            let content = format!("{}{}", shelf.level_index, self.config.level_label_suffix);
            self.text(
                PrimitiveRole::LevelLabel,
                content,
                Point::new(
                    self.x - style::LEVEL_LABEL_SHIFT,
                    self.top() + row as f64 * ch + ch / 2.0,
                ),
                Baseline::Central,
                self.metrics.fonts.secondary + style::LEVEL_LABEL_GROW,
                style::WEIGHT_BOLD,
                style::LEVEL_LABEL_FILL,
            );
        }
    }

    fn slot_indices(&mut self) {
        let cw = self.metrics.cell_width;
        for i in 0..self.unit.slot_count {
            self.text(
                PrimitiveRole::SlotIndex,
                (i + 1).to_string(),
                Point::new(
                    self.x + f64::from(i) * cw + cw / 2.0,
                    self.top() - style::SLOT_INDEX_RAISE,
                ),
                Baseline::Auto,
                self.metrics.fonts.secondary,
                style::WEIGHT_MEDIUM,
                style::SLOT_INDEX_FILL,
            );
        }
    }

    fn item(&mut self, row: usize, item: &PlacedItem) {
        let bounds = self.cell_box(row, item.start_slot, item.slot_span);
        self.primitives.push(Primitive::Rect(RectPrimitive {
            role: PrimitiveRole::Item,
            bounds,
            fill: Some(item.fill_color.clone()),
            stroke: Stroke::solid(style::ITEM_STROKE, style::ITEM_STROKE_WIDTH),
            corner_radius: style::ITEM_RADIUS,
            opacity: style::ITEM_OPACITY,
        }));

        let center = bounds.center();
        let text_fill = text_color_for(&item.fill_color);
        let primary = self.metrics.fonts.primary;
        self.text(
            PrimitiveRole::ItemLabel,
            item.label.clone(),
            Point::new(center.x, center.y - style::ITEM_LABEL_RAISE),
            Baseline::Central,
            primary,
            style::WEIGHT_BOLD,
            text_fill,
        );
        self.text(
            PrimitiveRole::FaceCount,
            format!("({})", item.slot_span),
            Point::new(center.x, center.y + primary - style::FACE_COUNT_DROP),
            Baseline::Central,
            self.metrics.fonts.secondary,
            style::WEIGHT_SEMIBOLD,
            text_fill,
        );
    }

    fn empty_span(&mut self, row: usize, empty: &EmptySpan) {
        let bounds = self.cell_box(row, empty.start_slot, empty.slot_span);
        self.primitives.push(Primitive::Rect(RectPrimitive {
            role: PrimitiveRole::EmptySpan,
            bounds,
            fill: Some(style::EMPTY_FILL.to_string()),
            stroke: Stroke::dashed(
                style::EMPTY_STROKE,
                style::EMPTY_STROKE_WIDTH,
                style::EMPTY_DASH,
            ),
            corner_radius: style::ITEM_RADIUS,
            opacity: 1.0,
        }));
        self.text(
            PrimitiveRole::EmptyLabel,
            self.config.empty_label.clone(),
            bounds.center(),
            Baseline::Central,
            self.metrics.fonts.primary,
            style::WEIGHT_SEMIBOLD,
            style::EMPTY_LABEL_FILL,
        );
    }

    #[allow(clippy::too_many_arguments)]
    fn text(
        &mut self,
        role: PrimitiveRole,
        content: String,
        position: Point,
        baseline: Baseline,
        font_size: f64,
        font_weight: u16,
        fill: &str,
    ) {
        self.primitives.push(Primitive::Text(TextPrimitive {
            role,
            content,
            position,
            anchor: TextAnchor::Middle,
            baseline,
            font_size,
            font_weight,
            fill: fill.to_string(),
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ShelfLevel;

    fn sample_unit() -> DisplayUnit {
        DisplayUnit::new(1, 4).with_shelf(
            ShelfLevel::new(1)
                .with_item(PlacedItem::new(1, 2, "tea", "#15803d"))
                .with_empty_space(3, 1),
        )
    }

    fn roles(spec: &DrawSpec) -> Vec<PrimitiveRole> {
        spec.primitives().map(Primitive::role).collect()
    }

    #[test]
    fn test_empty_input() {
        let spec = compute_draw_spec(&[], 1000.0, &LayoutConfig::default());
        assert_eq!(spec, DrawSpec::empty());
    }

    #[test]
    fn test_primitive_order() {
        let spec = compute_draw_spec(&[sample_unit()], 1000.0, &LayoutConfig::default());
        use PrimitiveRole::*;
        let mut expected = vec![UnitBorder, UnitLabel];
        // 5 vertical + 2 horizontal grid lines
        expected.extend(std::iter::repeat(GridLine).take(7));
        expected.push(LevelLabel);
        expected.extend(std::iter::repeat(SlotIndex).take(4));
        expected.extend([Item, ItemLabel, FaceCount, EmptySpan, EmptyLabel]);
        assert_eq!(roles(&spec), expected);
    }

    #[test]
    fn test_border_geometry() {
        let spec = compute_draw_spec(&[sample_unit()], 1000.0, &LayoutConfig::default());
        let border = spec.primitives().next().and_then(Primitive::as_rect).unwrap();
        assert_eq!(border.bounds.x, 52.0);
        assert_eq!(border.bounds.y, 62.0);
        assert_eq!(border.bounds.width, 4.0 * 182.0 + 16.0);
        assert_eq!(border.bounds.height, spec.cell_height + 16.0);
        assert_eq!(border.fill, None);
        assert_eq!(border.stroke.dasharray.as_deref(), Some("10,5"));
    }

    #[test]
    fn test_item_texts() {
        let spec = compute_draw_spec(&[sample_unit()], 1000.0, &LayoutConfig::default());
        let label = spec
            .with_role(PrimitiveRole::ItemLabel)
            .find_map(Primitive::as_text)
            .unwrap();
        assert_eq!(label.content, "tea");
        assert_eq!(label.fill, "#ffffff");
        assert_eq!(label.font_size, spec.fonts.primary);
        // item spans slots 1..3: centre x = 60 + 182 * 2
        assert_eq!(label.position.x, 60.0 + 182.0 * 2.0);

        let faces = spec
            .with_role(PrimitiveRole::FaceCount)
            .find_map(Primitive::as_text)
            .unwrap();
        assert_eq!(faces.content, "(2)");
        let item = spec
            .with_role(PrimitiveRole::Item)
            .find_map(Primitive::as_rect)
            .unwrap();
        let center = item.bounds.center();
        assert_eq!(label.position.y, center.y - 6.0);
        assert_eq!(faces.position.y, center.y + spec.fonts.primary - 4.0);
    }

    #[test]
    fn test_labels_use_config_text() {
        let config = LayoutConfig::default()
            .with_unit_label_prefix("台")
            .with_level_label_suffix("段")
            .with_empty_label("空き");
        let spec = compute_draw_spec(&[sample_unit()], 1000.0, &config);
        let texts: Vec<&str> = spec
            .primitives()
            .filter_map(Primitive::as_text)
            .map(|t| t.content.as_str())
            .collect();
        assert!(texts.contains(&"台1"));
        assert!(texts.contains(&"1段"));
        assert!(texts.contains(&"空き"));
    }

    #[test]
    fn test_shorter_unit_grid_uses_max_shelves() {
        let tall = DisplayUnit::new(1, 2)
            .with_shelf(ShelfLevel::new(1))
            .with_shelf(ShelfLevel::new(2))
            .with_shelf(ShelfLevel::new(3));
        let short = DisplayUnit::new(2, 2).with_shelf(ShelfLevel::new(1));
        let spec = compute_draw_spec(&[tall, short], 1000.0, &LayoutConfig::default());

        let short_lines: Vec<_> = spec.units[1]
            .primitives
            .iter()
            .filter_map(Primitive::as_line)
            .collect();
        // 3 vertical + 4 horizontal
        assert_eq!(short_lines.len(), 7);
        let level_labels = spec.units[1]
            .primitives
            .iter()
            .filter(|p| p.role() == PrimitiveRole::LevelLabel)
            .count();
        assert_eq!(level_labels, 1);
    }

    #[test]
    fn test_zero_slot_unit() {
        let spec = compute_draw_spec(
            &[DisplayUnit::new(1, 0).with_shelf(ShelfLevel::new(1))],
            1000.0,
            &LayoutConfig::default(),
        );
        assert!(spec.cell_width.is_finite());
        let vertical = spec
            .primitives()
            .filter_map(Primitive::as_line)
            .filter(|l| l.from.y != l.to.y)
            .count();
        // a zero-width unit still has its left edge: one vertical line
        assert_eq!(vertical, 1);
        assert_eq!(spec.with_role(PrimitiveRole::SlotIndex).count(), 0);
    }
}
