//! Geometry guarantees of the drawing engine
//!
//! Sizing clamps, offset accumulation, span rectangles, text contrast and
//! determinism, checked against the default configuration.

use planogram_draw::layout::{Primitive, PrimitiveRole};
use planogram_draw::{
    compute_draw_spec, compute_draw_spec_default, DisplayUnit, DrawSpec, LayoutConfig,
    PlacedItem, ShelfLevel,
};
use pretty_assertions::assert_eq;

fn bare_unit(id: i64, slots: u32, shelves: usize) -> DisplayUnit {
    let mut unit = DisplayUnit::new(id, slots);
    for level in 0..shelves {
        unit = unit.with_shelf(ShelfLevel::new(level as i64 + 1));
    }
    unit
}

fn rects(spec: &DrawSpec, role: PrimitiveRole) -> Vec<planogram_draw::layout::RectPrimitive> {
    spec.with_role(role)
        .filter_map(Primitive::as_rect)
        .cloned()
        .collect()
}

#[test]
fn test_cell_size_never_below_minimum() {
    let config = LayoutConfig::default();
    for viewport in [0.0, 10.0, 320.0, 768.0, 1000.0, 1920.0, 5000.0] {
        for slots in [1, 2, 7, 20, 64, 300] {
            let units = [bare_unit(1, slots, 2), bare_unit(2, slots / 2, 1)];
            let spec = compute_draw_spec(&units, viewport, &config);
            assert!(
                spec.cell_width >= config.min_cell_width,
                "cell width {} below minimum at viewport {viewport}, slots {slots}",
                spec.cell_width
            );
            assert!(spec.cell_height >= config.min_cell_height);
        }
    }
}

#[test]
fn test_canvas_width_monotonic_in_total_slots() {
    // At this viewport every cell is clamped to the minimum width.
    let mut previous = 0.0;
    for slots in 1..80 {
        let units = [bare_unit(1, slots, 1), bare_unit(2, 3, 1)];
        let spec = compute_draw_spec_default(&units, 400.0);
        assert_eq!(spec.cell_width, 40.0);
        assert!(
            spec.canvas_width >= previous,
            "canvas width shrank at {slots} slots: {} < {previous}",
            spec.canvas_width
        );
        previous = spec.canvas_width;
    }
}

#[test]
fn test_unclamped_content_fits_usable_width() {
    // Above the minimum, flooring keeps the grid within one pixel per slot
    // of the usable width without ever exceeding it.
    let config = LayoutConfig::default();
    let usable = 1000.0 * 0.85 - 2.0 * config.horizontal_margin - config.unit_gap;
    for slots in 1..10 {
        let units = [bare_unit(1, slots, 1), bare_unit(2, 3, 1)];
        let spec = compute_draw_spec(&units, 1000.0, &config);
        let total = f64::from(slots + 3);
        let content = total * spec.cell_width;
        assert!(content <= usable);
        assert!(content > usable - total);
    }
}

#[test]
fn test_offsets_increase_with_exact_gap() {
    let config = LayoutConfig::default();
    let units = [
        bare_unit(10, 4, 2),
        bare_unit(11, 1, 1),
        bare_unit(12, 6, 3),
        bare_unit(13, 2, 1),
    ];
    let spec = compute_draw_spec(&units, 1400.0, &config);

    assert_eq!(spec.unit_offsets.len(), units.len());
    assert_eq!(spec.unit_offsets[0].x, config.horizontal_margin);
    for (i, pair) in spec.unit_offsets.windows(2).enumerate() {
        assert!(pair[1].x > pair[0].x);
        let end_of_previous = pair[0].x + f64::from(units[i].slot_count) * spec.cell_width;
        assert_eq!(pair[1].x - end_of_previous, config.unit_gap);
    }
    let ids: Vec<i64> = spec.unit_offsets.iter().map(|o| o.unit_id).collect();
    assert_eq!(ids, vec![10, 11, 12, 13]);
}

#[test]
fn test_item_and_empty_span_rectangles() {
    let unit = DisplayUnit::new(1, 4).with_shelf(
        ShelfLevel::new(1)
            .with_item(PlacedItem::new(1, 2, "tea", "#15803d"))
            .with_empty_space(3, 1),
    );
    let spec = compute_draw_spec_default(&[unit], 1000.0);
    let x0 = spec.unit_offsets[0].x;

    let items = rects(&spec, PrimitiveRole::Item);
    let empties = rects(&spec, PrimitiveRole::EmptySpan);
    assert_eq!(items.len(), 1);
    assert_eq!(empties.len(), 1);

    let item = &items[0].bounds;
    let empty = &empties[0].bounds;
    assert_eq!(item.width, 2.0 * spec.cell_width);
    assert_eq!(empty.width, spec.cell_width);
    assert!(item.right() <= empty.x, "item and empty span overlap");

    // Slot 0 is covered by neither.
    assert_eq!(item.x, x0 + spec.cell_width);
    assert!(item.x > x0 && empty.x > x0);

    // Empty spans are styled apart from items.
    assert_ne!(items[0].stroke.dasharray, empties[0].stroke.dasharray);
    assert_eq!(empties[0].stroke.dasharray.as_deref(), Some("6,3"));
    assert_eq!(items[0].opacity, 0.95);
}

#[test]
fn test_second_unit_offset() {
    let config = LayoutConfig::default();
    let units = [bare_unit(1, 3, 1), bare_unit(2, 5, 1)];
    let spec = compute_draw_spec(&units, 2000.0, &config);

    // (1200 - 120 - 80) / 8 = 125, well above the minimum
    assert_eq!(spec.cell_width, 125.0);
    assert_eq!(
        spec.offset_of(2),
        Some(config.horizontal_margin + 3.0 * spec.cell_width + config.unit_gap)
    );
}

#[test]
fn test_small_viewport_pins_cell_width() {
    let config = LayoutConfig::default();
    let units = [bare_unit(1, 12, 2), bare_unit(2, 9, 3)];
    let expected_canvas = 21.0 * config.min_cell_width
        + 2.0 * config.horizontal_margin
        + config.unit_gap;

    for viewport in [600.0, 300.0, 100.0, 1.0, 0.0] {
        let spec = compute_draw_spec(&units, viewport, &config);
        assert_eq!(spec.cell_width, config.min_cell_width);
        assert_eq!(spec.canvas_width, expected_canvas);
    }
}

#[test]
fn test_canvas_exceeds_viewport_instead_of_clipping() {
    let units = [bare_unit(1, 40, 1)];
    let spec = compute_draw_spec_default(&units, 800.0);
    assert_eq!(spec.canvas_width, 40.0 * 40.0 + 120.0);
    assert!(spec.canvas_width > 800.0);
}

#[test]
fn test_label_contrast() {
    let shelf = ShelfLevel::new(1)
        .with_item(PlacedItem::new(0, 1, "tea", "#15803d"))
        .with_item(PlacedItem::new(1, 1, "coffee", "#5d2f0a"))
        .with_item(PlacedItem::new(2, 1, "dark", "#111111"))
        .with_item(PlacedItem::new(3, 1, "odd", "chartreuse"));
    let spec = compute_draw_spec_default(&[DisplayUnit::new(1, 4).with_shelf(shelf)], 1000.0);

    let fills: Vec<(String, String)> = spec
        .with_role(PrimitiveRole::ItemLabel)
        .filter_map(Primitive::as_text)
        .map(|t| (t.content.clone(), t.fill.clone()))
        .collect();
    assert_eq!(
        fills,
        vec![
            ("tea".to_string(), "#ffffff".to_string()),
            ("coffee".to_string(), "#ffffff".to_string()),
            ("dark".to_string(), "#000000".to_string()),
            ("odd".to_string(), "#000000".to_string()),
        ]
    );

    // Face counts follow the same lookup.
    let face_fills: Vec<&str> = spec
        .with_role(PrimitiveRole::FaceCount)
        .filter_map(Primitive::as_text)
        .map(|t| t.fill.as_str())
        .collect();
    assert_eq!(face_fills, vec!["#ffffff", "#ffffff", "#000000", "#000000"]);
}

#[test]
fn test_identical_input_identical_output() {
    let build = || {
        vec![
            DisplayUnit::new(1, 5).with_shelf(
                ShelfLevel::new(2)
                    .with_item(PlacedItem::new(0, 3, "tea", "#15803d"))
                    .with_empty_space(3, 2),
            ),
            bare_unit(2, 3, 2),
        ]
    };
    let first = compute_draw_spec_default(&build(), 1111.0);
    let second = compute_draw_spec_default(&build(), 1111.0);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_empty_units_give_zero_canvas() {
    let spec = compute_draw_spec_default(&[], 1000.0);
    assert_eq!(spec.canvas_width, 0.0);
    assert_eq!(spec.canvas_height, 0.0);
    assert_eq!(spec.primitives().count(), 0);
}

#[test]
fn test_grid_line_counts_per_unit() {
    let units = [bare_unit(1, 3, 2), bare_unit(2, 5, 4)];
    let spec = compute_draw_spec_default(&units, 1000.0);
    let counts: Vec<usize> = spec
        .units
        .iter()
        .map(|u| {
            u.primitives
                .iter()
                .filter(|p| p.role() == PrimitiveRole::GridLine)
                .count()
        })
        .collect();
    // slots + 1 vertical, max shelves (4) + 1 horizontal
    assert_eq!(counts, vec![4 + 5, 6 + 5]);
    assert_eq!(spec.canvas_height, 4.0 * spec.cell_height + 140.0);
}
