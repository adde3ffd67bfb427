//! Optional structural checks for display units
//!
//! The geometry engine draws whatever it is given. Callers that want to
//! reject inconsistent data run these checks first.

use std::collections::HashSet;

use crate::model::{DisplayUnit, ShelfLevel};

use super::error::{LayoutError, SlotRange, SpanKind};

/// Check that every unit is structurally consistent, stopping at the first problem
pub fn validate_units(units: &[DisplayUnit]) -> Result<(), LayoutError> {
    match lint_units(units).into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Collect every structural problem, in input order
pub fn lint_units(units: &[DisplayUnit]) -> Vec<LayoutError> {
    let mut problems = vec![];
    let mut seen = HashSet::new();

    for unit in units {
        if !seen.insert(unit.unit_id) {
            problems.push(LayoutError::DuplicateUnit {
                unit_id: unit.unit_id,
            });
        }
        for shelf in &unit.shelves {
            lint_shelf(unit, shelf, &mut problems);
        }
    }

    problems
}

fn lint_shelf(unit: &DisplayUnit, shelf: &ShelfLevel, problems: &mut Vec<LayoutError>) {
    let items = shelf
        .items
        .iter()
        .map(|i| (SpanKind::Item, i.start_slot, i.slot_span));
    let empty = shelf
        .empty_space
        .iter()
        .map(|e| (SpanKind::Empty, e.start_slot, e.slot_span));

    let mut ranges: Vec<SlotRange> = vec![];
    for (kind, start_slot, slot_span) in items.chain(empty) {
        if slot_span == 0 {
            problems.push(LayoutError::ZeroSpan {
                unit_id: unit.unit_id,
                level_index: shelf.level_index,
                kind,
                start_slot,
            });
            continue;
        }

        let end_slot = start_slot.saturating_add(slot_span);
        if end_slot > unit.slot_count {
            problems.push(LayoutError::OutOfRange {
                unit_id: unit.unit_id,
                level_index: shelf.level_index,
                kind,
                start_slot,
                end_slot,
                slot_count: unit.slot_count,
            });
        }
        ranges.push(SlotRange {
            start: start_slot,
            end: end_slot,
        });
    }

    // Report each overlapping pair once, in order of their start slot.
    ranges.sort_by_key(|r| (r.start, r.end));
    for (i, first) in ranges.iter().enumerate() {
        for second in &ranges[i + 1..] {
            if second.start >= first.end {
                break;
            }
            problems.push(LayoutError::Overlap {
                unit_id: unit.unit_id,
                level_index: shelf.level_index,
                first: *first,
                second: *second,
            });
        }
    }
}
