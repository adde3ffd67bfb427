//! Input model: display units, shelf levels and the items placed on them
//!
//! These types are what the data source hands to the geometry engine. They
//! deserialize from JSON using either this crate's snake_case names or the
//! field names emitted by the upstream layout service (`daiban_id`,
//! `max_width`, `tandan`, `start_pos`, `face_count`, ...).

use serde::{Deserialize, Serialize};

use crate::error::{parse_json, InputError};

/// One physical shelving unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayUnit {
    #[serde(alias = "daiban_id")]
    pub unit_id: i64,
    /// Total horizontal slot capacity
    #[serde(alias = "max_width")]
    pub slot_count: u32,
    /// Shelf levels, top to bottom
    #[serde(default)]
    pub shelves: Vec<ShelfLevel>,
}

/// One horizontal level within a unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShelfLevel {
    #[serde(alias = "tandan")]
    pub level_index: i64,
    #[serde(default)]
    pub items: Vec<PlacedItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empty_space: Option<EmptySpan>,
}

/// A product occupying a contiguous slot range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedItem {
    #[serde(alias = "start_pos")]
    pub start_slot: u32,
    #[serde(alias = "face_count")]
    pub slot_span: u32,
    #[serde(alias = "attribute")]
    pub label: String,
    #[serde(alias = "color")]
    pub fill_color: String,
}

/// An explicitly unoccupied slot range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptySpan {
    #[serde(alias = "start_pos")]
    pub start_slot: u32,
    #[serde(alias = "width")]
    pub slot_span: u32,
}

impl DisplayUnit {
    pub fn new(unit_id: i64, slot_count: u32) -> Self {
        Self {
            unit_id,
            slot_count,
            shelves: vec![],
        }
    }

    /// Append a shelf level (builder style)
    pub fn with_shelf(mut self, shelf: ShelfLevel) -> Self {
        self.shelves.push(shelf);
        self
    }
}

impl ShelfLevel {
    pub fn new(level_index: i64) -> Self {
        Self {
            level_index,
            items: vec![],
            empty_space: None,
        }
    }

    pub fn with_item(mut self, item: PlacedItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn with_empty_space(mut self, start_slot: u32, slot_span: u32) -> Self {
        self.empty_space = Some(EmptySpan {
            start_slot,
            slot_span,
        });
        self
    }

    /// Number of slots covered by items and the empty span
    pub fn occupied_extent(&self) -> u32 {
        let items = self.items.iter().map(PlacedItem::end_slot);
        let empty = self.empty_space.iter().map(EmptySpan::end_slot);
        items.chain(empty).max().unwrap_or(0)
    }
}

impl PlacedItem {
    pub fn new(
        start_slot: u32,
        slot_span: u32,
        label: impl Into<String>,
        fill_color: impl Into<String>,
    ) -> Self {
        Self {
            start_slot,
            slot_span,
            label: label.into(),
            fill_color: fill_color.into(),
        }
    }

    /// Exclusive end of the occupied range
    pub fn end_slot(&self) -> u32 {
        self.start_slot.saturating_add(self.slot_span)
    }
}

impl EmptySpan {
    pub fn end_slot(&self) -> u32 {
        self.start_slot.saturating_add(self.slot_span)
    }
}

#[derive(Deserialize)]
struct WrappedUnits {
    units: Vec<DisplayUnit>,
}

/// Parse display units from JSON text
///
/// Accepts an array of units, an object `{"units": [...]}`, or a single unit
/// object (the shape returned by the layout service for one unit).
pub fn parse_units(source: &str) -> Result<Vec<DisplayUnit>, InputError> {
    // The Value only picks the shape; the typed pass reads the text again so
    // data errors keep their line and column.
    let value: serde_json::Value = parse_json(source)?;
    match value {
        serde_json::Value::Object(map) if map.contains_key("units") => {
            Ok(parse_json::<WrappedUnits>(source)?.units)
        }
        serde_json::Value::Object(_) => Ok(vec![parse_json(source)?]),
        _ => parse_json(source),
    }
}
