//! Assemble display units from flat placement records
//!
//! The optimization service reports one record per placed product: which
//! unit and level it sits on, its order along the shelf, how many faces it
//! takes and its attribute. This module packs those records into the unit
//! structure the geometry engine draws.

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::debug;

use crate::error::{parse_json, InputError};
use crate::model::{DisplayUnit, EmptySpan, PlacedItem, ShelfLevel};
use crate::stylesheet::Stylesheet;

/// One placed product as reported by the layout service
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PositionRecord {
    #[serde(alias = "台番号", alias = "daiban_id")]
    pub unit_id: i64,
    #[serde(alias = "棚段番号", alias = "tandan")]
    pub level_index: i64,
    /// Sort key along the shelf; not a slot position
    #[serde(alias = "棚位置", default)]
    pub slot_order: f64,
    #[serde(alias = "フェース数", default)]
    pub face_count: Option<f64>,
    #[serde(alias = "飲料属性", default)]
    pub attribute: Option<String>,
}

impl PositionRecord {
    pub fn new(unit_id: i64, level_index: i64, slot_order: f64, face_count: u32) -> Self {
        Self {
            unit_id,
            level_index,
            slot_order,
            face_count: Some(f64::from(face_count)),
            attribute: None,
        }
    }

    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    /// Faces occupied; a missing or non-positive count means one face
    fn faces(&self) -> u32 {
        match self.face_count {
            Some(n) if n.is_finite() && n >= 1.0 => n as u32,
            _ => 1,
        }
    }

    /// Attribute, or `unknown` when the record carries none
    fn attribute<'a>(&'a self, unknown: &'a str) -> &'a str {
        self.attribute
            .as_deref()
            .filter(|a| !a.is_empty())
            .unwrap_or(unknown)
    }
}

#[derive(Deserialize)]
struct WrappedRecords {
    position: Vec<PositionRecord>,
}

/// Parse position records from JSON: an array or `{"position": [...]}`
pub fn parse_records(source: &str) -> Result<Vec<PositionRecord>, InputError> {
    let value: serde_json::Value = parse_json(source)?;
    match value {
        serde_json::Value::Object(_) => Ok(parse_json::<WrappedRecords>(source)?.position),
        _ => parse_json(source),
    }
}

/// Pack records into display units
///
/// Units come out ordered by id and levels by index. Within a level the
/// records are sorted by `slot_order` and laid out contiguously from slot 0.
/// A unit's capacity is its widest level plus `extra_capacity`; every level
/// narrower than that gets an empty span covering the remainder.
pub fn assemble_units(
    records: &[PositionRecord],
    stylesheet: &Stylesheet,
    extra_capacity: u32,
) -> Vec<DisplayUnit> {
    let mut grouped: BTreeMap<i64, BTreeMap<i64, Vec<&PositionRecord>>> = BTreeMap::new();
    for record in records {
        grouped
            .entry(record.unit_id)
            .or_default()
            .entry(record.level_index)
            .or_default()
            .push(record);
    }

    grouped
        .into_iter()
        .map(|(unit_id, levels)| {
            let mut shelves: Vec<(ShelfLevel, u32)> = levels
                .into_iter()
                .map(|(level_index, records)| pack_level(level_index, records, stylesheet))
                .collect();

            let widest = shelves.iter().map(|(_, used)| *used).max().unwrap_or(0);
            let slot_count = widest.saturating_add(extra_capacity);

            for (shelf, used) in &mut shelves {
                if *used < slot_count {
                    shelf.empty_space = Some(EmptySpan {
                        start_slot: *used,
                        slot_span: slot_count - *used,
                    });
                }
            }
            debug!(unit_id, slot_count, levels = shelves.len(), "assembled unit");

            DisplayUnit {
                unit_id,
                slot_count,
                shelves: shelves.into_iter().map(|(shelf, _)| shelf).collect(),
            }
        })
        .collect()
}

/// Lay out one level's records left to right, returning the slots used
fn pack_level(
    level_index: i64,
    mut records: Vec<&PositionRecord>,
    stylesheet: &Stylesheet,
) -> (ShelfLevel, u32) {
    // Stable sort keeps input order for equal keys.
    records.sort_by(|a, b| a.slot_order.total_cmp(&b.slot_order));

    let mut shelf = ShelfLevel::new(level_index);
    let mut cursor = 0u32;
    for record in records {
        let faces = record.faces();
        let attribute = record.attribute(&stylesheet.unknown_attribute);
        shelf.items.push(PlacedItem {
            start_slot: cursor,
            slot_span: faces,
            label: attribute.to_string(),
            fill_color: stylesheet.fill_for(attribute).to_string(),
        });
        cursor = cursor.saturating_add(faces);
    }
    (shelf, cursor)
}
