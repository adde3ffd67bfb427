//! Structural problems found when validating display units

use thiserror::Error;

/// Which kind of span a problem refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    Item,
    Empty,
}

impl std::fmt::Display for SpanKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpanKind::Item => write!(f, "item"),
            SpanKind::Empty => write!(f, "empty span"),
        }
    }
}

/// Half-open slot range `start..end`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotRange {
    pub start: u32,
    pub end: u32,
}

impl std::fmt::Display for SlotRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Errors reported by [`validate_units`](super::validate_units)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// Two units share an identifier
    #[error("unit {unit_id} appears more than once")]
    DuplicateUnit { unit_id: i64 },

    /// An item or empty span covering no slots
    #[error("{kind} at slot {start_slot} on unit {unit_id} level {level_index} spans zero slots")]
    ZeroSpan {
        unit_id: i64,
        level_index: i64,
        kind: SpanKind,
        start_slot: u32,
    },

    /// A span reaching past the unit's capacity
    #[error(
        "{kind} at slots {start_slot}..{end_slot} on unit {unit_id} level {level_index} exceeds capacity {slot_count}"
    )]
    OutOfRange {
        unit_id: i64,
        level_index: i64,
        kind: SpanKind,
        start_slot: u32,
        end_slot: u32,
        slot_count: u32,
    },

    /// Two spans on one shelf sharing slots
    #[error("slots {first} and {second} overlap on unit {unit_id} level {level_index}")]
    Overlap {
        unit_id: i64,
        level_index: i64,
        first: SlotRange,
        second: SlotRange,
    },
}

impl LayoutError {
    /// Unit the problem belongs to
    pub fn unit_id(&self) -> i64 {
        match self {
            Self::DuplicateUnit { unit_id }
            | Self::ZeroSpan { unit_id, .. }
            | Self::OutOfRange { unit_id, .. }
            | Self::Overlap { unit_id, .. } => *unit_id,
        }
    }
}
