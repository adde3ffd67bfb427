//! Core types for the geometry engine output

use serde::Serialize;

/// A 2D point in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a zero-sized bounding box at the origin
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Center point of the bounding box
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::zero()
    }
}

/// Horizontal text alignment relative to the anchor point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

/// Vertical text alignment relative to the anchor point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Baseline {
    /// Alphabetic baseline at `y`
    Auto,
    /// Glyphs vertically centred on `y`
    Central,
}

/// What a primitive depicts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveRole {
    UnitBorder,
    UnitLabel,
    GridLine,
    LevelLabel,
    SlotIndex,
    Item,
    ItemLabel,
    FaceCount,
    EmptySpan,
    EmptyLabel,
    LegendSwatch,
    LegendLabel,
}

/// Stroke styling shared by rectangles and lines
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dasharray: Option<String>,
}

impl Stroke {
    pub fn solid(color: impl Into<String>, width: f64) -> Self {
        Self {
            color: color.into(),
            width,
            dasharray: None,
        }
    }

    pub fn dashed(color: impl Into<String>, width: f64, dasharray: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            width,
            dasharray: Some(dasharray.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RectPrimitive {
    pub role: PrimitiveRole,
    pub bounds: BoundingBox,
    /// `None` renders unfilled
    pub fill: Option<String>,
    pub stroke: Stroke,
    pub corner_radius: f64,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinePrimitive {
    pub role: PrimitiveRole,
    pub from: Point,
    pub to: Point,
    pub stroke: Stroke,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextPrimitive {
    pub role: PrimitiveRole,
    pub content: String,
    pub position: Point,
    pub anchor: TextAnchor,
    pub baseline: Baseline,
    pub font_size: f64,
    /// CSS numeric weight (700 = bold)
    pub font_weight: u16,
    pub fill: String,
}

/// A single positioned, styled draw instruction
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Primitive {
    Rect(RectPrimitive),
    Line(LinePrimitive),
    Text(TextPrimitive),
}

impl Primitive {
    pub fn role(&self) -> PrimitiveRole {
        match self {
            Primitive::Rect(r) => r.role,
            Primitive::Line(l) => l.role,
            Primitive::Text(t) => t.role,
        }
    }

    pub fn as_rect(&self) -> Option<&RectPrimitive> {
        match self {
            Primitive::Rect(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_line(&self) -> Option<&LinePrimitive> {
        match self {
            Primitive::Line(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextPrimitive> {
        match self {
            Primitive::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Two tiers of text size derived from the cell width
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FontSizes {
    /// Item labels and unit headers
    pub primary: f64,
    /// Slot indices, level labels, face counts
    pub secondary: f64,
}

/// Horizontal position of one unit's left grid edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UnitOffset {
    pub unit_id: i64,
    pub x: f64,
}

/// Primitives belonging to one unit, in draw order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitDrawing {
    pub unit_id: i64,
    pub primitives: Vec<Primitive>,
}

/// The fully resolved drawing produced by the geometry engine
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawSpec {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub unit_offsets: Vec<UnitOffset>,
    pub cell_width: f64,
    pub cell_height: f64,
    pub fonts: FontSizes,
    /// One entry per input unit, in input order
    pub units: Vec<UnitDrawing>,
}

impl DrawSpec {
    /// A zero-size drawing with nothing in it
    pub fn empty() -> Self {
        Self {
            canvas_width: 0.0,
            canvas_height: 0.0,
            unit_offsets: vec![],
            cell_width: 0.0,
            cell_height: 0.0,
            fonts: FontSizes {
                primary: 0.0,
                secondary: 0.0,
            },
            units: vec![],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Every primitive in draw order
    pub fn primitives(&self) -> impl Iterator<Item = &Primitive> {
        self.units.iter().flat_map(|u| u.primitives.iter())
    }

    /// Primitives with the given role, in draw order
    pub fn with_role(&self, role: PrimitiveRole) -> impl Iterator<Item = &Primitive> {
        self.primitives().filter(move |p| p.role() == role)
    }

    /// Left offset of the unit with `unit_id`, if present
    pub fn offset_of(&self, unit_id: i64) -> Option<f64> {
        self.unit_offsets
            .iter()
            .find(|o| o.unit_id == unit_id)
            .map(|o| o.x)
    }

    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::new(0.0, 0.0, self.canvas_width, self.canvas_height)
    }
}
