//! Planogram Draw - responsive vector drawings of retail shelf layouts
//!
//! This library turns a description of display units (slots, shelf levels
//! and the items placed on them) into a pixel-exact drawing specification,
//! and renders that specification to SVG.
//!
//! # Example
//!
//! ```rust
//! use planogram_draw::render;
//!
//! let svg = render(
//!     r##"[{"unit_id": 1, "slot_count": 4, "shelves": [
//!         {"level_index": 1,
//!          "items": [{"start_slot": 0, "slot_span": 2, "label": "tea", "fill_color": "#15803d"}]}
//!     ]}]"##,
//!     Some(1280.0),
//! )
//! .unwrap();
//! assert!(svg.contains("<svg"));
//! assert!(svg.contains("tea"));
//! ```

pub mod error;
pub mod layout;
pub mod model;
pub mod positions;
pub mod renderer;
pub mod stylesheet;

pub use error::InputError;
pub use layout::{
    compute_draw_spec, compute_draw_spec_default, lint_units, validate_units, ConfigError,
    DrawSpec, LayoutConfig, LayoutError,
};
pub use model::{parse_units, DisplayUnit, EmptySpan, PlacedItem, ShelfLevel};
pub use positions::{assemble_units, parse_records, PositionRecord};
pub use renderer::{render_svg, to_data_uri, LegendEntry, SvgConfig};

use thiserror::Error;
use tracing::{debug, warn};

// Re-export Stylesheet for public API
pub use stylesheet::{Stylesheet, StylesheetError};

/// Errors that can occur during the render pipeline
#[derive(Debug, Error)]
pub enum RenderError {
    /// Input could not be read as units or records
    #[error("input error: {0}")]
    Input(#[from] InputError),

    /// Validation was requested and the units are inconsistent
    #[error("validation failed: {}", format_layout_errors(.0))]
    Validation(Vec<LayoutError>),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("stylesheet error: {0}")]
    Stylesheet(#[from] StylesheetError),
}

impl From<Vec<LayoutError>> for RenderError {
    fn from(errors: Vec<LayoutError>) -> Self {
        RenderError::Validation(errors)
    }
}

fn format_layout_errors(errors: &[LayoutError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// What the input text describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputKind {
    /// Display units, ready to draw
    #[default]
    Units,
    /// Flat position records, packed into units first
    Records,
}

/// Configuration for the complete render pipeline
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// Layout configuration
    pub layout: LayoutConfig,
    /// SVG output configuration
    pub svg: SvgConfig,
    /// Attribute palette used when assembling records
    pub stylesheet: Stylesheet,
    /// How to read the input text
    pub input_kind: InputKind,
    /// Slots added to each unit's widest level when assembling records
    pub extra_capacity: u32,
    /// Reject inconsistent units instead of drawing them as given
    pub validate: bool,
    /// Draw a colour legend for the palette attributes in use
    pub legend: bool,
    /// Debug mode: log every unit's offset and primitive count
    pub debug: bool,
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the layout configuration
    pub fn with_layout(mut self, config: LayoutConfig) -> Self {
        self.layout = config;
        self
    }

    /// Set the SVG configuration
    pub fn with_svg(mut self, config: SvgConfig) -> Self {
        self.svg = config;
        self
    }

    /// Set the stylesheet for attribute colors
    pub fn with_stylesheet(mut self, stylesheet: Stylesheet) -> Self {
        self.stylesheet = stylesheet;
        self
    }

    /// Read the input as position records instead of units
    pub fn with_input_kind(mut self, kind: InputKind) -> Self {
        self.input_kind = kind;
        self
    }

    /// Set the spare capacity added when assembling records
    pub fn with_extra_capacity(mut self, slots: u32) -> Self {
        self.extra_capacity = slots;
        self
    }

    /// Enable or disable validation before drawing
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// Enable or disable the colour legend
    pub fn with_legend(mut self, legend: bool) -> Self {
        self.legend = legend;
        self
    }

    /// Enable or disable debug mode
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// SVG options for drawing `units`, with legend entries filled in
    pub fn svg_for(&self, units: &[DisplayUnit]) -> SvgConfig {
        if self.legend {
            self.svg
                .clone()
                .with_legend(self.stylesheet.legend_for(units))
        } else {
            self.svg.clone()
        }
    }
}

/// Render JSON units to SVG with default configuration
///
/// `viewport_width` is the width available to the drawing; `None` sizes
/// against the configured fallback width.
pub fn render(source: &str, viewport_width: Option<f64>) -> Result<String, RenderError> {
    render_with_config(source, viewport_width, &RenderConfig::default())
}

/// Render JSON input to SVG with custom configuration
///
/// # Example
///
/// ```rust
/// use planogram_draw::{render_with_config, InputKind, RenderConfig, SvgConfig};
///
/// let config = RenderConfig::new()
///     .with_input_kind(InputKind::Records)
///     .with_extra_capacity(2)
///     .with_svg(SvgConfig::default().with_standalone(false));
///
/// let svg = render_with_config(
///     r#"[{"unit_id": 1, "level_index": 1, "slot_order": 0, "face_count": 2, "attribute": "coffee"}]"#,
///     None,
///     &config,
/// )
/// .unwrap();
/// assert!(svg.starts_with("<svg"));
/// assert!(svg.contains("coffee"));
/// ```
pub fn render_with_config(
    source: &str,
    viewport_width: Option<f64>,
    config: &RenderConfig,
) -> Result<String, RenderError> {
    let units = load_units(source, config)?;
    let spec = draw_units(&units, viewport_width, config);
    Ok(render_svg(&spec, &config.svg_for(&units)))
}

/// Load units from JSON input according to `config.input_kind`
pub fn load_units(source: &str, config: &RenderConfig) -> Result<Vec<DisplayUnit>, RenderError> {
    let units = match config.input_kind {
        InputKind::Units => parse_units(source)?,
        InputKind::Records => {
            let records = parse_records(source)?;
            assemble_units(&records, &config.stylesheet, config.extra_capacity)
        }
    };

    if config.validate {
        let problems = lint_units(&units);
        if !problems.is_empty() {
            for problem in &problems {
                warn!(unit_id = problem.unit_id(), "{problem}");
            }
            return Err(problems.into());
        }
    }

    Ok(units)
}

/// Parse JSON input and compute its drawing without rendering it
pub fn draw_with_config(
    source: &str,
    viewport_width: Option<f64>,
    config: &RenderConfig,
) -> Result<DrawSpec, RenderError> {
    let units = load_units(source, config)?;
    Ok(draw_units(&units, viewport_width, config))
}

/// Compute the drawing for already loaded units
pub fn draw_units(
    units: &[DisplayUnit],
    viewport_width: Option<f64>,
    config: &RenderConfig,
) -> DrawSpec {
    let viewport = config.layout.resolve_viewport(viewport_width);
    let spec = compute_draw_spec(units, viewport, &config.layout);

    if config.debug {
        for (offset, unit) in spec.unit_offsets.iter().zip(&spec.units) {
            debug!(
                unit_id = offset.unit_id,
                x = offset.x,
                primitives = unit.primitives.len(),
                "unit layout"
            );
        }
    }

    spec
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_UNIT: &str = r##"[{"unit_id": 1, "slot_count": 4, "shelves": [
        {"level_index": 1,
         "items": [{"start_slot": 1, "slot_span": 2, "label": "tea", "fill_color": "#15803d"}],
         "empty_space": {"start_slot": 3, "slot_span": 1}}
    ]}]"##;

    #[test]
    fn test_render_simple_unit() {
        let svg = render(ONE_UNIT, Some(1000.0)).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("</svg>"));
        assert!(svg.contains(r#"data-unit-id="1""#));
        assert!(svg.contains("pg-item"));
        assert!(svg.contains(">tea<"));
        assert!(svg.contains(">(2)<"));
        assert!(svg.contains(">empty<"));
    }

    #[test]
    fn test_render_sizes_svg_to_canvas() {
        let svg = render(ONE_UNIT, Some(1000.0)).unwrap();
        // 4 slots * 182 + 2 * 60
        assert!(svg.contains(r#"width="848""#));
    }

    #[test]
    fn test_render_empty_list() {
        let svg = render("[]", None).unwrap();
        assert!(svg.contains(r#"viewBox="0 0 0 0""#));
        assert!(!svg.contains("<g"));
    }

    #[test]
    fn test_render_invalid_json() {
        let err = render("[{", None).unwrap_err();
        assert!(matches!(err, RenderError::Input(_)));
    }

    #[test]
    fn test_validation_rejects_overflow() {
        let source = r##"[{"unit_id": 1, "slot_count": 2, "shelves": [
            {"level_index": 1, "items": [{"start_slot": 1, "slot_span": 2, "label": "x", "fill_color": "#fff"}]}
        ]}]"##;
        assert!(render(source, None).is_ok());

        let config = RenderConfig::new().with_validation(true);
        let err = render_with_config(source, None, &config).unwrap_err();
        match err {
            RenderError::Validation(problems) => {
                assert_eq!(problems.len(), 1);
                assert_eq!(problems[0].unit_id(), 1);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_legend_only_when_enabled() {
        let plain = render(ONE_UNIT, Some(1000.0)).unwrap();
        assert!(!plain.contains("pg-legend"));

        let config = RenderConfig::new().with_legend(true);
        let svg = render_with_config(ONE_UNIT, Some(1000.0), &config).unwrap();
        assert!(svg.contains(r#"<g class="pg-legend">"#));
        assert!(svg.contains(r#"class="pg-legend-label""#));
        // canvas height 2 * 70 + 145.6 plus the legend band
        assert!(svg.contains(r#"height="325.6""#));
    }

    #[test]
    fn test_records_pipeline() {
        let config = RenderConfig::new()
            .with_input_kind(InputKind::Records)
            .with_extra_capacity(1);
        let spec = draw_with_config(
            r#"[{"unit_id": 3, "level_index": 1, "slot_order": 0, "face_count": 2, "attribute": "tea"}]"#,
            Some(1000.0),
            &config,
        )
        .unwrap();
        assert_eq!(spec.unit_offsets[0].unit_id, 3);
        assert_eq!(spec.with_role(layout::PrimitiveRole::EmptySpan).count(), 1);
    }
}
