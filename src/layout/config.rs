//! Configuration for the geometry engine

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading a layout configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read layout config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse layout config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Sizing constants and label texts used by the geometry engine
///
/// Every field can be overridden from a TOML file; absent keys keep the
/// default value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Share of the viewport the drawing may claim
    pub width_fraction: f64,

    /// Absolute cap on the width used to derive cell size
    pub max_draw_width: f64,

    /// Viewport width to assume when none is available
    pub fallback_viewport_width: f64,

    /// Space left and right of the whole canvas
    pub horizontal_margin: f64,

    /// Space above and below the grid; holds the unit label and slot index rows
    pub vertical_margin: f64,

    /// Space between adjacent units
    pub unit_gap: f64,

    pub min_cell_width: f64,
    pub min_cell_height: f64,

    /// Cell height as a fraction of cell width
    pub aspect_ratio: f64,

    /// Primary font size = floor(cell_width / divisor), at least `primary_font_min`
    pub primary_font_divisor: f64,
    pub primary_font_min: f64,
    pub secondary_font_divisor: f64,
    pub secondary_font_min: f64,

    /// Text placed before the unit id in unit headers
    pub unit_label_prefix: String,

    /// Text placed after the level index in level labels
    pub level_label_suffix: String,

    /// Text drawn inside empty spans
    pub empty_label: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width_fraction: 0.85,
            max_draw_width: 1200.0,
            fallback_viewport_width: 1000.0,
            horizontal_margin: 60.0,
            vertical_margin: 70.0,
            unit_gap: 80.0,
            min_cell_width: 40.0,
            min_cell_height: 55.0,
            aspect_ratio: 0.8,
            primary_font_divisor: 3.0,
            primary_font_min: 16.0,
            secondary_font_divisor: 4.0,
            secondary_font_min: 12.0,
            unit_label_prefix: "Unit ".to_string(),
            level_label_suffix: String::new(),
            empty_label: "empty".to_string(),
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Pick the viewport width to size against, falling back when none is known
    pub fn resolve_viewport(&self, hint: Option<f64>) -> f64 {
        hint.filter(|w| w.is_finite())
            .unwrap_or(self.fallback_viewport_width)
    }

    /// Set the viewport share and absolute cap for the drawing width
    pub fn with_draw_width(mut self, fraction: f64, max_width: f64) -> Self {
        self.width_fraction = fraction;
        self.max_draw_width = max_width;
        self
    }

    /// Set the fallback viewport width
    pub fn with_fallback_viewport_width(mut self, width: f64) -> Self {
        self.fallback_viewport_width = width;
        self
    }

    /// Set the canvas margins
    pub fn with_margins(mut self, horizontal: f64, vertical: f64) -> Self {
        self.horizontal_margin = horizontal;
        self.vertical_margin = vertical;
        self
    }

    /// Set the space between units
    pub fn with_unit_gap(mut self, gap: f64) -> Self {
        self.unit_gap = gap;
        self
    }

    /// Set the minimum cell size
    pub fn with_min_cell_size(mut self, width: f64, height: f64) -> Self {
        self.min_cell_width = width;
        self.min_cell_height = height;
        self
    }

    /// Set the cell aspect ratio (height / width)
    pub fn with_aspect_ratio(mut self, ratio: f64) -> Self {
        self.aspect_ratio = ratio;
        self
    }

    pub fn with_unit_label_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.unit_label_prefix = prefix.into();
        self
    }

    pub fn with_level_label_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.level_label_suffix = suffix.into();
        self
    }

    pub fn with_empty_label(mut self, label: impl Into<String>) -> Self {
        self.empty_label = label.into();
        self
    }
}
