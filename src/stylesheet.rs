//! Attribute palette: which fill color an item of a given attribute gets
//!
//! Position records only carry a product attribute; the stylesheet turns it
//! into the fill color the engine draws with. Palettes load from TOML so a
//! store can recolor categories without touching code.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::layout::contrast::{COFFEE_FILL, TEA_FILL};
use crate::model::DisplayUnit;
use crate::renderer::LegendEntry;

/// Errors that can occur when loading or parsing stylesheets
#[derive(Error, Debug)]
pub enum StylesheetError {
    #[error("Failed to read stylesheet file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse stylesheet TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// A palette mapping product attributes to fill colors
#[derive(Debug, Clone)]
pub struct Stylesheet {
    /// Optional name for the stylesheet
    pub name: Option<String>,
    /// Optional description
    pub description: Option<String>,
    /// Attribute name -> fill color
    pub attributes: HashMap<String, String>,
    /// Fill for attributes missing from the table
    pub fallback_fill: String,
    /// Attribute given to records that carry none
    pub unknown_attribute: String,
}

/// TOML structure for deserializing stylesheets
#[derive(Deserialize)]
struct TomlStylesheet {
    metadata: Option<TomlMetadata>,
    #[serde(default)]
    attributes: HashMap<String, String>,
    fallback_fill: Option<String>,
    unknown_attribute: Option<String>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

/// Default attribute for records that carry none
pub const UNKNOWN_ATTRIBUTE: &str = "unknown";

const NEUTRAL_FILL: &str = "#9ca3af";

impl Stylesheet {
    /// Load stylesheet from TOML file
    pub fn from_file(path: &Path) -> Result<Self, StylesheetError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load stylesheet from TOML string
    ///
    /// Attributes listed in the file are added to the default palette,
    /// replacing entries of the same name.
    pub fn from_toml_str(content: &str) -> Result<Self, StylesheetError> {
        let parsed: TomlStylesheet = toml::from_str(content)?;

        let mut stylesheet = Self::default();
        stylesheet.name = parsed.metadata.as_ref().and_then(|m| m.name.clone());
        stylesheet.description = parsed.metadata.as_ref().and_then(|m| m.description.clone());
        stylesheet.attributes.extend(parsed.attributes);
        if let Some(fill) = parsed.fallback_fill {
            stylesheet.fallback_fill = fill;
        }
        if let Some(attribute) = parsed.unknown_attribute {
            stylesheet = stylesheet.with_unknown_attribute(attribute);
        }
        Ok(stylesheet)
    }

    /// Rename the attribute given to records without one
    ///
    /// A name missing from the palette is mapped to the fallback fill so it
    /// keeps the neutral color.
    pub fn with_unknown_attribute(mut self, attribute: impl Into<String>) -> Self {
        let attribute = attribute.into();
        if !self.attributes.contains_key(&attribute) {
            self.attributes
                .insert(attribute.clone(), self.fallback_fill.clone());
        }
        self.unknown_attribute = attribute;
        self
    }

    /// Look up the fill for `attribute`, if the palette defines one
    pub fn resolve(&self, attribute: &str) -> Option<&str> {
        self.attributes.get(attribute).map(|s| s.as_str())
    }

    /// Fill for `attribute`, falling back to the neutral fill
    pub fn fill_for(&self, attribute: &str) -> &str {
        self.resolve(attribute).unwrap_or(&self.fallback_fill)
    }

    /// Legend entries for the palette attributes placed in `units`
    ///
    /// An item contributes when its label is a palette attribute drawn in
    /// that attribute's fill. Entries keep first-appearance order.
    pub fn legend_for(&self, units: &[DisplayUnit]) -> Vec<LegendEntry> {
        let mut seen = HashSet::new();
        units
            .iter()
            .flat_map(|u| u.shelves.iter())
            .flat_map(|s| s.items.iter())
            .filter(|item| self.resolve(&item.label) == Some(item.fill_color.as_str()))
            .filter(|item| seen.insert(item.label.as_str()))
            .map(|item| LegendEntry::new(item.label.clone(), item.fill_color.clone()))
            .collect()
    }
}

impl Default for Stylesheet {
    fn default() -> Self {
        let attributes = [
            ("tea", TEA_FILL),
            ("お茶", TEA_FILL),
            ("coffee", COFFEE_FILL),
            ("コーヒー", COFFEE_FILL),
            (UNKNOWN_ATTRIBUTE, NEUTRAL_FILL),
            ("不明", NEUTRAL_FILL),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            name: None,
            description: None,
            attributes,
            fallback_fill: NEUTRAL_FILL.to_string(),
            unknown_attribute: UNKNOWN_ATTRIBUTE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette() {
        let stylesheet = Stylesheet::default();
        assert_eq!(stylesheet.fill_for("tea"), "#15803d");
        assert_eq!(stylesheet.fill_for("コーヒー"), "#5d2f0a");
        assert_eq!(stylesheet.fill_for("unknown"), "#9ca3af");
    }

    #[test]
    fn test_unlisted_attribute_falls_back() {
        let stylesheet = Stylesheet::default();
        assert_eq!(stylesheet.resolve("juice"), None);
        assert_eq!(stylesheet.fill_for("juice"), "#9ca3af");
    }

    #[test]
    fn test_parse_toml_with_metadata() {
        let toml_str = r##"
fallback_fill = "#cccccc"

[metadata]
name = "Drinks"
description = "Beverage aisle"

[attributes]
juice = "#f59e0b"
tea = "#22c55e"
"##;
        let stylesheet = Stylesheet::from_toml_str(toml_str).expect("Should parse");
        assert_eq!(stylesheet.name, Some("Drinks".to_string()));
        assert_eq!(stylesheet.description, Some("Beverage aisle".to_string()));
        assert_eq!(stylesheet.fill_for("juice"), "#f59e0b");
        assert_eq!(stylesheet.fill_for("tea"), "#22c55e");
        assert_eq!(stylesheet.fill_for("coffee"), "#5d2f0a");
        assert_eq!(stylesheet.fill_for("water"), "#cccccc");
    }

    #[test]
    fn test_parse_toml_without_metadata() {
        let stylesheet = Stylesheet::from_toml_str("").expect("Should parse");
        assert_eq!(stylesheet.name, None);
        assert_eq!(stylesheet.fill_for("tea"), "#15803d");
    }

    #[test]
    fn test_unknown_attribute_from_toml() {
        let stylesheet = Stylesheet::from_toml_str(r#"unknown_attribute = "不明""#).unwrap();
        assert_eq!(stylesheet.unknown_attribute, "不明");
        assert_eq!(stylesheet.fill_for("不明"), "#9ca3af");

        let renamed = Stylesheet::default().with_unknown_attribute("n/a");
        assert_eq!(renamed.resolve("n/a"), Some("#9ca3af"));
    }

    #[test]
    fn test_legend_lists_placed_palette_attributes() {
        use crate::model::{PlacedItem, ShelfLevel};

        let units = vec![
            DisplayUnit::new(1, 6).with_shelf(
                ShelfLevel::new(1)
                    .with_item(PlacedItem::new(0, 2, "コーヒー", "#5d2f0a"))
                    .with_item(PlacedItem::new(2, 2, "お茶", "#15803d"))
                    .with_item(PlacedItem::new(4, 2, "コーヒー", "#5d2f0a")),
            ),
            DisplayUnit::new(2, 4).with_shelf(
                ShelfLevel::new(1)
                    .with_item(PlacedItem::new(0, 2, "juice", "#f59e0b"))
                    .with_item(PlacedItem::new(2, 2, "tea", "#000000")),
            ),
        ];
        let legend = Stylesheet::default().legend_for(&units);
        assert_eq!(
            legend,
            vec![
                LegendEntry::new("コーヒー", "#5d2f0a"),
                LegendEntry::new("お茶", "#15803d"),
            ]
        );
    }

    #[test]
    fn test_invalid_toml_error() {
        let result = Stylesheet::from_toml_str("this is not valid toml {{{{");
        assert!(result.is_err());
    }
}
