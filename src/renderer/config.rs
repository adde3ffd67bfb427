//! Output options for planogram SVG documents

use super::legend::LegendEntry;

/// How a [`DrawSpec`](crate::layout::DrawSpec) is written out as SVG
#[derive(Debug, Clone)]
pub struct SvgConfig {
    /// Emit an `<?xml ...?>` declaration ahead of the root element
    pub standalone: bool,

    /// One element per line, indented by group depth
    pub pretty_print: bool,

    /// Prepended to every role class, so `pg-` yields `pg-item`, `pg-grid`
    pub class_prefix: Option<String>,

    /// Fill painted under the whole document; `None` leaves it transparent
    pub background: Option<String>,

    /// Swatches drawn in a band under the shelves; empty draws no band
    pub legend: Vec<LegendEntry>,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            standalone: true,
            pretty_print: true,
            class_prefix: Some("pg-".to_string()),
            background: Some("#ffffff".to_string()),
            legend: vec![],
        }
    }
}

impl SvgConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle the XML declaration; inline embedding wants it off
    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    /// Toggle indentation and line breaks
    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = Some(prefix.into());
        self
    }

    /// Use bare role names (`item`, `grid`) as classes
    pub fn without_class_prefix(mut self) -> Self {
        self.class_prefix = None;
        self
    }

    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background = Some(color.into());
        self
    }

    pub fn without_background(mut self) -> Self {
        self.background = None;
        self
    }

    /// Draw a legend row with these entries below the shelves
    pub fn with_legend(mut self, entries: Vec<LegendEntry>) -> Self {
        self.legend = entries;
        self
    }
}
