//! SVG generation from drawing specifications

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::layout::{
    Baseline, DrawSpec, LinePrimitive, Primitive, PrimitiveRole, RectPrimitive, TextAnchor,
    TextPrimitive,
};

use super::legend::{layout_legend, LEGEND_HEIGHT};
use super::SvgConfig;

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    elements: Vec<String>,
    indent: usize,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            elements: vec![],
            indent: 1,
        }
    }

    fn prefix(&self) -> String {
        self.config.class_prefix.clone().unwrap_or_default()
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    fn class_for(&self, role: PrimitiveRole) -> String {
        let name = match role {
            PrimitiveRole::UnitBorder => "unit-border",
            PrimitiveRole::UnitLabel => "unit-label",
            PrimitiveRole::GridLine => "grid",
            PrimitiveRole::LevelLabel => "level-label",
            PrimitiveRole::SlotIndex => "slot-index",
            PrimitiveRole::Item => "item",
            PrimitiveRole::ItemLabel => "item-label",
            PrimitiveRole::FaceCount => "face-count",
            PrimitiveRole::EmptySpan => "empty",
            PrimitiveRole::EmptyLabel => "empty-label",
            PrimitiveRole::LegendSwatch => "legend-swatch",
            PrimitiveRole::LegendLabel => "legend-label",
        };
        format!("{}{}", self.prefix(), name)
    }

    /// Add a full-canvas background rectangle
    pub fn add_background(&mut self, width: f64, height: f64, fill: &str) {
        let class = format!("{}background", self.prefix());
        self.elements.push(format!(
            r#"{}<rect class="{}" x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
            self.indent_str(),
            class,
            width,
            height,
            escape_xml(fill)
        ));
    }

    /// Add a rectangle element
    pub fn add_rect(&mut self, rect: &RectPrimitive) {
        let b = &rect.bounds;
        let fill = rect.fill.as_deref().unwrap_or("none");
        let mut styles = format!(
            r#" fill="{}" stroke="{}" stroke-width="{}""#,
            escape_xml(fill),
            escape_xml(&rect.stroke.color),
            rect.stroke.width
        );
        if let Some(dash) = &rect.stroke.dasharray {
            styles.push_str(&format!(r#" stroke-dasharray="{}""#, dash));
        }
        if rect.corner_radius > 0.0 {
            styles.push_str(&format!(r#" rx="{}""#, rect.corner_radius));
        }
        if rect.opacity < 1.0 {
            styles.push_str(&format!(r#" opacity="{}""#, rect.opacity));
        }

        self.elements.push(format!(
            r#"{}<rect class="{}" x="{}" y="{}" width="{}" height="{}"{}/>"#,
            self.indent_str(),
            self.class_for(rect.role),
            b.x,
            b.y,
            b.width.max(0.0),
            b.height.max(0.0),
            styles
        ));
    }

    /// Add a line element
    pub fn add_line(&mut self, line: &LinePrimitive) {
        let mut styles = format!(
            r#" stroke="{}" stroke-width="{}""#,
            escape_xml(&line.stroke.color),
            line.stroke.width
        );
        if let Some(dash) = &line.stroke.dasharray {
            styles.push_str(&format!(r#" stroke-dasharray="{}""#, dash));
        }

        self.elements.push(format!(
            r#"{}<line class="{}" x1="{}" y1="{}" x2="{}" y2="{}"{}/>"#,
            self.indent_str(),
            self.class_for(line.role),
            line.from.x,
            line.from.y,
            line.to.x,
            line.to.y,
            styles
        ));
    }

    /// Add a text element
    pub fn add_text(&mut self, text: &TextPrimitive) {
        let anchor_str = match text.anchor {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        };
        let baseline = match text.baseline {
            Baseline::Auto => "",
            Baseline::Central => r#" dominant-baseline="central""#,
        };

        self.elements.push(format!(
            r#"{}<text class="{}" x="{}" y="{}" text-anchor="{}"{} font-size="{}" font-weight="{}" fill="{}">{}</text>"#,
            self.indent_str(),
            self.class_for(text.role),
            text.position.x,
            text.position.y,
            anchor_str,
            baseline,
            text.font_size,
            text.font_weight,
            escape_xml(&text.fill),
            escape_xml(&text.content)
        ));
    }

    /// Add any primitive
    pub fn add_primitive(&mut self, primitive: &Primitive) {
        match primitive {
            Primitive::Rect(rect) => self.add_rect(rect),
            Primitive::Line(line) => self.add_line(line),
            Primitive::Text(text) => self.add_text(text),
        }
    }

    /// Open a group with the prefixed class `name`
    pub fn start_group(&mut self, name: &str) {
        let class = format!("{}{}", self.prefix(), name);
        self.elements
            .push(format!(r#"{}<g class="{}">"#, self.indent_str(), class));
        self.indent += 1;
    }

    /// Open the group holding one unit's primitives
    pub fn start_unit(&mut self, unit_id: i64) {
        let class = format!("{}unit", self.prefix());
        self.elements.push(format!(
            r#"{}<g class="{}" data-unit-id="{}">"#,
            self.indent_str(),
            class,
            unit_id
        ));
        self.indent += 1;
    }

    /// Close a group element
    pub fn end_group(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        self.elements.push(format!("{}</g>", self.indent_str()));
    }

    /// Build the final SVG string
    pub fn build(self, width: f64, height: f64) -> String {
        let nl = self.newline();

        let mut svg = String::new();

        // XML declaration for standalone
        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            width, height, width, height
        ));
        svg.push_str(nl);

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");

        svg
    }
}

/// Render a DrawSpec to an SVG string
///
/// The document is sized to the canvas exactly; a consumer showing it in a
/// narrower viewport is expected to scroll horizontally. A configured legend
/// adds a band of [`LEGEND_HEIGHT`] below the canvas, widening the document
/// if the row runs past the right edge.
pub fn render_svg(spec: &DrawSpec, config: &SvgConfig) -> String {
    let mut bounds = spec.bounds();
    let mut legend = vec![];
    if !spec.is_empty() && !config.legend.is_empty() {
        let x = spec.unit_offsets.first().map_or(0.0, |o| o.x);
        let (primitives, end) = layout_legend(&config.legend, x, bounds.bottom());
        bounds.height += LEGEND_HEIGHT;
        bounds.width = bounds.width.max(end + x);
        legend = primitives;
    }

    let mut builder = SvgBuilder::new(config.clone());

    if let Some(background) = &config.background {
        builder.add_background(bounds.width, bounds.height, background);
    }

    for unit in &spec.units {
        builder.start_unit(unit.unit_id);
        for primitive in &unit.primitives {
            builder.add_primitive(primitive);
        }
        builder.end_group();
    }

    if !legend.is_empty() {
        builder.start_group("legend");
        for primitive in &legend {
            builder.add_primitive(primitive);
        }
        builder.end_group();
    }

    builder.build(bounds.width, bounds.height)
}

/// Encode an SVG document as a `data:` URI suitable for an `<img src>`
pub fn to_data_uri(svg: &str) -> String {
    format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg.as_bytes()))
}

/// Escape special XML characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
