//! Label text color for item fills
//!
//! This is a fixed lookup, not a luminance calculation: exactly two fill
//! colors get light text and everything else gets dark text, however bright
//! or dark it actually is.

/// Fill used for tea products
pub const TEA_FILL: &str = "#15803d";
/// Fill used for coffee products
pub const COFFEE_FILL: &str = "#5d2f0a";

pub const LIGHT_TEXT: &str = "#ffffff";
pub const DARK_TEXT: &str = "#000000";

/// Text tone chosen for a fill color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextContrast {
    Light,
    Dark,
}

impl TextContrast {
    /// Look up the text tone for `fill`. Matching is exact string equality.
    pub fn for_fill(fill: &str) -> Self {
        match fill {
            TEA_FILL | COFFEE_FILL => TextContrast::Light,
            _ => TextContrast::Dark,
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            TextContrast::Light => LIGHT_TEXT,
            TextContrast::Dark => DARK_TEXT,
        }
    }
}

/// Text color to draw on top of `fill`
pub fn text_color_for(fill: &str) -> &'static str {
    TextContrast::for_fill(fill).color()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_fills_get_light_text() {
        assert_eq!(text_color_for("#15803d"), "#ffffff");
        assert_eq!(text_color_for("#5d2f0a"), "#ffffff");
    }

    #[test]
    fn test_other_fills_get_dark_text() {
        // Near-black is still dark text: the lookup is closed.
        assert_eq!(text_color_for("#000000"), "#000000");
        assert_eq!(text_color_for("#9ca3af"), "#000000");
        assert_eq!(text_color_for("not a color"), "#000000");
        assert_eq!(text_color_for(""), "#000000");
    }

    #[test]
    fn test_match_is_case_sensitive() {
        assert_eq!(TextContrast::for_fill("#15803D"), TextContrast::Dark);
    }
}
