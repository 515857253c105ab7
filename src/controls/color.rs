//! Color - a hex color value with an inline swatch.
//!
//! Display-oriented: the value is a `#rrggbb` string set through the panel
//! API; invalid strings render without a swatch.

use std::rc::Rc;

use crossterm::style::Color;

use crate::engine::{ControlRenderer, DefaultAttr, Registry};
use crate::render::{Line, RenderCtx, Span, Style};
use crate::types::Node;

pub struct ColorControl;

/// Parse `#rrggbb` into a terminal color.
pub(crate) fn parse_hex(value: &str) -> Option<Color> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb { r, g, b })
}

impl ControlRenderer for ColorControl {
    fn render(&self, ctx: &RenderCtx<'_>) -> Vec<Line> {
        let Some(node) = ctx.node() else {
            return Vec::new();
        };
        let value = node.str_attr("value").unwrap_or("");

        let mut line = Line::new();
        if let Some(color) = parse_hex(value) {
            line.push(Span::new("  ", Style::PLAIN.with_bg(color)));
            line.push(Span::plain(" "));
        }
        line.push(Span::new(value, Style::fg(ctx.theme.value)));
        vec![line]
    }

    fn focusable(&self, _node: &Node) -> bool {
        false
    }
}

pub fn register(registry: &mut Registry) {
    registry.register(
        "color",
        Rc::new(ColorControl),
        vec![("value", DefaultAttr::value("#ffffff"))],
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_hex() {
        assert_eq!(
            parse_hex("#ff0055"),
            Some(Color::Rgb { r: 255, g: 0, b: 85 })
        );
    }

    #[test]
    fn rejects_malformed_hex() {
        assert_eq!(parse_hex("ff0055"), None);
        assert_eq!(parse_hex("#ff005"), None);
        assert_eq!(parse_hex("#ggOO55"), None);
    }
}
