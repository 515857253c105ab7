//! Display - read-only value output.
//!
//! `format` selects the rendering: `"monospace"` and `"block"` are dimmed
//! verbatim text (`"block"` keeps line breaks), anything else renders the
//! value's display text on one row.

use std::rc::Rc;

use crate::engine::{ControlRenderer, DefaultAttr, Registry};
use crate::render::{Attr, Line, RenderCtx, Span, Style};
use crate::types::Node;

pub struct DisplayControl;

impl ControlRenderer for DisplayControl {
    fn render(&self, ctx: &RenderCtx<'_>) -> Vec<Line> {
        let Some(node) = ctx.node() else {
            return Vec::new();
        };
        let value = node.value().map(|v| v.display()).unwrap_or_default();

        match node.str_attr("format") {
            Some("monospace") => vec![Line::from_spans(vec![Span::new(
                value,
                Style::fg(ctx.theme.value).with_attrs(Attr::DIM),
            )])],
            Some("block") => value
                .split('\n')
                .map(|row| {
                    Line::from_spans(vec![Span::new(
                        row,
                        Style::fg(ctx.theme.value).with_attrs(Attr::DIM),
                    )])
                })
                .collect(),
            _ => vec![Line::from_spans(vec![Span::new(
                value.replace('\n', " "),
                Style::fg(ctx.theme.value),
            )])],
        }
    }

    fn focusable(&self, _node: &Node) -> bool {
        false
    }
}

pub fn register(registry: &mut Registry) {
    registry.register(
        "display",
        Rc::new(DisplayControl),
        vec![
            ("value", DefaultAttr::value("")),
            ("format", DefaultAttr::value("text")),
        ],
    );
}
