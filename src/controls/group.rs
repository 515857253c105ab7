//! Group - a titled, collapsible container of child controls.
//!
//! The group renderer is the only control that recurses: it walks its
//! children through the same dispatch, in shape order. The header toggles
//! the group's own `expanded` attribute through the mutation entry point
//! when `expandable` is true - the terminal analog of the clickable label.

use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent};

use crate::engine::{ControlRenderer, DefaultAttr, Registry};
use crate::render::{row_label, Attr, Line, RenderCtx, Span, Style};
use crate::types::{Node, UpdateOptions, Updates};

pub struct GroupControl;

impl ControlRenderer for GroupControl {
    fn render(&self, ctx: &RenderCtx<'_>) -> Vec<Line> {
        let Some(node) = ctx.node() else {
            return Vec::new();
        };

        let expandable = node.truthy_or("expandable", false);
        let expanded = node.truthy_or("expanded", false);
        let mut lines = Vec::new();

        if let Some(label) = row_label(node) {
            let mut header = Line::new();
            let marker = if ctx.is_focused() { "❯ " } else { "  " };
            header.push(Span::new(marker, Style::fg(ctx.theme.accent)));
            if expandable {
                let icon = if expanded { "▾ " } else { "▸ " };
                header.push(Span::new(icon, Style::fg(ctx.theme.muted)));
            }
            header.push(Span::new(
                label,
                Style::fg(ctx.theme.header).with_attrs(Attr::BOLD),
            ));
            lines.push(header);
        }

        if expanded {
            for mut child in ctx.render_children() {
                child.prepend(Span::plain("  "));
                lines.push(child);
            }
        }

        lines
    }

    fn handle_key(
        &self,
        node: &Node,
        key: KeyEvent,
        mutate: &mut dyn FnMut(Updates, UpdateOptions),
    ) -> bool {
        if !matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
            return false;
        }
        if !node.truthy_or("expandable", false) {
            return false;
        }
        let expanded = node.truthy_or("expanded", false);
        let update = crate::types::updates([(
            node.id(),
            crate::types::patch_value("expanded", !expanded),
        )]);
        mutate(update, UpdateOptions::default());
        true
    }

    fn focusable(&self, node: &Node) -> bool {
        node.truthy_or("expandable", false)
    }
}

pub fn register(registry: &mut Registry) {
    registry.register(
        "group",
        Rc::new(GroupControl),
        vec![
            ("layout", DefaultAttr::value("block")),
            ("expandable", DefaultAttr::value(true)),
            ("expanded", DefaultAttr::value(true)),
        ],
    );
}
