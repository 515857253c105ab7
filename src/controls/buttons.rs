//! Buttons - a one-of-many button row (radio-style select).

use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent};

use crate::engine::{ControlRenderer, DefaultAttr, Registry};
use crate::render::{Attr, Line, RenderCtx, Span, Style};
use crate::types::{Node, UpdateOptions, Updates};

use super::util::{commit_value, first_option_value, normalize_options, selected_index};

pub struct ButtonsControl;

impl ControlRenderer for ButtonsControl {
    fn render(&self, ctx: &RenderCtx<'_>) -> Vec<Line> {
        let Some(node) = ctx.node() else {
            return Vec::new();
        };
        let options = normalize_options(node.get("options"));
        let selected = selected_index(&options, node);

        let mut line = Line::new();
        for (i, (label, _)) in options.iter().enumerate() {
            if i > 0 {
                line.push(Span::plain(" "));
            }
            let style = if selected == Some(i) {
                Style::fg(ctx.theme.accent).with_attrs(Attr::REVERSE)
            } else {
                Style::fg(ctx.theme.value)
            };
            line.push(Span::new(format!(" {label} "), style));
        }
        vec![line]
    }

    fn handle_key(
        &self,
        node: &Node,
        key: KeyEvent,
        mutate: &mut dyn FnMut(Updates, UpdateOptions),
    ) -> bool {
        let options = normalize_options(node.get("options"));
        if options.is_empty() {
            return false;
        }

        let current = selected_index(&options, node);
        let next = match key.code {
            KeyCode::Left => match current {
                Some(0) | None => options.len() - 1,
                Some(i) => i - 1,
            },
            KeyCode::Right => match current {
                Some(i) if i + 1 < options.len() => i + 1,
                _ => 0,
            },
            _ => return false,
        };

        commit_value(node, options[next].1.clone(), UpdateOptions::default(), mutate);
        true
    }
}

pub fn register(registry: &mut Registry) {
    registry.register(
        "buttons",
        Rc::new(ButtonsControl),
        vec![("value", DefaultAttr::computed(first_option_value))],
    );
}
