//! Toggle - an on/off checkbox.

use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent};

use crate::engine::{ControlRenderer, DefaultAttr, Registry};
use crate::render::{Line, RenderCtx, Span, Style};
use crate::types::{Node, UpdateOptions, Updates, Value};

use super::util::commit_value;

pub struct ToggleControl;

impl ControlRenderer for ToggleControl {
    fn render(&self, ctx: &RenderCtx<'_>) -> Vec<Line> {
        let Some(node) = ctx.node() else {
            return Vec::new();
        };
        let on = node.truthy_or("value", false);
        let (text, style) = if on {
            ("[x]", Style::fg(ctx.theme.accent))
        } else {
            ("[ ]", Style::fg(ctx.theme.muted))
        };
        vec![Line::from_spans(vec![Span::new(text, style)])]
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
        let on = node.truthy_or("value", false);
        commit_value(node, !on, UpdateOptions::default(), mutate);
        true
    }
}

pub fn register(registry: &mut Registry) {
    registry.register(
        "toggle",
        Rc::new(ToggleControl),
        vec![("value", DefaultAttr::computed(|_| Value::Bool(false)))],
    );
}
