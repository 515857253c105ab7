//! Number - an unbounded (optionally clamped) numeric field.

use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent};

use crate::engine::{ControlRenderer, DefaultAttr, Registry};
use crate::render::{Line, RenderCtx, Span, Style};
use crate::types::{format_number, Node, UpdateOptions, Updates, Value};

use super::util::{clamp_to_bounds, commit_value, step_of};

pub struct NumberControl;

impl ControlRenderer for NumberControl {
    fn render(&self, ctx: &RenderCtx<'_>) -> Vec<Line> {
        let Some(node) = ctx.node() else {
            return Vec::new();
        };
        let value = node.f64_attr("value").unwrap_or(0.0);
        let mut line = Line::new();
        line.push(Span::new(format_number(value), Style::fg(ctx.theme.value)));
        line.push(Span::new(" ↕", Style::fg(ctx.theme.muted)));
        vec![line]
    }

    fn handle_key(
        &self,
        node: &Node,
        key: KeyEvent,
        mutate: &mut dyn FnMut(Updates, UpdateOptions),
    ) -> bool {
        let value = node.f64_attr("value").unwrap_or(0.0);
        let step = step_of(node);

        let next = match key.code {
            KeyCode::Up => value + step,
            KeyCode::Down => value - step,
            _ => return false,
        };

        let next = clamp_to_bounds(node, next);
        if next != value {
            commit_value(node, next, UpdateOptions::default(), mutate);
        }
        true
    }
}

pub fn register(registry: &mut Registry) {
    registry.register(
        "number",
        Rc::new(NumberControl),
        vec![("value", DefaultAttr::computed(|_| Value::Number(0.0)))],
    );
}
