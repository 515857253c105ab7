//! Range - a bounded slider with a numeric readout.

use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent};

use crate::engine::{ControlRenderer, DefaultAttr, Registry};
use crate::render::{Line, RenderCtx, Span, Style};
use crate::types::{format_number, Node, UpdateOptions, Updates, Value};

use super::util::{clamp_to_bounds, commit_value, step_of};

const TRACK_WIDTH: usize = 16;

pub struct RangeControl;

impl RangeControl {
    fn bounds(node: &Node) -> (f64, f64) {
        let min = node.f64_attr("min").unwrap_or(0.0);
        let max = node.f64_attr("max").unwrap_or(min + 1.0);
        (min, max)
    }
}

impl ControlRenderer for RangeControl {
    fn render(&self, ctx: &RenderCtx<'_>) -> Vec<Line> {
        let Some(node) = ctx.node() else {
            return Vec::new();
        };

        let (min, max) = Self::bounds(node);
        let value = node.f64_attr("value").unwrap_or(min);
        let span = (max - min).max(f64::EPSILON);
        let ratio = ((value - min) / span).clamp(0.0, 1.0);
        let filled = (ratio * TRACK_WIDTH as f64).round() as usize;

        let mut line = Line::new();
        line.push(Span::new(
            "█".repeat(filled),
            Style::fg(ctx.theme.accent),
        ));
        line.push(Span::new(
            "░".repeat(TRACK_WIDTH - filled),
            Style::fg(ctx.theme.muted),
        ));
        line.push(Span::new(
            format!(" {}", format_number(value)),
            Style::fg(ctx.theme.value),
        ));
        vec![line]
    }

    fn handle_key(
        &self,
        node: &Node,
        key: KeyEvent,
        mutate: &mut dyn FnMut(Updates, UpdateOptions),
    ) -> bool {
        let (min, max) = Self::bounds(node);
        let value = node.f64_attr("value").unwrap_or(min);
        let step = step_of(node);

        let next = match key.code {
            KeyCode::Left => value - step,
            KeyCode::Right => value + step,
            KeyCode::Home => min,
            KeyCode::End => max,
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
        "range",
        Rc::new(RangeControl),
        vec![(
            "value",
            DefaultAttr::computed(|attrs| {
                attrs.get("min").cloned().unwrap_or(Value::Number(0.0))
            }),
        )],
    );
}
