//! Text - a free-form string field, optionally multiline.

use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::engine::{ControlRenderer, DefaultAttr, Registry};
use crate::render::{Line, RenderCtx, Span, Style};
use crate::types::{Node, UpdateOptions, Updates};

use super::util::commit_value;

pub struct TextControl;

impl ControlRenderer for TextControl {
    fn render(&self, ctx: &RenderCtx<'_>) -> Vec<Line> {
        let Some(node) = ctx.node() else {
            return Vec::new();
        };
        let value = node.str_attr("value").unwrap_or("");
        let style = Style::fg(ctx.theme.value);
        let cursor = if ctx.is_focused() { "▏" } else { "" };

        if node.truthy_or("multiline", false) {
            let rows = node.f64_attr("rows").unwrap_or(4.0).max(1.0) as usize;
            let mut lines: Vec<Line> = value
                .split('\n')
                .take(rows)
                .map(|row| Line::from_spans(vec![Span::new(row, style)]))
                .collect();
            if lines.is_empty() {
                lines.push(Line::new());
            }
            if let Some(last) = lines.last_mut() {
                last.push(Span::new(cursor, Style::fg(ctx.theme.accent)));
            }
            lines
        } else {
            vec![Line::from_spans(vec![
                Span::new(value, style),
                Span::new(cursor, Style::fg(ctx.theme.accent)),
            ])]
        }
    }

    fn handle_key(
        &self,
        node: &Node,
        key: KeyEvent,
        mutate: &mut dyn FnMut(Updates, UpdateOptions),
    ) -> bool {
        let value = node.str_attr("value").unwrap_or("");
        let multiline = node.truthy_or("multiline", false);

        let next = match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                format!("{value}{c}")
            }
            KeyCode::Enter if multiline => format!("{value}\n"),
            KeyCode::Backspace => {
                let mut chars = value.chars();
                chars.next_back();
                chars.as_str().to_string()
            }
            _ => return false,
        };

        commit_value(node, next, UpdateOptions::default(), mutate);
        true
    }
}

pub fn register(registry: &mut Registry) {
    registry.register(
        "text",
        Rc::new(TextControl),
        vec![
            ("value", DefaultAttr::value("")),
            ("multiline", DefaultAttr::value(false)),
            ("rows", DefaultAttr::value(4)),
        ],
    );
}
