//! Button - a momentary action trigger.
//!
//! A press is an event-only update: subscribers see a logical `value` of
//! `true`, but nothing persists into node state.

use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent};

use crate::engine::{ControlRenderer, DefaultAttr, Registry};
use crate::render::{Attr, Line, RenderCtx, Span, Style};
use crate::types::{Node, UpdateOptions, Updates, Value};

use super::util::commit_value;

pub struct ButtonControl;

fn button_text(node: &Node) -> String {
    node.str_attr("text").unwrap_or(node.id()).to_string()
}

impl ControlRenderer for ButtonControl {
    fn render(&self, ctx: &RenderCtx<'_>) -> Vec<Line> {
        let Some(node) = ctx.node() else {
            return Vec::new();
        };
        let style = if ctx.is_focused() {
            Style::fg(ctx.theme.accent).with_attrs(Attr::REVERSE)
        } else {
            Style::fg(ctx.theme.value)
        };
        vec![Line::from_spans(vec![Span::new(
            format!("[ {} ]", button_text(node)),
            style,
        )])]
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
        commit_value(node, true, UpdateOptions::EVENT_ONLY, mutate);
        true
    }
}

pub fn register(registry: &mut Registry) {
    registry.register(
        "button",
        Rc::new(ButtonControl),
        vec![("label", DefaultAttr::Value(Value::Null))],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use crate::types::AttrMap;

    #[test]
    fn press_is_event_only() {
        let node = Node::new("fire".into(), "button".into(), AttrMap::new());
        let mut seen = None;
        ButtonControl.handle_key(
            &node,
            KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE),
            &mut |updates, options| seen = Some((updates, options)),
        );
        let (updates, options) = seen.unwrap();
        assert_eq!(updates["fire"]["value"], Value::Bool(true));
        assert!(options.event_only);
        assert!(!options.silent);
    }
}
