//! Select - pick one value from a normalized option list.

use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent};

use crate::engine::{ControlRenderer, DefaultAttr, Registry};
use crate::render::{Line, RenderCtx, Span, Style};
use crate::types::{Node, UpdateOptions, Updates};

use super::util::{commit_value, first_option_value, normalize_options, selected_index};

pub struct SelectControl;

impl ControlRenderer for SelectControl {
    fn render(&self, ctx: &RenderCtx<'_>) -> Vec<Line> {
        let Some(node) = ctx.node() else {
            return Vec::new();
        };
        let options = normalize_options(node.get("options"));
        let label = selected_index(&options, node)
            .map(|i| options[i].0.clone())
            .unwrap_or_default();

        let mut line = Line::new();
        line.push(Span::new("◂ ", Style::fg(ctx.theme.muted)));
        line.push(Span::new(label, Style::fg(ctx.theme.value)));
        line.push(Span::new(" ▸", Style::fg(ctx.theme.muted)));
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
        "select",
        Rc::new(SelectControl),
        vec![("value", DefaultAttr::computed(first_option_value))],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use crate::types::{AttrMap, Value};

    fn node(value: &str) -> Node {
        let mut attrs = AttrMap::new();
        attrs.insert("options".into(), Value::from(vec!["a", "b", "c"]));
        attrs.insert("value".into(), value.into());
        Node::new("s".into(), "select".into(), attrs)
    }

    fn press(node: &Node, code: KeyCode) -> Option<Value> {
        let mut seen = None;
        SelectControl.handle_key(
            node,
            KeyEvent::new(code, KeyModifiers::NONE),
            &mut |updates, _| seen = Some(updates["s"]["value"].clone()),
        );
        seen
    }

    #[test]
    fn right_cycles_forward_and_wraps() {
        assert_eq!(press(&node("a"), KeyCode::Right), Some(Value::from("b")));
        assert_eq!(press(&node("c"), KeyCode::Right), Some(Value::from("a")));
    }

    #[test]
    fn left_cycles_backward_and_wraps() {
        assert_eq!(press(&node("b"), KeyCode::Left), Some(Value::from("a")));
        assert_eq!(press(&node("a"), KeyCode::Left), Some(Value::from("c")));
    }
}
