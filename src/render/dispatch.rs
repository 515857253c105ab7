//! Renderer dispatch - the control/group tree walker.
//!
//! Walks the shape tree in order, resolves each node's registered renderer,
//! and composes the frame. Per-node policy:
//!
//! - `visible == false` skips the node and its entire subtree
//! - an unregistered type renders as nothing (recoverable, logged by the
//!   registry lookup)
//! - `layout == "block"` output is used verbatim; any other layout wraps
//!   the output in a labelled row
//!
//! Label tri-state: an absent `label` falls back to the node id, `Null` or
//! `""` suppresses the label, any other value is displayed.

use crate::engine::Registry;
use crate::render::surface::{pad_to_width, Attr, Line, Span, Style};
use crate::render::theme::Theme;
use crate::types::{Node, NodeMap, ShapeNode, Value};

/// Width of the label column in row layout.
pub const LABEL_WIDTH: usize = 14;

/// Read context handed to control renderers.
///
/// Gives read access to the whole flat node map (controls conventionally
/// read only their own node) and to the dispatch itself for group
/// recursion. The one write path, `update`, is delivered separately to
/// key handlers.
#[derive(Clone, Copy)]
pub struct RenderCtx<'a> {
    pub nodes: &'a NodeMap,
    pub shape: &'a ShapeNode,
    pub registry: &'a Registry,
    pub theme: &'a Theme,
    pub focused: Option<&'a str>,
    /// Target panel width in cells; controls size bars and fields from it.
    pub width: u16,
}

impl<'a> RenderCtx<'a> {
    /// The node this context points at, if it exists in the flat map.
    pub fn node(&self) -> Option<&'a Node> {
        self.nodes.get(&self.shape.id)
    }

    /// Rebind the context to a child shape node.
    pub fn for_child(&self, child: &'a ShapeNode) -> RenderCtx<'a> {
        RenderCtx {
            shape: child,
            ..*self
        }
    }

    /// Walk this node's children in shape order through the dispatch.
    pub fn render_children(&self) -> Vec<Line> {
        let mut lines = Vec::new();
        for child in &self.shape.children {
            lines.extend(render_control(&self.for_child(child)));
        }
        lines
    }

    pub fn is_focused(&self) -> bool {
        self.focused == Some(self.shape.id.as_str())
    }
}

/// Render one node (and, for groups, its subtree).
pub fn render_control(ctx: &RenderCtx<'_>) -> Vec<Line> {
    let Some(node) = ctx.node() else {
        return Vec::new();
    };

    if !node.visible() {
        return Vec::new();
    }

    let Some(renderer) = ctx.registry.renderer(node.control()) else {
        return Vec::new();
    };

    let body = renderer.render(ctx);

    if node.str_attr("layout") == Some("block") {
        return body;
    }

    wrap_row(ctx, node, body)
}

/// Resolve the row label tri-state for a node.
pub fn row_label(node: &Node) -> Option<String> {
    match node.get("label") {
        None => Some(node.id().to_string()),
        Some(Value::Null) => None,
        Some(Value::Str(s)) if s.is_empty() => None,
        Some(other) => Some(other.display()),
    }
}

/// Wrap renderer output as a labelled row: focus gutter, padded label
/// column, control output; continuation lines are indented under the
/// control column.
fn wrap_row(ctx: &RenderCtx<'_>, node: &Node, body: Vec<Line>) -> Vec<Line> {
    let focused = ctx.is_focused();
    let label = row_label(node);

    let gutter_style = if focused {
        Style::fg(ctx.theme.accent)
    } else {
        Style::PLAIN
    };
    let label_style = if focused {
        Style::fg(ctx.theme.label).with_attrs(Attr::BOLD)
    } else {
        Style::fg(ctx.theme.label)
    };

    let label_col = label
        .as_deref()
        .map(|text| pad_to_width(text, LABEL_WIDTH))
        .unwrap_or_default();
    let indent = " ".repeat(if label_col.is_empty() { 2 } else { 2 + LABEL_WIDTH });

    let mut lines = Vec::new();
    let mut body = body.into_iter();

    let mut first = Line::new();
    first.push(Span::new(if focused { "❯ " } else { "  " }, gutter_style));
    if !label_col.is_empty() {
        first.push(Span::new(label_col, label_style));
    }
    if let Some(head) = body.next() {
        first.spans.extend(head.spans);
    }
    lines.push(first);

    for mut rest in body {
        rest.prepend(Span::plain(indent.clone()));
        lines.push(rest);
    }

    lines
}

// =============================================================================
// Tests
// =============================================================================
