//! Focus traversal - keyboard navigation over the rendered tree.
//!
//! Focus order is the visible, focusable nodes in shape-tree order. What
//! is not rendered cannot be focused: hidden subtrees, children of
//! collapsed groups, unregistered types. Controls opt out via
//! [`ControlRenderer::focusable`](crate::ControlRenderer::focusable)
//! (display-only controls do).

use crate::engine::Registry;
use crate::types::{NodeMap, ShapeNode};

/// Collect focusable node ids in traversal order.
pub fn focusable_ids(registry: &Registry, nodes: &NodeMap, shape: &ShapeNode) -> Vec<String> {
    let mut out = Vec::new();
    collect(registry, nodes, shape, &mut out);
    out
}

fn collect(registry: &Registry, nodes: &NodeMap, shape: &ShapeNode, out: &mut Vec<String>) {
    let Some(node) = nodes.get(&shape.id) else {
        return;
    };
    if !node.visible() {
        return;
    }
    let Some(renderer) = registry.renderer(node.control()) else {
        return;
    };

    if renderer.focusable(node) {
        out.push(shape.id.clone());
    }

    // Children render only while expanded (groups); everything else has no
    // expanded attribute and its shape children never render.
    if !shape.children.is_empty() && node.truthy_or("expanded", false) {
        for child in &shape.children {
            collect(registry, nodes, child, out);
        }
    }
}

/// Step `delta` through `ids` from `current`, wrapping around.
pub fn step(ids: &[String], current: Option<&str>, delta: i32) -> Option<String> {
    if ids.is_empty() {
        return None;
    }
    let len = ids.len() as i32;
    let next = match current.and_then(|c| ids.iter().position(|id| id == c)) {
        Some(i) => (i as i32 + delta).rem_euclid(len) as usize,
        None if delta >= 0 => 0,
        None => ids.len() - 1,
    };
    Some(ids[next].clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::initialize_state;
    use crate::types::Config;

    fn state(config: Config) -> (Registry, NodeMap, ShapeNode) {
        let registry = Registry::with_builtins();
        let (nodes, shape) = initialize_state(&registry, &config);
        (registry, nodes, shape)
    }

    #[test]
    fn order_follows_the_shape_tree() {
        let (registry, nodes, shape) = state(
            Config::group(
                "root",
                vec![
                    Config::new("toggle").id("a"),
                    Config::group("g", vec![Config::new("range").id("b")]).id("g"),
                    Config::new("display").id("d"),
                ],
            )
            .id("root"),
        );
        let ids = focusable_ids(&registry, &nodes, &shape);
        // root and g are expandable groups; display opts out
        assert_eq!(ids, vec!["root", "a", "g", "b"]);
    }

    #[test]
    fn hidden_and_collapsed_subtrees_are_skipped() {
        let (registry, nodes, shape) = state(
            Config::group(
                "root",
                vec![
                    Config::group("g", vec![Config::new("toggle").id("in_collapsed")])
                        .id("g")
                        .attr("expanded", false),
                    Config::new("toggle").id("hidden").attr("visible", false),
                    Config::new("toggle").id("tail"),
                ],
            )
            .id("root"),
        );
        let ids = focusable_ids(&registry, &nodes, &shape);
        assert_eq!(ids, vec!["root", "g", "tail"]);
    }

    #[test]
    fn step_wraps_both_ways() {
        let ids: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        assert_eq!(step(&ids, Some("c"), 1), Some("a".to_string()));
        assert_eq!(step(&ids, Some("a"), -1), Some("c".to_string()));
        assert_eq!(step(&ids, None, 1), Some("a".to_string()));
        assert_eq!(step(&[], None, 1), None);
    }
}
