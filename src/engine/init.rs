//! Node tree initializer - configuration tree → panel state.
//!
//! Consumes a nested configuration tree and produces two parallel outputs
//! in one pass: the flat node map (id → fully-defaulted node) and the
//! id-only shape tree describing nesting for render order. The two are
//! only ever constructed together; nothing else produces either.

use std::cell::Cell;

use crate::engine::registry::{DefaultAttr, Registry};
use crate::types::{AttrMap, Config, Node, NodeMap, ShapeNode};

thread_local! {
    /// Counter for generated node ids, scoped to the running process.
    static NODE_COUNTER: Cell<u64> = const { Cell::new(0) };
}

/// Generate an id for an anonymous node. Stable and unique within the run.
fn next_id() -> String {
    NODE_COUNTER.with(|counter| {
        let n = counter.get();
        counter.set(n + 1);
        format!("node-{n}")
    })
}

/// Initialize panel state from a configuration tree.
///
/// Recursive over the configuration: each node is defaulted via the
/// registry, merged with its user-supplied attributes (overrides win), and
/// stored in the flat map; children contribute their own maps and shape
/// nodes in order.
///
/// Duplicate ids anywhere in one tree are a configuration error: the first
/// node wins and the duplicate is dropped with an error log.
pub fn initialize_state(registry: &Registry, config: &Config) -> (NodeMap, ShapeNode) {
    let id = config.id.clone().unwrap_or_else(next_id);

    let mut attrs = AttrMap::new();

    if let Some(defaults) = registry.defaults(&config.control) {
        // Input for computed defaults: static type defaults overlaid by the
        // raw user config, so e.g. a range's default value can read its own
        // min and a select its own options.
        let mut merged = AttrMap::new();
        for (key, default) in defaults {
            if let DefaultAttr::Value(v) = default {
                merged.insert(key.clone(), v.clone());
            }
        }
        for (key, value) in &config.attrs {
            merged.insert(key.clone(), value.clone());
        }

        for (key, default) in defaults {
            let value = match default {
                DefaultAttr::Value(v) => v.clone(),
                DefaultAttr::Computed(f) => f(&merged),
            };
            attrs.insert(key.clone(), value);
        }
    }

    // User overrides always win over registry/global defaults.
    for (key, value) in &config.attrs {
        attrs.insert(key.clone(), value.clone());
    }

    let mut nodes = NodeMap::new();
    let mut shape = ShapeNode::leaf(id.clone());
    nodes.insert(id.clone(), Node::new(id, config.control.clone(), attrs));

    for child in &config.nodes {
        let (child_nodes, child_shape) = initialize_state(registry, child);
        for (child_id, child_node) in child_nodes {
            if nodes.contains_key(&child_id) {
                tracing::error!(id = %child_id, "duplicate node id in configuration, keeping the first");
                continue;
            }
            nodes.insert(child_id, child_node);
        }
        shape.children.push(child_shape);
    }

    (nodes, shape)
}

// =============================================================================
// Tests
// =============================================================================
