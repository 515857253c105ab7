//! Shared control behaviors - option normalization and bounded numbers.

use crate::types::{Node, Value};

/// Normalize a raw `options` attribute into ordered `(label, value)` pairs.
///
/// Accepted shapes:
/// - a list of `{label, value}` maps (already normalized, used as-is)
/// - a list of primitives (each becomes its display text + itself)
/// - a label → value map
///
/// Anything else normalizes to an empty list.
pub fn normalize_options(raw: Option<&Value>) -> Vec<(String, Value)> {
    match raw {
        Some(Value::List(items)) => {
            let all_pairs = !items.is_empty()
                && items.iter().all(|item| {
                    item.as_map()
                        .map(|m| m.contains_key("label") && m.contains_key("value"))
                        .unwrap_or(false)
                });
            if all_pairs {
                items
                    .iter()
                    .filter_map(Value::as_map)
                    .map(|m| (m["label"].display(), m["value"].clone()))
                    .collect()
            } else {
                items
                    .iter()
                    .map(|item| (item.display(), item.clone()))
                    .collect()
            }
        }
        Some(Value::Map(map)) => map
            .iter()
            .map(|(label, value)| (label.clone(), value.clone()))
            .collect(),
        _ => Vec::new(),
    }
}

/// The default `value` for option-backed controls: the first option's value.
pub fn first_option_value(attrs: &crate::types::AttrMap) -> Value {
    normalize_options(attrs.get("options"))
        .into_iter()
        .next()
        .map(|(_, value)| value)
        .unwrap_or(Value::Null)
}

/// Index of the option matching the node's current value, if any.
pub fn selected_index(options: &[(String, Value)], node: &Node) -> Option<usize> {
    let current = node.value()?;
    options.iter().position(|(_, value)| value == current)
}

/// The node's `step`, defaulting to 1.
pub fn step_of(node: &Node) -> f64 {
    node.f64_attr("step").unwrap_or(1.0)
}

/// Clamp `n` into the node's optional `min`/`max` bounds.
pub fn clamp_to_bounds(node: &Node, n: f64) -> f64 {
    let min = node.f64_attr("min").unwrap_or(f64::NEG_INFINITY);
    let max = node.f64_attr("max").unwrap_or(f64::INFINITY);
    n.max(min).min(max)
}

/// Route a control's value change through the single mutation entry point.
pub(crate) fn commit_value(
    node: &Node,
    value: impl Into<Value>,
    options: crate::types::UpdateOptions,
    mutate: &mut dyn FnMut(crate::types::Updates, crate::types::UpdateOptions),
) {
    let update = crate::types::updates([(node.id(), crate::types::patch_value("value", value))]);
    mutate(update, options);
}
