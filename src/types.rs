//! Core types for tweak-tui.
//!
//! These types define the foundation that everything builds on:
//! the dynamic attribute [`Value`], the addressable [`Node`], the id-only
//! [`ShapeNode`] tree, and the [`Config`] descriptor consumed by the
//! initializer.

use std::collections::BTreeMap;
use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Value
// =============================================================================

/// Dynamic attribute value.
///
/// Control attributes are an open, type-dependent mapping: a range reads
/// `min`/`max`/`step`, a select reads `options`, and so on. `Value` is the
/// common currency for all of them.
///
/// `Null` is distinct from *absent*: a `label` that is `Null` suppresses the
/// label, while an absent `label` falls back to the node id.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Value {
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Truthiness in the loose sense control attributes use: `Null`, `false`,
    /// `0`, `NaN` and `""` are falsy, everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Str(s) => !s.is_empty(),
            Value::List(_) | Value::Map(_) => true,
        }
    }

    /// Render the value as display text (numbers without a trailing `.0`).
    pub fn display(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => format_number(*n),
            Value::Str(s) => s.clone(),
            Value::List(items) => {
                let parts: Vec<String> = items.iter().map(Value::display).collect();
                parts.join(", ")
            }
            Value::Map(_) => "[object]".to_string(),
        }
    }
}

/// Format a number the way a control readout expects: integral values
/// without the fractional part.
pub(crate) fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

/// An open attribute mapping (attribute name → value).
pub type AttrMap = BTreeMap<String, Value>;

// =============================================================================
// Node
// =============================================================================

/// One addressable control: immutable id and control type plus the open,
/// mutable attribute set.
///
/// Attributes equal `global defaults ∪ registered type defaults ∪ user
/// overrides`, later sources winning. After initialization they change only
/// through the panel's single mutation entry point.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: String,
    control: String,
    attrs: AttrMap,
}

impl Node {
    pub(crate) fn new(id: String, control: String, attrs: AttrMap) -> Self {
        Self { id, control, attrs }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The control type name this node resolves against the registry.
    pub fn control(&self) -> &str {
        &self.control
    }

    pub fn attrs(&self) -> &AttrMap {
        &self.attrs
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attrs.get(key)
    }

    /// The node's `value` attribute, if any.
    pub fn value(&self) -> Option<&Value> {
        self.attrs.get("value")
    }

    pub fn f64_attr(&self, key: &str) -> Option<f64> {
        self.attrs.get(key).and_then(Value::as_f64)
    }

    pub fn str_attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).and_then(Value::as_str)
    }

    /// Truthiness of an attribute, with a fallback when absent.
    pub fn truthy_or(&self, key: &str, default: bool) -> bool {
        self.attrs.get(key).map(Value::is_truthy).unwrap_or(default)
    }

    pub fn visible(&self) -> bool {
        self.truthy_or("visible", true)
    }

    /// Shallow-merge a patch: patch keys overwrite, all other attributes are
    /// retained. `id` and `type` are immutable and stripped with a warning.
    pub(crate) fn merge_patch(&mut self, patch: &Patch) {
        for (key, value) in patch {
            if key == "id" || key == "type" {
                tracing::warn!(
                    id = %self.id,
                    key = %key,
                    "node id and type are immutable, ignoring patch key"
                );
                continue;
            }
            self.attrs.insert(key.clone(), value.clone());
        }
    }
}

/// The flat node map: id → node, the single source of truth for panel state.
pub type NodeMap = BTreeMap<String, Node>;

// =============================================================================
// Shape Tree
// =============================================================================

/// Id-only tree mirroring the configuration nesting.
///
/// Used solely for traversal/render order; attribute lookups always go
/// through the flat node map. Produced together with the node map by the
/// initializer and never mutated independently.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeNode {
    pub id: String,
    pub children: Vec<ShapeNode>,
}

impl ShapeNode {
    pub fn leaf(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            children: Vec::new(),
        }
    }
}

// =============================================================================
// Config
// =============================================================================

/// One control descriptor in the configuration tree.
///
/// `nodes` carries nested children (meaningful for groups); every other
/// field besides `id` and `type` is an open attribute.
///
/// ```
/// use tweak_tui::Config;
///
/// let config = Config::group("settings", vec![
///     Config::new("range").id("speed").attr("min", 0).attr("max", 10),
///     Config::new("toggle").id("paused"),
/// ]);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub control: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<Config>,
    #[serde(flatten)]
    pub attrs: AttrMap,
}

impl Config {
    pub fn new(control: impl Into<String>) -> Self {
        Self {
            control: control.into(),
            ..Default::default()
        }
    }

    /// A group descriptor with a label and children.
    pub fn group(label: impl Into<String>, nodes: Vec<Config>) -> Self {
        Self::new("group").attr("label", label.into()).children(nodes)
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    pub fn children(mut self, nodes: Vec<Config>) -> Self {
        self.nodes = nodes;
        self
    }

    /// Parse a configuration tree from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
    }
}

// =============================================================================
// Updates
// =============================================================================

/// A partial attribute patch for one node.
pub type Patch = BTreeMap<String, Value>;

/// Id-addressed patches, the argument of the single mutation entry point.
pub type Updates = BTreeMap<String, Patch>;

/// Options for [`Panel::update_with`](crate::Panel::update_with).
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateOptions {
    /// Mutate state without notifying subscribers.
    pub silent: bool,
    /// Notify subscribers of a logical value without persisting it into node
    /// state (momentary interactions, e.g. a button press).
    pub event_only: bool,
}

impl UpdateOptions {
    pub const SILENT: Self = Self {
        silent: true,
        event_only: false,
    };

    pub const EVENT_ONLY: Self = Self {
        silent: false,
        event_only: true,
    };
}

/// Build an `Updates` mapping from `(id, patch)` pairs.
pub fn updates<I, K>(entries: I) -> Updates
where
    I: IntoIterator<Item = (K, Patch)>,
    K: Into<String>,
{
    entries.into_iter().map(|(k, v)| (k.into(), v)).collect()
}

/// Build a single-key patch. `patch_value("value", 3)` is the common case.
pub fn patch_value(key: impl Into<String>, value: impl Into<Value>) -> Patch {
    let mut patch = Patch::new();
    patch.insert(key.into(), value.into());
    patch
}

// =============================================================================
// Error
// =============================================================================

/// Crate-boundary errors.
///
/// The panel engine itself has no fatal paths (misuse degrades softly and is
/// logged); `Error` covers the terminal backend and config parsing.
#[derive(Debug, Error)]
pub enum Error {
    #[error("terminal io: {0}")]
    Io(#[from] io::Error),
    #[error("invalid config: {0}")]
    Config(String),
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_truthiness() {
        assert!(!Value::Null.is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(!Value::Number(0.0).is_truthy());
        assert!(!Value::Str(String::new()).is_truthy());
        assert!(Value::Number(0.5).is_truthy());
        assert!(Value::Str("x".into()).is_truthy());
        assert!(Value::List(vec![]).is_truthy());
    }

    #[test]
    fn number_display_drops_trailing_zero() {
        assert_eq!(Value::Number(3.0).display(), "3");
        assert_eq!(Value::Number(3.25).display(), "3.25");
        assert_eq!(Value::Number(-7.0).display(), "-7");
    }

    #[test]
    fn patch_cannot_change_id_or_type() {
        let mut node = Node::new("a".into(), "range".into(), AttrMap::new());
        let mut patch = Patch::new();
        patch.insert("id".into(), "b".into());
        patch.insert("type".into(), "toggle".into());
        patch.insert("value".into(), 5.into());
        node.merge_patch(&patch);
        assert_eq!(node.id(), "a");
        assert_eq!(node.control(), "range");
        assert_eq!(node.value(), Some(&Value::Number(5.0)));
    }

    #[test]
    fn merge_patch_retains_other_attrs() {
        let mut attrs = AttrMap::new();
        attrs.insert("min".into(), 0.into());
        attrs.insert("value".into(), 2.into());
        let mut node = Node::new("a".into(), "range".into(), attrs);
        node.merge_patch(&patch_value("value", 7));
        assert_eq!(node.f64_attr("min"), Some(0.0));
        assert_eq!(node.f64_attr("value"), Some(7.0));
    }

    #[test]
    fn config_from_json() {
        let config = Config::from_json(
            r#"{ "type": "group", "label": "g", "nodes": [
                { "id": "a", "type": "range", "min": 0, "max": 10, "value": 5 }
            ]}"#,
        )
        .unwrap();
        assert_eq!(config.control, "group");
        assert_eq!(config.nodes.len(), 1);
        assert_eq!(config.nodes[0].id.as_deref(), Some("a"));
        assert_eq!(config.nodes[0].attrs.get("max"), Some(&Value::Number(10.0)));
    }

    #[test]
    fn config_from_json_rejects_garbage() {
        assert!(Config::from_json("not json").is_err());
    }
}
