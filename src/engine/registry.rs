//! Control registry - the capability table for control types.
//!
//! Maps a control-type name to a renderer capability plus a
//! default-attribute descriptor. New control types register themselves
//! without the engine knowing about them.
//!
//! The registry is an explicit value with lifecycle `new (empty) →
//! register* → freeze-by-convention`: panels take it by value at creation
//! and hold it behind `Rc`, so independent panels can use independent
//! registries (and tests can build throwaway ones).

use std::collections::HashMap;
use std::rc::Rc;

use crossterm::event::KeyEvent;

use crate::render::{Line, RenderCtx};
use crate::types::{AttrMap, Node, UpdateOptions, Updates, Value};

// =============================================================================
// Renderer Capability
// =============================================================================

/// The polymorphic capability a control type provides.
///
/// `render` reads node attributes (its own, and in principle any sibling's,
/// through the context) and produces output lines. `handle_key` is the
/// terminal analog of the original pointer events: interaction flows back
/// through `mutate`, the engine's single mutation entry point. Renderers
/// never mutate node state directly.
pub trait ControlRenderer {
    fn render(&self, ctx: &RenderCtx<'_>) -> Vec<Line>;

    /// React to a key while focused. Return `true` when the key was
    /// consumed. The default consumes nothing.
    fn handle_key(
        &self,
        node: &Node,
        key: KeyEvent,
        mutate: &mut dyn FnMut(Updates, UpdateOptions),
    ) -> bool {
        let _ = (node, key, mutate);
        false
    }

    /// Whether this node participates in focus traversal.
    fn focusable(&self, node: &Node) -> bool {
        let _ = node;
        true
    }
}

// =============================================================================
// Default Attributes
// =============================================================================

/// One default attribute: either a static value or a function of the
/// partially-defaulted attribute map.
///
/// Computed defaults let a control derive its default `value` from its own
/// configuration - a range defaults to its `min`, a select to its first
/// option. They are evaluated exactly once per node at initialization, with
/// the type's static defaults overlaid by the raw user config as input.
#[derive(Clone)]
pub enum DefaultAttr {
    Value(Value),
    Computed(Rc<dyn Fn(&AttrMap) -> Value>),
}

impl DefaultAttr {
    pub fn value(v: impl Into<Value>) -> Self {
        DefaultAttr::Value(v.into())
    }

    pub fn computed(f: impl Fn(&AttrMap) -> Value + 'static) -> Self {
        DefaultAttr::Computed(Rc::new(f))
    }
}

// =============================================================================
// Registry
// =============================================================================

struct Entry {
    renderer: Rc<dyn ControlRenderer>,
    /// Global defaults first, then the control's own (later entries win
    /// when applied in order).
    defaults: Vec<(String, DefaultAttr)>,
}

/// Control-type registry: type name → renderer + defaults.
///
/// Registering the same type twice replaces the prior entry (last wins).
/// Looking up an unregistered type is a recoverable error: it logs a
/// warning and the node renders as nothing.
#[derive(Default)]
pub struct Registry {
    entries: HashMap<String, Entry>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-populated with the built-in control set.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        crate::controls::register_builtins(&mut registry);
        registry
    }

    /// Register a control type.
    pub fn register<K, I>(&mut self, control: impl Into<String>, renderer: Rc<dyn ControlRenderer>, defaults: I)
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, DefaultAttr)>,
    {
        let mut merged: Vec<(String, DefaultAttr)> = vec![
            ("layout".to_string(), DefaultAttr::value("row")),
            ("visible".to_string(), DefaultAttr::value(true)),
        ];
        merged.extend(defaults.into_iter().map(|(k, v)| (k.into(), v)));
        self.entries.insert(control.into(), Entry { renderer, defaults: merged });
    }

    fn entry(&self, control: &str) -> Option<&Entry> {
        let entry = self.entries.get(control);
        if entry.is_none() {
            tracing::warn!(control, "control type requested but not registered");
        }
        entry
    }

    /// Default attributes for a control type, in application order.
    pub fn defaults(&self, control: &str) -> Option<&[(String, DefaultAttr)]> {
        self.entry(control).map(|e| e.defaults.as_slice())
    }

    /// Renderer capability for a control type.
    pub fn renderer(&self, control: &str) -> Option<Rc<dyn ControlRenderer>> {
        self.entry(control).map(|e| Rc::clone(&e.renderer))
    }

    pub fn is_registered(&self, control: &str) -> bool {
        self.entries.contains_key(control)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct Nothing;

    impl ControlRenderer for Nothing {
        fn render(&self, _ctx: &RenderCtx<'_>) -> Vec<Line> {
            Vec::new()
        }
    }

    #[test]
    fn unregistered_lookup_is_soft() {
        let registry = Registry::new();
        assert!(registry.defaults("knob").is_none());
        assert!(registry.renderer("knob").is_none());
    }

    #[test]
    fn global_defaults_precede_control_defaults() {
        let mut registry = Registry::new();
        registry.register(
            "knob",
            Rc::new(Nothing),
            vec![("layout", DefaultAttr::value("block"))],
        );
        let defaults = registry.defaults("knob").unwrap();
        let layouts: Vec<&Value> = defaults
            .iter()
            .filter(|(k, _)| k == "layout")
            .map(|(_, d)| match d {
                DefaultAttr::Value(v) => v,
                DefaultAttr::Computed(_) => panic!("static default expected"),
            })
            .collect();
        // global "row" first, control's "block" later, so the control wins
        // when applied in order
        assert_eq!(layouts, vec![&Value::from("row"), &Value::from("block")]);
    }

    #[test]
    fn last_registration_wins() {
        let mut registry = Registry::new();
        registry.register("knob", Rc::new(Nothing), vec![("step", DefaultAttr::value(1))]);
        registry.register("knob", Rc::new(Nothing), vec![("step", DefaultAttr::value(5))]);
        let defaults = registry.defaults("knob").unwrap();
        let step = defaults
            .iter()
            .rev()
            .find(|(k, _)| k == "step")
            .map(|(_, d)| match d {
                DefaultAttr::Value(v) => v.clone(),
                DefaultAttr::Computed(_) => panic!("static default expected"),
            });
        assert_eq!(step, Some(Value::Number(5.0)));
    }

    #[test]
    fn builtins_cover_the_standard_set() {
        let registry = Registry::with_builtins();
        for control in [
            "group", "range", "number", "toggle", "select", "buttons", "button", "text", "color",
            "display",
        ] {
            assert!(registry.is_registered(control), "{control} missing");
        }
    }
}
