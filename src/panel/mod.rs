//! Panel engine - state, update/notify/render protocol, lifecycle.
//!
//! One panel owns the flat node map and the shape tree for its instance and
//! is the sole mutator of node state. Every state change flows through
//! [`Panel::update_with`], which applies all patches, then notifies
//! subscribers, then schedules a render - in that order, always.
//!
//! # Render scheduling
//!
//! With `throttle_rendering` (the default) renders coalesce into a
//! single-slot pending flag: the first schedule arms it, further schedules
//! are no-ops, and the next [`Panel::tick`] (called by [`Panel::run`] each
//! frame) performs exactly one paint of the then-current state and clears
//! the flag. Without throttling every schedule paints synchronously.
//!
//! # Concurrency
//!
//! Single-threaded, cooperative. Subscriber handlers run with the panel
//! borrow released, so a handler may call back into `update`/`set`/
//! `subscribe` freely; its own render coalesces with the triggering one
//! when throttled.

mod focus;

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::engine::{initialize_state, Registry};
use crate::render::theme;
use crate::render::{render_control, Backend, Line, RenderCtx, Surface, TerminalBackend, Theme};
use crate::types::{
    patch_value, Config, Error, NodeMap, ShapeNode, UpdateOptions, Updates, Value,
};

// =============================================================================
// Options & Config wrapper
// =============================================================================

/// Panel creation options.
pub struct PanelOptions {
    /// Externally owned render target. When absent the panel creates its
    /// own [`TerminalBackend`] and restores the terminal on destroy.
    pub mount: Option<Box<dyn Backend>>,
    /// Coalesce renders into one pending frame (default true).
    pub throttle_rendering: bool,
    /// Emit styled frames (default true). When false, frames are plain
    /// text - the terminal stand-in for skipping style injection.
    pub styled: bool,
    /// Theme preset names layered onto the default, for theming the root.
    pub class_names: Vec<String>,
    /// Control registry for this panel; defaults to the built-in set.
    pub registry: Option<Registry>,
    /// Target panel width in cells.
    pub width: u16,
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self {
            mount: None,
            throttle_rendering: true,
            styled: true,
            class_names: Vec::new(),
            registry: None,
            width: 48,
        }
    }
}

/// Accepted configuration shapes: a single root group descriptor, or a flat
/// list of controls that gets wrapped into an implicit root group.
pub enum PanelConfig {
    Root(Config),
    List(Vec<Config>),
}

impl From<Config> for PanelConfig {
    fn from(config: Config) -> Self {
        PanelConfig::Root(config)
    }
}

impl From<Vec<Config>> for PanelConfig {
    fn from(configs: Vec<Config>) -> Self {
        PanelConfig::List(configs)
    }
}

impl PanelConfig {
    fn into_root(self) -> Config {
        match self {
            PanelConfig::Root(config) => config,
            PanelConfig::List(configs) => Config::group("controls", configs),
        }
    }
}

// =============================================================================
// Subscribers
// =============================================================================

type Handler = Rc<RefCell<dyn FnMut(&str, &Value)>>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum SubKey {
    Id(String),
    All,
}

struct Subscriber {
    token: u64,
    handler: Handler,
}

/// Disposer returned by [`Panel::subscribe`]: removes exactly one handler
/// registration. Disposing twice, or after the panel cleared its
/// subscribers, is a logged no-op.
pub struct Subscription {
    panel: Weak<RefCell<PanelInner>>,
    key: SubKey,
    token: u64,
    disposed: Cell<bool>,
}

impl Subscription {
    pub fn dispose(&self) {
        if self.disposed.replace(true) {
            tracing::warn!("could not unsubscribe: already disposed");
            return;
        }
        let Some(inner) = self.panel.upgrade() else {
            tracing::warn!("could not unsubscribe: panel is gone");
            return;
        };
        let mut inner = inner.borrow_mut();
        let removed = inner
            .subscribers
            .get_mut(&self.key)
            .and_then(|handlers| {
                handlers
                    .iter()
                    .position(|s| s.token == self.token)
                    .map(|i| handlers.remove(i))
            })
            .is_some();
        if !removed {
            tracing::warn!("could not unsubscribe: could not find handler");
        }
    }
}

// =============================================================================
// Panel
// =============================================================================

struct PanelInner {
    registry: Rc<Registry>,
    nodes: NodeMap,
    shape: ShapeNode,
    subscribers: std::collections::HashMap<SubKey, Vec<Subscriber>>,
    next_token: u64,
    backend: Option<Box<dyn Backend>>,
    owns_backend: bool,
    throttle: bool,
    styled: bool,
    width: u16,
    theme: Theme,
    focused: Option<String>,
    pending: bool,
    destroyed: bool,
}

impl PanelInner {
    fn compose(&self) -> Surface {
        let ctx = RenderCtx {
            nodes: &self.nodes,
            shape: &self.shape,
            registry: &self.registry,
            theme: &self.theme,
            focused: self.focused.as_deref(),
            width: self.width,
        };
        let mut lines = render_control(&ctx);
        if !self.styled {
            lines = lines.into_iter().map(Line::unstyled).collect();
        }
        Surface::new(lines)
    }
}

/// A mounted control panel.
///
/// Cheap to clone conceptually but deliberately not `Clone`: one handle,
/// one lifecycle. All methods take `&self`; state lives behind interior
/// mutability so subscriber disposers and key handlers can reach it.
pub struct Panel {
    inner: Rc<RefCell<PanelInner>>,
}

/// Create and mount a panel.
///
/// ```no_run
/// use tweak_tui::{create, Config, PanelOptions};
///
/// let panel = create(
///     vec![
///         Config::new("range").id("speed").attr("min", 0).attr("max", 10).attr("value", 1),
///         Config::new("toggle").id("paused"),
///     ],
///     PanelOptions::default(),
/// )?;
///
/// let sub = panel.subscribe("speed", |value| println!("speed = {value:?}"));
/// panel.run()?;
/// sub.dispose();
/// panel.destroy();
/// # Ok::<(), tweak_tui::Error>(())
/// ```
pub fn create(config: impl Into<PanelConfig>, options: PanelOptions) -> Result<Panel, Error> {
    let root = config.into().into_root();
    let registry = Rc::new(options.registry.unwrap_or_else(Registry::with_builtins));
    let (nodes, shape) = initialize_state(&registry, &root);
    let theme = theme::resolve(&options.class_names);

    let (backend, owns_backend) = match options.mount {
        Some(backend) => (backend, false),
        None => (
            Box::new(TerminalBackend::new()?) as Box<dyn Backend>,
            true,
        ),
    };

    let focused = focus::focusable_ids(&registry, &nodes, &shape)
        .into_iter()
        .next();

    let panel = Panel {
        inner: Rc::new(RefCell::new(PanelInner {
            registry,
            nodes,
            shape,
            subscribers: std::collections::HashMap::new(),
            next_token: 0,
            backend: Some(backend),
            owns_backend,
            throttle: options.throttle_rendering,
            styled: options.styled,
            width: options.width,
            theme,
            focused,
            pending: false,
            destroyed: false,
        })),
    };

    panel.schedule_render();
    Ok(panel)
}

impl Panel {
    // -------------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------------

    /// Patch any control attributes: `id -> partial attribute patch`.
    ///
    /// Ids absent from the node map are silently ignored. The call always
    /// concludes by scheduling a render, even if no ids matched.
    pub fn update(&self, updates: Updates) {
        self.update_with(updates, UpdateOptions::default());
    }

    /// [`update`](Self::update) with explicit options (silent / event-only).
    pub fn update_with(&self, updates: Updates, options: UpdateOptions) {
        let notifications = {
            let mut inner = self.inner.borrow_mut();
            if inner.destroyed {
                tracing::warn!("could not apply updates: panel is destroyed");
                return;
            }

            // Apply every patch before any subscriber runs.
            let mut changed: Vec<(String, Value)> = Vec::new();
            for (id, patch) in &updates {
                let Some(node) = inner.nodes.get_mut(id) else {
                    continue;
                };
                if !options.event_only {
                    node.merge_patch(patch);
                }
                if let Some(value) = patch.get("value") {
                    if !options.silent {
                        changed.push((id.clone(), value.clone()));
                    }
                }
            }

            // Snapshot handlers so they run with the borrow released.
            changed
                .into_iter()
                .map(|(id, value)| {
                    let mut handlers: Vec<Handler> = Vec::new();
                    if let Some(subs) = inner.subscribers.get(&SubKey::Id(id.clone())) {
                        handlers.extend(subs.iter().map(|s| Rc::clone(&s.handler)));
                    }
                    if let Some(subs) = inner.subscribers.get(&SubKey::All) {
                        handlers.extend(subs.iter().map(|s| Rc::clone(&s.handler)));
                    }
                    (id, value, handlers)
                })
                .collect::<Vec<_>>()
        };

        for (id, value, handlers) in notifications {
            for handler in handlers {
                (&mut *handler.borrow_mut())(&id, &value);
            }
        }

        self.schedule_render();
    }

    /// Dynamic entry point for JSON-driven callers: `updates` must be a map
    /// of id → attribute-patch map. A malformed argument warns and aborts
    /// the whole call with no state change and no render.
    pub fn update_value(&self, updates: Value, options: UpdateOptions) {
        let Some(map) = updates.as_map() else {
            tracing::warn!("could not set values: invalid values object");
            return;
        };
        let mut typed = Updates::new();
        for (id, patch) in map {
            let Some(patch) = patch.as_map() else {
                tracing::warn!(id = %id, "could not set values: patch is not a mapping");
                return;
            };
            typed.insert(id.clone(), patch.clone());
        }
        self.update_with(typed, options);
    }

    /// Set one or more values: sugar for `update(id -> {value})`.
    pub fn set<I, K, V>(&self, values: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.set_with(values, UpdateOptions::default());
    }

    /// [`set`](Self::set) with explicit options.
    pub fn set_with<I, K, V>(&self, values: I, options: UpdateOptions)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let updates: Updates = values
            .into_iter()
            .map(|(id, value)| (id.into(), patch_value("value", value)))
            .collect();
        self.update_with(updates, options);
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Snapshot of current values: `id -> value`, omitting nodes without a
    /// `value` attribute. The returned map never aliases internal state.
    pub fn get(&self) -> std::collections::BTreeMap<String, Value> {
        self.inner
            .borrow()
            .nodes
            .iter()
            .filter_map(|(id, node)| node.value().map(|v| (id.clone(), v.clone())))
            .collect()
    }

    // -------------------------------------------------------------------------
    // Subscriptions
    // -------------------------------------------------------------------------

    /// Listen to one control's value changes.
    pub fn subscribe(
        &self,
        id: impl Into<String>,
        mut handler: impl FnMut(&Value) + 'static,
    ) -> Subscription {
        self.subscribe_key(
            SubKey::Id(id.into()),
            Rc::new(RefCell::new(move |_: &str, value: &Value| handler(value))),
        )
    }

    /// Listen to every control's value changes, receiving `(id, value)`.
    pub fn subscribe_all(&self, handler: impl FnMut(&str, &Value) + 'static) -> Subscription {
        self.subscribe_key(SubKey::All, Rc::new(RefCell::new(handler)))
    }

    fn subscribe_key(&self, key: SubKey, handler: Handler) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let token = inner.next_token;
        inner.next_token += 1;
        inner
            .subscribers
            .entry(key.clone())
            .or_default()
            .push(Subscriber { token, handler });
        Subscription {
            panel: Rc::downgrade(&self.inner),
            key,
            token,
            disposed: Cell::new(false),
        }
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// Schedule a render: synchronous without throttling, single-slot
    /// pending flag with it.
    fn schedule_render(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.destroyed {
                return;
            }
            if inner.throttle {
                inner.pending = true;
                return;
            }
        }
        self.paint();
    }

    /// Flush a pending throttled render. Returns whether a paint happened.
    pub fn tick(&self) -> bool {
        let pending = {
            let inner = self.inner.borrow();
            !inner.destroyed && inner.pending
        };
        if pending {
            self.paint();
        }
        pending
    }

    fn paint(&self) {
        let mut inner = self.inner.borrow_mut();
        if inner.destroyed {
            return;
        }
        let frame = inner.compose();
        inner.pending = false;
        if let Some(backend) = inner.backend.as_mut() {
            if let Err(e) = backend.present(&frame) {
                tracing::warn!(error = %e, "failed to present frame");
            }
        }
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    /// Route a key event: Tab/BackTab move focus; anything else goes to the
    /// focused control, falling back to Up/Down focus movement when the
    /// control does not consume it. Returns whether the key was consumed.
    pub fn handle_key(&self, key: KeyEvent) -> bool {
        if self.inner.borrow().destroyed {
            return false;
        }

        match key.code {
            KeyCode::Tab => {
                self.focus_step(1);
                return true;
            }
            KeyCode::BackTab => {
                self.focus_step(-1);
                return true;
            }
            _ => {}
        }

        let target = {
            let inner = self.inner.borrow();
            inner
                .focused
                .clone()
                .and_then(|id| inner.nodes.get(&id).cloned())
                .map(|node| {
                    let renderer = inner.registry.renderer(node.control());
                    (node, renderer)
                })
        };

        if let Some((node, Some(renderer))) = target {
            let mut mutate =
                |updates: Updates, options: UpdateOptions| self.update_with(updates, options);
            if renderer.handle_key(&node, key, &mut mutate) {
                return true;
            }
        }

        match key.code {
            KeyCode::Up => {
                self.focus_step(-1);
                true
            }
            KeyCode::Down => {
                self.focus_step(1);
                true
            }
            _ => false,
        }
    }

    fn focus_step(&self, delta: i32) {
        {
            let mut inner = self.inner.borrow_mut();
            let ids = focus::focusable_ids(&inner.registry, &inner.nodes, &inner.shape);
            inner.focused = focus::step(&ids, inner.focused.as_deref(), delta);
        }
        self.schedule_render();
    }

    /// The currently focused node id, if any.
    pub fn focused(&self) -> Option<String> {
        self.inner.borrow().focused.clone()
    }

    /// Blocking event loop: polls key events, ticks the throttled renderer
    /// each frame, exits on `q` or Ctrl+C (or when the panel is destroyed).
    pub fn run(&self) -> Result<(), Error> {
        loop {
            if self.inner.borrow().destroyed {
                return Ok(());
            }
            if event::poll(Duration::from_millis(16))? {
                match event::read()? {
                    Event::Key(key) if key.kind != KeyEventKind::Release => {
                        let quit = key.code == KeyCode::Char('q')
                            || (key.code == KeyCode::Char('c')
                                && key.modifiers.contains(KeyModifiers::CONTROL));
                        if quit {
                            return Ok(());
                        }
                        self.handle_key(key);
                    }
                    Event::Resize(..) => self.schedule_render(),
                    _ => {}
                }
            }
            self.tick();
        }
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Tear the panel down: cancel any pending render, clear the render
    /// target (restoring the terminal when the panel owns it), drop all
    /// subscribers and node state. Idempotent; a second call warns.
    pub fn destroy(&self) {
        let mut inner = self.inner.borrow_mut();
        if inner.destroyed {
            tracing::warn!("destroy called on an already-destroyed panel");
            return;
        }
        inner.destroyed = true;
        inner.pending = false;

        if inner.owns_backend {
            // Dropping the owned backend restores the terminal.
            if let Some(mut backend) = inner.backend.take() {
                let _ = backend.clear();
            }
        } else if let Some(backend) = inner.backend.as_mut() {
            if let Err(e) = backend.clear() {
                tracing::warn!(error = %e, "failed to clear mount on destroy");
            }
        }

        inner.subscribers.clear();
        inner.nodes.clear();
        inner.shape.children.clear();
        inner.focused = None;
    }

    /// Render the current state to a surface without a backend round trip.
    /// Intended for tests and embedding.
    pub fn snapshot(&self) -> Surface {
        self.inner.borrow().compose()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::render::{BufferBackend, Captured};
    use crate::types::updates;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn basic_config() -> Config {
        Config::group(
            "controls",
            vec![
                Config::new("range")
                    .id("a")
                    .attr("min", 0)
                    .attr("max", 10)
                    .attr("value", 5),
                Config::new("toggle").id("b"),
            ],
        )
        .id("root")
    }

    fn panel_with(config: impl Into<PanelConfig>, throttle: bool) -> (Panel, Rc<RefCell<Captured>>) {
        let backend = BufferBackend::new();
        let captured = backend.captured();
        let panel = create(
            config,
            PanelOptions {
                mount: Some(Box::new(backend)),
                throttle_rendering: throttle,
                ..Default::default()
            },
        )
        .expect("buffer-backed panel cannot fail");
        (panel, captured)
    }

    #[test]
    fn get_reflects_set() {
        let (panel, _) = panel_with(basic_config(), false);
        assert_eq!(panel.get()["a"], Value::Number(5.0));
        panel.set([("a", 7)]);
        assert_eq!(panel.get()["a"], Value::Number(7.0));
    }

    #[test]
    fn get_snapshot_does_not_alias_state() {
        let (panel, _) = panel_with(basic_config(), false);
        let mut snapshot = panel.get();
        snapshot.insert("a".into(), Value::Number(99.0));
        assert_eq!(panel.get()["a"], Value::Number(5.0));
    }

    #[test]
    fn subscriber_sees_exactly_one_notification() {
        let (panel, _) = panel_with(basic_config(), false);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen2 = Rc::clone(&seen);
        let _sub = panel.subscribe("a", move |value| seen2.borrow_mut().push(value.clone()));
        panel.set([("a", 7)]);
        assert_eq!(&*seen.borrow(), &vec![Value::Number(7.0)]);
    }

    #[test]
    fn silent_set_mutates_without_notifying() {
        let (panel, _) = panel_with(basic_config(), false);
        let count = Rc::new(RefCell::new(0));
        let count2 = Rc::clone(&count);
        let _sub = panel.subscribe("a", move |_| *count2.borrow_mut() += 1);
        panel.set_with([("a", 1)], UpdateOptions::SILENT);
        assert_eq!(panel.get()["a"], Value::Number(1.0));
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn event_only_notifies_without_persisting() {
        let (panel, _) = panel_with(basic_config(), false);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen2 = Rc::clone(&seen);
        let _sub = panel.subscribe("a", move |value| seen2.borrow_mut().push(value.clone()));
        panel.update_with(
            updates([("a", patch_value("value", 9))]),
            UpdateOptions::EVENT_ONLY,
        );
        assert_eq!(&*seen.borrow(), &vec![Value::Number(9.0)]);
        assert_eq!(panel.get()["a"], Value::Number(5.0));
    }

    #[test]
    fn disposed_handler_is_not_invoked() {
        let (panel, _) = panel_with(basic_config(), false);
        let count = Rc::new(RefCell::new(0));
        let count2 = Rc::clone(&count);
        let sub = panel.subscribe("a", move |_| *count2.borrow_mut() += 1);
        panel.set([("a", 1)]);
        sub.dispose();
        panel.set([("a", 2)]);
        assert_eq!(*count.borrow(), 1);
        // double dispose is a logged no-op
        sub.dispose();
    }

    #[test]
    fn unsubscribe_removes_exactly_one_handler() {
        let (panel, _) = panel_with(basic_config(), false);
        let count = Rc::new(RefCell::new(0));
        let c1 = Rc::clone(&count);
        let c2 = Rc::clone(&count);
        let sub1 = panel.subscribe("a", move |_| *c1.borrow_mut() += 1);
        let _sub2 = panel.subscribe("a", move |_| *c2.borrow_mut() += 1);
        sub1.dispose();
        panel.set([("a", 1)]);
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn all_subscribers_receive_id_and_value() {
        let (panel, _) = panel_with(basic_config(), false);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen2 = Rc::clone(&seen);
        let _sub =
            panel.subscribe_all(move |id, value| seen2.borrow_mut().push((id.to_string(), value.clone())));
        panel.set([("b", true)]);
        assert_eq!(
            &*seen.borrow(),
            &vec![("b".to_string(), Value::Bool(true))]
        );
    }

    #[test]
    fn per_id_handlers_run_before_all_handlers() {
        let (panel, _) = panel_with(basic_config(), false);
        let order = Rc::new(RefCell::new(Vec::new()));
        let o1 = Rc::clone(&order);
        let o2 = Rc::clone(&order);
        let _all = panel.subscribe_all(move |_, _| o1.borrow_mut().push("all"));
        let _one = panel.subscribe("a", move |_| o2.borrow_mut().push("id"));
        panel.set([("a", 3)]);
        assert_eq!(&*order.borrow(), &vec!["id", "all"]);
    }

    #[test]
    fn reentrant_handler_may_call_back_into_the_panel() {
        let (panel, _) = panel_with(basic_config(), false);
        // A handler that re-enters set() on another id.
        let reentered = Rc::new(RefCell::new(false));
        let reentered2 = Rc::clone(&reentered);
        let weak = Rc::downgrade(&panel.inner);
        let _sub = panel.subscribe("a", move |_| {
            if let Some(inner) = weak.upgrade() {
                let p = Panel { inner };
                p.set([("b", true)]);
                *reentered2.borrow_mut() = true;
            }
        });
        panel.set([("a", 1)]);
        assert!(*reentered.borrow());
        assert_eq!(panel.get()["b"], Value::Bool(true));
    }

    #[test]
    fn unknown_ids_are_ignored_but_render_is_still_scheduled() {
        let (panel, captured) = panel_with(basic_config(), false);
        let presents = captured.borrow().presents;
        panel.update(updates([("ghost", patch_value("value", 1))]));
        assert!(!panel.get().contains_key("ghost"));
        assert_eq!(captured.borrow().presents, presents + 1);
    }

    #[test]
    fn empty_update_is_an_idempotent_no_op_render() {
        let (panel, captured) = panel_with(basic_config(), false);
        let before = panel.get();
        let presents = captured.borrow().presents;
        panel.update(Updates::new());
        panel.update(Updates::new());
        assert_eq!(panel.get(), before);
        assert_eq!(captured.borrow().presents, presents + 2);
    }

    #[test]
    fn malformed_dynamic_update_aborts_without_render() {
        let (panel, captured) = panel_with(basic_config(), false);
        let presents = captured.borrow().presents;

        panel.update_value(Value::Number(3.0), UpdateOptions::default());
        assert_eq!(captured.borrow().presents, presents);

        // one well-formed patch, one malformed: whole call aborts
        let mut map = std::collections::BTreeMap::new();
        map.insert("a".to_string(), {
            let mut patch = std::collections::BTreeMap::new();
            patch.insert("value".to_string(), Value::Number(9.0));
            Value::Map(patch)
        });
        map.insert("b".to_string(), Value::Number(1.0));
        panel.update_value(Value::Map(map), UpdateOptions::default());
        assert_eq!(panel.get()["a"], Value::Number(5.0));
        assert_eq!(captured.borrow().presents, presents);
    }

    #[test]
    fn well_formed_dynamic_update_applies() {
        let (panel, _) = panel_with(basic_config(), false);
        let mut patch = std::collections::BTreeMap::new();
        patch.insert("value".to_string(), Value::Number(8.0));
        let mut map = std::collections::BTreeMap::new();
        map.insert("a".to_string(), Value::Map(patch));
        panel.update_value(Value::Map(map), UpdateOptions::default());
        assert_eq!(panel.get()["a"], Value::Number(8.0));
    }

    #[test]
    fn throttled_renders_coalesce_until_tick() {
        let (panel, captured) = panel_with(basic_config(), true);
        // creation scheduled a render but nothing painted yet
        assert_eq!(captured.borrow().presents, 0);

        panel.set([("a", 1)]);
        panel.set([("a", 2)]);
        panel.set([("a", 3)]);
        assert_eq!(captured.borrow().presents, 0);

        assert!(panel.tick());
        assert_eq!(captured.borrow().presents, 1);
        // frame shows the then-current state
        assert!(captured.borrow().last.text().contains('3'));

        // flag cleared: nothing more to flush
        assert!(!panel.tick());
        assert_eq!(captured.borrow().presents, 1);
    }

    #[test]
    fn unthrottled_renders_are_synchronous() {
        let (panel, captured) = panel_with(basic_config(), false);
        assert_eq!(captured.borrow().presents, 1);
        panel.set([("a", 1)]);
        assert_eq!(captured.borrow().presents, 2);
    }

    #[test]
    fn hiding_a_node_removes_it_from_the_next_frame() {
        let (panel, captured) = panel_with(basic_config(), false);
        assert!(captured.borrow().last.text().contains("a"));
        panel.update(updates([("a", patch_value("visible", false))]));
        assert!(!captured.borrow().last.text().contains("a "));
    }

    #[test]
    fn collapsing_a_group_hides_its_subtree() {
        let (panel, captured) = panel_with(basic_config(), false);
        assert!(captured.borrow().last.text().contains("b"));
        panel.update(updates([("root", patch_value("expanded", false))]));
        let text = captured.borrow().last.text();
        assert!(!text.contains("b "));
        assert!(!text.contains("a "));
    }

    #[test]
    fn destroy_is_idempotent_and_clears_state() {
        let (panel, captured) = panel_with(basic_config(), true);
        panel.set([("a", 1)]);
        panel.destroy();
        assert_eq!(captured.borrow().clears, 1);
        assert!(panel.get().is_empty());
        // pending render was cancelled
        assert!(!panel.tick());
        // second destroy: logged no-op
        panel.destroy();
        assert_eq!(captured.borrow().clears, 1);
        // updates after destroy are no-ops
        panel.set([("a", 2)]);
        assert!(panel.get().is_empty());
    }

    #[test]
    fn flat_config_is_wrapped_into_a_root_group() {
        let (panel, _) = panel_with(
            vec![Config::new("toggle").id("t"), Config::new("range").id("r").attr("min", 1)],
            false,
        );
        assert_eq!(panel.get()["t"], Value::Bool(false));
        assert_eq!(panel.get()["r"], Value::Number(1.0));
        let frame = panel.snapshot();
        assert!(frame.text().contains("controls"));
    }

    #[test]
    fn tab_moves_focus_and_keys_reach_the_focused_control() {
        let (panel, _) = panel_with(basic_config(), false);
        // initial focus is the first focusable node (the root group)
        assert_eq!(panel.focused().as_deref(), Some("root"));

        panel.handle_key(key(KeyCode::Tab));
        assert_eq!(panel.focused().as_deref(), Some("a"));

        // range consumes Right and steps by 1
        assert!(panel.handle_key(key(KeyCode::Right)));
        assert_eq!(panel.get()["a"], Value::Number(6.0));

        // toggle flips on space
        panel.handle_key(key(KeyCode::Tab));
        assert_eq!(panel.focused().as_deref(), Some("b"));
        panel.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(panel.get()["b"], Value::Bool(true));

        // Tab wraps back to the root group
        panel.handle_key(key(KeyCode::Tab));
        assert_eq!(panel.focused().as_deref(), Some("root"));
    }

    #[test]
    fn enter_collapses_the_focused_group() {
        let (panel, _) = panel_with(basic_config(), false);
        assert_eq!(panel.focused().as_deref(), Some("root"));
        panel.handle_key(key(KeyCode::Enter));
        let text = panel.snapshot().text();
        assert!(!text.contains("a "));
    }

    #[test]
    fn button_press_is_event_only_end_to_end() {
        let (panel, _) = panel_with(
            vec![Config::new("button").id("fire").attr("text", "Fire!")],
            false,
        );
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen2 = Rc::clone(&seen);
        let _sub = panel.subscribe("fire", move |value| seen2.borrow_mut().push(value.clone()));

        panel.handle_key(key(KeyCode::Tab)); // root group -> button
        assert_eq!(panel.focused().as_deref(), Some("fire"));
        panel.handle_key(key(KeyCode::Enter));

        assert_eq!(&*seen.borrow(), &vec![Value::Bool(true)]);
        // nothing persisted
        assert!(!panel.get().contains_key("fire"));
    }
}
