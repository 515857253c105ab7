//! # tweak-tui
//!
//! Declarative control panels for the terminal.
//!
//! Describe a tree of controls (sliders, toggles, selects, groups), hand it
//! to [`create`], and get back a [`Panel`] that renders the tree, routes
//! keyboard input to the focused control, and notifies subscribers whenever
//! a value changes.
//!
//! ## Architecture
//!
//! A panel's state is a flat node map keyed by id, paired with an id-only
//! shape tree that preserves the configuration nesting:
//! ```text
//! Config tree → initialize_state → (node map, shape tree)
//!                                        │
//!                 update/set ──► patch ──┤──► notify subscribers
//!                                        └──► schedule render ──► backend
//! ```
//! Control types live in a [`Registry`]: each entry pairs default
//! attributes with a [`ControlRenderer`] that draws the node and handles
//! its keys. The engine treats built-in and custom controls identically.
//!
//! ## Modules
//!
//! - [`types`] - configuration tree, nodes, dynamic values, errors
//! - [`engine`] - control registry and state initialization
//! - [`panel`] - the panel itself: updates, subscriptions, lifecycle
//! - [`render`] - frame model, dispatch, themes, terminal backends
//! - [`controls`] - the built-in control set
//!
//! ## Example
//!
//! ```no_run
//! use tweak_tui::{create, Config, PanelOptions};
//!
//! let panel = create(
//!     vec![
//!         Config::new("range").id("gain").attr("min", 0).attr("max", 10),
//!         Config::new("toggle").id("mute").attr("value", false),
//!     ],
//!     PanelOptions::default(),
//! )?;
//! let _sub = panel.subscribe("gain", |value| println!("gain = {}", value.display()));
//! panel.run()?;
//! # Ok::<(), tweak_tui::Error>(())
//! ```

pub mod controls;
pub mod engine;
pub mod panel;
pub mod render;
pub mod types;

pub use types::{
    patch_value, updates, Config, Error, Node, NodeMap, Patch, ShapeNode, UpdateOptions, Updates,
    Value,
};

pub use engine::{initialize_state, ControlRenderer, DefaultAttr, Registry};

pub use panel::{create, Panel, PanelConfig, PanelOptions, Subscription};

pub use render::{
    get_preset, render_control, Attr, Backend, BufferBackend, Line, RenderCtx, Span, Style,
    Surface, TerminalBackend, Theme,
};

pub use controls::{normalize_options, register_builtins};
