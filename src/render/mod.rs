//! Rendering - frame model, dispatch, themes, backends.
//!
//! The dispatch walks the shape tree and asks each node's registered
//! renderer for output lines; backends present the composed frame. Nothing
//! in here mutates node state: renderers get read access plus the single
//! write path the panel hands to key handlers.

mod dispatch;
mod surface;
pub mod terminal;
pub mod theme;

pub use dispatch::{render_control, row_label, RenderCtx, LABEL_WIDTH};
pub use surface::{pad_to_width, Attr, Line, Span, Style, Surface};
pub use terminal::{Backend, BufferBackend, Captured, TerminalBackend};
pub use theme::{get_preset, Theme};
