//! Built-in controls.
//!
//! One file per control type; each registers itself with its renderer and
//! default attributes. The engine never references any of them by name -
//! they are ordinary registry entries, the same as a custom control would
//! be.

mod button;
mod buttons;
mod color;
mod display;
mod group;
mod number;
mod range;
mod select;
mod text;
mod toggle;
pub mod util;

pub use button::ButtonControl;
pub use buttons::ButtonsControl;
pub use color::ColorControl;
pub use display::DisplayControl;
pub use group::GroupControl;
pub use number::NumberControl;
pub use range::RangeControl;
pub use select::SelectControl;
pub use text::TextControl;
pub use toggle::ToggleControl;
pub use util::normalize_options;

use crate::engine::Registry;

/// Register the standard control set into a registry.
pub fn register_builtins(registry: &mut Registry) {
    group::register(registry);
    range::register(registry);
    number::register(registry);
    toggle::register(registry);
    select::register(registry);
    buttons::register(registry);
    button::register(registry);
    text::register(registry);
    color::register(registry);
    display::register(registry);
}
