//! Panel engine internals - control registry and state initialization.
//!
//! The engine side of the crate owns the data structures the panel runs on:
//!
//! - Registry: control-type → renderer capability + default attributes
//! - Initializer: configuration tree → (flat node map, shape tree)
//!
//! The flat node map is the single source of truth; the shape tree is an
//! id-only projection used for render order. Both are produced together by
//! [`initialize_state`] and owned by one panel instance.

mod init;
mod registry;

pub use init::initialize_state;
pub use registry::{ControlRenderer, DefaultAttr, Registry};
