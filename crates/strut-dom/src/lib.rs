//! Reference host collaborators for strut.
//!
//! Real hosts bring their own element tree and pub/sub capability;
//! this crate ships an arena-backed [`InMemoryTree`] and a
//! [`LocalEmitter`] so views can run headless in tests and demos.

pub mod emitter;
pub mod selector;
pub mod tree;

pub use emitter::LocalEmitter;
pub use selector::Selector;
pub use tree::{as_shared, dispatch, InMemoryTree};
