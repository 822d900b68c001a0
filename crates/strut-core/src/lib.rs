//! Core types and traits for strut.

pub mod emitter;
pub mod error;
pub mod events;
pub mod ident;
pub mod options;
pub mod tree;

// Re-export the working set so downstream crates rarely need the
// module paths.
pub use emitter::{EmitterCallback, EmitterHandle, EventEmitter, NullEmitter};
pub use error::Error;
pub use events::EventKey;
pub use ident::unique_id;
pub use options::{OptionValue, Options, VIEW_OPTIONS};
pub use tree::{ElementTree, Event, Listener, ListenerId, NodeId, SharedTree};
