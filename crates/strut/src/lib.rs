//! strut - a declarative view layer for hierarchical element trees.
//!
//! A [`View`] binds one definition instance to one element of a host
//! tree and wires a declarative event map into live, reversible
//! subscriptions. A [`Definition`] is the blueprint: extend one to
//! derive a new view type that inherits and selectively overrides
//! behavior, without running any construction logic.
//!
//! The host tree itself is a collaborator behind
//! [`strut_core::ElementTree`]; `strut-dom` ships an in-memory
//! implementation for tests and headless use.
//!
//! # Quick Start
//!
//! ```ignore
//! use strut::prelude::*;
//!
//! let item_list = Definition::base().extend(
//!     Overrides::new()
//!         .tag_name("ul")
//!         .class_name("items")
//!         .events(EventMap::new().on("click .item", "on_select"))
//!         .method("on_select", |view, _event| {
//!             view.trigger("selected");
//!         }),
//! );
//!
//! let view = item_list.build(&tree, Options::new())?;
//! ```

pub mod definition;
pub mod delegate;
pub mod element;
pub mod view;

pub use definition::{ConstructFn, Definition, InitFn, Method, Overrides, RenderFn};
pub use delegate::{EventMap, EventsDecl, HandlerSpec, Subscription};
pub use view::View;

pub mod prelude {
    //! The working set for defining and building views.
    pub use crate::definition::{Definition, Overrides};
    pub use crate::delegate::EventMap;
    pub use crate::view::View;
    pub use strut_core::{
        Error, Event, EventEmitter, NodeId, OptionValue, Options, SharedTree,
    };
}
