//! Host element-tree collaborator contract.
//!
//! The view layer never owns an element tree. It drives one through the
//! [`ElementTree`] trait: element creation, attribute writes, child
//! insertion and removal, selector queries, and event subscription.
//! Hosts are free to back this with a real DOM, a retained-mode scene
//! graph, or the in-memory reference tree shipped for tests and demos.

use std::cell::RefCell;
use std::rc::Rc;

/// Identifier for a node in a host tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

/// Identifier for a live event subscription handed out by a host tree.
///
/// Stable for the lifetime of the subscription; passing it back to
/// [`ElementTree::remove_listener`] is the only way to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// An event delivered by the host tree to a subscribed listener.
#[derive(Debug, Clone)]
pub struct Event {
    /// Event name, e.g. `"click"`.
    pub name: String,
    /// Node the subscription was attached to.
    pub target: NodeId,
}

impl Event {
    pub fn new(name: impl Into<String>, target: NodeId) -> Self {
        Self {
            name: name.into(),
            target,
        }
    }
}

/// Callback invoked by the host tree when a subscribed event fires.
///
/// `Rc` rather than `Box` so hosts can snapshot the callbacks they are
/// about to invoke and release their own borrows first; a handler may
/// re-enter the tree.
pub type Listener = Rc<dyn Fn(&Event)>;

/// The host UI-tree primitive the view layer binds against.
pub trait ElementTree {
    /// Create a detached element with the given tag name.
    fn create_element(&mut self, tag: &str) -> NodeId;

    /// Set a named attribute to a literal string value. No escaping or
    /// validation beyond what the host itself applies.
    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str);

    /// Append `child` under `parent`, detaching it from any previous
    /// parent first.
    fn append_child(&mut self, parent: NodeId, child: NodeId);

    /// Remove `node` from its parent. No-op if it has none.
    fn detach(&mut self, node: NodeId);

    /// All descendants of `root` matching `selector`, in document
    /// order. Unsupported or malformed selectors yield no matches.
    fn query_all(&self, root: NodeId, selector: &str) -> Vec<NodeId>;

    /// Subscribe `listener` to `event` on `node`.
    fn add_listener(&mut self, node: NodeId, event: &str, listener: Listener) -> ListenerId;

    /// Drop a subscription. Unknown ids are a no-op.
    fn remove_listener(&mut self, id: ListenerId);
}

/// Shared handle to a host tree. Views hold one of these; the tree is
/// single-threaded and interior-mutable, matching the cooperative
/// callback model of the layer.
pub type SharedTree = Rc<RefCell<dyn ElementTree>>;
