//! Arena-backed in-memory element tree.
//!
//! Reference implementation of [`ElementTree`] for tests, demos, and
//! headless hosts. Nodes live in a flat arena indexed by [`NodeId`];
//! listener slots are tombstoned on removal so ids stay stable for the
//! life of the tree.

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;
use strut_core::{ElementTree, Event, Listener, ListenerId, NodeId, SharedTree};

use crate::selector::Selector;

struct NodeState {
    tag: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attributes: IndexMap<String, String>,
}

struct ListenerSlot {
    node: NodeId,
    event: String,
    // None once removed; the slot index is the id and is never reused.
    callback: Option<Listener>,
}

/// In-memory element tree with direct (non-bubbling) event dispatch.
#[derive(Default)]
pub struct InMemoryTree {
    nodes: Vec<NodeState>,
    listeners: Vec<ListenerSlot>,
}

impl InMemoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// New tree behind the shared handle views expect.
    pub fn shared() -> Rc<RefCell<InMemoryTree>> {
        Rc::new(RefCell::new(InMemoryTree::new()))
    }

    fn node(&self, id: NodeId) -> Option<&NodeState> {
        self.nodes.get(id.0 as usize)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut NodeState> {
        self.nodes.get_mut(id.0 as usize)
    }

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.node(id).map(|n| n.tag.as_str())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.node(id)
            .and_then(|n| n.attributes.get(name))
            .map(String::as_str)
    }

    pub fn attribute_count(&self, id: NodeId) -> usize {
        self.node(id).map(|n| n.attributes.len()).unwrap_or(0)
    }

    /// Live subscriptions currently attached to `node`.
    pub fn listener_count(&self, node: NodeId) -> usize {
        self.listeners
            .iter()
            .filter(|slot| slot.node == node && slot.callback.is_some())
            .count()
    }

    /// Live subscriptions across the whole tree.
    pub fn total_listeners(&self) -> usize {
        self.listeners
            .iter()
            .filter(|slot| slot.callback.is_some())
            .count()
    }

    fn unlink(&mut self, child: NodeId) {
        let Some(parent) = self.node(child).and_then(|n| n.parent) else {
            return;
        };
        if let Some(p) = self.node_mut(parent) {
            p.children.retain(|c| *c != child);
        }
        if let Some(c) = self.node_mut(child) {
            c.parent = None;
        }
    }

    fn collect_matches(&self, node: NodeId, selector: &Selector, out: &mut Vec<NodeId>) {
        for &child in self.children(node) {
            if let Some(state) = self.node(child) {
                let id = state.attributes.get("id").map(String::as_str);
                let class = state.attributes.get("class").map(String::as_str);
                if selector.matches(&state.tag, id, class) {
                    out.push(child);
                }
            }
            self.collect_matches(child, selector, out);
        }
    }

    // Snapshot the callbacks for (node, event) so dispatch can run them
    // without holding a borrow on the tree.
    fn collect_listeners(&self, node: NodeId, event: &str) -> Vec<Listener> {
        self.listeners
            .iter()
            .filter(|slot| slot.node == node && slot.event == event)
            .filter_map(|slot| slot.callback.clone())
            .collect()
    }
}

impl ElementTree for InMemoryTree {
    fn create_element(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeState {
            tag: tag.to_string(),
            parent: None,
            children: Vec::new(),
            attributes: IndexMap::new(),
        });
        id
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(state) = self.node_mut(node) {
            state.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if self.node(parent).is_none() || self.node(child).is_none() || parent == child {
            return;
        }
        self.unlink(child);
        if let Some(p) = self.node_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.node_mut(child) {
            c.parent = Some(parent);
        }
    }

    fn detach(&mut self, node: NodeId) {
        self.unlink(node);
    }

    fn query_all(&self, root: NodeId, selector: &str) -> Vec<NodeId> {
        let Some(selector) = Selector::parse(selector) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        self.collect_matches(root, &selector, &mut out);
        out
    }

    fn add_listener(&mut self, node: NodeId, event: &str, listener: Listener) -> ListenerId {
        let id = ListenerId(self.listeners.len() as u64);
        self.listeners.push(ListenerSlot {
            node,
            event: event.to_string(),
            callback: Some(listener),
        });
        id
    }

    fn remove_listener(&mut self, id: ListenerId) {
        if let Some(slot) = self.listeners.get_mut(id.0 as usize) {
            slot.callback = None;
        }
    }
}

/// Fire `event` at `node`, invoking every live subscription in
/// registration order. Returns the number of listeners invoked.
///
/// Callbacks are snapshotted before the first invocation, so handlers
/// may freely re-enter the tree (including removing listeners).
pub fn dispatch(tree: &Rc<RefCell<InMemoryTree>>, node: NodeId, event: &str) -> usize {
    let callbacks = tree.borrow().collect_listeners(node, event);
    if callbacks.is_empty() {
        return 0;
    }
    tracing::debug!("dispatching {event} on {node:?} to {} listeners", callbacks.len());
    let fired = Event::new(event, node);
    for callback in &callbacks {
        callback(&fired);
    }
    callbacks.len()
}

/// Widen a concrete tree handle to the [`SharedTree`] views hold.
pub fn as_shared(tree: &Rc<RefCell<InMemoryTree>>) -> SharedTree {
    tree.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn listener(counter: &Rc<Cell<usize>>) -> Listener {
        let counter = counter.clone();
        Rc::new(move |_event: &Event| counter.set(counter.get() + 1))
    }

    #[test]
    fn append_reparents() {
        let mut tree = InMemoryTree::new();
        let a = tree.create_element("div");
        let b = tree.create_element("div");
        let child = tree.create_element("span");

        tree.append_child(a, child);
        tree.append_child(b, child);

        assert_eq!(tree.children(a), &[]);
        assert_eq!(tree.children(b), &[child]);
        assert_eq!(tree.parent(child), Some(b));
    }

    #[test]
    fn detach_without_parent_is_noop() {
        let mut tree = InMemoryTree::new();
        let node = tree.create_element("div");
        tree.detach(node);
        assert_eq!(tree.parent(node), None);
    }

    #[test]
    fn query_is_document_order() {
        let mut tree = InMemoryTree::new();
        let root = tree.create_element("div");
        let first = tree.create_element("li");
        let nested = tree.create_element("li");
        let last = tree.create_element("li");
        tree.set_attribute(first, "class", "item");
        tree.set_attribute(nested, "class", "item");
        tree.set_attribute(last, "class", "item");
        tree.append_child(root, first);
        tree.append_child(first, nested);
        tree.append_child(root, last);

        assert_eq!(tree.query_all(root, ".item"), vec![first, nested, last]);
    }

    #[test]
    fn query_excludes_the_root() {
        let mut tree = InMemoryTree::new();
        let root = tree.create_element("ul");
        assert_eq!(tree.query_all(root, "ul"), Vec::<NodeId>::new());
    }

    #[test]
    fn malformed_selector_matches_nothing() {
        let mut tree = InMemoryTree::new();
        let root = tree.create_element("div");
        let child = tree.create_element("li");
        tree.append_child(root, child);
        assert!(tree.query_all(root, "ul li").is_empty());
    }

    #[test]
    fn dispatch_hits_only_live_listeners() {
        let tree = InMemoryTree::shared();
        let node = tree.borrow_mut().create_element("button");
        let count = Rc::new(Cell::new(0));

        let first = tree
            .borrow_mut()
            .add_listener(node, "click", listener(&count));
        tree.borrow_mut()
            .add_listener(node, "click", listener(&count));

        assert_eq!(dispatch(&tree, node, "click"), 2);
        assert_eq!(count.get(), 2);

        tree.borrow_mut().remove_listener(first);
        assert_eq!(dispatch(&tree, node, "click"), 1);
        assert_eq!(count.get(), 3);
        assert_eq!(tree.borrow().listener_count(node), 1);
    }

    #[test]
    fn dispatch_matches_event_name() {
        let tree = InMemoryTree::shared();
        let node = tree.borrow_mut().create_element("input");
        let count = Rc::new(Cell::new(0));
        tree.borrow_mut()
            .add_listener(node, "change", listener(&count));

        assert_eq!(dispatch(&tree, node, "click"), 0);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn handlers_may_reenter_the_tree() {
        let tree = InMemoryTree::shared();
        let node = tree.borrow_mut().create_element("div");
        let inner = tree.clone();
        tree.borrow_mut().add_listener(
            node,
            "click",
            Rc::new(move |event: &Event| {
                inner.borrow_mut().detach(event.target);
            }),
        );

        assert_eq!(dispatch(&tree, node, "click"), 1);
    }
}
