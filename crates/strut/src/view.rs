//! The view: one definition instance bound to one host-tree element.
//!
//! `View` is a cheap-clone handle (`Rc` inside); handlers, the host
//! tree, and application code can all hold one without ownership
//! ceremony. Construction follows a fixed protocol: assign a `cid`,
//! merge options, ensure an element, run `initialize`, delegate events.
//! Raw subscriptions fire strictly after construction completes, so a
//! handler can always assume a fully initialized view.

use std::any::Any;
use std::cell::{Cell, Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use strut_core::{
    unique_id, EmitterCallback, EmitterHandle, Error, EventEmitter, NodeId, Options, SharedTree,
    VIEW_OPTIONS,
};

use crate::definition::Definition;
use crate::delegate::Subscription;

pub(crate) struct ViewInner {
    pub(crate) cid: String,
    pub(crate) definition: Definition,
    pub(crate) tree: SharedTree,
    pub(crate) emitter: Rc<dyn EventEmitter>,
    pub(crate) el: Cell<Option<NodeId>>,
    pub(crate) options: RefCell<Options>,
    pub(crate) model: RefCell<Option<Rc<dyn Any>>>,
    pub(crate) collection: RefCell<Option<Rc<dyn Any>>>,
    pub(crate) id: RefCell<Option<String>>,
    pub(crate) class_name: RefCell<Option<String>>,
    pub(crate) tag_name: RefCell<Option<String>>,
    pub(crate) attributes: RefCell<Option<IndexMap<String, String>>>,
    pub(crate) subscriptions: RefCell<Vec<Subscription>>,
}

/// A constructed view. Clones share the instance.
#[derive(Clone)]
pub struct View {
    pub(crate) inner: Rc<ViewInner>,
}

impl fmt::Debug for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("View")
            .field("cid", &self.inner.cid)
            .field("el", &self.inner.el.get())
            .finish_non_exhaustive()
    }
}

/// The standard construction protocol, in its fixed order. Definitions
/// without a custom entry point all come through here.
pub(crate) fn default_construct(
    definition: &Definition,
    tree: &SharedTree,
    emitter: Rc<dyn EventEmitter>,
    options: Options,
) -> Result<View, Error> {
    let view = View {
        inner: Rc::new(ViewInner {
            cid: unique_id("view"),
            definition: definition.clone(),
            tree: tree.clone(),
            emitter,
            el: Cell::new(None),
            options: RefCell::new(Options::new()),
            model: RefCell::new(None),
            collection: RefCell::new(None),
            id: RefCell::new(None),
            class_name: RefCell::new(None),
            tag_name: RefCell::new(None),
            attributes: RefCell::new(None),
            subscriptions: RefCell::new(Vec::new()),
        }),
    };
    let supplied = options.clone();
    view.configure(options);
    view.ensure_element()?;
    if let Some(initialize) = definition.initialize_fn() {
        initialize(&view, &supplied);
    }
    view.delegate_events()?;
    Ok(view)
}

impl View {
    /// Process-unique instance identifier, stable for the instance
    /// lifetime.
    pub fn cid(&self) -> &str {
        &self.inner.cid
    }

    pub fn definition(&self) -> &Definition {
        &self.inner.definition
    }

    pub fn tree(&self) -> SharedTree {
        self.inner.tree.clone()
    }

    /// The full merged options record, unrecognized names included.
    pub fn options(&self) -> Ref<'_, Options> {
        self.inner.options.borrow()
    }

    pub fn model(&self) -> Option<Rc<dyn Any>> {
        self.inner.model.borrow().clone()
    }

    pub fn collection(&self) -> Option<Rc<dyn Any>> {
        self.inner.collection.borrow().clone()
    }

    pub fn id(&self) -> Option<String> {
        self.inner.id.borrow().clone()
    }

    pub fn class_name(&self) -> Option<String> {
        self.inner.class_name.borrow().clone()
    }

    pub fn tag_name(&self) -> Option<String> {
        self.inner.tag_name.borrow().clone()
    }

    /// Snapshot of the live subscription records, in attachment order.
    pub fn subscriptions(&self) -> Vec<Subscription> {
        self.inner.subscriptions.borrow().clone()
    }

    /// Run the definition's `render` hook, if any. Chainable either
    /// way.
    pub fn render(&self) -> &Self {
        if let Some(render) = self.inner.definition.render_fn() {
            render(self);
        }
        self
    }

    /// Subscribe on the composed emitter capability.
    pub fn on(&self, event: &str, callback: EmitterCallback) -> EmitterHandle {
        self.inner.emitter.on(event, callback)
    }

    /// Unsubscribe from the composed emitter capability.
    pub fn off(&self, handle: EmitterHandle) {
        self.inner.emitter.off(handle)
    }

    /// Fire an event on the composed emitter capability.
    pub fn trigger(&self, event: &str) {
        self.inner.emitter.trigger(event)
    }

    // Merge definition defaults with caller options (caller wins),
    // promote recognized truthy names onto the instance, and store the
    // full record. One level deep, no type validation.
    pub(crate) fn configure(&self, supplied: Options) {
        let merged = Options::merged(self.inner.definition.defaults(), supplied);
        for name in VIEW_OPTIONS {
            let Some(value) = merged.get(name) else {
                continue;
            };
            if !value.is_truthy() {
                continue;
            }
            match name {
                "model" => {
                    if let Some(data) = value.as_data() {
                        *self.inner.model.borrow_mut() = Some(data.clone());
                    }
                }
                "collection" => {
                    if let Some(data) = value.as_data() {
                        *self.inner.collection.borrow_mut() = Some(data.clone());
                    }
                }
                "element" => {
                    if let Some(node) = value.as_node() {
                        self.inner.el.set(Some(node));
                    }
                }
                "id" => {
                    if let Some(id) = value.as_str() {
                        *self.inner.id.borrow_mut() = Some(id.to_string());
                    }
                }
                "attributes" => {
                    if let Some(attrs) = value.as_attrs() {
                        *self.inner.attributes.borrow_mut() = Some(attrs.clone());
                    }
                }
                "class_name" => {
                    if let Some(class) = value.as_str() {
                        *self.inner.class_name.borrow_mut() = Some(class.to_string());
                    }
                }
                "tag_name" => {
                    if let Some(tag) = value.as_str() {
                        *self.inner.tag_name.borrow_mut() = Some(tag.to_string());
                    }
                }
                _ => {}
            }
        }
        *self.inner.options.borrow_mut() = merged;
    }
}
