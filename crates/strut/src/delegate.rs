//! Declarative event delegation.
//!
//! Translates an insertion-ordered map of `"event selector"` keys into
//! live host-tree subscriptions and tracks every one it creates, so a
//! pass is fully reversible. Invariants:
//!
//! - re-delegating never stacks subscriptions; each pass undelegates
//!   its predecessor first
//! - a named handler is resolved before the tree is touched for its
//!   key; keys already processed in the same pass stay attached
//! - attachment order is declaration order, then document order of the
//!   selector matches, taken as a static snapshot at delegation time

use std::rc::Rc;

use indexmap::IndexMap;

use strut_core::{Error, Event, EventKey, Listener, ListenerId, NodeId};

use crate::definition::Method;
use crate::view::View;

/// A handler slot in a declarative event map: an inline closure, or the
/// name of a definition method resolved at delegation time.
#[derive(Clone)]
pub enum HandlerSpec {
    Inline(Method),
    Named(String),
}

/// Declarative `"event selector"` → handler map. Iteration follows
/// insertion order.
#[derive(Clone, Default)]
pub struct EventMap {
    entries: IndexMap<String, HandlerSpec>,
}

impl EventMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `key` to a named definition method.
    pub fn on(mut self, key: &str, method: &str) -> Self {
        self.entries
            .insert(key.to_string(), HandlerSpec::Named(method.to_string()));
        self
    }

    /// Bind `key` to an inline handler.
    pub fn on_fn(mut self, key: &str, handler: impl Fn(&View, &Event) + 'static) -> Self {
        self.entries
            .insert(key.to_string(), HandlerSpec::Inline(Rc::new(handler)));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HandlerSpec)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// How a definition declares its event map: not at all, as a fixed map,
/// or as a factory re-resolved at every delegation pass.
#[derive(Clone)]
pub enum EventsDecl {
    None,
    Map(EventMap),
    Factory(Rc<dyn Fn() -> EventMap>),
}

impl EventsDecl {
    pub(crate) fn resolve(&self) -> Option<EventMap> {
        match self {
            EventsDecl::None => None,
            EventsDecl::Map(map) => Some(map.clone()),
            EventsDecl::Factory(factory) => Some(factory()),
        }
    }
}

/// One live host-tree subscription created by a delegation pass.
#[derive(Debug, Clone)]
pub struct Subscription {
    node: NodeId,
    event: String,
    key: String,
    listener: ListenerId,
}

impl Subscription {
    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn event(&self) -> &str {
        &self.event
    }

    /// The declarative key this subscription came from.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn listener(&self) -> ListenerId {
        self.listener
    }
}

impl View {
    /// Run delegation against the definition's events declaration.
    /// Absent declaration is a no-op.
    pub fn delegate_events(&self) -> Result<&Self, Error> {
        match self.definition().events().resolve() {
            Some(map) => self.delegate(&map),
            None => Ok(self),
        }
    }

    /// Translate `map` into live subscriptions on the bound element and
    /// its matching descendants.
    pub fn delegate(&self, map: &EventMap) -> Result<&Self, Error> {
        if map.is_empty() {
            return Ok(self);
        }
        self.undelegate_events();
        let root = self.el();
        for (key, spec) in map.iter() {
            let Some(parsed) = EventKey::parse(key) else {
                continue;
            };
            let method = self.resolve_handler(key, spec)?;
            let bound = self.bind(method);
            if parsed.selector.is_empty() {
                self.attach(root, &parsed.event, key, bound);
            } else {
                let matched = self.inner.tree.borrow().query_all(root, &parsed.selector);
                for node in matched {
                    self.attach(node, &parsed.event, key, bound.clone());
                }
            }
        }
        tracing::debug!(
            "delegated {} subscriptions for {}",
            self.inner.subscriptions.borrow().len(),
            self.cid()
        );
        Ok(self)
    }

    /// Remove every tracked subscription and clear the list. No-op when
    /// the list is already empty.
    pub fn undelegate_events(&self) -> &Self {
        let subscriptions = std::mem::take(&mut *self.inner.subscriptions.borrow_mut());
        if subscriptions.is_empty() {
            return self;
        }
        tracing::debug!(
            "undelegating {} subscriptions for {}",
            subscriptions.len(),
            self.cid()
        );
        let mut tree = self.inner.tree.borrow_mut();
        for subscription in subscriptions {
            tree.remove_listener(subscription.listener);
        }
        self
    }

    fn resolve_handler(&self, key: &str, spec: &HandlerSpec) -> Result<Method, Error> {
        match spec {
            HandlerSpec::Inline(method) => Ok(method.clone()),
            HandlerSpec::Named(name) => {
                self.definition()
                    .method(name)
                    .ok_or_else(|| Error::HandlerNotFound {
                        key: key.to_string(),
                        method: name.clone(),
                    })
            }
        }
    }

    // `this` inside a handler is the view. Weak, because a subscription
    // left on the tree must not keep a dropped view alive.
    fn bind(&self, method: Method) -> Listener {
        let weak = Rc::downgrade(&self.inner);
        Rc::new(move |event: &Event| {
            if let Some(inner) = weak.upgrade() {
                method(&View { inner }, event);
            }
        })
    }

    fn attach(&self, node: NodeId, event: &str, key: &str, listener: Listener) {
        let id = self
            .inner
            .tree
            .borrow_mut()
            .add_listener(node, event, listener);
        self.inner.subscriptions.borrow_mut().push(Subscription {
            node,
            event: event.to_string(),
            key: key.to_string(),
            listener: id,
        });
    }
}
