//! Element binding: resolving, synthesizing, and swapping the root
//! element of a view.

use indexmap::IndexMap;

use strut_core::{Error, NodeId};

use crate::view::View;

impl View {
    /// The bound element.
    pub fn el(&self) -> NodeId {
        self.inner
            .el
            .get()
            .expect("view has a bound element after construction")
    }

    /// Create a detached element with the given attributes applied in
    /// map order.
    pub fn make(&self, tag: &str, attributes: &IndexMap<String, String>) -> NodeId {
        let mut tree = self.inner.tree.borrow_mut();
        let node = tree.create_element(tag);
        for (name, value) in attributes {
            tree.set_attribute(node, name, value);
        }
        node
    }

    /// Descendants of the bound element matching `selector`.
    pub fn query(&self, selector: &str) -> Vec<NodeId> {
        self.inner.tree.borrow().query_all(self.el(), selector)
    }

    /// Swap the bound element. With `delegate`, the declarative
    /// delegation pass re-runs against the new element; without it,
    /// existing subscriptions are left for the caller to manage (the
    /// constructor-time path, where none exist yet).
    pub fn set_element(&self, node: NodeId, delegate: bool) -> Result<&Self, Error> {
        self.inner.el.set(Some(node));
        if delegate {
            self.delegate_events()?;
        }
        Ok(self)
    }

    /// Detach the bound element from its parent; a no-op when it has
    /// none. Subscriptions stay live; callers reusing the element
    /// elsewhere should call
    /// [`undelegate_events`](View::undelegate_events) first.
    pub fn remove(&self) -> &Self {
        let el = self.el();
        self.inner.tree.borrow_mut().detach(el);
        self
    }

    // Bind the element supplied through options verbatim, or synthesize
    // one from the instance and definition slots. Supplied elements get
    // no attribute injection.
    pub(crate) fn ensure_element(&self) -> Result<(), Error> {
        if let Some(el) = self.inner.el.get() {
            self.set_element(el, false)?;
            return Ok(());
        }

        let definition = &self.inner.definition;
        let mut attrs = self
            .inner
            .attributes
            .borrow()
            .clone()
            .or_else(|| definition.attributes().cloned())
            .unwrap_or_default();
        if let Some(id) = self
            .inner
            .id
            .borrow()
            .clone()
            .or_else(|| definition.id().map(str::to_string))
        {
            attrs.insert("id".to_string(), id);
        }
        if let Some(class) = self
            .inner
            .class_name
            .borrow()
            .clone()
            .or_else(|| definition.class_name().map(str::to_string))
        {
            attrs.insert("class".to_string(), class);
        }
        let tag = self
            .inner
            .tag_name
            .borrow()
            .clone()
            .or_else(|| definition.tag_name().map(str::to_string))
            .unwrap_or_else(|| "div".to_string());

        tracing::trace!("synthesizing <{tag}> for {}", self.cid());
        let el = self.make(&tag, &attrs);
        self.set_element(el, false)?;
        Ok(())
    }
}
