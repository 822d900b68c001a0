//! View definitions and the extension mechanism.
//!
//! A [`Definition`] is a blueprint: the named behaviors, declarative
//! event map, element-synthesis slots, and option defaults that every
//! view built from it shares. [`Definition::extend`] derives a new
//! definition by merging overrides on top of the base. Member
//! resolution happens here, eagerly, so instances never walk a chain at
//! runtime; the parent reference survives only for manual super-style
//! lookups.
//!
//! Extending never constructs anything: no hook runs, no element is
//! touched, no instance exists until [`Definition::build`].

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use strut_core::{Error, Event, EventEmitter, NullEmitter, Options, SharedTree};

use crate::delegate::{EventMap, EventsDecl};
use crate::view::{default_construct, View};

/// Instance behavior invoked with the view itself and the firing event.
pub type Method = Rc<dyn Fn(&View, &Event)>;

/// The `initialize` hook. Runs once per construction, after the element
/// is bound and before delegation; receives the caller's original
/// (pre-merge) options.
pub type InitFn = Rc<dyn Fn(&View, &Options)>;

/// The `render` hook. Default is a no-op; [`View::render`] returns the
/// view either way so calls chain.
pub type RenderFn = Rc<dyn Fn(&View)>;

/// Construction entry point of a definition. The default one runs the
/// fixed protocol: configure options, ensure an element, `initialize`,
/// delegate events.
pub type ConstructFn =
    Rc<dyn Fn(&Definition, &SharedTree, Rc<dyn EventEmitter>, Options) -> Result<View, Error>>;

struct DefinitionInner {
    construct: ConstructFn,
    methods: HashMap<String, Method>,
    statics: HashMap<String, Rc<dyn Any>>,
    events: EventsDecl,
    tag_name: Option<String>,
    id: Option<String>,
    class_name: Option<String>,
    attributes: Option<IndexMap<String, String>>,
    defaults: Options,
    initialize: Option<InitFn>,
    render: Option<RenderFn>,
    parent: Option<Definition>,
}

/// A view blueprint. Clones share the definition.
#[derive(Clone)]
pub struct Definition {
    inner: Rc<DefinitionInner>,
}

impl fmt::Debug for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Definition")
            .field("methods", &self.inner.methods.len())
            .field("statics", &self.inner.statics.len())
            .field("tag_name", &self.inner.tag_name)
            .finish_non_exhaustive()
    }
}

impl Definition {
    /// The root definition: a plain `div` with no behaviors and no
    /// parent. Every view type descends from this.
    pub fn base() -> Definition {
        Definition {
            inner: Rc::new(DefinitionInner {
                construct: Self::standard_construct(),
                methods: HashMap::new(),
                statics: HashMap::new(),
                events: EventsDecl::None,
                tag_name: Some("div".to_string()),
                id: None,
                class_name: None,
                attributes: None,
                defaults: Options::new(),
                initialize: None,
                render: None,
                parent: None,
            }),
        }
    }

    /// Derive a new definition from this one.
    ///
    /// Overridden members replace the base's wholesale; everything not
    /// overridden is inherited. Static members are copied from the base
    /// first, then the overrides win. A custom construct fn is used
    /// verbatim when supplied, otherwise the base's entry point is
    /// shared. The result keeps a parent reference to `self` and can be
    /// extended again, to arbitrary depth.
    pub fn extend(&self, overrides: Overrides) -> Definition {
        let base = &self.inner;
        let mut methods = base.methods.clone();
        methods.extend(overrides.methods);
        let mut statics = base.statics.clone();
        statics.extend(overrides.statics);
        Definition {
            inner: Rc::new(DefinitionInner {
                construct: overrides.construct.unwrap_or_else(|| base.construct.clone()),
                methods,
                statics,
                events: overrides.events.unwrap_or_else(|| base.events.clone()),
                tag_name: overrides.tag_name.or_else(|| base.tag_name.clone()),
                id: overrides.id.or_else(|| base.id.clone()),
                class_name: overrides.class_name.or_else(|| base.class_name.clone()),
                attributes: overrides.attributes.or_else(|| base.attributes.clone()),
                defaults: Options::merged(&base.defaults, overrides.defaults),
                initialize: overrides.initialize.or_else(|| base.initialize.clone()),
                render: overrides.render.or_else(|| base.render.clone()),
                parent: Some(self.clone()),
            }),
        }
    }

    /// Whether two handles name the same definition.
    pub fn ptr_eq(this: &Definition, other: &Definition) -> bool {
        Rc::ptr_eq(&this.inner, &other.inner)
    }

    /// The standard construction entry point, for custom entry points
    /// that wrap it.
    pub fn standard_construct() -> ConstructFn {
        Rc::new(default_construct)
    }

    /// Construct a view with the default (null) emitter capability.
    pub fn build(&self, tree: &SharedTree, options: Options) -> Result<View, Error> {
        self.build_with(tree, Rc::new(NullEmitter), options)
    }

    /// Construct a view composing with the given emitter capability.
    pub fn build_with(
        &self,
        tree: &SharedTree,
        emitter: Rc<dyn EventEmitter>,
        options: Options,
    ) -> Result<View, Error> {
        let construct = self.inner.construct.clone();
        construct(self, tree, emitter, options)
    }

    /// Look up a named instance behavior on the merged member set.
    pub fn method(&self, name: &str) -> Option<Method> {
        self.inner.methods.get(name).cloned()
    }

    /// Look up a named behavior on the parent's member set, for manual
    /// super-style calls from an overriding method.
    pub fn super_method(&self, name: &str) -> Option<Method> {
        self.inner
            .parent
            .as_ref()
            .and_then(|parent| parent.method(name))
    }

    /// Look up a definition-level (static) member.
    pub fn static_member(&self, name: &str) -> Option<Rc<dyn Any>> {
        self.inner.statics.get(name).cloned()
    }

    pub fn parent(&self) -> Option<&Definition> {
        self.inner.parent.as_ref()
    }

    pub fn defaults(&self) -> &Options {
        &self.inner.defaults
    }

    pub(crate) fn events(&self) -> &EventsDecl {
        &self.inner.events
    }

    pub(crate) fn tag_name(&self) -> Option<&str> {
        self.inner.tag_name.as_deref()
    }

    pub(crate) fn id(&self) -> Option<&str> {
        self.inner.id.as_deref()
    }

    pub(crate) fn class_name(&self) -> Option<&str> {
        self.inner.class_name.as_deref()
    }

    pub(crate) fn attributes(&self) -> Option<&IndexMap<String, String>> {
        self.inner.attributes.as_ref()
    }

    pub(crate) fn initialize_fn(&self) -> Option<InitFn> {
        self.inner.initialize.clone()
    }

    pub(crate) fn render_fn(&self) -> Option<RenderFn> {
        self.inner.render.clone()
    }
}

/// Builder for the members a derived definition overrides or adds.
#[derive(Default)]
pub struct Overrides {
    construct: Option<ConstructFn>,
    methods: HashMap<String, Method>,
    statics: HashMap<String, Rc<dyn Any>>,
    events: Option<EventsDecl>,
    tag_name: Option<String>,
    id: Option<String>,
    class_name: Option<String>,
    attributes: Option<IndexMap<String, String>>,
    defaults: Options,
    initialize: Option<InitFn>,
    render: Option<RenderFn>,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a named instance behavior.
    pub fn method(mut self, name: &str, handler: impl Fn(&View, &Event) + 'static) -> Self {
        self.methods.insert(name.to_string(), Rc::new(handler));
        self
    }

    /// Add or replace a definition-level (static) member.
    pub fn static_member<T: Any>(mut self, name: &str, value: T) -> Self {
        self.statics.insert(name.to_string(), Rc::new(value));
        self
    }

    /// Declare a fixed event map.
    pub fn events(mut self, map: EventMap) -> Self {
        self.events = Some(EventsDecl::Map(map));
        self
    }

    /// Declare the event map as a factory resolved at each delegation
    /// pass.
    pub fn events_fn(mut self, factory: impl Fn() -> EventMap + 'static) -> Self {
        self.events = Some(EventsDecl::Factory(Rc::new(factory)));
        self
    }

    pub fn tag_name(mut self, tag: &str) -> Self {
        self.tag_name = Some(tag.to_string());
        self
    }

    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn class_name(mut self, class: &str) -> Self {
        self.class_name = Some(class.to_string());
        self
    }

    /// Add one synthesis attribute, keeping previously added ones.
    pub fn attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes
            .get_or_insert_with(IndexMap::new)
            .insert(name.to_string(), value.to_string());
        self
    }

    /// Replace the synthesis attribute map wholesale.
    pub fn attributes(mut self, attrs: IndexMap<String, String>) -> Self {
        self.attributes = Some(attrs);
        self
    }

    /// Option defaults merged under caller-supplied options at
    /// construction.
    pub fn defaults(mut self, options: Options) -> Self {
        self.defaults = options;
        self
    }

    pub fn initialize(mut self, hook: impl Fn(&View, &Options) + 'static) -> Self {
        self.initialize = Some(Rc::new(hook));
        self
    }

    pub fn render(mut self, hook: impl Fn(&View) + 'static) -> Self {
        self.render = Some(Rc::new(hook));
        self
    }

    /// Replace the construction entry point. The replacement is used
    /// verbatim; it is responsible for whatever parts of the standard
    /// protocol it still wants.
    pub fn construct(
        mut self,
        f: impl Fn(&Definition, &SharedTree, Rc<dyn EventEmitter>, Options) -> Result<View, Error>
        + 'static,
    ) -> Self {
        self.construct = Some(Rc::new(f));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn members_are_inherited_and_overridable() {
        let base = Definition::base().extend(
            Overrides::new()
                .tag_name("ul")
                .method("on_select", |_view, _event| {}),
        );
        let child = base.extend(Overrides::new().class_name("fancy"));

        assert_eq!(child.tag_name(), Some("ul"));
        assert_eq!(child.class_name(), Some("fancy"));
        assert!(child.method("on_select").is_some());
        assert!(child.method("missing").is_none());
    }

    #[test]
    fn statics_copy_then_override() {
        let base = Definition::base().extend(
            Overrides::new()
                .static_member("version", 1_u32)
                .static_member("label", "base"),
        );
        let child = base.extend(Overrides::new().static_member("version", 2_u32));

        let version = child.static_member("version").unwrap();
        assert_eq!(version.downcast_ref::<u32>(), Some(&2));
        let label = child.static_member("label").unwrap();
        assert_eq!(label.downcast_ref::<&str>(), Some(&"base"));
    }

    #[test]
    fn parent_reference_tracks_the_base() {
        let base = Definition::base();
        let child = base.extend(Overrides::new());
        let grandchild = child.extend(Overrides::new());

        assert!(base.parent().is_none());
        assert!(Definition::ptr_eq(grandchild.parent().unwrap(), &child));
    }

    #[test]
    fn super_method_resolves_against_the_parent() {
        let base =
            Definition::base().extend(Overrides::new().method("on_select", |_view, _event| {}));
        let child = base.extend(Overrides::new().method("on_select", |_view, _event| {}));

        assert!(child.super_method("on_select").is_some());
        assert!(base.super_method("on_select").is_none());
    }

    #[test]
    fn defaults_merge_with_child_precedence() {
        let base = Definition::base()
            .extend(Overrides::new().defaults(Options::new().class_name("list").id("root")));
        let child = base.extend(Overrides::new().defaults(Options::new().class_name("grid")));

        let defaults = child.defaults();
        assert_eq!(
            defaults.get("class_name").and_then(|v| v.as_str()),
            Some("grid")
        );
        assert_eq!(defaults.get("id").and_then(|v| v.as_str()), Some("root"));
    }
}
