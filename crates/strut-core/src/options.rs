//! Construction options record.
//!
//! An [`Options`] value is a shallow, insertion-ordered map built once
//! at construction time. A fixed set of recognized names is promoted
//! onto the view instance; everything else is kept in the record for
//! the application's own use but never interpreted.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::tree::NodeId;

/// Option names promoted to dedicated slots on a view at construction.
pub const VIEW_OPTIONS: [&str; 7] = [
    "model",
    "collection",
    "element",
    "id",
    "attributes",
    "class_name",
    "tag_name",
];

/// A single construction option value.
///
/// Values carry no typing beyond this enum; downstream consumers
/// interpret them. `Data` holds application objects such as models and
/// collections.
#[derive(Clone)]
pub enum OptionValue {
    Str(String),
    Node(NodeId),
    Attrs(IndexMap<String, String>),
    Data(Rc<dyn Any>),
}

impl OptionValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<NodeId> {
        match self {
            OptionValue::Node(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_attrs(&self) -> Option<&IndexMap<String, String>> {
        match self {
            OptionValue::Attrs(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_data(&self) -> Option<&Rc<dyn Any>> {
        match self {
            OptionValue::Data(d) => Some(d),
            _ => None,
        }
    }

    /// Whether the value counts as present for slot promotion. Only the
    /// empty string is treated as absent.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, OptionValue::Str(s) if s.is_empty())
    }
}

impl fmt::Debug for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Str(s) => f.debug_tuple("Str").field(s).finish(),
            OptionValue::Node(n) => f.debug_tuple("Node").field(n).finish(),
            OptionValue::Attrs(a) => f.debug_tuple("Attrs").field(a).finish(),
            OptionValue::Data(_) => f.write_str("Data(..)"),
        }
    }
}

/// Construction options for a view.
#[derive(Debug, Clone, Default)]
pub struct Options {
    entries: IndexMap<String, OptionValue>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, replacing any previous value for the name.
    pub fn insert(&mut self, name: impl Into<String>, value: OptionValue) {
        self.entries.insert(name.into(), value);
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: OptionValue) -> Self {
        self.insert(name, value);
        self
    }

    pub fn element(self, node: NodeId) -> Self {
        self.with("element", OptionValue::Node(node))
    }

    pub fn model(self, data: Rc<dyn Any>) -> Self {
        self.with("model", OptionValue::Data(data))
    }

    pub fn collection(self, data: Rc<dyn Any>) -> Self {
        self.with("collection", OptionValue::Data(data))
    }

    pub fn id(self, id: &str) -> Self {
        self.with("id", OptionValue::Str(id.to_string()))
    }

    pub fn class_name(self, class: &str) -> Self {
        self.with("class_name", OptionValue::Str(class.to_string()))
    }

    pub fn tag_name(self, tag: &str) -> Self {
        self.with("tag_name", OptionValue::Str(tag.to_string()))
    }

    pub fn attributes(self, attrs: IndexMap<String, String>) -> Self {
        self.with("attributes", OptionValue::Attrs(attrs))
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Shallow one-level merge: `supplied` wins over `defaults` for
    /// overlapping names.
    pub fn merged(defaults: &Options, supplied: Options) -> Options {
        let mut out = defaults.clone();
        for (name, value) in supplied.entries {
            out.entries.insert(name, value);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supplied_wins_over_defaults() {
        let defaults = Options::new().tag_name("ul").class_name("list");
        let supplied = Options::new().tag_name("ol");
        let merged = Options::merged(&defaults, supplied);

        assert_eq!(merged.get("tag_name").and_then(|v| v.as_str()), Some("ol"));
        assert_eq!(
            merged.get("class_name").and_then(|v| v.as_str()),
            Some("list")
        );
    }

    #[test]
    fn unrecognized_names_survive_merge() {
        let merged = Options::merged(
            &Options::new(),
            Options::new().with("highlight", OptionValue::Str("on".into())),
        );
        assert!(merged.contains("highlight"));
    }

    #[test]
    fn empty_string_is_not_truthy() {
        assert!(!OptionValue::Str(String::new()).is_truthy());
        assert!(OptionValue::Str("div".into()).is_truthy());
        assert!(OptionValue::Node(NodeId(3)).is_truthy());
        assert!(OptionValue::Attrs(IndexMap::new()).is_truthy());
    }
}
