//! The attribute tree: ordered attribute sets of nodes with optional nested children.

use std::borrow::Cow;

use indexmap::IndexMap;
use indexmap::map::Iter;

/// The directly renderable value of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderValue {
    /// Text, escaped on output.
    Text(String),
    /// `true` renders as `name='name'`, `false` renders nothing.
    Bool(bool),
}

impl RenderValue {
    /// Returns true if this value produces output.
    pub fn is_rendered(&self) -> bool {
        !matches!(self, RenderValue::Bool(false))
    }

    /// The token this value contributes to an `id`/`class` join, if any.
    pub(crate) fn as_token(&self) -> Option<Cow<'_, str>> {
        match self {
            RenderValue::Text(s) => Some(Cow::Borrowed(s)),
            RenderValue::Bool(true) => Some(Cow::Borrowed("true")),
            RenderValue::Bool(false) => None,
        }
    }
}

impl From<&str> for RenderValue {
    fn from(s: &str) -> Self {
        RenderValue::Text(s.to_owned())
    }
}

impl From<bool> for RenderValue {
    fn from(b: bool) -> Self {
        RenderValue::Bool(b)
    }
}

/// Accumulated state for one attribute name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeNode {
    /// The node's own value, if any.
    pub leaf: Option<RenderValue>,
    /// Nested sub-attributes, flattened as `parent-child` on output.
    pub children: AttributeSet,
}

impl AttributeNode {
    /// A node with only a leaf.
    pub fn leaf(value: impl Into<RenderValue>) -> Self {
        Self {
            leaf: Some(value.into()),
            children: AttributeSet::new(),
        }
    }

    /// Returns true if the node would emit nothing: no rendered leaf and no
    /// children that emit anything.
    pub fn is_empty(&self) -> bool {
        !self.leaf.as_ref().is_some_and(RenderValue::is_rendered)
            && self.children.iter().all(|(_, child)| child.is_empty())
    }
}

/// An ordered mapping from attribute name to node.
///
/// Names keep the slot of their first contribution; later merges into the
/// same name do not move it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeSet {
    nodes: IndexMap<String, AttributeNode>,
}

impl AttributeSet {
    /// Creates an empty attribute set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of slots, including slots whose node emits nothing.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if there are no slots at all.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the node for `name`.
    pub fn get(&self, name: &str) -> Option<&AttributeNode> {
        self.nodes.get(name)
    }

    /// Returns the leaf of `name`, if the node exists and has one.
    pub fn leaf(&self, name: &str) -> Option<&RenderValue> {
        self.nodes.get(name).and_then(|node| node.leaf.as_ref())
    }

    /// Returns the node for `name`, creating an empty one in the next slot.
    pub fn node_mut(&mut self, name: &str) -> &mut AttributeNode {
        let index = match self.nodes.get_index_of(name) {
            Some(index) => index,
            None => self.nodes.insert_full(name.to_owned(), AttributeNode::default()).0,
        };
        &mut self.nodes[index]
    }

    /// Replaces the node for `name`, keeping its slot if it already exists.
    pub fn insert(&mut self, name: impl Into<String>, node: AttributeNode) {
        self.nodes.insert(name.into(), node);
    }

    /// Iterates over the slots in insertion order.
    pub fn iter(&self) -> Iter<'_, String, AttributeNode> {
        self.nodes.iter()
    }

    /// Slot names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }
}

impl<'a> IntoIterator for &'a AttributeSet {
    type Item = (&'a String, &'a AttributeNode);
    type IntoIter = Iter<'a, String, AttributeNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

impl<K: Into<String>> FromIterator<(K, AttributeNode)> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = (K, AttributeNode)>>(iter: I) -> Self {
        Self {
            nodes: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
