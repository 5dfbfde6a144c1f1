//! Tree nodes
//!
//! A [`Node`] is either an opaque scalar or an insertion-ordered container of
//! child nodes. Lists are stored as containers keyed by their decimal index.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::path::tokenize;

/// Children of a container node
pub type Children = IndexMap<String, Node>;

/// Node of a pathed data tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// Leaf value, never an object or an array once normalized
    Scalar(Value),
    /// Insertion-ordered mapping from segment to child
    Container(Children),
}

impl Default for Node {
    fn default() -> Self {
        Node::empty()
    }
}

impl Node {
    /// Empty container
    #[must_use]
    pub fn empty() -> Self {
        Node::Container(IndexMap::new())
    }

    pub fn scalar(value: impl Into<Value>) -> Self {
        Node::Scalar(value.into())
    }

    /// Deep-normalize raw data into a node tree
    ///
    /// Mapping keys containing any of `delimiters` are expanded into nested
    /// containers (`{"a.b": 1}` becomes `{"a": {"b": 1}}`), lists become
    /// containers keyed by index. A later key overwrites whatever an earlier
    /// key stored at the same path.
    #[must_use]
    pub fn normalize(value: Value, delimiters: &[String]) -> Self {
        match value {
            Value::Object(map) => {
                let mut root = Node::empty();
                for (key, child) in map {
                    let mut segments = tokenize(key.as_str(), delimiters);
                    if segments.is_empty() {
                        segments.push(key);
                    }
                    root.insert_path(&segments, Node::normalize(child, delimiters));
                }
                root
            }
            Value::Array(items) => Node::Container(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(index, item)| (index.to_string(), Node::normalize(item, delimiters)))
                    .collect(),
            ),
            scalar => Node::Scalar(scalar),
        }
    }

    /// Write `node` at `segments` below `self`, creating containers on the way
    pub(crate) fn insert_path(&mut self, segments: &[String], node: Node) {
        let Some((last, parents)) = segments.split_last() else {
            *self = node;
            return;
        };

        let mut current = self;
        for segment in parents {
            current = current
                .coerce_container()
                .entry(segment.clone())
                .or_insert_with(Node::empty);
        }
        current.coerce_container().insert(last.clone(), node);
    }

    /// Turn a scalar into an empty container and return the children
    pub(crate) fn coerce_container(&mut self) -> &mut Children {
        match self {
            Node::Container(children) => children,
            Node::Scalar(_) => {
                *self = Node::empty();
                self.coerce_container()
            }
        }
    }

    #[inline]
    #[must_use]
    pub fn is_container(&self) -> bool {
        matches!(self, Node::Container(_))
    }

    #[inline]
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        matches!(self, Node::Scalar(_))
    }

    #[must_use]
    pub fn as_scalar(&self) -> Option<&Value> {
        match self {
            Node::Scalar(value) => Some(value),
            Node::Container(_) => None,
        }
    }

    #[must_use]
    pub fn as_container(&self) -> Option<&Children> {
        match self {
            Node::Container(children) => Some(children),
            Node::Scalar(_) => None,
        }
    }

    pub fn as_container_mut(&mut self) -> Option<&mut Children> {
        match self {
            Node::Container(children) => Some(children),
            Node::Scalar(_) => None,
        }
    }

    /// Direct child by segment
    #[must_use]
    pub fn child(&self, segment: &str) -> Option<&Node> {
        self.as_container()?.get(segment)
    }

    /// Descend through `segments`
    ///
    /// Returns the number of segments consumed when traversal stops early.
    pub fn descend(&self, segments: &[String]) -> Result<&Node, usize> {
        let mut current = self;
        for (covered, segment) in segments.iter().enumerate() {
            current = current.child(segment).ok_or(covered)?;
        }
        Ok(current)
    }

    /// Mutable variant of [`Node::descend`]
    pub fn descend_mut(&mut self, segments: &[String]) -> Result<&mut Node, usize> {
        let mut current = self;
        for (covered, segment) in segments.iter().enumerate() {
            current = match current {
                Node::Container(children) => children.get_mut(segment).ok_or(covered)?,
                Node::Scalar(_) => return Err(covered),
            };
        }
        Ok(current)
    }

    /// Number of scalar leaves in the tree
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            Node::Scalar(_) => 1,
            Node::Container(children) => children.values().map(Node::leaf_count).sum(),
        }
    }

    /// Render the tree as plain JSON
    ///
    /// A container keyed exactly `"0".."n-1"` in order renders as an array,
    /// any other container (including an empty one) as an object.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Node::Scalar(value) => value.clone(),
            Node::Container(children) if is_sequential(children) => {
                Value::Array(children.values().map(Node::to_value).collect())
            }
            Node::Container(children) => Value::Object(
                children
                    .iter()
                    .map(|(key, child)| (key.clone(), child.to_value()))
                    .collect::<Map<String, Value>>(),
            ),
        }
    }
}

fn is_sequential(children: &Children) -> bool {
    !children.is_empty()
        && children
            .keys()
            .enumerate()
            .all(|(index, key)| *key == index.to_string())
}

/// Structural conversion, keys are never split
impl From<Value> for Node {
    fn from(value: Value) -> Self {
        Node::normalize(value, &[])
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        node.to_value()
    }
}

impl From<&Node> for Value {
    fn from(node: &Node) -> Self {
        node.to_value()
    }
}

impl PartialEq<Value> for Node {
    fn eq(&self, other: &Value) -> bool {
        self.to_value() == *other
    }
}
