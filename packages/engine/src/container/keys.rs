//! Key listing, leaf counting and iteration

use super::core::PathedContainer;
use super::node::Node;
use crate::path::{Segment, flatten};

impl PathedContainer {
    /// Delimiter-joined keys reachable within `max_depth` levels
    ///
    /// `1` lists the top-level keys, a negative depth is unbounded. Keys of a
    /// sub-tree deeper than `max_depth` are not listed individually.
    ///
    /// ```
    /// use datapath_engine::container::PathedContainer;
    /// use serde_json::json;
    ///
    /// let data = PathedContainer::new(json!({"a": {"b": {"c": 1}}, "d": 2}));
    /// assert_eq!(data.keys(1), vec!["a", "d"]);
    /// assert_eq!(data.keys(2), vec!["a.b", "d"]);
    /// assert_eq!(data.keys(-1), vec!["a.b.c", "d"]);
    /// ```
    #[must_use]
    pub fn keys(&self, max_depth: i32) -> Vec<Segment> {
        let delimiter = self.main_delimiter().to_string();
        self.with_node((), |node| {
            flatten(node, &delimiter, max_depth).into_keys().collect()
        })
        .unwrap_or_default()
    }

    /// Number of scalar leaves in the whole tree
    #[must_use]
    pub fn count(&self) -> usize {
        self.with_node((), Node::leaf_count).unwrap_or(0)
    }

    /// Snapshot of the top-level entries
    ///
    /// A scalar tree yields a single entry keyed `"0"`.
    #[must_use]
    pub fn entries(&self) -> Vec<(Segment, Node)> {
        self.with_node((), |node| match node {
            Node::Container(children) => children
                .iter()
                .map(|(key, child)| (key.clone(), child.clone()))
                .collect(),
            Node::Scalar(_) => vec![("0".to_string(), node.clone())],
        })
        .unwrap_or_default()
    }
}

impl IntoIterator for &PathedContainer {
    type Item = (Segment, Node);
    type IntoIter = std::vec::IntoIter<(Segment, Node)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries().into_iter()
    }
}
