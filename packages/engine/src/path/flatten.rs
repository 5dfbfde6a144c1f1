//! Flattening primitives
//!
//! `flatten_values` turns a nested list into one flat ordered sequence and
//! `flatten` turns a node tree into a single-level mapping keyed by
//! delimiter-joined paths.

use indexmap::IndexMap;
use serde_json::Value;

use super::spec::PathSpec;
use crate::container::Node;

/// Values that may hold an ordered list of children of their own type
pub trait Nested: Sized {
    /// Child items when the value is a list
    fn children(&self) -> Option<&[Self]>;
}

impl Nested for PathSpec {
    fn children(&self) -> Option<&[Self]> {
        match self {
            PathSpec::List(items) => Some(items),
            _ => None,
        }
    }
}

impl Nested for Value {
    fn children(&self) -> Option<&[Self]> {
        self.as_array().map(Vec::as_slice)
    }
}

/// Flatten nested lists left to right
///
/// `max_depth` bounds how many list levels are opened: `0` keeps every item
/// as is, a negative depth opens every level.
///
/// # Examples
/// ```
/// use datapath_engine::path::flatten_values;
/// use serde_json::json;
///
/// let flat = flatten_values(&[json!(1), json!([2, [3, 4]])], -1);
/// assert_eq!(flat, vec![json!(1), json!(2), json!(3), json!(4)]);
/// ```
pub fn flatten_values<T: Nested + Clone>(source: &[T], max_depth: i32) -> Vec<T> {
    let mut out = Vec::with_capacity(source.len());
    flatten_values_into(source, max_depth, &mut out);
    out
}

fn flatten_values_into<T: Nested + Clone>(source: &[T], max_depth: i32, out: &mut Vec<T>) {
    let next_depth = if max_depth < 0 { -1 } else { max_depth - 1 };

    for item in source {
        match item.children() {
            Some(children) if max_depth != 0 => flatten_values_into(children, next_depth, out),
            _ => out.push(item.clone()),
        }
    }
}

/// Flatten a node tree into delimiter-joined keys
///
/// `max_depth == 1` returns the top-level entries untouched, `0` returns
/// nothing, a negative depth is unbounded. Empty containers are kept as
/// leaves under their own key. A scalar root has no keys.
pub fn flatten(tree: &Node, delimiter: &str, max_depth: i32) -> IndexMap<String, Node> {
    let mut out = IndexMap::new();

    let Some(entries) = tree.as_container() else {
        return out;
    };

    if max_depth == 1 {
        out.extend(entries.iter().map(|(k, v)| (k.clone(), v.clone())));
        return out;
    }

    flatten_into(entries, delimiter, max_depth, "", &mut out);
    out
}

fn flatten_into(
    entries: &IndexMap<String, Node>,
    delimiter: &str,
    max_depth: i32,
    prefix: &str,
    out: &mut IndexMap<String, Node>,
) {
    if max_depth == 0 {
        return;
    }

    let next_depth = if max_depth < 0 { -1 } else { max_depth - 1 };

    for (key, value) in entries {
        let full_key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}{delimiter}{key}")
        };

        match value.as_container() {
            Some(children) if next_depth != 0 && !children.is_empty() => {
                flatten_into(children, delimiter, next_depth, &full_key, out);
            }
            _ => {
                out.insert(full_key, value.clone());
            }
        }
    }
}
