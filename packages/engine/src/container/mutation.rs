//! Writes and removals

use indexmap::map::Entry;
use serde_json::Value;

use super::core::PathedContainer;
use super::node::{Children, Node};
use crate::error::{AccessResult, TypeError};
use crate::path::{PathSpec, Segment};

impl PathedContainer {
    /// Write `value` at `path` using the configured force-create default
    ///
    /// # Errors
    ///
    /// See [`PathedContainer::set_with`].
    pub fn set(&mut self, path: impl Into<PathSpec>, value: impl Into<Value>) -> AccessResult<()> {
        self.set_with(path, value, None)
    }

    /// Write `value` at `path`, creating every missing segment
    ///
    /// # Errors
    ///
    /// Never fails for a non-empty path; kept fallible for symmetry with
    /// [`PathedContainer::set_with`].
    pub fn set_forced(
        &mut self,
        path: impl Into<PathSpec>,
        value: impl Into<Value>,
    ) -> AccessResult<()> {
        self.set_with(path, value, Some(true))
    }

    /// Write `value` at `path`
    ///
    /// The value is normalized first. An empty path replaces the whole
    /// addressed tree. Otherwise every segment but the last must resolve to a
    /// container; with `force_create` missing segments become empty containers
    /// and scalars on the way are replaced by empty containers. The last
    /// segment is overwritten, never merged. `None` falls back to the
    /// container's own force-create setting.
    ///
    /// # Errors
    ///
    /// Without force-create, returns `AccessError::Type` when a node on the
    /// way is a scalar and `AccessError::Path` when a segment is missing.
    pub fn set_with(
        &mut self,
        path: impl Into<PathSpec>,
        value: impl Into<Value>,
        force_create: Option<bool>,
    ) -> AccessResult<()> {
        let node = Node::normalize(value.into(), &self.config.delimiters);
        self.set_node_with(path, node, force_create)
    }

    /// Write an already normalized node at `path`
    ///
    /// # Errors
    ///
    /// See [`PathedContainer::set_with`].
    pub fn set_node(&mut self, path: impl Into<PathSpec>, node: Node) -> AccessResult<()> {
        self.set_node_with(path, node, None)
    }

    fn set_node_with(
        &mut self,
        path: impl Into<PathSpec>,
        node: Node,
        force_create: Option<bool>,
    ) -> AccessResult<()> {
        let force = force_create.unwrap_or(self.config.force_create);
        let segments = self.segments(path);
        let full = self.absolute(&segments);

        let Some((last, parents)) = full.split_last() else {
            *self.root.borrow_mut() = node;
            return Ok(());
        };

        let mut root = self.root.borrow_mut();
        let mut current: &mut Node = &mut root;

        for (index, segment) in parents.iter().enumerate() {
            let children = self.addressable(current, force, &full[..index])?;
            current = match children.entry(segment.clone()) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) if force => entry.insert(Node::empty()),
                Entry::Vacant(_) => {
                    let err = self.path_error(parents, index);
                    tracing::debug!(
                        target: "datapath::container",
                        error = %err,
                        "set rejected: missing segment"
                    );
                    return Err(err.into());
                }
            };
        }

        let children = self.addressable(current, force, parents)?;
        children.insert(last.clone(), node);

        tracing::trace!(
            target: "datapath::container",
            path = ?full,
            forced = force,
            "value written"
        );
        Ok(())
    }

    /// Children of `node`, coercing a scalar into an empty container when
    /// forced
    fn addressable<'n>(
        &self,
        node: &'n mut Node,
        force: bool,
        at: &[Segment],
    ) -> AccessResult<&'n mut Children> {
        if node.is_scalar() && !force {
            let relative = at.get(self.base.len()..).unwrap_or(at);
            let err = TypeError::not_addressable(relative, self.main_delimiter());
            tracing::debug!(
                target: "datapath::container",
                error = %err,
                "set rejected: scalar on the way"
            );
            return Err(err.into());
        }
        Ok(node.coerce_container())
    }

    /// Replace the whole addressed tree with normalized `data`
    pub fn set_data(&mut self, data: impl Into<Value>) {
        let node = Node::normalize(data.into(), &self.config.delimiters);
        if self.base.is_empty() {
            *self.root.borrow_mut() = node;
            return;
        }
        let base = self.base.clone();
        let mut root = self.root.borrow_mut();
        root.insert_path(&base, node);
    }

    /// Remove the node at `path`
    ///
    /// Under `AccessPolicy::Strict` a missing parent or a missing last key is
    /// an error; under `AccessPolicy::Silent` it is a no-op. An empty path
    /// empties the addressed tree.
    ///
    /// # Errors
    ///
    /// Returns `AccessError::Path` under the strict policy when the path does
    /// not exist.
    pub fn unset(&mut self, path: impl Into<PathSpec>) -> AccessResult<()> {
        let strict = self.config.access_policy.is_strict();
        let segments = self.segments(path);
        let full = self.absolute(&segments);

        if segments.is_empty() {
            self.set_data(Value::Object(serde_json::Map::new()));
            return Ok(());
        }

        let Some((last, parents)) = full.split_last() else {
            return Ok(());
        };

        let mut root = self.root.borrow_mut();
        let parent = match root.descend_mut(parents) {
            Ok(parent) => parent,
            Err(covered) if strict => return Err(self.path_error(&full, covered).into()),
            Err(_) => return Ok(()),
        };

        let removed = parent
            .as_container_mut()
            .and_then(|children| children.shift_remove(last));

        if removed.is_none() && strict {
            return Err(self.path_error(&full, parents.len()).into());
        }

        tracing::trace!(
            target: "datapath::container",
            path = ?full,
            removed = removed.is_some(),
            "unset"
        );
        Ok(())
    }

    /// Alias of [`PathedContainer::unset`]
    ///
    /// # Errors
    ///
    /// See [`PathedContainer::unset`].
    pub fn remove(&mut self, path: impl Into<PathSpec>) -> AccessResult<()> {
        self.unset(path)
    }
}
