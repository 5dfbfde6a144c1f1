//! Core `PathedContainer` structure, construction and lookups
//!
//! The container owns its tree behind a shared cell so that views taken with
//! [`PathedContainer::view`] alias the parent's node instead of copying it.
//! A view is the shared root plus a base path; every operation on the view
//! resolves `base ++ path` against the shared tree.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;

use super::node::Node;
use crate::config::{AccessPolicy, ConfigResult, ContainerConfig, Validator};
use crate::error::{AccessResult, PathError};
use crate::path::{PathSpec, Segment, tokenize};

/// Hierarchical data addressed by delimited path keys
///
/// ```
/// use datapath_engine::container::PathedContainer;
/// use serde_json::json;
///
/// let mut data = PathedContainer::new(json!({"db": {"host": "localhost"}}));
/// assert_eq!(data.get_value("db.host"), Some(json!("localhost")));
///
/// data.set_forced("db.pool.size", 8).unwrap();
/// assert_eq!(data.to_value(), json!({"db": {"host": "localhost", "pool": {"size": 8}}}));
/// ```
///
/// Not `Send`: callers sharing a container across threads must serialize
/// access themselves.
pub struct PathedContainer {
    pub(super) root: Rc<RefCell<Node>>,
    pub(super) base: Vec<Segment>,
    pub(super) config: ContainerConfig,
}

impl Default for PathedContainer {
    fn default() -> Self {
        Self::from_node(Node::empty(), ContainerConfig::default())
    }
}

/// Cloning detaches: the copy owns a deep copy of the addressed subtree
impl Clone for PathedContainer {
    fn clone(&self) -> Self {
        Self::from_node(self.data(), self.config.clone())
    }
}

impl std::fmt::Debug for PathedContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathedContainer")
            .field("base", &self.base)
            .field("config", &self.config)
            .field("data", &self.to_value())
            .finish()
    }
}

impl PathedContainer {
    /// Container with the default configuration (`"."` delimiter, strict)
    pub fn new(data: impl Into<Value>) -> Self {
        let config = ContainerConfig::default();
        let node = Node::normalize(data.into(), &config.delimiters);
        Self::from_node(node, config)
    }

    /// Container with an explicit configuration
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` if the delimiter set is invalid.
    pub fn with_config(data: impl Into<Value>, config: ContainerConfig) -> ConfigResult<Self> {
        config.validate()?;
        let node = Node::normalize(data.into(), &config.delimiters);
        Ok(Self::from_node(node, config))
    }

    /// Container with a custom delimiter set and default policy
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` if the delimiter set is invalid.
    pub fn with_delimiters<I, S>(data: impl Into<Value>, delimiters: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_config(data, ContainerConfig::default().with_delimiters(delimiters))
    }

    /// Wrap an already normalized tree without re-normalizing it
    #[must_use]
    pub fn from_node(node: Node, config: ContainerConfig) -> Self {
        Self {
            root: Rc::new(RefCell::new(node)),
            base: Vec::new(),
            config,
        }
    }

    /// Fresh, independent container sharing this container's configuration
    pub fn new_same_as_me(&self, data: impl Into<Value>) -> Self {
        let node = Node::normalize(data.into(), &self.config.delimiters);
        Self::from_node(node, self.config.clone())
    }

    // ======================================================
    // Configuration
    // ======================================================

    #[must_use]
    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    #[must_use]
    pub fn delimiters(&self) -> &[String] {
        &self.config.delimiters
    }

    /// Append delimiters
    ///
    /// Keys already stored are not re-tokenized.
    pub fn add_delimiters<I, S>(&mut self, delimiters: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config
            .delimiters
            .extend(delimiters.into_iter().map(Into::into));
    }

    #[must_use]
    pub fn main_delimiter(&self) -> &str {
        self.config.main_delimiter()
    }

    pub fn set_force_create(&mut self, force_create: bool) {
        self.config.force_create = force_create;
    }

    #[must_use]
    pub fn force_create(&self) -> bool {
        self.config.force_create
    }

    pub fn set_access_policy(&mut self, policy: AccessPolicy) {
        self.config.access_policy = policy;
    }

    #[must_use]
    pub fn access_policy(&self) -> AccessPolicy {
        self.config.access_policy
    }

    /// Whether this container is a live view into another container's tree
    #[must_use]
    pub fn is_view(&self) -> bool {
        !self.base.is_empty()
    }

    // ======================================================
    // Internal
    // ======================================================

    pub(super) fn segments(&self, path: impl Into<PathSpec>) -> Vec<Segment> {
        tokenize(path, &self.config.delimiters)
    }

    /// Absolute segments: view base followed by `segments`
    pub(super) fn absolute(&self, segments: &[Segment]) -> Vec<Segment> {
        let mut full = Vec::with_capacity(self.base.len() + segments.len());
        full.extend_from_slice(&self.base);
        full.extend_from_slice(segments);
        full
    }

    /// Build a path error from absolute segments, relative to the view when
    /// the view's own base was resolved
    pub(super) fn path_error(&self, full: &[Segment], covered: usize) -> PathError {
        let skip = if covered >= self.base.len() {
            self.base.len()
        } else {
            0
        };
        PathError::new(
            full[skip..covered].to_vec(),
            full[covered..].to_vec(),
            self.main_delimiter(),
        )
    }

    /// Run `f` on the node at `path`, if it exists
    pub fn with_node<R>(&self, path: impl Into<PathSpec>, f: impl FnOnce(&Node) -> R) -> Option<R> {
        let full = self.absolute(&self.segments(path));
        let root = self.root.borrow();
        root.descend(&full).ok().map(f)
    }

    fn lookup(&self, segments: &[Segment]) -> Result<Node, PathError> {
        let full = self.absolute(segments);
        let root = self.root.borrow();
        match root.descend(&full) {
            Ok(node) => Ok(node.clone()),
            Err(covered) => Err(self.path_error(&full, covered)),
        }
    }

    // ======================================================
    // Public access
    // ======================================================

    /// Whether a lookup result denotes an existing value
    ///
    /// A stored `null` exists; only `None` means "no such path".
    #[inline]
    #[must_use]
    pub fn value_exists(lookup: &Option<Node>) -> bool {
        lookup.is_some()
    }

    /// Lookup honoring the configured access policy
    ///
    /// # Errors
    ///
    /// Under `AccessPolicy::Strict`, returns `AccessError::Path` when the path
    /// cannot be fully traversed. Under `AccessPolicy::Silent` a missing path
    /// yields `Ok(None)`.
    pub fn get(&self, path: impl Into<PathSpec>) -> AccessResult<Option<Node>> {
        let segments = self.segments(path);
        match self.lookup(&segments) {
            Ok(node) => Ok(Some(node)),
            Err(err) if self.config.access_policy.is_strict() => {
                tracing::debug!(
                    target: "datapath::container",
                    error = %err,
                    "strict lookup failed"
                );
                Err(err.into())
            }
            Err(_) => Ok(None),
        }
    }

    /// Lookup that never fails; `None` when the path does not exist
    pub fn get_silent(&self, path: impl Into<PathSpec>) -> Option<Node> {
        let segments = self.segments(path);
        self.lookup(&segments).ok()
    }

    /// Lookup that fails on partial traversal regardless of the policy
    ///
    /// # Errors
    ///
    /// Returns `PathError` carrying the covered and remaining segments.
    pub fn get_strict(&self, path: impl Into<PathSpec>) -> Result<Node, PathError> {
        let segments = self.segments(path);
        self.lookup(&segments)
    }

    /// Plain JSON value at `path`, if it exists
    pub fn get_value(&self, path: impl Into<PathSpec>) -> Option<Value> {
        self.with_node(path, Node::to_value)
    }

    pub fn exists(&self, path: impl Into<PathSpec>) -> bool {
        Self::value_exists(&self.get_silent(path))
    }

    /// Alias of [`PathedContainer::exists`]
    pub fn contains(&self, path: impl Into<PathSpec>) -> bool {
        self.exists(path)
    }

    /// Live view on the node at `path`
    ///
    /// The view and `self` share the same tree: a write through either is
    /// visible through the other. The view inherits this container's
    /// configuration.
    ///
    /// # Errors
    ///
    /// Under `AccessPolicy::Strict`, returns `AccessError::Path` when the
    /// path does not exist. A silent container hands out a view on the
    /// missing path, which reads as empty until something is written there.
    pub fn view(&self, path: impl Into<PathSpec>) -> AccessResult<PathedContainer> {
        let segments = self.segments(path);

        if self.config.access_policy.is_strict() {
            self.lookup(&segments)?;
        }

        Ok(PathedContainer {
            root: Rc::clone(&self.root),
            base: self.absolute(&segments),
            config: self.config.clone(),
        })
    }

    /// Copy of the addressed tree (the whole data for a non-view container)
    ///
    /// A view on a missing path yields an empty container.
    #[must_use]
    pub fn data(&self) -> Node {
        self.with_node((), Node::clone).unwrap_or_default()
    }

    /// Render the addressed tree as plain JSON
    #[must_use]
    pub fn to_value(&self) -> Value {
        self.data().to_value()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.with_node((), |node| node.as_container().is_some_and(|c| c.is_empty()))
            .unwrap_or(true)
    }
}
