//! `DataSet`: a container with the fixed `"."` delimiter

use std::borrow::Cow;
use std::ops::Deref;

use datapath_engine::filter::Filterable;
use datapath_engine::{AccessPolicy, AccessResult, PathSpec, PathedContainer};
use serde_json::Value;

/// Nested data addressed with dotted keys
///
/// Reads go through [`Deref`] to the underlying [`PathedContainer`]; the
/// delimiter set cannot be changed.
///
/// ```
/// use datapath::DataSet;
/// use serde_json::json;
///
/// let mut data = DataSet::new(json!({"user.name": "alice"}));
/// data.set_forced("user.roles", json!(["admin"])).unwrap();
/// assert_eq!(data.to_value(), json!({"user": {"name": "alice", "roles": ["admin"]}}));
/// ```
#[derive(Debug, Clone, Default)]
pub struct DataSet {
    inner: PathedContainer,
}

impl DataSet {
    pub fn new(data: impl Into<Value>) -> Self {
        Self {
            inner: PathedContainer::new(data),
        }
    }

    /// Write `value` at `path` with the configured force-create default
    ///
    /// # Errors
    ///
    /// See [`PathedContainer::set`].
    pub fn set(&mut self, path: impl Into<PathSpec>, value: impl Into<Value>) -> AccessResult<()> {
        self.inner.set(path, value)
    }

    /// Write `value` at `path`, creating missing segments
    ///
    /// # Errors
    ///
    /// See [`PathedContainer::set_forced`].
    pub fn set_forced(
        &mut self,
        path: impl Into<PathSpec>,
        value: impl Into<Value>,
    ) -> AccessResult<()> {
        self.inner.set_forced(path, value)
    }

    /// # Errors
    ///
    /// See [`PathedContainer::unset`].
    pub fn unset(&mut self, path: impl Into<PathSpec>) -> AccessResult<()> {
        self.inner.unset(path)
    }

    pub fn set_data(&mut self, data: impl Into<Value>) {
        self.inner.set_data(data);
    }

    pub fn set_force_create(&mut self, force_create: bool) {
        self.inner.set_force_create(force_create);
    }

    pub fn set_access_policy(&mut self, policy: AccessPolicy) {
        self.inner.set_access_policy(policy);
    }

    /// Live view on `path`, see [`PathedContainer::view`]
    ///
    /// # Errors
    ///
    /// Under the strict policy, fails when `path` does not exist.
    pub fn view(&self, path: impl Into<PathSpec>) -> AccessResult<DataSet> {
        Ok(Self {
            inner: self.inner.view(path)?,
        })
    }

    #[must_use]
    pub fn into_inner(self) -> PathedContainer {
        self.inner
    }
}

impl Deref for DataSet {
    type Target = PathedContainer;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl From<Value> for DataSet {
    fn from(data: Value) -> Self {
        Self::new(data)
    }
}

impl Filterable for DataSet {
    fn records(&self) -> Cow<'_, [Value]> {
        self.inner.records()
    }
}
