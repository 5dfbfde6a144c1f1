//! Datapath public API
//!
//! Read, write and filter nested data with delimited path keys and
//! MongoDB-style queries. The fluent [`FilterBuilder`] assembles filter
//! specifications; [`DataSet`] is a container using the `"."` delimiter.
//!
//! ```
//! use datapath::{Datapath, Filterable};
//! use serde_json::json;
//!
//! let users = Datapath::dataset(json!([
//!     {"name": "alice", "age": 31},
//!     {"name": "bob", "age": 17}
//! ]));
//!
//! let adults = Datapath::filter().gte("age", 18).project(["name"]).build().unwrap();
//! assert_eq!(users.filter_by(&adults).unwrap(), vec![json!({"name": "alice"})]);
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod builder;
pub mod dataset;

pub use builder::FilterBuilder;
pub use dataset::DataSet;

// Re-export the engine API
pub use datapath_engine::filter::{FilterNode, Filterable, Predicate, reformat};
pub use datapath_engine::prelude::*;

/// Main entry point providing static constructors
pub struct Datapath;

impl Datapath {
    /// Start a new filter
    ///
    /// Shorthand for `FilterBuilder::new()`
    #[must_use]
    pub fn filter() -> FilterBuilder {
        FilterBuilder::new()
    }

    /// Wrap data in a dotted-key `DataSet`
    pub fn dataset(data: impl Into<serde_json::Value>) -> DataSet {
        DataSet::new(data)
    }

    /// Container with a custom configuration
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` if the delimiter set is invalid.
    pub fn container(
        data: impl Into<serde_json::Value>,
        config: ContainerConfig,
    ) -> datapath_engine::config::ConfigResult<PathedContainer> {
        PathedContainer::with_config(data, config)
    }
}

/// Start a new filter
///
/// Shorthand for `FilterBuilder::new()`
#[must_use]
pub fn filter() -> FilterBuilder {
    FilterBuilder::new()
}
