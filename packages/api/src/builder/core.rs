//! Core `FilterBuilder` structure and base functionality
//!
//! Contains the builder struct, its raw-specification accessors and the
//! terminal `build` method.

use std::fmt;

use datapath_engine::{Filter, FilterResult};
use serde_json::{Map, Value, json};

/// Fluent builder for filter specifications
///
/// Every condition method appends one clause; clauses are combined with AND
/// when the filter is built, so several conditions on the same field are
/// allowed.
///
/// ```
/// use datapath::FilterBuilder;
/// use serde_json::json;
///
/// let filter = FilterBuilder::new()
///     .gte("age", 18)
///     .prefix("name", "al")
///     .project(["name"])
///     .build()
///     .unwrap();
///
/// let people = vec![json!({"name": "alice", "age": 30}), json!({"name": "bob", "age": 40})];
/// assert_eq!(filter.filter(&people).unwrap(), vec![json!({"name": "alice"})]);
/// ```
#[derive(Clone, Default)]
pub struct FilterBuilder {
    /// Single-condition clauses, ANDed on build
    pub(crate) clauses: Vec<Value>,
    /// Options mapping (`$project`, `$strict`)
    pub(crate) options: Map<String, Value>,
    /// Debug logging enabled flag
    pub(crate) debug_enabled: bool,
}

impl FilterBuilder {
    /// Start an empty filter, matching every record
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable debug logging of the generated specification
    ///
    /// # Returns
    /// `Self` for method chaining
    #[must_use]
    pub fn debug(mut self) -> Self {
        self.debug_enabled = true;
        self
    }

    /// Append a raw specification clause
    ///
    /// # Arguments
    /// * `clause` - Any mapping accepted by [`Filter::new`]
    ///
    /// # Returns
    /// `Self` for method chaining
    #[must_use]
    pub fn clause(mut self, clause: Value) -> Self {
        self.clauses.push(clause);
        self
    }

    /// Append `{field: {operator: operand}}`
    pub(crate) fn field_op(self, field: &str, operator: &str, operand: Value) -> Self {
        self.clause(json!({ field: { operator: operand } }))
    }

    /// Raw filter specification built so far
    #[must_use]
    pub fn spec(&self) -> Value {
        match self.clauses.as_slice() {
            [] => Value::Object(Map::new()),
            [single] => single.clone(),
            clauses => json!({ "$and": clauses }),
        }
    }

    /// Raw options mapping built so far
    #[must_use]
    pub fn options(&self) -> Value {
        Value::Object(self.options.clone())
    }

    /// Compile the filter
    ///
    /// # Errors
    ///
    /// Returns `FilterError::Syntax` when a clause or the projection is
    /// malformed, e.g. an invalid regular expression.
    pub fn build(self) -> FilterResult<Filter> {
        let spec = self.spec();
        let options = self.options();

        if self.debug_enabled {
            log::debug!("Building filter: spec={spec}, options={options}");
        }

        Filter::with_options(&spec, &options)
    }
}

impl fmt::Debug for FilterBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterBuilder")
            .field("spec", &self.spec())
            .field("options", &self.options)
            .field("debug_enabled", &self.debug_enabled)
            .finish()
    }
}
