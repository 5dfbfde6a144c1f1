//! Compiled filter
//!
//! [`Filter`] bundles the three stages: reformat the raw specification,
//! compile it into a predicate, and project the selected records. It is
//! immutable once built and can be shared across threads.

use indexmap::IndexSet;
use serde_json::Value;

use super::ast::FilterNode;
use super::compiler::{Compiled, Predicate, compile};
use super::options::FilterOptions;
use super::projection::{Projection, project};
use super::reformat::reformat;
use crate::error::FilterResult;

/// Compiled record filter with optional projection
///
/// ```
/// use datapath_engine::filter::Filter;
/// use serde_json::json;
///
/// let adults = Filter::new(&json!({"age": {"$gte": 18}})).unwrap();
/// let people = vec![json!({"age": 17}), json!({"age": 18}), json!({"age": 25})];
/// assert_eq!(adults.filter(&people).unwrap(), vec![json!({"age": 18}), json!({"age": 25})]);
/// ```
#[derive(Debug, Clone)]
pub struct Filter {
    node: FilterNode,
    predicate: Predicate,
    keys: IndexSet<String>,
    options: FilterOptions,
}

impl Filter {
    /// Compile a raw filter specification without options
    ///
    /// # Errors
    ///
    /// Returns `FilterError::Syntax` for a malformed specification.
    pub fn new(spec: &Value) -> FilterResult<Self> {
        Self::with_filter_options(spec, FilterOptions::default())
    }

    /// Compile a raw filter specification and a raw options mapping
    ///
    /// # Errors
    ///
    /// Returns `FilterError::Syntax` for a malformed specification or
    /// options mapping.
    pub fn with_options(spec: &Value, options: &Value) -> FilterResult<Self> {
        Self::with_filter_options(spec, FilterOptions::parse(options)?)
    }

    /// Compile a raw filter specification with parsed options
    ///
    /// # Errors
    ///
    /// Returns `FilterError::Syntax` for a malformed specification.
    pub fn with_filter_options(spec: &Value, options: FilterOptions) -> FilterResult<Self> {
        Self::from_node(reformat(spec)?, options)
    }

    /// Compile an already reformatted tree
    ///
    /// # Errors
    ///
    /// Returns `FilterError::Syntax` when a regex pattern does not compile.
    pub fn from_node(node: FilterNode, options: FilterOptions) -> FilterResult<Self> {
        let Compiled { predicate, fields } = compile(&node)?;
        log::debug!(
            "filter compiled: {} referenced field(s), projection: {}",
            fields.len(),
            options.project.is_some()
        );
        Ok(Self {
            node,
            predicate,
            keys: fields,
            options,
        })
    }

    /// Whether `record` matches
    ///
    /// A record the filter cannot judge (missing field, unorderable value)
    /// does not match.
    #[must_use]
    pub fn validate(&self, record: &Value) -> bool {
        self.predicate.test(record)
    }

    /// Whether `record` does not match
    ///
    /// A record the filter cannot judge is rejected by both `validate` and
    /// `not_validate`.
    #[must_use]
    pub fn not_validate(&self, record: &Value) -> bool {
        self.predicate.evaluate(record).is_some_and(|matched| !matched)
    }

    /// Three-valued evaluation, `None` for a record the filter cannot judge
    #[must_use]
    pub fn evaluate(&self, record: &Value) -> Option<bool> {
        self.predicate.evaluate(record)
    }

    /// Records matching the filter, projected when a projection is set
    ///
    /// # Errors
    ///
    /// Returns `FilterError::MissingField` under strict projection when a
    /// selected record lacks a projected field.
    pub fn filter(&self, records: &[Value]) -> FilterResult<Vec<Value>> {
        self.select(records, false)
    }

    /// Records not matching the filter, projected when a projection is set
    ///
    /// # Errors
    ///
    /// See [`Filter::filter`].
    pub fn filter_inverse(&self, records: &[Value]) -> FilterResult<Vec<Value>> {
        self.select(records, true)
    }

    fn select(&self, records: &[Value], inverse: bool) -> FilterResult<Vec<Value>> {
        let selected: Vec<Value> = records
            .iter()
            .filter(|record| {
                if inverse {
                    self.not_validate(record)
                } else {
                    self.validate(record)
                }
            })
            .cloned()
            .collect();

        tracing::debug!(
            target: "datapath::filter",
            total = records.len(),
            selected = selected.len(),
            inverse,
            "records filtered"
        );

        match &self.options.project {
            Some(projection) => Ok(project(
                &selected,
                projection,
                self.options.strict_projection,
            )?),
            None => Ok(selected),
        }
    }

    /// Fields referenced by the filter; nested documents list their parent
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        self.keys.iter().map(String::as_str).collect()
    }

    /// Top-level output columns, empty without projection
    #[must_use]
    pub fn projection_keys(&self) -> Vec<&str> {
        self.options
            .project
            .as_ref()
            .map(Projection::keys)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn node(&self) -> &FilterNode {
        &self.node
    }

    #[must_use]
    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    #[must_use]
    pub fn projection(&self) -> Option<&Projection> {
        self.options.project.as_ref()
    }

    #[must_use]
    pub fn options(&self) -> &FilterOptions {
        &self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FilterError, FilterSyntaxKind};
    use serde_json::json;

    fn people() -> Vec<Value> {
        vec![
            json!({"name": "alice", "age": 30, "city": "Paris"}),
            json!({"name": "bob", "age": 17, "city": "Lyon"}),
            json!({"name": "carol", "city": "Paris"}),
        ]
    }

    #[test]
    fn filter_and_inverse_skip_unjudgeable_records() {
        let filter = Filter::new(&json!({"age": {"$gte": 18}})).unwrap();
        let names = |records: Vec<Value>| -> Vec<Value> {
            records.into_iter().map(|r| r["name"].clone()).collect()
        };
        assert_eq!(names(filter.filter(&people()).unwrap()), vec![json!("alice")]);
        assert_eq!(names(filter.filter_inverse(&people()).unwrap()), vec![json!("bob")]);
    }

    #[test]
    fn projection_applies_to_selected_records() {
        let filter =
            Filter::with_options(&json!({"city": "Paris"}), &json!({"$project": ["name"]}))
                .unwrap();
        assert_eq!(
            filter.filter(&people()).unwrap(),
            vec![json!({"name": "alice"}), json!({"name": "carol"})]
        );
        assert_eq!(filter.projection_keys(), vec!["name"]);
    }

    #[test]
    fn strict_projection_surfaces_missing_fields() {
        let filter = Filter::with_options(
            &json!({"city": "Paris"}),
            &json!({"$project": ["name", "age"], "$strict": true}),
        )
        .unwrap();
        let err = filter.filter(&people()).unwrap_err();
        assert_eq!(
            err,
            FilterError::MissingField(crate::error::MissingFieldError {
                field: "age".to_string()
            })
        );
    }

    #[test]
    fn construction_fails_fast_on_bad_specs() {
        let err = Filter::new(&json!({"age": {"$gte": 1, "$lte": 2}})).unwrap_err();
        let FilterError::Syntax(err) = err else {
            panic!("expected a syntax error");
        };
        assert_eq!(err.kind, FilterSyntaxKind::Arity);
    }

    #[test]
    fn keys_list_referenced_fields() {
        let filter = Filter::new(&json!({"name": {"$prefix": "a"}, "age": 3})).unwrap();
        assert_eq!(filter.keys(), vec!["name", "age"]);
        assert!(filter.projection_keys().is_empty());
    }

    #[test]
    fn empty_filter_selects_everything() {
        let filter = Filter::new(&json!({})).unwrap();
        assert_eq!(filter.filter(&people()).unwrap().len(), 3);
        assert!(filter.keys().is_empty());
    }

    #[test]
    fn filter_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Filter>();
    }
}
