//! Logical combinators
//!
//! Sub-filters are built with their own `FilterBuilder` and combined here.
//! Only the sub-builders' conditions are used; their projections are
//! ignored.

use serde_json::{Value, json};

use crate::builder::core::FilterBuilder;

impl FilterBuilder {
    /// Any of `branches` matches
    ///
    /// # Arguments
    /// * `branches` - Sub-filters, at least one
    ///
    /// # Returns
    /// `Self` for method chaining
    ///
    /// # Examples
    /// ```
    /// use datapath::FilterBuilder;
    ///
    /// let filter = FilterBuilder::new()
    ///     .or([
    ///         FilterBuilder::new().lt("age", 18),
    ///         FilterBuilder::new().gte("age", 65),
    ///     ])
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(filter.keys(), vec!["age"]);
    /// ```
    #[must_use]
    pub fn or<I>(self, branches: I) -> Self
    where
        I: IntoIterator<Item = FilterBuilder>,
    {
        let specs = branch_specs(branches);
        self.clause(json!({ "$or": specs }))
    }

    /// Every one of `branches` matches
    #[must_use]
    pub fn and<I>(self, branches: I) -> Self
    where
        I: IntoIterator<Item = FilterBuilder>,
    {
        let specs = branch_specs(branches);
        self.clause(json!({ "$and": specs }))
    }

    /// `branch` does not match
    ///
    /// A record `branch` cannot judge (e.g. a missing field) is not
    /// selected by the negation either.
    #[must_use]
    pub fn not(self, branch: FilterBuilder) -> Self {
        self.clause(json!({ "$not": branch.spec() }))
    }
}

fn branch_specs<I>(branches: I) -> Vec<Value>
where
    I: IntoIterator<Item = FilterBuilder>,
{
    branches.into_iter().map(|branch| branch.spec()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn or_nests_branch_specs() {
        let builder = FilterBuilder::new().or([
            FilterBuilder::new().eq("a", 1),
            FilterBuilder::new().eq("b", 2).eq("c", 3),
        ]);
        assert_eq!(
            builder.spec(),
            json!({"$or": [
                {"a": {"$eq": 1}},
                {"$and": [{"b": {"$eq": 2}}, {"c": {"$eq": 3}}]}
            ]})
        );
    }

    #[test]
    fn not_wraps_branch() {
        let filter = FilterBuilder::new()
            .not(FilterBuilder::new().eq("role", "admin"))
            .build()
            .unwrap();
        assert!(filter.validate(&json!({"role": "user"})));
        assert!(!filter.validate(&json!({"role": "admin"})));
        assert!(!filter.validate(&json!({})));
    }

    #[test]
    fn empty_or_is_rejected_on_build() {
        let empty: Vec<FilterBuilder> = Vec::new();
        assert!(FilterBuilder::new().or(empty).build().is_err());
    }
}
