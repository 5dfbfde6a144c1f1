//! Field conditions
//!
//! Comparison, range, membership and string matching methods. Each appends
//! one `{field: {operator: operand}}` clause.

use serde_json::Value;

use crate::builder::core::FilterBuilder;

impl FilterBuilder {
    /// Field equals `value`; numbers compare numerically
    ///
    /// # Returns
    /// `Self` for method chaining
    #[must_use]
    pub fn eq(self, field: &str, value: impl Into<Value>) -> Self {
        self.field_op(field, "$eq", value.into())
    }

    #[must_use]
    pub fn gt(self, field: &str, value: impl Into<Value>) -> Self {
        self.field_op(field, "$gt", value.into())
    }

    #[must_use]
    pub fn gte(self, field: &str, value: impl Into<Value>) -> Self {
        self.field_op(field, "$gte", value.into())
    }

    #[must_use]
    pub fn lt(self, field: &str, value: impl Into<Value>) -> Self {
        self.field_op(field, "$lt", value.into())
    }

    #[must_use]
    pub fn lte(self, field: &str, value: impl Into<Value>) -> Self {
        self.field_op(field, "$lte", value.into())
    }

    /// Inclusive range; `None` leaves that side open
    ///
    /// # Arguments
    /// * `field` - Field to test
    /// * `low` - Lower bound, if any
    /// * `high` - Upper bound, if any
    ///
    /// # Returns
    /// `Self` for method chaining
    ///
    /// # Examples
    /// ```
    /// use datapath::FilterBuilder;
    /// use serde_json::json;
    ///
    /// let builder = FilterBuilder::new().between("score", None::<i64>, Some(20));
    /// assert_eq!(builder.spec(), json!({"score": {"$between": [null, 20]}}));
    /// ```
    #[must_use]
    pub fn between<L, H>(self, field: &str, low: Option<L>, high: Option<H>) -> Self
    where
        L: Into<Value>,
        H: Into<Value>,
    {
        let bounds = vec![
            low.map_or(Value::Null, Into::into),
            high.map_or(Value::Null, Into::into),
        ];
        self.field_op(field, "$between", Value::Array(bounds))
    }

    /// Field is one of `values`
    #[must_use]
    pub fn is_in<I, V>(self, field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        self.field_op(field, "$in", Value::Array(values))
    }

    #[must_use]
    pub fn prefix(self, field: &str, prefix: &str) -> Self {
        self.field_op(field, "$prefix", Value::from(prefix))
    }

    #[must_use]
    pub fn suffix(self, field: &str, suffix: &str) -> Self {
        self.field_op(field, "$suffix", Value::from(suffix))
    }

    /// Field contains `needle` anywhere (`$factor`)
    #[must_use]
    pub fn contains(self, field: &str, needle: &str) -> Self {
        self.field_op(field, "$factor", Value::from(needle))
    }

    /// Field matches a regular expression
    ///
    /// Accepts a bare pattern (`^al`) or a delimited one with flags
    /// (`/^AL/i`). An invalid pattern is reported by
    /// [`FilterBuilder::build`].
    #[must_use]
    pub fn regex(self, field: &str, pattern: &str) -> Self {
        self.field_op(field, "$regex", Value::from(pattern))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn comparisons_produce_operator_clauses() {
        let builder = FilterBuilder::new().gt("age", 3).lte("age", 9);
        assert_eq!(
            builder.spec(),
            json!({"$and": [{"age": {"$gt": 3}}, {"age": {"$lte": 9}}]})
        );
    }

    #[test]
    fn membership_and_string_clauses() {
        let builder = FilterBuilder::new()
            .is_in("color", ["red", "blue"])
            .contains("name", "li")
            .regex("code", "/^x/i");
        assert_eq!(
            builder.spec(),
            json!({"$and": [
                {"color": {"$in": ["red", "blue"]}},
                {"name": {"$factor": "li"}},
                {"code": {"$regex": "/^x/i"}}
            ]})
        );
    }
}
