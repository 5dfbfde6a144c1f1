//! Projection options

use serde_json::Value;

use crate::builder::core::FilterBuilder;

impl FilterBuilder {
    /// Keep only `fields` in each selected record
    ///
    /// # Returns
    /// `Self` for method chaining
    #[must_use]
    pub fn project<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<Value> = fields
            .into_iter()
            .map(|field| Value::String(field.into()))
            .collect();
        self.options.insert("$project".to_string(), Value::Array(fields));
        self
    }

    /// Raw `$project` specification, e.g. with nested columns
    ///
    /// # Examples
    /// ```
    /// use datapath::FilterBuilder;
    /// use serde_json::json;
    ///
    /// let filter = FilterBuilder::new()
    ///     .project_spec(json!({"name": null, "address": ["city"]}))
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(filter.projection_keys(), vec!["name", "address"]);
    /// ```
    #[must_use]
    pub fn project_spec(mut self, spec: Value) -> Self {
        self.options.insert("$project".to_string(), spec);
        self
    }

    /// Fail with `MissingFieldError` when a selected record lacks a
    /// projected field
    #[must_use]
    pub fn strict_projection(mut self) -> Self {
        self.options.insert("$strict".to_string(), Value::Bool(true));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn projection_goes_to_options() {
        let builder = FilterBuilder::new().eq("a", 1).project(["a", "b"]).strict_projection();
        assert_eq!(builder.spec(), json!({"a": {"$eq": 1}}));
        assert_eq!(builder.options(), json!({"$project": ["a", "b"], "$strict": true}));
    }
}
