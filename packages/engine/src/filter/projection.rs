//! Column projection (`$project`)
//!
//! A projection names the fields kept in each output record. A field may
//! carry a nested projection, applied to the field's value: an object is
//! projected directly, a list has every element projected.
//!
//! Missing fields are omitted from the output unless the projection is
//! applied strictly, in which case the first missing field aborts with
//! [`MissingFieldError`].

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::error::{FilterSyntaxError, MissingFieldError};

/// Parsed `$project` specification
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Projection {
    fields: IndexMap<String, Option<Projection>>,
}

impl Projection {
    /// Parse a raw projection
    ///
    /// Accepted shapes: a field name, a list of field names, or a mapping
    /// from field name to `null`/`true` (keep whole), `false` (skip), or a
    /// nested projection. `null` is the empty projection.
    ///
    /// # Errors
    ///
    /// Returns `FilterSyntaxError` with kind `InvalidOperand` for any other
    /// shape.
    pub fn parse(raw: &Value) -> Result<Self, FilterSyntaxError> {
        let mut fields = IndexMap::new();

        match raw {
            Value::Null => {}
            Value::String(name) => {
                fields.insert(name.clone(), None);
            }
            Value::Array(names) => {
                for name in names {
                    let name = field_name(name).ok_or_else(invalid)?;
                    fields.insert(name, None);
                }
            }
            Value::Object(map) => {
                for (name, spec) in map {
                    match spec {
                        Value::Null | Value::Bool(true) => {
                            fields.insert(name.clone(), None);
                        }
                        Value::Bool(false) => {}
                        Value::Object(_) | Value::Array(_) => {
                            fields.insert(name.clone(), Some(Projection::parse(spec)?));
                        }
                        _ => return Err(invalid()),
                    }
                }
            }
            _ => return Err(invalid()),
        }

        Ok(Self { fields })
    }

    /// Projection keeping exactly `names`
    pub fn of<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: names.into_iter().map(|name| (name.into(), None)).collect(),
        }
    }

    /// Keep `name`, projecting its value with `nested`
    #[must_use]
    pub fn with_nested(mut self, name: impl Into<String>, nested: Projection) -> Self {
        self.fields.insert(name.into(), Some(nested));
        self
    }

    /// Top-level output column names
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Project one record
    ///
    /// # Errors
    ///
    /// Under `strict`, returns `MissingFieldError` naming the first missing
    /// field as a dotted path.
    pub fn apply(&self, record: &Value, strict: bool) -> Result<Value, MissingFieldError> {
        self.apply_at(record, strict, "")
    }

    fn apply_at(&self, value: &Value, strict: bool, prefix: &str) -> Result<Value, MissingFieldError> {
        if let Value::Array(items) = value {
            return items
                .iter()
                .map(|item| self.apply_at(item, strict, prefix))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array);
        }

        let empty = Map::new();
        let source = value.as_object().unwrap_or(&empty);
        let mut out = Map::with_capacity(self.fields.len());

        for (name, nested) in &self.fields {
            let Some(field) = source.get(name) else {
                let path = if prefix.is_empty() {
                    name.clone()
                } else {
                    format!("{prefix}.{name}")
                };
                if strict {
                    tracing::debug!(
                        target: "datapath::projection",
                        field = %path,
                        "projected field missing"
                    );
                    return Err(MissingFieldError { field: path });
                }
                continue;
            };

            let projected = match nested {
                Some(projection) => {
                    let path = if prefix.is_empty() {
                        name.clone()
                    } else {
                        format!("{prefix}.{name}")
                    };
                    projection.apply_at(field, strict, &path)?
                }
                None => field.clone(),
            };
            out.insert(name.clone(), projected);
        }

        Ok(Value::Object(out))
    }
}

/// Project every record
///
/// # Errors
///
/// See [`Projection::apply`].
pub fn project(
    records: &[Value],
    projection: &Projection,
    strict: bool,
) -> Result<Vec<Value>, MissingFieldError> {
    tracing::trace!(
        target: "datapath::projection",
        records = records.len(),
        columns = ?projection.keys(),
        strict,
        "projecting records"
    );
    records
        .iter()
        .map(|record| projection.apply(record, strict))
        .collect()
}

fn field_name(value: &Value) -> Option<String> {
    match value {
        Value::String(name) => Some(name.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn invalid() -> FilterSyntaxError {
    FilterSyntaxError::invalid_operand(
        "$project",
        "a field name, a list of field names or a mapping of nested projections",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn list_projection_keeps_named_fields() {
        let projection = Projection::parse(&json!(["name", "age"])).unwrap();
        let out = projection
            .apply(&json!({"name": "a", "age": 3, "city": "x"}), false)
            .unwrap();
        assert_eq!(out, json!({"name": "a", "age": 3}));
        assert_eq!(projection.keys(), vec!["name", "age"]);
    }

    #[test]
    fn missing_fields_are_omitted_by_default() {
        let projection = Projection::of(["name", "age"]);
        let out = projection.apply(&json!({"name": "a"}), false).unwrap();
        assert_eq!(out, json!({"name": "a"}));
    }

    #[test]
    fn strict_projection_reports_missing_field() {
        let projection = Projection::parse(&json!({"address": {"city": null}})).unwrap();
        let err = projection
            .apply(&json!({"address": {"zip": "1"}}), true)
            .unwrap_err();
        assert_eq!(err.field, "address.city");
    }

    #[test]
    fn nested_projection_applies_to_objects_and_lists() {
        let projection = Projection::parse(&json!({
            "name": true,
            "tags": ["label"],
            "owner": {"id": null}
        }))
        .unwrap();

        let record = json!({
            "name": "n",
            "tags": [{"label": "a", "w": 1}, {"label": "b", "w": 2}],
            "owner": {"id": 7, "secret": "s"},
            "extra": 0
        });

        assert_eq!(
            projection.apply(&record, false).unwrap(),
            json!({
                "name": "n",
                "tags": [{"label": "a"}, {"label": "b"}],
                "owner": {"id": 7}
            })
        );
    }

    #[test]
    fn false_entries_are_skipped() {
        let projection = Projection::parse(&json!({"a": true, "b": false})).unwrap();
        assert_eq!(projection.keys(), vec!["a"]);
    }

    #[test]
    fn malformed_projection_is_rejected() {
        assert!(Projection::parse(&json!(5)).is_err());
        assert!(Projection::parse(&json!([{"a": 1}])).is_err());
        assert!(Projection::parse(&json!({"a": "x"})).is_err());
    }

    #[test]
    fn project_maps_every_record() {
        let records = vec![json!({"a": 1, "b": 2}), json!({"a": 3})];
        let out = project(&records, &Projection::of(["b"]), false).unwrap();
        assert_eq!(out, vec![json!({"b": 2}), json!({})]);
        assert!(project(&records, &Projection::of(["b"]), true).is_err());
    }
}
