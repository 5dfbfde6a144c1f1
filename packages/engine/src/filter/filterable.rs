//! Collections a [`Filter`] can be applied to

use std::borrow::Cow;

use serde_json::Value;

use super::core::Filter;
use crate::container::PathedContainer;
use crate::error::FilterResult;

/// A collection of records
///
/// Lists yield their elements, mappings yield their values, scalars yield
/// nothing.
pub trait Filterable {
    fn records(&self) -> Cow<'_, [Value]>;

    /// Records matching `filter`
    ///
    /// # Errors
    ///
    /// See [`Filter::filter`].
    fn filter_by(&self, filter: &Filter) -> FilterResult<Vec<Value>> {
        filter.filter(&self.records())
    }

    /// Records not matching `filter`
    ///
    /// # Errors
    ///
    /// See [`Filter::filter_inverse`].
    fn filter_inverse_by(&self, filter: &Filter) -> FilterResult<Vec<Value>> {
        filter.filter_inverse(&self.records())
    }
}

impl Filterable for [Value] {
    fn records(&self) -> Cow<'_, [Value]> {
        Cow::Borrowed(self)
    }
}

impl Filterable for Value {
    fn records(&self) -> Cow<'_, [Value]> {
        match self {
            Value::Array(items) => Cow::Borrowed(items.as_slice()),
            Value::Object(map) => Cow::Owned(map.values().cloned().collect()),
            _ => Cow::Owned(Vec::new()),
        }
    }
}

impl Filterable for PathedContainer {
    fn records(&self) -> Cow<'_, [Value]> {
        Cow::Owned(self.to_value().records().into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn slices_and_arrays_filter_alike() {
        let filter = Filter::new(&json!({"n": {"$gt": 1}})).unwrap();
        let records = vec![json!({"n": 1}), json!({"n": 2})];
        let from_vec = records.filter_by(&filter).unwrap();
        let from_value = json!(records).filter_by(&filter).unwrap();
        assert_eq!(from_vec, vec![json!({"n": 2})]);
        assert_eq!(from_vec, from_value);
    }

    #[test]
    fn mappings_filter_their_values() {
        let filter = Filter::new(&json!({"n": 1})).unwrap();
        let keyed = json!({"x": {"n": 1}, "y": {"n": 2}});
        assert_eq!(keyed.filter_inverse_by(&filter).unwrap(), vec![json!({"n": 2})]);
        assert!(json!(3).filter_by(&filter).unwrap().is_empty());
    }

    #[test]
    fn containers_filter_their_children() {
        let filter = Filter::new(&json!({"role": "admin"})).unwrap();
        let users = PathedContainer::new(json!([
            {"name": "a", "role": "admin"},
            {"name": "b", "role": "user"}
        ]));
        assert_eq!(
            users.filter_by(&filter).unwrap(),
            vec![json!({"name": "a", "role": "admin"})]
        );
    }
}
