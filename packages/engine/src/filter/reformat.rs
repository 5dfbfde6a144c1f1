//! Filter reformatter
//!
//! Normalizes a raw filter specification into the canonical [`FilterNode`]
//! tree. Every document level is read as an implicit AND of its key/value
//! pairs, after its dotted field names are expanded (`{"a.b": 1}` is the same
//! filter as `{"a": {"b": 1}}`). Operator operands and literals are never
//! rewritten.

use serde_json::{Map, Value};

use super::ast::{CompareOp, FilterNode, MatchKind, Operator};
use crate::error::FilterSyntaxError;

type ReformatResult = Result<FilterNode, FilterSyntaxError>;

/// Reformat a raw specification into a canonical filter tree
///
/// An empty mapping (or `null`) is the always-true filter.
///
/// # Errors
///
/// Returns `FilterSyntaxError` for a node holding more than one operator, an
/// unknown operator, or an operator value of the wrong shape.
///
/// # Examples
/// ```
/// use datapath_engine::filter::{CompareOp, FilterNode, reformat};
/// use serde_json::json;
///
/// let bare = reformat(&json!({"age": 18})).unwrap();
/// let explicit = reformat(&json!({"age": {"$eq": 18}})).unwrap();
/// assert_eq!(bare, explicit);
/// ```
pub fn reformat(raw: &Value) -> ReformatResult {
    let node = match raw {
        Value::Null => Ok(FilterNode::always()),
        Value::Object(map) => reformat_document(map),
        _ => Err(FilterSyntaxError::invalid_operand(
            "filter",
            "a mapping of fields and operators",
        )),
    };

    if let Err(err) = &node {
        tracing::warn!(
            target: "datapath::filter",
            error = %err,
            "filter specification rejected"
        );
    }
    node
}

/// Implicit AND over every key/value pair of a document level
fn reformat_document(map: &Map<String, Value>) -> ReformatResult {
    expand_dotted_keys(map)
        .iter()
        .map(|(key, value)| reformat_entry(key, value))
        .collect::<Result<Vec<_>, _>>()
        .map(FilterNode::And)
}

/// Split dotted keys into nested mappings
///
/// Keys are applied in order the way container writes are: a dotted key
/// descends into (or creates) intermediate mappings, and the last segment
/// replaces whatever was there. Nested documents are expanded too; operator
/// mappings and literals are moved as-is.
fn expand_dotted_keys(map: &Map<String, Value>) -> Map<String, Value> {
    let mut expanded = Map::with_capacity(map.len());
    for (key, value) in map {
        let value = match value {
            Value::Object(nested) if !is_operator_mapping(nested) => {
                Value::Object(expand_dotted_keys(nested))
            }
            other => other.clone(),
        };
        let segments: Vec<&str> = key.split('.').filter(|s| !s.is_empty()).collect();
        if segments.len() > 1 {
            insert_nested(&mut expanded, &segments, value);
        } else {
            expanded.insert(key.clone(), value);
        }
    }
    expanded
}

fn is_operator_mapping(map: &Map<String, Value>) -> bool {
    map.keys().any(|key| key.starts_with('$'))
}

fn insert_nested(map: &mut Map<String, Value>, segments: &[&str], value: Value) {
    let [first, rest @ ..] = segments else {
        return;
    };
    if rest.is_empty() {
        map.insert((*first).to_string(), value);
        return;
    }

    let slot = map
        .entry((*first).to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if !slot.is_object() {
        *slot = Value::Object(Map::new());
    }
    if let Value::Object(child) = slot {
        insert_nested(child, rest, value);
    }
}

fn reformat_entry(key: &str, value: &Value) -> ReformatResult {
    if key.starts_with('$') {
        let op = Operator::parse(key).ok_or_else(|| FilterSyntaxError::unknown_operator(key))?;
        return match op {
            Operator::And => Ok(FilterNode::And(sub_documents(op, value)?)),
            Operator::Or => Ok(FilterNode::Or(sub_documents(op, value)?)),
            Operator::Not => {
                let map = value
                    .as_object()
                    .ok_or_else(|| FilterSyntaxError::invalid_operand(op.as_str(), "a mapping"))?;
                Ok(FilterNode::Not(Box::new(reformat_document(map)?)))
            }
            _ => Err(FilterSyntaxError::invalid_operand(
                op.as_str(),
                "to be applied to a field",
            )),
        };
    }

    match value {
        Value::Object(map) => reformat_field(key, map),
        literal => Ok(FilterNode::Compare {
            field: key.to_string(),
            op: CompareOp::Eq,
            literal: literal.clone(),
        }),
    }
}

fn sub_documents(op: Operator, value: &Value) -> Result<Vec<FilterNode>, FilterSyntaxError> {
    let items = as_list(value)
        .filter(|items| !items.is_empty())
        .ok_or_else(|| FilterSyntaxError::invalid_operand(op.as_str(), "a non-empty list"))?;

    items
        .iter()
        .map(|item| match item {
            Value::Object(map) => reformat_document(map),
            _ => Err(FilterSyntaxError::invalid_operand(
                op.as_str(),
                "a list of mappings",
            )),
        })
        .collect()
}

/// Per-field mapping: one operator, or a nested document
fn reformat_field(field: &str, map: &Map<String, Value>) -> ReformatResult {
    let operators = map.keys().filter(|key| key.starts_with('$')).count();

    if operators == 0 && !map.is_empty() {
        return Ok(FilterNode::FieldGroup {
            field: field.to_string(),
            subtree: Box::new(reformat_document(map)?),
        });
    }

    let mut entries = map.iter();
    let (Some((key, value)), None) = (entries.next(), entries.next()) else {
        return Err(FilterSyntaxError::arity(format!(
            "field '{field}' expects exactly one operator, found {} key(s)",
            map.len()
        )));
    };

    let op = Operator::parse(key).ok_or_else(|| FilterSyntaxError::unknown_operator(key))?;
    reformat_operator(field, op, value)
}

fn reformat_operator(field: &str, op: Operator, value: &Value) -> ReformatResult {
    let field_name = field.to_string();

    let compare = |op: CompareOp| FilterNode::Compare {
        field: field_name.clone(),
        op,
        literal: value.clone(),
    };

    Ok(match op {
        Operator::Eq => compare(CompareOp::Eq),
        Operator::Gt => compare(CompareOp::Gt),
        Operator::Lt => compare(CompareOp::Lt),
        Operator::Gte => compare(CompareOp::Gte),
        Operator::Lte => compare(CompareOp::Lte),
        Operator::Between => {
            let bounds = as_list(value).unwrap_or_else(|| vec![value.clone()]);
            if bounds.len() > 2 {
                return Err(FilterSyntaxError::invalid_operand(
                    op.as_str(),
                    "at most two bounds",
                ));
            }
            let mut bounds = bounds.into_iter().map(|b| Some(b).filter(|b| !b.is_null()));
            FilterNode::Between {
                field: field_name,
                low: bounds.next().flatten(),
                high: bounds.next().flatten(),
            }
        }
        Operator::In => FilterNode::In {
            field: field_name,
            literals: as_list(value).unwrap_or_else(|| vec![value.clone()]),
        },
        Operator::Prefix => string_match(field_name, op, MatchKind::Prefix, value)?,
        Operator::Suffix => string_match(field_name, op, MatchKind::Suffix, value)?,
        Operator::Factor => string_match(field_name, op, MatchKind::Contains, value)?,
        Operator::Regex => string_match(field_name, op, MatchKind::Regex, value)?,
        Operator::Not => {
            let map = value
                .as_object()
                .ok_or_else(|| FilterSyntaxError::invalid_operand(op.as_str(), "a mapping"))?;
            FilterNode::Not(Box::new(reformat_field(field, map)?))
        }
        Operator::And | Operator::Or => {
            let items = as_list(value)
                .filter(|items| !items.is_empty())
                .ok_or_else(|| {
                    FilterSyntaxError::invalid_operand(op.as_str(), "a non-empty list")
                })?;
            let children = items
                .iter()
                .map(|item| match item {
                    Value::Object(map) => reformat_field(field, map),
                    _ => Err(FilterSyntaxError::invalid_operand(
                        op.as_str(),
                        "a list of operator mappings",
                    )),
                })
                .collect::<Result<Vec<_>, _>>()?;
            if op == Operator::And {
                FilterNode::And(children)
            } else {
                FilterNode::Or(children)
            }
        }
    })
}

fn string_match(
    field: String,
    op: Operator,
    kind: MatchKind,
    value: &Value,
) -> ReformatResult {
    let pattern = match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        _ => return Err(FilterSyntaxError::invalid_operand(op.as_str(), "a string")),
    };
    Ok(FilterNode::StringMatch {
        field,
        kind,
        pattern,
    })
}

fn as_list(value: &Value) -> Option<Vec<Value>> {
    value.as_array().cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FilterSyntaxKind;
    use serde_json::json;

    fn eq(field: &str, literal: Value) -> FilterNode {
        FilterNode::Compare {
            field: field.to_string(),
            op: CompareOp::Eq,
            literal,
        }
    }

    #[test]
    fn siblings_are_combined_with_and() {
        let node = reformat(&json!({"a": 1, "b": "x"})).unwrap();
        assert_eq!(node, FilterNode::And(vec![eq("a", json!(1)), eq("b", json!("x"))]));
    }

    #[test]
    fn empty_spec_is_always_true() {
        assert_eq!(reformat(&json!({})).unwrap(), FilterNode::always());
        assert_eq!(reformat(&Value::Null).unwrap(), FilterNode::always());
    }

    #[test]
    fn logical_operators_recurse() {
        let node = reformat(&json!({"$or": [{"a": 1}, {"b": 2}]})).unwrap();
        assert_eq!(
            node,
            FilterNode::And(vec![FilterNode::Or(vec![
                FilterNode::And(vec![eq("a", json!(1))]),
                FilterNode::And(vec![eq("b", json!(2))]),
            ])])
        );
    }

    #[test]
    fn nested_documents_become_field_groups() {
        let nested = reformat(&json!({"address": {"city": "Paris"}})).unwrap();
        let dotted = reformat(&json!({"address.city": "Paris"})).unwrap();
        assert_eq!(nested, dotted);
        assert_eq!(
            nested,
            FilterNode::And(vec![FilterNode::FieldGroup {
                field: "address".to_string(),
                subtree: Box::new(FilterNode::And(vec![eq("city", json!("Paris"))])),
            }])
        );
    }

    #[test]
    fn dotted_keys_apply_in_order() {
        let merged = reformat(&json!({"a": {"c.d": 2}, "a.c.e": 3})).unwrap();
        let nested = reformat(&json!({"a": {"c": {"d": 2, "e": 3}}})).unwrap();
        assert_eq!(merged, nested);

        let replaced = reformat(&json!({"a.b": 1, "a": {"c": 2}})).unwrap();
        assert_eq!(replaced, reformat(&json!({"a": {"c": 2}})).unwrap());
    }

    #[test]
    fn numeric_segments_stay_field_names() {
        let node = reformat(&json!({"tags.0": "x"})).unwrap();
        assert_eq!(
            node,
            FilterNode::And(vec![FilterNode::FieldGroup {
                field: "tags".to_string(),
                subtree: Box::new(FilterNode::And(vec![eq("0", json!("x"))])),
            }])
        );

        let node = reformat(&json!({"0": 1, "1": 2})).unwrap();
        assert_eq!(node, FilterNode::And(vec![eq("0", json!(1)), eq("1", json!(2))]));
    }

    #[test]
    fn operands_are_not_rewritten() {
        let node = reformat(&json!({"tags": {"$eq": []}})).unwrap();
        assert_eq!(node, FilterNode::And(vec![eq("tags", json!([]))]));

        let node = reformat(&json!({"meta": {"$eq": {"a.b": 1}}})).unwrap();
        assert_eq!(node, FilterNode::And(vec![eq("meta", json!({"a.b": 1}))]));
    }

    #[test]
    fn between_bounds_treat_null_as_absent() {
        let node = reformat(&json!({"score": {"$between": [null, 20]}})).unwrap();
        assert_eq!(
            node,
            FilterNode::And(vec![FilterNode::Between {
                field: "score".to_string(),
                low: None,
                high: Some(json!(20)),
            }])
        );
    }

    #[test]
    fn field_not_wraps_operator() {
        let node = reformat(&json!({"age": {"$not": {"$gt": 5}}})).unwrap();
        assert_eq!(
            node,
            FilterNode::And(vec![FilterNode::Not(Box::new(FilterNode::Compare {
                field: "age".to_string(),
                op: CompareOp::Gt,
                literal: json!(5),
            }))])
        );
    }

    #[test]
    fn two_operators_on_one_field_is_arity_error() {
        let err = reformat(&json!({"age": {"$gte": 18, "$lte": 30}})).unwrap_err();
        assert_eq!(err.kind, FilterSyntaxKind::Arity);
    }

    #[test]
    fn mixed_operator_and_field_keys_is_arity_error() {
        let err = reformat(&json!({"age": {"$gte": 18, "x": 1}})).unwrap_err();
        assert_eq!(err.kind, FilterSyntaxKind::Arity);
    }

    #[test]
    fn unknown_operators_are_rejected() {
        let err = reformat(&json!({"age": {"$near": 1}})).unwrap_err();
        assert_eq!(err.kind, FilterSyntaxKind::UnknownOperator);
        let err = reformat(&json!({"$xor": [{"a": 1}]})).unwrap_err();
        assert_eq!(err.kind, FilterSyntaxKind::UnknownOperator);
    }

    #[test]
    fn malformed_operands_are_rejected() {
        for spec in [
            json!({"$or": {"a": 1}}),
            json!({"$and": []}),
            json!({"$or": [1, 2]}),
            json!({"$not": 3}),
            json!({"$gt": 3}),
            json!({"a": {"$between": [1, 2, 3]}}),
            json!({"a": {"$prefix": ["x"]}}),
            json!([1, 2]),
        ] {
            let err = reformat(&spec).unwrap_err();
            assert_eq!(err.kind, FilterSyntaxKind::InvalidOperand, "{spec}");
        }
    }
}
