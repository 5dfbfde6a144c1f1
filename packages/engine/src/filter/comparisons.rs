//! Value comparisons used by compiled predicates
//!
//! Every helper returns `None` when the pair cannot be compared (mismatched
//! or unorderable types); the predicate layer turns that into a failed match
//! for the record.

use std::cmp::Ordering;

use serde_json::{Number, Value};

use super::ast::CompareOp;

/// Equality with numeric coercion between integer and float representations
///
/// Arrays and objects compare structurally, with the same numeric rule
/// applied to their members.
#[must_use]
pub fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => numbers_cmp(a, b) == Some(Ordering::Equal),
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, x)| b.get(key).is_some_and(|y| values_equal(x, y)))
        }
        _ => left == right,
    }
}

/// Ordering between a field value and a literal
///
/// Numbers compare numerically, strings lexicographically, booleans with
/// `false < true`. A number against a string compares the number's decimal
/// rendering. Everything else is unorderable.
#[must_use]
pub fn compare_ordered(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => numbers_cmp(a, b),
        (Value::String(a), Value::String(b)) => Some(a.as_str().cmp(b.as_str())),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::Number(a), Value::String(b)) => Some(a.to_string().as_str().cmp(b.as_str())),
        (Value::String(a), Value::Number(b)) => Some(a.as_str().cmp(b.to_string().as_str())),
        _ => None,
    }
}

/// Apply a comparison operator
///
/// `None` means the field value and the literal cannot be compared.
#[must_use]
pub fn apply(op: CompareOp, field: &Value, literal: &Value) -> Option<bool> {
    if op == CompareOp::Eq {
        return Some(values_equal(field, literal));
    }

    let ordering = compare_ordered(field, literal)?;
    Some(match op {
        CompareOp::Gt => ordering == Ordering::Greater,
        CompareOp::Lt => ordering == Ordering::Less,
        CompareOp::Gte => ordering != Ordering::Less,
        CompareOp::Lte => ordering != Ordering::Greater,
        CompareOp::Eq => ordering == Ordering::Equal,
    })
}

fn numbers_cmp(a: &Number, b: &Number) -> Option<Ordering> {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return Some(x.cmp(&y));
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return Some(x.cmp(&y));
    }
    a.as_f64()?.partial_cmp(&b.as_f64()?)
}

/// Canonical hash key of a literal, equal for values that compare equal
///
/// Used to deduplicate `$in` sets; integral floats collapse onto the integer
/// rendering so that `1` and `1.0` share a key.
#[must_use]
pub fn canonical_key(value: &Value) -> String {
    match value {
        Value::Number(number) => match number.as_f64() {
            Some(float) if number.is_f64() && float.fract() == 0.0 && float.abs() < 9.0e15 => {
                #[allow(clippy::cast_possible_truncation)]
                let integral = float as i64;
                format!("n:{integral}")
            }
            _ => format!("n:{number}"),
        },
        Value::String(text) => format!("s:{text}"),
        Value::Array(items) => {
            let inner: Vec<String> = items.iter().map(canonical_key).collect();
            format!("a:[{}]", inner.join(","))
        }
        Value::Object(map) => {
            let mut inner: Vec<String> = map
                .iter()
                .map(|(key, item)| format!("{key:?}={}", canonical_key(item)))
                .collect();
            inner.sort();
            format!("o:{{{}}}", inner.join(","))
        }
        other => other.to_string(),
    }
}
