//! Filter compiler
//!
//! Turns a canonical [`FilterNode`] tree into a closure tree evaluated
//! against one record at a time. All validation (arity was checked by the
//! reformatter; regexes are compiled here) happens before any record is seen.
//!
//! Evaluation is three-valued: `Some(true)`, `Some(false)`, or `None` when
//! the record is malformed for this filter (missing field, unorderable
//! value). `None` propagates through `$not` and through the logical
//! operators unless they short-circuit first, and reads as "no match".

use std::sync::Arc;

use hashbrown::HashSet;
use indexmap::IndexSet;
use regex::Regex;
use serde_json::Value;

use super::ast::{CompareOp, FilterNode, MatchKind};
use super::comparisons::{self, canonical_key};
use super::regex_cache::REGEX_CACHE;
use crate::error::FilterSyntaxError;

type Eval = Arc<dyn Fn(&Value) -> Option<bool> + Send + Sync>;

/// Compiled, immutable record predicate
#[derive(Clone)]
pub struct Predicate {
    eval: Eval,
}

impl std::fmt::Debug for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Predicate").finish_non_exhaustive()
    }
}

impl Predicate {
    fn new(eval: impl Fn(&Value) -> Option<bool> + Send + Sync + 'static) -> Self {
        Self {
            eval: Arc::new(eval),
        }
    }

    /// Predicate matching every record
    #[must_use]
    pub fn always() -> Self {
        Self::new(|_| Some(true))
    }

    /// Three-valued evaluation; `None` for a record the filter cannot judge
    #[inline]
    #[must_use]
    pub fn evaluate(&self, record: &Value) -> Option<bool> {
        (self.eval)(record)
    }

    /// Whether `record` matches; malformed records never match
    #[inline]
    #[must_use]
    pub fn test(&self, record: &Value) -> bool {
        self.evaluate(record).unwrap_or(false)
    }
}

/// Output of [`compile`]
#[derive(Debug, Clone)]
pub struct Compiled {
    pub predicate: Predicate,
    /// Top-level field names referenced by the filter, in first-seen order
    pub fields: IndexSet<String>,
}

/// Compile a canonical filter tree
///
/// Nested documents (`FieldGroup`) contribute their parent field only;
/// their own fields are not listed in [`Compiled::fields`].
///
/// # Errors
///
/// Returns `FilterSyntaxError` with kind `InvalidRegex` when a `$regex`
/// pattern does not compile.
pub fn compile(node: &FilterNode) -> Result<Compiled, FilterSyntaxError> {
    let mut fields = IndexSet::new();
    let predicate = compile_node(node, &mut fields)?;
    tracing::debug!(
        target: "datapath::filter",
        fields = ?fields,
        "filter tree compiled"
    );
    Ok(Compiled { predicate, fields })
}

fn compile_node(
    node: &FilterNode,
    fields: &mut IndexSet<String>,
) -> Result<Predicate, FilterSyntaxError> {
    if let Some(field) = node.field() {
        fields.insert(field.to_string());
    }

    Ok(match node {
        FilterNode::And(children) => {
            let mut compiled = compile_children(children, fields)?;
            match compiled.len() {
                0 => Predicate::always(),
                1 => compiled.remove(0),
                _ => Predicate::new(move |record| {
                    for child in &compiled {
                        if !child.evaluate(record)? {
                            return Some(false);
                        }
                    }
                    Some(true)
                }),
            }
        }
        FilterNode::Or(children) => {
            let mut compiled = compile_children(children, fields)?;
            match compiled.len() {
                0 => Predicate::new(|_| Some(false)),
                1 => compiled.remove(0),
                _ => Predicate::new(move |record| {
                    for child in &compiled {
                        if child.evaluate(record)? {
                            return Some(true);
                        }
                    }
                    Some(false)
                }),
            }
        }
        FilterNode::Not(child) => {
            let inner = compile_node(child, fields)?;
            Predicate::new(move |record| inner.evaluate(record).map(|matched| !matched))
        }
        FilterNode::Compare { field, op, literal } => compare(field, *op, literal.clone()),
        FilterNode::Between { field, low, high } => match (low, high) {
            (None, None) => Predicate::always(),
            (Some(low), None) => compare(field, CompareOp::Gte, low.clone()),
            (None, Some(high)) => compare(field, CompareOp::Lte, high.clone()),
            (Some(low), Some(high)) => {
                let (field, low, high) = (field.clone(), low.clone(), high.clone());
                Predicate::new(move |record| {
                    let value = field_value(record, &field)?;
                    Some(
                        comparisons::apply(CompareOp::Gte, value, &low)?
                            && comparisons::apply(CompareOp::Lte, value, &high)?,
                    )
                })
            }
        },
        FilterNode::In { field, literals } => membership(field, literals),
        FilterNode::StringMatch {
            field,
            kind,
            pattern,
        } => string_match(field, *kind, pattern)?,
        FilterNode::FieldGroup { field, subtree } => {
            let mut nested = IndexSet::new();
            let inner = compile_node(subtree, &mut nested)?;
            let field = field.clone();
            Predicate::new(move |record| inner.evaluate(field_value(record, &field)?))
        }
    })
}

fn compile_children(
    children: &[FilterNode],
    fields: &mut IndexSet<String>,
) -> Result<Vec<Predicate>, FilterSyntaxError> {
    children
        .iter()
        .map(|child| compile_node(child, fields))
        .collect()
}

fn compare(field: &str, op: CompareOp, literal: Value) -> Predicate {
    let field = field.to_string();
    Predicate::new(move |record| comparisons::apply(op, field_value(record, &field)?, &literal))
}

fn membership(field: &str, literals: &[Value]) -> Predicate {
    let mut seen = HashSet::new();
    let unique: Vec<&Value> = literals
        .iter()
        .filter(|literal| seen.insert(canonical_key(literal)))
        .collect();

    match unique.as_slice() {
        [] => Predicate::new(|_| Some(false)),
        [single] => compare(field, CompareOp::Eq, (*single).clone()),
        _ => {
            let field = field.to_string();
            Predicate::new(move |record| {
                let value = field_value(record, &field)?;
                Some(seen.contains(&canonical_key(value)))
            })
        }
    }
}

fn string_match(
    field: &str,
    kind: MatchKind,
    pattern: &str,
) -> Result<Predicate, FilterSyntaxError> {
    let field = field.to_string();

    if kind == MatchKind::Regex {
        let regex: Regex = REGEX_CACHE
            .get_or_compile(pattern)
            .map_err(|err| FilterSyntaxError::invalid_regex(pattern, &err))?;
        return Ok(Predicate::new(move |record| {
            let text = field_text(field_value(record, &field)?)?;
            Some(regex.is_match(&text))
        }));
    }

    let pattern = pattern.to_string();
    Ok(Predicate::new(move |record| {
        let text = field_text(field_value(record, &field)?)?;
        Some(match kind {
            MatchKind::Prefix => text.starts_with(pattern.as_str()),
            MatchKind::Suffix => text.ends_with(pattern.as_str()),
            MatchKind::Contains | MatchKind::Regex => text.contains(pattern.as_str()),
        })
    }))
}

/// Field of a record: object member, or list element by decimal index
fn field_value<'r>(record: &'r Value, field: &str) -> Option<&'r Value> {
    match record {
        Value::Object(map) => map.get(field),
        Value::Array(items) => field.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

/// String view of a scalar for the string matchers
fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}
