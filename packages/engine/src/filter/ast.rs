//! Canonical filter expression tree
//!
//! Every surface syntax accepted by the reformatter (bare `field: value`,
//! explicit `$eq`, nested operator objects, nested documents) ends up as one
//! of these node shapes before compilation.

use serde_json::Value;

/// Operator vocabulary of the filter language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Or,
    And,
    Not,
    Eq,
    Gt,
    Lt,
    Gte,
    Lte,
    Between,
    In,
    Prefix,
    Suffix,
    Factor,
    Regex,
}

impl Operator {
    /// Resolve a `$`-prefixed key; `None` for anything outside the vocabulary
    #[must_use]
    pub fn parse(key: &str) -> Option<Self> {
        Some(match key {
            "$or" => Operator::Or,
            "$and" => Operator::And,
            "$not" => Operator::Not,
            "$eq" => Operator::Eq,
            "$gt" => Operator::Gt,
            "$lt" => Operator::Lt,
            "$gte" => Operator::Gte,
            "$lte" => Operator::Lte,
            "$between" => Operator::Between,
            "$in" => Operator::In,
            "$prefix" => Operator::Prefix,
            "$suffix" => Operator::Suffix,
            "$factor" => Operator::Factor,
            "$regex" => Operator::Regex,
            _ => return None,
        })
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Or => "$or",
            Operator::And => "$and",
            Operator::Not => "$not",
            Operator::Eq => "$eq",
            Operator::Gt => "$gt",
            Operator::Lt => "$lt",
            Operator::Gte => "$gte",
            Operator::Lte => "$lte",
            Operator::Between => "$between",
            Operator::In => "$in",
            Operator::Prefix => "$prefix",
            Operator::Suffix => "$suffix",
            Operator::Factor => "$factor",
            Operator::Regex => "$regex",
        }
    }

    /// Whether the operator combines sub-specifications
    #[must_use]
    pub fn is_logical(self) -> bool {
        matches!(self, Operator::Or | Operator::And | Operator::Not)
    }
}

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Gt,
    Lt,
    Gte,
    Lte,
}

/// String matching kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Anchored at the start (`$prefix`)
    Prefix,
    /// Anchored at the end (`$suffix`)
    Suffix,
    /// Unanchored substring (`$factor`)
    Contains,
    /// Regular expression (`$regex`)
    Regex,
}

/// Node of the canonical filter tree
#[derive(Debug, Clone, PartialEq)]
pub enum FilterNode {
    And(Vec<FilterNode>),
    Or(Vec<FilterNode>),
    Not(Box<FilterNode>),
    Compare {
        field: String,
        op: CompareOp,
        literal: Value,
    },
    /// Inclusive range, either bound may be absent
    Between {
        field: String,
        low: Option<Value>,
        high: Option<Value>,
    },
    In {
        field: String,
        literals: Vec<Value>,
    },
    StringMatch {
        field: String,
        kind: MatchKind,
        pattern: String,
    },
    /// Sub-tree evaluated against `record[field]`
    FieldGroup {
        field: String,
        subtree: Box<FilterNode>,
    },
}

impl FilterNode {
    /// The always-true filter
    #[must_use]
    pub fn always() -> Self {
        FilterNode::And(Vec::new())
    }

    /// Field addressed directly by this node, if any
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            FilterNode::Compare { field, .. }
            | FilterNode::Between { field, .. }
            | FilterNode::In { field, .. }
            | FilterNode::StringMatch { field, .. }
            | FilterNode::FieldGroup { field, .. } => Some(field),
            FilterNode::And(_) | FilterNode::Or(_) | FilterNode::Not(_) => None,
        }
    }
}
