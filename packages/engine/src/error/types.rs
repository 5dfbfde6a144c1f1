//! Error Types
//!
//! Core error types for path traversal, filter compilation and projection.

/// Result type for container access operations
pub type AccessResult<T> = Result<T, AccessError>;

/// Result type for filter compilation and application
pub type FilterResult<T> = Result<T, FilterError>;

/// A path could not be fully traversed
///
/// Carries the segments consumed before traversal stopped and the segments
/// left over, so callers can tell "path never started" apart from "path
/// partially resolved".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", describe_path(.covered, .remaining, .delimiter))]
pub struct PathError {
    /// Segments successfully resolved before traversal stopped
    pub covered: Vec<String>,
    /// Segments that could not be resolved
    pub remaining: Vec<String>,
    /// Canonical delimiter used to render the segments
    pub delimiter: String,
}

fn describe_path(covered: &[String], remaining: &[String], delimiter: &str) -> String {
    let remaining = remaining.join(delimiter);
    if covered.is_empty() {
        format!("The path '{remaining}' cannot be covered")
    } else {
        format!(
            "The path '{}' has been covered but not '{remaining}'",
            covered.join(delimiter)
        )
    }
}

/// Attempted to descend through a scalar without force-create
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("element at '{path}' must be addressable")]
pub struct TypeError {
    /// Delimiter-joined path of the non-addressable element
    pub path: String,
}

/// Errors raised by container get/set/unset/view
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Type(#[from] TypeError),
}

impl AccessError {
    /// The underlying path error, if this is a partial traversal
    #[must_use]
    pub fn as_path_error(&self) -> Option<&PathError> {
        match self {
            AccessError::Path(err) => Some(err),
            AccessError::Type(_) => None,
        }
    }
}

/// Category of a malformed filter specification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterSyntaxKind {
    /// More (or fewer) keys/operators than expected at a node
    Arity,
    /// Operator not in the filter vocabulary
    UnknownOperator,
    /// Operator value has the wrong shape
    InvalidOperand,
    /// `$regex` pattern failed to compile
    InvalidRegex,
}

/// Malformed filter specification, detected at compile time
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Bad filter format ({kind:?}): {message}")]
pub struct FilterSyntaxError {
    pub kind: FilterSyntaxKind,
    pub message: String,
}

/// A projected field is absent from a record under strict projection
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("projected field '{field}' is missing from record")]
pub struct MissingFieldError {
    pub field: String,
}

/// Errors raised by filter construction and application
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    #[error(transparent)]
    Syntax(#[from] FilterSyntaxError),

    #[error(transparent)]
    MissingField(#[from] MissingFieldError),
}

/// Container blob could not be encoded or decoded
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("container snapshot encoding failed: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("container snapshot decoding failed: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("container snapshot carries an invalid configuration: {0}")]
    Config(#[from] crate::config::ConfigurationError),
}
