//! Error constructor functions
//!
//! Factory methods for building errors with the right context.

use super::types::{FilterSyntaxError, FilterSyntaxKind, PathError, TypeError};

impl PathError {
    /// Creates a partial traversal error
    ///
    /// # Arguments
    /// * `covered` - Segments resolved before traversal stopped
    /// * `remaining` - Segments left unresolved
    /// * `delimiter` - Canonical delimiter used for rendering
    pub fn new(
        covered: impl Into<Vec<String>>,
        remaining: impl Into<Vec<String>>,
        delimiter: impl Into<String>,
    ) -> Self {
        Self {
            covered: covered.into(),
            remaining: remaining.into(),
            delimiter: delimiter.into(),
        }
    }

    /// Whether at least one segment resolved before traversal stopped
    #[must_use]
    pub fn is_partial(&self) -> bool {
        !self.covered.is_empty()
    }

    /// Full path the failed operation was addressing
    #[must_use]
    pub fn full_path(&self) -> Vec<String> {
        self.covered
            .iter()
            .chain(self.remaining.iter())
            .cloned()
            .collect()
    }
}

impl TypeError {
    #[must_use]
    pub fn not_addressable(segments: &[String], delimiter: &str) -> Self {
        Self {
            path: segments.join(delimiter),
        }
    }
}

impl FilterSyntaxError {
    pub fn new(kind: FilterSyntaxKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Wrong number of keys or operators at a node
    pub fn arity(message: impl Into<String>) -> Self {
        Self::new(FilterSyntaxKind::Arity, message)
    }

    pub fn unknown_operator(operator: &str) -> Self {
        Self::new(
            FilterSyntaxKind::UnknownOperator,
            format!("unknown operator '{operator}'"),
        )
    }

    /// Operator value has the wrong shape
    pub fn invalid_operand(operator: &str, expected: &str) -> Self {
        Self::new(
            FilterSyntaxKind::InvalidOperand,
            format!("operator '{operator}' expects {expected}"),
        )
    }

    #[must_use]
    pub fn invalid_regex(pattern: &str, err: &regex::Error) -> Self {
        Self::new(
            FilterSyntaxKind::InvalidRegex,
            format!("invalid pattern '{pattern}': {err}"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_error_message_without_covered_segments() {
        let err = PathError::new(Vec::new(), vec!["a".to_string(), "b".to_string()], ".");
        assert!(!err.is_partial());
        assert_eq!(err.to_string(), "The path 'a.b' cannot be covered");
    }

    #[test]
    fn path_error_message_with_covered_segments() {
        let err = PathError::new(vec!["a".to_string()], vec!["c".to_string()], "/");
        assert!(err.is_partial());
        assert_eq!(err.to_string(), "The path 'a' has been covered but not 'c'");
        assert_eq!(err.full_path(), vec!["a".to_string(), "c".to_string()]);
    }

    #[test]
    fn path_error_is_a_std_error() {
        let err: Box<dyn std::error::Error> =
            Box::new(PathError::new(vec!["a".to_string()], vec!["b".to_string()], "."));
        assert_eq!(err.to_string(), "The path 'a' has been covered but not 'b'");
        assert!(err.source().is_none());
    }

    #[test]
    fn type_error_joins_with_delimiter() {
        let err = TypeError::not_addressable(&["x".to_string(), "y".to_string()], ".");
        assert_eq!(err.to_string(), "element at 'x.y' must be addressable");
    }
}
