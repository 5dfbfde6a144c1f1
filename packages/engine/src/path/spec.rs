//! Raw path specification accepted by every key-bearing operation

use serde_json::Value;

/// Raw path specification
///
/// `Text` fragments are split on delimiters during tokenization, `Atom`
/// fragments are already-atomic segments (integer indexes, keys that must
/// not be split) and pass through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PathSpec {
    /// No path at all, addresses the container itself
    #[default]
    Empty,
    /// Delimited path string
    Text(String),
    /// Segment that is never split
    Atom(String),
    /// Ordered, possibly nested, list of fragments
    List(Vec<PathSpec>),
}

impl PathSpec {
    /// Build an atomic segment that is never split on delimiters
    pub fn atom(segment: impl Into<String>) -> Self {
        PathSpec::Atom(segment.into())
    }

    /// Whether this path carries no fragment at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            PathSpec::Empty => true,
            PathSpec::Text(text) => text.is_empty(),
            PathSpec::Atom(_) => false,
            PathSpec::List(items) => items.iter().all(PathSpec::is_empty),
        }
    }

    /// Append another fragment, turning `self` into a list when needed
    #[must_use]
    pub fn join(self, other: impl Into<PathSpec>) -> PathSpec {
        let other = other.into();
        match self {
            PathSpec::Empty => other,
            PathSpec::List(mut items) => {
                items.push(other);
                PathSpec::List(items)
            }
            single => PathSpec::List(vec![single, other]),
        }
    }
}

impl From<()> for PathSpec {
    fn from((): ()) -> Self {
        PathSpec::Empty
    }
}

impl From<&str> for PathSpec {
    fn from(value: &str) -> Self {
        PathSpec::Text(value.to_string())
    }
}

impl From<String> for PathSpec {
    fn from(value: String) -> Self {
        PathSpec::Text(value)
    }
}

impl From<&String> for PathSpec {
    fn from(value: &String) -> Self {
        PathSpec::Text(value.clone())
    }
}

macro_rules! atom_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for PathSpec {
                fn from(value: $ty) -> Self {
                    PathSpec::Atom(value.to_string())
                }
            }
        )*
    };
}

atom_from_integer!(i32, i64, u32, u64, usize);

impl<T: Into<PathSpec>> From<Option<T>> for PathSpec {
    fn from(value: Option<T>) -> Self {
        value.map_or(PathSpec::Empty, Into::into)
    }
}

impl<T: Into<PathSpec>> From<Vec<T>> for PathSpec {
    fn from(value: Vec<T>) -> Self {
        PathSpec::List(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<PathSpec> + Clone> From<&[T]> for PathSpec {
    fn from(value: &[T]) -> Self {
        PathSpec::List(value.iter().cloned().map(Into::into).collect())
    }
}

impl<T: Into<PathSpec>, const N: usize> From<[T; N]> for PathSpec {
    fn from(value: [T; N]) -> Self {
        PathSpec::List(value.into_iter().map(Into::into).collect())
    }
}

impl From<&Value> for PathSpec {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => PathSpec::Empty,
            Value::String(text) => PathSpec::Text(text.clone()),
            Value::Number(number) => PathSpec::Atom(number.to_string()),
            Value::Bool(flag) => PathSpec::Atom(flag.to_string()),
            Value::Array(items) => PathSpec::List(items.iter().map(PathSpec::from).collect()),
            Value::Object(map) => PathSpec::List(map.values().map(PathSpec::from).collect()),
        }
    }
}

impl From<Value> for PathSpec {
    fn from(value: Value) -> Self {
        PathSpec::from(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_specs() {
        assert!(PathSpec::from(()).is_empty());
        assert!(PathSpec::from("").is_empty());
        assert!(PathSpec::from(Vec::<String>::new()).is_empty());
        assert!(PathSpec::from(None::<&str>).is_empty());
        assert!(!PathSpec::from(0usize).is_empty());
    }

    #[test]
    fn json_arrays_become_lists() {
        let spec = PathSpec::from(json!(["a.b", ["c", 3]]));
        assert_eq!(
            spec,
            PathSpec::List(vec![
                PathSpec::Text("a.b".into()),
                PathSpec::List(vec![PathSpec::Text("c".into()), PathSpec::Atom("3".into())]),
            ])
        );
    }

    #[test]
    fn join_builds_lists() {
        let spec = PathSpec::from("a").join("b.c").join(2usize);
        assert_eq!(
            spec,
            PathSpec::List(vec![
                PathSpec::Text("a".into()),
                PathSpec::Text("b.c".into()),
                PathSpec::Atom("2".into()),
            ])
        );
        assert_eq!(PathSpec::Empty.join("x"), PathSpec::Text("x".into()));
    }
}
