//! Path tokenizer
//!
//! Resolves a [`PathSpec`] into atomic segments. Every non-canonical
//! delimiter is rewritten to the canonical one before a text fragment is
//! split, so `a/b` and `a.b` are the same path when both `.` and `/` are
//! configured.

use super::Segment;
use super::flatten::flatten_values;
use super::spec::PathSpec;

/// Tokenizer bound to one delimiter set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTokenizer {
    delimiters: Vec<String>,
}

impl PathTokenizer {
    /// Creates a tokenizer; the first delimiter is canonical
    pub fn new<I, S>(delimiters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            delimiters: delimiters.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn delimiters(&self) -> &[String] {
        &self.delimiters
    }

    /// Tokenize a path specification with this tokenizer's delimiters
    pub fn tokenize(&self, spec: impl Into<PathSpec>) -> Vec<Segment> {
        tokenize(spec, &self.delimiters)
    }
}

/// Turn a path specification into an ordered list of segments
///
/// Nested lists are flattened left to right, text fragments are split on the
/// canonical delimiter after delimiter folding, atoms pass through unsplit.
/// Empty input yields an empty path.
///
/// # Examples
/// ```
/// use datapath_engine::path::{PathSpec, tokenize};
///
/// let delimiters = vec![".".to_string(), "/".to_string()];
/// let segments = tokenize(PathSpec::from(vec!["a/b", "c.d"]), &delimiters);
/// assert_eq!(segments, vec!["a", "b", "c", "d"]);
/// ```
pub fn tokenize(spec: impl Into<PathSpec>, delimiters: &[String]) -> Vec<Segment> {
    let spec = spec.into();

    if spec.is_empty() {
        return Vec::new();
    }

    let fragments = flatten_values(std::slice::from_ref(&spec), -1);
    let mut segments = Vec::with_capacity(fragments.len());

    for fragment in fragments {
        match fragment {
            PathSpec::Empty => {}
            PathSpec::Atom(segment) => segments.push(segment),
            PathSpec::Text(text) => split_text(&text, delimiters, &mut segments),
            // flatten_values opens every list level
            PathSpec::List(_) => {}
        }
    }

    tracing::trace!(
        target: "datapath::path",
        segments = ?segments,
        "tokenized path"
    );
    segments
}

fn split_text(text: &str, delimiters: &[String], out: &mut Vec<Segment>) {
    let Some((main, others)) = delimiters.split_first() else {
        out.push(text.to_string());
        return;
    };

    if main.is_empty() {
        out.push(text.to_string());
        return;
    }

    let mut folded = text.to_string();
    for delimiter in others.iter().filter(|d| !d.is_empty()) {
        if folded.contains(delimiter.as_str()) {
            folded = folded.replace(delimiter.as_str(), main);
        }
    }

    out.extend(folded.split(main.as_str()).map(str::to_string));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dots() -> Vec<String> {
        vec![".".to_string()]
    }

    #[test]
    fn empty_input_yields_empty_path() {
        assert!(tokenize((), &dots()).is_empty());
        assert!(tokenize("", &dots()).is_empty());
        assert!(tokenize(Vec::<&str>::new(), &dots()).is_empty());
    }

    #[test]
    fn splits_on_canonical_delimiter() {
        assert_eq!(tokenize("a.b.c", &dots()), vec!["a", "b", "c"]);
        assert_eq!(tokenize("a..b", &dots()), vec!["a", "", "b"]);
    }

    #[test]
    fn folds_secondary_delimiters() {
        let tokenizer = PathTokenizer::new([".", "/", "::"]);
        assert_eq!(tokenizer.tokenize("a/b::c.d"), vec!["a", "b", "c", "d"]);
        assert_eq!(tokenizer.tokenize("a/b"), tokenizer.tokenize("a.b"));
    }

    #[test]
    fn nested_lists_flatten_left_to_right() {
        let spec = PathSpec::from(vec![
            PathSpec::from("a.b"),
            PathSpec::from(vec![PathSpec::from("c"), PathSpec::from(vec!["d.e"])]),
            PathSpec::from(7usize),
        ]);
        assert_eq!(tokenize(spec, &dots()), vec!["a", "b", "c", "d", "e", "7"]);
    }

    #[test]
    fn atoms_are_not_split() {
        let spec = PathSpec::from(vec![PathSpec::from("a"), PathSpec::atom("b.c")]);
        assert_eq!(tokenize(spec, &dots()), vec!["a", "b.c"]);
    }
}
