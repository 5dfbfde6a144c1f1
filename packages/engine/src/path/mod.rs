//! Path specifications and tokenization
//!
//! A path is an ordered sequence of string segments. Callers describe a path
//! with a [`PathSpec`] (a delimited string, an atomic key, or an arbitrarily
//! nested list of those) and [`tokenize`] resolves it into segments.

mod flatten;
mod spec;
mod tokenizer;

pub use flatten::{Nested, flatten, flatten_values};
pub use spec::PathSpec;
pub use tokenizer::{PathTokenizer, tokenize};

/// One atomic key in a path
pub type Segment = String;
