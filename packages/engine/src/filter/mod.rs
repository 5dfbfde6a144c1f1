//! MongoDB-style record filters
//!
//! A raw specification goes through three stages:
//! - [`reformat`] normalizes it into a canonical [`FilterNode`] tree
//! - [`compile`] turns the tree into a [`Predicate`] and collects the
//!   referenced fields
//! - [`project`] keeps the requested columns of the selected records
//!
//! [`Filter`] runs all three.

mod ast;
mod comparisons;
mod compiler;
mod core;
mod filterable;
mod options;
mod projection;
mod reformat;
mod regex_cache;

pub use self::core::Filter;
pub use ast::{CompareOp, FilterNode, MatchKind, Operator};
pub use comparisons::{compare_ordered, values_equal};
pub use compiler::{Compiled, Predicate, compile};
pub use filterable::Filterable;
pub use options::FilterOptions;
pub use projection::{Projection, project};
pub use reformat::reformat;
pub use regex_cache::{REGEX_CACHE, RegexCache};
