//! Error handling module
//!
//! Error types for path access, container configuration, filter compilation
//! and projection. Path and type errors surface from container operations,
//! filter errors surface from `Filter` construction before any document is
//! evaluated.

mod constructors;
mod types;

pub use types::{
    AccessError, AccessResult, FilterError, FilterResult, FilterSyntaxError, FilterSyntaxKind,
    MissingFieldError, PathError, SnapshotError, TypeError,
};
