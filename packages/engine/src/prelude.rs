//! Datapath prelude
//!
//! The types most callers need to read, write and filter data.

// Containers and paths
pub use crate::container::{Node, PathedContainer};
pub use crate::path::PathSpec;

// Configuration
pub use crate::config::{AccessPolicy, ContainerConfig, Validator};

// Filters
pub use crate::filter::{Filter, FilterOptions, Filterable, Projection};

// Error types
pub use crate::error::{
    AccessError, AccessResult, FilterError, FilterResult, FilterSyntaxError, MissingFieldError,
    PathError, TypeError,
};
