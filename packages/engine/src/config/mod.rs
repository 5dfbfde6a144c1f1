//! Container configuration
//!
//! Delimiter set, force-create default and access policy for a
//! [`PathedContainer`](crate::container::PathedContainer).

mod builders;
mod types;
mod validation;

pub use types::{AccessPolicy, ContainerConfig, DEFAULT_DELIMITER};
pub use validation::{ConfigResult, ConfigurationError, Validator};
