//! Configuration validation

use super::types::ContainerConfig;

/// Configuration validation result type
pub type ConfigResult<T> = Result<T, ConfigurationError>;

/// Configuration error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Invalid delimiter set: {0}")]
    InvalidDelimiters(String),
}

/// Configuration validation trait
pub trait Validator {
    /// Validates the configuration settings
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidDelimiters` if the delimiter set is
    /// empty or contains an empty delimiter.
    fn validate(&self) -> ConfigResult<()>;
}

impl Validator for ContainerConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.delimiters.is_empty() {
            return Err(ConfigurationError::InvalidDelimiters(
                "at least one delimiter is required".to_string(),
            ));
        }

        if let Some(pos) = self.delimiters.iter().position(String::is_empty) {
            return Err(ConfigurationError::InvalidDelimiters(format!(
                "delimiter #{pos} is empty"
            )));
        }
        Ok(())
    }
}
