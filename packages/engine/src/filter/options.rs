//! Filter options mapping

use serde_json::Value;

use super::projection::Projection;
use crate::error::FilterSyntaxError;

/// Options applied after selection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOptions {
    /// `$project`: columns kept in each selected record
    pub project: Option<Projection>,
    /// `$strict`: a projected field missing from a record is an error
    pub strict_projection: bool,
}

impl FilterOptions {
    /// Parse the raw options mapping (`{"$project": ..., "$strict": bool}`)
    ///
    /// # Errors
    ///
    /// Returns `FilterSyntaxError` for an unknown option key or a malformed
    /// option value.
    pub fn parse(raw: &Value) -> Result<Self, FilterSyntaxError> {
        let mut options = Self::default();

        let map = match raw {
            Value::Null => return Ok(options),
            Value::Object(map) => map,
            _ => {
                return Err(FilterSyntaxError::invalid_operand(
                    "options",
                    "a mapping of options",
                ));
            }
        };

        for (key, value) in map {
            match key.as_str() {
                "$project" => {
                    let projection = Projection::parse(value)?;
                    options.project = Some(projection).filter(|p| !p.is_empty());
                }
                "$strict" => {
                    options.strict_projection = value.as_bool().ok_or_else(|| {
                        FilterSyntaxError::invalid_operand("$strict", "a boolean")
                    })?;
                }
                other => return Err(FilterSyntaxError::unknown_operator(other)),
            }
        }

        Ok(options)
    }

    #[must_use]
    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.project = Some(projection).filter(|p| !p.is_empty());
        self
    }

    #[must_use]
    pub fn with_strict_projection(mut self, strict: bool) -> Self {
        self.strict_projection = strict;
        self
    }
}
