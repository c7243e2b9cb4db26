//! Configuration for schema serialization.

use serde::Deserialize;

/// Configuration for schema serialization.
///
/// Controls post-processing of the assembled SDL.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SchemaxConfig {
    /// Parse the assembled SDL and fail on syntax errors.
    pub validate: bool,

    /// Append `schema { ... }` when root operation types are declared.
    pub schema_block: bool,
}

impl Default for SchemaxConfig {
    fn default() -> Self {
        Self {
            validate: false,
            schema_block: true,
        }
    }
}

impl SchemaxConfig {
    /// Creates a configuration that validates its output.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            validate: true,
            ..Self::default()
        }
    }

    /// Builder method to enable/disable SDL validation.
    #[must_use]
    pub fn with_validate(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// Builder method to enable/disable the `schema { ... }` block.
    #[must_use]
    pub fn with_schema_block(mut self, schema_block: bool) -> Self {
        self.schema_block = schema_block;
        self
    }
}
