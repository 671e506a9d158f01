//! Error types for code generation.

use thiserror::Error;

/// Error type for a whole generation pass.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// The schema is structurally invalid.
    #[error("schema error: {0}")]
    Schema(#[from] modelgen_schema::SchemaError),

    /// A single type could not be generated.
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
}

/// Error that fails the plan of one content type.
///
/// Other types in the same pass are unaffected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// Two members of a type resolve to the same accessor name.
    #[error(
        "content type '{type_alias}': accessor '{name}' for property '{property_alias}' collides with {other}"
    )]
    NameCollision {
        /// Alias of the type.
        type_alias: String,
        /// Alias of the property whose name collided.
        property_alias: String,
        /// The colliding accessor name.
        name: String,
        /// What already holds the name.
        other: String,
    },

    /// A property's accessor name is not a legal identifier.
    #[error(
        "content type '{type_alias}': '{name}' is not a valid accessor name for property '{property_alias}'"
    )]
    InvalidName {
        /// Alias of the type.
        type_alias: String,
        /// Alias of the property.
        property_alias: String,
        /// The rejected name.
        name: String,
    },

    /// The model type name is not a legal identifier.
    #[error("content type '{type_alias}': '{name}' is not a valid model name")]
    InvalidModelName {
        /// Alias of the type.
        type_alias: String,
        /// The rejected name.
        name: String,
    },

    /// Two types resolve to the same model or module name.
    #[error("content type '{type_alias}': model name '{name}' is already used by '{other_alias}'")]
    ModelNameCollision {
        /// Alias of the type that lost.
        type_alias: String,
        /// Alias of the type that holds the name.
        other_alias: String,
        /// The colliding name.
        name: String,
    },

    /// A property has a value type descriptor no template handles.
    #[error(
        "content type '{type_alias}': unknown value type '{descriptor}' for property '{property_alias}'"
    )]
    Template {
        /// Alias of the type.
        type_alias: String,
        /// Alias of the property.
        property_alias: String,
        /// The unrecognized descriptor.
        descriptor: String,
    },
}

impl GenerationError {
    /// Creates a template error.
    pub fn template(
        type_alias: impl Into<String>,
        property_alias: impl Into<String>,
        descriptor: impl Into<String>,
    ) -> Self {
        Self::Template {
            type_alias: type_alias.into(),
            property_alias: property_alias.into(),
            descriptor: descriptor.into(),
        }
    }

    /// Returns the alias of the failed type.
    #[must_use]
    pub fn type_alias(&self) -> &str {
        match self {
            Self::NameCollision { type_alias, .. }
            | Self::InvalidName { type_alias, .. }
            | Self::InvalidModelName { type_alias, .. }
            | Self::ModelNameCollision { type_alias, .. }
            | Self::Template { type_alias, .. } => type_alias,
        }
    }
}
