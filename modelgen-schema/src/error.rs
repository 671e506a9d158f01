//! Error types for schema construction and validation.

use crate::types::TypeId;
use thiserror::Error;

/// Error type for structurally invalid schemas.
///
/// Any of these makes the whole schema unusable for generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A base type or mixin id does not resolve within the schema.
    #[error("content type '{type_alias}' references unknown {relation} id {missing}")]
    DanglingReference {
        /// Alias of the referencing type.
        type_alias: String,
        /// Kind of reference ("base type" or "mixin").
        relation: &'static str,
        /// The id that could not be resolved.
        missing: TypeId,
    },

    /// Two types share an id.
    #[error("duplicate content type id {id} ('{first}' and '{second}')")]
    DuplicateTypeId {
        /// The shared id.
        id: TypeId,
        /// Alias of the first type.
        first: String,
        /// Alias of the second type.
        second: String,
    },

    /// Two types share an alias.
    #[error("duplicate content type alias '{alias}'")]
    DuplicateTypeAlias {
        /// The shared alias.
        alias: String,
    },

    /// A type declares the same property alias twice.
    #[error("content type '{type_alias}' declares property '{property_alias}' more than once")]
    DuplicateProperty {
        /// Alias of the declaring type.
        type_alias: String,
        /// The repeated property alias.
        property_alias: String,
    },

    /// An alias is empty or contains only whitespace.
    #[error("invalid alias '{alias}' on {element}")]
    InvalidAlias {
        /// Description of the element carrying the alias.
        element: String,
        /// The offending alias.
        alias: String,
    },

    /// The base type or mixin relation contains a cycle.
    #[error("circular {relation} reference: {path}")]
    Cycle {
        /// Kind of relation ("base type" or "mixin").
        relation: &'static str,
        /// Alias path of the cycle.
        path: String,
    },

    /// Lookup of an unknown type.
    #[error("content type '{name}' not found")]
    TypeNotFound {
        /// Alias or id that was looked up.
        name: String,
    },
}

impl SchemaError {
    /// Creates a dangling reference error.
    pub fn dangling(type_alias: impl Into<String>, relation: &'static str, missing: TypeId) -> Self {
        Self::DanglingReference {
            type_alias: type_alias.into(),
            relation,
            missing,
        }
    }

    /// Creates a cycle error from the aliases along the cycle.
    pub fn cycle(relation: &'static str, path: &[&str]) -> Self {
        Self::Cycle {
            relation,
            path: path.join(" -> "),
        }
    }

    /// Creates a type-not-found error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::TypeNotFound { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dangling_message_names_type_and_id() {
        let err = SchemaError::dangling("page", "base type", TypeId(99));
        assert_eq!(
            err.to_string(),
            "content type 'page' references unknown base type id 99"
        );
    }

    #[test]
    fn test_cycle_message_joins_path() {
        let err = SchemaError::cycle("mixin", &["a", "b", "a"]);
        assert_eq!(err.to_string(), "circular mixin reference: a -> b -> a");
    }
}
