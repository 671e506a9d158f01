//! Content type and property definitions.
//!
//! These are plain data. Relationships between types are id references that
//! [`crate::SchemaModel`] resolves once the full type list is known.

use crate::naming::to_pascal_case;
use modelgen_core::ItemKind;

/// Stable numeric identity of a content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TypeId(pub u32);

impl std::fmt::Display for TypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A property declared on a content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyModel {
    /// Schema alias, unique within the declaring type.
    pub alias: String,
    /// Candidate accessor name, PascalCase.
    pub generated_name: String,
    /// Value type descriptor, e.g. `text` or `list<contentReference>`.
    pub value_type: String,
    /// Type that declares this property.
    pub declaring_type: TypeId,
}

impl PropertyModel {
    /// Creates a property with a generated name derived from the alias.
    #[must_use]
    pub fn new(alias: impl Into<String>, value_type: impl Into<String>) -> Self {
        let alias = alias.into();
        Self {
            generated_name: to_pascal_case(&alias),
            alias,
            value_type: value_type.into(),
            declaring_type: TypeId::default(),
        }
    }

    /// Overrides the generated name.
    #[must_use]
    pub fn with_generated_name(mut self, name: impl Into<String>) -> Self {
        self.generated_name = name.into();
        self
    }
}

/// A node of the schema graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentType {
    /// Stable identity.
    pub id: TypeId,
    /// Schema-unique alias.
    pub alias: String,
    /// Name of the generated model type, PascalCase.
    pub generated_name: String,
    /// Item kind.
    pub kind: ItemKind,
    /// Parent type, if any.
    pub base_type: Option<TypeId>,
    /// Composed types, in declaration order.
    pub mixins: Vec<TypeId>,
    /// Whether the type exists only to be composed.
    pub is_mixin: bool,
    /// Properties declared directly on this type.
    pub properties: Vec<PropertyModel>,
}

impl ContentType {
    /// Creates a type with a generated name derived from the alias.
    #[must_use]
    pub fn new(id: u32, alias: impl Into<String>, kind: ItemKind) -> Self {
        let alias = alias.into();
        Self {
            id: TypeId(id),
            generated_name: to_pascal_case(&alias),
            alias,
            kind,
            base_type: None,
            mixins: Vec::new(),
            is_mixin: false,
            properties: Vec::new(),
        }
    }

    /// Overrides the generated name.
    #[must_use]
    pub fn with_generated_name(mut self, name: impl Into<String>) -> Self {
        self.generated_name = name.into();
        self
    }

    /// Sets the base type.
    #[must_use]
    pub fn with_base(mut self, base: u32) -> Self {
        self.base_type = Some(TypeId(base));
        self
    }

    /// Appends a composed type.
    #[must_use]
    pub fn with_mixin(mut self, mixin: u32) -> Self {
        let id = TypeId(mixin);
        if !self.mixins.contains(&id) {
            self.mixins.push(id);
        }
        self
    }

    /// Marks the type as a composition-only mixin.
    #[must_use]
    pub fn mixin(mut self) -> Self {
        self.is_mixin = true;
        self
    }

    /// Appends a declared property.
    #[must_use]
    pub fn with_property(mut self, mut property: PropertyModel) -> Self {
        property.declaring_type = self.id;
        self.properties.push(property);
        self
    }

    /// Looks up a declared property by alias.
    #[must_use]
    pub fn property(&self, alias: &str) -> Option<&PropertyModel> {
        self.properties.iter().find(|p| p.alias == alias)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_generated_name_from_alias() {
        let prop = PropertyModel::new("metaDescription", "text");
        assert_eq!(prop.generated_name, "MetaDescription");
        assert_eq!(prop.value_type, "text");

        let prop = prop.with_generated_name("Description");
        assert_eq!(prop.generated_name, "Description");
    }

    #[test]
    fn test_content_type_builder() {
        let ty = ContentType::new(3, "blogPost", ItemKind::Document)
            .with_base(1)
            .with_mixin(2)
            .with_mixin(2)
            .with_property(PropertyModel::new("title", "text"));

        assert_eq!(ty.generated_name, "BlogPost");
        assert_eq!(ty.base_type, Some(TypeId(1)));
        assert_eq!(ty.mixins, vec![TypeId(2)]);
        assert!(!ty.is_mixin);
        assert_eq!(ty.property("title").map(|p| p.declaring_type), Some(TypeId(3)));
        assert!(ty.property("body").is_none());
    }
}
