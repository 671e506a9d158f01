//! Read-only schema graph.
//!
//! [`SchemaModel`] owns every content type in one arena; all relationships
//! are [`TypeId`] references into it. Construction validates the graph, so
//! every query below can assume a closed, acyclic schema.

use crate::error::SchemaError;
use crate::types::{ContentType, TypeId};
use crate::validation::validate_types;
use std::collections::{HashMap, HashSet};

/// Validated content type schema.
#[derive(Debug, Clone)]
pub struct SchemaModel {
    types: Vec<ContentType>,
    by_id: HashMap<TypeId, usize>,
    by_alias: HashMap<String, usize>,
}

impl SchemaModel {
    /// Builds a schema from a full list of content types.
    ///
    /// Types are stored in id order and each property's declaring type is
    /// set to the type that lists it.
    ///
    /// # Errors
    /// Returns `SchemaError` if the list is not a closed, acyclic graph with
    /// unique ids and aliases.
    pub fn new(mut types: Vec<ContentType>) -> Result<Self, SchemaError> {
        validate_types(&types)?;

        types.sort_by_key(|t| t.id);
        for ty in &mut types {
            for prop in &mut ty.properties {
                prop.declaring_type = ty.id;
            }
        }

        let by_id = types.iter().enumerate().map(|(i, t)| (t.id, i)).collect();
        let by_alias = types
            .iter()
            .enumerate()
            .map(|(i, t)| (t.alias.clone(), i))
            .collect();

        tracing::debug!("Schema model built with {} content types", types.len());

        Ok(Self {
            types,
            by_id,
            by_alias,
        })
    }

    /// Returns all types in id order.
    #[must_use]
    pub fn types(&self) -> &[ContentType] {
        &self.types
    }

    /// Returns the number of types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns true if the schema has no types.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Looks up a type by id.
    #[must_use]
    pub fn get(&self, id: TypeId) -> Option<&ContentType> {
        self.by_id.get(&id).map(|&idx| &self.types[idx])
    }

    /// Looks up a type by alias.
    #[must_use]
    pub fn by_alias(&self, alias: &str) -> Option<&ContentType> {
        self.by_alias.get(alias).map(|&idx| &self.types[idx])
    }

    /// Looks up a type by alias, failing if it does not exist.
    ///
    /// # Errors
    /// Returns `SchemaError::TypeNotFound` for an unknown alias.
    pub fn require(&self, alias: &str) -> Result<&ContentType, SchemaError> {
        self.by_alias(alias)
            .ok_or_else(|| SchemaError::not_found(alias))
    }

    /// Finds the type whose generated name is `name`.
    #[must_use]
    pub fn by_generated_name(&self, name: &str) -> Option<&ContentType> {
        self.types.iter().find(|t| t.generated_name == name)
    }

    /// Returns the direct mixins of a type, in declaration order.
    #[must_use]
    pub fn mixins(&self, id: TypeId) -> Vec<&ContentType> {
        self.get(id)
            .map(|ty| ty.mixins.iter().filter_map(|m| self.get(*m)).collect())
            .unwrap_or_default()
    }

    /// Returns the ancestor chain of a type, closest first.
    #[must_use]
    pub fn ancestors(&self, id: TypeId) -> Vec<&ContentType> {
        let mut chain = Vec::new();
        let mut current = self.get(id).and_then(|t| t.base_type);
        while let Some(base) = current.and_then(|b| self.get(b)) {
            chain.push(base);
            current = base.base_type;
        }
        chain
    }

    /// Returns every type reachable from `id` through mixin composition.
    ///
    /// Depth-first pre-order in declaration order; each mixin appears once
    /// even when reachable through several paths.
    #[must_use]
    pub fn composed_mixins(&self, id: TypeId) -> Vec<&ContentType> {
        let mut visited = HashSet::new();
        let mut out = Vec::new();
        self.extend_composition(id, &mut visited, &mut out);
        out.into_iter().filter_map(|m| self.get(m.id)).collect()
    }

    /// Appends the transitive mixins of `id` not yet in `visited`.
    ///
    /// Sharing `visited` across calls lets a caller walk several roots
    /// while still counting each mixin once. Each entry records the mixins
    /// the walk passed through to reach it.
    pub fn extend_composition(
        &self,
        id: TypeId,
        visited: &mut HashSet<TypeId>,
        out: &mut Vec<ComposedMixin>,
    ) {
        self.walk_composition(id, &mut Vec::new(), visited, out);
    }

    fn walk_composition(
        &self,
        id: TypeId,
        via: &mut Vec<TypeId>,
        visited: &mut HashSet<TypeId>,
        out: &mut Vec<ComposedMixin>,
    ) {
        let Some(ty) = self.get(id) else {
            return;
        };
        for &mixin in &ty.mixins {
            if visited.insert(mixin) {
                out.push(ComposedMixin {
                    id: mixin,
                    via: via.clone(),
                });
                via.push(mixin);
                self.walk_composition(mixin, via, visited, out);
                via.pop();
            }
        }
    }
}

/// A mixin reached by walking composition from some root type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedMixin {
    /// The mixin reached.
    pub id: TypeId,
    /// Mixins composed between the root and `id`, outermost first.
    pub via: Vec<TypeId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PropertyModel;
    use modelgen_core::ItemKind;

    fn doc(id: u32, alias: &str) -> ContentType {
        ContentType::new(id, alias, ItemKind::Document)
    }

    fn diamond() -> SchemaModel {
        SchemaModel::new(vec![
            doc(4, "page").with_base(5).with_mixin(2).with_mixin(3),
            doc(1, "m0").mixin(),
            doc(2, "m1").mixin().with_mixin(1),
            doc(3, "m2").mixin().with_mixin(1),
            doc(5, "basePage").with_base(6),
            doc(6, "root"),
        ])
        .expect("valid schema")
    }

    fn aliases(types: &[&ContentType]) -> Vec<String> {
        types.iter().map(|t| t.alias.clone()).collect()
    }

    #[test]
    fn test_types_sorted_by_id() {
        let model = diamond();
        let ids: Vec<u32> = model.types().iter().map(|t| t.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(model.len(), 6);
        assert!(!model.is_empty());
    }

    #[test]
    fn test_lookups() {
        let model = diamond();
        assert_eq!(model.get(TypeId(4)).map(|t| t.alias.as_str()), Some("page"));
        assert_eq!(model.by_alias("m1").map(|t| t.id), Some(TypeId(2)));
        assert_eq!(
            model.by_generated_name("BasePage").map(|t| t.id),
            Some(TypeId(5))
        );
        assert!(model.get(TypeId(99)).is_none());
        assert!(matches!(
            model.require("nope"),
            Err(SchemaError::TypeNotFound { .. })
        ));
    }

    #[test]
    fn test_ancestors_closest_first() {
        let model = diamond();
        assert_eq!(aliases(&model.ancestors(TypeId(4))), vec!["basePage", "root"]);
        assert!(model.ancestors(TypeId(6)).is_empty());
    }

    #[test]
    fn test_direct_mixins() {
        let model = diamond();
        assert_eq!(aliases(&model.mixins(TypeId(4))), vec!["m1", "m2"]);
    }

    #[test]
    fn test_composed_mixins_visit_diamond_once() {
        let model = diamond();
        assert_eq!(
            aliases(&model.composed_mixins(TypeId(4))),
            vec!["m1", "m0", "m2"]
        );
    }

    #[test]
    fn test_composition_records_path() {
        let model = diamond();
        let mut visited = HashSet::new();
        let mut out = Vec::new();
        model.extend_composition(TypeId(4), &mut visited, &mut out);
        assert_eq!(
            out,
            vec![
                ComposedMixin {
                    id: TypeId(2),
                    via: vec![],
                },
                ComposedMixin {
                    id: TypeId(1),
                    via: vec![TypeId(2)],
                },
                ComposedMixin {
                    id: TypeId(3),
                    via: vec![],
                },
            ]
        );

        // A second root sharing the visited-set adds nothing already seen.
        let mut more = Vec::new();
        model.extend_composition(TypeId(3), &mut visited, &mut more);
        assert!(more.is_empty());
    }

    #[test]
    fn test_declaring_type_is_stamped() {
        let mut prop = PropertyModel::new("title", "text");
        prop.declaring_type = TypeId(77);
        let ty = ContentType {
            properties: vec![prop],
            ..doc(1, "page")
        };
        let model = SchemaModel::new(vec![ty]).expect("valid schema");
        assert_eq!(
            model.types()[0].properties[0].declaring_type,
            TypeId(1)
        );
    }

    #[test]
    fn test_dangling_reference_is_fatal() {
        let result = SchemaModel::new(vec![doc(1, "page").with_base(2)]);
        assert!(matches!(
            result,
            Err(SchemaError::DanglingReference { .. })
        ));
    }
}
