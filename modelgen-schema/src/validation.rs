//! Schema validation.
//!
//! Generation assumes a closed, acyclic type graph. These checks run once
//! when a [`crate::SchemaModel`] is built and reject anything else.

use crate::error::SchemaError;
use crate::types::{ContentType, TypeId};
use std::collections::{HashMap, HashSet};

/// Validates a full type list.
///
/// # Errors
/// Returns the first `SchemaError` found: invalid or duplicate aliases,
/// duplicate ids, dangling base/mixin references, duplicate property
/// aliases within a type, then base type and mixin cycles.
pub fn validate_types(types: &[ContentType]) -> Result<(), SchemaError> {
    let by_id = index_types(types)?;
    validate_properties(types)?;
    validate_references(types, &by_id)?;
    validate_base_cycles(types, &by_id)?;
    validate_mixin_cycles(types, &by_id)?;
    Ok(())
}

/// Indexes types by id, rejecting duplicate ids and aliases.
fn index_types(types: &[ContentType]) -> Result<HashMap<TypeId, &ContentType>, SchemaError> {
    let mut by_id: HashMap<TypeId, &ContentType> = HashMap::with_capacity(types.len());
    let mut aliases = HashSet::with_capacity(types.len());

    for ty in types {
        if ty.alias.trim().is_empty() {
            return Err(SchemaError::InvalidAlias {
                element: format!("content type {}", ty.id),
                alias: ty.alias.clone(),
            });
        }
        if let Some(existing) = by_id.insert(ty.id, ty) {
            return Err(SchemaError::DuplicateTypeId {
                id: ty.id,
                first: existing.alias.clone(),
                second: ty.alias.clone(),
            });
        }
        if !aliases.insert(ty.alias.as_str()) {
            return Err(SchemaError::DuplicateTypeAlias {
                alias: ty.alias.clone(),
            });
        }
    }

    Ok(by_id)
}

/// Checks property aliases within each type.
fn validate_properties(types: &[ContentType]) -> Result<(), SchemaError> {
    for ty in types {
        let mut seen = HashSet::with_capacity(ty.properties.len());
        for prop in &ty.properties {
            if prop.alias.trim().is_empty() {
                return Err(SchemaError::InvalidAlias {
                    element: format!("property of content type '{}'", ty.alias),
                    alias: prop.alias.clone(),
                });
            }
            if !seen.insert(prop.alias.as_str()) {
                return Err(SchemaError::DuplicateProperty {
                    type_alias: ty.alias.clone(),
                    property_alias: prop.alias.clone(),
                });
            }
        }
    }
    Ok(())
}

/// Checks that every base type and mixin id resolves.
fn validate_references(
    types: &[ContentType],
    by_id: &HashMap<TypeId, &ContentType>,
) -> Result<(), SchemaError> {
    for ty in types {
        if let Some(base) = ty.base_type
            && !by_id.contains_key(&base)
        {
            return Err(SchemaError::dangling(&ty.alias, "base type", base));
        }
        for mixin in &ty.mixins {
            if !by_id.contains_key(mixin) {
                return Err(SchemaError::dangling(&ty.alias, "mixin", *mixin));
            }
        }
    }
    Ok(())
}

/// Walks every base type chain looking for a repeat.
fn validate_base_cycles(
    types: &[ContentType],
    by_id: &HashMap<TypeId, &ContentType>,
) -> Result<(), SchemaError> {
    for ty in types {
        let mut chain: Vec<&ContentType> = vec![ty];
        let mut current = ty;
        while let Some(base) = current.base_type.and_then(|id| by_id.get(&id).copied()) {
            if let Some(start) = chain.iter().position(|t| t.id == base.id) {
                let mut path: Vec<&str> = chain[start..].iter().map(|t| t.alias.as_str()).collect();
                path.push(&base.alias);
                return Err(SchemaError::cycle("base type", &path));
            }
            chain.push(base);
            current = base;
        }
    }
    Ok(())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

/// Depth-first search over mixin edges.
fn validate_mixin_cycles(
    types: &[ContentType],
    by_id: &HashMap<TypeId, &ContentType>,
) -> Result<(), SchemaError> {
    let mut marks: HashMap<TypeId, Mark> = HashMap::with_capacity(types.len());
    let mut stack: Vec<&str> = Vec::new();

    for ty in types {
        visit_mixins(ty, by_id, &mut marks, &mut stack)?;
    }
    Ok(())
}

fn visit_mixins<'a>(
    ty: &'a ContentType,
    by_id: &HashMap<TypeId, &'a ContentType>,
    marks: &mut HashMap<TypeId, Mark>,
    stack: &mut Vec<&'a str>,
) -> Result<(), SchemaError> {
    match marks.get(&ty.id) {
        Some(Mark::Done) => return Ok(()),
        Some(Mark::Visiting) => {
            let start = stack.iter().position(|a| *a == ty.alias).unwrap_or(0);
            let mut path = stack[start..].to_vec();
            path.push(&ty.alias);
            return Err(SchemaError::cycle("mixin", &path));
        }
        None => {}
    }

    marks.insert(ty.id, Mark::Visiting);
    stack.push(&ty.alias);
    for mixin in &ty.mixins {
        if let Some(next) = by_id.get(mixin) {
            visit_mixins(next, by_id, marks, stack)?;
        }
    }
    stack.pop();
    marks.insert(ty.id, Mark::Done);
    Ok(())
}
