//! Member resolution.
//!
//! Computes, for one content type, the members to emit and the members to
//! drop. Candidates are collected in three tiers:
//!
//! 1. Local properties, in alias order.
//! 2. Inherited properties, walking ancestors closest first.
//! 3. Composed properties, walking the type's mixins and then each
//!    ancestor's mixins depth-first, each mixin once.
//!
//! An alias claimed by an earlier tier hides later tiers. Markers are then
//! applied against the consuming type and against every type the member
//! passed through on its way there, ending with the declaring type. A marker
//! written once next to an ancestor's or a mixin's own model therefore
//! reaches every type that inherits or composes the member through it.

use std::collections::{HashMap, HashSet};

use modelgen_scanner::{MarkerIndex, MarkerKind, MarkerRecord};
use modelgen_schema::{
    ContentType, PropertyModel, SchemaModel, TypeId, escape_identifier, is_keyword,
    is_valid_identifier, to_snake_case,
};

use crate::diagnostics::Diagnostic;
use crate::error::GenerationError;
use crate::plan::{GenerationPlan, Provenance, ResolvedMember, SkipReason, SkippedMember};

/// Accessor names taken by every generated model.
const RESERVED_NAMES: &[&str] = &["new", "element"];

struct Candidate<'s> {
    property: &'s PropertyModel,
    provenance: Provenance,
    /// Types between the consumer and the declaring type, nearest first,
    /// ending with the declaring type. Empty for local members.
    path: Vec<&'s str>,
}

/// Outcome of applying markers to one candidate.
enum Decision {
    Emit { rename: Option<MarkerRecord> },
    Skip(SkippedMember),
}

/// Resolves the members of content types against the marker index.
pub struct MemberResolver<'a> {
    schema: &'a SchemaModel,
    markers: &'a MarkerIndex,
}

impl<'a> MemberResolver<'a> {
    /// Creates a resolver over a schema and a finished marker index.
    #[must_use]
    pub fn new(schema: &'a SchemaModel, markers: &'a MarkerIndex) -> Self {
        Self { schema, markers }
    }

    /// Resolves one content type.
    ///
    /// # Errors
    /// Returns a `GenerationError` if a final name is invalid or two members
    /// end up with the same accessor name.
    pub fn resolve(&self, ty: &ContentType) -> Result<GenerationPlan, GenerationError> {
        let mut warnings = Vec::new();
        let candidates = self.collect_candidates(ty, &mut warnings);

        let mut members = Vec::new();
        let mut skipped = Vec::new();
        for candidate in candidates {
            match self.decide(ty, &candidate, &mut warnings) {
                Decision::Skip(member) => {
                    tracing::debug!(
                        "Skipping {}.{} ({})",
                        ty.alias,
                        member.property_alias,
                        member.reason
                    );
                    skipped.push(member);
                }
                Decision::Emit { rename } => {
                    let (accessor_name, renamed_at) = match rename {
                        Some(MarkerRecord {
                            kind: MarkerKind::RenameMember { to },
                            location,
                            ..
                        }) => (explicit_accessor(ty, candidate.property, &to)?, Some(location)),
                        _ => (derived_accessor(ty, candidate.property)?, None),
                    };
                    members.push(ResolvedMember {
                        property: candidate.property.clone(),
                        provenance: candidate.provenance,
                        accessor_name,
                        renamed_at,
                    });
                }
            }
        }

        check_collisions(ty, &members)?;

        Ok(GenerationPlan {
            type_id: ty.id,
            type_alias: ty.alias.clone(),
            kind: ty.kind,
            model_name: self.model_name(ty)?,
            members,
            skipped,
            warnings,
        })
    }

    /// Returns the model type name, honoring a type-level rename.
    fn model_name(&self, ty: &ContentType) -> Result<String, GenerationError> {
        let name = match self.markers.type_rename(&ty.alias).map(|r| &r.kind) {
            Some(MarkerKind::RenameMember { to }) => to.clone(),
            _ => ty.generated_name.clone(),
        };
        if is_valid_identifier(&name) {
            Ok(name)
        } else {
            Err(GenerationError::InvalidModelName {
                type_alias: ty.alias.clone(),
                name,
            })
        }
    }

    fn collect_candidates<'s>(
        &'s self,
        ty: &'s ContentType,
        warnings: &mut Vec<Diagnostic>,
    ) -> Vec<Candidate<'s>> {
        let mut claimed: HashMap<&'s str, Provenance> = HashMap::new();
        let mut candidates = Vec::new();

        for property in sorted(&ty.properties) {
            claimed.insert(&property.alias, Provenance::Local);
            candidates.push(Candidate {
                property,
                provenance: Provenance::Local,
                path: Vec::new(),
            });
        }

        let ancestors = self.schema.ancestors(ty.id);
        let lineage: Vec<&'s str> = ancestors.iter().copied().map(|a| a.alias.as_str()).collect();
        for (depth, ancestor) in ancestors.iter().copied().enumerate() {
            for property in sorted(&ancestor.properties) {
                if claimed.contains_key(property.alias.as_str()) {
                    continue;
                }
                let provenance = Provenance::Inherited {
                    from: ancestor.alias.clone(),
                };
                claimed.insert(&property.alias, provenance.clone());
                candidates.push(Candidate {
                    property,
                    provenance,
                    path: lineage[..=depth].to_vec(),
                });
            }
        }

        // Each composition root is reached through the ancestors up to it.
        let mut visited = HashSet::new();
        let mut composition = Vec::new();
        let mut roots = vec![(ty.id, 0)];
        roots.extend(ancestors.iter().enumerate().map(|(depth, a)| (a.id, depth + 1)));
        for (root, depth) in roots {
            let mut reached = Vec::new();
            self.schema
                .extend_composition(root, &mut visited, &mut reached);
            composition.extend(reached.into_iter().map(|m| (depth, m)));
        }

        for (depth, composed) in &composition {
            let Some(mixin) = self.schema.get(composed.id) else {
                continue;
            };
            for property in sorted(&mixin.properties) {
                match claimed.get(property.alias.as_str()) {
                    None => {
                        let provenance = Provenance::Composed {
                            via: mixin.alias.clone(),
                        };
                        claimed.insert(&property.alias, provenance.clone());
                        let mut path = lineage[..*depth].to_vec();
                        path.extend(self.aliases(&composed.via));
                        path.push(&mixin.alias);
                        candidates.push(Candidate {
                            property,
                            provenance,
                            path,
                        });
                    }
                    Some(Provenance::Composed { via }) if *via != mixin.alias => {
                        tracing::warn!(
                            "{}: property '{}' from mixin '{}' is shadowed by mixin '{}'",
                            ty.alias,
                            property.alias,
                            mixin.alias,
                            via
                        );
                        warnings.push(Diagnostic::ShadowedMember {
                            type_alias: ty.alias.clone(),
                            property_alias: property.alias.clone(),
                            kept: via.clone(),
                            dropped: mixin.alias.clone(),
                        });
                    }
                    Some(_) => {}
                }
            }
        }

        candidates
    }

    fn aliases(&self, ids: &[TypeId]) -> Vec<&'a str> {
        ids.iter()
            .filter_map(|id| self.schema.get(*id))
            .map(|t| t.alias.as_str())
            .collect()
    }

    /// Applies markers to one candidate.
    ///
    /// Suppression beats renaming. Markers on the consuming type are
    /// consulted first, then markers on each type along the candidate's
    /// path, nearest first.
    fn decide(
        &self,
        ty: &ContentType,
        candidate: &Candidate<'_>,
        warnings: &mut Vec<Diagnostic>,
    ) -> Decision {
        let alias = candidate.property.alias.as_str();
        let composed = candidate.provenance.is_composed();

        let consumer = self.markers.member(&ty.alias, alias);
        for record in consumer {
            if record.kind == MarkerKind::NotImplemented && !composed {
                warnings.push(Diagnostic::IneffectiveMarker {
                    type_alias: ty.alias.clone(),
                    property_alias: alias.to_string(),
                    location: record.location.clone(),
                    reason: "not_implemented only applies to members composed from a mixin",
                });
            }
        }

        let consumer_skip = consumer.iter().find_map(|record| match record.kind {
            MarkerKind::ExplicitImplementation => {
                Some((SkipReason::ExplicitImplementation, record))
            }
            MarkerKind::IgnoreMember => Some((SkipReason::Ignored, record)),
            MarkerKind::NotImplemented if composed => Some((SkipReason::NotImplemented, record)),
            MarkerKind::NotImplemented | MarkerKind::RenameMember { .. } => None,
        });
        if let Some((reason, record)) = consumer_skip {
            return Decision::Skip(skipped(candidate, reason, record));
        }

        // not_implemented on a type along the path only speaks for that type.
        for via in &candidate.path {
            let found = self.markers.find_member(via, alias, |kind| {
                matches!(
                    kind,
                    MarkerKind::ExplicitImplementation | MarkerKind::IgnoreMember
                )
            });
            if let Some(record) = found {
                let reason = if record.kind == MarkerKind::IgnoreMember {
                    SkipReason::Ignored
                } else {
                    SkipReason::ExplicitImplementation
                };
                return Decision::Skip(skipped(candidate, reason, record));
            }
        }

        let rename = consumer
            .iter()
            .chain(
                candidate
                    .path
                    .iter()
                    .flat_map(|via| self.markers.member(via, alias)),
            )
            .find(|record| matches!(record.kind, MarkerKind::RenameMember { .. }))
            .cloned();

        Decision::Emit { rename }
    }
}

fn sorted(properties: &[PropertyModel]) -> Vec<&PropertyModel> {
    let mut out: Vec<&PropertyModel> = properties.iter().collect();
    out.sort_by(|a, b| a.alias.cmp(&b.alias));
    out
}

fn skipped(candidate: &Candidate<'_>, reason: SkipReason, record: &MarkerRecord) -> SkippedMember {
    SkippedMember {
        property_alias: candidate.property.alias.clone(),
        provenance: candidate.provenance.clone(),
        reason,
        marker_type: record.type_alias.clone(),
        location: record.location.clone(),
    }
}

/// Derives the accessor from the property's generated name.
fn derived_accessor(
    ty: &ContentType,
    property: &PropertyModel,
) -> Result<String, GenerationError> {
    let name = to_snake_case(&property.generated_name);
    if is_valid_identifier(&name) || is_keyword(&name) {
        Ok(escape_identifier(&name))
    } else {
        Err(GenerationError::InvalidName {
            type_alias: ty.alias.clone(),
            property_alias: property.alias.clone(),
            name,
        })
    }
}

/// Validates a name chosen by a rename marker. Keywords are rejected.
fn explicit_accessor(
    ty: &ContentType,
    property: &PropertyModel,
    name: &str,
) -> Result<String, GenerationError> {
    if is_valid_identifier(name) {
        Ok(name.to_string())
    } else {
        Err(GenerationError::InvalidName {
            type_alias: ty.alias.clone(),
            property_alias: property.alias.clone(),
            name: name.to_string(),
        })
    }
}

fn check_collisions(ty: &ContentType, members: &[ResolvedMember]) -> Result<(), GenerationError> {
    let mut taken: HashMap<&str, &str> = HashMap::new();
    for member in members {
        let name = member.accessor_name.trim_start_matches("r#");
        if RESERVED_NAMES.contains(&name) {
            return Err(GenerationError::NameCollision {
                type_alias: ty.alias.clone(),
                property_alias: member.property.alias.clone(),
                name: name.to_string(),
                other: format!("the reserved model method '{}'", name),
            });
        }
        if let Some(first) = taken.insert(name, &member.property.alias) {
            return Err(GenerationError::NameCollision {
                type_alias: ty.alias.clone(),
                property_alias: member.property.alias.clone(),
                name: name.to_string(),
                other: format!("property '{}'", first),
            });
        }
    }
    Ok(())
}
