//! Generation plans.
//!
//! A plan is the resolver's answer for one content type: the members to
//! emit in emission order, and the members that were dropped together with
//! the marker that dropped them.

use modelgen_scanner::SourceLocation;
use modelgen_schema::{ItemKind, PropertyModel, TypeId};

use crate::diagnostics::Diagnostic;

/// Where a member of a type comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Provenance {
    /// Declared on the type itself.
    Local,
    /// Declared on an ancestor.
    Inherited {
        /// Alias of the declaring ancestor.
        from: String,
    },
    /// Declared on a composed mixin.
    Composed {
        /// Alias of the declaring mixin.
        via: String,
    },
}

impl Provenance {
    /// Returns true for members contributed by a mixin.
    #[must_use]
    pub fn is_composed(&self) -> bool {
        matches!(self, Self::Composed { .. })
    }
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => f.write_str("declared locally"),
            Self::Inherited { from } => write!(f, "inherited from {}", from),
            Self::Composed { via } => write!(f, "composed via {}", via),
        }
    }
}

/// A member that will be emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMember {
    /// The property definition.
    pub property: PropertyModel,
    /// Where the member comes from.
    pub provenance: Provenance,
    /// Final accessor identifier, escaped if needed.
    pub accessor_name: String,
    /// Location of the rename marker that chose the name, if any.
    pub renamed_at: Option<SourceLocation>,
}

/// Why a member was not emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// Hand-written code already implements it.
    ExplicitImplementation,
    /// A marker opted it out of generation.
    Ignored,
    /// The consuming type does not implement the composed member.
    NotImplemented,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ExplicitImplementation => f.write_str("explicit implementation found"),
            Self::Ignored => f.write_str("explicitly ignored"),
            Self::NotImplemented => f.write_str("not implemented by consumer"),
        }
    }
}

/// A member that was dropped from generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedMember {
    /// Property alias.
    pub property_alias: String,
    /// Where the member comes from.
    pub provenance: Provenance,
    /// Why it was dropped.
    pub reason: SkipReason,
    /// Type the deciding marker was recorded against.
    pub marker_type: String,
    /// Where the deciding marker is.
    pub location: SourceLocation,
}

impl std::fmt::Display for SkippedMember {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "'{}' ({}): {} at {}",
            self.property_alias, self.provenance, self.reason, self.location
        )
    }
}

/// Resolved members of one content type.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationPlan {
    /// Type id.
    pub type_id: TypeId,
    /// Type alias.
    pub type_alias: String,
    /// Item kind.
    pub kind: ItemKind,
    /// Name of the generated model type.
    pub model_name: String,
    /// Members to emit, in emission order.
    pub members: Vec<ResolvedMember>,
    /// Members not emitted.
    pub skipped: Vec<SkippedMember>,
    /// Non-fatal findings while resolving.
    pub warnings: Vec<Diagnostic>,
}

impl GenerationPlan {
    /// Finds an emitted member by property alias.
    #[must_use]
    pub fn member(&self, property_alias: &str) -> Option<&ResolvedMember> {
        self.members
            .iter()
            .find(|m| m.property.alias == property_alias)
    }

    /// Finds a skipped member by property alias.
    #[must_use]
    pub fn skipped_member(&self, property_alias: &str) -> Option<&SkippedMember> {
        self.skipped
            .iter()
            .find(|m| m.property_alias == property_alias)
    }

    /// Returns the emitted accessor names in order.
    #[must_use]
    pub fn accessor_names(&self) -> Vec<&str> {
        self.members
            .iter()
            .map(|m| m.accessor_name.as_str())
            .collect()
    }
}
