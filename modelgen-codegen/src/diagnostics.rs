//! Non-fatal diagnostics collected during a generation pass.

use modelgen_scanner::{ScanWarning, SourceLocation};
use thiserror::Error;

/// A warning reported alongside the generated files.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    /// Raised while scanning existing sources.
    #[error("{0}")]
    Scan(ScanWarning),

    /// Two mixins declare the same property alias; the first one wins.
    #[error(
        "content type '{type_alias}': property '{property_alias}' from mixin '{dropped}' is shadowed by mixin '{kept}'"
    )]
    ShadowedMember {
        /// Consuming type.
        type_alias: String,
        /// Shared property alias.
        property_alias: String,
        /// Mixin whose member is emitted.
        kept: String,
        /// Mixin whose member is dropped.
        dropped: String,
    },

    /// A marker that has no effect where it was placed.
    #[error(
        "content type '{type_alias}': marker on '{property_alias}' at {location} has no effect: {reason}"
    )]
    IneffectiveMarker {
        /// Type the marker targets.
        type_alias: String,
        /// Property the marker targets.
        property_alias: String,
        /// Where the marker is.
        location: SourceLocation,
        /// Why it was ignored.
        reason: &'static str,
    },
}

impl From<ScanWarning> for Diagnostic {
    fn from(warning: ScanWarning) -> Self {
        Self::Scan(warning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shadowed_member_message() {
        let diagnostic = Diagnostic::ShadowedMember {
            type_alias: "page".to_string(),
            property_alias: "title".to_string(),
            kept: "seo".to_string(),
            dropped: "social".to_string(),
        };
        assert_eq!(
            diagnostic.to_string(),
            "content type 'page': property 'title' from mixin 'social' is shadowed by mixin 'seo'"
        );
    }

    #[test]
    fn test_scan_warning_passes_through() {
        let warning = ScanWarning::UnknownType {
            location: SourceLocation::new("a.rs", 2, 1),
            name: "Ghost".to_string(),
        };
        let diagnostic: Diagnostic = warning.clone().into();
        assert_eq!(diagnostic.to_string(), warning.to_string());
    }
}
