//! Marker records produced by the scanner.

/// Position of a marker in a source document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceLocation {
    /// Logical document name.
    pub document: String,
    /// 1-based line.
    pub line: usize,
    /// 1-based column.
    pub column: usize,
}

impl SourceLocation {
    /// Creates a location.
    pub fn new(document: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            document: document.into(),
            line,
            column,
        }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.document, self.line, self.column)
    }
}

/// What a marker asks the generator to do.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    /// Hand-written code implements the member.
    ExplicitImplementation,
    /// The member (or whole type) must not be generated.
    IgnoreMember,
    /// Generate the member (or type) under another name.
    RenameMember {
        /// Replacement identifier.
        to: String,
    },
    /// The consuming type does not implement a composed member.
    NotImplemented,
}

impl std::fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ExplicitImplementation => f.write_str("explicit implementation"),
            Self::IgnoreMember => f.write_str("ignore"),
            Self::RenameMember { to } => write!(f, "rename to '{}'", to),
            Self::NotImplemented => f.write_str("not implemented"),
        }
    }
}

/// One marker found in a source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerRecord {
    /// Alias of the content type the marker applies to.
    pub type_alias: String,
    /// Alias of the property, or `None` for a type-level marker.
    pub property_alias: Option<String>,
    /// Marker kind.
    pub kind: MarkerKind,
    /// Where the marker was found.
    pub location: SourceLocation,
}

impl MarkerRecord {
    /// Returns true if the marker targets the whole type.
    #[must_use]
    pub fn is_type_level(&self) -> bool {
        self.property_alias.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_display() {
        let loc = SourceLocation::new("page.rs", 12, 5);
        assert_eq!(loc.to_string(), "page.rs:12:5");
    }

    #[test]
    fn test_marker_kind_display() {
        assert_eq!(MarkerKind::IgnoreMember.to_string(), "ignore");
        assert_eq!(
            MarkerKind::RenameMember {
                to: "heading".to_string()
            }
            .to_string(),
            "rename to 'heading'"
        );
    }
}
