//! Registry metadata for generated models.

/// Kind of item a content type describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum ItemKind {
    /// Document (content) type.
    #[default]
    Document,
    /// Media type.
    Media,
    /// Member type.
    Member,
}

impl ItemKind {
    /// Returns the variant name as written in generated code.
    #[must_use]
    pub const fn variant_name(&self) -> &'static str {
        match self {
            Self::Document => "Document",
            Self::Media => "Media",
            Self::Member => "Member",
        }
    }

    /// Returns a lowercase label for diagnostics and doc comments.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Media => "media",
            Self::Member => "member",
        }
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the generated model registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelInfo {
    /// Content type id.
    pub id: u32,
    /// Content type alias.
    pub alias: &'static str,
    /// Name of the generated Rust type.
    pub type_name: &'static str,
    /// Item kind.
    pub kind: ItemKind,
}

impl ModelInfo {
    /// Finds the row for a content type alias.
    #[must_use]
    pub fn find<'a>(models: &'a [ModelInfo], alias: &str) -> Option<&'a ModelInfo> {
        models.iter().find(|info| info.alias == alias)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODELS: &[ModelInfo] = &[
        ModelInfo {
            id: 1,
            alias: "home",
            type_name: "Home",
            kind: ItemKind::Document,
        },
        ModelInfo {
            id: 2,
            alias: "image",
            type_name: "Image",
            kind: ItemKind::Media,
        },
    ];

    #[test]
    fn test_find_by_alias() {
        let info = ModelInfo::find(MODELS, "image").expect("image registered");
        assert_eq!(info.type_name, "Image");
        assert_eq!(info.kind, ItemKind::Media);
        assert!(ModelInfo::find(MODELS, "missing").is_none());
    }

    #[test]
    fn test_item_kind_names() {
        assert_eq!(ItemKind::Member.variant_name(), "Member");
        assert_eq!(ItemKind::Media.to_string(), "media");
        assert_eq!(ItemKind::default(), ItemKind::Document);
    }
}
