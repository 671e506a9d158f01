//! Marker symbol table.
//!
//! Maps attribute names to the marker they stand for. Only the last path
//! segment is compared, so `#[implement_property(..)]` and
//! `#[modelgen::implement_property(..)]` are the same marker.

use crate::marker::MarkerKind;
use std::collections::BTreeMap;

/// Whether a marker applies to a member or to a whole type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerScope {
    /// Member marker; the owning type is the enclosing `impl` or `struct`.
    Member,
    /// Type marker; the type alias is the first argument.
    Type,
}

/// A recognized marker attribute and its argument shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerSymbol {
    /// `implement_property("alias")`
    ImplementProperty,
    /// `ignore_property("alias")`
    IgnoreProperty,
    /// `rename_property("alias", "name")`
    RenameProperty,
    /// `not_implemented("alias")`
    NotImplemented,
    /// `ignore_model("typeAlias")`
    IgnoreModel,
    /// `rename_model("typeAlias", "Name")`
    RenameModel,
}

impl MarkerSymbol {
    /// Returns the default attribute name.
    #[must_use]
    pub const fn default_name(&self) -> &'static str {
        match self {
            Self::ImplementProperty => "implement_property",
            Self::IgnoreProperty => "ignore_property",
            Self::RenameProperty => "rename_property",
            Self::NotImplemented => "not_implemented",
            Self::IgnoreModel => "ignore_model",
            Self::RenameModel => "rename_model",
        }
    }

    /// Returns the scope of the marker.
    #[must_use]
    pub const fn scope(&self) -> MarkerScope {
        match self {
            Self::IgnoreModel | Self::RenameModel => MarkerScope::Type,
            _ => MarkerScope::Member,
        }
    }

    /// Returns the number of string arguments the marker takes.
    #[must_use]
    pub const fn arity(&self) -> usize {
        match self {
            Self::RenameProperty | Self::RenameModel => 2,
            _ => 1,
        }
    }

    /// Builds the marker kind from the arguments after the target alias.
    #[must_use]
    pub fn kind(&self, rest: &[String]) -> Option<MarkerKind> {
        match self {
            Self::ImplementProperty => Some(MarkerKind::ExplicitImplementation),
            Self::IgnoreProperty | Self::IgnoreModel => Some(MarkerKind::IgnoreMember),
            Self::NotImplemented => Some(MarkerKind::NotImplemented),
            Self::RenameProperty | Self::RenameModel => rest
                .first()
                .map(|to| MarkerKind::RenameMember { to: to.clone() }),
        }
    }

    /// All built-in symbols.
    pub const ALL: [MarkerSymbol; 6] = [
        Self::ImplementProperty,
        Self::IgnoreProperty,
        Self::RenameProperty,
        Self::NotImplemented,
        Self::IgnoreModel,
        Self::RenameModel,
    ];
}

/// Attribute names recognized as markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerSymbols {
    names: BTreeMap<String, MarkerSymbol>,
}

impl MarkerSymbols {
    /// Creates an empty table.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            names: BTreeMap::new(),
        }
    }

    /// Registers an attribute name for a marker.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, symbol: MarkerSymbol) -> Self {
        self.register(name, symbol);
        self
    }

    /// Registers an attribute name for a marker.
    pub fn register(&mut self, name: impl Into<String>, symbol: MarkerSymbol) {
        self.names.insert(name.into(), symbol);
    }

    /// Looks up an attribute name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<MarkerSymbol> {
        self.names.get(name).copied()
    }

    /// Looks up an attribute path by its last segment.
    #[must_use]
    pub fn lookup(&self, path: &syn::Path) -> Option<MarkerSymbol> {
        path.segments
            .last()
            .and_then(|segment| self.get(&segment.ident.to_string()))
    }

    /// Returns the number of registered names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if no names are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for MarkerSymbols {
    fn default() -> Self {
        MarkerSymbol::ALL
            .iter()
            .fold(Self::empty(), |table, symbol| {
                table.with(symbol.default_name(), *symbol)
            })
    }
}
