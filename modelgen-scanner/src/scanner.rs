//! Marker scanning over `syn` syntax trees.
//!
//! Scanning works on the parsed tree, not the text, so markers inside
//! comments, doc comments or string literals are never picked up. Member
//! markers are attributed to the declared self type of the enclosing
//! `impl` block (or the `struct` they decorate), which lets several
//! documents contribute `impl` blocks for the same model.

use crate::error::{ScanError, ScanWarning};
use crate::marker::{MarkerKind, MarkerRecord, SourceLocation};
use crate::source::SourceSet;
use crate::symbols::{MarkerScope, MarkerSymbol, MarkerSymbols};
use modelgen_schema::SchemaModel;
use std::collections::HashMap;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Attribute, ImplItem, Item, LitStr, Token, Type};

/// Result of scanning a whole source set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    /// Markers resolved to schema aliases, in document then source order.
    pub markers: Vec<MarkerRecord>,
    /// Non-fatal problems.
    pub warnings: Vec<ScanWarning>,
    /// Number of documents that parsed.
    pub documents_scanned: usize,
}

/// Who a marker was attached to, before resolving against the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Target {
    /// Declared Rust type name of the enclosing `impl` or `struct`.
    TypeName(String),
    /// Type alias given explicitly in the marker.
    Alias(String),
}

#[derive(Debug, Clone)]
struct RawMarker {
    target: Target,
    property_alias: Option<String>,
    kind: MarkerKind,
    location: SourceLocation,
}

#[derive(Debug, Default)]
struct DocumentScan {
    markers: Vec<RawMarker>,
    warnings: Vec<ScanWarning>,
}

/// Scanner for marker attributes.
#[derive(Debug, Clone, Copy)]
pub struct SourceScanner<'a> {
    symbols: &'a MarkerSymbols,
}

impl<'a> SourceScanner<'a> {
    /// Creates a scanner recognizing the given markers.
    #[must_use]
    pub fn new(symbols: &'a MarkerSymbols) -> Self {
        Self { symbols }
    }

    /// Scans every document and resolves markers against the schema.
    ///
    /// Documents that fail to parse are skipped with a warning; the rest of
    /// the set is still scanned.
    #[must_use]
    pub fn scan(&self, sources: &SourceSet, schema: &SchemaModel) -> ScanOutcome {
        let mut outcome = ScanOutcome::default();
        let mut raw = Vec::new();

        for (name, text) in sources.iter() {
            match self.scan_document(name, text) {
                Ok(scan) => {
                    outcome.documents_scanned += 1;
                    raw.extend(scan.markers);
                    outcome.warnings.extend(scan.warnings);
                }
                Err(error) => {
                    tracing::warn!("Skipping source document {}: {}", name, error);
                    outcome.warnings.push(ScanWarning::DocumentSkipped { error });
                }
            }
        }

        let names = type_names(schema, &raw);
        for marker in raw {
            let alias = match &marker.target {
                Target::TypeName(name) => names.get(name.as_str()).cloned(),
                Target::Alias(alias) => schema.by_alias(alias).map(|t| t.alias.clone()),
            };
            match alias {
                Some(type_alias) => outcome.markers.push(MarkerRecord {
                    type_alias,
                    property_alias: marker.property_alias,
                    kind: marker.kind,
                    location: marker.location,
                }),
                None => {
                    let name = match marker.target {
                        Target::TypeName(name) | Target::Alias(name) => name,
                    };
                    outcome.warnings.push(ScanWarning::UnknownType {
                        location: marker.location,
                        name,
                    });
                }
            }
        }

        tracing::debug!(
            "Scanned {} of {} source documents, found {} markers",
            outcome.documents_scanned,
            sources.len(),
            outcome.markers.len()
        );

        outcome
    }

    /// Parses one document and collects its raw markers.
    fn scan_document(&self, name: &str, text: &str) -> Result<DocumentScan, ScanError> {
        let file = syn::parse_file(text).map_err(|e| {
            let start = e.span().start();
            ScanError::Syntax {
                location: SourceLocation::new(name, start.line, start.column + 1),
                message: e.to_string(),
            }
        })?;

        let mut scan = DocumentScan::default();
        self.scan_items(&file.items, name, &mut scan);
        Ok(scan)
    }

    fn scan_items(&self, items: &[Item], document: &str, scan: &mut DocumentScan) {
        for item in items {
            match item {
                Item::Impl(imp) => {
                    let owner = self_type_name(&imp.self_ty);
                    self.scan_attrs(&imp.attrs, owner.as_deref(), document, scan);
                    for member in &imp.items {
                        let attrs = match member {
                            ImplItem::Fn(f) => &f.attrs,
                            ImplItem::Const(c) => &c.attrs,
                            ImplItem::Type(t) => &t.attrs,
                            ImplItem::Macro(m) => &m.attrs,
                            _ => continue,
                        };
                        self.scan_attrs(attrs, owner.as_deref(), document, scan);
                    }
                }
                Item::Struct(s) => {
                    let owner = s.ident.to_string();
                    self.scan_attrs(&s.attrs, Some(&owner), document, scan);
                    for field in &s.fields {
                        self.scan_attrs(&field.attrs, Some(&owner), document, scan);
                    }
                }
                Item::Mod(m) => {
                    self.scan_attrs(&m.attrs, None, document, scan);
                    if let Some((_, nested)) = &m.content {
                        self.scan_items(nested, document, scan);
                    }
                }
                other => self.scan_attrs(item_attrs(other), None, document, scan),
            }
        }
    }

    fn scan_attrs(
        &self,
        attrs: &[Attribute],
        owner: Option<&str>,
        document: &str,
        scan: &mut DocumentScan,
    ) {
        for attr in attrs {
            let Some(symbol) = self.symbols.lookup(attr.path()) else {
                continue;
            };
            let start = attr.span().start();
            let location = SourceLocation::new(document, start.line, start.column + 1);

            match self.read_marker(attr, symbol, owner, location) {
                Ok(marker) => scan.markers.push(marker),
                Err(warning) => scan.warnings.push(warning),
            }
        }
    }

    fn read_marker(
        &self,
        attr: &Attribute,
        symbol: MarkerSymbol,
        owner: Option<&str>,
        location: SourceLocation,
    ) -> Result<RawMarker, ScanWarning> {
        let marker_name = attr
            .path()
            .segments
            .last()
            .map(|s| s.ident.to_string())
            .unwrap_or_default();
        let invalid = |message: String| ScanWarning::MarkerSkipped {
            error: ScanError::invalid_marker(location.clone(), marker_name.clone(), message),
        };

        let args: Vec<String> = attr
            .parse_args_with(Punctuated::<LitStr, Token![,]>::parse_terminated)
            .map_err(|e| invalid(format!("expected string arguments: {}", e)))?
            .iter()
            .map(LitStr::value)
            .collect();

        if args.len() != symbol.arity() {
            return Err(invalid(format!(
                "expected {} string argument{}, found {}",
                symbol.arity(),
                if symbol.arity() == 1 { "" } else { "s" },
                args.len()
            )));
        }
        if args.iter().any(|a| a.trim().is_empty()) {
            return Err(invalid("arguments must not be empty".to_string()));
        }

        let kind = symbol
            .kind(&args[1..])
            .ok_or_else(|| invalid("missing replacement name".to_string()))?;

        match symbol.scope() {
            MarkerScope::Type => Ok(RawMarker {
                target: Target::Alias(args[0].clone()),
                property_alias: None,
                kind,
                location,
            }),
            MarkerScope::Member => {
                let Some(owner) = owner else {
                    return Err(ScanWarning::MisplacedMarker {
                        location,
                        marker: marker_name,
                    });
                };
                Ok(RawMarker {
                    target: Target::TypeName(owner.to_string()),
                    property_alias: Some(args[0].clone()),
                    kind,
                    location,
                })
            }
        }
    }
}

/// Maps declared Rust type names to schema aliases.
///
/// Both the schema's generated names and any names assigned through a
/// type-level rename marker resolve to the type.
fn type_names(schema: &SchemaModel, raw: &[RawMarker]) -> HashMap<String, String> {
    let mut names: HashMap<String, String> = schema
        .types()
        .iter()
        .map(|t| (t.generated_name.clone(), t.alias.clone()))
        .collect();

    for marker in raw {
        if let (Target::Alias(alias), None, MarkerKind::RenameMember { to }) =
            (&marker.target, &marker.property_alias, &marker.kind)
            && let Some(ty) = schema.by_alias(alias)
        {
            names.entry(to.clone()).or_insert_with(|| ty.alias.clone());
        }
    }

    names
}

/// Returns the last path segment of an `impl` self type.
fn self_type_name(ty: &Type) -> Option<String> {
    match ty {
        Type::Path(path) => path.path.segments.last().map(|s| s.ident.to_string()),
        Type::Paren(inner) => self_type_name(&inner.elem),
        Type::Group(inner) => self_type_name(&inner.elem),
        _ => None,
    }
}

fn item_attrs(item: &Item) -> &[Attribute] {
    match item {
        Item::Const(i) => &i.attrs,
        Item::Enum(i) => &i.attrs,
        Item::ExternCrate(i) => &i.attrs,
        Item::Fn(i) => &i.attrs,
        Item::ForeignMod(i) => &i.attrs,
        Item::Impl(i) => &i.attrs,
        Item::Macro(i) => &i.attrs,
        Item::Mod(i) => &i.attrs,
        Item::Static(i) => &i.attrs,
        Item::Struct(i) => &i.attrs,
        Item::Trait(i) => &i.attrs,
        Item::TraitAlias(i) => &i.attrs,
        Item::Type(i) => &i.attrs,
        Item::Union(i) => &i.attrs,
        Item::Use(i) => &i.attrs,
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modelgen_core::ItemKind;
    use modelgen_schema::{ContentType, PropertyModel};

    fn schema() -> SchemaModel {
        SchemaModel::new(vec![
            ContentType::new(1, "seoComposition", ItemKind::Document)
                .mixin()
                .with_property(PropertyModel::new("metaDescription", "text")),
            ContentType::new(2, "page", ItemKind::Document)
                .with_mixin(1)
                .with_property(PropertyModel::new("title", "text")),
        ])
        .expect("valid schema")
    }

    fn scan(sources: SourceSet) -> ScanOutcome {
        let symbols = MarkerSymbols::default();
        SourceScanner::new(&symbols).scan(&sources, &schema())
    }

    #[test]
    fn test_scan_explicit_implementation_on_method() {
        let code = r#"
use modelgen::implement_property;

impl Page {
    #[implement_property("metaDescription")]
    pub fn meta_description(&self) -> Option<&str> {
        Some("...")
    }
}
"#;
        let outcome = scan(SourceSet::new().with("page.rs", code));

        assert!(outcome.warnings.is_empty());
        assert_eq!(outcome.documents_scanned, 1);
        assert_eq!(outcome.markers.len(), 1);
        let marker = &outcome.markers[0];
        assert_eq!(marker.type_alias, "page");
        assert_eq!(marker.property_alias.as_deref(), Some("metaDescription"));
        assert_eq!(marker.kind, MarkerKind::ExplicitImplementation);
        assert_eq!(marker.location.document, "page.rs");
        assert_eq!(marker.location.line, 5);
        assert_eq!(marker.location.column, 5);
    }

    #[test]
    fn test_scan_ignores_comments_and_strings() {
        let code = r##"
impl SeoComposition {
    // #[implement_property("metaDescription")]
    /// #[ignore_property("metaDescription")]
    pub fn note(&self) -> &'static str {
        "#[implement_property(\"metaDescription\")]"
    }
}
"##;
        let outcome = scan(SourceSet::new().with("seo.rs", code));
        assert!(outcome.markers.is_empty());
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_scan_impl_level_and_trait_impl_markers() {
        let code = r#"
#[ignore_property("title")]
#[rename_property("metaDescription", "description")]
impl Page {}

#[not_implemented("metaDescription")]
impl crate::models::SeoCompositionModel for crate::models::Page {}
"#;
        let outcome = scan(SourceSet::new().with("page.rs", code));
        let kinds: Vec<&MarkerKind> = outcome.markers.iter().map(|m| &m.kind).collect();
        assert_eq!(
            kinds,
            vec![
                &MarkerKind::IgnoreMember,
                &MarkerKind::RenameMember {
                    to: "description".to_string()
                },
                &MarkerKind::NotImplemented,
            ]
        );
        assert!(outcome.markers.iter().all(|m| m.type_alias == "page"));
    }

    #[test]
    fn test_scan_struct_and_nested_module() {
        let code = r#"
mod hand_written {
    #[implement_property("metaDescription")]
    pub struct SeoComposition;
}
"#;
        let outcome = scan(SourceSet::new().with("seo.rs", code));
        assert_eq!(outcome.markers.len(), 1);
        assert_eq!(outcome.markers[0].type_alias, "seoComposition");
    }

    #[test]
    fn test_scan_type_level_markers() {
        let code = r#"
#[rename_model("page", "WebPage")]
#[ignore_model("seoComposition")]
mod model_config {}

impl WebPage {
    #[implement_property("title")]
    fn title(&self) -> &str { "" }
}
"#;
        let outcome = scan(SourceSet::new().with("config.rs", code));
        assert!(outcome.warnings.is_empty(), "{:?}", outcome.warnings);
        assert_eq!(outcome.markers.len(), 3);

        assert!(outcome.markers[0].is_type_level());
        assert_eq!(outcome.markers[0].type_alias, "page");
        assert_eq!(
            outcome.markers[0].kind,
            MarkerKind::RenameMember {
                to: "WebPage".to_string()
            }
        );
        assert_eq!(outcome.markers[1].type_alias, "seoComposition");
        assert_eq!(outcome.markers[1].kind, MarkerKind::IgnoreMember);

        // Renamed model name resolves back to the alias.
        assert_eq!(outcome.markers[2].type_alias, "page");
        assert_eq!(outcome.markers[2].property_alias.as_deref(), Some("title"));
    }

    #[test]
    fn test_scan_malformed_document_is_skipped() {
        let sources = SourceSet::new()
            .with("broken.rs", "impl Page {\n    fn oops() -> {}\n}\n")
            .with(
                "page.rs",
                "impl Page { #[implement_property(\"title\")] fn title(&self) {} }",
            );
        let outcome = scan(sources);

        assert_eq!(outcome.documents_scanned, 1);
        assert_eq!(outcome.markers.len(), 1);
        assert_eq!(outcome.warnings.len(), 1);
        match &outcome.warnings[0] {
            ScanWarning::DocumentSkipped { error } => {
                assert_eq!(error.location().document, "broken.rs");
                assert_eq!(error.location().line, 2);
            }
            other => panic!("unexpected warning: {:?}", other),
        }
    }

    #[test]
    fn test_scan_invalid_marker_arguments() {
        let code = r#"
impl Page {
    #[rename_property("title")]
    fn a(&self) {}

    #[implement_property]
    fn b(&self) {}

    #[ignore_property(42)]
    fn c(&self) {}

    #[implement_property("title")]
    fn d(&self) {}
}
"#;
        let outcome = scan(SourceSet::new().with("page.rs", code));
        assert_eq!(outcome.markers.len(), 1);
        assert_eq!(outcome.warnings.len(), 3);
        assert!(
            outcome
                .warnings
                .iter()
                .all(|w| matches!(w, ScanWarning::MarkerSkipped { .. }))
        );
    }

    #[test]
    fn test_scan_unknown_type_and_misplaced_marker() {
        let code = r#"
impl Unrelated {
    #[implement_property("title")]
    fn title(&self) {}
}

#[implement_property("title")]
fn free_function() {}

#[ignore_model("doesNotExist")]
const _: () = ();
"#;
        let outcome = scan(SourceSet::new().with("misc.rs", code));
        assert!(outcome.markers.is_empty());
        assert_eq!(outcome.warnings.len(), 3);
        assert!(matches!(
            &outcome.warnings[0],
            ScanWarning::MisplacedMarker { .. }
        ));
        assert!(matches!(
            &outcome.warnings[1],
            ScanWarning::UnknownType { name, .. } if name == "Unrelated"
        ));
        assert!(matches!(
            &outcome.warnings[2],
            ScanWarning::UnknownType { name, .. } if name == "doesNotExist"
        ));
    }

    #[test]
    fn test_scan_path_qualified_marker() {
        let code = r#"
impl Page {
    #[modelgen::implement_property("title")]
    fn title(&self) {}
}
"#;
        let outcome = scan(SourceSet::new().with("page.rs", code));
        assert_eq!(outcome.markers.len(), 1);
    }

    #[test]
    fn test_scan_empty_source_set() {
        let outcome = scan(SourceSet::new());
        assert_eq!(outcome, ScanOutcome::default());
    }
}
