//! # Modelgen
//!
//! Strongly typed model generation for CMS content types.
//!
//! Modelgen turns a content type schema into one Rust model per type. It
//! follows inheritance and mixin composition, and it reads existing
//! hand-written code so that members already implemented there are left
//! out of the generated files.
//!
//! ## Features
//!
//! - **Composition aware** - Local, inherited and mixin members with clear shadowing rules
//! - **Source markers** - Hand-written code opts members out, renames them, or takes them over
//! - **Deterministic output** - Byte-stable files that regenerate identically from their own output
//! - **Per-type reporting** - One broken type never hides the rest of the pass
//!
//! ## Quick Start
//!
//! ```ignore
//! use modelgen::prelude::*;
//!
//! let types = vec![
//!     ContentType::new(1, "seoComposition", ItemKind::Document)
//!         .mixin()
//!         .with_property(PropertyModel::new("metaDescription", "text")),
//!     ContentType::new(2, "page", ItemKind::Document).with_mixin(1),
//! ];
//!
//! let report = Generator::builder()
//!     .namespace("Site.Models")
//!     .output_dir("src/models")
//!     .build()
//!     .generate_from_types(types, &SourceSet::new())?;
//!
//! for (path, text) in &report.files {
//!     std::fs::write(path, text)?;
//! }
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`] - Runtime traits and values generated models compile against
//! - [`schema`] - Content type schema and validation
//! - [`scanner`] - Marker scanning of existing sources
//! - [`codegen`] - Member resolution and model generation

pub mod prelude;

/// Runtime traits and values for generated models.
pub mod core {
    pub use modelgen_core::*;
}

/// Content type schema and validation.
pub mod schema {
    pub use modelgen_schema::*;
}

/// Marker scanning of existing sources.
pub mod scanner {
    pub use modelgen_scanner::*;
}

/// Member resolution and model generation.
pub mod codegen {
    pub use modelgen_codegen::*;
}

// Re-export commonly used items at the crate root
pub use modelgen_codegen::{GenerationReport, Generator, GeneratorBuilder};
pub use modelgen_derive::{
    ignore_model, ignore_property, implement_property, not_implemented, rename_model,
    rename_property,
};

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use std::collections::HashMap;
    use std::sync::Arc;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    struct StaticElement {
        alias: &'static str,
        values: HashMap<&'static str, PropertyValue>,
    }

    impl PublishedElement for StaticElement {
        fn key(&self) -> ContentKey {
            ContentKey(1)
        }

        fn type_alias(&self) -> &str {
            self.alias
        }

        fn value(&self, alias: &str) -> Option<&PropertyValue> {
            self.values.get(alias)
        }
    }

    /// Hand-written half of a model, shaped like generated code.
    struct WebPage {
        element: Arc<dyn PublishedElement>,
    }

    #[rename_model("page", "WebPage")]
    impl WebPage {
        #[implement_property("metaDescription")]
        fn meta_description(&self) -> Option<&str> {
            self.element
                .value("metaDescription")
                .and_then(PropertyValue::as_text)
                .or(Some("default description"))
        }
    }

    impl PublishedModel for WebPage {
        const TYPE_ALIAS: &'static str = "page";
        const ITEM_KIND: ItemKind = ItemKind::Document;

        fn from_element(element: Arc<dyn PublishedElement>) -> Self {
            Self { element }
        }

        fn element(&self) -> &Arc<dyn PublishedElement> {
            &self.element
        }
    }

    const HAND_WRITTEN: &str = r#"
#[rename_model("page", "WebPage")]
impl WebPage {
    #[implement_property("metaDescription")]
    fn meta_description(&self) -> Option<&str> {
        None
    }
}
"#;

    fn types() -> Vec<ContentType> {
        vec![
            ContentType::new(1, "seoComposition", ItemKind::Document)
                .mixin()
                .with_property(PropertyModel::new("metaDescription", "text")),
            ContentType::new(2, "page", ItemKind::Document)
                .with_mixin(1)
                .with_property(PropertyModel::new("title", "text")),
        ]
    }

    #[test]
    fn test_markers_pass_through() {
        let element = StaticElement {
            alias: "page",
            values: HashMap::from([("title", PropertyValue::from("Home"))]),
        };
        let page = WebPage::from_element(Arc::new(element));
        assert_eq!(page.meta_description(), Some("default description"));
        assert_eq!(page.element().type_alias(), WebPage::TYPE_ALIAS);
    }

    #[test]
    fn test_generate_through_facade() {
        init_tracing();
        let sources = SourceSet::new().with("web_page.rs", HAND_WRITTEN);
        let report = Generator::builder()
            .namespace("Site.Models")
            .build()
            .generate_from_types(types(), &sources)
            .expect("valid schema");

        assert!(report.is_complete(), "{}", report.summary());
        let page = report.file("web_page.generated.rs").expect("renamed model");
        assert!(page.contains("pub struct WebPage {"));
        assert!(page.contains("use modelgen::core::{"));
        assert!(!page.contains("fn meta_description"));
        assert_eq!(
            report.skipped_members("page")[0].reason,
            SkipReason::ExplicitImplementation
        );
    }

    #[test]
    fn test_schema_errors_surface() {
        init_tracing();
        let mut types = types();
        types.push(ContentType::new(2, "duplicate", ItemKind::Media));
        let err = crate::codegen::generate_models(types, &SourceSet::new())
            .expect_err("duplicate id");
        assert!(matches!(
            err,
            CodegenError::Schema(SchemaError::DuplicateTypeId { .. })
        ));
    }
}
