//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits.
//!
//! ```ignore
//! use modelgen::prelude::*;
//! ```

// Runtime types
pub use modelgen_core::{
    ContentKey, ItemKind, ModelInfo, NaiveDateTime, PropertyValue, PublishedElement,
    PublishedModel,
};

// Schema types
pub use modelgen_schema::{ContentType, PropertyModel, SchemaError, SchemaModel, TypeId};

// Scanner types
pub use modelgen_scanner::{MarkerSymbol, MarkerSymbols, SourceSet};

// Generator types
pub use modelgen_codegen::{
    CodegenError, Diagnostic, GenerationError, GenerationPlan, GenerationReport, Generator,
    GeneratorBuilder, SkipReason,
};

// Marker attributes
pub use modelgen_derive::{
    ignore_model, ignore_property, implement_property, not_implemented, rename_model,
    rename_property,
};
