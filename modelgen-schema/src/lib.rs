//! # Modelgen Schema
//!
//! In-memory content type schema.
//!
//! This crate provides:
//! - Content type and property definitions
//! - A validated, read-only schema graph with id and alias lookups
//! - Inheritance and mixin composition queries
//! - Identifier and case conversion helpers for code generation

pub mod error;
pub mod model;
pub mod naming;
pub mod types;
pub mod validation;

pub use error::SchemaError;
pub use model::{ComposedMixin, SchemaModel};
pub use naming::{escape_identifier, is_keyword, is_valid_identifier, to_pascal_case, to_snake_case};
pub use types::{ContentType, PropertyModel, TypeId};

pub use modelgen_core::ItemKind;
