//! # Modelgen Core
//!
//! Runtime types and traits that generated content models compile against.
//!
//! This crate provides:
//! - Item kinds for content, media and member types
//! - Typed property values read from a published element
//! - The [`PublishedElement`] and [`PublishedModel`] traits
//! - Registry rows describing every generated model

pub mod element;
pub mod info;
pub mod value;

pub use element::{PublishedElement, PublishedModel};
pub use info::{ItemKind, ModelInfo};
pub use value::{ContentKey, PropertyValue};

pub use chrono::NaiveDateTime;
