//! # Modelgen Scanner
//!
//! Finds marker attributes in existing Rust sources.
//!
//! Hand-written code layered over generated models opts members out,
//! renames them, or takes over their implementation with attributes such
//! as `#[implement_property("alias")]`. This crate provides:
//! - The marker symbol table and marker records
//! - A `syn`-based scanner that ignores comments and string literals
//! - The marker index consulted during member resolution

pub mod error;
pub mod index;
pub mod marker;
pub mod scanner;
pub mod source;
pub mod symbols;

pub use error::{ScanError, ScanWarning};
pub use index::MarkerIndex;
pub use marker::{MarkerKind, MarkerRecord, SourceLocation};
pub use scanner::{ScanOutcome, SourceScanner};
pub use source::SourceSet;
pub use symbols::{MarkerScope, MarkerSymbol, MarkerSymbols};
