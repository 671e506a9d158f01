//! # Modelgen Codegen
//!
//! Resolves content type members and generates Rust model source.
//!
//! This crate provides:
//! - Member resolution across inheritance and mixin composition
//! - Marker handling for hand-written overrides, renames and opt-outs
//! - Deterministic model and registry source generation
//! - The generation pipeline and its per-type report

pub mod diagnostics;
pub mod error;
pub mod generator;
pub mod plan;
pub mod resolver;
pub mod rust;

pub use diagnostics::Diagnostic;
pub use error::{CodegenError, GenerationError};
pub use generator::{GenerationReport, Generator, GeneratorBuilder};
pub use plan::{GenerationPlan, Provenance, ResolvedMember, SkipReason, SkippedMember};
pub use resolver::MemberResolver;

use modelgen_scanner::SourceSet;
use modelgen_schema::ContentType;

/// Generates models for a type list with default settings.
///
/// # Arguments
/// * `types` - Every content type of the schema
/// * `sources` - Existing source documents to scan for markers
///
/// # Returns
/// The per-type generation report.
///
/// # Errors
/// Returns `CodegenError::Schema` if the type list is not a valid schema.
pub fn generate_models(
    types: Vec<ContentType>,
    sources: &SourceSet,
) -> Result<GenerationReport, CodegenError> {
    Generator::builder().build().generate_from_types(types, sources)
}
