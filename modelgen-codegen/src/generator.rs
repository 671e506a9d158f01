//! Generation pipeline.
//!
//! A pass runs in fixed phases: every source document is scanned before any
//! type is resolved, the markers are frozen into a [`MarkerIndex`], each
//! type is resolved and emitted on its own, model names are checked across
//! the pass, and the registry is written last.

use std::collections::{BTreeMap, HashMap};

use modelgen_scanner::{MarkerIndex, MarkerSymbols, ScanWarning, SourceScanner, SourceSet};
use modelgen_schema::{ContentType, SchemaModel, escape_identifier, to_snake_case};

use crate::diagnostics::Diagnostic;
use crate::error::{CodegenError, GenerationError};
use crate::plan::{GenerationPlan, SkippedMember};
use crate::resolver::MemberResolver;
use crate::rust::{EmitSettings, ModelGenerator, RegistryEntry, RegistryGenerator};

/// File stem of the registry.
const REGISTRY_STEM: &str = "models";

/// Suffix of every generated file.
const FILE_SUFFIX: &str = ".generated.rs";

/// Builder for configuring a generator.
#[derive(Debug, Clone)]
pub struct GeneratorBuilder {
    namespace: String,
    output_dir: Option<String>,
    runtime_path: String,
    symbols: MarkerSymbols,
}

impl GeneratorBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        let defaults = EmitSettings::default();
        Self {
            namespace: defaults.namespace,
            output_dir: None,
            runtime_path: defaults.runtime_path,
            symbols: MarkerSymbols::default(),
        }
    }

    /// Sets the namespace stamped into file headers.
    #[must_use]
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Sets the directory prefixed to every output file name.
    #[must_use]
    pub fn output_dir(mut self, dir: impl Into<String>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Sets the path generated code uses to reach the runtime types.
    #[must_use]
    pub fn runtime_path(mut self, path: impl Into<String>) -> Self {
        self.runtime_path = path.into();
        self
    }

    /// Sets the marker attribute names recognized in existing sources.
    #[must_use]
    pub fn marker_symbols(mut self, symbols: MarkerSymbols) -> Self {
        self.symbols = symbols;
        self
    }

    /// Builds the generator.
    #[must_use]
    pub fn build(self) -> Generator {
        tracing::debug!(
            "Building generator for namespace {} ({} marker names)",
            self.namespace,
            self.symbols.len()
        );
        Generator {
            settings: EmitSettings {
                namespace: self.namespace,
                runtime_path: self.runtime_path,
                ..EmitSettings::default()
            },
            output_dir: self
                .output_dir
                .map(|dir| dir.trim_end_matches('/').to_string())
                .filter(|dir| !dir.is_empty()),
            symbols: self.symbols,
        }
    }
}

impl Default for GeneratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Generates model source for a schema.
#[derive(Debug, Clone)]
pub struct Generator {
    settings: EmitSettings,
    output_dir: Option<String>,
    symbols: MarkerSymbols,
}

impl Generator {
    /// Returns a builder.
    #[must_use]
    pub fn builder() -> GeneratorBuilder {
        GeneratorBuilder::new()
    }

    /// Returns the emit settings.
    #[must_use]
    pub fn settings(&self) -> &EmitSettings {
        &self.settings
    }

    /// Returns the output key of a generated file.
    #[must_use]
    pub fn output_path(&self, file_name: &str) -> String {
        match &self.output_dir {
            Some(dir) => format!("{}/{}", dir, file_name),
            None => file_name.to_string(),
        }
    }

    /// Returns the output key of the registry file.
    #[must_use]
    pub fn registry_path(&self) -> String {
        self.output_path(&format!("{}{}", REGISTRY_STEM, FILE_SUFFIX))
    }

    /// Validates a type list and runs a generation pass.
    ///
    /// # Errors
    /// Returns `CodegenError::Schema` if the types do not form a valid
    /// schema; nothing is generated in that case.
    pub fn generate_from_types(
        &self,
        types: Vec<ContentType>,
        sources: &SourceSet,
    ) -> Result<GenerationReport, CodegenError> {
        let schema = SchemaModel::new(types)?;
        Ok(self.generate(&schema, sources))
    }

    /// Runs a generation pass.
    ///
    /// Per-type failures are recorded in the report and do not stop other
    /// types from being generated.
    #[must_use]
    pub fn generate(&self, schema: &SchemaModel, sources: &SourceSet) -> GenerationReport {
        let mut report = GenerationReport::default();

        let (index, scan_warnings) = self.index_sources(schema, sources);
        report
            .warnings
            .extend(scan_warnings.into_iter().map(Diagnostic::Scan));

        let mut types: Vec<&ContentType> = schema.types().iter().collect();
        types.sort_by(|a, b| a.alias.cmp(&b.alias));

        let resolver = MemberResolver::new(schema, &index);
        let models = ModelGenerator::new(&self.settings);
        let mut emitted = Vec::new();
        for ty in types {
            if index.is_type_ignored(&ty.alias) {
                tracing::debug!("Content type {} is ignored", ty.alias);
                report.ignored.push(ty.alias.clone());
                continue;
            }

            let plan = match resolver.resolve(ty) {
                Ok(plan) => plan,
                Err(error) => {
                    report.record_failure(error);
                    continue;
                }
            };
            tracing::debug!(
                "Resolved {}: {} members, {} skipped",
                plan.type_alias,
                plan.members.len(),
                plan.skipped.len()
            );
            report.warnings.extend(plan.warnings.iter().cloned());

            match models.generate(&plan) {
                Ok(code) => emitted.push((plan, code)),
                Err(error) => report.record_failure(error),
            }
        }

        let mut stems: HashMap<String, String> = HashMap::new();
        stems.insert(REGISTRY_STEM.to_string(), "model registry".to_string());
        let mut entries = Vec::new();
        for (plan, code) in emitted {
            let stem = to_snake_case(&plan.model_name);
            if let Some(other_alias) = stems.get(&stem) {
                report.record_failure(GenerationError::ModelNameCollision {
                    type_alias: plan.type_alias.clone(),
                    other_alias: other_alias.clone(),
                    name: plan.model_name.clone(),
                });
                continue;
            }
            stems.insert(stem.clone(), plan.type_alias.clone());
            report.accept(self, plan, code, &stem, &mut entries);
        }

        let registry = RegistryGenerator::new(&self.settings).generate(&entries);
        report.files.insert(self.registry_path(), registry);

        tracing::info!("Model generation finished: {}", report.summary());
        report
    }

    /// Resolves a single type without emitting anything.
    ///
    /// # Errors
    /// Returns `CodegenError::Schema` if the alias is unknown, or
    /// `CodegenError::Generation` if the type cannot be resolved.
    pub fn plan(
        &self,
        schema: &SchemaModel,
        sources: &SourceSet,
        alias: &str,
    ) -> Result<GenerationPlan, CodegenError> {
        let ty = schema.require(alias)?;
        let (index, _) = self.index_sources(schema, sources);
        Ok(MemberResolver::new(schema, &index).resolve(ty)?)
    }

    fn index_sources(
        &self,
        schema: &SchemaModel,
        sources: &SourceSet,
    ) -> (MarkerIndex, Vec<ScanWarning>) {
        let outcome = SourceScanner::new(&self.symbols).scan(sources, schema);
        (MarkerIndex::build(outcome.markers), outcome.warnings)
    }
}

impl Default for Generator {
    fn default() -> Self {
        GeneratorBuilder::new().build()
    }
}

/// Outcome of a generation pass, per type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationReport {
    /// Generated files keyed by output path.
    pub files: BTreeMap<String, String>,
    /// Aliases of generated types, in alias order.
    pub succeeded: Vec<String>,
    /// Aliases of types excluded by a type-level marker.
    pub ignored: Vec<String>,
    /// Members not emitted, per generated type.
    pub skipped: BTreeMap<String, Vec<SkippedMember>>,
    /// Failed types and why.
    pub failed: BTreeMap<String, GenerationError>,
    /// Non-fatal findings.
    pub warnings: Vec<Diagnostic>,
}

impl GenerationReport {
    /// Returns true if no type failed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Returns a generated file's text.
    #[must_use]
    pub fn file(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    /// Returns the skipped members of a type.
    #[must_use]
    pub fn skipped_members(&self, alias: &str) -> &[SkippedMember] {
        self.skipped.get(alias).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns a one-line summary of the pass.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} generated, {} ignored, {} failed, {} members skipped, {} warnings",
            self.succeeded.len(),
            self.ignored.len(),
            self.failed.len(),
            self.skipped.values().map(Vec::len).sum::<usize>(),
            self.warnings.len()
        )
    }

    fn record_failure(&mut self, error: GenerationError) {
        tracing::warn!("Failed to generate model: {}", error);
        self.failed.insert(error.type_alias().to_string(), error);
    }

    fn accept(
        &mut self,
        generator: &Generator,
        plan: GenerationPlan,
        code: String,
        stem: &str,
        entries: &mut Vec<RegistryEntry>,
    ) {
        let file_name = format!("{}{}", stem, FILE_SUFFIX);
        self.files.insert(generator.output_path(&file_name), code);
        self.succeeded.push(plan.type_alias.clone());
        entries.push(RegistryEntry {
            type_id: plan.type_id,
            type_alias: plan.type_alias.clone(),
            model_name: plan.model_name,
            module_name: escape_identifier(stem),
            file_name,
            kind: plan.kind,
        });
        if !plan.skipped.is_empty() {
            self.skipped.insert(plan.type_alias, plan.skipped);
        }
    }
}
