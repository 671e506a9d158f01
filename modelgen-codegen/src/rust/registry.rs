//! Model registry code generation.

use std::collections::BTreeSet;

use modelgen_schema::{ItemKind, TypeId};

use crate::rust::EmitSettings;

/// One generated model as listed in the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEntry {
    /// Content type id.
    pub type_id: TypeId,
    /// Content type alias.
    pub type_alias: String,
    /// Generated model type name.
    pub model_name: String,
    /// Module identifier, escaped if needed.
    pub module_name: String,
    /// File name of the model, relative to the registry.
    pub file_name: String,
    /// Item kind.
    pub kind: ItemKind,
}

/// Generator for the registry file that ties every model together.
pub struct RegistryGenerator<'a> {
    settings: &'a EmitSettings,
}

impl<'a> RegistryGenerator<'a> {
    /// Creates a new registry generator.
    #[must_use]
    pub fn new(settings: &'a EmitSettings) -> Self {
        Self { settings }
    }

    /// Generates the registry for the given models, in alias order.
    #[must_use]
    pub fn generate(&self, entries: &[RegistryEntry]) -> String {
        let mut entries: Vec<&RegistryEntry> = entries.iter().collect();
        entries.sort_by(|a, b| a.type_alias.cmp(&b.type_alias));

        let mut runtime = BTreeSet::from(["ModelInfo"]);
        if !entries.is_empty() {
            runtime.insert("ItemKind");
        }

        let mut output = self.settings.header();
        output.push_str(&self.settings.runtime_use(&runtime));
        output.push('\n');

        for entry in &entries {
            output.push_str(&format!("#[path = {:?}]\n", entry.file_name));
            output.push_str(&format!("mod {};\n", entry.module_name));
            output.push_str(&format!(
                "pub use self::{}::{};\n\n",
                entry.module_name, entry.model_name
            ));
        }

        output.push_str("/// Every model generated in this pass, ordered by content type alias.\n");
        if entries.is_empty() {
            output.push_str("pub static MODELS: &[ModelInfo] = &[];\n\n");
        } else {
            output.push_str("pub static MODELS: &[ModelInfo] = &[\n");
            for entry in &entries {
                output.push_str("    ModelInfo {\n");
                output.push_str(&format!("        id: {},\n", entry.type_id.0));
                output.push_str(&format!("        alias: {:?},\n", entry.type_alias));
                output.push_str(&format!("        type_name: {:?},\n", entry.model_name));
                output.push_str(&format!(
                    "        kind: ItemKind::{},\n",
                    entry.kind.variant_name()
                ));
                output.push_str("    },\n");
            }
            output.push_str("];\n\n");
        }

        output.push_str("/// Looks up the generated model metadata for a content type alias.\n");
        output.push_str("#[must_use]\n");
        output.push_str("pub fn model_info(alias: &str) -> Option<&'static ModelInfo> {\n");
        output.push_str("    ModelInfo::find(MODELS, alias)\n");
        output.push_str("}\n");

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: u32, alias: &str, model: &str, module: &str) -> RegistryEntry {
        RegistryEntry {
            type_id: TypeId(id),
            type_alias: alias.to_string(),
            model_name: model.to_string(),
            module_name: module.to_string(),
            file_name: format!("{}.generated.rs", module.trim_start_matches("r#")),
            kind: ItemKind::Document,
        }
    }

    #[test]
    fn test_registry_orders_by_alias() {
        let settings = EmitSettings::default();
        let code = RegistryGenerator::new(&settings).generate(&[
            entry(2, "page", "Page", "page"),
            entry(1, "article", "Article", "article"),
            entry(3, "match", "Match", "r#match"),
        ]);

        syn::parse_file(&code).expect("registry parses");
        assert!(code.contains("use modelgen::core::{ItemKind, ModelInfo};\n"));
        assert!(code.contains("#[path = \"page.generated.rs\"]\nmod page;\npub use self::page::Page;\n"));
        assert!(code.contains("#[path = \"match.generated.rs\"]\nmod r#match;\npub use self::r#match::Match;\n"));

        let article = code.find("alias: \"article\"").expect("article row");
        let matched = code.find("alias: \"match\"").expect("match row");
        let page = code.find("alias: \"page\"").expect("page row");
        assert!(article < matched && matched < page);
        assert!(code.contains("        id: 1,\n"));
    }

    #[test]
    fn test_empty_registry() {
        let settings = EmitSettings::default();
        let code = RegistryGenerator::new(&settings).generate(&[]);
        syn::parse_file(&code).expect("registry parses");
        assert!(code.contains("use modelgen::core::ModelInfo;\n"));
        assert!(code.contains("pub static MODELS: &[ModelInfo] = &[];"));
    }
}
