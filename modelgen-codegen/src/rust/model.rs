//! Model struct code generation.

use std::collections::BTreeSet;

use crate::error::GenerationError;
use crate::plan::{GenerationPlan, Provenance, ResolvedMember};
use crate::rust::accessors::AccessorShape;
use crate::rust::{EmitSettings, single_line};

/// Generator for one model file.
pub struct ModelGenerator<'a> {
    settings: &'a EmitSettings,
}

impl<'a> ModelGenerator<'a> {
    /// Creates a new model generator.
    #[must_use]
    pub fn new(settings: &'a EmitSettings) -> Self {
        Self { settings }
    }

    /// Generates the file for a resolved type.
    ///
    /// # Errors
    /// Returns `GenerationError::Template` if a member's value type has no
    /// accessor template.
    pub fn generate(&self, plan: &GenerationPlan) -> Result<String, GenerationError> {
        let shapes = plan
            .members
            .iter()
            .map(|member| {
                AccessorShape::parse(&member.property.value_type).ok_or_else(|| {
                    GenerationError::template(
                        &plan.type_alias,
                        &member.property.alias,
                        &member.property.value_type,
                    )
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut runtime = BTreeSet::from(["ItemKind", "PublishedElement", "PublishedModel"]);
        if !shapes.is_empty() {
            runtime.insert("PropertyValue");
        }
        runtime.extend(shapes.iter().filter_map(|s| s.scalar().runtime_item()));

        let mut output = self.settings.header();
        output.push_str(&self.settings.runtime_use(&runtime));
        output.push_str("use std::sync::Arc;\n\n");

        output.push_str(&self.generate_struct(plan));
        output.push_str(&format!("impl {} {{\n", plan.model_name));
        output.push_str(&self.generate_constructor());
        for (member, shape) in plan.members.iter().zip(&shapes) {
            output.push('\n');
            output.push_str(&self.generate_accessor(member, *shape));
        }
        output.push_str("}\n\n");
        output.push_str(&self.generate_model_impl(plan));

        Ok(output)
    }

    fn generate_struct(&self, plan: &GenerationPlan) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "/// Model for the `{}` {} type.\n",
            single_line(&plan.type_alias),
            plan.kind.label()
        ));
        output.push_str("#[derive(Clone)]\n");
        output.push_str(&format!("pub struct {} {{\n", plan.model_name));
        output.push_str("    element: Arc<dyn PublishedElement>,\n");
        output.push_str("}\n\n");
        output
    }

    fn generate_constructor(&self) -> String {
        let mut output = String::new();
        output.push_str("    /// Wraps a published element.\n");
        output.push_str("    #[must_use]\n");
        output.push_str("    pub fn new(element: Arc<dyn PublishedElement>) -> Self {\n");
        output.push_str("        Self { element }\n");
        output.push_str("    }\n\n");

        output.push_str("    /// Returns the wrapped element.\n");
        output.push_str("    #[must_use]\n");
        output.push_str("    pub fn element(&self) -> &Arc<dyn PublishedElement> {\n");
        output.push_str("        &self.element\n");
        output.push_str("    }\n");
        output
    }

    fn generate_accessor(&self, member: &ResolvedMember, shape: AccessorShape) -> String {
        let alias = single_line(&member.property.alias);
        let origin = match &member.provenance {
            Provenance::Local => String::new(),
            Provenance::Inherited { from } => format!(" (inherited from `{}`)", single_line(from)),
            Provenance::Composed { via } => format!(" (composed via `{}`)", single_line(via)),
        };

        let mut output = String::new();
        output.push_str(&format!(
            "    /// Value of the `{}` property{}.\n",
            alias, origin
        ));
        output.push_str("    #[must_use]\n");
        output.push_str(&format!(
            "    pub fn {}(&self) -> {} {{\n",
            member.accessor_name,
            shape.return_type()
        ));
        output.push_str(&shape.body(&member.property.alias));
        output.push_str("    }\n");
        output
    }

    fn generate_model_impl(&self, plan: &GenerationPlan) -> String {
        let mut output = String::new();
        output.push_str(&format!("impl PublishedModel for {} {{\n", plan.model_name));
        output.push_str(&format!(
            "    const TYPE_ALIAS: &'static str = {:?};\n",
            plan.type_alias
        ));
        output.push_str(&format!(
            "    const ITEM_KIND: ItemKind = ItemKind::{};\n\n",
            plan.kind.variant_name()
        ));
        output.push_str("    fn from_element(element: Arc<dyn PublishedElement>) -> Self {\n");
        output.push_str("        Self::new(element)\n");
        output.push_str("    }\n\n");
        output.push_str("    fn element(&self) -> &Arc<dyn PublishedElement> {\n");
        output.push_str("        &self.element\n");
        output.push_str("    }\n");
        output.push_str("}\n");
        output
    }
}
