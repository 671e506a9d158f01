//! Rust code generation modules.

pub mod accessors;
pub mod model;
pub mod registry;

pub use accessors::{AccessorShape, ScalarShape};
pub use model::ModelGenerator;
pub use registry::{RegistryEntry, RegistryGenerator};

use std::collections::BTreeSet;

/// Settings shared by every generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitSettings {
    /// Namespace stamped into file headers.
    pub namespace: String,
    /// Path generated code uses to reach the runtime types.
    pub runtime_path: String,
    /// Generator version stamped into file headers.
    pub tool_version: String,
}

impl Default for EmitSettings {
    fn default() -> Self {
        Self {
            namespace: "models".to_string(),
            runtime_path: "modelgen::core".to_string(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl EmitSettings {
    /// Generates the banner at the top of every file.
    #[must_use]
    pub fn header(&self) -> String {
        let mut output = String::new();
        output.push_str(
            "//------------------------------------------------------------------------------\n",
        );
        output.push_str("// <auto-generated>\n");
        output.push_str(&format!(
            "//   This code was generated by modelgen v{}.\n",
            self.tool_version
        ));
        output.push_str("//\n");
        output.push_str(&format!(
            "//   Namespace: {}\n",
            single_line(&self.namespace)
        ));
        output.push_str("//\n");
        output.push_str("//   Changes to this file will be lost if the code is regenerated.\n");
        output.push_str("// </auto-generated>\n");
        output.push_str(
            "//------------------------------------------------------------------------------\n\n",
        );
        output
    }

    /// Generates a `use` line for the runtime items a file needs.
    #[must_use]
    pub fn runtime_use(&self, items: &BTreeSet<&str>) -> String {
        match items.len() {
            0 => String::new(),
            1 => format!(
                "use {}::{};\n",
                self.runtime_path,
                items.iter().next().copied().unwrap_or_default()
            ),
            _ => format!(
                "use {}::{{{}}};\n",
                self.runtime_path,
                items.iter().copied().collect::<Vec<_>>().join(", ")
            ),
        }
    }
}

/// Collapses text onto one line for use in `//` and `///` comments.
pub(crate) fn single_line(text: &str) -> String {
    text.split(|c: char| c.is_control())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
