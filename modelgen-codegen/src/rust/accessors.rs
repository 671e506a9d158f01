//! Accessor templates keyed by value type descriptor.

/// Single-valued property shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarShape {
    /// `text`
    Text,
    /// `integer`
    Integer,
    /// `decimal`
    Decimal,
    /// `boolean`
    Boolean,
    /// `dateTime`
    DateTime,
    /// `contentReference`, `mediaReference` or `memberReference`
    Reference,
}

impl ScalarShape {
    /// Maps a scalar descriptor to its shape.
    #[must_use]
    pub fn from_descriptor(descriptor: &str) -> Option<Self> {
        match descriptor {
            "text" => Some(Self::Text),
            "integer" => Some(Self::Integer),
            "decimal" => Some(Self::Decimal),
            "boolean" => Some(Self::Boolean),
            "dateTime" => Some(Self::DateTime),
            "contentReference" | "mediaReference" | "memberReference" => Some(Self::Reference),
            _ => None,
        }
    }

    /// Returns the Rust type of one value.
    #[must_use]
    pub const fn item_type(&self) -> &'static str {
        match self {
            Self::Text => "&str",
            Self::Integer => "i64",
            Self::Decimal => "f64",
            Self::Boolean => "bool",
            Self::DateTime => "NaiveDateTime",
            Self::Reference => "ContentKey",
        }
    }

    /// Returns the `PropertyValue` projection method.
    #[must_use]
    pub const fn projection(&self) -> &'static str {
        match self {
            Self::Text => "as_text",
            Self::Integer => "as_integer",
            Self::Decimal => "as_decimal",
            Self::Boolean => "as_boolean",
            Self::DateTime => "as_date_time",
            Self::Reference => "as_reference",
        }
    }

    /// Returns the runtime item the accessor's type needs, if any.
    #[must_use]
    pub const fn runtime_item(&self) -> Option<&'static str> {
        match self {
            Self::DateTime => Some("NaiveDateTime"),
            Self::Reference => Some("ContentKey"),
            _ => None,
        }
    }
}

/// Shape of a generated accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessorShape {
    /// One value.
    Scalar(ScalarShape),
    /// `list<T>` of a scalar.
    List(ScalarShape),
}

impl AccessorShape {
    /// Parses a value type descriptor. Returns `None` for unknown
    /// descriptors and nested lists.
    #[must_use]
    pub fn parse(descriptor: &str) -> Option<Self> {
        let descriptor = descriptor.trim();
        if let Some(inner) = descriptor
            .strip_prefix("list<")
            .and_then(|rest| rest.strip_suffix('>'))
        {
            return ScalarShape::from_descriptor(inner.trim()).map(Self::List);
        }
        ScalarShape::from_descriptor(descriptor).map(Self::Scalar)
    }

    /// Returns the scalar shape of one value.
    #[must_use]
    pub const fn scalar(&self) -> ScalarShape {
        match self {
            Self::Scalar(scalar) | Self::List(scalar) => *scalar,
        }
    }

    /// Returns the accessor's return type.
    ///
    /// Booleans read as `false` when absent; other scalars are optional and
    /// lists are empty when absent.
    #[must_use]
    pub fn return_type(&self) -> String {
        match self {
            Self::Scalar(ScalarShape::Boolean) => "bool".to_string(),
            Self::Scalar(scalar) => format!("Option<{}>", scalar.item_type()),
            Self::List(scalar) => format!("Vec<{}>", scalar.item_type()),
        }
    }

    /// Generates the accessor body, indented for an `impl` block.
    ///
    /// # Arguments
    /// * `alias` - Property alias read from the element
    #[must_use]
    pub fn body(&self, alias: &str) -> String {
        let mut output = String::new();
        output.push_str("        self.element\n");
        output.push_str(&format!("            .value({:?})\n", alias));
        match self {
            Self::Scalar(ScalarShape::Boolean) => {
                output.push_str("            .and_then(PropertyValue::as_boolean)\n");
                output.push_str("            .unwrap_or(false)\n");
            }
            Self::Scalar(scalar) => {
                output.push_str(&format!(
                    "            .and_then(PropertyValue::{})\n",
                    scalar.projection()
                ));
            }
            Self::List(scalar) => {
                output.push_str("            .and_then(PropertyValue::as_list)\n");
                output.push_str(&format!(
                    "            .map(|items| items.iter().filter_map(PropertyValue::{}).collect())\n",
                    scalar.projection()
                ));
                output.push_str("            .unwrap_or_default()\n");
            }
        }
        output
    }
}
