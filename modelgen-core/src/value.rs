//! Property value types.
//!
//! A published element exposes its property values as [`PropertyValue`]s.
//! Generated accessors project them onto concrete Rust types through the
//! `as_*` helpers below.

use chrono::NaiveDateTime;

/// Identity of a referenced content, media or member item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentKey(pub u32);

impl ContentKey {
    /// Returns the raw numeric key.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ContentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single property value held by a published element.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// Plain or rich text.
    Text(String),
    /// Signed integer.
    Integer(i64),
    /// Decimal number.
    Decimal(f64),
    /// Boolean flag.
    Boolean(bool),
    /// Date and time without zone.
    DateTime(NaiveDateTime),
    /// Reference to another item.
    Reference(ContentKey),
    /// Ordered list of values.
    List(Vec<PropertyValue>),
}

impl PropertyValue {
    /// Returns the text, if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the integer, if this is an integer value.
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the number as a decimal.
    ///
    /// Integer values widen to `f64`; nothing else converts.
    #[must_use]
    pub fn as_decimal(&self) -> Option<f64> {
        match self {
            Self::Decimal(value) => Some(*value),
            Self::Integer(value) => Some(*value as f64),
            _ => None,
        }
    }

    /// Returns the flag, if this is a boolean value.
    #[must_use]
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the date and time, if this is a date value.
    #[must_use]
    pub fn as_date_time(&self) -> Option<NaiveDateTime> {
        match self {
            Self::DateTime(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the referenced key, if this is a reference.
    #[must_use]
    pub fn as_reference(&self) -> Option<ContentKey> {
        match self {
            Self::Reference(key) => Some(*key),
            _ => None,
        }
    }

    /// Returns the items, if this is a list.
    #[must_use]
    pub fn as_list(&self) -> Option<&[PropertyValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Decimal(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<ContentKey> for PropertyValue {
    fn from(value: ContentKey) -> Self {
        Self::Reference(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_text_projection() {
        let value = PropertyValue::from("hello");
        assert_eq!(value.as_text(), Some("hello"));
        assert_eq!(value.as_integer(), None);
        assert_eq!(value.as_boolean(), None);
    }

    #[test]
    fn test_integer_widens_to_decimal() {
        let value = PropertyValue::Integer(3);
        assert_eq!(value.as_integer(), Some(3));
        assert_eq!(value.as_decimal(), Some(3.0));

        let value = PropertyValue::Decimal(2.5);
        assert_eq!(value.as_integer(), None);
        assert_eq!(value.as_decimal(), Some(2.5));
    }

    #[test]
    fn test_date_time_projection() {
        let when = NaiveDate::from_ymd_opt(2024, 3, 1)
            .and_then(|d| d.and_hms_opt(10, 30, 0))
            .expect("valid date");
        let value = PropertyValue::DateTime(when);
        assert_eq!(value.as_date_time(), Some(when));
        assert_eq!(value.as_text(), None);
    }

    #[test]
    fn test_list_projection() {
        let value = PropertyValue::List(vec![
            PropertyValue::from("a"),
            PropertyValue::from(1_i64),
            PropertyValue::from("b"),
        ]);
        let texts: Vec<&str> = value
            .as_list()
            .map(|items| items.iter().filter_map(PropertyValue::as_text).collect())
            .unwrap_or_default();
        assert_eq!(texts, vec!["a", "b"]);
        assert!(PropertyValue::from(true).as_list().is_none());
    }

    #[test]
    fn test_reference_projection() {
        let value = PropertyValue::from(ContentKey(42));
        assert_eq!(value.as_reference(), Some(ContentKey(42)));
        assert_eq!(ContentKey(42).get(), 42);
        assert_eq!(ContentKey(42).to_string(), "#42");
    }
}
