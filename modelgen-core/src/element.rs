//! Published element and model traits.
//!
//! The host supplies [`PublishedElement`] implementations; generated models
//! implement [`PublishedModel`] on top of them.

use crate::info::ItemKind;
use crate::value::{ContentKey, PropertyValue};
use std::sync::Arc;

/// Read-only view of a published content, media or member item.
pub trait PublishedElement: Send + Sync {
    /// Returns the key of the item.
    fn key(&self) -> ContentKey;

    /// Returns the alias of the item's content type.
    fn type_alias(&self) -> &str;

    /// Returns the value of the property with the given alias.
    fn value(&self, alias: &str) -> Option<&PropertyValue>;
}

/// Strongly-typed model generated for a content type.
pub trait PublishedModel: Sized {
    /// Alias of the content type this model was generated for.
    const TYPE_ALIAS: &'static str;

    /// Kind of item the content type describes.
    const ITEM_KIND: ItemKind;

    /// Wraps a published element.
    fn from_element(element: Arc<dyn PublishedElement>) -> Self;

    /// Returns the wrapped element.
    fn element(&self) -> &Arc<dyn PublishedElement>;

    /// Wraps the element only if its type alias matches this model.
    fn try_from_element(element: Arc<dyn PublishedElement>) -> Option<Self> {
        if element.type_alias() == Self::TYPE_ALIAS {
            Some(Self::from_element(element))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct TestElement {
        alias: &'static str,
        values: HashMap<String, PropertyValue>,
    }

    impl PublishedElement for TestElement {
        fn key(&self) -> ContentKey {
            ContentKey(7)
        }

        fn type_alias(&self) -> &str {
            self.alias
        }

        fn value(&self, alias: &str) -> Option<&PropertyValue> {
            self.values.get(alias)
        }
    }

    struct Page {
        element: Arc<dyn PublishedElement>,
    }

    impl Page {
        fn title(&self) -> Option<&str> {
            self.element.value("title").and_then(PropertyValue::as_text)
        }
    }

    impl PublishedModel for Page {
        const TYPE_ALIAS: &'static str = "page";
        const ITEM_KIND: ItemKind = ItemKind::Document;

        fn from_element(element: Arc<dyn PublishedElement>) -> Self {
            Self { element }
        }

        fn element(&self) -> &Arc<dyn PublishedElement> {
            &self.element
        }
    }

    fn element(alias: &'static str) -> Arc<dyn PublishedElement> {
        let mut values = HashMap::new();
        values.insert("title".to_string(), PropertyValue::from("Home"));
        Arc::new(TestElement { alias, values })
    }

    #[test]
    fn test_model_wraps_element() {
        let page = Page::from_element(element("page"));
        assert_eq!(page.title(), Some("Home"));
        assert_eq!(page.element().key(), ContentKey(7));
    }

    #[test]
    fn test_try_from_element_checks_alias() {
        assert!(Page::try_from_element(element("page")).is_some());
        assert!(Page::try_from_element(element("article")).is_none());
    }
}
