//! Marker index.
//!
//! Built once after every document has been scanned, then only read. Member
//! markers are keyed by `(type alias, property alias)`, type markers by type
//! alias, so resolving one type never needs to look at another type's scan.

use crate::marker::{MarkerKind, MarkerRecord};
use std::collections::HashMap;

/// Read-only lookup over scanned markers.
#[derive(Debug, Clone, Default)]
pub struct MarkerIndex {
    members: HashMap<(String, String), Vec<MarkerRecord>>,
    types: HashMap<String, Vec<MarkerRecord>>,
    len: usize,
}

impl MarkerIndex {
    /// Builds the index, keeping markers for one key in input order.
    #[must_use]
    pub fn build(records: impl IntoIterator<Item = MarkerRecord>) -> Self {
        let mut index = Self::default();
        for record in records {
            index.len += 1;
            match &record.property_alias {
                Some(property) => index
                    .members
                    .entry((record.type_alias.clone(), property.clone()))
                    .or_default()
                    .push(record),
                None => index
                    .types
                    .entry(record.type_alias.clone())
                    .or_default()
                    .push(record),
            }
        }
        index
    }

    /// Returns the markers recorded for a member of a type.
    #[must_use]
    pub fn member(&self, type_alias: &str, property_alias: &str) -> &[MarkerRecord] {
        self.members
            .get(&(type_alias.to_string(), property_alias.to_string()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns the type-level markers recorded for a type.
    #[must_use]
    pub fn type_markers(&self, type_alias: &str) -> &[MarkerRecord] {
        self.types.get(type_alias).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns the first member marker matching `pred`.
    pub fn find_member(
        &self,
        type_alias: &str,
        property_alias: &str,
        pred: impl Fn(&MarkerKind) -> bool,
    ) -> Option<&MarkerRecord> {
        self.member(type_alias, property_alias)
            .iter()
            .find(|record| pred(&record.kind))
    }

    /// Returns true if the type carries a type-level ignore marker.
    #[must_use]
    pub fn is_type_ignored(&self, type_alias: &str) -> bool {
        self.type_markers(type_alias)
            .iter()
            .any(|record| record.kind == MarkerKind::IgnoreMember)
    }

    /// Returns the name from the first type-level rename marker.
    #[must_use]
    pub fn type_rename(&self, type_alias: &str) -> Option<&MarkerRecord> {
        self.type_markers(type_alias)
            .iter()
            .find(|record| matches!(record.kind, MarkerKind::RenameMember { .. }))
    }

    /// Returns the total number of markers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no markers were indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marker::SourceLocation;

    fn record(ty: &str, prop: Option<&str>, kind: MarkerKind, line: usize) -> MarkerRecord {
        MarkerRecord {
            type_alias: ty.to_string(),
            property_alias: prop.map(str::to_string),
            kind,
            location: SourceLocation::new("a.rs", line, 1),
        }
    }

    #[test]
    fn test_member_lookup_keeps_order() {
        let index = MarkerIndex::build(vec![
            record(
                "page",
                Some("title"),
                MarkerKind::RenameMember {
                    to: "heading".to_string(),
                },
                1,
            ),
            record("page", Some("title"), MarkerKind::IgnoreMember, 2),
            record("page", Some("body"), MarkerKind::ExplicitImplementation, 3),
        ]);

        assert_eq!(index.len(), 3);
        let markers = index.member("page", "title");
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].location.line, 1);
        assert_eq!(markers[1].location.line, 2);
        assert!(index.member("page", "missing").is_empty());
        assert!(index.member("other", "title").is_empty());

        let ignore = index.find_member("page", "title", |kind| {
            *kind == MarkerKind::IgnoreMember
        });
        assert_eq!(ignore.map(|r| r.location.line), Some(2));
        assert!(
            index
                .find_member("page", "body", |kind| *kind == MarkerKind::IgnoreMember)
                .is_none()
        );
    }

    #[test]
    fn test_type_markers() {
        let index = MarkerIndex::build(vec![
            record("legacy", None, MarkerKind::IgnoreMember, 1),
            record(
                "home",
                None,
                MarkerKind::RenameMember {
                    to: "HomePage".to_string(),
                },
                2,
            ),
        ]);

        assert!(index.is_type_ignored("legacy"));
        assert!(!index.is_type_ignored("home"));
        assert_eq!(
            index.type_rename("home").map(|r| &r.kind),
            Some(&MarkerKind::RenameMember {
                to: "HomePage".to_string()
            })
        );
        assert!(index.type_rename("legacy").is_none());
        assert!(index.member("home", "title").is_empty());
    }

    #[test]
    fn test_empty_index() {
        let index = MarkerIndex::build(Vec::new());
        assert!(index.is_empty());
        assert!(index.type_markers("page").is_empty());
    }
}
