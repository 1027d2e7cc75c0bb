//! The canonical catalog entry.

use serde::Serialize;
use serde_json::{Map, Value};

/// One normalized row of a lookup table.
///
/// Entries are immutable once ingested; a reload rebuilds the whole list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
    /// Canonical id, unique within its catalog.
    pub id: String,
    /// Human-readable label.
    pub label: String,
    /// Source key, or a slug of the label.
    pub key: String,
    /// Free-text description (empty when absent).
    pub description: String,
    /// Display color.
    pub color: String,
    /// Numeric level, e.g. priority weight.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<i64>,
    /// False only when the source explicitly says so.
    pub active: bool,
    /// The original item fields.
    pub extra: Map<String, Value>,
}

impl CatalogEntry {
    /// Create an entry with the given id, label, and key.
    pub fn new(id: impl Into<String>, label: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            key: key.into(),
            description: String::new(),
            color: super::FALLBACK_COLOR.to_string(),
            level: None,
            active: true,
            extra: Map::new(),
        }
    }

    /// The id as a positive integer, when it is one.
    pub fn numeric_id(&self) -> Option<i64> {
        self.id.parse::<i64>().ok().filter(|id| *id > 0)
    }

    /// Look up an original source field.
    pub fn extra_field(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_id() {
        assert_eq!(CatalogEntry::new("5", "Alta", "alta").numeric_id(), Some(5));
        assert_eq!(CatalogEntry::new("0", "Cero", "cero").numeric_id(), None);
        assert_eq!(CatalogEntry::new("abc", "Texto", "texto").numeric_id(), None);
    }

    #[test]
    fn test_new_defaults() {
        let entry = CatalogEntry::new("1", "Media", "media");
        assert!(entry.active);
        assert!(entry.description.is_empty());
        assert_eq!(entry.color, super::super::FALLBACK_COLOR);
    }
}
