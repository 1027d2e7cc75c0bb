//! Resolving canonical ids, legacy keys, and labels against a catalog.

use super::{slugify, CatalogEntry, CatalogKind};

/// Find the entry a token refers to.
///
/// The token may be a canonical id, a legacy key, or a label. Matching tries
/// exact id, then normalized key, then label slug, returning the first hit.
/// Blank tokens never resolve.
pub fn resolve<'a>(catalog: &'a [CatalogEntry], token: &str) -> Option<&'a CatalogEntry> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }

    if let Some(entry) = catalog.iter().find(|e| e.id == token) {
        return Some(entry);
    }

    let slug = slugify(token);
    catalog
        .iter()
        .find(|e| slugify(&e.key) == slug)
        .or_else(|| catalog.iter().find(|e| slugify(&e.label) == slug))
}

/// The canonical id a token refers to.
pub fn id_of<'a>(catalog: &'a [CatalogEntry], token: &str) -> Option<&'a str> {
    resolve(catalog, token).map(|e| e.id.as_str())
}

/// The entry a new entity starts with.
///
/// The entry keyed by the kind's business default when present, else the
/// first entry in catalog order.
pub fn default_entry(kind: CatalogKind, catalog: &[CatalogEntry]) -> Option<&CatalogEntry> {
    kind.default_key()
        .and_then(|key| catalog.iter().find(|e| e.key == key))
        .or_else(|| catalog.first())
}

/// Resolve a token, falling back to the default entry.
pub fn resolve_or_default<'a>(
    kind: CatalogKind,
    catalog: &'a [CatalogEntry],
    token: Option<&str>,
) -> Option<&'a CatalogEntry> {
    token
        .and_then(|t| resolve(catalog, t))
        .or_else(|| default_entry(kind, catalog))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ingest;
    use serde_json::json;

    fn priorities() -> Vec<CatalogEntry> {
        ingest(
            CatalogKind::Priority,
            &json!([
                { "prioridad_id": 1, "nombre": "Baja" },
                { "prioridad_id": 2, "nombre": "Media" },
                { "prioridad_id": 3, "nombre": "Alta", "key": "ALTA_LEGACY" },
                { "prioridad_id": 4, "nombre": "Muy Alta" }
            ]),
        )
    }

    #[test]
    fn test_id_round_trip() {
        let catalog = priorities();
        for entry in &catalog {
            assert_eq!(resolve(&catalog, &entry.id), Some(entry));
        }
    }

    #[test]
    fn test_legacy_key_and_label() {
        let catalog = priorities();
        assert_eq!(id_of(&catalog, "media"), Some("2"));
        assert_eq!(id_of(&catalog, "muy-alta"), Some("4"));
        assert_eq!(id_of(&catalog, "Muy Alta"), Some("4"));
        assert_eq!(id_of(&catalog, "alta-legacy"), Some("3"));
        assert_eq!(id_of(&catalog, "Alta"), Some("3"));
        assert_eq!(id_of(&catalog, "  baja "), Some("1"));
    }

    #[test]
    fn test_id_match_beats_key_match() {
        let catalog = vec![
            CatalogEntry::new("10", "Diez", "diez"),
            CatalogEntry::new("20", "Veinte", "10"),
        ];
        assert_eq!(id_of(&catalog, "10"), Some("10"));
    }

    #[test]
    fn test_key_match_beats_label_match() {
        let catalog = vec![
            CatalogEntry::new("1", "alta", "primera"),
            CatalogEntry::new("2", "Segunda", "alta"),
        ];
        assert_eq!(id_of(&catalog, "alta"), Some("2"));
    }

    #[test]
    fn test_unresolvable() {
        let catalog = priorities();
        assert!(resolve(&catalog, "urgentisima").is_none());
        assert!(resolve(&catalog, "").is_none());
        assert!(resolve(&catalog, "   ").is_none());
        assert!(resolve(&[], "1").is_none());
    }

    #[test]
    fn test_default_entry() {
        let catalog = priorities();
        assert_eq!(default_entry(CatalogKind::Priority, &catalog).unwrap().id, "2");

        let states = vec![
            CatalogEntry::new("8", "Abierto", "abierto"),
            CatalogEntry::new("9", "Cerrado", "cerrado"),
        ];
        assert_eq!(default_entry(CatalogKind::State, &states).unwrap().id, "8");
        assert!(default_entry(CatalogKind::State, &[]).is_none());
    }

    #[test]
    fn test_resolve_or_default() {
        let catalog = priorities();
        let kind = CatalogKind::Priority;
        assert_eq!(resolve_or_default(kind, &catalog, Some("alta")).unwrap().id, "3");
        assert_eq!(resolve_or_default(kind, &catalog, Some("???")).unwrap().id, "2");
        assert_eq!(resolve_or_default(kind, &catalog, None).unwrap().id, "2");
    }
}
