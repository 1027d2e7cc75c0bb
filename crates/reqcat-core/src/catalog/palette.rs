//! Display colors per `(catalog kind, key)`.

use super::CatalogKind;

/// Neutral color used for any key without a palette entry.
pub const FALLBACK_COLOR: &str = "#6b7280";

const PRIORITY: &[(&str, &str)] = &[
    ("baja", "#22c55e"),
    ("media", "#eab308"),
    ("alta", "#f97316"),
    ("muy-alta", "#ef4444"),
    ("critica", "#dc2626"),
];

const STATE: &[(&str, &str)] = &[
    ("pendiente", "#6b7280"),
    ("en-progreso", "#3b82f6"),
    ("en-revision", "#a855f7"),
    ("completado", "#22c55e"),
    ("aprobado", "#16a34a"),
    ("rechazado", "#ef4444"),
    ("cancelado", "#991b1b"),
];

const RELATION_TYPE: &[(&str, &str)] = &[
    ("extiende", "#8b5cf6"),
    ("incluye", "#0ea5e9"),
    ("generaliza", "#14b8a6"),
    ("depende", "#f59e0b"),
];

fn palette(kind: CatalogKind) -> &'static [(&'static str, &'static str)] {
    match kind {
        CatalogKind::Priority => PRIORITY,
        CatalogKind::State => STATE,
        CatalogKind::RelationType => RELATION_TYPE,
        CatalogKind::EstimationUnit => &[],
    }
}

/// Look up the color for a key, falling back to [`FALLBACK_COLOR`].
pub fn color_for(kind: CatalogKind, key: &str) -> &'static str {
    palette(kind)
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, color)| *color)
        .unwrap_or(FALLBACK_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_keys() {
        assert_eq!(color_for(CatalogKind::Priority, "muy-alta"), "#ef4444");
        assert_eq!(color_for(CatalogKind::State, "en-progreso"), "#3b82f6");
        assert_eq!(color_for(CatalogKind::RelationType, "incluye"), "#0ea5e9");
    }

    #[test]
    fn test_fallback() {
        assert_eq!(color_for(CatalogKind::Priority, "urgente"), FALLBACK_COLOR);
        assert_eq!(color_for(CatalogKind::EstimationUnit, "horas"), FALLBACK_COLOR);
        // Keys are only matched within their own catalog.
        assert_eq!(color_for(CatalogKind::State, "alta"), FALLBACK_COLOR);
    }
}
