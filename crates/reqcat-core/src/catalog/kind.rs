//! Catalog types and their declared payload conventions.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// The lookup tables the backend supplies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogKind {
    /// Requirement / use case priorities.
    Priority,
    /// Workflow states.
    State,
    /// Typed relations between entities of the same kind.
    RelationType,
    /// Units used for effort estimation.
    EstimationUnit,
}

impl CatalogKind {
    /// Every catalog kind, in fan-out order.
    pub const ALL: [CatalogKind; 4] = [
        CatalogKind::Priority,
        CatalogKind::State,
        CatalogKind::RelationType,
        CatalogKind::EstimationUnit,
    ];

    /// Stable name used in configuration and CLI arguments.
    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogKind::Priority => "priority",
            CatalogKind::State => "state",
            CatalogKind::RelationType => "relation_type",
            CatalogKind::EstimationUnit => "estimation_unit",
        }
    }

    /// Type-specific container names, tried before the generic `data` field.
    pub fn containers(&self) -> &'static [&'static str] {
        match self {
            CatalogKind::Priority => &["prioridades"],
            CatalogKind::State => &["estados"],
            CatalogKind::RelationType => &["tipos_relacion_cu", "tipos_relacion"],
            CatalogKind::EstimationUnit => &["unidades_estimacion"],
        }
    }

    /// Type-specific id field names, tried before the generic `id` field.
    pub fn id_fields(&self) -> &'static [&'static str] {
        match self {
            CatalogKind::Priority => &["prioridad_id"],
            CatalogKind::State => &["estado_id"],
            CatalogKind::RelationType => &["tipo_relacion_id"],
            CatalogKind::EstimationUnit => &["unidad_estimacion_id"],
        }
    }

    /// Key of the entry a new entity starts with, when the catalog has one.
    pub fn default_key(&self) -> Option<&'static str> {
        match self {
            CatalogKind::Priority => Some("media"),
            CatalogKind::State => Some("pendiente"),
            CatalogKind::RelationType | CatalogKind::EstimationUnit => None,
        }
    }

    /// Endpoint the catalog is fetched from unless configured otherwise.
    pub fn default_endpoint(&self) -> &'static str {
        match self {
            CatalogKind::Priority => "prioridades",
            CatalogKind::State => "estados",
            CatalogKind::RelationType => "tipos-relacion-cu",
            CatalogKind::EstimationUnit => "unidades-estimacion",
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CatalogKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "priority" | "prioridad" | "prioridades" => Ok(CatalogKind::Priority),
            "state" | "estado" | "estados" => Ok(CatalogKind::State),
            "relation_type" | "tipo_relacion" | "tipos_relacion_cu" => {
                Ok(CatalogKind::RelationType)
            }
            "estimation_unit" | "unidad_estimacion" | "unidades_estimacion" => {
                Ok(CatalogKind::EstimationUnit)
            }
            other => Err(format!("unknown catalog kind: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip() {
        for kind in CatalogKind::ALL {
            assert_eq!(kind.as_str().parse::<CatalogKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("prioridades".parse::<CatalogKind>().unwrap(), CatalogKind::Priority);
        assert_eq!("relation-type".parse::<CatalogKind>().unwrap(), CatalogKind::RelationType);
        assert!("colors".parse::<CatalogKind>().is_err());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(CatalogKind::Priority.default_key(), Some("media"));
        assert_eq!(CatalogKind::State.default_key(), Some("pendiente"));
        assert_eq!(CatalogKind::RelationType.default_key(), None);
    }
}
