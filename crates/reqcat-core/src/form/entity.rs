//! Editable entity kinds.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::rules::{FieldRule, RuleSet};

/// The kinds of entity the forms create and edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// `proyectos`.
    Project,
    /// `requerimientos`.
    Requirement,
    /// `casos-uso`; the kind relation types are defined for.
    UseCase,
    /// `historias-usuario`, with estimation points and business value.
    UserStory,
}

impl EntityKind {
    /// Every entity kind.
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Project,
        EntityKind::Requirement,
        EntityKind::UseCase,
        EntityKind::UserStory,
    ];

    /// Stable name used in configuration and CLI arguments.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Project => "project",
            EntityKind::Requirement => "requirement",
            EntityKind::UseCase => "use_case",
            EntityKind::UserStory => "user_story",
        }
    }

    /// Collection endpoint unless configured otherwise.
    pub fn default_collection(&self) -> &'static str {
        match self {
            EntityKind::Project => "proyectos",
            EntityKind::Requirement => "requerimientos",
            EntityKind::UseCase => "casos-uso",
            EntityKind::UserStory => "historias-usuario",
        }
    }

    /// Id field names of a loaded entity, tried before the generic `id`.
    pub fn id_fields(&self) -> &'static [&'static str] {
        match self {
            EntityKind::Project => &["proyecto_id"],
            EntityKind::Requirement => &["requerimiento_id"],
            EntityKind::UseCase => &["caso_uso_id"],
            EntityKind::UserStory => &["historia_usuario_id"],
        }
    }

    /// Validation rules for the entity's scalar fields.
    pub fn rules(&self) -> RuleSet {
        use FieldRule::*;

        match self {
            EntityKind::Project => RuleSet::new()
                .field("nombre", [Required, MinLength(3), MaxLength(100)])
                .field("descripcion", [MaxLength(500)]),
            EntityKind::Requirement => RuleSet::new()
                .field("nombre", [Required, MinLength(3), MaxLength(150)])
                .field("descripcion", [Required, MinLength(10), MaxLength(2000)]),
            EntityKind::UseCase => RuleSet::new()
                .field("nombre", [Required, MinLength(3), MaxLength(100)])
                .field("descripcion", [MaxLength(1000)])
                .field("precondiciones", [MaxLength(1000)])
                .field("postcondiciones", [MaxLength(1000)]),
            EntityKind::UserStory => RuleSet::new()
                .field("titulo", [Required, MinLength(5), MaxLength(150)])
                .field("descripcion", [Required])
                .field("puntos_estimacion", [Range { min: 0.0, max: 100.0 }])
                .field("valor_negocio", [Range { min: 1.0, max: 10.0 }]),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "project" | "proyecto" => Ok(EntityKind::Project),
            "requirement" | "requerimiento" => Ok(EntityKind::Requirement),
            "use_case" | "caso_uso" => Ok(EntityKind::UseCase),
            "user_story" | "historia_usuario" => Ok(EntityKind::UserStory),
            other => Err(format!("unknown entity kind: {}", other)),
        }
    }
}
