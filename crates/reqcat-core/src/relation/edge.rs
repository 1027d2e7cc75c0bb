//! Staged relation edges.

use std::fmt;

use serde::Serialize;

/// Ephemeral identifier of a staged edge.
///
/// Client ids are assigned locally and never reused within a session. They
/// are distinct from any id the backend assigns.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ClientId(String);

impl ClientId {
    pub(crate) fn from_sequence(n: u64) -> Self {
        Self(format!("new-{}", n))
    }

    /// The id as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Editable field of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeField {
    /// The relation type catalog id.
    RelationType,
    /// The id of the related entity.
    Target,
    /// Free-text description.
    Description,
}

/// A relation between the edited entity and another entity of the same kind.
///
/// Fields hold raw user input until [`to_persistable`](Self::to_persistable).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationEdge {
    /// Local id.
    pub client_id: ClientId,
    /// Backend id, set only for edges loaded from the backend.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persisted_id: Option<String>,
    /// Relation type id as entered.
    pub relation_type_id: String,
    /// Target entity id as entered.
    pub target_entity_id: String,
    /// Description as entered.
    pub description: String,
}

impl RelationEdge {
    pub(crate) fn empty(client_id: ClientId) -> Self {
        Self {
            client_id,
            persisted_id: None,
            relation_type_id: String::new(),
            target_entity_id: String::new(),
            description: String::new(),
        }
    }

    /// Read one field.
    pub fn field(&self, field: EdgeField) -> &str {
        match field {
            EdgeField::RelationType => &self.relation_type_id,
            EdgeField::Target => &self.target_entity_id,
            EdgeField::Description => &self.description,
        }
    }

    pub(crate) fn set(&mut self, field: EdgeField, value: String) {
        match field {
            EdgeField::RelationType => self.relation_type_id = value,
            EdgeField::Target => self.target_entity_id = value,
            EdgeField::Description => self.description = value,
        }
    }

    /// The persistable form, when both ids parse as positive integers.
    pub fn to_persistable(&self) -> Option<PersistableRelation> {
        Some(PersistableRelation {
            relation_type_id: parse_positive(&self.relation_type_id)?,
            target_entity_id: parse_positive(&self.target_entity_id)?,
            description: self.description.clone(),
        })
    }

    /// Whether [`to_persistable`](Self::to_persistable) would keep this edge.
    pub fn is_persistable(&self) -> bool {
        self.to_persistable().is_some()
    }
}

/// The wire form of a relation in a submission payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistableRelation {
    /// Relation type catalog id.
    pub relation_type_id: i64,
    /// Related entity id.
    pub target_entity_id: i64,
    /// Free-text description, possibly empty.
    pub description: String,
}

/// Parse a positive integer id, ignoring surrounding whitespace.
pub fn parse_positive(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok().filter(|n| *n > 0)
}
