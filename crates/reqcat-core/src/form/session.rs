//! The edit session: one form's working copy of an entity.

use serde_json::{Map, Value};
use tracing::{debug, info};

use super::binder::{FormBinder, RELATIONS_FIELD};
use super::rules::{RuleKind, Violation};
use super::EntityKind;
use crate::catalog::{resolve, CatalogEntry, CatalogKind};
use crate::error::{Error, ValidationErrors};
use crate::relation::{parse_positive, RelationStager};

/// Whether the session creates a new entity or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionMode {
    /// Submits with a POST to the collection.
    Create,
    /// Submits with a PUT to the entity.
    Edit { entity_id: String },
}

/// Lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Accepting edits.
    Open,
    /// Accepted by the backend.
    Submitted,
    /// Discarded without sending.
    Cancelled,
}

/// Working fields, catalog selections, and staged relations of one form.
///
/// Created by [`FormBinder::open_new`] or [`FormBinder::open_existing`];
/// closed by a successful [`submit`](Self::submit) or by [`cancel`](Self::cancel).
pub struct EditSession<'a> {
    binder: &'a FormBinder,
    kind: EntityKind,
    mode: SessionMode,
    fields: Map<String, Value>,
    priority_id: Option<String>,
    state_id: Option<String>,
    relations: RelationStager,
    state: SessionState,
}

impl<'a> EditSession<'a> {
    pub(super) fn new(
        binder: &'a FormBinder,
        kind: EntityKind,
        mode: SessionMode,
        fields: Map<String, Value>,
        priority_id: Option<String>,
        state_id: Option<String>,
        relations: RelationStager,
    ) -> Self {
        Self {
            binder,
            kind,
            mode,
            fields,
            priority_id,
            state_id,
            relations,
            state: SessionState::Open,
        }
    }

    /// Kind of the entity being edited.
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Create or edit.
    pub fn mode(&self) -> &SessionMode {
        &self.mode
    }

    /// Id of the edited entity, for edit sessions.
    pub fn entity_id(&self) -> Option<&str> {
        match &self.mode {
            SessionMode::Create => None,
            SessionMode::Edit { entity_id } => Some(entity_id),
        }
    }

    /// Lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether the session still accepts edits and submission.
    pub fn is_open(&self) -> bool {
        self.state == SessionState::Open
    }

    /// Scalar fields.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// One scalar field.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Set a scalar field.
    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Remove a scalar field.
    pub fn remove_field(&mut self, name: &str) -> Option<Value> {
        self.fields.remove(name)
    }

    /// Selected priority entry.
    pub fn priority(&self) -> Option<&'a CatalogEntry> {
        self.selected(CatalogKind::Priority, self.priority_id.as_deref())
    }

    /// Selected state entry.
    pub fn state_entry(&self) -> Option<&'a CatalogEntry> {
        self.selected(CatalogKind::State, self.state_id.as_deref())
    }

    fn selected(&self, kind: CatalogKind, id: Option<&str>) -> Option<&'a CatalogEntry> {
        let binder: &'a FormBinder = self.binder;
        let id = id?;
        binder.catalogs.entries(kind).iter().find(|e| e.id == id)
    }

    /// Select a priority by id, key, or label. Unresolvable tokens leave
    /// the selection unchanged and return false.
    pub fn select_priority(&mut self, token: &str) -> bool {
        match resolve(self.binder.catalogs.entries(CatalogKind::Priority), token) {
            Some(entry) => {
                self.priority_id = Some(entry.id.clone());
                true
            }
            None => false,
        }
    }

    /// Select a state by id, key, or label.
    pub fn select_state(&mut self, token: &str) -> bool {
        match resolve(self.binder.catalogs.entries(CatalogKind::State), token) {
            Some(entry) => {
                self.state_id = Some(entry.id.clone());
                true
            }
            None => false,
        }
    }

    /// Clear the priority selection.
    pub fn clear_priority(&mut self) {
        self.priority_id = None;
    }

    /// Clear the state selection.
    pub fn clear_state(&mut self) {
        self.state_id = None;
    }

    /// Staged relations.
    pub fn relations(&self) -> &RelationStager {
        &self.relations
    }

    /// Staged relations, for editing.
    pub fn relations_mut(&mut self) -> &mut RelationStager {
        &mut self.relations
    }

    /// Every violation of the kind's rules, plus self relations when editing.
    pub fn validate(&self) -> Vec<Violation> {
        let mut violations = self.binder.validate(self.kind, &self.fields);

        if let Some(entity_id) = self.entity_id() {
            for edge in self.relations.edges() {
                let target = edge.target_entity_id.trim();
                let same = match (parse_positive(target), parse_positive(entity_id)) {
                    (Some(a), Some(b)) => a == b,
                    _ => !target.is_empty() && target == entity_id.trim(),
                };
                if same {
                    violations.push(Violation::new(
                        RELATIONS_FIELD,
                        RuleKind::SelfRelation,
                        format!("relation {} cannot target the entity itself", edge.client_id),
                    ));
                }
            }
        }

        violations
    }

    /// The submission body: scalar fields, canonical selections, and the
    /// persistable relations.
    pub fn payload(&self) -> Result<Value, Error> {
        let mut body = self.fields.clone();
        body.insert("prioridad_id".to_string(), numeric_or_null(self.priority_id.as_deref()));
        body.insert("estado_id".to_string(), numeric_or_null(self.state_id.as_deref()));
        body.insert(
            RELATIONS_FIELD.to_string(),
            serde_json::to_value(self.relations.to_persistable())?,
        );
        Ok(Value::Object(body))
    }

    /// Validate and send the session in one call.
    ///
    /// Validation failures never reach the backend. A backend failure is
    /// returned as is and leaves the session open and unchanged, so the
    /// caller can retry.
    pub async fn submit(&mut self) -> Result<Value, Error> {
        if !self.is_open() {
            return Err(Error::SessionClosed);
        }

        let violations = self.validate();
        if !violations.is_empty() {
            debug!(
                entity = %self.kind,
                violations = violations.len(),
                "Submission blocked by validation"
            );
            return Err(ValidationErrors::new(violations).into());
        }

        let body = self.payload()?;
        let binder = self.binder;
        let response = match &self.mode {
            SessionMode::Create => {
                let endpoint = binder.entities.collection(self.kind);
                binder.backend.post(endpoint, &body, &binder.token).await?
            }
            SessionMode::Edit { entity_id } => {
                let endpoint = binder.entities.item(self.kind, entity_id);
                binder.backend.put(&endpoint, &body, &binder.token).await?
            }
        };

        info!(
            entity = %self.kind,
            mode = ?self.mode,
            relations = self.relations.to_persistable().len(),
            "Entity submitted"
        );

        self.state = SessionState::Submitted;
        self.relations.clear();
        Ok(response)
    }

    /// Discard the session. Nothing is sent.
    pub fn cancel(&mut self) {
        if !self.is_open() {
            return;
        }
        info!(entity = %self.kind, mode = ?self.mode, "Edit session cancelled");
        self.state = SessionState::Cancelled;
        self.relations.clear();
    }
}

fn numeric_or_null(id: Option<&str>) -> Value {
    id.and_then(|id| id.trim().parse::<i64>().ok())
        .map(Value::from)
        .unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_or_null() {
        assert_eq!(numeric_or_null(Some("5")), Value::from(5));
        assert_eq!(numeric_or_null(Some("media")), Value::Null);
        assert_eq!(numeric_or_null(None), Value::Null);
    }
}
