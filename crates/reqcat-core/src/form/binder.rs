//! Opening edit sessions against loaded catalogs.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{info, warn};

use super::rules::Violation;
use super::session::{EditSession, SessionMode};
use super::EntityKind;
use crate::backend::Backend;
use crate::catalog::extract::{self, id_string};
use crate::catalog::{resolve_or_default, CatalogKind};
use crate::config::EntityConfig;
use crate::loader::CatalogSet;
use crate::relation::{parse_positive, RelationStager};

/// Entity fields holding the priority selection, canonical first.
const PRIORITY_FIELDS: &[&str] = &["prioridad_id", "prioridad"];

/// Entity fields holding the state selection, canonical first.
const STATE_FIELDS: &[&str] = &["estado_id", "estado"];

/// Entity field carrying inline relations.
pub(super) const RELATIONS_FIELD: &str = "relaciones";

/// Produces edit sessions and owns what they share: the backend, the
/// loaded catalogs, and the endpoint layout.
pub struct FormBinder {
    pub(super) backend: Arc<dyn Backend>,
    pub(super) catalogs: CatalogSet,
    pub(super) entities: EntityConfig,
    pub(super) token: String,
}

impl FormBinder {
    /// Create a binder over already-loaded catalogs.
    pub fn new(backend: Arc<dyn Backend>, catalogs: CatalogSet, token: impl Into<String>) -> Self {
        Self {
            backend,
            catalogs,
            entities: EntityConfig::default(),
            token: token.into(),
        }
    }

    /// Use a non-default endpoint layout.
    pub fn with_entity_config(mut self, entities: EntityConfig) -> Self {
        self.entities = entities;
        self
    }

    /// The catalogs selections resolve against.
    pub fn catalogs(&self) -> &CatalogSet {
        &self.catalogs
    }

    /// Swap in freshly loaded catalogs.
    pub fn set_catalogs(&mut self, catalogs: CatalogSet) {
        self.catalogs = catalogs;
    }

    /// The endpoint layout.
    pub fn entity_config(&self) -> &EntityConfig {
        &self.entities
    }

    /// Check scalar fields against the kind's rule set.
    pub fn validate(&self, kind: EntityKind, fields: &Map<String, Value>) -> Vec<Violation> {
        kind.rules().validate(fields)
    }

    /// Open a session for a new entity with default selections.
    pub fn open_new(&self, kind: EntityKind) -> EditSession<'_> {
        let priority = self.default_selection(CatalogKind::Priority, None);
        let state = self.default_selection(CatalogKind::State, None);

        info!(entity = %kind, "Opened create session");

        EditSession::new(
            self,
            kind,
            SessionMode::Create,
            Map::new(),
            priority,
            state,
            RelationStager::new(),
        )
    }

    /// Open a session for an entity loaded from the backend.
    ///
    /// Legacy or canonical catalog values are resolved to canonical ids.
    /// Inline relations take precedence; otherwise existing relations are
    /// fetched once, best effort. An entity without an id opens as a create
    /// session.
    pub async fn open_existing(&self, kind: EntityKind, entity: &Value) -> EditSession<'_> {
        let source = match entity.as_object() {
            Some(fields) => fields.clone(),
            None => {
                warn!(entity = %kind, "Loaded entity is not an object, opening empty form");
                Map::new()
            }
        };

        let id_fields: Vec<&str> = kind.id_fields().iter().copied().chain(["id"]).collect();
        let entity_id = extract::id_field(&source, &id_fields);

        let priority_token = selection_token(&source, PRIORITY_FIELDS, CatalogKind::Priority);
        let state_token = selection_token(&source, STATE_FIELDS, CatalogKind::State);
        let priority = self.stored_selection(CatalogKind::Priority, priority_token.as_deref());
        let state = self.stored_selection(CatalogKind::State, state_token.as_deref());

        let inline_relations = source.get(RELATIONS_FIELD).filter(|v| !v.is_null()).cloned();

        let fields: Map<String, Value> = source
            .into_iter()
            .filter(|(name, _)| {
                !PRIORITY_FIELDS.contains(&name.as_str())
                    && !STATE_FIELDS.contains(&name.as_str())
                    && name != RELATIONS_FIELD
            })
            .collect();

        let mut relations = RelationStager::new();
        match (&inline_relations, &entity_id) {
            (Some(inline), _) => {
                relations.seed(inline);
            }
            (None, Some(id)) => {
                let backend = Arc::clone(&self.backend);
                let token = self.token.clone();
                let entities = &self.entities;
                relations
                    .load_existing(id, |id| {
                        let endpoint = entities.relations(kind, &id);
                        async move { backend.get(&endpoint, &token).await }
                    })
                    .await;
            }
            (None, None) => {}
        }

        let mode = match entity_id {
            Some(entity_id) => SessionMode::Edit { entity_id },
            None => {
                warn!(entity = %kind, "Loaded entity has no id, opening as create");
                SessionMode::Create
            }
        };

        info!(
            entity = %kind,
            mode = ?mode,
            relations = relations.len(),
            "Opened edit session"
        );

        EditSession::new(self, kind, mode, fields, priority, state, relations)
    }

    /// Resolve a token to an entry id, falling back to the catalog default.
    pub(super) fn default_selection(
        &self,
        kind: CatalogKind,
        token: Option<&str>,
    ) -> Option<String> {
        resolve_or_default(kind, self.catalogs.entries(kind), token).map(|e| e.id.clone())
    }

    /// Like [`default_selection`](Self::default_selection), but an empty or
    /// failed catalog keeps a stored canonical id instead of dropping it.
    fn stored_selection(&self, kind: CatalogKind, token: Option<&str>) -> Option<String> {
        if !self.catalogs.entries(kind).is_empty() {
            return self.default_selection(kind, token);
        }

        let kept = token.and_then(parse_positive).map(|id| id.to_string());
        if kept.is_some() {
            warn!(
                catalog = %kind,
                id = ?kept,
                "Catalog unavailable, keeping stored selection"
            );
        }
        kept
    }
}

/// Read a stored catalog reference: a scalar id or key, or an embedded object.
fn selection_token(
    source: &Map<String, Value>,
    names: &[&str],
    kind: CatalogKind,
) -> Option<String> {
    names.iter().find_map(|name| match source.get(*name)? {
        Value::Object(embedded) => {
            let candidates: Vec<&str> = kind
                .id_fields()
                .iter()
                .copied()
                .chain(["id", "key", "nombre"])
                .collect();
            extract::id_field(embedded, &candidates)
        }
        other => id_string(other),
    })
}
