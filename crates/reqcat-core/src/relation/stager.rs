//! In-memory editing of an entity's relation list.

use std::future::Future;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::edge::{ClientId, EdgeField, PersistableRelation, RelationEdge};
use crate::catalog::extract::{self, Extractor};
use crate::error::NetworkError;

/// Containers that may wrap a relation list.
const RELATION_CONTAINERS: &[&str] = &["relaciones"];

const PERSISTED_ID_FIELDS: &[&str] = &["relacion_id", "id"];
const RELATION_TYPE_FIELDS: &[&str] = &["tipo_relacion_id", "relationTypeId"];
const TARGET_FIELDS: &[&str] = &["destino_id", "caso_uso_destino_id", "targetEntityId"];
const DESCRIPTION_FIELDS: &[&str] = &["descripcion", "description"];

/// The staged relations of one edit session.
#[derive(Debug, Default)]
pub struct RelationStager {
    edges: Vec<RelationEdge>,
    next_sequence: u64,
    loaded: bool,
}

impl RelationStager {
    /// An empty stager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Staged edges in insertion order.
    pub fn edges(&self) -> &[RelationEdge] {
        &self.edges
    }

    /// Look up one edge.
    pub fn get(&self, client_id: &ClientId) -> Option<&RelationEdge> {
        self.edges.iter().find(|e| &e.client_id == client_id)
    }

    /// Number of staged edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether nothing is staged.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Whether existing relations were already loaded for this session.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn next_client_id(&mut self) -> ClientId {
        self.next_sequence += 1;
        ClientId::from_sequence(self.next_sequence)
    }

    /// Append an empty edge and return its client id.
    pub fn add(&mut self) -> ClientId {
        let client_id = self.next_client_id();
        self.edges.push(RelationEdge::empty(client_id.clone()));
        client_id
    }

    /// Replace one field of one edge. Returns false when the id is unknown.
    pub fn update(
        &mut self,
        client_id: &ClientId,
        field: EdgeField,
        value: impl Into<String>,
    ) -> bool {
        match self.edges.iter_mut().find(|e| &e.client_id == client_id) {
            Some(edge) => {
                edge.set(field, value.into());
                true
            }
            None => false,
        }
    }

    /// Delete an edge. There is no undo.
    pub fn remove(&mut self, client_id: &ClientId) -> Option<RelationEdge> {
        let index = self.edges.iter().position(|e| &e.client_id == client_id)?;
        Some(self.edges.remove(index))
    }

    /// Drop every staged edge. Client ids keep counting up.
    pub fn clear(&mut self) {
        self.edges.clear();
    }

    /// Stage relations supplied inline with the entity.
    ///
    /// Counts as the session's one load of existing relations.
    pub fn seed(&mut self, payload: &Value) -> usize {
        self.loaded = true;
        self.stage_existing(payload)
    }

    /// Fetch and stage the entity's existing relations, at most once.
    ///
    /// Failures and unexpected shapes leave nothing staged; the user can
    /// always add relations by hand. Returns the number of edges staged.
    pub async fn load_existing<F, Fut>(&mut self, entity_id: &str, fetcher: F) -> usize
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<Value, NetworkError>>,
    {
        if self.loaded {
            debug!(entity_id, "Existing relations already loaded, skipping fetch");
            return 0;
        }
        self.loaded = true;

        match fetcher(entity_id.to_string()).await {
            Ok(payload) => self.stage_existing(&payload),
            Err(error) => {
                warn!(entity_id, error = %error, "Could not load existing relations");
                0
            }
        }
    }

    fn stage_existing(&mut self, payload: &Value) -> usize {
        let strategies = extract::strategies(RELATION_CONTAINERS);
        let Some(items) = extract::locate(payload, &strategies) else {
            warn!(
                tried = ?strategies.iter().map(Extractor::name).collect::<Vec<_>>(),
                "Unexpected relations payload"
            );
            return 0;
        };

        let before = self.edges.len();
        for item in items.iter().filter_map(Value::as_object) {
            let edge = self.edge_from_item(item);
            self.edges.push(edge);
        }
        self.edges.len() - before
    }

    fn edge_from_item(&mut self, item: &Map<String, Value>) -> RelationEdge {
        let text = |names: &[&str]| extract::id_field(item, names).unwrap_or_default();

        RelationEdge {
            client_id: self.next_client_id(),
            persisted_id: extract::id_field(item, PERSISTED_ID_FIELDS),
            relation_type_id: text(RELATION_TYPE_FIELDS),
            target_entity_id: text(TARGET_FIELDS),
            description: extract::str_field(item, DESCRIPTION_FIELDS)
                .unwrap_or_default()
                .to_string(),
        }
    }

    /// The edges that can be submitted, stripped of local and backend ids.
    ///
    /// Edges whose relation type or target is not a positive integer are
    /// silently left out.
    pub fn to_persistable(&self) -> Vec<PersistableRelation> {
        self.edges
            .iter()
            .filter_map(RelationEdge::to_persistable)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_add_update_remove() {
        let mut stager = RelationStager::new();
        let first = stager.add();
        let second = stager.add();
        assert_ne!(first, second);
        assert_eq!(stager.len(), 2);

        assert!(stager.update(&first, EdgeField::Target, "12"));
        assert_eq!(stager.get(&first).unwrap().target_entity_id, "12");
        assert_eq!(stager.get(&second).unwrap().target_entity_id, "");

        let removed = stager.remove(&first).unwrap();
        assert_eq!(removed.client_id, first);
        assert_eq!(stager.len(), 1);
        assert!(stager.remove(&first).is_none());
    }

    #[test]
    fn test_update_unknown_is_noop() {
        let mut stager = RelationStager::new();
        let id = stager.add();
        stager.remove(&id);

        assert!(!stager.update(&id, EdgeField::Description, "ghost"));
        assert!(stager.is_empty());
    }

    #[test]
    fn test_client_ids_never_reused() {
        let mut stager = RelationStager::new();
        let removed = stager.add();
        stager.remove(&removed);

        let added = stager.add();
        assert_eq!(stager.len(), 1);
        assert_ne!(added, removed);

        stager.clear();
        let after_clear = stager.add();
        assert_ne!(after_clear, added);
        assert_ne!(after_clear, removed);
    }

    #[test]
    fn test_to_persistable_filters_incomplete_edges() {
        let mut stager = RelationStager::new();

        let blank_type = stager.add();
        stager.update(&blank_type, EdgeField::RelationType, "");
        stager.update(&blank_type, EdgeField::Target, "12");

        let complete = stager.add();
        stager.update(&complete, EdgeField::RelationType, "2");
        stager.update(&complete, EdgeField::Target, "12");
        stager.update(&complete, EdgeField::Description, "incluye");

        let negative = stager.add();
        stager.update(&negative, EdgeField::RelationType, "2");
        stager.update(&negative, EdgeField::Target, "-4");

        stager.add();

        let persistable = stager.to_persistable();
        assert_eq!(persistable.len(), 1);
        assert_eq!(persistable[0].relation_type_id, 2);
        assert_eq!(persistable[0].target_entity_id, 12);
        assert_eq!(persistable[0].description, "incluye");
    }

    #[test]
    fn test_seed_from_inline_relations() {
        let mut stager = RelationStager::new();
        let staged = stager.seed(&json!([
            {
                "relacion_id": 40,
                "tipo_relacion_id": 1,
                "caso_uso_destino_id": 8,
                "descripcion": "extiende"
            },
            { "id": "41", "relationTypeId": "2", "targetEntityId": "9" },
            "garbage"
        ]));

        assert_eq!(staged, 2);
        assert!(stager.is_loaded());
        let edges = stager.edges();
        assert_eq!(edges[0].persisted_id.as_deref(), Some("40"));
        assert_eq!(edges[0].relation_type_id, "1");
        assert_eq!(edges[0].target_entity_id, "8");
        assert_eq!(edges[0].description, "extiende");
        assert_eq!(edges[1].persisted_id.as_deref(), Some("41"));
        assert_ne!(edges[0].client_id.as_str(), "40");
    }

    #[tokio::test]
    async fn test_load_existing_runs_once() {
        let mut stager = RelationStager::new();
        let payload = json!({
            "relaciones": [{ "id": 1, "tipo_relacion_id": 3, "destino_id": 5 }]
        });

        let first = stager
            .load_existing("7", |_| async { Ok(payload.clone()) })
            .await;
        let second = stager
            .load_existing("7", |_| async { Ok(payload.clone()) })
            .await;

        assert_eq!(first, 1);
        assert_eq!(second, 0);
        assert_eq!(stager.len(), 1);
    }

    #[tokio::test]
    async fn test_load_existing_passes_entity_id() {
        let mut stager = RelationStager::new();
        stager
            .load_existing("42", |id| async move {
                assert_eq!(id, "42");
                Ok(json!({ "data": [] }))
            })
            .await;
        assert!(stager.is_loaded());
    }

    #[tokio::test]
    async fn test_load_existing_failure_is_absorbed() {
        let mut stager = RelationStager::new();
        let staged = stager
            .load_existing("7", |_| async { Err(NetworkError::with_status("forbidden", 403)) })
            .await;

        assert_eq!(staged, 0);
        assert!(stager.is_empty());
        assert!(stager.is_loaded());
    }

    #[tokio::test]
    async fn test_load_existing_unexpected_shape() {
        let mut stager = RelationStager::new();
        let staged = stager
            .load_existing("7", |_| async { Ok(json!({ "message": "ok" })) })
            .await;

        assert_eq!(staged, 0);
        assert!(stager.is_empty());
    }
}
