//! Endpoint and timeout configuration.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::catalog::CatalogKind;
use crate::form::EntityKind;

/// Default per-fetch timeout for catalog loads.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default path segment appended to an entity for its relations.
pub const DEFAULT_RELATIONS_SEGMENT: &str = "relaciones";

/// Where catalogs are fetched from and how long a fetch may take.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    endpoints: BTreeMap<CatalogKind, String>,

    /// Upper bound on each individual catalog fetch.
    pub timeout: Duration,
}

impl CatalogConfig {
    /// Configuration using every kind's default endpoint.
    pub fn new() -> Self {
        Self {
            endpoints: CatalogKind::ALL
                .iter()
                .map(|kind| (*kind, kind.default_endpoint().to_string()))
                .collect(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the endpoint of one catalog.
    pub fn with_endpoint(mut self, kind: CatalogKind, endpoint: impl Into<String>) -> Self {
        self.endpoints.insert(kind, endpoint.into());
        self
    }

    /// Set the per-fetch timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Endpoint for a catalog.
    pub fn endpoint(&self, kind: CatalogKind) -> &str {
        self.endpoints
            .get(&kind)
            .map(String::as_str)
            .unwrap_or_else(|| kind.default_endpoint())
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Where entities are created, updated, and their relations listed.
#[derive(Debug, Clone)]
pub struct EntityConfig {
    collections: BTreeMap<EntityKind, String>,
    relations_segment: String,
}

impl EntityConfig {
    /// Configuration using every kind's default collection.
    pub fn new() -> Self {
        Self {
            collections: EntityKind::ALL
                .iter()
                .map(|kind| (*kind, kind.default_collection().to_string()))
                .collect(),
            relations_segment: DEFAULT_RELATIONS_SEGMENT.to_string(),
        }
    }

    /// Override the collection endpoint of one entity kind.
    pub fn with_collection(mut self, kind: EntityKind, collection: impl Into<String>) -> Self {
        self.collections.insert(kind, collection.into());
        self
    }

    /// Override the segment used for the existing-relations endpoint.
    pub fn with_relations_segment(mut self, segment: impl Into<String>) -> Self {
        self.relations_segment = segment.into();
        self
    }

    /// Collection endpoint, the target of creates.
    pub fn collection(&self, kind: EntityKind) -> &str {
        self.collections
            .get(&kind)
            .map(String::as_str)
            .unwrap_or_else(|| kind.default_collection())
    }

    /// Item endpoint, the target of updates.
    pub fn item(&self, kind: EntityKind, id: &str) -> String {
        format!("{}/{}", self.collection(kind), id)
    }

    /// Endpoint listing an entity's existing relations.
    pub fn relations(&self, kind: EntityKind, id: &str) -> String {
        format!("{}/{}", self.item(kind, id), self.relations_segment)
    }
}

impl Default for EntityConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_config() {
        let config = CatalogConfig::default();
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.endpoint(CatalogKind::Priority), "prioridades");
        assert_eq!(config.endpoint(CatalogKind::RelationType), "tipos-relacion-cu");
    }

    #[test]
    fn test_catalog_config_builder() {
        let config = CatalogConfig::new()
            .with_endpoint(CatalogKind::State, "v2/estados")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(config.endpoint(CatalogKind::State), "v2/estados");
        assert_eq!(config.endpoint(CatalogKind::Priority), "prioridades");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_entity_endpoints() {
        let config = EntityConfig::new();
        assert_eq!(config.collection(EntityKind::UseCase), "casos-uso");
        assert_eq!(config.item(EntityKind::UseCase, "12"), "casos-uso/12");
        assert_eq!(
            config.relations(EntityKind::UseCase, "12"),
            "casos-uso/12/relaciones"
        );
    }

    #[test]
    fn test_entity_config_builder() {
        let config = EntityConfig::new()
            .with_collection(EntityKind::Requirement, "reqs")
            .with_relations_segment("links");

        assert_eq!(config.relations(EntityKind::Requirement, "3"), "reqs/3/links");
    }
}
