//! Fan-out catalog loading with all-settled semantics.
//!
//! Every catalog is fetched independently. A failing or timed-out fetch
//! leaves its own catalog empty with the error recorded and never affects
//! the others. There is no automatic retry; calling [`CatalogLoader::load`]
//! again re-issues the fan-out.

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, warn};

use crate::backend::Backend;
use crate::catalog::{ingest, CatalogEntry, CatalogKind};
use crate::config::CatalogConfig;
use crate::error::NetworkError;

/// Outcome of loading one catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogLoad {
    /// Normalized entries; empty when the fetch failed.
    pub entries: Vec<CatalogEntry>,
    /// The failure, when the fetch failed.
    pub error: Option<NetworkError>,
}

impl CatalogLoad {
    /// A successful load.
    pub fn loaded(entries: Vec<CatalogEntry>) -> Self {
        Self {
            entries,
            error: None,
        }
    }

    /// A failed load.
    pub fn failed(error: NetworkError) -> Self {
        Self {
            entries: Vec::new(),
            error: Some(error),
        }
    }

    /// Whether the fetch failed.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// The aggregate result of a fan-out: one [`CatalogLoad`] per requested kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogSet {
    loads: BTreeMap<CatalogKind, CatalogLoad>,
}

impl CatalogSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the outcome for one kind.
    pub fn insert(&mut self, kind: CatalogKind, load: CatalogLoad) {
        self.loads.insert(kind, load);
    }

    /// Builder form of [`insert`](Self::insert) for already-loaded entries.
    pub fn with_entries(mut self, kind: CatalogKind, entries: Vec<CatalogEntry>) -> Self {
        self.insert(kind, CatalogLoad::loaded(entries));
        self
    }

    /// Entries of a catalog; empty when it was not loaded or failed.
    pub fn entries(&self, kind: CatalogKind) -> &[CatalogEntry] {
        self.loads
            .get(&kind)
            .map(|load| load.entries.as_slice())
            .unwrap_or(&[])
    }

    /// Full outcome for a kind.
    pub fn get(&self, kind: CatalogKind) -> Option<&CatalogLoad> {
        self.loads.get(&kind)
    }

    /// The error recorded for a kind, if its fetch failed.
    pub fn error(&self, kind: CatalogKind) -> Option<&NetworkError> {
        self.loads.get(&kind).and_then(|load| load.error.as_ref())
    }

    /// Whether any catalog failed.
    pub fn has_errors(&self) -> bool {
        self.loads.values().any(CatalogLoad::is_error)
    }

    /// Iterate outcomes in kind order.
    pub fn iter(&self) -> impl Iterator<Item = (CatalogKind, &CatalogLoad)> {
        self.loads.iter().map(|(kind, load)| (*kind, load))
    }

    /// Number of catalogs in the set.
    pub fn len(&self) -> usize {
        self.loads.len()
    }

    /// Whether the set holds no catalogs.
    pub fn is_empty(&self) -> bool {
        self.loads.is_empty()
    }

    /// A read-only view of one catalog.
    pub fn view(&self, kind: CatalogKind) -> CatalogView {
        match self.loads.get(&kind) {
            Some(load) => CatalogView::settled(kind, load.clone()),
            None => CatalogView::pending(kind),
        }
    }
}

/// Issues catalog fetches against a backend.
pub struct CatalogLoader {
    backend: Arc<dyn Backend>,
    config: CatalogConfig,
    token: String,
}

impl CatalogLoader {
    /// Create a loader.
    pub fn new(backend: Arc<dyn Backend>, config: CatalogConfig, token: impl Into<String>) -> Self {
        Self {
            backend,
            config,
            token: token.into(),
        }
    }

    /// The loader configuration.
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Load every catalog kind.
    pub async fn load_all(&self) -> CatalogSet {
        self.load(&CatalogKind::ALL).await
    }

    /// Load the given kinds concurrently. Never fails as a whole.
    pub async fn load(&self, kinds: &[CatalogKind]) -> CatalogSet {
        let fetches = kinds.iter().map(|kind| async move { (*kind, self.load_one(*kind).await) });

        let mut set = CatalogSet::new();
        for (kind, load) in join_all(fetches).await {
            set.insert(kind, load);
        }
        set
    }

    /// Load a single catalog.
    pub async fn load_one(&self, kind: CatalogKind) -> CatalogLoad {
        let endpoint = self.config.endpoint(kind);
        let fetch = self.backend.get(endpoint, &self.token);

        let result = match tokio::time::timeout(self.config.timeout, fetch).await {
            Ok(result) => result,
            Err(_) => Err(NetworkError::new(format!(
                "request to {} timed out after {} ms",
                endpoint,
                self.config.timeout.as_millis()
            ))),
        };

        match result {
            Ok(payload) => {
                let entries = ingest(kind, &payload);
                debug!(catalog = %kind, endpoint, entries = entries.len(), "Catalog loaded");
                CatalogLoad::loaded(entries)
            }
            Err(error) => {
                warn!(catalog = %kind, endpoint, error = %error, "Catalog load failed");
                CatalogLoad::failed(error)
            }
        }
    }
}

/// Read-only state of one catalog as shown by a selection field.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogView {
    kind: CatalogKind,
    entries: Vec<CatalogEntry>,
    loading: bool,
    error: Option<NetworkError>,
}

impl CatalogView {
    /// A view whose first load has not completed.
    pub fn pending(kind: CatalogKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
            loading: true,
            error: None,
        }
    }

    /// A view over a finished load.
    pub fn settled(kind: CatalogKind, load: CatalogLoad) -> Self {
        Self {
            kind,
            entries: load.entries,
            loading: false,
            error: load.error,
        }
    }

    /// Catalog kind.
    pub fn kind(&self) -> CatalogKind {
        self.kind
    }

    /// Current entries.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Whether a load is outstanding.
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Error of the last load.
    pub fn error(&self) -> Option<&NetworkError> {
        self.error.as_ref()
    }

    /// Re-fetch this catalog, replacing entries and error.
    pub async fn reload(&mut self, loader: &CatalogLoader) {
        self.loading = true;
        let load = loader.load_one(self.kind).await;
        self.entries = load.entries;
        self.error = load.error;
        self.loading = false;
    }
}
