//! reqcat Core - Catalog normalization and relation staging.
//!
//! This crate provides the data layer behind the project, requirement, use
//! case, and user story forms:
//!
//! - [`catalog`] turns inconsistently shaped lookup-table payloads into
//!   canonical [`CatalogEntry`] lists and resolves legacy keys to ids.
//! - [`loader`] fetches every catalog concurrently with all-settled semantics.
//! - [`relation`] stages an editable list of typed relations.
//! - [`form`] validates fields and assembles one submission payload per
//!   edit session.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use reqcat_core::{CatalogConfig, CatalogLoader, EntityKind, FormBinder};
//!
//! async fn create_use_case(
//!     backend: Arc<dyn reqcat_core::Backend>,
//! ) -> Result<(), reqcat_core::Error> {
//!     let loader = CatalogLoader::new(backend.clone(), CatalogConfig::default(), "token");
//!     let catalogs = loader.load_all().await;
//!
//!     let binder = FormBinder::new(backend, catalogs, "token");
//!     let mut session = binder.open_new(EntityKind::UseCase);
//!     session.set_field("nombre", "Iniciar sesión");
//!     session.select_priority("alta");
//!
//!     session.submit().await?;
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod catalog;
pub mod config;
pub mod error;
pub mod form;
pub mod loader;
pub mod relation;

pub use backend::Backend;
pub use catalog::{CatalogEntry, CatalogKind};
pub use config::{CatalogConfig, EntityConfig};
pub use error::{Error, NetworkError, ValidationErrors};
pub use form::{
    EditSession, EntityKind, FieldRule, FormBinder, RuleKind, RuleSet, SessionMode, SessionState,
    Violation,
};
pub use loader::{CatalogLoad, CatalogLoader, CatalogSet, CatalogView};
pub use relation::{ClientId, EdgeField, PersistableRelation, RelationEdge, RelationStager};
