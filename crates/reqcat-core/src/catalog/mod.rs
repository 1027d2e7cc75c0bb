//! Lookup-table catalogs.
//!
//! Raw backend payloads are ingested into ordered [`CatalogEntry`] lists, and
//! the resolver maps canonical ids, legacy keys, and labels onto entries.

mod entry;
pub mod extract;
mod ingest;
mod kind;
mod palette;
mod resolver;
mod slug;

pub use entry::CatalogEntry;
pub use extract::Extractor;
pub use ingest::{ingest, ingest_with};
pub use kind::CatalogKind;
pub use palette::{color_for, FALLBACK_COLOR};
pub use resolver::{default_entry, id_of, resolve, resolve_or_default};
pub use slug::slugify;
