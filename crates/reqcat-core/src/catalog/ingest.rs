//! Normalizing raw catalog payloads into [`CatalogEntry`] lists.
//!
//! Ingestion is total: a payload of the wrong shape degrades to an empty
//! catalog and malformed items are dropped, never reported as errors.

use std::collections::HashSet;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::extract::{self, Extractor};
use super::{color_for, slugify, CatalogEntry, CatalogKind};

/// Fields holding the human-readable label, in priority order.
const LABEL_FIELDS: &[&str] = &["label", "nombre", "name"];

/// Fields holding a description.
const DESCRIPTION_FIELDS: &[&str] = &["descripcion", "description"];

/// Fields holding a numeric level.
const LEVEL_FIELDS: &[&str] = &["nivel", "level"];

/// Fields holding the active flag.
const ACTIVE_FIELDS: &[&str] = &["active", "activo"];

/// Normalize a payload using the kind's declared container names.
pub fn ingest(kind: CatalogKind, payload: &Value) -> Vec<CatalogEntry> {
    ingest_with(kind, payload, &extract::strategies(kind.containers()))
}

/// Normalize a payload using an explicit strategy list.
///
/// Output order mirrors input order. Items without a resolvable id, items
/// explicitly marked inactive, and repeated ids are dropped.
pub fn ingest_with(
    kind: CatalogKind,
    payload: &Value,
    strategies: &[Extractor],
) -> Vec<CatalogEntry> {
    let Some(items) = extract::locate(payload, strategies) else {
        warn!(
            catalog = %kind,
            tried = ?strategies.iter().map(Extractor::name).collect::<Vec<_>>(),
            "Malformed catalog payload, no collection found"
        );
        return Vec::new();
    };

    let mut seen = HashSet::with_capacity(items.len());
    let mut entries = Vec::with_capacity(items.len());
    let mut dropped = 0usize;

    for item in items {
        match normalize_item(kind, item) {
            Some(entry) if seen.insert(entry.id.clone()) => entries.push(entry),
            _ => dropped += 1,
        }
    }

    debug!(
        catalog = %kind,
        entries = entries.len(),
        dropped,
        "Ingested catalog"
    );

    entries
}

fn normalize_item(kind: CatalogKind, item: &Value) -> Option<CatalogEntry> {
    let fields = item.as_object()?;

    let id_fields: Vec<&str> = kind.id_fields().iter().copied().chain(["id"]).collect();
    let id = extract::id_field(fields, &id_fields)?;

    if is_explicitly_inactive(fields) {
        return None;
    }

    let label = non_blank(fields, LABEL_FIELDS).unwrap_or_else(|| id.clone());
    let key = non_blank(fields, &["key"]).unwrap_or_else(|| slugify(&label));
    let color = non_blank(fields, &["color"]).unwrap_or_else(|| color_for(kind, &key).to_string());

    Some(CatalogEntry {
        id,
        description: non_blank(fields, DESCRIPTION_FIELDS).unwrap_or_default(),
        level: extract::int_field(fields, LEVEL_FIELDS),
        label,
        key,
        color,
        active: true,
        extra: fields.clone(),
    })
}

fn is_explicitly_inactive(fields: &Map<String, Value>) -> bool {
    ACTIVE_FIELDS
        .iter()
        .any(|name| matches!(fields.get(*name), Some(Value::Bool(false))))
}

fn non_blank(fields: &Map<String, Value>, names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| {
        fields
            .get(*name)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
    })
}
