//! Command execution.

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{bail, Context};
use reqcat_core::catalog::{id_of, ingest, resolve};
use reqcat_core::{
    CatalogConfig, CatalogKind, CatalogLoader, EdgeField, EditSession, Error, FormBinder,
};
use serde_json::Value;
use thiserror::Error;
use tracing::info;

use crate::config::{Args, Command};
use crate::fixtures::DirectoryBackend;
use crate::formatter::{
    format_catalog_set, format_entries, format_request, format_violations, OutputFormat,
};

/// Text to print and whether the command succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    pub text: String,
    pub success: bool,
}

impl Output {
    fn ok(text: String) -> Self {
        Self {
            text,
            success: true,
        }
    }

    fn failed(text: String) -> Self {
        Self {
            text,
            success: false,
        }
    }
}

/// A `--relation` argument could not be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RelationArgError {
    #[error("relation '{0}' must look like TYPE:TARGET[:DESCRIPTION]")]
    Malformed(String),
}

/// A relation given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationArg {
    /// Relation type id, key, or label.
    pub relation_type: String,
    /// Target entity id.
    pub target: String,
    pub description: String,
}

impl FromStr for RelationArg {
    type Err = RelationArgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':').map(str::trim);
        let relation_type = parts.next().unwrap_or_default();
        let target = parts.next().unwrap_or_default();
        if relation_type.is_empty() || target.is_empty() {
            return Err(RelationArgError::Malformed(s.to_string()));
        }

        Ok(Self {
            relation_type: relation_type.to_string(),
            target: target.to_string(),
            description: parts.next().unwrap_or_default().to_string(),
        })
    }
}

/// Execute the parsed command.
pub async fn run(args: Args) -> anyhow::Result<Output> {
    let catalog_config = CatalogConfig::from(&args);
    let format = args.format;
    let token = args.token;

    match args.command {
        Command::Normalize { kind, file } => {
            let payload = read_json(&file).await?;
            Ok(Output::ok(format_entries(&ingest(kind, &payload), format)))
        }

        Command::Resolve { kind, file, lookup } => {
            let payload = read_json(&file).await?;
            let entries = ingest(kind, &payload);
            match resolve(&entries, &lookup) {
                Some(entry) => Ok(Output::ok(format_entries(
                    std::slice::from_ref(entry),
                    format,
                ))),
                None => Ok(Output::failed(format!(
                    "no {} entry matches '{}'",
                    kind, lookup
                ))),
            }
        }

        Command::Load { fixtures } => {
            let backend = Arc::new(DirectoryBackend::new(fixtures));
            let loader = CatalogLoader::new(backend, catalog_config, token);
            let set = loader.load_all().await;
            let text = format_catalog_set(&set, format);
            Ok(if set.has_errors() {
                Output::failed(text)
            } else {
                Output::ok(text)
            })
        }

        Command::Draft {
            fixtures,
            entity,
            fields,
            edit,
            priority,
            state,
            relations,
        } => {
            let parsed = relations
                .iter()
                .map(|r| r.parse::<RelationArg>())
                .collect::<Result<Vec<_>, _>>()?;
            let fields = read_json(&fields).await?;

            let backend = Arc::new(DirectoryBackend::new(fixtures));
            let loader = CatalogLoader::new(backend.clone(), catalog_config, token.clone());
            let catalogs = loader.load_all().await;
            let binder = FormBinder::new(backend.clone(), catalogs, token);

            let mut session = if edit {
                binder.open_existing(entity, &fields).await
            } else {
                let mut session = binder.open_new(entity);
                let Some(object) = fields.as_object() else {
                    bail!("fields file must contain a JSON object");
                };
                for (name, value) in object {
                    session.set_field(name.clone(), value.clone());
                }
                session
            };

            if let Some(priority) = priority.as_deref() {
                if !session.select_priority(priority) {
                    bail!("no priority matches '{}'", priority);
                }
            }
            if let Some(state) = state.as_deref() {
                if !session.select_state(state) {
                    bail!("no state matches '{}'", state);
                }
            }
            stage_relations(&mut session, &binder, &parsed);

            match session.submit().await {
                Ok(_) => {
                    let sent = backend.sent();
                    let Some(request) = sent.last() else {
                        bail!("submission did not reach the backend");
                    };
                    info!(endpoint = %request.endpoint, "Draft accepted");
                    Ok(Output::ok(format_request(
                        request.method,
                        &request.endpoint,
                        &request.body,
                    )))
                }
                Err(Error::Validation(errors)) => Ok(Output::failed(format_violations(
                    errors.violations(),
                    format,
                ))),
                Err(e) => Err(e.into()),
            }
        }
    }
}

/// Stage command-line relations, resolving relation type keys and labels.
fn stage_relations(session: &mut EditSession<'_>, binder: &FormBinder, parsed: &[RelationArg]) {
    let types = binder.catalogs().entries(CatalogKind::RelationType);

    for arg in parsed {
        let relation_type = id_of(types, &arg.relation_type)
            .unwrap_or(arg.relation_type.as_str())
            .to_string();

        let relations = session.relations_mut();
        let client_id = relations.add();
        relations.update(&client_id, EdgeField::RelationType, relation_type);
        relations.update(&client_id, EdgeField::Target, arg.target.clone());
        relations.update(&client_id, EdgeField::Description, arg.description.clone());
    }
}

async fn read_json(path: &Path) -> anyhow::Result<Value> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}
