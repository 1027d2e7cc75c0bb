//! Command line arguments.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use reqcat_core::{CatalogConfig, CatalogKind, EntityKind};

use crate::formatter::OutputFormat;

/// reqcat catalog and form tooling.
#[derive(Debug, Parser)]
#[command(name = "reqcat")]
#[command(version, about = "Normalize requirement catalogs and draft submissions")]
pub struct Args {
    /// Output format.
    #[arg(long, default_value = "table", value_enum, global = true)]
    pub format: OutputFormat,

    /// Per-catalog fetch timeout (ms).
    #[arg(long, default_value_t = 30_000, global = true)]
    pub timeout_ms: u64,

    /// Token handed to the backend on every call.
    #[arg(long, default_value = "", global = true)]
    pub token: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Normalize one raw catalog file.
    Normalize {
        /// Catalog kind (priority, state, relation_type, estimation_unit).
        #[arg(short, long)]
        kind: CatalogKind,
        /// Raw JSON payload.
        file: PathBuf,
    },

    /// Resolve an id, key, or label against a raw catalog file.
    Resolve {
        #[arg(short, long)]
        kind: CatalogKind,
        file: PathBuf,
        /// Id, key, or label to look up.
        lookup: String,
    },

    /// Load every catalog from a fixture directory.
    Load {
        /// Directory holding `<endpoint>.json` files.
        #[arg(long)]
        fixtures: PathBuf,
    },

    /// Open a session, apply fields and relations, and submit it to the
    /// fixture backend.
    Draft {
        #[arg(long)]
        fixtures: PathBuf,
        /// Entity kind (project, requirement, use_case, user_story).
        #[arg(long)]
        entity: EntityKind,
        /// JSON object with the entity's fields.
        #[arg(long)]
        fields: PathBuf,
        /// Treat the fields file as a stored entity and edit it.
        #[arg(long)]
        edit: bool,
        /// Priority id, key, or label.
        #[arg(long)]
        priority: Option<String>,
        /// State id, key, or label.
        #[arg(long)]
        state: Option<String>,
        /// Relation as TYPE:TARGET[:DESCRIPTION]; TYPE may be a key or label.
        #[arg(long = "relation")]
        relations: Vec<String>,
    },
}

impl From<&Args> for CatalogConfig {
    fn from(args: &Args) -> Self {
        CatalogConfig::new().with_timeout(Duration::from_millis(args.timeout_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_draft() {
        let args = Args::parse_from([
            "reqcat",
            "--token",
            "abc",
            "draft",
            "--fixtures",
            "fx",
            "--entity",
            "use-case",
            "--fields",
            "uc.json",
            "--relation",
            "extiende:12",
            "--relation",
            "2:13:incluye login",
        ]);

        assert_eq!(args.token, "abc");
        match args.command {
            Command::Draft {
                entity, relations, edit, ..
            } => {
                assert_eq!(entity, EntityKind::UseCase);
                assert_eq!(relations.len(), 2);
                assert!(!edit);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_timeout_maps_to_catalog_config() {
        let args = Args::parse_from(["reqcat", "--timeout-ms", "250", "load", "--fixtures", "fx"]);
        let config = CatalogConfig::from(&args);
        assert_eq!(config.timeout, Duration::from_millis(250));
    }
}
