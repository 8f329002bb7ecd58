//! Catalog files - a TOML description of entities, linking nodes and labels.
//!
//! ```toml
//! query_timeout_ms = 20000
//!
//! [[entity]]
//! id = "pikachu"
//! label = "Pikachu"
//! attributes = { hasType = ["type/electric"], hasColour = ["colour/yellow"] }
//!
//! [[node]]
//! id = "generation/1"
//! label = "Generation I"
//! types = ["Generation"]
//! links = { featuresSpecies = ["pikachu"] }
//!
//! [labels]
//! "type/electric" = "Type: Electric"
//! ```

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use super::{Catalog, CatalogEntity, DEFAULT_QUERY_TIMEOUT};
use crate::entities::{EntityId, ValueRef};

/// Errors raised while loading a catalog file.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("entity {0} is declared twice")]
    DuplicateEntity(EntityId),

    #[error("node {subject} links to undeclared entity {object}")]
    DanglingLink { subject: ValueRef, object: EntityId },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    /// Zero disables the budget; absent means the default.
    query_timeout_ms: Option<u64>,
    #[serde(default, rename = "entity")]
    entities: Vec<EntityRecord>,
    #[serde(default, rename = "node")]
    nodes: Vec<NodeRecord>,
    #[serde(default)]
    labels: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EntityRecord {
    id: String,
    label: Option<String>,
    #[serde(default)]
    attributes: HashMap<String, Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct NodeRecord {
    id: String,
    label: Option<String>,
    #[serde(default)]
    types: Vec<String>,
    #[serde(default)]
    links: HashMap<String, Vec<String>>,
}

impl Catalog {
    /// Parse a catalog from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(text)?;

        let timeout = match file.query_timeout_ms {
            None => Some(DEFAULT_QUERY_TIMEOUT),
            Some(0) => None,
            Some(ms) => Some(Duration::from_millis(ms)),
        };
        let mut catalog = Catalog::new().with_query_timeout(timeout);

        for record in file.entities {
            let id = EntityId::new(record.id.clone());
            if catalog.contains_entity(&id) {
                return Err(CatalogError::DuplicateEntity(id));
            }
            let mut entity = CatalogEntity::new(record.id);
            if let Some(label) = record.label {
                entity = entity.with_label(label);
            }
            for (predicate, values) in record.attributes {
                entity = entity.with_attributes(predicate, values);
            }
            catalog.add_entity(entity);
        }

        for node in file.nodes {
            let subject = ValueRef::new(node.id.clone());
            if let Some(label) = node.label {
                catalog.set_label(node.id.clone(), label);
            }
            for node_type in node.types {
                catalog.add_node_type(subject.clone(), node_type);
            }
            for (predicate, objects) in node.links {
                for object in objects {
                    let object = EntityId::new(object);
                    if !catalog.contains_entity(&object) {
                        return Err(CatalogError::DanglingLink { subject, object });
                    }
                    catalog.add_link(subject.clone(), predicate.clone(), object);
                }
            }
        }

        for (id, label) in file.labels {
            catalog.set_label(id, label);
        }

        info!(entities = catalog.entity_count(), "catalog loaded");
        Ok(catalog)
    }

    /// Read and parse a catalog file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}
