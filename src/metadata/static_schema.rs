//! JSON-backed schema inspector.
//!
//! Reads a document of the form:
//!
//! ```json
//! {
//!   "dialect": "postgres",
//!   "users":   { "name": { "type": "VARCHAR(255)" }, "age": { "type": "INTEGER" } },
//!   "authors": { "name": { "type": "TEXT" } }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;

use super::provider::{SchemaInspector, StoreError, StoreResult};
use super::types::{ColumnTypes, EntityRef};
use crate::sql::Dialect;

/// A fixed set of entity descriptions, all living in one dialect.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StaticSchema {
    #[serde(default)]
    dialect: Dialect,
    #[serde(flatten)]
    entities: BTreeMap<String, ColumnTypes>,
}

impl StaticSchema {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            entities: BTreeMap::new(),
        }
    }

    /// Add or replace an entity description.
    pub fn entity(mut self, name: impl Into<String>, columns: ColumnTypes) -> Self {
        self.entities.insert(name.into(), columns);
        self
    }

    pub fn from_json(json: &str) -> StoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> StoreResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Described entity names, sorted.
    pub fn entity_names(&self) -> impl Iterator<Item = &str> {
        self.entities.keys().map(String::as_str)
    }

    fn lookup(&self, entity: &EntityRef) -> Option<&ColumnTypes> {
        self.entities
            .get(&entity.to_string())
            .or_else(|| self.entities.get(entity.name()))
    }
}

#[async_trait]
impl SchemaInspector for StaticSchema {
    async fn describe(&self, entity: &EntityRef) -> StoreResult<ColumnTypes> {
        self.lookup(entity)
            .cloned()
            .ok_or_else(|| StoreError::UnknownEntity(entity.to_string()))
    }

    fn dialect_of(&self, _entity: &EntityRef) -> Dialect {
        self.dialect
    }
}
