//! Metadata types for the schema inspector abstraction.
//!
//! These are Rust-native representations of what an inspector reports about
//! an entity: its columns and the semantic category of each column type.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Reference to an entity (table) the store can query.
///
/// Serialized as `"table"` or `"schema.table"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct EntityRef {
    schema: Option<String>,
    name: String,
}

impl EntityRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self::parse(&name.into())
    }

    pub fn with_schema(schema: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            schema: Some(schema.into()),
            name: name.into(),
        }
    }

    fn parse(path: &str) -> Self {
        match path.split_once('.') {
            Some((schema, name)) if !schema.is_empty() => Self::with_schema(schema, name),
            _ => Self {
                schema: None,
                name: path.to_string(),
            },
        }
    }

    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.schema {
            Some(schema) => write!(f, "{}.{}", schema, self.name),
            None => f.write_str(&self.name),
        }
    }
}

impl From<String> for EntityRef {
    fn from(path: String) -> Self {
        Self::parse(&path)
    }
}

impl From<&str> for EntityRef {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

impl From<EntityRef> for String {
    fn from(entity: EntityRef) -> Self {
        entity.to_string()
    }
}

/// Semantic category of a column type, as far as search is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Character,
    Numeric,
    Boolean,
    Other,
}

impl ColumnType {
    /// Classify a raw database type name (`VARCHAR(255)`, `int4`, `TINYINT(1)`, ...).
    pub fn from_sql_type(raw: &str) -> Self {
        let upper = raw.trim().to_uppercase();

        // MySQL reports BOOLEAN columns as TINYINT(1)
        if upper.replace(' ', "") == "TINYINT(1)" {
            return Self::Boolean;
        }

        let base = upper
            .split('(')
            .next()
            .unwrap_or_default()
            .trim()
            .trim_end_matches(" UNSIGNED")
            .trim_end_matches("[]");

        match base {
            "BOOLEAN" | "BOOL" | "BIT" => Self::Boolean,

            "CHAR" | "VARCHAR" | "CHARACTER" | "CHARACTER VARYING" | "NCHAR" | "NVARCHAR"
            | "VARCHAR2" | "NVARCHAR2" | "TEXT" | "TINYTEXT" | "MEDIUMTEXT" | "LONGTEXT"
            | "NTEXT" | "CITEXT" | "STRING" | "CLOB" | "BPCHAR" => Self::Character,

            "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "INTEGER" | "BIGINT" | "INT2"
            | "INT4" | "INT8" | "INT64" | "SERIAL" | "SMALLSERIAL" | "BIGSERIAL" | "DECIMAL"
            | "NUMERIC" | "NUMBER" | "MONEY" | "REAL" | "FLOAT" | "FLOAT4" | "FLOAT8"
            | "FLOAT64" | "DOUBLE" | "DOUBLE PRECISION" => Self::Numeric,

            _ => Self::Other,
        }
    }
}

/// One column as reported by the inspector.
///
/// The semantic [`ColumnType`] is derived once, when the column is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawColumn", into = "RawColumn")]
pub struct ColumnInfo {
    data_type: String,
    kind: ColumnType,
}

impl ColumnInfo {
    pub fn new(data_type: impl Into<String>) -> Self {
        let data_type = data_type.into();
        let kind = ColumnType::from_sql_type(&data_type);
        Self { data_type, kind }
    }

    /// Raw type name as the database reported it.
    pub fn data_type(&self) -> &str {
        &self.data_type
    }

    pub fn kind(&self) -> ColumnType {
        self.kind
    }
}

/// Wire shape of a column: `{ "type": "VARCHAR(255)" }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawColumn {
    #[serde(rename = "type")]
    pub data_type: String,
}

impl From<RawColumn> for ColumnInfo {
    fn from(raw: RawColumn) -> Self {
        Self::new(raw.data_type)
    }
}

impl From<ColumnInfo> for RawColumn {
    fn from(info: ColumnInfo) -> Self {
        Self {
            data_type: info.data_type,
        }
    }
}

/// Column name → column info for one entity.
pub type ColumnTypes = BTreeMap<String, ColumnInfo>;
