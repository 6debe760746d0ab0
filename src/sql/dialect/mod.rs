//! SQL Dialect definitions and formatting rules.
//!
//! This module provides a trait-based abstraction for SQL dialect differences
//! that matter when a data table request is turned into a query:
//!
//! - Identifier quoting: `"` (ANSI/PG/DuckDB/SQLite), `` ` `` (MySQL/BigQuery), `[]` (T-SQL)
//! - String literal escaping (some engines treat `\` as an escape)
//! - Pagination: LIMIT/OFFSET vs OFFSET FETCH
//! - Boolean literals: true/false vs 1/0
//! - Case-insensitive substring matching: ILIKE vs LIKE vs LOWER(..) LIKE LOWER(..)
//!
//! # Usage
//!
//! ```ignore
//! use gridquery::sql::{Dialect, SqlDialect};
//!
//! let dialect = Dialect::Postgres;
//! let quoted = dialect.quote_identifier("user");  // "user"
//! ```
//!
//! | Feature | PostgreSQL | SQL Server | MySQL | DuckDB | Snowflake | BigQuery | SQLite |
//! |---------|-----------|------------|-------|--------|-----------|----------|--------|
//! | ILIKE | ✓ | ❌ | ❌ | ✓ | ✓ | ❌ | ❌ |
//! | LIKE ignores case | ❌ | ✓ (CI collation) | ✓ (CI collation) | ❌ | ❌ | ❌ | ✓ (ASCII) |
//! | LIMIT/OFFSET | ✓ | ❌ (OFFSET FETCH) | ✓ | ✓ | ✓ | ✓ | ✓ |

mod bigquery;
mod databricks;
mod duckdb;
pub mod helpers;
mod mysql;
mod postgres;
mod redshift;
mod snowflake;
mod sqlite;
mod tsql;

pub use bigquery::BigQuery;
pub use databricks::Databricks;
pub use duckdb::DuckDb;
pub use mysql::MySql;
pub use postgres::Postgres;
pub use redshift::Redshift;
pub use snowflake::Snowflake;
pub use sqlite::Sqlite;
pub use tsql::TSql;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::token::TokenStream;
use crate::query::MatchOp;

/// SQL dialect trait - defines how SQL constructs are rendered.
///
/// Implementations handle dialect-specific syntax differences.
/// The default implementations follow ANSI SQL where possible.
pub trait SqlDialect: std::fmt::Debug {
    /// Dialect name for display/logging.
    fn name(&self) -> &'static str;

    // =========================================================================
    // Identifier and Literal Quoting
    // =========================================================================

    /// Quote an identifier (table, column, alias).
    fn quote_identifier(&self, ident: &str) -> String;

    /// Quote a string literal.
    ///
    /// Single quotes with `''` for escaping. Engines that read `\` as an
    /// escape inside literals override this.
    fn quote_string(&self, s: &str) -> String {
        helpers::quote_string_single(s)
    }

    /// Format a boolean literal.
    fn format_bool(&self, b: bool) -> &'static str;

    // =========================================================================
    // Pagination
    // =========================================================================

    /// Emit LIMIT/OFFSET or equivalent pagination clause.
    fn emit_limit_offset(&self, limit: Option<u64>, offset: Option<u64>) -> TokenStream {
        helpers::emit_limit_offset_standard(limit, offset)
    }

    /// Whether this dialect requires ORDER BY for OFFSET/LIMIT.
    ///
    /// T-SQL requires ORDER BY when using OFFSET FETCH.
    fn requires_order_by_for_offset(&self) -> bool {
        false
    }

    // =========================================================================
    // Substring matching
    // =========================================================================

    /// Operator that makes a `%term%` match ignore case on this engine.
    fn case_insensitive_match(&self) -> MatchOp;

    /// Characters with a wildcard meaning inside a LIKE pattern.
    fn like_wildcards(&self) -> &'static [char] {
        helpers::LIKE_WILDCARDS
    }

    /// Whether LIKE needs an explicit `ESCAPE` clause for the backslash
    /// escapes produced by [`helpers::contains_pattern`].
    fn like_escape_clause(&self) -> bool {
        true
    }
}

/// Supported SQL dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    DuckDb,
    #[serde(alias = "mssql")]
    TSql,
    MySql,
    #[serde(alias = "postgresql")]
    Postgres,
    Snowflake,
    BigQuery,
    Redshift,
    Databricks,
    Sqlite,
}

impl Dialect {
    /// Get the dialect implementation.
    pub fn dialect(&self) -> &'static dyn SqlDialect {
        match self {
            Dialect::DuckDb => &DuckDb,
            Dialect::Postgres => &Postgres,
            Dialect::TSql => &TSql,
            Dialect::MySql => &MySql,
            Dialect::Snowflake => &Snowflake,
            Dialect::BigQuery => &BigQuery,
            Dialect::Redshift => &Redshift,
            Dialect::Databricks => &Databricks,
            Dialect::Sqlite => &Sqlite,
        }
    }
}

/// Error returned when a dialect name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown SQL dialect: {0}")]
pub struct UnknownDialect(pub String);

impl FromStr for Dialect {
    type Err = UnknownDialect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "duckdb" | "duck" => Ok(Dialect::DuckDb),
            "tsql" | "mssql" | "sqlserver" => Ok(Dialect::TSql),
            "mysql" | "mariadb" => Ok(Dialect::MySql),
            "postgres" | "postgresql" | "pg" => Ok(Dialect::Postgres),
            "snowflake" => Ok(Dialect::Snowflake),
            "bigquery" => Ok(Dialect::BigQuery),
            "redshift" => Ok(Dialect::Redshift),
            "databricks" | "spark" => Ok(Dialect::Databricks),
            "sqlite" | "sqlite3" => Ok(Dialect::Sqlite),
            other => Err(UnknownDialect(other.to_string())),
        }
    }
}

// Implement SqlDialect for Dialect enum by delegating to concrete types
impl SqlDialect for Dialect {
    fn name(&self) -> &'static str {
        self.dialect().name()
    }

    fn quote_identifier(&self, ident: &str) -> String {
        self.dialect().quote_identifier(ident)
    }

    fn quote_string(&self, s: &str) -> String {
        self.dialect().quote_string(s)
    }

    fn format_bool(&self, b: bool) -> &'static str {
        self.dialect().format_bool(b)
    }

    fn emit_limit_offset(&self, limit: Option<u64>, offset: Option<u64>) -> TokenStream {
        self.dialect().emit_limit_offset(limit, offset)
    }

    fn requires_order_by_for_offset(&self) -> bool {
        self.dialect().requires_order_by_for_offset()
    }

    fn case_insensitive_match(&self) -> MatchOp {
        self.dialect().case_insensitive_match()
    }

    fn like_wildcards(&self) -> &'static [char] {
        self.dialect().like_wildcards()
    }

    fn like_escape_clause(&self) -> bool {
        self.dialect().like_escape_clause()
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.dialect().name())
    }
}
