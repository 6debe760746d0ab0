//! DuckDB SQL dialect.
//!
//! DuckDB is PostgreSQL-compatible:
//! - ANSI identifier quoting (`"`)
//! - ILIKE for case-insensitive matching
//! - LIKE has no default escape character, so patterns carry `ESCAPE`

use super::helpers;
use super::SqlDialect;
use crate::query::MatchOp;

/// DuckDB SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct DuckDb;

impl SqlDialect for DuckDb {
    fn name(&self) -> &'static str {
        "duckdb"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_double(ident)
    }

    fn format_bool(&self, b: bool) -> &'static str {
        helpers::format_bool_literal(b)
    }

    fn case_insensitive_match(&self) -> MatchOp {
        MatchOp::ILike
    }
}
