//! SQLite SQL dialect.
//!
//! SQLite keeps ANSI quoting, stores booleans as integers, and its LIKE
//! folds ASCII case by default.

use super::helpers;
use super::SqlDialect;
use crate::query::MatchOp;

/// SQLite SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct Sqlite;

impl SqlDialect for Sqlite {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_double(ident)
    }

    fn format_bool(&self, b: bool) -> &'static str {
        helpers::format_bool_numeric(b)
    }

    fn case_insensitive_match(&self) -> MatchOp {
        MatchOp::Like
    }
}
