//! Google BigQuery SQL dialect.
//!
//! BigQuery differences from ANSI:
//! - Backtick identifier quoting
//! - Backslash escapes inside string literals
//! - No ILIKE; case-insensitive matching lowers both sides
//! - LIKE has no ESCAPE clause; backslash always escapes

use super::helpers;
use super::SqlDialect;
use crate::query::MatchOp;

/// Google BigQuery SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct BigQuery;

impl SqlDialect for BigQuery {
    fn name(&self) -> &'static str {
        "bigquery"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_backtick(ident)
    }

    fn quote_string(&self, s: &str) -> String {
        helpers::quote_string_backslash(s)
    }

    fn format_bool(&self, b: bool) -> &'static str {
        helpers::format_bool_literal(b)
    }

    fn case_insensitive_match(&self) -> MatchOp {
        MatchOp::LowerLike
    }

    fn like_escape_clause(&self) -> bool {
        false
    }
}
