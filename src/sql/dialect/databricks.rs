//! Databricks (Spark SQL) dialect.
//!
//! Databricks differences from ANSI:
//! - Backtick identifier quoting
//! - Backslash escapes inside string literals
//! - ILIKE available since Spark 3.3

use super::helpers;
use super::SqlDialect;
use crate::query::MatchOp;

/// Databricks (Spark SQL) dialect.
#[derive(Debug, Clone, Copy)]
pub struct Databricks;

impl SqlDialect for Databricks {
    fn name(&self) -> &'static str {
        "databricks"
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
        MatchOp::ILike
    }
}
