//! MySQL SQL dialect.
//!
//! MySQL differences from ANSI:
//! - Backtick identifier quoting (`` `name` ``)
//! - Boolean is TINYINT(1), returns 1/0
//! - Backslash escapes inside string literals
//! - LIKE ignores case under the default `_ci` collations

use super::helpers;
use super::SqlDialect;
use crate::query::MatchOp;

/// MySQL SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct MySql;

impl SqlDialect for MySql {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_backtick(ident)
    }

    fn quote_string(&self, s: &str) -> String {
        helpers::quote_string_backslash(s)
    }

    fn format_bool(&self, b: bool) -> &'static str {
        helpers::format_bool_numeric(b)
    }

    fn case_insensitive_match(&self) -> MatchOp {
        MatchOp::Like
    }

    // backslash is already the default LIKE escape
    fn like_escape_clause(&self) -> bool {
        false
    }
}
