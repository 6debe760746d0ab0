//! Amazon Redshift SQL dialect.
//!
//! Redshift is PostgreSQL 8.0 derived, so identifier quoting and ILIKE
//! follow Postgres. Unlike Postgres, a backslash escapes inside string
//! literals.

use super::helpers;
use super::SqlDialect;
use crate::query::MatchOp;

/// Amazon Redshift SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct Redshift;

impl SqlDialect for Redshift {
    fn name(&self) -> &'static str {
        "redshift"
    }

    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_double(ident)
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
