//! Predicate builder: the type-aware global search fragment for one entity.

use std::collections::BTreeSet;

use crate::metadata::{ColumnType, ColumnTypes};
use crate::query::{Condition, FieldConditions, FieldRef, Fragment, Value};
use crate::request::RequestConfig;
use crate::sql::{Dialect, SqlDialect};

/// OR-group matching `term` against every searchable column of one entity.
///
/// `label` namespaces the produced conditions; empty targets the root
/// entity. A column takes part only when a searchable descriptor names it
/// (`data == "<label>.<column>"`, or `data == "<column>"` for the root)
/// and its type can represent `term`. Returns `None` when no column does.
pub fn build_predicate(
    label: &str,
    columns: &ColumnTypes,
    request: &RequestConfig,
    term: &str,
    dialect: Dialect,
) -> Option<Fragment> {
    let mut seen = BTreeSet::new();
    let mut groups = Vec::new();

    for descriptor in request.columns.iter().filter(|c| c.searchable) {
        let Some(column) = column_of(label, &descriptor.data) else {
            continue;
        };
        let Some(info) = columns.get(column) else {
            continue;
        };
        if !seen.insert(column) {
            continue;
        }
        if let Some(condition) = condition_for(info.kind(), term, dialect) {
            let field = FieldRef::qualified(label, column);
            groups.push(FieldConditions::from([(field, condition)]));
        }
    }

    (!groups.is_empty()).then_some(Fragment::AnyOf(groups))
}

/// The part of `data` naming a column of the entity labelled `label`.
fn column_of<'a>(label: &str, data: &'a str) -> Option<&'a str> {
    if label.is_empty() {
        return Some(data);
    }
    data.strip_prefix(label)?.strip_prefix('.')
}

fn condition_for(kind: ColumnType, term: &str, dialect: Dialect) -> Option<Condition> {
    match kind {
        ColumnType::Character => Some(Condition::contains(term, dialect.case_insensitive_match())),
        ColumnType::Numeric => parse_number(term).map(Condition::Eq),
        ColumnType::Boolean => parse_bool(term).map(|b| Condition::Eq(Value::Bool(b))),
        ColumnType::Other => None,
    }
}

fn parse_number(term: &str) -> Option<Value> {
    let term = term.trim();
    if let Ok(n) = term.parse::<i64>() {
        return Some(Value::Int(n));
    }
    term.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .map(Value::Float)
}

fn parse_bool(term: &str) -> Option<bool> {
    let term = term.trim();
    if term.eq_ignore_ascii_case("true") {
        Some(true)
    } else if term.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}
