//! Tests for type-aware global search predicates.

#[path = "../common/mod.rs"]
mod common;

use common::columns;
use gridquery::prelude::*;
use gridquery::query::FieldConditions;
use gridquery::translation::predicate::build_predicate;

fn books() -> ColumnTypes {
    columns(&[
        ("title", "NVARCHAR(200)"),
        ("pages", "SMALLINT"),
        ("price", "NUMERIC(8,2)"),
        ("in_print", "BIT"),
        ("isbn", "CHAR(13)"),
        ("published", "TIMESTAMP"),
    ])
}

fn searchable(data: &[&str]) -> RequestConfig {
    data.iter()
        .fold(RequestConfig::new(), |req, d| req.column(ColumnDescriptor::new(*d)))
}

fn groups(fragment: Option<Fragment>) -> Vec<FieldConditions> {
    match fragment {
        Some(Fragment::AnyOf(groups)) => groups,
        other => panic!("expected an OR-group, got {other:?}"),
    }
}

#[test]
fn test_character_operator_follows_dialect() {
    let request = searchable(&["title"]);
    let cases = [
        (Dialect::Postgres, MatchOp::ILike),
        (Dialect::Snowflake, MatchOp::ILike),
        (Dialect::MySql, MatchOp::Like),
        (Dialect::TSql, MatchOp::Like),
        (Dialect::Sqlite, MatchOp::Like),
        (Dialect::BigQuery, MatchOp::LowerLike),
    ];
    for (dialect, op) in cases {
        let g = groups(build_predicate("", &books(), &request, "dune", dialect));
        assert_eq!(
            g[0][&FieldRef::column("title")],
            Condition::contains("dune", op),
            "{dialect}"
        );
    }
}

#[test]
fn test_non_numeric_term_excludes_numeric_columns() {
    let request = searchable(&["pages", "price", "in_print"]);
    assert_eq!(
        build_predicate("", &books(), &request, "dune", Dialect::Postgres),
        None
    );
}

#[test]
fn test_numeric_term_hits_every_numeric_and_character_column() {
    let request = searchable(&["title", "pages", "price", "isbn", "published"]);
    let g = groups(build_predicate("", &books(), &request, "300", Dialect::Postgres));

    let fields: Vec<String> = g.iter().flat_map(|c| c.keys().map(ToString::to_string)).collect();
    assert_eq!(fields, vec!["title", "pages", "price", "isbn"]);
    assert_eq!(g[1][&FieldRef::column("pages")], Condition::Eq(Value::Int(300)));
}

#[test]
fn test_boolean_literal() {
    let request = searchable(&["in_print", "pages"]);
    let g = groups(build_predicate("", &books(), &request, " False ", Dialect::TSql));
    assert_eq!(g.len(), 1);
    assert_eq!(
        g[0][&FieldRef::column("in_print")],
        Condition::Eq(Value::Bool(false))
    );

    assert_eq!(
        build_predicate("", &books(), &request, "yes", Dialect::TSql),
        None
    );
}

#[test]
fn test_joined_leaf_ignores_root_descriptors() {
    let request = searchable(&["title", "edition.title", "edition.pages"]);
    let g = groups(build_predicate("edition", &books(), &request, "12", Dialect::DuckDb));

    let fields: Vec<String> = g.iter().flat_map(|c| c.keys().map(ToString::to_string)).collect();
    assert_eq!(fields, vec!["edition.title", "edition.pages"]);
}

#[test]
fn test_each_column_is_its_own_alternative() {
    let request = searchable(&["title", "isbn"]);
    let g = groups(build_predicate("", &books(), &request, "97", Dialect::Postgres));
    assert!(g.iter().all(|conditions| conditions.len() == 1));
}
