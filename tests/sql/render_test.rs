//! SQL rendering of finalized queries, checked against sqlparser.

#[path = "../common/mod.rs"]
mod common;

use common::{column, request, validate_sql};
use gridquery::metadata::StaticSchema;
use gridquery::prelude::*;
use gridquery::sql::select_sql;
use gridquery::translation::plan;
use insta::assert_snapshot;
use serde_json::json;

const SCHEMA: &str = r#"{
    "dialect": "postgres",
    "users":   { "name": { "type": "VARCHAR(64)" }, "age": { "type": "INTEGER" }, "active": { "type": "BOOLEAN" } },
    "authors": { "name": { "type": "NVARCHAR(100)" } }
}"#;

fn users() -> EntityRef {
    EntityRef::new("users")
}

fn age_search() -> RequestConfig {
    request(json!({
        "start": "20",
        "length": "10",
        "columns": [column("name", ""), column("age", "")],
        "search": { "value": "42" },
        "order": [{ "column": "1", "dir": "desc" }]
    }))
}

fn active_only() -> QueryParams {
    QueryParams::new().filter(Filter::field(
        FieldRef::column("active"),
        Condition::Eq(Value::Bool(true)),
    ))
}

async fn planned(params: QueryParams, req: &RequestConfig, dialect: Option<Dialect>) -> QueryParams {
    let schema = StaticSchema::from_json(SCHEMA).unwrap();
    plan(&schema, &users(), req, params, &TranslateOptions { dialect })
        .await
        .unwrap()
}

#[tokio::test]
async fn test_global_search_postgres() {
    let query = planned(QueryParams::new(), &age_search(), None).await;
    let sql = select_sql(&users(), &query, Dialect::Postgres);
    assert_snapshot!(sql, @r#"SELECT * FROM "users" WHERE "name" ILIKE '%42%' ESCAPE '\' OR "age" = 42 ORDER BY "age" DESC LIMIT 10 OFFSET 20"#);
    validate_sql(&sql, Dialect::Postgres).unwrap();
}

#[tokio::test]
async fn test_base_filter_groups_search_mysql() {
    let query = planned(active_only(), &age_search(), Some(Dialect::MySql)).await;
    let sql = select_sql(&users(), &query, Dialect::MySql);
    assert_snapshot!(sql, @"SELECT * FROM `users` WHERE `active` = 1 AND (`name` LIKE '%42%' OR `age` = 42) ORDER BY `age` DESC LIMIT 10 OFFSET 20");
    validate_sql(&sql, Dialect::MySql).unwrap();
}

#[tokio::test]
async fn test_search_and_order_through_include_tsql() {
    let params = QueryParams::new().include(Include::new("authors").alias("author"));
    let req = request(json!({
        "start": 0,
        "length": 5,
        "columns": [column("name", ""), column("author.name", "")],
        "search": { "value": "ann" },
        "order": [{ "column": 1, "dir": "asc" }]
    }));

    let query = planned(params, &req, Some(Dialect::TSql)).await;
    let sql = select_sql(&users(), &query, Dialect::TSql);
    assert_snapshot!(sql, @r#"SELECT * FROM [users] WHERE [author].[name] LIKE '%ann%' ESCAPE '\' ORDER BY [author].[name] ASC OFFSET 0 ROWS FETCH NEXT 5 ROWS ONLY"#);
    validate_sql(&sql, Dialect::TSql).unwrap();
}

#[tokio::test]
async fn test_per_column_wildcards_are_literal_postgres() {
    let req = request(json!({
        "columns": [column("name", "50%_off")]
    }));
    let query = planned(QueryParams::new(), &req, None).await;
    let sql = select_sql(&users(), &query, Dialect::Postgres);
    assert_snapshot!(sql, @r#"SELECT * FROM "users" WHERE "name" LIKE '%50\%\_off%' ESCAPE '\'"#);
    validate_sql(&sql, Dialect::Postgres).unwrap();
}

#[tokio::test]
async fn test_bracket_class_is_literal_tsql() {
    let req = request(json!({
        "columns": [column("name", "[a]")]
    }));
    let query = planned(QueryParams::new(), &req, Some(Dialect::TSql)).await;
    let sql = select_sql(&users(), &query, Dialect::TSql);
    assert_snapshot!(sql, @r#"SELECT * FROM [users] WHERE [name] LIKE '%\[a]%' ESCAPE '\'"#);
    validate_sql(&sql, Dialect::TSql).unwrap();
}

#[tokio::test]
async fn test_backslash_escapes_doubled_redshift() {
    let req = request(json!({
        "columns": [column("name", "50%_off")]
    }));
    let query = planned(QueryParams::new(), &req, Some(Dialect::Redshift)).await;
    let sql = select_sql(&users(), &query, Dialect::Redshift);
    assert_snapshot!(sql, @r#"SELECT * FROM "users" WHERE "name" LIKE '%50\\%\\_off%' ESCAPE '\\'"#);
    validate_sql(&sql, Dialect::Redshift).unwrap();
}

#[test]
fn test_schema_qualified_table_bigquery() {
    let query = QueryParams::new().filter(Filter::field(
        FieldRef::column("name"),
        Condition::contains("o'k", MatchOp::LowerLike),
    ));
    let sql = select_sql(&EntityRef::new("analytics.users"), &query, Dialect::BigQuery);
    assert_snapshot!(sql, @r#"SELECT * FROM `analytics`.`users` WHERE LOWER(`name`) LIKE LOWER('%o''k%')"#);
    validate_sql(&sql, Dialect::BigQuery).unwrap();
}

#[test]
fn test_attributes_and_membership_sqlite() {
    let mut query = QueryParams::new().filter(Filter::Fields(
        [
            (FieldRef::column("id"), Condition::In(vec![Value::Int(1), Value::Int(2)])),
            (FieldRef::column("deleted_at"), Condition::IsNull(true)),
        ]
        .into_iter()
        .collect(),
    ));
    query.attributes = vec!["id".into(), "name".into()];
    query.limit = Some(10);

    let sql = select_sql(&users(), &query, Dialect::Sqlite);
    assert_snapshot!(sql, @r#"SELECT "id", "name" FROM "users" WHERE "deleted_at" IS NULL AND "id" IN (1, 2) LIMIT 10"#);
    validate_sql(&sql, Dialect::Sqlite).unwrap();
}

#[test]
fn test_every_dialect_renders_valid_search() {
    let query = QueryParams::new()
        .filter(Filter::And(vec![
            Filter::Or(vec![
                Filter::field(FieldRef::column("name"), Condition::contains("ann", MatchOp::ILike)),
                Filter::field(FieldRef::column("age"), Condition::Eq(Value::Int(42))),
            ]),
            Filter::field(FieldRef::column("active"), Condition::Eq(Value::Bool(true))),
        ]))
        .with_order(Some(OrderSpec::column("age", SortDir::Asc)))
        .with_pagination(Some(Pagination { offset: 10, limit: 10 }));

    for dialect in [
        Dialect::Postgres,
        Dialect::Redshift,
        Dialect::DuckDb,
        Dialect::MySql,
        Dialect::TSql,
        Dialect::Snowflake,
        Dialect::Sqlite,
        Dialect::BigQuery,
        Dialect::Databricks,
    ] {
        let sql = select_sql(&users(), &query, dialect);
        validate_sql(&sql, dialect).unwrap();
    }
}
