//! End-to-end translation against an in-memory store.

#[path = "../common/mod.rs"]
mod common;

use async_trait::async_trait;
use common::{column, library, request};
use gridquery::prelude::*;
use serde::{Serialize, Serializer};
use serde_json::json;

fn users() -> EntityRef {
    EntityRef::new("users")
}

fn names(response: &DataTableResponse) -> Vec<&str> {
    response
        .data
        .iter()
        .filter_map(|row| row["name"].as_str())
        .collect()
}

#[tokio::test]
async fn test_global_search_on_root_entity() {
    let store = library(Dialect::Postgres);
    let req = request(json!({
        "draw": "1",
        "columns": [column("name", ""), column("age", "")],
        "search": { "value": "ann", "regex": "false" }
    }));

    let response = translate(&store, Some(&users()), Some(&req), None, TranslateOptions::default())
        .await
        .unwrap();

    assert_eq!(response.draw, Some(1));
    assert_eq!(response.records_total, 4);
    assert_eq!(response.records_filtered, 2);
    assert_eq!(names(&response), vec!["Ann", "Joanne"]);

    let query = store.last_query().unwrap();
    assert_eq!(
        query.filter,
        Some(Filter::And(vec![Filter::field(
            FieldRef::column("name"),
            Condition::contains("ann", MatchOp::ILike)
        )]))
    );
}

#[tokio::test]
async fn test_envelope_echoes_draw_and_passthrough() {
    let store = library(Dialect::Postgres);
    let req = request(json!({
        "draw": 7,
        "columns": [column("name", "")],
        "_": "1697040000000"
    }));

    let response = DataTable::new(&store)
        .entity("users")
        .request(req)
        .run()
        .await
        .unwrap();

    let envelope = serde_json::to_value(&response).unwrap();
    assert_eq!(envelope["draw"], json!(7));
    assert_eq!(envelope["recordsTotal"], json!(4));
    assert_eq!(envelope["recordsFiltered"], json!(4));
    assert_eq!(envelope["_"], json!("1697040000000"));
    assert_eq!(envelope["data"].as_array().map(Vec::len), Some(4));
}

#[tokio::test]
async fn test_non_numeric_draw_becomes_null() {
    let store = library(Dialect::Postgres);
    let req = request(json!({ "draw": "abc", "columns": [column("name", "")] }));

    let response = translate(&store, Some(&users()), Some(&req), None, TranslateOptions::default())
        .await
        .unwrap();

    let envelope = serde_json::to_value(&response).unwrap();
    assert_eq!(envelope["draw"], json!(null));
    assert!(envelope.get("_").is_none());
}

#[tokio::test]
async fn test_base_filter_is_kept_alongside_search() {
    let store = library(Dialect::Postgres);
    let active = Filter::field(FieldRef::column("active"), Condition::Eq(Value::Bool(true)));
    let req = request(json!({
        "columns": [column("name", "")],
        "search": { "value": "o" }
    }));

    let response = translate(
        &store,
        Some(&users()),
        Some(&req),
        Some(QueryParams::new().filter(active.clone())),
        TranslateOptions::default(),
    )
    .await
    .unwrap();

    assert_eq!(names(&response), vec!["Joanne"]);
    assert_eq!(response.records_filtered, 1);
    assert_eq!(response.records_total, 4);

    let query = store.last_query().unwrap();
    let Some(Filter::And(members)) = query.filter else {
        panic!("expected an AND of base and search");
    };
    assert_eq!(members[0], active);
}

#[tokio::test]
async fn test_missing_inputs_touch_nothing() {
    let store = library(Dialect::Postgres);
    let req = request(json!({ "columns": [column("name", "")], "search": { "value": "ann" } }));

    let no_entity = translate(&store, None, Some(&req), None, TranslateOptions::default()).await;
    assert!(matches!(no_entity, Err(TranslateError::InvalidInvocation(_))));

    let no_request = DataTable::new(&store).entity("users").run().await;
    let err = no_request.unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid invocation: entity and request config should be provided"
    );

    assert_eq!(store.describe_calls(), 0);
    assert!(store.last_query().is_none());
}

#[tokio::test]
async fn test_store_failure_surfaces() {
    let store = library(Dialect::Postgres).failing_fetch();
    let req = request(json!({ "columns": [column("name", "")] }));

    let err = translate(&store, Some(&users()), Some(&req), None, TranslateOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, TranslateError::Store(StoreError::Backend(_))));
}

#[tokio::test]
async fn test_unknown_entity_surfaces_from_describe() {
    let store = library(Dialect::Postgres);
    let req = request(json!({ "columns": [column("name", "")], "search": { "value": "x" } }));

    let err = translate(
        &store,
        Some(&EntityRef::new("orders")),
        Some(&req),
        None,
        TranslateOptions::default(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, TranslateError::Store(StoreError::UnknownEntity(_))));
}

#[tokio::test]
async fn test_search_targets_included_entities() {
    let store = library(Dialect::Postgres);
    let params = QueryParams::new().include(Include::new("authors").alias("author"));
    let req = request(json!({
        "columns": [column("name", ""), column("author.name", "")],
        "search": { "value": "ann" }
    }));

    let response = translate(&store, Some(&users()), Some(&req), Some(params), TranslateOptions::default())
        .await
        .unwrap();

    // The root entity is not searched once includes exist
    assert_eq!(names(&response), vec!["Bob", "Carl"]);
    assert_eq!(
        store.last_query().unwrap().filter,
        Some(Filter::And(vec![Filter::field(
            FieldRef::qualified("author", "name"),
            Condition::contains("ann", MatchOp::ILike)
        )]))
    );
}

#[tokio::test]
async fn test_per_column_search() {
    let store = library(Dialect::Postgres);
    let req = request(json!({
        "columns": [column("name", "jo"), column("age", "")],
        "search": { "value": "ann" }
    }));

    let response = translate(&store, Some(&users()), Some(&req), None, TranslateOptions::default())
        .await
        .unwrap();

    assert_eq!(names(&response), vec!["Joanne"]);
    assert_eq!(store.describe_calls(), 0);
}

#[tokio::test]
async fn test_order_through_include() {
    let store = library(Dialect::Postgres);
    let params = QueryParams::new().include(Include::new("authors").alias("author"));
    let req = request(json!({
        "columns": [column("name", ""), column("author.name", "")],
        "order": [{ "column": "1", "dir": "asc" }]
    }));

    let response = translate(&store, Some(&users()), Some(&req), Some(params), TranslateOptions::default())
        .await
        .unwrap();

    assert_eq!(names(&response), vec!["Carl", "Bob", "Joanne", "Ann"]);
}

#[tokio::test]
async fn test_pagination_after_order() {
    let store = library(Dialect::Postgres);
    let req = request(json!({
        "start": "1",
        "length": "2",
        "columns": [column("name", ""), column("age", "")],
        "order": [{ "column": 1, "dir": "desc" }]
    }));

    let response = translate(&store, Some(&users()), Some(&req), None, TranslateOptions::default())
        .await
        .unwrap();

    assert_eq!(names(&response), vec!["Carl", "Ann"]);
    assert_eq!(response.records_filtered, 4);

    let query = store.last_query().unwrap();
    assert_eq!((query.offset, query.limit), (Some(1), Some(2)));
    assert_eq!(query.order, vec![OrderSpec::column("age", SortDir::Desc)]);
}

#[tokio::test]
async fn test_dialect_option_overrides_store() {
    let store = library(Dialect::Postgres);
    let req = request(json!({ "columns": [column("name", "")], "search": { "value": "ann" } }));

    let query = DataTable::new(&store)
        .entity("users")
        .request(req)
        .options(TranslateOptions {
            dialect: Some(Dialect::TSql),
        })
        .plan()
        .await
        .unwrap();

    assert_eq!(
        query.filter,
        Some(Filter::And(vec![Filter::field(
            FieldRef::column("name"),
            Condition::contains("ann", MatchOp::Like)
        )]))
    );
    assert!(store.last_query().is_none());
}

/// Rows that refuse to serialize.
struct Unprintable;

impl Serialize for Unprintable {
    fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
        Err(serde::ser::Error::custom("row is not representable"))
    }
}

struct BrokenRows;

#[async_trait]
impl SchemaInspector for BrokenRows {
    async fn describe(&self, _entity: &EntityRef) -> StoreResult<ColumnTypes> {
        Ok(ColumnTypes::new())
    }

    fn dialect_of(&self, _entity: &EntityRef) -> Dialect {
        Dialect::DuckDb
    }
}

#[async_trait]
impl DataStore for BrokenRows {
    type Row = Unprintable;

    async fn count(&self, _entity: &EntityRef, _filter: Option<&Filter>) -> StoreResult<u64> {
        Ok(1)
    }

    async fn find_and_count_all(
        &self,
        _entity: &EntityRef,
        _query: &QueryParams,
    ) -> StoreResult<FindAndCount<Unprintable>> {
        Ok(FindAndCount {
            rows: vec![Unprintable],
            count: 1,
        })
    }
}

#[tokio::test]
async fn test_row_serialization_failure() {
    let req = request(json!({ "columns": [column("name", "")] }));
    let err = translate(&BrokenRows, Some(&users()), Some(&req), None, TranslateOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, TranslateError::Row(_)));
}
