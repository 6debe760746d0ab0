//! Parsing of client payloads and the query they plan into.

use gridquery::metadata::StaticSchema;
use gridquery::prelude::*;
use gridquery::translation::plan;
use serde_json::json;

/// Form-encoded payload as jQuery posts it: every scalar is a string.
const FORM_PAYLOAD: &str = r#"{
    "draw": "2",
    "columns": [
        { "data": "name", "name": "", "searchable": "true", "orderable": "true", "search": { "value": "", "regex": "false" } },
        { "data": "age", "name": "", "searchable": "true", "orderable": "true", "search": { "value": "", "regex": "false" } },
        { "data": null, "name": "", "searchable": "false", "orderable": "false", "search": { "value": "", "regex": "false" } }
    ],
    "order": [{ "column": "1", "dir": "desc" }],
    "start": "20",
    "length": "10",
    "search": { "value": "42", "regex": "false" },
    "_": "1697040000000"
}"#;

/// The same request from a client that posts JSON with native types.
const JSON_PAYLOAD: &str = r#"{
    "draw": 2,
    "columns": [
        { "data": "name", "searchable": true, "orderable": true, "search": { "value": "", "regex": false } },
        { "data": "age", "searchable": true, "orderable": true, "search": { "value": "", "regex": false } },
        { "data": null, "searchable": false, "orderable": false, "search": { "value": "", "regex": false } }
    ],
    "order": [{ "column": 1, "dir": "desc" }],
    "start": 20,
    "length": 10,
    "search": { "value": "42", "regex": false },
    "_": "1697040000000"
}"#;

fn schema() -> StaticSchema {
    StaticSchema::from_json(
        r#"{ "dialect": "duckdb", "users": { "name": { "type": "VARCHAR" }, "age": { "type": "BIGINT" } } }"#,
    )
    .unwrap()
}

async fn planned(req: &RequestConfig) -> QueryParams {
    plan(
        &schema(),
        &EntityRef::new("users"),
        req,
        QueryParams::new(),
        &TranslateOptions::default(),
    )
    .await
    .unwrap()
}

#[test]
fn test_form_payload_fields() {
    let req: RequestConfig = serde_json::from_str(FORM_PAYLOAD).unwrap();
    assert_eq!(req.draw_number(), Some(2));
    assert_eq!(req.global_term(), Some("42"));
    assert!(!req.has_column_search());
    assert!(req.columns[1].searchable);
    assert!(!req.columns[2].searchable);
    assert_eq!(req.columns[2].data, "");
    assert_eq!(req.start.as_ref().and_then(Param::as_u64), Some(20));
    assert_eq!(req.passthrough, Some(json!("1697040000000")));
}

#[tokio::test]
async fn test_form_and_json_payloads_plan_alike() {
    let form: RequestConfig = serde_json::from_str(FORM_PAYLOAD).unwrap();
    let native: RequestConfig = serde_json::from_str(JSON_PAYLOAD).unwrap();
    assert_eq!(planned(&form).await, planned(&native).await);
}

#[tokio::test]
async fn test_planned_query_wire_shape() {
    let req: RequestConfig = serde_json::from_str(FORM_PAYLOAD).unwrap();
    let query = planned(&req).await;

    assert_eq!(
        serde_json::to_value(&query).unwrap(),
        json!({
            "where": {
                "and": [{
                    "or": [
                        { "fields": { "name": { "contains": { "value": "42", "op": "ilike" } } } },
                        { "fields": { "age": { "eq": 42 } } }
                    ]
                }]
            },
            "order": [["age", "DESC"]],
            "offset": 20,
            "limit": 10
        })
    );
}

#[tokio::test]
async fn test_regex_flag_is_matched_literally() {
    let req: RequestConfig = serde_json::from_value(json!({
        "columns": [{ "data": "name", "searchable": "true", "search": { "value": "^a.*", "regex": "true" } }]
    }))
    .unwrap();
    assert!(req.columns[0].search.regex);

    let query = planned(&req).await;
    let expected: gridquery::query::FieldConditions = [(
        FieldRef::column("name"),
        Condition::contains("^a.*", MatchOp::Like),
    )]
    .into_iter()
    .collect();
    assert_eq!(query.filter, Some(Filter::And(vec![Filter::Fields(expected)])));
}

#[test]
fn test_uppercase_searchable_flag_is_false() {
    let req: RequestConfig = serde_json::from_value(json!({
        "columns": [{ "data": "name", "searchable": "TRUE", "search": { "value": "ann" } }]
    }))
    .unwrap();
    assert!(!req.columns[0].searchable);
    assert!(!req.has_column_search());
}

#[test]
fn test_numeric_data_key() {
    let req: RequestConfig = serde_json::from_value(json!({
        "columns": [{ "data": 0, "searchable": "true", "search": { "value": "x" } }]
    }))
    .unwrap();
    assert_eq!(req.columns[0].data, "0");
}
