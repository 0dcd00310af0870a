//! Tests for query string encoding.

use super::{ErrorKind, query_string};
use serde::Serialize;
use serde_json::json;

#[test]
fn null_entries_are_omitted() {
    let query = query_string(&json!({ "a": 1, "b": null, "c": null })).unwrap();
    assert_eq!(query.as_deref(), Some("a=1"));
}

#[test]
fn none_struct_fields_are_omitted() {
    #[derive(Serialize)]
    struct Params {
        page: Option<u32>,
        search: Option<String>,
        per_page: Option<u32>,
    }

    let query = query_string(&Params {
        page: Some(2),
        search: None,
        per_page: Some(20),
    })
    .unwrap();

    assert_eq!(query.as_deref(), Some("page=2&per_page=20"));
}

#[test]
fn all_null_yields_none() {
    assert_eq!(query_string(&json!({ "a": null })).unwrap(), None);
    assert_eq!(query_string(&json!({})).unwrap(), None);
    assert_eq!(query_string(&()).unwrap(), None);
}

#[test]
fn strings_are_form_encoded_verbatim() {
    let query = query_string(&json!({ "domain.cname": "shop.example.com", "q": "a b&c" })).unwrap();
    assert_eq!(
        query.as_deref(),
        Some("domain.cname=shop.example.com&q=a+b%26c")
    );
}

#[test]
fn scalars_use_display_form() {
    let query = query_string(&json!({ "active": false, "total": 29.99 })).unwrap();
    assert_eq!(query.as_deref(), Some("active=false&total=29.99"));
}

#[test]
fn empty_string_is_kept() {
    let query = query_string(&json!({ "search": "" })).unwrap();
    assert_eq!(query.as_deref(), Some("search="));
}

#[test]
fn non_map_is_rejected() {
    let err = query_string(&json!([1, 2])).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidRequest);
    assert_eq!(err.status(), 0);
}

#[test]
fn field_order_is_kept() {
    #[derive(Serialize)]
    struct Params {
        page: u32,
        limit: u32,
        category: Option<u32>,
    }

    let query = query_string(&Params {
        page: 2,
        limit: 10,
        category: Some(3),
    })
    .unwrap();

    assert_eq!(query.as_deref(), Some("page=2&limit=10&category=3"));
}

#[test]
fn map_insertion_order_is_kept() {
    let query = query_string(&json!({ "z": 1, "a": 2, "m": 3 })).unwrap();
    assert_eq!(query.as_deref(), Some("z=1&a=2&m=3"));
}
