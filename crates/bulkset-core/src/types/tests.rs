//! Tests for value and metadata types

use super::*;

fn column_with_default(default: Option<&str>) -> ColumnMeta {
    ColumnMeta {
        name: "status".to_string(),
        data_type: "TEXT".to_string(),
        nullable: true,
        ordinal: 0,
        default_value: default.map(|s| s.to_string()),
    }
}

#[test]
fn declared_default_parses_quoted_literal() {
    let column = column_with_default(Some("'pending'"));
    assert_eq!(
        column.declared_default(),
        Some(Value::String("pending".to_string()))
    );
}

#[test]
fn declared_default_unescapes_doubled_quotes() {
    let column = column_with_default(Some("'it''s'"));
    assert_eq!(
        column.declared_default(),
        Some(Value::String("it's".to_string()))
    );
}

#[test]
fn declared_default_parses_numeric_literals() {
    assert_eq!(
        column_with_default(Some("0")).declared_default(),
        Some(Value::Int64(0))
    );
    assert_eq!(
        column_with_default(Some("1.5")).declared_default(),
        Some(Value::Float64(1.5))
    );
}

#[test]
fn declared_default_treats_null_and_empty_as_absent() {
    assert_eq!(column_with_default(None).declared_default(), None);
    assert_eq!(column_with_default(Some("")).declared_default(), None);
    assert_eq!(column_with_default(Some("NULL")).declared_default(), None);
    assert_eq!(column_with_default(Some("null")).declared_default(), None);
}

#[test]
fn declared_default_parses_boolean_keywords() {
    assert_eq!(
        column_with_default(Some("true")).declared_default(),
        Some(Value::Bool(true))
    );
    assert_eq!(
        column_with_default(Some("FALSE")).declared_default(),
        Some(Value::Bool(false))
    );
}

#[test]
fn declared_default_keeps_unknown_expressions_verbatim() {
    assert_eq!(
        column_with_default(Some("CURRENT_TIMESTAMP")).declared_default(),
        Some(Value::String("CURRENT_TIMESTAMP".to_string()))
    );
}

#[test]
fn row_lookup_by_name_and_index() {
    let row = Row::new(
        vec!["id".to_string(), "name".to_string()],
        vec![Value::Int64(7), Value::String("A".to_string())],
    );
    assert_eq!(row.get(0), Some(&Value::Int64(7)));
    assert_eq!(row.get_by_name("name"), Some(&Value::String("A".to_string())));
    assert_eq!(row.get_by_name("missing"), None);
}

#[test]
fn value_conversions() {
    assert_eq!(Value::from("x"), Value::String("x".to_string()));
    assert_eq!(Value::from(3_i64), Value::Int64(3));
    assert_eq!(Value::from(Option::<i64>::None), Value::Null);
    assert_eq!(Value::from(Some("y")), Value::String("y".to_string()));
    assert!(Value::Null.is_null());
    assert_eq!(Value::Int32(4).as_i64(), Some(4));
}
