//! Tests for PRAGMA row parsing

use super::*;
use bulkset_core::Value;

fn table_info_row(values: Vec<Value>) -> Row {
    Row::new(
        vec![
            "cid".to_string(),
            "name".to_string(),
            "type".to_string(),
            "notnull".to_string(),
            "dflt_value".to_string(),
            "pk".to_string(),
        ],
        values,
    )
}

#[test]
fn parses_a_nullable_column_without_default() {
    let row = table_info_row(vec![
        Value::Int64(1),
        Value::String("email".to_string()),
        Value::String("TEXT".to_string()),
        Value::Int64(0),
        Value::Null,
        Value::Int64(0),
    ]);

    let column = column_from_table_info(&row);
    assert_eq!(column.name, "email");
    assert_eq!(column.data_type, "TEXT");
    assert!(column.nullable);
    assert_eq!(column.ordinal, 1);
    assert_eq!(column.default_value, None);
}

#[test]
fn parses_not_null_and_keeps_default_expression_text() {
    let row = table_info_row(vec![
        Value::Int64(2),
        Value::String("status".to_string()),
        Value::String("TEXT".to_string()),
        Value::Int64(1),
        Value::String("'pending'".to_string()),
        Value::Int64(0),
    ]);

    let column = column_from_table_info(&row);
    assert!(!column.nullable);
    assert_eq!(column.default_value, Some("'pending'".to_string()));
    assert_eq!(
        column.declared_default(),
        Some(Value::String("pending".to_string()))
    );
}
