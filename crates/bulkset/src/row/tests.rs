//! Tests for row shapes

use super::*;

#[test]
fn keyed_lookup_ignores_position() {
    let row = BulkRow::keyed([("name", "A"), ("email", "a@x.com")]);
    assert_eq!(
        row.value_for("email", 0),
        Some(&Value::String("a@x.com".to_string()))
    );
    assert_eq!(row.value_for("missing", 0), None);
}

#[test]
fn keyed_explicit_null_is_still_present() {
    let row = BulkRow::keyed([("email", Value::Null)]);
    assert_eq!(row.value_for("email", 3), Some(&Value::Null));
}

#[test]
fn positional_lookup_is_index_based() {
    let row = BulkRow::positional(["A", "a@x.com"]);
    assert_eq!(
        row.value_for("anything", 1),
        Some(&Value::String("a@x.com".to_string()))
    );
    assert_eq!(row.value_for("anything", 2), None);
}

#[test]
fn vectors_convert_to_positional_rows() {
    let row: BulkRow = vec![Value::Int64(1), Value::Null].into();
    assert_eq!(
        row,
        BulkRow::Positional(vec![Value::Int64(1), Value::Null])
    );
}
