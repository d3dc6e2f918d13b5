//! Duplicate-row removal for [`crate::types::Table`].

use std::collections::HashSet;

use crate::types::{Table, Value};

/// Hashable key over a row's cells. Floats key by bit pattern so rows containing the same
/// float value compare equal without an `Eq` impl on `f64`.
#[derive(Hash, PartialEq, Eq)]
enum CellKey {
    Null,
    Int(i64),
    Float(u64),
    Bool(bool),
    Str(String),
}

fn row_key(row: &[Value]) -> Vec<CellKey> {
    row.iter()
        .map(|cell| match cell {
            Value::Null => CellKey::Null,
            Value::Int64(v) => CellKey::Int(*v),
            Value::Float64(v) => CellKey::Float(v.to_bits()),
            Value::Bool(v) => CellKey::Bool(*v),
            Value::Utf8(s) => CellKey::Str(s.clone()),
        })
        .collect()
}

/// Remove exact-duplicate rows in place, keeping the first occurrence in original order.
///
/// Rows compare by full value equality across all columns. Returns the number of rows
/// removed. Idempotent: re-running on an already-deduplicated table is a no-op.
pub fn remove_duplicates(table: &mut Table) -> usize {
    let before = table.rows.len();
    let mut seen: HashSet<Vec<CellKey>> = HashSet::with_capacity(before);
    table.rows.retain(|row| seen.insert(row_key(row)));
    before - table.rows.len()
}

#[cfg(test)]
mod tests {
    use super::remove_duplicates;
    use crate::types::{DataType, Field, Schema, Table, Value};

    fn table_with_duplicates() -> Table {
        let schema = Schema::new(vec![
            Field::new("id", DataType::Int64),
            Field::new("name", DataType::Utf8),
        ]);
        let rows = vec![
            vec![Value::Int64(1), Value::Utf8("a".to_string())],
            vec![Value::Int64(2), Value::Utf8("b".to_string())],
            vec![Value::Int64(1), Value::Utf8("a".to_string())],
            vec![Value::Int64(2), Value::Utf8("b".to_string())],
            vec![Value::Int64(1), Value::Utf8("a".to_string())],
        ];
        Table::new(schema, rows)
    }

    #[test]
    fn keeps_first_occurrence_in_original_order() {
        let mut table = table_with_duplicates();
        let removed = remove_duplicates(&mut table);

        assert_eq!(removed, 3);
        assert_eq!(
            table.rows,
            vec![
                vec![Value::Int64(1), Value::Utf8("a".to_string())],
                vec![Value::Int64(2), Value::Utf8("b".to_string())],
            ]
        );
    }

    #[test]
    fn is_idempotent() {
        let mut table = table_with_duplicates();
        remove_duplicates(&mut table);
        let once = table.clone();

        assert_eq!(remove_duplicates(&mut table), 0);
        assert_eq!(table, once);
    }

    #[test]
    fn rows_differing_only_in_nulls_are_distinct() {
        let schema = Schema::new(vec![Field::new("score", DataType::Float64)]);
        let mut table = Table::new(
            schema,
            vec![
                vec![Value::Float64(1.5)],
                vec![Value::Null],
                vec![Value::Null],
            ],
        );

        assert_eq!(remove_duplicates(&mut table), 1);
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn int_and_float_cells_with_equal_magnitude_are_distinct() {
        let schema = Schema::new(vec![Field::new("v", DataType::Float64)]);
        let mut table = Table::new(
            schema,
            vec![vec![Value::Int64(2)], vec![Value::Float64(2.0)]],
        );

        assert_eq!(remove_duplicates(&mut table), 0);
    }

    #[test]
    fn does_not_change_the_column_set() {
        let mut table = table_with_duplicates();
        let schema = table.schema.clone();
        remove_duplicates(&mut table);
        assert_eq!(table.schema, schema);
    }
}
