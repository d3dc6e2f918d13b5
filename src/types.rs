//! Core data model types for the pipeline.
//!
//! Every uploaded file decodes into an in-memory [`Table`]: a [`Schema`] (a list of typed
//! [`Field`]s, one per column) plus row-major value storage. Column types are inferred at
//! ingestion time, not declared by the caller.

/// Logical data type of a [`Table`] column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// 64-bit signed integer.
    Int64,
    /// 64-bit floating point number.
    Float64,
    /// Boolean.
    Bool,
    /// UTF-8 string.
    Utf8,
}

impl DataType {
    /// `true` for the types the Cleaner's mean-fill and the chart stage operate on.
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Int64 | Self::Float64)
    }
}

/// A single named, typed column in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Column name.
    pub name: String,
    /// Column data type.
    pub data_type: DataType,
}

impl Field {
    /// Create a new field.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// Ordered list of fields describing a table's columns.
///
/// Column names are unique; ingestion rejects duplicate headers before a schema is built.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schema {
    /// Ordered list of fields.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns the index of a field by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

/// A single typed cell in a [`Table`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing/empty cell.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// UTF-8 string.
    Utf8(String),
}

impl Value {
    /// `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Numeric view of the cell: `Int64` and `Float64` convert, everything else is `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int64(v) => Some(*v as f64),
            Self::Float64(v) => Some(*v),
            _ => None,
        }
    }
}

/// In-memory tabular dataset: named, typed columns of equal length.
///
/// Rows are stored as `Vec<Vec<Value>>` in the same order as the [`Schema`] fields. One
/// `Table` exists per uploaded file and is owned exclusively by that file's pipeline run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    /// Schema describing row shape.
    pub schema: Schema,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    /// Create a table from schema and rows.
    pub fn new(schema: Schema, rows: Vec<Vec<Value>>) -> Self {
        Self { schema, rows }
    }

    /// Number of rows in the table.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns in the table.
    pub fn column_count(&self) -> usize {
        self.schema.fields.len()
    }

    /// Names of the columns whose type is numeric, in schema order.
    pub fn numeric_column_names(&self) -> Vec<&str> {
        self.schema
            .fields
            .iter()
            .filter(|f| f.data_type.is_numeric())
            .map(|f| f.name.as_str())
            .collect()
    }

    /// A copy of the first `n` rows (fewer if the table is shorter), schema preserved.
    pub fn head(&self, n: usize) -> Table {
        Table {
            schema: self.schema.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }

    /// A copy of this table narrowed to `names`, in the order requested.
    ///
    /// Names not present in the schema are skipped; an empty request yields a zero-column
    /// table with the original row count.
    pub fn project(&self, names: &[&str]) -> Table {
        let idxs: Vec<usize> = names
            .iter()
            .filter_map(|name| self.schema.index_of(name))
            .collect();

        let fields = idxs
            .iter()
            .map(|&i| self.schema.fields[i].clone())
            .collect();
        let rows = self
            .rows
            .iter()
            .map(|row| idxs.iter().map(|&i| row[i].clone()).collect())
            .collect();

        Table {
            schema: Schema::new(fields),
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DataType, Field, Schema, Table, Value};

    fn sample_table() -> Table {
        let schema = Schema::new(vec![
            Field::new("id", DataType::Int64),
            Field::new("name", DataType::Utf8),
            Field::new("score", DataType::Float64),
        ]);
        let rows = vec![
            vec![
                Value::Int64(1),
                Value::Utf8("a".to_string()),
                Value::Float64(10.0),
            ],
            vec![Value::Int64(2), Value::Utf8("b".to_string()), Value::Null],
        ];
        Table::new(schema, rows)
    }

    #[test]
    fn numeric_column_names_excludes_text_and_bool() {
        let mut table = sample_table();
        table.schema.fields.push(Field::new("flag", DataType::Bool));
        for row in &mut table.rows {
            row.push(Value::Bool(true));
        }
        assert_eq!(table.numeric_column_names(), vec!["id", "score"]);
    }

    #[test]
    fn head_truncates_and_preserves_schema() {
        let table = sample_table();
        let head = table.head(1);
        assert_eq!(head.schema, table.schema);
        assert_eq!(head.row_count(), 1);
        assert_eq!(table.head(10).row_count(), 2);
    }

    #[test]
    fn project_reorders_and_keeps_row_count() {
        let table = sample_table();
        let out = table.project(&["score", "id"]);
        assert_eq!(
            out.schema.field_names().collect::<Vec<_>>(),
            vec!["score", "id"]
        );
        assert_eq!(out.row_count(), 2);
        assert_eq!(out.rows[0], vec![Value::Float64(10.0), Value::Int64(1)]);
    }

    #[test]
    fn project_skips_unknown_names_and_allows_empty_selection() {
        let table = sample_table();
        assert_eq!(table.project(&["id", "missing"]).schema.fields.len(), 1);
        let empty = table.project(&[]);
        assert_eq!(empty.column_count(), 0);
        assert_eq!(empty.row_count(), 2);
    }
}
