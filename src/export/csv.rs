//! CSV encoding.

use std::io;

use crate::error::SweepResult;
use crate::types::{Table, Value};

/// Serialize `table` as CSV bytes: a header line of column names followed by the data rows,
/// comma-separated, no row index column.
///
/// A zero-row table serializes to just the header line; a zero-column table to a lone empty
/// header line. Floats keep a decimal point (`2.0`, not `2`) so a re-decode infers the same
/// column type.
pub fn encode_csv(table: &Table) -> SweepResult<Vec<u8>> {
    if table.column_count() == 0 {
        // `csv::Writer` cannot represent a zero-field record; the empty header line is
        // written directly.
        return Ok(b"\n".to_vec());
    }

    let mut wtr = csv::WriterBuilder::new().from_writer(Vec::new());
    wtr.write_record(table.schema.field_names())?;
    for row in &table.rows {
        wtr.write_record(row.iter().map(format_cell))?;
    }
    wtr.flush()?;
    wtr.into_inner()
        .map_err(|e| io::Error::other(e.to_string()).into())
}

fn format_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Int64(v) => v.to_string(),
        Value::Float64(v) => {
            if v.is_finite() && v.fract() == 0.0 {
                format!("{v:.1}")
            } else {
                v.to_string()
            }
        }
        Value::Bool(v) => v.to_string(),
        Value::Utf8(s) => s.clone(),
    }
}
