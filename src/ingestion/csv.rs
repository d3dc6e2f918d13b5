//! CSV decoding.

use crate::error::{SweepError, SweepResult};
use crate::types::{DataType, Field, Schema, Table, Value};

use super::sniff;

/// Decode CSV bytes into an in-memory [`Table`].
///
/// Rules:
///
/// - The first record is the header row; header names must be unique.
/// - Column types are inferred from the data (see [`super::sniff`]).
/// - Empty cells become [`Value::Null`].
/// - Inconsistent row widths surface as a decode error.
pub fn decode_csv_bytes(bytes: &[u8]) -> SweepResult<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(bytes);
    decode_csv_from_reader(&mut rdr)
}

/// Decode CSV data from an existing CSV reader.
pub fn decode_csv_from_reader<R: std::io::Read>(rdr: &mut csv::Reader<R>) -> SweepResult<Table> {
    let headers = rdr.headers()?.clone();
    if headers.is_empty() {
        return Err(SweepError::MalformedInput {
            message: "input has no header row".to_string(),
        });
    }

    let names: Vec<String> = headers.iter().map(|h| h.trim().to_string()).collect();
    for (i, name) in names.iter().enumerate() {
        if names[..i].iter().any(|earlier| earlier == name) {
            return Err(SweepError::MalformedInput {
                message: format!("duplicate column name '{name}'"),
            });
        }
    }

    let mut records: Vec<csv::StringRecord> = Vec::new();
    for result in rdr.records() {
        records.push(result?);
    }

    let fields: Vec<Field> = names
        .iter()
        .enumerate()
        .map(|(col, name)| {
            let data_type = sniff::infer_column_type(
                records.iter().map(|rec| rec.get(col).unwrap_or("")),
            );
            Field::new(name.clone(), data_type)
        })
        .collect();
    let schema = Schema::new(fields);

    let mut rows: Vec<Vec<Value>> = Vec::with_capacity(records.len());
    for (row_idx0, record) in records.iter().enumerate() {
        // Report 1-based row numbers; +1 again because the header is row 1.
        let user_row = row_idx0 + 2;

        let mut row: Vec<Value> = Vec::with_capacity(schema.fields.len());
        for (col, field) in schema.fields.iter().enumerate() {
            let raw = record.get(col).unwrap_or("");
            row.push(typed_value(user_row, &field.name, field.data_type, raw)?);
        }
        rows.push(row);
    }

    Ok(Table::new(schema, rows))
}

fn typed_value(row: usize, column: &str, data_type: DataType, raw: &str) -> SweepResult<Value> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Value::Null);
    }

    match data_type {
        DataType::Utf8 => Ok(Value::Utf8(trimmed.to_owned())),
        DataType::Int64 => trimmed
            .parse::<i64>()
            .map(Value::Int64)
            .map_err(|e| parse_failure(row, column, raw, &e.to_string())),
        DataType::Float64 => trimmed
            .parse::<f64>()
            .map(Value::Float64)
            .map_err(|e| parse_failure(row, column, raw, &e.to_string())),
        DataType::Bool => sniff::parse_bool(trimmed)
            .map(Value::Bool)
            .map_err(|message| parse_failure(row, column, raw, &message)),
    }
}

// Inference guarantees every cell parses as its column's type; this path exists so a
// violated assumption surfaces as an error instead of a panic.
fn parse_failure(row: usize, column: &str, raw: &str, message: &str) -> SweepError {
    SweepError::MalformedInput {
        message: format!("row {row} column '{column}': {message} (raw='{raw}')"),
    }
}
