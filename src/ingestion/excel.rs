//! Spreadsheet (`.xlsx`) decoding.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};

use crate::error::{SweepError, SweepResult};
use crate::types::{DataType, Field, Schema, Table, Value};

use super::sniff;

/// Decode workbook bytes into an in-memory [`Table`].
///
/// Behavior:
/// - Reads the first sheet of the workbook.
/// - The first non-empty row is the header row; header names must be unique.
/// - Column types are inferred from the cells below the header.
/// - Empty cells become [`Value::Null`].
pub fn decode_workbook_bytes(bytes: &[u8]) -> SweepResult<Table> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;

    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| SweepError::MalformedInput {
            message: "workbook has no sheets".to_string(),
        })?;
    let range = workbook.worksheet_range(&sheet)?;

    decode_sheet_range(&range)
}

fn decode_sheet_range(range: &Range<Data>) -> SweepResult<Table> {
    let (header_row_idx, names) = find_header_row(range)?;

    for (i, name) in names.iter().enumerate() {
        if names[..i].iter().any(|earlier| earlier == name) {
            return Err(SweepError::MalformedInput {
                message: format!("duplicate column name '{name}'"),
            });
        }
    }

    let data_rows: Vec<&[Data]> = range
        .rows()
        .enumerate()
        .filter(|(idx0, _)| *idx0 > header_row_idx)
        .map(|(_, row)| row)
        .collect();

    let fields: Vec<Field> = names
        .iter()
        .enumerate()
        .map(|(col, name)| {
            let data_type = infer_cell_column_type(
                data_rows.iter().map(|row| row.get(col).unwrap_or(&Data::Empty)),
            );
            Field::new(name.clone(), data_type)
        })
        .collect();
    let schema = Schema::new(fields);

    let mut rows: Vec<Vec<Value>> = Vec::with_capacity(data_rows.len());
    for (row_idx0, row) in data_rows.iter().enumerate() {
        // Report 1-based, spreadsheet-like row numbers.
        let user_row = header_row_idx + row_idx0 + 2;

        let mut out_row: Vec<Value> = Vec::with_capacity(schema.fields.len());
        for (col, field) in schema.fields.iter().enumerate() {
            let cell = row.get(col).unwrap_or(&Data::Empty);
            out_row.push(convert_cell(user_row, &field.name, field.data_type, cell)?);
        }
        rows.push(out_row);
    }

    Ok(Table::new(schema, rows))
}

fn find_header_row(range: &Range<Data>) -> SweepResult<(usize, Vec<String>)> {
    for (idx0, row) in range.rows().enumerate() {
        if row.iter().any(|c| !matches!(c, Data::Empty)) {
            let names = row
                .iter()
                .map(|c| cell_to_string(c).trim().to_string())
                .collect();
            return Ok((idx0, names));
        }
    }

    Err(SweepError::MalformedInput {
        message: "sheet has no non-empty rows (no header row found)".to_string(),
    })
}

/// Cell-typed counterpart of [`sniff::infer_column_type`]. Workbook numbers are stored as
/// floats, so an integer column is one where every numeric cell has no fractional part.
fn infer_cell_column_type<'a, I>(cells: I) -> DataType
where
    I: IntoIterator<Item = &'a Data>,
{
    let mut saw_value = false;
    let mut all_int = true;
    let mut all_float = true;
    let mut all_bool = true;

    for cell in cells {
        let (can_int, can_float, can_bool) = match cell {
            Data::Empty => continue,
            Data::Int(_) => (true, true, false),
            Data::Float(f) => (f.fract() == 0.0, true, false),
            Data::Bool(_) => (false, false, true),
            Data::String(s) => {
                let t = s.trim();
                if t.is_empty() {
                    continue;
                }
                (
                    t.parse::<i64>().is_ok(),
                    t.parse::<f64>().is_ok(),
                    t.eq_ignore_ascii_case("true") || t.eq_ignore_ascii_case("false"),
                )
            }
            // Dates, durations, and error cells read as their text form.
            _ => (false, false, false),
        };

        saw_value = true;
        all_int &= can_int;
        all_float &= can_float;
        all_bool &= can_bool;
        if !all_int && !all_float && !all_bool {
            return DataType::Utf8;
        }
    }

    if !saw_value {
        return DataType::Utf8;
    }
    if all_int {
        DataType::Int64
    } else if all_float {
        DataType::Float64
    } else if all_bool {
        DataType::Bool
    } else {
        DataType::Utf8
    }
}

fn convert_cell(row: usize, column: &str, data_type: DataType, c: &Data) -> SweepResult<Value> {
    if matches!(c, Data::Empty) {
        return Ok(Value::Null);
    }
    if let Data::String(s) = c {
        if s.trim().is_empty() {
            return Ok(Value::Null);
        }
    }

    match data_type {
        DataType::Utf8 => Ok(Value::Utf8(cell_to_string(c))),
        DataType::Bool => parse_bool_cell(row, column, c).map(Value::Bool),
        DataType::Int64 => parse_i64_cell(row, column, c).map(Value::Int64),
        DataType::Float64 => parse_f64_cell(row, column, c).map(Value::Float64),
    }
}

fn cell_to_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.clone(),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        _ => c.to_string(),
    }
}

fn parse_bool_cell(row: usize, column: &str, c: &Data) -> SweepResult<bool> {
    match c {
        Data::Bool(b) => Ok(*b),
        Data::String(s) => {
            sniff::parse_bool(s.trim()).map_err(|message| parse_failure(row, column, c, &message))
        }
        _ => Err(parse_failure(row, column, c, "expected bool")),
    }
}

fn parse_i64_cell(row: usize, column: &str, c: &Data) -> SweepResult<i64> {
    match c {
        Data::Int(i) => Ok(*i),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                Ok(*f as i64)
            } else {
                Err(parse_failure(
                    row,
                    column,
                    c,
                    "expected integer (got non-integer float)",
                ))
            }
        }
        Data::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|e| parse_failure(row, column, c, &e.to_string())),
        _ => Err(parse_failure(row, column, c, "expected integer")),
    }
}

fn parse_f64_cell(row: usize, column: &str, c: &Data) -> SweepResult<f64> {
    match c {
        Data::Float(f) => Ok(*f),
        Data::Int(i) => Ok(*i as f64),
        Data::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| parse_failure(row, column, c, &e.to_string())),
        _ => Err(parse_failure(row, column, c, "expected number")),
    }
}

// Inference guarantees every cell converts to its column's type; this path exists so a
// violated assumption surfaces as an error instead of a panic.
fn parse_failure(row: usize, column: &str, c: &Data, message: &str) -> SweepError {
    SweepError::MalformedInput {
        message: format!("row {row} column '{column}': {message} (raw='{c}')"),
    }
}
