//! Spreadsheet (`.xlsx`) encoding.

use rust_xlsxwriter::Workbook;

use crate::error::SweepResult;
use crate::types::{Table, Value};

/// Serialize `table` as a single-sheet workbook with a header row, fully materialized in an
/// in-memory buffer.
///
/// Missing cells are left blank. Empty and zero-column tables serialize to a workbook with
/// an empty sheet.
pub fn encode_workbook(table: &Table) -> SweepResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    for (col, name) in table.schema.field_names().enumerate() {
        sheet.write_string(0, col as u16, name)?;
    }

    for (row_idx, row) in table.rows.iter().enumerate() {
        let r = (row_idx + 1) as u32;
        for (col_idx, cell) in row.iter().enumerate() {
            let c = col_idx as u16;
            match cell {
                Value::Null => {}
                Value::Int64(v) => {
                    sheet.write_number(r, c, *v as f64)?;
                }
                Value::Float64(v) => {
                    sheet.write_number(r, c, *v)?;
                }
                Value::Bool(v) => {
                    sheet.write_boolean(r, c, *v)?;
                }
                Value::Utf8(s) => {
                    sheet.write_string(r, c, s)?;
                }
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}
