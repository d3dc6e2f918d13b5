//! Mean-fill of missing numeric cells for [`crate::types::Table`].

use crate::types::{DataType, Table, Value};

/// Replace every missing cell of each numeric column with that column's arithmetic mean,
/// computed over the non-missing values only. In place; returns the number of filled cells.
///
/// - Non-numeric columns are untouched.
/// - Columns with zero non-missing values are left unchanged (mean undefined).
/// - An `Int64` column with holes is promoted to `Float64` first, so the mean is stored
///   exactly.
/// - Idempotent after the first application: no missing values remain to fill.
pub fn fill_missing(table: &mut Table) -> usize {
    let mut filled = 0;

    for idx in 0..table.schema.fields.len() {
        let data_type = table.schema.fields[idx].data_type;
        if !data_type.is_numeric() {
            continue;
        }

        let mut sum = 0.0;
        let mut present = 0usize;
        let mut holes = 0usize;
        for row in &table.rows {
            match row[idx].as_f64() {
                Some(v) => {
                    sum += v;
                    present += 1;
                }
                None => holes += 1,
            }
        }
        if holes == 0 || present == 0 {
            continue;
        }
        let mean = sum / present as f64;

        if data_type == DataType::Int64 {
            table.schema.fields[idx].data_type = DataType::Float64;
            for row in &mut table.rows {
                if let Value::Int64(v) = row[idx] {
                    row[idx] = Value::Float64(v as f64);
                }
            }
        }

        for row in &mut table.rows {
            if row[idx].is_null() {
                row[idx] = Value::Float64(mean);
                filled += 1;
            }
        }
    }

    filled
}
