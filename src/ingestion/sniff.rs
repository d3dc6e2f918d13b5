//! Column type inference for text-sourced tables.
//!
//! The pipeline takes no caller-provided schema; column types are sniffed from the data.
//! Inference looks at every non-empty cell of a column and picks the narrowest type that
//! fits all of them: `Int64`, then `Float64`, then `Bool`, else `Utf8`.

use crate::types::DataType;

/// Infer the type of one column from its raw string cells.
///
/// Empty (whitespace-only) cells are missing values and do not constrain the type. A column
/// with no non-empty cells is `Utf8`.
pub(crate) fn infer_column_type<'a, I>(values: I) -> DataType
where
    I: IntoIterator<Item = &'a str>,
{
    let mut saw_value = false;
    let mut all_int = true;
    let mut all_float = true;
    let mut all_bool = true;

    for raw in values {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }
        saw_value = true;

        if all_int && trimmed.parse::<i64>().is_err() {
            all_int = false;
        }
        if all_float && trimmed.parse::<f64>().is_err() {
            all_float = false;
        }
        if all_bool && !is_bool_token(trimmed) {
            all_bool = false;
        }
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

/// Strict token set for inference. Parsing a cell of an already-inferred `Bool` column is
/// more lenient (see [`parse_bool`]).
fn is_bool_token(s: &str) -> bool {
    s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("false")
}

pub(crate) fn parse_bool(s: &str) -> Result<bool, String> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "yes" | "y" => Ok(true),
        "false" | "f" | "0" | "no" | "n" => Ok(false),
        _ => Err("expected bool (true/false/1/0/yes/no)".to_string()),
    }
}
