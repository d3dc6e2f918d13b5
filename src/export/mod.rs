//! Serializing a [`Table`] into downloadable byte buffers.
//!
//! [`export`] produces an [`Export`]: the fully materialized buffer plus the download
//! metadata (output filename with the extension swapped, fixed MIME type per format).
//! Export never mutates the source table and never fails for empty or zero-column tables.

pub mod csv;
pub mod excel;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SweepResult;
use crate::types::Table;

/// Target format of an export request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    /// Comma-separated values.
    Csv,
    /// Single-sheet spreadsheet workbook.
    Xlsx,
}

impl ExportFormat {
    /// File extension for the output filename, without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
        }
    }

    /// Fixed MIME type for the download.
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }
}

/// A produced export buffer with its download metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Export {
    /// Source filename with its extension replaced by the target format's.
    pub file_name: String,
    /// MIME type for the download.
    pub mime_type: &'static str,
    /// Fully materialized serialized bytes.
    pub bytes: Vec<u8>,
}

/// Serialize `table` to `format`, deriving the output filename from `source_name`.
pub fn export(table: &Table, source_name: &str, format: ExportFormat) -> SweepResult<Export> {
    let bytes = match format {
        ExportFormat::Csv => csv::encode_csv(table)?,
        ExportFormat::Xlsx => excel::encode_workbook(table)?,
    };

    Ok(Export {
        file_name: output_file_name(source_name, format),
        mime_type: format.mime_type(),
        bytes,
    })
}

fn output_file_name(source_name: &str, format: ExportFormat) -> String {
    Path::new(source_name)
        .with_extension(format.extension())
        .to_string_lossy()
        .into_owned()
}
