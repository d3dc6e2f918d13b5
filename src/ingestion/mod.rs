//! Decoding uploaded files into in-memory [`crate::types::Table`]s.
//!
//! Most callers go through [`crate::session::FileSession::open`], which pairs an upload with
//! its decoded table. The pieces are also usable directly:
//!
//! - [`SourceFormat::from_file_name`]: pick the decoder from a filename extension
//! - [`ingest_bytes`]: detect + decode in one step
//! - [`csv`] / [`excel`]: format-specific decoders
//!
//! Unrecognized extensions fail with [`SweepError::UnsupportedFormat`] naming the offending
//! extension; decode failures surface as malformed-input errors. Both halt processing for
//! that file only.

pub mod csv;
pub mod excel;
pub(crate) mod sniff;

use serde::{Deserialize, Serialize};

use crate::error::{SweepError, SweepResult};
use crate::types::Table;

/// Format tag inferred from an uploaded filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceFormat {
    /// Comma-separated values (`.csv`).
    Csv,
    /// Single-sheet spreadsheet workbook (`.xlsx`).
    Spreadsheet,
}

impl SourceFormat {
    /// Parse a source format from a file extension (case-insensitive, no leading dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" => Some(Self::Spreadsheet),
            _ => None,
        }
    }

    /// Determine the format of an uploaded filename.
    ///
    /// Anything other than `.csv`/`.xlsx` (including a missing extension) is rejected with
    /// [`SweepError::UnsupportedFormat`].
    pub fn from_file_name(file_name: &str) -> SweepResult<Self> {
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        Self::from_extension(&extension).ok_or(SweepError::UnsupportedFormat { extension })
    }
}

/// Decode uploaded bytes with the decoder for `format`.
pub fn decode_bytes(format: SourceFormat, bytes: &[u8]) -> SweepResult<Table> {
    match format {
        SourceFormat::Csv => csv::decode_csv_bytes(bytes),
        SourceFormat::Spreadsheet => excel::decode_workbook_bytes(bytes),
    }
}

/// Detect the format from `file_name` and decode `bytes` with it.
pub fn ingest_bytes(file_name: &str, bytes: &[u8]) -> SweepResult<(SourceFormat, Table)> {
    let format = SourceFormat::from_file_name(file_name)?;
    let table = decode_bytes(format, bytes)?;
    Ok((format, table))
}

#[cfg(test)]
mod tests {
    use super::SourceFormat;
    use crate::error::SweepError;

    #[test]
    fn extension_matching_is_case_insensitive() {
        assert_eq!(
            SourceFormat::from_file_name("DATA.CSV").unwrap(),
            SourceFormat::Csv
        );
        assert_eq!(
            SourceFormat::from_file_name("book.XlSx").unwrap(),
            SourceFormat::Spreadsheet
        );
    }

    #[test]
    fn unsupported_extension_is_named_in_the_error() {
        let err = SourceFormat::from_file_name("notes.txt").unwrap_err();
        match &err {
            SweepError::UnsupportedFormat { extension } => assert_eq!(extension, "txt"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains(".txt"));
    }

    #[test]
    fn missing_extension_is_unsupported() {
        let err = SourceFormat::from_file_name("README").unwrap_err();
        assert!(matches!(
            err,
            SweepError::UnsupportedFormat { ref extension } if extension.is_empty()
        ));
    }
}
