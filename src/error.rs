use thiserror::Error;

/// Convenience result type for pipeline operations.
pub type SweepResult<T> = Result<T, SweepError>;

/// Error type shared by every pipeline stage.
///
/// All failures recover at single-file granularity: a file that errors is reported and
/// skipped, and the remaining uploads in the same session continue unaffected.
#[derive(Debug, Error)]
pub enum SweepError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The uploaded filename carries an extension no decoder handles.
    #[error("unsupported file type: '.{extension}'")]
    UnsupportedFormat {
        /// The offending extension, lowercased, without the leading dot. Empty when the
        /// filename has no extension at all.
        extension: String,
    },

    /// CSV decode failure (inconsistent row widths, invalid UTF-8, ...).
    #[error("malformed csv input: {0}")]
    Csv(#[from] csv::Error),

    /// Workbook decode failure (corrupt container, unreadable sheet, ...).
    #[error("malformed workbook input: {0}")]
    Workbook(#[from] calamine::Error),

    /// Structural problem in otherwise decodable input (duplicate header names,
    /// headerless input, workbook with no sheets).
    #[error("malformed input: {message}")]
    MalformedInput { message: String },

    /// Workbook serialization failure during export.
    #[error("workbook write error: {0}")]
    WorkbookWrite(#[from] rust_xlsxwriter::XlsxError),

    /// A chart was requested over a table with no numeric columns.
    #[error("no numeric columns available to chart")]
    EmptyNumericDomain,
}
