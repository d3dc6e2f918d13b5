//! `data-sweeper` is a small library implementing a per-file tabular transform pipeline:
//! uploaded CSV or XLSX bytes decode into an in-memory [`types::Table`], which can then be
//! cleaned (drop duplicate rows, mean-fill missing numeric cells), narrowed to a column
//! subset, charted as line series, and re-exported as CSV or XLSX buffers.
//!
//! The pipeline per file is strictly sequential:
//!
//! ```text
//! ingest → summarize → clean → project → chart → export
//! ```
//!
//! Formats are chosen by filename extension (case-insensitive): `.csv` and `.xlsx` are
//! accepted, anything else is rejected with an error naming the offending extension.
//! Column types are inferred from the data — no caller-provided schema. Every failure
//! recovers at single-file granularity: in a multi-file [`session::Session`], a skipped
//! file never blocks the others.
//!
//! ## Quick example: clean and convert one file
//!
//! ```rust
//! use data_sweeper::export::ExportFormat;
//! use data_sweeper::session::{FileSession, UploadedFile};
//!
//! # fn main() -> Result<(), data_sweeper::SweepError> {
//! let csv = b"id,name,score\n1,Ada,98.5\n1,Ada,98.5\n2,Grace,\n".to_vec();
//! let mut session = FileSession::open(UploadedFile::new("people.csv", csv))?;
//!
//! session.remove_duplicates();
//! session.fill_missing();
//! session.keep_columns(&["name", "score"]);
//!
//! let export = session.export(ExportFormat::Csv)?;
//! assert_eq!(export.file_name, "people.csv");
//! assert_eq!(export.mime_type, "text/csv");
//! assert_eq!(
//!     String::from_utf8_lossy(&export.bytes),
//!     "name,score\nAda,98.5\nGrace,98.5\n"
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Batch sessions and options
//!
//! [`session::Session`] processes uploads in order and records rejections instead of
//! failing the batch; [`session::FileOptions`] captures the per-file surface controls
//! (clean toggles, column selection, chart choice, conversion target) and
//! [`session::FileSession::run`] applies them as one explicit pass:
//!
//! ```rust
//! use data_sweeper::export::ExportFormat;
//! use data_sweeper::session::{FileOptions, Session, UploadedFile};
//!
//! let mut session = Session::new();
//! let accepted = session.upload_all(vec![
//!     UploadedFile::new("scores.csv", b"name,score\na,1\na,1\nb,\n".to_vec()),
//!     UploadedFile::new("notes.txt", b"not tabular".to_vec()),
//! ]);
//! assert_eq!(accepted, 1);
//! assert_eq!(session.rejected.len(), 1);
//!
//! let options = FileOptions {
//!     clean: true,
//!     remove_duplicates: true,
//!     fill_missing: true,
//!     show_chart: true,
//!     export_format: Some(ExportFormat::Xlsx),
//!     ..Default::default()
//! };
//! let output = session.run_file(0, &options).unwrap();
//! assert_eq!(output.summary.rows, 3);
//! assert!(output.chart.is_some());
//! assert_eq!(output.export.unwrap().file_name, "scores.xlsx");
//! ```
//!
//! ## Modules
//!
//! - [`session`]: per-file session records, batch sessions, the pipeline driver
//! - [`ingestion`]: extension-based format detection and the CSV/XLSX decoders
//! - [`processing`]: in-place cleaning and projection
//! - [`chart`]: numeric line-chart series extraction
//! - [`export`]: CSV/XLSX export buffers with download metadata
//! - [`observe`]: observer hooks for per-file outcomes
//! - [`types`]: schema + in-memory table types
//! - [`error`]: the error taxonomy shared by every stage

pub mod chart;
pub mod error;
pub mod export;
pub mod ingestion;
pub mod observe;
pub mod processing;
pub mod session;
pub mod types;

pub use error::{SweepError, SweepResult};
