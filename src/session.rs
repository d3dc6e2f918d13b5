//! Per-file pipeline sessions.
//!
//! Each uploaded file gets its own [`FileSession`]: the immutable upload, the inferred
//! format, and the decoded [`Table`] that the cleaning and projection stages mutate in
//! place. A [`Session`] owns any number of independent file sessions; a file that fails
//! ingestion is recorded and skipped without affecting the others.
//!
//! [`FileSession::run`] is the explicit pipeline invocation: one pass applying the
//! user-selected [`FileOptions`] in stage order (summarize → clean → project → chart →
//! export). The cleaning operations are idempotent and projection is stable under
//! repetition, so re-running with the same options over the already-decoded table matches
//! the interaction model of a re-rendering UI.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::chart::LineChart;
use crate::error::{SweepError, SweepResult};
use crate::export::{export, Export, ExportFormat};
use crate::ingestion::{ingest_bytes, SourceFormat};
use crate::observe::{
    severity_for_error, ExportStats, FileContext, IngestStats, PipelineObserver, Severity,
};
use crate::processing::{fill_missing, project, remove_duplicates};
use crate::types::{Table, Value};

/// Preview length used when no explicit row count is configured.
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// An uploaded file: filename plus raw byte content. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Uploaded filename; its extension selects the decoder.
    pub name: String,
    /// Raw byte content.
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// Create an upload from a filename and its byte content.
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Read an upload from disk, using the path's final component as the filename.
    pub fn from_path(path: impl AsRef<Path>) -> SweepResult<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let bytes = std::fs::read(path)?;
        Ok(Self { name, bytes })
    }

    /// Byte size of the uploaded content.
    pub fn size_bytes(&self) -> usize {
        self.bytes.len()
    }
}

/// Filename, byte size, shape, and a head-of-table preview.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSummary {
    /// Uploaded filename.
    pub file_name: String,
    /// Byte size of the upload.
    pub size_bytes: usize,
    /// Current row count.
    pub rows: usize,
    /// Current column count.
    pub columns: usize,
    /// Copy of the first rows.
    pub preview: Table,
}

impl fmt::Display for TableSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} ({} bytes): {} rows x {} cols",
            self.file_name, self.size_bytes, self.rows, self.columns
        )?;
        writeln!(
            f,
            "{}",
            self.preview
                .schema
                .field_names()
                .collect::<Vec<_>>()
                .join(" | ")
        )?;
        for row in &self.preview.rows {
            writeln!(
                f,
                "{}",
                row.iter().map(render_cell).collect::<Vec<_>>().join(" | ")
            )?;
        }
        Ok(())
    }
}

fn render_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Int64(v) => v.to_string(),
        Value::Float64(v) => v.to_string(),
        Value::Bool(v) => v.to_string(),
        Value::Utf8(s) => s.clone(),
    }
}

/// The per-file surface controls, as one serializable record.
///
/// Mirrors the upload UI: a master "clean this file" toggle gating the two cleaning
/// buttons, a column multi-select, a chart toggle with its own column choice, and the
/// conversion target.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileOptions {
    /// Master toggle for the cleaning stage.
    pub clean: bool,
    /// Remove exact-duplicate rows (applies only when `clean` is set).
    pub remove_duplicates: bool,
    /// Mean-fill missing numeric cells (applies only when `clean` is set).
    pub fill_missing: bool,
    /// Columns to keep, in order; `None` keeps all columns.
    pub keep_columns: Option<Vec<String>>,
    /// Toggle for the chart stage.
    pub show_chart: bool,
    /// Numeric columns to chart; `None` charts the first two numeric columns.
    pub chart_columns: Option<Vec<String>>,
    /// Conversion target; `None` skips the export stage.
    pub export_format: Option<ExportFormat>,
}

/// Result of one [`FileSession::run`] pass.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Summary of the table as decoded (before this pass's cleaning/projection).
    pub summary: TableSummary,
    /// Chart dataset, when requested and at least one numeric column existed.
    pub chart: Option<LineChart>,
    /// Export buffer, when a conversion target was set.
    pub export: Option<Export>,
}

/// One uploaded file's pipeline state: the upload, its format tag, and the current table.
#[derive(Debug, Clone)]
pub struct FileSession {
    /// The originating upload.
    pub file: UploadedFile,
    /// Format inferred from the filename.
    pub format: SourceFormat,
    /// The decoded table, mutated in place by the cleaning and projection stages.
    pub table: Table,
}

impl FileSession {
    /// Decode an upload into a new session.
    ///
    /// Fails with [`SweepError::UnsupportedFormat`] for unrecognized extensions and with a
    /// malformed-input error when decoding fails; either way only this file is affected.
    pub fn open(file: UploadedFile) -> SweepResult<Self> {
        let (format, table) = ingest_bytes(&file.name, &file.bytes)?;
        Ok(Self {
            file,
            format,
            table,
        })
    }

    /// Summarize the current table: filename, byte size, shape, first `preview_rows` rows.
    pub fn summary(&self, preview_rows: usize) -> TableSummary {
        TableSummary {
            file_name: self.file.name.clone(),
            size_bytes: self.file.size_bytes(),
            rows: self.table.row_count(),
            columns: self.table.column_count(),
            preview: self.table.head(preview_rows),
        }
    }

    /// Remove exact-duplicate rows in place; returns the number removed.
    pub fn remove_duplicates(&mut self) -> usize {
        remove_duplicates(&mut self.table)
    }

    /// Mean-fill missing numeric cells in place; returns the number of filled cells.
    pub fn fill_missing(&mut self) -> usize {
        fill_missing(&mut self.table)
    }

    /// Narrow the table in place to `names`, in the order requested.
    pub fn keep_columns(&mut self, names: &[&str]) {
        project(&mut self.table, names);
    }

    /// Build a line chart over the current table (read-only).
    pub fn line_chart(&self, selection: Option<&[&str]>) -> SweepResult<LineChart> {
        LineChart::build(&self.table, selection)
    }

    /// Serialize the current table to `format` without mutating it.
    pub fn export(&self, format: ExportFormat) -> SweepResult<Export> {
        export(&self.table, &self.file.name, format)
    }

    /// Run one full pipeline pass over this file with the given options.
    ///
    /// Stage order: summarize, clean (when toggled), project, chart, export. A chart
    /// request over a table with no numeric columns downgrades to `chart: None`; any other
    /// failure aborts the pass for this file only.
    pub fn run(&mut self, options: &FileOptions) -> SweepResult<PipelineOutput> {
        let summary = self.summary(DEFAULT_PREVIEW_ROWS);

        if options.clean {
            if options.remove_duplicates {
                self.remove_duplicates();
            }
            if options.fill_missing {
                self.fill_missing();
            }
        }

        if let Some(names) = &options.keep_columns {
            let names: Vec<&str> = names.iter().map(String::as_str).collect();
            self.keep_columns(&names);
        }

        let chart = if options.show_chart {
            let selection: Option<Vec<&str>> = options
                .chart_columns
                .as_ref()
                .map(|cols| cols.iter().map(String::as_str).collect());
            match self.line_chart(selection.as_deref()) {
                Ok(chart) => Some(chart),
                Err(SweepError::EmptyNumericDomain) => None,
                Err(e) => return Err(e),
            }
        } else {
            None
        };

        let export = match options.export_format {
            Some(format) => Some(self.export(format)?),
            None => None,
        };

        Ok(PipelineOutput {
            summary,
            chart,
            export,
        })
    }

    fn context(&self) -> FileContext {
        FileContext {
            file_name: self.file.name.clone(),
            format: Some(self.format),
        }
    }
}

/// A file rejected at upload time, with the error that skipped it.
#[derive(Debug)]
pub struct RejectedFile {
    /// Uploaded filename.
    pub file_name: String,
    /// Why the file was skipped.
    pub error: SweepError,
}

/// Options controlling session-wide behavior.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct SessionOptions {
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn PipelineObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: Severity,
    /// Preview length for summaries produced by this session.
    pub preview_rows: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            observer: None,
            alert_at_or_above: Severity::Critical,
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }
}

impl fmt::Debug for SessionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionOptions")
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .field("preview_rows", &self.preview_rows)
            .finish()
    }
}

/// A batch of independent per-file pipeline runs.
///
/// Files are processed in upload order; an error in one file's ingestion is reported to the
/// observer, recorded in [`Session::rejected`], and does not block the other files.
#[derive(Debug, Default)]
pub struct Session {
    options: SessionOptions,
    /// Successfully decoded files, in upload order.
    pub files: Vec<FileSession>,
    /// Files skipped at upload time, in upload order.
    pub rejected: Vec<RejectedFile>,
}

impl Session {
    /// Create a session with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session with the given options.
    pub fn with_options(options: SessionOptions) -> Self {
        Self {
            options,
            files: Vec::new(),
            rejected: Vec::new(),
        }
    }

    /// Ingest one upload. Returns the index into [`Session::files`] on success; a rejected
    /// file is recorded and `None` is returned.
    pub fn upload(&mut self, file: UploadedFile) -> Option<usize> {
        let file_name = file.name.clone();
        match FileSession::open(file) {
            Ok(session) => {
                if let Some(observer) = &self.options.observer {
                    observer.on_ingested(
                        &session.context(),
                        IngestStats {
                            rows: session.table.row_count(),
                            columns: session.table.column_count(),
                        },
                    );
                }
                self.files.push(session);
                Some(self.files.len() - 1)
            }
            Err(error) => {
                let ctx = FileContext {
                    file_name: file_name.clone(),
                    format: None,
                };
                self.report_skip(&ctx, &error);
                self.rejected.push(RejectedFile { file_name, error });
                None
            }
        }
    }

    /// Ingest a batch of uploads in order; returns how many were accepted.
    pub fn upload_all(&mut self, files: impl IntoIterator<Item = UploadedFile>) -> usize {
        files
            .into_iter()
            .filter_map(|file| self.upload(file))
            .count()
    }

    /// Summarize the file at `index` using the session's preview length.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn summary(&self, index: usize) -> TableSummary {
        self.files[index].summary(self.options.preview_rows)
    }

    /// Run one pipeline pass over the file at `index`, reporting outcomes to the observer.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn run_file(
        &mut self,
        index: usize,
        options: &FileOptions,
    ) -> SweepResult<PipelineOutput> {
        let observer = self.options.observer.clone();
        let session = &mut self.files[index];
        let ctx = session.context();

        let result = session.run(options);
        if let Some(observer) = &observer {
            match &result {
                Ok(output) => {
                    if options.show_chart && output.chart.is_none() {
                        observer.on_warning(&ctx, "no numeric columns available to chart");
                    }
                    if let (Some(export), Some(format)) =
                        (&output.export, options.export_format)
                    {
                        observer.on_exported(
                            &ctx,
                            ExportStats {
                                format,
                                bytes: export.bytes.len(),
                            },
                        );
                    }
                }
                Err(error) => {
                    let severity = severity_for_error(error);
                    observer.on_skipped(&ctx, severity, error);
                    if severity >= self.options.alert_at_or_above {
                        observer.on_alert(&ctx, severity, error);
                    }
                }
            }
        }
        result
    }

    fn report_skip(&self, ctx: &FileContext, error: &SweepError) {
        if let Some(observer) = &self.options.observer {
            let severity = severity_for_error(error);
            observer.on_skipped(ctx, severity, error);
            if severity >= self.options.alert_at_or_above {
                observer.on_alert(ctx, severity, error);
            }
        }
    }
}
