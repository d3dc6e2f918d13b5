//! Observer hooks for pipeline outcomes.
//!
//! Every per-file event — ingested, skipped, warned, exported — can be reported to a
//! [`PipelineObserver`]. Implementors can record metrics, logs, or trigger alerts;
//! [`StdErrObserver`], [`FileObserver`], and [`CompositeObserver`] cover the common cases.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::SweepError;
use crate::export::ExportFormat;
use crate::ingestion::SourceFormat;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal, e.g. a chart with no numeric columns).
    Warning,
    /// Error-level event (the file was skipped).
    Error,
    /// Critical error (typically I/O or other infrastructure failures).
    Critical,
}

/// Classify an error for observer callbacks.
pub fn severity_for_error(e: &SweepError) -> Severity {
    match e {
        SweepError::Io(_) | SweepError::WorkbookWrite(_) => Severity::Critical,
        SweepError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => Severity::Critical,
            _ => Severity::Error,
        },
        SweepError::Workbook(_)
        | SweepError::MalformedInput { .. }
        | SweepError::UnsupportedFormat { .. } => Severity::Error,
        SweepError::EmptyNumericDomain => Severity::Warning,
    }
}

/// Context about the file an event concerns.
#[derive(Debug, Clone)]
pub struct FileContext {
    /// The uploaded filename.
    pub file_name: String,
    /// Inferred format, when detection got that far.
    pub format: Option<SourceFormat>,
}

/// Minimal stats reported on successful ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestStats {
    /// Number of decoded rows.
    pub rows: usize,
    /// Number of decoded columns.
    pub columns: usize,
}

/// Minimal stats reported on a completed export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportStats {
    /// Target format of the export buffer.
    pub format: ExportFormat,
    /// Size of the export buffer.
    pub bytes: usize,
}

/// Observer interface for pipeline outcomes.
pub trait PipelineObserver: Send + Sync {
    /// Called when a file decodes successfully.
    fn on_ingested(&self, _ctx: &FileContext, _stats: IngestStats) {}

    /// Called when a file is skipped (unsupported type, decode failure, run failure).
    fn on_skipped(&self, _ctx: &FileContext, _severity: Severity, _error: &SweepError) {}

    /// Called for non-fatal conditions, e.g. a chart request with no numeric columns.
    fn on_warning(&self, _ctx: &FileContext, _message: &str) {}

    /// Called when an export buffer is produced.
    fn on_exported(&self, _ctx: &FileContext, _stats: ExportStats) {}

    /// Called when a skip meets an alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_skipped`].
    fn on_alert(&self, ctx: &FileContext, severity: Severity, error: &SweepError) {
        self.on_skipped(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn PipelineObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn PipelineObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl PipelineObserver for CompositeObserver {
    fn on_ingested(&self, ctx: &FileContext, stats: IngestStats) {
        for o in &self.observers {
            o.on_ingested(ctx, stats);
        }
    }

    fn on_skipped(&self, ctx: &FileContext, severity: Severity, error: &SweepError) {
        for o in &self.observers {
            o.on_skipped(ctx, severity, error);
        }
    }

    fn on_warning(&self, ctx: &FileContext, message: &str) {
        for o in &self.observers {
            o.on_warning(ctx, message);
        }
    }

    fn on_exported(&self, ctx: &FileContext, stats: ExportStats) {
        for o in &self.observers {
            o.on_exported(ctx, stats);
        }
    }

    fn on_alert(&self, ctx: &FileContext, severity: Severity, error: &SweepError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Logs pipeline events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl PipelineObserver for StdErrObserver {
    fn on_ingested(&self, ctx: &FileContext, stats: IngestStats) {
        eprintln!(
            "[sweep][ok] file={} format={:?} rows={} cols={}",
            ctx.file_name, ctx.format, stats.rows, stats.columns
        );
    }

    fn on_skipped(&self, ctx: &FileContext, severity: Severity, error: &SweepError) {
        eprintln!(
            "[sweep][{severity:?}] file={} format={:?} err={error}",
            ctx.file_name, ctx.format
        );
    }

    fn on_warning(&self, ctx: &FileContext, message: &str) {
        eprintln!("[sweep][warn] file={} {message}", ctx.file_name);
    }

    fn on_exported(&self, ctx: &FileContext, stats: ExportStats) {
        eprintln!(
            "[sweep][export] file={} format={:?} bytes={}",
            ctx.file_name, stats.format, stats.bytes
        );
    }

    fn on_alert(&self, ctx: &FileContext, severity: Severity, error: &SweepError) {
        eprintln!(
            "[ALERT][sweep][{severity:?}] file={} format={:?} err={error}",
            ctx.file_name, ctx.format
        );
    }
}

/// Appends pipeline events to a local log file.
///
/// Writes are best-effort; failures to open/write the log file are ignored.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl PipelineObserver for FileObserver {
    fn on_ingested(&self, ctx: &FileContext, stats: IngestStats) {
        self.append_line(&format!(
            "{} ok file={} format={:?} rows={} cols={}",
            unix_ts(),
            ctx.file_name,
            ctx.format,
            stats.rows,
            stats.columns
        ));
    }

    fn on_skipped(&self, ctx: &FileContext, severity: Severity, error: &SweepError) {
        self.append_line(&format!(
            "{} skip severity={severity:?} file={} format={:?} err={error}",
            unix_ts(),
            ctx.file_name,
            ctx.format
        ));
    }

    fn on_warning(&self, ctx: &FileContext, message: &str) {
        self.append_line(&format!("{} warn file={} {message}", unix_ts(), ctx.file_name));
    }

    fn on_exported(&self, ctx: &FileContext, stats: ExportStats) {
        self.append_line(&format!(
            "{} export file={} format={:?} bytes={}",
            unix_ts(),
            ctx.file_name,
            stats.format,
            stats.bytes
        ));
    }

    fn on_alert(&self, ctx: &FileContext, severity: Severity, error: &SweepError) {
        self.append_line(&format!(
            "{} ALERT severity={severity:?} file={} format={:?} err={error}",
            unix_ts(),
            ctx.file_name,
            ctx.format
        ));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
