//! `WriterSink<W>` — bridges `ReportSink` to an `OutputWriter`.

use cg_sim::{RenderReport, ReportSink};
use tracing::warn;

use crate::row::{MarkRow, TurnSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`ReportSink`] that writes every report through an [`OutputWriter`].
///
/// Errors from the writer are stored internally because `ReportSink` has no
/// return value.  Check with [`take_error`][Self::take_error] afterwards.
pub struct WriterSink<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Flush the writer, storing any error like a write error.
    pub fn finish(&mut self) {
        let result = self.writer.finish();
        self.store_err(result);
    }

    /// Unwrap the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!(error = %e, "report output failed");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> ReportSink for WriterSink<W> {
    fn on_report(&mut self, report: &RenderReport) {
        let result = self.writer.write_summary(&TurnSummaryRow::from(report));
        self.store_err(result);

        let rows = MarkRow::from_report(report);
        if !rows.is_empty() {
            let result = self.writer.write_marks(&rows);
            self.store_err(result);
        }
    }
}
