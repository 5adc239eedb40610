//! The `OutputWriter` trait implemented by backend writers.

use crate::{MarkRow, OutputResult, TurnSummaryRow};

/// Trait implemented by report writers.
///
/// Errors are stored by [`WriterSink`][crate::WriterSink] rather than
/// surfaced per report, since sinks have no return channel.
pub trait OutputWriter {
    /// Write one turn summary row.
    fn write_summary(&mut self, row: &TurnSummaryRow) -> OutputResult<()>;

    /// Write a batch of mark rows.
    fn write_marks(&mut self, rows: &[MarkRow]) -> OutputResult<()>;

    /// Flush all underlying handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
