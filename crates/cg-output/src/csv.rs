//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `turn_summaries.csv`
//! - `marks.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{MarkRow, OutputResult, TurnSummaryRow};

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    summaries: Writer<File>,
    marks:     Option<Writer<File>>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) both CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut writer = Self::summaries_only(dir)?;
        let mut marks = Writer::from_path(dir.join("marks.csv"))?;
        marks.write_record(["turn", "bucket_x", "bucket_y", "x", "y", "status"])?;
        writer.marks = Some(marks);
        Ok(writer)
    }

    /// Only `turn_summaries.csv`; mark rows are discarded.  Marks grow with
    /// population × turns, so long runs usually skip them.
    pub fn summaries_only(dir: &Path) -> OutputResult<Self> {
        let mut summaries = Writer::from_path(dir.join("turn_summaries.csv"))?;
        summaries.write_record([
            "turn",
            "total_agents",
            "infected_agents",
            "healthy_agents",
            "occupied_buckets",
            "cleared_buckets",
        ])?;
        Ok(Self { summaries, marks: None, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_summary(&mut self, row: &TurnSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.turn.to_string(),
            row.total_agents.to_string(),
            row.infected_agents.to_string(),
            row.healthy_agents.to_string(),
            row.occupied_buckets.to_string(),
            row.cleared_buckets.to_string(),
        ])?;
        Ok(())
    }

    fn write_marks(&mut self, rows: &[MarkRow]) -> OutputResult<()> {
        let Some(marks) = self.marks.as_mut() else {
            return Ok(());
        };
        for row in rows {
            marks.write_record(&[
                row.turn.to_string(),
                row.bucket_x.to_string(),
                row.bucket_y.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                row.status.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.summaries.flush()?;
        if let Some(marks) = self.marks.as_mut() {
            marks.flush()?;
        }
        Ok(())
    }
}
