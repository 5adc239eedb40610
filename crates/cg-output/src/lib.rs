//! `cg-output` — consumers of the engine's render reports.
//!
//! | Type            | Role                                                        |
//! |-----------------|-------------------------------------------------------------|
//! | [`BoardView`]   | In-memory stateful view: erases `cleared`, repaints `occupied` |
//! | [`CsvWriter`]   | `turn_summaries.csv` + `marks.csv`                          |
//! | [`WriterSink`]  | Adapts any [`OutputWriter`] into a `cg_sim::ReportSink`     |
//!
//! # Usage
//!
//! ```rust,ignore
//! use cg_output::{CsvWriter, WriterSink};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut sink = WriterSink::new(writer);
//! engine.run_turns(100, &mut sink);
//! sink.finish();
//! if let Some(e) = sink.take_error() { eprintln!("output error: {e}"); }
//! ```

pub mod csv;
pub mod error;
pub mod row;
pub mod sink;
pub mod view;
pub mod writer;

#[cfg(test)]
mod tests;

pub use self::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use row::{MarkRow, TurnSummaryRow};
pub use sink::WriterSink;
pub use view::BoardView;
pub use writer::OutputWriter;
