//! Integration tests for cg-output.

use std::collections::{BTreeMap, BTreeSet};

use cg_core::{BucketId, Point, Status, Turn};
use cg_sim::{Mark, RenderReport};

fn mark(x: i32, y: i32, status: Status) -> Mark {
    Mark { point: Point::new(x, y), status }
}

fn report(turn: u64, cleared: &[BucketId], occupied: Vec<(BucketId, Vec<Mark>)>) -> RenderReport {
    let occupied: BTreeMap<_, _> = occupied.into_iter().collect();
    let total = occupied.values().map(Vec::len).sum();
    let infected = occupied.values().flatten().filter(|m| m.status.is_infected()).count();
    RenderReport {
        turn:            Turn(turn),
        cleared:         cleared.iter().copied().collect::<BTreeSet<_>>(),
        occupied,
        total_agents:    total,
        infected_agents: infected,
    }
}

// ── BoardView ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod view_tests {
    use super::*;
    use crate::BoardView;

    #[test]
    fn empty_view() {
        let view = BoardView::new();
        assert_eq!(view.bucket_count(), 0);
        assert_eq!(view.last_turn(), None);
        assert!(view.marks(BucketId::new(0, 0)).is_empty());
    }

    #[test]
    fn occupied_replaces_and_cleared_erases() {
        let a = BucketId::new(0, 0);
        let b = BucketId::new(5, 0);
        let mut view = BoardView::new();

        view.apply(&report(1, &[], vec![
            (a, vec![mark(1, 1, Status::Healthy), mark(2, 2, Status::Infected)]),
            (b, vec![mark(6, 1, Status::Healthy)]),
        ]));
        assert_eq!(view.mark_count(), 3);
        assert_eq!(view.infected_count(), 1);

        view.apply(&report(2, &[a], vec![(b, vec![mark(7, 2, Status::Infected)])]));
        assert!(view.marks(a).is_empty());
        assert_eq!(view.marks(b), &[mark(7, 2, Status::Infected)]);
        assert_eq!(view.last_turn(), Some(Turn(2)));
        assert_eq!(view.reports_applied(), 2);
    }

    #[test]
    fn untouched_buckets_are_kept() {
        let a = BucketId::new(0, 0);
        let b = BucketId::new(0, 5);
        let mut view = BoardView::new();
        view.apply(&report(1, &[], vec![(a, vec![mark(0, 0, Status::Healthy)])]));
        view.apply(&report(2, &[], vec![(b, vec![mark(0, 6, Status::Healthy)])]));
        assert_eq!(view.buckets().collect::<Vec<_>>(), vec![a, b]);
    }

    #[test]
    fn view_tracks_engine_population() {
        use cg_core::SimulationConfig;
        use cg_sim::EngineBuilder;

        let cfg = SimulationConfig {
            board_size:         30,
            number_of_managers: 2,
            agents_per_manager: 10,
            ..Default::default()
        };
        let mut engine = EngineBuilder::new(cfg).build().unwrap();
        let mut view = BoardView::new();
        engine.run_turns(20, &mut view);

        // Cleared erases exactly what moved away, so the view never drifts.
        assert_eq!(view.mark_count(), engine.total_agents());
        assert_eq!(view.infected_count(), engine.infected_agents());
        assert_eq!(view.buckets().collect::<BTreeSet<_>>(), engine.occupied_buckets());

        view.apply(&engine.clear_report());
        assert_eq!(view.bucket_count(), 0);
    }
}

// ── CSV ───────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use super::*;
    use crate::csv::CsvWriter;
    use crate::row::{MarkRow, TurnSummaryRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("turn_summaries.csv").exists());
        assert!(dir.path().join("marks.csv").exists());
    }

    #[test]
    fn summaries_only_skips_marks_file() {
        let dir = tmp();
        let mut w = CsvWriter::summaries_only(dir.path()).unwrap();
        w.write_marks(&MarkRow::from_report(&report(1, &[], vec![
            (BucketId::new(0, 0), vec![mark(1, 1, Status::Healthy)]),
        ])))
        .unwrap();
        w.finish().unwrap();
        assert!(!dir.path().join("marks.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("turn_summaries.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, [
            "turn",
            "total_agents",
            "infected_agents",
            "healthy_agents",
            "occupied_buckets",
            "cleared_buckets",
        ]);

        let mut rdr2 = csv::Reader::from_path(dir.path().join("marks.csv")).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers2, ["turn", "bucket_x", "bucket_y", "x", "y", "status"]);
    }

    #[test]
    fn csv_summary_values() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let r = report(3, &[BucketId::new(10, 10)], vec![
            (BucketId::new(0, 0), vec![mark(1, 1, Status::Healthy), mark(2, 2, Status::Infected)]),
        ]);
        w.write_summary(&TurnSummaryRow::from(&r)).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("turn_summaries.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].iter().collect::<Vec<_>>(), ["3", "2", "1", "1", "1", "1"]);
    }

    #[test]
    fn csv_mark_values() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let r = report(4, &[], vec![(BucketId::new(-5, 0), vec![mark(-3, 4, Status::Infected)])]);
        w.write_marks(&MarkRow::from_report(&r)).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("marks.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].iter().collect::<Vec<_>>(), ["4", "-5", "0", "-3", "4", "infected"]);
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_empty_marks_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_marks(&[]).unwrap();
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = tmp();
        let missing = dir.path().join("does-not-exist");
        assert!(CsvWriter::new(&missing).is_err());
    }
}

// ── WriterSink ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod sink_tests {
    use tempfile::TempDir;

    use super::*;
    use crate::row::{MarkRow, TurnSummaryRow};
    use crate::{CsvWriter, OutputError, OutputResult, OutputWriter, WriterSink};

    /// Fails every write with an I/O error and counts attempts.
    #[derive(Default)]
    struct FailingWriter {
        attempts: usize,
    }

    impl OutputWriter for FailingWriter {
        fn write_summary(&mut self, _: &TurnSummaryRow) -> OutputResult<()> {
            self.attempts += 1;
            Err(OutputError::Io(std::io::Error::other("disk full")))
        }

        fn write_marks(&mut self, _: &[MarkRow]) -> OutputResult<()> {
            self.attempts += 1;
            Err(OutputError::Io(std::io::Error::other("disk full")))
        }

        fn finish(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    #[test]
    fn first_error_is_stored_once() {
        use cg_sim::ReportSink;

        let mut sink = WriterSink::new(FailingWriter::default());
        let r = report(1, &[], vec![(BucketId::new(0, 0), vec![mark(0, 0, Status::Healthy)])]);
        sink.on_report(&r);
        sink.on_report(&r);

        assert!(matches!(sink.take_error(), Some(OutputError::Io(_))));
        assert!(sink.take_error().is_none());
        // Writes keep being attempted after a failure.
        assert_eq!(sink.into_writer().attempts, 4);
    }

    #[test]
    fn integration_csv() {
        use cg_core::SimulationConfig;
        use cg_sim::EngineBuilder;

        let cfg = SimulationConfig {
            board_size:         20,
            number_of_managers: 3,
            agents_per_manager: 4,
            seed:               1,
            ..Default::default()
        };
        let mut engine = EngineBuilder::new(cfg).build().unwrap();

        let dir: TempDir = tempfile::tempdir().unwrap();
        let mut sink = WriterSink::new(CsvWriter::new(dir.path()).unwrap());
        engine.run_turns(6, &mut sink);
        sink.finish();
        assert!(sink.take_error().is_none(), "no write errors expected");

        let mut rdr = csv::Reader::from_path(dir.path().join("turn_summaries.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 6);
        assert_eq!(&rows[0][0], "1");
        assert_eq!(&rows[5][0], "6");
        assert!(rows.iter().all(|r| &r[1] == "12"));

        // One mark per agent per turn.
        let mut rdr = csv::Reader::from_path(dir.path().join("marks.csv")).unwrap();
        assert_eq!(rdr.records().count(), 6 * 12);
    }
}
