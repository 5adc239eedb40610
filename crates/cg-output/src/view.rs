//! A stateful, in-memory board built from successive render reports.

use std::collections::BTreeMap;

use cg_core::{BucketId, Turn};
use cg_sim::{Mark, RenderReport, ReportSink};

/// What a drawing surface would show: marks per bucket, as of the last
/// applied report.
///
/// Applying a report erases every `cleared` bucket and replaces the marks of
/// every `occupied` bucket.  Buckets mentioned in neither keep whatever they
/// held.
#[derive(Clone, Debug, Default)]
pub struct BoardView {
    buckets:   BTreeMap<BucketId, Vec<Mark>>,
    last_turn: Option<Turn>,
    reports:   u64,
}

impl BoardView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, report: &RenderReport) {
        for bucket in &report.cleared {
            self.buckets.remove(bucket);
        }
        for (bucket, marks) in &report.occupied {
            self.buckets.insert(*bucket, marks.clone());
        }
        self.last_turn = Some(report.turn);
        self.reports += 1;
    }

    /// Marks currently drawn in `bucket` (empty if none).
    pub fn marks(&self, bucket: BucketId) -> &[Mark] {
        self.buckets.get(&bucket).map_or(&[], Vec::as_slice)
    }

    /// Buckets that currently hold at least one mark.
    pub fn buckets(&self) -> impl Iterator<Item = BucketId> + '_ {
        self.buckets.keys().copied()
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn mark_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn infected_count(&self) -> usize {
        self.buckets
            .values()
            .flatten()
            .filter(|m| m.status.is_infected())
            .count()
    }

    /// Turn of the most recently applied report.
    pub fn last_turn(&self) -> Option<Turn> {
        self.last_turn
    }

    pub fn reports_applied(&self) -> u64 {
        self.reports
    }
}

impl ReportSink for BoardView {
    fn on_report(&mut self, report: &RenderReport) {
        self.apply(report);
    }
}
