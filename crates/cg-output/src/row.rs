//! Plain data row types written by output backends.

use cg_core::Status;
use cg_sim::RenderReport;

/// Aggregate counts for one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnSummaryRow {
    pub turn:             u64,
    pub total_agents:     u64,
    pub infected_agents:  u64,
    pub healthy_agents:   u64,
    pub occupied_buckets: u64,
    pub cleared_buckets:  u64,
}

impl From<&RenderReport> for TurnSummaryRow {
    fn from(r: &RenderReport) -> Self {
        Self {
            turn:             r.turn.0,
            total_agents:     r.total_agents as u64,
            infected_agents:  r.infected_agents as u64,
            healthy_agents:   r.healthy_agents() as u64,
            occupied_buckets: r.occupied.len() as u64,
            cleared_buckets:  r.cleared.len() as u64,
        }
    }
}

/// One agent mark drawn during a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkRow {
    pub turn:     u64,
    pub bucket_x: i32,
    pub bucket_y: i32,
    pub x:        i32,
    pub y:        i32,
    pub status:   Status,
}

impl MarkRow {
    /// Every mark of `report`, in bucket order.
    pub fn from_report(report: &RenderReport) -> Vec<MarkRow> {
        report
            .marks()
            .map(|(bucket, mark)| MarkRow {
                turn:     report.turn.0,
                bucket_x: bucket.x,
                bucket_y: bucket.y,
                x:        mark.point.x,
                y:        mark.point.y,
                status:   mark.status,
            })
            .collect()
    }
}
