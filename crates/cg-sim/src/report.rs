//! The per-turn output handed to view collaborators.

use std::collections::{BTreeMap, BTreeSet};

use cg_core::{BucketId, Point, Status, Turn};

/// One agent drawn at `point` in the colour for `status`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mark {
    pub point:  Point,
    pub status: Status,
}

/// What a view needs after one turn.
///
/// A stateful view applies a report by erasing every bucket in `cleared` and
/// replacing the marks of every bucket in `occupied`.  The two key sets are
/// disjoint.  A stateless view can ignore `cleared` and repaint `occupied`.
///
/// Ordered collections keep reports (and anything written from them)
/// deterministic for a fixed seed.
#[derive(Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderReport {
    /// Turn that produced this report.  A discard report carries the turn of
    /// the engine's last completed turn.
    pub turn:            Turn,
    /// Buckets that held agents last turn and hold none now.
    pub cleared:         BTreeSet<BucketId>,
    /// Buckets holding at least one agent, with one mark per agent.
    pub occupied:        BTreeMap<BucketId, Vec<Mark>>,
    pub total_agents:    usize,
    pub infected_agents: usize,
}

impl RenderReport {
    #[inline]
    pub fn healthy_agents(&self) -> usize {
        self.total_agents - self.infected_agents
    }

    /// Every mark in the report, bucket by bucket.
    pub fn marks(&self) -> impl Iterator<Item = (BucketId, &Mark)> {
        self.occupied
            .iter()
            .flat_map(|(bucket, marks)| marks.iter().map(move |m| (*bucket, m)))
    }

    /// Number of marks across all occupied buckets.
    pub fn mark_count(&self) -> usize {
        self.occupied.values().map(Vec::len).sum()
    }
}
